use std::collections::HashSet;

use super::{
  callable::{ListenerInterface, ParameterRole, ParameterSpec},
  target::TargetClass,
  types::{ClassName, TypeRef},
};
use crate::generator::{errors::InvalidFieldError, naming::identifiers::is_java_identifier};

const LISTENER_METHOD: &str = "onResult";

/// One value an activity hands back to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntity {
  pub name: String,
  pub type_ref: TypeRef,
}

impl ResultEntity {
  pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Result<Self, InvalidFieldError> {
    let name = name.into();
    if name.is_empty() {
      return Err(InvalidFieldError::EmptyName);
    }
    if !is_java_identifier(&name) {
      return Err(InvalidFieldError::InvalidName { name });
    }
    Ok(Self { name, type_ref })
  }
}

/// Callback contract of an activity that declares result types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultContract {
  listener_type: ClassName,
  listener_param_name: String,
  entities: Vec<ResultEntity>,
}

impl ResultContract {
  /// `None` when the target declares no result entities.
  pub fn new(target: &TargetClass, entities: Vec<ResultEntity>) -> Result<Option<Self>, InvalidFieldError> {
    if entities.is_empty() {
      return Ok(None);
    }

    let mut seen = HashSet::new();
    for entity in &entities {
      if !seen.insert(entity.name.as_str()) {
        return Err(InvalidFieldError::Duplicate {
          field: entity.name.clone(),
        });
      }
    }

    let simple = target.simple_name();
    Ok(Some(Self {
      listener_type: target.companion_class().nested(format!("On{simple}ResultListener")),
      listener_param_name: format!("on{simple}ResultListener"),
      entities,
    }))
  }

  #[cfg(test)]
  pub fn listener_type(&self) -> &ClassName {
    &self.listener_type
  }

  #[must_use]
  pub fn listener_param_name(&self) -> &str {
    &self.listener_param_name
  }

  #[must_use]
  pub fn entities(&self) -> &[ResultEntity] {
    &self.entities
  }

  #[must_use]
  pub fn listener_method(&self) -> &'static str {
    LISTENER_METHOD
  }

  /// The parameter the start family appends for this contract.
  #[must_use]
  pub fn listener_parameter(&self) -> ParameterSpec {
    ParameterSpec::builder()
      .name(self.listener_param_name.clone())
      .type_ref(TypeRef::class(self.listener_type.clone()))
      .role(ParameterRole::Listener)
      .nullable(true)
      .build()
  }

  #[must_use]
  pub fn listener_interface(&self) -> ListenerInterface {
    ListenerInterface::builder()
      .name(self.listener_type.clone())
      .method(LISTENER_METHOD)
      .parameters(
        self
          .entities
          .iter()
          .map(|entity| ParameterSpec::value(entity.name.clone(), entity.type_ref.clone()))
          .collect(),
      )
      .build()
  }
}

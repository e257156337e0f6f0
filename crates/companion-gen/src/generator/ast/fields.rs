use std::{
  cmp::Ordering,
  fmt::{Display, Formatter},
};

use super::types::{Primitive, TypeRef};
use crate::generator::{
  errors::InvalidFieldError,
  naming::identifiers::{is_java_identifier, is_reserved_binding},
};

/// Default for an optional field, used by the injection callable when the extra is absent.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
  Boolean(bool),
  Integer(i64),
  Float(f64),
  Text(String),
}

impl DefaultValue {
  fn accepts(&self, type_ref: &TypeRef) -> bool {
    match (self, type_ref.as_primitive()) {
      (Self::Boolean(_), Some(Primitive::Boolean)) => true,
      (Self::Integer(value), Some(primitive)) => {
        primitive.is_floating() || primitive.integral_range().is_some_and(|range| range.contains(value))
      }
      (Self::Float(_), Some(primitive)) => primitive.is_floating(),
      (Self::Text(_), None) => type_ref.is_string(),
      _ => false,
    }
  }
}

impl Display for DefaultValue {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Boolean(value) => write!(f, "{value}"),
      Self::Integer(value) => write!(f, "{value}"),
      Self::Float(value) => write!(f, "{value}"),
      Self::Text(value) => write!(f, "{value:?}"),
    }
  }
}

/// One bindable value of a target class.
///
/// Fields are ordered by `order_key`, then by name, so the required and optional sets
/// iterate identically on every run.
#[derive(Debug, Clone)]
pub struct FieldDef {
  name: String,
  type_ref: TypeRef,
  required: bool,
  order_key: u32,
  default_value: Option<DefaultValue>,
}

impl FieldDef {
  pub fn new(
    name: impl Into<String>,
    type_ref: TypeRef,
    required: bool,
    order_key: u32,
  ) -> Result<Self, InvalidFieldError> {
    let name = name.into();
    if name.is_empty() {
      return Err(InvalidFieldError::EmptyName);
    }
    if !is_java_identifier(&name) {
      return Err(InvalidFieldError::InvalidName { name });
    }
    if is_reserved_binding(&name) {
      return Err(InvalidFieldError::ReservedName { name });
    }

    Ok(Self {
      name,
      type_ref,
      required,
      order_key,
      default_value: None,
    })
  }

  /// Same as [`FieldDef::new`] but resolves the type from a descriptor string.
  pub fn parse(name: impl Into<String>, descriptor: &str, required: bool, order_key: u32) -> Result<Self, InvalidFieldError> {
    let name = name.into();
    let type_ref = TypeRef::parse(descriptor).map_err(|reason| InvalidFieldError::UnresolvedType {
      field: name.clone(),
      descriptor: descriptor.to_string(),
      reason,
    })?;
    Self::new(name, type_ref, required, order_key)
  }

  pub fn with_default(mut self, value: DefaultValue) -> Result<Self, InvalidFieldError> {
    if self.required {
      return Err(InvalidFieldError::DefaultOnRequired { field: self.name });
    }
    if !value.accepts(&self.type_ref) {
      return Err(InvalidFieldError::DefaultMismatch {
        field: self.name,
        value: value.to_string(),
        type_name: self.type_ref.to_string(),
      });
    }
    self.default_value = Some(value);
    Ok(self)
  }

  #[must_use]
  pub fn name(&self) -> &str {
    &self.name
  }

  #[must_use]
  pub fn type_ref(&self) -> &TypeRef {
    &self.type_ref
  }

  #[must_use]
  pub fn is_required(&self) -> bool {
    self.required
  }

  #[cfg(test)]
  pub fn order_key(&self) -> u32 {
    self.order_key
  }

  #[must_use]
  pub fn default_value(&self) -> Option<&DefaultValue> {
    self.default_value.as_ref()
  }
}

impl PartialEq for FieldDef {
  fn eq(&self, other: &Self) -> bool {
    self.cmp(other) == Ordering::Equal
  }
}

impl Eq for FieldDef {}

impl PartialOrd for FieldDef {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for FieldDef {
  fn cmp(&self, other: &Self) -> Ordering {
    self
      .order_key
      .cmp(&other.order_key)
      .then_with(|| self.name.cmp(&other.name))
  }
}

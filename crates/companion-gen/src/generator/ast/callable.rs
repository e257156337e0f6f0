use std::collections::BTreeSet;

use super::{
  code::Statement,
  documentation::Documentation,
  types::{ClassName, TypeRef},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum CallableKind {
  Start,
  Show,
  Inject,
  SaveState,
  FinishWithResult,
}

/// What a parameter means to the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterRole {
  /// The value the callable operates on; becomes the extension receiver in Kotlin.
  Receiver,
  #[default]
  Value,
  /// Result callback, nullable with a `null` default in Kotlin and `final` in Java.
  Listener,
}

#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct ParameterSpec {
  #[builder(into)]
  pub name: String,
  pub type_ref: TypeRef,
  #[builder(default)]
  pub role: ParameterRole,
  #[builder(default)]
  pub nullable: bool,
}

impl ParameterSpec {
  pub fn value(name: impl Into<String>, type_ref: TypeRef) -> Self {
    Self::builder().name(name).type_ref(type_ref).build()
  }

  pub fn receiver(name: impl Into<String>, type_ref: TypeRef) -> Self {
    Self::builder()
      .name(name)
      .type_ref(type_ref)
      .role(ParameterRole::Receiver)
      .build()
  }

  #[must_use]
  pub fn is_receiver(&self) -> bool {
    self.role == ParameterRole::Receiver
  }
}

/// An immutable generated method, consumed by both renderers.
#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct CallableSpec {
  #[builder(into)]
  pub name: String,
  pub kind: CallableKind,
  #[builder(default)]
  pub parameters: Vec<ParameterSpec>,
  #[builder(default)]
  pub body: Vec<Statement>,
  #[builder(default)]
  pub docs: Documentation,
}

impl CallableSpec {
  pub fn receiver(&self) -> Option<&ParameterSpec> {
    self.parameters.iter().find(|p| p.is_receiver())
  }

  #[cfg(test)]
  pub fn listener(&self) -> Option<&ParameterSpec> {
    self.parameters.iter().find(|p| p.role == ParameterRole::Listener)
  }

  /// Parameters other than the receiver, in declaration order.
  pub fn arguments(&self) -> impl Iterator<Item = &ParameterSpec> {
    self.parameters.iter().filter(|p| !p.is_receiver())
  }

  pub fn collect_classes(&self, out: &mut BTreeSet<ClassName>) {
    for parameter in &self.parameters {
      parameter.type_ref.collect_classes(out);
    }
    for statement in &self.body {
      statement.collect_classes(out);
    }
  }
}

/// `public static final String NAME = "value";`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantSpec {
  pub name: String,
  pub value: String,
}

/// Single-method callback interface nested in the companion type.
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct ListenerInterface {
  pub name: ClassName,
  #[builder(into)]
  pub method: String,
  #[builder(default)]
  pub parameters: Vec<ParameterSpec>,
}

impl ListenerInterface {
  pub fn collect_classes(&self, out: &mut BTreeSet<ClassName>) {
    for parameter in &self.parameters {
      parameter.type_ref.collect_classes(out);
    }
  }
}

/// Extra Kotlin receiver that forwards the full start callable to the receiver's context,
/// e.g. `fun View.startX(..) { context.startX(..) }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegateReceiver {
  pub receiver: ClassName,
  /// Property on `receiver` that yields the context.
  pub context_property: String,
  /// The property may be null, forwarding through `?.`.
  pub nullable: bool,
}

mod callable;
mod code;
mod documentation;
mod fields;
mod result;
mod shared;
mod target;
pub(super) mod types;


pub use callable::{
  CallableKind, CallableSpec, ConstantSpec, DelegateReceiver, ListenerInterface, ParameterRole, ParameterSpec,
};
pub use code::{AnonymousListener, Condition, Expr, Literal, LocalType, Statement};
pub use documentation::Documentation;
pub use fields::{DefaultValue, FieldDef};
pub use result::{ResultContract, ResultEntity};
pub use shared::{SharedElement, SharedElementSource};
pub use target::{DialectSelection, GenerateMode, TargetClass, TargetKind};
pub use types::{ClassName, Primitive, TypeParseError, TypeRef};

/// Everything generated for one target class, independent of the output dialect.
#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct CompanionType {
  pub name: ClassName,
  pub target: ClassName,
  pub kind: TargetKind,
  pub dialects: DialectSelection,
  #[builder(default)]
  pub docs: Documentation,
  #[builder(default)]
  pub constants: Vec<ConstantSpec>,
  /// Callable taking every required and optional field.
  pub full: CallableSpec,
  /// Windowed optional-field overloads, in enumeration order.
  #[builder(default)]
  pub variants: Vec<CallableSpec>,
  pub no_optional: CallableSpec,
  /// Kotlin receivers that forward to the full callable. Activities only.
  #[builder(default)]
  pub delegates: Vec<DelegateReceiver>,
  pub inject: CallableSpec,
  pub save_state: CallableSpec,
  pub listener: Option<ListenerInterface>,
  pub finish_with_result: Option<CallableSpec>,
}

impl CompanionType {
  /// The start/show family: full, windowed variants, then the no-optional endpoint.
  pub fn start_callables(&self) -> impl Iterator<Item = &CallableSpec> {
    std::iter::once(&self.full)
      .chain(&self.variants)
      .chain(std::iter::once(&self.no_optional))
  }

  pub fn callables(&self) -> impl Iterator<Item = &CallableSpec> {
    self
      .start_callables()
      .chain([&self.inject, &self.save_state])
      .chain(&self.finish_with_result)
  }
}

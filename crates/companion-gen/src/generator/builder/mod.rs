//! Incremental builders that turn field sets into [`CallableSpec`](crate::generator::ast::CallableSpec)s.

mod method;
mod result;
mod state;

#[cfg(test)]
mod tests;

pub use method::MethodBuilder;
pub use result::FinishWithResultBuilder;
pub use state::{InjectMethodBuilder, SaveStateMethodBuilder};

use super::{
  ast::{Expr, TargetClass},
  runtime::RuntimeTypes,
};

pub(crate) const INTENT_LOCAL: &str = "intent";
pub(crate) const TYPED_INSTANCE_LOCAL: &str = "typedInstance";

/// The class a callable is generated for, plus the runtime it calls into.
#[derive(Debug, Clone, Copy)]
pub struct CallableOwner<'a> {
  pub target: &'a TargetClass,
  pub runtime: &'a RuntimeTypes,
  pub request_code: i64,
}

impl<'a> CallableOwner<'a> {
  #[must_use]
  pub fn new(target: &'a TargetClass, runtime: &'a RuntimeTypes, request_code: i64) -> Self {
    Self {
      target,
      runtime,
      request_code,
    }
  }

  pub(crate) fn class_name(&self) -> String {
    self.target.class.canonical_name()
  }

  /// `ActivityBuilder.INSTANCE.inject()`: lets the runtime bind pending extras once the
  /// started component is created.
  pub(crate) fn run_injection(&self) -> Expr {
    Expr::runtime_call(self.runtime.activity_builder.clone(), "inject", vec![])
  }
}

use thiserror::Error;

use super::ast::TypeParseError;

/// A field descriptor the front end handed over in a shape that cannot be bound.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidFieldError {
  #[error("field name must not be empty")]
  EmptyName,
  #[error("field name '{name}' is not a valid identifier")]
  InvalidName { name: String },
  #[error("field name '{name}' collides with a parameter of the generated methods")]
  ReservedName { name: String },
  #[error("field '{field}' has unresolved type '{descriptor}': {reason}")]
  UnresolvedType {
    field: String,
    descriptor: String,
    reason: TypeParseError,
  },
  #[error("field '{field}' declares default {value}, which does not fit type '{type_name}'")]
  DefaultMismatch {
    field: String,
    value: String,
    type_name: String,
  },
  #[error("required field '{field}' cannot declare a default value")]
  DefaultOnRequired { field: String },
  #[error("field '{field}' is declared more than once")]
  Duplicate { field: String },
}

/// Misuse of a method builder. These are contract violations inside the generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
  #[error("method '{method}' of '{class}' was finalized twice")]
  DoubleFinalize { class: String, method: String },
  #[error("method '{method}' of '{class}' was built before it was finalized")]
  NotFinalized { class: String, method: String },
}

/// Anything that aborts generation of a single target class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
  #[error(transparent)]
  InvalidField(#[from] InvalidFieldError),
  #[error(transparent)]
  Builder(#[from] BuilderError),
  #[error("invalid target class '{class}': {reason}")]
  InvalidTarget { class: String, reason: String },
  #[error("callable '{name}' is generated more than once for '{class}'")]
  DuplicateCallable { class: String, name: String },
}

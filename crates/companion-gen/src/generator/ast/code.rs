//! Dialect-neutral statement and expression tree for generated callable bodies.
//!
//! The tree only describes what a body does. The Java renderer spells it with `new`,
//! casts and getters; the Kotlin renderer with constructor calls, `as`, property access
//! and `if` expressions.

use std::collections::BTreeSet;

use super::{
  callable::ParameterSpec,
  types::{ClassName, Primitive, TypeRef},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
  Null,
  Boolean(bool),
  Integer(i64, Primitive),
  Float(f64, Primitive),
  Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
  /// A parameter or local. The Kotlin renderer spells the receiver parameter as `this`.
  Ident(String),
  Literal(Literal),
  /// `Foo.class` / `Foo::class.java`
  ClassLiteral(ClassName),
  New {
    class: ClassName,
    diamond: bool,
    args: Vec<Expr>,
  },
  Cast {
    class: ClassName,
    expr: Box<Expr>,
  },
  Call {
    target: Box<Expr>,
    method: String,
    type_args: Vec<TypeRef>,
    args: Vec<Expr>,
  },
  /// Bean property read: `target.getName()` / `target.name`
  Property {
    target: Box<Expr>,
    name: String,
  },
  Field {
    target: Box<Expr>,
    name: String,
  },
  StaticCall {
    owner: ClassName,
    method: String,
    type_args: Vec<TypeRef>,
    args: Vec<Expr>,
  },
  /// Call on a singleton of the generated code's runtime (`X.INSTANCE.m()` / `X.m()`).
  RuntimeCall {
    object: ClassName,
    method: String,
    type_args: Vec<TypeRef>,
    args: Vec<Expr>,
  },
  StaticField {
    owner: ClassName,
    name: String,
  },
  Conditional {
    condition: Box<Condition>,
    then: Box<Expr>,
    otherwise: Box<Expr>,
  },
  /// Asserts a platform value is present; Kotlin spells it `!!`, Java passes it through.
  NonNull(Box<Expr>),
  AnonymousListener(Box<AnonymousListener>),
}

impl Expr {
  pub fn ident(name: impl Into<String>) -> Self {
    Self::Ident(name.into())
  }

  pub fn text(value: impl Into<String>) -> Self {
    Self::Literal(Literal::Text(value.into()))
  }

  #[must_use]
  pub fn null() -> Self {
    Self::Literal(Literal::Null)
  }

  #[must_use]
  pub fn int(value: i64) -> Self {
    Self::Literal(Literal::Integer(value, Primitive::Int))
  }

  pub fn new_instance(class: ClassName, args: Vec<Expr>) -> Self {
    Self::New {
      class,
      diamond: false,
      args,
    }
  }

  pub fn new_diamond(class: ClassName, args: Vec<Expr>) -> Self {
    Self::New {
      class,
      diamond: true,
      args,
    }
  }

  pub fn cast(class: ClassName, expr: Expr) -> Self {
    Self::Cast {
      class,
      expr: Box::new(expr),
    }
  }

  #[must_use]
  pub fn call(self, method: impl Into<String>, args: Vec<Expr>) -> Self {
    Self::Call {
      target: Box::new(self),
      method: method.into(),
      type_args: vec![],
      args,
    }
  }

  #[must_use]
  pub fn call_typed(self, method: impl Into<String>, type_args: Vec<TypeRef>, args: Vec<Expr>) -> Self {
    Self::Call {
      target: Box::new(self),
      method: method.into(),
      type_args,
      args,
    }
  }

  #[must_use]
  pub fn property(self, name: impl Into<String>) -> Self {
    Self::Property {
      target: Box::new(self),
      name: name.into(),
    }
  }

  #[must_use]
  pub fn field(self, name: impl Into<String>) -> Self {
    Self::Field {
      target: Box::new(self),
      name: name.into(),
    }
  }

  pub fn static_call(owner: ClassName, method: impl Into<String>, args: Vec<Expr>) -> Self {
    Self::StaticCall {
      owner,
      method: method.into(),
      type_args: vec![],
      args,
    }
  }

  pub fn runtime_call(object: ClassName, method: impl Into<String>, args: Vec<Expr>) -> Self {
    Self::RuntimeCall {
      object,
      method: method.into(),
      type_args: vec![],
      args,
    }
  }

  pub fn runtime_call_typed(
    object: ClassName,
    method: impl Into<String>,
    type_args: Vec<TypeRef>,
    args: Vec<Expr>,
  ) -> Self {
    Self::RuntimeCall {
      object,
      method: method.into(),
      type_args,
      args,
    }
  }

  pub fn non_null(expr: Expr) -> Self {
    Self::NonNull(Box::new(expr))
  }

  pub fn conditional(condition: Condition, then: Expr, otherwise: Expr) -> Self {
    Self::Conditional {
      condition: Box::new(condition),
      then: Box::new(then),
      otherwise: Box::new(otherwise),
    }
  }

  pub fn static_field(owner: ClassName, name: impl Into<String>) -> Self {
    Self::StaticField {
      owner,
      name: name.into(),
    }
  }

  pub fn collect_classes(&self, out: &mut BTreeSet<ClassName>) {
    match self {
      Self::Ident(_) | Self::Literal(_) => {}
      Self::ClassLiteral(class) => {
        out.insert(class.clone());
      }
      Self::New { class, args, .. } => {
        out.insert(class.clone());
        collect_all(args, out);
      }
      Self::Cast { class, expr } => {
        out.insert(class.clone());
        expr.collect_classes(out);
      }
      Self::Call {
        target, type_args, args, ..
      } => {
        target.collect_classes(out);
        for type_arg in type_args {
          type_arg.collect_classes(out);
        }
        collect_all(args, out);
      }
      Self::Property { target, .. } | Self::Field { target, .. } => target.collect_classes(out),
      Self::StaticCall {
        owner, type_args, args, ..
      } => {
        out.insert(owner.clone());
        for type_arg in type_args {
          type_arg.collect_classes(out);
        }
        collect_all(args, out);
      }
      Self::RuntimeCall {
        object, type_args, args, ..
      } => {
        out.insert(object.clone());
        for type_arg in type_args {
          type_arg.collect_classes(out);
        }
        collect_all(args, out);
      }
      Self::StaticField { owner, .. } => {
        out.insert(owner.clone());
      }
      Self::Conditional {
        condition,
        then,
        otherwise,
      } => {
        condition.collect_classes(out);
        then.collect_classes(out);
        otherwise.collect_classes(out);
      }
      Self::NonNull(expr) => expr.collect_classes(out),
      Self::AnonymousListener(listener) => listener.collect_classes(out),
    }
  }
}

fn collect_all(exprs: &[Expr], out: &mut BTreeSet<ClassName>) {
  for expr in exprs {
    expr.collect_classes(out);
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
  InstanceOf { expr: Expr, class: ClassName },
  IsNull(Expr),
  NotNull(Expr),
  Equals(Expr, Expr),
}

impl Condition {
  pub fn collect_classes(&self, out: &mut BTreeSet<ClassName>) {
    match self {
      Self::InstanceOf { expr, class } => {
        out.insert(class.clone());
        expr.collect_classes(out);
      }
      Self::IsNull(expr) | Self::NotNull(expr) => expr.collect_classes(out),
      Self::Equals(left, right) => {
        left.collect_classes(out);
        right.collect_classes(out);
      }
    }
  }
}

/// How a local declares its type. Java always spells the type; Kotlin only when `Declared`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalType {
  Inferred(TypeRef),
  Declared(TypeRef),
}

impl LocalType {
  #[must_use]
  pub fn type_ref(&self) -> &TypeRef {
    match self {
      Self::Inferred(type_ref) | Self::Declared(type_ref) => type_ref,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
  Expr(Expr),
  Local {
    name: String,
    ty: LocalType,
    init: Expr,
  },
  Assign {
    target: Expr,
    value: Expr,
  },
  If {
    condition: Condition,
    then: Vec<Statement>,
    otherwise: Vec<Statement>,
  },
}

impl Statement {
  pub fn local(name: impl Into<String>, ty: LocalType, init: Expr) -> Self {
    Self::Local {
      name: name.into(),
      ty,
      init,
    }
  }

  pub fn when(condition: Condition, then: Vec<Statement>) -> Self {
    Self::If {
      condition,
      then,
      otherwise: vec![],
    }
  }

  pub fn collect_classes(&self, out: &mut BTreeSet<ClassName>) {
    match self {
      Self::Expr(expr) => expr.collect_classes(out),
      Self::Local { ty, init, .. } => {
        ty.type_ref().collect_classes(out);
        init.collect_classes(out);
      }
      Self::Assign { target, value } => {
        target.collect_classes(out);
        value.collect_classes(out);
      }
      Self::If {
        condition,
        then,
        otherwise,
      } => {
        condition.collect_classes(out);
        for statement in then.iter().chain(otherwise) {
          statement.collect_classes(out);
        }
      }
    }
  }
}

impl From<Expr> for Statement {
  fn from(expr: Expr) -> Self {
    Self::Expr(expr)
  }
}

/// An anonymous implementation of a single-method interface.
#[derive(Debug, Clone, PartialEq)]
pub struct AnonymousListener {
  pub interface: ClassName,
  pub method: String,
  pub parameters: Vec<ParameterSpec>,
  pub body: Vec<Statement>,
}

impl AnonymousListener {
  pub fn collect_classes(&self, out: &mut BTreeSet<ClassName>) {
    out.insert(self.interface.clone());
    for parameter in &self.parameters {
      parameter.type_ref.collect_classes(out);
    }
    for statement in &self.body {
      statement.collect_classes(out);
    }
  }
}

use std::collections::BTreeSet;

use itertools::Itertools;

use super::{
  imports::ImportSet,
  writer::{CodeWriter, float_literal, quote},
};
use crate::generator::{
  ast::{
    AnonymousListener, CallableSpec, ClassName, CompanionType, Condition, Expr, ListenerInterface, Literal,
    ParameterRole, ParameterSpec, Primitive, Statement, TypeRef,
  },
  naming::identifiers::capitalize,
};

/// Statement-oriented rendering: one `public final class` holding static methods.
pub struct JavaRenderer<'a> {
  companion: &'a CompanionType,
  imports: ImportSet,
}

impl<'a> JavaRenderer<'a> {
  #[must_use]
  pub fn new(companion: &'a CompanionType) -> Self {
    let mut classes = BTreeSet::new();
    for callable in Self::members(companion) {
      callable.collect_classes(&mut classes);
    }
    if let Some(listener) = &companion.listener {
      listener.collect_classes(&mut classes);
    }

    let reserved: Vec<&str> = companion
      .listener
      .iter()
      .map(|listener| listener.name.simple_name())
      .collect();
    let imports = ImportSet::new(companion.name.package(), &companion.name, &reserved, &classes);
    Self { companion, imports }
  }

  /// Callables that go into the Java class, in output order.
  fn members(companion: &CompanionType) -> Vec<&CallableSpec> {
    let mut members = vec![];
    if companion.dialects.java {
      members.extend(companion.start_callables());
      members.extend(&companion.finish_with_result);
    }
    members.push(&companion.inject);
    members.push(&companion.save_state);
    members
  }

  #[must_use]
  pub fn render(&self, header: &str) -> String {
    let companion = self.companion;
    let mut w = CodeWriter::new();
    w.line(header.trim_end());
    w.blank();

    if !self.imports.package().is_empty() {
      w.line(format!("package {};", self.imports.package()));
      w.blank();
    }
    let mut has_imports = false;
    for import in self.imports.imports() {
      w.line(format!("import {import};"));
      has_imports = true;
    }
    if has_imports {
      w.blank();
    }

    w.doc_comment(companion.docs.lines());
    w.open(format!("public final class {}", companion.name.simple_name()));

    for constant in &companion.constants {
      w.line(format!(
        "public static final String {} = {};",
        constant.name,
        quote(&constant.value, false)
      ));
    }
    w.blank();

    w.open(format!("private {}()", companion.name.simple_name()));
    w.close("}");

    for callable in Self::members(companion) {
      w.blank();
      self.write_callable(&mut w, callable);
    }

    if let Some(listener) = &companion.listener {
      w.blank();
      self.write_listener(&mut w, listener);
    }

    w.close("}");
    w.finish()
  }

  fn write_callable(&self, w: &mut CodeWriter, callable: &CallableSpec) {
    w.doc_comment(callable.docs.lines());
    w.open(format!(
      "public static void {}({})",
      callable.name,
      self.parameters(&callable.parameters)
    ));
    self.write_statements(w, &callable.body);
    w.close("}");
  }

  fn write_listener(&self, w: &mut CodeWriter, listener: &ListenerInterface) {
    w.open(format!("public interface {}", listener.name.simple_name()));
    w.line(format!(
      "void {}({});",
      listener.method,
      self.parameters(&listener.parameters)
    ));
    w.close("}");
  }

  fn parameters(&self, parameters: &[ParameterSpec]) -> String {
    parameters
      .iter()
      .map(|parameter| {
        let modifier = if parameter.role == ParameterRole::Listener {
          "final "
        } else {
          ""
        };
        format!("{modifier}{} {}", self.type_name(&parameter.type_ref), parameter.name)
      })
      .join(", ")
  }

  fn type_name(&self, type_ref: &TypeRef) -> String {
    match type_ref {
      TypeRef::Primitive(primitive) => primitive.to_string(),
      TypeRef::Declared { class, arguments } if arguments.is_empty() => self.imports.name(class),
      TypeRef::Declared { class, arguments } => format!(
        "{}<{}>",
        self.imports.name(class),
        arguments.iter().map(|argument| self.type_name(argument)).join(", ")
      ),
      TypeRef::Array(component) => format!("{}[]", self.type_name(component)),
    }
  }

  fn class_name(&self, class: &ClassName) -> String {
    self.imports.name(class)
  }

  fn write_statements(&self, w: &mut CodeWriter, statements: &[Statement]) {
    for statement in statements {
      self.write_statement(w, statement);
    }
  }

  fn write_statement(&self, w: &mut CodeWriter, statement: &Statement) {
    let depth = w.depth();
    match statement {
      Statement::Expr(expr) => w.line(format!("{};", self.expr(expr, depth))),
      Statement::Local { name, ty, init } => w.line(format!(
        "{} {name} = {};",
        self.type_name(ty.type_ref()),
        self.expr(init, depth)
      )),
      Statement::Assign { target, value } => w.line(format!(
        "{} = {};",
        self.expr(target, depth),
        self.expr(value, depth)
      )),
      Statement::If {
        condition,
        then,
        otherwise,
      } => {
        w.open(format!("if ({})", self.condition(condition, depth)));
        self.write_statements(w, then);
        if otherwise.is_empty() {
          w.close("}");
        } else {
          w.reopen("else");
          self.write_statements(w, otherwise);
          w.close("}");
        }
      }
    }
  }

  fn condition(&self, condition: &Condition, depth: usize) -> String {
    match condition {
      Condition::InstanceOf { expr, class } => {
        format!("{} instanceof {}", self.expr(expr, depth), self.class_name(class))
      }
      Condition::IsNull(expr) => format!("{} == null", self.expr(expr, depth)),
      Condition::NotNull(expr) => format!("{} != null", self.expr(expr, depth)),
      Condition::Equals(left, right) => format!("{} == {}", self.expr(left, depth), self.expr(right, depth)),
    }
  }

  fn args(&self, args: &[Expr], depth: usize) -> String {
    args.iter().map(|arg| self.expr(arg, depth)).join(", ")
  }

  fn type_args(&self, type_args: &[TypeRef]) -> String {
    if type_args.is_empty() {
      String::new()
    } else {
      format!("<{}>", type_args.iter().map(|t| self.type_name(t)).join(", "))
    }
  }

  /// Receiver of a member access; casts and conditionals need parentheses there.
  fn target(&self, target: &Expr, depth: usize) -> String {
    let rendered = self.expr(target, depth);
    match target {
      Expr::Cast { .. } | Expr::Conditional { .. } => format!("({rendered})"),
      _ => rendered,
    }
  }

  fn expr(&self, expr: &Expr, depth: usize) -> String {
    match expr {
      Expr::Ident(name) => name.clone(),
      Expr::Literal(literal) => literal_text(literal),
      Expr::ClassLiteral(class) => format!("{}.class", self.class_name(class)),
      Expr::New { class, diamond, args } => format!(
        "new {}{}({})",
        self.class_name(class),
        if *diamond { "<>" } else { "" },
        self.args(args, depth)
      ),
      Expr::Cast { class, expr } => format!("({}) {}", self.class_name(class), self.target(expr, depth)),
      Expr::Call {
        target,
        method,
        type_args,
        args,
      } => format!(
        "{}.{}{method}({})",
        self.target(target, depth),
        self.type_args(type_args),
        self.args(args, depth)
      ),
      Expr::Property { target, name } => format!("{}.get{}()", self.target(target, depth), capitalize(name)),
      Expr::Field { target, name } => format!("{}.{name}", self.target(target, depth)),
      Expr::StaticCall {
        owner,
        method,
        type_args,
        args,
      } => format!(
        "{}.{}{method}({})",
        self.class_name(owner),
        self.type_args(type_args),
        self.args(args, depth)
      ),
      Expr::RuntimeCall {
        object,
        method,
        type_args,
        args,
      } => format!(
        "{}.INSTANCE.{}{method}({})",
        self.class_name(object),
        self.type_args(type_args),
        self.args(args, depth)
      ),
      Expr::StaticField { owner, name } => format!("{}.{name}", self.class_name(owner)),
      Expr::Conditional {
        condition,
        then,
        otherwise,
      } => format!(
        "{} ? {} : {}",
        self.condition(condition, depth),
        self.expr(then, depth),
        self.expr(otherwise, depth)
      ),
      Expr::NonNull(inner) => self.expr(inner, depth),
      Expr::AnonymousListener(listener) => self.anonymous(listener, depth),
    }
  }

  fn anonymous(&self, listener: &AnonymousListener, depth: usize) -> String {
    let mut w = CodeWriter::at_depth(depth + 1);
    w.line("@Override");
    w.open(format!(
      "public void {}({})",
      listener.method,
      self.parameters(&listener.parameters)
    ));
    self.write_statements(&mut w, &listener.body);
    w.close("}");
    format!(
      "new {}() {{\n{}\n{}}}",
      self.class_name(&listener.interface),
      w.finish_inline(),
      super::writer::indentation(depth)
    )
  }
}

fn literal_text(literal: &Literal) -> String {
  match literal {
    Literal::Null => "null".to_string(),
    Literal::Boolean(value) => value.to_string(),
    Literal::Integer(value, primitive) => match primitive {
      Primitive::Long => format!("{value}L"),
      Primitive::Short | Primitive::Byte | Primitive::Char => format!("({primitive}) {value}"),
      _ => value.to_string(),
    },
    Literal::Float(value, Primitive::Float) => format!("{}f", float_literal(*value)),
    Literal::Float(value, _) => float_literal(*value),
    Literal::Text(value) => quote(value, false),
  }
}

use std::collections::BTreeSet;

use itertools::Itertools;

use super::{
  imports::ImportSet,
  writer::{CodeWriter, float_literal, indentation, quote},
};
use crate::generator::{
  ast::{
    AnonymousListener, CallableKind, CallableSpec, ClassName, CompanionType, Condition, DelegateReceiver, Expr,
    Literal, LocalType, ParameterRole, ParameterSpec, Primitive, Statement, TypeRef,
  },
  naming::identifiers::{capitalize, to_kotlin_identifier},
};

/// Expression-oriented rendering: top-level extension functions on the receiver parameter.
pub struct KotlinRenderer<'a> {
  companion: &'a CompanionType,
  imports: ImportSet,
}

/// Name of the receiver parameter of the callable being rendered; it is spelled `this`.
#[derive(Clone, Copy)]
struct Scope<'s> {
  receiver: Option<&'s str>,
  depth: usize,
}

impl<'a> KotlinRenderer<'a> {
  #[must_use]
  pub fn new(companion: &'a CompanionType) -> Self {
    let mut classes = BTreeSet::new();
    for callable in Self::members(companion) {
      callable.collect_classes(&mut classes);
    }
    for delegate in &companion.delegates {
      classes.insert(delegate.receiver.clone());
    }
    classes.retain(|class| kotlin_builtin(class).is_none());

    let imports = ImportSet::new(companion.name.package(), &companion.name, &[], &classes);
    Self { companion, imports }
  }

  fn members(companion: &CompanionType) -> Vec<&CallableSpec> {
    companion
      .start_callables()
      .chain(&companion.finish_with_result)
      .collect()
  }

  /// Start/show callables carry the target's simple name so extensions of different
  /// targets do not clash on a shared receiver: `start` becomes `startUserActivity`.
  fn function_name(&self, callable: &CallableSpec) -> String {
    let simple = self.companion.target.simple_name();
    let verb = match callable.kind {
      CallableKind::Start => "start",
      CallableKind::Show => "show",
      _ => return callable.name.clone(),
    };
    match callable.name.strip_prefix(verb) {
      Some(rest) => format!("{verb}{simple}{rest}"),
      None => format!("{}{simple}", callable.name),
    }
  }

  #[must_use]
  pub fn render(&self, header: &str) -> String {
    let companion = self.companion;
    let mut w = CodeWriter::new();
    w.line(header.trim_end());
    w.blank();

    if !self.imports.package().is_empty() {
      w.line(format!("package {}", self.imports.package()));
      w.blank();
    }
    let mut has_imports = false;
    for import in self.imports.imports() {
      w.line(format!("import {import}"));
      has_imports = true;
    }
    if has_imports {
      w.blank();
    }

    self.write_function(&mut w, &companion.full);
    for delegate in &companion.delegates {
      w.blank();
      self.write_delegate(&mut w, &companion.full, delegate);
    }
    for callable in companion.variants.iter().chain([&companion.no_optional]) {
      w.blank();
      self.write_function(&mut w, callable);
    }
    if let Some(finish) = &companion.finish_with_result {
      w.blank();
      self.write_function(&mut w, finish);
    }

    w.finish()
  }

  fn write_function(&self, w: &mut CodeWriter, callable: &CallableSpec) {
    let receiver = callable.receiver();
    let prefix = receiver.map_or_else(String::new, |r| format!("{}.", self.type_name(&r.type_ref, false)));

    w.doc_comment(callable.docs.lines());
    w.open(format!(
      "fun {prefix}{}({})",
      self.function_name(callable),
      self.parameters(callable.arguments())
    ));
    let scope = Scope {
      receiver: receiver.map(|r| r.name.as_str()),
      depth: w.depth(),
    };
    self.write_statements(w, &callable.body, scope);
    w.close("}");
  }

  /// `fun View.startUserActivity(...) { context.startUserActivity(...) }`
  fn write_delegate(&self, w: &mut CodeWriter, callable: &CallableSpec, delegate: &DelegateReceiver) {
    let name = self.function_name(callable);
    w.open(format!(
      "fun {}.{name}({})",
      self.imports.name(&delegate.receiver),
      self.parameters(callable.arguments())
    ));
    let forwarded = callable
      .arguments()
      .map(|parameter| to_kotlin_identifier(&parameter.name))
      .join(", ");
    let access = if delegate.nullable { "?." } else { "." };
    w.line(format!("{}{access}{name}({forwarded})", delegate.context_property));
    w.close("}");
  }

  fn parameters<'p>(&self, parameters: impl Iterator<Item = &'p ParameterSpec>) -> String {
    parameters
      .map(|parameter| {
        let name = to_kotlin_identifier(&parameter.name);
        let ty = self.type_name(&parameter.type_ref, parameter.nullable);
        if parameter.role == ParameterRole::Listener {
          format!("{name}: {ty} = null")
        } else {
          format!("{name}: {ty}")
        }
      })
      .join(", ")
  }

  fn type_name(&self, type_ref: &TypeRef, nullable: bool) -> String {
    let base = match type_ref {
      TypeRef::Primitive(primitive) => primitive.kotlin_name().to_string(),
      TypeRef::Declared { class, arguments } => {
        let name = kotlin_builtin(class).map_or_else(|| self.imports.name(class), ToString::to_string);
        if arguments.is_empty() {
          name
        } else {
          format!(
            "{name}<{}>",
            arguments.iter().map(|argument| self.type_name(argument, false)).join(", ")
          )
        }
      }
      TypeRef::Array(component) => match component.as_primitive() {
        Some(primitive) => format!("{}Array", primitive.kotlin_name()),
        None => format!("Array<{}>", self.type_name(component, false)),
      },
    };
    if nullable { format!("{base}?") } else { base }
  }

  fn class_name(&self, class: &ClassName) -> String {
    kotlin_builtin(class).map_or_else(|| self.imports.name(class), ToString::to_string)
  }

  fn write_statements(&self, w: &mut CodeWriter, statements: &[Statement], scope: Scope<'_>) {
    for statement in statements {
      self.write_statement(w, statement, Scope {
        depth: w.depth(),
        ..scope
      });
    }
  }

  fn write_statement(&self, w: &mut CodeWriter, statement: &Statement, scope: Scope<'_>) {
    match statement {
      Statement::Expr(expr) => w.line(self.expr(expr, scope)),
      Statement::Local { name, ty, init } => {
        let name = to_kotlin_identifier(name);
        match ty {
          LocalType::Inferred(_) => w.line(format!("val {name} = {}", self.expr(init, scope))),
          LocalType::Declared(type_ref) => w.line(format!(
            "val {name}: {} = {}",
            self.type_name(type_ref, false),
            self.expr(init, scope)
          )),
        }
      }
      Statement::Assign { target, value } => {
        w.line(format!("{} = {}", self.expr(target, scope), self.expr(value, scope)));
      }
      Statement::If {
        condition,
        then,
        otherwise,
      } => {
        w.open(format!("if ({})", self.condition(condition, scope)));
        self.write_statements(w, then, scope);
        if otherwise.is_empty() {
          w.close("}");
        } else {
          w.reopen("else");
          self.write_statements(w, otherwise, scope);
          w.close("}");
        }
      }
    }
  }

  fn condition(&self, condition: &Condition, scope: Scope<'_>) -> String {
    match condition {
      Condition::InstanceOf { expr, class } => format!("{} is {}", self.expr(expr, scope), self.class_name(class)),
      Condition::IsNull(expr) => format!("{} == null", self.expr(expr, scope)),
      Condition::NotNull(expr) => format!("{} != null", self.expr(expr, scope)),
      Condition::Equals(left, right) => format!("{} == {}", self.expr(left, scope), self.expr(right, scope)),
    }
  }

  fn args(&self, args: &[Expr], scope: Scope<'_>) -> String {
    args.iter().map(|arg| self.expr(arg, scope)).join(", ")
  }

  fn type_args(&self, type_args: &[TypeRef]) -> String {
    if type_args.is_empty() {
      String::new()
    } else {
      format!("<{}>", type_args.iter().map(|t| self.type_name(t, false)).join(", "))
    }
  }

  fn is_receiver(expr: &Expr, scope: Scope<'_>) -> bool {
    matches!((expr, scope.receiver), (Expr::Ident(name), Some(receiver)) if name == receiver)
  }

  /// `target.` prefix of a member access, dropped for the implicit receiver.
  fn member_prefix(&self, target: &Expr, scope: Scope<'_>) -> String {
    if Self::is_receiver(target, scope) {
      String::new()
    } else {
      format!("{}.", self.expr(target, scope))
    }
  }

  fn expr(&self, expr: &Expr, scope: Scope<'_>) -> String {
    match expr {
      Expr::Ident(_) if Self::is_receiver(expr, scope) => "this".to_string(),
      Expr::Ident(name) => to_kotlin_identifier(name),
      Expr::Literal(literal) => literal_text(literal),
      Expr::ClassLiteral(class) => format!("{}::class.java", self.class_name(class)),
      Expr::New { class, args, .. } => format!("{}({})", self.class_name(class), self.args(args, scope)),
      Expr::Cast { class, expr } => format!("({} as {})", self.expr(expr, scope), self.class_name(class)),
      Expr::Call {
        target,
        method,
        type_args,
        args,
      } => format!(
        "{}{method}{}({})",
        self.member_prefix(target, scope),
        self.type_args(type_args),
        self.args(args, scope)
      ),
      Expr::Property { target, name } | Expr::Field { target, name } => {
        format!("{}{name}", self.member_prefix(target, scope))
      }
      Expr::StaticCall {
        owner,
        method,
        type_args,
        args,
      } => format!(
        "{}.{method}{}({})",
        self.class_name(owner),
        self.type_args(type_args),
        self.args(args, scope)
      ),
      Expr::RuntimeCall {
        object,
        method,
        type_args,
        args,
      } => format!(
        "{}.{method}{}({})",
        self.class_name(object),
        self.type_args(type_args),
        self.args(args, scope)
      ),
      Expr::StaticField { owner, name } => format!("{}.{name}", self.class_name(owner)),
      Expr::Conditional {
        condition,
        then,
        otherwise,
      } => format!(
        "if ({}) {} else {}",
        self.condition(condition, scope),
        self.expr(then, scope),
        self.expr(otherwise, scope)
      ),
      Expr::NonNull(inner) => format!("{}!!", self.expr(inner, scope)),
      Expr::AnonymousListener(listener) => self.anonymous(listener, scope),
    }
  }

  fn anonymous(&self, listener: &AnonymousListener, scope: Scope<'_>) -> String {
    let mut w = CodeWriter::at_depth(scope.depth + 1);
    w.open(format!(
      "override fun {}({})",
      listener.method,
      self.parameters(listener.parameters.iter())
    ));
    // Inside the object `this` is the listener, so the outer receiver is not implicit.
    let inner = Scope {
      receiver: None,
      depth: w.depth(),
    };
    self.write_statements(&mut w, &listener.body, inner);
    w.close("}");
    format!(
      "object : {} {{\n{}\n{}}}",
      self.class_name(&listener.interface),
      w.finish_inline(),
      indentation(scope.depth)
    )
  }
}

/// Kotlin spelling of `java.lang` types, which are never imported.
fn kotlin_builtin(class: &ClassName) -> Option<&'static str> {
  if class.package() != "java.lang" || class.is_nested() {
    return None;
  }
  Some(match class.simple_name() {
    "Object" => "Any",
    "String" => "String",
    "CharSequence" => "CharSequence",
    "Integer" => "Int",
    "Character" => "Char",
    "Boolean" => "Boolean",
    "Byte" => "Byte",
    "Short" => "Short",
    "Long" => "Long",
    "Float" => "Float",
    "Double" => "Double",
    _ => return None,
  })
}

fn literal_text(literal: &Literal) -> String {
  match literal {
    Literal::Null => "null".to_string(),
    Literal::Boolean(value) => value.to_string(),
    Literal::Integer(value, primitive) => match primitive {
      Primitive::Long => format!("{value}L"),
      Primitive::Short | Primitive::Byte | Primitive::Char => {
        format!("{value}.to{}()", capitalize(primitive.kotlin_name()))
      }
      _ => value.to_string(),
    },
    Literal::Float(value, Primitive::Float) => format!("{}f", float_literal(*value)),
    Literal::Float(value, _) => float_literal(*value),
    Literal::Text(value) => quote(value, true),
  }
}

use super::{CallableOwner, INTENT_LOCAL, TYPED_INSTANCE_LOCAL};
use crate::generator::{
  ast::{
    CallableKind, CallableSpec, Condition, DefaultValue, Documentation, Expr, FieldDef, Literal, LocalType,
    ParameterSpec, Primitive, Statement, TargetKind, TypeRef,
  },
  naming::identifiers::to_value_local,
};

const INJECT: &str = "inject";
const SAVE_STATE: &str = "saveState";
const INSTANCE_PARAM: &str = "instance";
const SAVED_STATE_PARAM: &str = "savedInstanceState";
const OUT_STATE_PARAM: &str = "outState";
const EXTRAS_LOCAL: &str = "extras";

/// `if (instance instanceof Target) { Target typedInstance = (Target) instance; ... }`
fn guarded_by_target(owner: &CallableOwner<'_>, body: Vec<Statement>) -> Statement {
  let target = &owner.target.class;
  let mut then = vec![Statement::local(
    TYPED_INSTANCE_LOCAL,
    LocalType::Inferred(TypeRef::class(target.clone())),
    Expr::cast(target.clone(), Expr::ident(INSTANCE_PARAM)),
  )];
  then.extend(body);
  Statement::when(
    Condition::InstanceOf {
      expr: Expr::ident(INSTANCE_PARAM),
      class: target.clone(),
    },
    then,
  )
}

/// Builds `inject(instance, savedInstanceState)`, which copies every bound extra back into
/// the fields of a freshly created target instance.
pub struct InjectMethodBuilder<'a> {
  owner: CallableOwner<'a>,
  fields: Vec<&'a FieldDef>,
}

impl<'a> InjectMethodBuilder<'a> {
  #[must_use]
  pub fn new(owner: CallableOwner<'a>) -> Self {
    Self { owner, fields: vec![] }
  }

  pub fn visit_field(&mut self, field: &'a FieldDef) {
    self.fields.push(field);
  }

  fn bind_field(&self, field: &FieldDef) -> Vec<Statement> {
    let runtime = self.owner.runtime;
    let local = to_value_local(field.name());

    let mut args = vec![Expr::ident(EXTRAS_LOCAL), Expr::text(field.name())];
    if let Some(default) = field.default_value() {
      args.push(Expr::Literal(default_literal(default, field.type_ref())));
    }

    let assign = Statement::Assign {
      target: Expr::ident(TYPED_INSTANCE_LOCAL).field(field.name()),
      value: Expr::ident(&local),
    };
    let read = Statement::local(
      &local,
      LocalType::Inferred(field.type_ref().boxed()),
      Expr::runtime_call_typed(runtime.bundle_utils.clone(), "get", vec![field.type_ref().boxed()], args),
    );

    // Without a default the extra may be absent; keep the field initializer in that case.
    if field.default_value().is_some() {
      vec![read, assign]
    } else {
      vec![read, Statement::when(Condition::NotNull(Expr::ident(&local)), vec![assign])]
    }
  }

  #[must_use]
  pub fn build(&self) -> CallableSpec {
    let runtime = self.owner.runtime;
    let typed = || Expr::ident(TYPED_INSTANCE_LOCAL);
    let source = match self.owner.target.kind {
      TargetKind::Activity => typed().property("intent").property("extras"),
      TargetKind::Fragment => typed().property("arguments"),
    };

    let mut body = vec![Statement::local(
      EXTRAS_LOCAL,
      LocalType::Inferred(runtime.bundle.clone().into()),
      Expr::conditional(
        Condition::IsNull(Expr::ident(SAVED_STATE_PARAM)),
        source,
        Expr::ident(SAVED_STATE_PARAM),
      ),
    )];
    if !self.fields.is_empty() {
      body.push(Statement::when(
        Condition::NotNull(Expr::ident(EXTRAS_LOCAL)),
        self.fields.iter().flat_map(|field| self.bind_field(field)).collect(),
      ));
    }

    CallableSpec::builder()
      .name(INJECT)
      .kind(CallableKind::Inject)
      .parameters(vec![
        ParameterSpec::value(INSTANCE_PARAM, runtime.object.clone().into()),
        ParameterSpec::builder()
          .name(SAVED_STATE_PARAM)
          .type_ref(runtime.bundle.clone().into())
          .nullable(true)
          .build(),
      ])
      .body(vec![guarded_by_target(&self.owner, body)])
      .docs(Documentation::from_lines([
        "Binds the extras of a newly created instance, preferring saved state when present.",
      ]))
      .build()
  }
}

/// Builds `saveState(instance, outState)`, which writes every bound field into `outState`
/// using the same keys the start/show callables use.
pub struct SaveStateMethodBuilder<'a> {
  owner: CallableOwner<'a>,
  fields: Vec<&'a FieldDef>,
}

impl<'a> SaveStateMethodBuilder<'a> {
  #[must_use]
  pub fn new(owner: CallableOwner<'a>) -> Self {
    Self { owner, fields: vec![] }
  }

  pub fn visit_field(&mut self, field: &'a FieldDef) {
    self.fields.push(field);
  }

  #[must_use]
  pub fn build(&self) -> CallableSpec {
    let runtime = self.owner.runtime;
    let intent = || Expr::ident(INTENT_LOCAL);

    let mut body = vec![Statement::local(
      INTENT_LOCAL,
      LocalType::Inferred(runtime.intent.clone().into()),
      Expr::new_instance(runtime.intent.clone(), vec![]),
    )];
    body.extend(self.fields.iter().map(|field| {
      intent()
        .call(
          "putExtra",
          vec![
            Expr::text(field.name()),
            Expr::ident(TYPED_INSTANCE_LOCAL).field(field.name()),
          ],
        )
        .into()
    }));
    body.push(
      Expr::ident(OUT_STATE_PARAM)
        .call("putAll", vec![intent().property("extras")])
        .into(),
    );

    CallableSpec::builder()
      .name(SAVE_STATE)
      .kind(CallableKind::SaveState)
      .parameters(vec![
        ParameterSpec::value(INSTANCE_PARAM, runtime.object.clone().into()),
        ParameterSpec::value(OUT_STATE_PARAM, runtime.bundle.clone().into()),
      ])
      .body(vec![guarded_by_target(&self.owner, body)])
      .build()
  }
}

/// Literal for a declared default, typed to the field so `float` fields get `1.0f` rather
/// than an `int` literal.
fn default_literal(default: &DefaultValue, type_ref: &TypeRef) -> Literal {
  let primitive = type_ref.as_primitive();
  match default {
    DefaultValue::Boolean(value) => Literal::Boolean(*value),
    DefaultValue::Text(value) => Literal::Text(value.clone()),
    DefaultValue::Float(value) => Literal::Float(*value, primitive.unwrap_or(Primitive::Double)),
    #[allow(clippy::cast_precision_loss)]
    DefaultValue::Integer(value) => match primitive {
      Some(primitive) if primitive.is_floating() => Literal::Float(*value as f64, primitive),
      Some(primitive) => Literal::Integer(*value, primitive),
      None => Literal::Integer(*value, Primitive::Int),
    },
  }
}

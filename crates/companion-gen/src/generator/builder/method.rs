use super::{CallableOwner, INTENT_LOCAL, result::result_callback};
use crate::generator::{
  ast::{
    CallableKind, CallableSpec, Condition, Expr, FieldDef, LocalType, ParameterSpec, Primitive, ResultContract,
    SharedElementSource, Statement, TargetKind,
  },
  errors::BuilderError,
};

const CONTEXT_PARAM: &str = "context";
const ACTIVITY_PARAM: &str = "activity";
const CONTAINER_ID_PARAM: &str = "containerId";
const CONTAINER_LOCAL: &str = "container";
const SHARED_ELEMENTS_LOCAL: &str = "sharedElements";

/// Builds one start/show callable field by field.
///
/// The preamble (context parameters, runtime init, intent construction) is laid down on
/// creation. Every visited field adds a parameter and a `putExtra`. `end_with_result`
/// closes the body exactly once, after which `build` may be called any number of times.
#[derive(Debug, Clone)]
pub struct MethodBuilder<'a> {
  owner: CallableOwner<'a>,
  name: String,
  parameters: Vec<ParameterSpec>,
  visited: Vec<&'a FieldDef>,
  body: Vec<Statement>,
  finalized: bool,
}

impl<'a> MethodBuilder<'a> {
  pub fn new(owner: CallableOwner<'a>, name: impl Into<String>) -> Self {
    let runtime = owner.runtime;
    let target = &owner.target.class;

    let (parameters, body) = match owner.target.kind {
      TargetKind::Activity => (
        vec![ParameterSpec::receiver(CONTEXT_PARAM, runtime.context.clone().into())],
        vec![
          Expr::runtime_call(runtime.activity_builder.clone(), "init", vec![Expr::ident(CONTEXT_PARAM)]).into(),
          Statement::local(
            INTENT_LOCAL,
            LocalType::Inferred(runtime.intent.clone().into()),
            Expr::new_instance(
              runtime.intent.clone(),
              vec![Expr::ident(CONTEXT_PARAM), Expr::ClassLiteral(target.clone())],
            ),
          ),
        ],
      ),
      TargetKind::Fragment => (
        vec![
          ParameterSpec::receiver(ACTIVITY_PARAM, runtime.activity.clone().into()),
          ParameterSpec::value(CONTAINER_ID_PARAM, Primitive::Int.into()),
        ],
        vec![
          Expr::runtime_call(runtime.activity_builder.clone(), "init", vec![Expr::ident(ACTIVITY_PARAM)]).into(),
          Statement::local(
            INTENT_LOCAL,
            LocalType::Inferred(runtime.intent.clone().into()),
            Expr::new_instance(runtime.intent.clone(), vec![]),
          ),
        ],
      ),
    };

    Self {
      owner,
      name: name.into(),
      parameters,
      visited: vec![],
      body,
      finalized: false,
    }
  }

  pub fn visit_field(&mut self, field: &'a FieldDef) {
    debug_assert!(!self.finalized, "field visited after finalization");
    let name = field.name();
    self
      .parameters
      .push(ParameterSpec::value(name, field.type_ref().clone()));
    self.body.push(
      Expr::ident(INTENT_LOCAL)
        .call("putExtra", vec![Expr::text(name), Expr::ident(name)])
        .into(),
    );
    self.visited.push(field);
  }

  /// Closes the body with the launch branches and the injection hook.
  ///
  /// A result contract only applies to activities; fragments ignore it.
  pub fn end_with_result(&mut self, contract: Option<&ResultContract>) -> Result<(), BuilderError> {
    if self.finalized {
      return Err(BuilderError::DoubleFinalize {
        class: self.owner.class_name(),
        method: self.name.clone(),
      });
    }

    match self.owner.target.kind {
      TargetKind::Activity => self.end_activity(contract),
      TargetKind::Fragment => self.end_fragment(),
    }
    self.body.push(self.owner.run_injection().into());
    self.finalized = true;
    Ok(())
  }

  fn end_activity(&mut self, contract: Option<&ResultContract>) {
    let runtime = self.owner.runtime;
    let context = || Expr::ident(CONTEXT_PARAM);
    let intent = || Expr::ident(INTENT_LOCAL);
    let as_activity = || Expr::cast(runtime.activity.clone(), context());

    let launch = match contract {
      Some(contract) => {
        let listener = contract.listener_param_name();
        self.parameters.push(contract.listener_parameter());
        vec![Statement::If {
          condition: Condition::IsNull(Expr::ident(listener)),
          then: vec![
            as_activity()
              .call(
                "startActivityForResult",
                vec![intent(), Expr::int(self.owner.request_code)],
              )
              .into(),
          ],
          otherwise: vec![
            Expr::runtime_call(
              runtime.activity_builder.clone(),
              "startActivityForResult",
              vec![as_activity(), intent(), result_callback(contract, runtime)],
            )
            .into(),
          ],
        }]
      }
      None => vec![context().call("startActivity", vec![intent()]).into()],
    };

    self.body.push(Statement::If {
      condition: Condition::InstanceOf {
        expr: context(),
        class: runtime.activity.clone(),
      },
      then: launch,
      otherwise: vec![
        intent()
          .call(
            "addFlags",
            vec![Expr::static_field(runtime.intent.clone(), "FLAG_ACTIVITY_NEW_TASK")],
          )
          .into(),
        context().call("startActivity", vec![intent()]).into(),
      ],
    });
  }

  fn end_fragment(&mut self) {
    let runtime = self.owner.runtime;
    let target = self.owner.target;
    let activity = || Expr::ident(ACTIVITY_PARAM);

    let mut then = vec![];
    let shared_elements = if target.shared_elements.is_empty() {
      Expr::null()
    } else {
      then.push(Statement::local(
        SHARED_ELEMENTS_LOCAL,
        LocalType::Declared(runtime.shared_element_list()),
        Expr::new_diamond(runtime.array_list.clone(), vec![]),
      ));

      let needs_container = target
        .shared_elements
        .iter()
        .any(|element| matches!(element.source, SharedElementSource::Id(_)));
      if needs_container {
        then.push(Statement::local(
          CONTAINER_LOCAL,
          LocalType::Declared(runtime.view.clone().into()),
          activity().call_typed(
            "findViewById",
            vec![runtime.view.clone().into()],
            vec![Expr::ident(CONTAINER_ID_PARAM)],
          ),
        ));
      }

      for element in &target.shared_elements {
        let source = match &element.source {
          SharedElementSource::Name(name) => Expr::text(name),
          SharedElementSource::Id(id) => Expr::non_null(Expr::static_call(
            runtime.view_compat.clone(),
            "getTransitionName",
            vec![Expr::ident(CONTAINER_LOCAL).call_typed(
              "findViewById",
              vec![runtime.view.clone().into()],
              vec![Expr::int(i64::from(*id))],
            )],
          )),
        };
        then.push(
          Expr::ident(SHARED_ELEMENTS_LOCAL)
            .call(
              "add",
              vec![Expr::new_diamond(
                runtime.pair.clone(),
                vec![source, Expr::text(&element.target_name)],
              )],
            )
            .into(),
        );
      }
      Expr::ident(SHARED_ELEMENTS_LOCAL)
    };

    then.push(
      Expr::runtime_call(
        runtime.fragment_builder.clone(),
        "showFragment",
        vec![
          Expr::cast(runtime.fragment_activity.clone(), activity()),
          Expr::ident(CONTAINER_ID_PARAM),
          Expr::ident(INTENT_LOCAL).property("extras"),
          Expr::ClassLiteral(target.class.clone()),
          shared_elements,
        ],
      )
      .into(),
    );

    self.body.push(Statement::If {
      condition: Condition::InstanceOf {
        expr: activity(),
        class: runtime.fragment_activity.clone(),
      },
      then,
      otherwise: vec![],
    });
  }

  /// Changes the declared name only; parameters and body are untouched.
  pub fn rename(&mut self, name: impl Into<String>) {
    self.name = name.into();
  }

  /// A fresh, unfinalized builder with the same owner that has visited the same fields.
  #[must_use]
  pub fn copy(&self, name: impl Into<String>) -> Self {
    let mut copy = Self::new(self.owner, name);
    for field in self.visited.iter().copied() {
      copy.visit_field(field);
    }
    copy
  }

  pub fn build(&self) -> Result<CallableSpec, BuilderError> {
    if !self.finalized {
      return Err(BuilderError::NotFinalized {
        class: self.owner.class_name(),
        method: self.name.clone(),
      });
    }

    let kind = match self.owner.target.kind {
      TargetKind::Activity => CallableKind::Start,
      TargetKind::Fragment => CallableKind::Show,
    };
    Ok(
      CallableSpec::builder()
        .name(self.name.clone())
        .kind(kind)
        .parameters(self.parameters.clone())
        .body(self.body.clone())
        .build(),
    )
  }

  #[cfg(test)]
  pub fn name(&self) -> &str {
    &self.name
  }

  #[cfg(test)]
  pub fn is_finalized(&self) -> bool {
    self.finalized
  }

  #[cfg(test)]
  pub fn visited_fields(&self) -> impl Iterator<Item = &'a FieldDef> + '_ {
    self.visited.iter().copied()
  }

  #[cfg(test)]
  pub fn parameters(&self) -> &[ParameterSpec] {
    &self.parameters
  }
}

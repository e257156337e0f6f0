use super::{CallableOwner, INTENT_LOCAL};
use crate::generator::{
  ast::{
    AnonymousListener, CallableKind, CallableSpec, Condition, Documentation, Expr, LocalType, ParameterSpec,
    Primitive, ResultContract, Statement, TypeRef,
  },
  runtime::RuntimeTypes,
};

const FINISH_WITH_RESULT: &str = "finishWithResult";
const ACTIVITY_PARAM: &str = "activity";
const RESULT_CODE_PARAM: &str = "resultCode";
const DATA_PARAM: &str = "data";

/// Anonymous `OnActivityResultListener` that unpacks every result entity from the returned
/// bundle and forwards them to the typed listener when the result is `RESULT_OK`.
pub fn result_callback(contract: &ResultContract, runtime: &RuntimeTypes) -> Expr {
  let values = contract
    .entities()
    .iter()
    .map(|entity| {
      let value = Expr::runtime_call_typed(
        runtime.bundle_utils.clone(),
        "get",
        vec![entity.type_ref.boxed()],
        vec![Expr::ident(DATA_PARAM), Expr::text(&entity.name)],
      );
      if entity.type_ref.is_primitive() {
        Expr::non_null(value)
      } else {
        value
      }
    })
    .collect();

  Expr::AnonymousListener(Box::new(AnonymousListener {
    interface: runtime.on_activity_result_listener.clone(),
    method: contract.listener_method().to_string(),
    parameters: vec![
      ParameterSpec::value(RESULT_CODE_PARAM, Primitive::Int.into()),
      ParameterSpec::builder()
        .name(DATA_PARAM)
        .type_ref(runtime.bundle.clone().into())
        .nullable(true)
        .build(),
    ],
    body: vec![Statement::when(
      Condition::Equals(
        Expr::ident(RESULT_CODE_PARAM),
        Expr::static_field(runtime.activity.clone(), "RESULT_OK"),
      ),
      vec![
        Expr::ident(contract.listener_param_name())
          .call(contract.listener_method(), values)
          .into(),
      ],
    )],
  }))
}

/// Builds `finishWithResult(activity, entities...)`: packs the entities into an intent,
/// sets it as the `RESULT_OK` result and finishes the activity.
pub struct FinishWithResultBuilder<'a> {
  owner: CallableOwner<'a>,
  contract: &'a ResultContract,
}

impl<'a> FinishWithResultBuilder<'a> {
  #[must_use]
  pub fn new(owner: CallableOwner<'a>, contract: &'a ResultContract) -> Self {
    Self { owner, contract }
  }

  #[must_use]
  pub fn build(&self) -> CallableSpec {
    let runtime = self.owner.runtime;
    let activity = || Expr::ident(ACTIVITY_PARAM);
    let intent = || Expr::ident(INTENT_LOCAL);

    let mut parameters = vec![ParameterSpec::receiver(
      ACTIVITY_PARAM,
      TypeRef::class(self.owner.target.class.clone()),
    )];
    let mut body = vec![Statement::local(
      INTENT_LOCAL,
      LocalType::Inferred(runtime.intent.clone().into()),
      Expr::new_instance(runtime.intent.clone(), vec![]),
    )];

    for entity in self.contract.entities() {
      parameters.push(ParameterSpec::value(entity.name.clone(), entity.type_ref.clone()));
      body.push(
        intent()
          .call(
            "putExtra",
            vec![Expr::text(&entity.name), Expr::ident(&entity.name)],
          )
          .into(),
      );
    }

    body.push(
      activity()
        .call(
          "setResult",
          vec![Expr::static_field(runtime.activity.clone(), "RESULT_OK"), intent()],
        )
        .into(),
    );
    body.push(Expr::static_call(runtime.activity_compat.clone(), "finishAfterTransition", vec![activity()]).into());

    CallableSpec::builder()
      .name(FINISH_WITH_RESULT)
      .kind(CallableKind::FinishWithResult)
      .parameters(parameters)
      .body(body)
      .docs(Documentation::from_lines([format!(
        "Finishes {} with {} result value(s).",
        self.owner.target.simple_name(),
        self.contract.entities().len()
      )]))
      .build()
  }
}

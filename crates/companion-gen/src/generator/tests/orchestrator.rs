use crate::{
  generator::{
    ast::{
      CallableKind, ClassName, DialectSelection, FieldDef, ParameterRole, Primitive, ResultEntity, TargetClass,
      TargetKind, TypeRef,
    },
    codegen::Dialect,
    errors::{GenerationError, InvalidFieldError},
    metrics::GenerationWarning,
    orchestrator::{GeneratorConfig, Orchestrator, TargetClassOrchestrator},
    runtime::RuntimeTypes,
  },
  utils::descriptors::parse_descriptors,
};

fn target(kind: TargetKind, result_entities: Vec<ResultEntity>) -> TargetClass {
  let name = match kind {
    TargetKind::Activity => "UserActivity",
    TargetKind::Fragment => "UserFragment",
  };
  TargetClass::builder()
    .class(ClassName::new("com.example", name))
    .kind(kind)
    .result_entities(result_entities)
    .build()
}

fn field(name: &str, required: bool, order: u32) -> FieldDef {
  FieldDef::new(name, TypeRef::string(), required, order).unwrap()
}

fn callable_names(companion: &crate::generator::ast::CompanionType) -> Vec<&str> {
  companion.start_callables().map(|c| c.name.as_str()).collect()
}

#[test]
fn test_required_and_two_optional_fields() {
  let runtime = RuntimeTypes::default();
  let config = GeneratorConfig::default();
  let mut orchestrator = TargetClassOrchestrator::new(target(TargetKind::Activity, vec![]), &runtime, &config).unwrap();
  orchestrator.add_field(field("id", true, 0)).unwrap();
  orchestrator.add_field(field("title", false, 1)).unwrap();
  orchestrator.add_field(field("subtitle", false, 2)).unwrap();

  let companion = orchestrator.generate().unwrap();
  assert_eq!(
    callable_names(&companion),
    ["start", "startWithOptionalTitle", "startWithOptionalSubtitle", "startWithoutOptional"]
  );
  assert_eq!(companion.name.canonical_name(), "com.example.UserActivityBuilder");
  assert_eq!(companion.kind, TargetKind::Activity);
  assert_eq!(companion.dialects, DialectSelection::JAVA);
  assert!(companion.delegates.is_empty());
  assert!(companion.listener.is_none());
  assert!(companion.finish_with_result.is_none());

  let constants: Vec<(&str, &str)> = companion
    .constants
    .iter()
    .map(|c| (c.name.as_str(), c.value.as_str()))
    .collect();
  assert_eq!(
    constants,
    [
      ("REQUIRED_ID", "id"),
      ("OPTIONAL_TITLE", "title"),
      ("OPTIONAL_SUBTITLE", "subtitle")
    ]
  );
}

#[test]
fn test_three_optional_fields_with_result_contract() {
  let runtime = RuntimeTypes::default();
  let config = GeneratorConfig::default();
  let entities = vec![ResultEntity::new("status", Primitive::Int.into()).unwrap()];
  let mut orchestrator =
    TargetClassOrchestrator::new(target(TargetKind::Activity, entities), &runtime, &config).unwrap();
  for (order, name) in ["a", "b", "c"].into_iter().enumerate() {
    orchestrator.add_field(field(name, false, u32::try_from(order).unwrap())).unwrap();
  }

  let companion = orchestrator.generate().unwrap();
  assert_eq!(companion.start_callables().count(), 8);
  assert_eq!(companion.variants.len(), 6);
  for callable in companion.start_callables() {
    let last = callable.parameters.last().unwrap();
    assert_eq!(last.role, ParameterRole::Listener, "{} lacks a listener", callable.name);
    assert_eq!(last.name, "onUserActivityResultListener");
  }
  assert_eq!(companion.variants[5].name, "startWithOptionalCAndA");
  let variant_params: Vec<&str> = companion.variants[5]
    .arguments()
    .map(|p| p.name.as_str())
    .collect();
  assert_eq!(variant_params, ["c", "a", "onUserActivityResultListener"]);

  assert!(companion.listener.is_some());
  let finish = companion.finish_with_result.as_ref().unwrap();
  assert_eq!(finish.kind, CallableKind::FinishWithResult);
  assert!(companion.constants.iter().any(|c| c.name == "RESULT_STATUS"));
}

#[test]
fn test_no_fields_still_generates_both_endpoints() {
  let runtime = RuntimeTypes::default();
  let config = GeneratorConfig::default();
  let orchestrator = TargetClassOrchestrator::new(target(TargetKind::Fragment, vec![]), &runtime, &config).unwrap();

  let companion = orchestrator.generate().unwrap();
  assert_eq!(callable_names(&companion), ["show", "showWithoutOptional"]);
  assert!(companion.constants.is_empty());
}

#[test]
fn test_duplicate_field_is_rejected() {
  let runtime = RuntimeTypes::default();
  let config = GeneratorConfig::default();
  let mut orchestrator = TargetClassOrchestrator::new(target(TargetKind::Activity, vec![]), &runtime, &config).unwrap();
  orchestrator.add_field(field("title", false, 0)).unwrap();

  assert_eq!(
    orchestrator.add_field(field("title", true, 1)),
    Err(InvalidFieldError::Duplicate { field: "title".into() })
  );
  assert_eq!(orchestrator.required_fields().count(), 0);
  assert_eq!(orchestrator.optional_fields().count(), 1);
}

#[test]
fn test_window_name_collision_is_reported() {
  let runtime = RuntimeTypes::default();
  let config = GeneratorConfig::default();
  let mut orchestrator = TargetClassOrchestrator::new(target(TargetKind::Activity, vec![]), &runtime, &config).unwrap();
  orchestrator.add_field(field("x", false, 0)).unwrap();
  orchestrator.add_field(field("y", false, 1)).unwrap();
  orchestrator.add_field(field("xAndY", false, 2)).unwrap();

  assert_eq!(
    orchestrator.generate(),
    Err(GenerationError::DuplicateCallable {
      class: "com.example.UserActivity".into(),
      name: "startWithOptionalXAndY".into(),
    })
  );
}

#[test]
fn test_fragment_result_types_are_ignored_with_warning() {
  let runtime = RuntimeTypes::default();
  let config = GeneratorConfig::default();
  let entities = vec![ResultEntity::new("status", Primitive::Int.into()).unwrap()];
  let mut orchestrator =
    TargetClassOrchestrator::new(target(TargetKind::Fragment, entities), &runtime, &config).unwrap();

  assert_eq!(
    orchestrator.take_warnings(),
    [GenerationWarning::ResultTypesIgnored {
      class: "com.example.UserFragment".into()
    }]
  );
  let companion = orchestrator.generate().unwrap();
  assert!(companion.listener.is_none());
  assert!(orchestrator.take_warnings().is_empty());
}

#[test]
fn test_kotlin_activity_gets_delegates() {
  let runtime = RuntimeTypes::default();
  let config = GeneratorConfig {
    dialect_override: Some(DialectSelection::BOTH),
    ..GeneratorConfig::default()
  };
  let orchestrator = TargetClassOrchestrator::new(target(TargetKind::Activity, vec![]), &runtime, &config).unwrap();
  let companion = orchestrator.generate().unwrap();

  let receivers: Vec<(&str, bool)> = companion
    .delegates
    .iter()
    .map(|d| (d.receiver.simple_name(), d.nullable))
    .collect();
  assert_eq!(receivers, [("View", false), ("Fragment", true)]);
}

#[test]
fn test_batch_generation_isolates_failures() {
  let descriptors = parse_descriptors(include_bytes!("../../../fixtures/mixed_targets.json")).unwrap();
  let orchestrator = Orchestrator::new(descriptors, GeneratorConfig::default());
  let output = orchestrator.generate("mixed_targets.json");

  let generated: Vec<String> = output.companions.iter().map(|c| c.name.canonical_name()).collect();
  assert_eq!(
    generated,
    [
      "com.example.app.picker.ColorPickerActivityBuilder",
      "com.example.app.detail.DetailFragmentBuilder",
    ]
  );

  let stats = &output.stats;
  assert_eq!(stats.classes_generated, 2);
  assert_eq!(stats.activities_generated, 1);
  assert_eq!(stats.fragments_generated, 1);
  assert_eq!(stats.classes_skipped, 1);
  assert_eq!(stats.result_contracts, 1);
  // picker: 3 optional fields, fragment: 1 optional field
  assert_eq!(stats.windowed_variants, 6);
  assert_eq!(stats.start_callables, 8 + 2);
  assert_eq!(stats.java_files, 2);
  assert_eq!(stats.kotlin_files, 2);
  assert_eq!(output.files.len(), 4);

  let skipped: Vec<&GenerationWarning> = stats.warnings.iter().filter(|w| w.is_skipped_item()).collect();
  assert_eq!(skipped.len(), 1);
  assert!(skipped[0].to_string().contains("com.example.app.Broken"));
  assert!(skipped[0].to_string().contains("declared more than once"));
}

#[test]
fn test_batch_dialect_override() {
  let descriptors = parse_descriptors(include_bytes!("../../../fixtures/mixed_targets.json")).unwrap();
  let config = GeneratorConfig {
    dialect_override: Some(DialectSelection::JAVA),
    ..GeneratorConfig::default()
  };
  let output = Orchestrator::new(descriptors, config).generate("mixed_targets.json");

  assert!(output.files.iter().all(|f| f.dialect == Dialect::Java));
}

#[test]
fn test_dialect_override_none_keeps_state_helpers() {
  let descriptors = parse_descriptors(include_bytes!("../../../fixtures/user_activity.json")).unwrap();
  let config = GeneratorConfig {
    dialect_override: Some(DialectSelection::NONE),
    ..GeneratorConfig::default()
  };
  let output = Orchestrator::new(descriptors, config).generate("user_activity.json");

  assert_eq!(output.files.len(), 1);
  let java = &output.files[0].contents;
  assert!(java.contains("public static void inject("));
  assert!(java.contains("public static void saveState("));
  assert!(java.contains("REQUIRED_USER_ID"));
  assert!(!java.contains("public static void start("));
}

#[test]
fn test_invalid_target_is_skipped() {
  let json = br#"{"targets": [{"kind": "activity", "qualifiedName": "com..Bad"}]}"#;
  let output = Orchestrator::new(parse_descriptors(json).unwrap(), GeneratorConfig::default()).generate("x.json");

  assert!(output.companions.is_empty());
  assert_eq!(output.stats.classes_skipped, 1);
  assert!(matches!(
    output.stats.warnings[0],
    GenerationWarning::ClassSkipped { ref class, .. } if class == "com..Bad"
  ));
}

#[test]
fn test_batch_generation_is_reproducible() {
  let json = include_bytes!("../../../fixtures/mixed_targets.json");
  let first =
    Orchestrator::new(parse_descriptors(json).unwrap(), GeneratorConfig::default()).generate("mixed_targets.json");
  let second =
    Orchestrator::new(parse_descriptors(json).unwrap(), GeneratorConfig::default()).generate("mixed_targets.json");

  assert_eq!(first.files.len(), 4);
  assert_eq!(first.files, second.files);
  for (a, b) in first.files.iter().zip(&second.files) {
    assert_eq!(a.contents.as_bytes(), b.contents.as_bytes(), "{}", a.relative_path.display());
  }
}

mod kotlin;
mod sink;

use crate::generator::{
  ast::{ClassName, CompanionType, DialectSelection, FieldDef, ResultEntity, SharedElement, TargetClass, TargetKind},
  orchestrator::{GeneratorConfig, TargetClassOrchestrator},
  runtime::RuntimeTypes,
};

pub(super) const HEADER: &str = "// AUTO-GENERATED CODE - DO NOT EDIT!\n// Source: test.json\n// Generated by `companion-gen`\n";

pub(super) fn user_activity() -> TargetClass {
  TargetClass::builder()
    .class(ClassName::new("com.example.app", "UserActivity"))
    .kind(TargetKind::Activity)
    .build()
}

pub(super) fn picker_activity() -> TargetClass {
  TargetClass::builder()
    .class(ClassName::new("com.example.app", "PickerActivity"))
    .kind(TargetKind::Activity)
    .result_entities(vec![
      ResultEntity::new("color", crate::generator::ast::Primitive::Int.into()).unwrap(),
      ResultEntity::new("label", crate::generator::ast::TypeRef::string()).unwrap(),
    ])
    .build()
}

pub(super) fn detail_fragment(shared_elements: Vec<SharedElement>) -> TargetClass {
  TargetClass::builder()
    .class(ClassName::new("com.example.app.detail", "DetailFragment"))
    .kind(TargetKind::Fragment)
    .shared_elements(shared_elements)
    .build()
}

/// `(name, descriptor, required)` triples, ordered as given.
pub(super) fn companion(target: TargetClass, fields: &[(&str, &str, bool)], dialects: DialectSelection) -> CompanionType {
  let runtime = RuntimeTypes::default();
  let config = GeneratorConfig {
    dialect_override: Some(dialects),
    ..GeneratorConfig::default()
  };
  let mut orchestrator = TargetClassOrchestrator::new(target, &runtime, &config).unwrap();
  for (order, (name, descriptor, required)) in (0..).zip(fields) {
    orchestrator
      .add_field(FieldDef::parse(*name, descriptor, *required, order).unwrap())
      .unwrap();
  }
  orchestrator.generate().unwrap()
}

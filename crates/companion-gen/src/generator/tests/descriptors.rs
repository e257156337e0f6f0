use crate::{
  generator::{
    ast::{DefaultValue, GenerateMode, SharedElementSource, TargetKind},
    descriptors::{DescriptorSet, FieldDescriptor},
    errors::{GenerationError, InvalidFieldError},
    metrics::GenerationWarning,
  },
  utils::descriptors::parse_descriptors,
};

fn mixed() -> DescriptorSet {
  parse_descriptors(include_bytes!("../../../fixtures/mixed_targets.json")).unwrap()
}

#[test]
fn test_bind_groups_fields_and_reports_problems() {
  let (bindings, warnings) = mixed().bind();

  let classes: Vec<&str> = bindings.iter().map(|b| b.class_name.as_str()).collect();
  assert_eq!(
    classes,
    [
      "com.example.app.picker.ColorPickerActivity",
      "com.example.app.detail.DetailFragment",
      "com.example.app.Broken",
    ]
  );
  assert_eq!(bindings[0].fields.len(), 3);
  assert_eq!(bindings[1].fields.len(), 2);
  assert!(bindings[2].fields.is_empty());

  assert_eq!(
    warnings,
    [
      GenerationWarning::DuplicateTarget {
        class: "com.example.app.picker.ColorPickerActivity".into()
      },
      GenerationWarning::OrphanField {
        owner: "com.example.app.Missing".into(),
        field: "ghost".into()
      },
    ]
  );
}

#[test]
fn test_target_descriptor_conversion() {
  let (bindings, _) = mixed().bind();

  let picker = bindings[0].target.as_ref().unwrap();
  assert_eq!(picker.kind, TargetKind::Activity);
  assert!(picker.kotlin_source);
  assert_eq!(picker.mode, GenerateMode::Auto);
  assert_eq!(picker.result_entities.len(), 2);

  let detail = bindings[1].target.as_ref().unwrap();
  assert_eq!(detail.mode, GenerateMode::Both);
  assert_eq!(detail.shared_elements[0].source, SharedElementSource::Id(2_131_230_001));
  assert_eq!(
    detail.shared_elements[1].source,
    SharedElementSource::Name("caption".into())
  );
}

#[test]
fn test_field_defaults_are_typed() {
  let (bindings, _) = mixed().bind();
  let fields: Vec<_> = bindings[0].fields.iter().map(|f| f.as_ref().unwrap()).collect();

  assert_eq!(fields[0].default_value(), None);
  assert_eq!(fields[1].default_value(), Some(&DefaultValue::Boolean(true)));
  assert_eq!(fields[2].default_value(), Some(&DefaultValue::Integer(1)));
}

#[test]
fn test_invalid_shared_element_rejects_target() {
  let json = br#"{"targets": [{
    "kind": "fragment",
    "qualifiedName": "com.example.ListFragment",
    "sharedElements": [{"targetName": "hero"}]
  }]}"#;
  let (bindings, _) = parse_descriptors(json).unwrap().bind();
  assert!(matches!(
    bindings[0].target,
    Err(GenerationError::InvalidTarget { ref reason, .. }) if reason.contains("hero")
  ));
}

#[test]
fn test_field_descriptor_errors() {
  let field = |type_name: &str, required: bool, default: Option<serde_json::Value>| FieldDescriptor {
    owner: "com.example.A".into(),
    name: "value".into(),
    type_name: type_name.into(),
    required,
    order: None,
    default,
  };

  assert!(matches!(
    field("int", false, Some(serde_json::json!("text"))).to_field(0),
    Err(InvalidFieldError::DefaultMismatch { .. })
  ));
  assert!(matches!(
    field("int", false, Some(serde_json::json!([1]))).to_field(0),
    Err(InvalidFieldError::DefaultMismatch { .. })
  ));
  assert!(matches!(
    field("int", true, Some(serde_json::json!(1))).to_field(0),
    Err(InvalidFieldError::DefaultOnRequired { .. })
  ));
  assert!(matches!(
    field("java.util.List<", false, None).to_field(0),
    Err(InvalidFieldError::UnresolvedType { .. })
  ));

  let ordered = field("double", false, Some(serde_json::json!(0.5))).to_field(4).unwrap();
  assert_eq!(ordered.order_key(), 4);
  assert_eq!(ordered.default_value(), Some(&DefaultValue::Float(0.5)));
}

//! Descriptor file format: the annotated classes and fields handed over by the front end.

use indexmap::{IndexMap, map::Entry};
use serde::Deserialize;

use super::{
  ast::{
    ClassName, DefaultValue, Documentation, FieldDef, GenerateMode, ResultEntity, SharedElement, TargetClass,
    TargetKind, TypeRef,
  },
  errors::{GenerationError, InvalidFieldError},
  metrics::GenerationWarning,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptorSet {
  #[serde(default)]
  pub targets: Vec<TargetDescriptor>,
  #[serde(default)]
  pub fields: Vec<FieldDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetDescriptor {
  pub kind: TargetKind,
  pub qualified_name: String,
  #[serde(default)]
  pub kotlin_source: bool,
  #[serde(default)]
  pub mode: GenerateMode,
  #[serde(default)]
  pub result_types: Vec<ResultTypeDescriptor>,
  #[serde(default)]
  pub shared_elements: Vec<SharedElementDescriptor>,
  #[serde(default)]
  pub doc: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultTypeDescriptor {
  pub name: String,
  #[serde(rename = "type")]
  pub type_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedElementDescriptor {
  #[serde(default)]
  pub source_id: i32,
  #[serde(default)]
  pub source_name: Option<String>,
  pub target_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldDescriptor {
  pub owner: String,
  pub name: String,
  #[serde(rename = "type")]
  pub type_name: String,
  pub required: bool,
  /// Explicit ordering key; falls back to the field's position in the file.
  #[serde(default)]
  pub order: Option<u32>,
  #[serde(default)]
  pub default: Option<serde_json::Value>,
}

/// One target class and the fields declared for it, each converted independently so a bad
/// field can be reported against its class.
#[derive(Debug)]
pub struct TargetBinding {
  pub class_name: String,
  pub target: Result<TargetClass, GenerationError>,
  pub fields: Vec<Result<FieldDef, InvalidFieldError>>,
}

impl DescriptorSet {
  /// Groups fields under their owners, keeping the declaration order of targets.
  pub fn bind(&self) -> (Vec<TargetBinding>, Vec<GenerationWarning>) {
    let mut warnings = vec![];
    let mut bindings: IndexMap<&str, TargetBinding> = IndexMap::new();

    for descriptor in &self.targets {
      match bindings.entry(descriptor.qualified_name.as_str()) {
        Entry::Occupied(_) => warnings.push(GenerationWarning::DuplicateTarget {
          class: descriptor.qualified_name.clone(),
        }),
        Entry::Vacant(entry) => {
          entry.insert(TargetBinding {
            class_name: descriptor.qualified_name.clone(),
            target: descriptor.to_target(),
            fields: vec![],
          });
        }
      }
    }

    for (position, descriptor) in self.fields.iter().enumerate() {
      match bindings.get_mut(descriptor.owner.as_str()) {
        Some(binding) => binding.fields.push(descriptor.to_field(position)),
        None => warnings.push(GenerationWarning::OrphanField {
          owner: descriptor.owner.clone(),
          field: descriptor.name.clone(),
        }),
      }
    }

    (bindings.into_values().collect(), warnings)
  }
}

impl TargetDescriptor {
  pub fn to_target(&self) -> Result<TargetClass, GenerationError> {
    let class = ClassName::parse(&self.qualified_name).map_err(|error| GenerationError::InvalidTarget {
      class: self.qualified_name.clone(),
      reason: error.to_string(),
    })?;

    let result_entities = self
      .result_types
      .iter()
      .map(|result| {
        let type_ref = TypeRef::parse(&result.type_name).map_err(|reason| InvalidFieldError::UnresolvedType {
          field: result.name.clone(),
          descriptor: result.type_name.clone(),
          reason,
        })?;
        ResultEntity::new(result.name.clone(), type_ref)
      })
      .collect::<Result<Vec<_>, _>>()?;

    let shared_elements = self
      .shared_elements
      .iter()
      .map(|element| {
        SharedElement::from_parts(element.source_id, element.source_name.as_deref(), &element.target_name).ok_or_else(
          || GenerationError::InvalidTarget {
            class: self.qualified_name.clone(),
            reason: format!(
              "shared element '{}' has neither a source id nor a source name",
              element.target_name
            ),
          },
        )
      })
      .collect::<Result<Vec<_>, _>>()?;

    Ok(
      TargetClass::builder()
        .class(class)
        .kind(self.kind)
        .kotlin_source(self.kotlin_source)
        .mode(self.mode)
        .result_entities(result_entities)
        .shared_elements(shared_elements)
        .docs(self.doc.as_deref().map(Documentation::from_raw).unwrap_or_default())
        .build(),
    )
  }
}

impl FieldDescriptor {
  pub fn to_field(&self, position: usize) -> Result<FieldDef, InvalidFieldError> {
    let order_key = self
      .order
      .unwrap_or_else(|| u32::try_from(position).unwrap_or(u32::MAX));
    let field = FieldDef::parse(self.name.clone(), &self.type_name, self.required, order_key)?;

    match self.default.as_ref().map(|value| self.default_value(value)).transpose()? {
      Some(default) => field.with_default(default),
      None => Ok(field),
    }
  }

  fn default_value(&self, value: &serde_json::Value) -> Result<DefaultValue, InvalidFieldError> {
    use serde_json::Value;

    match value {
      Value::Bool(value) => Ok(DefaultValue::Boolean(*value)),
      Value::Number(number) => number
        .as_i64()
        .map(DefaultValue::Integer)
        .or_else(|| number.as_f64().map(DefaultValue::Float))
        .ok_or_else(|| self.default_mismatch(value)),
      Value::String(text) => Ok(DefaultValue::Text(text.clone())),
      Value::Null | Value::Array(_) | Value::Object(_) => Err(self.default_mismatch(value)),
    }
  }

  fn default_mismatch(&self, value: &serde_json::Value) -> InvalidFieldError {
    InvalidFieldError::DefaultMismatch {
      field: self.name.clone(),
      value: value.to_string(),
      type_name: self.type_name.clone(),
    }
  }
}


use crate::generator::{
  ast::{ClassName, FieldDef, SharedElement, TargetClass, TargetKind, TypeRef},
  runtime::RuntimeTypes,
};

pub(super) fn activity() -> TargetClass {
  TargetClass::builder()
    .class(ClassName::new("com.example", "UserActivity"))
    .kind(TargetKind::Activity)
    .build()
}

pub(super) fn fragment(shared_elements: Vec<SharedElement>) -> TargetClass {
  TargetClass::builder()
    .class(ClassName::new("com.example", "DetailFragment"))
    .kind(TargetKind::Fragment)
    .shared_elements(shared_elements)
    .build()
}

pub(super) fn field(name: &str, descriptor: &str, required: bool) -> FieldDef {
  FieldDef::parse(name, descriptor, required, 0).unwrap()
}

pub(super) fn runtime() -> RuntimeTypes {
  RuntimeTypes::default()
}

pub(super) fn string_field(name: &str) -> FieldDef {
  FieldDef::new(name, TypeRef::string(), false, 0).unwrap()
}

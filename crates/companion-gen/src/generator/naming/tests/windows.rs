use std::collections::HashSet;

use crate::generator::{
  ast::{FieldDef, TargetKind, TypeRef},
  naming::windows::{NamingTemplate, OptionalWindows},
};

fn optional_fields(names: &[&str]) -> Vec<FieldDef> {
  names
    .iter()
    .zip(0..)
    .map(|(name, order)| FieldDef::new(*name, TypeRef::string(), false, order).unwrap())
    .collect()
}

fn window_names(fields: &[FieldDef], template: &NamingTemplate) -> Vec<String> {
  OptionalWindows::new(fields, template).map(|window| window.name).collect()
}

#[test]
fn test_naming_template_for_kind() {
  let start = NamingTemplate::for_kind(TargetKind::Activity);
  assert_eq!(start.full_name(), "start");
  assert_eq!(start.no_optional_name(), "startWithoutOptional");
  assert_eq!(start.for_optional_prefix(), "startWithOptional");

  let show = NamingTemplate::for_kind(TargetKind::Fragment);
  assert_eq!(show.full_name(), "show");
  assert_eq!(show.no_optional_name(), "showWithoutOptional");
}

#[test]
fn test_windows_empty_for_zero_or_one_field() {
  let template = NamingTemplate::for_kind(TargetKind::Activity);
  assert!(window_names(&[], &template).is_empty());
  assert!(window_names(&optional_fields(&["title"]), &template).is_empty());
  assert_eq!(OptionalWindows::count_for(0), 0);
  assert_eq!(OptionalWindows::count_for(1), 0);
}

#[test]
fn test_windows_two_fields() {
  let template = NamingTemplate::for_kind(TargetKind::Activity);
  let fields = optional_fields(&["title", "subtitle"]);
  assert_eq!(
    window_names(&fields, &template),
    ["startWithOptionalTitle", "startWithOptionalSubtitle"]
  );
}

#[test]
fn test_windows_three_fields_wrap_around() {
  let template = NamingTemplate::for_kind(TargetKind::Fragment);
  let fields = optional_fields(&["a", "b", "c"]);
  assert_eq!(
    window_names(&fields, &template),
    [
      "showWithOptionalA",
      "showWithOptionalB",
      "showWithOptionalC",
      "showWithOptionalAAndB",
      "showWithOptionalBAndC",
      "showWithOptionalCAndA",
    ]
  );
}

#[test]
fn test_windows_are_contiguous_and_counted() {
  let template = NamingTemplate::for_kind(TargetKind::Activity);
  for n in 2..=6 {
    let names: Vec<String> = (0..n).map(|i| format!("f{i}")).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let fields = optional_fields(&name_refs);

    let windows = OptionalWindows::new(&fields, &template);
    assert_eq!(windows.len(), OptionalWindows::count_for(n));

    let mut seen = HashSet::new();
    let mut total = 0;
    for window in windows {
      total += 1;
      assert!(window.step >= 1 && window.step < n);
      assert_eq!(window.fields.len(), window.step);
      for (offset, field) in window.fields.iter().enumerate() {
        assert_eq!(field.name(), names[(window.start + offset) % n]);
      }
      assert!(seen.insert(window.name.clone()), "duplicate window name {}", window.name);
    }
    assert_eq!(total, n * (n - 1));
  }
}

#[test]
fn test_windows_size_hint_tracks_progress() {
  let template = NamingTemplate::for_kind(TargetKind::Activity);
  let fields = optional_fields(&["a", "b", "c"]);
  let mut windows = OptionalWindows::new(&fields, &template);
  assert_eq!(windows.len(), 6);
  windows.next();
  windows.next();
  windows.next();
  assert_eq!(windows.len(), 3);
  windows.by_ref().for_each(drop);
  assert_eq!(windows.len(), 0);

  let restarted = OptionalWindows::new(&fields, &template);
  assert_eq!(restarted.count(), 6);
}

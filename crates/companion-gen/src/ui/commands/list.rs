use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::{
  generator::{
    descriptors::DescriptorSet,
    orchestrator::{GeneratorConfig, TargetClassOrchestrator},
    runtime::RuntimeTypes,
  },
  ui::{Colors, colors::Role, term_width},
  utils::DescriptorLoader,
};

/// One row of the target listing.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TargetRow {
  class: String,
  kind: String,
  required: usize,
  optional: usize,
  /// Start/show callables, or the reason the class cannot be generated.
  callables: Result<usize, String>,
}

fn collect_rows(descriptors: &DescriptorSet) -> Vec<TargetRow> {
  let config = GeneratorConfig::default();
  let runtime = RuntimeTypes::new(&config.runtime_package);
  let (bindings, _) = descriptors.bind();

  bindings
    .into_iter()
    .map(|binding| {
      let kind = binding
        .target
        .as_ref()
        .map_or_else(|_| "?".to_string(), |target| target.kind.to_string());
      let mut row = TargetRow {
        class: binding.class_name,
        kind,
        required: 0,
        optional: 0,
        callables: Ok(0),
      };

      let target = match binding.target {
        Ok(target) => target,
        Err(error) => {
          row.callables = Err(error.to_string());
          return row;
        }
      };
      let mut orchestrator = match TargetClassOrchestrator::new(target, &runtime, &config) {
        Ok(orchestrator) => orchestrator,
        Err(error) => {
          row.callables = Err(error.to_string());
          return row;
        }
      };
      for field in binding.fields {
        if let Err(error) = field.and_then(|field| orchestrator.add_field(field)) {
          row.callables = Err(error.to_string());
          return row;
        }
      }

      row.required = orchestrator.required_fields().count();
      row.optional = orchestrator.optional_fields().count();
      row.callables = orchestrator
        .generate()
        .map(|companion| companion.start_callables().count())
        .map_err(|error| error.to_string());
      row
    })
    .collect()
}

pub async fn list_targets(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let descriptors = DescriptorLoader::open(input).await?.parse()?;
  let mut rows = collect_rows(&descriptors);
  rows.sort_by(|a, b| a.class.cmp(&b.class));

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut header = Row::new();
  for title in ["CLASS", "KIND", "REQUIRED", "OPTIONAL", "CALLABLES"] {
    header.add_cell(Cell::new(title).fg(colors.cell(Role::StatLabel)));
  }
  table.set_header(header);

  for target in rows {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(target.class)
        .fg(colors.cell(Role::StatValue))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(target.kind).fg(colors.cell(Role::Kind)));
    for count in [target.required, target.optional] {
      row.add_cell(
        Cell::new(count)
          .fg(colors.cell(Role::StatValue))
          .set_alignment(CellAlignment::Right),
      );
    }
    match target.callables {
      Ok(count) => row.add_cell(
        Cell::new(count)
          .fg(colors.cell(Role::StatValue))
          .set_alignment(CellAlignment::Right),
      ),
      Err(reason) => row.add_cell(Cell::new(reason).fg(colors.cell(Role::ClassSkipped))),
    };
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::utils::descriptors::parse_descriptors;

  #[test]
  fn test_collect_rows_counts_fields_and_callables() {
    let descriptors = parse_descriptors(include_bytes!("../../../fixtures/user_activity.json")).unwrap();
    let rows = collect_rows(&descriptors);

    let user = rows
      .iter()
      .find(|row| row.class == "com.example.app.UserActivity")
      .unwrap();
    assert_eq!(user.kind, "activity");
    assert_eq!(user.required, 1);
    assert_eq!(user.optional, 2);
    assert_eq!(user.callables, Ok(4));
  }

  #[test]
  fn test_collect_rows_reports_broken_class() {
    let json = br#"{
      "targets": [{"kind": "activity", "qualifiedName": "com.example.Broken"}],
      "fields": [{"owner": "com.example.Broken", "name": "class", "type": "int", "required": true}]
    }"#;
    let descriptors = parse_descriptors(json).unwrap();
    let rows = collect_rows(&descriptors);

    assert_eq!(rows.len(), 1);
    assert!(rows[0].callables.as_ref().unwrap_err().contains("class"));
  }
}

use strum::Display;

use crate::generator::{
  ast::{CompanionType, TargetKind},
  codegen::{Dialect, GeneratedFile},
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub classes_generated: usize,
  pub activities_generated: usize,
  pub fragments_generated: usize,
  pub classes_skipped: usize,
  pub java_files: usize,
  pub kotlin_files: usize,
  pub start_callables: usize,
  pub windowed_variants: usize,
  pub constants_generated: usize,
  pub result_contracts: usize,
  pub files_written: usize,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_companion(&mut self, companion: &CompanionType) {
    self.classes_generated += 1;
    match companion.kind {
      TargetKind::Activity => self.activities_generated += 1,
      TargetKind::Fragment => self.fragments_generated += 1,
    }
    self.start_callables += companion.start_callables().count();
    self.windowed_variants += companion.variants.len();
    self.constants_generated += companion.constants.len();
    if companion.listener.is_some() {
      self.result_contracts += 1;
    }
  }

  pub fn record_file(&mut self, file: &GeneratedFile) {
    match file.dialect {
      Dialect::Java => self.java_files += 1,
      Dialect::Kotlin => self.kotlin_files += 1,
    }
  }

  pub fn record_written(&mut self) {
    self.files_written += 1;
  }

  pub fn record_warning(&mut self, warning: GenerationWarning) {
    if matches!(warning, GenerationWarning::ClassSkipped { .. }) {
      self.classes_skipped += 1;
    }
    self.warnings.push(warning);
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    for warning in warnings {
      self.record_warning(warning);
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "Skipped '{class}': {error}")]
  ClassSkipped { class: String, error: String },
  #[strum(to_string = "Field '{field}' belongs to unknown class '{owner}'")]
  OrphanField { owner: String, field: String },
  #[strum(to_string = "Failed to write '{path}': {error}")]
  EmissionFailed { path: String, error: String },
  #[strum(to_string = "Class '{class}' is declared more than once; keeping the first declaration")]
  DuplicateTarget { class: String },
  #[strum(to_string = "Fragment '{class}' declares result types, which only activities support")]
  ResultTypesIgnored { class: String },
}

impl GenerationWarning {
  pub fn is_skipped_item(&self) -> bool {
    matches!(self, Self::ClassSkipped { .. } | Self::EmissionFailed { .. })
  }
}

//! Orchestration of companion generation.
//!
//! [`TargetClassOrchestrator`] owns the field sets of a single target class and drives the
//! naming engine and the method builders to produce its [`CompanionType`]. [`Orchestrator`]
//! runs that for every class of a descriptor set, renders the selected dialects and hands
//! the files to an [`OutputSink`]. A failing class is recorded as a warning and never stops
//! the batch.

use std::collections::{BTreeSet, HashSet};

use super::{
  ast::{
    CallableSpec, CompanionType, ConstantSpec, DelegateReceiver, DialectSelection, Documentation, FieldDef,
    ResultContract, TargetClass, TargetKind,
  },
  builder::{CallableOwner, FinishWithResultBuilder, InjectMethodBuilder, MethodBuilder, SaveStateMethodBuilder},
  codegen::{self, GeneratedFile, OutputSink},
  descriptors::DescriptorSet,
  errors::{GenerationError, InvalidFieldError},
  metrics::{GenerationStats, GenerationWarning},
  naming::{
    identifiers::to_constant_name,
    windows::{NamingTemplate, OptionalWindows},
  },
  runtime::{DEFAULT_REQUEST_CODE, DEFAULT_RUNTIME_PACKAGE, RuntimeTypes},
};

const REQUIRED_PREFIX: &str = "REQUIRED_";
const OPTIONAL_PREFIX: &str = "OPTIONAL_";
const RESULT_PREFIX: &str = "RESULT_";

/// Settings the generator layer sees, independent of the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
  pub runtime_package: String,
  /// Replaces every target's own mode when set.
  pub dialect_override: Option<DialectSelection>,
  pub request_code: i64,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self {
      runtime_package: DEFAULT_RUNTIME_PACKAGE.to_string(),
      dialect_override: None,
      request_code: DEFAULT_REQUEST_CODE,
    }
  }
}

/// Builds the companion type of one target class.
pub struct TargetClassOrchestrator<'a> {
  target: TargetClass,
  runtime: &'a RuntimeTypes,
  request_code: i64,
  dialects: DialectSelection,
  contract: Option<ResultContract>,
  required: BTreeSet<FieldDef>,
  optional: BTreeSet<FieldDef>,
  warnings: Vec<GenerationWarning>,
}

impl<'a> TargetClassOrchestrator<'a> {
  pub fn new(target: TargetClass, runtime: &'a RuntimeTypes, config: &GeneratorConfig) -> Result<Self, GenerationError> {
    let mut warnings = vec![];
    let contract = match target.kind {
      TargetKind::Activity => ResultContract::new(&target, target.result_entities.clone())?,
      TargetKind::Fragment => {
        if !target.result_entities.is_empty() {
          warnings.push(GenerationWarning::ResultTypesIgnored {
            class: target.class.canonical_name(),
          });
        }
        None
      }
    };

    Ok(Self {
      dialects: config.dialect_override.unwrap_or_else(|| target.dialects()),
      target,
      runtime,
      request_code: config.request_code,
      contract,
      required: BTreeSet::new(),
      optional: BTreeSet::new(),
      warnings,
    })
  }

  /// Files a field under the required or optional set. Names must be unique per class.
  pub fn add_field(&mut self, field: FieldDef) -> Result<(), InvalidFieldError> {
    let taken = self
      .required
      .iter()
      .chain(&self.optional)
      .any(|existing| existing.name() == field.name());
    if taken {
      return Err(InvalidFieldError::Duplicate {
        field: field.name().to_string(),
      });
    }

    if field.is_required() {
      self.required.insert(field);
    } else {
      self.optional.insert(field);
    }
    Ok(())
  }

  pub fn required_fields(&self) -> impl Iterator<Item = &FieldDef> {
    self.required.iter()
  }

  pub fn optional_fields(&self) -> impl Iterator<Item = &FieldDef> {
    self.optional.iter()
  }

  pub fn take_warnings(&mut self) -> Vec<GenerationWarning> {
    std::mem::take(&mut self.warnings)
  }

  fn all_fields(&self) -> impl Iterator<Item = &FieldDef> {
    self.required.iter().chain(&self.optional)
  }

  pub fn generate(&self) -> Result<CompanionType, GenerationError> {
    let owner = CallableOwner::new(&self.target, self.runtime, self.request_code);
    let (full, variants, no_optional) = self.build_start_family(owner)?;

    let mut inject = InjectMethodBuilder::new(owner);
    let mut save_state = SaveStateMethodBuilder::new(owner);
    for field in self.all_fields() {
      inject.visit_field(field);
      save_state.visit_field(field);
    }

    let companion = CompanionType::builder()
      .name(self.target.companion_class())
      .target(self.target.class.clone())
      .kind(self.target.kind)
      .dialects(self.dialects)
      .docs(self.companion_docs())
      .constants(self.constants())
      .full(full)
      .variants(variants)
      .no_optional(no_optional)
      .delegates(self.delegates())
      .inject(inject.build())
      .save_state(save_state.build())
      .maybe_listener(self.contract.as_ref().map(ResultContract::listener_interface))
      .maybe_finish_with_result(
        self
          .contract
          .as_ref()
          .map(|contract| FinishWithResultBuilder::new(owner, contract).build()),
      )
      .build();

    self.check_unique_names(&companion)?;
    Ok(companion)
  }

  /// Full callable, the windowed variants in enumeration order, then the no-optional one.
  fn build_start_family(
    &self,
    owner: CallableOwner<'_>,
  ) -> Result<(CallableSpec, Vec<CallableSpec>, CallableSpec), GenerationError> {
    let template = NamingTemplate::for_kind(self.target.kind);
    let optional: Vec<FieldDef> = self.optional.iter().cloned().collect();
    let contract = self.contract.as_ref();

    let mut full = MethodBuilder::new(owner, template.full_name());
    for field in &self.required {
      full.visit_field(field);
    }
    let mut no_optional = full.copy(template.no_optional_name());
    for field in &optional {
      full.visit_field(field);
    }
    full.end_with_result(contract)?;
    let full = full.build()?;

    let windows = OptionalWindows::new(&optional, &template);
    let mut variants = Vec::with_capacity(windows.len());
    for window in windows {
      let mut variant = no_optional.copy(template.for_optional_prefix());
      for field in window.fields {
        variant.visit_field(field);
      }
      variant.end_with_result(contract)?;
      variant.rename(window.name);
      variants.push(variant.build()?);
    }

    no_optional.end_with_result(contract)?;
    Ok((full, variants, no_optional.build()?))
  }

  /// `View.startX` and `Fragment.startX` forwarders for activities emitted in Kotlin.
  fn delegates(&self) -> Vec<DelegateReceiver> {
    if self.target.kind != TargetKind::Activity || !self.dialects.kotlin {
      return vec![];
    }
    vec![
      DelegateReceiver {
        receiver: self.runtime.view.clone(),
        context_property: "context".to_string(),
        nullable: false,
      },
      DelegateReceiver {
        receiver: self.runtime.fragment.clone(),
        context_property: "activity".to_string(),
        nullable: true,
      },
    ]
  }

  fn constants(&self) -> Vec<ConstantSpec> {
    let fields = self
      .required
      .iter()
      .map(|field| (REQUIRED_PREFIX, field.name()))
      .chain(self.optional.iter().map(|field| (OPTIONAL_PREFIX, field.name())));
    let results = self
      .contract
      .iter()
      .flat_map(|contract| contract.entities())
      .map(|entity| (RESULT_PREFIX, entity.name.as_str()));

    fields
      .chain(results)
      .map(|(prefix, name)| ConstantSpec {
        name: to_constant_name(prefix, name),
        value: name.to_string(),
      })
      .collect()
  }

  fn companion_docs(&self) -> Documentation {
    let mut docs = Documentation::from_lines([format!(
      "Generated companion of {{@link {}}}.",
      self.target.class.relative_name()
    )]);
    if !self.target.docs.is_empty() {
      docs.push("");
      for line in self.target.docs.lines() {
        docs.push(line.clone());
      }
    }
    docs
  }

  fn check_unique_names(&self, companion: &CompanionType) -> Result<(), GenerationError> {
    let mut seen = HashSet::new();
    for callable in companion.callables() {
      if !seen.insert(callable.name.as_str()) {
        return Err(GenerationError::DuplicateCallable {
          class: self.target.class.canonical_name(),
          name: callable.name.clone(),
        });
      }
    }
    Ok(())
  }
}

/// Everything a batch run produced, ready to be emitted.
#[derive(Debug, Default)]
pub struct GeneratedOutput {
  pub companions: Vec<CompanionType>,
  pub files: Vec<GeneratedFile>,
  pub stats: GenerationStats,
}

/// Batch driver over a descriptor set.
pub struct Orchestrator {
  descriptors: DescriptorSet,
  config: GeneratorConfig,
  runtime: RuntimeTypes,
}

impl Orchestrator {
  #[must_use]
  pub fn new(descriptors: DescriptorSet, config: GeneratorConfig) -> Self {
    let runtime = RuntimeTypes::new(&config.runtime_package);
    Self {
      descriptors,
      config,
      runtime,
    }
  }

  /// Generates every class and renders its files. `source_path` only appears in headers.
  pub fn generate(&self, source_path: &str) -> GeneratedOutput {
    let mut output = GeneratedOutput::default();
    let (bindings, warnings) = self.descriptors.bind();
    output.stats.record_warnings(warnings);

    for binding in bindings {
      let class = binding.class_name.clone();
      match self.generate_class(binding.target, binding.fields, &mut output.stats) {
        Ok(companion) => {
          output.stats.record_companion(&companion);
          for file in codegen::render(&companion, source_path) {
            output.stats.record_file(&file);
            output.files.push(file);
          }
          output.companions.push(companion);
        }
        Err(error) => output.stats.record_warning(GenerationWarning::ClassSkipped {
          class,
          error: error.to_string(),
        }),
      }
    }

    output
  }

  fn generate_class(
    &self,
    target: Result<TargetClass, GenerationError>,
    fields: Vec<Result<FieldDef, InvalidFieldError>>,
    stats: &mut GenerationStats,
  ) -> Result<CompanionType, GenerationError> {
    let mut orchestrator = TargetClassOrchestrator::new(target?, &self.runtime, &self.config)?;
    for field in fields {
      orchestrator.add_field(field?)?;
    }
    stats.record_warnings(orchestrator.take_warnings());
    orchestrator.generate()
  }

  /// Writes every file, turning write failures into warnings so the remaining files are
  /// still attempted.
  pub async fn emit(files: &[GeneratedFile], sink: &impl OutputSink, stats: &mut GenerationStats) {
    for file in files {
      match sink.write(file).await {
        Ok(()) => stats.record_written(),
        Err(error) => stats.record_warning(GenerationWarning::EmissionFailed {
          path: file.relative_path.display().to_string(),
          error: format!("{error:#}"),
        }),
      }
    }
  }
}

use std::path::PathBuf;

use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use crate::{
  generator::{
    codegen::{DirectorySink, GeneratedFile},
    descriptors::DescriptorSet,
    metrics::GenerationStats,
    orchestrator::{GeneratorConfig, Orchestrator},
    runtime::DEFAULT_RUNTIME_PACKAGE,
  },
  ui::{Colors, DialectChoice, GenerateCommand, colors::Role},
  utils::DescriptorLoader,
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub dialect: DialectChoice,
  pub runtime_package: String,
  pub dry_run: bool,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      input,
      output,
      dialect,
      runtime_package,
      dry_run,
      verbose,
      quiet,
    } = command;

    let runtime_package = runtime_package.unwrap_or_else(|| DEFAULT_RUNTIME_PACKAGE.to_string());
    validate_package(&runtime_package)?;
    if verbose && quiet {
      anyhow::bail!("--verbose and --quiet cannot be combined");
    }

    Ok(Self {
      input,
      output,
      dialect,
      runtime_package,
      dry_run,
      verbose,
      quiet,
    })
  }

  async fn load_descriptors(&self) -> anyhow::Result<DescriptorSet> {
    DescriptorLoader::open(&self.input).await?.parse()
  }

  fn generator_config(&self) -> GeneratorConfig {
    GeneratorConfig {
      runtime_package: self.runtime_package.clone(),
      dialect_override: self.dialect.selection(),
      ..GeneratorConfig::default()
    }
  }
}

fn validate_package(package: &str) -> anyhow::Result<()> {
  let valid = !package.is_empty()
    && package
      .split('.')
      .all(crate::generator::naming::identifiers::is_java_identifier);
  if valid {
    Ok(())
  } else {
    anyhow::bail!("Invalid runtime package '{package}': expected a dotted Java package name")
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.role(Role::Timestamp)));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.role(Role::StatLabel)),
        value.with(self.colors.role(Role::StatValue))
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading descriptors from: {}", self.config.input.display())
        .with(self.colors.role(Role::Progress))
        .to_string(),
    );
  }

  fn log_generating(&self, descriptors: &DescriptorSet) {
    self.info(
      &format!(
        "Generating companions for {} classes ({} fields)...",
        descriptors.targets.len(),
        descriptors.fields.len()
      )
      .with(self.colors.role(Role::Progress))
      .to_string(),
    );
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Classes generated:", stats.classes_generated.to_string());
    self.stat("", format!("{} activities", stats.activities_generated));
    self.stat("", format!("{} fragments", stats.fragments_generated));
    if stats.classes_skipped > 0 {
      self.stat("Classes skipped:", stats.classes_skipped.to_string());
    }
    self.stat("Start callables:", stats.start_callables.to_string());
    self.stat("", format!("{} windowed variants", stats.windowed_variants));
    if stats.result_contracts > 0 {
      self.stat("Result contracts:", stats.result_contracts.to_string());
    }
    self.stat("Constants:", stats.constants_generated.to_string());
    self.stat(
      "Files:",
      format!("{} java, {} kotlin", stats.java_files, stats.kotlin_files),
    );
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_warnings(stats);
  }

  fn print_files(&self, files: &[GeneratedFile]) {
    if !self.config.verbose {
      return;
    }
    for file in files {
      println!(
        "              {} {}",
        format!("{:<6}", file.dialect).with(self.colors.role(Role::Kind)),
        file.relative_path.display().to_string().with(self.colors.role(Role::GeneratedPath))
      );
    }
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    if stats.warnings.is_empty() || self.config.quiet {
      return;
    }

    let mut printed_header = false;
    for warning in &stats.warnings {
      let should_print = warning.is_skipped_item() || self.config.verbose;
      if !should_print {
        continue;
      }

      if !printed_header {
        println!();
        printed_header = true;
      }

      let label = if warning.is_skipped_item() { "Skipped:" } else { "Warning:" };
      eprintln!(
        "{} {}",
        label.with(self.colors.role(Role::for_warning(warning))),
        format!("{warning}").with(self.colors.role(Role::Progress))
      );
    }
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.role(Role::Progress))
        .to_string(),
    );
  }

  fn log_success(&self, stats: &GenerationStats) {
    if !self.config.quiet {
      let message = format!("Successfully wrote {} files", stats.files_written);
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.role(Role::Timestamp)),
        message.with(self.colors.role(Role::Written))
      );
    }
  }
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let descriptors = config.load_descriptors().await?;

  logger.log_generating(&descriptors);
  let orchestrator = Orchestrator::new(descriptors, config.generator_config());
  let source_path = config.input.display().to_string();
  let mut output = orchestrator.generate(&source_path);

  if config.dry_run {
    logger.print_statistics(&output.stats);
    for file in &output.files {
      println!("// {}", file.relative_path.display());
      println!("{}", file.contents);
    }
    return Ok(());
  }

  logger.log_writing();
  logger.print_files(&output.files);
  let sink = DirectorySink::new(&config.output);
  Orchestrator::emit(&output.files, &sink, &mut output.stats).await;
  logger.print_statistics(&output.stats);

  if output.stats.files_written < output.files.len() {
    anyhow::bail!(
      "{} of {} files could not be written",
      output.files.len() - output.stats.files_written,
      output.files.len()
    );
  }

  logger.log_success(&output.stats);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn command(runtime_package: Option<&str>) -> GenerateCommand {
    GenerateCommand {
      input: PathBuf::from("descriptors.json"),
      output: PathBuf::from("out"),
      dialect: DialectChoice::Auto,
      runtime_package: runtime_package.map(str::to_string),
      dry_run: false,
      verbose: false,
      quiet: false,
    }
  }

  #[test]
  fn test_from_command_uses_default_runtime_package() {
    let config = GenerateConfig::from_command(command(None)).unwrap();
    assert_eq!(config.runtime_package, DEFAULT_RUNTIME_PACKAGE);
    assert_eq!(config.generator_config().dialect_override, None);
  }

  #[test]
  fn test_from_command_custom_runtime_package() {
    let config = GenerateConfig::from_command(command(Some("org.acme.nav"))).unwrap();
    assert_eq!(config.generator_config().runtime_package, "org.acme.nav");
  }

  #[test]
  fn test_from_command_rejects_invalid_package() {
    for package in ["", "org..acme", "org.acme.class", "1org"] {
      let result = GenerateConfig::from_command(command(Some(package)));
      assert!(result.is_err(), "package '{package}' should be rejected");
    }
  }

  #[test]
  fn test_from_command_rejects_verbose_and_quiet() {
    let mut command = command(None);
    command.verbose = true;
    command.quiet = true;
    let err = GenerateConfig::from_command(command).unwrap_err();
    assert!(err.to_string().contains("--verbose"));
  }

  #[test]
  fn test_dialect_choice_overrides() {
    let mut command = command(None);
    command.dialect = DialectChoice::Kotlin;
    let config = GenerateConfig::from_command(command).unwrap();
    assert_eq!(
      config.generator_config().dialect_override,
      Some(crate::generator::ast::DialectSelection::KOTLIN)
    );
  }

  #[tokio::test]
  async fn test_generate_code_writes_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("descriptors.json");
    tokio::fs::write(&input, include_str!("../../../fixtures/user_activity.json"))
      .await
      .unwrap();

    let config = GenerateConfig {
      input,
      output: dir.path().join("src"),
      dialect: DialectChoice::Auto,
      runtime_package: DEFAULT_RUNTIME_PACKAGE.to_string(),
      dry_run: false,
      verbose: false,
      quiet: true,
    };
    let colors = Colors::new(false, crate::ui::colors::Theme::Dark);
    generate_code(config, &colors).await.unwrap();

    let written = dir.path().join("src/com/example/app/UserActivityBuilder.java");
    let contents = tokio::fs::read_to_string(written).await.unwrap();
    assert!(contents.starts_with("// AUTO-GENERATED CODE - DO NOT EDIT!"));
  }
}

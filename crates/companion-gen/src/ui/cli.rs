use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use super::colors::{ColorMode, Colors, ThemeMode};
use crate::generator::ast::DialectSelection;

#[derive(Parser, Debug)]
#[command(name = "companion-gen")]
#[command(author, version, about = "Android activity and fragment builder companion generator")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from a descriptor file
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate builder companions from a descriptor file
  Generate(GenerateCommand),
}

#[derive(Args, Debug)]
pub struct GenerateCommand {
  /// Path to the JSON descriptor file
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Source root the generated package directories are written under
  #[arg(short, long, value_name = "DIR")]
  pub output: PathBuf,

  /// Dialects to emit; `auto` follows each class's own mode, `none` keeps only the state helpers
  #[arg(short, long, value_enum, default_value = "auto")]
  pub dialect: DialectChoice,

  /// Package of the ActivityBuilder/FragmentBuilder runtime classes
  #[arg(long, value_name = "PACKAGE")]
  pub runtime_package: Option<String>,

  /// Print the generated code instead of writing files
  #[arg(long, default_value_t = false)]
  pub dry_run: bool,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialectChoice {
  Auto,
  Java,
  Kotlin,
  Both,
  None,
}

impl DialectChoice {
  /// `None` defers to the per-class mode.
  #[must_use]
  pub const fn selection(self) -> Option<DialectSelection> {
    match self {
      Self::Auto => None,
      Self::Java => Some(DialectSelection::JAVA),
      Self::Kotlin => Some(DialectSelection::KOTLIN),
      Self::Both => Some(DialectSelection::BOTH),
      Self::None => Some(DialectSelection::NONE),
    }
  }
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List every target class with its field counts and generated callables
  Targets {
    /// Path to the JSON descriptor file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}

use std::path::PathBuf;

use anyhow::Context;

use super::ast::{ClassName, CompanionType};

pub mod imports;
pub mod java;
pub mod kotlin;
pub mod writer;

#[cfg(test)]
mod tests;

pub use java::JavaRenderer;
pub use kotlin::KotlinRenderer;

/// Output language of a generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Dialect {
  Java,
  Kotlin,
}

impl Dialect {
  #[must_use]
  pub const fn extension(self) -> &'static str {
    match self {
      Self::Java => "java",
      Self::Kotlin => "kt",
    }
  }
}

/// One rendered source file, addressed relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
  pub class: ClassName,
  pub dialect: Dialect,
  pub relative_path: PathBuf,
  pub contents: String,
}

impl GeneratedFile {
  fn new(class: &ClassName, dialect: Dialect, contents: String) -> Self {
    let mut relative_path: PathBuf = class.package().split('.').filter(|part| !part.is_empty()).collect();
    relative_path.push(format!("{}.{}", class.simple_name(), dialect.extension()));
    Self {
      class: class.clone(),
      dialect,
      relative_path,
      contents,
    }
  }
}

/// Destination of generated files. Writes of one file never affect the others.
pub trait OutputSink {
  fn write(&self, file: &GeneratedFile) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Writes files below a root directory, creating package directories on demand.
#[derive(Debug, Clone)]
pub struct DirectorySink {
  root: PathBuf,
}

impl DirectorySink {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }
}

impl OutputSink for DirectorySink {
  async fn write(&self, file: &GeneratedFile) -> anyhow::Result<()> {
    let path = self.root.join(&file.relative_path);
    if let Some(parent) = path.parent() {
      tokio::fs::create_dir_all(parent)
        .await
        .with_context(|| format!("creating {}", parent.display()))?;
    }
    tokio::fs::write(&path, &file.contents)
      .await
      .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
  }
}

/// Collects files in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySink {
  pub files: std::sync::Mutex<Vec<GeneratedFile>>,
}

#[cfg(test)]
impl OutputSink for MemorySink {
  async fn write(&self, file: &GeneratedFile) -> anyhow::Result<()> {
    self
      .files
      .lock()
      .map_err(|_| anyhow::anyhow!("memory sink poisoned"))?
      .push(file.clone());
    Ok(())
  }
}

#[must_use]
pub fn header(source_path: &str) -> String {
  format!("// AUTO-GENERATED CODE - DO NOT EDIT!\n// Source: {source_path}\n// Generated by `companion-gen`\n")
}

/// Renders the files of one companion: the Java class always, since it carries the state
/// helpers, and the Kotlin extensions when the Kotlin dialect is selected.
#[must_use]
pub fn render(companion: &CompanionType, source_path: &str) -> Vec<GeneratedFile> {
  let header = header(source_path);
  let mut files = vec![GeneratedFile::new(
    &companion.name,
    Dialect::Java,
    JavaRenderer::new(companion).render(&header),
  )];
  if companion.dialects.kotlin {
    files.push(GeneratedFile::new(
      &companion.name,
      Dialect::Kotlin,
      KotlinRenderer::new(companion).render(&header),
    ));
  }
  files
}

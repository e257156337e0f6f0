use std::path::{Path, PathBuf};

use anyhow::Context;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};

use crate::generator::descriptors::DescriptorSet;

/// Memory-maps a descriptor file and decodes it, reporting the JSON path of the first
/// mismatch.
pub struct DescriptorLoader {
  path: PathBuf,
  file: AsyncMmapFile,
}

impl DescriptorLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let file = AsyncMmapFile::open(path)
      .await
      .with_context(|| format!("opening descriptor file {}", path.display()))?;
    Ok(Self {
      path: path.to_path_buf(),
      file,
    })
  }

  pub fn parse(&self) -> anyhow::Result<DescriptorSet> {
    parse_descriptors(self.file.as_slice()).with_context(|| format!("parsing {}", self.path.display()))
  }
}

pub fn parse_descriptors(bytes: &[u8]) -> anyhow::Result<DescriptorSet> {
  let deserializer = &mut serde_json::Deserializer::from_slice(bytes);
  serde_path_to_error::deserialize(deserializer).map_err(|error| {
    let path = error.path().to_string();
    anyhow::anyhow!("at '{path}': {}", error.into_inner())
  })
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;

  #[test]
  fn test_parse_descriptors_reports_json_path() {
    let json = br#"{"targets": [{"kind": "activity", "qualifiedName": "com.example.A"}], "fields": [{"owner": "com.example.A", "name": "id", "type": "int"}]}"#;
    let error = parse_descriptors(json).unwrap_err().to_string();
    assert!(error.contains("fields[0]"), "unexpected error: {error}");
    assert!(error.contains("required"), "unexpected error: {error}");
  }

  #[test]
  fn test_parse_descriptors_defaults_missing_sections() {
    let set = parse_descriptors(b"{}").unwrap();
    assert!(set.targets.is_empty());
    assert!(set.fields.is_empty());
  }

  #[tokio::test]
  async fn test_loader_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file
      .write_all(br#"{"targets": [{"kind": "fragment", "qualifiedName": "com.example.DetailFragment"}]}"#)
      .unwrap();

    let loader = DescriptorLoader::open(file.path()).await.unwrap();
    let set = loader.parse().unwrap();
    assert_eq!(set.targets.len(), 1);
    assert_eq!(set.targets[0].qualified_name, "com.example.DetailFragment");
  }

  #[tokio::test]
  async fn test_loader_missing_file() {
    let result = DescriptorLoader::open(Path::new("/nonexistent/descriptors.json")).await;
    let error = format!("{:#}", result.err().unwrap());
    assert!(error.contains("opening descriptor file"));
  }
}

use std::path::PathBuf;

use super::{companion, detail_fragment, user_activity};
use crate::generator::{
  ast::DialectSelection,
  codegen::{Dialect, DirectorySink, GeneratedFile, MemorySink, OutputSink, render},
  metrics::{GenerationStats, GenerationWarning},
  orchestrator::Orchestrator,
};

/// Rejects every file whose path mentions `reject`.
struct RejectingSink {
  reject: &'static str,
  inner: MemorySink,
}

impl OutputSink for RejectingSink {
  async fn write(&self, file: &GeneratedFile) -> anyhow::Result<()> {
    if file.relative_path.to_string_lossy().contains(self.reject) {
      anyhow::bail!("disk full");
    }
    self.inner.write(file).await
  }
}

#[test]
fn test_render_paths_follow_package() {
  let companion = companion(
    user_activity(),
    &[("userId", "int", true)],
    DialectSelection::BOTH,
  );
  let files = render(&companion, "test.json");

  let paths: Vec<(Dialect, PathBuf)> = files.iter().map(|f| (f.dialect, f.relative_path.clone())).collect();
  assert_eq!(
    paths,
    [
      (Dialect::Java, PathBuf::from("com/example/app/UserActivityBuilder.java")),
      (Dialect::Kotlin, PathBuf::from("com/example/app/UserActivityBuilder.kt")),
    ]
  );
  assert!(files.iter().all(|f| f.contents.contains("// Source: test.json")));
}

#[test]
fn test_render_java_only_skips_kotlin() {
  let companion = companion(detail_fragment(vec![]), &[], DialectSelection::JAVA);
  let files = render(&companion, "test.json");
  assert_eq!(files.len(), 1);
  assert_eq!(files[0].dialect, Dialect::Java);
}

#[tokio::test]
async fn test_directory_sink_creates_package_dirs() {
  let dir = tempfile::tempdir().unwrap();
  let sink = DirectorySink::new(dir.path());
  let companion = companion(user_activity(), &[("userId", "int", true)], DialectSelection::JAVA);
  let files = render(&companion, "test.json");

  let mut stats = GenerationStats::default();
  Orchestrator::emit(&files, &sink, &mut stats).await;

  assert_eq!(stats.files_written, 1);
  let written = tokio::fs::read_to_string(dir.path().join("com/example/app/UserActivityBuilder.java"))
    .await
    .unwrap();
  assert_eq!(written, files[0].contents);
}

#[tokio::test]
async fn test_emit_failure_does_not_stop_other_files() {
  let sink = RejectingSink {
    reject: ".kt",
    inner: MemorySink::default(),
  };
  let mut files = render(
    &companion(user_activity(), &[("userId", "int", true)], DialectSelection::BOTH),
    "test.json",
  );
  files.extend(render(
    &companion(detail_fragment(vec![]), &[], DialectSelection::JAVA),
    "test.json",
  ));

  let mut stats = GenerationStats::default();
  Orchestrator::emit(&files, &sink, &mut stats).await;

  assert_eq!(stats.files_written, 2);
  assert_eq!(sink.inner.files.lock().unwrap().len(), 2);
  assert_eq!(stats.warnings.len(), 1);
  let GenerationWarning::EmissionFailed { path, error } = &stats.warnings[0] else {
    panic!("expected emission failure, got {:?}", stats.warnings[0]);
  };
  assert!(path.ends_with("UserActivityBuilder.kt"));
  assert_eq!(error, "disk full");
  assert!(stats.warnings[0].is_skipped_item());
}

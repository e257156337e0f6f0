use serde::Deserialize;

use super::{documentation::Documentation, result::ResultEntity, shared::SharedElement, types::ClassName};

const COMPANION_SUFFIX: &str = "Builder";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, strum::Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "lowercase")]
pub enum TargetKind {
  Activity,
  Fragment,
}

/// Output dialects requested for a target class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, strum::Display)]
#[serde(rename_all = "camelCase")]
pub enum GenerateMode {
  #[default]
  Auto,
  JavaOnly,
  KotlinOnly,
  Both,
}

impl GenerateMode {
  /// `Auto` resolves to `Both` for Kotlin sources and to `JavaOnly` otherwise.
  #[must_use]
  pub const fn resolve(self, is_kotlin_source: bool) -> DialectSelection {
    match self {
      Self::Auto if is_kotlin_source => DialectSelection::BOTH,
      Self::Auto | Self::JavaOnly => DialectSelection::JAVA,
      Self::KotlinOnly => DialectSelection::KOTLIN,
      Self::Both => DialectSelection::BOTH,
    }
  }
}

/// Which dialects receive the start/show family and the finish-with-result callable.
///
/// The Java companion is always written since it carries the constants, the injection
/// callables and the listener interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DialectSelection {
  pub java: bool,
  pub kotlin: bool,
}

impl DialectSelection {
  /// Only the state helpers and constants are emitted.
  pub const NONE: Self = Self {
    java: false,
    kotlin: false,
  };
  pub const JAVA: Self = Self {
    java: true,
    kotlin: false,
  };
  pub const KOTLIN: Self = Self {
    java: false,
    kotlin: true,
  };
  pub const BOTH: Self = Self {
    java: true,
    kotlin: true,
  };
}

/// A class annotated for companion generation, before its fields are attached.
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct TargetClass {
  pub class: ClassName,
  pub kind: TargetKind,
  #[builder(default)]
  pub kotlin_source: bool,
  #[builder(default)]
  pub mode: GenerateMode,
  #[builder(default)]
  pub result_entities: Vec<ResultEntity>,
  #[builder(default)]
  pub shared_elements: Vec<SharedElement>,
  #[builder(default)]
  pub docs: Documentation,
}

impl TargetClass {
  #[must_use]
  pub fn simple_name(&self) -> &str {
    self.class.simple_name()
  }

  /// `com.example.UserActivity` gets `com.example.UserActivityBuilder`; nested classes join
  /// their enclosing names with `_`.
  #[must_use]
  pub fn companion_class(&self) -> ClassName {
    let base = self.class.simple_names().join("_");
    ClassName::new(self.class.package(), format!("{base}{COMPANION_SUFFIX}"))
  }

  #[must_use]
  pub fn dialects(&self) -> DialectSelection {
    self.mode.resolve(self.kotlin_source)
  }
}

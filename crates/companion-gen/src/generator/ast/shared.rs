/// Where the source half of a shared-element pair comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SharedElementSource {
  /// View id inside the fragment container; its transition name is read at runtime.
  Id(i32),
  /// Literal transition name.
  Name(String),
}

/// Id value meaning "no view id was given".
pub const UNSET_SOURCE_ID: i32 = 0;

/// A `(source, target)` transition-name pair passed to a fragment show call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedElement {
  pub source: SharedElementSource,
  pub target_name: String,
}

impl SharedElement {
  /// Builds a pair from its declared parts. A zero id falls back to the source name, which
  /// must then be present.
  #[must_use]
  pub fn from_parts(source_id: i32, source_name: Option<&str>, target_name: impl Into<String>) -> Option<Self> {
    let source = if source_id == UNSET_SOURCE_ID {
      SharedElementSource::Name(source_name.filter(|name| !name.is_empty())?.to_string())
    } else {
      SharedElementSource::Id(source_id)
    };
    Some(Self {
      source,
      target_name: target_name.into(),
    })
  }
}

//! Enumeration of the optional-parameter overloads of a start/show family.
//!
//! The optional fields are treated as a ring. For every window length from 1 to `N - 1`
//! and every starting offset from 0 to `N - 1`, the contiguous (wrapping) run of fields is
//! one overload. That yields `N * (N - 1)` overloads instead of the `2^N` of a power set.

use itertools::Itertools;

use super::identifiers::capitalize;
use crate::generator::ast::{FieldDef, TargetKind};

pub(crate) const START_VERB: &str = "start";
pub(crate) const SHOW_VERB: &str = "show";
pub(crate) const NO_OPTIONAL_SUFFIX: &str = "WithoutOptional";
pub(crate) const FOR_OPTIONAL_SUFFIX: &str = "WithOptional";
pub(crate) const VARIANT_SEPARATOR: &str = "And";

/// Fixed method names of one callable family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingTemplate {
  verb: &'static str,
  no_optional: String,
  for_optional: String,
  separator: &'static str,
}

impl NamingTemplate {
  #[must_use]
  pub fn new(verb: &'static str) -> Self {
    Self {
      verb,
      no_optional: format!("{verb}{NO_OPTIONAL_SUFFIX}"),
      for_optional: format!("{verb}{FOR_OPTIONAL_SUFFIX}"),
      separator: VARIANT_SEPARATOR,
    }
  }

  #[must_use]
  pub fn for_kind(kind: TargetKind) -> Self {
    match kind {
      TargetKind::Activity => Self::new(START_VERB),
      TargetKind::Fragment => Self::new(SHOW_VERB),
    }
  }

  /// Name of the callable taking every field.
  #[must_use]
  pub fn full_name(&self) -> &str {
    self.verb
  }

  #[must_use]
  pub fn no_optional_name(&self) -> &str {
    &self.no_optional
  }

  #[must_use]
  pub fn for_optional_prefix(&self) -> &str {
    &self.for_optional
  }

  #[must_use]
  pub fn variant_name<'f>(&self, fields: impl IntoIterator<Item = &'f FieldDef>) -> String {
    let suffix = fields
      .into_iter()
      .map(|field| capitalize(field.name()))
      .join(self.separator);
    format!("{}{suffix}", self.for_optional)
  }
}

/// One enumerated overload: `step` fields starting at `start`, wrapping around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantWindow<'a> {
  pub step: usize,
  pub start: usize,
  pub name: String,
  pub fields: Vec<&'a FieldDef>,
}

/// Lazy, restartable iterator over the cyclic windows of the optional fields.
///
/// Yields nothing for zero or one optional field: the full and no-optional callables
/// already cover those cases.
#[derive(Debug, Clone)]
pub struct OptionalWindows<'a> {
  fields: &'a [FieldDef],
  template: &'a NamingTemplate,
  step: usize,
  start: usize,
}

impl<'a> OptionalWindows<'a> {
  #[must_use]
  pub fn new(fields: &'a [FieldDef], template: &'a NamingTemplate) -> Self {
    Self {
      fields,
      template,
      step: 1,
      start: 0,
    }
  }

  /// Number of windows for `n` optional fields.
  #[must_use]
  pub const fn count_for(n: usize) -> usize {
    if n < 2 { 0 } else { n * (n - 1) }
  }

  fn consumed(&self) -> usize {
    (self.step - 1) * self.fields.len() + self.start
  }
}

impl<'a> Iterator for OptionalWindows<'a> {
  type Item = VariantWindow<'a>;

  fn next(&mut self) -> Option<Self::Item> {
    let size = self.fields.len();
    if self.step >= size {
      return None;
    }

    let (step, start) = (self.step, self.start);
    let fields: Vec<&'a FieldDef> = (start..start + step).map(|index| &self.fields[index % size]).collect();
    let name = self.template.variant_name(fields.iter().copied());

    self.start += 1;
    if self.start == size {
      self.start = 0;
      self.step += 1;
    }

    Some(VariantWindow {
      step,
      start,
      name,
      fields,
    })
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let remaining = Self::count_for(self.fields.len()).saturating_sub(self.consumed());
    (remaining, Some(remaining))
  }
}

impl ExactSizeIterator for OptionalWindows<'_> {}

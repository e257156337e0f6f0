use std::collections::{BTreeSet, HashMap};

use crate::generator::ast::ClassName;

const JAVA_LANG: &str = "java.lang";

/// Decides, for one generated file, which classes are imported and which must be spelled
/// fully qualified.
///
/// Classes of the file's own package win their simple name first, then imported classes
/// in sorted order, then `java.lang`, which an import would shadow. A simple name already
/// taken by a different class, or reserved by a nested declaration of the file, forces the
/// fully qualified spelling.
#[derive(Debug, Clone)]
pub struct ImportSet {
  package: String,
  claimed: HashMap<String, ClassName>,
  imports: BTreeSet<String>,
}

impl ImportSet {
  pub fn new<'c>(
    package: &str,
    declared: &ClassName,
    reserved: &[&str],
    classes: impl IntoIterator<Item = &'c ClassName>,
  ) -> Self {
    let mut set = Self {
      package: package.to_string(),
      claimed: HashMap::new(),
      imports: BTreeSet::new(),
    };
    set.claimed.insert(declared.simple_name().to_string(), declared.top_level());

    let tops: BTreeSet<ClassName> = classes.into_iter().map(ClassName::top_level).collect();
    let (local, foreign): (Vec<&ClassName>, Vec<&ClassName>) =
      tops.iter().partition(|class| class.package() == package);
    let (implicit, imported): (Vec<&ClassName>, Vec<&ClassName>) =
      foreign.into_iter().partition(|class| class.package() == JAVA_LANG);

    for class in local {
      set.claim(class, reserved, false);
    }
    for class in imported {
      set.claim(class, reserved, true);
    }
    for class in implicit {
      set.claim(class, reserved, false);
    }
    set
  }

  fn claim(&mut self, top: &ClassName, reserved: &[&str], needs_import: bool) {
    let simple = top.simple_name();
    if reserved.contains(&simple) || self.claimed.contains_key(simple) {
      return;
    }
    self.claimed.insert(simple.to_string(), top.clone());
    if needs_import {
      self.imports.insert(top.canonical_name());
    }
  }

  /// Spelling of `class` inside the file.
  #[must_use]
  pub fn name(&self, class: &ClassName) -> String {
    let top = class.top_level();
    if self.claimed.get(top.simple_name()) == Some(&top) {
      class.relative_name()
    } else {
      class.canonical_name()
    }
  }

  /// Canonical names to import, sorted.
  pub fn imports(&self) -> impl Iterator<Item = &str> {
    self.imports.iter().map(String::as_str)
  }

  #[must_use]
  pub fn package(&self) -> &str {
    &self.package
  }
}

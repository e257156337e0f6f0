use std::{collections::HashSet, sync::LazyLock};

use inflections::Inflect;
use regex::Regex;

static JAVA_KEYWORDS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const", "continue", "default",
    "do", "double", "else", "enum", "extends", "final", "finally", "float", "for", "goto", "if", "implements",
    "import", "instanceof", "int", "interface", "long", "native", "new", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while", "true", "false", "null", "var", "record", "yield",
  ]
  .into_iter()
  .collect()
});

static KOTLIN_HARD_KEYWORDS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in", "interface", "is", "null",
    "object", "package", "return", "super", "this", "throw", "true", "try", "typealias", "typeof", "val", "var",
    "when", "while",
  ]
  .into_iter()
  .collect()
});

/// Names the generated start/show bodies declare themselves; a field with one of these
/// names would shadow a parameter or local of the generated callable.
pub(crate) const RESERVED_BINDING_NAMES: &[&str] = &[
  "activity",
  "container",
  "containerId",
  "context",
  "intent",
  "sharedElements",
];

static JAVA_IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

pub(crate) fn is_java_identifier(name: &str) -> bool {
  JAVA_IDENTIFIER_RE.is_match(name) && !JAVA_KEYWORDS.contains(name)
}

pub(crate) fn is_reserved_binding(name: &str) -> bool {
  RESERVED_BINDING_NAMES.contains(&name)
}

/// Escapes a name that collides with a Kotlin hard keyword (`object` becomes `` `object` ``).
pub(crate) fn to_kotlin_identifier(name: &str) -> String {
  if KOTLIN_HARD_KEYWORDS.contains(name) {
    format!("`{name}`")
  } else {
    name.to_string()
  }
}

/// Upper-cases the first character only: `userName` becomes `UserName`.
pub(crate) fn capitalize(name: &str) -> String {
  let mut chars = name.chars();
  match chars.next() {
    None => String::new(),
    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
  }
}

/// Descriptor key constant name: role prefix plus the upper snake case of the field name.
pub(crate) fn to_constant_name(prefix: &str, name: &str) -> String {
  format!("{prefix}{}", name.to_constant_case())
}

/// Local variable holding an injected value before it is assigned to the instance.
pub(crate) fn to_value_local(name: &str) -> String {
  format!("{name}Value")
}

use std::{
  collections::BTreeSet,
  fmt::{Display, Formatter},
  iter::Peekable,
  ops::RangeInclusive,
  str::CharIndices,
};

use strum::EnumString;

/// Java primitive types, spelled the way they appear in a type descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Primitive {
  Boolean,
  Byte,
  Short,
  Int,
  Long,
  Char,
  Float,
  Double,
}

impl Primitive {
  #[must_use]
  pub const fn boxed_simple_name(self) -> &'static str {
    match self {
      Self::Boolean => "Boolean",
      Self::Byte => "Byte",
      Self::Short => "Short",
      Self::Int => "Integer",
      Self::Long => "Long",
      Self::Char => "Character",
      Self::Float => "Float",
      Self::Double => "Double",
    }
  }

  #[must_use]
  pub const fn kotlin_name(self) -> &'static str {
    match self {
      Self::Boolean => "Boolean",
      Self::Byte => "Byte",
      Self::Short => "Short",
      Self::Int => "Int",
      Self::Long => "Long",
      Self::Char => "Char",
      Self::Float => "Float",
      Self::Double => "Double",
    }
  }

  #[must_use]
  pub const fn is_floating(self) -> bool {
    matches!(self, Self::Float | Self::Double)
  }

  /// Values an integral primitive can hold without wrapping.
  #[must_use]
  pub fn integral_range(self) -> Option<RangeInclusive<i64>> {
    match self {
      Self::Byte => Some(i64::from(i8::MIN)..=i64::from(i8::MAX)),
      Self::Short => Some(i64::from(i16::MIN)..=i64::from(i16::MAX)),
      Self::Int => Some(i64::from(i32::MIN)..=i64::from(i32::MAX)),
      Self::Long => Some(i64::MIN..=i64::MAX),
      Self::Char => Some(0..=i64::from(u16::MAX)),
      Self::Boolean | Self::Float | Self::Double => None,
    }
  }
}

/// A fully qualified class name. Nested classes keep their enclosing names in `simple_names`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassName {
  package: String,
  simple_names: Vec<String>,
}

impl ClassName {
  pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
    Self {
      package: package.into(),
      simple_names: vec![simple_name.into()],
    }
  }

  #[must_use]
  pub fn nested(&self, simple_name: impl Into<String>) -> Self {
    let mut simple_names = self.simple_names.clone();
    simple_names.push(simple_name.into());
    Self {
      package: self.package.clone(),
      simple_names,
    }
  }

  /// Splits a dotted name using the Java convention: lowercase segments form the package,
  /// the first capitalized segment starts the class name.
  pub fn parse(qualified: &str) -> Result<Self, TypeParseError> {
    let segments: Vec<&str> = qualified.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
      return Err(TypeParseError::InvalidName {
        name: qualified.to_string(),
      });
    }
    for segment in &segments {
      if !is_identifier(segment) {
        return Err(TypeParseError::InvalidName {
          name: qualified.to_string(),
        });
      }
    }

    let split = segments
      .iter()
      .position(|s| s.starts_with(|c: char| c.is_ascii_uppercase()))
      .unwrap_or(segments.len() - 1);

    Ok(Self {
      package: segments[..split].join("."),
      simple_names: segments[split..].iter().map(ToString::to_string).collect(),
    })
  }

  #[must_use]
  pub fn package(&self) -> &str {
    &self.package
  }

  /// Innermost simple name (`Listener` for `com.example.Outer.Listener`).
  #[must_use]
  pub fn simple_name(&self) -> &str {
    self.simple_names.last().map_or("", String::as_str)
  }

  #[must_use]
  pub fn simple_names(&self) -> &[String] {
    &self.simple_names
  }

  /// The outermost class, which is what an import statement names.
  #[must_use]
  pub fn top_level(&self) -> Self {
    Self {
      package: self.package.clone(),
      simple_names: self.simple_names.iter().take(1).cloned().collect(),
    }
  }

  #[must_use]
  pub fn is_nested(&self) -> bool {
    self.simple_names.len() > 1
  }

  /// Name relative to the package, e.g. `Outer.Listener`.
  #[must_use]
  pub fn relative_name(&self) -> String {
    self.simple_names.join(".")
  }

  #[must_use]
  pub fn canonical_name(&self) -> String {
    if self.package.is_empty() {
      self.relative_name()
    } else {
      format!("{}.{}", self.package, self.relative_name())
    }
  }
}

impl Display for ClassName {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.canonical_name())
  }
}

/// Semantic type of a bindable value, independent of the output dialect.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeRef {
  Primitive(Primitive),
  Declared { class: ClassName, arguments: Vec<TypeRef> },
  Array(Box<TypeRef>),
}

impl TypeRef {
  #[must_use]
  pub fn class(class: ClassName) -> Self {
    Self::Declared {
      class,
      arguments: vec![],
    }
  }

  #[must_use]
  pub fn generic(class: ClassName, arguments: Vec<TypeRef>) -> Self {
    Self::Declared { class, arguments }
  }

  #[must_use]
  pub fn string() -> Self {
    Self::class(ClassName::new("java.lang", "String"))
  }

  /// Parses a Java type descriptor such as `int`, `java.lang.String[]` or
  /// `java.util.ArrayList<com.example.User>`.
  pub fn parse(descriptor: &str) -> Result<Self, TypeParseError> {
    let trimmed = descriptor.trim();
    if trimmed.is_empty() {
      return Err(TypeParseError::Empty);
    }

    let mut parser = DescriptorParser {
      input: trimmed,
      chars: trimmed.char_indices().peekable(),
    };
    let parsed = parser.parse_type()?;
    parser.skip_whitespace();
    match parser.chars.next() {
      None => Ok(parsed),
      Some((position, found)) => Err(TypeParseError::UnexpectedChar { position, found }),
    }
  }

  #[must_use]
  pub fn is_primitive(&self) -> bool {
    matches!(self, Self::Primitive(_))
  }

  #[must_use]
  pub fn as_primitive(&self) -> Option<Primitive> {
    match self {
      Self::Primitive(primitive) => Some(*primitive),
      _ => None,
    }
  }

  #[must_use]
  pub fn is_string(&self) -> bool {
    matches!(self, Self::Declared { class, arguments } if arguments.is_empty() && class.canonical_name() == "java.lang.String")
  }

  /// Reference type used where generics require an object (`int` becomes `java.lang.Integer`).
  #[must_use]
  pub fn boxed(&self) -> Self {
    match self {
      Self::Primitive(primitive) => Self::class(ClassName::new("java.lang", primitive.boxed_simple_name())),
      other => other.clone(),
    }
  }

  /// Every class mentioned by this type, including generic arguments and array components.
  pub fn collect_classes(&self, out: &mut BTreeSet<ClassName>) {
    match self {
      Self::Primitive(_) => {}
      Self::Declared { class, arguments } => {
        out.insert(class.clone());
        for argument in arguments {
          argument.collect_classes(out);
        }
      }
      Self::Array(component) => component.collect_classes(out),
    }
  }
}

impl Display for TypeRef {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Primitive(primitive) => write!(f, "{primitive}"),
      Self::Declared { class, arguments } if arguments.is_empty() => write!(f, "{class}"),
      Self::Declared { class, arguments } => {
        write!(f, "{class}<")?;
        for (i, argument) in arguments.iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{argument}")?;
        }
        f.write_str(">")
      }
      Self::Array(component) => write!(f, "{component}[]"),
    }
  }
}

impl From<Primitive> for TypeRef {
  fn from(primitive: Primitive) -> Self {
    Self::Primitive(primitive)
  }
}

impl From<ClassName> for TypeRef {
  fn from(class: ClassName) -> Self {
    Self::class(class)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, strum::Display)]
pub enum TypeParseError {
  #[strum(to_string = "type descriptor is empty")]
  Empty,
  #[strum(to_string = "unexpected '{found}' at position {position}")]
  UnexpectedChar { position: usize, found: char },
  #[strum(to_string = "'{name}' is not a valid type name")]
  InvalidName { name: String },
  #[strum(to_string = "unclosed '<' in type arguments")]
  UnclosedArguments,
  #[strum(to_string = "primitive '{name}' cannot take type arguments")]
  PrimitiveWithArguments { name: String },
}

impl std::error::Error for TypeParseError {}

struct DescriptorParser<'s> {
  input: &'s str,
  chars: Peekable<CharIndices<'s>>,
}

impl DescriptorParser<'_> {
  fn parse_type(&mut self) -> Result<TypeRef, TypeParseError> {
    self.skip_whitespace();
    let name = self.parse_name()?;
    self.skip_whitespace();

    let mut parsed = if self.eat('<') {
      if name.parse::<Primitive>().is_ok() {
        return Err(TypeParseError::PrimitiveWithArguments { name });
      }
      let arguments = self.parse_arguments()?;
      TypeRef::generic(resolve_class(&name)?, arguments)
    } else if let Ok(primitive) = name.parse::<Primitive>() {
      TypeRef::Primitive(primitive)
    } else {
      TypeRef::class(resolve_class(&name)?)
    };

    loop {
      self.skip_whitespace();
      if !self.eat('[') {
        break;
      }
      match self.chars.next() {
        Some((_, ']')) => parsed = TypeRef::Array(Box::new(parsed)),
        Some((position, found)) => return Err(TypeParseError::UnexpectedChar { position, found }),
        None => {
          return Err(TypeParseError::UnexpectedChar {
            position: self.input.len(),
            found: '[',
          });
        }
      }
    }

    Ok(parsed)
  }

  fn parse_arguments(&mut self) -> Result<Vec<TypeRef>, TypeParseError> {
    let mut arguments = vec![self.parse_type()?];
    loop {
      self.skip_whitespace();
      match self.chars.next() {
        Some((_, ',')) => arguments.push(self.parse_type()?),
        Some((_, '>')) => return Ok(arguments),
        Some((position, found)) => return Err(TypeParseError::UnexpectedChar { position, found }),
        None => return Err(TypeParseError::UnclosedArguments),
      }
    }
  }

  fn parse_name(&mut self) -> Result<String, TypeParseError> {
    let start = match self.chars.peek() {
      Some(&(position, c)) if c.is_alphabetic() || c == '_' || c == '$' => position,
      Some(&(position, found)) => return Err(TypeParseError::UnexpectedChar { position, found }),
      None => return Err(TypeParseError::Empty),
    };

    let mut end = start;
    while let Some(&(position, c)) = self.chars.peek() {
      if c.is_alphanumeric() || matches!(c, '_' | '$' | '.') {
        end = position + c.len_utf8();
        self.chars.next();
      } else {
        break;
      }
    }

    Ok(self.input[start..end].to_string())
  }

  fn eat(&mut self, expected: char) -> bool {
    if self.chars.peek().is_some_and(|&(_, c)| c == expected) {
      self.chars.next();
      true
    } else {
      false
    }
  }

  fn skip_whitespace(&mut self) {
    while self.chars.peek().is_some_and(|(_, c)| c.is_whitespace()) {
      self.chars.next();
    }
  }
}

const IMPLICIT_JAVA_LANG: &[&str] = &[
  "Boolean",
  "Byte",
  "CharSequence",
  "Character",
  "Double",
  "Float",
  "Integer",
  "Long",
  "Object",
  "Short",
  "String",
];

/// Bare names of `java.lang` classes resolve the way `javac` resolves them.
fn resolve_class(name: &str) -> Result<ClassName, TypeParseError> {
  if IMPLICIT_JAVA_LANG.contains(&name) {
    return Ok(ClassName::new("java.lang", name));
  }
  ClassName::parse(name)
}

fn is_identifier(segment: &str) -> bool {
  let mut chars = segment.chars();
  chars
    .next()
    .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
    && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

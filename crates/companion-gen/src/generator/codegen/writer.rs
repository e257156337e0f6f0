const INDENT: &str = "    ";

/// Line-oriented source buffer with brace-driven indentation.
#[derive(Debug, Default)]
pub struct CodeWriter {
  out: String,
  depth: usize,
}

impl CodeWriter {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Starts at `depth`, for fragments embedded in an already indented line.
  #[must_use]
  pub fn at_depth(depth: usize) -> Self {
    Self {
      out: String::new(),
      depth,
    }
  }

  #[must_use]
  pub fn depth(&self) -> usize {
    self.depth
  }

  /// Writes one line at the current depth. Continuation lines of a multi-line fragment
  /// are expected to carry their own indentation already.
  pub fn line(&mut self, text: impl AsRef<str>) {
    let text = text.as_ref();
    if !text.is_empty() {
      self.out.push_str(&indentation(self.depth));
    }
    self.out.push_str(text);
    self.out.push('\n');
  }

  pub fn blank(&mut self) {
    if !self.out.is_empty() && !self.out.ends_with("\n\n") && !self.out.ends_with("{\n") {
      self.out.push('\n');
    }
  }

  /// `text {` and one level deeper.
  pub fn open(&mut self, text: impl AsRef<str>) {
    self.line(format!("{} {{", text.as_ref()));
    self.depth += 1;
  }

  /// One level shallower and `text`, usually `}` or `} else {`.
  pub fn close(&mut self, text: impl AsRef<str>) {
    self.depth = self.depth.saturating_sub(1);
    self.line(text);
  }

  /// `} else {`: closes the current block and opens the next at the same depth.
  pub fn reopen(&mut self, text: impl AsRef<str>) {
    self.depth = self.depth.saturating_sub(1);
    self.line(format!("}} {} {{", text.as_ref()));
    self.depth += 1;
  }

  pub fn doc_comment(&mut self, lines: &[String]) {
    if lines.is_empty() {
      return;
    }
    self.line("/**");
    for line in lines {
      if line.is_empty() {
        self.line(" *");
      } else {
        self.line(format!(" * {line}"));
      }
    }
    self.line(" */");
  }

  #[must_use]
  pub fn finish(self) -> String {
    self.out
  }

  /// Contents without the trailing newline, for splicing into an enclosing line.
  #[must_use]
  pub fn finish_inline(self) -> String {
    self.out.trim_end_matches('\n').to_string()
  }
}

pub(crate) fn indentation(depth: usize) -> String {
  INDENT.repeat(depth)
}

/// Double-quoted literal valid in both Java and Kotlin.
pub(crate) fn quote(value: &str, escape_dollar: bool) -> String {
  let mut quoted = String::with_capacity(value.len() + 2);
  quoted.push('"');
  for c in value.chars() {
    match c {
      '"' => quoted.push_str("\\\""),
      '\\' => quoted.push_str("\\\\"),
      '\n' => quoted.push_str("\\n"),
      '\r' => quoted.push_str("\\r"),
      '\t' => quoted.push_str("\\t"),
      '$' if escape_dollar => quoted.push_str("\\$"),
      c if c.is_control() => quoted.push_str(&format!("\\u{:04x}", u32::from(c))),
      c => quoted.push(c),
    }
  }
  quoted.push('"');
  quoted
}

/// `1.0` rather than `1` for whole numbers so the literal stays floating point.
pub(crate) fn float_literal(value: f64) -> String {
  if value.is_finite() && value.fract() == 0.0 {
    format!("{value:.1}")
  } else {
    format!("{value}")
  }
}

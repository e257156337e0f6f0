/// Doc comment lines attached to a generated declaration, rendered as Javadoc or KDoc.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Documentation {
  lines: Vec<String>,
}

impl Documentation {
  #[must_use]
  pub fn from_raw(input: &str) -> Self {
    Self {
      lines: input.lines().map(|line| line.trim_end().to_string()).collect(),
    }
  }

  #[must_use]
  pub fn from_lines(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
    Self {
      lines: lines.into_iter().map(Into::into).collect(),
    }
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  #[must_use]
  pub fn lines(&self) -> &[String] {
    &self.lines
  }

  pub fn push(&mut self, line: impl Into<String>) {
    self.lines.push(line.into());
  }
}

impl From<&str> for Documentation {
  fn from(value: &str) -> Self {
    Self::from_raw(value)
  }
}

impl From<String> for Documentation {
  fn from(value: String) -> Self {
    Self::from_raw(&value)
  }
}

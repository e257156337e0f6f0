use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

use crate::generator::metrics::GenerationWarning;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

/// What a piece of terminal output reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
  Timestamp,
  Progress,
  StatLabel,
  StatValue,
  /// Target kind in listings, dialect in file listings.
  Kind,
  GeneratedPath,
  Written,
  /// Non-fatal notes such as orphan fields or ignored result types.
  Note,
  ClassSkipped,
  EmissionFailed,
}

impl Role {
  /// Role of the line that reports `warning`.
  #[must_use]
  pub const fn for_warning(warning: &GenerationWarning) -> Self {
    match warning {
      GenerationWarning::ClassSkipped { .. } => Self::ClassSkipped,
      GenerationWarning::EmissionFailed { .. } => Self::EmissionFailed,
      GenerationWarning::OrphanField { .. }
      | GenerationWarning::DuplicateTarget { .. }
      | GenerationWarning::ResultTypesIgnored { .. } => Self::Note,
    }
  }

  const fn rgb(self, theme: Theme) -> (u8, u8, u8) {
    match (self, theme) {
      (Self::Timestamp, Theme::Dark) => (118, 166, 166),
      (Self::Timestamp, Theme::Light) => (92, 62, 38),
      (Self::Progress, Theme::Dark) => (233, 237, 239),
      (Self::Progress, Theme::Light) => (7, 48, 66),
      (Self::StatLabel, Theme::Dark) => (127, 82, 255),
      (Self::StatLabel, Theme::Light) => (92, 45, 145),
      (Self::StatValue, Theme::Dark) => (233, 237, 239),
      (Self::StatValue, Theme::Light) => (32, 33, 36),
      (Self::Kind, Theme::Dark) => (244, 128, 36),
      (Self::Kind, Theme::Light) => (186, 72, 20),
      (Self::GeneratedPath, Theme::Dark) => (118, 166, 166),
      (Self::GeneratedPath, Theme::Light) => (40, 111, 170),
      (Self::Written, Theme::Dark) => (61, 220, 132),
      (Self::Written, Theme::Light) => (24, 128, 56),
      (Self::Note, Theme::Dark) => (255, 203, 107),
      (Self::Note, Theme::Light) => (153, 102, 0),
      (Self::ClassSkipped, Theme::Dark) => (255, 150, 80),
      (Self::ClassSkipped, Theme::Light) => (176, 74, 0),
      (Self::EmissionFailed, Theme::Dark) => (255, 95, 95),
      (Self::EmissionFailed, Theme::Light) => (170, 20, 20),
    }
  }
}

pub struct Colors {
  enabled: bool,
  theme: Theme,
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  #[must_use]
  pub const fn role(&self, role: Role) -> Color {
    if !self.enabled {
      return Color::Reset;
    }
    let (r, g, b) = role.rgb(self.theme);
    Color::Rgb { r, g, b }
  }

  /// Same color for a `comfy-table` cell.
  #[must_use]
  pub const fn cell(&self, role: Role) -> ComfyColor {
    match self.role(role) {
      Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
      _ => ComfyColor::Reset,
    }
  }

  const fn clap_color(role: Role) -> Option<clap::builder::styling::Color> {
    use clap::builder::styling::{Color as ClapColor, RgbColor};

    let (r, g, b) = role.rgb(Theme::Dark);
    Some(ClapColor::Rgb(RgbColor(r, g, b)))
  }

  pub const fn clap_styles() -> clap::builder::Styles {
    use clap::builder::styling::{Style, Styles};

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(Self::clap_color(Role::StatLabel)))
      .usage(Style::new().bold().fg_color(Self::clap_color(Role::StatLabel)))
      .literal(Style::new().fg_color(Self::clap_color(Role::Written)))
      .placeholder(Style::new().fg_color(Self::clap_color(Role::GeneratedPath)))
      .error(Style::new().bold().fg_color(Self::clap_color(Role::EmissionFailed)))
      .valid(Style::new().fg_color(Self::clap_color(Role::Written)))
      .invalid(Style::new().bold().fg_color(Self::clap_color(Role::ClassSkipped)))
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => std::env::var("COLORFGBG")
      .ok()
      .as_deref()
      .and_then(theme_from_colorfgbg)
      .unwrap_or(Theme::Dark),
  }
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); background codes 8 and up are light.
fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
  let background: u8 = value.rsplit(';').next()?.parse().ok()?;
  Some(if background >= 8 { Theme::Light } else { Theme::Dark })
}

//! Table styling configuration.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== TableStyles =====

/// Styles for the parts of the table view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStyles {
    /// Column header row.
    pub header: Style,
    /// Search prompt line.
    pub search: Style,
    /// Loading indicator in the footer.
    pub loading: Style,
    /// "No countries found" placeholder.
    pub empty: Style,
}

impl TableStyles {
    /// Styles for the given color configuration.
    ///
    /// With colors disabled only text modifiers remain.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let header = Style::default().add_modifier(Modifier::BOLD);
        if config.colors_enabled() {
            Self {
                header: header.fg(Color::Cyan),
                search: Style::default().fg(Color::Yellow),
                loading: Style::default().fg(Color::Magenta),
                empty: Style::default().fg(Color::DarkGray),
            }
        } else {
            Self {
                header,
                search: Style::default(),
                loading: Style::default().add_modifier(Modifier::ITALIC),
                empty: Style::default(),
            }
        }
    }
}

impl Default for TableStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

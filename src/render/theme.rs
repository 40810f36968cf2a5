//! Style table handed to the text renderer.
//!
//! Styles are always rendered into the report text; `anstream::print!` strips
//! them when stdout is not a color terminal or `NO_COLOR` is set.

use anstyle::{AnsiColor, Color, Style};

const fn fg(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

/// Styles used when rendering. `{style}` opens a span, `{style:#}` closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub bold: Style,
    pub red: Style,
    pub green: Style,
    pub yellow: Style,
    pub blue: Style,
    /// Section titles and the banner.
    pub header: Style,
}

impl Theme {
    pub const fn colored() -> Self {
        Self {
            bold: Style::new().bold(),
            red: fg(AnsiColor::Red),
            green: fg(AnsiColor::Green),
            yellow: fg(AnsiColor::Yellow),
            blue: fg(AnsiColor::Blue),
            header: fg(AnsiColor::Cyan).bold(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::colored()
    }
}

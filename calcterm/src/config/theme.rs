use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use terminal_colorsaurus::{QueryOptions, color_palette};

use crate::keypad::ButtonKind;

/// Colors used by the UI
#[derive(Debug, Deserialize, Serialize)]
pub struct Theme {
    pub text: TextTheme,
    pub keypad: KeypadTheme,
    /// The terminal's own foreground color
    pub foreground: Color,
    /// The terminal's own background color, used as text color on highlighted buttons
    pub background: Color,
}

impl Default for Theme {
    fn default() -> Self {
        let (foreground, background) = terminal_colors().unwrap_or((Color::White, Color::Black));

        Self {
            text: TextTheme::default(),
            keypad: KeypadTheme::default(),
            foreground,
            background,
        }
    }
}

/// Ask the terminal for its foreground and background colors
fn terminal_colors() -> Option<(Color, Color)> {
    let palette = color_palette(QueryOptions::default()).ok()?;
    let rgb = |color: terminal_colorsaurus::Color| {
        let (r, g, b) = color.scale_to_8bit();
        Color::Rgb(r, g, b)
    };
    Some((rgb(palette.foreground), rgb(palette.background)))
}

/// Colors of text outside the keypad
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct TextTheme {
    /// The memory indicator, when memory holds a value
    pub success: Color,
    /// The error marker
    pub error: Color,
    /// Notices
    pub highlight: Color,
    /// Timestamps, placeholders and the empty memory indicator
    pub dim: Color,
}

impl Default for TextTheme {
    fn default() -> Self {
        Self {
            success: Color::Green,
            error: Color::Red,
            highlight: Color::Blue,
            dim: Color::DarkGray,
        }
    }
}

/// Keypad button colors, per kind of button
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct KeypadTheme {
    pub digit: Color,
    pub operator: Color,
    pub memory: Color,
    pub command: Color,
    pub evaluate: Color,
}

impl KeypadTheme {
    pub const fn color(&self, kind: ButtonKind) -> Color {
        match kind {
            ButtonKind::Digit => self.digit,
            ButtonKind::Operator => self.operator,
            ButtonKind::Memory => self.memory,
            ButtonKind::Command => self.command,
            ButtonKind::Evaluate => self.evaluate,
        }
    }
}

impl Default for KeypadTheme {
    fn default() -> Self {
        Self {
            digit: Color::White,
            operator: Color::Yellow,
            memory: Color::Cyan,
            command: Color::Magenta,
            evaluate: Color::Green,
        }
    }
}

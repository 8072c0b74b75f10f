//! Shape color enumeration and terminal color mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of colors a shape can carry.
///
/// The palette is deliberately small: it maps one-to-one onto the basic
/// ANSI foreground colors so that colored output works on any terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    Black,
    White,
    Red,
    Green,
}

impl Color {
    /// Parses a color from its name (case-insensitive).
    ///
    /// Returns `None` if the name does not match any palette entry.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "black" => Some(Color::Black),
            "white" => Some(Color::White),
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            _ => None,
        }
    }

    /// Human-readable name, used by shape listings and the status output.
    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
            Color::Red => "red",
            Color::Green => "green",
        }
    }

    /// ANSI foreground escape sequence for this color.
    pub fn ansi_fg(self) -> &'static str {
        match self {
            Color::Black => "\x1b[30m",
            Color::White => "\x1b[37m",
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
        }
    }
}

/// ANSI reset sequence, paired with [`Color::ansi_fg`].
pub const ANSI_RESET: &str = "\x1b[0m";

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

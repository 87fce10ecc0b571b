//! Shared value types for the canvas.
//!
//! This module defines the vocabulary every other module speaks:
//! - the fixed 8-color palette (`NamedColor`)
//! - border styles and their glyph tables
//! - logical positions and the sub-cell precision axis of a sprite

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DrawError;

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl NamedColor {
    pub const ALL: [NamedColor; 8] = [
        NamedColor::Black,
        NamedColor::Red,
        NamedColor::Green,
        NamedColor::Yellow,
        NamedColor::Blue,
        NamedColor::Magenta,
        NamedColor::Cyan,
        NamedColor::White,
    ];

    /// Position in the ANSI palette, used as the last digit of the SGR code.
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            NamedColor::Black => "black",
            NamedColor::Red => "red",
            NamedColor::Green => "green",
            NamedColor::Yellow => "yellow",
            NamedColor::Blue => "blue",
            NamedColor::Magenta => "magenta",
            NamedColor::Cyan => "cyan",
            NamedColor::White => "white",
        }
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NamedColor {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NamedColor::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| DrawError::InvalidColor(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Borders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderStyle {
    None,
    #[default]
    Light,
    Heavy,
    Double,
    Round,
    Solid,
}

/// Glyphs making up one border style. Multi-column pieces (the solid style)
/// are plain strings; widths are measured in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderChars {
    pub vertical: &'static str,
    pub horizontal: &'static str,
    pub top_left: &'static str,
    pub top_right: &'static str,
    pub bottom_left: &'static str,
    pub bottom_right: &'static str,
    /// Junctions used by menus. Round borders have none.
    pub horizontal_up: Option<&'static str>,
    pub horizontal_down: Option<&'static str>,
}

const LIGHT: BorderChars = BorderChars {
    vertical: "\u{2502}",
    horizontal: "\u{2500}",
    top_left: "\u{250c}",
    top_right: "\u{2510}",
    bottom_left: "\u{2514}",
    bottom_right: "\u{2518}",
    horizontal_up: Some("\u{2534}"),
    horizontal_down: Some("\u{252c}"),
};

const HEAVY: BorderChars = BorderChars {
    vertical: "\u{2503}",
    horizontal: "\u{2501}",
    top_left: "\u{250f}",
    top_right: "\u{2513}",
    bottom_left: "\u{2517}",
    bottom_right: "\u{251b}",
    horizontal_up: Some("\u{253b}"),
    horizontal_down: Some("\u{2533}"),
};

const DOUBLE: BorderChars = BorderChars {
    vertical: "\u{2551}",
    horizontal: "\u{2550}",
    top_left: "\u{2554}",
    top_right: "\u{2557}",
    bottom_left: "\u{255a}",
    bottom_right: "\u{255d}",
    horizontal_up: Some("\u{2569}"),
    horizontal_down: Some("\u{2566}"),
};

const ROUND: BorderChars = BorderChars {
    vertical: "\u{2502}",
    horizontal: "\u{2500}",
    top_left: "\u{256d}",
    top_right: "\u{256e}",
    bottom_left: "\u{2570}",
    bottom_right: "\u{256f}",
    horizontal_up: None,
    horizontal_down: None,
};

const SOLID: BorderChars = BorderChars {
    vertical: "\u{2588}\u{2588}",
    horizontal: "\u{2588}",
    top_left: "\u{2588}\u{2588}",
    top_right: "\u{2588}\u{2588}",
    bottom_left: "\u{2588}\u{2588}",
    bottom_right: "\u{2588}\u{2588}",
    horizontal_up: Some("\u{2588}\u{2588}"),
    horizontal_down: Some("\u{2588}\u{2588}"),
};

impl BorderStyle {
    /// Glyph table, or `None` for a borderless canvas.
    pub fn chars(self) -> Option<&'static BorderChars> {
        match self {
            BorderStyle::None => None,
            BorderStyle::Light => Some(&LIGHT),
            BorderStyle::Heavy => Some(&HEAVY),
            BorderStyle::Double => Some(&DOUBLE),
            BorderStyle::Round => Some(&ROUND),
            BorderStyle::Solid => Some(&SOLID),
        }
    }

    /// Columns the border occupies on each side of the canvas.
    pub fn thickness(self) -> u16 {
        self.chars().map_or(0, |c| {
            [c.top_left, c.vertical, c.bottom_left]
                .iter()
                .map(|s| s.chars().count() as u16)
                .max()
                .unwrap_or(0)
        })
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A logical canvas position. Coordinates may carry half-cell fractions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The axis on which a sprite keeps half-cell precision while moving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
    #[default]
    Neither,
}

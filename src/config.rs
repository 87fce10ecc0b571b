//! Canvas configuration.
//!
//! Sizes are either an explicit cell count or "the terminal minus N". The
//! second form is re-derived whenever the terminal is resized.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{DrawError, Result};
use crate::types::{BorderStyle, NamedColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extent {
    /// Exactly this many cells.
    Fixed(u16),
    /// The physical size minus this many cells.
    Shrink(u16),
}

impl Extent {
    /// Cells for a terminal dimension, or `None` if the value is unusable.
    pub fn resolve(self, physical: u16) -> Option<u16> {
        match self {
            Extent::Fixed(0) => None,
            Extent::Fixed(n) => Some(n),
            Extent::Shrink(n) => physical.checked_sub(n).filter(|&v| v > 0),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<NamedColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<NamedColor>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Extent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Extent>,
    pub border: BorderStyle,
    pub color: ColorConfig,
}

impl CanvasConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Full terminal width minus the border on both sides.
    pub fn default_width(&self) -> Extent {
        Extent::Shrink(2 * self.border.thickness())
    }

    pub fn default_height(&self) -> Extent {
        Extent::Shrink(2)
    }

    /// Logical canvas size for a terminal of `cols` x `rows`.
    pub fn logical_size(&self, cols: u16, rows: u16) -> Result<(u16, u16)> {
        let width = resolve("width", self.width, self.default_width(), cols)?;
        let height = resolve("height", self.height, self.default_height(), rows)?;
        Ok((width, height))
    }
}

fn resolve(what: &'static str, extent: Option<Extent>, default: Extent, physical: u16) -> Result<u16> {
    if let Some(extent) = extent {
        match extent.resolve(physical) {
            Some(cells) => return Ok(cells),
            None => warn!(?extent, ?default, physical, "canvas {what} is unusable, using default"),
        }
    }
    default.resolve(physical).ok_or_else(|| {
        DrawError::validation(
            what,
            format!("a terminal of {physical} cells is too small for {default:?}"),
        )
    })
}

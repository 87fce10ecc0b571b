use crate::error::{DrawError, Result};
use crate::types::NamedColor;

use super::font::{self, Bitmap, SevenSegment};
use super::{require_finite, Surface, FULL};

/// Terminal columns per bitmap pixel.
const PIXEL_WIDTH: usize = 2;

impl Surface {
    /// Draw bitmaps left to right, each pixel two columns wide. Consecutive
    /// bitmaps are separated by one blank pixel. Returns the x coordinate
    /// after the last bitmap and its trailing gap.
    pub fn bitmap(&mut self, x: f64, y: f64, color: Option<NamedColor>, bitmaps: &[Bitmap]) -> Result<f64> {
        if self.too_big() {
            return Ok(x.round() + bitmaps.iter().map(advance).sum::<f64>());
        }
        require_finite("bitmap position", &[x, y])?;
        if bitmaps.is_empty() {
            return Err(DrawError::validation("bitmap", "at least one matrix is required"));
        }
        let (x, y) = (x.round(), y.round());
        if x < 0.0 || y < 0.0 {
            return Err(DrawError::out_of_bounds("bitmap"));
        }

        // Bounds are checked in f64 so huge coordinates cannot overflow.
        let mut placements = Vec::with_capacity(bitmaps.len());
        let mut cursor = x;
        for bitmap in bitmaps {
            let columns = (font::bitmap_width(bitmap) * PIXEL_WIDTH) as f64;
            if y + bitmap.len() as f64 > self.height as f64 || cursor + columns > self.width as f64 {
                return Err(DrawError::out_of_bounds("bitmap"));
            }
            placements.push(cursor as i64);
            cursor += advance(bitmap);
        }

        let on: String = std::iter::repeat_n(FULL, PIXEL_WIDTH).collect();
        let off = " ".repeat(PIXEL_WIDTH);
        self.with_color(color, None, |s| {
            for (bitmap, &left) in bitmaps.iter().zip(&placements) {
                for (row, pixels) in bitmap.iter().enumerate() {
                    let line: String = pixels
                        .iter()
                        .map(|&lit| if lit { on.as_str() } else { off.as_str() })
                        .collect();
                    s.move_to(left, y as i64 + row as i64)?;
                    s.print(&line)?;
                }
            }
            Ok(())
        })?;
        Ok(cursor)
    }

    pub fn seven_segment(
        &mut self,
        x: f64,
        y: f64,
        segments: SevenSegment,
        color: Option<NamedColor>,
    ) -> Result<f64> {
        self.bitmap(x, y, color, &[segments.to_bitmap()])
    }

    /// Write text using the built-in large glyphs.
    pub fn write_large(&mut self, text: &str, x: f64, y: f64, color: Option<NamedColor>) -> Result<f64> {
        let glyphs = text.chars().map(font::glyph).collect::<Result<Vec<_>>>()?;
        self.bitmap(x, y, color, &glyphs)
    }
}

/// Columns from one bitmap's left edge to the next one's.
fn advance(bitmap: &Bitmap) -> f64 {
    ((font::bitmap_width(bitmap) + 1) * PIXEL_WIDTH) as f64
}

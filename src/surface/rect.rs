use crate::error::{DrawError, Result};
use crate::geometry::{has_half, round_half, solid_cells};
use crate::types::NamedColor;

use super::line::glyph;
use super::{require_finite, Surface, BOTTOM, LEFT, RIGHT, TOP};

impl Surface {
    /// Fill a rectangle. Position and size may use half cells, but only
    /// along one axis per call.
    pub fn draw_box(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Option<NamedColor>,
    ) -> Result<()> {
        if self.too_big() {
            return Ok(());
        }
        require_finite("box", &[x, y, width, height])?;
        if width < 0.0 || height < 0.0 {
            return Err(DrawError::validation("box size", "must not be negative"));
        }
        self.check_box_bounds(x, y, width, height)?;

        let (x, y, width, height) = (round_half(x), round_half(y), round_half(width), round_half(height));
        let precise_x = has_half(x) || has_half(width);
        let precise_y = has_half(y) || has_half(height);
        if precise_x && precise_y {
            return Err(DrawError::Unsupported("half-cell precision on both axes of a box"));
        }
        self.check_box_bounds(x, y, width, height)?;

        self.with_color(color, None, |s| {
            if precise_y {
                let columns = width as usize;
                for (row, cov) in solid_cells(y, y + height) {
                    if let Some(g) = glyph(cov, TOP, BOTTOM, false) {
                        s.move_to(x as i64, row)?;
                        s.print(&g.to_string().repeat(columns))?;
                    }
                }
            } else {
                let cells = solid_cells(x, x + width);
                for row in (y as i64)..((y + height) as i64) {
                    let glyphs = cells.iter().map(|&(cell, cov)| (cell, glyph(cov, LEFT, RIGHT, false)));
                    s.put_row(row, glyphs)?;
                }
            }
            Ok(())
        })
    }

    fn check_box_bounds(&self, x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        if x < 0.0 || y < 0.0 || x + width > self.width as f64 || y + height > self.height as f64 {
            return Err(DrawError::out_of_bounds(format!("box at ({x}, {y})")));
        }
        Ok(())
    }
}

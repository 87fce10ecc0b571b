use crate::error::{DrawError, Result};
use crate::geometry::{dashed_cells, solid_cells, Coverage};
use crate::types::NamedColor;

use super::{require_finite, Surface, BOTTOM, FULL, LEFT, RIGHT, TOP};

/// Options for [`Surface::draw_line`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Option<NamedColor>,
    /// Cells across, centered on the line coordinate. Rounded to an integer.
    pub thickness: f64,
    /// Dash length in cells. `None` draws a solid line.
    pub dash: Option<f64>,
    /// Background behind the line; gaps between dashes are filled with it.
    pub space_color: Option<NamedColor>,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: None,
            thickness: 1.0,
            dash: None,
            space_color: None,
        }
    }
}

enum Orientation {
    Horizontal,
    Vertical,
}

impl Surface {
    /// Draw a horizontal or vertical line from `(x1, y1)` to `(x2, y2)`.
    ///
    /// The end coordinate is exclusive. Ends snap to half cells and partial
    /// cells use half-block glyphs.
    pub fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &LineStyle) -> Result<()> {
        if self.too_big() {
            return Ok(());
        }
        require_finite("line", &[x1, y1, x2, y2, style.thickness])?;
        if style.thickness < 0.0 {
            return Err(DrawError::validation("line thickness", "must not be negative"));
        }
        if let Some(dash) = style.dash {
            if !(dash.is_finite() && dash > 0.0) {
                return Err(DrawError::validation("dash length", "must be a positive number"));
            }
        }

        let orientation = if y1 == y2 {
            Orientation::Horizontal
        } else if x1 == x2 {
            Orientation::Vertical
        } else {
            return Err(DrawError::Unsupported("diagonal lines"));
        };

        let (w, h) = (self.width as f64, self.height as f64);
        if [x1, x2].iter().any(|&x| x < 0.0 || x > w) || [y1, y2].iter().any(|&y| y < 0.0 || y > h) {
            return Err(DrawError::out_of_bounds("line"));
        }

        let thickness = style.thickness.round();
        let (lo, hi) = ((-thickness / 2.0).ceil(), (thickness / 2.0).ceil());

        let (center, limit, start, end) = match orientation {
            Orientation::Horizontal => (y1, h, x1.min(x2), x1.max(x2)),
            Orientation::Vertical => (x1, w, y1.min(y2), y1.max(y2)),
        };
        let base = center.round();
        if base + lo < 0.0 || base + hi > limit {
            return Err(DrawError::out_of_bounds("line"));
        }
        let (base, lo, hi) = (base as i64, lo as i64, hi as i64);

        let cells = match style.dash {
            None => solid_cells(start, end),
            Some(dash) => dashed_cells(start, end, (dash * 2.0).round() as i64),
        };
        let fill_gaps = style.space_color.is_some();

        self.with_color(style.color, style.space_color, |s| {
            for offset in lo..hi {
                let across = base + offset;
                match orientation {
                    Orientation::Horizontal => {
                        let glyphs = cells
                            .iter()
                            .map(|&(cell, cov)| (cell, glyph(cov, LEFT, RIGHT, fill_gaps)));
                        s.put_row(across, glyphs)?;
                    }
                    Orientation::Vertical => {
                        for &(cell, cov) in &cells {
                            if let Some(g) = glyph(cov, TOP, BOTTOM, fill_gaps) {
                                s.move_to(across, cell)?;
                                s.print(g.encode_utf8(&mut [0; 4]))?;
                            }
                        }
                    }
                }
            }
            Ok(())
        })
    }

    /// Write a row of optional glyphs, coalescing adjacent cells into one
    /// cursor move.
    pub(super) fn put_row(
        &mut self,
        row: i64,
        glyphs: impl IntoIterator<Item = (i64, Option<char>)>,
    ) -> Result<()> {
        let mut run = String::new();
        let mut run_start = 0;
        let mut next = None;
        for (cell, glyph) in glyphs {
            match glyph {
                Some(g) => {
                    if next != Some(cell) {
                        self.flush_run(&mut run, run_start, row)?;
                        run_start = cell;
                    }
                    run.push(g);
                    next = Some(cell + 1);
                }
                None => next = None,
            }
        }
        self.flush_run(&mut run, run_start, row)
    }

    fn flush_run(&mut self, run: &mut String, start: i64, row: i64) -> Result<()> {
        if run.is_empty() {
            return Ok(());
        }
        self.move_to(start, row)?;
        self.print(run)?;
        run.clear();
        Ok(())
    }
}

/// Glyph for a cell given the half-block pair of the span's axis.
pub(super) fn glyph(cov: Coverage, first: char, second: char, fill_gaps: bool) -> Option<char> {
    match cov {
        Coverage::Full => Some(FULL),
        Coverage::First => Some(first),
        Coverage::Second => Some(second),
        Coverage::Empty if fill_gaps => Some(' '),
        Coverage::Empty => None,
    }
}

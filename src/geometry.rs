//! Logical-to-physical geometry.
//!
//! The logical canvas is centered inside the physical terminal. Positions are
//! resolved at half-cell granularity: a span is first snapped to half cells,
//! then every whole cell it touches is classified by which of its two halves
//! are lit.

/// Round to the nearest multiple of `nearest`.
pub fn round_to_nearest(value: f64, nearest: f64) -> f64 {
    (value / nearest).round() * nearest
}

pub fn round_half(value: f64) -> f64 {
    round_to_nearest(value, 0.5)
}

pub fn has_half(value: f64) -> bool {
    round_half(value).fract() != 0.0
}

pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt()
}

/// Insets that center a logical canvas inside the physical terminal.
///
/// Negative values mean the terminal is smaller than the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margin {
    /// Left (and at least the right) inset in columns.
    pub lr: i32,
    /// Top (and at least the bottom) inset in rows.
    pub tb: i32,
}

impl Margin {
    pub fn new(cols: u16, rows: u16, width: u16, height: u16) -> Self {
        Self {
            lr: (cols as i32 - width as i32).div_euclid(2),
            tb: (rows as i32 - height as i32).div_euclid(2),
        }
    }
}

/// Which halves of one cell a span lights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    Full,
    /// Left half (horizontal spans) or top half (vertical spans).
    First,
    /// Right half or bottom half.
    Second,
    Empty,
}

/// Classify every cell touched by `[start, end)` after snapping both ends to
/// half cells. `lit` receives the half index relative to the span start, so
/// dash patterns are anchored at the start coordinate.
pub fn half_cells(start: f64, end: f64, lit: impl Fn(i64) -> bool) -> Vec<(i64, Coverage)> {
    let h0 = (start * 2.0).round() as i64;
    let h1 = (end * 2.0).round() as i64;
    if h1 <= h0 {
        return Vec::new();
    }
    let on = |h: i64| h >= h0 && h < h1 && lit(h - h0);
    let first_cell = h0.div_euclid(2);
    let last_cell = (h1 - 1).div_euclid(2);
    (first_cell..=last_cell)
        .map(|cell| {
            let coverage = match (on(cell * 2), on(cell * 2 + 1)) {
                (true, true) => Coverage::Full,
                (true, false) => Coverage::First,
                (false, true) => Coverage::Second,
                (false, false) => Coverage::Empty,
            };
            (cell, coverage)
        })
        .collect()
}

/// A solid span with every half lit.
pub fn solid_cells(start: f64, end: f64) -> Vec<(i64, Coverage)> {
    half_cells(start, end, |_| true)
}

/// A dashed span: runs of `dash` half cells lit, then `dash` half cells dark.
pub fn dashed_cells(start: f64, end: f64, dash_halves: i64) -> Vec<(i64, Coverage)> {
    let dash = dash_halves.max(1);
    half_cells(start, end, move |h| (h / dash) % 2 == 0)
}

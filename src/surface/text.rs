use crate::error::{DrawError, Result};
use crate::types::NamedColor;

use super::{require_finite, Surface};

/// Collapse line breaks and tabs so text always stays on one row.
fn single_line(text: &str) -> String {
    text.replace(['\n', '\t'], "  ")
}

impl Surface {
    /// Write one line of text at a logical position.
    pub fn write_text(&mut self, text: &str, x: f64, y: f64, color: Option<NamedColor>) -> Result<()> {
        if self.too_big() {
            return Ok(());
        }
        require_finite("text position", &[x, y])?;
        let text = single_line(text);
        let (x, y) = (x.round(), y.round());
        let len = text.chars().count() as f64;
        if x < 0.0 || y < 0.0 || x + len > self.width as f64 || y >= self.height as f64 {
            return Err(DrawError::out_of_bounds("text"));
        }
        self.with_color(color, None, |s| {
            s.move_to(x as i64, y as i64)?;
            s.print(&text)
        })
    }
}

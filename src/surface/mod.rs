//! The addressed drawing layer.
//!
//! Every primitive takes logical (canvas-relative) coordinates, validates
//! them against the logical size, translates through the centering margin and
//! queues cursor moves plus glyph writes into an in-memory buffer. The canvas
//! flushes that buffer to the real sink after each public operation.
//!
//! Primitives are no-ops while the canvas is too big for the terminal. When a
//! primitive overrides a color for one call, the ambient color state is
//! re-emitted before it returns, whether or not the body failed.

mod bitmap;
mod border;
pub mod font;
mod line;
mod rect;
mod text;

use std::io::Write;

use crossterm::{cursor, queue, style, terminal};

use crate::color::{ColorState, SetPaletteBackground, SetPaletteForeground};
use crate::error::{DrawError, Result};
use crate::geometry::Margin;
use crate::types::{BorderStyle, NamedColor};

pub use font::{Bitmap, SevenSegment};
pub use line::LineStyle;

pub const FULL: char = '\u{2588}';
pub const TOP: char = '\u{2580}';
pub const BOTTOM: char = '\u{2584}';
pub const LEFT: char = '\u{258c}';
pub const RIGHT: char = '\u{2590}';

const TOO_BIG_MESSAGE: &str =
    "Playing field is larger than terminal. Please make terminal larger to continue.";

pub struct Surface {
    buf: Vec<u8>,
    color: ColorState,
    /// Physical terminal size.
    cols: u16,
    rows: u16,
    /// Logical canvas size.
    width: u16,
    height: u16,
    border: BorderStyle,
    clear_mode: bool,
    /// No logical size could be derived for the current terminal.
    r#unsized: bool,
}

impl Surface {
    pub(crate) fn new(cols: u16, rows: u16, width: u16, height: u16, border: BorderStyle) -> Self {
        Self {
            buf: Vec::with_capacity(16 * 1024),
            color: ColorState::default(),
            cols,
            rows,
            width,
            height,
            border,
            clear_mode: false,
            r#unsized: false,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn border(&self) -> BorderStyle {
        self.border
    }

    pub fn color(&self) -> &ColorState {
        &self.color
    }

    /// True while drawing erases instead of paints.
    pub fn clear_mode(&self) -> bool {
        self.clear_mode
    }

    pub fn margin(&self) -> Margin {
        Margin::new(self.cols, self.rows, self.width, self.height)
    }

    /// The terminal cannot hold the canvas plus its border.
    pub fn too_big(&self) -> bool {
        if self.r#unsized {
            return true;
        }
        let margin = self.margin();
        let border_rows = if self.border == BorderStyle::None { 0 } else { 1 };
        margin.lr < self.border.thickness() as i32 || margin.tb < border_rows
    }

    // -----------------------------------------------------------------------
    // Crate-internal state changes
    // -----------------------------------------------------------------------

    pub(crate) fn set_clear_mode(&mut self, on: bool) -> bool {
        std::mem::replace(&mut self.clear_mode, on)
    }

    pub(crate) fn set_physical(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    pub(crate) fn set_logical(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.r#unsized = false;
    }

    /// Keep the previous logical size but treat the canvas as too big until
    /// a usable size is set again.
    pub(crate) fn set_unsized(&mut self) {
        self.r#unsized = true;
    }

    pub(crate) fn color_mut(&mut self) -> (&mut ColorState, &mut Vec<u8>) {
        (&mut self.color, &mut self.buf)
    }

    #[cfg(test)]
    pub(crate) fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buf)
    }

    pub(crate) fn flush_into(&mut self, out: &mut impl Write) -> std::io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        out.write_all(&self.buf)?;
        out.flush()?;
        self.buf.clear();
        Ok(())
    }

    /// Erase the whole terminal.
    pub(crate) fn clear_screen(&mut self) -> Result<()> {
        queue!(
            self.buf,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::FromCursorDown),
        )?;
        Ok(())
    }

    pub(crate) fn write_too_big_message(&mut self) -> Result<()> {
        queue!(self.buf, cursor::MoveTo(0, 0), style::Print(TOO_BIG_MESSAGE))?;
        Ok(())
    }

    /// Restore terminal defaults: neutral color, cursor parked on the last row.
    pub(crate) fn park(&mut self) -> Result<()> {
        self.color.reset(&mut self.buf)?;
        queue!(
            self.buf,
            cursor::MoveTo(0, self.rows.saturating_sub(1)),
            terminal::Clear(terminal::ClearType::CurrentLine),
        )?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Low-level writes
    // -----------------------------------------------------------------------

    /// Move to a logical cell.
    fn move_to(&mut self, x: i64, y: i64) -> Result<()> {
        let margin = self.margin();
        self.move_to_physical(margin.lr as i64 + x, margin.tb as i64 + y)
    }

    fn move_to_physical(&mut self, col: i64, row: i64) -> Result<()> {
        let (Ok(col), Ok(row)) = (u16::try_from(col), u16::try_from(row)) else {
            return Err(DrawError::out_of_bounds(format!("cell ({col}, {row})")));
        };
        queue!(self.buf, cursor::MoveTo(col, row))?;
        Ok(())
    }

    /// Print at the cursor. In clear mode every glyph becomes a blank cell
    /// in the ambient colors.
    fn print(&mut self, text: &str) -> Result<()> {
        if self.clear_mode {
            let blank = " ".repeat(text.chars().count());
            queue!(self.buf, style::Print(blank))?;
        } else {
            queue!(self.buf, style::Print(text))?;
        }
        Ok(())
    }

    /// Run `body` with one-off color overrides, then restore the ambient
    /// state. Overrides are ignored in clear mode.
    fn with_color<T>(
        &mut self,
        fg: Option<NamedColor>,
        bg: Option<NamedColor>,
        body: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let (fg, bg) = if self.clear_mode { (None, None) } else { (fg, bg) };
        if let Some(fg) = fg {
            queue!(self.buf, SetPaletteForeground(fg))?;
        }
        if let Some(bg) = bg {
            queue!(self.buf, SetPaletteBackground(bg))?;
        }
        let result = body(self);
        if fg.is_some() || bg.is_some() {
            self.color.refresh(&mut self.buf)?;
        }
        result
    }
}

pub(crate) fn require_finite(what: &'static str, values: &[f64]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(DrawError::validation(what, "coordinates must be finite numbers"))
    }
}

use std::fmt;

use crate::error::{DrawError, Result};
use crate::surface::Surface;
use crate::types::{BorderChars, BorderStyle, Point};

/// Option keys in order: `1`–`9`, then `A`–`Z`.
pub const MENU_KEYS: &str = "123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

const MENU_HEIGHT: f64 = 3.0;

/// A one-row option picker drawn inside a box frame:
///
/// ```text
/// ┌─────────┬────────┐
/// │ 1:Start │ 2:Quit │
/// └─────────┴────────┘
/// ```
///
/// While drawn (open), the canvas binds one key per option. Picking an
/// option unbinds them all, erases the menu and calls `on_choice`.
pub struct Menu {
    options: Vec<String>,
    style: Option<BorderStyle>,
    on_choice: Box<dyn FnMut(usize)>,
    pub(crate) open: bool,
}

impl fmt::Debug for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("options", &self.options)
            .field("style", &self.style)
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}

impl Menu {
    /// `style: None` inherits the canvas border (round and borderless
    /// canvases fall back to light).
    pub fn new(
        options: Vec<String>,
        style: Option<BorderStyle>,
        on_choice: impl FnMut(usize) + 'static,
    ) -> Result<Self> {
        match style {
            Some(BorderStyle::Round) => return Err(DrawError::Unsupported("round menu borders")),
            Some(BorderStyle::None) => {
                return Err(DrawError::validation("menu border", "a menu needs a border style"));
            }
            _ => {}
        }
        if options.is_empty() {
            return Err(DrawError::validation("menu options", "at least one option is required"));
        }
        if options.len() > MENU_KEYS.len() {
            return Err(DrawError::validation(
                "menu options",
                format!("at most {} options are supported", MENU_KEYS.len()),
            ));
        }
        Ok(Self {
            options,
            style,
            on_choice: Box::new(on_choice),
            open: false,
        })
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Key bindings are registered.
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn height(&self) -> f64 {
        MENU_HEIGHT
    }

    /// The symbol shown next to option `index`.
    pub fn key_symbol(index: usize) -> Option<char> {
        MENU_KEYS.chars().nth(index)
    }

    /// Synthesized key name that selects option `index`.
    pub fn key_name(index: usize) -> Option<String> {
        Self::key_symbol(index).map(|c| c.to_ascii_lowercase().to_string())
    }

    pub(crate) fn chars(&self, canvas_border: BorderStyle) -> &'static BorderChars {
        let style = match self.style.unwrap_or(canvas_border) {
            BorderStyle::Round | BorderStyle::None => BorderStyle::Light,
            other => other,
        };
        style.chars().unwrap_or_else(|| unreachable!("menu styles always have glyphs"))
    }

    /// Columns the menu occupies with the given canvas border.
    pub fn width(&self, canvas_border: BorderStyle) -> usize {
        let vertical = self.chars(canvas_border).vertical.chars().count();
        vertical
            + self
                .options
                .iter()
                .map(|o| o.chars().count() + 4 + vertical)
                .sum::<usize>()
    }

    pub(crate) fn choose(&mut self, index: usize) {
        (self.on_choice)(index);
    }

    fn edge_row(&self, left: &str, horizontal: &str, junction: &str, right: &str) -> String {
        let mut row = String::from(left);
        for (i, option) in self.options.iter().enumerate() {
            row.push_str(&horizontal.repeat(option.chars().count() + 4));
            row.push_str(if i + 1 == self.options.len() { right } else { junction });
        }
        row
    }

    pub(crate) fn paint(&self, surface: &mut Surface, at: Point) -> Result<()> {
        let border = surface.border();
        let chars = self.chars(border);
        let width = self.width(border) as f64;
        if at.x < 0.0
            || at.y < 0.0
            || at.x + width > surface.width() as f64
            || at.y + MENU_HEIGHT > surface.height() as f64
        {
            return Err(DrawError::out_of_bounds("menu"));
        }

        let top = self.edge_row(
            chars.top_left,
            chars.horizontal,
            chars.horizontal_down.unwrap_or(chars.horizontal),
            chars.top_right,
        );
        let mut middle = String::from(chars.vertical);
        for (i, option) in self.options.iter().enumerate() {
            let key = Self::key_symbol(i).unwrap_or('?');
            middle.push_str(&format!(" {key}:{option} {}", chars.vertical));
        }
        let bottom = self.edge_row(
            chars.bottom_left,
            chars.horizontal,
            chars.horizontal_up.unwrap_or(chars.horizontal),
            chars.bottom_right,
        );

        surface.write_text(&top, at.x, at.y, None)?;
        surface.write_text(&middle, at.x, at.y + 1.0, None)?;
        surface.write_text(&bottom, at.x, at.y + 2.0, None)
    }
}

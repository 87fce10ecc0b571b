//! Bitmap glyphs for large text.
//!
//! Letters are 3 columns wide (5 for `M` and `W`), all glyphs are 5 rows
//! tall. A `#` in a row means "on", a space means "off". Digits are not
//! stored here: they are built from seven-segment patterns.

use crate::error::{DrawError, Result};

/// A boolean matrix, row-major. Each `true` becomes one lit bitmap pixel.
pub type Bitmap = Vec<Vec<bool>>;

/// The height of every built-in glyph.
pub const GLYPH_HEIGHT: usize = 5;

/// Seven segment flags, named clockwise from the top with `g` in the middle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SevenSegment {
    pub a: bool,
    pub b: bool,
    pub c: bool,
    pub d: bool,
    pub e: bool,
    pub f: bool,
    pub g: bool,
}

impl SevenSegment {
    pub const fn new(flags: [bool; 7]) -> Self {
        let [a, b, c, d, e, f, g] = flags;
        Self { a, b, c, d, e, f, g }
    }

    /// Segment pattern for a decimal digit, or `None` above 9.
    pub fn digit(n: u8) -> Option<Self> {
        const T: bool = true;
        const F: bool = false;
        let flags = match n {
            0 => [T, T, T, T, T, T, F],
            1 => [F, T, T, F, F, F, F],
            2 => [T, T, F, T, T, F, T],
            3 => [T, T, T, T, F, F, T],
            4 => [F, T, T, F, F, T, T],
            5 => [T, F, T, T, F, T, T],
            6 => [T, F, T, T, T, T, T],
            7 => [T, T, T, F, F, F, F],
            8 => [T, T, T, T, T, T, T],
            9 => [T, T, T, T, F, T, T],
            _ => return None,
        };
        Some(Self::new(flags))
    }

    /// Render onto a 3x5 grid.
    pub fn to_bitmap(self) -> Bitmap {
        let Self { a, b, c, d, e, f, g } = self;
        vec![
            vec![a || f, a, a || b],
            vec![f, false, b],
            vec![e || f || g, g, b || c || g],
            vec![e, false, c],
            vec![d || e, d, c || d],
        ]
    }
}

fn letter(ch: char) -> Option<[&'static str; 5]> {
    let g = match ch {
        'A' => [" # ", "# #", "# #", "###", "# #"],
        'B' => ["## ", "# #", "## ", "# #", "## "],
        'C' => [" ##", "#  ", "#  ", "#  ", " ##"],
        'D' => ["## ", "# #", "# #", "# #", "## "],
        'E' => ["###", "#  ", "###", "#  ", "###"],
        'F' => ["###", "#  ", "###", "#  ", "#  "],
        'G' => [" ##", "#  ", "# #", "# #", " ##"],
        'H' => ["# #", "# #", "###", "# #", "# #"],
        'I' => ["###", " # ", " # ", " # ", "###"],
        'J' => ["###", "  #", "  #", "# #", " # "],
        'K' => ["# #", "# #", "## ", "# #", "# #"],
        'L' => ["#  ", "#  ", "#  ", "#  ", "###"],
        'M' => ["#####", "# # #", "# # #", "# # #", "#   #"],
        'N' => ["###", "# #", "# #", "# #", "# #"],
        'O' => ["###", "# #", "# #", "# #", "###"],
        'P' => ["## ", "# #", "## ", "#  ", "#  "],
        'Q' => ["## ", "# #", "## ", "  #", "  #"],
        'R' => ["## ", "# #", "## ", "# #", "# #"],
        'S' => ["###", "#  ", "###", "  #", "###"],
        'T' => ["###", " # ", " # ", " # ", " # "],
        'U' => ["# #", "# #", "# #", "# #", "###"],
        'V' => ["# #", "# #", "# #", "# #", " # "],
        'W' => ["# # #", "# # #", "# # #", "# # #", " # # "],
        'X' => ["# #", "# #", " # ", "# #", "# #"],
        'Y' => ["# #", "# #", "###", " # ", " # "],
        'Z' => ["###", "  #", " # ", "#  ", "###"],

        '.' => [" ", " ", " ", " ", "#"],
        '!' => ["#", "#", "#", " ", "#"],
        '?' => ["## ", "  #", " # ", "   ", " # "],

        _ => return None,
    };
    debug_assert!(
        g.iter().all(|row| row.len() == g[0].len()),
        "glyph '{ch}' has inconsistent row widths",
    );
    Some(g)
}

fn rows_to_bitmap(rows: &[&str]) -> Bitmap {
    rows.iter()
        .map(|row| row.chars().map(|c| c != ' ').collect())
        .collect()
}

/// Bitmap for one character of large text. Letters are case-folded; any
/// whitespace is a single blank column.
pub fn glyph(ch: char) -> Result<Bitmap> {
    let upper = ch.to_ascii_uppercase();
    if let Some(n) = upper.to_digit(10) {
        // to_digit(10) is always < 10
        return Ok(SevenSegment::digit(n as u8).unwrap_or_default().to_bitmap());
    }
    if upper.is_whitespace() {
        return Ok(vec![vec![false]; GLYPH_HEIGHT]);
    }
    letter(upper)
        .map(|rows| rows_to_bitmap(&rows))
        .ok_or(DrawError::UnrecognizedCharacter(ch))
}

/// Width of the widest row, the unit bitmaps advance by.
pub fn bitmap_width(bitmap: &Bitmap) -> usize {
    bitmap.iter().map(Vec::len).max().unwrap_or(0)
}

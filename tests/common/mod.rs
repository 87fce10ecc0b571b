//! Shared helpers for canvas integration tests.
//!
//! `Screen` replays the bytes a canvas wrote through a `vte` parser into a
//! cell grid, so tests assert on what a terminal would actually show.

#![allow(dead_code)]

use cell_canvas::{BorderStyle, Canvas, CanvasConfig, Extent, FrameQueue, ManualClock};
use vte::{Params, Parser, Perform};

pub const FULL: char = '\u{2588}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<u8>,
    pub bg: Option<u8>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg: None,
        }
    }
}

struct Grid {
    cells: Vec<Vec<Cell>>,
    row: usize,
    col: usize,
    fg: Option<u8>,
    bg: Option<u8>,
}

impl Grid {
    fn blank(&self) -> Cell {
        Cell {
            bg: self.bg,
            ..Cell::default()
        }
    }

    fn grid_rows(&self) -> usize {
        self.cells.len()
    }

    fn erase_line_from(&mut self, row: usize, col: usize) {
        let blank = self.blank();
        if let Some(line) = self.cells.get_mut(row) {
            for cell in line.iter_mut().skip(col) {
                *cell = blank;
            }
        }
    }
}

impl Perform for Grid {
    fn print(&mut self, c: char) {
        let (fg, bg) = (self.fg, self.bg);
        if let Some(cell) = self.cells.get_mut(self.row).and_then(|line| line.get_mut(self.col)) {
            *cell = Cell { ch: c, fg, bg };
        }
        self.col += 1;
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], _ignore: bool, action: char) {
        if intermediates.contains(&b'?') {
            return;
        }
        let params: Vec<u16> = params
            .iter()
            .map(|p| p.first().copied().unwrap_or(0))
            .collect();
        let first = params.first().copied().unwrap_or(0);
        match action {
            'H' => {
                self.row = params.first().copied().unwrap_or(1).max(1) as usize - 1;
                self.col = params.get(1).copied().unwrap_or(1).max(1) as usize - 1;
            }
            'J' => {
                let rows = self.grid_rows();
                if first == 2 {
                    for row in 0..rows {
                        self.erase_line_from(row, 0);
                    }
                } else {
                    self.erase_line_from(self.row, self.col);
                    for row in self.row + 1..rows {
                        self.erase_line_from(row, 0);
                    }
                }
            }
            'K' => {
                let from = if first == 2 { 0 } else { self.col };
                self.erase_line_from(self.row, from);
            }
            'm' => {
                if params.is_empty() {
                    self.fg = None;
                    self.bg = None;
                }
                for p in params {
                    match p {
                        0 => {
                            self.fg = None;
                            self.bg = None;
                        }
                        30..=37 => self.fg = Some((p - 30) as u8),
                        39 => self.fg = None,
                        40..=47 => self.bg = Some((p - 40) as u8),
                        49 => self.bg = None,
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
}

pub struct Screen {
    parser: Parser,
    grid: Grid,
}

impl Screen {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            parser: Parser::new(),
            grid: Grid {
                cells: vec![vec![Cell::default(); cols as usize]; rows as usize],
                row: 0,
                col: 0,
                fg: None,
                bg: None,
            },
        }
    }

    pub fn feed(&mut self, bytes: &[u8]) {
        self.parser.advance(&mut self.grid, bytes);
    }

    /// Replay and discard everything the canvas has written so far.
    pub fn sync(&mut self, canvas: &mut Canvas<Vec<u8>>) {
        let bytes = std::mem::take(canvas.get_mut());
        self.feed(&bytes);
    }

    pub fn cell(&self, col: usize, row: usize) -> Cell {
        self.grid.cells[row][col]
    }

    pub fn row_text(&self, row: usize) -> String {
        self.grid.cells[row].iter().map(|c| c.ch).collect()
    }

    /// Cells in the physical rectangle whose glyph or color is not blank.
    pub fn marked_in(&self, col: usize, row: usize, width: usize, height: usize) -> usize {
        (row..row + height)
            .flat_map(|r| (col..col + width).map(move |c| (c, r)))
            .filter(|&(c, r)| {
                let cell = self.cell(c, r);
                cell.ch != ' ' || cell.fg.is_some()
            })
            .count()
    }

    pub fn count(&self, ch: char) -> usize {
        self.grid.cells.iter().flatten().filter(|c| c.ch == ch).count()
    }
}

/// 20x10 borderless canvas, centered in 80x24 at column 30, row 7.
pub fn small_config() -> CanvasConfig {
    CanvasConfig {
        width: Some(Extent::Fixed(20)),
        height: Some(Extent::Fixed(10)),
        border: BorderStyle::None,
        ..CanvasConfig::default()
    }
}

pub const LEFT: usize = 30;
pub const TOP: usize = 7;

pub fn canvas(config: CanvasConfig) -> (Canvas<Vec<u8>>, ManualClock, Screen) {
    let clock = ManualClock::new();
    let mut canvas = Canvas::with_parts(Vec::new(), (80, 24), config, clock.clone(), FrameQueue::new())
        .expect("canvas fits an 80x24 terminal");
    let mut screen = Screen::new(80, 24);
    screen.sync(&mut canvas);
    (canvas, clock, screen)
}

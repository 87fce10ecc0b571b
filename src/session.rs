//! A canvas bound to the real terminal.
//!
//! Starting a session puts the terminal in raw mode on the alternate screen.
//! The terminal is handed back exactly once: on [`Session::restore`], on
//! drop, or right before the process exits on Ctrl-C.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{cursor, event, execute, terminal};
use tracing::{debug, warn};

use crate::canvas::Canvas;
use crate::config::CanvasConfig;
use crate::error::Result;
use crate::event::{Dispatch, Event};

/// Exit status after Ctrl-C, as a shell reports SIGINT.
const INTERRUPTED: i32 = 130;

pub struct Session {
    canvas: Canvas<Stdout>,
    restored: bool,
}

impl Session {
    pub fn start(config: CanvasConfig) -> Result<Self> {
        let size = terminal::size()?;
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e.into());
        }
        debug!(cols = size.0, rows = size.1, "session started");

        match Canvas::new(stdout, size, config) {
            Ok(canvas) => Ok(Self {
                canvas,
                restored: false,
            }),
            Err(e) => {
                let mut stdout = io::stdout();
                let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
                let _ = terminal::disable_raw_mode();
                Err(e)
            }
        }
    }

    pub fn canvas(&mut self) -> &mut Canvas<Stdout> {
        &mut self.canvas
    }

    /// Feed terminal input to the canvas for one frame interval, then run
    /// due animation frames. Returns the events the canvas queued.
    pub fn pump(&mut self, interval: Duration) -> Result<Vec<Event>> {
        let deadline = Instant::now() + interval;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining)? {
                break;
            }
            let input = event::read()?;
            if self.canvas.handle_event(&input)? == Dispatch::Interrupt {
                debug!("interrupted");
                self.restore()?;
                std::process::exit(INTERRUPTED);
            }
        }
        self.canvas.tick()?;
        Ok(self.canvas.drain_events())
    }

    /// Reset colors, park the cursor and give the terminal back.
    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        let parked = self.canvas.park();
        execute!(self.canvas.get_mut(), cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        debug!("terminal restored");
        parked
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("failed to restore terminal: {e}");
        }
    }
}

//! Color state machine.
//!
//! Tracks the ambient foreground/background and writes palette SGR codes.
//! The codes are emitted through crate-local `crossterm::Command`s so the
//! stream carries the 8-color forms (`ESC[3Nm` / `ESC[4Nm`) rather than the
//! 256-color sequences crossterm uses for its own `Color` enum.

use std::fmt;
use std::io::Write;

use crossterm::{style::ResetColor, Command, QueueableCommand};

use crate::types::NamedColor;

/// Set the foreground to a palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPaletteForeground(pub NamedColor);

/// Set the background to a palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPaletteBackground(pub NamedColor);

impl Command for SetPaletteForeground {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "\x1b[3{}m", self.0.index())
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Command for SetPaletteBackground {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "\x1b[4{}m", self.0.index())
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> std::io::Result<()> {
        Ok(())
    }
}

/// The ambient colors every primitive restores after a one-off override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorState {
    foreground: Option<NamedColor>,
    background: Option<NamedColor>,
}

impl ColorState {
    pub fn foreground(&self) -> Option<NamedColor> {
        self.foreground
    }

    pub fn background(&self) -> Option<NamedColor> {
        self.background
    }

    /// Record and emit a foreground. Clearing it re-emits the whole state so
    /// the old color does not bleed into later writes.
    pub fn set_foreground(
        &mut self,
        out: &mut impl Write,
        color: Option<NamedColor>,
    ) -> std::io::Result<()> {
        self.foreground = color;
        match color {
            Some(c) => {
                out.queue(SetPaletteForeground(c))?;
                Ok(())
            }
            None => self.refresh(out),
        }
    }

    pub fn set_background(
        &mut self,
        out: &mut impl Write,
        color: Option<NamedColor>,
    ) -> std::io::Result<()> {
        self.background = color;
        match color {
            Some(c) => {
                out.queue(SetPaletteBackground(c))?;
                Ok(())
            }
            None => self.refresh(out),
        }
    }

    pub fn reset(&mut self, out: &mut impl Write) -> std::io::Result<()> {
        self.foreground = None;
        self.background = None;
        out.queue(ResetColor)?;
        Ok(())
    }

    /// Re-emit reset, then the ambient foreground and background.
    pub fn refresh(&self, out: &mut impl Write) -> std::io::Result<()> {
        out.queue(ResetColor)?;
        if let Some(fg) = self.foreground {
            out.queue(SetPaletteForeground(fg))?;
        }
        if let Some(bg) = self.background {
            out.queue(SetPaletteBackground(bg))?;
        }
        Ok(())
    }
}

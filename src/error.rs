//! Errors raised by drawing primitives, sprites and configuration.

use std::io;

/// Errors that can occur while drawing on the canvas.
#[derive(Debug, thiserror::Error)]
pub enum DrawError {
    /// An argument has the wrong shape or value.
    #[error("invalid {what}: {reason}")]
    Validation { what: &'static str, reason: String },

    /// The requested geometry would fall outside the logical canvas.
    #[error("{0} cannot be drawn outside of the canvas")]
    OutOfBounds(String),

    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    #[error("{0} is not a valid color")]
    InvalidColor(String),

    #[error("character {0:?} is not recognized, draw it with a custom bitmap instead")]
    UnrecognizedCharacter(char),

    #[error("terminal write failed: {0}")]
    Io(#[from] io::Error),
}

impl DrawError {
    pub(crate) fn validation(what: &'static str, reason: impl Into<String>) -> Self {
        DrawError::Validation {
            what,
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_bounds(what: impl Into<String>) -> Self {
        DrawError::OutOfBounds(what.into())
    }
}

pub type Result<T, E = DrawError> = std::result::Result<T, E>;

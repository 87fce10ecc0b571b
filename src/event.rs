//! Events the canvas queues for its host.

use crossterm::event::KeyEvent;

use crate::sprite::{SpriteEvent, SpriteId};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A key press, under its synthesized name (see [`crate::input::key_name`]).
    Key { name: String, key: KeyEvent },
    /// The terminal was resized; carries the new logical canvas size.
    Resize { width: u16, height: u16 },
    Sprite { id: SpriteId, event: SpriteEvent },
    MenuChoice { menu: SpriteId, index: usize },
}

/// What the host should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Continue,
    /// Ctrl-C: restore the terminal and exit.
    Interrupt,
}

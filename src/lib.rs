//! A character-cell drawing and sprite engine for terminals.
//!
//! Geometric drawing commands (lines, boxes, text, bitmaps) become
//! cursor-addressed Unicode block glyphs with palette colors. On top of that
//! sits a small sprite layer: timed linear moves, redraw on move, box
//! collision and a key-driven menu.
//!
//! Pipeline:
//! 1. A [`Canvas`] is bound to an output sink and a terminal size.
//! 2. Drawing calls go straight to the sink, centered on the terminal.
//! 3. Input and resize events are fed to [`Canvas::handle_event`], animation
//!    frames run on [`Canvas::tick`], and the canvas answers with [`Event`]s.
//!
//! [`Session`] wires all of this to the real terminal.

pub mod canvas;
pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod input;
pub mod scheduler;
pub mod session;
pub mod sprite;
pub mod surface;
pub mod types;

pub use canvas::Canvas;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CanvasConfig, ColorConfig, Extent};
pub use error::{DrawError, Result};
pub use event::{Dispatch, Event};
pub use scheduler::{FrameHandle, FrameQueue, FrameScheduler};
pub use session::Session;
pub use sprite::{BoxShape, Menu, Sprite, SpriteEvent, SpriteId};
pub use surface::{Bitmap, LineStyle, SevenSegment, Surface};
pub use types::{Axis, BorderStyle, NamedColor, Point};

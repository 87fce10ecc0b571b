//! Movable drawables owned by a canvas.
//!
//! A sprite is a draw routine plus a position. The canvas keeps every
//! sprite in a registry and hands out `SpriteId`s; drawing, clearing and
//! moving all go through the canvas because they need its clock, its
//! scheduler and its surface.
//!
//! The same draw routine both paints and erases: the canvas runs it in clear
//! mode, where the surface writes blanks instead of glyphs.

mod menu;
mod rect;

use std::time::Duration;

use crate::error::{DrawError, Result};
use crate::geometry::round_half;
use crate::scheduler::FrameHandle;
use crate::surface::Surface;
use crate::types::{Axis, Point};

pub use menu::{Menu, MENU_KEYS};
pub use rect::BoxShape;

/// Registry index of a sprite on its canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(pub(crate) usize);

/// A synchronous draw routine. It receives the surface and the position to
/// draw at.
pub type DrawFn = Box<dyn FnMut(&mut Surface, Point) -> Result<()>>;

/// Notifications a sprite produces, queued on its canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpriteEvent {
    Draw(Point),
    /// The sprite was erased from this position.
    Clear(Point),
    /// Motion was stopped; carries the canvas time.
    Stop { time: Duration },
    /// One animation frame ran, whether or not the sprite was redrawn.
    Frame,
    MoveEnded(Point),
}

pub(crate) enum SpriteKind {
    Custom(DrawFn),
    Box(BoxShape),
    Menu(Menu),
}

/// An in-flight linear move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Motion {
    pub from: Point,
    pub to: Point,
    /// Seconds.
    pub duration: f64,
    pub start: Duration,
}

impl Motion {
    pub(crate) fn position_at(&self, elapsed: f64) -> Point {
        let t = elapsed / self.duration;
        Point::new(
            self.from.x + (self.to.x - self.from.x) * t,
            self.from.y + (self.to.y - self.from.y) * t,
        )
    }
}

pub struct Sprite {
    pub(crate) kind: SpriteKind,
    precise_axis: Axis,
    speed: Option<f64>,
    pub(crate) position: Option<Point>,
    pub(crate) frame: Option<FrameHandle>,
    pub(crate) motion: Option<Motion>,
}

impl Sprite {
    pub fn new(draw: impl FnMut(&mut Surface, Point) -> Result<()> + 'static) -> Self {
        Self::from_kind(SpriteKind::Custom(Box::new(draw)), Axis::Neither)
    }

    /// A filled rectangle sprite. Boxes keep half-cell precision on the y
    /// axis unless told otherwise.
    pub fn new_box(shape: BoxShape) -> Self {
        Self::from_kind(SpriteKind::Box(shape), Axis::Y)
    }

    pub fn new_menu(menu: Menu) -> Self {
        Self::from_kind(SpriteKind::Menu(menu), Axis::Neither)
    }

    fn from_kind(kind: SpriteKind, precise_axis: Axis) -> Self {
        Self {
            kind,
            precise_axis,
            speed: None,
            position: None,
            frame: None,
            motion: None,
        }
    }

    pub fn with_precise_axis(mut self, axis: Axis) -> Self {
        self.precise_axis = axis;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Result<Self> {
        self.set_speed(Some(speed))?;
        Ok(self)
    }

    /// Cells per second used when a move has no explicit duration.
    pub fn set_speed(&mut self, speed: Option<f64>) -> Result<()> {
        if let Some(s) = speed {
            if !(s.is_finite() && s > 0.0) {
                return Err(DrawError::validation("sprite speed", "must be a positive number"));
            }
        }
        self.speed = speed;
        Ok(())
    }

    pub fn speed(&self) -> Option<f64> {
        self.speed
    }

    pub fn precise_axis(&self) -> Axis {
        self.precise_axis
    }

    /// Last drawn position, `None` while hidden.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn is_moving(&self) -> bool {
        self.frame.is_some()
    }

    pub fn as_box(&self) -> Option<&BoxShape> {
        match &self.kind {
            SpriteKind::Box(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn as_menu(&self) -> Option<&Menu> {
        match &self.kind {
            SpriteKind::Menu(menu) => Some(menu),
            _ => None,
        }
    }

    pub(crate) fn as_menu_mut(&mut self) -> Option<&mut Menu> {
        match &mut self.kind {
            SpriteKind::Menu(menu) => Some(menu),
            _ => None,
        }
    }

    /// Round an interpolated position: half cells on the precise axis,
    /// whole cells elsewhere.
    pub(crate) fn round(&self, p: Point) -> Point {
        let snap = |v: f64, precise: bool| if precise { round_half(v) } else { v.round() };
        Point::new(
            snap(p.x, self.precise_axis == Axis::X),
            snap(p.y, self.precise_axis == Axis::Y),
        )
    }

    pub(crate) fn paint(&mut self, surface: &mut Surface, at: Point) -> Result<()> {
        match &mut self.kind {
            SpriteKind::Custom(draw) => draw(surface, at),
            SpriteKind::Box(shape) => shape.paint(surface, at),
            SpriteKind::Menu(menu) => menu.paint(surface, at),
        }
    }
}

//! The logical drawing area bound to one output sink.
//!
//! The canvas owns the surface, the sprite registry, the animation clock and
//! the frame scheduler. Every public operation queues its writes on the
//! surface and flushes them to the sink before returning, so the sink always
//! reflects a whole operation.
//!
//! Input and resize notifications are fed in through [`Canvas::handle_event`];
//! everything the canvas has to say back is queued as [`Event`]s and drained
//! by the host.

use std::collections::{HashMap, VecDeque};
use std::io::Write;
use std::time::Duration;

use crossterm::event::{Event as TermEvent, KeyEventKind};
use tracing::{debug, trace, warn};

use crate::clock::{CanvasClock, Clock, SystemClock};
use crate::color::ColorState;
use crate::config::CanvasConfig;
use crate::error::{DrawError, Result};
use crate::event::{Dispatch, Event};
use crate::geometry::distance;
use crate::input::{is_interrupt, key_name};
use crate::scheduler::{FrameQueue, FrameScheduler};
use crate::sprite::{Menu, Motion, Sprite, SpriteEvent, SpriteId};
use crate::surface::{require_finite, Bitmap, LineStyle, SevenSegment, Surface};
use crate::types::{BorderStyle, NamedColor, Point};

pub struct Canvas<W: Write> {
    out: W,
    surface: Surface,
    config: CanvasConfig,
    clock: CanvasClock,
    scheduler: Box<dyn FrameScheduler>,
    sprites: Vec<Sprite>,
    /// Key name -> (menu, option index) for every open menu, in the order
    /// the menus were opened.
    bindings: HashMap<String, Vec<(SpriteId, usize)>>,
    events: VecDeque<Event>,
}

impl<W: Write> Canvas<W> {
    /// A canvas on a terminal of `size` (columns, rows), timed by the wall
    /// clock with frames run on every [`tick`](Self::tick).
    pub fn new(out: W, size: (u16, u16), config: CanvasConfig) -> Result<Self> {
        Self::with_parts(out, size, config, SystemClock::new(), FrameQueue::new())
    }

    pub fn with_parts(
        out: W,
        (cols, rows): (u16, u16),
        config: CanvasConfig,
        clock: impl Clock + 'static,
        scheduler: impl FrameScheduler + 'static,
    ) -> Result<Self> {
        let (width, height) = config.logical_size(cols, rows)?;
        let mut surface = Surface::new(cols, rows, width, height, config.border);
        let (color, buf) = surface.color_mut();
        color.set_foreground(buf, config.color.foreground)?;
        color.set_background(buf, config.color.background)?;

        let mut canvas = Self {
            out,
            surface,
            config,
            clock: CanvasClock::new(Box::new(clock)),
            scheduler: Box::new(scheduler),
            sprites: Vec::new(),
            bindings: HashMap::new(),
            events: VecDeque::new(),
        };
        debug!(cols, rows, width, height, border = ?config.border, "canvas created");
        let result = canvas.layout();
        canvas.flush()?;
        result.map(|()| canvas)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn width(&self) -> u16 {
        self.surface.width()
    }

    pub fn height(&self) -> u16 {
        self.surface.height()
    }

    pub fn border(&self) -> BorderStyle {
        self.surface.border()
    }

    pub fn color(&self) -> &ColorState {
        self.surface.color()
    }

    pub fn too_big(&self) -> bool {
        self.surface.too_big()
    }

    /// Elapsed time, frozen while the canvas is too big.
    pub fn time(&self) -> Duration {
        self.clock.now()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    // -----------------------------------------------------------------------
    // Color
    // -----------------------------------------------------------------------

    pub fn set_foreground(&mut self, color: Option<NamedColor>) -> Result<()> {
        let (state, buf) = self.surface.color_mut();
        state.set_foreground(buf, color)?;
        self.color_changed()
    }

    pub fn set_background(&mut self, color: Option<NamedColor>) -> Result<()> {
        let (state, buf) = self.surface.color_mut();
        state.set_background(buf, color)?;
        self.color_changed()
    }

    pub fn reset_color(&mut self) -> Result<()> {
        let (state, buf) = self.surface.color_mut();
        state.reset(buf)?;
        self.color_changed()
    }

    fn color_changed(&mut self) -> Result<()> {
        let result = self.redraw_all();
        self.flush()?;
        result
    }

    // -----------------------------------------------------------------------
    // Primitives
    // -----------------------------------------------------------------------

    pub fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &LineStyle) -> Result<()> {
        self.flushed(|s| s.draw_line(x1, y1, x2, y2, style))
    }

    pub fn draw_box(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Option<NamedColor>,
    ) -> Result<()> {
        self.flushed(|s| s.draw_box(x, y, width, height, color))
    }

    pub fn write(&mut self, text: &str, x: f64, y: f64, color: Option<NamedColor>) -> Result<()> {
        self.flushed(|s| s.write_text(text, x, y, color))
    }

    pub fn bitmap(&mut self, x: f64, y: f64, color: Option<NamedColor>, bitmaps: &[Bitmap]) -> Result<f64> {
        self.flushed(|s| s.bitmap(x, y, color, bitmaps))
    }

    pub fn seven_segment(
        &mut self,
        x: f64,
        y: f64,
        digit: SevenSegment,
        color: Option<NamedColor>,
    ) -> Result<f64> {
        self.flushed(|s| s.seven_segment(x, y, digit, color))
    }

    pub fn write_large(&mut self, text: &str, x: f64, y: f64, color: Option<NamedColor>) -> Result<f64> {
        self.flushed(|s| s.write_large(text, x, y, color))
    }

    // -----------------------------------------------------------------------
    // Screen
    // -----------------------------------------------------------------------

    /// Stop and erase every sprite, wipe the screen and redraw the border.
    pub fn clear(&mut self) -> Result<()> {
        let mut first_err = None;
        for index in 0..self.sprites.len() {
            let id = SpriteId(index);
            self.stop_inner(id);
            if let Err(e) = self.clear_inner(id) {
                first_err.get_or_insert(e);
            }
        }
        let result = self.layout();
        self.flush()?;
        first_err.map_or(result, Err)
    }

    /// Redraw the border and every showing sprite.
    pub fn refresh(&mut self) -> Result<()> {
        let (color, buf) = self.surface.color_mut();
        color.refresh(buf)?;
        let result = self.redraw_all();
        self.flush()?;
        result
    }

    /// Adopt a new terminal size. `Shrink` extents are re-derived against it.
    /// A terminal too small to derive any size leaves the canvas too big.
    pub fn resize(&mut self, cols: u16, rows: u16) -> Result<()> {
        self.surface.set_physical(cols, rows);
        match self.config.logical_size(cols, rows) {
            Ok((width, height)) => self.surface.set_logical(width, height),
            Err(e) => {
                warn!(cols, rows, "no canvas size fits the terminal: {e}");
                self.surface.set_unsized();
            }
        }
        let (width, height) = (self.width(), self.height());
        debug!(cols, rows, width, height, "terminal resized");
        let result = self.layout();
        self.events.push_back(Event::Resize { width, height });
        self.flush()?;
        result
    }

    /// Feed one terminal event. Key presses are queued under their
    /// synthesized names and trigger every menu bound to them.
    pub fn handle_event(&mut self, event: &TermEvent) -> Result<Dispatch> {
        match event {
            TermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                if is_interrupt(key) {
                    return Ok(Dispatch::Interrupt);
                }
                if self.surface.too_big() {
                    return Ok(Dispatch::Continue);
                }
                let Some(name) = key_name(key) else {
                    return Ok(Dispatch::Continue);
                };
                let bound = self.bindings.get(&name).cloned().unwrap_or_default();
                self.events.push_back(Event::Key { name, key: *key });
                let mut first_err = None;
                for (menu, index) in bound {
                    if let Err(e) = self.choose(menu, index) {
                        first_err.get_or_insert(e);
                    }
                }
                self.flush()?;
                if let Some(e) = first_err {
                    return Err(e);
                }
            }
            TermEvent::Resize(cols, rows) => self.resize(*cols, *rows)?,
            _ => {}
        }
        Ok(Dispatch::Continue)
    }

    /// Run every animation frame that is due.
    pub fn tick(&mut self) -> Result<()> {
        let mut first_err = None;
        for (handle, id) in self.scheduler.due_frames() {
            // Stale handles belong to a motion that has since been stopped.
            let current = self.sprites.get(id.0).and_then(|s| s.frame);
            if current != Some(handle) {
                continue;
            }
            if let Err(e) = self.run_frame(id) {
                first_err.get_or_insert(e);
            }
        }
        self.flush()?;
        first_err.map_or(Ok(()), Err)
    }

    /// Reset colors and leave the cursor on the bottom row.
    pub fn park(&mut self) -> Result<()> {
        self.surface.park()?;
        self.flush()
    }

    // -----------------------------------------------------------------------
    // Sprites
    // -----------------------------------------------------------------------

    pub fn add_sprite(&mut self, sprite: Sprite) -> SpriteId {
        let id = SpriteId(self.sprites.len());
        trace!(?id, "sprite added");
        self.sprites.push(sprite);
        id
    }

    pub fn sprite(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(id.0)
    }

    pub fn sprite_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites.get_mut(id.0)
    }

    /// Positioned, and the canvas is not too big.
    pub fn is_showing(&self, id: SpriteId) -> bool {
        !self.surface.too_big() && self.sprite(id).is_some_and(|s| s.position.is_some())
    }

    pub fn draw_sprite(&mut self, id: SpriteId, at: Point) -> Result<()> {
        let result = self.draw_inner(id, at);
        self.flush()?;
        result
    }

    /// Draw again at the current position.
    pub fn redraw_sprite(&mut self, id: SpriteId) -> Result<()> {
        let at = self.position_of(id)?;
        self.draw_sprite(id, at)
    }

    pub fn clear_sprite(&mut self, id: SpriteId) -> Result<()> {
        self.checked(id)?;
        let result = self.clear_inner(id);
        self.flush()?;
        result
    }

    /// Cancel any motion in progress. Stopping a still sprite is harmless.
    pub fn stop(&mut self, id: SpriteId) -> Result<()> {
        self.checked(id)?;
        self.stop_inner(id);
        Ok(())
    }

    /// Move linearly from `from` to `to`. With no `duration` the sprite's
    /// speed decides how long the move takes.
    pub fn move_sprite(
        &mut self,
        id: SpriteId,
        from: Point,
        to: Point,
        duration: Option<Duration>,
    ) -> Result<()> {
        let speed = self.checked(id)?.speed();
        require_finite("move", &[from.x, from.y, to.x, to.y])?;
        let seconds = match (duration, speed) {
            (Some(d), _) => d.as_secs_f64(),
            (None, Some(speed)) => distance(from.x, from.y, to.x, to.y) / speed,
            (None, None) => {
                return Err(DrawError::validation(
                    "move",
                    "a duration is required when the sprite has no speed",
                ));
            }
        };

        self.stop_inner(id);
        let start = self.clock.now();
        let handle = self.scheduler.request_frame(id);
        let sprite = &mut self.sprites[id.0];
        sprite.motion = Some(Motion {
            from,
            to,
            duration: seconds,
            start,
        });
        sprite.frame = Some(handle);
        Ok(())
    }

    pub fn move_to(&mut self, id: SpriteId, to: Point, duration: Option<Duration>) -> Result<()> {
        let from = self.position_of(id)?;
        self.move_sprite(id, from, to, duration)
    }

    pub fn move_relative(&mut self, id: SpriteId, dx: f64, dy: f64, duration: Option<Duration>) -> Result<()> {
        let from = self.position_of(id)?;
        self.move_sprite(id, from, Point::new(from.x + dx, from.y + dy), duration)
    }

    /// Whether two box sprites overlap, edges included. A box that is not
    /// positioned touches nothing.
    pub fn touching(&self, a: SpriteId, b: SpriteId) -> Result<bool> {
        let (first, second) = (self.checked(a)?, self.checked(b)?);
        let (Some(shape_a), Some(shape_b)) = (first.as_box(), second.as_box()) else {
            return Err(DrawError::validation("touching", "both sprites must be boxes"));
        };
        Ok(match (first.position, second.position) {
            (Some(pa), Some(pb)) => shape_a.touching(pa, shape_b, pb),
            _ => false,
        })
    }

    /// Columns a menu sprite occupies on this canvas.
    pub fn menu_width(&self, id: SpriteId) -> Result<usize> {
        self.checked(id)?
            .as_menu()
            .map(|menu| menu.width(self.surface.border()))
            .ok_or_else(|| DrawError::validation("menu", "sprite is not a menu"))
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn flush(&mut self) -> Result<()> {
        self.surface.flush_into(&mut self.out)?;
        Ok(())
    }

    /// Run a primitive and flush whatever it wrote, even on failure.
    fn flushed<T>(&mut self, op: impl FnOnce(&mut Surface) -> Result<T>) -> Result<T> {
        let result = op(&mut self.surface);
        self.flush()?;
        result
    }

    fn checked(&self, id: SpriteId) -> Result<&Sprite> {
        self.sprite(id)
            .ok_or_else(|| DrawError::validation("sprite", "not registered on this canvas"))
    }

    fn position_of(&self, id: SpriteId) -> Result<Point> {
        self.checked(id)?
            .position
            .ok_or_else(|| DrawError::validation("sprite position", "sprite has not been drawn"))
    }

    /// Wipe the screen, then either freeze behind the too-big message or
    /// thaw and redraw everything.
    fn layout(&mut self) -> Result<()> {
        self.surface.clear_screen()?;
        if self.surface.too_big() {
            if !self.clock.is_frozen() {
                debug!("canvas larger than terminal, freezing");
                self.clock.freeze();
            }
            self.surface.write_too_big_message()
        } else {
            if self.clock.is_frozen() {
                debug!("canvas fits again, resuming");
                self.clock.thaw();
            }
            self.redraw_all()
        }
    }

    fn redraw_all(&mut self) -> Result<()> {
        if self.surface.too_big() {
            return Ok(());
        }
        self.surface.draw_border()?;
        let mut first_err = None;
        for index in 0..self.sprites.len() {
            let id = SpriteId(index);
            let Some(at) = self.sprites[index].position else {
                continue;
            };
            match self.paint(id, at) {
                Ok(()) => self.push_sprite_event(id, SpriteEvent::Draw(at)),
                Err(e) => {
                    first_err.get_or_insert(e);
                }
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Paint at `at`. A sprite whose draw routine fails is hidden.
    fn paint(&mut self, id: SpriteId, at: Point) -> Result<()> {
        let sprite = &mut self.sprites[id.0];
        sprite.position = Some(at);
        let result = sprite.paint(&mut self.surface, at);
        if result.is_err() {
            sprite.position = None;
            self.close_menu(id);
        }
        result
    }

    fn draw_inner(&mut self, id: SpriteId, at: Point) -> Result<()> {
        self.checked(id)?;
        if self.is_showing(id) && !self.surface.clear_mode() {
            self.clear_inner(id)?;
        }
        self.paint(id, at)?;
        self.open_menu(id);
        self.events.push_back(Event::Sprite {
            id,
            event: SpriteEvent::Draw(at),
        });
        Ok(())
    }

    fn clear_inner(&mut self, id: SpriteId) -> Result<()> {
        if !self.is_showing(id) {
            return Ok(());
        }
        let sprite = &mut self.sprites[id.0];
        let Some(at) = sprite.position.take() else {
            return Ok(());
        };
        let previous = self.surface.set_clear_mode(true);
        let result = sprite.paint(&mut self.surface, at);
        self.surface.set_clear_mode(previous);
        self.close_menu(id);
        self.events.push_back(Event::Sprite {
            id,
            event: SpriteEvent::Clear(at),
        });
        result
    }

    fn stop_inner(&mut self, id: SpriteId) {
        let sprite = &mut self.sprites[id.0];
        sprite.motion = None;
        if let Some(handle) = sprite.frame.take() {
            self.scheduler.cancel_frame(handle);
        }
        let time = self.clock.now();
        self.events.push_back(Event::Sprite {
            id,
            event: SpriteEvent::Stop { time },
        });
    }

    fn run_frame(&mut self, id: SpriteId) -> Result<()> {
        let sprite = &mut self.sprites[id.0];
        sprite.frame = None;
        let Some(motion) = sprite.motion else {
            return Ok(());
        };
        let elapsed = self.clock.now().saturating_sub(motion.start).as_secs_f64();

        if elapsed >= motion.duration {
            self.stop_inner(id);
            let result = self.draw_inner(id, motion.to);
            self.push_sprite_event(id, SpriteEvent::Frame);
            self.push_sprite_event(id, SpriteEvent::MoveEnded(motion.to));
            return result;
        }

        let next = sprite.round(motion.position_at(elapsed));
        if sprite.position != Some(next) {
            if let Err(e) = self.draw_inner(id, next) {
                self.stop_inner(id);
                return Err(e);
            }
        }
        let handle = self.scheduler.request_frame(id);
        self.sprites[id.0].frame = Some(handle);
        self.push_sprite_event(id, SpriteEvent::Frame);
        Ok(())
    }

    fn push_sprite_event(&mut self, id: SpriteId, event: SpriteEvent) {
        self.events.push_back(Event::Sprite { id, event });
    }

    fn open_menu(&mut self, id: SpriteId) {
        let Some(menu) = self.sprites[id.0].as_menu_mut() else {
            return;
        };
        if menu.open {
            return;
        }
        menu.open = true;
        for index in 0..menu.options().len() {
            if let Some(name) = Menu::key_name(index) {
                self.bindings.entry(name).or_default().push((id, index));
            }
        }
        debug!(?id, options = menu.options().len(), "menu opened");
    }

    fn close_menu(&mut self, id: SpriteId) {
        let Some(menu) = self.sprites[id.0].as_menu_mut() else {
            return;
        };
        if !menu.open {
            return;
        }
        menu.open = false;
        self.bindings.retain(|_, bound| {
            bound.retain(|&(menu, _)| menu != id);
            !bound.is_empty()
        });
        debug!(?id, "menu closed");
    }

    /// A bound key fired: unbind, erase, then tell the host.
    fn choose(&mut self, menu: SpriteId, index: usize) -> Result<()> {
        debug!(?menu, index, "menu option chosen");
        self.close_menu(menu);
        let result = self.clear_inner(menu);
        if let Some(m) = self.sprites[menu.0].as_menu_mut() {
            m.choose(index);
        }
        self.events.push_back(Event::MenuChoice { menu, index });
        result
    }
}

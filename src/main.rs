use std::fs::File;
use std::process;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cell_canvas::{
    BoxShape, CanvasConfig, DrawError, Event, Menu, NamedColor, Point, Session, SevenSegment, Sprite,
    SpriteEvent, SpriteId,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const DEMO_USAGE: &str = "cell-canvas demo [config.json]";

/// Roughly 60 frames per second.
const FRAME: Duration = Duration::from_millis(16);

const COLORS: [(&str, Option<NamedColor>); 4] = [
    ("Red", Some(NamedColor::Red)),
    ("Green", Some(NamedColor::Green)),
    ("Blue", Some(NamedColor::Blue)),
    ("Plain", None),
];

fn run() -> Result<()> {
    init_logging()?;
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        Some("demo") => {
            let config = match args.next() {
                Some(path) => CanvasConfig::load(&path)?,
                None => CanvasConfig::default(),
            };
            demo(config)
        }
        _ => bail!("Cell Canvas: terminal block-graphics engine\n\nUsage:\n  {DEMO_USAGE}"),
    }
}

/// Logs go to the file named by `CELL_CANVAS_LOG`, never to the terminal
/// being drawn on.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os("CELL_CANVAS_LOG") else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.to_string_lossy()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn demo(config: CanvasConfig) -> Result<()> {
    let mut session = Session::start(config).context("Failed to start terminal session")?;
    let result = Demo::new(&mut session).and_then(|mut demo| demo.run(&mut session));
    session.restore()?;
    result
}

struct Demo {
    ball: SpriteId,
    menu: SpriteId,
    lane: f64,
    seconds: Option<u64>,
}

impl Demo {
    fn new(session: &mut Session) -> Result<Self> {
        let canvas = session.canvas();
        let lane = (canvas.height() / 2) as f64;

        let ball = Sprite::new_box(BoxShape::new(2.0, 1.0)?.with_color(NamedColor::Yellow)).with_speed(20.0)?;
        let ball = canvas.add_sprite(ball);

        let labels = COLORS.iter().map(|(label, _)| label.to_string()).collect();
        let menu = Menu::new(labels, None, |index| info!(index, "color picked"))?;
        let menu = canvas.add_sprite(Sprite::new_menu(menu));

        let mut demo = Self {
            ball,
            menu,
            lane,
            seconds: None,
        };
        demo.draw_scene(session)?;
        let canvas = session.canvas();
        canvas.draw_sprite(ball, Point::new(0.0, lane))?;
        demo.bounce(session, 0.0)?;
        Ok(demo)
    }

    fn run(&mut self, session: &mut Session) -> Result<()> {
        loop {
            // Shrinking the terminal can leave sprites outside the canvas.
            // Their draws fail and they are hidden, the demo carries on.
            let events = match session.pump(FRAME) {
                Ok(events) => events,
                Err(DrawError::OutOfBounds(what)) => {
                    warn!("{what} no longer fits the canvas");
                    session.canvas().drain_events()
                }
                Err(e) => return Err(e.into()),
            };
            for event in events {
                match event {
                    Event::Key { name, .. } if name == "q" || name == "escape" => return Ok(()),
                    Event::Key { name, .. } if name == "m" => self.open_menu(session)?,
                    Event::Sprite {
                        id,
                        event: SpriteEvent::MoveEnded(at),
                    } if id == self.ball => self.bounce(session, at.x)?,
                    Event::MenuChoice { index, .. } => {
                        let (_, color) = COLORS[index];
                        session.canvas().set_foreground(color)?;
                    }
                    Event::Resize { .. } => self.restart(session)?,
                    _ => {}
                }
            }
            self.draw_counter(session)?;
        }
    }

    /// Static content: title and menu. Skipped where the canvas is too
    /// narrow to hold it.
    fn draw_scene(&mut self, session: &mut Session) -> Result<()> {
        let canvas = session.canvas();
        if canvas.width() >= 50 && canvas.height() >= 12 {
            canvas.write_large("Cells", 1.0, 1.0, Some(NamedColor::Cyan))?;
        }
        if canvas.width() >= 20 {
            canvas.write("q: quit  m: colors", 1.0, (canvas.height() - 1) as f64, None)?;
        }
        self.open_menu(session)?;
        self.draw_counter(session)
    }

    fn open_menu(&mut self, session: &mut Session) -> Result<()> {
        let canvas = session.canvas();
        let width = canvas.menu_width(self.menu)? as f64;
        let x = canvas.width() as f64 - width - 1.0;
        let y = canvas.height() as f64 - 4.0;
        if x >= 0.0 && y >= 0.0 && !canvas.is_showing(self.menu) {
            canvas.draw_sprite(self.menu, Point::new(x, y))?;
        }
        Ok(())
    }

    /// Seconds since start, modulo ten, in the top right corner.
    fn draw_counter(&mut self, session: &mut Session) -> Result<()> {
        let canvas = session.canvas();
        let seconds = canvas.time().as_secs() % 10;
        if self.seconds == Some(seconds) || canvas.width() < 8 || canvas.height() < 6 {
            return Ok(());
        }
        self.seconds = Some(seconds);
        let digit = SevenSegment::digit(seconds as u8).unwrap_or_default();
        canvas.seven_segment(canvas.width() as f64 - 7.0, 1.0, digit, Some(NamedColor::Green))?;
        Ok(())
    }

    fn restart(&mut self, session: &mut Session) -> Result<()> {
        self.seconds = None;
        let canvas = session.canvas();
        canvas.stop(self.ball)?;
        self.lane = (canvas.height() / 2) as f64;
        self.draw_scene(session)?;
        session.canvas().draw_sprite(self.ball, Point::new(0.0, self.lane))?;
        self.bounce(session, 0.0)
    }

    fn bounce(&mut self, session: &mut Session, from: f64) -> Result<()> {
        let canvas = session.canvas();
        let right = canvas.width() as f64 - 2.0;
        let target = if from <= 0.0 { right } else { 0.0 };
        canvas.move_to(self.ball, Point::new(target, self.lane), None)?;
        Ok(())
    }
}

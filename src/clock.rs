//! Time sources for animation.
//!
//! Canvas time is the source clock minus every span spent frozen, so a
//! sprite halfway through a move resumes from the same point after the
//! terminal becomes usable again.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub trait Clock {
    /// Monotonic time since an arbitrary origin.
    fn now(&self) -> Duration;
}

/// Wall-clock time from `Instant`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock advanced by hand. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Source clock plus freeze bookkeeping.
pub(crate) struct CanvasClock {
    source: Box<dyn Clock>,
    frozen_total: Duration,
    frozen_since: Option<Duration>,
}

impl CanvasClock {
    pub(crate) fn new(source: Box<dyn Clock>) -> Self {
        Self {
            source,
            frozen_total: Duration::ZERO,
            frozen_since: None,
        }
    }

    pub(crate) fn now(&self) -> Duration {
        let raw = self.frozen_since.unwrap_or_else(|| self.source.now());
        raw.saturating_sub(self.frozen_total)
    }

    pub(crate) fn is_frozen(&self) -> bool {
        self.frozen_since.is_some()
    }

    pub(crate) fn freeze(&mut self) {
        if self.frozen_since.is_none() {
            self.frozen_since = Some(self.source.now());
        }
    }

    pub(crate) fn thaw(&mut self) {
        if let Some(since) = self.frozen_since.take() {
            self.frozen_total += self.source.now().saturating_sub(since);
        }
    }
}

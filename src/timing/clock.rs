use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crate::foundation::core::Millis;

/// Time source for the engine. The engine never reads ambient time any other way.
pub trait Clock {
    /// Current time in milliseconds since the clock's origin.
    fn now(&self) -> Millis;
}

/// Monotonic wall clock whose origin is its creation instant.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start a clock at zero now.
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
    fn now(&self) -> Millis {
        Millis(self.origin.elapsed().as_secs_f64() * 1000.0)
    }
}

/// Clock advanced explicitly by its owner. Clones share the same time, so a host can keep one
/// handle while the engine holds another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// New clock at `t = 0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to `t`.
    pub fn set(&self, t: Millis) {
        self.now.set(t.0);
    }

    /// Move forward by `dt`.
    pub fn advance(&self, dt: Millis) {
        self.now.set(self.now.get() + dt.0);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        Millis(self.now.get())
    }
}

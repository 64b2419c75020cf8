use std::ops::{Add, Sub};

use crate::foundation::error::{RouteError, RouteResult};

pub use kurbo::{BezPath, Point, Vec2};

/// Milliseconds on an engine clock.
///
/// Used for timestamps (relative to the clock's own origin) and for durations.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct Millis(pub f64);

impl Millis {
    /// Zero milliseconds.
    pub const ZERO: Self = Self(0.0);

    /// Build a validated, finite, non-negative duration.
    pub fn non_negative(ms: f64, what: &str) -> RouteResult<Self> {
        if !ms.is_finite() {
            return Err(RouteError::validation(format!("{what} must be finite")));
        }
        if ms < 0.0 {
            return Err(RouteError::validation(format!("{what} must be >= 0 (got {ms})")));
        }
        Ok(Self(ms))
    }

    /// Raw milliseconds.
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Time elapsed since `earlier`, clamped to zero when `earlier` lies in the future.
    pub fn saturating_since(self, earlier: Millis) -> Millis {
        Millis((self.0 - earlier.0).max(0.0))
    }
}

impl Add for Millis {
    type Output = Millis;

    fn add(self, rhs: Millis) -> Millis {
        Millis(self.0 + rhs.0)
    }
}

impl Sub for Millis {
    type Output = Millis;

    fn sub(self, rhs: Millis) -> Millis {
        Millis(self.0 - rhs.0)
    }
}

/// Frames-per-second represented as a rational `num/den`, used by hosts that drive the engine
/// from a fixed-rate frame loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated frame rate.
    pub fn new(num: u32, den: u32) -> RouteResult<Self> {
        if den == 0 {
            return Err(RouteError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(RouteError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frame rate as floating-point frames per second.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame.
    pub fn frame_duration(self) -> Millis {
        Millis(1000.0 * f64::from(self.den) / f64::from(self.num))
    }

    /// Timestamp of frame `frame` when frame 0 is at `t = 0`.
    pub fn frame_time(self, frame: u64) -> Millis {
        Millis((frame as f64) * 1000.0 * f64::from(self.den) / f64::from(self.num))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

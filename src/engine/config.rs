use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::{Millis, Point};
use crate::foundation::error::{RouteError, RouteResult};
use crate::timing::animation::DEFAULT_DURATION;

/// Engine configuration, owned by the engine and replaced only at construction or redo.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Delay between arming and the start of marker motion, in ms (`>= 0`).
    pub motion_delay_ms: f64,
    /// Delay between arming and the auxiliary-start callback, in ms (`>= 0`).
    pub aux_delay_ms: f64,
    /// Length of one run, in ms (`> 0`).
    pub duration_ms: f64,
    /// Round accepted waypoints to whole surface units.
    pub snap_to_grid: bool,
    /// Marker position while no waypoint exists.
    pub home: Point,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            motion_delay_ms: 1000.0,
            aux_delay_ms: 1000.0,
            duration_ms: DEFAULT_DURATION.0,
            snap_to_grid: true,
            home: Point::ORIGIN,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> RouteResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| RouteError::serde(format!("parse engine config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> RouteResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RouteError::validation(format!("open engine config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check value ranges.
    pub fn validate(&self) -> RouteResult<()> {
        Millis::non_negative(self.motion_delay_ms, "motion_delay_ms")?;
        Millis::non_negative(self.aux_delay_ms, "aux_delay_ms")?;
        if !(self.duration_ms.is_finite() && self.duration_ms > 0.0) {
            return Err(RouteError::validation(format!(
                "duration_ms must be finite and > 0 (got {})",
                self.duration_ms
            )));
        }
        if !self.home.is_finite() {
            return Err(RouteError::validation("home must be a finite point"));
        }
        Ok(())
    }

    /// Motion delay as [`Millis`].
    pub fn motion_delay(&self) -> Millis {
        Millis(self.motion_delay_ms)
    }

    /// Auxiliary delay as [`Millis`].
    pub fn aux_delay(&self) -> Millis {
        Millis(self.aux_delay_ms)
    }

    /// Run duration as [`Millis`].
    pub fn duration(&self) -> Millis {
        Millis(self.duration_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/config.rs"]
mod tests;

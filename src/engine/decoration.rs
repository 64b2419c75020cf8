use std::f64::consts::PI;

/// Peak vertical bounce of the marker, in surface units.
pub const BOUNCE_AMPLITUDE: f64 = 1.2;

/// Wheel radius used to turn travelled distance into rotation.
pub const WHEEL_RADIUS: f64 = 5.5;

// Full bounce cycles over one run.
const BOUNCE_CYCLES: f64 = 2.0;

/// Which end of the marker leads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerEnd {
    /// Leading end drawn on the left.
    Left,
    /// Leading end drawn on the right.
    Right,
}

/// Cosmetic marker state derived from run progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Decoration {
    /// Vertical offset in surface units.
    pub bounce: f64,
    /// Wheel rotation in degrees.
    pub wheel_angle_deg: f64,
    /// Leading end of the marker.
    pub front: MarkerEnd,
}

impl Decoration {
    /// Decoration for a marker at `progress` that has travelled `distance` units.
    pub fn at(progress: f64, distance: f64, flipped: bool) -> Self {
        Self {
            bounce: BOUNCE_AMPLITUDE * (progress * BOUNCE_CYCLES * 2.0 * PI).sin(),
            wheel_angle_deg: (distance / WHEEL_RADIUS).to_degrees(),
            front: if flipped {
                MarkerEnd::Left
            } else {
                MarkerEnd::Right
            },
        }
    }
}

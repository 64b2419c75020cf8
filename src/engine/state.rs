/// Lifecycle of the route animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(tag = "kind", content = "waypoints", rename_all = "snake_case")]
pub enum EngineState {
    /// No waypoints.
    Idle,
    /// Between one and five waypoints placed.
    Collecting(usize),
    /// Route complete; delay timers pending.
    Armed,
    /// Marker moving along the curve.
    Running,
    /// Marker reached the end of the curve.
    Finished,
}

impl EngineState {
    /// State implied by a waypoint count while nothing is armed.
    pub(crate) fn collecting(count: usize) -> Self {
        if count == 0 {
            Self::Idle
        } else {
            Self::Collecting(count)
        }
    }

    /// `true` once the marker has started moving in the current cycle.
    pub fn is_moving_or_done(self) -> bool {
        matches!(self, Self::Running | Self::Finished)
    }
}

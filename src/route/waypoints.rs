use crate::foundation::core::Point;

/// Number of waypoints that completes a route.
pub const MAX_WAYPOINTS: usize = 6;

/// Result of offering one input point to a [`WaypointCollector`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct AddOutcome {
    /// The point was stored.
    pub accepted: bool,
    /// This point was the one that completed the route.
    pub complete: bool,
}

impl AddOutcome {
    const REJECTED: Self = Self {
        accepted: false,
        complete: false,
    };
}

/// Role of a waypoint within the route, by insertion position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WaypointRole {
    /// First waypoint; the marker's home before the run.
    Start,
    /// Interior waypoint the curve bends toward.
    Middle,
    /// Last waypoint; the curve ends exactly here.
    End,
}

impl WaypointRole {
    /// Role of the waypoint stored at `index`.
    pub fn for_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Start),
            i if i + 1 < MAX_WAYPOINTS => Some(Self::Middle),
            i if i + 1 == MAX_WAYPOINTS => Some(Self::End),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Middle => "MIDDLE",
            Self::End => "END",
        }
    }
}

/// Accumulates up to [`MAX_WAYPOINTS`] points in travel order.
///
/// The sequence only grows through [`add_point`](Self::add_point) and only shrinks through
/// [`reset`](Self::reset), which keeps the first point as the marker's home.
#[derive(Clone, Debug, Default)]
pub struct WaypointCollector {
    points: Vec<Point>,
    snap_to_grid: bool,
}

impl WaypointCollector {
    /// Create an empty collector. With `snap_to_grid`, accepted points are rounded to whole
    /// surface units.
    pub fn new(snap_to_grid: bool) -> Self {
        Self {
            points: Vec::with_capacity(MAX_WAYPOINTS),
            snap_to_grid,
        }
    }

    /// Change rounding for points accepted from now on.
    pub fn set_snap_to_grid(&mut self, snap_to_grid: bool) {
        self.snap_to_grid = snap_to_grid;
    }

    /// Offer one input point. Full routes and non-finite points are ignored.
    pub fn add_point(&mut self, p: Point) -> AddOutcome {
        if self.is_complete() {
            tracing::trace!(x = p.x, y = p.y, "route complete, input ignored");
            return AddOutcome::REJECTED;
        }
        if !p.is_finite() {
            tracing::warn!(x = p.x, y = p.y, "non-finite waypoint ignored");
            return AddOutcome::REJECTED;
        }

        let p = if self.snap_to_grid { p.round() } else { p };
        self.points.push(p);
        AddOutcome {
            accepted: true,
            complete: self.is_complete(),
        }
    }

    /// Truncate to at most the first waypoint.
    pub fn reset(&mut self) {
        self.points.truncate(1);
    }

    /// Stored waypoints in travel order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of stored waypoints.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when no waypoint is stored.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `true` once [`MAX_WAYPOINTS`] points are stored.
    pub fn is_complete(&self) -> bool {
        self.points.len() >= MAX_WAYPOINTS
    }

    /// Role the next accepted point will take, or `None` when the route is complete.
    pub fn next_role(&self) -> Option<WaypointRole> {
        WaypointRole::for_index(self.points.len())
    }

    /// Placement instruction for the next point, e.g. `Click to set START point (1/6)`.
    pub fn prompt(&self) -> Option<String> {
        let role = self.next_role()?;
        Some(format!(
            "Click to set {} point ({}/{})",
            role.label(),
            self.points.len() + 1,
            MAX_WAYPOINTS
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/route/waypoints.rs"]
mod tests;

use crate::engine::decoration::Decoration;
use crate::engine::state::EngineState;
use crate::foundation::core::Point;
use crate::route::path::Curve;

/// Everything a host needs to draw one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderSnapshot {
    /// Engine state at snapshot time.
    pub state: EngineState,
    /// Run progress in `[0, 1]`; `0` outside `Running`/`Finished`.
    pub progress: f64,
    /// Marker position.
    pub position: Point,
    /// Marker rotation in degrees, always within `[-90, 90]`.
    pub display_angle: f64,
    /// Marker is mirrored horizontally.
    pub flipped: bool,
    /// Bounce, wheel rotation and leading end.
    pub decoration: Decoration,
    /// Route curve, present once two waypoints exist.
    #[serde(skip)]
    pub curve: Option<Curve>,
    /// SVG path data for the route, present once two waypoints exist.
    pub path_data: Option<String>,
    /// Arc length of the route, `0` without a curve.
    pub total_length: f64,
    /// Placed waypoints in placement order.
    pub waypoints: Vec<Point>,
    /// Waypoint markers should be drawn.
    pub show_waypoints: bool,
    /// Placement instruction while the route is incomplete.
    pub prompt: Option<String>,
}

//! routeglide animates a marker along a smooth route placed one waypoint at a time.
//!
//! - Collect up to six waypoints with a [`RouteAnimationEngine`]
//! - The sixth point builds a [`Curve`] and arms two delay timers
//! - Drive the engine from a frame loop with [`RouteAnimationEngine::tick`] and draw each
//!   [`RenderSnapshot`]
//!
//! Time is read only through a [`Clock`], so a [`ManualClock`] replays a session exactly.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod engine;
mod foundation;
mod route;
mod timing;

pub use crate::foundation::core::{BezPath, Fps, Millis, Point, Vec2};
pub use crate::foundation::error::{RouteError, RouteResult};

pub use crate::engine::config::EngineConfig;
pub use crate::engine::decoration::{BOUNCE_AMPLITUDE, Decoration, MarkerEnd, WHEEL_RADIUS};
pub use crate::engine::runtime::RouteAnimationEngine;
pub use crate::engine::scenario::{Scenario, SimulationTrace, TraceFrame, Transition};
pub use crate::engine::snapshot::RenderSnapshot;
pub use crate::engine::state::EngineState;
pub use crate::route::orientation::{Orientation, normalize};
pub use crate::route::path::{Curve, PathBuilder, QuadSegment};
pub use crate::route::sampler::{
    ArclenSampler, CurveSample, CurveSampler, PolylineSampler, TANGENT_LOOKAHEAD,
};
pub use crate::route::waypoints::{AddOutcome, MAX_WAYPOINTS, WaypointCollector, WaypointRole};
pub use crate::timing::animation::{
    AnimationScheduler, DEFAULT_DURATION, FrameUpdate, RunHandle, progress_at,
};
pub use crate::timing::clock::{Clock, ManualClock, SystemClock};
pub use crate::timing::delay::{ArmedTimers, DelayScheduler, DelayTrigger, FiredTimer, TimerHandle};

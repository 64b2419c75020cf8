use crate::engine::config::EngineConfig;
use crate::engine::decoration::Decoration;
use crate::engine::snapshot::RenderSnapshot;
use crate::engine::state::EngineState;
use crate::foundation::core::{Millis, Point};
use crate::foundation::error::RouteResult;
use crate::route::orientation::normalize;
use crate::route::path::{Curve, PathBuilder};
use crate::route::sampler::{ArclenSampler, CurveSample, CurveSampler};
use crate::route::waypoints::{AddOutcome, WaypointCollector};
use crate::timing::animation::AnimationScheduler;
use crate::timing::clock::{Clock, SystemClock};
use crate::timing::delay::{DelayScheduler, DelayTrigger};

type AuxiliaryCallback = Box<dyn FnMut()>;
type RenderListener = Box<dyn FnMut(&RenderSnapshot)>;

/// Coordinates waypoint collection, delayed starts and the marker run.
///
/// All work happens inside [`add_point`](Self::add_point), [`redo`](Self::redo),
/// [`reset`](Self::reset) and [`tick`](Self::tick), on the caller's thread. The host calls
/// `tick` once per frame while [`needs_frames`](Self::needs_frames) is `true`.
pub struct RouteAnimationEngine {
    config: EngineConfig,
    clock: Box<dyn Clock>,
    sampler: Box<dyn CurveSampler>,
    waypoints: WaypointCollector,
    curve: Option<Curve>,
    state: EngineState,
    progress: f64,
    delays: DelayScheduler,
    animation: AnimationScheduler,
    on_auxiliary: Option<AuxiliaryCallback>,
    on_render: Option<RenderListener>,
}

impl std::fmt::Debug for RouteAnimationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteAnimationEngine")
            .field("config", &self.config)
            .field("waypoints", &self.waypoints.points())
            .field("state", &self.state)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}

impl RouteAnimationEngine {
    /// Engine on the system clock with the arc-length sampler.
    pub fn new(config: EngineConfig) -> RouteResult<Self> {
        Self::with_parts(
            config,
            Box::new(SystemClock::new()),
            Box::new(ArclenSampler::default()),
        )
    }

    /// Engine on an explicit clock and sampler.
    pub fn with_parts(
        config: EngineConfig,
        clock: Box<dyn Clock>,
        sampler: Box<dyn CurveSampler>,
    ) -> RouteResult<Self> {
        config.validate()?;
        Ok(Self {
            waypoints: WaypointCollector::new(config.snap_to_grid),
            config,
            clock,
            sampler,
            curve: None,
            state: EngineState::Idle,
            progress: 0.0,
            delays: DelayScheduler::new(),
            animation: AnimationScheduler::new(),
            on_auxiliary: None,
            on_render: None,
        })
    }

    /// Register the callback run once per armed cycle when the auxiliary delay elapses.
    pub fn on_auxiliary_start(&mut self, callback: impl FnMut() + 'static) {
        self.on_auxiliary = Some(Box::new(callback));
    }

    /// Register the listener that receives a snapshot on every state change and progress frame.
    pub fn on_render(&mut self, listener: impl FnMut(&RenderSnapshot) + 'static) {
        self.on_render = Some(Box::new(listener));
    }

    /// Place the next waypoint. The sixth accepted point arms both delay timers.
    #[tracing::instrument(skip(self))]
    pub fn add_point(&mut self, p: Point) -> AddOutcome {
        let outcome = self.waypoints.add_point(p);
        if !outcome.accepted {
            return outcome;
        }
        self.curve = PathBuilder::build(self.waypoints.points());
        if outcome.complete {
            self.arm();
        } else {
            self.enter(EngineState::collecting(self.waypoints.len()));
        }
        outcome
    }

    /// Replay the run over the same curve. Returns `false` unless the route is complete.
    #[tracing::instrument(skip(self))]
    pub fn redo(&mut self) -> bool {
        if !self.waypoints.is_complete() {
            tracing::debug!(waypoints = self.waypoints.len(), "redo ignored");
            return false;
        }
        self.arm();
        true
    }

    /// Replace the configuration, then [`redo`](Self::redo).
    ///
    /// The configuration is validated and kept even when the route is incomplete.
    pub fn redo_with(&mut self, config: EngineConfig) -> RouteResult<bool> {
        self.set_config(config)?;
        Ok(self.redo())
    }

    /// Replace the configuration without touching pending timers or the active run.
    pub fn set_config(&mut self, config: EngineConfig) -> RouteResult<()> {
        config.validate()?;
        self.waypoints.set_snap_to_grid(config.snap_to_grid);
        self.config = config;
        Ok(())
    }

    /// Cancel everything and keep at most the first waypoint.
    #[tracing::instrument(skip(self))]
    pub fn reset(&mut self) {
        self.cancel_all();
        self.waypoints.reset();
        self.curve = PathBuilder::build(self.waypoints.points());
        self.progress = 0.0;
        self.enter(EngineState::collecting(self.waypoints.len()));
    }

    /// Per-frame driver: fire due timers, then advance the active run.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        for fired in self.delays.poll(now) {
            match fired.trigger {
                DelayTrigger::Auxiliary => {
                    tracing::debug!(deadline_ms = fired.deadline.0, "auxiliary start");
                    if let Some(callback) = self.on_auxiliary.as_mut() {
                        callback();
                    }
                }
                DelayTrigger::Motion => {
                    tracing::debug!(deadline_ms = fired.deadline.0, "motion start");
                    // Measured from the deadline so late frames do not shift the run.
                    self.animation.start(fired.deadline, self.config.duration());
                    self.progress = 0.0;
                    self.enter(EngineState::Running);
                }
            }
        }

        if let Some(update) = self.animation.advance(now) {
            self.progress = update.progress;
            if update.done {
                self.enter(EngineState::Finished);
            } else {
                self.notify();
            }
        }
    }

    /// `true` while a timer is pending or a run is active.
    pub fn needs_frames(&self) -> bool {
        self.delays.has_pending() || self.animation.is_active()
    }

    /// Current state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Current run progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Placed waypoints.
    pub fn waypoints(&self) -> &[Point] {
        self.waypoints.points()
    }

    /// Route curve, once two waypoints exist.
    pub fn curve(&self) -> Option<&Curve> {
        self.curve.as_ref()
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Time on the engine's clock.
    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.delays.next_deadline()
    }

    /// Marker pose and route data for drawing the current frame.
    pub fn current_render(&self) -> RenderSnapshot {
        let total_length = self
            .curve
            .as_ref()
            .map_or(0.0, |c| self.sampler.total_length(c));
        let moving = self.state.is_moving_or_done();
        let sample = self.marker_sample(total_length);
        let orientation = normalize(sample.tangent_angle_deg);
        let travelled = if moving {
            total_length * self.progress
        } else {
            0.0
        };
        let progress = if moving { self.progress } else { 0.0 };

        RenderSnapshot {
            state: self.state,
            progress,
            position: sample.position,
            display_angle: orientation.display_angle,
            flipped: orientation.flipped,
            decoration: Decoration::at(progress, travelled, orientation.flipped),
            curve: self.curve.clone(),
            path_data: self.curve.as_ref().map(Curve::svg_path_data),
            total_length,
            waypoints: self.waypoints.points().to_vec(),
            show_waypoints: !moving,
            prompt: self.waypoints.prompt(),
        }
    }

    fn marker_sample(&self, total_length: f64) -> CurveSample {
        match &self.curve {
            Some(curve) if self.state.is_moving_or_done() => self
                .sampler
                .sample_at(curve, total_length * self.progress),
            Some(curve) => self.sampler.sample_at(curve, 0.0),
            None => CurveSample {
                position: self
                    .waypoints
                    .points()
                    .first()
                    .copied()
                    .unwrap_or(self.config.home),
                tangent_angle_deg: 0.0,
            },
        }
    }

    fn arm(&mut self) {
        self.animation.cancel_all();
        self.progress = 0.0;
        let now = self.clock.now();
        self.delays
            .arm(now, self.config.motion_delay(), self.config.aux_delay());
        self.enter(EngineState::Armed);
    }

    fn cancel_all(&mut self) {
        self.delays.cancel_all();
        self.animation.cancel_all();
    }

    fn enter(&mut self, next: EngineState) {
        if next != self.state {
            tracing::debug!(from = ?self.state, to = ?next, "state transition");
        }
        self.state = next;
        self.notify();
    }

    fn notify(&mut self) {
        if self.on_render.is_none() {
            return;
        }
        let snapshot = self.current_render();
        if let Some(listener) = self.on_render.as_mut() {
            listener(&snapshot);
        }
    }
}

impl Drop for RouteAnimationEngine {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/runtime.rs"]
mod tests;

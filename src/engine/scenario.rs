use std::cell::RefCell;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::rc::Rc;

use crate::engine::config::EngineConfig;
use crate::engine::runtime::RouteAnimationEngine;
use crate::engine::snapshot::RenderSnapshot;
use crate::engine::state::EngineState;
use crate::foundation::core::{Fps, Point};
use crate::foundation::error::{RouteError, RouteResult};
use crate::route::sampler::ArclenSampler;
use crate::route::waypoints::MAX_WAYPOINTS;
use crate::timing::clock::{Clock, ManualClock};

/// A scripted session: configuration, the waypoints placed at `t = 0`, and an optional replay.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Engine configuration.
    #[serde(default)]
    pub config: EngineConfig,
    /// Waypoints in placement order, at most six.
    pub waypoints: Vec<Point>,
    /// Time at which `redo` is signalled, if any.
    #[serde(default)]
    pub redo_at_ms: Option<f64>,
}

/// A state change observed during [`Scenario::simulate`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Transition {
    /// Frame time of the change.
    pub time_ms: f64,
    /// State entered.
    pub state: EngineState,
}

/// One simulated frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TraceFrame {
    /// Frame time.
    pub time_ms: f64,
    /// What the host would draw.
    pub snapshot: RenderSnapshot,
}

/// Output of [`Scenario::simulate`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SimulationTrace {
    /// Frame rate the engine was driven at.
    pub fps: Fps,
    /// State changes in order.
    pub transitions: Vec<Transition>,
    /// Frame times at which the auxiliary callback ran.
    pub auxiliary_ms: Vec<f64>,
    /// Every frame, starting at `t = 0`.
    pub frames: Vec<TraceFrame>,
}

impl SimulationTrace {
    /// First time `state` was entered.
    pub fn entered(&self, state: EngineState) -> Option<f64> {
        self.transitions
            .iter()
            .find(|t| t.state == state)
            .map(|t| t.time_ms)
    }
}

impl Scenario {
    /// Parse a scenario from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> RouteResult<Self> {
        let s: Self = serde_json::from_reader(r)
            .map_err(|e| RouteError::serde(format!("parse scenario JSON: {e}")))?;
        s.validate()?;
        Ok(s)
    }

    /// Parse a scenario from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> RouteResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RouteError::validation(format!("open scenario '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check the configuration, waypoint count and redo time.
    pub fn validate(&self) -> RouteResult<()> {
        self.config.validate()?;
        if self.waypoints.len() > MAX_WAYPOINTS {
            return Err(RouteError::validation(format!(
                "scenario lists {} waypoints, a route holds at most {MAX_WAYPOINTS}",
                self.waypoints.len()
            )));
        }
        if let Some(i) = self.waypoints.iter().position(|p| !p.is_finite()) {
            return Err(RouteError::validation(format!("waypoint {i} is not finite")));
        }
        if let Some(at) = self.redo_at_ms
            && !(at.is_finite() && at >= 0.0)
        {
            return Err(RouteError::validation(format!(
                "redo_at_ms must be finite and >= 0 (got {at})"
            )));
        }
        Ok(())
    }

    /// Drive an engine on a manual clock at `fps` until nothing is pending.
    #[tracing::instrument(skip(self), fields(waypoints = self.waypoints.len()))]
    pub fn simulate(&self, fps: Fps) -> RouteResult<SimulationTrace> {
        self.validate()?;
        let clock = ManualClock::new();
        let mut engine = RouteAnimationEngine::with_parts(
            self.config.clone(),
            Box::new(clock.clone()),
            Box::new(ArclenSampler::default()),
        )?;

        let auxiliary_ms: Rc<RefCell<Vec<f64>>> = Rc::default();
        {
            let sink = auxiliary_ms.clone();
            let clock = clock.clone();
            engine.on_auxiliary_start(move || sink.borrow_mut().push(clock.now().0));
        }

        let mut transitions = vec![Transition {
            time_ms: 0.0,
            state: engine.state(),
        }];
        for p in &self.waypoints {
            engine.add_point(*p);
        }

        let mut frames = Vec::new();
        let mut redo_at = self.redo_at_ms;
        let mut frame = 0u64;
        loop {
            let t = fps.frame_time(frame);
            clock.set(t);
            if redo_at.is_some_and(|at| t.0 >= at) {
                engine.redo();
                redo_at = None;
            }
            engine.tick();

            let state = engine.state();
            if transitions.last().map(|last| last.state) != Some(state) {
                transitions.push(Transition {
                    time_ms: t.0,
                    state,
                });
            }
            frames.push(TraceFrame {
                time_ms: t.0,
                snapshot: engine.current_render(),
            });

            if !engine.needs_frames() && redo_at.is_none() {
                break;
            }
            frame += 1;
        }
        tracing::debug!(frames = frames.len(), "simulation complete");

        let auxiliary_ms = auxiliary_ms.borrow().clone();
        Ok(SimulationTrace {
            fps,
            transitions,
            auxiliary_ms,
            frames,
        })
    }
}

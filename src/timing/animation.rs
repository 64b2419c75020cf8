use crate::foundation::core::Millis;

/// Run length used by the route animation.
pub const DEFAULT_DURATION: Millis = Millis(8000.0);

/// Identifies one animation run. Stale handles are ignored by [`AnimationScheduler::cancel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct RunHandle(u64);

/// Progress reported for one frame of an active run.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FrameUpdate {
    /// Run this update belongs to.
    pub handle: RunHandle,
    /// Fraction of the duration elapsed, in `[0, 1]`.
    pub progress: f64,
    /// `true` on the frame that reached `progress == 1`; the run is no longer scheduled.
    pub done: bool,
}

#[derive(Clone, Copy, Debug)]
struct ActiveRun {
    handle: RunHandle,
    start_time: Millis,
    duration: Millis,
}

/// Time-driven progress from 0 to 1 over a fixed duration, one run at a time.
///
/// The host's frame loop calls [`advance`](Self::advance); a run stays scheduled only while its
/// progress is below 1, and starting a new run drops the previous one first.
#[derive(Debug, Default)]
pub struct AnimationScheduler {
    next_id: u64,
    active: Option<ActiveRun>,
}

impl AnimationScheduler {
    /// Empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a run whose progress is measured from `start_time`.
    pub fn start(&mut self, start_time: Millis, duration: Millis) -> RunHandle {
        if let Some(prev) = self.active.take() {
            tracing::debug!(run = prev.handle.0, "run replaced");
        }
        self.next_id += 1;
        let handle = RunHandle(self.next_id);
        self.active = Some(ActiveRun {
            handle,
            start_time,
            duration,
        });
        tracing::debug!(
            run = handle.0,
            start_ms = start_time.0,
            duration_ms = duration.0,
            "run started"
        );
        handle
    }

    /// Stop `handle`'s run. No-op for finished, canceled or superseded runs.
    pub fn cancel(&mut self, handle: RunHandle) {
        if self.active.is_some_and(|run| run.handle == handle) {
            self.active = None;
            tracing::debug!(run = handle.0, "run canceled");
        }
    }

    /// Stop whatever run is active.
    pub fn cancel_all(&mut self) {
        if let Some(run) = self.active {
            self.cancel(run.handle);
        }
    }

    /// Handle of the active run, if any.
    pub fn active(&self) -> Option<RunHandle> {
        self.active.map(|run| run.handle)
    }

    /// `true` while a run still wants frames.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Per-frame update: progress of the active run at `now`. Returns `None` when idle.
    pub fn advance(&mut self, now: Millis) -> Option<FrameUpdate> {
        let run = self.active?;
        let progress = progress_at(run.start_time, run.duration, now);
        let done = progress >= 1.0;
        if done {
            self.active = None;
            tracing::debug!(run = run.handle.0, "run finished");
        } else {
            tracing::trace!(run = run.handle.0, progress, "frame");
        }
        Some(FrameUpdate {
            handle: run.handle,
            progress,
            done,
        })
    }
}

/// `min(1, elapsed / duration)` with elapsed clamped at zero. A zero duration is complete
/// immediately.
pub fn progress_at(start_time: Millis, duration: Millis, now: Millis) -> f64 {
    let elapsed = now.saturating_since(start_time);
    if duration.0 <= 0.0 {
        return 1.0;
    }
    (elapsed.0 / duration.0).min(1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/timing/animation.rs"]
mod tests;

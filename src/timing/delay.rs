use smallvec::SmallVec;

use crate::foundation::core::Millis;

/// What a delay timer starts when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum DelayTrigger {
    /// Marker motion begins.
    Motion,
    /// Auxiliary content is revealed.
    Auxiliary,
}

/// Identifies one armed timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct TimerHandle(u64);

/// Handles of the timer pair created by one [`DelayScheduler::arm`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArmedTimers {
    /// Motion-start timer.
    pub motion: TimerHandle,
    /// Auxiliary-start timer.
    pub auxiliary: TimerHandle,
}

/// A timer that came due during [`DelayScheduler::poll`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FiredTimer {
    /// Which trigger fired.
    pub trigger: DelayTrigger,
    /// Time the timer was due, which may precede the poll time.
    pub deadline: Millis,
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    handle: TimerHandle,
    trigger: DelayTrigger,
    deadline: Millis,
}

/// Two independent one-shot timers sharing the arming instant as their zero.
///
/// Timers only fire from [`poll`](Self::poll), and canceling removes them, so a canceled timer
/// can never be reported.
#[derive(Debug, Default)]
pub struct DelayScheduler {
    next_id: u64,
    pending: SmallVec<[Pending; 2]>,
}

impl DelayScheduler {
    /// Scheduler with nothing armed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel anything pending, then schedule the motion and auxiliary timers relative to `now`.
    pub fn arm(&mut self, now: Millis, motion_delay: Millis, aux_delay: Millis) -> ArmedTimers {
        self.cancel_all();
        let motion = self.schedule(DelayTrigger::Motion, now + motion_delay);
        let auxiliary = self.schedule(DelayTrigger::Auxiliary, now + aux_delay);
        tracing::debug!(
            now_ms = now.0,
            motion_ms = motion_delay.0,
            aux_ms = aux_delay.0,
            "delay timers armed"
        );
        ArmedTimers { motion, auxiliary }
    }

    fn schedule(&mut self, trigger: DelayTrigger, deadline: Millis) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending.push(Pending {
            handle,
            trigger,
            deadline,
        });
        handle
    }

    /// Cancel one timer. Returns `false` if it already fired or was canceled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }

    /// Cancel every pending timer.
    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            tracing::debug!(count = self.pending.len(), "delay timers canceled");
        }
        self.pending.clear();
    }

    /// `true` if a timer for `trigger` is pending.
    pub fn is_pending(&self, trigger: DelayTrigger) -> bool {
        self.pending.iter().any(|p| p.trigger == trigger)
    }

    /// `true` if any timer is pending.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.pending
            .iter()
            .map(|p| p.deadline)
            .min_by(|a, b| a.0.total_cmp(&b.0))
    }

    /// Remove and return every timer due at `now`, earliest first; on equal deadlines motion
    /// fires before auxiliary.
    pub fn poll(&mut self, now: Millis) -> SmallVec<[FiredTimer; 2]> {
        let mut fired: SmallVec<[Pending; 2]> = SmallVec::new();
        self.pending.retain(|p| {
            if p.deadline <= now {
                fired.push(*p);
                false
            } else {
                true
            }
        });
        fired.sort_by(|a, b| {
            a.deadline
                .0
                .total_cmp(&b.deadline.0)
                .then_with(|| trigger_rank(a.trigger).cmp(&trigger_rank(b.trigger)))
        });
        fired
            .into_iter()
            .map(|p| FiredTimer {
                trigger: p.trigger,
                deadline: p.deadline,
            })
            .collect()
    }
}

fn trigger_rank(t: DelayTrigger) -> u8 {
    match t {
        DelayTrigger::Motion => 0,
        DelayTrigger::Auxiliary => 1,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/delay.rs"]
mod tests;

//! Virtual-time scheduler for timers and per-frame callbacks.
//!
//! The host passes its clock (`performance.now()`) with every event, so the
//! core never reads time itself. Timers fire when `/clock/timer` or
//! `/clock/frame` arrives with a clock at or past their due time; frame tasks
//! run on the next `/clock/frame`. Tests drive the same queue by hand.

use crate::patch::{NodeId, Wake};

pub type TimerId = u64;

/// Deferred work. Each variant is handled by the component that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    PulseEnd { button: usize },
    CycleTick,
    ParticleExpire { node: NodeId },
    StepReveal { card: usize, step: usize },
    ArrowReveal { card: usize, arrow: usize },
    SpecReveal { item: usize },
    DataSparkles { item: usize },
    BodyFadeIn,
    CounterFrame { index: usize },
    StatFrame { index: usize },
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    due: f64,
    task: Task,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: f64,
    next_id: TimerId,
    timers: Vec<Timer>,
    frames: Vec<Task>,
}

impl Scheduler {
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Move the clock forward. Clocks that run backwards are ignored.
    pub fn advance_to(&mut self, now: f64) {
        if now.is_finite() && now > self.now {
            self.now = now;
        }
    }

    /// Schedule `task` to fire `delay_ms` from now.
    pub fn after(&mut self, delay_ms: u32, task: Task) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            due: self.now + f64::from(delay_ms),
            task,
        });
        id
    }

    /// Cancel a pending timer. Returns false if it already fired.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Queue `task` for the next animation frame.
    pub fn next_frame(&mut self, task: Task) {
        self.frames.push(task);
    }

    /// Remove and return the earliest timer that is due, ties broken by
    /// scheduling order.
    pub fn pop_due(&mut self) -> Option<Task> {
        let now = self.now;
        let pos = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)))
            .map(|(i, _)| i)?;
        Some(self.timers.remove(pos).task)
    }

    /// Take every task queued for this frame. Tasks queued while running
    /// them belong to the following frame.
    pub fn take_frame(&mut self) -> Vec<Task> {
        std::mem::take(&mut self.frames)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
        self.frames.clear();
    }

    pub fn wake(&self) -> Wake {
        let next_due = self
            .timers
            .iter()
            .map(|t| t.due)
            .min_by(|a, b| a.total_cmp(b));
        Wake {
            frame: !self.frames.is_empty(),
            timer_ms: next_due.map(|due| (due - self.now).max(0.0)),
        }
    }
}

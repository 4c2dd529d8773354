//! Frame and timer scheduling capability
//!
//! The engine never sleeps and never owns a frame loop. It asks its host for
//! a frame or a timeout and gets back a [`TaskId`]; the host later hands that
//! id to [`ScrollEngine::fire`](crate::ScrollEngine::fire). The engine keeps
//! the id of every task it still wants and ignores anything else, so a
//! cancelled task can never touch engine state even if the host delivers it
//! late.

use super::timing::Clock;

/// Default frame interval, roughly 60 frames per second
pub const DEFAULT_FRAME_INTERVAL_MS: f64 = 16.0;

/// Handle for a scheduled frame or timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u64);

/// Host capability for time, animation frames and timeouts
pub trait Scheduler {
    /// Current time in milliseconds
    fn now(&self) -> f64;

    /// Request a callback on the next animation frame
    fn request_frame(&mut self) -> TaskId;

    /// Request a callback after `delay_ms`
    fn set_timeout(&mut self, delay_ms: f64) -> TaskId;

    /// Cancel a pending frame or timer; unknown ids are ignored
    fn cancel(&mut self, id: TaskId);
}

/// In-process scheduler over any [`Clock`]
///
/// Frames come due one frame interval after they are requested, timers
/// after their delay. The host drains due work with [`TaskQueue::take_due`].
#[derive(Debug)]
pub struct TaskQueue<C: Clock> {
    clock: C,
    frame_interval: f64,
    next_id: u64,
    pending: Vec<(f64, TaskId)>,
}

impl<C: Clock> TaskQueue<C> {
    pub fn new(clock: C) -> Self {
        Self::with_frame_interval(clock, DEFAULT_FRAME_INTERVAL_MS)
    }

    pub fn with_frame_interval(clock: C, frame_interval: f64) -> Self {
        Self {
            clock,
            frame_interval: frame_interval.max(1.0),
            next_id: 0,
            pending: Vec::new(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn frame_interval(&self) -> f64 {
        self.frame_interval
    }

    /// Number of tasks still waiting
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.iter().any(|(_, pending)| *pending == id)
    }

    /// Due time of the earliest pending task
    pub fn next_due(&self) -> Option<f64> {
        self.pending
            .iter()
            .map(|(due, _)| *due)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Remove and return every task due at the current time, earliest first
    pub fn take_due(&mut self) -> Vec<TaskId> {
        let now = self.clock.now();
        let mut due: Vec<(f64, TaskId)> = self
            .pending
            .iter()
            .copied()
            .filter(|(when, _)| *when <= now)
            .collect();
        self.pending.retain(|(when, _)| *when > now);
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        due.into_iter().map(|(_, id)| id).collect()
    }

    fn schedule(&mut self, delay: f64) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        let due = self.clock.now() + delay.max(0.0);
        self.pending.push((due, id));
        id
    }
}

impl<C: Clock> Scheduler for TaskQueue<C> {
    fn now(&self) -> f64 {
        self.clock.now()
    }

    fn request_frame(&mut self) -> TaskId {
        let interval = self.frame_interval;
        self.schedule(interval)
    }

    fn set_timeout(&mut self, delay_ms: f64) -> TaskId {
        self.schedule(delay_ms)
    }

    fn cancel(&mut self, id: TaskId) {
        self.pending.retain(|(_, pending)| *pending != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::timing::ManualClock;

    #[test]
    fn test_tasks_come_due_in_order() {
        let clock = ManualClock::new(0.0);
        let mut queue = TaskQueue::new(clock.clone());

        let timer = queue.set_timeout(40.0);
        let frame = queue.request_frame();
        assert!(queue.take_due().is_empty());

        clock.advance(16.0);
        assert_eq!(queue.take_due(), vec![frame]);

        clock.advance(30.0);
        assert_eq!(queue.take_due(), vec![timer]);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_cancelled_task_never_fires() {
        let clock = ManualClock::new(0.0);
        let mut queue = TaskQueue::new(clock.clone());

        let timer = queue.set_timeout(10.0);
        queue.cancel(timer);
        clock.advance(100.0);
        assert!(queue.take_due().is_empty());
        assert!(!queue.is_pending(timer));
    }

    #[test]
    fn test_next_due() {
        let clock = ManualClock::new(5.0);
        let mut queue = TaskQueue::with_frame_interval(clock, 10.0);
        assert!(queue.next_due().is_none());
        queue.set_timeout(100.0);
        queue.request_frame();
        assert_eq!(queue.next_due(), Some(15.0));
    }
}

//! L3 Molecular Layer: Frame-paced tween driver
//!
//! Combines easing and timing atoms into a cancellable tween. At most one
//! tween is live; starting another replaces it outright. The driver only
//! computes positions. The engine pushes them through the sync bridge, so
//! the driver never holds a copy of the scroll position.

use super::easing::Easing;
use super::scheduler::{Scheduler, TaskId};
use super::timing::{lerp, progress};

/// One in-flight tween
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTask {
    pub start_x: f64,
    pub start_y: f64,
    pub dest_x: f64,
    pub dest_y: f64,
    pub start_time: f64,
    pub duration: f64,
    pub easing: Easing,
}

impl AnimationTask {
    pub fn dest_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Eased position at `now`
    pub fn sample(&self, now: f64) -> (f64, f64) {
        let eased = self
            .easing
            .apply(progress(self.start_time, self.duration, now));
        (
            lerp(self.start_x, self.dest_x, eased),
            lerp(self.start_y, self.dest_y, eased),
        )
    }
}

/// Result of advancing the tween by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Intermediate position; another frame is needed
    Frame { x: f64, y: f64 },
    /// Final position, exactly the destination; the tween is gone
    Done { x: f64, y: f64 },
}

/// Owner of the single live tween and its pending frame
#[derive(Debug, Default)]
pub struct AnimationDriver {
    task: Option<AnimationTask>,
    frame: Option<TaskId>,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }

    pub fn task(&self) -> Option<&AnimationTask> {
        self.task.as_ref()
    }

    /// Install a new tween, cancelling whatever was running
    pub fn start<S: Scheduler + ?Sized>(&mut self, task: AnimationTask, scheduler: &mut S) {
        self.cancel(scheduler);
        self.task = Some(task);
    }

    /// Drop the live tween and its frame; returns whether one was running
    pub fn cancel<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        if let Some(frame) = self.frame.take() {
            scheduler.cancel(frame);
        }
        self.task.take().is_some()
    }

    /// Ask the host for the next frame
    pub fn request_frame<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(old) = self.frame.take() {
            scheduler.cancel(old);
        }
        if self.task.is_some() {
            self.frame = Some(scheduler.request_frame());
        }
    }

    /// Claim a fired frame; false for frames this driver no longer wants
    pub fn claim_frame(&mut self, id: TaskId) -> bool {
        if self.frame == Some(id) {
            self.frame = None;
            true
        } else {
            false
        }
    }

    /// Advance the tween to `now`
    ///
    /// Once `now` reaches the destination time the exact destination is
    /// returned, avoiding accumulated floating-point drift.
    pub fn step(&mut self, now: f64) -> Option<Step> {
        let task = self.task?;
        if now >= task.dest_time() {
            self.task = None;
            return Some(Step::Done {
                x: task.dest_x,
                y: task.dest_y,
            });
        }
        let (x, y) = task.sample(now);
        Some(Step::Frame { x, y })
    }
}

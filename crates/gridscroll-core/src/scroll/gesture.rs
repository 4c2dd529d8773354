//! L3 Molecular Layer: Press-move-release gesture bookkeeping
//!
//! A [`GestureSession`] exists from an accepted press until release or
//! cancel. It tracks raw pointer coordinates, cumulative distance, the
//! momentum window and the per-gesture direction lock. Position itself is
//! never stored here.

use crate::config::EventPassthrough;
use crate::input::PointerKind;

/// Movement below this many pixels (on both axes) right after a rest is
/// treated as jitter
pub const JITTER_THRESHOLD_PX: f64 = 10.0;

/// How long after the previous gesture ended jitter filtering applies
pub const JITTER_WINDOW_MS: f64 = 300.0;

/// Flicks are shorter than this
pub const FLICK_MAX_DURATION_MS: f64 = 200.0;

/// Flicks travel less than this on both axes
pub const FLICK_MAX_DISTANCE_PX: f64 = 100.0;

/// Per-gesture axis restriction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectionLock {
    #[default]
    Undecided,
    Horizontal,
    Vertical,
    Unlocked,
}

/// Decide the lock from cumulative absolute distances
pub fn lock_direction(abs_x: f64, abs_y: f64, threshold: f64) -> DirectionLock {
    if abs_x > abs_y + threshold {
        DirectionLock::Horizontal
    } else if abs_y >= abs_x + threshold {
        DirectionLock::Vertical
    } else {
        DirectionLock::Unlocked
    }
}

/// What a locked gesture does with a raw delta
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LockedDelta {
    /// Apply these deltas; `capture` means the host's default action for
    /// the passthrough axis must be suppressed
    Move { dx: f64, dy: f64, capture: bool },
    /// The gesture runs along a passthrough axis; hand it back to the host
    Abort,
}

/// Restrict a delta to the locked axis, honouring event passthrough
pub fn apply_lock(
    lock: DirectionLock,
    passthrough: EventPassthrough,
    dx: f64,
    dy: f64,
) -> LockedDelta {
    match lock {
        DirectionLock::Horizontal => match passthrough {
            EventPassthrough::Horizontal => LockedDelta::Abort,
            EventPassthrough::Vertical => LockedDelta::Move {
                dx,
                dy: 0.0,
                capture: true,
            },
            EventPassthrough::None => LockedDelta::Move {
                dx,
                dy: 0.0,
                capture: false,
            },
        },
        DirectionLock::Vertical => match passthrough {
            EventPassthrough::Vertical => LockedDelta::Abort,
            EventPassthrough::Horizontal => LockedDelta::Move {
                dx: 0.0,
                dy,
                capture: true,
            },
            EventPassthrough::None => LockedDelta::Move {
                dx: 0.0,
                dy,
                capture: false,
            },
        },
        DirectionLock::Undecided | DirectionLock::Unlocked => LockedDelta::Move {
            dx,
            dy,
            capture: false,
        },
    }
}

/// Whether a finished gesture counts as a flick
pub fn is_flick(duration: f64, distance_x: f64, distance_y: f64) -> bool {
    duration < FLICK_MAX_DURATION_MS
        && distance_x < FLICK_MAX_DISTANCE_PX
        && distance_y < FLICK_MAX_DISTANCE_PX
}

/// Measurements taken at release
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    /// Milliseconds since the start of the momentum window
    pub duration: f64,
    /// Absolute distance covered in the momentum window
    pub distance_x: f64,
    pub distance_y: f64,
}

/// State of one live gesture
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSession {
    pub kind: PointerKind,
    pub start_x: f64,
    pub start_y: f64,
    pub start_time: f64,
    pub point_x: f64,
    pub point_y: f64,
    pub dist_x: f64,
    pub dist_y: f64,
    pub direction_lock: DirectionLock,
    pub moved: bool,
}

impl GestureSession {
    /// Open a session at scroll position `(x, y)` with the pointer at
    /// `(point_x, point_y)`
    pub fn begin(kind: PointerKind, x: f64, y: f64, point_x: f64, point_y: f64, now: f64) -> Self {
        Self {
            kind,
            start_x: x,
            start_y: y,
            start_time: now,
            point_x,
            point_y,
            dist_x: 0.0,
            dist_y: 0.0,
            direction_lock: DirectionLock::Undecided,
            moved: false,
        }
    }

    /// Record a pointer sample and return the raw delta since the last one
    pub fn track(&mut self, point_x: f64, point_y: f64) -> (f64, f64) {
        let dx = point_x - self.point_x;
        let dy = point_y - self.point_y;
        self.point_x = point_x;
        self.point_y = point_y;
        self.dist_x += dx;
        self.dist_y += dy;
        (dx, dy)
    }

    /// Still inside the jitter dead zone after a recent stop
    pub fn is_jitter(&self, now: f64, last_end_time: f64) -> bool {
        now - last_end_time > JITTER_WINDOW_MS
            && self.dist_x.abs() < JITTER_THRESHOLD_PX
            && self.dist_y.abs() < JITTER_THRESHOLD_PX
    }

    /// Decide the direction lock once; later calls return the stored lock
    ///
    /// With free scrolling the lock is never decided.
    pub fn decide_lock(&mut self, threshold: f64, free_scroll: bool) -> DirectionLock {
        if self.direction_lock == DirectionLock::Undecided && !free_scroll {
            self.direction_lock = lock_direction(self.dist_x.abs(), self.dist_y.abs(), threshold);
        }
        self.direction_lock
    }

    /// Slide the momentum window forward once the user has held for too long
    ///
    /// Returns true when the window restarted.
    pub fn refresh_window(&mut self, now: f64, x: f64, y: f64, window: f64) -> bool {
        if now - self.start_time > window {
            self.start_time = now;
            self.start_x = x;
            self.start_y = y;
            true
        } else {
            false
        }
    }

    /// Measure the gesture against its release position
    pub fn release(&self, now: f64, x: f64, y: f64) -> Release {
        Release {
            duration: now - self.start_time,
            distance_x: (x - self.start_x).abs(),
            distance_y: (y - self.start_y).abs(),
        }
    }
}

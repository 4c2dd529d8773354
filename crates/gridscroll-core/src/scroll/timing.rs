//! L4 Atomic Layer: Time sources and interpolation for scroll tweens
//!
//! All engine timestamps are milliseconds as `f64`, measured from an
//! arbitrary origin chosen by the clock.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic millisecond time source
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall clock backed by `Instant`, origin at construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock for tests and replays
///
/// Clones share the same time, so a test can keep one handle while the
/// engine's scheduler owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, now: f64) {
        self.now.set(now);
    }

    pub fn advance(&self, delta: f64) {
        self.now.set(self.now.get() + delta);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

/// Calculate tween progress (0.0 to 1.0)
///
/// A zero or negative duration counts as already complete.
#[inline]
pub fn progress(start: f64, duration: f64, now: f64) -> f64 {
    if duration <= 0.0 {
        return 1.0;
    }
    ((now - start) / duration).clamp(0.0, 1.0)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, -100.0, 0.5) + 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_progress() {
        assert!((progress(100.0, 200.0, 200.0) - 0.5).abs() < 0.001);
        assert!((progress(100.0, 200.0, 50.0) - 0.0).abs() < 0.001);
        assert!((progress(100.0, 200.0, 900.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_zero_duration() {
        assert!((progress(0.0, 0.0, 0.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_manual_clock_is_shared() {
        let clock = ManualClock::new(10.0);
        let other = clock.clone();
        clock.advance(5.0);
        assert!((other.now() - 15.0).abs() < f64::EPSILON);
        other.set(100.0);
        assert!((clock.now() - 100.0).abs() < f64::EPSILON);
    }
}

//! L4 Atomic Layer: Release momentum
//!
//! Constant-deceleration model: a release at speed `v` travels `v² / 2d`
//! and takes `v / d` milliseconds to stop.

use serde::Serialize;

/// Default deceleration in px/ms²
pub const DEFAULT_DECELERATION: f64 = 0.0006;

/// Gestures slower than this (ms from the last rest point) get no momentum
pub const MOMENTUM_WINDOW_MS: f64 = 300.0;

/// Outcome of a momentum calculation for one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Momentum {
    pub destination: f64,
    pub duration: f64,
}

/// Compute where a release coasts to and how long the coast takes
///
/// # Arguments
/// * `current` - Position at release
/// * `start` - Position at the start of the momentum window
/// * `time` - Milliseconds between `start` and release
/// * `lower` / `upper` - Legal range for the destination
/// * `deceleration` - Deceleration in px/ms²
///
/// A destination past either bound is clamped to it, and the duration is
/// shortened to the time needed to cover the clamped distance at release
/// speed.
pub fn momentum(
    current: f64,
    start: f64,
    time: f64,
    lower: f64,
    upper: f64,
    deceleration: f64,
) -> Momentum {
    let distance = current - start;
    let time = time.max(1.0);
    let deceleration = if deceleration > 0.0 {
        deceleration
    } else {
        DEFAULT_DECELERATION
    };
    let speed = distance.abs() / time;

    if speed == 0.0 {
        return Momentum {
            destination: current.round(),
            duration: 0.0,
        };
    }

    let sign = if distance < 0.0 { -1.0 } else { 1.0 };
    let mut destination = current + (speed * speed) / (2.0 * deceleration) * sign;
    let mut duration = speed / deceleration;

    if destination < lower {
        destination = lower;
        duration = (destination - current).abs() / speed;
    } else if destination > upper {
        destination = upper;
        duration = (destination - current).abs() / speed;
    }

    Momentum {
        destination: destination.round(),
        duration,
    }
}

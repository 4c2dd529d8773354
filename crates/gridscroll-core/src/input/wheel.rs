//! Wheel delta normalization
//!
//! Hosts report wheel motion in several historical encodings. Each one is
//! folded into a single delta in scroll units, where a positive value moves
//! the content back toward its start.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::EventTarget;
use crate::config::MouseWheelConfig;
use crate::scroll::state::Direction;

/// `delta_mode` value for line-based deltas
pub const DELTA_MODE_LINE: u32 = 1;

/// Legacy `wheelDelta` units per notch
const WHEEL_DELTA_NOTCH: f64 = 120.0;

/// Legacy `detail` units per notch
const DETAIL_NOTCH: f64 = 3.0;

/// A wheel event as the host reported it; absent fields stay `None`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawWheelEvent {
    #[serde(default)]
    pub delta_x: Option<f64>,
    #[serde(default)]
    pub delta_y: Option<f64>,
    #[serde(default)]
    pub delta_mode: Option<u32>,
    #[serde(default)]
    pub wheel_delta_x: Option<f64>,
    #[serde(default)]
    pub wheel_delta_y: Option<f64>,
    #[serde(default)]
    pub wheel_delta: Option<f64>,
    #[serde(default)]
    pub detail: Option<f64>,
    #[serde(default)]
    pub target: EventTarget,
}

impl RawWheelEvent {
    /// Standard pixel or line deltas
    pub fn deltas(delta_x: f64, delta_y: f64, delta_mode: u32) -> Self {
        Self {
            delta_x: Some(delta_x),
            delta_y: Some(delta_y),
            delta_mode: Some(delta_mode),
            ..Default::default()
        }
    }
}

/// Normalized wheel movement
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelDelta {
    pub x: f64,
    pub y: f64,
    pub direction_x: Direction,
    pub direction_y: Direction,
}

/// Fold a raw wheel event into scroll units
///
/// Returns `None` when the event carries none of the known encodings.
/// Horizontal deltas are dropped when the content cannot scroll
/// horizontally, and vertical ones when it cannot scroll vertically.
pub fn normalize_wheel(
    event: &RawWheelEvent,
    options: &MouseWheelConfig,
    has_horizontal_scroll: bool,
    has_vertical_scroll: bool,
) -> Option<WheelDelta> {
    let speed = options.speed;
    let (mut x, mut y) = if event.delta_x.is_some() || event.delta_y.is_some() {
        let dx = -event.delta_x.unwrap_or(0.0);
        let dy = -event.delta_y.unwrap_or(0.0);
        if event.delta_mode == Some(DELTA_MODE_LINE) {
            (dx * speed, dy * speed)
        } else {
            (dx, dy)
        }
    } else if event.wheel_delta_x.is_some() || event.wheel_delta_y.is_some() {
        (
            event.wheel_delta_x.unwrap_or(0.0) / WHEEL_DELTA_NOTCH * speed,
            event.wheel_delta_y.unwrap_or(0.0) / WHEEL_DELTA_NOTCH * speed,
        )
    } else if let Some(delta) = event.wheel_delta {
        let d = delta / WHEEL_DELTA_NOTCH * speed;
        (d, d)
    } else if let Some(detail) = event.detail {
        let d = -detail / DETAIL_NOTCH * speed;
        (d, d)
    } else {
        return None;
    };

    let sign = if options.invert { -1.0 } else { 1.0 };
    x *= sign * options.horizontal_factor;
    y *= sign;

    if !has_horizontal_scroll {
        x = 0.0;
    }
    if !has_vertical_scroll {
        y = 0.0;
    }

    Some(WheelDelta {
        x,
        y,
        direction_x: Direction::of_delta(x),
        direction_y: Direction::of_delta(y),
    })
}

/// Deltas held back while wheel moves are throttled
#[derive(Debug, Clone, Default)]
pub struct WheelAccumulator {
    pending: VecDeque<(f64, f64)>,
}

impl WheelAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, delta: &WheelDelta) {
        self.pending.push_back((delta.x, delta.y));
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Sum and remove every held delta
    pub fn drain(&mut self) -> (f64, f64) {
        self.pending
            .drain(..)
            .fold((0.0, 0.0), |(ax, ay), (x, y)| (ax + x, ay + y))
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

//! L4 Atomic Layer: Boundary policy
//!
//! Legal offsets on an axis lie in `[max_scroll, 0]`. Drag and wheel input
//! may push past that range when bouncing is enabled; after release the
//! engine asks [`snap_target`] where to spring back to.

use super::state::{Axis, ScrollState};

/// Hard-clamp one axis into `[max_scroll, 0]`
#[inline]
pub fn clamp_axis(pos: f64, max_scroll: f64) -> f64 {
    if pos > 0.0 {
        0.0
    } else if pos < max_scroll {
        max_scroll
    } else {
        pos
    }
}

#[inline]
pub fn axis_out_of_bounds(pos: f64, max_scroll: f64) -> bool {
    pos > 0.0 || pos < max_scroll
}

/// Clamp a candidate position into the state's extents
pub fn clamp(state: &ScrollState, x: f64, y: f64) -> (f64, f64) {
    (
        clamp_axis(x, state.max_scroll_x),
        clamp_axis(y, state.max_scroll_y),
    )
}

pub fn is_out_of_bounds(state: &ScrollState, x: f64, y: f64) -> bool {
    axis_out_of_bounds(x, state.max_scroll_x) || axis_out_of_bounds(y, state.max_scroll_y)
}

/// Where the current position must settle, or `None` if it already is legal
///
/// An axis without scrollable content always settles at 0.
pub fn snap_target(state: &ScrollState) -> Option<(f64, f64)> {
    let settle = |pos: f64, axis: Axis| {
        if state.has_scroll(axis) {
            clamp_axis(pos, state.max_scroll(axis))
        } else {
            0.0
        }
    };
    let x = settle(state.x, Axis::Horizontal);
    let y = settle(state.y, Axis::Vertical);

    if x == state.x && y == state.y {
        None
    } else {
        Some((x, y))
    }
}

/// Apply `delta` to `current`, slowing down past the edges
///
/// Inside the range the delta applies in full. Past an edge the move is
/// scaled by `factor` when `bounce` is on, otherwise the result is clamped.
pub fn damp(current: f64, delta: f64, max_scroll: f64, factor: f64, bounce: bool) -> f64 {
    let next = current + delta;
    if !axis_out_of_bounds(next, max_scroll) {
        return next;
    }
    if bounce {
        current + delta * factor
    } else {
        clamp_axis(next, max_scroll)
    }
}

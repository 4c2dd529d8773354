//! L4 Atomic Layer: Authoritative scroll state
//!
//! Offsets are non-positive: `0` is the start of the content and the
//! scroller moves toward `max_scroll_*` as the user scrolls right or down.

use serde::{Deserialize, Serialize};

/// Last movement direction on one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Moving toward the start of the content
    Negative,
    #[default]
    Default,
    /// Moving toward the end of the content
    Positive,
}

impl Direction {
    /// Direction implied by an offset delta
    ///
    /// A positive delta pulls the content back toward the start, so it
    /// reads as `Negative` movement.
    pub fn of_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Direction::Negative
        } else if delta < 0.0 {
            Direction::Positive
        } else {
            Direction::Default
        }
    }
}

/// A scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Scroll position, extents and flags for one engine instance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrollState {
    pub x: f64,
    pub y: f64,
    pub direction_x: Direction,
    pub direction_y: Direction,
    pub max_scroll_x: f64,
    pub max_scroll_y: f64,
    pub has_horizontal_scroll: bool,
    pub has_vertical_scroll: bool,
    pub enabled: bool,
    pub is_animating: bool,
    /// Visible size per axis, kept for page-wise keyboard movement and centring
    pub wrapper_width: f64,
    pub wrapper_height: f64,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            direction_x: Direction::Default,
            direction_y: Direction::Default,
            max_scroll_x: 0.0,
            max_scroll_y: 0.0,
            has_horizontal_scroll: false,
            has_vertical_scroll: false,
            enabled: true,
            is_animating: false,
            wrapper_width: 0.0,
            wrapper_height: 0.0,
        }
    }
}

impl ScrollState {
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn max_scroll(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.max_scroll_x,
            Axis::Vertical => self.max_scroll_y,
        }
    }

    pub fn has_scroll(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.has_horizontal_scroll,
            Axis::Vertical => self.has_vertical_scroll,
        }
    }

    pub fn set_directions(&mut self, x: Direction, y: Direction) {
        self.direction_x = x;
        self.direction_y = y;
    }

    /// Recompute extents from viewport and content sizes
    ///
    /// Axes that are disabled or whose content fits are pinned to a zero
    /// extent.
    pub fn apply_geometry(&mut self, extents: Extents, scroll_x: bool, scroll_y: bool) {
        self.wrapper_width = extents.viewport_width;
        self.wrapper_height = extents.viewport_height;

        self.max_scroll_x = extents.viewport_width - extents.content_width;
        self.max_scroll_y = extents.viewport_height - extents.content_height;

        self.has_horizontal_scroll = scroll_x && self.max_scroll_x < 0.0;
        self.has_vertical_scroll = scroll_y && self.max_scroll_y < 0.0;

        if !self.has_horizontal_scroll {
            self.max_scroll_x = 0.0;
        }
        if !self.has_vertical_scroll {
            self.max_scroll_y = 0.0;
        }
    }
}

/// Content and visible sizes reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Extents {
    pub content_width: f64,
    pub content_height: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

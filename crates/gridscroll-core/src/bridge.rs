//! Scroll-sync bridge
//!
//! The bridge owns the [`ScrollState`] and is the only place the position
//! changes. Every change is pushed to all attached viewports in the same
//! call, so the header, body and proxy scrollbar never disagree.

use std::fmt;

use tracing::trace;

use crate::scroll::state::{Direction, Extents, ScrollState};

/// Which dependent view a viewport handle drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportRole {
    Header,
    Body,
    ProxyScrollbar,
}

/// A view whose visual offset follows the engine
///
/// `left` is positive-going (a `scrollLeft`-style offset); `top` is passed
/// through unchanged.
pub trait Viewport {
    fn set_offset(&mut self, left: f64, top: f64);
}

impl<F: FnMut(f64, f64)> Viewport for F {
    fn set_offset(&mut self, left: f64, top: f64) {
        self(left, top)
    }
}

pub struct SyncBridge {
    state: ScrollState,
    viewports: Vec<(ViewportRole, Box<dyn Viewport>)>,
}

impl SyncBridge {
    pub fn new(state: ScrollState) -> Self {
        Self {
            state,
            viewports: Vec::new(),
        }
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    /// Register a viewport and bring it to the current position
    pub fn attach(&mut self, role: ViewportRole, mut viewport: Box<dyn Viewport>) {
        let (left, top) = external(self.state.x, self.state.y);
        viewport.set_offset(left, top);
        self.viewports.push((role, viewport));
    }

    /// Remove every viewport with `role`; returns how many were removed
    pub fn detach(&mut self, role: ViewportRole) -> usize {
        let before = self.viewports.len();
        self.viewports.retain(|(r, _)| *r != role);
        before - self.viewports.len()
    }

    pub fn detach_all(&mut self) {
        self.viewports.clear();
    }

    pub fn viewport_count(&self) -> usize {
        self.viewports.len()
    }

    /// Move to `(x, y)` and broadcast to every viewport
    pub fn translate(&mut self, x: f64, y: f64) {
        self.state.x = x;
        self.state.y = y;
        let (left, top) = external(x, y);
        trace!(x, y, viewports = self.viewports.len(), "translate");
        for (_, viewport) in self.viewports.iter_mut() {
            viewport.set_offset(left, top);
        }
    }

    /// Whether a position reported by the proxy scrollbar is new
    ///
    /// The scrollbar echoes every broadcast back as a native scroll event;
    /// echoes match the floored external offset and must not be forwarded.
    pub fn is_proxy_echo(&self, scroll_left: f64) -> bool {
        scroll_left == (-self.state.x).floor()
    }

    pub fn apply_geometry(&mut self, extents: Extents, scroll_x: bool, scroll_y: bool) {
        self.state.apply_geometry(extents, scroll_x, scroll_y);
    }

    pub fn set_directions(&mut self, x: Direction, y: Direction) {
        self.state.set_directions(x, y);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.state.enabled = enabled;
    }

    pub fn set_animating(&mut self, animating: bool) {
        self.state.is_animating = animating;
    }
}

impl fmt::Debug for SyncBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncBridge")
            .field("state", &self.state)
            .field(
                "viewports",
                &self.viewports.iter().map(|(role, _)| role).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Internal offsets to viewport convention
#[inline]
fn external(x: f64, y: f64) -> (f64, f64) {
    (-x, y)
}

//! Collaborators supplied by the host renderer

use serde::{Deserialize, Serialize};

use crate::scroll::state::Extents;

/// Bounding box of a scroll target in content coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TargetRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Viewport geometry query
pub trait ViewportGeometry {
    /// Current content and visible sizes
    fn extents(&self) -> Extents;

    /// Locate a named target; `None` if it does not exist
    fn target_rect(&self, _target: &str) -> Option<TargetRect> {
        None
    }
}

/// Fixed geometry with no named targets
impl ViewportGeometry for Extents {
    fn extents(&self) -> Extents {
        *self
    }
}

/// Device capability query used to gate drag input
pub trait PointerCapability {
    /// Primary input is coarse (a finger rather than a mouse)
    fn is_coarse_pointer(&self) -> bool;
}

/// Offset applied when scrolling a target into view
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOffset {
    Pixels(f64),
    /// Centre the target in the viewport
    Center,
    #[default]
    None,
}

impl TargetOffset {
    /// Offset in pixels for a target of `size` in a viewport of `viewport`
    pub fn resolve(&self, size: f64, viewport: f64) -> f64 {
        match self {
            TargetOffset::Pixels(px) => *px,
            TargetOffset::Center => (size / 2.0 - viewport / 2.0).round(),
            TargetOffset::None => 0.0,
        }
    }
}

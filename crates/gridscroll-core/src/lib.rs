pub mod bridge;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod host;
pub mod input;
pub mod replay;
pub mod scroll;

pub use bridge::{SyncBridge, Viewport, ViewportRole};
pub use config::{AppConfig, EventPassthrough, MouseWheelConfig, ProbeLevel, ScrollOptions};
pub use engine::ScrollEngine;
pub use error::{Error, Result};
pub use events::{EventKind, ListenerId, ScrollEvent};
pub use host::{PointerCapability, TargetOffset, TargetRect, ViewportGeometry};
pub use input::{Disposition, InputEvent, PointerKind};
pub use scroll::{Easing, Extents, ManualClock, ScrollState, SystemClock, TaskId, TaskQueue};

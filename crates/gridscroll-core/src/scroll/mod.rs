//! Scroll physics for the gridscroll engine
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing functions (quadratic, circular, back, bounce, ...)
//! - `timing` - Clocks, tween progress and interpolation
//! - `state` - The authoritative `ScrollState` record
//! - `boundary` - Clamping, snap-back targets and edge damping
//! - `momentum` - Release velocity to coast destination and duration
//! - `scheduler` - Frame/timer capability injected by the host
//!
//! ## L3 Molecular Layer
//! - `animation` - Cancellable tween driver combining the atoms
//! - `gesture` - Press-move-release session with direction locking
//!
//! The engine facade in [`crate::engine`] wires these together; nothing in
//! this module mutates scroll position on its own.

// L4 Atomic Layer
pub mod boundary;
pub mod easing;
pub mod momentum;
pub mod scheduler;
pub mod state;
pub mod timing;

// L3 Molecular Layer
pub mod animation;
pub mod gesture;

// Re-exports for convenient access
pub use animation::{AnimationDriver, AnimationTask, Step};
pub use easing::{EaseFn, Easing};
pub use gesture::{DirectionLock, GestureSession};
pub use momentum::{momentum, Momentum};
pub use scheduler::{Scheduler, TaskId, TaskQueue};
pub use state::{Axis, Direction, Extents, ScrollState};
pub use timing::{Clock, ManualClock, SystemClock};

//! Keyboard navigation keys and repeat acceleration

use crate::scroll::state::Axis;

/// Acceleration added per fast repeat
pub const KEY_ACCELERATION_STEP: f64 = 0.25;

/// Upper bound for key acceleration
pub const MAX_KEY_ACCELERATION: f64 = 50.0;

/// Presses closer together than this count as a repeat
pub const KEY_REPEAT_WINDOW_MS: f64 = 200.0;

/// Duration of the tween started by a key press
pub const KEY_SCROLL_DURATION_MS: f64 = 120.0;

/// Navigation key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    PageUp,
    PageDown,
    End,
    Home,
    Left,
    Up,
    Right,
    Down,
}

impl Key {
    /// Axis moved by an arrow key; paging and jumps have none
    pub fn axis(&self) -> Option<Axis> {
        match self {
            Key::Left | Key::Right => Some(Axis::Horizontal),
            Key::Up | Key::Down => Some(Axis::Vertical),
            _ => None,
        }
    }
}

/// Repeat acceleration for arrow keys
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyAcceleration {
    value: f64,
    last_press: Option<f64>,
}

impl KeyAcceleration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Register a press at `now` and return the acceleration to apply
    pub fn press(&mut self, now: f64) -> f64 {
        self.value = match self.last_press {
            Some(last) if now - last < KEY_REPEAT_WINDOW_MS => {
                (self.value + KEY_ACCELERATION_STEP).min(MAX_KEY_ACCELERATION)
            }
            _ => 0.0,
        };
        self.last_press = Some(now);
        self.value
    }

    /// Drop accumulated acceleration (the move hit an edge)
    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

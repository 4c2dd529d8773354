//! Platform-neutral input model
//!
//! Adapters translate host events (terminal, browser, test scripts) into
//! [`InputEvent`]s. The engine answers each one with a [`Disposition`]
//! telling the adapter whether to suppress the host's default action.

pub mod keyboard;
pub mod wheel;

use serde::{Deserialize, Serialize};

pub use keyboard::{Key, KeyAcceleration};
pub use wheel::{normalize_wheel, RawWheelEvent, WheelAccumulator, WheelDelta};

/// Source family of a drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Touch,
    Pointer,
    Mouse,
}

/// Element an event was dispatched to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTarget {
    #[serde(default)]
    pub tag_name: String,
    #[serde(default)]
    pub class_name: String,
}

impl EventTarget {
    pub fn tag(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            class_name: String::new(),
        }
    }
}

/// One raw input event, already stripped of host specifics
///
/// Coordinates are page coordinates in logical pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Press {
        kind: PointerKind,
        x: f64,
        y: f64,
        #[serde(default)]
        button: u8,
        #[serde(default)]
        target: EventTarget,
    },
    Move {
        kind: PointerKind,
        x: f64,
        y: f64,
    },
    Release {
        kind: PointerKind,
        #[serde(default)]
        target: EventTarget,
    },
    Cancel {
        kind: PointerKind,
    },
    Wheel(RawWheelEvent),
    Key {
        code: u32,
    },
    /// Window resize or orientation change
    Resize,
}

/// What the adapter should do with the host event after the engine saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Disposition {
    /// The engine acted on the event
    pub handled: bool,
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl Disposition {
    pub const IGNORED: Disposition = Disposition {
        handled: false,
        prevent_default: false,
        stop_propagation: false,
    };

    pub fn handled(prevent_default: bool, stop_propagation: bool) -> Self {
        Self {
            handled: true,
            prevent_default,
            stop_propagation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_event_json_shape() {
        let event: InputEvent =
            serde_json::from_str(r#"{"type":"press","kind":"touch","x":10,"y":20}"#).unwrap();
        assert_eq!(
            event,
            InputEvent::Press {
                kind: PointerKind::Touch,
                x: 10.0,
                y: 20.0,
                button: 0,
                target: EventTarget::default(),
            }
        );

        let event: InputEvent =
            serde_json::from_str(r#"{"type":"wheel","delta_y":100,"delta_mode":0}"#).unwrap();
        match event {
            InputEvent::Wheel(raw) => {
                assert_eq!(raw.delta_y, Some(100.0));
                assert_eq!(raw.delta_x, None);
            }
            other => panic!("unexpected event {:?}", other),
        }

        let event: InputEvent = serde_json::from_str(r#"{"type":"resize"}"#).unwrap();
        assert_eq!(event, InputEvent::Resize);
    }
}

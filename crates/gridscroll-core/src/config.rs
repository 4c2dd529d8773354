use std::fmt;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::input::{EventTarget, Key};
use crate::scroll::easing::Easing;
use crate::scroll::momentum::DEFAULT_DECELERATION;

/// Wheel ease times below this fire a scroll end on nearly every wheel tick
pub const SAFE_EASE_TIME_MS: f64 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Engine options; the table preset when the section is missing
    #[serde(default = "ScrollOptions::virtual_table")]
    pub scroll: ScrollOptions,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scroll: ScrollOptions::virtual_table(),
            ui: UiConfig::default(),
        }
    }
}

/// Engine options
///
/// Field names follow the engine's option vocabulary in snake case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollOptions {
    #[serde(default)]
    pub scroll_x: bool,
    #[serde(default = "default_true")]
    pub scroll_y: bool,
    #[serde(default)]
    pub start_x: f64,
    #[serde(default)]
    pub start_y: f64,
    /// Scroll both axes at once instead of locking to one
    #[serde(default)]
    pub free_scroll: bool,
    #[serde(default = "default_true")]
    pub momentum: bool,
    /// Momentum deceleration in px/ms²
    #[serde(default = "default_deceleration")]
    pub deceleration: f64,
    /// Allow drag and wheel to overshoot the edges and spring back
    #[serde(default = "default_true")]
    pub bounce: bool,
    /// Duration of the snap-back tween in ms
    #[serde(default = "default_bounce_time")]
    pub bounce_time: f64,
    #[serde(default)]
    pub bounce_easing: Easing,
    /// Fraction of a drag delta applied past an edge while bouncing
    #[serde(default = "default_drag_damping")]
    pub drag_damping: f64,
    /// Pixels one axis must lead the other by before a gesture locks
    #[serde(default = "default_direction_lock_threshold")]
    pub direction_lock_threshold: f64,
    #[serde(default)]
    pub event_passthrough: EventPassthrough,
    #[serde(default = "default_true")]
    pub prevent_default: bool,
    #[serde(default)]
    pub stop_propagation: bool,
    #[serde(default)]
    pub prevent_default_exception: PreventDefaultException,
    #[serde(default)]
    pub mouse_wheel: MouseWheelConfig,
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default = "default_arrow_key_displacement")]
    pub arrow_key_displacement: f64,
    #[serde(default)]
    pub probe_type: ProbeLevel,
    /// Resize debounce in ms
    #[serde(default = "default_resize_polling")]
    pub resize_polling: f64,
    /// Per-source overrides; unset means "derive from device capabilities"
    #[serde(default)]
    pub disable_pointer: Option<bool>,
    #[serde(default)]
    pub disable_touch: Option<bool>,
    #[serde(default)]
    pub disable_mouse: Option<bool>,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            scroll_x: false,
            scroll_y: default_true(),
            start_x: 0.0,
            start_y: 0.0,
            free_scroll: false,
            momentum: default_true(),
            deceleration: default_deceleration(),
            bounce: default_true(),
            bounce_time: default_bounce_time(),
            bounce_easing: Easing::default(),
            drag_damping: default_drag_damping(),
            direction_lock_threshold: default_direction_lock_threshold(),
            event_passthrough: EventPassthrough::None,
            prevent_default: default_true(),
            stop_propagation: false,
            prevent_default_exception: PreventDefaultException::default(),
            mouse_wheel: MouseWheelConfig::default(),
            key_bindings: KeyBindings::default(),
            arrow_key_displacement: default_arrow_key_displacement(),
            probe_type: ProbeLevel::default(),
            resize_polling: default_resize_polling(),
            disable_pointer: None,
            disable_touch: None,
            disable_mouse: None,
        }
    }
}

impl ScrollOptions {
    /// Options used by the virtual table: horizontal only, wheel and keys on,
    /// vertical gestures handed to the page
    pub fn virtual_table() -> Self {
        Self {
            scroll_x: true,
            scroll_y: false,
            free_scroll: false,
            bounce: false,
            probe_type: ProbeLevel::Realtime,
            event_passthrough: EventPassthrough::Vertical,
            prevent_default: false,
            mouse_wheel: MouseWheelConfig {
                enabled: true,
                horizontal_factor: 10.0,
                ..MouseWheelConfig::default()
            },
            key_bindings: KeyBindings {
                enabled: true,
                ..KeyBindings::default()
            },
            ..Self::default()
        }
    }

    /// Resolve interdependent options
    ///
    /// Event passthrough disables the passed-through axis, free scrolling,
    /// default-action suppression and the lock threshold. A wheel ease time
    /// below the safe floor is raised to it.
    pub fn normalized(mut self) -> Self {
        if self.event_passthrough != EventPassthrough::None {
            self.prevent_default = false;
            self.free_scroll = false;
            self.direction_lock_threshold = 0.0;
        }
        match self.event_passthrough {
            EventPassthrough::Vertical => self.scroll_y = false,
            EventPassthrough::Horizontal => self.scroll_x = false,
            EventPassthrough::None => {}
        }

        if self.mouse_wheel.ease_time < SAFE_EASE_TIME_MS {
            warn!(
                ease_time = self.mouse_wheel.ease_time,
                "mouse_wheel.ease_time should be at least {}ms; a smaller value fires scrollEnd on every wheel tick",
                SAFE_EASE_TIME_MS
            );
            self.mouse_wheel.ease_time = SAFE_EASE_TIME_MS;
        }

        self.key_bindings.warn_conflicts();
        self
    }

    /// Sources allowed when the device's capabilities are unknown
    pub fn explicit_gates(&self) -> SourceGates {
        SourceGates {
            pointer: !self.disable_pointer.unwrap_or(false),
            touch: !self.disable_touch.unwrap_or(false),
            mouse: !self.disable_mouse.unwrap_or(false),
        }
    }

    /// Sources allowed given the device's capabilities
    ///
    /// Pointer events win when the device has them, then touch, then mouse.
    pub fn source_gates(&self, caps: InputCapabilities) -> SourceGates {
        SourceGates {
            pointer: !self.disable_pointer.unwrap_or(!caps.pointer),
            touch: !self.disable_touch.unwrap_or(caps.pointer || !caps.touch),
            mouse: !self.disable_mouse.unwrap_or(caps.pointer || caps.touch),
        }
    }
}

/// Axis whose gestures fall through to the host page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "PassthroughRepr")]
pub enum EventPassthrough {
    #[default]
    None,
    Vertical,
    Horizontal,
}

/// Accepts `true` (vertical), `false`, or an axis name
#[derive(Deserialize)]
#[serde(untagged)]
enum PassthroughRepr {
    Flag(bool),
    Axis(String),
}

impl TryFrom<PassthroughRepr> for EventPassthrough {
    type Error = String;

    fn try_from(repr: PassthroughRepr) -> Result<Self, Self::Error> {
        match repr {
            PassthroughRepr::Flag(true) => Ok(EventPassthrough::Vertical),
            PassthroughRepr::Flag(false) => Ok(EventPassthrough::None),
            PassthroughRepr::Axis(axis) => match axis.as_str() {
                "vertical" => Ok(EventPassthrough::Vertical),
                "horizontal" => Ok(EventPassthrough::Horizontal),
                "none" | "" => Ok(EventPassthrough::None),
                other => Err(format!("unknown event_passthrough axis '{}'", other)),
            },
        }
    }
}

/// How often continuous `scroll` signals are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ProbeLevel {
    /// Only when a long drag restarts its momentum window
    #[default]
    Low = 1,
    /// On every drag and wheel move
    Normal = 2,
    /// Also on every animation frame
    Realtime = 3,
}

impl TryFrom<u8> for ProbeLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(ProbeLevel::Low),
            2 => Ok(ProbeLevel::Normal),
            3 => Ok(ProbeLevel::Realtime),
            other => Err(format!("probe_type must be 1, 2 or 3, got {}", other)),
        }
    }
}

impl From<ProbeLevel> for u8 {
    fn from(level: ProbeLevel) -> Self {
        level as u8
    }
}

/// Wheel behaviour
/// Can be specified as a plain boolean or as a table of overrides
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MouseWheelConfig {
    pub enabled: bool,
    /// Multiplier for line-mode and legacy wheel deltas
    pub speed: f64,
    /// Flip wheel direction on both axes
    pub invert: bool,
    /// Tween length for each wheel move in ms
    pub ease_time: f64,
    /// Quiet period after which a wheel session ends, in ms
    pub discrete_time: f64,
    /// Minimum spacing between applied wheel moves in ms (0 = every event)
    pub throttle_time: f64,
    /// Fraction of a wheel delta applied past an edge while bouncing
    pub damping_factor: f64,
    /// Extra multiplier for horizontal wheel deltas
    pub horizontal_factor: f64,
}

impl Default for MouseWheelConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            speed: default_wheel_speed(),
            invert: false,
            ease_time: default_wheel_ease_time(),
            discrete_time: default_wheel_discrete_time(),
            throttle_time: 0.0,
            damping_factor: default_wheel_damping(),
            horizontal_factor: 1.0,
        }
    }
}

// Custom deserializer to accept either a bool or a table
impl<'de> Deserialize<'de> for MouseWheelConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MouseWheelVisitor;

        impl<'de> Visitor<'de> for MouseWheelVisitor {
            type Value = MouseWheelConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a boolean or a table of mouse wheel options")
            }

            fn visit_bool<E>(self, value: bool) -> Result<MouseWheelConfig, E>
            where
                E: de::Error,
            {
                Ok(MouseWheelConfig {
                    enabled: value,
                    ..MouseWheelConfig::default()
                })
            }

            // A table switches the wheel on unless it says otherwise
            fn visit_map<M>(self, mut map: M) -> Result<MouseWheelConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut config = MouseWheelConfig {
                    enabled: true,
                    ..MouseWheelConfig::default()
                };

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "enabled" => config.enabled = map.next_value()?,
                        "speed" => config.speed = map.next_value()?,
                        "invert" => config.invert = map.next_value()?,
                        "ease_time" => config.ease_time = map.next_value()?,
                        "discrete_time" => config.discrete_time = map.next_value()?,
                        "throttle_time" => config.throttle_time = map.next_value()?,
                        "damping_factor" => config.damping_factor = map.next_value()?,
                        "horizontal_factor" => config.horizontal_factor = map.next_value()?,
                        _ => {
                            // Ignore unknown fields
                            let _: IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(config)
            }
        }

        deserializer.deserialize_any(MouseWheelVisitor)
    }
}

/// Keyboard bindings as DOM-style key codes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "KeyBindingsRepr")]
pub struct KeyBindings {
    pub enabled: bool,
    pub page_up: u32,
    pub page_down: u32,
    pub end: u32,
    pub home: u32,
    pub left: u32,
    pub up: u32,
    pub right: u32,
    pub down: u32,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            enabled: false,
            page_up: default_key_page_up(),
            page_down: default_key_page_down(),
            end: default_key_end(),
            home: default_key_home(),
            left: default_key_left(),
            up: default_key_up(),
            right: default_key_right(),
            down: default_key_down(),
        }
    }
}

impl KeyBindings {
    fn table(&self) -> [(u32, Key); 8] {
        [
            (self.page_up, Key::PageUp),
            (self.page_down, Key::PageDown),
            (self.end, Key::End),
            (self.home, Key::Home),
            (self.left, Key::Left),
            (self.up, Key::Up),
            (self.right, Key::Right),
            (self.down, Key::Down),
        ]
    }

    /// Key bound to a key code; the first binding wins on conflicts
    pub fn key_for(&self, code: u32) -> Option<Key> {
        if !self.enabled {
            return None;
        }
        self.table()
            .into_iter()
            .find(|(bound, _)| *bound == code)
            .map(|(_, key)| key)
    }

    fn warn_conflicts(&self) {
        let table = self.table();
        for (i, (code, key)) in table.iter().enumerate() {
            if let Some((_, existing)) = table[..i].iter().find(|(other, _)| other == code) {
                warn!(
                    "Key conflict: code {} already bound to {:?}, ignoring binding to {:?}",
                    code, existing, key
                );
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KeyBindingsRepr {
    Toggle(bool),
    Table(KeyCodeTable),
}

#[derive(Deserialize)]
struct KeyCodeTable {
    #[serde(default = "default_true")]
    enabled: bool,
    #[serde(default = "default_key_page_up")]
    page_up: u32,
    #[serde(default = "default_key_page_down")]
    page_down: u32,
    #[serde(default = "default_key_end")]
    end: u32,
    #[serde(default = "default_key_home")]
    home: u32,
    #[serde(default = "default_key_left")]
    left: u32,
    #[serde(default = "default_key_up")]
    up: u32,
    #[serde(default = "default_key_right")]
    right: u32,
    #[serde(default = "default_key_down")]
    down: u32,
}

impl From<KeyBindingsRepr> for KeyBindings {
    fn from(repr: KeyBindingsRepr) -> Self {
        match repr {
            KeyBindingsRepr::Toggle(enabled) => KeyBindings {
                enabled,
                ..KeyBindings::default()
            },
            KeyBindingsRepr::Table(t) => KeyBindings {
                enabled: t.enabled,
                page_up: t.page_up,
                page_down: t.page_down,
                end: t.end,
                home: t.home,
                left: t.left,
                up: t.up,
                right: t.right,
                down: t.down,
            },
        }
    }
}

/// Targets over which default actions are never suppressed
/// Each field is a regular expression matched against the target's attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreventDefaultException {
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
}

impl Default for PreventDefaultException {
    fn default() -> Self {
        Self {
            tag_name: Some(default_exception_tags()),
            class_name: None,
        }
    }
}

impl PreventDefaultException {
    pub fn compile(&self) -> crate::Result<ExceptionMatcher> {
        Ok(ExceptionMatcher {
            tag_name: self.tag_name.as_deref().map(Regex::new).transpose()?,
            class_name: self.class_name.as_deref().map(Regex::new).transpose()?,
        })
    }
}

/// Compiled [`PreventDefaultException`]
#[derive(Debug, Clone, Default)]
pub struct ExceptionMatcher {
    tag_name: Option<Regex>,
    class_name: Option<Regex>,
}

impl ExceptionMatcher {
    /// True when the target must keep its default behaviour
    pub fn is_exception(&self, target: &EventTarget) -> bool {
        let tag = self
            .tag_name
            .as_ref()
            .is_some_and(|re| re.is_match(&target.tag_name));
        let class = self
            .class_name
            .as_ref()
            .is_some_and(|re| re.is_match(&target.class_name));
        tag || class
    }
}

/// Coarse input capabilities of the host device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputCapabilities {
    pub pointer: bool,
    pub touch: bool,
}

/// Pointer sources the engine listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceGates {
    pub pointer: bool,
    pub touch: bool,
    pub mouse: bool,
}

impl Default for SourceGates {
    fn default() -> Self {
        Self {
            pointer: true,
            touch: true,
            mouse: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Animation frame rate of the terminal demo
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// Rows in the demo table
    #[serde(default = "default_rows")]
    pub rows: usize,
    /// Scrollable columns in the demo table (plus a sticky name column)
    #[serde(default = "default_columns")]
    pub columns: usize,
    /// Width of each scrollable column in terminal cells
    #[serde(default = "default_column_width")]
    pub column_width: u16,
    /// Logical pixels per terminal cell
    #[serde(default = "default_cell_px")]
    pub cell_px: f64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            rows: default_rows(),
            columns: default_columns(),
            column_width: default_column_width(),
            cell_px: default_cell_px(),
        }
    }
}

impl UiConfig {
    /// Frame interval in ms derived from the frame rate
    pub fn frame_interval(&self) -> f64 {
        if self.frame_rate == 0 {
            16.0 // ~60fps fallback
        } else {
            1000.0 / self.frame_rate as f64
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_deceleration() -> f64 {
    DEFAULT_DECELERATION
}

fn default_bounce_time() -> f64 {
    600.0
}

fn default_drag_damping() -> f64 {
    0.1
}

fn default_direction_lock_threshold() -> f64 {
    5.0
}

fn default_arrow_key_displacement() -> f64 {
    40.0
}

fn default_resize_polling() -> f64 {
    60.0
}

fn default_exception_tags() -> String {
    "^(INPUT|TEXTAREA|BUTTON|SELECT)$".to_string()
}

fn default_wheel_speed() -> f64 {
    20.0
}

fn default_wheel_ease_time() -> f64 {
    300.0
}

fn default_wheel_discrete_time() -> f64 {
    400.0
}

fn default_wheel_damping() -> f64 {
    0.1
}

// Default key codes (DOM keyCode values)
fn default_key_page_up() -> u32 { 33 }
fn default_key_page_down() -> u32 { 34 }
fn default_key_end() -> u32 { 35 }
fn default_key_home() -> u32 { 36 }
fn default_key_left() -> u32 { 37 }
fn default_key_up() -> u32 { 38 }
fn default_key_right() -> u32 { 39 }
fn default_key_down() -> u32 { 40 }

fn default_frame_rate() -> u32 {
    60
}

fn default_rows() -> usize {
    200
}

fn default_columns() -> usize {
    12
}

fn default_column_width() -> u16 {
    14
}

fn default_cell_px() -> f64 {
    10.0
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults if it is missing
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save configuration to `path`
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/gridscroll/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("gridscroll")
            .join("config.toml")
    }
}

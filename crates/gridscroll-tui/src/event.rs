use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    frame_rate: Duration,
}

impl EventHandler {
    /// `frame_interval_ms` is the poll timeout used while the engine animates
    pub fn new(tick_rate_ms: u64, frame_interval_ms: f64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            frame_rate: Duration::from_secs_f64(frame_interval_ms.max(1.0) / 1000.0),
        }
    }

    /// Poll for the next event at the idle tick rate
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Poll for the next event at the animation frame rate
    pub fn next_frame(&self) -> Result<Option<AppEvent>> {
        self.poll(self.frame_rate)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            Ok(AppEvent::from_terminal(event::read()?))
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Nothing arrived before the poll timeout
    Tick,
}

impl AppEvent {
    pub fn from_terminal(event: Event) -> Option<Self> {
        match event {
            // Repeats feed the engine's key acceleration; releases are noise
            Event::Key(key) if key.kind != KeyEventKind::Release => Some(AppEvent::Key(key)),
            Event::Mouse(mouse) => Some(AppEvent::Mouse(mouse)),
            Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            _ => None,
        }
    }
}

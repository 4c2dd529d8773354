//! Keyboard navigation

use tracing::trace;

use super::{Motion, ScrollEngine};
use crate::input::keyboard::KEY_SCROLL_DURATION_MS;
use crate::input::{Disposition, Key};
use crate::scroll::boundary;
use crate::scroll::easing::Easing;
use crate::scroll::scheduler::Scheduler;

impl<S: Scheduler> ScrollEngine<S> {
    pub(super) fn key(&mut self, code: u32) -> Disposition {
        if !self.bridge.state().enabled {
            return Disposition::IGNORED;
        }
        let Some(key) = self.options.key_bindings.key_for(code) else {
            return Disposition::IGNORED;
        };

        // Arrows on an axis without scroll are ignored
        if let Some(axis) = key.axis() {
            if !self.bridge.state().has_scroll(axis) {
                trace!(?key, "no scroll on the key's axis");
                return Disposition::IGNORED;
            }
        }

        let now = self.scheduler.now();
        let acceleration = self.keys.press(now);
        let step = (self.options.arrow_key_displacement + acceleration).trunc();

        let state = self.bridge.state();
        let (mut x, mut y) = state.position();
        match key {
            Key::PageUp | Key::PageDown => {
                let sign = if key == Key::PageUp { 1.0 } else { -1.0 };
                // Page along x only for horizontal-only content
                if state.has_horizontal_scroll && !state.has_vertical_scroll {
                    x += sign * state.wrapper_width;
                } else {
                    y += sign * state.wrapper_height;
                }
            }
            Key::End => {
                x = if state.has_horizontal_scroll { state.max_scroll_x } else { 0.0 };
                y = if state.has_vertical_scroll { state.max_scroll_y } else { 0.0 };
            }
            Key::Home => {
                x = 0.0;
                y = 0.0;
            }
            Key::Left => x += step,
            Key::Up => y += step,
            Key::Right => x -= step,
            Key::Down => y -= step,
        }

        let (clamped_x, clamped_y) = boundary::clamp(state, x, y);
        if clamped_x != x || clamped_y != y {
            self.keys.reset();
        }
        trace!(?key, acceleration, x = clamped_x, y = clamped_y, "key scroll");

        self.move_to(
            clamped_x,
            clamped_y,
            KEY_SCROLL_DURATION_MS,
            Easing::default(),
            Motion::Key,
        );
        Disposition::handled(self.options.prevent_default, self.options.stop_propagation)
    }
}

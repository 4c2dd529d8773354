//! Wheel sessions
//!
//! A session opens with the first wheel event after a quiet period and
//! closes once no wheel event arrived for `discrete_time` ms. Each event
//! starts a short tween toward the accumulated target.

use tracing::{debug, trace};

use super::{Motion, ScrollEngine};
use crate::config::ProbeLevel;
use crate::events::EventKind;
use crate::input::{normalize_wheel, Disposition, RawWheelEvent, WheelAccumulator, WheelDelta};
use crate::scroll::boundary;
use crate::scroll::easing::Easing;
use crate::scroll::scheduler::{Scheduler, TaskId};
use crate::scroll::state::Direction;

#[derive(Debug, Default)]
pub(crate) struct WheelSession {
    pub active: bool,
    pub end_timer: Option<TaskId>,
    pub throttle_timer: Option<TaskId>,
    pub cache: WheelAccumulator,
}

impl<S: Scheduler> ScrollEngine<S> {
    pub(super) fn wheel(&mut self, raw: &RawWheelEvent) -> Disposition {
        if !self.bridge.state().enabled || !self.options.mouse_wheel.enabled {
            return Disposition::IGNORED;
        }
        let state = self.bridge.state();
        let Some(delta) = normalize_wheel(
            raw,
            &self.options.mouse_wheel,
            state.has_horizontal_scroll,
            state.has_vertical_scroll,
        ) else {
            trace!("unrecognized wheel event");
            return Disposition::IGNORED;
        };

        let disposition = Disposition::handled(
            self.options.prevent_default && !self.exceptions.is_exception(&raw.target),
            self.options.stop_propagation,
        );

        if !self.wheel.active {
            self.wheel.cache.clear();
            self.bridge
                .set_directions(Direction::Default, Direction::Default);
            self.wheel.active = true;
            debug!("wheel session started");
            self.emit(EventKind::ScrollStart);
        }

        self.wheel_move(&delta);

        if let Some(id) = self.wheel.end_timer.take() {
            self.scheduler.cancel(id);
        }
        let quiet = self.options.mouse_wheel.discrete_time;
        self.wheel.end_timer = Some(self.scheduler.set_timeout(quiet));

        disposition
    }

    fn wheel_move(&mut self, delta: &WheelDelta) {
        let throttle_time = self.options.mouse_wheel.throttle_time;
        if throttle_time > 0.0 && self.wheel.throttle_timer.is_some() {
            self.wheel.cache.push(delta);
            return;
        }

        let (cached_x, cached_y) = self.wheel.cache.drain();
        self.bridge
            .set_directions(delta.direction_x, delta.direction_y);

        let state = self.bridge.state();
        let damping = self.options.mouse_wheel.damping_factor;
        let bounce = self.options.bounce;
        let new_x = boundary::damp(
            state.x,
            delta.x.round() + cached_x,
            state.max_scroll_x,
            damping,
            bounce,
        );
        let new_y = boundary::damp(
            state.y,
            delta.y.round() + cached_y,
            state.max_scroll_y,
            damping,
            bounce,
        );

        if new_x != state.x || new_y != state.y {
            let ease_time = self.options.mouse_wheel.ease_time;
            self.move_to(new_x, new_y, ease_time, Easing::default(), Motion::Wheel);
            if self.options.probe_type >= ProbeLevel::Normal {
                self.emit(EventKind::Scroll);
            }
        }

        if throttle_time > 0.0 {
            self.wheel.throttle_timer = Some(self.scheduler.set_timeout(throttle_time));
        }
    }

    /// Quiet period elapsed
    pub(super) fn wheel_end(&mut self) {
        self.wheel.active = false;
        if let Some(id) = self.wheel.throttle_timer.take() {
            self.scheduler.cancel(id);
        }
        self.wheel.cache.clear();

        if self.animation.is_active() && self.motion == Some(Motion::Wheel) {
            trace!("wheel session ended, scrollEnd follows the running tween");
            return;
        }
        debug!("wheel session ended");
        self.emit(EventKind::ScrollEnd);
    }

    /// Close an open session because another source took over
    ///
    /// Returns whether a session was open. Emits nothing.
    pub(super) fn interrupt_wheel(&mut self) -> bool {
        if !self.wheel.active {
            return false;
        }
        self.wheel.active = false;
        if let Some(id) = self.wheel.end_timer.take() {
            self.scheduler.cancel(id);
        }
        if let Some(id) = self.wheel.throttle_timer.take() {
            self.scheduler.cancel(id);
        }
        self.wheel.cache.clear();
        trace!("wheel session interrupted");
        true
    }
}

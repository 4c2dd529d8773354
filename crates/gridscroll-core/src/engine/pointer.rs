//! Drag gestures from touch, pointer and mouse sources

use tracing::debug;

use super::{Motion, ScrollEngine};
use crate::config::ProbeLevel;
use crate::events::EventKind;
use crate::input::{Disposition, EventTarget, PointerKind};
use crate::scroll::boundary;
use crate::scroll::easing::Easing;
use crate::scroll::gesture::{apply_lock, is_flick, DirectionLock, GestureSession, LockedDelta};
use crate::scroll::momentum::{momentum, Momentum, MOMENTUM_WINDOW_MS};
use crate::scroll::scheduler::Scheduler;
use crate::scroll::state::Direction;

/// Only the primary mouse button starts a drag
const PRIMARY_BUTTON: u8 = 0;

impl<S: Scheduler> ScrollEngine<S> {
    fn accepts_source(&self, kind: PointerKind) -> bool {
        match kind {
            PointerKind::Touch => self.gates.touch,
            PointerKind::Pointer => self.gates.pointer,
            PointerKind::Mouse => self.gates.mouse,
        }
    }

    pub(super) fn press(
        &mut self,
        kind: PointerKind,
        x: f64,
        y: f64,
        button: u8,
        target: &EventTarget,
    ) -> Disposition {
        if !self.bridge.state().enabled || !self.drag_input || !self.accepts_source(kind) {
            return Disposition::IGNORED;
        }
        if self.initiated.is_some_and(|latched| latched != kind) {
            return Disposition::IGNORED;
        }
        if kind != PointerKind::Touch && button != PRIMARY_BUTTON {
            return Disposition::IGNORED;
        }

        let disposition = Disposition::handled(
            self.options.prevent_default && !self.exceptions.is_exception(target),
            self.options.stop_propagation,
        );
        self.initiated = Some(kind);
        self.bridge
            .set_directions(Direction::Default, Direction::Default);

        let wheel_open = self.interrupt_wheel();
        let cancelled = self.stop_animation();
        if cancelled || wheel_open {
            self.emit(EventKind::ScrollEnd);
        }

        let now = self.scheduler.now();
        let (sx, sy) = self.bridge.state().position();
        self.gesture = Some(GestureSession::begin(kind, sx, sy, x, y, now));
        debug!(?kind, x, y, "gesture started");

        self.emit(EventKind::BeforeScrollStart);
        disposition
    }

    pub(super) fn drag(&mut self, kind: PointerKind, x: f64, y: f64) -> Disposition {
        if !self.bridge.state().enabled || self.initiated != Some(kind) {
            return Disposition::IGNORED;
        }
        let now = self.scheduler.now();
        let end_time = self.end_time;
        let threshold = self.options.direction_lock_threshold;
        let free_scroll = self.options.free_scroll;
        let passthrough = self.options.event_passthrough;
        let stop = self.options.stop_propagation;
        let mut prevent = self.options.prevent_default;

        let Some(gesture) = self.gesture.as_mut() else {
            return Disposition::IGNORED;
        };
        let (dx, dy) = gesture.track(x, y);
        if gesture.is_jitter(now, end_time) {
            return Disposition::handled(prevent, stop);
        }

        let undecided = gesture.direction_lock == DirectionLock::Undecided;
        let lock = gesture.decide_lock(threshold, free_scroll);
        if undecided && lock != DirectionLock::Undecided {
            debug!(?lock, dist_x = gesture.dist_x, dist_y = gesture.dist_y, "direction locked");
        }

        let (dx, dy) = match apply_lock(lock, passthrough, dx, dy) {
            LockedDelta::Abort => {
                debug!(?lock, "gesture handed back to the host");
                self.drop_gesture();
                return Disposition::IGNORED;
            }
            LockedDelta::Move { dx, dy, capture } => {
                prevent |= capture;
                (dx, dy)
            }
        };
        let first_move = !gesture.moved;
        gesture.moved = true;

        let state = self.bridge.state();
        let dx = if state.has_horizontal_scroll { dx } else { 0.0 };
        let dy = if state.has_vertical_scroll { dy } else { 0.0 };
        let damping = self.options.drag_damping;
        let bounce = self.options.bounce;
        let new_x = boundary::damp(state.x, dx, state.max_scroll_x, damping, bounce);
        let new_y = boundary::damp(state.y, dy, state.max_scroll_y, damping, bounce);

        self.bridge
            .set_directions(Direction::of_delta(dx), Direction::of_delta(dy));
        if first_move {
            self.emit(EventKind::ScrollStart);
        }
        self.translate(new_x, new_y);

        let window_restarted = self
            .gesture
            .as_mut()
            .is_some_and(|g| g.refresh_window(now, new_x, new_y, MOMENTUM_WINDOW_MS));
        match self.options.probe_type {
            ProbeLevel::Low if window_restarted => self.emit(EventKind::Scroll),
            ProbeLevel::Normal | ProbeLevel::Realtime => self.emit(EventKind::Scroll),
            _ => {}
        }

        Disposition::handled(prevent, stop)
    }

    /// End the gesture; `target` is `None` for cancelled gestures
    pub(super) fn release(&mut self, kind: PointerKind, target: Option<&EventTarget>) -> Disposition {
        if !self.bridge.state().enabled || self.initiated != Some(kind) {
            return Disposition::IGNORED;
        }
        let prevent = self.options.prevent_default
            && target.is_some_and(|t| !self.exceptions.is_exception(t));
        let disposition = Disposition::handled(prevent, self.options.stop_propagation);

        self.initiated = None;
        let Some(gesture) = self.gesture.take() else {
            return disposition;
        };
        let now = self.scheduler.now();
        self.end_time = now;

        let bounce_time = self.options.bounce_time;
        if self.reset_position(bounce_time, Motion::Bounce) {
            debug!("released out of bounds");
            return disposition;
        }

        let (x, y) = self.bridge.state().position();
        let (new_x, new_y) = (x.round(), y.round());
        self.move_to(new_x, new_y, 0.0, Easing::default(), Motion::Programmatic);

        if !gesture.moved {
            self.emit(EventKind::ScrollCancel);
            return disposition;
        }

        let release = gesture.release(now, new_x, new_y);
        if self.events.has_listeners(EventKind::Flick)
            && is_flick(release.duration, release.distance_x, release.distance_y)
        {
            self.emit(EventKind::Flick);
            return disposition;
        }

        let (mut dest_x, mut dest_y, mut time) = (new_x, new_y, 0.0);
        if self.options.momentum && release.duration < MOMENTUM_WINDOW_MS {
            let state = self.bridge.state();
            let deceleration = self.options.deceleration;
            let still_x = Momentum {
                destination: new_x,
                duration: 0.0,
            };
            let still_y = Momentum {
                destination: new_y,
                duration: 0.0,
            };
            let mx = if state.has_horizontal_scroll {
                momentum(new_x, gesture.start_x, release.duration, state.max_scroll_x, 0.0, deceleration)
            } else {
                still_x
            };
            let my = if state.has_vertical_scroll {
                momentum(new_y, gesture.start_y, release.duration, state.max_scroll_y, 0.0, deceleration)
            } else {
                still_y
            };
            dest_x = mx.destination;
            dest_y = my.destination;
            time = mx.duration.max(my.duration);
            debug!(
                duration = release.duration,
                dest_x,
                dest_y,
                time,
                "momentum"
            );
        }

        if dest_x != new_x || dest_y != new_y {
            let easing = if boundary::is_out_of_bounds(self.bridge.state(), dest_x, dest_y) {
                Easing::Quadratic
            } else {
                Easing::default()
            };
            self.move_to(dest_x, dest_y, time, easing, Motion::Momentum);
            return disposition;
        }

        self.emit(EventKind::ScrollEnd);
        disposition
    }
}

//! Scroll engine facade
//!
//! [`ScrollEngine`] wires input normalization, gesture tracking, momentum,
//! boundary policy and the animation driver to the sync bridge. Everything
//! runs on the caller's thread: input arrives through
//! [`handle_event`](ScrollEngine::handle_event), frames and timers come back
//! through [`fire`](ScrollEngine::fire).

mod keys;
mod pointer;
mod wheel;

#[cfg(test)]
mod tests;

use tracing::{debug, trace};

use crate::bridge::{SyncBridge, Viewport, ViewportRole};
use crate::config::{ExceptionMatcher, InputCapabilities, ScrollOptions, SourceGates};
use crate::events::{EventBus, EventKind, Listener, ListenerId, ScrollEvent};
use crate::host::{PointerCapability, TargetOffset, ViewportGeometry};
use crate::input::{Disposition, InputEvent, KeyAcceleration, PointerKind};
use crate::scroll::animation::{AnimationDriver, AnimationTask, Step};
use crate::scroll::boundary;
use crate::scroll::easing::Easing;
use crate::scroll::gesture::GestureSession;
use crate::scroll::scheduler::{Scheduler, TaskId, TaskQueue};
use crate::scroll::state::{Direction, ScrollState};
use crate::scroll::timing::Clock;
use crate::Result;

use wheel::WheelSession;

/// Input source that started the running tween
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Motion {
    Programmatic,
    Momentum,
    Bounce,
    Wheel,
    Key,
}

pub struct ScrollEngine<S: Scheduler> {
    options: ScrollOptions,
    exceptions: ExceptionMatcher,
    scheduler: S,
    geometry: Box<dyn ViewportGeometry>,
    bridge: SyncBridge,
    events: EventBus,
    animation: AnimationDriver,
    motion: Option<Motion>,
    gesture: Option<GestureSession>,
    /// Pointer kind that owns the current gesture
    initiated: Option<PointerKind>,
    /// When the last gesture was released
    end_time: f64,
    /// Drag input switch (`enable_mouse_events` / `disable_mouse_events`)
    drag_input: bool,
    gates: SourceGates,
    wheel: WheelSession,
    keys: KeyAcceleration,
    resize_timer: Option<TaskId>,
    destroyed: bool,
}

impl<S: Scheduler> ScrollEngine<S> {
    /// Create an engine, measure the viewport and move to the start position
    ///
    /// Fails only if the prevent-default exception patterns do not compile.
    pub fn new(
        options: ScrollOptions,
        scheduler: S,
        geometry: Box<dyn ViewportGeometry>,
    ) -> Result<Self> {
        let options = options.normalized();
        let exceptions = options.prevent_default_exception.compile()?;
        let gates = options.explicit_gates();

        let mut engine = Self {
            options,
            exceptions,
            scheduler,
            geometry,
            bridge: SyncBridge::new(ScrollState::default()),
            events: EventBus::new(),
            animation: AnimationDriver::new(),
            motion: None,
            gesture: None,
            initiated: None,
            end_time: 0.0,
            drag_input: true,
            gates,
            wheel: WheelSession::default(),
            keys: KeyAcceleration::new(),
            resize_timer: None,
            destroyed: false,
        };

        engine.measure();
        let (x, y) = (engine.options.start_x, engine.options.start_y);
        engine.bridge.translate(x, y);

        let state = engine.bridge.state();
        debug!(
            max_scroll_x = state.max_scroll_x,
            max_scroll_y = state.max_scroll_y,
            "scroll engine created"
        );
        Ok(engine)
    }

    pub fn state(&self) -> &ScrollState {
        self.bridge.state()
    }

    pub fn position(&self) -> (f64, f64) {
        self.bridge.state().position()
    }

    pub fn options(&self) -> &ScrollOptions {
        &self.options
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// A drag gesture is in progress
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn attach_viewport(&mut self, role: ViewportRole, viewport: Box<dyn Viewport>) {
        if self.destroyed {
            return;
        }
        self.bridge.attach(role, viewport);
    }

    pub fn detach_viewport(&mut self, role: ViewportRole) -> usize {
        self.bridge.detach(role)
    }

    pub fn on(&mut self, kind: EventKind, listener: Listener) -> ListenerId {
        self.events.on(kind, listener)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    /// Feed one input event
    pub fn handle_event(&mut self, event: &InputEvent) -> Disposition {
        if self.destroyed {
            return Disposition::IGNORED;
        }
        match event {
            InputEvent::Press {
                kind,
                x,
                y,
                button,
                target,
            } => self.press(*kind, *x, *y, *button, target),
            InputEvent::Move { kind, x, y } => self.drag(*kind, *x, *y),
            InputEvent::Release { kind, target } => self.release(*kind, Some(target)),
            InputEvent::Cancel { kind } => self.release(*kind, None),
            InputEvent::Wheel(raw) => self.wheel(raw),
            InputEvent::Key { code } => self.key(*code),
            InputEvent::Resize => {
                self.schedule_refresh();
                Disposition::handled(false, false)
            }
        }
    }

    /// Deliver a frame or timer the scheduler reported as due
    ///
    /// Ids the engine no longer owns are ignored.
    pub fn fire(&mut self, id: TaskId) {
        if self.destroyed {
            return;
        }
        if self.animation.claim_frame(id) {
            self.animation_frame();
        } else if self.wheel.end_timer == Some(id) {
            self.wheel.end_timer = None;
            self.wheel_end();
        } else if self.wheel.throttle_timer == Some(id) {
            self.wheel.throttle_timer = None;
        } else if self.resize_timer == Some(id) {
            self.resize_timer = None;
            self.refresh();
        } else {
            trace!(?id, "ignoring stale task");
        }
    }

    /// Scroll to `(x, y)`, animating when `duration` is positive
    ///
    /// A running tween is cancelled first. Scrolling to the current
    /// position does nothing.
    pub fn scroll_to(&mut self, x: f64, y: f64, duration: f64, easing: Option<Easing>) {
        if self.destroyed {
            return;
        }
        let wheel_tween = self.motion == Some(Motion::Wheel) && self.animation.is_active();
        if self.interrupt_wheel() && !wheel_tween {
            self.emit(EventKind::ScrollEnd);
        }
        self.move_to(
            x,
            y,
            duration,
            easing.unwrap_or_default(),
            Motion::Programmatic,
        );
    }

    pub fn scroll_by(&mut self, dx: f64, dy: f64, duration: f64, easing: Option<Easing>) {
        let (x, y) = self.position();
        self.scroll_to(x + dx, y + dy, duration, easing);
    }

    /// Bring a named target into view
    ///
    /// `duration` of `None` picks a duration proportional to the distance.
    /// Unknown targets are ignored.
    pub fn scroll_to_target(
        &mut self,
        target: &str,
        duration: Option<f64>,
        offset_x: TargetOffset,
        offset_y: TargetOffset,
    ) {
        if self.destroyed {
            return;
        }
        let Some(rect) = self.geometry.target_rect(target) else {
            debug!(target, "scroll target not found");
            return;
        };

        let state = self.bridge.state();
        let x = boundary::clamp_axis(
            -rect.left - offset_x.resolve(rect.width, state.wrapper_width),
            state.max_scroll_x,
        );
        let y = boundary::clamp_axis(
            -rect.top - offset_y.resolve(rect.height, state.wrapper_height),
            state.max_scroll_y,
        );
        let duration =
            duration.unwrap_or_else(|| (state.x - x).abs().max((state.y - y).abs()));

        self.scroll_to(x, y, duration, None);
    }

    /// Forward a native scroll position reported by the proxy scrollbar
    pub fn proxy_scrolled(&mut self, scroll_left: f64) {
        if self.destroyed || self.bridge.is_proxy_echo(scroll_left) {
            return;
        }
        let y = self.bridge.state().y;
        self.scroll_to(-scroll_left, y, 0.0, None);
    }

    pub fn enable(&mut self) {
        self.bridge.set_enabled(true);
    }

    /// Ignore input from now on; programmatic scrolling keeps working
    pub fn disable(&mut self) {
        self.bridge.set_enabled(false);
        self.drop_gesture();
    }

    pub fn enable_mouse_events(&mut self) {
        self.drag_input = true;
    }

    pub fn disable_mouse_events(&mut self) {
        self.drag_input = false;
        self.drop_gesture();
    }

    /// Accept drag input only on coarse-pointer devices
    pub fn apply_pointer_capability(&mut self, capability: &dyn PointerCapability) {
        if capability.is_coarse_pointer() {
            self.enable_mouse_events();
        } else {
            self.disable_mouse_events();
        }
    }

    /// Choose which pointer sources to listen to
    pub fn set_input_capabilities(&mut self, caps: InputCapabilities) {
        self.gates = self.options.source_gates(caps);
        debug!(gates = ?self.gates, "input sources");
    }

    /// Re-measure the viewport and settle back into bounds
    pub fn refresh(&mut self) {
        if self.destroyed {
            return;
        }
        self.measure();
        self.end_time = 0.0;
        self.bridge
            .set_directions(Direction::Default, Direction::Default);

        let state = self.bridge.state();
        debug!(
            max_scroll_x = state.max_scroll_x,
            max_scroll_y = state.max_scroll_y,
            has_horizontal_scroll = state.has_horizontal_scroll,
            has_vertical_scroll = state.has_vertical_scroll,
            "refreshed"
        );

        self.emit(EventKind::Refresh);
        self.reset_position(0.0, Motion::Bounce);
    }

    /// Release every timer, frame, listener and viewport
    ///
    /// Safe at any point; calling it twice does nothing.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.stop_animation();
        self.interrupt_wheel();
        if let Some(id) = self.resize_timer.take() {
            self.scheduler.cancel(id);
        }
        self.drop_gesture();

        self.emit(EventKind::Destroy);
        self.events.clear();
        self.bridge.detach_all();
        self.destroyed = true;
        debug!("scroll engine destroyed");
    }

    // Internals shared by the input sources

    fn measure(&mut self) {
        let extents = self.geometry.extents();
        self.bridge
            .apply_geometry(extents, self.options.scroll_x, self.options.scroll_y);
    }

    fn schedule_refresh(&mut self) {
        if let Some(id) = self.resize_timer.take() {
            self.scheduler.cancel(id);
        }
        self.resize_timer = Some(self.scheduler.set_timeout(self.options.resize_polling));
    }

    fn drop_gesture(&mut self) {
        self.gesture = None;
        self.initiated = None;
    }

    fn emit(&mut self, kind: EventKind) {
        let (x, y) = self.bridge.state().position();
        trace!(event = kind.name(), x, y, "emit");
        self.events.emit(ScrollEvent { kind, x, y });
    }

    /// The only path that changes position
    fn translate(&mut self, x: f64, y: f64) {
        self.bridge.translate(x, y);
        self.events.emit(ScrollEvent {
            kind: EventKind::Translate,
            x: -x,
            y,
        });
    }

    /// Cancel the running tween; returns whether one was running
    fn stop_animation(&mut self) -> bool {
        self.motion = None;
        if self.animation.cancel(&mut self.scheduler) {
            self.bridge.set_animating(false);
            debug!("animation cancelled");
            true
        } else {
            false
        }
    }

    /// Move to `(x, y)` now or over `duration` ms
    ///
    /// A tween that is cancelled without a replacement tween ends with
    /// `scrollEnd`.
    fn move_to(&mut self, x: f64, y: f64, duration: f64, easing: Easing, origin: Motion) {
        let replaced = self.stop_animation();
        let (cx, cy) = self.bridge.state().position();

        if x == cx && y == cy {
            if replaced {
                self.emit(EventKind::ScrollEnd);
            }
            return;
        }

        if duration > 0.0 {
            let task = AnimationTask {
                start_x: cx,
                start_y: cy,
                dest_x: x,
                dest_y: y,
                start_time: self.scheduler.now(),
                duration,
                easing,
            };
            debug!(
                x,
                y,
                duration,
                easing = easing.name(),
                ?origin,
                "animation started"
            );
            self.animation.start(task, &mut self.scheduler);
            self.animation.request_frame(&mut self.scheduler);
            self.bridge.set_animating(true);
            self.motion = Some(origin);
        } else {
            self.translate(x, y);
            if replaced {
                self.emit(EventKind::ScrollEnd);
            }
        }
    }

    /// Spring back into bounds; returns whether a correction was started
    fn reset_position(&mut self, duration: f64, origin: Motion) -> bool {
        match boundary::snap_target(self.bridge.state()) {
            Some((x, y)) => {
                debug!(x, y, duration, "snapping back into bounds");
                let easing = self.options.bounce_easing;
                self.move_to(x, y, duration, easing, origin);
                true
            }
            None => false,
        }
    }

    fn animation_frame(&mut self) {
        let now = self.scheduler.now();
        match self.animation.step(now) {
            Some(Step::Frame { x, y }) => {
                self.translate(x, y);
                self.animation.request_frame(&mut self.scheduler);
                if self.options.probe_type == crate::config::ProbeLevel::Realtime {
                    self.emit(EventKind::Scroll);
                }
            }
            Some(Step::Done { x, y }) => {
                self.bridge.set_animating(false);
                let origin = self.motion.take().unwrap_or(Motion::Programmatic);
                self.translate(x, y);
                trace!(?origin, "animation finished");

                let bounce_time = self.options.bounce_time;
                if self.reset_position(bounce_time, origin) {
                    return;
                }
                // An open wheel session reports its own end
                if origin == Motion::Wheel && self.wheel.active {
                    return;
                }
                self.emit(EventKind::ScrollEnd);
            }
            None => {}
        }
    }
}

impl<C: Clock> ScrollEngine<TaskQueue<C>> {
    /// Fire every frame and timer that is due; returns how many fired
    pub fn pump(&mut self) -> usize {
        let mut fired = 0;
        loop {
            let due = self.scheduler.take_due();
            if due.is_empty() {
                break;
            }
            for id in due {
                self.fire(id);
                fired += 1;
            }
        }
        fired
    }
}

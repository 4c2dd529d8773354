use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;
use crate::config::{KeyBindings, MouseWheelConfig, PreventDefaultException, ProbeLevel};
use crate::host::TargetRect;
use crate::input::{EventTarget, RawWheelEvent};
use crate::scroll::gesture::DirectionLock;
use crate::scroll::scheduler::DEFAULT_FRAME_INTERVAL_MS;
use crate::scroll::state::Extents;
use crate::scroll::timing::ManualClock;
use crate::Error;

const START: f64 = 1000.0;

const KEY_PAGE_DOWN: u32 = 34;
const KEY_END: u32 = 35;
const KEY_HOME: u32 = 36;
const KEY_LEFT: u32 = 37;
const KEY_UP: u32 = 38;
const KEY_RIGHT: u32 = 39;
const KEY_DOWN: u32 = 40;

struct TestGeometry {
    extents: Rc<Cell<Extents>>,
    targets: Vec<(String, TargetRect)>,
}

impl ViewportGeometry for TestGeometry {
    fn extents(&self) -> Extents {
        self.extents.get()
    }

    fn target_rect(&self, target: &str) -> Option<TargetRect> {
        self.targets
            .iter()
            .find(|(name, _)| name == target)
            .map(|(_, rect)| *rect)
    }
}

struct Coarse(bool);

impl PointerCapability for Coarse {
    fn is_coarse_pointer(&self) -> bool {
        self.0
    }
}

/// Header-sized table: 1450px of columns in a 400px viewport
fn table() -> Extents {
    Extents {
        content_width: 1450.0,
        content_height: 300.0,
        viewport_width: 400.0,
        viewport_height: 300.0,
    }
}

/// Scrollable on both axes: max scroll (-3600, -3700)
fn grid() -> Extents {
    Extents {
        content_width: 4000.0,
        content_height: 4000.0,
        viewport_width: 400.0,
        viewport_height: 300.0,
    }
}

/// Vertical list: max scroll y -1700
fn list() -> Extents {
    Extents {
        content_width: 400.0,
        content_height: 2000.0,
        viewport_width: 400.0,
        viewport_height: 300.0,
    }
}

fn both_axes() -> ScrollOptions {
    ScrollOptions {
        scroll_x: true,
        ..Default::default()
    }
}

fn wheel_options(speed: f64) -> ScrollOptions {
    ScrollOptions {
        mouse_wheel: MouseWheelConfig {
            enabled: true,
            speed,
            ..Default::default()
        },
        ..Default::default()
    }
}

struct Harness {
    engine: ScrollEngine<TaskQueue<ManualClock>>,
    clock: ManualClock,
    extents: Rc<Cell<Extents>>,
    events: Rc<RefCell<Vec<ScrollEvent>>>,
    offsets: Rc<RefCell<Vec<(f64, f64)>>>,
}

impl Harness {
    fn new(options: ScrollOptions, extents: Extents) -> Self {
        Self::with_targets(options, extents, Vec::new())
    }

    fn with_targets(
        options: ScrollOptions,
        extents: Extents,
        targets: Vec<(String, TargetRect)>,
    ) -> Self {
        let clock = ManualClock::new(START);
        let shared = Rc::new(Cell::new(extents));
        let geometry = TestGeometry {
            extents: shared.clone(),
            targets,
        };
        let mut engine =
            ScrollEngine::new(options, TaskQueue::new(clock.clone()), Box::new(geometry)).unwrap();

        // Flick listeners change release behaviour; tests opt in explicitly
        let events = Rc::new(RefCell::new(Vec::new()));
        for kind in EventKind::ALL.into_iter().filter(|k| *k != EventKind::Flick) {
            let log = events.clone();
            engine.on(kind, Box::new(move |e| log.borrow_mut().push(*e)));
        }

        let offsets = Rc::new(RefCell::new(Vec::new()));
        let sink = offsets.clone();
        engine.attach_viewport(
            ViewportRole::Body,
            Box::new(move |left, top| sink.borrow_mut().push((left, top))),
        );
        offsets.borrow_mut().clear();

        Self {
            engine,
            clock,
            extents: shared,
            events,
            offsets,
        }
    }

    /// Advance time frame by frame, firing whatever comes due
    fn advance(&mut self, ms: f64) {
        let mut remaining = ms;
        while remaining > 0.0 {
            let step = remaining.min(DEFAULT_FRAME_INTERVAL_MS);
            self.clock.advance(step);
            self.engine.pump();
            remaining -= step;
        }
    }

    fn settle(&mut self) {
        self.advance(5000.0);
    }

    fn clear(&mut self) {
        self.events.borrow_mut().clear();
        self.offsets.borrow_mut().clear();
    }

    /// Lifecycle signals, without translate and scroll noise
    fn kinds(&self) -> Vec<EventKind> {
        self.events
            .borrow()
            .iter()
            .map(|e| e.kind)
            .filter(|k| !matches!(k, EventKind::Translate | EventKind::Scroll))
            .collect()
    }

    fn count(&self, kind: EventKind) -> usize {
        self.events.borrow().iter().filter(|e| e.kind == kind).count()
    }

    fn press(&mut self, kind: PointerKind, x: f64, y: f64) -> Disposition {
        self.engine.handle_event(&InputEvent::Press {
            kind,
            x,
            y,
            button: 0,
            target: EventTarget::tag("DIV"),
        })
    }

    fn drag_to(&mut self, kind: PointerKind, x: f64, y: f64) -> Disposition {
        self.engine.handle_event(&InputEvent::Move { kind, x, y })
    }

    fn release(&mut self, kind: PointerKind) -> Disposition {
        self.engine.handle_event(&InputEvent::Release {
            kind,
            target: EventTarget::tag("DIV"),
        })
    }

    fn wheel(&mut self, dx: f64, dy: f64) -> Disposition {
        self.engine
            .handle_event(&InputEvent::Wheel(RawWheelEvent::deltas(dx, dy, 0)))
    }

    fn key(&mut self, code: u32) -> Disposition {
        self.engine.handle_event(&InputEvent::Key { code })
    }

    fn position(&self) -> (f64, f64) {
        self.engine.position()
    }
}

#[test]
fn test_table_extent() {
    let h = Harness::new(ScrollOptions::virtual_table(), table());
    let state = h.engine.state();
    assert_eq!(state.max_scroll_x, -1050.0);
    assert!(state.has_horizontal_scroll);
    assert!(!state.has_vertical_scroll);
    assert_eq!(state.max_scroll_y, 0.0);
}

#[test]
fn test_direction_lock_after_third_sample() {
    let mut h = Harness::new(both_axes(), grid());
    h.engine.scroll_to(-500.0, -500.0, 0.0, None);
    h.clear();

    h.press(PointerKind::Touch, 100.0, 100.0);
    h.drag_to(PointerKind::Touch, 103.0, 101.0);
    h.drag_to(PointerKind::Touch, 107.0, 102.0);
    assert!(h.offsets.borrow().is_empty(), "jitter must not move");

    h.drag_to(PointerKind::Touch, 113.0, 104.0);
    let gesture = h.engine.gesture.as_ref().unwrap();
    assert_eq!(gesture.dist_x, 13.0);
    assert_eq!(gesture.dist_y, 4.0);
    assert_eq!(gesture.direction_lock, DirectionLock::Horizontal);
    assert_eq!(h.position(), (-494.0, -500.0));

    // Input now favours y, but the lock holds
    h.drag_to(PointerKind::Touch, 114.0, 134.0);
    assert_eq!(
        h.engine.gesture.as_ref().unwrap().direction_lock,
        DirectionLock::Horizontal
    );
    assert_eq!(h.position(), (-493.0, -500.0));
    assert_eq!(h.count(EventKind::ScrollStart), 1);
}

#[test]
fn test_wheel_delta_moves_content() {
    let mut h = Harness::new(wheel_options(1.0), grid());
    let disposition = h.wheel(0.0, 100.0);
    assert!(disposition.handled);
    assert!(disposition.prevent_default);
    assert_eq!(h.engine.state().direction_y, Direction::Positive);
    assert!(h.engine.state().is_animating);

    h.settle();
    assert_eq!(h.position(), (0.0, -100.0));
    assert_eq!(h.kinds(), vec![EventKind::ScrollStart, EventKind::ScrollEnd]);
}

#[test]
fn test_momentum_overshoot_clamps_to_extent() {
    let options = ScrollOptions {
        scroll_x: true,
        scroll_y: false,
        ..Default::default()
    };
    let mut h = Harness::new(options, table());
    h.engine.scroll_to(-900.0, 0.0, 0.0, None);
    h.clear();

    h.press(PointerKind::Touch, 500.0, 0.0);
    for x in [475.0, 450.0, 425.0, 400.0] {
        h.advance(50.0);
        h.drag_to(PointerKind::Touch, x, 0.0);
    }
    h.advance(50.0);
    h.drag_to(PointerKind::Touch, 360.0, 0.0);
    assert_eq!(h.position(), (-1040.0, 0.0));

    h.release(PointerKind::Touch);
    assert!(h.engine.state().is_animating);
    let task = *h.engine.animation.task().unwrap();
    assert_eq!(task.dest_x, -1050.0);

    h.settle();
    assert_eq!(h.position(), (-1050.0, 0.0));
    assert!(!h.engine.state().is_animating);
    // No bounce: the clamped destination is already legal
    assert!(h.offsets.borrow().iter().all(|(left, _)| *left <= 1050.0));
    assert_eq!(
        h.kinds(),
        vec![
            EventKind::BeforeScrollStart,
            EventKind::ScrollStart,
            EventKind::ScrollEnd
        ]
    );
}

#[test]
fn test_key_repeats_accelerate() {
    let options = ScrollOptions {
        scroll_x: true,
        key_bindings: KeyBindings {
            enabled: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut h = Harness::new(options, grid());

    let mut values = Vec::new();
    for _ in 0..6 {
        h.key(KEY_RIGHT);
        values.push(h.engine.keys.value());
        h.advance(50.0);
    }
    assert_eq!(values[0], 0.0);
    for pair in values.windows(2) {
        assert!(pair[1] > pair[0], "{:?}", values);
        assert!(pair[1] <= 50.0);
    }
}

#[test]
fn test_key_clamp_resets_acceleration() {
    let options = ScrollOptions {
        scroll_x: true,
        key_bindings: KeyBindings {
            enabled: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut h = Harness::new(options, grid());
    for _ in 0..3 {
        h.key(KEY_LEFT);
        assert_eq!(h.engine.keys.value(), 0.0);
        h.advance(50.0);
    }
    assert_eq!(h.position(), (0.0, 0.0));
}

#[test]
fn test_arrow_page_home_end_keys() {
    let options = ScrollOptions {
        scroll_x: true,
        key_bindings: KeyBindings {
            enabled: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut h = Harness::new(options, grid());

    h.key(KEY_RIGHT);
    h.settle();
    assert_eq!(h.position(), (-40.0, 0.0));

    h.key(KEY_PAGE_DOWN);
    h.settle();
    assert_eq!(h.position(), (-40.0, -300.0));

    h.key(KEY_END);
    h.settle();
    assert_eq!(h.position(), (-3600.0, -3700.0));

    h.key(KEY_HOME);
    h.settle();
    assert_eq!(h.position(), (0.0, 0.0));
}

#[test]
fn test_page_keys_move_horizontally_on_a_table() {
    let mut h = Harness::new(ScrollOptions::virtual_table(), table());
    h.key(KEY_PAGE_DOWN);
    h.settle();
    assert_eq!(h.position(), (-400.0, 0.0));
}

#[test]
fn test_vertical_arrows_ignored_on_horizontal_table() {
    let mut h = Harness::new(ScrollOptions::virtual_table(), table());
    h.engine.scroll_to(-500.0, 0.0, 1000.0, None);
    h.advance(100.0);
    h.clear();

    assert_eq!(h.key(KEY_DOWN), Disposition::IGNORED);
    assert_eq!(h.key(KEY_UP), Disposition::IGNORED);
    assert!(h.engine.state().is_animating);
    assert!(h.kinds().is_empty());
    assert_eq!(h.engine.keys.value(), 0.0);

    h.settle();
    assert_eq!(h.position(), (-500.0, 0.0));
    assert_eq!(h.count(EventKind::ScrollEnd), 1);
}

#[test]
fn test_scroll_to_current_position_is_idempotent() {
    let mut h = Harness::new(both_axes(), grid());
    h.engine.scroll_to(-100.0, -100.0, 0.0, None);
    h.clear();

    h.engine.scroll_to(-100.0, -100.0, 0.0, None);
    h.engine.scroll_to(-100.0, -100.0, 300.0, None);

    assert!(h.offsets.borrow().is_empty());
    assert!(h.events.borrow().is_empty());
    assert!(!h.engine.state().is_animating);
    assert_eq!(h.engine.scheduler().pending(), 0);
}

#[test]
fn test_rubber_band_settles_in_bounds() {
    let mut h = Harness::new(ScrollOptions::default(), list());
    h.press(PointerKind::Touch, 0.0, 100.0);
    h.drag_to(PointerKind::Touch, 0.0, 130.0);
    h.drag_to(PointerKind::Touch, 0.0, 160.0);
    let (_, y) = h.position();
    assert!(y > 0.0 && y < 10.0, "damped overshoot, got {}", y);

    h.release(PointerKind::Touch);
    assert!(h.engine.state().is_animating);
    h.settle();

    let state = h.engine.state();
    assert!(state.max_scroll_y <= state.y && state.y <= 0.0);
    assert_eq!(h.position(), (0.0, 0.0));
    assert_eq!(
        h.kinds(),
        vec![
            EventKind::BeforeScrollStart,
            EventKind::ScrollStart,
            EventKind::ScrollEnd
        ]
    );
}

#[test]
fn test_drag_without_bounce_clamps() {
    let options = ScrollOptions {
        bounce: false,
        ..Default::default()
    };
    let mut h = Harness::new(options, list());
    h.press(PointerKind::Mouse, 0.0, 100.0);
    h.drag_to(PointerKind::Mouse, 0.0, 160.0);
    assert_eq!(h.position(), (0.0, 0.0));
}

#[test]
fn test_release_hands_off_to_momentum() {
    let mut h = Harness::new(ScrollOptions::default(), list());
    h.press(PointerKind::Touch, 0.0, 500.0);
    h.advance(100.0);
    h.drag_to(PointerKind::Touch, 0.0, 400.0);
    assert_eq!(h.position(), (0.0, -100.0));

    h.release(PointerKind::Touch);
    // 1 px/ms coasts 1 / 0.0012 px further
    let task = *h.engine.animation.task().unwrap();
    assert_eq!(task.dest_y, -933.0);
    assert!((task.duration - 1666.666).abs() < 0.01);

    h.settle();
    assert_eq!(h.position(), (0.0, -933.0));
    assert_eq!(h.count(EventKind::ScrollEnd), 1);
}

#[test]
fn test_slow_release_has_no_momentum() {
    let mut h = Harness::new(ScrollOptions::default(), list());
    h.press(PointerKind::Touch, 0.0, 500.0);
    h.advance(100.0);
    h.drag_to(PointerKind::Touch, 0.0, 400.0);
    h.advance(250.0);
    h.drag_to(PointerKind::Touch, 0.0, 390.0);
    h.advance(320.0);
    h.release(PointerKind::Touch);

    assert!(!h.engine.state().is_animating);
    assert_eq!(h.position(), (0.0, -110.0));
    assert_eq!(h.kinds().last(), Some(&EventKind::ScrollEnd));
}

#[test]
fn test_new_gesture_cancels_animation() {
    let mut h = Harness::new(ScrollOptions::default(), list());
    h.engine.scroll_to(0.0, -1000.0, 1000.0, None);
    h.advance(100.0);
    let frozen = h.position();
    assert!(frozen.1 < 0.0 && frozen.1 > -1000.0);
    h.clear();

    h.press(PointerKind::Touch, 0.0, 0.0);
    assert_eq!(
        h.kinds(),
        vec![EventKind::ScrollEnd, EventKind::BeforeScrollStart]
    );
    assert!(!h.engine.state().is_animating);
    assert_eq!(h.engine.scheduler().pending(), 0);

    // Late deliveries of any old task id are harmless
    for id in 0..64 {
        h.engine.fire(TaskId(id));
    }
    h.advance(500.0);
    assert_eq!(h.position(), frozen);
    assert!(h.offsets.borrow().is_empty());
}

#[test]
fn test_tap_emits_scroll_cancel() {
    let mut h = Harness::new(ScrollOptions::default(), list());
    h.press(PointerKind::Touch, 0.0, 100.0);
    h.drag_to(PointerKind::Touch, 0.0, 103.0);
    h.release(PointerKind::Touch);
    assert_eq!(
        h.kinds(),
        vec![EventKind::BeforeScrollStart, EventKind::ScrollCancel]
    );
    assert!(h.offsets.borrow().is_empty());
}

#[test]
fn test_flick_reported_to_listeners() {
    let mut h = Harness::new(ScrollOptions::default(), list());
    let flicks = Rc::new(Cell::new(0));
    let seen = flicks.clone();
    h.engine
        .on(EventKind::Flick, Box::new(move |_| seen.set(seen.get() + 1)));

    h.press(PointerKind::Touch, 0.0, 100.0);
    h.advance(50.0);
    h.drag_to(PointerKind::Touch, 0.0, 30.0);
    h.release(PointerKind::Touch);

    assert_eq!(flicks.get(), 1);
    assert!(!h.engine.state().is_animating);
    assert_eq!(h.position(), (0.0, -70.0));
    assert_eq!(h.count(EventKind::ScrollEnd), 0);
}

#[test]
fn test_passthrough_hands_vertical_gesture_back() {
    let mut h = Harness::new(ScrollOptions::virtual_table(), table());

    assert!(h.press(PointerKind::Touch, 100.0, 100.0).handled);
    let disposition = h.drag_to(PointerKind::Touch, 102.0, 130.0);
    assert_eq!(disposition, Disposition::IGNORED);
    assert!(!h.engine.is_dragging());
    assert_eq!(h.drag_to(PointerKind::Touch, 90.0, 140.0), Disposition::IGNORED);
    assert_eq!(h.position(), (0.0, 0.0));

    h.press(PointerKind::Touch, 100.0, 100.0);
    let disposition = h.drag_to(PointerKind::Touch, 70.0, 102.0);
    assert!(disposition.prevent_default);
    assert_eq!(h.position(), (-30.0, 0.0));
}

#[test]
fn test_latched_source_ignores_other_kinds() {
    let mut h = Harness::new(ScrollOptions::default(), list());
    assert!(h.press(PointerKind::Touch, 0.0, 100.0).handled);
    assert_eq!(h.press(PointerKind::Mouse, 0.0, 100.0), Disposition::IGNORED);
    assert_eq!(h.drag_to(PointerKind::Mouse, 0.0, 0.0), Disposition::IGNORED);
    assert_eq!(h.release(PointerKind::Mouse), Disposition::IGNORED);
    assert!(h.engine.is_dragging());
    assert_eq!(h.position(), (0.0, 0.0));
}

#[test]
fn test_only_primary_button_presses() {
    let mut h = Harness::new(ScrollOptions::default(), list());
    let secondary = |kind| InputEvent::Press {
        kind,
        x: 0.0,
        y: 0.0,
        button: 2,
        target: EventTarget::default(),
    };
    assert_eq!(
        h.engine.handle_event(&secondary(PointerKind::Mouse)),
        Disposition::IGNORED
    );
    assert!(h.engine.handle_event(&secondary(PointerKind::Touch)).handled);
}

#[test]
fn test_prevent_default_exception() {
    let mut h = Harness::new(ScrollOptions::default(), list());
    let press = |tag: &str| InputEvent::Press {
        kind: PointerKind::Mouse,
        x: 0.0,
        y: 0.0,
        button: 0,
        target: EventTarget::tag(tag),
    };
    assert!(!h.engine.handle_event(&press("INPUT")).prevent_default);
    h.release(PointerKind::Mouse);
    assert!(h.engine.handle_event(&press("DIV")).prevent_default);
}

#[test]
fn test_disabled_engine_ignores_input() {
    let options = ScrollOptions {
        key_bindings: KeyBindings {
            enabled: true,
            ..Default::default()
        },
        ..wheel_options(1.0)
    };
    let mut h = Harness::new(options, list());
    h.engine.disable();

    assert_eq!(h.press(PointerKind::Touch, 0.0, 0.0), Disposition::IGNORED);
    assert_eq!(h.wheel(0.0, 50.0), Disposition::IGNORED);
    assert_eq!(h.key(KEY_END), Disposition::IGNORED);
    assert!(h.events.borrow().is_empty());

    h.engine.scroll_to(0.0, -50.0, 0.0, None);
    assert_eq!(h.position(), (0.0, -50.0));

    h.engine.enable();
    assert!(h.press(PointerKind::Touch, 0.0, 0.0).handled);
}

#[test]
fn test_wheel_end_waits_for_quiet_period() {
    let mut h = Harness::new(wheel_options(1.0), list());
    h.wheel(0.0, 30.0);
    h.advance(350.0);
    h.wheel(0.0, 30.0);
    h.advance(350.0);
    h.wheel(0.0, 30.0);
    h.advance(390.0);
    assert_eq!(h.count(EventKind::ScrollEnd), 0);

    h.advance(20.0);
    assert_eq!(h.count(EventKind::ScrollStart), 1);
    assert_eq!(h.count(EventKind::ScrollEnd), 1);
    assert_eq!(h.position(), (0.0, -90.0));
}

#[test]
fn test_wheel_end_follows_running_tween() {
    let mut options = wheel_options(1.0);
    options.mouse_wheel.ease_time = 1000.0;
    let mut h = Harness::new(options, list());

    h.wheel(0.0, 100.0);
    h.advance(500.0);
    assert!(!h.engine.wheel.active);
    assert_eq!(h.count(EventKind::ScrollEnd), 0);

    h.settle();
    assert_eq!(h.count(EventKind::ScrollEnd), 1);
    assert_eq!(h.position(), (0.0, -100.0));
}

#[test]
fn test_wheel_throttle_drains_cached_deltas() {
    let mut options = wheel_options(1.0);
    options.mouse_wheel.throttle_time = 100.0;
    options.mouse_wheel.ease_time = 100.0;
    let mut h = Harness::new(options, list());

    h.wheel(0.0, 10.0);
    h.advance(20.0);
    h.wheel(0.0, 10.0);
    h.advance(20.0);
    h.wheel(0.0, 10.0);
    assert_eq!(h.engine.wheel.cache.len(), 2);

    h.advance(100.0);
    assert_eq!(h.position(), (0.0, -10.0));
    h.wheel(0.0, 10.0);
    assert!(h.engine.wheel.cache.is_empty());

    h.settle();
    assert_eq!(h.position(), (0.0, -40.0));
    assert_eq!(h.count(EventKind::ScrollEnd), 1);
}

#[test]
fn test_wheel_past_edge_is_damped() {
    let mut h = Harness::new(wheel_options(1.0), list());
    h.wheel(0.0, -100.0);
    let task = *h.engine.animation.task().unwrap();
    assert!((task.dest_y - 10.0).abs() < 1e-9);

    h.settle();
    assert_eq!(h.position(), (0.0, 0.0));
}

#[test]
fn test_unrecognized_wheel_is_ignored() {
    let mut h = Harness::new(wheel_options(1.0), list());
    let disposition = h
        .engine
        .handle_event(&InputEvent::Wheel(RawWheelEvent::default()));
    assert_eq!(disposition, Disposition::IGNORED);
    assert!(h.events.borrow().is_empty());
    assert!(!h.engine.wheel.active);
}

#[test]
fn test_scroll_to_closes_wheel_session() {
    let mut h = Harness::new(wheel_options(1.0), list());
    h.wheel(0.0, 100.0);
    h.engine.scroll_to(0.0, -500.0, 0.0, None);
    h.settle();
    assert_eq!(h.position(), (0.0, -500.0));
    assert_eq!(h.kinds(), vec![EventKind::ScrollStart, EventKind::ScrollEnd]);
}

#[test]
fn test_refresh_snaps_back_into_new_extent() {
    let mut h = Harness::new(ScrollOptions::default(), list());
    h.engine.scroll_to(0.0, -1500.0, 0.0, None);
    h.clear();

    h.extents.set(Extents {
        content_height: 1000.0,
        ..list()
    });
    h.engine.refresh();

    assert_eq!(h.engine.state().max_scroll_y, -700.0);
    assert_eq!(h.position(), (0.0, -700.0));
    assert_eq!(h.kinds(), vec![EventKind::Refresh]);
    assert_eq!(*h.offsets.borrow(), vec![(0.0, -700.0)]);
}

#[test]
fn test_resize_is_debounced() {
    let mut h = Harness::new(ScrollOptions::default(), list());
    h.engine.handle_event(&InputEvent::Resize);
    h.advance(30.0);
    h.engine.handle_event(&InputEvent::Resize);
    h.advance(50.0);
    assert_eq!(h.count(EventKind::Refresh), 0);

    h.advance(20.0);
    assert_eq!(h.count(EventKind::Refresh), 1);
    h.settle();
    assert_eq!(h.count(EventKind::Refresh), 1);
}

#[test]
fn test_destroy_mid_animation() {
    let mut h = Harness::new(ScrollOptions::default(), list());
    h.engine.scroll_to(0.0, -1000.0, 1000.0, None);
    h.advance(100.0);
    h.clear();

    h.engine.destroy();
    assert_eq!(h.kinds(), vec![EventKind::Destroy]);
    assert_eq!(h.engine.scheduler().pending(), 0);
    assert!(h.engine.is_destroyed());

    let frozen = h.position();
    h.settle();
    h.engine.destroy();
    assert_eq!(h.press(PointerKind::Touch, 0.0, 0.0), Disposition::IGNORED);
    h.engine.scroll_to(0.0, 0.0, 0.0, None);

    assert_eq!(h.position(), frozen);
    assert_eq!(h.events.borrow().len(), 1);
    assert!(h.offsets.borrow().is_empty());
}

#[test]
fn test_scroll_to_target() {
    let targets = vec![(
        "cell".to_string(),
        TargetRect {
            left: 900.0,
            top: 600.0,
            width: 100.0,
            height: 40.0,
        },
    )];
    let mut h = Harness::with_targets(both_axes(), grid(), targets);

    h.engine
        .scroll_to_target("missing", Some(0.0), TargetOffset::None, TargetOffset::None);
    assert!(h.offsets.borrow().is_empty());

    h.engine.scroll_to_target(
        "cell",
        Some(0.0),
        TargetOffset::Center,
        TargetOffset::Pixels(10.0),
    );
    assert_eq!(h.position(), (-750.0, -610.0));

    h.engine
        .scroll_to_target("cell", None, TargetOffset::None, TargetOffset::None);
    let task = *h.engine.animation.task().unwrap();
    assert_eq!(task.duration, 150.0);
    h.settle();
    assert_eq!(h.position(), (-900.0, -600.0));
}

#[test]
fn test_scroll_to_target_clamps() {
    let targets = vec![(
        "last".to_string(),
        TargetRect {
            left: 1400.0,
            top: 0.0,
            width: 50.0,
            height: 300.0,
        },
    )];
    let mut h = Harness::with_targets(ScrollOptions::virtual_table(), table(), targets);
    h.engine
        .scroll_to_target("last", Some(0.0), TargetOffset::None, TargetOffset::None);
    assert_eq!(h.position(), (-1050.0, 0.0));
}

#[test]
fn test_proxy_scrollbar_echo_is_not_forwarded() {
    let mut h = Harness::new(ScrollOptions::virtual_table(), table());
    h.engine.scroll_to(-120.6, 0.0, 0.0, None);
    h.clear();

    h.engine.proxy_scrolled(120.0);
    assert!(h.offsets.borrow().is_empty());

    h.engine.proxy_scrolled(300.0);
    assert_eq!(h.position(), (-300.0, 0.0));
    assert_eq!(*h.offsets.borrow(), vec![(300.0, 0.0)]);
}

#[test]
fn test_translate_reports_viewport_offsets() {
    let mut h = Harness::new(ScrollOptions::virtual_table(), table());
    h.engine.scroll_to(-200.0, 0.0, 0.0, None);

    let events = h.events.borrow();
    let translate = events
        .iter()
        .find(|e| e.kind == EventKind::Translate)
        .unwrap();
    assert_eq!((translate.x, translate.y), (200.0, 0.0));
    assert_eq!(h.engine.state().x, -200.0);
    assert_eq!(*h.offsets.borrow(), vec![(200.0, 0.0)]);
}

#[test]
fn test_probe_level_gates_scroll_signal() {
    let mut h = Harness::new(ScrollOptions::virtual_table(), table());
    assert_eq!(h.engine.options().probe_type, ProbeLevel::Realtime);
    h.engine.scroll_to(-300.0, 0.0, 100.0, None);
    h.settle();
    assert!(h.count(EventKind::Scroll) >= 5);

    let mut h = Harness::new(both_axes(), grid());
    h.engine.scroll_to(-300.0, 0.0, 100.0, None);
    h.settle();
    assert_eq!(h.count(EventKind::Scroll), 0);
    assert_eq!(h.count(EventKind::ScrollEnd), 1);
}

#[test]
fn test_mouse_events_toggle() {
    let mut h = Harness::new(ScrollOptions::default(), list());
    h.engine.disable_mouse_events();
    assert_eq!(h.press(PointerKind::Mouse, 0.0, 0.0), Disposition::IGNORED);

    h.engine.apply_pointer_capability(&Coarse(true));
    assert!(h.press(PointerKind::Mouse, 0.0, 0.0).handled);
    h.release(PointerKind::Mouse);

    h.engine.apply_pointer_capability(&Coarse(false));
    assert_eq!(h.press(PointerKind::Touch, 0.0, 0.0), Disposition::IGNORED);
}

#[test]
fn test_input_capabilities_pick_sources() {
    let mut h = Harness::new(ScrollOptions::default(), list());
    h.engine.set_input_capabilities(InputCapabilities {
        pointer: true,
        touch: true,
    });
    assert_eq!(h.press(PointerKind::Touch, 0.0, 0.0), Disposition::IGNORED);
    assert!(h.press(PointerKind::Pointer, 0.0, 0.0).handled);
}

#[test]
fn test_wheel_ease_time_floor() {
    let mut options = wheel_options(1.0);
    options.mouse_wheel.ease_time = 20.0;
    let h = Harness::new(options, list());
    assert_eq!(h.engine.options().mouse_wheel.ease_time, 100.0);
}

#[test]
fn test_invalid_exception_pattern_fails_construction() {
    let options = ScrollOptions {
        prevent_default_exception: PreventDefaultException {
            tag_name: Some("(".to_string()),
            class_name: None,
        },
        ..Default::default()
    };
    let clock = ManualClock::new(0.0);
    let result = ScrollEngine::new(options, TaskQueue::new(clock), Box::new(list()));
    assert!(matches!(result, Err(Error::Pattern(_))));
}

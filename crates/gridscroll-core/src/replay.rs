//! Scripted engine runs on a manual clock
//!
//! A script lists timestamped actions: raw input, programmatic scrolls and
//! geometry changes. [`run`] replays it against a fresh engine, jumping the
//! clock from one due frame or timer to the next, and returns every signal
//! the engine emitted with the time it was emitted at.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ScrollOptions;
use crate::engine::ScrollEngine;
use crate::events::{EventKind, ScrollEvent};
use crate::host::{TargetOffset, TargetRect, ViewportGeometry};
use crate::input::InputEvent;
use crate::scroll::easing::Easing;
use crate::scroll::scheduler::{TaskQueue, DEFAULT_FRAME_INTERVAL_MS};
use crate::scroll::state::Extents;
use crate::scroll::timing::{Clock, ManualClock};
use crate::{Error, Result};

/// Stop settling after this many fired tasks
const MAX_SETTLE_TASKS: usize = 100_000;

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    pub viewport: ScriptViewport,
    /// Engine options; the configured ones are used when absent
    #[serde(default)]
    pub options: Option<ScrollOptions>,
    #[serde(default = "default_frame_interval")]
    pub frame_interval: f64,
    pub steps: Vec<ScriptStep>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScriptViewport {
    #[serde(flatten)]
    pub extents: Extents,
    #[serde(default)]
    pub targets: HashMap<String, TargetRect>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptStep {
    /// Milliseconds from the start of the run
    pub at: f64,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Input {
        event: InputEvent,
    },
    ScrollTo {
        x: f64,
        y: f64,
        #[serde(default)]
        duration: f64,
        #[serde(default)]
        easing: Option<Easing>,
    },
    ScrollBy {
        dx: f64,
        dy: f64,
        #[serde(default)]
        duration: f64,
        #[serde(default)]
        easing: Option<Easing>,
    },
    ScrollToTarget {
        target: String,
        #[serde(default)]
        duration: Option<f64>,
        #[serde(default)]
        offset_x: TargetOffset,
        #[serde(default)]
        offset_y: TargetOffset,
    },
    /// Change what the geometry query reports (takes effect on refresh)
    Geometry {
        extents: Extents,
    },
    Refresh,
    Enable,
    Disable,
    EnableMouseEvents,
    DisableMouseEvents,
    /// The proxy scrollbar reported a native scroll position
    ProxyScroll {
        scroll_left: f64,
    },
    Destroy,
}

/// One emitted signal
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Record {
    pub time: f64,
    #[serde(flatten)]
    pub event: ScrollEvent,
}

fn default_frame_interval() -> f64 {
    DEFAULT_FRAME_INTERVAL_MS
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let script: Script = serde_json::from_str(content)?;
        script.validate()?;
        Ok(script)
    }

    fn validate(&self) -> Result<()> {
        if !(self.frame_interval.is_finite() && self.frame_interval > 0.0) {
            return Err(Error::Script(format!(
                "frame_interval must be positive, got {}",
                self.frame_interval
            )));
        }
        let mut previous = 0.0;
        for (i, step) in self.steps.iter().enumerate() {
            if !step.at.is_finite() || step.at < previous {
                return Err(Error::Script(format!(
                    "step {} at {}ms comes before the previous step at {}ms",
                    i, step.at, previous
                )));
            }
            previous = step.at;
        }
        Ok(())
    }
}

/// Geometry whose answers a script can change mid-run
#[derive(Debug, Clone, Default)]
pub struct SharedGeometry {
    inner: Rc<RefCell<ScriptViewport>>,
}

impl SharedGeometry {
    pub fn new(viewport: ScriptViewport) -> Self {
        Self {
            inner: Rc::new(RefCell::new(viewport)),
        }
    }

    pub fn set_extents(&self, extents: Extents) {
        self.inner.borrow_mut().extents = extents;
    }
}

impl ViewportGeometry for SharedGeometry {
    fn extents(&self) -> Extents {
        self.inner.borrow().extents
    }

    fn target_rect(&self, target: &str) -> Option<TargetRect> {
        self.inner.borrow().targets.get(target).copied()
    }
}

/// Replay `script` and collect every emitted signal
///
/// `options` is used unless the script carries its own.
pub fn run(script: &Script, options: ScrollOptions) -> Result<Vec<Record>> {
    let clock = ManualClock::new(0.0);
    let queue = TaskQueue::with_frame_interval(clock.clone(), script.frame_interval);
    let geometry = SharedGeometry::new(script.viewport.clone());
    let options = script.options.clone().unwrap_or(options);

    let mut engine = ScrollEngine::new(options, queue, Box::new(geometry.clone()))?;

    let log: Rc<RefCell<Vec<Record>>> = Rc::new(RefCell::new(Vec::new()));
    for kind in EventKind::ALL {
        let log = log.clone();
        let clock = clock.clone();
        engine.on(
            kind,
            Box::new(move |event| {
                log.borrow_mut().push(Record {
                    time: clock.now(),
                    event: *event,
                })
            }),
        );
    }

    for step in &script.steps {
        advance_to(&mut engine, &clock, step.at);
        apply(&mut engine, &geometry, &step.action);
    }
    settle(&mut engine, &clock);

    debug!(steps = script.steps.len(), records = log.borrow().len(), "replay finished");
    let records = std::mem::take(&mut *log.borrow_mut());
    Ok(records)
}

fn apply(engine: &mut ScrollEngine<TaskQueue<ManualClock>>, geometry: &SharedGeometry, action: &Action) {
    match action {
        Action::Input { event } => {
            engine.handle_event(event);
        }
        Action::ScrollTo {
            x,
            y,
            duration,
            easing,
        } => engine.scroll_to(*x, *y, *duration, *easing),
        Action::ScrollBy {
            dx,
            dy,
            duration,
            easing,
        } => engine.scroll_by(*dx, *dy, *duration, *easing),
        Action::ScrollToTarget {
            target,
            duration,
            offset_x,
            offset_y,
        } => engine.scroll_to_target(target, *duration, *offset_x, *offset_y),
        Action::Geometry { extents } => geometry.set_extents(*extents),
        Action::Refresh => engine.refresh(),
        Action::Enable => engine.enable(),
        Action::Disable => engine.disable(),
        Action::EnableMouseEvents => engine.enable_mouse_events(),
        Action::DisableMouseEvents => engine.disable_mouse_events(),
        Action::ProxyScroll { scroll_left } => engine.proxy_scrolled(*scroll_left),
        Action::Destroy => engine.destroy(),
    }
}

/// Fire everything due up to `target`, then park the clock there
fn advance_to(engine: &mut ScrollEngine<TaskQueue<ManualClock>>, clock: &ManualClock, target: f64) {
    while let Some(due) = engine.scheduler().next_due() {
        if due > target {
            break;
        }
        clock.set(due.max(clock.now()));
        engine.pump();
    }
    clock.set(target.max(clock.now()));
}

/// Run the engine until nothing is pending
fn settle(engine: &mut ScrollEngine<TaskQueue<ManualClock>>, clock: &ManualClock) {
    let mut fired = 0;
    while let Some(due) = engine.scheduler().next_due() {
        clock.set(due.max(clock.now()));
        fired += engine.pump();
        if fired > MAX_SETTLE_TASKS {
            warn!(fired, "replay did not settle, giving up");
            break;
        }
    }
}

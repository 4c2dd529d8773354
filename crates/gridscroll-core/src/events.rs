//! Typed lifecycle signals and their subscribers

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// Signals the engine emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    /// A press was accepted; nothing has moved yet
    BeforeScrollStart,
    ScrollStart,
    /// Continuous position report, gated by the probe level
    Scroll,
    ScrollEnd,
    /// A press ended without crossing the movement threshold
    ScrollCancel,
    Flick,
    /// Every position broadcast
    Translate,
    Refresh,
    Destroy,
}

impl EventKind {
    pub const ALL: [EventKind; 9] = [
        EventKind::BeforeScrollStart,
        EventKind::ScrollStart,
        EventKind::Scroll,
        EventKind::ScrollEnd,
        EventKind::ScrollCancel,
        EventKind::Flick,
        EventKind::Translate,
        EventKind::Refresh,
        EventKind::Destroy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EventKind::BeforeScrollStart => "beforeScrollStart",
            EventKind::ScrollStart => "scrollStart",
            EventKind::Scroll => "scroll",
            EventKind::ScrollEnd => "scrollEnd",
            EventKind::ScrollCancel => "scrollCancel",
            EventKind::Flick => "flick",
            EventKind::Translate => "translate",
            EventKind::Refresh => "refresh",
            EventKind::Destroy => "destroy",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload handed to subscribers
///
/// `x`/`y` are the internal scroll offsets, except for `Translate`, which
/// carries the horizontal offset in viewport convention (positive-going).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollEvent {
    #[serde(rename = "event")]
    pub kind: EventKind,
    pub x: f64,
    pub y: f64,
}

/// Handle returned by [`EventBus::on`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type Listener = Box<dyn FnMut(&ScrollEvent)>;

/// Per-signal subscriber lists
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: HashMap<EventKind, Vec<(ListenerId, Listener)>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, kind: EventKind, listener: Listener) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.entry(kind).or_default().push((id, listener));
        id
    }

    /// Remove a subscriber; returns false for unknown handles
    pub fn off(&mut self, id: ListenerId) -> bool {
        for list in self.listeners.values_mut() {
            if let Some(pos) = list.iter().position(|(existing, _)| *existing == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    pub fn has_listeners(&self, kind: EventKind) -> bool {
        self.listeners.get(&kind).is_some_and(|list| !list.is_empty())
    }

    /// Deliver to every subscriber of the event's kind, in subscription order
    pub fn emit(&mut self, event: ScrollEvent) {
        if let Some(list) = self.listeners.get_mut(&event.kind) {
            for (_, listener) in list.iter_mut() {
                listener(&event);
            }
        }
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.len())
            .finish()
    }
}

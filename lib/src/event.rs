//! Typed events and subscriptions.
//!
//! A small explicit observer registry. Handlers receive the event as
//! a parameter; there is no implicit scope rebinding and no
//! stringly-typed event names.

use crate::cells::{Coord, State};

/// An event fired by the automaton.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// A generation was committed.
    GenerationAdvanced {
        /// The generation number after the tick.
        generation: u64,
        /// Number of cells whose state changed.
        changed: usize,
    },
    /// A single cell was edited.
    StateChanged { coord: Coord, state: State },
    /// A pattern was loaded.
    Loaded { cells: usize },
    /// The board was cleared.
    Cleared,
    /// The board extents changed.
    Resized { width: i32, height: i32 },
    /// The automaton started running.
    Started,
    /// The automaton was paused.
    Paused,
}

/// The kind of an [`Event`], used to filter subscriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    GenerationAdvanced,
    StateChanged,
    Loaded,
    Cleared,
    Resized,
    Started,
    Paused,
}

impl Event {
    /// The kind of this event.
    pub const fn kind(&self) -> EventKind {
        match self {
            Event::GenerationAdvanced { .. } => EventKind::GenerationAdvanced,
            Event::StateChanged { .. } => EventKind::StateChanged,
            Event::Loaded { .. } => EventKind::Loaded,
            Event::Cleared => EventKind::Cleared,
            Event::Resized { .. } => EventKind::Resized,
            Event::Started => EventKind::Started,
            Event::Paused => EventKind::Paused,
        }
    }
}

/// A handle returned by `subscribe`; pass it back to `unsubscribe`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Handler = Box<dyn FnMut(&Event)>;

/// The subscription registry.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    handlers: Vec<(Subscription, EventKind, Handler)>,
}

impl Listeners {
    /// Registers a handler for one event kind.
    pub(crate) fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> Subscription
    where
        F: FnMut(&Event) + 'static,
    {
        let id = Subscription(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, kind, Box::new(handler)));
        id
    }

    /// Removes a handler. Returns `false` if it was already gone.
    pub(crate) fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(id, _, _)| *id != subscription);
        self.handlers.len() != before
    }

    /// Fires an event to every handler subscribed to its kind.
    pub(crate) fn emit(&mut self, event: &Event) {
        let kind = event.kind();
        for (_, subscribed, handler) in self.handlers.iter_mut() {
            if *subscribed == kind {
                handler(event);
            }
        }
    }
}

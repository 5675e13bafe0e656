//! # Events
//!
//! The closed set of events the host wires up, plus the event object handed
//! to listeners.
//!
//! Listeners never touch application state. They inspect the event (and the
//! document, e.g. to read form fields) and hand back an `Action` for the
//! controller to apply once dispatch has finished.

use std::fmt;
use std::rc::Rc;

use crate::core::action::Action;
use crate::dom::{Document, DomError, NodeId};

/// Events the element builder knows how to wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
}

impl EventKind {
    /// Every supported event, in the order the builder scans them.
    pub const ALL: [EventKind; 2] = [EventKind::Click, EventKind::Submit];

    pub fn name(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Submit => "submit",
        }
    }

    /// Look up an event by its DOM name (`"click"`, `"submit"`).
    pub fn parse(name: &str) -> Result<Self, DomError> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| DomError::UnsupportedEvent(name.to_string()))
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A listener callback. Returns the action to apply, if any.
pub type Handler = Rc<dyn Fn(&mut Event, &Document) -> Option<Action>>;

/// Wrap a closure as a `Handler`.
pub fn handler(f: impl Fn(&mut Event, &Document) -> Option<Action> + 'static) -> Handler {
    Rc::new(f)
}

/// The event object passed to listeners.
#[derive(Debug)]
pub struct Event {
    kind: EventKind,
    target: NodeId,
    default_prevented: bool,
}

impl Event {
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            default_prevented: false,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Cancel the host's default action (form submission navigation, or the
    /// implicit submit a submit button performs on click).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Result of dispatching one event, including any default-action events it
/// triggered.
#[derive(Debug, Default)]
pub struct Dispatch {
    pub actions: Vec<Action>,
    pub default_prevented: bool,
}

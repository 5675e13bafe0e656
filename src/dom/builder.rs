//! # Element Builder
//!
//! Turns a declarative `(descriptor, props, children)` triple into nodes in a
//! [`Document`].
//!
//! ```text
//! create_element(Host("li"), props, children)
//!     → new <li>, props copied on, bound events wired, children appended
//!
//! create_element(Component(f), props, children)
//!     → f(doc, props + children)          // whatever the component builds
//! ```
//!
//! ## Descriptors
//!
//! A descriptor is either a host tag or a component. Components are plain
//! closures, so they capture whatever typed data they need (a ticket, a
//! comment slice) instead of receiving it through the property bag. They may
//! build host nodes or delegate to other components.
//!
//! ## Event bindings
//!
//! Handlers are declared per event kind in an explicit table on [`Props`].
//! Only the wired set ([`EventKind::ALL`]) can be bound; binding by name goes
//! through [`Props::try_on`], which rejects anything else up front.
//!
//! ## Children
//!
//! Each child is one leaf or a list of leaves. Lists are flattened one level,
//! and a list of lists cannot be expressed.

use crate::dom::event::{EventKind, Handler};
use crate::dom::{Document, DomError, NodeId};

/// A component: builds a node from props (with `children` injected).
pub type ComponentFn<'a> = Box<dyn FnOnce(&mut Document, Props) -> Result<NodeId, DomError> + 'a>;

pub enum Descriptor<'a> {
    /// A host element with the given tag.
    Host(&'a str),
    /// A function component.
    Component(ComponentFn<'a>),
}

impl<'a> Descriptor<'a> {
    pub fn component(f: impl FnOnce(&mut Document, Props) -> Result<NodeId, DomError> + 'a) -> Self {
        Descriptor::Component(Box::new(f))
    }
}

/// A single child: an existing node or text to wrap in a text node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf {
    Node(NodeId),
    Text(String),
}

impl From<NodeId> for Leaf {
    fn from(node: NodeId) -> Self {
        Leaf::Node(node)
    }
}

impl From<&str> for Leaf {
    fn from(text: &str) -> Self {
        Leaf::Text(text.to_string())
    }
}

impl From<String> for Leaf {
    fn from(text: String) -> Self {
        Leaf::Text(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    One(Leaf),
    /// Flattened into the parent, one item per child.
    Many(Vec<Leaf>),
}

impl From<Leaf> for Child {
    fn from(leaf: Leaf) -> Self {
        Child::One(leaf)
    }
}

impl From<NodeId> for Child {
    fn from(node: NodeId) -> Self {
        Child::One(Leaf::Node(node))
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::One(Leaf::from(text))
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::One(Leaf::Text(text))
    }
}

impl From<Vec<NodeId>> for Child {
    fn from(nodes: Vec<NodeId>) -> Self {
        Child::Many(nodes.into_iter().map(Leaf::Node).collect())
    }
}

impl From<Vec<Leaf>> for Child {
    fn from(leaves: Vec<Leaf>) -> Self {
        Child::Many(leaves)
    }
}

/// Property bag for [`create_element`].
#[derive(Clone, Default)]
pub struct Props {
    properties: Vec<(String, String)>,
    bindings: Vec<(EventKind, Handler)>,
    /// Flattened children, injected by the builder before a component runs.
    pub children: Vec<Leaf>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property. If the name repeats, the later value wins.
    pub fn prop(mut self, name: &str, value: impl Into<String>) -> Self {
        self.properties.push((name.to_string(), value.into()));
        self
    }

    /// Bind `handler` to `kind`, replacing any earlier binding for it.
    pub fn on(mut self, kind: EventKind, handler: Handler) -> Self {
        self.bindings.retain(|(k, _)| *k != kind);
        self.bindings.push((kind, handler));
        self
    }

    /// Bind by event name. Names outside the wired set are rejected.
    pub fn try_on(self, event: &str, handler: Handler) -> Result<Self, DomError> {
        let kind = EventKind::parse(event)?;
        Ok(self.on(kind, handler))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn handler(&self, kind: EventKind) -> Option<&Handler> {
        self.bindings.iter().find(|(k, _)| *k == kind).map(|(_, h)| h)
    }
}

fn flatten(children: Vec<Child>) -> Vec<Leaf> {
    let mut flat = Vec::with_capacity(children.len());
    for child in children {
        match child {
            Child::One(leaf) => flat.push(leaf),
            Child::Many(leaves) => flat.extend(leaves),
        }
    }
    flat
}

/// Build a node from a descriptor, props and children.
///
/// Components receive `props` with `children` set to the flattened child
/// list, and their result is returned as-is. Host elements get every property
/// assigned in order, a listener for each bound event, and their children
/// appended in order (text leaves become text nodes).
pub fn create_element(
    doc: &mut Document,
    descriptor: Descriptor<'_>,
    mut props: Props,
    children: Vec<Child>,
) -> Result<NodeId, DomError> {
    let children = flatten(children);
    match descriptor {
        Descriptor::Component(component) => {
            props.children = children;
            component(doc, props)
        }
        Descriptor::Host(tag) => {
            let element = doc.create_element(tag)?;
            for (name, value) in &props.properties {
                doc.set_property(element, name, value)?;
            }
            for kind in EventKind::ALL {
                if let Some(handler) = props.handler(kind) {
                    doc.add_event_listener(element, kind, handler.clone())?;
                }
            }
            for leaf in children {
                let node = match leaf {
                    Leaf::Node(node) => node,
                    Leaf::Text(text) => doc.create_text(&text),
                };
                doc.append(element, node)?;
            }
            Ok(element)
        }
    }
}

/// Shorthand for a host element.
pub fn h(doc: &mut Document, tag: &str, props: Props, children: Vec<Child>) -> Result<NodeId, DomError> {
    create_element(doc, Descriptor::Host(tag), props, children)
}

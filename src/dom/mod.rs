//! # Host Document
//!
//! A small in-process stand-in for the browser DOM. It provides exactly the
//! operations the element builder and the render loop rely on:
//!
//! - element creation by tag name
//! - property assignment
//! - event-listener attachment and dispatch
//! - child append and wholesale child replacement
//! - form-data extraction (see [`form`])
//!
//! ```text
//! Document
//! ├── nodes: HashMap<NodeId, NodeData>   // arena
//! ├── next_id: u64                       // never reused
//! └── body: NodeId                       // root of the live tree
//! ```
//!
//! `NodeId`s are handed out monotonically and never recycled, so a tree
//! rebuilt from the same state is made of distinct nodes. Subtrees dropped by
//! `replace_children` are removed from the arena together with their
//! listeners.

pub mod builder;
pub mod event;
pub mod form;

use std::collections::HashMap;
use std::fmt;

use log::debug;

use event::{Dispatch, Event, EventKind, Handler};

/// Handle to a node owned by a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// Tag name is empty or contains characters a host element cannot have.
    InvalidTagName(String),
    /// Node handle does not refer to a live node (e.g. it was discarded by a re-render).
    UnknownNode(NodeId),
    /// Operation requires an element but the node is a text node.
    NotAnElement(NodeId),
    /// Event name outside the wired set.
    UnsupportedEvent(String),
    /// Insertion would make the node its own ancestor.
    HierarchyRequest(NodeId),
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::InvalidTagName(tag) => write!(f, "invalid tag name: {tag:?}"),
            DomError::UnknownNode(id) => write!(f, "unknown node {id}"),
            DomError::NotAnElement(id) => write!(f, "node {id} is not an element"),
            DomError::UnsupportedEvent(name) => write!(f, "unsupported event: {name:?}"),
            DomError::HierarchyRequest(id) => {
                write!(f, "node {id} cannot be inserted under itself or its descendant")
            }
        }
    }
}

impl std::error::Error for DomError {}

impl From<DomError> for std::io::Error {
    fn from(err: DomError) -> Self {
        std::io::Error::other(err)
    }
}

// ============================================================================
// Nodes
// ============================================================================

enum NodeKind {
    Element {
        tag: String,
        /// Insertion-ordered; re-assigning a name overwrites in place.
        properties: Vec<(String, String)>,
        listeners: Vec<(EventKind, Handler)>,
    },
    Text(String),
}

struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Tags serialized without a closing tag.
const VOID_TAGS: &[&str] = &["input", "br", "hr", "img"];

pub struct Document {
    nodes: HashMap<NodeId, NodeData>,
    next_id: u64,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document containing only a `body` element.
    pub fn new() -> Self {
        let body = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(
            body,
            NodeData {
                kind: NodeKind::Element {
                    tag: "body".to_string(),
                    properties: Vec::new(),
                    listeners: Vec::new(),
                },
                parent: None,
                children: Vec::new(),
            },
        );
        Self {
            nodes,
            next_id: 1,
            body,
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Number of live nodes, `body` included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    fn insert(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            NodeData {
                kind,
                parent: None,
                children: Vec::new(),
            },
        );
        id
    }

    fn node(&self, id: NodeId) -> Result<&NodeData, DomError> {
        self.nodes.get(&id).ok_or(DomError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData, DomError> {
        self.nodes.get_mut(&id).ok_or(DomError::UnknownNode(id))
    }

    /// Create a detached element. Tag names are ASCII, start with a letter and
    /// may contain digits and hyphens; they are stored lowercased.
    pub fn create_element(&mut self, tag: &str) -> Result<NodeId, DomError> {
        let tag = validate_tag(tag)?;
        Ok(self.insert(NodeKind::Element {
            tag,
            properties: Vec::new(),
            listeners: Vec::new(),
        }))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.insert(NodeKind::Text(text.to_string()))
    }

    /// Tag of an element, `None` for text nodes.
    pub fn tag(&self, node: NodeId) -> Result<Option<&str>, DomError> {
        Ok(match &self.node(node)?.kind {
            NodeKind::Element { tag, .. } => Some(tag.as_str()),
            NodeKind::Text(_) => None,
        })
    }

    /// True if `node` is an element with the given tag. Unknown nodes are never a match.
    pub fn is_tag(&self, node: NodeId, tag: &str) -> bool {
        matches!(self.tag(node), Ok(Some(t)) if t == tag)
    }

    /// Assign a property on an element. Later assignments of the same name win.
    pub fn set_property(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        match &mut self.node_mut(node)?.kind {
            NodeKind::Element { properties, .. } => {
                match properties.iter_mut().find(|(n, _)| n == name) {
                    Some((_, existing)) => *existing = value.to_string(),
                    None => properties.push((name.to_string(), value.to_string())),
                }
                Ok(())
            }
            NodeKind::Text(_) => Err(DomError::NotAnElement(node)),
        }
    }

    pub fn property(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.nodes.get(&node)?.kind {
            NodeKind::Element { properties, .. } => properties
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        kind: EventKind,
        handler: Handler,
    ) -> Result<(), DomError> {
        match &mut self.node_mut(node)?.kind {
            NodeKind::Element { listeners, .. } => {
                listeners.push((kind, handler));
                Ok(())
            }
            NodeKind::Text(_) => Err(DomError::NotAnElement(node)),
        }
    }

    /// Number of listeners of `kind` attached to `node`.
    pub fn listener_count(&self, node: NodeId, kind: EventKind) -> usize {
        match self.nodes.get(&node).map(|n| &n.kind) {
            Some(NodeKind::Element { listeners, .. }) => {
                listeners.iter().filter(|(k, _)| *k == kind).count()
            }
            _ => 0,
        }
    }

    pub fn children(&self, node: NodeId) -> Result<&[NodeId], DomError> {
        Ok(&self.node(node)?.children)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    /// True if `ancestor` is `node` or lies on its parent chain.
    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn detach(&mut self, child: NodeId) -> Result<(), DomError> {
        if let Some(old_parent) = self.node(child)?.parent {
            self.node_mut(old_parent)?.children.retain(|c| *c != child);
            self.node_mut(child)?.parent = None;
        }
        Ok(())
    }

    /// Append `child` as the last child of `parent`, moving it if it was
    /// already attached elsewhere.
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if let NodeKind::Text(_) = self.node(parent)?.kind {
            return Err(DomError::NotAnElement(parent));
        }
        self.node(child)?;
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest(child));
        }
        self.detach(child)?;
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Replace every child of `parent` with `children`. The previous children
    /// and their subtrees are discarded.
    pub fn replace_children(&mut self, parent: NodeId, children: Vec<NodeId>) -> Result<(), DomError> {
        if let NodeKind::Text(_) = self.node(parent)?.kind {
            return Err(DomError::NotAnElement(parent));
        }
        for child in &children {
            self.node(*child)?;
            if self.is_inclusive_ancestor(*child, parent) {
                return Err(DomError::HierarchyRequest(*child));
            }
        }
        let old = std::mem::take(&mut self.node_mut(parent)?.children);
        for child in old {
            if let Some(data) = self.nodes.get_mut(&child) {
                data.parent = None;
            }
            // A node being re-inserted must survive the purge
            if !children.contains(&child) {
                self.remove_subtree(child, &children);
            }
        }
        for child in children {
            self.append(parent, child)?;
        }
        Ok(())
    }

    fn remove_subtree(&mut self, root: NodeId, keep: &[NodeId]) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if keep.contains(&id) {
                if let Some(data) = self.nodes.get_mut(&id) {
                    data.parent = None;
                }
                continue;
            }
            if let Some(data) = self.nodes.remove(&id) {
                stack.extend(data.children);
            }
        }
    }

    /// Every node under `root` (exclusive), in document order.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match self.nodes.get(&root) {
            Some(data) => data.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(data) = self.nodes.get(&id) {
                stack.extend(data.children.iter().rev().copied());
            }
        }
        out
    }

    /// First element under `body` whose `id` property equals `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.body)
            .into_iter()
            .find(|node| self.property(*node, "id") == Some(id))
    }

    /// Nearest inclusive ancestor of `node` with the given tag.
    pub fn closest(&self, node: NodeId, tag: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if self.is_tag(id, tag) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    /// Concatenated text of every text node under (and including) `node`.
    pub fn text_content(&self, node: NodeId) -> Result<String, DomError> {
        let mut out = String::new();
        if let NodeKind::Text(text) = &self.node(node)?.kind {
            out.push_str(text);
        }
        for id in self.descendants(node) {
            if let Some(NodeData { kind: NodeKind::Text(text), .. }) = self.nodes.get(&id) {
                out.push_str(text);
            }
        }
        Ok(out)
    }

    /// Serialize `node` and its subtree as HTML.
    pub fn outer_html(&self, node: NodeId) -> Result<String, DomError> {
        let mut out = String::new();
        self.write_html(node, &mut out)?;
        Ok(out)
    }

    fn write_html(&self, node: NodeId, out: &mut String) -> Result<(), DomError> {
        let data = self.node(node)?;
        match &data.kind {
            NodeKind::Text(text) => out.push_str(&escape_html(text)),
            NodeKind::Element { tag, properties, .. } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in properties {
                    out.push(' ');
                    out.push_str(attribute_name(name));
                    out.push_str("=\"");
                    out.push_str(&escape_html(value));
                    out.push('"');
                }
                out.push('>');
                if VOID_TAGS.contains(&tag.as_str()) {
                    return Ok(());
                }
                for child in &data.children {
                    self.write_html(*child, out)?;
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
        Ok(())
    }

    /// Fire `kind` at `target`, running its listeners in attachment order,
    /// then the host's default action unless a listener prevented it.
    ///
    /// Default actions:
    /// - click on a submit button inside a form submits that form
    /// - an unprevented submit would navigate; the host ignores it
    pub fn dispatch(&self, target: NodeId, kind: EventKind) -> Result<Dispatch, DomError> {
        let handlers: Vec<Handler> = match &self.node(target)?.kind {
            NodeKind::Element { listeners, .. } => listeners
                .iter()
                .filter(|(k, _)| *k == kind)
                .map(|(_, h)| h.clone())
                .collect(),
            NodeKind::Text(_) => Vec::new(),
        };

        let mut event = Event::new(kind, target);
        let mut actions = Vec::new();
        for handler in handlers {
            if let Some(action) = handler(&mut event, self) {
                actions.push(action);
            }
        }

        if !event.default_prevented() {
            match kind {
                EventKind::Click if self.is_submit_button(target) => {
                    if let Some(form) = self.closest(target, "form") {
                        let submitted = self.dispatch(form, EventKind::Submit)?;
                        actions.extend(submitted.actions);
                    }
                }
                EventKind::Submit => {
                    debug!("Submit on {} not prevented; ignoring navigation", target);
                }
                EventKind::Click => {}
            }
        }

        Ok(Dispatch {
            actions,
            default_prevented: event.default_prevented(),
        })
    }

    fn is_submit_button(&self, node: NodeId) -> bool {
        self.is_tag(node, "button")
            && matches!(self.property(node, "type"), None | Some("submit"))
    }
}

fn validate_tag(tag: &str) -> Result<String, DomError> {
    let mut chars = tag.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-');
    if valid {
        Ok(tag.to_ascii_lowercase())
    } else {
        Err(DomError::InvalidTagName(tag.to_string()))
    }
}

/// Property names whose HTML attribute is spelled differently.
fn attribute_name(property: &str) -> &str {
    match property {
        "class_name" => "class",
        "html_for" => "for",
        other => other,
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::Action;
    use crate::dom::event::handler;

    #[test]
    fn test_create_element_lowercases_tag() {
        let mut doc = Document::new();
        let div = doc.create_element("DIV").unwrap();
        assert_eq!(doc.tag(div).unwrap(), Some("div"));
    }

    #[test]
    fn test_create_element_rejects_bad_tags() {
        let mut doc = Document::new();
        for bad in ["", "1div", "my tag", "<li>"] {
            assert_eq!(
                doc.create_element(bad),
                Err(DomError::InvalidTagName(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_set_property_overwrites_in_place() {
        let mut doc = Document::new();
        let input = doc.create_element("input").unwrap();
        doc.set_property(input, "name", "title").unwrap();
        doc.set_property(input, "value", "a").unwrap();
        doc.set_property(input, "name", "renamed").unwrap();
        assert_eq!(doc.property(input, "name"), Some("renamed"));
        assert_eq!(
            doc.outer_html(input).unwrap(),
            r#"<input name="renamed" value="a">"#
        );
    }

    #[test]
    fn test_text_nodes_reject_properties() {
        let mut doc = Document::new();
        let text = doc.create_text("hi");
        assert_eq!(
            doc.set_property(text, "id", "x"),
            Err(DomError::NotAnElement(text))
        );
    }

    #[test]
    fn test_append_moves_node() {
        let mut doc = Document::new();
        let a = doc.create_element("div").unwrap();
        let b = doc.create_element("div").unwrap();
        let child = doc.create_text("x");
        doc.append(a, child).unwrap();
        doc.append(b, child).unwrap();
        assert!(doc.children(a).unwrap().is_empty());
        assert_eq!(doc.children(b).unwrap(), &[child]);
        assert_eq!(doc.parent(child), Some(b));
    }

    #[test]
    fn test_append_rejects_cycle() {
        let mut doc = Document::new();
        let outer = doc.create_element("div").unwrap();
        let inner = doc.create_element("span").unwrap();
        doc.append(outer, inner).unwrap();

        assert_eq!(doc.append(outer, outer), Err(DomError::HierarchyRequest(outer)));
        assert_eq!(doc.append(inner, outer), Err(DomError::HierarchyRequest(outer)));

        // Nothing moved
        assert_eq!(doc.parent(outer), None);
        assert_eq!(doc.parent(inner), Some(outer));
        assert!(doc.children(inner).unwrap().is_empty());
        assert_eq!(doc.descendants(outer), vec![inner]);
    }

    #[test]
    fn test_replace_children_rejects_ancestor_without_purging() {
        let mut doc = Document::new();
        let outer = doc.create_element("div").unwrap();
        let inner = doc.create_element("span").unwrap();
        let leaf = doc.create_text("x");
        doc.append(outer, inner).unwrap();
        doc.append(inner, leaf).unwrap();

        assert_eq!(
            doc.replace_children(inner, vec![outer]),
            Err(DomError::HierarchyRequest(outer))
        );
        assert_eq!(doc.children(inner).unwrap(), &[leaf]);
        assert!(doc.contains(leaf));
    }

    #[test]
    fn test_replace_children_discards_old_subtree() {
        let mut doc = Document::new();
        let root = doc.create_element("div").unwrap();
        doc.append(doc.body(), root).unwrap();
        let old = doc.create_element("ul").unwrap();
        let old_item = doc.create_element("li").unwrap();
        doc.append(old, old_item).unwrap();
        doc.append(root, old).unwrap();

        let fresh = doc.create_element("p").unwrap();
        doc.replace_children(root, vec![fresh]).unwrap();

        assert_eq!(doc.children(root).unwrap(), &[fresh]);
        assert!(!doc.contains(old));
        assert!(!doc.contains(old_item));
        assert_eq!(doc.node_count(), 3); // body, root, fresh
    }

    #[test]
    fn test_replace_children_keeps_reinserted_node() {
        let mut doc = Document::new();
        let root = doc.create_element("div").unwrap();
        let keep = doc.create_element("span").unwrap();
        doc.append(root, keep).unwrap();
        doc.replace_children(root, vec![keep]).unwrap();
        assert_eq!(doc.children(root).unwrap(), &[keep]);
    }

    #[test]
    fn test_replace_children_rejects_unknown_node() {
        let mut doc = Document::new();
        let root = doc.create_element("div").unwrap();
        let stale = doc.create_element("span").unwrap();
        doc.append(root, stale).unwrap();
        doc.replace_children(root, vec![]).unwrap();
        assert_eq!(
            doc.replace_children(root, vec![stale]),
            Err(DomError::UnknownNode(stale))
        );
    }

    #[test]
    fn test_get_element_by_id_only_searches_attached_nodes() {
        let mut doc = Document::new();
        let detached = doc.create_element("div").unwrap();
        doc.set_property(detached, "id", "root").unwrap();
        assert_eq!(doc.get_element_by_id("root"), None);

        doc.append(doc.body(), detached).unwrap();
        assert_eq!(doc.get_element_by_id("root"), Some(detached));
    }

    #[test]
    fn test_outer_html_escapes_on_serialization() {
        let mut doc = Document::new();
        let div = doc.create_element("div").unwrap();
        doc.set_property(div, "class_name", "a\"b").unwrap();
        let text = doc.create_text("<b>&</b>");
        doc.append(div, text).unwrap();
        assert_eq!(
            doc.outer_html(div).unwrap(),
            r#"<div class="a&quot;b">&lt;b&gt;&amp;&lt;/b&gt;</div>"#
        );
        // The stored text itself is untouched
        assert_eq!(doc.text_content(div).unwrap(), "<b>&</b>");
    }

    #[test]
    fn test_dispatch_runs_listeners_in_order() {
        let mut doc = Document::new();
        let button = doc.create_element("button").unwrap();
        doc.set_property(button, "type", "button").unwrap();
        doc.add_event_listener(button, EventKind::Click, handler(|_, _| Some(Action::ToggleTicket(1))))
            .unwrap();
        doc.add_event_listener(button, EventKind::Click, handler(|_, _| Some(Action::ToggleTicket(2))))
            .unwrap();
        doc.add_event_listener(button, EventKind::Submit, handler(|_, _| Some(Action::Quit)))
            .unwrap();

        let dispatched = doc.dispatch(button, EventKind::Click).unwrap();
        assert_eq!(
            dispatched.actions,
            vec![Action::ToggleTicket(1), Action::ToggleTicket(2)]
        );
    }

    #[test]
    fn test_submit_button_click_submits_enclosing_form() {
        let mut doc = Document::new();
        let form = doc.create_element("form").unwrap();
        let button = doc.create_element("button").unwrap();
        doc.set_property(button, "type", "submit").unwrap();
        doc.append(form, button).unwrap();
        doc.add_event_listener(
            form,
            EventKind::Submit,
            handler(|event, _| {
                event.prevent_default();
                Some(Action::Quit)
            }),
        )
        .unwrap();

        let dispatched = doc.dispatch(button, EventKind::Click).unwrap();
        assert_eq!(dispatched.actions, vec![Action::Quit]);
        // The click itself was not prevented
        assert!(!dispatched.default_prevented);
    }

    #[test]
    fn test_prevented_click_skips_implicit_submit() {
        let mut doc = Document::new();
        let form = doc.create_element("form").unwrap();
        let button = doc.create_element("button").unwrap();
        doc.append(form, button).unwrap();
        doc.add_event_listener(
            button,
            EventKind::Click,
            handler(|event, _| {
                event.prevent_default();
                None
            }),
        )
        .unwrap();
        doc.add_event_listener(form, EventKind::Submit, handler(|_, _| Some(Action::Quit)))
            .unwrap();

        let dispatched = doc.dispatch(button, EventKind::Click).unwrap();
        assert!(dispatched.actions.is_empty());
        assert!(dispatched.default_prevented);
    }

    #[test]
    fn test_dispatch_on_discarded_node_fails() {
        let mut doc = Document::new();
        let root = doc.create_element("div").unwrap();
        let button = doc.create_element("button").unwrap();
        doc.append(root, button).unwrap();
        doc.replace_children(root, vec![]).unwrap();
        assert!(matches!(
            doc.dispatch(button, EventKind::Click),
            Err(DomError::UnknownNode(_))
        ));
    }
}

//! # Focus & Input Editing
//!
//! The terminal has no pointer-first interaction model, so the host keeps a
//! focus ring over the focusable elements (`button`, `input`) in document
//! order and routes keys to whichever one is focused.
//!
//! Focus is stored as a position in the ring, not as a `NodeId`: every
//! mutation rebuilds the tree with fresh nodes, and the position is what
//! survives a rebuild.

use log::debug;

use crate::core::action::Effect;
use crate::dom::event::EventKind;
use crate::dom::{Document, DomError, NodeId};
use crate::view::Controller;

/// Focusable elements under `root`, in document order.
pub fn focusables(doc: &Document, root: NodeId) -> Vec<NodeId> {
    doc.descendants(root)
        .into_iter()
        .filter(|node| doc.is_tag(*node, "button") || doc.is_tag(*node, "input"))
        .collect()
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Focus {
    pub index: usize,
}

impl Focus {
    /// The focused node, clamping the index to the current ring.
    pub fn current(&mut self, ring: &[NodeId]) -> Option<NodeId> {
        if ring.is_empty() {
            return None;
        }
        self.index = self.index.min(ring.len() - 1);
        Some(ring[self.index])
    }

    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.index = (self.index + 1) % len;
        }
    }

    pub fn prev(&mut self, len: usize) {
        if len > 0 {
            self.index = (self.index + len - 1) % len;
        }
    }

    /// Move focus to `node` if it is in the ring.
    pub fn set(&mut self, ring: &[NodeId], node: NodeId) {
        if let Some(index) = ring.iter().position(|n| *n == node) {
            self.index = index;
        }
    }
}

/// What Enter does on `node`: click a button, or submit the form an input
/// belongs to (implicit submission).
pub fn activate(controller: &mut Controller, node: NodeId) -> Result<Effect, DomError> {
    let doc = controller.document();
    if doc.is_tag(node, "button") {
        return controller.dispatch(node, EventKind::Click);
    }
    if doc.is_tag(node, "input") {
        if let Some(form) = doc.closest(node, "form") {
            return controller.dispatch(form, EventKind::Submit);
        }
        debug!("Input {} is not inside a form; nothing to submit", node);
    }
    Ok(Effect::None)
}

/// Append text to an input's `value`. Non-inputs are ignored.
pub fn insert_text(doc: &mut Document, node: NodeId, text: &str) -> Result<(), DomError> {
    if !doc.is_tag(node, "input") {
        return Ok(());
    }
    // Single-line fields
    let text: String = text.chars().filter(|c| !c.is_control()).collect();
    let mut value = doc.property(node, "value").unwrap_or_default().to_string();
    value.push_str(&text);
    doc.set_property(node, "value", &value)
}

/// Remove the last character of an input's `value`.
pub fn backspace(doc: &mut Document, node: NodeId) -> Result<(), DomError> {
    if !doc.is_tag(node, "input") {
        return Ok(());
    }
    let mut value = doc.property(node, "value").unwrap_or_default().to_string();
    if value.pop().is_some() {
        doc.set_property(node, "value", &value)?;
    }
    Ok(())
}

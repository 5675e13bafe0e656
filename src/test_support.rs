//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::dom::{Document, NodeId};
use crate::view::{Controller, DEFAULT_MOUNT_ID, ViewOptions, page};

/// A controller mounted on a fresh page.
pub fn mounted(options: ViewOptions) -> Controller {
    Controller::mount(page().unwrap(), DEFAULT_MOUNT_ID, options)
        .unwrap()
        .expect("page() always has a mount point")
}

/// Elements under `root` whose `class_name` is `class`, in document order.
pub fn by_class(doc: &Document, root: NodeId, class: &str) -> Vec<NodeId> {
    doc.descendants(root)
        .into_iter()
        .filter(|node| doc.property(*node, "class_name") == Some(class))
        .collect()
}

/// Elements under `root` with the given tag, in document order.
pub fn by_tag(doc: &Document, root: NodeId, tag: &str) -> Vec<NodeId> {
    doc.descendants(root)
        .into_iter()
        .filter(|node| doc.is_tag(*node, tag))
        .collect()
}

//! Form-data extraction: named fields of a submitted form mapped to their
//! current string values.

use crate::dom::{Document, NodeId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    /// Collect every named `input` under `form`, in document order. A field
    /// without a `value` property contributes an empty string.
    pub fn from_form(doc: &Document, form: NodeId) -> Self {
        let entries = doc
            .descendants(form)
            .into_iter()
            .filter(|node| doc.is_tag(*node, "input"))
            .filter_map(|node| {
                let name = doc.property(node, "name")?;
                let value = doc.property(node, "value").unwrap_or_default();
                Some((name.to_string(), value.to_string()))
            })
            .collect();
        Self { entries }
    }

    /// Value of the first field called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Like [`get`](Self::get), but a missing field reads as blank.
    pub fn text(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().to_string()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

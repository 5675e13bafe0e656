//! # View & Render Loop
//!
//! Builds the tracker's tree from [`App`] and swaps it into the mount point.
//!
//! ## Full Rebuild
//!
//! There is no diffing. Every render builds a brand-new tree (new nodes, new
//! listeners) and replaces all children of the mount point with it; the old
//! subtree is dropped from the document. A render costs O(rendered nodes).
//!
//! ## Mutation Protocol
//!
//! ```text
//! event ──▶ Document::dispatch ──▶ [Action]
//!                                     │
//!                  for each action:   ▼
//!                          update(&mut app, action) ──▶ Effect::Render
//!                                                          │
//!                                                          ▼
//!                                                render(doc, root, app)
//! ```
//!
//! Listeners only return actions, and actions are applied after dispatch
//! returns. A listener therefore can never re-enter `render` while a tree is
//! being built, and each mutation triggers exactly one render.

pub mod components;

use log::{debug, info, warn};

use crate::core::action::{Action, Effect, update};
use crate::core::state::{App, TicketId};
use crate::dom::builder::{Props, create_element, h};
use crate::dom::event::EventKind;
use crate::dom::{Document, DomError, NodeId};

pub use crate::core::config::DEFAULT_MOUNT_ID;

/// Which variant of the tracker to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    /// Render a comment thread under each ticket.
    pub comments: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self { comments: true }
    }
}

/// A fresh document with an empty `div#root` under `body`, the page the
/// tracker expects to be loaded into.
pub fn page() -> Result<Document, DomError> {
    let mut doc = Document::new();
    let root = h(&mut doc, "div", Props::new().prop("id", DEFAULT_MOUNT_ID), vec![])?;
    let body = doc.body();
    doc.append(body, root)?;
    Ok(doc)
}

/// Replace everything under `root` with a tree built from `app`.
pub fn render(doc: &mut Document, root: NodeId, app: &App, options: ViewOptions) -> Result<(), DomError> {
    let list = create_element(doc, components::ticket_list(app, options), Props::new(), vec![])?;
    let form = create_element(doc, components::ticket_form(), Props::new(), vec![])?;
    let tree = h(doc, "div", Props::new(), vec![list.into(), form.into()])?;
    doc.replace_children(root, vec![tree])?;
    debug!("Rendered {} tickets into {}", app.tickets.len(), root);
    Ok(())
}

/// Owns the state and the document, and keeps the two in step.
pub struct Controller {
    app: App,
    document: Document,
    root: NodeId,
    options: ViewOptions,
    renders: usize,
}

impl Controller {
    /// Take over the element with id `mount_id` and render the empty tracker
    /// into it. Returns `Ok(None)` (after logging a warning) when there is no
    /// such element.
    pub fn mount(document: Document, mount_id: &str, options: ViewOptions) -> Result<Option<Self>, DomError> {
        let Some(root) = document.get_element_by_id(mount_id) else {
            warn!("Mount point #{} not found; tracker not started", mount_id);
            return Ok(None);
        };
        info!("Mounting tracker at #{} ({:?})", mount_id, options);
        let mut controller = Self {
            app: App::new(),
            document,
            root,
            options,
            renders: 0,
        };
        controller.update_view()?;
        Ok(Some(controller))
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access for host-side edits that are not state changes, such as
    /// typing into an input.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of renders so far, the initial one included.
    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// Rebuild the whole tree from current state.
    pub fn update_view(&mut self) -> Result<(), DomError> {
        render(&mut self.document, self.root, &self.app, self.options)?;
        self.renders += 1;
        Ok(())
    }

    /// Apply one action; re-render if it changed state.
    pub fn apply(&mut self, action: Action) -> Result<Effect, DomError> {
        let effect = update(&mut self.app, action);
        if effect == Effect::Render {
            self.update_view()?;
        }
        Ok(effect)
    }

    /// Fire `kind` at `target` and apply whatever the listeners asked for.
    ///
    /// Returns `Effect::Quit` if any action quit, `Effect::Render` if any
    /// changed state, else `Effect::None`.
    pub fn dispatch(&mut self, target: NodeId, kind: EventKind) -> Result<Effect, DomError> {
        let dispatched = self.document.dispatch(target, kind)?;
        debug!(
            "{} on {} produced {} action(s)",
            kind,
            target,
            dispatched.actions.len()
        );
        let mut outcome = Effect::None;
        for action in dispatched.actions {
            match self.apply(action)? {
                Effect::Quit => return Ok(Effect::Quit),
                Effect::Render => outcome = Effect::Render,
                Effect::None => {}
            }
        }
        Ok(outcome)
    }

    pub fn add_ticket(&mut self, title: impl Into<String>, description: impl Into<String>) -> Result<(), DomError> {
        self.apply(Action::AddTicket {
            title: title.into(),
            description: description.into(),
        })?;
        Ok(())
    }

    pub fn toggle(&mut self, id: TicketId) -> Result<(), DomError> {
        self.apply(Action::ToggleTicket(id))?;
        Ok(())
    }

    pub fn add_comment(&mut self, ticket_id: TicketId, content: impl Into<String>) -> Result<(), DomError> {
        self.apply(Action::AddComment {
            ticket_id,
            content: content.into(),
        })?;
        Ok(())
    }
}

//! # Application State
//!
//! All ticket-tracker state in one place. No DOM types here; the view layer
//! reads this struct and builds a tree from it.
//!
//! ```text
//! App
//! ├── tickets: Vec<Ticket>               // insertion order = display order
//! └── comment_list: Vec<Vec<Comment>>    // slot N holds ticket N's comments
//! ```
//!
//! `comment_list` starts with one empty slot (index 0, never used) and grows
//! by one slot per added ticket. Ticket ids are assigned contiguously from 1,
//! so a ticket's id is also its slot index. Nothing deletes tickets, which is
//! what keeps that aliasing sound.
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::fmt;

pub type TicketId = u32;
pub type CommentId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Open,
    Closed,
}

impl Status {
    pub fn toggled(self) -> Self {
        match self {
            Status::Open => Status::Closed,
            Status::Closed => Status::Open,
        }
    }

    /// Text shown on the status button.
    pub fn label(self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::Closed => "Closed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Open => f.write_str("open"),
            Status::Closed => f.write_str("closed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub status: Status,
}

impl Ticket {
    /// Flip between open and closed.
    pub fn toggle(&mut self) {
        self.status = self.status.toggled();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
}

#[derive(Debug)]
pub struct App {
    pub tickets: Vec<Ticket>,
    comment_list: Vec<Vec<Comment>>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            tickets: Vec::new(),
            comment_list: vec![Vec::new()],
        }
    }

    /// `max(existing ids, 0) + 1`.
    fn next_ticket_id(&self) -> TicketId {
        self.tickets.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    /// Append a new open ticket and its empty comment slot. Blank fields are kept as-is.
    pub fn add_ticket(&mut self, title: String, description: String) -> TicketId {
        let id = self.next_ticket_id();
        self.tickets.push(Ticket {
            id,
            title,
            description,
            status: Status::Open,
        });
        self.comment_list.push(Vec::new());
        id
    }

    pub fn ticket(&self, id: TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    /// Toggle ticket `id` and return its new status.
    ///
    /// # Panics
    ///
    /// If no ticket has that id. Toggles originate from rendered tickets, so
    /// an unknown id means the view and the state have diverged.
    pub fn toggle(&mut self, id: TicketId) -> Status {
        let ticket = self
            .tickets
            .iter_mut()
            .find(|t| t.id == id)
            .unwrap_or_else(|| panic!("toggle on unknown ticket {id}"));
        ticket.toggle();
        ticket.status
    }

    /// Comments for ticket `id`, oldest first.
    ///
    /// # Panics
    ///
    /// If there is no comment slot for `id`, i.e. the id-to-slot invariant is broken.
    pub fn comments(&self, id: TicketId) -> &[Comment] {
        self.comment_list
            .get(id as usize)
            .map(Vec::as_slice)
            .unwrap_or_else(|| panic!("no comment slot for ticket {id}"))
    }

    /// Append a comment to ticket `ticket_id` and return the comment's id,
    /// `max(existing ids in that slot, 0) + 1`.
    ///
    /// # Panics
    ///
    /// Same as [`comments`](Self::comments).
    pub fn add_comment(&mut self, ticket_id: TicketId, content: String) -> CommentId {
        let slot = self
            .comment_list
            .get_mut(ticket_id as usize)
            .unwrap_or_else(|| panic!("no comment slot for ticket {ticket_id}"));
        let id = slot.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        slot.push(Comment { id, content });
        id
    }

    pub fn count(&self, status: Status) -> usize {
        self.tickets.iter().filter(|t| t.status == status).count()
    }
}

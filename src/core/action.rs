//! # Actions
//!
//! Everything that can change the tracker becomes an `Action`.
//! User clicks a status button? That's `Action::ToggleTicket(id)`.
//! User submits the ticket form? That's `Action::AddTicket { .. }`.
//!
//! `update()` applies an action to the state and reports what the caller
//! must do next. Every mutation answers `Effect::Render`: the controller
//! rebuilds the whole view exactly once per action.
//!
//! ```text
//! State + Action  →  update()  →  Effect
//! ```

use log::info;

use crate::core::state::{App, TicketId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddTicket { title: String, description: String },
    ToggleTicket(TicketId),
    AddComment { ticket_id: TicketId, content: String },
    Quit,
}

/// What the caller has to do after `update()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing changed.
    None,
    /// State changed; re-render.
    Render,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::AddTicket { title, description } => {
            let id = app.add_ticket(title, description);
            info!("Added ticket {}", id);
            Effect::Render
        }
        Action::ToggleTicket(id) => {
            let status = app.toggle(id);
            info!("Ticket {} is now {}", id, status);
            Effect::Render
        }
        Action::AddComment { ticket_id, content } => {
            let id = app.add_comment(ticket_id, content);
            info!("Added comment {} to ticket {}", id, ticket_id);
            Effect::Render
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Status;

    fn add(app: &mut App, title: &str, description: &str) -> Effect {
        update(
            app,
            Action::AddTicket {
                title: title.to_string(),
                description: description.to_string(),
            },
        )
    }

    #[test]
    fn test_add_ticket_renders() {
        let mut app = App::new();
        assert_eq!(add(&mut app, "Fix bug", "NPE on save"), Effect::Render);
        let ticket = &app.tickets[0];
        assert_eq!(ticket.id, 1);
        assert_eq!(ticket.title, "Fix bug");
        assert_eq!(ticket.description, "NPE on save");
        assert_eq!(ticket.status, Status::Open);
    }

    #[test]
    fn test_toggle_renders() {
        let mut app = App::new();
        add(&mut app, "a", "");
        assert_eq!(update(&mut app, Action::ToggleTicket(1)), Effect::Render);
        assert_eq!(app.tickets[0].status, Status::Closed);
    }

    #[test]
    fn test_add_comment_renders() {
        let mut app = App::new();
        add(&mut app, "a", "");
        let effect = update(
            &mut app,
            Action::AddComment {
                ticket_id: 1,
                content: "confirmed".to_string(),
            },
        );
        assert_eq!(effect, Effect::Render);
        assert_eq!(app.comments(1)[0].content, "confirmed");
    }

    #[test]
    fn test_quit_leaves_state_alone() {
        let mut app = App::new();
        add(&mut app, "a", "");
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
        assert_eq!(app.tickets.len(), 1);
    }
}

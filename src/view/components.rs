//! # Tracker Components
//!
//! Tree-building functions for the ticket tracker. Each returns a
//! [`Descriptor`] closing over the data it renders; nothing here mutates
//! state. Listeners are the only behaviour they attach, and those return an
//! [`Action`] for the controller instead of changing anything themselves.
//!
//! ```text
//! div#ticket-list
//! └── li                         (one per ticket, insertion order)
//!     ├── div.title
//!     ├── div.description
//!     ├── button.status          "Open" | "Closed"   click → ToggleTicket
//!     └── div.comments           (extended variant only)
//!         ├── form               submit → AddComment
//!         │   ├── label / input[name=content]
//!         │   └── button[type=submit]
//!         └── ul > li            (one per comment)
//!
//! form                           submit → AddTicket
//! ├── label / input[name=title]
//! ├── label / input[name=description]
//! └── button[type=submit]
//! ```

use crate::core::action::Action;
use crate::core::state::{App, Comment, Ticket, TicketId};
use crate::dom::builder::{Descriptor, Props, create_element, h};
use crate::dom::event::{EventKind, handler};
use crate::dom::form::FormData;
use crate::view::ViewOptions;

pub fn ticket_list<'a>(app: &'a App, options: ViewOptions) -> Descriptor<'a> {
    Descriptor::component(move |doc, _props| {
        let items = app
            .tickets
            .iter()
            .map(|ticket| {
                let comments = options.comments.then(|| app.comments(ticket.id));
                create_element(doc, ticket_item(ticket, comments), Props::new(), vec![])
            })
            .collect::<Result<Vec<_>, _>>()?;
        h(doc, "div", Props::new().prop("id", "ticket-list"), vec![items.into()])
    })
}

/// One ticket. `comments` is `None` in the basic variant.
pub fn ticket_item<'a>(ticket: &'a Ticket, comments: Option<&'a [Comment]>) -> Descriptor<'a> {
    Descriptor::component(move |doc, _props| {
        let id = ticket.id;
        let title = h(
            doc,
            "div",
            Props::new().prop("class_name", "title"),
            vec![ticket.title.as_str().into()],
        )?;
        let description = h(
            doc,
            "div",
            Props::new().prop("class_name", "description"),
            vec![ticket.description.as_str().into()],
        )?;
        let status = h(
            doc,
            "button",
            Props::new()
                .prop("class_name", "status")
                .prop("type", "button")
                .on(EventKind::Click, handler(move |_, _| Some(Action::ToggleTicket(id)))),
            vec![ticket.status.label().into()],
        )?;

        let mut children = vec![title.into(), description.into(), status.into()];
        if let Some(comments) = comments {
            let section = create_element(doc, comment_section(id, comments), Props::new(), vec![])?;
            children.push(section.into());
        }
        h(doc, "li", Props::new(), children)
    })
}

pub fn comment_section<'a>(ticket_id: TicketId, comments: &'a [Comment]) -> Descriptor<'a> {
    Descriptor::component(move |doc, _props| {
        let field_id = format!("comment-content-{ticket_id}");
        let on_submit = handler(move |event, doc| {
            event.prevent_default();
            let data = FormData::from_form(doc, event.target());
            Some(Action::AddComment {
                ticket_id,
                content: data.text("content"),
            })
        });

        let label = h(
            doc,
            "label",
            Props::new().prop("html_for", field_id.as_str()),
            vec!["Comment".into()],
        )?;
        let input = h(
            doc,
            "input",
            Props::new()
                .prop("type", "text")
                .prop("name", "content")
                .prop("id", field_id.as_str())
                .prop("placeholder", "Comment"),
            vec![],
        )?;
        let submit = h(
            doc,
            "button",
            Props::new().prop("type", "submit"),
            vec!["Add Comment".into()],
        )?;
        let form = h(
            doc,
            "form",
            Props::new().on(EventKind::Submit, on_submit),
            vec![label.into(), input.into(), submit.into()],
        )?;

        let items = comments
            .iter()
            .map(|comment| {
                h(
                    doc,
                    "li",
                    Props::new().prop("data-id", comment.id.to_string()),
                    vec![comment.content.as_str().into()],
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        let list = h(doc, "ul", Props::new(), vec![items.into()])?;

        h(
            doc,
            "div",
            Props::new().prop("class_name", "comments"),
            vec![form.into(), list.into()],
        )
    })
}

pub fn ticket_form() -> Descriptor<'static> {
    Descriptor::component(|doc, _props| {
        let on_submit = handler(|event, doc| {
            event.prevent_default();
            let data = FormData::from_form(doc, event.target());
            Some(Action::AddTicket {
                title: data.text("title"),
                description: data.text("description"),
            })
        });

        let title_label = h(
            doc,
            "label",
            Props::new().prop("html_for", "ticket-title"),
            vec!["Title".into()],
        )?;
        let title = h(
            doc,
            "input",
            Props::new()
                .prop("type", "text")
                .prop("name", "title")
                .prop("id", "ticket-title")
                .prop("placeholder", "Title"),
            vec![],
        )?;
        let description_label = h(
            doc,
            "label",
            Props::new().prop("html_for", "ticket-description"),
            vec!["Description".into()],
        )?;
        let description = h(
            doc,
            "input",
            Props::new()
                .prop("name", "description")
                .prop("id", "ticket-description")
                .prop("placeholder", "Description"),
            vec![],
        )?;
        let submit = h(
            doc,
            "button",
            Props::new().prop("type", "submit"),
            vec!["Add Ticket".into()],
        )?;

        h(
            doc,
            "form",
            Props::new().on(EventKind::Submit, on_submit),
            vec![
                title_label.into(),
                title.into(),
                description_label.into(),
                description.into(),
                submit.into(),
            ],
        )
    })
}

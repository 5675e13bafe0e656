//! # StatusBar Component
//!
//! Bottom line showing ticket counts and key hints.
//!
//! Purely presentational: it receives everything as props and has no
//! internal state.
//!
//! ```text
//! 2 open · 1 closed | Tab/↑↓ move  Enter activate  Esc quit
//! ```
//!
//! A non-empty `notice` (e.g. a failed dispatch) replaces the key hints.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

const KEY_HINTS: &str = "Tab/↑↓ move  Enter activate  Esc quit";

pub struct StatusBar {
    pub open: usize,
    pub closed: usize,
    pub notice: Option<String>,
}

impl StatusBar {
    pub fn new(open: usize, closed: usize, notice: Option<String>) -> Self {
        Self { open, closed, notice }
    }

    fn text(&self) -> (String, Style) {
        let counts = format!("{} open · {} closed", self.open, self.closed);
        match &self.notice {
            Some(notice) => (
                format!("{counts} | {notice}"),
                Style::default().fg(Color::Yellow),
            ),
            None => (
                format!("{counts} | {KEY_HINTS}"),
                Style::default().fg(Color::DarkGray),
            ),
        }
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (text, style) = self.text();
        frame.render_widget(Line::from(Span::styled(text, style)), area);
    }
}

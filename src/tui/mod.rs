//! # TUI Host
//!
//! The terminal plays the part of the browser: it paints the mounted
//! document, and turns key presses and clicks into `click` / `submit` events
//! dispatched through the [`Controller`].
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop only redraws after an event (or a resize)
//! and otherwise sleeps in `poll` for up to 500ms.
//!
//! ## Event Flow
//!
//! ```text
//! key/mouse ──▶ TuiEvent ──▶ focus ring / input editing   (host-local)
//!                        └─▶ Controller::dispatch          (click, submit)
//!                                  └─▶ update + full re-render
//! ```

mod component;
mod components;
mod event;
pub mod focus;
mod ui;

use log::{info, warn};
use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::core::action::Effect;
use crate::dom::DomError;
use crate::tui::components::DocumentViewState;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::focus::{Focus, activate, backspace, focusables, insert_text};
use crate::view::Controller;

const SCROLL_STEP: u16 = 3;

/// TUI-specific presentation state (not part of the tracker's state)
pub struct TuiState {
    pub view: DocumentViewState,
    pub focus: Focus,
    /// Where the document was last drawn, for mouse hit testing.
    pub view_area: Rect,
    /// Replaces the key hints in the status bar until the next event.
    pub notice: Option<String>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            view: DocumentViewState::new(),
            focus: Focus::default(),
            view_area: Rect::default(),
            notice: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste, Hide)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste, Show);
    }
}

/// Apply one terminal event. Returns true when the user asked to quit.
pub fn handle_event(controller: &mut Controller, tui: &mut TuiState, event: TuiEvent) -> Result<bool, DomError> {
    tui.notice = None;
    let ring = focusables(controller.document(), controller.root());
    let focused = tui.focus.current(&ring);

    let effect = match event {
        TuiEvent::Quit => return Ok(true),
        TuiEvent::Resize => Effect::None,
        TuiEvent::FocusNext => {
            tui.focus.next(ring.len());
            Effect::None
        }
        TuiEvent::FocusPrev => {
            tui.focus.prev(ring.len());
            Effect::None
        }
        TuiEvent::ScrollUp => {
            for _ in 0..SCROLL_STEP {
                tui.view.scroll_state.scroll_up();
            }
            Effect::None
        }
        TuiEvent::ScrollDown => {
            for _ in 0..SCROLL_STEP {
                tui.view.scroll_state.scroll_down();
            }
            Effect::None
        }
        TuiEvent::InputChar(c) => {
            if let Some(node) = focused {
                insert_text(controller.document_mut(), node, c.encode_utf8(&mut [0; 4]))?;
            }
            Effect::None
        }
        TuiEvent::Paste(text) => {
            if let Some(node) = focused {
                insert_text(controller.document_mut(), node, &text)?;
            }
            Effect::None
        }
        TuiEvent::Backspace => {
            if let Some(node) = focused {
                backspace(controller.document_mut(), node)?;
            }
            Effect::None
        }
        TuiEvent::Activate => match focused {
            Some(node) => activate(controller, node)?,
            None => Effect::None,
        },
        TuiEvent::MouseClick(_col, row) => match tui.view.hit_test(row, tui.view_area) {
            Some(node) => {
                tui.focus.set(&ring, node);
                // Clicking into a field only focuses it
                if controller.document().is_tag(node, "button") {
                    activate(controller, node)?
                } else {
                    Effect::None
                }
            }
            None => Effect::None,
        },
    };

    Ok(effect == Effect::Quit)
}

pub fn run(mut controller: Controller) -> std::io::Result<()> {
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    let result = loop {
        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &controller, &mut tui)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let first_event = match poll_event_timeout(Duration::from_millis(500)) {
            Ok(event) => event,
            Err(e) => break Err(e),
        };
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        let mut pending = first_event;
        while let Some(event) = pending {
            match handle_event(&mut controller, &mut tui, event) {
                Ok(true) => {
                    should_quit = true;
                    break;
                }
                Ok(false) => {}
                Err(e) => {
                    // A stale node or a bad tag in a component; keep the UI alive
                    warn!("Event handling failed: {}", e);
                    tui.notice = Some(e.to_string());
                }
            }
            pending = match poll_event_immediate() {
                Ok(event) => event,
                Err(e) => {
                    warn!("Failed to read terminal event: {}", e);
                    None
                }
            };
        }

        if should_quit {
            info!("Quit requested");
            break Ok(());
        }
    };

    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Status;
    use crate::test_support::mounted;
    use crate::view::ViewOptions;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(controller: &mut Controller, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            handle_event(controller, tui, TuiEvent::InputChar(c)).unwrap();
        }
    }

    #[test]
    fn test_keyboard_session() {
        let mut controller = mounted(ViewOptions::default());
        let mut tui = TuiState::new();

        // Title field is focused first
        type_str(&mut controller, &mut tui, "Fix bug");
        handle_event(&mut controller, &mut tui, TuiEvent::FocusNext).unwrap();
        handle_event(&mut controller, &mut tui, TuiEvent::Paste("NPE on save".to_string())).unwrap();
        handle_event(&mut controller, &mut tui, TuiEvent::Activate).unwrap();

        let ticket = &controller.app().tickets[0];
        assert_eq!((ticket.id, ticket.title.as_str()), (1, "Fix bug"));
        assert_eq!(ticket.description, "NPE on save");

        // Ring is now: status, comment input, add comment, title, description, add ticket
        tui.focus.index = 0;
        handle_event(&mut controller, &mut tui, TuiEvent::Activate).unwrap();
        assert_eq!(controller.app().tickets[0].status, Status::Closed);

        tui.focus.index = 1;
        type_str(&mut controller, &mut tui, "confirmed");
        handle_event(&mut controller, &mut tui, TuiEvent::FocusNext).unwrap();
        handle_event(&mut controller, &mut tui, TuiEvent::Activate).unwrap();
        let comments = controller.app().comments(1);
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].content, "confirmed");
    }

    #[test]
    fn test_quit() {
        let mut controller = mounted(ViewOptions::default());
        let mut tui = TuiState::new();
        assert!(handle_event(&mut controller, &mut tui, TuiEvent::Quit).unwrap());
        assert!(!handle_event(&mut controller, &mut tui, TuiEvent::Resize).unwrap());
    }

    #[test]
    fn test_mouse_click_on_status_button() {
        let mut controller = mounted(ViewOptions { comments: false });
        controller.add_ticket("a", "").unwrap();
        let mut tui = TuiState::new();

        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui::draw_ui(f, &controller, &mut tui)).unwrap();

        // Line 0: "• a", line 1: "  [ Open ]"
        handle_event(&mut controller, &mut tui, TuiEvent::MouseClick(3, 1)).unwrap();
        assert_eq!(controller.app().tickets[0].status, Status::Closed);
        assert_eq!(tui.focus.index, 0);

        terminal.draw(|f| ui::draw_ui(f, &controller, &mut tui)).unwrap();
        let buffer = terminal.backend().buffer();
        let row: String = (0..12u16).map(|x| buffer[(x, 1)].symbol().to_string()).collect();
        assert_eq!(row.trim_end(), "  [ Closed ]");
    }

    #[test]
    fn test_mouse_click_on_input_only_focuses() {
        let mut controller = mounted(ViewOptions { comments: false });
        let mut tui = TuiState::new();
        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui::draw_ui(f, &controller, &mut tui)).unwrap();

        // "No tickets yet.", "", "Title: ..", "Description: .."
        handle_event(&mut controller, &mut tui, TuiEvent::MouseClick(0, 3)).unwrap();
        assert_eq!(tui.focus.index, 1);
        assert_eq!(controller.render_count(), 1);
    }
}

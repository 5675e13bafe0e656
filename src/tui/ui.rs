use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::Status;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{DocumentView, StatusBar};
use crate::tui::focus::focusables;
use crate::view::Controller;

pub fn draw_ui(frame: &mut Frame, controller: &Controller, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Min(0), Length(1)]);
    let [main_area, status_area] = layout.areas(frame.area());

    let ring = focusables(controller.document(), controller.root());
    let focused = tui.focus.current(&ring);
    tui.view_area = main_area;

    DocumentView {
        state: &mut tui.view,
        document: controller.document(),
        root: controller.root(),
        focused,
    }
    .render(frame, main_area);

    let app = controller.app();
    StatusBar::new(app.count(Status::Open), app.count(Status::Closed), tui.notice.clone())
        .render(frame, status_area);
}

use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive data via props (struct fields) and may wrap a
/// `&mut State` owned by `TuiState`. They render to a `Frame` within a given
/// `Rect`.
///
/// # Mutability
///
/// The `render` method takes `&mut self` so components can:
/// 1. Update internal caches (e.g. which line holds which focusable node).
/// 2. Manage presentation state (e.g. scroll offsets) during rendering.
///
/// This aligns with Ratatui's `StatefulWidget` pattern.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

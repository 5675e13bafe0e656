//! # DocumentView Component
//!
//! Paints the mounted document as terminal lines.
//!
//! ## Responsibilities
//!
//! - Walk the tree under the mount point and lay it out line by line
//! - Highlight the focused button or input
//! - Keep the focused line inside the viewport
//! - Remember which line holds which focusable node, for mouse hit testing
//!
//! ## Layout Rules
//!
//! | Node                | Painted as                                 |
//! |---------------------|--------------------------------------------|
//! | `div.title`         | bold line                                  |
//! | `div.description`   | wrapped, dimmed lines (nothing when blank) |
//! | `button`            | `[ Label ]` on its own line                |
//! | `label` + `input`   | `Label: [value]` on one line               |
//! | `li`                | bulleted, children indented                |
//! | `div.comments`      | children indented                          |
//! | `div#ticket-list`   | children, then a blank separator line      |
//!
//! Everything else is transparent: its children are painted in place.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::dom::{Document, NodeId};
use crate::tui::component::Component;

const INDENT_STEP: usize = 2;
const CURSOR: &str = "▏";

/// Painted lines plus, per line, the focusable node on it.
#[derive(Debug, Default)]
pub struct Painted {
    pub lines: Vec<Line<'static>>,
    pub targets: Vec<Option<NodeId>>,
}

impl Painted {
    /// Line index holding `node`, if painted.
    pub fn line_of(&self, node: NodeId) -> Option<usize> {
        self.targets.iter().position(|t| *t == Some(node))
    }
}

struct Painter<'d> {
    doc: &'d Document,
    focused: Option<NodeId>,
    width: usize,
    out: Painted,
    inline: Vec<Span<'static>>,
    inline_target: Option<NodeId>,
    inline_indent: usize,
    bullet: bool,
}

impl<'d> Painter<'d> {
    fn new(doc: &'d Document, focused: Option<NodeId>, width: u16) -> Self {
        Self {
            doc,
            focused,
            width: width.max(1) as usize,
            out: Painted::default(),
            inline: Vec::new(),
            inline_target: None,
            inline_indent: 0,
            bullet: false,
        }
    }

    fn push_line(&mut self, indent: usize, spans: Vec<Span<'static>>, target: Option<NodeId>) {
        let prefix = if std::mem::take(&mut self.bullet) {
            format!("{}• ", " ".repeat(indent.saturating_sub(INDENT_STEP)))
        } else {
            " ".repeat(indent)
        };
        let mut line = vec![Span::raw(prefix)];
        line.extend(spans);
        self.out.lines.push(Line::from(line));
        self.out.targets.push(target);
    }

    fn flush(&mut self) {
        if self.inline.is_empty() {
            return;
        }
        let spans = std::mem::take(&mut self.inline);
        let target = self.inline_target.take();
        self.push_line(self.inline_indent, spans, target);
    }

    fn push_inline(&mut self, indent: usize, span: Span<'static>) {
        if self.inline.is_empty() {
            self.inline_indent = indent;
        }
        self.inline.push(span);
    }

    fn text(&self, node: NodeId) -> String {
        self.doc.text_content(node).unwrap_or_default()
    }

    fn class(&self, node: NodeId) -> Option<&str> {
        self.doc.property(node, "class_name")
    }

    fn walk_children(&mut self, node: NodeId, indent: usize) {
        let children = self.doc.children(node).map(<[NodeId]>::to_vec).unwrap_or_default();
        for child in children {
            self.walk(child, indent);
        }
    }

    fn walk(&mut self, node: NodeId, indent: usize) {
        let Ok(tag) = self.doc.tag(node) else {
            return;
        };
        let Some(tag) = tag else {
            let text = self.text(node);
            if !text.is_empty() {
                self.push_inline(indent, Span::raw(text));
            }
            return;
        };

        match tag {
            "button" => {
                self.flush();
                let label = format!("[ {} ]", self.text(node));
                let style = if self.focused == Some(node) {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                self.push_line(indent, vec![Span::styled(label, style)], Some(node));
            }
            "label" => {
                let text = format!("{}: ", self.text(node));
                self.push_inline(indent, Span::styled(text, Style::default().add_modifier(Modifier::BOLD)));
            }
            "input" => {
                let focused = self.focused == Some(node);
                let value = self.doc.property(node, "value").unwrap_or_default();
                let (shown, mut style) = if value.is_empty() && !focused {
                    let placeholder = self.doc.property(node, "placeholder").unwrap_or_default();
                    (placeholder.to_string(), Style::default().add_modifier(Modifier::DIM))
                } else {
                    (value.to_string(), Style::default())
                };
                if focused {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                let cursor = if focused { CURSOR } else { "" };
                self.push_inline(indent, Span::styled(format!("[{shown}{cursor}]"), style));
                self.inline_target = Some(node);
                self.flush();
            }
            "li" => {
                self.flush();
                self.bullet = true;
                self.walk_children(node, indent + INDENT_STEP);
                self.flush();
                // An empty item still consumes its bullet
                self.bullet = false;
            }
            "div" if self.class(node) == Some("title") => {
                self.flush();
                let style = Style::default().add_modifier(Modifier::BOLD);
                self.push_line(indent, vec![Span::styled(self.text(node), style)], None);
            }
            "div" if self.class(node) == Some("description") => {
                self.flush();
                let text = self.text(node);
                if text.is_empty() {
                    return;
                }
                let width = self.width.saturating_sub(indent).max(1);
                let style = Style::default().add_modifier(Modifier::DIM);
                for line in textwrap::wrap(&text, width) {
                    self.push_line(indent, vec![Span::styled(line.into_owned(), style)], None);
                }
            }
            "div" if self.class(node) == Some("comments") => {
                self.flush();
                self.walk_children(node, indent + INDENT_STEP);
                self.flush();
            }
            "div" if self.doc.property(node, "id") == Some("ticket-list") => {
                self.flush();
                if self.doc.children(node).is_ok_and(|c| c.is_empty()) {
                    let style = Style::default().add_modifier(Modifier::DIM);
                    self.push_line(indent, vec![Span::styled("No tickets yet.", style)], None);
                }
                self.walk_children(node, indent);
                self.flush();
                self.push_line(0, Vec::new(), None);
            }
            "div" | "form" | "ul" => {
                self.flush();
                self.walk_children(node, indent);
                self.flush();
            }
            _ => self.walk_children(node, indent),
        }
    }

    fn finish(mut self) -> Painted {
        self.flush();
        self.out
    }
}

/// Lay out everything under `root`.
pub fn paint(doc: &Document, root: NodeId, focused: Option<NodeId>, width: u16) -> Painted {
    let mut painter = Painter::new(doc, focused, width);
    painter.walk_children(root, 0);
    painter.finish()
}

/// Scroll state and hit-test cache. Persisted in `TuiState`.
#[derive(Default)]
pub struct DocumentViewState {
    pub scroll_state: ScrollViewState,
    /// Focusable node per painted line, from the last frame.
    pub targets: Vec<Option<NodeId>>,
    /// Last known viewport height
    pub viewport_height: u16,
}

impl DocumentViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Focusable node painted at screen row `row` of a view drawn in `area`.
    pub fn hit_test(&self, row: u16, area: Rect) -> Option<NodeId> {
        if row < area.y || row >= area.y + area.height {
            return None;
        }
        let line = (row - area.y + self.scroll_state.offset().y) as usize;
        self.targets.get(line).copied().flatten()
    }

    /// Scroll so `line` is inside the viewport.
    fn reveal(&mut self, line: u16) {
        let offset_y = self.scroll_state.offset().y;
        if line < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: line });
        } else if line >= offset_y + self.viewport_height {
            let new_y = (line + 1).saturating_sub(self.viewport_height);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }

    /// Never scroll past the last line.
    fn clamp_scroll(&mut self, total_height: u16) {
        let max_y = total_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }
}

/// Transient view over the document (created each frame).
pub struct DocumentView<'a> {
    pub state: &'a mut DocumentViewState,
    pub document: &'a Document,
    pub root: NodeId,
    pub focused: Option<NodeId>,
}

impl Component for DocumentView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // Leave a column for the scrollbar
        let content_width = area.width.saturating_sub(1);
        let painted = paint(self.document, self.root, self.focused, content_width);
        let total_height = painted.lines.len() as u16;

        self.state.viewport_height = area.height;
        self.state.clamp_scroll(total_height);
        if let Some(line) = self.focused.and_then(|node| painted.line_of(node)) {
            self.state.reveal(line as u16);
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        let canvas = Rect::new(0, 0, content_width, total_height);
        scroll_view.render_widget(Paragraph::new(painted.lines), canvas);

        self.state.targets = painted.targets;
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

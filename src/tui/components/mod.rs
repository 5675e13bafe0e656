//! # TUI Components
//!
//! Components for the terminal host.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `StatusBar`: ticket counts and key hints
//!
//! ### Stateful Components
//!
//! - `DocumentView`: paints the mounted document, wrapping
//!   `&mut DocumentViewState` (scroll offset, hit-test cache)
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── status_bar.rs     (bottom status line)
//! └── document_view.rs  (document painter + scroll view)
//! ```

pub mod document_view;
mod status_bar;

pub use document_view::{DocumentView, DocumentViewState};
pub use status_bar::StatusBar;

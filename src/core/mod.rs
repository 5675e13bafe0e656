//! # Core Application Logic
//!
//! The ticket tracker's business logic.
//! It knows nothing about documents, elements or terminals.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (tickets)      │
//!                    │  • Action (mutators)    │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────▼─────────────┐
//!                    │         VIEW            │
//!                    │  components → Document  │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────▼─────────────┐
//!                    │          TUI            │
//!                    │  paints the Document,   │
//!                    │  turns keys into events │
//!                    └─────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct: tickets and their comment threads
//! - [`action`]: The `Action` enum: everything that can change the tracker
//! - [`config`]: Layered settings

pub mod action;
pub mod config;
pub mod state;

//! Tickets library exports for testing

pub mod core;
pub mod dom;
pub mod tui;
pub mod view;

#[cfg(test)]
pub mod test_support;

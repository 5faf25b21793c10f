//! Latch TUI Library
//!
//! Terminal front end for the Latch login flow: a login form, a placeholder
//! main screen, and modal alerts.

pub mod app;
pub mod cli;
pub mod ui;

pub use app::App;

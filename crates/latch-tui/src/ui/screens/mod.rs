//! Screen modules for different views

pub mod login;
pub mod main_screen;

//! Reusable UI components

pub mod alert;
pub mod spinner;

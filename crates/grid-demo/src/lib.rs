//! Command-line demo for persisted data-grid view state.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod people;

//! `tasklist` - terminal to-do list manager
//!
//! Keeps an ordered list of tasks (description, due date, priority, completion
//! flag) and loads or saves it to a plain-text file on demand.

pub mod app;
pub mod cli;
pub mod core;
pub mod fs;
pub mod logging;
pub mod tui;

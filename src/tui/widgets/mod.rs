//! Custom TUI widgets.

pub mod messages;
pub mod task_list;

pub use messages::{MAX_MESSAGES, MessageKind, MessageLine, MessageLog, MessagesWidget};
pub use task_list::{TaskListWidget, fit_to_width};

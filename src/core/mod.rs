//! Task data model and the in-memory store.

pub mod store;
pub mod task;

pub use store::TaskStore;
pub use task::{DUE_DATE_FORMAT, Priority, Status, Task, TaskDraft, TaskId, parse_due_date};

//! JSON task documents.

use serde::{Deserialize, Serialize};

use crate::core::{Priority, Task, TaskDraft};

/// On-disk shape of one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub description: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            description: task.description.clone(),
            due_date: task.due_date.clone(),
            priority: task.priority.clone(),
            completed: task.completed,
        }
    }
}

impl TaskRecord {
    /// Splits the record into the draft and completion flag the store expects.
    #[must_use]
    pub fn into_parts(self) -> (TaskDraft, bool) {
        (
            TaskDraft::new(self.description, self.due_date, self.priority),
            self.completed,
        )
    }
}

/// Top-level JSON document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDocument {
    pub tasks: Vec<TaskRecord>,
}

impl TaskDocument {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        Self {
            tasks: tasks.into_iter().map(TaskRecord::from).collect(),
        }
    }
}

//! Task records and their field types.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Expected layout of a due date (`YYYY-MM-DD`).
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Stable identifier assigned by [`TaskStore`](super::TaskStore) when a task is created.
///
/// Ids are opaque and never reused within one store. They are not persisted,
/// so a task gets a fresh id every time it is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Task priority.
///
/// The data layer does not validate priorities: text that is not one of the
/// three known levels is kept verbatim in [`Priority::Other`] so a load/save
/// cycle never rewrites it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    /// No priority chosen (empty text).
    #[default]
    Unset,
    Low,
    Medium,
    High,
    /// Unrecognized text read from a file.
    Other(String),
}

impl Priority {
    /// The levels offered by the priority choice control, in cycling order.
    pub const CHOICES: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Parses priority text. Matching is exact; anything else is kept as-is.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text {
            "" => Self::Unset,
            "Low" => Self::Low,
            "Medium" => Self::Medium,
            "High" => Self::High,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the text form written to disk and shown in the UI.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unset => "",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Other(text) => text,
        }
    }

    /// Cycles forward through the choice control (`Low -> Medium -> High -> Low`).
    ///
    /// `Unset` and unrecognized values start the cycle at `Low`.
    #[must_use]
    pub fn next(&self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High | Self::Unset | Self::Other(_) => Self::Low,
        }
    }

    /// Cycles backward through the choice control.
    #[must_use]
    pub fn prev(&self) -> Self {
        match self {
            Self::High => Self::Medium,
            Self::Medium => Self::Low,
            Self::Low | Self::Unset | Self::Other(_) => Self::High,
        }
    }
}

impl From<String> for Priority {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        priority.as_str().to_string()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completion state of a task.
///
/// The only transition is `Pending -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pending,
    Completed,
}

impl Status {
    #[must_use]
    pub const fn from_completed(completed: bool) -> Self {
        if completed {
            Self::Completed
        } else {
            Self::Pending
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }
}

/// The editable fields of a task, as read from the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDraft {
    pub description: String,
    pub due_date: String,
    pub priority: Priority,
}

impl TaskDraft {
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        due_date: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            description: description.into(),
            due_date: due_date.into(),
            priority,
        }
    }
}

/// A single to-do record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    pub description: String,
    pub due_date: String,
    pub priority: Priority,
    pub completed: bool,
}

impl Task {
    pub(crate) fn from_draft(id: TaskId, draft: TaskDraft, completed: bool) -> Self {
        Self {
            id,
            description: draft.description,
            due_date: draft.due_date,
            priority: draft.priority,
            completed,
        }
    }

    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        Status::from_completed(self.completed)
    }

    /// Returns the editable fields as a draft (used to prefill the form).
    #[must_use]
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            description: self.description.clone(),
            due_date: self.due_date.clone(),
            priority: self.priority.clone(),
        }
    }

    /// Overwrites the editable fields. `completed` is left untouched.
    pub(crate) fn apply(&mut self, draft: TaskDraft) {
        self.description = draft.description;
        self.due_date = draft.due_date;
        self.priority = draft.priority;
    }

    /// The canonical list row for this task: `"<description> (Completed|Pending)"`.
    #[must_use]
    pub fn row_label(&self) -> String {
        format!("{} ({})", self.description, self.status().label())
    }

    /// Parses the due date, if it is a valid `YYYY-MM-DD` date.
    #[must_use]
    pub fn due(&self) -> Option<NaiveDate> {
        parse_due_date(&self.due_date)
    }

    /// Returns true if the task is still pending and its due date is before `today`.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due().is_some_and(|due| due < today)
    }
}

/// Parses a `YYYY-MM-DD` due date, ignoring surrounding whitespace.
#[must_use]
pub fn parse_due_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DUE_DATE_FORMAT).ok()
}

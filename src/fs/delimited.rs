//! Comma-delimited task records.
//!
//! Each line holds `description,due_date,priority,completed`. There is no
//! header and no escaping, so a field containing a comma does not survive a
//! save/load cycle: the line splits into more than four fields and fails to
//! parse. Lines are trimmed when read, so leading whitespace in a description
//! and trailing whitespace in the completed field are lost on reload.

use thiserror::Error;

use crate::core::{Priority, Task, TaskDraft};

/// Field separator.
pub const SEPARATOR: char = ',';

/// A line that could not be parsed into a task record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The line did not split into exactly four fields.
    #[error("line {line}: expected 4 comma-separated fields, found {found}")]
    FieldCount {
        /// One-based line number.
        line: usize,
        /// Number of fields found.
        found: usize,
    },
}

/// Parses one record line.
///
/// The line is trimmed first. `completed` is true only when the trimmed last
/// field equals `true` ignoring ASCII case.
///
/// # Errors
///
/// Returns [`RecordError::FieldCount`] if the line does not have exactly four fields.
pub fn parse_record(line_number: usize, line: &str) -> Result<(TaskDraft, bool), RecordError> {
    let fields: Vec<&str> = line.trim().split(SEPARATOR).collect();
    let &[description, due_date, priority, completed] = fields.as_slice() else {
        return Err(RecordError::FieldCount {
            line: line_number,
            found: fields.len(),
        });
    };

    let draft = TaskDraft::new(description, due_date, Priority::parse(priority));
    Ok((draft, completed.trim().eq_ignore_ascii_case("true")))
}

/// Formats a task as one record line, without the trailing newline.
///
/// Booleans are written as `True`/`False`.
#[must_use]
pub fn format_record(task: &Task) -> String {
    let completed = if task.completed { "True" } else { "False" };
    format!(
        "{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{completed}",
        task.description, task.due_date, task.priority
    )
}

/// Returns true if the task would not survive a round trip through this format.
#[must_use]
pub fn has_embedded_separator(task: &Task) -> bool {
    [
        task.description.as_str(),
        task.due_date.as_str(),
        task.priority.as_str(),
    ]
    .iter()
    .any(|field| field.contains(SEPARATOR))
}

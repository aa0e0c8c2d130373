//! Application state structures.
//!
//! - **`Focus`**: which part of the window receives key presses
//! - **`FormState`**: the three input fields (description, due date, priority)
//!
//! The description and due date fields use `tui-textarea`, held to a single
//! line: newlines are never inserted and pasted text is flattened.

use tui_textarea::{CursorMove, TextArea};

use crate::core::{Priority, TaskDraft, parse_due_date};

/// Placeholder shown in the empty description field.
const DESCRIPTION_PLACEHOLDER: &str = "What needs doing?";

/// Placeholder shown in the empty due date field.
const DUE_DATE_PLACEHOLDER: &str = "YYYY-MM-DD";

/// Part of the window that receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Description,
    DueDate,
    Priority,
    List,
}

impl Focus {
    /// Next target in `Tab` order, wrapping around.
    #[must_use]
    pub fn next(&self) -> Self {
        match self {
            Self::Description => Self::DueDate,
            Self::DueDate => Self::Priority,
            Self::Priority => Self::List,
            Self::List => Self::Description,
        }
    }

    /// Previous target in `Tab` order, wrapping around.
    #[must_use]
    pub fn prev(&self) -> Self {
        match self {
            Self::Description => Self::List,
            Self::DueDate => Self::Description,
            Self::Priority => Self::DueDate,
            Self::List => Self::Priority,
        }
    }

    /// Display label, used as the field title.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Description => "Description",
            Self::DueDate => "Due Date (YYYY-MM-DD)",
            Self::Priority => "Priority",
            Self::List => "Tasks",
        }
    }
}

fn text_field(placeholder: &str) -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_placeholder_text(placeholder);
    textarea
}

fn text_field_with(placeholder: &str, text: &str) -> TextArea<'static> {
    let mut textarea = TextArea::new(vec![text.to_string()]);
    textarea.set_placeholder_text(placeholder);
    textarea.move_cursor(CursorMove::End);
    textarea
}

/// Folds pasted or multi-line text into one line.
///
/// Newlines and tabs become spaces; other control characters are dropped.
#[must_use]
pub fn single_line(text: &str) -> String {
    text.replace("\r\n", " ")
        .chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// State of the three form fields.
pub struct FormState {
    pub description: TextArea<'static>,
    pub due_date: TextArea<'static>,
    pub priority: Priority,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            description: text_field(DESCRIPTION_PLACEHOLDER),
            due_date: text_field(DUE_DATE_PLACEHOLDER),
            priority: Priority::Unset,
        }
    }
}

impl FormState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets every field to empty.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Replaces the field contents with `draft`, cursors at the end.
    pub fn fill(&mut self, draft: &TaskDraft) {
        self.description = text_field_with(DESCRIPTION_PLACEHOLDER, &draft.description);
        self.due_date = text_field_with(DUE_DATE_PLACEHOLDER, &draft.due_date);
        self.priority = draft.priority.clone();
    }

    #[must_use]
    pub fn description_text(&self) -> String {
        self.description.lines().join(" ")
    }

    #[must_use]
    pub fn due_date_text(&self) -> String {
        self.due_date.lines().join(" ")
    }

    /// Reads the fields as a draft. Nothing is validated or trimmed.
    #[must_use]
    pub fn draft(&self) -> TaskDraft {
        TaskDraft::new(
            self.description_text(),
            self.due_date_text(),
            self.priority.clone(),
        )
    }

    /// Returns true if a due date was typed but is not a `YYYY-MM-DD` date.
    #[must_use]
    pub fn due_date_looks_invalid(&self) -> bool {
        let text = self.due_date_text();
        !text.trim().is_empty() && parse_due_date(&text).is_none()
    }

    /// Returns the text field for `focus`, if it is one.
    pub fn text_field_mut(&mut self, focus: Focus) -> Option<&mut TextArea<'static>> {
        match focus {
            Focus::Description => Some(&mut self.description),
            Focus::DueDate => Some(&mut self.due_date),
            Focus::Priority | Focus::List => None,
        }
    }

    /// Joins a field back into a single line if an edit split it.
    pub fn keep_single_line(&mut self, focus: Focus) {
        let placeholder = match focus {
            Focus::Description => DESCRIPTION_PLACEHOLDER,
            Focus::DueDate => DUE_DATE_PLACEHOLDER,
            Focus::Priority | Focus::List => return,
        };
        if let Some(field) = self.text_field_mut(focus)
            && field.lines().len() > 1
        {
            let joined = field.lines().join(" ");
            *field = text_field_with(placeholder, &joined);
        }
    }
}

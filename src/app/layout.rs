//! Layout calculation helpers for the TUI.
//!
//! This module provides a single source of truth for layout definitions,
//! ensuring that `App::update_layout` and `App::render` always agree on
//! where each panel is.

use ratatui::layout::{Constraint, Layout, Rect};

/// Layout of the main window.
///
/// From top to bottom: header, the form row (description, due date and
/// priority side by side), a one-line form hint, the task list, the message
/// panel and the footer with key hints.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppLayout {
    /// Header area (1 line).
    pub header: Rect,
    /// Description input.
    pub description: Rect,
    /// Due date input.
    pub due_date: Rect,
    /// Priority choice.
    pub priority: Rect,
    /// Hint line under the form.
    pub hint: Rect,
    /// Task list (grows).
    pub list: Rect,
    /// Message panel.
    pub messages: Rect,
    /// Footer area (key hints, 1 line).
    pub footer: Rect,
}

/// Height of a bordered single-line input.
const FORM_HEIGHT: u16 = 3;

/// Width of the due date input, wide enough for `YYYY-MM-DD` plus the title.
const DUE_DATE_WIDTH: u16 = 26;

/// Width of the priority choice, wide enough for all three options.
const PRIORITY_WIDTH: u16 = 28;

/// Vertical layout constraints.
const VERTICAL_CONSTRAINTS: [Constraint; 6] = [
    Constraint::Length(1),           // Header
    Constraint::Length(FORM_HEIGHT), // Form row
    Constraint::Length(1),           // Form hint
    Constraint::Min(5),              // Task list (grows)
    Constraint::Length(5),           // Messages (3 lines plus borders)
    Constraint::Length(1),           // Footer (key hints)
];

/// Horizontal constraints for the form row.
const FORM_CONSTRAINTS: [Constraint; 3] = [
    Constraint::Fill(1),                // Description
    Constraint::Length(DUE_DATE_WIDTH), // Due date
    Constraint::Length(PRIORITY_WIDTH), // Priority
];

/// Calculates the layout for the main window.
#[must_use]
pub fn calculate_app_layout(area: Rect) -> AppLayout {
    let rows = Layout::vertical(VERTICAL_CONSTRAINTS).split(area);
    let form = Layout::horizontal(FORM_CONSTRAINTS).split(rows[1]);

    AppLayout {
        header: rows[0],
        description: form[0],
        due_date: form[1],
        priority: form[2],
        hint: rows[2],
        list: rows[3],
        messages: rows[4],
        footer: rows[5],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_layout_calculation() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = calculate_app_layout(area);

        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.description.height, 3);
        assert_eq!(layout.hint.height, 1);
        assert_eq!(layout.messages.height, 5);
        assert_eq!(layout.footer.height, 1);
        // List takes the rest (24 - 1 - 3 - 1 - 5 - 1 = 13)
        assert_eq!(layout.list.height, 13);
    }

    #[test]
    fn test_form_row_splits_horizontally() {
        let area = Rect::new(0, 0, 100, 30);
        let layout = calculate_app_layout(area);

        assert_eq!(layout.due_date.width, 26);
        assert_eq!(layout.priority.width, 28);
        assert_eq!(layout.description.width, 100 - 26 - 28);

        assert_eq!(layout.description.x, 0);
        assert_eq!(layout.due_date.x, layout.description.width);
        assert_eq!(layout.priority.x, layout.due_date.x + 26);

        // All three share the same row
        assert_eq!(layout.description.y, 1);
        assert_eq!(layout.due_date.y, 1);
        assert_eq!(layout.priority.y, 1);
    }

    #[test]
    fn test_app_layout_areas_are_stacked() {
        let area = Rect::new(0, 0, 100, 30);
        let layout = calculate_app_layout(area);

        assert_eq!(layout.header.y, 0);
        assert_eq!(layout.hint.y, layout.description.y + layout.description.height);
        assert_eq!(layout.list.y, layout.hint.y + 1);
        assert_eq!(layout.messages.y, layout.list.y + layout.list.height);
        assert_eq!(layout.footer.y, layout.messages.y + layout.messages.height);
        assert_eq!(layout.footer.y, 29);

        assert_eq!(layout.list.width, 100);
        assert_eq!(layout.messages.width, 100);
    }

    #[test]
    fn test_app_layout_small_terminal() {
        // Fixed height elements: 1 + 3 + 1 + 5 + 1 = 11
        let area = Rect::new(0, 0, 60, 16);
        let layout = calculate_app_layout(area);

        assert_eq!(layout.list.height, 5);
        assert_eq!(layout.footer.y, 15);
    }
}

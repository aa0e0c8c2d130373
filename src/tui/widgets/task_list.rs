//! Task list widget.
//!
//! Every row is built from task state alone: a completion marker, the
//! canonical row label, the due date and the priority. A pending task whose
//! due date lies before `today` has its date drawn in the error color.

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};
use unicode_width::UnicodeWidthChar;

use crate::core::{Priority, Task};
use crate::tui::Theme;

/// Width reserved for the due date column.
const DUE_COLUMN_WIDTH: usize = 12;
/// Width reserved for the priority column.
const PRIORITY_COLUMN_WIDTH: usize = 8;
/// Width of the `[x] ` marker.
const MARKER_WIDTH: usize = 4;
/// Highlight symbol drawn before the selected row.
const HIGHLIGHT_SYMBOL: &str = "› ";
/// Display width of [`HIGHLIGHT_SYMBOL`].
const HIGHLIGHT_WIDTH: usize = 2;

/// Pads or truncates `text` to exactly `width` display columns.
///
/// Truncated text ends with `…`.
#[must_use]
pub fn fit_to_width(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }

    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= width {
        let mut fitted = text.to_string();
        fitted.extend(std::iter::repeat_n(' ', width - total));
        return fitted;
    }

    let mut fitted = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        fitted.push(ch);
        used += w;
    }
    fitted.push('…');
    used += 1;
    fitted.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    fitted
}

/// Selectable list of tasks.
pub struct TaskListWidget<'a> {
    tasks: &'a [Task],
    selected: Option<usize>,
    focused: bool,
    today: NaiveDate,
    theme: &'a Theme,
}

impl<'a> TaskListWidget<'a> {
    #[must_use]
    pub const fn new(
        tasks: &'a [Task],
        selected: Option<usize>,
        focused: bool,
        today: NaiveDate,
        theme: &'a Theme,
    ) -> Self {
        Self {
            tasks,
            selected,
            focused,
            today,
            theme,
        }
    }

    fn row(&self, task: &Task, label_width: usize) -> ListItem<'a> {
        let marker = if task.completed { "[x] " } else { "[ ] " };
        let label_style = if task.completed {
            self.theme.completed_style()
        } else {
            self.theme.normal_style()
        };
        let due_style = if task.is_overdue(self.today) {
            self.theme.error_style()
        } else {
            self.theme.muted_style()
        };

        ListItem::new(Line::from(vec![
            Span::styled(marker, self.theme.highlight_style()),
            Span::styled(fit_to_width(&task.row_label(), label_width), label_style),
            Span::raw(" "),
            Span::styled(fit_to_width(&task.due_date, DUE_COLUMN_WIDTH), due_style),
            Span::raw(" "),
            Span::styled(
                fit_to_width(task.priority.as_str(), PRIORITY_COLUMN_WIDTH),
                priority_style(self.theme, task),
            ),
        ]))
    }
}

fn priority_style(theme: &Theme, task: &Task) -> Style {
    match task.priority {
        Priority::High => theme.warning_style(),
        _ => theme.muted_style(),
    }
}

impl Widget for TaskListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.focused_border_style()
        } else {
            self.theme.border_style()
        };
        let block = Block::default()
            .title(Span::styled(
                format!(" Tasks ({}) ", self.tasks.len()),
                self.theme.header_style(),
            ))
            .borders(Borders::ALL)
            .border_style(border_style);

        if self.tasks.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "No tasks. Fill in the form and press Enter to add one.",
                self.theme.placeholder_style(),
            )))
            .block(block)
            .render(area, buf);
            return;
        }

        let inner_width = block.inner(area).width as usize;
        let label_width = inner_width.saturating_sub(
            HIGHLIGHT_WIDTH + MARKER_WIDTH + 1 + DUE_COLUMN_WIDTH + 1 + PRIORITY_COLUMN_WIDTH,
        );

        let items: Vec<ListItem> = self
            .tasks
            .iter()
            .map(|task| self.row(task, label_width))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(self.theme.selected_row_style())
            .highlight_symbol(HIGHLIGHT_SYMBOL);

        let mut state = ListState::default().with_selected(self.selected);
        StatefulWidget::render(list, area, buf, &mut state);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::core::{TaskDraft, TaskStore};
    use anyhow::Result;
    use ratatui::{Terminal, backend::TestBackend};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn render(store: &TaskStore, selected: Option<usize>) -> Result<Vec<String>> {
        let backend = TestBackend::new(60, 6);
        let mut terminal = Terminal::new(backend)?;
        let theme = Theme::default();

        terminal.draw(|frame| {
            let widget = TaskListWidget::new(store.tasks(), selected, true, today(), &theme);
            frame.render_widget(widget, frame.area());
        })?;

        let buffer = terminal.backend().buffer();
        Ok((0..6)
            .map(|y| (0..60).map(|x| buffer[(x, y)].symbol()).collect())
            .collect())
    }

    mod fit_to_width_tests {
        use super::*;

        #[test]
        fn pads_short_text() {
            assert_eq!(fit_to_width("ab", 5), "ab   ");
        }

        #[test]
        fn truncates_long_text_with_ellipsis() {
            assert_eq!(fit_to_width("abcdefgh", 5), "abcd…");
        }

        #[test]
        fn counts_wide_characters() {
            // Each CJK character is two columns wide.
            assert_eq!(fit_to_width("日本語", 6), "日本語");
            assert_eq!(fit_to_width("日本語", 5), "日本…");
        }

        #[test]
        fn zero_width_is_empty() {
            assert_eq!(fit_to_width("abc", 0), "");
        }
    }

    #[test]
    fn renders_placeholder_when_empty() -> Result<()> {
        let rows = render(&TaskStore::new(), None)?;
        assert!(rows[0].contains("Tasks (0)"));
        assert!(rows[1].contains("No tasks."));
        Ok(())
    }

    #[test]
    fn renders_one_row_per_task_with_status() -> Result<()> {
        let mut store = TaskStore::new();
        store.add(TaskDraft::new("Buy milk", "2024-01-01", Priority::Low));
        let done = store.add(TaskDraft::new("File taxes", "2024-04-15", Priority::High));
        store.mark_completed(done);

        let rows = render(&store, Some(0))?;

        assert!(rows[0].contains("Tasks (2)"));
        assert!(rows[1].contains("›"));
        assert!(rows[1].contains("[ ] Buy milk (Pending)"));
        assert!(rows[1].contains("2024-01-01"));
        assert!(rows[1].contains("Low"));
        assert!(rows[2].contains("[x] File taxes (Completed)"));
        assert!(rows[2].contains("High"));
        assert!(!rows[2].contains("›"));
        Ok(())
    }

    #[test]
    fn overdue_pending_date_uses_error_style() -> Result<()> {
        let mut store = TaskStore::new();
        store.add(TaskDraft::new("Late", "2024-05-01", Priority::Low));
        let backend = TestBackend::new(60, 4);
        let mut terminal = Terminal::new(backend)?;
        let theme = Theme::default();

        terminal.draw(|frame| {
            let widget = TaskListWidget::new(store.tasks(), None, false, today(), &theme);
            frame.render_widget(widget, frame.area());
        })?;

        let buffer = terminal.backend().buffer();
        let x = (0..60u16)
            .find(|&x| buffer[(x, 1)].symbol() == "2")
            .expect("due date rendered");
        assert_eq!(buffer[(x, 1)].fg, theme.error);
        Ok(())
    }
}

//! Rendering methods for the App.
//!
//! The window is drawn top to bottom from the cached [`AppLayout`]:
//! - **Header**: file name, task counts and the unsaved-changes marker
//! - **Form**: description, due date and priority (see `form`)
//! - **Task list**: one row per task in the store
//! - **Messages**: outcome of recent commands
//! - **Footer**: key hints for the focused part of the window
//!
//! [`AppLayout`]: crate::app::AppLayout

mod form;

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::App;
use crate::app::commands::Command;
use crate::app::state::Focus;
use crate::tui::widgets::{MessagesWidget, TaskListWidget};

impl App {
    /// Renders the application UI.
    ///
    /// Uses the layout computed by [`App::update_layout`].
    pub fn render(&self, frame: &mut Frame) {
        let layout = self.layout;

        self.render_header(frame, layout.header);
        self.render_form(frame, &layout);
        self.render_hint(frame, layout.hint);
        self.render_list(frame, layout.list);
        frame.render_widget(
            MessagesWidget::new(self.messages.lines(), &self.theme),
            layout.messages,
        );
        self.render_footer(frame, layout.footer);
    }

    /// Renders the header (single line).
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(" To-Do List ", self.theme.header_style()),
            Span::styled("[", self.theme.muted_style()),
            Span::styled(self.file.display_name(), self.theme.normal_style()),
            Span::styled("] ", self.theme.muted_style()),
            Span::styled(
                format!(
                    "{} tasks, {} completed",
                    self.store.len(),
                    self.store.completed_count()
                ),
                self.theme.muted_style(),
            ),
        ];
        if self.store.is_dirty() {
            spans.push(Span::styled(" [modified]", self.theme.warning_style()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Renders the line under the form.
    ///
    /// Shows a hint for a due date that is not a date, otherwise the task the
    /// Update, Remove and Mark as Completed commands will act on.
    fn render_hint(&self, frame: &mut Frame, area: Rect) {
        let line = if self.form.due_date_looks_invalid() {
            Line::from(Span::styled(
                " Due date is not a date (YYYY-MM-DD); it will be saved as typed",
                self.theme.muted_style(),
            ))
        } else if let Some(task) = self.selected.and_then(|id| self.store.get(id)) {
            Line::from(vec![
                Span::styled(" Selected: ", self.theme.muted_style()),
                Span::styled(task.row_label(), self.theme.normal_style()),
            ])
        } else {
            Line::default()
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Renders the task list.
    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let widget = TaskListWidget::new(
            self.store.tasks(),
            self.selected_index(),
            self.focus == Focus::List,
            self.today,
            &self.theme,
        );
        frame.render_widget(widget, area);
    }

    /// Renders the footer with key hints (single line).
    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let hints: &[(&str, Command)] = if self.focus == Focus::List {
            &[
                ("Space", Command::MarkCompleted),
                ("Del", Command::RemoveTask),
                ("Enter", Command::EditSelected),
                ("Ctrl+U", Command::UpdateTask),
                ("Ctrl+L", Command::LoadTasks),
                ("Ctrl+S", Command::SaveTasks),
                ("q", Command::Quit),
            ]
        } else {
            &[
                ("Enter", Command::AddTask),
                ("Ctrl+U", Command::UpdateTask),
                ("Ctrl+D", Command::MarkCompleted),
                ("Ctrl+R", Command::RemoveTask),
                ("Ctrl+L", Command::LoadTasks),
                ("Ctrl+S", Command::SaveTasks),
                ("Ctrl+Q", Command::Quit),
            ]
        };

        let mut spans = vec![
            Span::styled(" [Tab] ", self.theme.highlight_style()),
            Span::styled("Next  ", self.theme.muted_style()),
        ];
        for (key, command) in hints {
            spans.push(Span::styled(format!("[{key}] "), self.theme.highlight_style()));
            spans.push(Span::styled(
                format!("{}  ", command.short_label()),
                self.theme.muted_style(),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

//! Form rendering: the two text fields and the priority choice.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use tui_textarea::TextArea;

use crate::app::state::Focus;
use crate::app::{App, AppLayout};
use crate::core::Priority;

impl App {
    /// Renders the form row.
    pub(crate) fn render_form(&self, frame: &mut Frame, layout: &AppLayout) {
        self.render_text_field(
            frame,
            layout.description,
            &self.form.description,
            Focus::Description,
        );
        self.render_text_field(frame, layout.due_date, &self.form.due_date, Focus::DueDate);
        self.render_priority(frame, layout.priority);
    }

    fn field_block(&self, focus: Focus) -> Block<'static> {
        let border_style = if self.focus == focus {
            self.theme.focused_border_style()
        } else {
            self.theme.border_style()
        };
        Block::bordered()
            .title(format!(" {} ", focus.label()))
            .title_style(self.theme.header_style())
            .border_style(border_style)
    }

    /// Renders one single-line text field.
    ///
    /// The cursor is only drawn in the focused field.
    fn render_text_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        field: &TextArea<'static>,
        focus: Focus,
    ) {
        // Create a clone of the textarea widget with the styled block
        let mut textarea = field.clone();
        textarea.set_block(self.field_block(focus));
        textarea.set_style(self.theme.normal_style());
        textarea.set_cursor_line_style(Style::default()); // No highlight on cursor line
        textarea.set_placeholder_style(self.theme.placeholder_style());
        if self.focus != focus {
            textarea.set_cursor_style(Style::default());
        }

        frame.render_widget(&textarea, area);
    }

    /// Renders the priority choice as `Low  Medium  High` with the current one
    /// highlighted. A value outside the choices is shown after them.
    fn render_priority(&self, frame: &mut Frame, area: Rect) {
        let current = &self.form.priority;
        let mut spans = Vec::with_capacity(Priority::CHOICES.len() * 2 + 1);
        for choice in &Priority::CHOICES {
            let style = if choice == current {
                self.theme.selected_row_style()
            } else {
                self.theme.muted_style()
            };
            spans.push(Span::styled(format!(" {choice} "), style));
            spans.push(Span::raw(" "));
        }
        if let Priority::Other(text) = current {
            spans.push(Span::styled(text.clone(), self.theme.warning_style()));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(self.field_block(Focus::Priority));
        frame.render_widget(paragraph, area);
    }
}

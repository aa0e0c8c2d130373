//! Message panel widget.
//!
//! Shows the outcome of commands (load/save results, warnings, errors). The
//! newest messages are at the bottom; older ones scroll off the top.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::tui::Theme;

/// Maximum number of messages kept in the log.
pub const MAX_MESSAGES: usize = 200;

/// Kinds of messages for different styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// A line in the message panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLine {
    /// The text content, including its kind prefix.
    pub text: String,
    pub kind: MessageKind,
}

impl MessageLine {
    /// Creates an info line.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: format!("  {}", text.into()),
            kind: MessageKind::Info,
        }
    }

    /// Creates a success line.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: format!("+ {}", text.into()),
            kind: MessageKind::Success,
        }
    }

    /// Creates a warning line.
    #[must_use]
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            text: format!("! {}", text.into()),
            kind: MessageKind::Warning,
        }
    }

    /// Creates an error line.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: format!("✗ {}", text.into()),
            kind: MessageKind::Error,
        }
    }
}

/// Bounded message history.
#[derive(Debug, Default)]
pub struct MessageLog {
    lines: Vec<MessageLine>,
}

impl MessageLog {
    /// Appends a message, dropping the oldest once [`MAX_MESSAGES`] is exceeded.
    pub fn push(&mut self, line: MessageLine) {
        self.lines.push(line);
        if self.lines.len() > MAX_MESSAGES {
            let excess = self.lines.len() - MAX_MESSAGES;
            self.lines.drain(0..excess);
        }
    }

    #[must_use]
    pub fn lines(&self) -> &[MessageLine] {
        &self.lines
    }

    #[must_use]
    pub fn last(&self) -> Option<&MessageLine> {
        self.lines.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Renders the tail of a [`MessageLog`] inside a bordered block.
pub struct MessagesWidget<'a> {
    lines: &'a [MessageLine],
    theme: &'a Theme,
}

impl<'a> MessagesWidget<'a> {
    #[must_use]
    pub const fn new(lines: &'a [MessageLine], theme: &'a Theme) -> Self {
        Self { lines, theme }
    }

    fn style_for(&self, kind: MessageKind) -> ratatui::style::Style {
        match kind {
            MessageKind::Info => self.theme.muted_style(),
            MessageKind::Success => self.theme.success_style(),
            MessageKind::Warning => self.theme.warning_style(),
            MessageKind::Error => self.theme.error_style(),
        }
    }
}

impl Widget for MessagesWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(" Messages ", self.theme.header_style()))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        let visible = inner.height as usize;
        let start = self.lines.len().saturating_sub(visible);
        let lines: Vec<Line> = self.lines[start..]
            .iter()
            .map(|line| Line::from(Span::styled(line.text.as_str(), self.style_for(line.kind))))
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

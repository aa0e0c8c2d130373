//! Shared test utilities for the app module.
//!
//! This module provides helper functions and utilities for testing:
//! - `create_test_app` - Creates an `App` bound to a file in a temp directory
//! - `app_with_tasks` - Same, with tasks already in the store
//! - `render_app_to_terminal` - Renders the app to a `TestBackend`
//! - Key event helpers (`char_key`, `key`, `ctrl_key`, `type_text`)

use crate::app::App;
use crate::core::{Priority, TaskDraft};
use crate::fs::{TaskFile, TaskFormat};
use anyhow::Result;
use chrono::NaiveDate;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};
use std::path::Path;

/// Fixed date used for overdue highlighting in tests.
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// Creates a [`KeyEvent`] for a character key with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

/// Creates a [`KeyEvent`] for `code` with no modifiers.
pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Creates a [`KeyEvent`] for `Ctrl+<c>`.
pub fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Sends each character of `text` as a key press.
pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(char_key(c));
    }
}

/// Creates an `App` whose task file is `tasks.txt` inside `dir`.
pub fn create_test_app(dir: &Path) -> App {
    create_test_app_with_file(TaskFile::new(dir.join("tasks.txt"), TaskFormat::Delimited))
}

/// Creates an `App` bound to `file`.
pub fn create_test_app_with_file(file: TaskFile) -> App {
    App::with_today(file, test_today())
}

/// Creates an `App` with one pending task per description.
///
/// The store is marked clean afterwards, as if the tasks had been loaded.
pub fn app_with_tasks(dir: &Path, descriptions: &[&str]) -> App {
    let mut app = create_test_app(dir);
    for description in descriptions {
        app.store
            .add(TaskDraft::new(*description, "2024-07-01", Priority::Medium));
    }
    app.store.mark_clean();
    app
}

/// Row labels of the store, in order.
pub fn row_labels(app: &App) -> Vec<String> {
    app.store.rows()
}

/// Text of the most recent message.
pub fn last_message(app: &App) -> String {
    app.messages
        .last()
        .map(|line| line.text.clone())
        .unwrap_or_default()
}

/// Renders the app to a `TestBackend` terminal.
///
/// This function mimics the main loop behavior by calling `update_layout()`
/// before rendering, ensuring the cached layout is properly initialized.
///
/// # Errors
///
/// Returns an error if terminal creation or rendering fails.
pub fn render_app_to_terminal(
    app: &mut App,
    width: u16,
    height: u16,
) -> Result<Terminal<TestBackend>> {
    use ratatui::layout::Rect;

    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend)?;

    // Update layout before rendering (mimics main loop behavior)
    app.update_layout(Rect::new(0, 0, width, height));

    terminal.draw(|f| app.render(f))?;

    Ok(terminal)
}

/// Returns the rendered buffer as one string per row.
pub fn buffer_rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
    let buffer = terminal.backend().buffer();
    let area = *buffer.area();
    (0..area.height)
        .map(|y| (0..area.width).map(|x| buffer[(x, y)].symbol()).collect())
        .collect()
}

/// Returns true if any rendered row contains `needle`.
pub fn screen_contains(terminal: &Terminal<TestBackend>, needle: &str) -> bool {
    buffer_rows(terminal).iter().any(|row| row.contains(needle))
}

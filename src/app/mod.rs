//! Main application state and logic.
//!
//! This module contains the core App struct and its implementation,
//! organized into submodules:
//! - `commands` - The task commands (add, complete, update, remove, load, save)
//! - `events` - Key and paste handling
//! - `layout` - Screen layout calculation
//! - `render` - UI rendering
//! - `state` - Focus and form state
//!
//! ## Selection
//!
//! The selected list row is tracked by [`TaskId`], never by position, so it
//! stays on the same task when other tasks are added or removed. The list
//! itself is drawn from the store every frame.

pub mod commands;
pub mod events;
mod layout;
mod render;
pub mod state;

#[cfg(test)]
mod tests;

pub use commands::Command;
pub use layout::{AppLayout, calculate_app_layout};
pub use state::{Focus, FormState, single_line};

use chrono::{Local, NaiveDate};
use ratatui::layout::Rect;
use tracing::debug;

use crate::core::{TaskId, TaskStore};
use crate::fs::TaskFile;
use crate::tui::Theme;
use crate::tui::widgets::MessageLog;

/// Main application state.
pub struct App {
    // =========================================================================
    // Tasks
    // =========================================================================
    /// The in-memory task list.
    pub(crate) store: TaskStore,
    /// Where Load and Save read and write.
    pub(crate) file: TaskFile,
    /// The selected task, if any.
    pub(crate) selected: Option<TaskId>,

    // =========================================================================
    // Interface
    // =========================================================================
    /// The three input fields.
    pub(crate) form: FormState,
    /// Which part of the window receives key presses.
    pub(crate) focus: Focus,
    /// Outcome of recent commands.
    pub(crate) messages: MessageLog,
    /// Theme for styling.
    pub(crate) theme: Theme,
    /// Layout computed for the current frame.
    pub(crate) layout: AppLayout,
    /// Date used for overdue highlighting.
    pub(crate) today: NaiveDate,

    /// Set by a quit request with unsaved changes; a second request quits.
    pub(crate) quit_armed: bool,
    /// Should quit flag.
    should_quit: bool,
}

impl App {
    /// Creates an application with an empty store bound to `file`.
    ///
    /// Nothing is read from disk until [`Command::LoadTasks`] runs.
    #[must_use]
    pub fn new(file: TaskFile) -> Self {
        Self::with_today(file, Local::now().date_naive())
    }

    /// Creates an application with a fixed date for overdue highlighting.
    #[must_use]
    pub fn with_today(file: TaskFile, today: NaiveDate) -> Self {
        debug!(path = %file.path().display(), format = file.format().name(), "app created");
        Self {
            store: TaskStore::new(),
            file,
            selected: None,
            form: FormState::new(),
            focus: Focus::default(),
            messages: MessageLog::default(),
            theme: Theme::default(),
            layout: AppLayout::default(),
            today,
            quit_armed: false,
            should_quit: false,
        }
    }

    /// Returns true if the application should quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns true if the store changed since it was last loaded or saved.
    #[must_use]
    pub const fn has_unsaved_changes(&self) -> bool {
        self.store.is_dirty()
    }

    #[must_use]
    pub const fn store(&self) -> &TaskStore {
        &self.store
    }

    #[must_use]
    pub const fn file(&self) -> &TaskFile {
        &self.file
    }

    #[must_use]
    pub const fn focus(&self) -> Focus {
        self.focus
    }

    #[must_use]
    pub const fn selected(&self) -> Option<TaskId> {
        self.selected
    }

    /// Position of the selected task in the list.
    ///
    /// Returns `None` when nothing is selected or the selected task is gone.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected.and_then(|id| self.store.position(id))
    }

    /// Selects the task at `index`, or clears the selection if out of range.
    pub fn select_index(&mut self, index: usize) {
        self.selected = self.store.id_at(index);
    }

    /// Moves the selection one row down, selecting the first row if none is.
    pub(crate) fn select_next(&mut self) {
        if self.store.is_empty() {
            self.selected = None;
            return;
        }
        let next = match self.selected_index() {
            Some(i) => (i + 1).min(self.store.len() - 1),
            None => 0,
        };
        self.select_index(next);
    }

    /// Moves the selection one row up, selecting the last row if none is.
    pub(crate) fn select_prev(&mut self) {
        if self.store.is_empty() {
            self.selected = None;
            return;
        }
        let prev = match self.selected_index() {
            Some(i) => i.saturating_sub(1),
            None => self.store.len() - 1,
        };
        self.select_index(prev);
    }

    /// Calculates and caches the layout based on terminal dimensions.
    ///
    /// Should be called once per frame before rendering.
    pub fn update_layout(&mut self, terminal_area: Rect) {
        self.layout = calculate_app_layout(terminal_area);
    }
}

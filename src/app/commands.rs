//! Task commands.
//!
//! Each [`Command`] corresponds to one button of the form: it reads the
//! form, mutates the store and reports the outcome in the message panel.
//! Commands that act on the selection do nothing when no row is selected.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, error, info, warn};

use super::App;
use crate::app::state::Focus;
use crate::fs;
use crate::tui::widgets::MessageLine;

/// A user-invoked command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AddTask,
    MarkCompleted,
    UpdateTask,
    RemoveTask,
    LoadTasks,
    SaveTasks,
    /// Copies the selected task into the form.
    EditSelected,
    Quit,
}

impl Command {
    /// Returns all commands in display order.
    #[must_use]
    pub fn all() -> &'static [Command] {
        &[
            Command::AddTask,
            Command::MarkCompleted,
            Command::UpdateTask,
            Command::RemoveTask,
            Command::LoadTasks,
            Command::SaveTasks,
            Command::EditSelected,
            Command::Quit,
        ]
    }

    /// Returns the display label for this command.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::AddTask => "Add Task",
            Self::MarkCompleted => "Mark as Completed",
            Self::UpdateTask => "Update Task",
            Self::RemoveTask => "Remove Task",
            Self::LoadTasks => "Load Tasks",
            Self::SaveTasks => "Save Tasks",
            Self::EditSelected => "Edit Selected",
            Self::Quit => "Quit",
        }
    }

    /// Short label for the footer.
    #[must_use]
    pub const fn short_label(&self) -> &'static str {
        match self {
            Self::AddTask => "Add",
            Self::MarkCompleted => "Done",
            Self::UpdateTask => "Update",
            Self::RemoveTask => "Remove",
            Self::LoadTasks => "Load",
            Self::SaveTasks => "Save",
            Self::EditSelected => "Edit",
            Self::Quit => "Quit",
        }
    }

    /// The `Ctrl+<key>` shortcut letter, available from every focus.
    #[must_use]
    pub const fn shortcut(&self) -> char {
        match self {
            Self::AddTask => 'a',
            Self::MarkCompleted => 'd',
            Self::UpdateTask => 'u',
            Self::RemoveTask => 'r',
            Self::LoadTasks => 'l',
            Self::SaveTasks => 's',
            Self::EditSelected => 'e',
            Self::Quit => 'q',
        }
    }

    /// Maps a `Ctrl+<key>` press to its command.
    #[must_use]
    pub fn from_shortcut(key: KeyEvent) -> Option<Self> {
        if !key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }
        match key.code {
            KeyCode::Char('c') => Some(Self::Quit),
            KeyCode::Char(c) => {
                let c = c.to_ascii_lowercase();
                Self::all().iter().copied().find(|cmd| cmd.shortcut() == c)
            }
            _ => None,
        }
    }
}

impl App {
    /// Runs a command.
    pub fn execute(&mut self, command: Command) {
        debug!(command = command.label(), "executing command");
        if command != Command::Quit {
            self.quit_armed = false;
        }
        match command {
            Command::AddTask => self.add_task(),
            Command::MarkCompleted => self.mark_completed(),
            Command::UpdateTask => self.update_task(),
            Command::RemoveTask => self.remove_task(),
            Command::LoadTasks => self.load_tasks(),
            Command::SaveTasks => self.save_tasks(),
            Command::EditSelected => self.edit_selected(),
            Command::Quit => self.request_quit(),
        }
    }

    /// Appends the form contents as a new pending task.
    pub(crate) fn add_task(&mut self) {
        let draft = self.form.draft();
        let label = draft.description.clone();
        self.store.add(draft);
        self.messages
            .push(MessageLine::success(format!("Added \"{label}\"")));
        self.clear_form();
    }

    /// Marks the selected task as completed.
    pub(crate) fn mark_completed(&mut self) {
        let Some(id) = self.selected else {
            return;
        };
        if self.store.mark_completed(id)
            && let Some(task) = self.store.get(id)
        {
            self.messages.push(MessageLine::success(format!(
                "Completed \"{}\"",
                task.description
            )));
        }
    }

    /// Overwrites the selected task with the form contents.
    pub(crate) fn update_task(&mut self) {
        let Some(id) = self.selected else {
            return;
        };
        let draft = self.form.draft();
        let label = draft.description.clone();
        if self.store.update(id, draft) {
            self.messages
                .push(MessageLine::success(format!("Updated \"{label}\"")));
            self.clear_form();
        }
    }

    /// Removes the selected task.
    ///
    /// The selection moves to the task that takes its place, or to the new
    /// last task when the removed one was last.
    pub(crate) fn remove_task(&mut self) {
        let Some(id) = self.selected else {
            return;
        };
        let Some(index) = self.store.position(id) else {
            self.selected = None;
            return;
        };
        if let Some(task) = self.store.remove(id) {
            self.messages
                .push(MessageLine::success(format!("Removed \"{}\"", task.description)));
        }
        self.selected = self
            .store
            .id_at(index)
            .or_else(|| self.store.len().checked_sub(1).and_then(|i| self.store.id_at(i)));
        self.clear_form();
    }

    /// Replaces the store with the contents of the task file.
    pub(crate) fn load_tasks(&mut self) {
        self.selected = None;
        match fs::load_into(&mut self.store, &self.file) {
            Ok(count) => {
                self.messages.push(MessageLine::success(format!(
                    "Loaded {count} task{} from {}",
                    plural(count),
                    self.file.display_name()
                )));
            }
            Err(e) => {
                error!(path = %self.file.path().display(), error = %format!("{e:#}"), "failed to load tasks");
                self.messages
                    .push(MessageLine::error(format!("Failed to load tasks: {e:#}")));
                if !self.store.is_empty() {
                    let kept = self.store.len();
                    self.messages.push(MessageLine::warning(format!(
                        "Kept {kept} task{} read before the error",
                        plural(kept)
                    )));
                }
            }
        }
    }

    /// Writes the store to the task file.
    pub(crate) fn save_tasks(&mut self) {
        match fs::save(&self.store, &self.file) {
            Ok(count) => {
                self.store.mark_clean();
                self.messages.push(MessageLine::success(format!(
                    "Saved {count} task{} to {}",
                    plural(count),
                    self.file.display_name()
                )));
                let lossy = fs::lossy_task_count(&self.store, self.file.format());
                if lossy > 0 {
                    self.messages.push(MessageLine::warning(format!(
                        "{lossy} task{} with commas will not load back correctly",
                        plural(lossy)
                    )));
                }
            }
            Err(e) => {
                error!(path = %self.file.path().display(), error = %format!("{e:#}"), "failed to save tasks");
                self.messages
                    .push(MessageLine::error(format!("Failed to save tasks: {e:#}")));
            }
        }
    }

    /// Copies the selected task into the form and focuses the description.
    pub(crate) fn edit_selected(&mut self) {
        let Some(task) = self.selected.and_then(|id| self.store.get(id)) else {
            return;
        };
        let draft = task.to_draft();
        self.messages.push(MessageLine::info(format!(
            "Editing \"{}\"; press Ctrl+U to update it",
            draft.description
        )));
        self.form.fill(&draft);
        self.focus = Focus::Description;
    }

    /// Quits, asking for confirmation first when there are unsaved changes.
    pub(crate) fn request_quit(&mut self) {
        if self.store.is_dirty() && !self.quit_armed {
            self.quit_armed = true;
            warn!("quit requested with unsaved changes");
            self.messages.push(MessageLine::warning(
                "Unsaved changes. Quit again to discard them, or press Ctrl+S to save.",
            ));
            return;
        }
        info!("quitting");
        self.should_quit = true;
    }

    /// Resets the three form fields.
    pub(crate) fn clear_form(&mut self) {
        self.form.clear();
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

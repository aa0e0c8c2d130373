//! Event handling logic for the App.
//!
//! `Ctrl+<letter>` shortcuts run their command from any focus. Every other
//! key is routed by [`Focus`]: text fields feed `tui-textarea`, the priority
//! field cycles its choice and the list has single-key commands.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;
use crate::app::commands::Command;
use crate::app::state::{Focus, single_line};
use crate::core::Priority;

impl App {
    /// Handles pasted text from bracketed paste mode.
    ///
    /// The text is flattened to one line and inserted at the cursor of the
    /// focused text field. Pastes into the priority field or the list are
    /// ignored.
    pub fn handle_paste(&mut self, text: &str) {
        let flattened = single_line(text);
        if flattened.is_empty() {
            return;
        }

        let focus = self.focus;
        if let Some(field) = self.form.text_field_mut(focus) {
            field.insert_str(&flattened);
            self.quit_armed = false;
        }
    }

    /// Handles a key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(command) = Command::from_shortcut(key) {
            self.execute(command);
            return;
        }

        if let Some(command) = self.focused_command(key) {
            self.execute(command);
            return;
        }

        self.quit_armed = false;

        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return;
            }
            KeyCode::Up => {
                self.select_prev();
                return;
            }
            KeyCode::Down => {
                self.select_next();
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Description | Focus::DueDate => self.handle_text_field_key(key),
            Focus::Priority => self.handle_priority_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    /// Maps a plain key to the command it triggers in the current focus.
    fn focused_command(&self, key: KeyEvent) -> Option<Command> {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }
        match (self.focus, key.code) {
            (Focus::Description | Focus::DueDate | Focus::Priority, KeyCode::Enter) => {
                Some(Command::AddTask)
            }
            (Focus::List, KeyCode::Char(' ' | 'c')) => Some(Command::MarkCompleted),
            (Focus::List, KeyCode::Delete | KeyCode::Char('x')) => Some(Command::RemoveTask),
            (Focus::List, KeyCode::Enter | KeyCode::Char('e')) => Some(Command::EditSelected),
            (Focus::List, KeyCode::Esc | KeyCode::Char('q')) => Some(Command::Quit),
            _ => None,
        }
    }

    /// Handles keys for the description and due date fields.
    fn handle_text_field_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.focus = Focus::List;
            return;
        }

        let focus = self.focus;
        if let Some(field) = self.form.text_field_mut(focus) {
            // tui-textarea handles: backspace, delete, navigation, character input, etc.
            field.input(key);
        }
        self.form.keep_single_line(focus);
    }

    /// Handles keys for the priority choice.
    fn handle_priority_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.form.priority = self.form.priority.prev();
            }
            KeyCode::Right | KeyCode::Char('l' | ' ') => {
                self.form.priority = self.form.priority.next();
            }
            KeyCode::Char('1') => self.form.priority = Priority::Low,
            KeyCode::Char('2') => self.form.priority = Priority::Medium,
            KeyCode::Char('3') => self.form.priority = Priority::High,
            KeyCode::Backspace | KeyCode::Delete => self.form.priority = Priority::Unset,
            KeyCode::Esc => self.focus = Focus::List,
            _ => {}
        }
    }

    /// Handles keys for the task list.
    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') => self.select_next(),
            KeyCode::Char('k') => self.select_prev(),
            KeyCode::Home | KeyCode::Char('g') => self.select_index(0),
            KeyCode::End | KeyCode::Char('G') => {
                if let Some(last) = self.store.len().checked_sub(1) {
                    self.select_index(last);
                }
            }
            KeyCode::Char('a' | 'i') => self.focus = Focus::Description,
            _ => {}
        }
    }
}

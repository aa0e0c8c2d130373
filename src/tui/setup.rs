//! Terminal setup and configuration utilities.
//!
//! Enables bracketed paste mode so a pasted string arrives as a single
//! `Event::Paste` instead of a burst of key events.

use std::io::stdout;

use ratatui::crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use ratatui::crossterm::execute;
use tracing::{debug, warn};

/// Guard to ensure bracketed paste mode is disabled on drop.
///
/// This ensures proper cleanup even if the application panics.
pub struct TerminalEventGuard {
    bracketed_paste_enabled: bool,
}

impl TerminalEventGuard {
    #[must_use]
    pub fn new() -> Self {
        let bracketed_paste_enabled = match execute!(stdout(), EnableBracketedPaste) {
            Ok(()) => {
                debug!("bracketed paste mode enabled");
                true
            }
            Err(e) => {
                // Pasted text then arrives as ordinary key presses.
                warn!(error = %e, "could not enable bracketed paste mode");
                false
            }
        };

        Self {
            bracketed_paste_enabled,
        }
    }
}

impl Default for TerminalEventGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalEventGuard {
    fn drop(&mut self) {
        if self.bracketed_paste_enabled {
            let _ = execute!(stdout(), DisableBracketedPaste);
        }
    }
}

//! `tasklist` - terminal to-do list manager
//!
//! Entry point for the application.

use clap::Parser;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use tasklist::app::{App, Command};
use tasklist::cli::Args;
use tasklist::logging;
use tasklist::tui::TerminalEventGuard;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logging must be set up before the terminal is taken over so a failure
    // can still be reported on stderr.
    if let Some(path) = &args.log_file
        && let Err(e) = logging::init_file_logging(path)
    {
        eprintln!("Warning: {e:#}");
    }

    let mut app = App::new(args.task_file());
    info!(path = %app.file().path().display(), "starting");
    if args.load {
        app.execute(Command::LoadTasks);
    }

    // Initialize the terminal with crossterm backend
    let mut terminal = ratatui::init();

    // Run the application
    let result = run_app(&mut terminal, &mut app);

    // Restore the terminal
    ratatui::restore();

    if app.has_unsaved_changes() {
        eprintln!(
            "Exited with unsaved changes to {}",
            app.file().path().display()
        );
    }

    result
}

fn run_app(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> anyhow::Result<()> {
    // Enable bracketed paste. The guard ensures cleanup even if the
    // application panics.
    //
    // IMPORTANT: This must be initialized after ratatui::init because
    // ratatui's terminal initialization can reset terminal flags.
    let _event_guard = TerminalEventGuard::new();

    loop {
        // Layout calculation must happen inside the draw closure to ensure it
        // uses the exact same area as rendering
        terminal.draw(|frame| {
            app.update_layout(frame.area());
            app.render(frame);
        })?;

        // Nothing happens between events, so block until the next one.
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            Event::Paste(text) => app.handle_paste(&text),
            _ => {}
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

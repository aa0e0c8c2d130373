//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::fs::{DEFAULT_TASK_FILE, TaskFile, TaskFormat};

/// `tasklist` - terminal to-do list manager
///
/// Keeps an ordered list of tasks in memory and loads or saves it on demand.
#[derive(Parser, Debug)]
#[command(name = "tasklist", version, about, long_about = None)]
pub struct Args {
    /// Task file to load from and save to
    #[arg(default_value = DEFAULT_TASK_FILE)]
    pub file: PathBuf,

    /// File format (detected from the extension when omitted)
    #[arg(long, value_enum)]
    pub format: Option<TaskFormat>,

    /// Load the task file on start-up
    #[arg(long)]
    pub load: bool,

    /// Write log output to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Resolves the task file from the path and optional format override.
    #[must_use]
    pub fn task_file(&self) -> TaskFile {
        match self.format {
            Some(format) => TaskFile::new(self.file.clone(), format),
            None => TaskFile::detect(self.file.clone()),
        }
    }
}

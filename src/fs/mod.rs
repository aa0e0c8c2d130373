//! Task file persistence.
//!
//! A [`TaskFile`] names the file and the format it is stored in. Loading
//! replaces the store's contents; saving overwrites the file in full. Neither
//! operation is transactional: a failed load keeps the records read before the
//! failure, and a failed save may leave a truncated file behind.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::core::TaskStore;

pub mod delimited;
pub mod json;

pub use delimited::{RecordError, format_record, parse_record};
pub use json::{TaskDocument, TaskRecord};

/// Default task file name, resolved against the working directory.
pub const DEFAULT_TASK_FILE: &str = "tasks.txt";

/// Storage format of a task file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TaskFormat {
    /// One `description,due_date,priority,completed` line per task.
    #[default]
    Delimited,
    /// A pretty-printed JSON document.
    Json,
}

impl TaskFormat {
    /// Picks a format from the file extension: `.json` is JSON, anything else is delimited.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        {
            Self::Json
        } else {
            Self::Delimited
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Delimited => "delimited",
            Self::Json => "json",
        }
    }
}

/// Location and format of the task file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFile {
    path: PathBuf,
    format: TaskFormat,
}

impl TaskFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, format: TaskFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Creates a task file whose format is detected from the extension.
    #[must_use]
    pub fn detect(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = TaskFormat::from_path(&path);
        Self { path, format }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn format(&self) -> TaskFormat {
        self.format
    }

    /// File name for display, falling back to the full path.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }
}

impl Default for TaskFile {
    fn default() -> Self {
        Self::new(DEFAULT_TASK_FILE, TaskFormat::Delimited)
    }
}

/// Replaces the contents of `store` with the tasks in `file`.
///
/// The store is cleared and marked unmodified first, so it reports no unsaved
/// changes afterwards even when the load fails. A missing file is not an
/// error: the store is left empty and `Ok(0)` is returned. Returns the number
/// of tasks loaded.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read, or if a record
/// cannot be parsed. For the delimited format, every record before the failing
/// line has already been added to the store.
pub fn load_into(store: &mut TaskStore, file: &TaskFile) -> Result<usize> {
    store.clear();
    store.mark_clean();

    let handle = match File::open(&file.path) {
        Ok(handle) => handle,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(path = %file.path.display(), "task file not found, starting empty");
            return Ok(0);
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Failed to open task file: {}", file.path.display())
            });
        }
    };

    let count = match file.format {
        TaskFormat::Delimited => load_delimited(store, BufReader::new(handle), &file.path)?,
        TaskFormat::Json => load_json(store, BufReader::new(handle), &file.path)?,
    };

    info!(path = %file.path.display(), count, format = file.format.name(), "loaded tasks");
    Ok(count)
}

fn load_delimited(store: &mut TaskStore, reader: impl BufRead, path: &Path) -> Result<usize> {
    let mut count = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read task file: {}", path.display()))?;
        let (draft, completed) = parse_record(index + 1, &line)
            .with_context(|| format!("Malformed record in {}", path.display()))?;
        store.push_loaded(draft, completed);
        count += 1;
    }
    Ok(count)
}

fn load_json(store: &mut TaskStore, reader: impl io::Read, path: &Path) -> Result<usize> {
    let document: TaskDocument = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse task file: {}", path.display()))?;
    let count = document.tasks.len();
    store.replace_all(document.tasks.into_iter().map(TaskRecord::into_parts));
    Ok(count)
}

/// Writes every task in `store` to `file`, overwriting it.
///
/// The file is written in place. Returns the number of tasks written.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written, in which case
/// it may be left truncated.
pub fn save(store: &TaskStore, file: &TaskFile) -> Result<usize> {
    match file.format {
        TaskFormat::Delimited => save_delimited(store, &file.path)?,
        TaskFormat::Json => save_json(store, &file.path)?,
    }

    info!(path = %file.path.display(), count = store.len(), format = file.format.name(), "saved tasks");
    Ok(store.len())
}

/// Counts the tasks that would not load back unchanged from `format`.
///
/// Only the delimited format loses data, for fields containing a comma.
#[must_use]
pub fn lossy_task_count(store: &TaskStore, format: TaskFormat) -> usize {
    match format {
        TaskFormat::Delimited => store
            .iter()
            .filter(|task| delimited::has_embedded_separator(task))
            .count(),
        TaskFormat::Json => 0,
    }
}

fn save_delimited(store: &TaskStore, path: &Path) -> Result<()> {
    let lossy = lossy_task_count(store, TaskFormat::Delimited);
    if lossy > 0 {
        warn!(
            path = %path.display(),
            count = lossy,
            "tasks contain commas and will not load back correctly"
        );
    }

    let handle = File::create(path)
        .with_context(|| format!("Failed to create task file: {}", path.display()))?;
    let mut writer = BufWriter::new(handle);
    for task in store {
        writeln!(writer, "{}", format_record(task))
            .with_context(|| format!("Failed to write task file: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write task file: {}", path.display()))
}

fn save_json(store: &TaskStore, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&TaskDocument::from_tasks(store))
        .context("Failed to serialize tasks")?;
    std::fs::write(path, json + "\n")
        .with_context(|| format!("Failed to write task file: {}", path.display()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::core::{Priority, TaskDraft};
    use serial_test::serial;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Mutex to serialize tests that modify the current working directory.
    static CWD_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard struct that restores the original directory when dropped.
    struct CwdGuard {
        original_dir: PathBuf,
        #[allow(dead_code)] // Field is held for RAII locking
        mutex_guard: std::sync::MutexGuard<'static, ()>,
    }

    impl CwdGuard {
        fn new() -> Result<Self> {
            let mutex_guard = CWD_MUTEX
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            Ok(Self {
                original_dir: std::env::current_dir()?,
                mutex_guard,
            })
        }
    }

    impl Drop for CwdGuard {
        fn drop(&mut self) {
            let _ = std::env::set_current_dir(&self.original_dir);
        }
    }

    fn sample_store() -> TaskStore {
        let mut store = TaskStore::new();
        store.add(TaskDraft::new("Buy milk", "2024-01-01", Priority::Low));
        let done = store.add(TaskDraft::new("File taxes", "2024-04-15", Priority::High));
        store.add(TaskDraft::new("Stretch", "", Priority::Unset));
        store.add(TaskDraft::new("Read", "whenever", Priority::Other("Someday".into())));
        store.mark_completed(done);
        store
    }

    fn fields(store: &TaskStore) -> Vec<(String, String, Priority, bool)> {
        store
            .iter()
            .map(|t| {
                (
                    t.description.clone(),
                    t.due_date.clone(),
                    t.priority.clone(),
                    t.completed,
                )
            })
            .collect()
    }

    // =========================================================================
    // Format detection
    // =========================================================================

    mod format {
        use super::*;

        #[test]
        fn json_extension_selects_json() {
            assert_eq!(TaskFormat::from_path(Path::new("a/tasks.json")), TaskFormat::Json);
            assert_eq!(TaskFormat::from_path(Path::new("TASKS.JSON")), TaskFormat::Json);
        }

        #[test]
        fn other_extensions_select_delimited() {
            assert_eq!(
                TaskFormat::from_path(Path::new("tasks.txt")),
                TaskFormat::Delimited
            );
            assert_eq!(TaskFormat::from_path(Path::new("tasks")), TaskFormat::Delimited);
        }

        #[test]
        fn default_file_is_tasks_txt() {
            let file = TaskFile::default();
            assert_eq!(file.path(), Path::new("tasks.txt"));
            assert_eq!(file.format(), TaskFormat::Delimited);
            assert_eq!(file.display_name(), "tasks.txt");
        }
    }

    // =========================================================================
    // Delimited load/save
    // =========================================================================

    mod delimited_file {
        use super::*;

        #[test]
        fn missing_file_loads_empty_store() -> Result<()> {
            let dir = TempDir::new()?;
            let file = TaskFile::new(dir.path().join("tasks.txt"), TaskFormat::Delimited);
            let mut store = sample_store();

            let count = load_into(&mut store, &file)?;

            assert_eq!(count, 0);
            assert!(store.is_empty());
            assert!(!store.is_dirty());
            Ok(())
        }

        #[test]
        fn empty_store_round_trips() -> Result<()> {
            let dir = TempDir::new()?;
            let file = TaskFile::new(dir.path().join("tasks.txt"), TaskFormat::Delimited);

            save(&TaskStore::new(), &file)?;
            assert_eq!(std::fs::read_to_string(file.path())?, "");

            let mut store = sample_store();
            load_into(&mut store, &file)?;
            assert!(store.is_empty());
            Ok(())
        }

        #[test]
        fn tasks_round_trip() -> Result<()> {
            let dir = TempDir::new()?;
            let file = TaskFile::new(dir.path().join("tasks.txt"), TaskFormat::Delimited);
            let original = sample_store();

            assert_eq!(save(&original, &file)?, 4);
            let mut loaded = TaskStore::new();
            assert_eq!(load_into(&mut loaded, &file)?, 4);

            assert_eq!(fields(&loaded), fields(&original));
            Ok(())
        }

        #[test]
        fn single_task_scenario() -> Result<()> {
            let dir = TempDir::new()?;
            let file = TaskFile::new(dir.path().join("tasks.txt"), TaskFormat::Delimited);
            let mut store = TaskStore::new();
            store.add(TaskDraft::new("Buy milk", "2024-01-01", Priority::Low));

            save(&store, &file)?;
            assert_eq!(
                std::fs::read_to_string(file.path())?,
                "Buy milk,2024-01-01,Low,False\n"
            );

            let mut fresh = TaskStore::new();
            load_into(&mut fresh, &file)?;
            let task = &fresh.tasks()[0];
            assert_eq!(fresh.len(), 1);
            assert_eq!(task.description, "Buy milk");
            assert_eq!(task.due_date, "2024-01-01");
            assert_eq!(task.priority, Priority::Low);
            assert!(!task.completed);
            Ok(())
        }

        #[test]
        fn save_overwrites_previous_contents() -> Result<()> {
            let dir = TempDir::new()?;
            let file = TaskFile::new(dir.path().join("tasks.txt"), TaskFormat::Delimited);
            std::fs::write(file.path(), "old,,,False\nolder,,,True\n")?;

            let mut store = TaskStore::new();
            store.add(TaskDraft::new("new", "", Priority::Medium));
            save(&store, &file)?;

            assert_eq!(std::fs::read_to_string(file.path())?, "new,,Medium,False\n");
            Ok(())
        }

        #[test]
        fn malformed_line_keeps_earlier_records() -> Result<()> {
            let dir = TempDir::new()?;
            let file = TaskFile::new(dir.path().join("tasks.txt"), TaskFormat::Delimited);
            std::fs::write(
                file.path(),
                "first,2024-01-01,Low,False\nsecond,2024-01-02,High,True\nbroken line\nfourth,,,False\n",
            )?;
            let mut store = TaskStore::new();

            let err = load_into(&mut store, &file).unwrap_err();

            let record_err = err.downcast_ref::<RecordError>().unwrap();
            assert_eq!(*record_err, RecordError::FieldCount { line: 3, found: 1 });
            assert_eq!(store.len(), 2);
            assert_eq!(store.tasks()[1].description, "second");
            assert!(store.tasks()[1].completed);
            Ok(())
        }

        #[test]
        fn failed_load_leaves_store_unmodified() -> Result<()> {
            let dir = TempDir::new()?;
            let file = TaskFile::new(dir.path().join("tasks.txt"), TaskFormat::Delimited);
            std::fs::write(file.path(), "broken\nkeep,2024-01-01,Low,False\n")?;
            let mut store = sample_store();
            assert!(store.is_dirty());

            assert!(load_into(&mut store, &file).is_err());

            assert!(store.is_empty());
            assert!(!store.is_dirty());
            Ok(())
        }

        #[test]
        fn embedded_comma_breaks_reload() -> Result<()> {
            let dir = TempDir::new()?;
            let file = TaskFile::new(dir.path().join("tasks.txt"), TaskFormat::Delimited);
            let mut store = TaskStore::new();
            store.add(TaskDraft::new("plain", "", Priority::Low));
            store.add(TaskDraft::new("eggs, bacon", "", Priority::Low));

            save(&store, &file)?;
            let mut reloaded = TaskStore::new();
            assert!(load_into(&mut reloaded, &file).is_err());
            assert_eq!(reloaded.len(), 1);
            Ok(())
        }

        #[test]
        fn lossy_count_only_applies_to_delimited() {
            let mut store = sample_store();
            store.add(TaskDraft::new("eggs, bacon", "", Priority::Low));
            assert_eq!(lossy_task_count(&store, TaskFormat::Delimited), 1);
            assert_eq!(lossy_task_count(&store, TaskFormat::Json), 0);
        }

        #[test]
        fn unreadable_path_is_an_error() -> Result<()> {
            let dir = TempDir::new()?;
            // A directory cannot be read as a task file.
            let file = TaskFile::new(dir.path(), TaskFormat::Delimited);
            let mut store = TaskStore::new();
            assert!(load_into(&mut store, &file).is_err());
            Ok(())
        }

        #[test]
        fn save_into_missing_directory_fails() -> Result<()> {
            let dir = TempDir::new()?;
            let file = TaskFile::new(
                dir.path().join("missing").join("tasks.txt"),
                TaskFormat::Delimited,
            );
            let err = save(&sample_store(), &file).unwrap_err();
            assert!(err.to_string().contains("Failed to create task file"));
            Ok(())
        }

        #[test]
        #[serial]
        fn default_file_resolves_against_working_directory() -> Result<()> {
            let _guard = CwdGuard::new()?;
            let dir = TempDir::new()?;
            std::env::set_current_dir(dir.path())?;

            save(&sample_store(), &TaskFile::default())?;

            assert!(dir.path().join(DEFAULT_TASK_FILE).exists());
            let mut store = TaskStore::new();
            assert_eq!(load_into(&mut store, &TaskFile::default())?, 4);
            Ok(())
        }
    }

    // =========================================================================
    // JSON load/save
    // =========================================================================

    mod json_file {
        use super::*;

        #[test]
        fn tasks_round_trip_including_commas() -> Result<()> {
            let dir = TempDir::new()?;
            let file = TaskFile::detect(dir.path().join("tasks.json"));
            assert_eq!(file.format(), TaskFormat::Json);
            let mut original = sample_store();
            original.add(TaskDraft::new("eggs, bacon", "2024-01-01", Priority::Medium));

            save(&original, &file)?;
            let mut loaded = TaskStore::new();
            assert_eq!(load_into(&mut loaded, &file)?, 5);

            assert_eq!(fields(&loaded), fields(&original));
            Ok(())
        }

        #[test]
        fn invalid_document_loads_nothing() -> Result<()> {
            let dir = TempDir::new()?;
            let file = TaskFile::detect(dir.path().join("tasks.json"));
            std::fs::write(file.path(), "{\"tasks\": [ {\"description\": \"a\"}, oops")?;
            let mut store = sample_store();

            let err = load_into(&mut store, &file).unwrap_err();

            assert!(err.to_string().contains("Failed to parse task file"));
            assert!(store.is_empty());
            assert!(!store.is_dirty());
            Ok(())
        }

        #[test]
        fn saved_document_ends_with_newline() -> Result<()> {
            let dir = TempDir::new()?;
            let file = TaskFile::detect(dir.path().join("tasks.json"));

            save(&sample_store(), &file)?;

            let content = std::fs::read_to_string(file.path())?;
            assert!(content.ends_with("}\n"));
            assert!(!content.ends_with("\n\n"));
            Ok(())
        }

        #[test]
        fn missing_file_loads_empty_store() -> Result<()> {
            let dir = TempDir::new()?;
            let file = TaskFile::detect(dir.path().join("tasks.json"));
            let mut store = sample_store();
            assert_eq!(load_into(&mut store, &file)?, 0);
            assert!(store.is_empty());
            Ok(())
        }
    }
}

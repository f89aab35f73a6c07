//! Date-keyed storage for daily activity logs.
//!
//! A [`LogStore`] maps a `YYYY-MM-DD` date key to a Markdown file under a
//! year/month-partitioned hierarchy: `<base>/YYYY/MM/YYYY-MM-DD.md`.
//! Existence conditions (not-found, already-exists) are expected outcomes
//! and surface as enum variants; only real I/O faults become errors.
//!
//! The store does no locking. Callers may race between an existence check
//! and a write; each individual file write is treated as atomic enough for
//! a single user's daily log.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of reading a log.
#[derive(Debug)]
pub enum ReadOutcome {
    Found(String),
    NotFound,
}

/// Result of [`LogStore::create`].
#[derive(Debug)]
pub enum CreateOutcome {
    /// The file was written; holds the path for display.
    Created(PathBuf),
    /// Refused to overwrite an existing log.
    AlreadyExists,
}

/// Result of [`LogStore::append`].
#[derive(Debug)]
pub enum AppendOutcome {
    /// Content was appended; holds the path for display.
    Appended(PathBuf),
    /// No log exists to extend.
    NotFound,
}

/// One existing log file, as returned by [`LogStore::list`].
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub date: NaiveDate,
    /// Path relative to the store root, e.g. `2025/07/2025-07-01.md`.
    pub rel_path: String,
}

/// Filesystem store for daily logs.
pub struct LogStore {
    base_dir: PathBuf,
}

/// Extracts a `YYYY-MM-DD` date key from a log path's file stem.
///
/// The model addresses logs by path (e.g. `logs/2025/07/2025-07-01.md`);
/// the store is keyed by date. Deriving the key from the stem keeps both
/// contracts and confines every write to the partitioned hierarchy.
pub fn date_key_from_path(path: &str) -> Option<NaiveDate> {
    let stem = Path::new(path).file_stem()?.to_str()?;
    NaiveDate::parse_from_str(stem, "%Y-%m-%d").ok()
}

impl LogStore {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// The partitioned path for a date key: `<base>/YYYY/MM/YYYY-MM-DD.md`.
    fn log_path(&self, date: NaiveDate) -> PathBuf {
        self.base_dir
            .join(format!("{}", date.format("%Y")))
            .join(format!("{}", date.format("%m")))
            .join(format!("{}.md", date.format("%Y-%m-%d")))
    }

    /// Reads the log for `date`.
    ///
    /// # Errors
    ///
    /// Returns an error only for I/O faults other than the file being
    /// absent.
    pub fn read(&self, date: NaiveDate) -> Result<ReadOutcome> {
        let path = self.log_path(date);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(ReadOutcome::Found(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ReadOutcome::NotFound),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    /// Creates the log for `date`, refusing to overwrite an existing one.
    ///
    /// Parent directories are created as needed. `create_new` makes the
    /// existence check and the write one atomic operation, so two racing
    /// creates can never clobber each other.
    pub fn create(&self, date: NaiveDate, content: &str) -> Result<CreateOutcome> {
        let path = self.log_path(date);
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Log path has no parent: {}", path.display()))?;
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
        use std::io::Write;
        let mut file = match fs::OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Ok(CreateOutcome::AlreadyExists)
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to create {}", path.display()))
            }
        };
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(CreateOutcome::Created(path))
    }

    /// Appends `content` (preceded by a newline) to an existing log.
    pub fn append(&self, date: NaiveDate, content: &str) -> Result<AppendOutcome> {
        let path = self.log_path(date);
        if !path.exists() {
            return Ok(AppendOutcome::NotFound);
        }
        use std::io::Write;
        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        write!(file, "\n{}", content)
            .with_context(|| format!("Failed to append to {}", path.display()))?;
        Ok(AppendOutcome::Appended(path))
    }

    /// Lists all existing logs, newest first.
    ///
    /// Walks the `YYYY/MM` hierarchy and keeps only files whose stem parses
    /// as a date key; anything else in the tree is ignored.
    pub fn list(&self) -> Result<Vec<LogEntry>> {
        let mut entries = Vec::new();
        let years = match fs::read_dir(&self.base_dir) {
            Ok(rd) => rd,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(entries),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to list {}", self.base_dir.display()))
            }
        };
        for year in years.flatten() {
            if !year.path().is_dir() {
                continue;
            }
            for month in fs::read_dir(year.path())?.flatten() {
                if !month.path().is_dir() {
                    continue;
                }
                for file in fs::read_dir(month.path())?.flatten() {
                    let path = file.path();
                    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                        continue;
                    };
                    let Ok(date) = NaiveDate::parse_from_str(stem, "%Y-%m-%d") else {
                        continue;
                    };
                    entries.push(LogEntry {
                        date,
                        rel_path: format!("{}.md", date.format("%Y/%m/%Y-%m-%d")),
                    });
                }
            }
        }
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(entries)
    }
}

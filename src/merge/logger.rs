use std::fs;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use crate::merge::{MergeConfig, RemovalOutcome, Report};

/// Simple file logger for merge runs with buffered writes
pub struct FileLogger {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl FileLogger {
    /// Create a new file logger, writing to ~/logs/folder-merge/folder_merge_<timestamp>.log
    ///
    /// # Errors
    /// Returns an error if the home directory is unknown or the log file cannot be created.
    pub fn new() -> Result<Self> {
        let log_dir = crate::config::LOG_DIR
            .as_deref()
            .context("Failed to get home directory")?;

        Self::in_directory(log_dir)
    }

    /// Create a new file logger in the given directory.
    ///
    /// # Errors
    /// Returns an error if the directory or the log file cannot be created.
    pub fn in_directory(log_dir: &Path) -> Result<Self> {
        if !log_dir.exists() {
            fs::create_dir_all(log_dir).context("Failed to create log directory")?;
        }

        let path = log_dir.join(format!(
            "folder_merge_{}.log",
            Local::now().format("%Y-%m-%d_%H-%M-%S")
        ));

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to create log file: {}", path.display()))?;

        Ok(Self {
            writer: BufWriter::new(file),
            path,
        })
    }

    /// Path of the log file being written.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn timestamp() -> String {
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Log when starting a run
    pub(crate) fn log_init(&mut self, source_root: &Path, target_root: &Path, config: &MergeConfig) {
        let _ = writeln!(self.writer, "[{}] INIT", Self::timestamp());
        let _ = writeln!(self.writer, "  source: \"{}\"", source_root.display());
        let _ = writeln!(self.writer, "  target: \"{}\"", target_root.display());
        let _ = writeln!(self.writer, "  marker: \"{}\"", config.marker);
        let _ = writeln!(self.writer, "  dryrun: {}", config.dryrun);
        let _ = self.writer.flush();
    }

    /// Log a matched source and target folder pair
    pub(crate) fn log_match(&mut self, identifier: &str, source: &Path, target: &Path) {
        let _ = writeln!(
            self.writer,
            "[{}] MATCH   {identifier} - \"{}\" -> \"{}\"",
            Self::timestamp(),
            source.display(),
            target.display()
        );
    }

    /// Log a moved entry
    pub(crate) fn log_move(&mut self, from: &Path, to: &Path) {
        let _ = writeln!(
            self.writer,
            "[{}] MOVE    \"{}\" -> \"{}\"",
            Self::timestamp(),
            from.display(),
            to.display()
        );
    }

    /// Log an entry that was left in place because the destination exists
    pub(crate) fn log_skip(&mut self, from: &Path, existing: &Path) {
        let _ = writeln!(
            self.writer,
            "[{}] SKIP    \"{}\" | exists: \"{}\"",
            Self::timestamp(),
            from.display(),
            existing.display()
        );
    }

    /// Log the result of removing a source folder
    pub(crate) fn log_removal(&mut self, folder: &Path, outcome: &RemovalOutcome) {
        let _ = match outcome {
            RemovalOutcome::Removed => {
                writeln!(self.writer, "[{}] REMOVE  \"{}\"", Self::timestamp(), folder.display())
            }
            RemovalOutcome::NotEmpty => writeln!(
                self.writer,
                "[{}] KEEP    \"{}\" | not empty",
                Self::timestamp(),
                folder.display()
            ),
            RemovalOutcome::Failed(error) => writeln!(
                self.writer,
                "[{}] KEEP    \"{}\" | {error}",
                Self::timestamp(),
                folder.display()
            ),
        };
        let _ = self.writer.flush();
    }

    /// Log a fatal error that aborted the run
    pub(crate) fn log_failure(&mut self, error: &str) {
        let _ = writeln!(self.writer, "[{}] ERROR   {error}", Self::timestamp());
        let _ = self.writer.flush();
    }

    /// Log final report
    pub(crate) fn log_report(&mut self, report: &Report) {
        let _ = writeln!(self.writer, "[{}] REPORT", Self::timestamp());
        let _ = writeln!(self.writer, "  Matched folders: {}", report.matched);
        let _ = writeln!(self.writer, "  Entries moved:   {}", report.moved);
        let _ = writeln!(self.writer, "  Entries skipped: {}", report.skipped);
        let _ = writeln!(self.writer, "  Unremoved:       {}", report.unremoved_folders.len());
        for folder in &report.unremoved_folders {
            let _ = writeln!(self.writer, "    - \"{}\"", folder.display());
        }
        let _ = writeln!(self.writer, "[{}] END", Self::timestamp());
        let _ = self.writer.flush();
    }
}

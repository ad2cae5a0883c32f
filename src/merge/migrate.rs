//! Moving the contents of one matched source folder into its target folder.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::merge::{FileLogger, MergeConfig, ReconcileError};
use crate::{path_to_filename_string, print_warning};

/// Result of trying to delete a source folder after its contents were moved.
#[derive(Debug)]
pub enum RemovalOutcome {
    /// Folder was deleted, or would be deleted in a dry run.
    Removed,
    /// Folder still contains entries.
    NotEmpty,
    /// Deleting failed for some other reason.
    Failed(io::Error),
}

impl RemovalOutcome {
    #[must_use]
    pub const fn is_removed(&self) -> bool {
        matches!(self, Self::Removed)
    }
}

/// What happened to one matched source folder.
#[derive(Debug)]
pub struct MigrationResult {
    /// Number of entries moved to the target folder.
    pub moved: usize,
    /// Entries left in the source folder because the destination already exists.
    pub skipped: Vec<PathBuf>,
    pub removal: RemovalOutcome,
}

/// Paths a dry run has already moved away or deleted.
///
/// Nothing changes on disk in a dry run, so later pairs look here to see the tree
/// as a real run would have left it.
#[derive(Debug, Default)]
pub(super) struct DryRunState {
    gone: Vec<PathBuf>,
}

impl DryRunState {
    /// Check if the path or one of its parents would no longer be in place.
    pub(super) fn is_gone(&self, path: &Path) -> bool {
        self.gone.iter().any(|gone| path.starts_with(gone))
    }
}

/// Move every direct entry of `source` into `target` and then remove `source`.
///
/// Entries whose name already exists in `target` are left where they are,
/// which in turn keeps `source` from being removed.
/// Nothing on disk is changed when `config.dryrun` is set,
/// the result then describes what a real run would do.
///
/// # Errors
/// Returns an error if `source` cannot be listed or an entry cannot be moved.
/// Failing to remove `source` is not an error but a [`RemovalOutcome`].
pub fn migrate_folder(
    source: &Path,
    target: &Path,
    config: &MergeConfig,
    logger: Option<&mut FileLogger>,
) -> Result<MigrationResult, ReconcileError> {
    migrate_folder_with_state(source, target, config, logger, &mut DryRunState::default())
}

/// Migrate one pair, tracking dry run moves across pairs in `state`.
pub(super) fn migrate_folder_with_state(
    source: &Path,
    target: &Path,
    config: &MergeConfig,
    mut logger: Option<&mut FileLogger>,
    state: &mut DryRunState,
) -> Result<MigrationResult, ReconcileError> {
    let mut moved: usize = 0;
    let mut skipped: Vec<PathBuf> = Vec::new();

    for entry_path in list_entries(source)? {
        let Some(entry_name) = entry_path.file_name() else {
            continue;
        };
        // Already taken away by an earlier pair in this dry run.
        if config.dryrun && state.is_gone(&entry_path) {
            continue;
        }
        let destination = target.join(entry_name);

        // A dangling symlink at the destination counts as existing too.
        if destination.symlink_metadata().is_ok() {
            if config.verbose {
                print_warning!("  Skipping existing: {}", destination.display());
            }
            if let Some(logger) = logger.as_deref_mut() {
                logger.log_skip(&entry_path, &destination);
            }
            skipped.push(entry_path);
            continue;
        }

        if !config.dryrun {
            move_entry(&entry_path, &destination).map_err(|error| ReconcileError::Move {
                from: entry_path.clone(),
                to: destination.clone(),
                error,
            })?;
        }
        if config.verbose {
            let verb = if config.dryrun { "Would move" } else { "Moved" };
            println!("  {verb}: {}", path_to_filename_string(&entry_path));
        }
        if let Some(logger) = logger.as_deref_mut() {
            logger.log_move(&entry_path, &destination);
        }
        if config.dryrun {
            state.gone.push(entry_path);
        }
        moved += 1;
    }

    let removal = if config.dryrun {
        if skipped.is_empty() {
            state.gone.push(source.to_path_buf());
            RemovalOutcome::Removed
        } else {
            RemovalOutcome::NotEmpty
        }
    } else {
        remove_source_folder(source)
    };

    if config.verbose {
        match &removal {
            RemovalOutcome::Removed => println!("  {} {}", "Removed".green(), source.display()),
            RemovalOutcome::NotEmpty => print_warning!("  Kept non-empty folder: {}", source.display()),
            RemovalOutcome::Failed(error) => print_warning!("  Could not remove {}: {error}", source.display()),
        }
    }
    if let Some(logger) = logger {
        logger.log_removal(source, &removal);
    }

    Ok(MigrationResult {
        moved,
        skipped,
        removal,
    })
}

/// Direct entries of a folder sorted by name.
fn list_entries(folder: &Path) -> Result<Vec<PathBuf>, ReconcileError> {
    let read_error = |error: io::Error| ReconcileError::ReadDir {
        path: folder.to_path_buf(),
        error,
    };
    let mut entries = Vec::new();
    for entry in fs::read_dir(folder).map_err(read_error)? {
        entries.push(entry.map_err(read_error)?.path());
    }
    entries.sort();
    Ok(entries)
}

/// Try to delete an emptied source folder.
fn remove_source_folder(folder: &Path) -> RemovalOutcome {
    match fs::remove_dir(folder) {
        Ok(()) => RemovalOutcome::Removed,
        Err(error) if error.kind() == ErrorKind::DirectoryNotEmpty => RemovalOutcome::NotEmpty,
        Err(error) => RemovalOutcome::Failed(error),
    }
}

/// Move a file or directory, falling back to copy and delete across filesystems.
///
/// The fallback is best-effort: if deleting the original fails after a successful copy,
/// the entry is left in both places and the error is returned.
fn move_entry(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == ErrorKind::CrossesDevices => {
            let file_type = fs::symlink_metadata(from)?.file_type();
            if file_type.is_symlink() {
                copy_symlink(from, to)?;
                remove_symlink(from)
            } else if file_type.is_dir() {
                copy_dir_recursive(from, to)?;
                fs::remove_dir_all(from)
            } else {
                fs::copy(from, to)?;
                fs::remove_file(from)
            }
        }
        Err(error) => Err(error),
    }
}

/// Recursively copy a directory and its contents.
///
/// Symlinks are recreated as links instead of copying what they point to.
fn copy_dir_recursive(source: &Path, target: &Path) -> io::Result<()> {
    fs::create_dir_all(target)?;

    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = target.join(entry.file_name());
        let file_type = entry.file_type()?;

        if file_type.is_symlink() {
            copy_symlink(&src_path, &dst_path)?;
        } else if file_type.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }

    Ok(())
}

#[cfg(unix)]
fn copy_symlink(from: &Path, to: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(fs::read_link(from)?, to)
}

#[cfg(windows)]
fn copy_symlink(from: &Path, to: &Path) -> io::Result<()> {
    let link_target = fs::read_link(from)?;
    if fs::metadata(from).is_ok_and(|metadata| metadata.is_dir()) {
        std::os::windows::fs::symlink_dir(link_target, to)
    } else {
        std::os::windows::fs::symlink_file(link_target, to)
    }
}

#[cfg(not(any(unix, windows)))]
fn copy_symlink(from: &Path, _to: &Path) -> io::Result<()> {
    Err(io::Error::new(
        ErrorKind::Unsupported,
        format!("Cannot copy symlink {}", from.display()),
    ))
}

/// Directory symlinks on Windows are removed like directories.
fn remove_symlink(path: &Path) -> io::Result<()> {
    fs::remove_file(path).or_else(|_| fs::remove_dir(path))
}

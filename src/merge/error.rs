use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while reconciling a source tree into a target tree.
///
/// `InvalidName` is recovered by the reconciler, everything else aborts the run.
#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("Folder name does not contain an identifier: '{}'", .0.display())]
    InvalidName(PathBuf),

    #[error(
        "Source '{}' and target '{}' are the same directory or one is inside the other, \
         merging would move folders into their own tree",
        source_root.display(),
        target_root.display()
    )]
    OverlappingRoots {
        source_root: PathBuf,
        target_root: PathBuf,
    },

    #[error("Failed to read directory '{}': {error}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        error: io::Error,
    },

    #[error("Failed to move '{}' to '{}': {error}", from.display(), to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        error: io::Error,
    },
}

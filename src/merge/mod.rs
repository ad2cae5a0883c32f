//! Folder merge module for consolidating a source tree into a target tree.
//!
//! Folders on both sides are matched by an identifier taken from the start of the
//! folder name, for example `ABC-1 Widgets` and `abc-1 widgets (old)` share `ABC-1`.
//! The contents of each matched source folder are moved into its target folder
//! without overwriting anything, and emptied source folders are deleted.

mod config;
mod error;
mod identifier;
mod logger;
mod migrate;
mod reconcile;
mod report;
mod scan;

pub use config::{FolderMergeConfig, MergeConfig};
pub use error::ReconcileError;
pub use identifier::{Identifier, extract_identifier, extract_identifier_from_os_str, identifier_for_folder};
pub use logger::FileLogger;
pub use migrate::{MigrationResult, RemovalOutcome, migrate_folder};
pub use reconcile::{MatchedPair, Plan, Reconciler, reconcile};
pub use report::Report;
pub use scan::{DEFAULT_EXCLUDE_MARKER, scan_folders};

//! Matching source folders to target folders and merging each matched pair.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::merge::migrate::{DryRunState, migrate_folder_with_state};
use crate::merge::{FileLogger, Identifier, MergeConfig, ReconcileError, Report, identifier_for_folder, scan_folders};
use crate::{get_relative_path_or_filename, print_warning};

/// A source folder and the target folder it will be merged into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedPair {
    pub identifier: Identifier,
    pub source: PathBuf,
    pub target: PathBuf,
}

/// Matched pairs for a source and target tree, computed without touching the filesystem.
#[derive(Debug, Default, Clone)]
pub struct Plan {
    pub source_root: PathBuf,
    pub target_root: PathBuf,
    /// Pairs in identifier order.
    pub pairs: Vec<MatchedPair>,
    pub shadowed: Vec<PathBuf>,
    pub invalid_names: Vec<PathBuf>,
}

/// Merges matching folders from a source tree into a target tree.
pub struct Reconciler {
    config: MergeConfig,
    logger: Option<FileLogger>,
}

/// Reconcile two trees with the default config.
///
/// # Errors
/// Returns an error if the roots overlap, or a source folder cannot be listed or moved.
pub fn reconcile(source_root: &Path, target_root: &Path) -> Result<Report, ReconcileError> {
    Reconciler::new(MergeConfig::default()).reconcile(source_root, target_root)
}

impl Reconciler {
    #[must_use]
    pub const fn new(config: MergeConfig) -> Self {
        Self { config, logger: None }
    }

    /// Write a run log with the given logger.
    #[must_use]
    pub fn with_logger(mut self, logger: FileLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &MergeConfig {
        &self.config
    }

    #[must_use]
    pub const fn logger(&self) -> Option<&FileLogger> {
        self.logger.as_ref()
    }

    /// Scan both trees and match folders by identifier.
    ///
    /// # Errors
    /// Returns an error if the roots are the same directory or one contains the other.
    pub fn plan(&self, source_root: &Path, target_root: &Path) -> Result<Plan, ReconcileError> {
        check_roots(source_root, target_root)?;

        let mut shadowed = Vec::new();
        let mut invalid_names = Vec::new();

        let source_folders = scan_folders(source_root, &self.config.marker);
        let target_folders = scan_folders(target_root, &self.config.marker);
        if self.config.debug {
            eprintln!(
                "Found {} source and {} target folders",
                source_folders.len(),
                target_folders.len()
            );
        }

        let source_ids = build_identifier_map(source_folders, &mut shadowed, &mut invalid_names);
        let mut target_ids = build_identifier_map(target_folders, &mut shadowed, &mut invalid_names);

        let pairs = source_ids
            .into_iter()
            .filter_map(|(identifier, source)| {
                target_ids.remove(&identifier).map(|target| MatchedPair {
                    identifier,
                    source,
                    target,
                })
            })
            .collect();

        Ok(Plan {
            source_root: source_root.to_path_buf(),
            target_root: target_root.to_path_buf(),
            pairs,
            shadowed,
            invalid_names,
        })
    }

    /// Scan, match and merge the two trees.
    ///
    /// # Errors
    /// Returns an error if the roots overlap, or a source folder cannot be listed or moved.
    pub fn reconcile(&mut self, source_root: &Path, target_root: &Path) -> Result<Report, ReconcileError> {
        let plan = self.plan(source_root, target_root)?;
        self.execute(plan)
    }

    /// Merge every matched pair of a previously computed plan.
    ///
    /// # Errors
    /// Returns an error if a source folder cannot be listed or an entry cannot be moved.
    /// Entries moved before the failure stay moved.
    pub fn execute(&mut self, plan: Plan) -> Result<Report, ReconcileError> {
        if let Some(logger) = self.logger.as_mut() {
            logger.log_init(&plan.source_root, &plan.target_root, &self.config);
        }

        match self.migrate_pairs(&plan) {
            Ok(mut report) => {
                report.shadowed = plan.shadowed;
                report.invalid_names = plan.invalid_names;
                if let Some(logger) = self.logger.as_mut() {
                    logger.log_report(&report);
                }
                Ok(report)
            }
            Err(error) => {
                if let Some(logger) = self.logger.as_mut() {
                    logger.log_failure(&error.to_string());
                }
                Err(error)
            }
        }
    }

    fn migrate_pairs(&mut self, plan: &Plan) -> Result<Report, ReconcileError> {
        let mut report = Report {
            dryrun: self.config.dryrun,
            ..Report::default()
        };

        let mut dry_run_state = DryRunState::default();
        for pair in &plan.pairs {
            // An earlier pair may have moved this folder along with its parent.
            if !pair.source.is_dir() || dry_run_state.is_gone(&pair.source) {
                print_warning!("Source folder no longer exists: {}", pair.source.display());
                report.missing.push(pair.source.clone());
                continue;
            }

            report.matched += 1;
            if self.config.verbose {
                println!(
                    "{}: {} {} {}",
                    pair.identifier.as_str().cyan().bold(),
                    get_relative_path_or_filename(&pair.source, &plan.source_root),
                    "→".green(),
                    get_relative_path_or_filename(&pair.target, &plan.target_root)
                );
            }
            if let Some(logger) = self.logger.as_mut() {
                logger.log_match(pair.identifier.as_str(), &pair.source, &pair.target);
            }

            let result = migrate_folder_with_state(
                &pair.source,
                &pair.target,
                &self.config,
                self.logger.as_mut(),
                &mut dry_run_state,
            )?;
            report.moved += result.moved;
            report.skipped += result.skipped.len();
            if !result.removal.is_removed() {
                report.unremoved_folders.push(pair.source.clone());
            }
        }

        Ok(report)
    }
}

/// Map identifiers to folders in scan order, a later folder replacing an earlier one.
fn build_identifier_map(
    folders: Vec<PathBuf>,
    shadowed: &mut Vec<PathBuf>,
    invalid_names: &mut Vec<PathBuf>,
) -> BTreeMap<Identifier, PathBuf> {
    let mut ids: BTreeMap<Identifier, PathBuf> = BTreeMap::new();
    for folder in folders {
        match identifier_for_folder(&folder) {
            Ok(identifier) => {
                if let Some(previous) = ids.insert(identifier, folder) {
                    print_warning!("Duplicate identifier, ignoring folder: {}", previous.display());
                    shadowed.push(previous);
                }
            }
            Err(error) => {
                print_warning!("{error}");
                invalid_names.push(folder);
            }
        }
    }
    ids
}

/// Source and target must be separate trees.
fn check_roots(source_root: &Path, target_root: &Path) -> Result<(), ReconcileError> {
    let source = dunce::canonicalize(source_root).unwrap_or_else(|_| source_root.to_path_buf());
    let target = dunce::canonicalize(target_root).unwrap_or_else(|_| target_root.to_path_buf());
    if source.starts_with(&target) || target.starts_with(&source) {
        return Err(ReconcileError::OverlappingRoots {
            source_root: source_root.to_path_buf(),
            target_root: target_root.to_path_buf(),
        });
    }
    Ok(())
}

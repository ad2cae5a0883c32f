//! End-of-run summary.

use std::fmt;
use std::path::PathBuf;

use colored::Colorize;
use itertools::Itertools;

/// Outcome of one reconciliation run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    /// Matched source folders that could not be removed, in processing order.
    pub unremoved_folders: Vec<PathBuf>,
    /// Number of matched folder pairs.
    pub matched: usize,
    /// Number of entries moved into target folders.
    pub moved: usize,
    /// Number of entries left in source folders because the destination exists.
    pub skipped: usize,
    /// Folders dropped from matching because a later folder on the same side had the same identifier.
    pub shadowed: Vec<PathBuf>,
    /// Folders whose name does not contain an identifier.
    pub invalid_names: Vec<PathBuf>,
    /// Matched source folders that were gone before their turn came.
    pub missing: Vec<PathBuf>,
    /// Nothing was changed on disk.
    pub dryrun: bool,
}

impl Report {
    /// True when every matched source folder was removed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.unremoved_folders.is_empty()
    }

    /// Short status title.
    #[must_use]
    pub fn title(&self) -> &'static str {
        if self.is_success() {
            "Operation Completed"
        } else {
            "Operation Completed with Exceptions"
        }
    }

    /// Status message listing the unremoved folders.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.is_success() {
            return "Folders processed successfully.".to_string();
        }
        let folders = self.unremoved_folders.iter().map(|path| path.display()).join("\n");
        format!(
            "Processed folders successfully, but could not delete the following non-empty directories:\n{folders}"
        )
    }

    /// Print the report to the terminal.
    pub fn print(&self) {
        if self.dryrun {
            println!("{}", "Dryrun: nothing was moved or deleted".yellow());
        }
        println!(
            "Matched {} folder(s), moved {} item(s), skipped {} existing item(s)",
            self.matched, self.moved, self.skipped
        );
        print_list("Ignored folders with duplicate identifiers:", &self.shadowed);
        print_list("Ignored folders without identifier:", &self.invalid_names);
        print_list("Source folders no longer present:", &self.missing);

        if self.is_success() {
            println!("{}", self.summary().green());
        } else {
            println!("{}", self.title().yellow().bold());
            println!("{}", self.summary().yellow());
        }
    }
}

fn print_list(header: &str, paths: &[PathBuf]) {
    if paths.is_empty() {
        return;
    }
    println!("{}", header.yellow());
    for path in paths {
        println!("  {}", path.display());
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title())?;
        write!(f, "{}", self.summary())
    }
}

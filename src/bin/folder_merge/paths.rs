//! Last used source and target directories.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use folder_merge::print_warning;

/// Source and target paths from the previous run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastPaths {
    pub source: PathBuf,
    pub target: PathBuf,
}

impl LastPaths {
    /// Read last used paths from the state file.
    /// Returns `None` if the file does not exist or cannot be parsed.
    pub fn load() -> Option<Self> {
        folder_merge::config::PATHS_STATE_PATH
            .as_deref()
            .and_then(Self::load_from)
    }

    fn load_from(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        toml::from_str::<Self>(&content)
            .map_err(|e| {
                print_warning!("Ignoring invalid paths file {}: {e}", path.display());
            })
            .ok()
    }

    /// Write paths to the state file.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = folder_merge::config::PATHS_STATE_PATH
            .as_deref()
            .context("Failed to get home directory")?;
        self.save_to(path)
    }

    fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = toml::to_string(self).context("Failed to serialize paths")?;
        fs::write(path, content).with_context(|| format!("Failed to write paths file: {}", path.display()))
    }
}

/// Print saved paths for `--show-paths`.
pub fn print_last_paths() {
    match LastPaths::load() {
        Some(paths) => {
            println!("Source: {}", paths.source.display());
            println!("Target: {}", paths.target.display());
        }
        None => println!("No saved paths"),
    }
}

#[cfg(test)]
mod last_paths_tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn save_and_load_paths() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let state_file = temp_dir.path().join("config").join("paths.toml");
        let paths = LastPaths {
            source: PathBuf::from("/data/incoming products"),
            target: PathBuf::from("/data/products"),
        };

        paths.save_to(&state_file).expect("Failed to save paths");
        assert_eq!(LastPaths::load_from(&state_file), Some(paths));
    }

    #[test]
    fn missing_file_has_no_paths() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        assert_eq!(LastPaths::load_from(&temp_dir.path().join("missing.toml")), None);
    }

    #[test]
    fn incomplete_file_has_no_paths() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let state_file = temp_dir.path().join("paths.toml");
        fs::write(&state_file, "source = \"/only/source\"\n").expect("Failed to write file");

        assert_eq!(LastPaths::load_from(&state_file), None);
    }
}

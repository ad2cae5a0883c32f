//! Recursive folder discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Default name prefix for folders that should not take part in matching.
pub const DEFAULT_EXCLUDE_MARKER: &str = "-";

/// List every directory under `root` at any depth, in traversal order.
///
/// The root itself is not included. Directories whose name starts with `marker`
/// are left out, but their own subdirectories are still visited and listed.
/// A root that does not exist produces an empty list.
/// Symlinks are not followed and symlinks to directories are not listed,
/// so a matched folder is always a real directory inside the scanned tree.
#[must_use]
pub fn scan_folders(root: &Path, marker: &str) -> Vec<PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .filter(|entry| !is_excluded(entry, marker))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Check if the directory name starts with the exclusion marker.
fn is_excluded(entry: &walkdir::DirEntry, marker: &str) -> bool {
    !marker.is_empty()
        && entry
            .file_name()
            .as_encoded_bytes()
            .starts_with(marker.as_bytes())
}

#[cfg(test)]
mod scan_tests {
    use super::*;

    use std::fs::{self, File};

    use tempfile::TempDir;

    fn create_dirs(root: &Path, dirs: &[&str]) {
        for dir in dirs {
            fs::create_dir_all(root.join(dir)).expect("Failed to create directory");
        }
    }

    fn relative_names(root: &Path, folders: &[PathBuf]) -> Vec<String> {
        let mut names: Vec<String> = folders
            .iter()
            .map(|path| crate::get_relative_path_or_filename(path, root).replace('\\', "/"))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn lists_nested_folders_without_root() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        create_dirs(temp_dir.path(), &["A1 One/inner", "B2 Two"]);

        let folders = scan_folders(temp_dir.path(), DEFAULT_EXCLUDE_MARKER);
        assert_eq!(
            relative_names(temp_dir.path(), &folders),
            vec!["A1 One", "A1 One/inner", "B2 Two"]
        );
    }

    #[test]
    fn files_are_not_listed() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        create_dirs(temp_dir.path(), &["A1 One"]);
        File::create(temp_dir.path().join("A2 file.txt")).expect("Failed to create file");

        let folders = scan_folders(temp_dir.path(), DEFAULT_EXCLUDE_MARKER);
        assert_eq!(relative_names(temp_dir.path(), &folders), vec!["A1 One"]);
    }

    #[test]
    fn marker_folders_are_excluded_at_any_depth() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        create_dirs(temp_dir.path(), &["-archive", "A1 One/-old", "A1 One/B2 Keep/-deep"]);

        let folders = scan_folders(temp_dir.path(), DEFAULT_EXCLUDE_MARKER);
        let names = relative_names(temp_dir.path(), &folders);
        assert_eq!(names, vec!["A1 One", "A1 One/B2 Keep"]);
    }

    #[test]
    fn children_of_excluded_folder_are_still_listed() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        create_dirs(temp_dir.path(), &["-archive/C3 Three"]);

        let folders = scan_folders(temp_dir.path(), DEFAULT_EXCLUDE_MARKER);
        assert_eq!(relative_names(temp_dir.path(), &folders), vec!["-archive/C3 Three"]);
    }

    #[test]
    fn marker_in_middle_of_name_is_not_excluded() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        create_dirs(temp_dir.path(), &["ABC-1 Widgets"]);

        let folders = scan_folders(temp_dir.path(), DEFAULT_EXCLUDE_MARKER);
        assert_eq!(folders.len(), 1);
    }

    #[test]
    fn custom_marker() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        create_dirs(temp_dir.path(), &["_skip", "-kept"]);

        let folders = scan_folders(temp_dir.path(), "_");
        assert_eq!(relative_names(temp_dir.path(), &folders), vec!["-kept"]);
    }

    #[test]
    fn empty_marker_excludes_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        create_dirs(temp_dir.path(), &["-archive"]);

        assert_eq!(scan_folders(temp_dir.path(), "").len(), 1);
    }

    #[test]
    fn missing_root_gives_empty_list() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let missing = temp_dir.path().join("does-not-exist");

        assert!(scan_folders(&missing, DEFAULT_EXCLUDE_MARKER).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_folders_are_not_listed_or_followed() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().join("root");
        create_dirs(temp_dir.path(), &["root/A1 One", "elsewhere/B2 Inside"]);
        std::os::unix::fs::symlink(temp_dir.path().join("elsewhere"), root.join("C3 Link"))
            .expect("Failed to create symlink");

        let folders = scan_folders(&root, DEFAULT_EXCLUDE_MARKER);
        assert_eq!(relative_names(&root, &folders), vec!["A1 One"]);
    }
}

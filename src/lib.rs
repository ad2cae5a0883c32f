pub mod config;
pub mod merge;

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Command;
use clap_complete::Shell;
use colored::Colorize;

pub use merge::{DEFAULT_EXCLUDE_MARKER, FolderMergeConfig, MergeConfig, Reconciler, Report, reconcile};

/// Resolves the provided input path to a directory to an absolute path.
///
/// If `path` is `None`, the current working directory is used.
/// Surrounding whitespace is trimmed from paths that are valid Unicode,
/// other paths are used as is. A blank path is an error.
/// The function verifies that the provided path exists and is a directory,
/// returning an error if it is not.
/// ```rust
/// use std::path::Path;
/// use folder_merge::resolve_input_dir;
///
/// let path = Path::new("src");
/// let absolute_path = resolve_input_dir(Some(path)).unwrap();
/// ```
#[inline]
pub fn resolve_input_dir(path: Option<&Path>) -> Result<PathBuf> {
    let dir_path = match path {
        None => env::current_dir().context("Failed to get current working directory")?,
        Some(path) => match path.to_str() {
            Some(text) if text.trim().is_empty() => anyhow::bail!("Input path is empty"),
            Some(text) => PathBuf::from(text.trim()),
            None => path.to_path_buf(),
        },
    };
    if !dir_path.exists() {
        anyhow::bail!(
            "Input path does not exist or is not accessible: '{}'",
            dir_path.display()
        );
    }
    if !dir_path.is_dir() {
        anyhow::bail!("Input path is not a directory: '{}'", dir_path.display());
    }

    let absolute_input_path = dunce::canonicalize(&dir_path)?;

    // Canonicalize fails for network drives on Windows :(
    if path_to_string(&absolute_input_path).starts_with(r"\\?") && !path_to_string(&dir_path).starts_with(r"\\?") {
        Ok(dir_path)
    } else {
        Ok(absolute_input_path)
    }
}

/// Gets the relative path or filename from a full path based on a root directory.
///
/// If the full path is within the root directory, the function returns the relative path.
/// Otherwise, it returns just the filename. If the filename cannot be determined, the
/// full path is returned.
///
/// ```rust
/// use std::path::Path;
/// use folder_merge::get_relative_path_or_filename;
///
/// let root = Path::new("/root/dir");
/// let full_path = root.join("subdir/file.txt");
/// let relative_path = get_relative_path_or_filename(&full_path, root);
/// assert_eq!(relative_path, "subdir/file.txt");
///
/// let outside_path = Path::new("/other/another.txt");
/// let relative_or_filename = get_relative_path_or_filename(&outside_path, root);
/// assert_eq!(relative_or_filename, "another.txt");
/// ```
#[must_use]
pub fn get_relative_path_or_filename(full_path: &Path, root: &Path) -> String {
    if full_path == root {
        return full_path.file_name().unwrap_or_default().to_string_lossy().to_string();
    }
    full_path.strip_prefix(root).map_or_else(
        |_| {
            full_path.file_name().map_or_else(
                || full_path.display().to_string(),
                |name| name.to_string_lossy().to_string(),
            )
        },
        |relative_path| relative_path.display().to_string(),
    )
}

/// Convert `OsStr` to String with invalid Unicode handling.
pub fn os_str_to_string(name: &OsStr) -> String {
    name.to_str().map_or_else(
        || name.to_string_lossy().replace('\u{FFFD}', ""),
        std::string::ToString::to_string,
    )
}

/// Convert given path to string with invalid Unicode handling.
pub fn path_to_string(path: &Path) -> String {
    path.to_str().map_or_else(
        || path.to_string_lossy().to_string().replace('\u{FFFD}', ""),
        std::string::ToString::to_string,
    )
}

/// Convert given path to filename string with invalid Unicode handling.
#[must_use]
pub fn path_to_filename_string(path: &Path) -> String {
    os_str_to_string(path.file_name().unwrap_or_default())
}

#[inline]
pub fn print_error(message: &str) {
    eprintln!("{}", format!("Error: {message}").red());
}

#[macro_export]
macro_rules! print_error {
    ($($arg:tt)*) => {
        $crate::print_error(&format!($($arg)*))
    };
}

#[inline]
pub fn print_warning(message: &str) {
    eprintln!("{}", message.yellow());
}

#[macro_export]
macro_rules! print_warning {
    ($($arg:tt)*) => {
        $crate::print_warning(&format!($($arg)*))
    };
}

#[inline]
pub fn print_bold(message: &str) {
    println!("{}", message.bold());
}

#[macro_export]
macro_rules! print_bold {
    ($($arg:tt)*) => {
        $crate::print_bold(&format!($($arg)*))
    };
}

/// Generate a shell completion script for the given shell.
pub fn generate_shell_completion(shell: Shell, mut command: Command, install: bool, command_name: &str) -> Result<()> {
    if install {
        let out_dir = get_shell_completion_dir(shell, command_name)?;
        let path = clap_complete::generate_to(shell, &mut command, command_name, out_dir)?;
        println!("Completion file generated to: {}", path.display());
    } else {
        clap_complete::generate(shell, &mut command, command_name, &mut std::io::stdout());
    }
    Ok(())
}

/// Determine the appropriate directory for storing shell completions.
///
/// First checks if the user-specific directory exists,
/// then checks for the global directory.
/// If neither exist, creates and uses the user-specific dir.
fn get_shell_completion_dir(shell: Shell, name: &str) -> Result<PathBuf> {
    let home = dirs::home_dir().context("Failed to get home directory")?;

    // Special handling for oh-my-zsh.
    // Create custom "plugin", which will then have to be loaded in .zshrc
    if shell == Shell::Zsh {
        let omz_plugins = home.join(".oh-my-zsh/custom/plugins");
        if omz_plugins.exists() {
            let plugin_dir = omz_plugins.join(name);
            std::fs::create_dir_all(&plugin_dir)?;
            return Ok(plugin_dir);
        }
    }

    let user_dir = match shell {
        Shell::PowerShell => {
            if cfg!(windows) {
                home.join(r"Documents\PowerShell\completions")
            } else {
                home.join(".config/powershell/completions")
            }
        }
        Shell::Bash => home.join(".bash_completion.d"),
        Shell::Elvish => home.join(".elvish"),
        Shell::Fish => home.join(".config/fish/completions"),
        Shell::Zsh => home.join(".zsh/completions"),
        _ => anyhow::bail!("Unsupported shell"),
    };

    if user_dir.exists() {
        return Ok(user_dir);
    }

    let global_dir = match shell {
        Shell::PowerShell => user_dir.clone(),
        Shell::Bash => PathBuf::from("/etc/bash_completion.d"),
        Shell::Fish => PathBuf::from("/usr/share/fish/completions"),
        Shell::Zsh => PathBuf::from("/usr/share/zsh/site-functions"),
        _ => anyhow::bail!("Unsupported shell"),
    };

    if global_dir.exists() {
        return Ok(global_dir);
    }

    std::fs::create_dir_all(&user_dir)?;
    Ok(user_dir)
}

#[cfg(test)]
mod lib_tests {
    use super::*;

    use std::fs::File;

    use tempfile::tempdir;

    #[test]
    fn test_resolve_input_dir_valid() {
        let dir = tempdir().unwrap();
        let resolved = resolve_input_dir(Some(dir.path()));
        assert!(resolved.is_ok());
    }

    #[test]
    fn test_resolve_input_dir_nonexistent() {
        let path = Path::new("nonexistent");
        let resolved = resolve_input_dir(Some(path));
        assert!(resolved.is_err());
    }

    #[test]
    fn test_resolve_input_dir_rejects_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.txt");
        File::create(&file).unwrap();
        assert!(resolve_input_dir(Some(&file)).is_err());
    }

    #[test]
    fn test_resolve_input_dir_empty() {
        let path = Path::new("  \n");
        let resolved = resolve_input_dir(Some(path));
        assert!(resolved.is_err());
    }

    #[test]
    fn test_resolve_input_dir_trims_whitespace() {
        let dir = tempdir().unwrap();
        let padded = format!("  {}\n", dir.path().display());
        let resolved = resolve_input_dir(Some(Path::new(&padded))).unwrap();
        assert_eq!(resolved, dunce::canonicalize(dir.path()).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_input_dir_missing_non_utf8_is_error() {
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"/definitely/missing/\xff"));
        assert!(resolve_input_dir(Some(path)).is_err());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_resolve_input_dir_existing_non_utf8() {
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().unwrap();
        let raw = dir.path().join(OsStr::from_bytes(b"AB\xffC-1 Foo"));
        std::fs::create_dir(&raw).unwrap();
        let resolved = resolve_input_dir(Some(&raw)).unwrap();
        assert_eq!(resolved.file_name(), raw.file_name());
        assert_ne!(resolved, env::current_dir().unwrap());
    }

    #[test]
    fn test_resolve_input_dir_default() {
        let resolved = resolve_input_dir(None);
        assert!(resolved.is_ok());
        assert_eq!(resolved.unwrap(), env::current_dir().unwrap());
    }
}

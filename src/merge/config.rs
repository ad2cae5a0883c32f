//! Configuration for folder merge runs.

use std::{fmt, fs};

use anyhow::Context;
use serde::Deserialize;

use crate::merge::DEFAULT_EXCLUDE_MARKER;

/// Config from the user config file.
#[derive(Debug, Default, Deserialize)]
pub struct FolderMergeConfig {
    #[serde(default)]
    pub auto: bool,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub dryrun: bool,
    #[serde(default)]
    pub log: bool,
    #[serde(default)]
    pub marker: Option<String>,
    #[serde(default)]
    pub verbose: bool,
}

/// Wrapper needed for parsing the config section.
#[derive(Debug, Default, Deserialize)]
struct UserConfig {
    #[serde(default)]
    foldermerge: FolderMergeConfig,
}

/// Final config used by the reconciler.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    pub debug: bool,
    pub dryrun: bool,
    pub log: bool,
    /// Folders whose name starts with this are not scanned for matching.
    pub marker: String,
    pub verbose: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            debug: false,
            dryrun: false,
            log: false,
            marker: DEFAULT_EXCLUDE_MARKER.to_string(),
            verbose: false,
        }
    }
}

impl FolderMergeConfig {
    /// Try to read user config from the file if it exists.
    /// Otherwise, fall back to default config.
    ///
    /// # Errors
    /// Returns an error if config file exists but cannot be read or parsed.
    pub fn get_user_config() -> anyhow::Result<Self> {
        let Some(path) = crate::config::CONFIG_PATH.as_deref() else {
            return Ok(Self::default());
        };

        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file {}:\n{e}", path.display())),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(anyhow::anyhow!(
                "Failed to read config file {}: {error}",
                path.display()
            )),
        }
    }

    /// Parse config from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the TOML string is invalid.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        toml::from_str::<UserConfig>(toml_str)
            .map(|config| config.foldermerge)
            .with_context(|| "Failed to parse config TOML")
    }
}

impl fmt::Display for MergeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Config:")?;
        writeln!(f, "  debug:   {}", self.debug)?;
        writeln!(f, "  dryrun:  {}", self.dryrun)?;
        writeln!(f, "  log:     {}", self.log)?;
        writeln!(f, "  marker:  \"{}\"", self.marker)?;
        write!(f, "  verbose: {}", self.verbose)
    }
}

#[cfg(test)]
mod foldermerge_config_tests {
    use super::*;

    #[test]
    fn from_toml_str_parses_empty_config() {
        let config = FolderMergeConfig::from_toml_str("").expect("should parse empty config");
        assert!(!config.auto);
        assert!(!config.debug);
        assert!(!config.dryrun);
        assert!(!config.log);
        assert!(!config.verbose);
        assert!(config.marker.is_none());
    }

    #[test]
    fn from_toml_str_parses_foldermerge_section() {
        let toml = r#"
[foldermerge]
auto = true
debug = true
dryrun = true
log = true
marker = "_"
verbose = true
"#;
        let config = FolderMergeConfig::from_toml_str(toml).expect("should parse config");
        assert!(config.auto);
        assert!(config.debug);
        assert!(config.dryrun);
        assert!(config.log);
        assert!(config.verbose);
        assert_eq!(config.marker.as_deref(), Some("_"));
    }

    #[test]
    fn from_toml_str_ignores_other_sections() {
        let toml = r"
[dirmove]
auto = true

[foldermerge]
verbose = true
";
        let config = FolderMergeConfig::from_toml_str(toml).expect("should parse config");
        assert!(config.verbose);
        assert!(!config.auto);
    }

    #[test]
    fn from_toml_str_invalid_toml_returns_error() {
        let result = FolderMergeConfig::from_toml_str("this is not valid toml {{{");
        assert!(result.is_err());
    }

    #[test]
    fn from_toml_str_wrong_type_returns_error() {
        let result = FolderMergeConfig::from_toml_str("[foldermerge]\nverbose = \"yes\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn default_merge_config_uses_dash_marker() {
        assert_eq!(MergeConfig::default().marker, "-");
    }
}

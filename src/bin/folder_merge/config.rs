use folder_merge::{DEFAULT_EXCLUDE_MARKER, FolderMergeConfig, MergeConfig};

use crate::Args;

/// Final config combined from CLI arguments and user config file.
#[derive(Debug)]
pub struct Config {
    pub(crate) auto: bool,
    pub(crate) merge: MergeConfig,
}

impl Config {
    /// Create config from given command line args and user config file.
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        let user_config = FolderMergeConfig::get_user_config()?;
        Ok(Self::from_args_and_user_config(args, user_config))
    }

    fn from_args_and_user_config(args: &Args, user_config: FolderMergeConfig) -> Self {
        let marker = args
            .marker
            .clone()
            .or(user_config.marker)
            .unwrap_or_else(|| DEFAULT_EXCLUDE_MARKER.to_string());

        Self {
            auto: args.auto || user_config.auto,
            merge: MergeConfig {
                debug: args.debug || user_config.debug,
                dryrun: args.print || user_config.dryrun,
                log: args.log || user_config.log,
                marker,
                verbose: args.verbose || user_config.verbose,
            },
        }
    }
}

#[cfg(test)]
mod foldermerge_cli_config_tests {
    use super::*;

    use clap::Parser;

    fn parse(args: &[&str]) -> Args {
        Args::parse_from(std::iter::once("foldermerge").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_without_args_or_user_config() {
        let config = Config::from_args_and_user_config(&parse(&[]), FolderMergeConfig::default());
        assert!(!config.auto);
        assert!(!config.merge.debug);
        assert!(!config.merge.dryrun);
        assert!(!config.merge.log);
        assert!(!config.merge.verbose);
        assert_eq!(config.merge.marker, "-");
    }

    #[test]
    fn cli_flags_enable_options() {
        let config = Config::from_args_and_user_config(
            &parse(&["src", "dst", "-a", "-D", "-L", "-p", "-v"]),
            FolderMergeConfig::default(),
        );
        assert!(config.auto);
        assert!(config.merge.debug);
        assert!(config.merge.log);
        assert!(config.merge.dryrun);
        assert!(config.merge.verbose);
    }

    #[test]
    fn user_config_flags_are_kept() {
        let user_config = FolderMergeConfig::from_toml_str("[foldermerge]\ndryrun = true\nauto = true\n")
            .expect("should parse config");
        let config = Config::from_args_and_user_config(&parse(&[]), user_config);
        assert!(config.auto);
        assert!(config.merge.dryrun);
    }

    #[test]
    fn cli_marker_overrides_user_config_marker() {
        let user_config =
            FolderMergeConfig::from_toml_str("[foldermerge]\nmarker = \"_\"\n").expect("should parse config");
        let config = Config::from_args_and_user_config(&parse(&["--marker", "#"]), user_config);
        assert_eq!(config.merge.marker, "#");
    }

    #[test]
    fn user_config_marker_replaces_default() {
        let user_config =
            FolderMergeConfig::from_toml_str("[foldermerge]\nmarker = \"_\"\n").expect("should parse config");
        let config = Config::from_args_and_user_config(&parse(&[]), user_config);
        assert_eq!(config.merge.marker, "_");
    }
}

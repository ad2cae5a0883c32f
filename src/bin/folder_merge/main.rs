mod config;
mod merge;
mod paths;

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use crate::merge::FolderMerge;

#[derive(Parser)]
#[command(
    author,
    version,
    name = env!("CARGO_BIN_NAME"),
    about = "Merge matching folders from a source tree into a target tree"
)]
pub(crate) struct Args {
    /// Source directory containing folders to merge (defaults to last used)
    #[arg(value_hint = clap::ValueHint::DirPath)]
    source: Option<PathBuf>,

    /// Target directory containing folders to merge into (defaults to last used)
    #[arg(value_hint = clap::ValueHint::DirPath)]
    target: Option<PathBuf>,

    /// Merge without asking for confirmation
    #[arg(short, long)]
    auto: bool,

    /// Print debug information
    #[arg(short = 'D', long)]
    debug: bool,

    /// Write a log file of the run
    #[arg(short = 'L', long)]
    log: bool,

    /// Skip folders whose name starts with this marker
    #[arg(short, long, value_name = "MARKER")]
    marker: Option<String>,

    /// Only print changes without moving or deleting anything
    #[arg(short, long)]
    print: bool,

    /// Print last used source and target paths
    #[arg(short, long)]
    show_paths: bool,

    /// Generate shell completion
    #[arg(short = 'l', long, name = "SHELL")]
    completion: Option<Shell>,

    /// Print verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(ref shell) = args.completion {
        folder_merge::generate_shell_completion(*shell, Args::command(), true, env!("CARGO_BIN_NAME"))
    } else if args.show_paths {
        paths::print_last_paths();
        Ok(())
    } else {
        FolderMerge::new(args)?.run()
    }
}

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use colored::Colorize;

use folder_merge::merge::{FileLogger, Plan, Reconciler};
use folder_merge::{get_relative_path_or_filename, print_bold, print_error};

use crate::Args;
use crate::config::Config;
use crate::paths::LastPaths;

#[derive(Debug)]
pub struct FolderMerge {
    source: PathBuf,
    target: PathBuf,
    config: Config,
}

impl FolderMerge {
    pub fn new(args: Args) -> anyhow::Result<Self> {
        let config = Config::from_args(&args)?;
        let last_paths = LastPaths::load();

        let source = args
            .source
            .or_else(|| last_paths.as_ref().map(|paths| paths.source.clone()))
            .context("No source directory given and no saved path")?;
        let target = args
            .target
            .or_else(|| last_paths.as_ref().map(|paths| paths.target.clone()))
            .context("No target directory given and no saved path")?;

        let source = folder_merge::resolve_input_dir(Some(&source))?;
        let target = folder_merge::resolve_input_dir(Some(&target))?;

        let paths = LastPaths {
            source: source.clone(),
            target: target.clone(),
        };
        if last_paths.as_ref() != Some(&paths)
            && let Err(e) = paths.save()
        {
            print_error!("Failed to save paths: {e}");
        }

        if config.merge.debug {
            eprintln!("{}", config.merge);
            eprintln!("Source: {}", source.display());
            eprintln!("Target: {}", target.display());
        }

        Ok(Self { source, target, config })
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let mut reconciler = Reconciler::new(self.config.merge.clone());
        if self.config.merge.log {
            reconciler = reconciler.with_logger(FileLogger::new()?);
        }

        let plan = reconciler.plan(&self.source, &self.target)?;
        if plan.pairs.is_empty() {
            println!("No matching folders found.");
            if self.config.merge.verbose {
                println!("Source: {}", self.source.display());
                println!("Target: {}", self.target.display());
            }
            return Ok(());
        }

        Self::print_plan(&plan);

        if !self.config.merge.dryrun && !self.config.auto && !Self::confirm()? {
            println!("Skipped");
            return Ok(());
        }

        let report = reconciler.execute(plan)?;
        println!();
        report.print();

        if let Some(logger) = reconciler.logger() {
            println!("Log file: {}", logger.path().display());
        }

        Ok(())
    }

    fn print_plan(plan: &Plan) {
        print_bold!("Found {} matching folder(s):\n", plan.pairs.len());
        for pair in &plan.pairs {
            println!(
                "{}: {}\n  {} {}",
                pair.identifier.as_str().cyan().bold(),
                get_relative_path_or_filename(&pair.source, &plan.source_root),
                "→".green(),
                get_relative_path_or_filename(&pair.target, &plan.target_root)
            );
        }
        println!();
    }

    fn confirm() -> anyhow::Result<bool> {
        print!("{}", "Move folder contents and delete emptied source folders? (y/n): ".magenta());
        std::io::stdout().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        Ok(input.trim().eq_ignore_ascii_case("y"))
    }
}

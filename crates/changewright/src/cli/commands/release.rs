//! Release command

use chrono::{Local, NaiveDate};
use clap::Args;
use console::style;
use tracing::info;

use changewright_changelog::{ConflictStrategy, ReleaseOptions};
use changewright_core::workflow::release_changelog;

use crate::cli::output::{header, key_value, success, version_style, warning};
use crate::cli::{Cli, OutputFormat};

/// Promote Unreleased changes to a dated release
#[derive(Debug, Args)]
pub struct ReleaseCommand {
    /// Version label of the release
    #[arg(value_name = "VERSION")]
    pub name: String,

    /// Release date as YYYY-MM-DD (defaults to today)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Replace an existing release with the same name
    #[arg(short, long, conflicts_with = "merge")]
    pub force: bool,

    /// Merge into an existing release with the same name
    #[arg(short, long)]
    pub merge: bool,
}

impl ReleaseCommand {
    /// Execute the release command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            release = %self.name,
            force = self.force,
            merge = self.merge,
            "executing release command"
        );
        let (config, path) = cli.changelog_context()?;

        let date = self.date.unwrap_or_else(|| Local::now().date_naive());
        let options =
            ReleaseOptions::new(&self.name, date).with_conflict_strategy(self.strategy());

        let changelog = release_changelog(&path, &config, &options)?;
        let release = changelog
            .find_release(&self.name)
            .ok_or_else(|| anyhow::anyhow!("Release {} missing after promotion", self.name))?;

        if cli.quiet {
            return Ok(());
        }
        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(release)?);
            }
            OutputFormat::Text => {
                if release.is_empty() {
                    warning(&format!("Release {} has no entries", self.name));
                }
                success(&format!(
                    "Released {} ({})",
                    version_style().apply_to(&release.name),
                    release.date
                ));
                if cli.verbose {
                    println!("{}", header("Sections"));
                    for (category, entries) in release.sections() {
                        println!("{}", key_value(category.title(), &entries.len().to_string()));
                    }
                    println!(
                        "{}",
                        style(format!("Written to {}", path.display())).dim()
                    );
                }
            }
        }

        Ok(())
    }

    fn strategy(&self) -> ConflictStrategy {
        if self.force {
            ConflictStrategy::Overwrite
        } else if self.merge {
            ConflictStrategy::Merge
        } else {
            ConflictStrategy::Fail
        }
    }
}

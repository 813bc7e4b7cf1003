//! Init command

use clap::Args;
use console::style;
use dialoguer::Confirm;
use tracing::info;

use changewright_core::config::validate_config;
use changewright_core::workflow::init_changelog;

use crate::cli::output::{path_style, success};
use crate::cli::{Cli, CliError};

/// Create a new, empty changelog
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite an existing changelog
    #[arg(short, long)]
    pub force: bool,

    /// Never prompt; fail instead of overwriting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Base URL for compare links (overrides the configured one)
    #[arg(long)]
    pub url: Option<String>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, yes = self.yes, "executing init command");
        let (mut config, path) = cli.changelog_context()?;

        if let Some(url) = &self.url {
            config.changelog.repository_url = url.clone();
            validate_config(&config)?;
        }

        if path.exists() && !self.force {
            if self.yes {
                anyhow::bail!(
                    "Changelog already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }

            let overwrite = Confirm::new()
                .with_prompt(format!(
                    "Changelog already exists at {}. Overwrite?",
                    path.display()
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                println!("{}", style("Aborted.").yellow());
                return Err(CliError::Cancelled.into());
            }
        }

        init_changelog(&path, &config, true)?;

        if !cli.quiet {
            success(&format!(
                "Created changelog at {}",
                path_style().apply_to(path.display())
            ));
            println!();
            println!("Next steps:");
            println!(
                "  1. Run {} to record a change",
                style("changewright add \"Added ...\"").cyan()
            );
            println!(
                "  2. Run {} to cut your first release",
                style("changewright release <version>").cyan()
            );
        }

        Ok(())
    }
}

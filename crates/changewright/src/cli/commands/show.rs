//! Show command

use clap::Args;
use tracing::info;

use changewright_changelog::{Changelog, Release};
use changewright_core::workflow::read_changelog;

use crate::cli::output::{header, key_value, path_style, version_style};
use crate::cli::{Cli, OutputFormat};

/// Show the changelog contents
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Show the entries of a single release ("Unreleased" for pending changes)
    #[arg(value_name = "RELEASE")]
    pub release: Option<String>,
}

impl ShowCommand {
    /// Execute the show command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(release = ?self.release, "executing show command");
        let (_, path) = cli.changelog_context()?;
        let changelog = read_changelog(&path)?;

        let selected = match &self.release {
            Some(name) => Some(select_release(&changelog, name).ok_or_else(|| {
                anyhow::anyhow!("Release {} not found in {}", name, path.display())
            })?),
            None => None,
        };

        match (cli.format, selected) {
            (OutputFormat::Json, Some(release)) => {
                println!("{}", serde_json::to_string_pretty(release)?);
            }
            (OutputFormat::Json, None) => {
                println!("{}", serde_json::to_string_pretty(&changelog)?);
            }
            (OutputFormat::Text, Some(release)) => print_release(release),
            (OutputFormat::Text, None) => {
                println!(
                    "{}",
                    header(&format!("Changelog {}", path_style().apply_to(path.display())))
                );
                println!("{}", key_value("Compare URL", &changelog.url));
                println!("{}", key_value("Latest release", changelog.latest_release_name()));
                println!(
                    "{}",
                    key_value("Unreleased changes", &changelog.unreleased.entry_count().to_string())
                );
                println!("{}", key_value("Releases", &changelog.releases.len().to_string()));

                if !changelog.releases.is_empty() {
                    println!();
                    for release in &changelog.releases {
                        println!(
                            "  {} {} ({} entries)",
                            version_style().apply_to(&release.name),
                            release.date,
                            release.entry_count()
                        );
                    }
                }
            }
        }

        Ok(())
    }
}

fn select_release<'a>(changelog: &'a Changelog, name: &str) -> Option<&'a Release> {
    if name.eq_ignore_ascii_case(&changelog.unreleased.name) {
        Some(&changelog.unreleased)
    } else {
        changelog.find_release(name)
    }
}

fn print_release(release: &Release) {
    if release.date.is_empty() {
        println!("{}", header(&release.name));
    } else {
        println!("{} - {}", header(&release.name), release.date);
    }
    for (category, entries) in release.sections() {
        println!();
        println!("{}", header(category.title()));
        for entry in entries {
            println!("  - {}", entry.description);
        }
    }
}

//! Add command

use clap::Args;
use tracing::{debug, info};

use changewright_changelog::Category;
use changewright_core::workflow::add_change;

use crate::cli::output::success;
use crate::cli::{Cli, CliError, OutputFormat};

/// Record a change under Unreleased
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Category of the change (inferred from the first word when omitted)
    #[arg(short, long, value_parser = parse_category)]
    pub category: Option<Category>,

    /// Change description
    #[arg(required = true, trailing_var_arg = true)]
    pub message: Vec<String>,
}

impl AddCommand {
    /// Execute the add command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let message = self.message.join(" ");
        let category = self.resolve_category(&message)?;
        info!(%category, "executing add command");

        let (_, path) = cli.changelog_context()?;
        let changelog = add_change(&path, category, &message)?;
        debug!(
            unreleased_entries = changelog.unreleased.entry_count(),
            "unreleased section updated"
        );

        if cli.quiet {
            return Ok(());
        }
        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "category": category,
                    "description": message.trim(),
                    "unreleased": changelog.unreleased,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                success(&format!("Added to {}: {}", category, message.trim()));
            }
        }

        Ok(())
    }

    fn resolve_category(&self, message: &str) -> Result<Category, CliError> {
        match self.category {
            Some(category) => Ok(category),
            None => Category::from_message(message)
                .ok_or_else(|| CliError::UnknownCategory(message.to_string())),
        }
    }
}

fn parse_category(value: &str) -> Result<Category, String> {
    value.parse().map_err(|_| {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.title()).collect();
        format!("unknown category '{}', expected one of: {}", value, names.join(", "))
    })
}

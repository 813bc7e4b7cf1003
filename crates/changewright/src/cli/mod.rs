//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

use changewright_core::config::{load_config_or_default, Config};
use changewright_core::workflow::changelog_path;

use commands::{
    AddCommand, CompletionsCommand, FmtCommand, InitCommand, ReleaseCommand, ShowCommand,
};

/// Changewright - Keep a Changelog maintenance CLI
#[derive(Debug, Parser)]
#[command(name = "changewright")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Changelog file (defaults to the configured file)
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new, empty changelog
    Init(InitCommand),

    /// Record a change under Unreleased
    Add(AddCommand),

    /// Promote Unreleased changes to a dated release
    Release(ReleaseCommand),

    /// Show the changelog contents
    Show(ShowCommand),

    /// Rewrite the changelog in canonical form
    Fmt(FmtCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Failures raised by the CLI itself
#[derive(Debug, Error)]
pub enum CliError {
    /// User declined a prompt
    #[error("Operation cancelled by user")]
    Cancelled,

    /// `fmt --check` found drift
    #[error("{} is not in canonical form (run `changewright fmt` to fix)", .0.display())]
    NotFormatted(PathBuf),

    /// No category given and none could be inferred
    #[error("Could not infer a category from '{0}', pass --category")]
    UnknownCategory(String),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Add(ref cmd) => cmd.execute(&self),
            Commands::Release(ref cmd) => cmd.execute(&self),
            Commands::Show(ref cmd) => cmd.execute(&self),
            Commands::Fmt(ref cmd) => cmd.execute(&self),
            Commands::Completions(ref cmd) => cmd.execute(&self),
        }
    }

    /// Directory that config discovery and relative paths start from
    pub fn working_dir(&self) -> anyhow::Result<PathBuf> {
        let cwd = std::env::current_dir()?;
        Ok(match &self.directory {
            Some(dir) => cwd.join(dir),
            None => cwd,
        })
    }

    /// Load the configuration and resolve the changelog path
    pub fn changelog_context(&self) -> anyhow::Result<(Config, PathBuf)> {
        let dir = self.working_dir()?;
        let (config, _) = load_config_or_default(&dir)?;
        let path = changelog_path(&config, &dir, self.file.as_deref());
        Ok((config, path))
    }
}

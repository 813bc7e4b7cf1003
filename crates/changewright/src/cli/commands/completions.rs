//! Shell completions generation command

use std::io;

use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use tracing::info;

use crate::cli::Cli;

const BIN_NAME: &str = "changewright";

/// Generate shell completions
#[derive(Debug, Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<std::path::PathBuf>,
}

impl CompletionsCommand {
    /// Execute the completions command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(shell = ?self.shell, "executing completions command");
        let mut cmd = Cli::command();
        let shell = self.shell;

        match &self.output {
            Some(output_path) => {
                let output_path = cli.working_dir()?.join(output_path);
                let mut file = std::fs::File::create(&output_path)?;
                generate(shell, &mut cmd, BIN_NAME, &mut file);

                if !cli.quiet {
                    println!("Completions written to {}", output_path.display());
                }
            }
            None => generate(shell, &mut cmd, BIN_NAME, &mut io::stdout()),
        }

        Ok(())
    }
}

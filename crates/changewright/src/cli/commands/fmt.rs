//! Fmt command - Rewrite the changelog in canonical form

use clap::Args;
use console::style;
use tracing::info;

use changewright_core::workflow::format_changelog;

use crate::cli::output::path_style;
use crate::cli::{Cli, CliError, OutputFormat};

/// Rewrite the changelog in canonical form
#[derive(Debug, Args)]
pub struct FmtCommand {
    /// Verify formatting without applying changes (for CI / hooks)
    #[arg(long)]
    pub check: bool,
}

impl FmtCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(check = self.check, "executing fmt command");
        let (_, path) = cli.changelog_context()?;

        let report = format_changelog(&path, !self.check)?;

        if !cli.quiet {
            match cli.format {
                OutputFormat::Json => {
                    let output = serde_json::json!({
                        "path": report.path.to_string_lossy(),
                        "changed": report.changed,
                        "written": report.changed && !self.check,
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Text => {
                    let path = path_style().apply_to(report.path.display());
                    if !report.changed {
                        println!("{} {} is already formatted", style("✓").green().bold(), path);
                    } else if !self.check {
                        println!("{} Formatted {}", style("✓").green().bold(), path);
                    }
                }
            }
        }

        if self.check && report.changed {
            return Err(CliError::NotFormatted(report.path).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::tests::run;
    use tempfile::TempDir;

    #[test]
    fn test_fmt_command_defaults() {
        let cmd = FmtCommand { check: false };
        assert!(!cmd.check);
    }

    #[test]
    fn test_fmt_malformed_changelog() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("CHANGELOG.md"), "# Changelog\nNo empty line.\n").unwrap();

        let err = run(&temp, &["fmt"]).unwrap_err();
        assert_eq!(
            crate::exit_codes::from_error(&err),
            crate::exit_codes::PARSE_ERROR
        );
    }

    #[test]
    fn test_fmt_respects_file_flag() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("HISTORY.md");
        std::fs::write(&path, "# Changelog\n\nNotes.\n\n## [Unreleased]\n").unwrap();

        run(&temp, &["--file", "HISTORY.md", "fmt"]).unwrap();

        assert!(std::fs::read_to_string(&path)
            .unwrap()
            .ends_with("[Unreleased]: http://github.com/HEAD...HEAD\n"));
        assert!(!temp.path().join("CHANGELOG.md").exists());
    }
}

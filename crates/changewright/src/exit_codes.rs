//! Exit codes for the CLI

use changewright_changelog::ChangelogError;
use changewright_core::{ConfigError, CoreError};

use crate::cli::CliError;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Changelog does not follow the expected structure
pub const PARSE_ERROR: i32 = 3;

/// Release conflict or rejected change
pub const MUTATION_ERROR: i32 = 4;

/// Changelog is not in canonical form
pub const FORMAT_CHECK_FAILED: i32 = 5;

/// User cancelled
pub const CANCELLED: i32 = 130;

/// Map an error to the process exit code from the first recognised cause
pub fn from_error(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<CliError>() {
            return match e {
                CliError::Cancelled => CANCELLED,
                CliError::NotFormatted(_) => FORMAT_CHECK_FAILED,
                CliError::UnknownCategory(_) => MUTATION_ERROR,
            };
        }
        if let Some(e) = cause.downcast_ref::<CoreError>() {
            return match e {
                CoreError::Config(_) => CONFIG_ERROR,
                CoreError::Changelog(e) => changelog_code(e),
                CoreError::InvalidVersion { .. } => MUTATION_ERROR,
                CoreError::Io(_) | CoreError::NotFound(_) | CoreError::Other(_) => ERROR,
            };
        }
        if let Some(e) = cause.downcast_ref::<ChangelogError>() {
            return changelog_code(e);
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return CONFIG_ERROR;
        }
    }
    ERROR
}

fn changelog_code(err: &ChangelogError) -> i32 {
    match err {
        ChangelogError::Lex(_) => ERROR,
        ChangelogError::Parse(_) => PARSE_ERROR,
        ChangelogError::ReleaseExists(_)
        | ChangelogError::InvalidReleaseName { .. }
        | ChangelogError::InvalidEntry(_) => MUTATION_ERROR,
    }
}

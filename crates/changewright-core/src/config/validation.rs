//! Configuration validation

use changewright_changelog::lexer::{classify_line, TokenKind};
use tracing::debug;
use url::Url;

use crate::error::{ConfigError, CoreError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_changelog(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    if config.changelog.file.as_os_str().is_empty() {
        return Err(ConfigError::invalid("changelog.file", "file cannot be empty").into());
    }

    let repository_url = &config.changelog.repository_url;
    if let Err(e) = Url::parse(repository_url) {
        return Err(ConfigError::invalid(
            "changelog.repository_url",
            format!("must be an absolute URL ({e})"),
        )
        .into());
    }
    if !repository_url.ends_with('/') {
        return Err(ConfigError::invalid(
            "changelog.repository_url",
            "must end with '/' so release names can be appended",
        )
        .into());
    }

    validate_description(&config.changelog.description)
}

/// Every description line must read back as plain text or a blank line
fn validate_description(description: &str) -> Result<()> {
    for (number, line) in description.lines().enumerate() {
        let kind = classify_line(line).kind();
        if !matches!(kind, TokenKind::Text | TokenKind::Empty) {
            return Err(ConfigError::invalid(
                "changelog.description",
                format!("line {} would be read back as a {kind}", number + 1),
            )
            .into());
        }
    }
    Ok(())
}

/// Check a release name against the configured version policy
pub fn validate_release_version(config: &Config, name: &str) -> Result<()> {
    if !config.release.require_semver {
        return Ok(());
    }

    let version = name.strip_prefix('v').unwrap_or(name);
    semver::Version::parse(version).map_err(|e| CoreError::InvalidVersion {
        version: name.to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}

//! Configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults::{DEFAULT_CHANGELOG_FILE, DEFAULT_DESCRIPTION, DEFAULT_REPOSITORY_URL};

/// Main configuration for Changewright
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Changelog file configuration
    pub changelog: ChangelogConfig,

    /// Release configuration
    pub release: ReleaseConfig,
}

/// Changelog file configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Changelog file path, relative to the working directory
    pub file: PathBuf,

    /// Base URL that compare links are built from
    pub repository_url: String,

    /// Description written by `init`
    pub description: String,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_CHANGELOG_FILE),
            repository_url: DEFAULT_REPOSITORY_URL.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

/// Release configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Reject release names that are not semantic versions
    pub require_semver: bool,
}

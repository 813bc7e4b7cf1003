//! Default configuration values

use changewright_changelog::types::DEFAULT_URL;

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "changewright.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "changewright.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".changewright.yaml";

/// Default changelog file
pub const DEFAULT_CHANGELOG_FILE: &str = "CHANGELOG.md";

/// Default base URL for compare links
pub const DEFAULT_REPOSITORY_URL: &str = DEFAULT_URL;

/// Default changelog description
pub const DEFAULT_DESCRIPTION: &str =
    "All notable changes to this project will be documented in this file.";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".changewright.toml",
    ]
}

//! Changelog workflow operations

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use changewright_changelog::{
    lex_lines, parse, render, Category, Changelog, ChangelogError, ReleaseOptions,
};
use tracing::{debug, info, instrument};

use crate::config::{validate_release_version, Config};
use crate::error::{CoreError, Result};

/// Resolve the changelog path from an explicit override or the config,
/// relative to the working directory.
pub fn changelog_path(config: &Config, dir: &Path, file: Option<&Path>) -> PathBuf {
    let file = file.unwrap_or(&config.changelog.file);
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        dir.join(file)
    }
}

/// Read and parse an existing changelog
#[instrument(skip(path), fields(path = %path.display()))]
pub fn read_changelog(path: &Path) -> Result<Changelog> {
    if !path.is_file() {
        return Err(CoreError::NotFound(path.to_path_buf()));
    }
    debug!("reading existing changelog");

    let reader = BufReader::new(File::open(path)?);
    let tokens = lex_lines(reader.lines()).map_err(ChangelogError::from)?;
    let changelog = parse(&tokens).map_err(ChangelogError::from)?;

    debug!(
        releases = changelog.releases.len(),
        unreleased_entries = changelog.unreleased.entry_count(),
        "changelog parsed"
    );
    Ok(changelog)
}

/// Render a changelog and write it to file
pub fn write_changelog(path: &Path, changelog: &Changelog) -> Result<()> {
    let content = render(changelog);
    info!(path = %path.display(), bytes = content.len(), "writing changelog");
    std::fs::write(path, content)?;
    Ok(())
}

/// Build the empty changelog written by `init`
pub fn new_changelog(config: &Config) -> Changelog {
    Changelog::new(
        config.changelog.repository_url.as_str(),
        config.changelog.description.as_str(),
    )
}

/// Write a fresh changelog, refusing to replace an existing file unless
/// `overwrite` is set
pub fn init_changelog(path: &Path, config: &Config, overwrite: bool) -> Result<Changelog> {
    if path.exists() && !overwrite {
        return Err(CoreError::other(format!(
            "{} already exists",
            path.display()
        )));
    }

    let changelog = new_changelog(config);
    write_changelog(path, &changelog)?;
    info!(path = %path.display(), "changelog initialized");
    Ok(changelog)
}

/// Append an entry to the Unreleased section of the changelog on disk
pub fn add_change(path: &Path, category: Category, description: &str) -> Result<Changelog> {
    let mut changelog = read_changelog(path)?;
    changelog.add_entry(category, description)?;
    write_changelog(path, &changelog)?;
    info!(%category, "change recorded");
    Ok(changelog)
}

/// Promote Unreleased to a release in the changelog on disk
pub fn release_changelog(
    path: &Path,
    config: &Config,
    options: &ReleaseOptions,
) -> Result<Changelog> {
    validate_release_version(config, &options.name)?;

    let mut changelog = read_changelog(path)?;
    changelog.release(options)?;
    write_changelog(path, &changelog)?;
    Ok(changelog)
}

/// Result of comparing a changelog file against its canonical rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatReport {
    /// Changelog path
    pub path: PathBuf,
    /// Whether the file differs from the canonical form
    pub changed: bool,
    /// Canonical rendering
    pub canonical: String,
}

/// Compare a changelog file with its canonical rendering, rewriting it when
/// `write` is set
pub fn format_changelog(path: &Path, write: bool) -> Result<FormatReport> {
    let changelog = read_changelog(path)?;
    let current = std::fs::read_to_string(path)?;
    let canonical = render(&changelog);
    let changed = current != canonical;

    if changed && write {
        info!(path = %path.display(), "rewriting changelog in canonical form");
        std::fs::write(path, &canonical)?;
    } else {
        debug!(path = %path.display(), changed, "format check complete");
    }

    Ok(FormatReport {
        path: path.to_path_buf(),
        changed,
        canonical,
    })
}

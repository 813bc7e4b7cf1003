//! Changelog mutations
//!
//! The two edits the CLI performs on a parsed changelog: recording a change
//! under Unreleased, and promoting Unreleased to a dated release.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{ChangelogError, Result};
use crate::types::{Category, Changelog, Entry, Release, HEAD, UNRELEASED};

/// What to do when the release being cut already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictStrategy {
    /// Refuse to cut the release
    #[default]
    Fail,
    /// Replace the existing release with the promoted Unreleased section
    Overwrite,
    /// Append the Unreleased entries to the existing release; only the
    /// newest release takes the new date
    Merge,
}

/// Options for promoting Unreleased to a release
#[derive(Debug, Clone)]
pub struct ReleaseOptions {
    /// Version label of the new release
    pub name: String,
    /// Release date
    pub date: NaiveDate,
    /// Behaviour when a release with the same name exists
    pub on_conflict: ConflictStrategy,
}

impl ReleaseOptions {
    /// Create new options for a release
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date,
            on_conflict: ConflictStrategy::Fail,
        }
    }

    /// Set the conflict strategy
    pub fn with_conflict_strategy(mut self, strategy: ConflictStrategy) -> Self {
        self.on_conflict = strategy;
        self
    }
}

impl Changelog {
    /// Append an entry to a category of the Unreleased section
    pub fn add_entry(&mut self, category: Category, description: &str) -> Result<()> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ChangelogError::InvalidEntry(
                "description cannot be empty".to_string(),
            ));
        }
        if description.contains(['\n', '\r']) {
            return Err(ChangelogError::InvalidEntry(
                "description must fit on a single line".to_string(),
            ));
        }

        debug!(%category, description, "adding unreleased entry");
        self.unreleased
            .entries_mut(category)
            .push(Entry::new(description));
        Ok(())
    }

    /// Promote the Unreleased section to a dated release.
    ///
    /// The new release becomes the newest one, Unreleased is left empty and
    /// the predecessor links are rebuilt. Returns the index of the release
    /// that received the entries.
    #[instrument(skip(self, options), fields(name = %options.name, date = %options.date))]
    pub fn release(&mut self, options: &ReleaseOptions) -> Result<usize> {
        validate_release_name(&options.name)?;

        let date = options.date.format("%Y-%m-%d").to_string();
        let unreleased = std::mem::replace(&mut self.unreleased, Release::unreleased());
        let existing = self.releases.iter().position(|r| r.name == options.name);

        let index = match (existing, options.on_conflict) {
            (Some(_), ConflictStrategy::Fail) => {
                self.unreleased = unreleased;
                return Err(ChangelogError::ReleaseExists(options.name.clone()));
            }
            (Some(index), ConflictStrategy::Merge) => {
                let target = &mut self.releases[index];
                for category in Category::ALL {
                    target
                        .entries_mut(category)
                        .extend(unreleased.entries(category).iter().cloned());
                }
                if index == 0 {
                    target.date = date;
                } else {
                    debug!(
                        release = %options.name,
                        kept_date = %target.date,
                        "merged into an older release, keeping its date"
                    );
                }
                index
            }
            (Some(index), ConflictStrategy::Overwrite) => {
                self.releases.remove(index);
                self.releases.insert(0, promote(unreleased, &options.name, date));
                0
            }
            (None, _) => {
                self.releases.insert(0, promote(unreleased, &options.name, date));
                0
            }
        };

        self.link_releases();

        info!(
            release = %options.name,
            strategy = ?options.on_conflict,
            releases = self.releases.len(),
            "unreleased changes promoted"
        );
        Ok(index)
    }
}

fn promote(unreleased: Release, name: &str, date: String) -> Release {
    Release {
        name: name.to_string(),
        date,
        previous_release: None,
        ..unreleased
    }
}

fn validate_release_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ChangelogError::invalid_release_name(name, "name cannot be empty"));
    }
    if name.chars().any(|c| c.is_whitespace() || c == '[' || c == ']') {
        return Err(ChangelogError::invalid_release_name(
            name,
            "name cannot contain whitespace or brackets",
        ));
    }
    if name == UNRELEASED || name == HEAD {
        return Err(ChangelogError::invalid_release_name(name, "name is reserved"));
    }
    Ok(())
}

//! Changelog types

use serde::{Deserialize, Serialize};

/// Compare-link base used when a document does not name its repository
pub const DEFAULT_URL: &str = "http://github.com/";

/// Name given to the Unreleased section
pub const UNRELEASED: &str = "Unreleased";

/// Placeholder target used for compare links when nothing has been released
pub const HEAD: &str = "HEAD";

/// Change category of a release section.
///
/// The declaration order is the canonical rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// New features
    Added,
    /// Changes in existing functionality
    Changed,
    /// Soon-to-be removed features
    Deprecated,
    /// Removed features
    Removed,
    /// Bug fixes
    Fixed,
    /// Vulnerability fixes
    Security,
}

impl Category {
    /// All categories in canonical order
    pub const ALL: [Category; 6] = [
        Self::Added,
        Self::Changed,
        Self::Deprecated,
        Self::Removed,
        Self::Fixed,
        Self::Security,
    ];

    /// Section title as written after `### `
    pub fn title(&self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Changed => "Changed",
            Self::Deprecated => "Deprecated",
            Self::Removed => "Removed",
            Self::Fixed => "Fixed",
            Self::Security => "Security",
        }
    }

    /// Look up a category by its exact section title
    pub fn from_title(title: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.title() == title)
    }

    /// Infer the category from the first word of a change message,
    /// e.g. `"Fixed crash on empty input"` is a [`Category::Fixed`] change.
    pub fn from_message(message: &str) -> Option<Self> {
        let first = message.split_whitespace().next()?;
        Self::ALL
            .into_iter()
            .find(|c| first.eq_ignore_ascii_case(c.title()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

impl std::str::FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.title().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// A single change line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Change description, one logical line
    pub description: String,
}

impl Entry {
    /// Create a new entry
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A release, or the Unreleased section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Version label, or `Unreleased`
    pub name: String,
    /// Release date as `YYYY-MM-DD`, empty for Unreleased
    pub date: String,
    /// Index of the chronologically preceding release in [`Changelog::releases`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_release: Option<usize>,
    /// New features
    #[serde(default)]
    pub added: Vec<Entry>,
    /// Changes in existing functionality
    #[serde(default)]
    pub changed: Vec<Entry>,
    /// Soon-to-be removed features
    #[serde(default)]
    pub deprecated: Vec<Entry>,
    /// Removed features
    #[serde(default)]
    pub removed: Vec<Entry>,
    /// Bug fixes
    #[serde(default)]
    pub fixed: Vec<Entry>,
    /// Vulnerability fixes
    #[serde(default)]
    pub security: Vec<Entry>,
}

impl Release {
    /// Create a new release without entries
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            ..Default::default()
        }
    }

    /// Create an empty Unreleased section
    pub fn unreleased() -> Self {
        Self::new(UNRELEASED, "")
    }

    /// Entries of a category
    pub fn entries(&self, category: Category) -> &[Entry] {
        match category {
            Category::Added => &self.added,
            Category::Changed => &self.changed,
            Category::Deprecated => &self.deprecated,
            Category::Removed => &self.removed,
            Category::Fixed => &self.fixed,
            Category::Security => &self.security,
        }
    }

    /// Mutable entries of a category
    pub fn entries_mut(&mut self, category: Category) -> &mut Vec<Entry> {
        match category {
            Category::Added => &mut self.added,
            Category::Changed => &mut self.changed,
            Category::Deprecated => &mut self.deprecated,
            Category::Removed => &mut self.removed,
            Category::Fixed => &mut self.fixed,
            Category::Security => &mut self.security,
        }
    }

    /// Categories holding at least one entry, in canonical order
    pub fn sections(&self) -> impl Iterator<Item = (Category, &[Entry])> {
        Category::ALL
            .into_iter()
            .map(move |c| (c, self.entries(c)))
            .filter(|(_, entries)| !entries.is_empty())
    }

    /// Total number of entries across all categories
    pub fn entry_count(&self) -> usize {
        Category::ALL.iter().map(|c| self.entries(*c).len()).sum()
    }

    /// Check if the release has no entries
    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }
}

/// A parsed changelog document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changelog {
    /// Base URL that compare-link targets are appended to
    pub url: String,
    /// Free text between the title and the Unreleased section
    pub description: String,
    /// Changes not yet assigned to a release
    pub unreleased: Release,
    /// Dated releases, newest first
    pub releases: Vec<Release>,
}

impl Default for Changelog {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            description: String::new(),
            unreleased: Release::unreleased(),
            releases: Vec::new(),
        }
    }
}

impl Changelog {
    /// Create an empty changelog
    pub fn new(url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    /// Newest dated release, if any
    pub fn latest_release(&self) -> Option<&Release> {
        self.releases.first()
    }

    /// Name of the newest release, or `HEAD` when nothing has been released
    pub fn latest_release_name(&self) -> &str {
        self.latest_release().map_or(HEAD, |r| r.name.as_str())
    }

    /// Release that precedes `releases[index]`
    pub fn previous_release(&self, index: usize) -> Option<&Release> {
        let previous = self.releases.get(index)?.previous_release?;
        self.releases.get(previous)
    }

    /// Find a release by name
    pub fn find_release(&self, name: &str) -> Option<&Release> {
        self.releases.iter().find(|r| r.name == name)
    }

    /// Point every release at the one following it in the list; the oldest
    /// release has no predecessor.
    pub fn link_releases(&mut self) {
        let count = self.releases.len();
        for (index, release) in self.releases.iter_mut().enumerate() {
            release.previous_release = (index + 1 < count).then_some(index + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_titles_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_title(category.title()), Some(category));
        }
        assert_eq!(Category::from_title("added"), None);
        assert_eq!(Category::from_title("Notes"), None);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("fixed".parse::<Category>(), Ok(Category::Fixed));
        assert_eq!("SECURITY".parse::<Category>(), Ok(Category::Security));
        assert!("bugfix".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_from_message() {
        assert_eq!(
            Category::from_message("Added some new stuff"),
            Some(Category::Added)
        );
        assert_eq!(
            Category::from_message("deprecated the v1 endpoint"),
            Some(Category::Deprecated)
        );
        assert_eq!(Category::from_message("Refactored internals"), None);
        assert_eq!(Category::from_message(""), None);
    }

    #[test]
    fn test_sections_skip_empty_categories() {
        let mut release = Release::unreleased();
        release.fixed.push(Entry::new("A crash."));
        release.added.push(Entry::new("A feature."));

        let categories: Vec<Category> = release.sections().map(|(c, _)| c).collect();
        assert_eq!(categories, vec![Category::Added, Category::Fixed]);
        assert_eq!(release.entry_count(), 2);
    }

    #[test]
    fn test_latest_release_placeholder() {
        let changelog = Changelog::default();
        assert!(changelog.latest_release().is_none());
        assert_eq!(changelog.latest_release_name(), "HEAD");
    }

    #[test]
    fn test_link_releases() {
        let mut changelog = Changelog::default();
        changelog.releases = vec![
            Release::new("v1.0.0", "2020-03-01"),
            Release::new("v0.8.0", "2020-02-01"),
            Release::new("v0.7.0", "2020-01-01"),
        ];

        changelog.link_releases();

        assert_eq!(changelog.releases[0].previous_release, Some(1));
        assert_eq!(changelog.releases[1].previous_release, Some(2));
        assert_eq!(changelog.releases[2].previous_release, None);
        assert_eq!(changelog.previous_release(0).unwrap().name, "v0.8.0");
        assert!(changelog.previous_release(2).is_none());
        assert_eq!(changelog.latest_release_name(), "v1.0.0");
    }
}

//! Markdown changelog formatter

use tracing::{debug, instrument};

use super::ChangelogFormatter;
use crate::types::{Changelog, Release, HEAD, UNRELEASED};

/// Title line written at the top of every rendered changelog
const TITLE: &str = "Changelog";

/// Canonical Keep a Changelog markdown renderer.
///
/// Rendering is deterministic: the same model always produces the same
/// text, and the compare links at the end are regenerated from the release
/// order rather than carried over from the source.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self
    }

    fn format_sections(&self, output: &mut String, release: &Release) {
        for (category, entries) in release.sections() {
            output.push_str(&format!("\n\n### {}\n", category.title()));
            for entry in entries {
                output.push_str(&format!("\n- {}", entry.description));
            }
        }
    }

    fn format_compare_links(&self, output: &mut String, changelog: &Changelog) {
        output.push_str(&format!(
            "\n\n[{}]: {}{}...{}",
            UNRELEASED,
            changelog.url,
            changelog.latest_release_name(),
            HEAD
        ));

        for (index, release) in changelog.releases.iter().enumerate() {
            if let Some(previous) = changelog.previous_release(index) {
                output.push_str(&format!(
                    "\n[{}]: {}{}...{}",
                    release.name, changelog.url, previous.name, release.name
                ));
            }
        }
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    #[instrument(skip(self, changelog), fields(release_count = changelog.releases.len()))]
    fn format(&self, changelog: &Changelog) -> String {
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", TITLE));
        output.push_str(&changelog.description);

        output.push_str(&format!("\n\n## [{}]", UNRELEASED));
        self.format_sections(&mut output, &changelog.unreleased);

        for release in &changelog.releases {
            output.push_str(&format!("\n\n## [{}] - {}", release.name, release.date));
            self.format_sections(&mut output, release);
        }

        self.format_compare_links(&mut output, changelog);
        output.push('\n');

        debug!(output_len = output.len(), "markdown changelog formatted");
        output
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}

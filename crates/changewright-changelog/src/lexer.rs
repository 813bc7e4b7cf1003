//! Line lexer
//!
//! Every line of a changelog maps to exactly one [`Token`]. Classification
//! is first-match-wins over these rules:
//!
//! 1. `# ...`                  header
//! 2. empty line               empty
//! 3. `## [...]`               release title without a date (Unreleased)
//! 4. `## [name] - date`       release title
//! 5. `### ...`                section title
//! 6. `- ...`                  change entry
//! 7. `[title]: url...`        compare link
//! 8. anything else            text
//!
//! Malformed release titles and compare links produce tokens with empty
//! fields; lexing itself never fails on content.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::LexError;

/// Regex for compare-link lines: `[title]: scheme://host/path/from...to`
static COMPARE_LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\[(?P<title>.*)\]: (?P<url>[A-Za-z][A-Za-z0-9+.\-]*://.*/)(?P<from>.*)\.\.\.(?P<to>.*)$",
    )
    .expect("Invalid regex")
});

/// A reference link to the diff between two release targets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareLink {
    /// Link title, e.g. `1.0.0` or `Unreleased`
    pub title: String,
    /// URL prefix including the trailing slash
    pub url: String,
    /// Older target
    pub from_target: String,
    /// Newer target
    pub to_target: String,
}

/// A classified changelog line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    /// `# Changelog`
    Header(String),
    /// Blank line
    Empty,
    /// `## [1.0.0] - 2020-01-01` or `## [Unreleased]`
    ReleaseTitle { name: String, date: String },
    /// `### Added`
    SectionTitle(String),
    /// `- Some change.`
    ChangeEntry(String),
    /// `[1.0.0]: https://example.com/compare/v0.9.0...v1.0.0`
    CompareLink(CompareLink),
    /// Any other line
    Text(String),
}

/// Token discriminant, used by the parser to describe expectations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Header,
    Empty,
    ReleaseTitle,
    SectionTitle,
    ChangeEntry,
    CompareLink,
    Text,
}

impl Token {
    /// Kind of this token
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Header(_) => TokenKind::Header,
            Self::Empty => TokenKind::Empty,
            Self::ReleaseTitle { .. } => TokenKind::ReleaseTitle,
            Self::SectionTitle(_) => TokenKind::SectionTitle,
            Self::ChangeEntry(_) => TokenKind::ChangeEntry,
            Self::CompareLink(_) => TokenKind::CompareLink,
            Self::Text(_) => TokenKind::Text,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Header => "header",
            Self::Empty => "empty line",
            Self::ReleaseTitle => "release title",
            Self::SectionTitle => "section title",
            Self::ChangeEntry => "change entry",
            Self::CompareLink => "compare link",
            Self::Text => "text",
        };
        f.write_str(name)
    }
}

/// Lex a whole document held in memory
pub fn lex(input: &str) -> Vec<Token> {
    let tokens: Vec<Token> = input.lines().map(classify_line).collect();
    debug!(token_count = tokens.len(), "changelog lexed");
    tokens
}

/// Lex lines from a fallible line source such as [`std::io::BufRead::lines`].
///
/// Stops at the first read error and returns it together with the tokens
/// produced so far.
#[instrument(skip(lines))]
pub fn lex_lines<I, S>(lines: I) -> Result<Vec<Token>, LexError>
where
    I: IntoIterator<Item = std::io::Result<S>>,
    S: AsRef<str>,
{
    let mut tokens = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        match line {
            Ok(line) => tokens.push(classify_line(line.as_ref())),
            Err(source) => {
                return Err(LexError {
                    tokens,
                    line: index + 1,
                    source,
                })
            }
        }
    }

    debug!(token_count = tokens.len(), "changelog lexed");
    Ok(tokens)
}

/// Classify a single line
pub fn classify_line(line: &str) -> Token {
    let line = line.strip_suffix('\r').unwrap_or(line);

    if let Some(content) = line.strip_prefix("# ") {
        Token::Header(content.to_string())
    } else if line.is_empty() {
        Token::Empty
    } else if is_unreleased_title(line) {
        Token::ReleaseTitle {
            name: line["## [".len()..line.len() - 1].to_string(),
            date: String::new(),
        }
    } else if line.starts_with("## [") {
        lex_release_title(line)
    } else if let Some(content) = line.strip_prefix("### ") {
        Token::SectionTitle(content.to_string())
    } else if let Some(content) = line.strip_prefix("- ") {
        Token::ChangeEntry(content.to_string())
    } else if line.starts_with('[') {
        Token::CompareLink(lex_compare_link(line))
    } else {
        Token::Text(line.to_string())
    }
}

fn is_unreleased_title(line: &str) -> bool {
    line.starts_with("## [") && line.ends_with(']') && !line.contains("] - ")
}

fn lex_release_title(line: &str) -> Token {
    let mut fields = line["## ".len()..].split_whitespace();

    let name = fields
        .next()
        .and_then(|f| f.strip_prefix('['))
        .and_then(|f| f.strip_suffix(']'))
        .unwrap_or_default();
    let date = match (fields.next(), fields.next()) {
        (Some("-"), Some(date)) => date,
        _ => "",
    };

    Token::ReleaseTitle {
        name: name.to_string(),
        date: date.to_string(),
    }
}

fn lex_compare_link(line: &str) -> CompareLink {
    let Some(caps) = COMPARE_LINK_REGEX.captures(line) else {
        return CompareLink::default();
    };
    let field = |name: &str| {
        caps.name(name)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    };

    CompareLink {
        title: field("title"),
        url: field("url"),
        from_target: field("from"),
        to_target: field("to"),
    }
}

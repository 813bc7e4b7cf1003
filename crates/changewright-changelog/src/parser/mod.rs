//! Changelog parsing
//!
//! Recursive-descent parser over the token sequence produced by the lexer:
//!
//! ```text
//! document    := header description unreleased releases trailer
//! header      := HEADER EMPTY
//! description := (TEXT | EMPTY)*
//! unreleased  := RELEASE_TITLE [EMPTY] sections
//! releases    := (RELEASE_TITLE EMPTY sections)*
//! sections    := (SECTION_TITLE EMPTY entries [EMPTY])*
//! entries     := CHANGE_ENTRY*
//! ```
//!
//! The first token that does not fit fails the whole parse. The trailer
//! (compare links) is outside the grammar; only the `[Unreleased]` link is
//! read back, to recover the repository URL.

mod cursor;

pub use cursor::TokenCursor;

use tracing::{debug, instrument, warn};

use crate::error::ParseError;
use crate::lexer::{CompareLink, Token, TokenKind};
use crate::types::{Category, Changelog, Entry, Release, UNRELEASED};

/// Parse a token sequence as returned by [`crate::lex`]
#[instrument(skip(tokens), fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<Changelog, ParseError> {
    let mut cursor = TokenCursor::new(tokens);
    let mut changelog = Changelog::default();

    parse_header(&mut cursor)?;
    changelog.description = parse_description(&mut cursor);
    changelog.unreleased = parse_unreleased(&mut cursor)?;
    changelog.releases = parse_releases(&mut cursor)?;
    if let Some(link) = read_trailer(&mut cursor) {
        changelog.url = unreleased_link_base(link, changelog.latest_release_name());
    }

    changelog.link_releases();

    debug!(
        releases = changelog.releases.len(),
        unreleased_entries = changelog.unreleased.entry_count(),
        "changelog parsed"
    );
    Ok(changelog)
}

fn parse_header(cursor: &mut TokenCursor<'_>) -> Result<(), ParseError> {
    cursor.expect(TokenKind::Header)?;
    cursor.expect(TokenKind::Empty)?;
    Ok(())
}

fn parse_description(cursor: &mut TokenCursor<'_>) -> String {
    let mut lines = Vec::new();

    loop {
        match cursor.peek() {
            Some(Token::Text(line)) => lines.push(line.as_str()),
            Some(Token::Empty) => lines.push(""),
            _ => break,
        }
        cursor.advance();
    }

    lines.join("\n").trim_end_matches('\n').to_string()
}

fn parse_unreleased(cursor: &mut TokenCursor<'_>) -> Result<Release, ParseError> {
    cursor.expect(TokenKind::ReleaseTitle)?;
    cursor.accept(TokenKind::Empty);

    let mut release = Release::new(UNRELEASED, "");
    parse_sections(cursor, &mut release)?;
    Ok(release)
}

fn parse_releases(cursor: &mut TokenCursor<'_>) -> Result<Vec<Release>, ParseError> {
    let mut releases = Vec::new();

    while let Some(Token::ReleaseTitle { name, date }) = cursor.peek() {
        cursor.advance();
        cursor.expect(TokenKind::Empty)?;

        let mut release = Release::new(name.as_str(), date.as_str());
        parse_sections(cursor, &mut release)?;
        releases.push(release);
    }

    Ok(releases)
}

fn parse_sections(cursor: &mut TokenCursor<'_>, release: &mut Release) -> Result<(), ParseError> {
    while let Some(Token::SectionTitle(title)) = cursor.peek() {
        cursor.advance();

        // A section directly followed by the next section title has no entries
        if !cursor.check(TokenKind::SectionTitle) {
            cursor.expect(TokenKind::Empty)?;
        }

        let category = Category::from_title(title);
        if category.is_none() {
            warn!(section = %title, release = %release.name, "unknown section, dropping its entries");
        }

        for description in parse_entries(cursor)? {
            if let Some(category) = category {
                release.entries_mut(category).push(Entry::new(description));
            }
        }

        cursor.accept(TokenKind::Empty);
    }

    Ok(())
}

fn parse_entries<'a>(cursor: &mut TokenCursor<'a>) -> Result<Vec<&'a str>, ParseError> {
    let mut entries = Vec::new();

    loop {
        match cursor.peek() {
            Some(Token::ChangeEntry(description)) => {
                entries.push(description.as_str());
                cursor.advance();
            }
            None | Some(Token::Empty) | Some(Token::SectionTitle(_)) => break,
            Some(_) => return Err(cursor.unexpected(TokenKind::ChangeEntry)),
        }
    }

    Ok(entries)
}

/// Consume the rest of the input, returning the `[Unreleased]` compare link
/// if there is one.
fn read_trailer<'a>(cursor: &mut TokenCursor<'a>) -> Option<&'a CompareLink> {
    let mut unreleased = None;
    let mut ignored = 0usize;

    while let Some(token) = cursor.advance() {
        match token {
            Token::CompareLink(link) if link.title == UNRELEASED && !link.url.is_empty() => {
                unreleased = Some(link);
            }
            Token::CompareLink(_) | Token::Empty => {}
            _ => ignored += 1,
        }
    }

    if ignored > 0 {
        debug!(ignored, "ignored lines after the last release");
    }
    unreleased
}

/// Recover the repository URL from the `[Unreleased]` link.
///
/// The link target starts with the newest release name, which may itself
/// contain `/`, so the name is stripped from the end of the text before
/// `...` instead of splitting at the last slash.
fn unreleased_link_base(link: &CompareLink, latest: &str) -> String {
    let target = format!("{}{}", link.url, link.from_target);
    match target.strip_suffix(latest) {
        Some(base) if base.ends_with('/') => base.to_string(),
        _ => {
            warn!(
                link = %target,
                latest,
                "unreleased link does not point at the newest release"
            );
            link.url.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    fn text(s: &str) -> Token {
        Token::Text(s.to_string())
    }

    fn section(s: &str) -> Token {
        Token::SectionTitle(s.to_string())
    }

    fn entry(s: &str) -> Token {
        Token::ChangeEntry(s.to_string())
    }

    fn release_title(name: &str, date: &str) -> Token {
        Token::ReleaseTitle {
            name: name.to_string(),
            date: date.to_string(),
        }
    }

    fn unexpected(position: usize, expected: TokenKind, found: Option<TokenKind>) -> ParseError {
        ParseError::UnexpectedToken {
            position,
            expected,
            found,
        }
    }

    #[test]
    fn test_parse_simple_document() {
        let changelog =
            parse(&lex("# Changelog\n\nSome text.\n\n## [Unreleased]\n### Added\n\n- Thing one.\n"))
                .unwrap();

        assert_eq!(changelog.description, "Some text.");
        assert_eq!(changelog.unreleased.name, "Unreleased");
        assert_eq!(changelog.unreleased.added, vec![Entry::new("Thing one.")]);
        assert!(changelog.releases.is_empty());
        assert_eq!(changelog.latest_release_name(), "HEAD");
    }

    #[test]
    fn test_parse_header_valid() {
        let tokens = [Token::Header("Changelog".to_string()), Token::Empty];
        let mut cursor = TokenCursor::new(&tokens);
        assert!(parse_header(&mut cursor).is_ok());
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_parse_header_invalid() {
        let cases = vec![
            (
                vec![text(""), Token::Empty],
                unexpected(0, TokenKind::Header, Some(TokenKind::Text)),
            ),
            (
                vec![Token::Header(String::new()), text("")],
                unexpected(1, TokenKind::Empty, Some(TokenKind::Text)),
            ),
            (
                vec![Token::Header(String::new())],
                unexpected(1, TokenKind::Empty, None),
            ),
        ];

        for (tokens, expected) in cases {
            let mut cursor = TokenCursor::new(&tokens);
            assert_eq!(parse_header(&mut cursor).unwrap_err(), expected);
        }
    }

    #[test]
    fn test_parse_fails_before_consuming_when_header_missing() {
        let tokens = vec![
            text("Changelog"),
            Token::Empty,
            text(""),
            Token::Empty,
            release_title("Unreleased", ""),
        ];

        let err = parse(&tokens).unwrap_err();

        assert_eq!(err, unexpected(0, TokenKind::Header, Some(TokenKind::Text)));
    }

    #[test]
    fn test_parse_description() {
        let tokens = [text("Lorum ipsum."), Token::Empty, release_title("", "")];
        let mut cursor = TokenCursor::new(&tokens);

        assert_eq!(parse_description(&mut cursor), "Lorum ipsum.");
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_parse_description_keeps_paragraphs() {
        let tokens = [
            text("First paragraph."),
            Token::Empty,
            text("Second paragraph,"),
            text("continued."),
            Token::Empty,
            Token::Empty,
            release_title("Unreleased", ""),
        ];
        let mut cursor = TokenCursor::new(&tokens);

        assert_eq!(
            parse_description(&mut cursor),
            "First paragraph.\n\nSecond paragraph,\ncontinued."
        );
    }

    #[test]
    fn test_parse_description_rejects_other_tokens() {
        let tokens = vec![
            Token::Header("Changelog".to_string()),
            Token::Empty,
            text("Intro"),
            entry("Not a description line"),
        ];

        let err = parse(&tokens).unwrap_err();

        assert_eq!(
            err,
            unexpected(3, TokenKind::ReleaseTitle, Some(TokenKind::ChangeEntry))
        );
    }

    #[test]
    fn test_parse_sections_every_category() {
        for category in Category::ALL {
            let tokens = [
                section(category.title()),
                Token::Empty,
                entry("First."),
                entry("Second."),
                Token::Empty,
            ];
            let mut cursor = TokenCursor::new(&tokens);
            let mut release = Release::unreleased();

            parse_sections(&mut cursor, &mut release).unwrap();

            assert_eq!(
                release.entries(category),
                &[Entry::new("First."), Entry::new("Second.")]
            );
            assert_eq!(release.entry_count(), 2);
            assert!(cursor.is_at_end());
        }
    }

    #[test]
    fn test_parse_sections_without_entries() {
        for category in Category::ALL {
            let tokens = [section(category.title()), Token::Empty];
            let mut cursor = TokenCursor::new(&tokens);
            let mut release = Release::unreleased();

            parse_sections(&mut cursor, &mut release).unwrap();
            assert!(release.is_empty());
        }
    }

    #[test]
    fn test_parse_sections_missing_empty_line_after_title() {
        for category in Category::ALL {
            let tokens = [section(category.title())];
            let mut cursor = TokenCursor::new(&tokens);
            let mut release = Release::unreleased();

            let err = parse_sections(&mut cursor, &mut release).unwrap_err();
            assert_eq!(err, unexpected(1, TokenKind::Empty, None));
        }
    }

    #[test]
    fn test_parse_sections_rejects_text_among_entries() {
        for category in Category::ALL {
            let tokens = [section(category.title()), Token::Empty, text("")];
            let mut cursor = TokenCursor::new(&tokens);
            let mut release = Release::unreleased();

            let err = parse_sections(&mut cursor, &mut release).unwrap_err();
            assert_eq!(
                err,
                unexpected(2, TokenKind::ChangeEntry, Some(TokenKind::Text))
            );
        }
    }

    #[test]
    fn test_parse_sections_empty_category_followed_by_section() {
        let changelog = parse(&lex(
            "# Changelog\n\n\n## [Unreleased]\n\n### Added\n\n### Changed\n\n- Something.\n",
        ))
        .unwrap();

        assert!(changelog.unreleased.added.is_empty());
        assert_eq!(changelog.unreleased.changed, vec![Entry::new("Something.")]);

        let adjacent = parse(&lex(
            "# Changelog\n\n\n## [Unreleased]\n\n### Added\n### Changed\n\n- Something.\n",
        ))
        .unwrap();
        assert_eq!(adjacent, changelog);
    }

    #[test]
    fn test_parse_sections_drops_unknown_category() {
        let tokens = [
            section("Notes"),
            Token::Empty,
            entry("Dropped."),
            Token::Empty,
            section("Fixed"),
            Token::Empty,
            entry("Kept."),
        ];
        let mut cursor = TokenCursor::new(&tokens);
        let mut release = Release::unreleased();

        parse_sections(&mut cursor, &mut release).unwrap();

        assert_eq!(release.entry_count(), 1);
        assert_eq!(release.fixed, vec![Entry::new("Kept.")]);
    }

    #[test]
    fn test_parse_unreleased_requires_release_title() {
        let tokens = [Token::Empty];
        let mut cursor = TokenCursor::new(&tokens);

        let err = parse_unreleased(&mut cursor).unwrap_err();
        assert_eq!(
            err,
            unexpected(0, TokenKind::ReleaseTitle, Some(TokenKind::Empty))
        );
    }

    #[test]
    fn test_parse_unreleased_empty_line_is_optional() {
        let with_empty = [release_title("Unreleased", ""), Token::Empty];
        let without_empty = [release_title("Unreleased", "")];

        for tokens in [&with_empty[..], &without_empty[..]] {
            let mut cursor = TokenCursor::new(tokens);
            let release = parse_unreleased(&mut cursor).unwrap();
            assert_eq!(release.name, "Unreleased");
            assert!(cursor.is_at_end());
        }
    }

    #[test]
    fn test_parse_unreleased_missing_empty_line_after_section() {
        let tokens = vec![
            Token::Header("Changelog".to_string()),
            Token::Empty,
            text(""),
            Token::Empty,
            release_title("Unreleased", ""),
            section("Added"),
            entry("Added a bug."),
            Token::Empty,
            Token::CompareLink(CompareLink::default()),
        ];

        let err = parse(&tokens).unwrap_err();
        assert_eq!(
            err,
            unexpected(6, TokenKind::Empty, Some(TokenKind::ChangeEntry))
        );
    }

    #[test]
    fn test_parse_releases_requires_empty_line_after_title() {
        let tokens = [release_title("v1.0.0", "2020-01-01"), section("Added")];
        let mut cursor = TokenCursor::new(&tokens);

        let err = parse_releases(&mut cursor).unwrap_err();
        assert_eq!(
            err,
            unexpected(1, TokenKind::Empty, Some(TokenKind::SectionTitle))
        );
    }

    #[test]
    fn test_parse_releases() {
        let tokens = [
            release_title("v1.0.0", "2020-02-01"),
            Token::Empty,
            section("Added"),
            Token::Empty,
            entry("An easter egg."),
            Token::Empty,
            release_title("v0.9.0", "2020-01-01"),
            Token::Empty,
        ];
        let mut cursor = TokenCursor::new(&tokens);

        let releases = parse_releases(&mut cursor).unwrap();

        assert_eq!(releases.len(), 2);
        assert_eq!(releases[0].name, "v1.0.0");
        assert_eq!(releases[0].date, "2020-02-01");
        assert_eq!(releases[0].added, vec![Entry::new("An easter egg.")]);
        assert_eq!(releases[1].name, "v0.9.0");
        assert!(releases[1].is_empty());
    }

    #[test]
    fn test_parse_links_releases_newest_first() {
        let input = "\
# Changelog

## [Unreleased]

## [1.0.0] - 2018-12-28

## [0.2.0] - 2018-08-14

## [0.1.0] - 2018-01-01

[Unreleased]: http://github.com/1.0.0...HEAD
";
        let changelog = parse(&lex(input)).unwrap();

        assert_eq!(changelog.description, "");
        assert_eq!(changelog.releases.len(), 3);
        assert_eq!(changelog.releases[0].previous_release, Some(1));
        assert_eq!(changelog.releases[1].previous_release, Some(2));
        assert_eq!(changelog.releases[2].previous_release, None);
        assert_eq!(changelog.latest_release().unwrap().name, "1.0.0");
    }

    #[test]
    fn test_parse_reads_url_from_unreleased_link() {
        let input = "\
# Changelog

Notes.

## [Unreleased]

## [1.0.0] - 2020-01-01

[Unreleased]: https://github.com/acme/widget/compare/1.0.0...HEAD
";
        let changelog = parse(&lex(input)).unwrap();
        assert_eq!(changelog.url, "https://github.com/acme/widget/compare/");
    }

    #[test]
    fn test_parse_url_with_slash_in_release_name() {
        let input = "\
# Changelog

## [Unreleased]

## [release/1.0] - 2020-01-01

[Unreleased]: https://x.com/compare/release/1.0...HEAD
";
        let changelog = parse(&lex(input)).unwrap();
        assert_eq!(changelog.url, "https://x.com/compare/");

        let once = crate::render(&changelog);
        let twice = crate::render(&parse(&lex(&once)).unwrap());
        assert_eq!(once, twice);
        assert!(once.contains("[Unreleased]: https://x.com/compare/release/1.0...HEAD"));
    }

    #[test]
    fn test_parse_url_falls_back_when_link_is_stale() {
        let input = "\
# Changelog

## [Unreleased]

## [2.0.0] - 2021-01-01

[Unreleased]: https://x.com/compare/1.0.0...HEAD
";
        let changelog = parse(&lex(input)).unwrap();
        assert_eq!(changelog.url, "https://x.com/compare/");
    }

    #[test]
    fn test_parse_entries_require_empty_line_before_release() {
        let input = "# Changelog\n\n## [Unreleased]\n\n### Added\n\n- x\n## [1.0.0] - 2020-01-01\n\n";

        let err = parse(&lex(input)).unwrap_err();

        assert_eq!(
            err,
            unexpected(7, TokenKind::ChangeEntry, Some(TokenKind::ReleaseTitle))
        );
    }

    #[test]
    fn test_parse_keeps_default_url_without_links() {
        let changelog = parse(&lex("# Changelog\n\n## [Unreleased]\n")).unwrap();
        assert_eq!(changelog.url, crate::types::DEFAULT_URL);
    }

    #[test]
    fn test_parse_incorrect_release() {
        let tokens = vec![
            Token::Header("Changelog".to_string()),
            Token::Empty,
            text(""),
            Token::Empty,
            release_title("Unreleased", ""),
            section("Added"),
            Token::Empty,
            entry("Added a bug."),
            Token::Empty,
            release_title("v1.0.0", ""),
            section("Added"),
            entry("Added an easter egg."),
            Token::CompareLink(CompareLink::default()),
        ];

        assert!(parse(&tokens).is_err());
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(
            parse(&[]).unwrap_err(),
            unexpected(0, TokenKind::Header, None)
        );
    }
}

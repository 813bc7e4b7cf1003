//! Changewright Changelog - Keep a Changelog documents as structured data
//!
//! This crate provides the lexer, parser and renderer for changelog files,
//! together with the mutations used to record changes and cut releases.
//! Everything here works on in-memory text; reading and writing files is
//! left to the caller.

pub mod error;
pub mod formatter;
pub mod lexer;
pub mod mutation;
pub mod parser;
pub mod types;

pub use error::{ChangelogError, LexError, ParseError, Result};
pub use formatter::{ChangelogFormatter, MarkdownFormatter};
pub use lexer::{lex, lex_lines, CompareLink, Token, TokenKind};
pub use mutation::{ConflictStrategy, ReleaseOptions};
pub use parser::parse;
pub use types::{Category, Changelog, Entry, Release};

/// Lex and parse a changelog document in one step
pub fn parse_str(input: &str) -> std::result::Result<Changelog, ParseError> {
    parse(&lex(input))
}

/// Render a changelog as canonical markdown
pub fn render(changelog: &Changelog) -> String {
    MarkdownFormatter::new().format(changelog)
}

//! Error types for changelog processing

use thiserror::Error;

use crate::lexer::{Token, TokenKind};

/// Result type alias using ChangelogError
pub type Result<T> = std::result::Result<T, ChangelogError>;

/// Main error type for changelog operations
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// Reading lines failed while lexing
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The document does not follow the changelog grammar
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A release with this name is already recorded
    #[error("Release {0} already exists (use --force to overwrite or --merge to combine)")]
    ReleaseExists(String),

    /// Release name cannot be used as a version label
    #[error("Invalid release name '{name}': {reason}")]
    InvalidReleaseName { name: String, reason: String },

    /// Entry text cannot be stored as a single changelog line
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),
}

/// Failure of the line source feeding the lexer.
///
/// Lexing stops at the first failing line; the tokens produced up to that
/// point are kept alongside the underlying I/O error.
#[derive(Debug, Error)]
#[error("Failed to read changelog line {line}: {source}")]
pub struct LexError {
    /// Tokens lexed before the failure
    pub tokens: Vec<Token>,
    /// One-based number of the line that could not be read
    pub line: usize,
    /// Underlying read error
    #[source]
    pub source: std::io::Error,
}

/// Grammar violation found while parsing a token sequence
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The token at the cursor does not fit the grammar
    #[error("unexpected token at position {position}: expected {expected}, found {}", describe_found(.found))]
    UnexpectedToken {
        /// Cursor position where parsing stopped
        position: usize,
        /// Token kind the grammar required
        expected: TokenKind,
        /// Token kind actually found, `None` at end of input
        found: Option<TokenKind>,
    },
}

impl ParseError {
    /// Cursor position where parsing stopped
    pub fn position(&self) -> usize {
        match self {
            Self::UnexpectedToken { position, .. } => *position,
        }
    }
}

fn describe_found(found: &Option<TokenKind>) -> String {
    match found {
        Some(kind) => kind.to_string(),
        None => "end of input".to_string(),
    }
}

impl ChangelogError {
    /// Create an invalid release name error
    pub fn invalid_release_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidReleaseName {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

//! Error types for rulex-lex
//!
//! Scanning has exactly one lexical failure, [`ScanError::UnknownToken`].
//! Malformed patterns are rejected earlier, when a rule is built, with
//! [`RuleError`]. Configuration loading has its own [`ConfigError`].

use rulex_util::Position;
use thiserror::Error;

/// Error returned by [`Scanner::peek`](crate::Scanner::peek) and
/// [`Scanner::next_token`](crate::Scanner::next_token).
#[derive(Debug, Error)]
pub enum ScanError {
    /// No rule matches the input at `position`.
    ///
    /// `literal` is the shortest unmatched prefix: it stops where whitespace
    /// or some rule would match again, or at the end of the buffered input.
    #[error("unknown token {literal:?} at {position}")]
    UnknownToken {
        /// The unmatched text
        literal: String,
        /// Position of the first unmatched character
        position: Position,
    },

    /// Reading from the underlying source failed.
    #[error("failed to read source: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// Position of the offending text, if this is a lexical error.
    pub fn position(&self) -> Option<Position> {
        match self {
            ScanError::UnknownToken { position, .. } => Some(*position),
            ScanError::Io(_) => None,
        }
    }

    /// The offending text, if this is a lexical error.
    pub fn literal(&self) -> Option<&str> {
        match self {
            ScanError::UnknownToken { literal, .. } => Some(literal.as_str()),
            ScanError::Io(_) => None,
        }
    }
}

/// Error returned when a token or whitespace pattern fails to compile.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The pattern is not a valid regular expression.
    #[error("invalid pattern {pattern:?}: {error}")]
    InvalidPattern {
        /// The pattern source as given by the caller
        pattern: String,
        /// The underlying regex error
        #[source]
        error: regex::Error,
    },
}

/// Error returned while loading or compiling a [`ScannerConfig`](crate::ScannerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A configured pattern does not compile.
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// Buffer settings are out of range.
    #[error("invalid buffer settings: {0}")]
    InvalidBuffer(String),
}

/// Result type alias for scanning operations
pub type ScanResult<T> = std::result::Result<T, ScanError>;

/// Result type alias for rule construction
pub type RuleResult<T> = std::result::Result<T, RuleError>;

/// Result type alias for configuration loading
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

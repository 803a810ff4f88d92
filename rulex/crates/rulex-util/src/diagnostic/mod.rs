//! Diagnostic module - caret-under-token error reports.
//!
//! A scanner only knows the line it is currently looking at, so diagnostics
//! here are built from a single source line plus a highlighted range rather
//! than from a whole-file source map.
//!
//! # Examples
//!
//! ```
//! use rulex_util::diagnostic::{Diagnostic, SourceSnippet};
//! use rulex_util::Position;
//!
//! let diag = Diagnostic::error("unknown token \"?\"")
//!     .with_snippet(SourceSnippet::at("a ? b", Position::new(0, 2), 1))
//!     .with_note("no rule matches this input");
//!
//! assert_eq!(
//!     diag.to_string(),
//!     "error: unknown token \"?\"\n  1 | a ? b\n    |   ^\n  = note: no rule matches this input"
//! );
//! ```

mod snippet;

pub use snippet::SourceSnippet;

use std::fmt;

/// Diagnostic severity level
///
/// # Examples
///
/// ```
/// use rulex_util::diagnostic::Level;
///
/// assert_eq!(format!("{}", Level::Error), "error");
/// assert_eq!(format!("{}", Level::Warning), "warning");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Input that cannot be scanned
    Error,
    /// Suspicious input that was still scanned
    Warning,
    /// Additional information about a diagnostic
    Note,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
            Level::Note => write!(f, "note"),
        }
    }
}

/// A rendered-on-demand report: level, message, source snippets and notes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity
    pub level: Level,
    /// Main message
    pub message: String,
    /// Highlighted source lines, in display order
    pub snippets: Vec<SourceSnippet>,
    /// Trailing notes
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create a diagnostic with no snippets or notes.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            snippets: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Shorthand for `Diagnostic::new(Level::Error, message)`.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    /// Shorthand for `Diagnostic::new(Level::Warning, message)`.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    /// Append a source snippet.
    pub fn with_snippet(mut self, snippet: SourceSnippet) -> Self {
        self.snippets.push(snippet);
        self
    }

    /// Append a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Returns true for error-level diagnostics.
    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)?;
        for snippet in &self.snippets {
            write!(f, "\n{}", snippet.format())?;
        }
        for note in &self.notes {
            write!(f, "\n  = note: {}", note)?;
        }
        Ok(())
    }
}

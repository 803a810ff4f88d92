//! Position module - line/column coordinates into scanned input.
//!
//! A [`Position`] is a zero-based `(line, column)` pair. Positions are plain
//! values: they never change in place, and the only way to move forward is
//! [`Position::shift`], which returns the position reached after consuming a
//! piece of text.
//!
//! # Examples
//!
//! ```
//! use rulex_util::Position;
//!
//! let start = Position::new(0, 4);
//! let end = start.shift("ab\ncd");
//!
//! assert_eq!(end, Position::new(1, 2));
//! assert!(start.before(end));
//! ```

use std::fmt;

/// A zero-based line/column coordinate.
///
/// Ordering is lexicographic on `(line, column)`, so the derived `Ord`
/// agrees with [`before`](Position::before) and [`after`](Position::after).
/// Columns count characters (Unicode scalar values), not bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line number (0-based)
    pub line: usize,
    /// Column number (0-based, in characters)
    pub column: usize,
}

impl Position {
    /// The position of the first character of any input.
    pub const START: Position = Position { line: 0, column: 0 };

    /// Create a new position
    ///
    /// # Examples
    ///
    /// ```
    /// use rulex_util::Position;
    ///
    /// let pos = Position::new(2, 7);
    /// assert_eq!(pos.line, 2);
    /// assert_eq!(pos.column, 7);
    /// ```
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Returns true if `self` comes strictly before `other`.
    #[inline]
    pub fn before(&self, other: Position) -> bool {
        *self < other
    }

    /// Returns true if `self` comes strictly after `other`.
    #[inline]
    pub fn after(&self, other: Position) -> bool {
        *self > other
    }

    /// Returns the position reached after consuming `text` from `self`.
    ///
    /// Without a newline the column grows by the character count of `text`.
    /// Otherwise the line grows by the number of newlines and the column is
    /// the character count after the last newline.
    ///
    /// # Examples
    ///
    /// ```
    /// use rulex_util::Position;
    ///
    /// assert_eq!(Position::new(0, 3).shift("abc"), Position::new(0, 6));
    /// assert_eq!(Position::new(0, 3).shift("a\n\nbc"), Position::new(2, 2));
    /// assert_eq!(Position::new(4, 9).shift(""), Position::new(4, 9));
    /// ```
    pub fn shift(self, text: &str) -> Position {
        match text.rfind('\n') {
            Some(last) => Position {
                line: self.line + text.matches('\n').count(),
                column: text[last + 1..].chars().count(),
            },
            None => Position {
                line: self.line,
                column: self.column + text.chars().count(),
            },
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line:{}, column:{}]", self.line, self.column)
    }
}

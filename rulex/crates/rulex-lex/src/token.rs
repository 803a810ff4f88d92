//! Token types
//!
//! A [`Token`] is what one successful scan produces: which rule matched, the
//! exact text it matched, the regex sub-matches, and where it started.

use std::fmt;

use regex::Captures;
use rulex_util::Position;

/// Identifier of a token rule.
///
/// The four negative values are used by the default rule set. Callers pick
/// any other value for their own rules.
///
/// # Examples
///
/// ```
/// use rulex_lex::TokenId;
///
/// const KEYWORD: TokenId = TokenId(1);
///
/// assert_eq!(TokenId::IDENT.to_string(), "IDENT");
/// assert_eq!(KEYWORD.to_string(), "UNKNOWN(1)");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(pub i32);

impl TokenId {
    /// Any single character (the default catch-all).
    pub const OTHER: TokenId = TokenId(-1);
    /// `[a-zA-Z_][a-zA-Z0-9_]*`
    pub const IDENT: TokenId = TokenId(-2);
    /// Digits with an optional fractional part.
    pub const NUMBER: TokenId = TokenId(-3);
    /// A double-quoted string without escapes.
    pub const STRING: TokenId = TokenId(-4);

    /// Returns true for the identifiers of the default rule set.
    pub fn is_builtin(self) -> bool {
        matches!(
            self,
            TokenId::OTHER | TokenId::IDENT | TokenId::NUMBER | TokenId::STRING
        )
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TokenId::OTHER => write!(f, "OTHER"),
            TokenId::IDENT => write!(f, "IDENT"),
            TokenId::NUMBER => write!(f, "NUMBER"),
            TokenId::STRING => write!(f, "STRING"),
            TokenId(id) => write!(f, "UNKNOWN({})", id),
        }
    }
}

/// A matched token.
///
/// Tokens own their text; nothing in a token borrows from the scanner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Identifier of the rule that matched.
    pub id: TokenId,
    /// The exact matched text.
    pub literal: String,
    /// Capture groups of the rule's pattern, in order, without the whole
    /// match. Groups that did not participate are empty strings.
    pub captures: Vec<String>,
    /// Position of the first character of `literal`.
    pub position: Position,
}

impl Token {
    /// Create a token without captures.
    pub fn new(id: TokenId, literal: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            literal: literal.into(),
            captures: Vec::new(),
            position,
        }
    }

    pub(crate) fn from_captures(id: TokenId, caps: &Captures<'_>, position: Position) -> Self {
        let mut groups = caps.iter();
        let literal = groups
            .next()
            .flatten()
            .map_or_else(String::new, |m| m.as_str().to_string());
        let captures = groups
            .map(|group| group.map_or_else(String::new, |m| m.as_str().to_string()))
            .collect();

        Self {
            id,
            literal,
            captures,
            position,
        }
    }

    /// The `index`-th capture group (0 is the first group, not the whole match).
    pub fn capture(&self, index: usize) -> Option<&str> {
        self.captures.get(index).map(String::as_str)
    }

    /// Position just past the last character of the token.
    ///
    /// # Examples
    ///
    /// ```
    /// use rulex_lex::{Token, TokenId};
    /// use rulex_util::Position;
    ///
    /// let token = Token::new(TokenId::STRING, "\"a\nbc\"", Position::new(3, 7));
    /// assert_eq!(token.end_position(), Position::new(4, 3));
    /// ```
    pub fn end_position(&self) -> Position {
        self.position.shift(&self.literal)
    }

    /// Length of the literal in characters.
    pub fn width(&self) -> usize {
        self.literal.chars().count()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.literal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_token_id_display() {
        assert_eq!(TokenId::OTHER.to_string(), "OTHER");
        assert_eq!(TokenId::IDENT.to_string(), "IDENT");
        assert_eq!(TokenId::NUMBER.to_string(), "NUMBER");
        assert_eq!(TokenId::STRING.to_string(), "STRING");
        assert_eq!(TokenId(0).to_string(), "UNKNOWN(0)");
        assert_eq!(TokenId(-42).to_string(), "UNKNOWN(-42)");
    }

    #[test]
    fn test_token_id_builtin() {
        assert!(TokenId::OTHER.is_builtin());
        assert!(TokenId::STRING.is_builtin());
        assert!(!TokenId(7).is_builtin());
    }

    #[test]
    fn test_token_id_ordering() {
        assert!(TokenId::STRING < TokenId::NUMBER);
        assert!(TokenId::OTHER < TokenId(0));
    }

    #[test]
    fn test_from_captures_keeps_empty_groups() {
        let re = Regex::new(r"\A(?:[0-9]+(\.[0-9]+)?)").unwrap();
        let caps = re.captures("12 rest").unwrap();
        let token = Token::from_captures(TokenId::NUMBER, &caps, Position::START);

        assert_eq!(token.literal, "12");
        assert_eq!(token.captures, vec![String::new()]);
        assert_eq!(token.capture(0), Some(""));
        assert_eq!(token.capture(1), None);
    }

    #[test]
    fn test_display() {
        let token = Token::new(TokenId::OTHER, "=", Position::START);
        assert_eq!(token.to_string(), "OTHER: =");
        assert_eq!(token.width(), 1);
    }
}

//! Token rules
//!
//! A [`Rule`] pairs a [`TokenId`] with a [`Pattern`]. The scanner tries its
//! rules in order and the first match wins, so a catch-all rule belongs at
//! the end. Any rule placed after a catch-all can never match; this is not
//! checked.

use std::cmp::Ordering;
use std::fmt;

use regex::{Captures, Regex};

use crate::error::{RuleError, RuleResult};
use crate::token::TokenId;

/// Pattern source of the default whitespace: one or more whitespace
/// characters, newlines included.
pub const DEFAULT_WHITESPACE: &str = r"\s+";

/// Pattern sources of the default rules, in priority order.
pub const DEFAULT_RULES: [(TokenId, &str); 4] = [
    (TokenId::IDENT, r"[a-zA-Z_][a-zA-Z0-9_]*"),
    (TokenId::NUMBER, r"[0-9]+(\.[0-9]+)?"),
    (TokenId::STRING, r#""([^"]*)""#),
    (TokenId::OTHER, r"(?s)."),
];

/// A regular expression that only ever matches at the start of its input.
///
/// The caller's source is wrapped as `\A(?:source)`, so `"[0-9]+"` and
/// `"^[0-9]+"` behave the same and neither can match text further in.
///
/// # Examples
///
/// ```
/// use rulex_lex::Pattern;
///
/// let digits = Pattern::new("[0-9]+").unwrap();
/// assert_eq!(digits.match_len("42abc"), Some(2));
/// assert_eq!(digits.match_len("abc42"), None);
/// ```
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile an anchored pattern.
    pub fn new(source: &str) -> RuleResult<Self> {
        let regex = Regex::new(&format!(r"\A(?:{})", source)).map_err(|error| {
            RuleError::InvalidPattern {
                pattern: source.to_string(),
                error,
            }
        })?;

        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The pattern as given by the caller, before anchoring.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true if the pattern matches at the start of `text`.
    ///
    /// An empty match counts.
    #[inline]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Byte length of the match at the start of `text`.
    #[inline]
    pub fn match_len(&self, text: &str) -> Option<usize> {
        self.regex.find(text).map(|m| m.end())
    }

    /// Capture groups of the match at the start of `text`.
    #[inline]
    pub fn captures<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        self.regex.captures(text)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// A token rule: an identifier and the pattern that recognizes it.
///
/// Rules compare by identifier only; patterns are not part of equality or
/// ordering.
///
/// A pattern that can match the empty string produces empty tokens that
/// consume nothing. Prefer `+` over `*` for the repeated part.
///
/// # Examples
///
/// ```
/// use rulex_lex::{Rule, TokenId};
///
/// let a = Rule::new(TokenId(1), "[0-9]+").unwrap();
/// let b = Rule::new(TokenId(1), "[a-z]+").unwrap();
/// assert_eq!(a, b);
/// assert!(Rule::new(TokenId(2), "(").is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Rule {
    id: TokenId,
    pattern: Pattern,
}

impl Rule {
    /// Build a rule, compiling `pattern`.
    pub fn new(id: TokenId, pattern: &str) -> RuleResult<Self> {
        Ok(Self {
            id,
            pattern: Pattern::new(pattern)?,
        })
    }

    /// Build a rule from an already compiled pattern.
    pub fn with_pattern(id: TokenId, pattern: Pattern) -> Self {
        Self { id, pattern }
    }

    /// The rule's identifier.
    #[inline]
    pub fn id(&self) -> TokenId {
        self.id
    }

    /// The rule's pattern.
    #[inline]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Rule {}

impl PartialOrd for Rule {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rule {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// A fresh copy of the default rules: identifier, number, string, catch-all.
pub fn default_rules() -> Vec<Rule> {
    DEFAULT_RULES
        .iter()
        .map(|&(id, source)| Rule::with_pattern(id, builtin(source)))
        .collect()
}

/// A fresh copy of the default whitespace pattern.
pub fn default_whitespace() -> Pattern {
    builtin(DEFAULT_WHITESPACE)
}

fn builtin(source: &str) -> Pattern {
    // The built-in sources are constants covered by tests.
    Pattern::new(source).expect("built-in pattern compiles")
}

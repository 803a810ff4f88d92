//! Core scanner implementation.
//!
//! This module contains the `Scanner` struct: whitespace skipping, ordered
//! rule matching, position bookkeeping and unknown-token localization.

use std::io::Read;

use rulex_util::{Diagnostic, Position, SourceSnippet};
use tracing::{debug, warn};

use super::buffer::SourceBuffer;
use crate::config::BufferConfig;
use crate::error::{ScanError, ScanResult};
use crate::rule::{default_rules, default_whitespace, Pattern, Rule};
use crate::token::Token;

/// Rule-driven scanner over a byte source.
///
/// The scanner owns its source and pulls from it on demand. Each call to
/// [`next_token`](Scanner::next_token) skips whitespace, tries the rules in
/// order and returns the first match. Whitespace and rules can be replaced at
/// any time; a change affects the next call.
///
/// A rule whose pattern can match the empty string (`[0-9]*`) returns an
/// empty token without consuming anything, so `next_token` keeps returning
/// it. Iteration stops after yielding such a token.
///
/// # Example
///
/// ```
/// use rulex_lex::{Scanner, TokenId};
///
/// let mut scanner = Scanner::new("x = 42".as_bytes());
///
/// let token = scanner.next_token().unwrap().unwrap();
/// assert_eq!(token.id, TokenId::IDENT);
/// assert_eq!(token.literal, "x");
///
/// let kinds: Vec<_> = scanner.map(|t| t.unwrap().id).collect();
/// assert_eq!(kinds, vec![TokenId::OTHER, TokenId::NUMBER]);
/// ```
pub struct Scanner<R> {
    /// Read-ahead buffer and next-character position.
    buffer: SourceBuffer<R>,

    /// Skipped before every match; `None` skips nothing.
    whitespace: Option<Pattern>,

    /// Rules in priority order.
    rules: Vec<Rule>,

    /// Start of the most recently scanned token.
    position: Position,

    /// Set once the iterator has nothing more to yield.
    finished: bool,
}

impl<R: Read> Scanner<R> {
    /// Creates a scanner with the default whitespace and rules.
    pub fn new(source: R) -> Self {
        Self {
            buffer: SourceBuffer::new(source, BufferConfig::default()),
            whitespace: Some(default_whitespace()),
            rules: default_rules(),
            position: Position::START,
            finished: false,
        }
    }

    /// Replaces the rules, builder style.
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.set_rules(rules);
        self
    }

    /// Replaces the whitespace pattern, builder style.
    pub fn with_whitespace(mut self, whitespace: Option<Pattern>) -> Self {
        self.set_whitespace(whitespace);
        self
    }

    /// Replaces the rules.
    pub fn set_rules(&mut self, rules: Vec<Rule>) {
        self.rules = rules;
    }

    /// Replaces the whitespace pattern. `None` disables skipping.
    pub fn set_whitespace(&mut self, whitespace: Option<Pattern>) {
        self.whitespace = whitespace;
    }

    /// Replaces the read-ahead settings.
    pub fn set_buffering(&mut self, buffering: BufferConfig) {
        self.buffer.set_buffering(buffering);
    }

    /// The rules, in priority order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The whitespace pattern, if any.
    pub fn whitespace(&self) -> Option<&Pattern> {
        self.whitespace.as_ref()
    }

    /// Start of the most recently scanned token.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Position scanning resumes from.
    pub fn next_position(&self) -> Position {
        self.buffer.position()
    }

    /// Returns the next token without consuming it.
    ///
    /// Whitespace before the token is consumed. Returns `Ok(None)` once the
    /// input is exhausted, and [`ScanError::UnknownToken`] when buffered
    /// input remains but no rule matches it.
    pub fn peek(&mut self) -> ScanResult<Option<Token>> {
        self.consume_whitespace(None)?;

        // An empty-matching rule must not produce tokens past the end.
        if self.buffer.is_at_end() {
            return Ok(None);
        }

        if let Some(token) = self.match_rules()? {
            return Ok(Some(token));
        }

        let literal = self.unmatched_prefix().to_string();
        let position = self.buffer.position();
        warn!(
            line = position.line,
            column = position.column,
            "unknown token {:?}",
            literal
        );
        Err(ScanError::UnknownToken { literal, position })
    }

    /// Returns the next token and consumes it.
    ///
    /// On error nothing past the skipped whitespace is consumed, so calling
    /// again reports the same error.
    pub fn next_token(&mut self) -> ScanResult<Option<Token>> {
        let token = self.peek()?;

        if let Some(token) = &token {
            self.position = self.buffer.position();
            self.buffer.advance(token.literal.len());
            debug!(
                id = %token.id,
                line = token.position.line,
                column = token.position.column,
                "scanned {:?}",
                token.literal
            );
        }

        Ok(token)
    }

    /// Consumes whitespace at the head of the input and returns it.
    ///
    /// `next_token` does this on its own; call it directly to keep the
    /// skipped text.
    pub fn skip_whitespace(&mut self) -> ScanResult<String> {
        let mut skipped = String::new();
        self.consume_whitespace(Some(&mut skipped))?;
        Ok(skipped)
    }

    /// Matches `pattern` at the head of the input without consuming it.
    ///
    /// Whitespace is not skipped. On a match the result holds the whole match
    /// followed by each capture group; groups that did not participate are
    /// empty strings.
    ///
    /// # Example
    ///
    /// ```
    /// use rulex_lex::{Pattern, Scanner};
    ///
    /// let key = Pattern::new("([a-z]+)=").unwrap();
    /// let mut scanner = Scanner::new("name=value".as_bytes());
    ///
    /// let groups = scanner.match_pattern(&key).unwrap().unwrap();
    /// assert_eq!(groups, vec!["name=", "name"]);
    /// assert_eq!(scanner.next_position().column, 0);
    /// ```
    pub fn match_pattern(&mut self, pattern: &Pattern) -> ScanResult<Option<Vec<String>>> {
        self.buffer.fill()?;
        loop {
            let text = self.buffer.remaining();
            let groups: Option<Vec<String>> = pattern.captures(text).map(|caps| {
                caps.iter()
                    .map(|group| group.map_or_else(String::new, |m| m.as_str().to_string()))
                    .collect()
            });

            match groups {
                Some(groups)
                    if groups[0].len() == text.len() && self.buffer.can_grow() =>
                {
                    self.buffer.grow()?;
                }
                groups => return Ok(groups),
            }
        }
    }

    /// Like [`match_pattern`](Scanner::match_pattern), but consumes the match.
    ///
    /// The next position moves past the matched text; the position of the
    /// last scanned token is left alone.
    pub fn eat(&mut self, pattern: &Pattern) -> ScanResult<Option<Vec<String>>> {
        let groups = self.match_pattern(pattern)?;
        if let Some(groups) = &groups {
            self.buffer.advance(groups[0].len());
            self.finished = false;
        }
        Ok(groups)
    }

    /// Drops up to `len` bytes of buffered input without matching it.
    ///
    /// Meant for recovering after an [`ScanError::UnknownToken`], e.g.
    /// `scanner.discard(literal.len())`. The cut is rounded down to a
    /// character boundary. Returns the discarded text.
    pub fn discard(&mut self, len: usize) -> ScanResult<String> {
        self.buffer.fill()?;
        let dropped = self.buffer.advance(len).to_string();
        self.finished = false;
        Ok(dropped)
    }

    /// The full line containing the most recent token.
    ///
    /// Built from the consumed part of the current line and the buffered text
    /// up to the next newline, or up to the end of the buffer if no newline
    /// has been read yet.
    pub fn last_line(&self) -> String {
        self.buffer.current_line()
    }

    /// A snippet of [`last_line`](Scanner::last_line) highlighting `width`
    /// characters at `position`.
    pub fn snippet(&self, position: Position, width: usize) -> SourceSnippet {
        SourceSnippet::at(self.last_line(), position, width)
    }

    /// Renders a scan error against the current line.
    ///
    /// # Example
    ///
    /// ```
    /// use rulex_lex::{Rule, Scanner, TokenId};
    ///
    /// let digits = Rule::new(TokenId(0), "[0-9]+").unwrap();
    /// let mut scanner = Scanner::new("1 2 error 3 4".as_bytes()).with_rules(vec![digits]);
    /// scanner.next_token().unwrap();
    /// scanner.next_token().unwrap();
    ///
    /// let err = scanner.next_token().unwrap_err();
    /// assert_eq!(
    ///     scanner.diagnose(&err).to_string(),
    ///     "error: unknown token \"error\"\n  1 | 1 2 error 3 4\n    |     ^^^^^"
    /// );
    /// ```
    pub fn diagnose(&self, err: &ScanError) -> Diagnostic {
        match err {
            ScanError::UnknownToken { literal, position } => {
                Diagnostic::error(format!("unknown token {:?}", literal))
                    .with_snippet(self.snippet(*position, literal.chars().count()))
            }
            ScanError::Io(io) => Diagnostic::error(format!("failed to read source: {}", io)),
        }
    }

    /// Skips whitespace, appending it to `sink` when given.
    ///
    /// Loops because a whitespace run can be longer than the buffer.
    fn consume_whitespace(&mut self, mut sink: Option<&mut String>) -> ScanResult<()> {
        loop {
            self.buffer.fill()?;
            let Some(whitespace) = &self.whitespace else {
                return Ok(());
            };
            let len = match whitespace.match_len(self.buffer.remaining()) {
                Some(len) if len > 0 => len,
                _ => return Ok(()),
            };

            let skipped = self.buffer.advance(len);
            if let Some(sink) = sink.as_deref_mut() {
                sink.push_str(skipped);
            }
        }
    }

    /// First rule matching at the head of the buffer.
    ///
    /// A match that reaches the end of the buffer might continue in unread
    /// input, so the buffer is grown and matching retried until the match
    /// stops short of the end or the source runs out.
    fn match_rules(&mut self) -> ScanResult<Option<Token>> {
        loop {
            let text = self.buffer.remaining();
            let position = self.buffer.position();
            let token = self.rules.iter().find_map(|rule| {
                rule.pattern()
                    .captures(text)
                    .map(|caps| Token::from_captures(rule.id(), &caps, position))
            });

            match token {
                Some(token)
                    if token.literal.len() == text.len() && self.buffer.can_grow() =>
                {
                    self.buffer.grow()?;
                }
                token => return Ok(token),
            }
        }
    }

    /// Shortest prefix of the buffer that nothing can scan: it ends at the
    /// first later character where the whitespace or any rule matches.
    fn unmatched_prefix(&self) -> &str {
        let text = self.buffer.remaining();
        let end = text
            .char_indices()
            .skip(1)
            .map(|(offset, _)| offset)
            .find(|&offset| self.matches_at(&text[offset..]))
            .unwrap_or(text.len());
        &text[..end]
    }

    fn matches_at(&self, text: &str) -> bool {
        self.whitespace.as_ref().is_some_and(|ws| ws.is_match(text))
            || self.rules.iter().any(|rule| rule.pattern().is_match(text))
    }
}

impl<R: Read> Iterator for Scanner<R> {
    type Item = ScanResult<Token>;

    /// Yields tokens until end of input. Stops early after an error or after
    /// an empty token.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.next_token() {
            Ok(Some(token)) => {
                // Nothing was consumed, so the same token would come back.
                if token.literal.is_empty() {
                    self.finished = true;
                }
                Some(Ok(token))
            }
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

//! Source snippets with caret underlines.

use crate::Position;

/// A single source line with a highlighted column range.
///
/// Line and column values are stored 1-based because they are only ever
/// shown to humans. Use [`SourceSnippet::at`] to build one from a zero-based
/// [`Position`].
///
/// # Examples
///
/// ```
/// use rulex_util::diagnostic::SourceSnippet;
///
/// let snippet = SourceSnippet::new("count = 3 $ 4", 1, 11, 12, Some("no rule matches"));
/// assert_eq!(
///     snippet.format(),
///     "  1 | count = 3 $ 4\n    |           ^ no rule matches"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceSnippet {
    /// Text of the line, without its newline.
    pub line: String,
    /// 1-based line number shown in the gutter.
    pub line_number: usize,
    /// First highlighted column, 1-based.
    pub start_column: usize,
    /// One past the last highlighted column, 1-based.
    pub end_column: usize,
    /// Printed after the carets.
    pub label: Option<String>,
}

impl SourceSnippet {
    /// Builds a snippet from display coordinates.
    ///
    /// `start_column..end_column` is the highlighted range, 1-based and
    /// end-exclusive.
    pub fn new(
        line: impl Into<String>,
        line_number: usize,
        start_column: usize,
        end_column: usize,
        label: Option<impl Into<String>>,
    ) -> Self {
        Self {
            line: line.into(),
            line_number,
            start_column,
            end_column,
            label: label.map(Into::into),
        }
    }

    /// Create a snippet highlighting `width` characters from a zero-based
    /// position.
    ///
    /// # Examples
    ///
    /// ```
    /// use rulex_util::{diagnostic::SourceSnippet, Position};
    ///
    /// let snippet = SourceSnippet::at("a = 1", Position::new(0, 2), 1);
    /// assert_eq!(snippet.line_number, 1);
    /// assert_eq!(snippet.start_column, 3);
    /// assert_eq!(snippet.end_column, 4);
    /// ```
    pub fn at(line: impl Into<String>, position: Position, width: usize) -> Self {
        Self {
            line: line.into(),
            line_number: position.line + 1,
            start_column: position.column + 1,
            end_column: position.column + 1 + width,
            label: None,
        }
    }

    /// Attaches text to print after the carets, e.g. what was expected.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Renders the gutter, the line and the caret row.
    ///
    /// Returns two lines: the numbered source line, then carets under the
    /// highlighted range. Tabs before the range are repeated in the caret
    /// line so the carets stay aligned. At least one caret is always drawn.
    pub fn format(&self) -> String {
        let line_num_width = self.line_number.to_string().len().max(3);
        let mut result = String::new();

        result.push_str(&format!(
            "{:>width$} | {}\n",
            self.line_number,
            self.line,
            width = line_num_width
        ));
        result.push_str(&format!("{:>width$} | ", "", width = line_num_width));

        let underline_start = self.start_column.saturating_sub(1);
        let underline_len = self.end_column.saturating_sub(self.start_column).max(1);

        let mut padding = self.line.chars();
        for _ in 0..underline_start {
            match padding.next() {
                Some('\t') => result.push('\t'),
                _ => result.push(' '),
            }
        }
        result.extend(std::iter::repeat('^').take(underline_len));

        if let Some(ref label) = self.label {
            result.push(' ');
            result.push_str(label);
        }

        result
    }
}

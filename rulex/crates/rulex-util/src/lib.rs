//! rulex-util - Foundation types for the rulex scanner
//!
//! This crate holds the pieces of the scanner that have no dependency on
//! pattern matching or I/O:
//!
//! - [`position`] - zero-based line/column coordinates and how they advance
//!   over consumed text
//! - [`diagnostic`] - single-line source snippets with caret underlines, used
//!   to render lexical errors for humans
//!
//! # Example
//!
//! ```
//! use rulex_util::{diagnostic::SourceSnippet, Position};
//!
//! let line = "total = 3 $ 4";
//! let at = Position::START.shift("total = 3 ");
//!
//! let snippet = SourceSnippet::at(line, at, 1);
//! assert!(snippet.format().ends_with("          ^"));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod diagnostic;
pub mod position;

pub use diagnostic::{Diagnostic, Level, SourceSnippet};
pub use position::Position;

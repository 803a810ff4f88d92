//! rulex-lex - Rule-driven scanner
//!
//! This crate turns a byte stream into tokens using an ordered list of
//! regular-expression rules. It is meant for quick front ends: configuration
//! languages, command grammars, test fixtures, anything where a hand-written
//! lexer would be overkill.
//!
//! # Overview
//!
//! A [`Scanner`] owns its source and reads it in chunks. Each scan skips
//! leading whitespace, tries every [`Rule`] against the head of the unread
//! input and returns a [`Token`] for the first rule that matches. Positions
//! are zero-based `(line, column)` pairs with columns counted in characters.
//!
//! # Example Usage
//!
//! ```
//! use rulex_lex::{Rule, Scanner, TokenId};
//!
//! const NUMBER: TokenId = TokenId(1);
//! const WORD: TokenId = TokenId(2);
//!
//! let rules = vec![
//!     Rule::new(NUMBER, "[0-9]+").unwrap(),
//!     Rule::new(WORD, "[^0-9 ]+").unwrap(),
//! ];
//! let mut scanner = Scanner::new("take 12 eggs".as_bytes()).with_rules(rules);
//!
//! let ids: Vec<TokenId> = scanner.by_ref().map(|t| t.unwrap().id).collect();
//! assert_eq!(ids, vec![WORD, NUMBER, WORD]);
//! assert_eq!(scanner.position().column, 8);
//! ```
//!
//! # Default Rules
//!
//! Without caller rules the scanner recognizes, in this order:
//!
//! - **IDENT**: `[a-zA-Z_][a-zA-Z0-9_]*`
//! - **NUMBER**: `[0-9]+(\.[0-9]+)?`
//! - **STRING**: `"([^"]*)"`, no escapes
//! - **OTHER**: any single character
//!
//! and skips `\s+` between tokens.
//!
//! # Module Structure
//!
//! - [`token`] - Token identifiers and matched tokens
//! - [`rule`] - Anchored patterns and rules
//! - [`scanner`] - The scanner
//! - [`config`] - TOML configuration
//! - [`error`] - Error types

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod rule;
pub mod scanner;
pub mod token;

mod edge_cases;

// Re-export main types for convenience
pub use config::{BufferConfig, RuleConfig, ScannerConfig};
pub use error::{ConfigError, ConfigResult, RuleError, RuleResult, ScanError, ScanResult};
pub use rule::{default_rules, default_whitespace, Pattern, Rule};
pub use scanner::Scanner;
pub use token::{Token, TokenId};

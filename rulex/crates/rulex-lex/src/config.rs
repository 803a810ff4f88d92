//! Scanner configuration.
//!
//! Rule sets can be written down as TOML and turned into a ready
//! [`Scanner`]. Every field has a default, so an empty document yields the
//! default scanner.
//!
//! ```toml
//! whitespace = '[ \t]+'
//!
//! [[rules]]
//! id = 1
//! pattern = '[0-9]+'
//!
//! [[rules]]
//! id = 2
//! pattern = '(?s).'
//!
//! [buffer]
//! low_water = 512
//! chunk_size = 1024
//! ```

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::rule::{Pattern, Rule, DEFAULT_RULES, DEFAULT_WHITESPACE};
use crate::scanner::Scanner;
use crate::token::TokenId;

/// Refill when fewer than this many bytes are buffered.
pub const DEFAULT_LOW_WATER: usize = 1024;

/// Bytes requested from the source per read.
pub const DEFAULT_CHUNK_SIZE: usize = 2048;

/// Complete scanner configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Whitespace pattern; an empty string disables whitespace skipping.
    #[serde(default = "default_whitespace")]
    pub whitespace: String,

    /// Rules in priority order.
    #[serde(default = "default_rules")]
    pub rules: Vec<RuleConfig>,

    /// Read-ahead settings.
    #[serde(default)]
    pub buffer: BufferConfig,
}

/// One configured rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleConfig {
    /// Token identifier
    pub id: i32,
    /// Pattern source
    pub pattern: String,
}

/// Read-ahead settings.
///
/// The scanner keeps reading `chunk_size` bytes at a time until at least
/// `low_water` bytes are buffered or the source is exhausted, so any token
/// up to `low_water` bytes long is always seen whole.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BufferConfig {
    /// Refill threshold in bytes.
    #[serde(default = "default_low_water")]
    pub low_water: usize,

    /// Bytes requested per read.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_whitespace() -> String {
    DEFAULT_WHITESPACE.to_string()
}

fn default_rules() -> Vec<RuleConfig> {
    DEFAULT_RULES
        .iter()
        .map(|&(id, pattern)| RuleConfig {
            id: id.0,
            pattern: pattern.to_string(),
        })
        .collect()
}

fn default_low_water() -> usize {
    DEFAULT_LOW_WATER
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            whitespace: default_whitespace(),
            rules: default_rules(),
            buffer: BufferConfig::default(),
        }
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            low_water: DEFAULT_LOW_WATER,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl BufferConfig {
    /// Check that the settings can drive a scanner.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.chunk_size == 0 {
            return Err(ConfigError::InvalidBuffer(
                "chunk_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl ScannerConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: ScannerConfig = toml::from_str(text)?;
        config.buffer.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Compile the whitespace pattern and the rules.
    pub fn compile(&self) -> ConfigResult<(Option<Pattern>, Vec<Rule>)> {
        let whitespace = if self.whitespace.is_empty() {
            None
        } else {
            Some(Pattern::new(&self.whitespace)?)
        };

        let rules = self
            .rules
            .iter()
            .map(|rule| Rule::new(TokenId(rule.id), &rule.pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((whitespace, rules))
    }

    /// Build a scanner over `source` with this configuration.
    pub fn build<R: Read>(&self, source: R) -> ConfigResult<Scanner<R>> {
        self.buffer.validate()?;
        let (whitespace, rules) = self.compile()?;

        let mut scanner = Scanner::new(source);
        scanner.set_whitespace(whitespace);
        scanner.set_rules(rules);
        scanner.set_buffering(self.buffer);
        Ok(scanner)
    }
}

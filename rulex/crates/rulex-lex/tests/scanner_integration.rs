//! End-to-end tests through the public API.

use std::io::{self, Read, Write};

use rulex_lex::{
    BufferConfig, ConfigError, Rule, ScanError, Scanner, ScannerConfig, Token, TokenId,
};
use rulex_util::Position;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const INT: TokenId = TokenId(1);
const OP: TokenId = TokenId(2);
const PAREN: TokenId = TokenId(3);

/// A source that returns one byte per read and is interrupted every other
/// call.
struct Stuttering {
    data: Vec<u8>,
    offset: usize,
    interrupt: bool,
}

impl Stuttering {
    fn new(text: &str) -> Self {
        Self {
            data: text.as_bytes().to_vec(),
            offset: 0,
            interrupt: false,
        }
    }
}

impl Read for Stuttering {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt = !self.interrupt;
        if self.interrupt {
            return Err(io::Error::new(io::ErrorKind::Interrupted, "try again"));
        }
        if self.offset == self.data.len() || buf.is_empty() {
            return Ok(0);
        }
        buf[0] = self.data[self.offset];
        self.offset += 1;
        Ok(1)
    }
}

/// Route scanner logs to the test output; `RUST_LOG=rulex_lex=trace` shows
/// every refill.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let layer = fmt::layer().with_test_writer().with_target(false);

    // Several tests race to install it; the first one wins.
    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}

fn arithmetic_rules() -> Vec<Rule> {
    vec![
        Rule::new(INT, "[0-9]+").unwrap(),
        Rule::new(OP, r"[-+*/]").unwrap(),
        Rule::new(PAREN, r"[()]").unwrap(),
    ]
}

fn literals(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.literal.as_str()).collect()
}

#[test]
fn test_arithmetic_expression() {
    let tokens: Vec<Token> = Scanner::new("(1 + 23) * 4".as_bytes())
        .with_rules(arithmetic_rules())
        .map(Result::unwrap)
        .collect();

    assert_eq!(literals(&tokens), vec!["(", "1", "+", "23", ")", "*", "4"]);
    assert_eq!(tokens[3].id, INT);
    assert_eq!(tokens[3].position, Position::new(0, 5));
}

#[test]
fn test_interrupted_single_byte_reads() {
    init_logging();

    let tokens: Vec<Token> = Scanner::new(Stuttering::new("alpha \"two words\"\n7.5"))
        .map(Result::unwrap)
        .collect();

    assert_eq!(
        literals(&tokens),
        vec!["alpha", "\"two words\"", "7.5"]
    );
    assert_eq!(tokens[2].position, Position::new(1, 0));
}

#[test]
fn test_report_and_recover() {
    init_logging();

    let mut scanner = Scanner::new("1 + x\n2 * 3".as_bytes()).with_rules(arithmetic_rules());
    let mut scanned = Vec::new();
    let mut reports = Vec::new();

    loop {
        match scanner.next_token() {
            Ok(Some(token)) => scanned.push(token.literal),
            Ok(None) => break,
            Err(err) => {
                reports.push(scanner.diagnose(&err).to_string());
                let len = err.literal().map_or(0, str::len);
                scanner.discard(len).unwrap();
            }
        }
    }

    assert_eq!(scanned, vec!["1", "+", "2", "*", "3"]);
    assert_eq!(
        reports,
        vec!["error: unknown token \"x\"\n  1 | 1 + x\n    |     ^"]
    );
}

#[test]
fn test_error_variant_and_position() {
    let mut scanner = Scanner::new("12 ab".as_bytes()).with_rules(arithmetic_rules());
    scanner.next_token().unwrap();

    match scanner.next_token() {
        Err(ScanError::UnknownToken { literal, position }) => {
            assert_eq!(literal, "ab");
            assert_eq!(position, Position::new(0, 3));
        }
        other => panic!("expected an unknown token, got {:?}", other),
    }
}

#[test]
fn test_configured_scanner_from_file() {
    init_logging();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
whitespace = '[ ]+'

[[rules]]
id = 1
pattern = '[0-9]+'

[[rules]]
id = 2
pattern = '\n'

[buffer]
low_water = 4
chunk_size = 2
"#
    )
    .unwrap();

    let config = ScannerConfig::load(file.path()).unwrap();
    assert_eq!(
        config.buffer,
        BufferConfig {
            low_water: 4,
            chunk_size: 2
        }
    );

    let ids: Vec<TokenId> = config
        .build("10 20\n300".as_bytes())
        .unwrap()
        .map(|t| t.unwrap().id)
        .collect();
    assert_eq!(ids, vec![TokenId(1), TokenId(1), TokenId(2), TokenId(1)]);
}

#[test]
fn test_config_with_bad_pattern() {
    let config =
        ScannerConfig::from_toml_str("[[rules]]\nid = 1\npattern = '[0-9'\n").unwrap();
    let err = config.build("1".as_bytes()).err().unwrap();
    assert!(matches!(err, ConfigError::Rule(_)));
}

#[test]
fn test_positions_track_the_source() {
    let source = "first = 1\n  second = \"two\"\n\n    third";
    let tokens: Vec<Token> = Scanner::new(source.as_bytes())
        .map(Result::unwrap)
        .collect();

    let lines: Vec<&str> = source.split('\n').collect();
    for token in &tokens {
        let line: String = lines[token.position.line]
            .chars()
            .skip(token.position.column)
            .collect();
        assert!(
            line.starts_with(token.literal.as_str()),
            "{} not found at {}",
            token,
            token.position
        );
    }
}

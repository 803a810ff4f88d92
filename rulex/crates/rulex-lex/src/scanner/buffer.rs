//! Read-ahead buffer over a byte source.
//!
//! `SourceBuffer` owns the reader and keeps decoded text that has not been
//! consumed yet. It also tracks the position of the first unconsumed
//! character and the consumed part of the line that character sits on.

use std::io::{self, Read};

use rulex_util::Position;
use tracing::{trace, warn};

use crate::config::BufferConfig;

pub(crate) struct SourceBuffer<R> {
    /// The byte source.
    source: R,

    /// Bytes read but not decoded yet: an incomplete UTF-8 sequence cut by
    /// the end of a read.
    undecoded: Vec<u8>,

    /// Decoded text; `text[head..]` is unconsumed.
    text: String,

    /// Byte offset of the first unconsumed character in `text`.
    head: usize,

    /// Set once a read returns zero bytes.
    exhausted: bool,

    /// Position of `text[head]`.
    position: Position,

    /// Consumed text since the last newline.
    line_head: String,

    buffering: BufferConfig,
}

impl<R: Read> SourceBuffer<R> {
    pub(crate) fn new(source: R, buffering: BufferConfig) -> Self {
        Self {
            source,
            undecoded: Vec::new(),
            text: String::new(),
            head: 0,
            exhausted: false,
            position: Position::START,
            line_head: String::new(),
            buffering,
        }
    }

    /// Read until at least `low_water` bytes are buffered or the source is
    /// exhausted. Short reads are fine; only a zero-byte read ends the source.
    pub(crate) fn fill(&mut self) -> io::Result<()> {
        self.fill_to(self.buffering.low_water.max(1))
    }

    /// Buffer at least one more character beyond what is buffered now, unless
    /// the source is exhausted. Used when a match runs into the end of the
    /// buffer and might continue.
    pub(crate) fn grow(&mut self) -> io::Result<()> {
        self.fill_to(self.remaining().len() + 1)
    }

    /// True if more text may still arrive from the source.
    #[inline]
    pub(crate) fn can_grow(&self) -> bool {
        !self.exhausted
    }

    fn fill_to(&mut self, target: usize) -> io::Result<()> {
        if self.exhausted || self.remaining().len() >= target {
            return Ok(());
        }

        if self.head > 0 {
            self.text.drain(..self.head);
            self.head = 0;
        }

        let mut chunk = vec![0u8; self.buffering.chunk_size.max(1)];
        while !self.exhausted && self.text.len() < target {
            match self.source.read(&mut chunk) {
                Ok(0) => {
                    self.exhausted = true;
                    self.flush_undecoded();
                    trace!(buffered = self.text.len(), "source exhausted");
                }
                Ok(n) => {
                    self.undecoded.extend_from_slice(&chunk[..n]);
                    self.decode();
                    trace!(read = n, buffered = self.text.len(), "refilled buffer");
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }

    /// Move as much of `undecoded` into `text` as forms complete characters.
    fn decode(&mut self) {
        loop {
            match std::str::from_utf8(&self.undecoded) {
                Ok(valid) => {
                    self.text.push_str(valid);
                    self.undecoded.clear();
                    return;
                }
                Err(err) => {
                    let valid_len = err.valid_up_to();
                    if let Ok(valid) = std::str::from_utf8(&self.undecoded[..valid_len]) {
                        self.text.push_str(valid);
                    }
                    match err.error_len() {
                        Some(invalid_len) => {
                            warn!(
                                line = self.position.line,
                                "replacing invalid UTF-8 sequence of {} bytes",
                                invalid_len
                            );
                            self.text.push(char::REPLACEMENT_CHARACTER);
                            self.undecoded.drain(..valid_len + invalid_len);
                        }
                        None => {
                            // Incomplete sequence; wait for the next read.
                            self.undecoded.drain(..valid_len);
                            return;
                        }
                    }
                }
            }
        }
    }

    /// At end of stream a dangling partial sequence can never complete.
    fn flush_undecoded(&mut self) {
        self.decode();
        if !self.undecoded.is_empty() {
            warn!(
                bytes = self.undecoded.len(),
                "incomplete UTF-8 sequence at end of input"
            );
            self.text.push(char::REPLACEMENT_CHARACTER);
            self.undecoded.clear();
        }
    }

    /// Unconsumed buffered text.
    #[inline]
    pub(crate) fn remaining(&self) -> &str {
        &self.text[self.head..]
    }

    /// True once the source is exhausted and everything has been consumed.
    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.exhausted && self.head == self.text.len()
    }

    /// Position of the first unconsumed character.
    #[inline]
    pub(crate) fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn set_buffering(&mut self, buffering: BufferConfig) {
        self.buffering = buffering;
    }

    /// Consume `len` bytes of buffered text, clamped to what is buffered and
    /// rounded down to a character boundary. Returns the consumed text.
    pub(crate) fn advance(&mut self, len: usize) -> &str {
        let remaining = self.remaining();
        let mut len = len.min(remaining.len());
        while !remaining.is_char_boundary(len) {
            len -= 1;
        }

        let start = self.head;
        let end = start + len;
        let consumed = &self.text[start..end];

        self.position = self.position.shift(consumed);
        match consumed.rfind('\n') {
            Some(newline) => {
                self.line_head.clear();
                self.line_head.push_str(&consumed[newline + 1..]);
            }
            None => self.line_head.push_str(consumed),
        }

        self.head = end;
        &self.text[start..end]
    }

    /// The line holding the next unconsumed character: the consumed part of
    /// that line plus buffered text up to the next newline.
    pub(crate) fn current_line(&self) -> String {
        let rest = self.remaining();
        let tail = match rest.find('\n') {
            Some(newline) => &rest[..newline],
            None => rest,
        };

        let mut line = String::with_capacity(self.line_head.len() + tail.len());
        line.push_str(&self.line_head);
        line.push_str(tail);
        line
    }
}

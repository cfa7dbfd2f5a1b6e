//! Receive-side line framing.
//!
//! [`LineBuffer`] accumulates raw bytes as they arrive and hands out complete
//! LF-terminated lines. It owns no I/O; [`Connection`](crate::Connection)
//! decides when to read and feeds the bytes in.

use bytes::{Buf, BytesMut};
use encoding::Encoding;

use crate::config::DEFAULT_MAX_LINE_LEN;

/// Initial capacity of the receive buffer.
const INITIAL_CAPACITY: usize = 4096;

/// A growable byte buffer that yields decoded lines.
///
/// Lines may end in either `\r\n` or a bare `\n`; exactly one trailing `\r`
/// is removed. Bytes that are invalid in the configured encoding are replaced
/// with U+FFFD, since peers are not trusted to send clean text.
///
/// # Example
///
/// ```
/// use slirc_line::LineBuffer;
///
/// let mut buf = LineBuffer::new();
/// buf.extend(b":irc.example.org 001 Wiz :Wel");
/// assert_eq!(buf.next_line(), None);
///
/// buf.extend(b"come\r\nPING :x\n");
/// assert_eq!(buf.next_line().as_deref(), Some(":irc.example.org 001 Wiz :Welcome"));
/// assert_eq!(buf.next_line().as_deref(), Some("PING :x"));
/// assert!(buf.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct LineBuffer {
    buffer: BytesMut,
    encoding: &'static Encoding,
    max_line_len: usize,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    /// Create an empty UTF-8 line buffer.
    pub fn new() -> Self {
        Self::with_encoding(encoding::UTF_8)
    }

    /// Create an empty line buffer decoding with the given encoding.
    pub fn with_encoding(encoding: &'static Encoding) -> Self {
        Self {
            buffer: BytesMut::with_capacity(INITIAL_CAPACITY),
            encoding,
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }

    /// Set how many bytes may pile up without a newline before
    /// [`overflow`](Self::overflow) reports it.
    #[must_use]
    pub fn with_max_line_len(mut self, limit: usize) -> Self {
        self.max_line_len = limit;
        self
    }

    /// The unterminated-line limit.
    pub fn max_line_len(&self) -> usize {
        self.max_line_len
    }

    /// Returns the buffered length if it exceeds the limit while no complete
    /// line is available.
    pub fn overflow(&self) -> Option<usize> {
        let len = self.buffer.len();
        if len > self.max_line_len && !self.has_line() {
            Some(len)
        } else {
            None
        }
    }

    /// The encoding used to decode lines.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Append freshly received bytes.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Returns true if at least one complete line is buffered.
    pub fn has_line(&self) -> bool {
        self.find_line_end().is_some()
    }

    /// Remove and decode the next complete line, if any.
    ///
    /// Everything after the line's LF stays buffered for the next call.
    pub fn next_line(&mut self) -> Option<String> {
        let newline_pos = self.find_line_end()?;

        let mut line = self.buffer.split_to(newline_pos);
        self.buffer.advance(1);
        if line.last() == Some(&b'\r') {
            line.truncate(line.len() - 1);
        }

        let (text, _) = self.encoding.decode_without_bom_handling(&line);
        Some(text.into_owned())
    }

    /// Number of buffered bytes not yet returned as lines.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Discard everything buffered.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    fn find_line_end(&self) -> Option<usize> {
        self.buffer.iter().position(|&b| b == b'\n')
    }
}

//! Wire framing for outbound commands.
//!
//! [`frame_commands`] is the single choke point through which every outbound
//! byte passes. It splits its input on LF, so no caller can smuggle a second
//! command into what it believes is one logical line.
//!
//! # Example
//!
//! ```
//! use slirc_line::encode::frame_commands;
//!
//! let frame = frame_commands("JOIN #a\nJOIN #b\n", encoding::UTF_8);
//! assert_eq!(frame, b"JOIN #a\r\nJOIN #b\r\n");
//! ```

use encoding::Encoding;

use crate::command::Command;
use crate::sanitize::strip_cr;

/// IRC line terminator.
pub const CRLF: &[u8] = b"\r\n";

/// Encode one or more newline-separated commands as a CRLF-framed payload.
///
/// Empty segments are dropped and stray carriage returns are removed from
/// each segment, so the result contains exactly one CRLF per non-empty
/// segment and no other CR or LF bytes. Characters the target encoding
/// cannot represent are substituted rather than rejected.
pub fn frame_commands(raw: &str, encoding: &'static Encoding) -> Vec<u8> {
    let mut frame = Vec::with_capacity(raw.len() + CRLF.len());
    for segment in segments(raw) {
        let (bytes, _, _) = encoding.encode(&segment);
        frame.extend_from_slice(&bytes);
        frame.extend_from_slice(CRLF);
    }
    frame
}

/// Encode a single command as a CRLF-terminated frame.
pub fn frame_command(command: &Command, encoding: &'static Encoding) -> Vec<u8> {
    frame_commands(&command.to_string(), encoding)
}

/// The non-empty, CR-free logical lines of `raw`.
fn segments(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split('\n')
        .map(strip_cr)
        .filter(|segment| !segment.is_empty())
}

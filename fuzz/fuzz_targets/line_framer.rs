//! Fuzz target for receive-side framing and outbound quoting
//!
//! Raw bytes go through the line buffer in two chunks; every decoded line is
//! then quoted and must come out as a clean CRLF frame.

#![no_main]

use libfuzzer_sys::fuzz_target;
use slirc_line::encode::frame_commands;
use slirc_line::LineBuffer;

fuzz_target!(|data: &[u8]| {
    let split = data.first().map_or(0, |&b| b as usize).min(data.len());
    let (head, tail) = data.split_at(split);

    let mut buf = LineBuffer::new();
    buf.extend(head);
    buf.extend(tail);

    while let Some(line) = buf.next_line() {
        assert!(!line.contains('\n'));
        let frame = frame_commands(&line, buf.encoding());
        let body = frame.strip_suffix(&b"\r\n"[..]).unwrap_or(&frame);
        assert!(!body.contains(&b'\n'));
        assert!(!body.contains(&b'\r'));
    }
});

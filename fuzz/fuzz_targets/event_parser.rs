//! Fuzz target for line parsing
//!
//! Feeds arbitrary text to the event parser and checks that it never panics
//! and that fallback events always carry the original line.

#![no_main]

use libfuzzer_sys::fuzz_target;
use slirc_line::ProtocolEvent;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    if input.len() > 512 {
        return;
    }

    if let Some(event) = ProtocolEvent::parse(&input) {
        if event.is_fallback() {
            assert_eq!(event.message(), Some(input.as_ref()));
        }
    }
});

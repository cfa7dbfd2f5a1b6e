//! Client-To-Client Protocol helpers.
//!
//! CTCP messages ride inside PRIVMSG/NOTICE bodies, wrapped in `\x01`.
//! Only the two forms this engine deals with are covered: PING probes,
//! which are echoed back automatically, and ACTION (`/me`) messages.

/// CTCP delimiter byte.
pub const DELIM: char = '\x01';

/// Prefix that marks a CTCP PING request in a message body.
pub const PING_MARKER: &str = "\x01PING ";

/// Returns true if a message body is a CTCP PING request.
#[inline]
pub fn is_ping(body: &str) -> bool {
    body.starts_with(PING_MARKER)
}

/// Wrap one line of text as a CTCP ACTION body.
///
/// ```
/// assert_eq!(slirc_line::ctcp::action("waves"), "\x01ACTION waves\x01");
/// ```
pub fn action(text: &str) -> String {
    format!("{DELIM}ACTION {text}{DELIM}")
}

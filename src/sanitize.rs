//! Argument normalization applied before anything reaches the wire.
//!
//! IRC frames are delimited by CRLF, so any caller-supplied text that is
//! interpolated into a command must be scrubbed first. Positional tokens
//! (nicknames, channels, targets, hosts) lose all whitespace; trailing free
//! text keeps its words but is folded onto a single line.

/// Remove every whitespace character (including CR and LF) from a token.
///
/// # Examples
///
/// ```
/// use slirc_line::sanitize::strip_token;
///
/// assert_eq!(strip_token(" #rust\r\n"), "#rust");
/// assert_eq!(strip_token("irc. example .org"), "irc.example.org");
/// ```
pub fn strip_token(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Fold free text onto one line.
///
/// Carriage returns are removed, leading and trailing newlines are dropped,
/// and each interior newline becomes a single space.
///
/// # Examples
///
/// ```
/// use slirc_line::sanitize::collapse_lines;
///
/// assert_eq!(collapse_lines("going\r\nhome\n"), "going home");
/// assert_eq!(collapse_lines("a\n\nb"), "a  b");
/// ```
pub fn collapse_lines(s: &str) -> String {
    strip_cr(s).trim_matches('\n').replace('\n', " ")
}

/// Remove carriage returns, leaving everything else untouched.
#[inline]
pub fn strip_cr(s: &str) -> String {
    s.replace('\r', "")
}

/// Strip one leading `:` if present.
#[inline]
pub fn strip_colon(s: &str) -> &str {
    s.strip_prefix(':').unwrap_or(s)
}

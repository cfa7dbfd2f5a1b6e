//! IRC command types.
//!
//! Each variant carries its arguments as given by the caller. Nothing is
//! validated here; the [`Display`](std::fmt::Display) implementation
//! normalizes every argument so the rendered command always occupies
//! exactly one line.
//!
//! # Reference
//! - RFC 2812: Internet Relay Chat: Client Protocol

/// An outbound IRC command.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Command {
    // === Connection Registration ===
    /// `PASS password`
    PASS(String),
    /// `NICK nickname`
    NICK(String),
    /// `USER ident server bla :realname`
    USER(String, String, String),
    /// `QUIT [:reason]`
    QUIT(Option<String>),

    // === Channel Operations ===
    /// `JOIN channel [key]`
    JOIN(String, Option<String>),
    /// `PART channel [:reason]`
    PART(String, Option<String>),
    /// `MODE target [modes]`
    MODE(String, Option<String>),
    /// `TOPIC channel [:topic]`
    TOPIC(String, Option<String>),
    /// `INVITE nickname channel`
    INVITE(String, String),
    /// `KICK channel nickname [:reason]`
    KICK(String, String, Option<String>),

    // === Messaging ===
    /// `PRIVMSG target :text`
    PRIVMSG(String, String),
    /// `NOTICE target [:text]`
    NOTICE(String, Option<String>),

    // === User State ===
    /// `AWAY [:message]`; no message clears the away state.
    AWAY(Option<String>),

    // === Keepalive ===
    /// `PONG token`, where the token is echoed verbatim from the PING.
    PONG(String),
}

impl Command {
    /// The IRC verb this command is sent as.
    pub fn name(&self) -> &'static str {
        match self {
            Command::PASS(_) => "PASS",
            Command::NICK(_) => "NICK",
            Command::USER(..) => "USER",
            Command::QUIT(_) => "QUIT",
            Command::JOIN(..) => "JOIN",
            Command::PART(..) => "PART",
            Command::MODE(..) => "MODE",
            Command::TOPIC(..) => "TOPIC",
            Command::INVITE(..) => "INVITE",
            Command::KICK(..) => "KICK",
            Command::PRIVMSG(..) => "PRIVMSG",
            Command::NOTICE(..) => "NOTICE",
            Command::AWAY(_) => "AWAY",
            Command::PONG(_) => "PONG",
        }
    }
}

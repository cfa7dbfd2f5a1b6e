//! Structured protocol events.
//!
//! Every non-blank line the server sends becomes exactly one
//! [`ProtocolEvent`]: either [`ProtocolEvent::Message`] when the line fits the
//! `:nick[!ident] COMMAND [destination] [:message]` grammar, or
//! [`ProtocolEvent::Fallback`] holding the raw line when it does not.

mod nom_parser;

pub(crate) use self::nom_parser::parse_with_reply;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where a message was addressed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Destination {
    /// A single channel or nickname.
    Single(String),
    /// `KICK` only: the channel and the nickname being kicked.
    Pair(String, String),
}

impl Destination {
    /// The first (or only) destination token.
    pub fn first(&self) -> &str {
        match self {
            Destination::Single(target) => target,
            Destination::Pair(channel, _) => channel,
        }
    }

    /// The second token of a `KICK` destination.
    pub fn second(&self) -> Option<&str> {
        match self {
            Destination::Single(_) => None,
            Destination::Pair(_, nick) => Some(nick),
        }
    }
}

/// A line that matched the IRC grammar.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IrcMessage {
    /// Sender nickname; absent for server-originated lines.
    pub nick: Option<String>,
    /// Sender `user@host`; present only if the prefix contained `!`.
    pub ident: Option<String>,
    /// The IRC verb or numeric.
    pub command: String,
    /// The first middle parameter (both targets for `KICK`).
    pub destination: Option<Destination>,
    /// Everything after the destination, with one leading `:` removed.
    pub message: Option<String>,
}

/// The result of parsing one line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProtocolEvent {
    /// A line that matched the grammar.
    Message(IrcMessage),
    /// A line that did not; holds the original line verbatim.
    Fallback(String),
}

impl ProtocolEvent {
    /// Parse one framed line.
    ///
    /// Returns `None` for blank lines. Never fails: lines that do not match
    /// the grammar come back as [`ProtocolEvent::Fallback`].
    ///
    /// Parsing alone has no side effects; use
    /// [`Connection::parse_line`](crate::Connection::parse_line) to also send
    /// the PONG and CTCP PING replies.
    ///
    /// # Example
    ///
    /// ```
    /// use slirc_line::{Destination, ProtocolEvent};
    ///
    /// let event = ProtocolEvent::parse(":WiZ!jto@tolsun.oulu.fi KICK #Finnish John :Speaking English")
    ///     .expect("non-blank line");
    /// assert_eq!(event.nick(), Some("WiZ"));
    /// assert_eq!(event.command(), Some("KICK"));
    /// assert_eq!(
    ///     event.destination(),
    ///     Some(&Destination::Pair("#Finnish".into(), "John".into()))
    /// );
    /// assert_eq!(event.message(), Some("Speaking English"));
    /// ```
    pub fn parse(line: &str) -> Option<ProtocolEvent> {
        parse_with_reply(line).map(|(event, _)| event)
    }

    /// Returns true if the line did not match the grammar.
    pub fn is_fallback(&self) -> bool {
        matches!(self, ProtocolEvent::Fallback(_))
    }

    /// The parsed message, unless this is a fallback event.
    pub fn as_message(&self) -> Option<&IrcMessage> {
        match self {
            ProtocolEvent::Message(msg) => Some(msg),
            ProtocolEvent::Fallback(_) => None,
        }
    }

    pub fn nick(&self) -> Option<&str> {
        self.as_message()?.nick.as_deref()
    }

    pub fn ident(&self) -> Option<&str> {
        self.as_message()?.ident.as_deref()
    }

    pub fn command(&self) -> Option<&str> {
        self.as_message().map(|msg| msg.command.as_str())
    }

    pub fn destination(&self) -> Option<&Destination> {
        self.as_message()?.destination.as_ref()
    }

    /// The trailing text, or the raw line for a fallback event.
    pub fn message(&self) -> Option<&str> {
        match self {
            ProtocolEvent::Message(msg) => msg.message.as_deref(),
            ProtocolEvent::Fallback(line) => Some(line),
        }
    }
}

impl From<IrcMessage> for ProtocolEvent {
    fn from(msg: IrcMessage) -> Self {
        ProtocolEvent::Message(msg)
    }
}

//! Nom-based line parser.
//!
//! The grammar is deliberately loose: it splits on the first space at each
//! step rather than tokenizing every parameter, so the trailing message keeps
//! any middle parameters after the destination (`MODE #chan +o Wiz` yields the
//! message `+o Wiz`).
//!
//! ```text
//! [:nick[!ident] ]COMMAND[ destination[ second]][ [:]message]
//! ```

use nom::{
    bytes::complete::take_till,
    character::complete::char,
    combinator::{opt, rest},
    error::VerboseError,
    sequence::{pair, preceded},
    IResult,
};
use tracing::trace;

use crate::command::Command;
use crate::ctcp;
use crate::sanitize::strip_colon;

use super::{Destination, IrcMessage, ProtocolEvent};

type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Split `input` at the first `sep`, returning the text before it and, if
/// `sep` occurs at all, the text after it.
fn split_first(input: &str, sep: char) -> (&str, Option<&str>) {
    let parsed: ParseResult<'_, (&str, Option<&str>)> =
        pair(take_till(|c: char| c == sep), opt(preceded(char(sep), rest)))(input);
    match parsed {
        Ok((_, parts)) => parts,
        Err(_) => (input, None),
    }
}

/// A sender prefix split into nickname and ident.
struct Source<'a> {
    nick: &'a str,
    ident: Option<&'a str>,
}

/// Split an optional leading `:nick[!ident]` off the line.
///
/// Returns `None` when a prefix is present but nothing follows it.
fn split_source(line: &str) -> Option<(Option<Source<'_>>, &str)> {
    if !line.starts_with(':') {
        return Some((None, line));
    }

    let (prefix, body) = split_first(line, ' ');
    let (nick, ident) = split_first(prefix, '!');
    let source = Source {
        nick: strip_colon(nick),
        ident,
    };
    body.map(|body| (Some(source), body))
}

/// Destination and message of a `KICK`, which names both a channel and a nick.
///
/// A `KICK` carrying only a channel keeps a single destination rather than
/// treating whatever follows as the kicked nickname. An empty channel token
/// gives no destination at all.
fn kick_params<'a>(
    channel: &'a str,
    tail: Option<&'a str>,
) -> (Option<Destination>, Option<&'a str>) {
    if channel.is_empty() {
        return (None, tail.map(strip_colon));
    }
    match tail {
        Some(tail) if !tail.is_empty() && !tail.starts_with(':') => {
            let (nick, reason) = split_first(tail, ' ');
            (
                Some(Destination::Pair(channel.to_owned(), nick.to_owned())),
                reason.map(strip_colon),
            )
        }
        tail => (
            Some(Destination::Single(channel.to_owned())),
            tail.map(strip_colon),
        ),
    }
}

/// Parse the part of the line after any prefix.
fn parse_body(source: Option<Source<'_>>, body: &str) -> Option<IrcMessage> {
    let (command, params) = split_first(body, ' ');
    if command.is_empty() {
        return None;
    }

    let (destination, message) = match params {
        None => (None, None),
        Some(params) if params.starts_with(':') => (None, Some(strip_colon(params))),
        Some(params) => {
            let (first, tail) = split_first(params, ' ');
            if command == "KICK" {
                kick_params(first, tail)
            } else {
                let destination = Some(first)
                    .filter(|first| !first.is_empty())
                    .map(|first| Destination::Single(first.to_owned()));
                (destination, tail.map(strip_colon))
            }
        }
    };

    let (nick, ident) = match source {
        Some(Source { nick, ident }) => (Some(nick).filter(|n| !n.is_empty()), ident),
        None => (None, None),
    };

    Some(IrcMessage {
        nick: nick.map(str::to_owned),
        ident: ident.map(str::to_owned),
        command: command.to_owned(),
        destination,
        message: message.map(str::to_owned),
    })
}

/// The automatic NOTICE answering a CTCP PING addressed to us.
fn ctcp_reply(msg: &IrcMessage) -> Option<Command> {
    match (&msg.nick, &msg.message) {
        (Some(nick), Some(text)) if msg.command == "PRIVMSG" && ctcp::is_ping(text) => {
            Some(Command::NOTICE(nick.clone(), Some(text.clone())))
        }
        _ => None,
    }
}

/// Parse one line into an event plus the reply, if any, that must be sent
/// back immediately (PONG for a server PING, NOTICE for a CTCP PING).
///
/// Returns `None` for a line that is blank, or blank after its prefix.
pub(crate) fn parse_with_reply(line: &str) -> Option<(ProtocolEvent, Option<Command>)> {
    if line.trim().is_empty() {
        return None;
    }

    if let Some(token) = line.strip_prefix("PING ") {
        let event = IrcMessage {
            nick: None,
            ident: None,
            command: "PING".to_owned(),
            destination: None,
            message: Some(strip_colon(token).to_owned()),
        };
        return Some((event.into(), Some(Command::PONG(token.to_owned()))));
    }

    let parsed = match split_source(line) {
        Some((_, body)) if body.trim().is_empty() => return None,
        Some((source, body)) => parse_body(source, body),
        None => None,
    };

    match parsed {
        Some(msg) => {
            let reply = ctcp_reply(&msg);
            Some((msg.into(), reply))
        }
        None => {
            trace!(line, "line does not match the message grammar");
            Some((ProtocolEvent::Fallback(line.to_owned()), None))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> ProtocolEvent {
        ProtocolEvent::parse(line).expect("line should produce an event")
    }

    #[test]
    fn test_split_first() {
        assert_eq!(split_first("a b c", ' '), ("a", Some("b c")));
        assert_eq!(split_first("abc", ' '), ("abc", None));
        assert_eq!(split_first("abc ", ' '), ("abc", Some("")));
        assert_eq!(split_first(" abc", ' '), ("", Some("abc")));
        assert_eq!(split_first("", ' '), ("", None));
        assert_eq!(split_first("nick!user@host", '!'), ("nick", Some("user@host")));
    }

    #[test]
    fn test_privmsg_with_full_prefix() {
        let event = parse(":Angel!wondering@irc.org PRIVMSG Wiz :Hello are you receiving this message ?");
        assert_eq!(
            event,
            ProtocolEvent::Message(IrcMessage {
                nick: Some("Angel".into()),
                ident: Some("wondering@irc.org".into()),
                command: "PRIVMSG".into(),
                destination: Some(Destination::Single("Wiz".into())),
                message: Some("Hello are you receiving this message ?".into()),
            })
        );
    }

    #[test]
    fn test_ping_yields_event_and_pong() {
        let (event, reply) = parse_with_reply("PING :tolsun.oulu.fi").unwrap();
        assert_eq!(event.command(), Some("PING"));
        assert_eq!(event.message(), Some("tolsun.oulu.fi"));
        assert_eq!(event.nick(), None);
        assert_eq!(event.destination(), None);
        assert_eq!(reply, Some(Command::PONG(":tolsun.oulu.fi".into())));
    }

    #[test]
    fn test_ping_without_colon() {
        let (event, reply) = parse_with_reply("PING 12345").unwrap();
        assert_eq!(event.message(), Some("12345"));
        assert_eq!(reply.unwrap().to_string(), "PONG 12345");
    }

    #[test]
    fn test_prefixed_ping_is_not_answered() {
        let (event, reply) = parse_with_reply(":irc.example.org PING :token").unwrap();
        assert_eq!(event.nick(), Some("irc.example.org"));
        assert_eq!(event.command(), Some("PING"));
        assert_eq!(event.message(), Some("token"));
        assert!(reply.is_none());
    }

    #[test]
    fn test_kick_has_pair_destination() {
        let event = parse(":WiZ!jto@tolsun.oulu.fi KICK #Finnish John :Speaking English");
        assert_eq!(event.nick(), Some("WiZ"));
        assert_eq!(event.ident(), Some("jto@tolsun.oulu.fi"));
        assert_eq!(event.command(), Some("KICK"));
        assert_eq!(
            event.destination(),
            Some(&Destination::Pair("#Finnish".into(), "John".into()))
        );
        assert_eq!(event.message(), Some("Speaking English"));
    }

    #[test]
    fn test_kick_without_reason() {
        let event = parse(":WiZ KICK #Finnish John");
        assert_eq!(
            event.destination(),
            Some(&Destination::Pair("#Finnish".into(), "John".into()))
        );
        assert_eq!(event.message(), None);
        assert_eq!(event.ident(), None);
    }

    #[test]
    fn test_kick_missing_nick_keeps_single_destination() {
        let event = parse(":WiZ KICK #Finnish");
        assert_eq!(event.destination(), Some(&Destination::Single("#Finnish".into())));
        assert_eq!(event.message(), None);

        let event = parse(":WiZ KICK #Finnish :no nick here");
        assert_eq!(event.destination(), Some(&Destination::Single("#Finnish".into())));
        assert_eq!(event.message(), Some("no nick here"));
    }

    #[test]
    fn test_kick_with_empty_channel_has_no_destination() {
        let event = parse(":WiZ KICK  John");
        assert_eq!(event.command(), Some("KICK"));
        assert_eq!(event.destination(), None);
        assert_eq!(event.message(), Some("John"));

        let event = parse(":WiZ KICK  John :reason");
        assert_eq!(event.destination(), None);
        assert_eq!(event.message(), Some("John :reason"));
    }

    #[test]
    fn test_trailing_without_destination() {
        let event = parse(":Wiz!u@h QUIT :Gone to have lunch");
        assert_eq!(event.command(), Some("QUIT"));
        assert_eq!(event.destination(), None);
        assert_eq!(event.message(), Some("Gone to have lunch"));
    }

    #[test]
    fn test_middle_params_stay_in_message() {
        let event = parse(":Wiz MODE #chan +o Angel");
        assert_eq!(event.destination(), Some(&Destination::Single("#chan".into())));
        assert_eq!(event.message(), Some("+o Angel"));
    }

    #[test]
    fn test_numeric_reply() {
        let event = parse(":irc.example.org 001 Wiz :Welcome to the network");
        assert_eq!(event.nick(), Some("irc.example.org"));
        assert_eq!(event.ident(), None);
        assert_eq!(event.command(), Some("001"));
        assert_eq!(event.destination(), Some(&Destination::Single("Wiz".into())));
        assert_eq!(event.message(), Some("Welcome to the network"));
    }

    #[test]
    fn test_command_only() {
        let event = parse("AWAY");
        assert_eq!(event.command(), Some("AWAY"));
        assert_eq!(event.destination(), None);
        assert_eq!(event.message(), None);
        assert_eq!(event.nick(), None);
    }

    #[test]
    fn test_unprefixed_notice() {
        let event = parse("NOTICE AUTH :*** Looking up your hostname...");
        assert_eq!(event.nick(), None);
        assert_eq!(event.command(), Some("NOTICE"));
        assert_eq!(event.destination(), Some(&Destination::Single("AUTH".into())));
        assert_eq!(event.message(), Some("*** Looking up your hostname..."));
    }

    #[test]
    fn test_blank_lines_yield_nothing() {
        assert_eq!(ProtocolEvent::parse(""), None);
        assert_eq!(ProtocolEvent::parse("   "), None);
        assert_eq!(ProtocolEvent::parse(":nick!user@host "), None);
        assert_eq!(ProtocolEvent::parse(":server   "), None);
    }

    #[test]
    fn test_prefix_without_command_is_fallback() {
        let line = ":nick!user@host";
        let event = parse(line);
        assert!(event.is_fallback());
        assert_eq!(event, ProtocolEvent::Fallback(line.into()));
        assert_eq!(event.nick(), None);
        assert_eq!(event.command(), None);
        assert_eq!(event.destination(), None);
        assert_eq!(event.message(), Some(line));
    }

    #[test]
    fn test_fallback_is_idempotent() {
        for line in [":lonely", ":", ":nick  PRIVMSG #a :x"] {
            let first = parse(line);
            assert!(first.is_fallback(), "{line:?} should fall back");
            let again = parse(first.message().unwrap());
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_ctcp_ping_reply() {
        let (event, reply) =
            parse_with_reply(":Angel!w@irc.org PRIVMSG Wiz :\x01PING 1700000000\x01").unwrap();
        assert_eq!(event.message(), Some("\x01PING 1700000000\x01"));
        assert_eq!(
            reply,
            Some(Command::NOTICE(
                "Angel".into(),
                Some("\x01PING 1700000000\x01".into())
            ))
        );
    }

    #[test]
    fn test_ctcp_ping_needs_sender_and_privmsg() {
        let (_, reply) = parse_with_reply("PRIVMSG Wiz :\x01PING 1\x01").unwrap();
        assert!(reply.is_none());

        let (_, reply) = parse_with_reply(":Angel NOTICE Wiz :\x01PING 1\x01").unwrap();
        assert!(reply.is_none());

        let (_, reply) = parse_with_reply(":Angel PRIVMSG Wiz :\x01VERSION\x01").unwrap();
        assert!(reply.is_none());
    }

    #[test]
    fn test_ordinary_lines_have_no_reply() {
        let (_, reply) = parse_with_reply(":Angel PRIVMSG Wiz :hello").unwrap();
        assert!(reply.is_none());
    }
}

use std::fmt::{self, Write};

use crate::chan::ChannelExt;
use crate::sanitize::{collapse_lines, strip_token};

use super::types::Command;

/// Write the verb followed by whitespace-free positional tokens.
fn write_tokens(f: &mut fmt::Formatter<'_>, cmd: &str, tokens: &[&str]) -> fmt::Result {
    f.write_str(cmd)?;
    for token in tokens {
        f.write_char(' ')?;
        f.write_str(&strip_token(token))?;
    }
    Ok(())
}

/// Write an optional colon-prefixed trailing argument folded onto one line.
fn write_trailing(f: &mut fmt::Formatter<'_>, trailing: Option<&str>) -> fmt::Result {
    match trailing {
        Some(text) => {
            f.write_str(" :")?;
            f.write_str(&collapse_lines(text))
        }
        None => Ok(()),
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::PASS(p) => write!(f, "PASS {}", collapse_lines(p)),
            Command::NICK(n) => write_tokens(f, "NICK", &[n.as_str()]),
            Command::USER(ident, server, realname) => {
                write_tokens(f, "USER", &[ident.as_str(), server.as_str(), "bla"])?;
                write_trailing(f, Some(realname.as_str()))
            }
            Command::QUIT(reason) => {
                f.write_str("QUIT")?;
                write_trailing(f, reason.as_deref())
            }
            Command::JOIN(chan, key) => {
                write_tokens(f, "JOIN", &[chan.as_str()])?;
                match key {
                    Some(key) => write!(f, " {}", collapse_lines(key)),
                    None => Ok(()),
                }
            }
            Command::PART(chan, reason) => {
                write_tokens(f, "PART", &[chan.as_str()])?;
                write_trailing(f, reason.as_deref())
            }
            Command::MODE(target, modes) => {
                let target = strip_token(target);
                write_tokens(f, "MODE", &[target.as_str()])?;
                match modes {
                    Some(modes) if target.is_channel_name() => {
                        write_trailing(f, Some(modes.as_str()))
                    }
                    Some(modes) => write!(f, " {}", collapse_lines(modes)),
                    None => Ok(()),
                }
            }
            Command::TOPIC(chan, topic) => {
                write_tokens(f, "TOPIC", &[chan.as_str()])?;
                write_trailing(f, topic.as_deref())
            }
            Command::INVITE(nick, chan) => {
                write_tokens(f, "INVITE", &[nick.as_str(), chan.as_str()])
            }
            Command::KICK(chan, nick, reason) => {
                write_tokens(f, "KICK", &[chan.as_str(), nick.as_str()])?;
                write_trailing(f, reason.as_deref())
            }
            Command::PRIVMSG(target, text) => {
                write_tokens(f, "PRIVMSG", &[target.as_str()])?;
                write_trailing(f, Some(text.as_str()))
            }
            Command::NOTICE(target, text) => {
                write_tokens(f, "NOTICE", &[target.as_str()])?;
                write_trailing(f, text.as_deref())
            }
            Command::AWAY(message) => {
                f.write_str("AWAY")?;
                write_trailing(f, message.as_deref())
            }
            Command::PONG(token) => write!(f, "PONG {}", collapse_lines(token)),
        }
    }
}

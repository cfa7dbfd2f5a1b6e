//! # slirc-line
//!
//! A small client-side engine for the IRC text protocol. It turns the byte
//! stream of a TCP connection into structured [`ProtocolEvent`]s and turns
//! intents (join, say, kick, ...) into correctly framed, injection-safe wire
//! commands.
//!
//! ## Features
//!
//! - Line framing tolerant of partial reads and bare-LF terminators
//! - Lossy decoding and encoding in any WHATWG encoding
//! - Forgiving line parser: malformed input becomes a typed fallback event,
//!   never an error
//! - Automatic PONG and CTCP PING replies
//! - Blocking or non-blocking reads, chosen per call
//! - One well-defined `Disconnected` state after any transport failure
//!
//! ## Quick Start
//!
//! ### Parsing lines
//!
//! ```rust
//! use slirc_line::{Destination, ProtocolEvent};
//!
//! let event = ProtocolEvent::parse(":Angel!wondering@irc.org PRIVMSG Wiz :Hello!")
//!     .expect("non-blank line");
//! assert_eq!(event.nick(), Some("Angel"));
//! assert_eq!(event.ident(), Some("wondering@irc.org"));
//! assert_eq!(event.destination(), Some(&Destination::Single("Wiz".into())));
//! assert_eq!(event.message(), Some("Hello!"));
//!
//! // Garbage is reported, not thrown.
//! let garbage = ProtocolEvent::parse(":lonely-prefix").unwrap();
//! assert!(garbage.is_fallback());
//! ```
//!
//! ### Formatting commands
//!
//! ```rust
//! use slirc_line::Command;
//!
//! let kick = Command::KICK("#Finnish".into(), "John".into(), Some("Speaking\nEnglish".into()));
//! assert_eq!(kick.to_string(), "KICK #Finnish John :Speaking English");
//! ```
//!
//! ### Talking to a server
//!
//! See [`Connection`].

#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod chan;
pub mod command;
pub mod config;
pub mod connection;
pub mod ctcp;
pub mod encode;
pub mod error;
pub mod event;
pub mod line;
pub mod sanitize;
pub mod transport;

pub use self::chan::ChannelExt;
pub use self::command::Command;
pub use self::config::ConnectionConfig;
pub use self::connection::{Connection, ConnectionState};
pub use self::error::{ConnectionError, Result};
pub use self::event::{Destination, IrcMessage, ProtocolEvent};
pub use self::line::LineBuffer;
pub use self::transport::{Connector, ReadMode, TcpConnector, TcpTransport, Transport};

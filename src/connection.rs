//! Connection lifecycle and the caller-facing API.
//!
//! A [`Connection`] is either `Disconnected` (no transport) or `Connected`
//! (exactly one transport). Every failure of the transport, an explicit
//! [`quit`](Connection::quit), and dropping a connected value all funnel
//! through the same teardown, which closes the transport once and clears the
//! session state.

use encoding::Encoding;
use tracing::{debug, info, warn};

use crate::command::Command;
use crate::config::ConnectionConfig;
use crate::ctcp;
use crate::encode::frame_commands;
use crate::error::{ConnectionError, Result};
use crate::event::{parse_with_reply, ProtocolEvent};
use crate::line::LineBuffer;
use crate::sanitize::strip_token;
use crate::transport::{Connector, ReadMode, TcpConnector, Transport};

/// Whether a [`Connection`] currently owns a transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// One client session to one IRC server.
///
/// # Example
///
/// ```no_run
/// use slirc_line::{Connection, ReadMode};
///
/// # fn main() -> slirc_line::error::Result<()> {
/// let mut conn = Connection::new();
/// conn.connect("irc.libera.chat", 6667)?;
/// conn.set_nick("slirc_bot")?;
/// conn.set_user(None, Some("slirc-line example"))?;
/// conn.join("#slirc-test", None)?;
///
/// loop {
///     let Some(event) = conn.parse(ReadMode::Blocking)? else {
///         continue;
///     };
///     if event.command() == Some("PRIVMSG") && event.message() == Some("!quit") {
///         break;
///     }
/// }
/// conn.quit(Some("bye"));
/// # Ok(())
/// # }
/// ```
pub struct Connection<C: Connector = TcpConnector> {
    connector: C,
    config: ConnectionConfig,
    encoding: &'static Encoding,
    stream: Option<C::Stream>,
    server: Option<String>,
    nick: Option<String>,
    recv: LineBuffer,
    scratch: Vec<u8>,
}

impl Connection<TcpConnector> {
    /// A disconnected TCP connection with the default configuration.
    pub fn new() -> Self {
        Self::from_parts(TcpConnector, ConnectionConfig::default(), encoding::UTF_8)
    }

    /// A disconnected TCP connection with the given configuration.
    pub fn with_config(config: ConnectionConfig) -> Result<Self> {
        Self::with_connector(TcpConnector, config)
    }
}

impl Default for Connection<TcpConnector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connector> Connection<C> {
    /// A disconnected connection that opens its transports through `connector`.
    pub fn with_connector(connector: C, config: ConnectionConfig) -> Result<Self> {
        let encoding = config.resolve_encoding()?;
        Ok(Self::from_parts(connector, config, encoding))
    }

    fn from_parts(connector: C, config: ConnectionConfig, encoding: &'static Encoding) -> Self {
        let recv = LineBuffer::with_encoding(encoding).with_max_line_len(config.line_limit());
        Self {
            connector,
            config,
            encoding,
            stream: None,
            server: None,
            nick: None,
            recv,
            scratch: Vec::new(),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Open a transport to `host:port`.
    ///
    /// Whitespace is stripped from `host`. A session that is still open is
    /// quit first. Nickname and receive buffer start empty. No retry is
    /// attempted if the transport cannot be opened.
    pub fn connect(&mut self, host: &str, port: u16) -> Result<()> {
        if self.is_connected() {
            self.quit(None);
        }

        let server = strip_token(host);
        let stream = self.connector.connect(&server, port, &self.config)?;
        info!(server = %server, port, "connected");

        self.stream = Some(stream);
        self.server = Some(server);
        self.nick = None;
        self.recv.clear();
        Ok(())
    }

    /// Send QUIT (if connected) and disconnect.
    ///
    /// A failure to send the QUIT is logged and otherwise ignored: the
    /// transport is closed regardless. Calling this while disconnected does
    /// nothing.
    pub fn quit(&mut self, reason: Option<&str>) {
        if self.stream.is_none() {
            return;
        }
        if let Err(e) = self.send(&Command::QUIT(reason.map(str::to_owned))) {
            warn!(error = %e, "failed to send QUIT");
        }
        self.teardown();
    }

    /// Close the transport (at most once) and reset the session state.
    fn teardown(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.close() {
                warn!(error = %e, "error closing transport");
            }
            info!(server = ?self.server, "disconnected");
        }
        self.server = None;
        self.nick = None;
        self.recv.clear();
    }

    pub fn state(&self) -> ConnectionState {
        if self.stream.is_some() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// The sanitized host of the current session.
    pub fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }

    /// The nickname sent by the last successful NICK.
    pub fn nick(&self) -> Option<&str> {
        self.nick.as_deref()
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Bytes received but not yet returned as a line.
    pub fn buffered(&self) -> usize {
        self.recv.len()
    }

    // =========================================================================
    // Outbound
    // =========================================================================

    /// Send raw text as one or more commands, one per LF-separated segment.
    ///
    /// Empty segments are skipped and the rest go out CRLF-terminated in a
    /// single write. A write failure disconnects before the error is returned.
    pub fn quote(&mut self, raw: &str) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(ConnectionError::NotConnected)?;

        let frame = frame_commands(raw, self.encoding);
        if frame.is_empty() {
            return Ok(());
        }

        debug!(frame = %String::from_utf8_lossy(&frame).trim_end(), "sending");
        if let Err(e) = stream.send_all(&frame) {
            warn!(error = %e, "write failed, disconnecting");
            self.teardown();
            return Err(e.into());
        }
        Ok(())
    }

    /// Send one command.
    pub fn send(&mut self, command: &Command) -> Result<()> {
        self.quote(&command.to_string())
    }

    /// `PASS`: the server password, sent before [`set_nick`](Self::set_nick).
    pub fn set_pass(&mut self, password: &str) -> Result<()> {
        self.send(&Command::PASS(password.to_owned()))
    }

    /// `NICK`: request a nickname. Remembered once the send succeeds.
    pub fn set_nick(&mut self, nick: &str) -> Result<()> {
        let nick = strip_token(nick);
        self.send(&Command::NICK(nick.clone()))?;
        self.nick = Some(nick);
        Ok(())
    }

    /// `USER`: register the ident and real name.
    ///
    /// `ident` defaults to the current nickname and `realname` to the ident.
    pub fn set_user(&mut self, ident: Option<&str>, realname: Option<&str>) -> Result<()> {
        let ident = ident
            .map(str::to_owned)
            .or_else(|| self.nick.clone())
            .unwrap_or_default();
        let realname = realname.map_or_else(|| ident.clone(), str::to_owned);
        let server = self.server.clone().unwrap_or_default();
        self.send(&Command::USER(ident, server, realname))
    }

    pub fn join(&mut self, channel: &str, key: Option<&str>) -> Result<()> {
        self.send(&Command::JOIN(channel.to_owned(), key.map(str::to_owned)))
    }

    pub fn part(&mut self, channel: &str, reason: Option<&str>) -> Result<()> {
        self.send(&Command::PART(channel.to_owned(), reason.map(str::to_owned)))
    }

    /// `PRIVMSG`: one message per line of `text`.
    pub fn say(&mut self, target: &str, text: &str) -> Result<()> {
        for line in text.split('\n') {
            self.send(&Command::PRIVMSG(target.to_owned(), line.to_owned()))?;
        }
        Ok(())
    }

    /// CTCP ACTION (`/me`): one action per line of `text`.
    pub fn me(&mut self, target: &str, text: &str) -> Result<()> {
        for line in text.split('\n') {
            self.send(&Command::PRIVMSG(target.to_owned(), ctcp::action(line)))?;
        }
        Ok(())
    }

    /// `NOTICE`: one notice per line of `text`; an empty line or no text at
    /// all sends a bare `NOTICE <target>`.
    pub fn notice(&mut self, target: &str, text: Option<&str>) -> Result<()> {
        let Some(text) = text else {
            return self.send(&Command::NOTICE(target.to_owned(), None));
        };
        for line in text.split('\n') {
            let line = Some(line.to_owned()).filter(|l| !l.is_empty());
            self.send(&Command::NOTICE(target.to_owned(), line))?;
        }
        Ok(())
    }

    /// `MODE`: query (`modes == None`) or change a channel or user mode.
    pub fn mode(&mut self, target: &str, modes: Option<&str>) -> Result<()> {
        self.send(&Command::MODE(target.to_owned(), modes.map(str::to_owned)))
    }

    pub fn kick(&mut self, channel: &str, nick: &str, reason: Option<&str>) -> Result<()> {
        self.send(&Command::KICK(
            channel.to_owned(),
            nick.to_owned(),
            reason.map(str::to_owned),
        ))
    }

    /// `AWAY`: set an away message, or clear it with `None`.
    pub fn away(&mut self, message: Option<&str>) -> Result<()> {
        self.send(&Command::AWAY(message.map(str::to_owned)))
    }

    pub fn invite(&mut self, nick: &str, channel: &str) -> Result<()> {
        self.send(&Command::INVITE(nick.to_owned(), channel.to_owned()))
    }

    /// `TOPIC`: query (`topic == None`) or set a channel topic.
    pub fn topic(&mut self, channel: &str, topic: Option<&str>) -> Result<()> {
        self.send(&Command::TOPIC(channel.to_owned(), topic.map(str::to_owned)))
    }

    // =========================================================================
    // Inbound
    // =========================================================================

    /// Perform one transport read into the line buffer.
    ///
    /// Returns `Ok(false)` when a non-blocking read found nothing ready.
    fn fill(&mut self, mode: ReadMode) -> Result<bool> {
        let stream = self.stream.as_mut().ok_or(ConnectionError::NotConnected)?;

        self.scratch.resize(self.config.chunk_size(), 0);
        match stream.receive(&mut self.scratch, mode) {
            Ok(0) => {
                info!("connection closed by peer");
                self.quit(Some("Connection reset by peer."));
                Err(ConnectionError::TransportClosed)
            }
            Ok(n) => {
                self.recv.extend(&self.scratch[..n]);
                if let Some(actual) = self.recv.overflow() {
                    let limit = self.recv.max_line_len();
                    warn!(actual, limit, "line exceeds limit, disconnecting");
                    self.quit(Some("Line too long."));
                    return Err(ConnectionError::LineTooLong { actual, limit });
                }
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock && !mode.is_blocking() => {
                Ok(false)
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => Ok(true),
            Err(e) => {
                warn!(error = %e, "read failed, disconnecting");
                self.quit(Some("Network error."));
                Err(e.into())
            }
        }
    }

    /// Receive the next complete line.
    ///
    /// Reads from the transport only while no complete line is buffered. In
    /// [`ReadMode::NonBlocking`], `Ok(None)` means no full line has arrived
    /// yet. A closed stream yields [`ConnectionError::TransportClosed`], more
    /// than [`ConnectionConfig::max_line_len`] bytes without a newline yield
    /// [`ConnectionError::LineTooLong`], and any other transport failure
    /// [`ConnectionError::Transport`]. All of them leave the connection
    /// disconnected.
    pub fn recv_line(&mut self, mode: ReadMode) -> Result<Option<String>> {
        while !self.recv.has_line() {
            if !self.fill(mode)? {
                return Ok(None);
            }
        }

        let line = self.recv.next_line();
        if let Some(line) = &line {
            debug!(line = %line, "received");
        }
        Ok(line)
    }

    /// Receive and parse the next line.
    ///
    /// `Ok(None)` means either that no line is ready yet (non-blocking) or
    /// that the line was blank. Server PINGs and CTCP PINGs are answered
    /// before the event is returned; see [`parse_line`](Self::parse_line).
    pub fn parse(&mut self, mode: ReadMode) -> Result<Option<ProtocolEvent>> {
        match self.recv_line(mode)? {
            Some(line) => Ok(self.parse_line(&line)),
            None => Ok(None),
        }
    }

    /// Parse a line obtained elsewhere (e.g. from [`recv_line`](Self::recv_line)),
    /// sending the automatic replies it calls for.
    ///
    /// A `PING` line is answered with `PONG` and a CTCP PING in a PRIVMSG is
    /// echoed back as a NOTICE to the sender. If sending the reply fails the
    /// connection is torn down as usual, but the event is still returned; the
    /// next call then reports [`ConnectionError::NotConnected`].
    pub fn parse_line(&mut self, line: &str) -> Option<ProtocolEvent> {
        let (event, reply) = parse_with_reply(line)?;
        if let Some(reply) = reply {
            if let Err(e) = self.send(&reply) {
                warn!(error = %e, command = reply.name(), "automatic reply failed");
            }
        }
        Some(event)
    }
}

impl<C: Connector> Drop for Connection<C> {
    fn drop(&mut self) {
        if self.is_connected() {
            self.quit(None);
        }
    }
}

impl<C: Connector> std::fmt::Debug for Connection<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("state", &self.state())
            .field("server", &self.server)
            .field("nick", &self.nick)
            .field("buffered", &self.recv.len())
            .finish()
    }
}

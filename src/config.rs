//! Connection configuration.

use std::time::Duration;

use encoding::Encoding;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ConnectionError, Result};

/// Default number of bytes requested per transport read.
pub const DEFAULT_READ_CHUNK_SIZE: usize = 1024;

/// Default socket timeout for connecting, reading and writing.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Default character encoding label.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Default cap on buffered bytes without a line terminator.
pub const DEFAULT_MAX_LINE_LEN: usize = 8191;

/// Settings applied when a [`Connection`](crate::Connection) opens its transport.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use slirc_line::ConnectionConfig;
///
/// let config = ConnectionConfig::default()
///     .with_timeout(Some(Duration::from_secs(60)))
///     .with_encoding("latin1");
/// assert_eq!(config.read_chunk_size, 1024);
/// assert!(config.resolve_encoding().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConnectionConfig {
    /// Maximum bytes requested from the transport per read. Values below 1
    /// are treated as 1.
    pub read_chunk_size: usize,
    /// Connect, read and write timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Enable TCP keepalive probes on the socket.
    pub tcp_keepalive: bool,
    /// WHATWG label of the encoding used on the wire.
    pub encoding: String,
    /// Most bytes the receive buffer may hold without a newline before the
    /// connection is dropped. Values below 1 are treated as 1.
    pub max_line_len: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
            timeout: Some(DEFAULT_TIMEOUT),
            tcp_keepalive: true,
            encoding: DEFAULT_ENCODING.to_owned(),
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }
}

impl ConnectionConfig {
    /// Set the per-read chunk size.
    #[must_use]
    pub fn with_read_chunk_size(mut self, size: usize) -> Self {
        self.read_chunk_size = size;
        self
    }

    /// Set the socket timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable TCP keepalive.
    #[must_use]
    pub fn with_tcp_keepalive(mut self, enabled: bool) -> Self {
        self.tcp_keepalive = enabled;
        self
    }

    /// Set the wire encoding by label (`"utf-8"`, `"latin1"`, `"iso-2022-jp"`, ...).
    #[must_use]
    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = label.into();
        self
    }

    /// Set the receive limit for a single unterminated line.
    #[must_use]
    pub fn with_max_line_len(mut self, limit: usize) -> Self {
        self.max_line_len = limit;
        self
    }

    /// Look up the configured encoding.
    ///
    /// Encodings that cannot be written back in the same encoding (UTF-16 and
    /// `replacement`) are rejected, since framing works on raw `\r` and `\n`
    /// bytes in both directions.
    pub fn resolve_encoding(&self) -> Result<&'static Encoding> {
        let encoding = Encoding::for_label(self.encoding.trim().as_bytes())
            .ok_or_else(|| ConnectionError::UnknownEncoding(self.encoding.clone()))?;
        if encoding.output_encoding() != encoding {
            return Err(ConnectionError::UnsupportedEncoding(encoding.name().to_owned()));
        }
        Ok(encoding)
    }

    /// The read chunk size, never zero.
    pub(crate) fn chunk_size(&self) -> usize {
        self.read_chunk_size.max(1)
    }

    /// The line limit, never zero.
    pub(crate) fn line_limit(&self) -> usize {
        self.max_line_len.max(1)
    }
}

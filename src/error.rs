//! Error types for the IRC connection engine.
//!
//! Only transport-level and usage failures are errors. A line that does not
//! match the IRC grammar is never an error: the parser turns it into
//! [`ProtocolEvent::Fallback`](crate::ProtocolEvent::Fallback) instead, and a
//! non-blocking read that finds no data yields `Ok(None)`.

use thiserror::Error;

/// Convenience type alias for Results using [`ConnectionError`].
pub type Result<T, E = ConnectionError> = std::result::Result<T, E>;

/// Errors surfaced by [`Connection`](crate::Connection).
///
/// Every variant that stems from the transport is raised only after the
/// connection has been torn down, so the connection is always left in the
/// `Disconnected` state and may be connected again.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConnectionError {
    /// An operation needing a live transport was attempted while disconnected.
    #[error("not connected")]
    NotConnected,

    /// The peer closed the stream (a zero-length read).
    #[error("connection closed by peer")]
    TransportClosed,

    /// Any other I/O failure while connecting, reading or writing.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// The peer sent more than the configured limit without a line
    /// terminator.
    #[error("line too long: {actual} bytes without a newline (limit {limit})")]
    LineTooLong { actual: usize, limit: usize },

    /// The configured character encoding label is not recognized.
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),

    /// The encoding is known but cannot be written back as itself
    /// (UTF-16, `replacement`), so it cannot frame IRC lines.
    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),
}

impl ConnectionError {
    /// Returns true if this error ended (or found no) live session.
    ///
    /// Callers driving a receive loop use this to decide whether to reconnect.
    pub fn is_disconnect(&self) -> bool {
        matches!(
            self,
            ConnectionError::NotConnected
                | ConnectionError::TransportClosed
                | ConnectionError::Transport(_)
                | ConnectionError::LineTooLong { .. }
        )
    }
}

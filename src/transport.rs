//! The byte-stream boundary of the engine.
//!
//! [`Connection`](crate::Connection) never touches sockets directly. It asks a
//! [`Connector`] for a [`Transport`] and then only sends whole frames and
//! receives chunks through it. [`TcpConnector`] is the production
//! implementation; tests plug in scripted in-memory ones.

use std::io;

use crate::config::ConnectionConfig;

mod tcp;

pub use self::tcp::{TcpConnector, TcpTransport};

/// Whether a receive call may wait for data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReadMode {
    /// Wait until data arrives, the peer closes, or the timeout expires.
    #[default]
    Blocking,
    /// Return [`io::ErrorKind::WouldBlock`] immediately when no data is ready.
    NonBlocking,
}

impl ReadMode {
    /// Returns true for [`ReadMode::Blocking`].
    pub fn is_blocking(self) -> bool {
        self == ReadMode::Blocking
    }
}

/// An exclusively owned duplex byte stream.
pub trait Transport {
    /// Write the whole buffer, blocking until it is sent or fails.
    fn send_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Read up to `buf.len()` bytes.
    ///
    /// `Ok(0)` means the peer closed the stream. In
    /// [`ReadMode::NonBlocking`], an error of kind
    /// [`io::ErrorKind::WouldBlock`] means no data is ready yet.
    fn receive(&mut self, buf: &mut [u8], mode: ReadMode) -> io::Result<usize>;

    /// Release the stream. Called at most once, right before it is dropped.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Opens transports to a host and port.
pub trait Connector {
    /// The transport this connector produces.
    type Stream: Transport;

    /// Open a new transport. No retry is attempted on failure.
    fn connect(&mut self, host: &str, port: u16, config: &ConnectionConfig)
        -> io::Result<Self::Stream>;
}

//! Plain TCP transport.

use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use socket2::{Domain, Protocol, SockAddr, Socket, TcpKeepalive, Type};
use tracing::{debug, trace, warn};

use crate::config::ConnectionConfig;

use super::{Connector, ReadMode, Transport};

/// Opens [`TcpTransport`]s, trying every resolved address in turn.
#[derive(Clone, Copy, Debug, Default)]
pub struct TcpConnector;

impl TcpConnector {
    fn open(addr: SocketAddr, config: &ConnectionConfig) -> io::Result<TcpStream> {
        let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;

        if config.tcp_keepalive {
            if let Err(e) = Self::enable_keepalive(&socket) {
                warn!("failed to enable TCP keepalive: {}", e);
            }
        }

        let target = SockAddr::from(addr);
        match config.timeout {
            Some(timeout) => socket.connect_timeout(&target, timeout)?,
            None => socket.connect(&target)?,
        }
        socket.set_read_timeout(config.timeout)?;
        socket.set_write_timeout(config.timeout)?;

        Ok(socket.into())
    }

    fn enable_keepalive(socket: &Socket) -> io::Result<()> {
        let keepalive = TcpKeepalive::new()
            .with_time(Duration::from_secs(120))
            .with_interval(Duration::from_secs(30));

        socket.set_tcp_keepalive(&keepalive)
    }
}

impl Connector for TcpConnector {
    type Stream = TcpTransport;

    fn connect(
        &mut self,
        host: &str,
        port: u16,
        config: &ConnectionConfig,
    ) -> io::Result<TcpTransport> {
        let mut last_err = None;

        for addr in (host, port).to_socket_addrs()? {
            match Self::open(addr, config) {
                Ok(stream) => {
                    debug!(%addr, "tcp connection established");
                    return Ok(TcpTransport::new(stream));
                }
                Err(e) => {
                    debug!(%addr, error = %e, "tcp connect attempt failed");
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no addresses resolved for {host}:{port}"),
            )
        }))
    }
}

/// A connected TCP stream that switches between blocking and non-blocking
/// reads on demand.
#[derive(Debug)]
pub struct TcpTransport {
    stream: TcpStream,
    nonblocking: bool,
}

impl TcpTransport {
    /// Wrap an already connected stream.
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream,
            nonblocking: false,
        }
    }

    /// The remote address of the stream.
    pub fn peer_addr(&self) -> io::Result<SocketAddr> {
        self.stream.peer_addr()
    }

    fn set_mode(&mut self, mode: ReadMode) -> io::Result<()> {
        let nonblocking = !mode.is_blocking();
        if self.nonblocking != nonblocking {
            self.stream.set_nonblocking(nonblocking)?;
            self.nonblocking = nonblocking;
        }
        Ok(())
    }
}

impl Transport for TcpTransport {
    fn send_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.set_mode(ReadMode::Blocking)?;
        self.stream.write_all(bytes)?;
        self.stream.flush()
    }

    fn receive(&mut self, buf: &mut [u8], mode: ReadMode) -> io::Result<usize> {
        self.set_mode(mode)?;
        match self.stream.read(buf) {
            Ok(n) => {
                trace!(bytes = n, "tcp read");
                Ok(n)
            }
            // A blocking socket reports an expired read timeout as WouldBlock
            // on Unix; that is a failure, not an empty poll.
            Err(e) if mode.is_blocking() && e.kind() == io::ErrorKind::WouldBlock => Err(
                io::Error::new(io::ErrorKind::TimedOut, "read timed out"),
            ),
            Err(e) => Err(e),
        }
    }

    fn close(&mut self) -> io::Result<()> {
        match self.stream.shutdown(Shutdown::Both) {
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            other => other,
        }
    }
}

//! Scripted in-memory transport shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use slirc_line::{Connection, ConnectionConfig, Connector, ReadMode, Transport};

/// One scripted outcome of a transport read.
#[derive(Debug, Clone)]
pub enum Step {
    Data(Vec<u8>),
    WouldBlock,
    Eof,
    Fail(io::ErrorKind),
}

#[derive(Debug, Default)]
pub struct Wire {
    pub reads: VecDeque<Step>,
    pub writes: Vec<Vec<u8>>,
    pub connects: Vec<(String, u16)>,
    pub closes: usize,
    pub fail_writes: bool,
    pub fail_connect: bool,
}

/// Shared handle to the scripted wire; clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct Script(Rc<RefCell<Wire>>);

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&self, bytes: &[u8]) {
        self.push(Step::Data(bytes.to_vec()));
    }

    pub fn push(&self, step: Step) {
        self.0.borrow_mut().reads.push_back(step);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.0.borrow_mut().fail_writes = fail;
    }

    pub fn fail_connect(&self, fail: bool) {
        self.0.borrow_mut().fail_connect = fail;
    }

    /// Every `send_all` payload, in order.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.0.borrow().writes.clone()
    }

    /// Every CRLF-terminated command sent so far, without terminators.
    pub fn sent_lines(&self) -> Vec<String> {
        self.0
            .borrow()
            .writes
            .iter()
            .flat_map(|w| {
                let text = String::from_utf8_lossy(w).into_owned();
                text.split("\r\n")
                    .filter(|l| !l.is_empty())
                    .map(str::to_owned)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    pub fn clear_writes(&self) {
        self.0.borrow_mut().writes.clear();
    }

    pub fn closes(&self) -> usize {
        self.0.borrow().closes
    }

    pub fn connects(&self) -> Vec<(String, u16)> {
        self.0.borrow().connects.clone()
    }

    pub fn connection(&self) -> Connection<ScriptedConnector> {
        self.connection_with(ConnectionConfig::default())
    }

    pub fn connection_with(&self, config: ConnectionConfig) -> Connection<ScriptedConnector> {
        Connection::with_connector(ScriptedConnector(self.clone()), config)
            .expect("valid config")
    }

    /// A connection that is already connected to `irc.example.org:6667`.
    pub fn connected(&self) -> Connection<ScriptedConnector> {
        let mut conn = self.connection();
        conn.connect("irc.example.org", 6667).expect("scripted connect");
        conn
    }
}

pub struct ScriptedConnector(pub Script);

impl Connector for ScriptedConnector {
    type Stream = ScriptedTransport;

    fn connect(
        &mut self,
        host: &str,
        port: u16,
        _config: &ConnectionConfig,
    ) -> io::Result<ScriptedTransport> {
        let mut wire = (self.0).0.borrow_mut();
        if wire.fail_connect {
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        }
        wire.connects.push((host.to_owned(), port));
        Ok(ScriptedTransport(self.0.clone()))
    }
}

pub struct ScriptedTransport(Script);

impl Transport for ScriptedTransport {
    fn send_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut wire = (self.0).0.borrow_mut();
        if wire.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"));
        }
        wire.writes.push(bytes.to_vec());
        Ok(())
    }

    fn receive(&mut self, buf: &mut [u8], mode: ReadMode) -> io::Result<usize> {
        let mut wire = (self.0).0.borrow_mut();
        match wire.reads.pop_front() {
            Some(Step::Data(data)) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                if n < data.len() {
                    wire.reads.push_front(Step::Data(data[n..].to_vec()));
                }
                Ok(n)
            }
            Some(Step::WouldBlock) => Err(io::ErrorKind::WouldBlock.into()),
            Some(Step::Eof) => Ok(0),
            Some(Step::Fail(kind)) => Err(kind.into()),
            None if mode == ReadMode::NonBlocking => Err(io::ErrorKind::WouldBlock.into()),
            None => Ok(0),
        }
    }

    fn close(&mut self) -> io::Result<()> {
        (self.0).0.borrow_mut().closes += 1;
        Ok(())
    }
}

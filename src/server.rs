//! # Memory Page Server
//!
//! Serves an inclusive range of 256-byte pages over UDP. Pages start zeroed
//! and live only as long as the server does.
//!
//! - ReadRequest for a page in range: reply with a ReadResponse
//! - WriteRequest for a page in range: store the byte, no reply
//! - anything else (pages out of range, responses, malformed datagrams): dropped
//!   without a reply
//!
//! The server is a single synchronous loop and owns its pages outright.

use std::convert::Infallible;
use std::io;
use std::net::{SocketAddr, UdpSocket};

use log::{debug, info, warn};

use crate::memory::PAGE_SIZE;
use crate::protocol::{Message, Page};
use crate::ConfigError;

/// Port the server binds by default.
pub const DEFAULT_SERVER_PORT: u16 = 6503;

/// Receive buffer size; larger than any valid request.
const RECV_BUFFER_LEN: usize = 512;

/// Settings for a [`PageServer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address the server socket binds.
    pub bind: SocketAddr,
    /// First page served (inclusive).
    pub start_page: u8,
    /// Last page served (inclusive).
    pub stop_page: u8,
}

impl Default for ServerConfig {
    /// Serves every page except the zero page, which clients keep locally.
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], DEFAULT_SERVER_PORT)),
            start_page: 1,
            stop_page: 255,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_page_range(self.start_page, self.stop_page)
    }
}

fn check_page_range(start: u8, stop: u8) -> Result<(), ConfigError> {
    if start > stop {
        return Err(ConfigError::InvalidPageRange { start, stop });
    }
    Ok(())
}

/// The page store and request handler.
///
/// # Examples
///
/// ```
/// use six502::protocol::Message;
/// use six502::PageServer;
///
/// let mut server = PageServer::new(1, 4).unwrap();
///
/// let write = Message::WriteRequest { pageno: 2, offset: 0x10, value: 0x99 };
/// assert_eq!(server.handle(write), None);
///
/// match server.handle(Message::ReadRequest { pageno: 2 }) {
///     Some(Message::ReadResponse(page)) => assert_eq!(page.data[0x10], 0x99),
///     other => panic!("unexpected reply {:?}", other),
/// }
///
/// // Out of range: silently ignored
/// assert_eq!(server.handle(Message::ReadRequest { pageno: 9 }), None);
/// ```
#[derive(Debug, Clone)]
pub struct PageServer {
    start_page: u8,
    stop_page: u8,
    pages: Vec<[u8; PAGE_SIZE]>,
}

impl PageServer {
    /// Creates a server owning pages `start_page..=stop_page`, all zeroed.
    pub fn new(start_page: u8, stop_page: u8) -> Result<Self, ConfigError> {
        check_page_range(start_page, stop_page)?;
        let count = (stop_page - start_page) as usize + 1;
        Ok(Self {
            start_page,
            stop_page,
            pages: vec![[0; PAGE_SIZE]; count],
        })
    }

    /// Validates `config` and creates the server it describes.
    pub fn from_config(config: &ServerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::new(config.start_page, config.stop_page)
    }

    /// Returns true if `pageno` is served here.
    pub fn contains(&self, pageno: u8) -> bool {
        (self.start_page..=self.stop_page).contains(&pageno)
    }

    /// Current contents of a served page.
    pub fn page(&self, pageno: u8) -> Option<&[u8; PAGE_SIZE]> {
        if !self.contains(pageno) {
            return None;
        }
        self.pages.get((pageno - self.start_page) as usize)
    }

    fn page_mut(&mut self, pageno: u8) -> Option<&mut [u8; PAGE_SIZE]> {
        if !self.contains(pageno) {
            return None;
        }
        self.pages.get_mut((pageno - self.start_page) as usize)
    }

    /// Applies one request and returns the reply, if any.
    pub fn handle(&mut self, message: Message) -> Option<Message> {
        match message {
            Message::ReadRequest { pageno } => {
                let data = self.page(pageno)?;
                Some(Message::ReadResponse(Page {
                    pageno,
                    data: *data,
                }))
            }
            Message::WriteRequest {
                pageno,
                offset,
                value,
            } => {
                if let Some(page) = self.page_mut(pageno) {
                    page[offset as usize] = value;
                }
                None
            }
            Message::ReadResponse(_) => None,
        }
    }

    /// Decodes a datagram, applies it, and returns the encoded reply, if any.
    pub fn handle_datagram(&mut self, bytes: &[u8]) -> Option<Vec<u8>> {
        match Message::decode(bytes) {
            Ok(message) => self.handle(message).map(|reply| reply.encode()),
            Err(e) => {
                debug!("dropping malformed datagram: {}", e);
                None
            }
        }
    }

    /// Receives one datagram on `socket` and answers it.
    pub fn serve_once(&mut self, socket: &UdpSocket) -> io::Result<()> {
        let mut buf = [0u8; RECV_BUFFER_LEN];
        let (len, peer) = socket.recv_from(&mut buf)?;
        if let Some(reply) = self.handle_datagram(&buf[..len]) {
            socket.send_to(&reply, peer)?;
        }
        Ok(())
    }

    /// Answers requests on `socket` forever.
    ///
    /// Transient errors (a client port that went away, an interrupted call)
    /// are logged and skipped; any other socket error ends the loop.
    pub fn serve(&mut self, socket: &UdpSocket) -> io::Result<Infallible> {
        info!(
            "serving pages 0x{:02X}..=0x{:02X} on {}",
            self.start_page,
            self.stop_page,
            socket.local_addr()?
        );
        loop {
            match self.serve_once(socket) {
                Ok(()) => {}
                Err(e) if is_transient(&e) => warn!("ignoring socket error: {}", e),
                Err(e) => return Err(e),
            }
        }
    }
}

pub(crate) fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::Interrupted
    )
}

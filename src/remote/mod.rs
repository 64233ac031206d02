//! # Remote Memory Client
//!
//! A [`MemoryBus`] whose bytes live on a [`crate::PageServer`].
//!
//! ## Caching
//!
//! - The zero page is mirrored locally and starts zeroed. Zero-page reads never
//!   touch the network.
//! - One other page is cached at a time. Reading an address on a different
//!   page fetches that page and replaces the cache.
//!
//! ## Writes
//!
//! Every write is sent to the server as a WriteRequest without waiting for
//! confirmation. Writes to the zero page also update the local mirror. Writes
//! to other pages do **not** update the cached page: reading the same address
//! while its page is still cached returns the value from before the write.
//! Moving to another page and back picks up the server's copy.

mod listener;
mod queue;

pub use queue::ResponseQueue;

use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use log::{debug, info};

use crate::memory::{split_address, MemoryBus, MemoryError, PAGE_SIZE};
use crate::protocol::{Message, Page};
use crate::server::DEFAULT_SERVER_PORT;
use listener::Listener;

/// Capacity of the response queue between the listener and the caller.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Settings for a [`RemoteMemory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Local address the client socket binds; port 0 picks a free port.
    pub listen: SocketAddr,
    /// Address of the page server.
    pub remote: SocketAddr,
    /// Bound on responses buffered between the listener and the caller, and
    /// separately on responses requeued while waiting for another page.
    pub queue_capacity: usize,
    /// Give up on a page fetch after this long. `None` waits forever.
    pub response_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 0)),
            remote: SocketAddr::from(([127, 0, 0, 1], DEFAULT_SERVER_PORT)),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            response_timeout: None,
        }
    }
}

/// Paged memory backed by a remote [`crate::PageServer`].
///
/// # Examples
///
/// ```no_run
/// use six502::{ClientConfig, CPU, RemoteMemory};
///
/// let memory = RemoteMemory::connect(&ClientConfig::default())?;
/// let mut cpu = CPU::new(memory);
/// cpu.reset()?;
/// cpu.run_for(1_000)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct RemoteMemory {
    socket: UdpSocket,
    remote: SocketAddr,
    zero_page: [u8; PAGE_SIZE],
    current_page: Option<Page>,
    // Dropped before the listener so a listener blocked on a full queue wakes up
    responses: ResponseQueue,
    _listener: Listener,
}

impl RemoteMemory {
    /// Binds `config.listen` and talks to `config.remote`.
    pub fn connect(config: &ClientConfig) -> Result<Self, MemoryError> {
        let socket = UdpSocket::bind(config.listen)?;
        Self::with_socket(socket, config)
    }

    /// Uses an already bound socket. `config.listen` is ignored.
    pub fn with_socket(socket: UdpSocket, config: &ClientConfig) -> Result<Self, MemoryError> {
        let (tx, responses) = queue::bounded(config.queue_capacity, config.response_timeout);
        let listener = Listener::spawn(&socket, tx)?;
        info!(
            "remote memory on {} using server {}",
            socket.local_addr()?,
            config.remote
        );

        Ok(Self {
            socket,
            remote: config.remote,
            zero_page: [0; PAGE_SIZE],
            current_page: None,
            responses,
            _listener: listener,
        })
    }

    /// Address the client socket is bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    fn send(&self, message: Message) -> Result<(), MemoryError> {
        self.socket.send_to(&message.encode(), self.remote)?;
        Ok(())
    }

    /// Requests `pageno` from the server and blocks until it arrives.
    pub fn get_page(&mut self, pageno: u8) -> Result<Page, MemoryError> {
        debug!("fetching page 0x{:02X}", pageno);
        self.responses.discard(pageno);
        self.send(Message::ReadRequest { pageno })?;
        self.responses.wait_for(pageno)
    }

    /// Reads one byte, fetching its page if it is not the cached one.
    pub fn get_addr(&mut self, addr: u16) -> Result<u8, MemoryError> {
        let (pageno, offset) = split_address(addr);
        if pageno == 0 {
            return Ok(self.zero_page[offset as usize]);
        }

        if let Some(page) = &self.current_page {
            if page.pageno == pageno {
                return Ok(page.data[offset as usize]);
            }
        }

        let page = self.get_page(pageno)?;
        let value = page.data[offset as usize];
        if let Some(old) = self.current_page.replace(page) {
            debug!("page 0x{:02X} replaces cached page 0x{:02X}", pageno, old.pageno);
        }
        Ok(value)
    }

    /// Writes one byte: mirrored locally for the zero page, sent to the server
    /// for every page.
    pub fn set_addr(&mut self, addr: u16, value: u8) -> Result<(), MemoryError> {
        let (pageno, offset) = split_address(addr);
        if pageno == 0 {
            self.zero_page[offset as usize] = value;
        }
        self.send(Message::WriteRequest {
            pageno,
            offset,
            value,
        })
    }

    /// Number of the cached non-zero page, if any.
    pub fn cached_page(&self) -> Option<u8> {
        self.current_page.as_ref().map(|page| page.pageno)
    }

    /// Number of responses for other pages held for a later fetch.
    pub fn requeued(&self) -> usize {
        self.responses.backlog_len()
    }

    /// The local zero-page mirror.
    pub fn zero_page(&self) -> &[u8; PAGE_SIZE] {
        &self.zero_page
    }
}

impl MemoryBus for RemoteMemory {
    fn read(&mut self, addr: u16) -> Result<u8, MemoryError> {
        self.get_addr(addr)
    }

    fn write(&mut self, addr: u16, value: u8) -> Result<(), MemoryError> {
        self.set_addr(addr, value)
    }
}

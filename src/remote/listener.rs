//! Background receiver for [`super::RemoteMemory`].
//!
//! Decodes every datagram arriving on the client socket and forwards page
//! responses to the response queue, blocking while the queue is full. Anything
//! that does not decode as a page response is dropped.

use std::io;
use std::net::UdpSocket;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::SyncSender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, trace, warn};

use crate::protocol::{Message, Page, MAX_MESSAGE_LEN};
use crate::server::is_transient;

/// How often the listener wakes up to check for shutdown.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Handle to the listener thread. Dropping it stops and joins the thread.
pub(crate) struct Listener {
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Listener {
    /// Starts listening on a clone of `socket`.
    pub(crate) fn spawn(socket: &UdpSocket, tx: SyncSender<Page>) -> io::Result<Self> {
        let socket = socket.try_clone()?;
        socket.set_read_timeout(Some(POLL_INTERVAL))?;

        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);
        let handle = thread::Builder::new()
            .name("six502-listener".to_string())
            .spawn(move || listen(socket, tx, flag))?;

        Ok(Self {
            shutdown,
            handle: Some(handle),
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("response listener panicked");
            }
        }
    }
}

fn listen(socket: UdpSocket, tx: SyncSender<Page>, shutdown: Arc<AtomicBool>) {
    // Room for one byte more than the largest message so oversized datagrams
    // are seen as malformed instead of silently truncated to a valid length.
    let mut buf = [0u8; MAX_MESSAGE_LEN + 1];

    while !shutdown.load(Ordering::Relaxed) {
        let (len, peer) = match socket.recv_from(&mut buf) {
            Ok(received) => received,
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                continue
            }
            Err(e) if is_transient(&e) => {
                warn!("response listener ignoring socket error: {}", e);
                continue;
            }
            Err(e) => {
                warn!("response listener stopping: {}", e);
                return;
            }
        };

        match Message::decode(&buf[..len]) {
            Ok(Message::ReadResponse(page)) => {
                trace!("response for page 0x{:02X} from {}", page.pageno, peer);
                if tx.send(page).is_err() {
                    // The client is gone
                    return;
                }
            }
            Ok(other) => debug!("ignoring unexpected message from {}: {:?}", peer, other),
            Err(e) => debug!("dropping malformed datagram from {}: {}", peer, e),
        }
    }
}

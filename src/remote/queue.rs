//! Response correlation for [`super::RemoteMemory`].
//!
//! The listener thread pushes every page response it receives into a bounded
//! channel; the foreground caller waits for the one page it asked for. Pages
//! that arrive while waiting for a different page are requeued behind
//! whatever the listener has already delivered, in a backlog owned by the
//! caller. The backlog holds at most `capacity` pages; when it is full the
//! oldest entry is dropped.
//!
//! There is no retry and no request id. Before a page is requested again,
//! [`ResponseQueue::discard`] drops any response for it that is already
//! queued, so a reply to a fetch that timed out is never taken for the answer
//! to the new request. A late reply still in flight on the network when the
//! new request goes out cannot be told apart from the real one.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender, TryRecvError};
use std::time::{Duration, Instant};

use log::debug;

use crate::memory::MemoryError;
use crate::protocol::Page;

/// Creates the listener's sending half and the caller's queue.
pub(crate) fn bounded(
    capacity: usize,
    timeout: Option<Duration>,
) -> (SyncSender<Page>, ResponseQueue) {
    let (tx, rx) = mpsc::sync_channel(capacity);
    let queue = ResponseQueue {
        rx,
        backlog: VecDeque::with_capacity(capacity),
        capacity,
        timeout,
    };
    (tx, queue)
}

/// The receiving side of the response channel plus the requeue backlog.
pub struct ResponseQueue {
    rx: Receiver<Page>,
    backlog: VecDeque<Page>,
    capacity: usize,
    timeout: Option<Duration>,
}

impl ResponseQueue {
    /// Drops every queued response for `pageno`.
    ///
    /// Call before sending a new request for the page.
    pub fn discard(&mut self, pageno: u8) {
        while let Ok(page) = self.rx.try_recv() {
            self.requeue(page);
        }

        let before = self.backlog.len();
        self.backlog.retain(|page| page.pageno != pageno);
        let dropped = before - self.backlog.len();
        if dropped > 0 {
            debug!(
                "discarding {} stale response(s) for page 0x{:02X}",
                dropped, pageno
            );
        }
    }

    /// Blocks until a response for `pageno` is available.
    ///
    /// Responses the listener has already delivered are scanned first, then
    /// the backlog, oldest first. Responses for other pages are requeued in
    /// arrival order.
    pub fn wait_for(&mut self, pageno: u8) -> Result<Page, MemoryError> {
        loop {
            match self.rx.try_recv() {
                Ok(page) if page.pageno == pageno => return Ok(page),
                Ok(page) => self.requeue(page),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }

        if let Some(index) = self.backlog.iter().position(|page| page.pageno == pageno) {
            if let Some(page) = self.backlog.remove(index) {
                return Ok(page);
            }
        }

        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);
        loop {
            let page = self.next(pageno, deadline)?;
            if page.pageno == pageno {
                return Ok(page);
            }
            debug!(
                "requeueing response for page 0x{:02X} while waiting for 0x{:02X}",
                page.pageno, pageno
            );
            self.requeue(page);
        }
    }

    fn requeue(&mut self, page: Page) {
        self.backlog.push_back(page);
        while self.backlog.len() > self.capacity {
            if let Some(evicted) = self.backlog.pop_front() {
                debug!(
                    "backlog full, dropping response for page 0x{:02X}",
                    evicted.pageno
                );
            }
        }
    }

    fn next(&self, pageno: u8, deadline: Option<Instant>) -> Result<Page, MemoryError> {
        match deadline {
            None => self.rx.recv().map_err(|_| MemoryError::ListenerDisconnected),
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                self.rx.recv_timeout(remaining).map_err(|e| match e {
                    RecvTimeoutError::Timeout => MemoryError::ResponseTimeout { pageno },
                    RecvTimeoutError::Disconnected => MemoryError::ListenerDisconnected,
                })
            }
        }
    }

    /// Number of requeued responses waiting to be claimed.
    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }
}

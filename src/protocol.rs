//! # Page Protocol
//!
//! The datagram format spoken between [`crate::RemoteMemory`] and
//! [`crate::PageServer`]. Every field is a single byte:
//!
//! | message        | layout                                        | size |
//! |----------------|-----------------------------------------------|------|
//! | ReadRequest    | `[0x01][pageno]`                              | 2    |
//! | WriteRequest   | `[0x02][pageno][offset][value]`               | 4    |
//! | ReadResponse   | `[0x0A][pageno][256 data bytes]`              | 258  |
//!
//! Requests flow client to server, responses server to client. Writes are
//! never acknowledged. A datagram with an unknown type byte or the wrong
//! length is a [`ProtocolError`]; receivers drop it.

use thiserror::Error;

use crate::memory::PAGE_SIZE;

/// Type byte of a read request.
pub const OP_READ: u8 = 0x01;

/// Type byte of a write request.
pub const OP_WRITE: u8 = 0x02;

/// Type byte of a read response.
pub const OP_READ_RESPONSE: u8 = 0x0A;

/// Largest datagram the protocol produces.
pub const MAX_MESSAGE_LEN: usize = 2 + PAGE_SIZE;

/// One 256-byte page of the address space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub pageno: u8,
    pub data: [u8; PAGE_SIZE],
}

impl Page {
    /// A zero-filled page.
    pub fn zeroed(pageno: u8) -> Self {
        Self {
            pageno,
            data: [0; PAGE_SIZE],
        }
    }
}

/// A decoded protocol message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    ReadRequest { pageno: u8 },
    WriteRequest { pageno: u8, offset: u8, value: u8 },
    ReadResponse(Page),
}

/// Why a datagram could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("empty datagram")]
    Empty,

    #[error("unknown message type 0x{0:02X}")]
    UnknownMessageType(u8),

    #[error("{kind} must be {expected} bytes, got {actual}")]
    BadLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
}

fn expect_len(kind: &'static str, bytes: &[u8], expected: usize) -> Result<(), ProtocolError> {
    if bytes.len() != expected {
        return Err(ProtocolError::BadLength {
            kind,
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

impl Message {
    /// Serializes the message into its datagram payload.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Message::ReadRequest { pageno } => vec![OP_READ, *pageno],
            Message::WriteRequest {
                pageno,
                offset,
                value,
            } => vec![OP_WRITE, *pageno, *offset, *value],
            Message::ReadResponse(page) => {
                let mut bytes = Vec::with_capacity(MAX_MESSAGE_LEN);
                bytes.push(OP_READ_RESPONSE);
                bytes.push(page.pageno);
                bytes.extend_from_slice(&page.data);
                bytes
            }
        }
    }

    /// Parses a datagram payload.
    ///
    /// ```
    /// use six502::protocol::{Message, ProtocolError};
    ///
    /// assert_eq!(
    ///     Message::decode(&[0x02, 0x10, 0x20, 0xFF]),
    ///     Ok(Message::WriteRequest { pageno: 0x10, offset: 0x20, value: 0xFF })
    /// );
    /// assert_eq!(Message::decode(&[0x07]), Err(ProtocolError::UnknownMessageType(0x07)));
    /// ```
    pub fn decode(bytes: &[u8]) -> Result<Message, ProtocolError> {
        let (&kind, _) = bytes.split_first().ok_or(ProtocolError::Empty)?;
        match kind {
            OP_READ => {
                expect_len("read request", bytes, 2)?;
                Ok(Message::ReadRequest { pageno: bytes[1] })
            }
            OP_WRITE => {
                expect_len("write request", bytes, 4)?;
                Ok(Message::WriteRequest {
                    pageno: bytes[1],
                    offset: bytes[2],
                    value: bytes[3],
                })
            }
            OP_READ_RESPONSE => {
                expect_len("read response", bytes, MAX_MESSAGE_LEN)?;
                let mut page = Page::zeroed(bytes[1]);
                page.data.copy_from_slice(&bytes[2..]);
                Ok(Message::ReadResponse(page))
            }
            other => Err(ProtocolError::UnknownMessageType(other)),
        }
    }
}

//! Frame header
//!
//! ```text
//! ┌──────────┬──────────┬──────────┐
//! │ Cmd (1)  │  Id (2)  │ Len (2)  │
//! └──────────┴──────────┴──────────┘
//! ```
//!
//! All multi-byte fields are big-endian.

use std::fmt;

use bytes::{Buf, BufMut};

use crate::error::{PinwireError, Result};
use super::{Command, StatusCode};

/// Header size: 1 byte command + 2 bytes id + 2 bytes length
pub const HEADER_SIZE: usize = 5;

/// Fixed 5-byte frame header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    /// Raw command byte (kept raw so unknown commands survive decoding)
    pub command: u8,

    /// Message id, 0 means "assign the next one on send"
    pub id: u16,

    /// Body length, or the status code for RESPONSE frames
    pub length: u16,
}

/// Meaning of the length slot, selected by the command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthField {
    /// Byte length of the body that follows
    BodyLen(usize),

    /// Outcome of the request this RESPONSE answers
    Status(StatusCode),
}

impl Header {
    pub fn new(command: Command, id: u16, length: u16) -> Self {
        Self {
            command: command.as_u8(),
            id,
            length,
        }
    }

    /// Known command, `None` for bytes outside the vocabulary
    pub fn command(&self) -> Option<Command> {
        Command::from_u8(self.command)
    }

    pub fn is_response(&self) -> bool {
        self.command == Command::Response.as_u8()
    }

    /// Interpret the length slot according to the command
    pub fn length_field(&self) -> LengthField {
        if self.is_response() {
            LengthField::Status(StatusCode(self.length))
        } else {
            LengthField::BodyLen(self.length as usize)
        }
    }

    /// Encode into exactly HEADER_SIZE bytes
    pub fn encode<B: BufMut>(&self, dst: &mut B) {
        dst.put_u8(self.command);
        dst.put_u16(self.id);
        dst.put_u16(self.length);
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        self.encode(&mut &mut bytes[..]);
        bytes
    }

    /// Decode from the first HEADER_SIZE bytes; trailing bytes are ignored
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(PinwireError::Frame {
                needed: HEADER_SIZE,
                available: bytes.len(),
            });
        }

        let mut buf = &bytes[..HEADER_SIZE];
        Ok(Self {
            command: buf.get_u8(),
            id: buf.get_u16(),
            length: buf.get_u16(),
        })
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{cmd={} id={} len={}}}", self.command, self.id, self.length)
    }
}

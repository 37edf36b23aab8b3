//! Message
//!
//! One header plus one body. A message is built fresh for each send:
//! [`Message::build`] resets both parts and hands back the body for
//! fluent field appends.

use std::fmt;

use bytes::{BufMut, BytesMut};

use crate::error::{PinwireError, Result};
use super::{Body, Command, Header, StatusCode, HEADER_SIZE};

/// A single frame: header + body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub header: Header,
    pub body: Body,
}

impl Message {
    pub fn new(command: Command) -> Self {
        Self {
            header: Header::new(command, 0, 0),
            body: Body::new(),
        }
    }

    /// A header-only RESPONSE carrying `status`
    pub fn response(id: u16, status: StatusCode) -> Self {
        Self {
            header: Header::new(Command::Response, id, status.0),
            body: Body::new(),
        }
    }

    /// Reset to `{command, id=0, length=0}` with an empty body
    pub fn build(&mut self, command: Command) -> &mut Body {
        self.header = Header::new(command, 0, 0);
        self.body.clear();
        &mut self.body
    }

    pub fn command(&self) -> Option<Command> {
        self.header.command()
    }

    pub fn is_response(&self) -> bool {
        self.header.is_response()
    }

    /// Status of a RESPONSE frame
    pub fn status(&self) -> Option<StatusCode> {
        self.is_response().then_some(StatusCode(self.header.length))
    }

    /// Encode into wire format
    ///
    /// RESPONSE frames are header-only and keep their status in the length
    /// slot. Every other command gets `header.length` set to the body size.
    pub fn encode(&mut self) -> Result<BytesMut> {
        if self.is_response() {
            let mut buf = BytesMut::with_capacity(HEADER_SIZE);
            self.header.encode(&mut buf);
            return Ok(buf);
        }

        let body_len = self.body.encoded_len();
        if body_len > u16::MAX as usize {
            return Err(PinwireError::BufferOverflow {
                declared: body_len,
                capacity: u16::MAX as usize,
            });
        }

        let mut buf = BytesMut::with_capacity(HEADER_SIZE + body_len);
        buf.put_bytes(0, HEADER_SIZE);
        self.body.encode(&mut buf)?;

        self.header.length = body_len as u16;
        self.header.encode(&mut &mut buf[..HEADER_SIZE]);
        Ok(buf)
    }

    /// Decode a complete frame from `bytes`
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let header = Header::decode(bytes)?;

        if header.is_response() {
            return Ok(Self {
                header,
                body: Body::new(),
            });
        }

        let declared = header.length as usize;
        let available = bytes.len() - HEADER_SIZE;
        if declared > available {
            return Err(PinwireError::ShortBuffer {
                declared,
                available,
            });
        }

        let body = Body::decode(&bytes[HEADER_SIZE..HEADER_SIZE + declared]);
        Ok(Self { header, body })
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.header, self.body)
    }
}

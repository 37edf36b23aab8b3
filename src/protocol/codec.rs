//! Stream codec
//!
//! Blocking frame I/O over any `Read`/`Write`.
//!
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────────────────────────┐
//! │ Cmd (1)  │  Id (2)  │ Len (2)  │ Body (Len bytes, not RESPONSE)│
//! └──────────┴──────────┴──────────┴──────────────────────────────┘
//! ```

use std::io::{Read, Write};

use crate::error::{PinwireError, Result};
use super::{Body, Header, Message, HEADER_SIZE};

/// Read one complete frame from a stream
///
/// Blocks until the frame is received or the stream fails. RESPONSE frames
/// are header-only. For every other command the declared body must fit in a
/// receive buffer of `capacity` bytes (header included).
pub fn read_frame<R: Read>(reader: &mut R, capacity: usize) -> Result<Message> {
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header)?;
    let header = Header::decode(&header)?;

    if header.is_response() {
        return Ok(Message {
            header,
            body: Body::new(),
        });
    }

    let declared = header.length as usize;
    if HEADER_SIZE + declared > capacity {
        return Err(PinwireError::BufferOverflow {
            declared,
            capacity: capacity.saturating_sub(HEADER_SIZE),
        });
    }

    let mut payload = vec![0u8; declared];
    if declared > 0 {
        reader.read_exact(&mut payload)?;
    }

    Ok(Message {
        header,
        body: Body::decode(&payload),
    })
}

/// Encode `message` and write it to a stream
pub fn write_frame<W: Write>(writer: &mut W, message: &mut Message) -> Result<()> {
    let bytes = message.encode()?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

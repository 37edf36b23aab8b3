//! Connection Handling
//!
//! Opens the transport and serializes everything written to it.

use std::io::{BufReader, Write};
use std::net::{Shutdown, TcpStream};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::error::{PinwireError, Result};
use crate::protocol::Message;

/// Open a TCP connection and split it into read and write handles
///
/// The reader belongs to the receive loop; the writer is handed to
/// [`Outbound::attach`].
pub fn open(address: &str, nodelay: bool) -> Result<(BufReader<TcpStream>, TcpStream)> {
    let stream = TcpStream::connect(address)?;

    // Disable Nagle's algorithm for low latency
    if nodelay {
        stream.set_nodelay(true)?;
    }

    let read_stream = stream.try_clone()?;
    Ok((BufReader::new(read_stream), stream))
}

/// Close both directions of a socket, ignoring "already closed"
pub fn close(stream: &TcpStream) {
    if let Err(e) = stream.shutdown(Shutdown::Both) {
        tracing::trace!("Shutdown on closed socket: {}", e);
    }
}

/// Per-connection send state, guarded by a single lock
struct Session<W> {
    writer: Option<W>,

    /// Last id assigned; the next send uses `next_id + 1`
    next_id: u16,

    last_activity: Instant,
}

/// Outbound send synchronizer
///
/// Every frame goes through [`Outbound::send`], which assigns the message id,
/// writes the frame and stamps the activity time under one lock. Reads use a
/// separate handle and are never blocked by it.
pub struct Outbound<W> {
    session: Mutex<Session<W>>,
}

impl<W: Write> Outbound<W> {
    pub fn new() -> Self {
        Self {
            session: Mutex::new(Session {
                writer: None,
                next_id: 0,
                last_activity: Instant::now(),
            }),
        }
    }

    /// Install a fresh transport and restart message ids
    pub fn attach(&self, writer: W) -> Option<W> {
        let mut session = self.session.lock();
        session.next_id = 0;
        session.writer.replace(writer)
    }

    /// Remove the transport; later sends fail with NotConnected
    pub fn detach(&self) -> Option<W> {
        self.session.lock().writer.take()
    }

    /// Time since the last successful send
    pub fn idle_for(&self) -> Duration {
        self.session.lock().last_activity.elapsed()
    }

    /// Send one frame, returning the id it went out with
    ///
    /// A header id of 0 is replaced by the next per-connection id (wrapping
    /// at 16 bits and skipping 0). RESPONSE frames are written header-only.
    pub fn send(&self, message: &mut Message) -> Result<u16> {
        let mut session = self.session.lock();
        Self::write_locked(&mut session, message)
    }

    /// Send only if `ready` holds while the send lock is held
    ///
    /// Returns `Ok(None)` without consuming an id when `ready` is false.
    pub fn send_if<F>(&self, message: &mut Message, ready: F) -> Result<Option<u16>>
    where
        F: FnOnce() -> bool,
    {
        let mut session = self.session.lock();
        if !ready() {
            return Ok(None);
        }
        Self::write_locked(&mut session, message).map(Some)
    }

    fn write_locked(session: &mut Session<W>, message: &mut Message) -> Result<u16> {
        let writer = session.writer.as_mut().ok_or(PinwireError::NotConnected)?;

        if message.header.id == 0 {
            session.next_id = match session.next_id.wrapping_add(1) {
                0 => 1,
                id => id,
            };
            message.header.id = session.next_id;
        }

        let bytes = message.encode()?;
        if message.is_response() {
            tracing::debug!("Sending header {}", message.header);
        } else {
            tracing::debug!("Sending message {}", message);
        }

        writer.write_all(&bytes)?;
        writer.flush()?;

        session.last_activity = Instant::now();
        Ok(message.header.id)
    }
}

impl<W: Write> Default for Outbound<W> {
    fn default() -> Self {
        Self::new()
    }
}

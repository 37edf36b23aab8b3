//! Virtual pin handlers
//!
//! Inbound HARDWARE frames carry a sub-command tag and a pin number in their
//! first two fields. Writes (`"vw"`) are forwarded to the pin's writer with
//! the remaining fields; reads (`"vr"`) ask the pin's reader to fill in a
//! `"vw"` frame that is sent back. The protocol has no negative
//! acknowledgement, so anything that cannot be routed is logged and dropped.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::protocol::{Body, Command, Message};

/// Sub-command tag for a virtual pin write
pub const VIRTUAL_WRITE: &str = "vw";

/// Sub-command tag for a virtual pin read
pub const VIRTUAL_READ: &str = "vr";

/// Answers read requests for a virtual pin
pub trait PinReader: Send + Sync {
    /// Push the pin's current value(s) onto `out`
    fn read(&self, pin: u32, out: &mut Body);
}

/// Receives values written to a virtual pin
pub trait PinWriter: Send + Sync {
    /// `params` holds the written values, tag and pin already stripped
    fn write(&self, pin: u32, params: &Body);
}

/// Adapts a closure into a [`PinReader`]
pub struct ReaderFn<F>(pub F);

impl<F> PinReader for ReaderFn<F>
where
    F: Fn(u32, &mut Body) + Send + Sync,
{
    fn read(&self, pin: u32, out: &mut Body) {
        (self.0)(pin, out)
    }
}

/// Adapts a closure into a [`PinWriter`]
pub struct WriterFn<F>(pub F);

impl<F> PinWriter for WriterFn<F>
where
    F: Fn(u32, &Body) + Send + Sync,
{
    fn write(&self, pin: u32, params: &Body) {
        (self.0)(pin, params)
    }
}

/// HARDWARE frame reporting values for `pin`; push the values onto its body
pub fn virtual_write_frame(pin: u32) -> Message {
    let mut msg = Message::default();
    msg.build(Command::Hardware)
        .push_str(VIRTUAL_WRITE)
        .push_int(i64::from(pin));
    msg
}

/// Routes inbound HARDWARE frames to registered pin handlers
///
/// One handler per pin and direction; registering again replaces the
/// previous one. Handlers are cloned out of the registry before being called,
/// so a handler may itself register or send.
#[derive(Default)]
pub struct Dispatcher {
    readers: RwLock<HashMap<u32, Arc<dyn PinReader>>>,
    writers: RwLock<HashMap<u32, Arc<dyn PinWriter>>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Registration
    // =========================================================================

    pub fn register_reader(&self, pin: u32, reader: Arc<dyn PinReader>) {
        self.readers.write().insert(pin, reader);
    }

    pub fn unregister_reader(&self, pin: u32) -> bool {
        self.readers.write().remove(&pin).is_some()
    }

    pub fn register_writer(&self, pin: u32, writer: Arc<dyn PinWriter>) {
        self.writers.write().insert(pin, writer);
    }

    pub fn unregister_writer(&self, pin: u32) -> bool {
        self.writers.write().remove(&pin).is_some()
    }

    fn reader(&self, pin: u32) -> Option<Arc<dyn PinReader>> {
        self.readers.read().get(&pin).cloned()
    }

    fn writer(&self, pin: u32) -> Option<Arc<dyn PinWriter>> {
        self.writers.read().get(&pin).cloned()
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Handle the body of an inbound HARDWARE frame
    ///
    /// Returns the frame to send back, if any.
    pub fn dispatch(&self, mut body: Body) -> Option<Message> {
        let Some(tag) = body.get(0) else {
            tracing::debug!("Missing function in hardware message body {}, ignoring", body);
            return None;
        };

        match tag {
            VIRTUAL_WRITE => {
                let pin = Self::pin(&body)?;
                let Some(writer) = self.writer(pin) else {
                    tracing::debug!("Ignoring write to virtual pin {}: no handler", pin);
                    return None;
                };
                body.shift(2);
                tracing::debug!("Calling virtual pin writer {} with parameters {}", pin, body);
                writer.write(pin, &body);
                None
            }
            VIRTUAL_READ => {
                let pin = Self::pin(&body)?;
                let Some(reader) = self.reader(pin) else {
                    tracing::debug!("Ignoring read of virtual pin {}: no handler", pin);
                    return None;
                };
                let mut reply = virtual_write_frame(pin);
                tracing::debug!("Calling virtual pin reader {}", pin);
                reader.read(pin, &mut reply.body);
                Some(reply)
            }
            other => {
                tracing::debug!("Ignoring hardware command '{}'", other);
                None
            }
        }
    }

    fn pin(body: &Body) -> Option<u32> {
        let pin = body.get(1).and_then(|p| p.parse().ok());
        if pin.is_none() {
            tracing::debug!("Missing pin in hardware message {}, ignoring", body);
        }
        pin
    }
}

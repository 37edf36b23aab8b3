//! Heartbeat
//!
//! A thread that wakes on a fixed tick for the lifetime of the client,
//! independent of connection cycles. It only decides whether a PING is due;
//! it never changes connection state.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{self, Receiver};

use super::ConnectionState;

/// A PING is due only on a live connection that has been idle long enough
pub fn ping_due(state: ConnectionState, idle: Duration, interval: Duration) -> bool {
    state == ConnectionState::Connected && idle >= interval
}

/// Spawn the heartbeat thread
///
/// `on_tick` runs once per `tick` until `shutdown` is closed (its sender is
/// dropped) or receives a message.
pub fn spawn<F>(tick: Duration, shutdown: Receiver<()>, mut on_tick: F) -> io::Result<JoinHandle<()>>
where
    F: FnMut() + Send + 'static,
{
    thread::Builder::new()
        .name("pinwire-heartbeat".to_string())
        .spawn(move || {
            let ticker = channel::tick(tick);
            loop {
                crossbeam::select! {
                    recv(ticker) -> _ => on_tick(),
                    recv(shutdown) -> _ => break,
                }
            }
            tracing::debug!("Heartbeat stopped");
        })
}

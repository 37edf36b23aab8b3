//! Network Module
//!
//! Transport handling for a single client.
//!
//! ## Architecture
//! - Receive loop owns the read half and blocks on it
//! - All writers share one send synchronizer (id, write, timestamp)
//! - Heartbeat thread pings an idle connection
//! - Backoff paces reconnect attempts

mod backoff;
mod connection;
mod state;
pub mod heartbeat;

pub use backoff::Backoff;
pub use connection::{close, open, Outbound};
pub use state::ConnectionState;
pub(crate) use state::AtomicState;

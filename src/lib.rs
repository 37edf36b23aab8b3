//! # pinwire
//!
//! A device-side client for a binary virtual-pin IoT telemetry protocol:
//! - 5-byte framed messages with zero-delimited string bodies
//! - Token login with automatic reconnect and exponential backoff
//! - Heartbeat PINGs on an idle connection
//! - Per-pin reader/writer handlers for inbound hardware commands
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Host application                          │
//! │      (registers pin handlers, on-connect, calls run)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Client                                │
//! │      connect ─► login ─► receive loop ─► reconnect           │
//! └──────┬──────────────────────┬───────────────────────┬───────┘
//!        │                      │                       │
//!        ▼                      ▼                       ▼
//!  ┌────────────┐       ┌──────────────┐        ┌─────────────┐
//!  │ Dispatcher │──────►│   Outbound   │◄───────│  Heartbeat  │
//!  │ (pin map)  │       │ (send lock)  │        │  (thread)   │
//!  └────────────┘       └──────┬───────┘        └─────────────┘
//!                              │
//!                              ▼
//!                       ┌─────────────┐
//!                       │  Protocol   │
//!                       │   (codec)   │
//!                       └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use pinwire::Client;
//!
//! let client = Client::new("blynk-cloud.com:8442", "auth-token");
//! client.register_reader_fn(2, |_pin, out| {
//!     out.push_int(25);
//! });
//! client.run().unwrap();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod handler;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CallbackError, PinwireError, Result};
pub use config::Config;
pub use client::Client;
pub use handler::{PinReader, PinWriter, ReaderFn, WriterFn};
pub use network::ConnectionState;
pub use protocol::{Body, Command, Message, StatusCode};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of pinwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Error types for pinwire
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

use crate::protocol::StatusCode;

/// Result type alias using PinwireError
pub type Result<T> = std::result::Result<T, PinwireError>;

/// Error type returned by an on-connect callback
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Unified error type for pinwire operations
#[derive(Debug, Error)]
pub enum PinwireError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not connected")]
    NotConnected,

    // -------------------------------------------------------------------------
    // Framing Errors
    // -------------------------------------------------------------------------
    #[error("Incomplete header: expected {needed} bytes, got {available}")]
    Frame { needed: usize, available: usize },

    #[error("Content length mismatches header: declared {declared} bytes, {available} available")]
    ShortBuffer { declared: usize, available: usize },

    #[error("Message body too big: {declared} bytes requested (capacity {capacity})")]
    BufferOverflow { declared: usize, capacity: usize },

    #[error("Body field {index} contains a zero byte")]
    InvalidField { index: usize },

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Request rejected: status {0}")]
    Rejected(StatusCode),

    // -------------------------------------------------------------------------
    // Host Callback Errors
    // -------------------------------------------------------------------------
    #[error("On-connect callback failed: {0}")]
    ConnectCallback(String),
}


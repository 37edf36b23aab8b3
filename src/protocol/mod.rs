//! Protocol Module
//!
//! Defines the wire protocol spoken between a device and the server.
//!
//! ## Frame Format
//! ```text
//! ┌──────────┬──────────┬──────────┬─────────────────────────────┐
//! │ Cmd (1)  │  Id (2)  │ Len (2)  │          Body               │
//! └──────────┴──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! The body is a list of string fields separated by single zero bytes.
//!
//! ### The length slot
//! For RESPONSE (0) frames `Len` is a status code and no body follows.
//! For every other command it is the body length in bytes.
//!
//! ### Commands used by the client
//! - 0:  RESPONSE  - status in `Len`
//! - 2:  LOGIN     - body: auth token
//! - 6:  PING      - empty body
//! - 14: NOTIFY    - body: notification text
//! - 20: HARDWARE  - body: "vw"|"vr", pin, values...

mod command;
mod header;
mod body;
mod message;
mod codec;

pub use command::{Command, StatusCode};
pub use header::{Header, LengthField, HEADER_SIZE};
pub use body::{Body, Field, FIELD_DELIMITER};
pub use message::Message;
pub use codec::{read_frame, write_frame};

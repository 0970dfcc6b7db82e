//! MUDP-v1 - batched MIDI channel messages over UDP
//!
//! This library implements the MUDP-v1 wire format used to drive an embedded
//! MIDI receiver over a network, plus a thin blocking UDP transport.
//!
//! # Quick Start
//!
//! ```rust
//! use mudp::{MidiMessage, decode, encode};
//!
//! // Note On, middle C, velocity 100
//! let batch = [MidiMessage::note_on(0, 60, 100)];
//!
//! let bytes = encode(&batch)?;
//! assert_eq!(bytes, [0x4D, 0x55, 0x01, 0x01, 0x90, 0x3C, 0x64]);
//!
//! let decoded = decode(&bytes)?;
//! assert_eq!(decoded, batch);
//! # Ok::<(), mudp::Error>(())
//! ```
//!
//! # Wire Format
//!
//! ```text
//! byte 0       : 'M' (0x4D)
//! byte 1       : 'U' (0x55)
//! byte 2       : version (0x01)
//! byte 3       : message count N, 1..255
//! bytes 4..end : N messages: status, data1[, data2]
//! ```
//!
//! `data2` is omitted for Program Change (0xC0) and Channel Pressure (0xD0).
//! There is no per-message length field: the width follows from the status.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod protocol;
pub mod transport;

pub use protocol::{
    Batcher, Error, HEADER_SIZE, MAGIC, MAX_MESSAGES, MessageKind, MetricsSnapshot, MidiMessage,
    MudpPacket, PROTOCOL_VERSION, Result, decode, encode, encode_into,
};
pub use transport::{DEFAULT_PORT, Receiver, Sender, TransportConfig, TransportError};

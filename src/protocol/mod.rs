//! MUDP protocol core implementation
//!
//! This module provides the wire format, message types, and codec for MUDP-v1.

mod batch;
mod codec;
mod error;
mod header;
mod message;
pub(crate) mod metrics;
mod packet;
mod types;

pub use batch::Batcher;
pub use codec::{decode, encode, encode_into, encoded_len};
pub use error::{Error, Result};
pub use header::PacketHeader;
pub use message::MidiMessage;
pub use metrics::MetricsSnapshot;
pub use packet::MudpPacket;
pub use types::MessageKind;

/// MUDP magic bytes: "MU" in ASCII
pub const MAGIC: [u8; 2] = [0x4D, 0x55];

/// Protocol revision written by the encoder and accepted by the decoder
pub const PROTOCOL_VERSION: u8 = 0x01;

/// Header size in bytes
pub const HEADER_SIZE: usize = 4;

/// Maximum messages per packet (count is a single byte)
pub const MAX_MESSAGES: usize = u8::MAX as usize;

/// Largest possible MUDP-v1 packet: header plus 255 three-byte messages
pub const MAX_PACKET_SIZE: usize = HEADER_SIZE + MAX_MESSAGES * 3;

//! MUDP error types

use thiserror::Error;

/// MUDP codec errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Batch holds no messages or more than a packet can count
    #[error("invalid batch size: {count} messages (expected 1..={max})")]
    InvalidBatchSize {
        /// Number of messages supplied
        count: usize,
        /// Maximum allowed
        max: usize,
    },

    /// Status byte is not a channel-voice message
    #[error("invalid status byte {status:#04x} at message {index}")]
    InvalidStatus {
        /// Offending status byte
        status: u8,
        /// Position of the message within the batch
        index: usize,
    },

    /// Payload shorter than the fixed header
    #[error("truncated header: need {needed} bytes, got {got}")]
    TruncatedHeader {
        /// Header size
        needed: usize,
        /// Actual payload size
        got: usize,
    },

    /// Magic bytes are not "MU"
    #[error("invalid magic bytes: expected 0x4D55, got {found:#06x}")]
    BadMagic {
        /// Found magic bytes (big-endian)
        found: u16,
    },

    /// Protocol revision this codec does not speak
    #[error("unsupported protocol version: {version}")]
    UnsupportedVersion {
        /// Version byte from the header
        version: u8,
    },

    /// Header declares zero messages
    #[error("empty batch (count=0)")]
    EmptyBatch,

    /// Payload ends inside a message
    #[error("truncated message {index}: need {needed} bytes, got {got}")]
    TruncatedMessage {
        /// Position of the message within the batch
        index: usize,
        /// Wire width of the message
        needed: usize,
        /// Bytes left in the payload
        got: usize,
    },

    /// Bytes left over after the declared message count
    #[error("{count} trailing bytes after last message")]
    TrailingBytes {
        /// Number of unconsumed bytes
        count: usize,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

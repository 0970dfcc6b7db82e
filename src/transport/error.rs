//! Transport-level error types covering socket and framing failures.

use super::socket::SocketError;
use crate::protocol;
use core::fmt;

/// Unified error type for MUDP transport operations.
#[derive(Debug)]
pub enum TransportError {
    /// Underlying socket failure.
    Socket(SocketError),
    /// Packet encoding/decoding failure.
    Protocol(protocol::Error),
    /// Incoming datagram exceeded the configured receive limit.
    DatagramTooLarge {
        /// Bytes read before truncation (at least `max + 1`).
        len: usize,
        /// Maximum datagram size accepted by the receiver.
        max: usize,
    },
    /// `TransportConfig::max_datagram` outside the accepted range.
    InvalidMaxDatagram {
        /// Configured value.
        value: usize,
        /// Smallest value that still fits every valid packet.
        min: usize,
        /// Largest UDP datagram.
        max: usize,
    },
}

impl TransportError {
    /// Whether this is a framing problem with one datagram rather than a socket failure.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Protocol(_) | Self::DatagramTooLarge { .. })
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Socket(err) => write!(f, "socket error: {err}"),
            Self::Protocol(err) => write!(f, "protocol error: {err}"),
            Self::DatagramTooLarge { len, max } => {
                write!(f, "datagram too large: {len} bytes (max {max})")
            }
            Self::InvalidMaxDatagram { value, min, max } => {
                write!(f, "max_datagram {value} out of range ({min}..={max})")
            }
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Socket(err) => Some(err),
            Self::Protocol(err) => Some(err),
            Self::DatagramTooLarge { .. } | Self::InvalidMaxDatagram { .. } => None,
        }
    }
}

impl From<SocketError> for TransportError {
    fn from(err: SocketError) -> Self {
        Self::Socket(err)
    }
}

impl From<protocol::Error> for TransportError {
    fn from(err: protocol::Error) -> Self {
        Self::Protocol(err)
    }
}

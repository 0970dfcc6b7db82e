//! MUDP UDP transport
//!
//! One sender, one receiver, no acknowledgment or retransmission. Each
//! datagram carries exactly one packet.

mod error;
mod socket;
mod transport;

pub use error::TransportError;
pub use socket::{Datagram, SocketBinding, SocketError};
pub use transport::{
    DEFAULT_MAX_DATAGRAM, DEFAULT_PORT, MAX_UDP_DATAGRAM, ReceivedPacket, Receiver, Sender,
    TransportConfig,
};

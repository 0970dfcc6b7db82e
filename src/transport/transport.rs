//! Fire-and-forget sender and receiver built on the MUDP codec.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, trace};

use crate::protocol::metrics::{Metrics, PacketDirection};
use crate::protocol::{self, Batcher, MetricsSnapshot, MidiMessage, MudpPacket};

use super::error::TransportError;
use super::socket::{Datagram, SocketBinding};

/// Default UDP port the embedded receiver listens on.
pub const DEFAULT_PORT: u16 = 21928;

/// Default receive buffer limit per datagram (bytes).
pub const DEFAULT_MAX_DATAGRAM: usize = 1024;

/// Upper bound for `max_datagram`: the UDP length field is 16 bits.
pub const MAX_UDP_DATAGRAM: usize = u16::MAX as usize;

/// Transport configuration options.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Port a receiver binds to when no explicit address is given.
    pub port: u16,
    /// Largest datagram a receiver accepts; anything longer is dropped.
    ///
    /// Must lie in `MAX_PACKET_SIZE..=MAX_UDP_DATAGRAM`.
    pub max_datagram: usize,
    /// Optional read timeout for sockets.
    pub read_timeout: Option<Duration>,
    /// Optional write timeout for sockets.
    pub write_timeout: Option<Duration>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_datagram: DEFAULT_MAX_DATAGRAM,
            read_timeout: None,
            write_timeout: None,
        }
    }
}

impl TransportConfig {
    /// Check that every valid packet fits and the receive buffer is bounded.
    pub fn validate(&self) -> Result<(), TransportError> {
        if !(protocol::MAX_PACKET_SIZE..=MAX_UDP_DATAGRAM).contains(&self.max_datagram) {
            return Err(TransportError::InvalidMaxDatagram {
                value: self.max_datagram,
                min: protocol::MAX_PACKET_SIZE,
                max: MAX_UDP_DATAGRAM,
            });
        }
        Ok(())
    }
}

/// Sending side: encodes batches and transmits them to a single receiver.
///
/// Cloning shares the socket and counters.
#[derive(Clone, Debug)]
pub struct Sender {
    inner: Arc<SenderInner>,
}

#[derive(Debug)]
struct SenderInner {
    socket: SocketBinding,
    target: SocketAddr,
    metrics: Metrics,
}

impl Sender {
    /// Bind an ephemeral local socket that sends to `target`.
    #[instrument(level = "info", skip(config))]
    pub fn connect(target: SocketAddr, config: &TransportConfig) -> Result<Self, TransportError> {
        let socket =
            SocketBinding::ephemeral_for(target, config.read_timeout, config.write_timeout)?;
        Ok(Self {
            inner: Arc::new(SenderInner {
                socket,
                target,
                metrics: Metrics::default(),
            }),
        })
    }

    /// Send a batch of any non-zero length, split into as many packets as needed.
    ///
    /// Returns the number of datagrams sent. The batch is validated before
    /// the first datagram goes out.
    #[instrument(level = "debug", skip(self, messages), fields(count = messages.len()))]
    pub fn send(&self, messages: &[MidiMessage]) -> Result<usize, TransportError> {
        if messages.is_empty() {
            return Err(protocol::Error::InvalidBatchSize {
                count: 0,
                max: protocol::MAX_MESSAGES,
            }
            .into());
        }

        let mut batcher = Batcher::new();
        batcher.extend(messages.iter().copied())?;

        let packets = batcher.flush();
        for packet in &packets {
            self.send_packet(packet)?;
        }
        Ok(packets.len())
    }

    /// Encode and transmit one packet, returning the bytes sent.
    #[instrument(level = "trace", skip(self, packet))]
    pub fn send_packet(&self, packet: &MudpPacket) -> Result<usize, TransportError> {
        let bytes = packet.encode();
        let sent = self
            .inner
            .socket
            .send_to(&bytes, self.inner.target)
            .inspect_err(|_| self.inner.metrics.record_error())?;
        self.inner
            .metrics
            .record_packet(PacketDirection::Sent, packet.messages(), sent);
        trace!(messages = packet.len(), bytes = sent, "sent packet");
        Ok(sent)
    }

    /// Remote address packets are sent to.
    #[must_use]
    pub fn target(&self) -> SocketAddr {
        self.inner.target
    }

    /// Expose the local socket address.
    pub fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        Ok(self.inner.socket.local_addr()?)
    }

    /// Snapshot of send counters.
    #[must_use]
    pub fn metrics(&self) -> MetricsSnapshot {
        self.inner.metrics.snapshot()
    }
}

/// A decoded datagram and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedPacket {
    /// Decoded packet
    pub packet: MudpPacket,
    /// Sender address
    pub source: SocketAddr,
}

/// Receiving side: reads datagrams and decodes them into messages.
#[derive(Debug)]
pub struct Receiver {
    socket: SocketBinding,
    buffer: Vec<u8>,
    max_datagram: usize,
    metrics: Metrics,
}

impl Receiver {
    /// Listen on all IPv4 interfaces at the configured port.
    pub fn bind(config: &TransportConfig) -> Result<Self, TransportError> {
        Self::bind_addr(SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port)), config)
    }

    /// Listen on an explicit address.
    #[instrument(level = "info", skip(config))]
    pub fn bind_addr(addr: SocketAddr, config: &TransportConfig) -> Result<Self, TransportError> {
        config.validate()?;
        let socket = SocketBinding::bind(addr, config.read_timeout, config.write_timeout)?;
        debug!(local = ?socket.local_addr().ok(), "MUDP receiver listening");
        Ok(Self {
            socket,
            // one spare byte so oversize datagrams are detectable
            buffer: vec![0u8; config.max_datagram + 1],
            max_datagram: config.max_datagram,
            metrics: Metrics::default(),
        })
    }

    /// Receive and decode the next datagram (blocking call).
    ///
    /// A malformed datagram is counted as dropped and returned as an error;
    /// the receiver stays usable.
    #[instrument(level = "trace", skip(self))]
    pub fn recv(&mut self) -> Result<ReceivedPacket, TransportError> {
        let datagram = self
            .socket
            .recv_datagram(&mut self.buffer)
            .inspect_err(|err| {
                if !err.is_timeout() {
                    self.metrics.record_error();
                }
            })?;

        let (len, source) = match datagram {
            Datagram::Complete { len, source } => (len, source),
            Datagram::Oversize { len } => {
                self.metrics.record_drop();
                return Err(TransportError::DatagramTooLarge {
                    len,
                    max: self.max_datagram,
                });
            }
        };

        let packet = MudpPacket::decode(&self.buffer[..len]).inspect_err(|_| {
            self.metrics.record_drop();
        })?;
        self.metrics
            .record_packet(PacketDirection::Received, packet.messages(), len);
        trace!(%source, messages = packet.len(), bytes = len, "received packet");
        Ok(ReceivedPacket { packet, source })
    }

    /// Receive the next well-formed datagram, discarding malformed ones.
    ///
    /// Only socket failures (including timeouts) are returned.
    pub fn recv_valid(&mut self) -> Result<ReceivedPacket, TransportError> {
        loop {
            match self.recv() {
                Ok(received) => return Ok(received),
                Err(err) if err.is_malformed() => {
                    debug!(error = %err, "dropping malformed datagram");
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Receive one well-formed datagram and hand each message to `handler`.
    ///
    /// Returns the number of messages dispatched.
    pub fn dispatch<F>(&mut self, mut handler: F) -> Result<usize, TransportError>
    where
        F: FnMut(MidiMessage),
    {
        let received = self.recv_valid()?;
        let count = received.packet.len();
        received.packet.into_iter().for_each(&mut handler);
        Ok(count)
    }

    /// Expose the local socket address.
    pub fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        Ok(self.socket.local_addr()?)
    }

    /// Snapshot of receive counters.
    #[must_use]
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

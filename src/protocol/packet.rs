//! MUDP packet: a validated batch of messages

use bytes::{Bytes, BytesMut};

use super::{MidiMessage, PROTOCOL_VERSION, Result, codec};

/// One datagram's worth of MIDI messages.
///
/// Construction validates the batch, so encoding a `MudpPacket` cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MudpPacket {
    messages: Vec<MidiMessage>,
    encoded_len: usize,
}

impl MudpPacket {
    /// Create a packet from 1 to 255 channel-voice messages
    pub fn new(messages: impl Into<Vec<MidiMessage>>) -> Result<Self> {
        let messages = messages.into();
        let encoded_len = codec::encoded_len(&messages)?;
        Ok(Self {
            messages,
            encoded_len,
        })
    }

    /// Protocol version this packet is framed with
    #[must_use]
    pub const fn version(&self) -> u8 {
        PROTOCOL_VERSION
    }

    /// Get messages
    #[must_use]
    pub fn messages(&self) -> &[MidiMessage] {
        &self.messages
    }

    /// Take ownership of the messages
    #[must_use]
    pub fn into_messages(self) -> Vec<MidiMessage> {
        self.messages
    }

    /// Number of messages in the packet
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: a packet holds at least one message
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Size of the packet on the wire
    #[must_use]
    pub const fn encoded_len(&self) -> usize {
        self.encoded_len
    }

    /// Encode packet to bytes
    #[must_use]
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len);
        codec::write_packet(&self.messages, &mut buf);
        buf.freeze()
    }

    /// Decode packet from bytes
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let messages = codec::decode(bytes)?;
        Ok(Self {
            messages,
            encoded_len: bytes.len(),
        })
    }
}

impl IntoIterator for MudpPacket {
    type Item = MidiMessage;
    type IntoIter = std::vec::IntoIter<MidiMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

impl<'a> IntoIterator for &'a MudpPacket {
    type Item = &'a MidiMessage;
    type IntoIter = std::slice::Iter<'a, MidiMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

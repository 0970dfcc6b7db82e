//! MUDP packet codec (encode/decode)
//!
//! Messages are framed without per-message length fields: the decoder reads
//! the status byte and takes the width from [`MessageKind::wire_len`].

use bytes::BufMut;

use super::{Error, HEADER_SIZE, MAX_MESSAGES, MessageKind, MidiMessage, PacketHeader, Result};

/// Validate a batch and return its encoded size in bytes.
///
/// # Errors
///
/// Returns an error if the batch is empty, longer than [`MAX_MESSAGES`], or
/// contains a status byte that is not a channel-voice message.
pub fn encoded_len(messages: &[MidiMessage]) -> Result<usize> {
    if messages.is_empty() || messages.len() > MAX_MESSAGES {
        return Err(Error::InvalidBatchSize {
            count: messages.len(),
            max: MAX_MESSAGES,
        });
    }

    messages
        .iter()
        .enumerate()
        .try_fold(HEADER_SIZE, |total, (index, msg)| match msg.wire_len() {
            Some(len) => Ok(total + len),
            None => Err(Error::InvalidStatus {
                status: msg.status(),
                index,
            }),
        })
}

/// Encode a batch of messages into a single packet
///
/// # Format
///
/// ```text
/// [4D 55 01 N] [status data1 (data2)] x N
/// ```
///
/// `data2` is written only for kinds that carry it.
pub fn encode(messages: &[MidiMessage]) -> Result<Vec<u8>> {
    let total_size = encoded_len(messages)?;
    let mut bytes = Vec::with_capacity(total_size);
    write_packet(messages, &mut bytes);
    Ok(bytes)
}

/// Encode a batch into a caller-supplied buffer, returning the bytes written.
///
/// The batch is validated before anything is written, so on error `buf` is
/// left untouched.
///
/// # Panics
///
/// Panics if `buf` lacks room for the packet (see [`BufMut::put_slice`]).
pub fn encode_into<B: BufMut>(messages: &[MidiMessage], buf: &mut B) -> Result<usize> {
    let total_size = encoded_len(messages)?;
    write_packet(messages, buf);
    Ok(total_size)
}

/// Write an already validated batch. Callers must run [`encoded_len`] first.
pub(super) fn write_packet<B: BufMut>(messages: &[MidiMessage], buf: &mut B) {
    debug_assert!(encoded_len(messages).is_ok(), "unvalidated batch");
    let header = PacketHeader::new(messages.len() as u8);
    buf.put_slice(&header.to_bytes());

    for msg in messages {
        buf.put_u8(msg.status());
        buf.put_u8(msg.data1());
        if let Some(data2) = msg.data2() {
            buf.put_u8(data2);
        }
    }
}

/// Decode a packet back into its messages
///
/// # Errors
///
/// Returns an error if:
/// - Payload is shorter than the header
/// - Magic bytes or version are wrong
/// - Count is zero
/// - A status byte is not a channel-voice message
/// - Payload ends inside a message
/// - Bytes remain after the declared count
pub fn decode(bytes: &[u8]) -> Result<Vec<MidiMessage>> {
    let header = PacketHeader::from_bytes(bytes)?;
    let count = usize::from(header.count());

    let mut messages = Vec::with_capacity(count);
    let mut pos = HEADER_SIZE;

    for index in 0..count {
        let remaining = bytes.len() - pos;
        if remaining == 0 {
            return Err(Error::TruncatedMessage {
                index,
                needed: 2,
                got: 0,
            });
        }

        let status = bytes[pos];
        let Some(kind) = MessageKind::from_status(status) else {
            return Err(Error::InvalidStatus { status, index });
        };

        let width = kind.wire_len();
        if remaining < width {
            return Err(Error::TruncatedMessage {
                index,
                needed: width,
                got: remaining,
            });
        }

        let data2 = if kind.has_data2() { bytes[pos + 2] } else { 0 };
        messages.push(MidiMessage::new(status, bytes[pos + 1], data2));
        pos += width;
    }

    if pos != bytes.len() {
        return Err(Error::TrailingBytes {
            count: bytes.len() - pos,
        });
    }

    Ok(messages)
}

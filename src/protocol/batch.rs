//! Accumulate-then-send batching
//!
//! Callers push messages as they are produced and drain them as packets of at
//! most [`MAX_MESSAGES`] each, in push order.

use std::collections::VecDeque;

use super::{Error, MAX_MESSAGES, MidiMessage, MudpPacket, Result};

/// Message accumulator that splits into MUDP packets.
#[derive(Debug, Default, Clone)]
pub struct Batcher {
    pending: VecDeque<MidiMessage>,
}

impl Batcher {
    /// Create an empty batcher
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a single message.
    pub fn push(&mut self, message: MidiMessage) -> Result<()> {
        if message.kind().is_none() {
            return Err(Error::InvalidStatus {
                status: message.status(),
                index: self.pending.len(),
            });
        }
        self.pending.push_back(message);
        Ok(())
    }

    /// Queue several messages; on error nothing is queued.
    pub fn extend<I>(&mut self, messages: I) -> Result<()>
    where
        I: IntoIterator<Item = MidiMessage>,
    {
        let base = self.pending.len();
        let staged: Vec<MidiMessage> = messages.into_iter().collect();
        if let Some((offset, bad)) = staged
            .iter()
            .enumerate()
            .find(|(_, msg)| msg.kind().is_none())
        {
            return Err(Error::InvalidStatus {
                status: bad.status(),
                index: base + offset,
            });
        }
        self.pending.extend(staged);
        Ok(())
    }

    /// Number of queued messages
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check whether nothing is queued
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take the next full (255-message) packet, if one is ready.
    pub fn pop_full(&mut self) -> Option<MudpPacket> {
        if self.pending.len() < MAX_MESSAGES {
            return None;
        }
        self.take(MAX_MESSAGES)
    }

    /// Drain everything queued into packets.
    pub fn flush(&mut self) -> Vec<MudpPacket> {
        let mut packets = Vec::with_capacity(self.pending.len().div_ceil(MAX_MESSAGES));
        while let Some(packet) = self.take(MAX_MESSAGES) {
            packets.push(packet);
        }
        packets
    }

    fn take(&mut self, max: usize) -> Option<MudpPacket> {
        let n = self.pending.len().min(max);
        if n == 0 {
            return None;
        }
        let chunk: Vec<MidiMessage> = self.pending.drain(..n).collect();
        // statuses checked on push, size bounded above
        MudpPacket::new(chunk).ok()
    }
}

use std::sync::atomic::{AtomicU64, Ordering};

use super::{MessageKind, MidiMessage};

/// Per-endpoint MUDP counters, updated lock-free.
#[derive(Debug, Default)]
pub(crate) struct Metrics {
    packets_sent: AtomicU64,
    messages_sent: AtomicU64,
    bytes_sent: AtomicU64,
    packets_received: AtomicU64,
    messages_received: AtomicU64,
    bytes_received: AtomicU64,
    packets_dropped: AtomicU64,
    errors: AtomicU64,
    kinds: MessageKindCounters,
}

#[derive(Debug, Default)]
struct MessageKindCounters {
    note_off: AtomicU64,
    note_on: AtomicU64,
    poly_aftertouch: AtomicU64,
    control_change: AtomicU64,
    program_change: AtomicU64,
    channel_pressure: AtomicU64,
    pitch_bend: AtomicU64,
}

impl MessageKindCounters {
    fn slot(&self, kind: MessageKind) -> &AtomicU64 {
        match kind {
            MessageKind::NoteOff => &self.note_off,
            MessageKind::NoteOn => &self.note_on,
            MessageKind::PolyAftertouch => &self.poly_aftertouch,
            MessageKind::ControlChange => &self.control_change,
            MessageKind::ProgramChange => &self.program_change,
            MessageKind::ChannelPressure => &self.channel_pressure,
            MessageKind::PitchBend => &self.pitch_bend,
        }
    }

    fn increment(&self, kind: MessageKind) {
        self.slot(kind).fetch_add(1, Ordering::Relaxed);
    }

    fn load(&self, kind: MessageKind) -> u64 {
        self.slot(kind).load(Ordering::Relaxed)
    }
}

/// Direction of packet flow for counting.
#[derive(Clone, Copy)]
pub(crate) enum PacketDirection {
    Sent,
    Received,
}

impl Metrics {
    #[inline]
    pub(crate) fn record_packet(
        &self,
        direction: PacketDirection,
        messages: &[MidiMessage],
        bytes: usize,
    ) {
        let (packets, count, total) = match direction {
            PacketDirection::Sent => (&self.packets_sent, &self.messages_sent, &self.bytes_sent),
            PacketDirection::Received => (
                &self.packets_received,
                &self.messages_received,
                &self.bytes_received,
            ),
        };
        packets.fetch_add(1, Ordering::Relaxed);
        count.fetch_add(messages.len() as u64, Ordering::Relaxed);
        total.fetch_add(bytes as u64, Ordering::Relaxed);

        if matches!(direction, PacketDirection::Received) {
            for kind in messages.iter().filter_map(MidiMessage::kind) {
                self.kinds.increment(kind);
            }
        }
    }

    #[inline]
    pub(crate) fn record_drop(&self) {
        self.packets_dropped.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            packets_sent: self.packets_sent.load(Ordering::Relaxed),
            messages_sent: self.messages_sent.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
            packets_received: self.packets_received.load(Ordering::Relaxed),
            messages_received: self.messages_received.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
            packets_dropped: self.packets_dropped.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            note_off: self.kinds.load(MessageKind::NoteOff),
            note_on: self.kinds.load(MessageKind::NoteOn),
            poly_aftertouch: self.kinds.load(MessageKind::PolyAftertouch),
            control_change: self.kinds.load(MessageKind::ControlChange),
            program_change: self.kinds.load(MessageKind::ProgramChange),
            channel_pressure: self.kinds.load(MessageKind::ChannelPressure),
            pitch_bend: self.kinds.load(MessageKind::PitchBend),
        }
    }
}

/// Point-in-time copy of an endpoint's counters.
#[allow(missing_docs)]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub packets_sent: u64,
    pub messages_sent: u64,
    pub bytes_sent: u64,
    pub packets_received: u64,
    pub messages_received: u64,
    pub bytes_received: u64,
    /// Datagrams discarded because they failed to decode
    pub packets_dropped: u64,
    /// Socket failures
    pub errors: u64,
    pub note_off: u64,
    pub note_on: u64,
    pub poly_aftertouch: u64,
    pub control_change: u64,
    pub program_change: u64,
    pub channel_pressure: u64,
    pub pitch_bend: u64,
}

impl MetricsSnapshot {
    /// Received message count for one kind.
    #[must_use]
    pub const fn received_of(&self, kind: MessageKind) -> u64 {
        match kind {
            MessageKind::NoteOff => self.note_off,
            MessageKind::NoteOn => self.note_on,
            MessageKind::PolyAftertouch => self.poly_aftertouch,
            MessageKind::ControlChange => self.control_change,
            MessageKind::ProgramChange => self.program_change,
            MessageKind::ChannelPressure => self.channel_pressure,
            MessageKind::PitchBend => self.pitch_bend,
        }
    }

    /// Mean messages per received packet.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_batch_size(&self) -> Option<f64> {
        if self.packets_received == 0 {
            return None;
        }
        Some(self.messages_received as f64 / self.packets_received as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_by_direction() {
        let metrics = Metrics::default();
        let chord = [
            MidiMessage::note_on(0, 60, 100),
            MidiMessage::note_on(0, 64, 100),
            MidiMessage::program_change(0, 3),
        ];

        metrics.record_packet(PacketDirection::Sent, &chord, 12);
        metrics.record_packet(PacketDirection::Received, &chord, 12);
        metrics.record_packet(PacketDirection::Received, &chord[..1], 7);
        metrics.record_drop();

        let snap = metrics.snapshot();
        assert_eq!(snap.packets_sent, 1);
        assert_eq!(snap.messages_sent, 3);
        assert_eq!(snap.packets_received, 2);
        assert_eq!(snap.messages_received, 4);
        assert_eq!(snap.bytes_received, 19);
        assert_eq!(snap.packets_dropped, 1);
        assert_eq!(snap.received_of(MessageKind::NoteOn), 3);
        assert_eq!(snap.received_of(MessageKind::ProgramChange), 1);
        assert_eq!(snap.received_of(MessageKind::PitchBend), 0);
        assert_eq!(snap.avg_batch_size(), Some(2.0));
    }

    #[test]
    fn test_empty_snapshot() {
        let snap = Metrics::default().snapshot();
        assert_eq!(snap, MetricsSnapshot::default());
        assert_eq!(snap.avg_batch_size(), None);
    }
}

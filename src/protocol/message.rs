//! MIDI channel-voice message

use std::fmt;

use super::MessageKind;

/// One MIDI channel-voice message as carried by MUDP.
///
/// The status byte is stored verbatim so that a caller can build (and the
/// encoder can reject) a message whose kind is not a channel-voice message.
/// For two-byte kinds `data2` never reaches the wire and is held as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "(u8, u8, u8)", into = "(u8, u8, u8)"))]
pub struct MidiMessage {
    status: u8,
    data1: u8,
    data2: u8,
}

impl MidiMessage {
    /// Create a message from raw bytes.
    ///
    /// `data2` is ignored for Program Change and Channel Pressure.
    #[must_use]
    pub const fn new(status: u8, data1: u8, data2: u8) -> Self {
        let data2 = match MessageKind::from_status(status) {
            Some(kind) if !kind.has_data2() => 0,
            _ => data2,
        };
        Self {
            status,
            data1,
            data2,
        }
    }

    /// Create a message of a given kind on a channel (0-15).
    #[must_use]
    pub const fn from_kind(kind: MessageKind, channel: u8, data1: u8, data2: u8) -> Self {
        Self::new(kind.as_nibble() | (channel & 0x0F), data1, data2)
    }

    /// Note Off
    #[must_use]
    pub const fn note_off(channel: u8, note: u8, velocity: u8) -> Self {
        Self::from_kind(MessageKind::NoteOff, channel, note, velocity)
    }

    /// Note On
    #[must_use]
    pub const fn note_on(channel: u8, note: u8, velocity: u8) -> Self {
        Self::from_kind(MessageKind::NoteOn, channel, note, velocity)
    }

    /// Polyphonic Aftertouch
    #[must_use]
    pub const fn poly_aftertouch(channel: u8, note: u8, pressure: u8) -> Self {
        Self::from_kind(MessageKind::PolyAftertouch, channel, note, pressure)
    }

    /// Control Change
    #[must_use]
    pub const fn control_change(channel: u8, controller: u8, value: u8) -> Self {
        Self::from_kind(MessageKind::ControlChange, channel, controller, value)
    }

    /// Program Change
    #[must_use]
    pub const fn program_change(channel: u8, program: u8) -> Self {
        Self::from_kind(MessageKind::ProgramChange, channel, program, 0)
    }

    /// Channel Pressure
    #[must_use]
    pub const fn channel_pressure(channel: u8, pressure: u8) -> Self {
        Self::from_kind(MessageKind::ChannelPressure, channel, pressure, 0)
    }

    /// Pitch Bend from a 14-bit value (0x2000 is center); bits above 13 are dropped.
    #[must_use]
    pub const fn pitch_bend(channel: u8, value: u16) -> Self {
        let lsb = (value & 0x7F) as u8;
        let msb = ((value >> 7) & 0x7F) as u8;
        Self::from_kind(MessageKind::PitchBend, channel, lsb, msb)
    }

    /// Raw status byte
    #[must_use]
    pub const fn status(&self) -> u8 {
        self.status
    }

    /// First data byte
    #[must_use]
    pub const fn data1(&self) -> u8 {
        self.data1
    }

    /// Second data byte, if this kind carries one
    #[must_use]
    pub const fn data2(&self) -> Option<u8> {
        match self.kind() {
            Some(kind) if !kind.has_data2() => None,
            _ => Some(self.data2),
        }
    }

    /// Message kind, `None` if the status is not a channel-voice message
    #[must_use]
    pub const fn kind(&self) -> Option<MessageKind> {
        MessageKind::from_status(self.status)
    }

    /// Channel number (low nibble of the status)
    #[must_use]
    pub const fn channel(&self) -> u8 {
        self.status & 0x0F
    }

    /// Wire width in bytes, `None` for an unrecognized status
    #[must_use]
    pub const fn wire_len(&self) -> Option<usize> {
        match self.kind() {
            Some(kind) => Some(kind.wire_len()),
            None => None,
        }
    }

    /// Raw bytes including the unused `data2` slot
    #[must_use]
    pub const fn to_array(&self) -> [u8; 3] {
        [self.status, self.data1, self.data2]
    }
}

impl From<(u8, u8, u8)> for MidiMessage {
    fn from((status, data1, data2): (u8, u8, u8)) -> Self {
        Self::new(status, data1, data2)
    }
}

impl From<MidiMessage> for (u8, u8, u8) {
    fn from(msg: MidiMessage) -> Self {
        (msg.status, msg.data1, msg.data2)
    }
}

impl fmt::Display for MidiMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Some(kind) if kind.has_data2() => write!(
                f,
                "{kind} ch={} {} {}",
                self.channel(),
                self.data1,
                self.data2
            ),
            Some(kind) => write!(f, "{kind} ch={} {}", self.channel(), self.data1),
            None => write!(f, "Invalid({:#04x})", self.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = MidiMessage::note_on(0, 60, 100);

        assert_eq!(msg.status(), 0x90);
        assert_eq!(msg.kind(), Some(MessageKind::NoteOn));
        assert_eq!(msg.data1(), 60);
        assert_eq!(msg.data2(), Some(100));
        assert_eq!(msg.wire_len(), Some(3));
    }

    #[test]
    fn test_channel_in_low_nibble() {
        let msg = MidiMessage::control_change(9, 123, 0);
        assert_eq!(msg.status(), 0xB9);
        assert_eq!(msg.channel(), 9);

        // out-of-range channels wrap into the nibble
        assert_eq!(MidiMessage::note_off(0x1F, 60, 0).status(), 0x8F);
    }

    #[test]
    fn test_two_byte_kinds_drop_data2() {
        let a = MidiMessage::new(0xC0, 5, 77);
        let b = MidiMessage::program_change(0, 5);

        assert_eq!(a, b);
        assert_eq!(a.data2(), None);
        assert_eq!(a.wire_len(), Some(2));
        assert_eq!(MidiMessage::new(0xD3, 64, 1).to_array(), [0xD3, 64, 0]);
    }

    #[test]
    fn test_invalid_status_kept_verbatim() {
        let msg = MidiMessage::new(0xF0, 1, 2);

        assert_eq!(msg.kind(), None);
        assert_eq!(msg.wire_len(), None);
        assert_eq!(msg.data2(), Some(2));
        assert_eq!(msg.to_string(), "Invalid(0xf0)");
    }

    #[test]
    fn test_pitch_bend_split() {
        let center = MidiMessage::pitch_bend(2, 0x2000);
        assert_eq!(center.to_array(), [0xE2, 0x00, 0x40]);

        let max = MidiMessage::pitch_bend(0, 0x3FFF);
        assert_eq!(max.to_array(), [0xE0, 0x7F, 0x7F]);
    }

    #[test]
    fn test_display() {
        assert_eq!(MidiMessage::note_on(0, 60, 100).to_string(), "NoteOn ch=0 60 100");
        assert_eq!(
            MidiMessage::channel_pressure(3, 40).to_string(),
            "ChannelPressure ch=3 40"
        );
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use crate::protocol::{decode, encode};

    #[test]
    fn test_serde_roundtrip() {
        let msg = MidiMessage::note_on(3, 60, 100);
        let json = serde_json::to_string(&msg).unwrap();

        assert_eq!(json, "[147,60,100]");
        assert_eq!(serde_json::from_str::<MidiMessage>(&json).unwrap(), msg);
    }

    #[test]
    fn test_deserialize_clears_unused_data2() {
        let msg: MidiMessage = serde_json::from_str("[192,5,77]").unwrap();

        assert_eq!(msg, MidiMessage::program_change(0, 5));
        assert_eq!(msg.to_array(), [0xC0, 5, 0]);
        assert_eq!(decode(&encode(&[msg]).unwrap()).unwrap(), [msg]);
    }

    #[test]
    fn test_deserialize_keeps_invalid_status() {
        let msg: MidiMessage = serde_json::from_str("[240,1,2]").unwrap();
        assert_eq!(msg.kind(), None);
        assert!(encode(&[msg]).is_err());
    }
}

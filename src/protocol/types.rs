//! MIDI channel-voice message kinds

use std::fmt;

/// Channel-voice message kinds, keyed by the status high nibble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MessageKind {
    /// Release a note
    NoteOff = 0x80,
    /// Strike a note
    NoteOn = 0x90,
    /// Per-note pressure
    PolyAftertouch = 0xA0,
    /// Controller change
    ControlChange = 0xB0,
    /// Program (patch) select
    ProgramChange = 0xC0,
    /// Channel-wide pressure
    ChannelPressure = 0xD0,
    /// 14-bit pitch wheel
    PitchBend = 0xE0,
}

impl MessageKind {
    /// Resolve the kind from a full status byte.
    ///
    /// Returns `None` for data bytes (< 0x80) and system messages (>= 0xF0).
    #[must_use]
    pub const fn from_status(status: u8) -> Option<Self> {
        match status & 0xF0 {
            0x80 => Some(Self::NoteOff),
            0x90 => Some(Self::NoteOn),
            0xA0 => Some(Self::PolyAftertouch),
            0xB0 => Some(Self::ControlChange),
            0xC0 => Some(Self::ProgramChange),
            0xD0 => Some(Self::ChannelPressure),
            0xE0 => Some(Self::PitchBend),
            _ => None,
        }
    }

    /// Status high nibble (channel bits clear)
    #[must_use]
    pub const fn as_nibble(self) -> u8 {
        self as u8
    }

    /// Whether a second data byte follows on the wire
    #[must_use]
    pub const fn has_data2(self) -> bool {
        !matches!(self, Self::ProgramChange | Self::ChannelPressure)
    }

    /// Bytes this kind occupies on the wire, status included
    #[must_use]
    pub const fn wire_len(self) -> usize {
        if self.has_data2() { 3 } else { 2 }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoteOff => "NoteOff",
            Self::NoteOn => "NoteOn",
            Self::PolyAftertouch => "PolyAftertouch",
            Self::ControlChange => "ControlChange",
            Self::ProgramChange => "ProgramChange",
            Self::ChannelPressure => "ChannelPressure",
            Self::PitchBend => "PitchBend",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_status_ignores_channel() {
        assert_eq!(MessageKind::from_status(0x90), Some(MessageKind::NoteOn));
        assert_eq!(MessageKind::from_status(0x9F), Some(MessageKind::NoteOn));
        assert_eq!(MessageKind::from_status(0xE7), Some(MessageKind::PitchBend));
    }

    #[test]
    fn test_non_channel_status_rejected() {
        assert_eq!(MessageKind::from_status(0x00), None);
        assert_eq!(MessageKind::from_status(0x7F), None);
        assert_eq!(MessageKind::from_status(0xF0), None);
        assert_eq!(MessageKind::from_status(0xFF), None);
    }

    #[test]
    fn test_wire_widths() {
        let three = [
            MessageKind::NoteOff,
            MessageKind::NoteOn,
            MessageKind::PolyAftertouch,
            MessageKind::ControlChange,
            MessageKind::PitchBend,
        ];
        for kind in three {
            assert_eq!(kind.wire_len(), 3, "{kind}");
        }
        assert_eq!(MessageKind::ProgramChange.wire_len(), 2);
        assert_eq!(MessageKind::ChannelPressure.wire_len(), 2);
    }

    #[test]
    fn test_nibble_roundtrip() {
        for nibble in (0x80..=0xE0).step_by(0x10) {
            let kind = MessageKind::from_status(nibble).unwrap();
            assert_eq!(kind.as_nibble(), nibble);
        }
    }
}

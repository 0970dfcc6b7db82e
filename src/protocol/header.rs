//! MUDP packet header
//!
//! The header is 4 bytes and precedes the message run.

use super::{Error, HEADER_SIZE, MAGIC, PROTOCOL_VERSION, Result};

/// MUDP packet header (4 bytes)
///
/// # Wire Format
///
/// ```text
///  0       1       2         3
/// +-------+-------+---------+-------+
/// |  'M'  |  'U'  | version | count |
/// +-------+-------+---------+-------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    version: u8,
    count: u8,
}

impl PacketHeader {
    /// Create a header for the current protocol version
    #[must_use]
    pub const fn new(count: u8) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            count,
        }
    }

    /// Get protocol version
    #[must_use]
    pub const fn version(&self) -> u8 {
        self.version
    }

    /// Get declared message count
    #[must_use]
    pub const fn count(&self) -> u8 {
        self.count
    }

    /// Convert to bytes
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        [MAGIC[0], MAGIC[1], self.version, self.count]
    }

    /// Parse and validate the header at the start of `bytes`.
    ///
    /// Checks run in wire order: length, magic, version, count.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::TruncatedHeader {
                needed: HEADER_SIZE,
                got: bytes.len(),
            });
        }

        if bytes[0..2] != MAGIC {
            return Err(Error::BadMagic {
                found: u16::from_be_bytes([bytes[0], bytes[1]]),
            });
        }

        let version = bytes[2];
        if version != PROTOCOL_VERSION {
            return Err(Error::UnsupportedVersion { version });
        }

        let count = bytes[3];
        if count == 0 {
            return Err(Error::EmptyBatch);
        }

        Ok(Self { version, count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_bytes() {
        assert_eq!(PacketHeader::new(3).to_bytes(), [0x4D, 0x55, 0x01, 0x03]);
    }

    #[test]
    fn test_header_roundtrip() {
        let header = PacketHeader::new(255);
        let decoded = PacketHeader::from_bytes(&header.to_bytes()).unwrap();

        assert_eq!(decoded, header);
        assert_eq!(decoded.version(), PROTOCOL_VERSION);
        assert_eq!(decoded.count(), 255);
    }

    #[test]
    fn test_short_header() {
        let result = PacketHeader::from_bytes(&[0x4D, 0x55, 0x01]);
        assert_eq!(result, Err(Error::TruncatedHeader { needed: 4, got: 3 }));
    }

    #[test]
    fn test_invalid_magic() {
        let result = PacketHeader::from_bytes(&[0x4D, 0x58, 0x01, 0x01]);
        assert_eq!(result, Err(Error::BadMagic { found: 0x4D58 }));
    }

    #[test]
    fn test_magic_checked_before_version() {
        let result = PacketHeader::from_bytes(&[0x00, 0x00, 0x09, 0x00]);
        assert!(matches!(result, Err(Error::BadMagic { .. })));
    }

    #[test]
    fn test_zero_count() {
        let result = PacketHeader::from_bytes(&[0x4D, 0x55, 0x01, 0x00]);
        assert_eq!(result, Err(Error::EmptyBatch));
    }
}

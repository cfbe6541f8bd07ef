#![doc = include_str!("../README.md")]
mod definition;
mod error;
mod protocol;
pub mod parser;

pub use definition::*;
pub use error::{Error, Result};
pub use protocol::*;

/// Initial state of the X.25 accumulator
pub const X25_INIT: u16 = 0xFFFF;

/// Fold a single byte into a CRC-16/MCRF4XX state
///
/// This is the X.25 variant of CRC-16-CCITT used by MAVLink, both for message
/// checksums and for the CRC extra of message definitions.
pub const fn accumulate_byte(state: u16, byte: u8) -> u16 {
    let tmp = byte ^ (state & 0xFF) as u8;
    let tmp = (tmp ^ (tmp << 4)) as u16;
    (state >> 8) ^ (tmp << 8) ^ (tmp << 3) ^ (tmp >> 4)
}

/// Fold `bytes` in order into a CRC-16/MCRF4XX state
pub fn accumulate_bytes(state: u16, bytes: &[u8]) -> u16 {
    bytes
        .iter()
        .fold(state, |state, &byte| accumulate_byte(state, byte))
}

/// Bytes of a textual identifier, one per character
///
/// Identifiers are ASCII in practice; any character up to U+00FF maps to its code point.
///
/// # Errors
///
/// [`Error::InvalidText`] if a character does not fit in a byte.
pub fn text_bytes(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(u8::try_from)
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| Error::InvalidText {
            text: text.to_owned(),
        })
}

/// CRC-16/MCRF4XX of `data` starting from [`X25_INIT`]
pub fn crc16_mcrf4xx(data: &[u8]) -> u16 {
    accumulate_bytes(X25_INIT, data)
}

/// Fold a 16 bit state into the 8 bit CRC extra
pub const fn fold_crc_extra(state: u16) -> u8 {
    ((state & 0xFF) ^ (state >> 8)) as u8
}

/// Running X.25 checksum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct X25 {
    state: u16,
}

impl X25 {
    pub const fn new() -> Self {
        Self { state: X25_INIT }
    }

    pub fn accumulate(&mut self, bytes: &[u8]) {
        self.state = accumulate_bytes(self.state, bytes);
    }

    /// Accumulates the bytes of `text`, see [`text_bytes`]
    pub fn accumulate_str(&mut self, text: &str) -> Result<()> {
        self.accumulate(&text_bytes(text)?);
        Ok(())
    }

    pub fn value(&self) -> u16 {
        self.state
    }

    pub fn crc_extra(&self) -> u8 {
        fold_crc_extra(self.state)
    }
}

impl Default for X25 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc16_mcrf4xx() {
        let input = hex::decode("313233343536373839").unwrap();
        assert_eq!(crc16_mcrf4xx(&input), 0x6F91);
        assert_eq!(crc16_mcrf4xx(&[]), X25_INIT);
    }

    #[test]
    fn bytes_fold_single_bytes() {
        let input = b"HEARTBEAT ";
        let mut state = X25_INIT;
        for &byte in input {
            state = accumulate_byte(state, byte);
        }
        assert_eq!(accumulate_bytes(X25_INIT, input), state);

        let (head, tail) = input.split_at(4);
        assert_eq!(accumulate_bytes(accumulate_bytes(X25_INIT, head), tail), state);
    }

    #[test]
    fn running_checksum() {
        let mut crc = X25::default();
        crc.accumulate_str("123").unwrap();
        crc.accumulate(b"456789");
        assert_eq!(crc.value(), 0x6F91);
        assert_eq!(crc.crc_extra(), 0x6F ^ 0x91);
        assert_eq!(fold_crc_extra(0x1234), 0x26);
    }

    #[test]
    fn text_to_bytes() {
        assert_eq!(text_bytes("uint8_t ").unwrap(), b"uint8_t ".to_vec());
        assert_eq!(text_bytes("\u{e9}").unwrap(), vec![0xE9]);
        assert_eq!(
            text_bytes("\u{3b1}"),
            Err(Error::InvalidText {
                text: "\u{3b1}".to_owned()
            })
        );

        let mut crc = X25::new();
        assert!(crc.accumulate_str("\u{3b1}").is_err());
        assert_eq!(crc.value(), X25_INIT);
    }
}

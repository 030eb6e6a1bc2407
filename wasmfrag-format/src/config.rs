//! Runtime configuration shared by the encoder and the section scanner.

use alloc::vec::Vec;

use wasmfrag_error::{kinds::EncodeError, Result};

use crate::leb128;

/// How length prefixes, counts, section sizes and limits are written and
/// read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthEncoding {
    /// One byte holding a value below 128. Larger magnitudes are rejected.
    #[default]
    SingleByte,
    /// Unsigned LEB128. Identical bytes to `SingleByte` for values below 128.
    Leb128,
}

impl LengthEncoding {
    /// Largest magnitude this encoding accepts
    #[must_use]
    pub const fn max_value(self) -> u64 {
        match self {
            Self::SingleByte => leb128::SINGLE_BYTE_MAX as u64,
            Self::Leb128 => u32::MAX as u64,
        }
    }

    /// Encode `value`, naming the field as `what` in the error on overflow
    pub fn encode(self, what: &'static str, value: usize) -> Result<Vec<u8>> {
        let value = value as u64;
        let max = self.max_value();
        if value > max {
            return Err(EncodeError::ValueOutOfRange { what, value, max }.into());
        }
        Ok(match self {
            Self::SingleByte => alloc::vec![value as u8],
            Self::Leb128 => leb128::write_u64(value),
        })
    }
}

/// Encoder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncoderConfig {
    /// Encoding of every length, count and limit field
    pub length_encoding: LengthEncoding,
}

impl EncoderConfig {
    /// Configuration producing the single-byte layout
    #[must_use]
    pub const fn new() -> Self {
        Self {
            length_encoding: LengthEncoding::SingleByte,
        }
    }

    /// Set the length encoding
    #[must_use]
    pub const fn with_length_encoding(mut self, length_encoding: LengthEncoding) -> Self {
        self.length_encoding = length_encoding;
        self
    }
}

/// Section scanner configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanConfig {
    /// Encoding of each section size field
    pub length_encoding: LengthEncoding,
}

impl ScanConfig {
    /// Configuration reading single-byte size fields
    #[must_use]
    pub const fn new() -> Self {
        Self {
            length_encoding: LengthEncoding::SingleByte,
        }
    }

    /// Set the length encoding
    #[must_use]
    pub const fn with_length_encoding(mut self, length_encoding: LengthEncoding) -> Self {
        self.length_encoding = length_encoding;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wasmfrag_error::codes;

    use super::*;

    #[test]
    fn test_single_byte_bounds() {
        assert_eq!(LengthEncoding::SingleByte.encode("count", 127).unwrap(), [0x7F]);
        let error = LengthEncoding::SingleByte.encode("count", 128).unwrap_err();
        assert_eq!(error.code, codes::VALUE_OUT_OF_RANGE);
        assert!(error.message().contains("count 128"));
    }

    #[test]
    fn test_leb128_widens() {
        assert_eq!(LengthEncoding::Leb128.encode("size", 128).unwrap(), [0x80, 0x01]);
        assert_eq!(LengthEncoding::Leb128.encode("size", 5).unwrap(), [0x05]);
    }

    #[test]
    fn test_defaults_are_single_byte() {
        assert_eq!(EncoderConfig::default(), EncoderConfig::new());
        assert_eq!(ScanConfig::default().length_encoding, LengthEncoding::SingleByte);
        let widened = ScanConfig::new().with_length_encoding(LengthEncoding::Leb128);
        assert_eq!(widened.length_encoding, LengthEncoding::Leb128);
    }
}

//! Module fragment encoder.
//!
//! Every operation is a pure function of its input. Magnitudes that do not
//! fit the configured [`LengthEncoding`] are rejected with an
//! [`ErrorCategory::Encoding`](wasmfrag_error::ErrorCategory::Encoding)
//! error instead of being truncated.
//!
//! The free functions ([`encode_string`], [`encode_vec`], ...) use the
//! default single-byte layout:
//!
//! ```
//! use wasmfrag_format::{encoder::encode_func_type, types::ValueType};
//!
//! let bytes = encode_func_type(&[ValueType::I32, ValueType::I32], &[ValueType::I32]).unwrap();
//! assert_eq!(bytes, [0x60, 2, 0x7F, 0x7F, 1, 0x7F]);
//! ```

use alloc::vec::Vec;

use wasmfrag_error::{kinds::EncodeError, Result};

use crate::{
    binary::{LIMITS_MIN_MAX, LIMITS_MIN_ONLY, WASM_HEADER},
    config::{EncoderConfig, LengthEncoding},
    types::{TypeConstructor, ValueType},
};

/// A function signature
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FuncType {
    /// Parameter types in order
    pub params:  Vec<ValueType>,
    /// Result types in order
    pub results: Vec<ValueType>,
}

impl FuncType {
    /// Create a signature
    #[must_use]
    pub fn new(params: &[ValueType], results: &[ValueType]) -> Self {
        Self {
            params:  params.to_vec(),
            results: results.to_vec(),
        }
    }
}

/// Size range of a memory or table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limits {
    /// Minimum size
    pub min: u32,
    /// Optional maximum size
    pub max: Option<u32>,
}

impl Limits {
    /// Limits with only a minimum
    #[must_use]
    pub const fn min_only(min: u32) -> Self {
        Self { min, max: None }
    }

    /// Limits with a minimum and a maximum
    #[must_use]
    pub const fn bounded(min: u32, max: u32) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }
}

/// Fragment encoder carrying an [`EncoderConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Encoder {
    config: EncoderConfig,
}

impl Encoder {
    /// Create an encoder with the given configuration
    #[must_use]
    pub const fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    #[must_use]
    pub const fn config(&self) -> EncoderConfig {
        self.config
    }

    fn length(&self) -> LengthEncoding {
        self.config.length_encoding
    }

    /// Length-prefixed UTF-8 string. The prefix counts bytes, not characters.
    pub fn string(&self, value: &str) -> Result<Vec<u8>> {
        let mut result = self.length().encode("string length", value.len())?;
        result.extend_from_slice(value.as_bytes());
        Ok(result)
    }

    /// Count-prefixed concatenation of already encoded items
    pub fn vec<T: AsRef<[u8]>>(&self, items: &[T]) -> Result<Vec<u8>> {
        let mut result = self.length().encode("vector length", items.len())?;
        for item in items {
            result.extend_from_slice(item.as_ref());
        }
        Ok(result)
    }

    /// Section id, content size, then content
    pub fn section(&self, id: impl Into<u8>, content: &[u8]) -> Result<Vec<u8>> {
        let id = id.into();
        let size = self.length().encode("section size", content.len())?;

        let mut result = Vec::with_capacity(1 + size.len() + content.len());
        result.push(id);
        result.extend_from_slice(&size);
        result.extend_from_slice(content);

        log::trace!(
            "encoded section 0x{id:02x}: {} content bytes, {} total",
            content.len(),
            result.len()
        );
        Ok(result)
    }

    /// `0x60`, parameter vector, result vector
    pub fn func_type(&self, params: &[ValueType], results: &[ValueType]) -> Result<Vec<u8>> {
        let mut result = Vec::with_capacity(3 + params.len() + results.len());
        result.push(TypeConstructor::Func.as_u8());
        for types in [params, results] {
            result.extend_from_slice(&self.length().encode("vector length", types.len())?);
            result.extend(types.iter().map(|ty| ty.as_u8()));
        }
        Ok(result)
    }

    /// Encode a [`FuncType`]
    pub fn signature(&self, func_type: &FuncType) -> Result<Vec<u8>> {
        self.func_type(&func_type.params, &func_type.results)
    }

    /// Flag byte, minimum, then the maximum when present
    pub fn limits(&self, min: u32, max: Option<u32>) -> Result<Vec<u8>> {
        if let Some(max) = max {
            if max < min {
                return Err(EncodeError::InvalidLimits { min, max }.into());
            }
        }

        let flag = if max.is_some() {
            LIMITS_MIN_MAX
        } else {
            LIMITS_MIN_ONLY
        };

        let mut result = alloc::vec![flag];
        result.extend_from_slice(&self.length().encode("limits minimum", min as usize)?);
        if let Some(max) = max {
            result.extend_from_slice(&self.length().encode("limits maximum", max as usize)?);
        }
        Ok(result)
    }

    /// Encode a [`Limits`] value
    pub fn encode_limits(&self, limits: Limits) -> Result<Vec<u8>> {
        self.limits(limits.min, limits.max)
    }

    /// Header followed by the given encoded sections
    #[must_use]
    pub fn module<T: AsRef<[u8]>>(&self, sections: &[T]) -> Vec<u8> {
        let body: usize = sections.iter().map(|s| s.as_ref().len()).sum();
        let mut result = Vec::with_capacity(WASM_HEADER.len() + body);
        result.extend_from_slice(&WASM_HEADER);
        for section in sections {
            result.extend_from_slice(section.as_ref());
        }
        result
    }
}

const SINGLE_BYTE: Encoder = Encoder::new(EncoderConfig::new());

/// Length-prefixed UTF-8 string, single-byte prefix
pub fn encode_string(value: &str) -> Result<Vec<u8>> {
    SINGLE_BYTE.string(value)
}

/// Count-prefixed vector of encoded items, single-byte count
pub fn encode_vec<T: AsRef<[u8]>>(items: &[T]) -> Result<Vec<u8>> {
    SINGLE_BYTE.vec(items)
}

/// Section with a single-byte size field
pub fn encode_section(id: impl Into<u8>, content: &[u8]) -> Result<Vec<u8>> {
    SINGLE_BYTE.section(id, content)
}

/// Function type signature with single-byte vector counts
pub fn encode_func_type(params: &[ValueType], results: &[ValueType]) -> Result<Vec<u8>> {
    SINGLE_BYTE.func_type(params, results)
}

/// Limits with single-byte magnitudes
pub fn encode_limits(min: u32, max: Option<u32>) -> Result<Vec<u8>> {
    SINGLE_BYTE.limits(min, max)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wasmfrag_error::codes;

    use super::*;
    use crate::section::SectionId;

    const I32: u8 = 0x7F;

    #[test]
    fn test_string() {
        assert_eq!(encode_string("").unwrap(), [0]);
        assert_eq!(encode_string("env").unwrap(), [3, b'e', b'n', b'v']);
        // Two characters, four bytes.
        assert_eq!(encode_string("ñá").unwrap()[0], 4);
    }

    #[test]
    fn test_string_too_long() {
        let long = "x".repeat(128);
        let error = encode_string(&long).unwrap_err();
        assert!(error.is_encoding_error());
        assert_eq!(error.code, codes::VALUE_OUT_OF_RANGE);
        assert_eq!(encode_string(&long[..127]).unwrap().len(), 128);
    }

    #[test]
    fn test_vec() {
        let empty: [&[u8]; 0] = [];
        assert_eq!(encode_vec(&empty).unwrap(), [0]);
        assert_eq!(encode_vec(&[[0x00u8, 0x01], [0x02, 0x03]]).unwrap(), [2, 0, 1, 2, 3]);
    }

    #[test]
    fn test_section() {
        assert_eq!(encode_section(SectionId::Memory, &[]).unwrap(), [5, 0]);
        assert_eq!(encode_section(7u8, &[1, 2, 3]).unwrap(), [7, 3, 1, 2, 3]);
        let error = encode_section(SectionId::Code, &[0u8; 200]).unwrap_err();
        assert!(error.message().contains("section size 200"));
    }

    #[test]
    fn test_func_type() {
        assert_eq!(
            encode_func_type(&[ValueType::I32, ValueType::I32], &[ValueType::I32]).unwrap(),
            [0x60, 2, I32, I32, 1, I32]
        );
        assert_eq!(encode_func_type(&[], &[]).unwrap(), [0x60, 0, 0]);
        let sig = FuncType::new(&[ValueType::I64], &[]);
        assert_eq!(Encoder::default().signature(&sig).unwrap(), [0x60, 1, 0x7E, 0]);
    }

    #[test]
    fn test_limits() {
        assert_eq!(encode_limits(1, None).unwrap(), [0x00, 1]);
        assert_eq!(encode_limits(1, Some(10)).unwrap(), [0x01, 1, 10]);
        assert_eq!(
            Encoder::default().encode_limits(Limits::bounded(0, 0)).unwrap(),
            [0x01, 0, 0]
        );
    }

    #[test]
    fn test_limits_rejections() {
        let error = encode_limits(200, None).unwrap_err();
        assert!(error.message().contains("limits minimum 200"));
        let error = encode_limits(1, Some(300)).unwrap_err();
        assert!(error.message().contains("limits maximum 300"));
        let error = encode_limits(10, Some(1)).unwrap_err();
        assert_eq!(error.code, codes::INVALID_LIMITS);
    }

    #[test]
    fn test_leb128_encoder_widens_fields() {
        let encoder = Encoder::new(EncoderConfig::new().with_length_encoding(LengthEncoding::Leb128));
        let content = [0u8; 200];
        let section = encoder.section(SectionId::Data, &content).unwrap();
        assert_eq!(&section[..3], &[11, 0xC8, 0x01]);
        assert_eq!(section.len(), 203);
        assert_eq!(encoder.limits(1, Some(65536)).unwrap(), [0x01, 1, 0x80, 0x80, 0x04]);
        // Small values are byte-identical to the single-byte layout.
        assert_eq!(encoder.string("env").unwrap(), encode_string("env").unwrap());
    }

    #[test]
    fn test_module_prepends_header() {
        let memory = encode_section(SectionId::Memory, &[1, 0, 1]).unwrap();
        let module = Encoder::default().module(&[memory]);
        assert_eq!(&module[..8], &WASM_HEADER);
        assert_eq!(&module[8..], &[5, 3, 1, 0, 1]);
    }
}

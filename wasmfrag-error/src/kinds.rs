//! Structured error kinds.
//!
//! Each kind keeps the raw values that caused the failure so callers can
//! match on them; every kind converts into [`Error`] with a formatted
//! message.

use alloc::format;

use crate::{codes, Error, ErrorCategory};

/// Reasons a buffer fails the header check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderError {
    /// Fewer than eight bytes available
    TooShort {
        /// Bytes present in the buffer
        actual: usize,
    },
    /// First four bytes are not `\0asm`
    InvalidMagic {
        /// Bytes found at offset 0
        actual: [u8; 4],
    },
    /// Bytes 4..8 are not version 1
    UnsupportedVersion {
        /// Bytes found at offset 4
        actual: [u8; 4],
    },
}

impl From<HeaderError> for Error {
    fn from(kind: HeaderError) -> Self {
        let detail = match kind {
            HeaderError::TooShort { actual } => {
                format!("expected 8 bytes, but only {actual} available")
            }
            HeaderError::InvalidMagic { actual } => {
                format!("Invalid WebAssembly magic bytes: found {actual:02x?}")
            }
            HeaderError::UnsupportedVersion { actual } => {
                format!("Unsupported WebAssembly version: found {actual:02x?}")
            }
        };
        Error::with_message(
            ErrorCategory::Parse,
            codes::INVALID_HEADER,
            format!("invalid header: {detail}"),
        )
    }
}

/// Structural failures while walking the sections of a module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    /// The buffer ended where a field was expected
    UnexpectedEnd {
        /// Offset of the missing field
        offset:   usize,
        /// Bytes the field needs
        expected: usize,
        /// Bytes left in the buffer
        actual:   usize,
    },
    /// A section declares more content than the buffer holds
    SectionSizeExceedsModule {
        /// Section identifier
        section_id:   u8,
        /// Declared content size
        section_size: usize,
        /// Bytes left after the size field
        remaining:    usize,
        /// Offset of the section content
        offset:       usize,
    },
    /// A size byte has its continuation bit set while only single-byte sizes
    /// are accepted
    MultiByteSizeField {
        /// Section identifier
        section_id: u8,
        /// Offset of the size byte
        offset:     usize,
        /// The offending byte
        byte:       u8,
    },
}

impl From<ScanError> for Error {
    fn from(kind: ScanError) -> Self {
        match kind {
            ScanError::UnexpectedEnd {
                offset,
                expected,
                actual,
            } => Error::unexpected_end(offset, expected, actual),
            ScanError::SectionSizeExceedsModule {
                section_id,
                section_size,
                remaining,
                offset,
            } => Error::section_size_exceeds_module(section_id, section_size, remaining, offset),
            ScanError::MultiByteSizeField {
                section_id,
                offset,
                byte,
            } => Error::with_message(
                ErrorCategory::Parse,
                codes::MULTI_BYTE_SIZE_FIELD,
                format!(
                    "Section (ID: 0x{section_id:02x}) size byte 0x{byte:02x} at offset \
                     0x{offset:x} continues into a multi-byte size, which single-byte scanning \
                     does not accept"
                ),
            ),
        }
    }
}

/// Encoder input that cannot be represented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// A magnitude exceeds what the length encoding can hold
    ValueOutOfRange {
        /// Which field was being encoded
        what:  &'static str,
        /// The rejected value
        value: u64,
        /// Largest accepted value
        max:   u64,
    },
    /// A limits pair whose maximum is below its minimum
    InvalidLimits {
        /// Minimum
        min: u32,
        /// Maximum
        max: u32,
    },
}

impl From<EncodeError> for Error {
    fn from(kind: EncodeError) -> Self {
        match kind {
            EncodeError::ValueOutOfRange { what, value, max } => {
                Error::value_out_of_range(what, value, max)
            }
            EncodeError::InvalidLimits { min, max } => Error::with_message(
                ErrorCategory::Encoding,
                codes::INVALID_LIMITS,
                format!("limits maximum {max} is smaller than minimum {min}"),
            ),
        }
    }
}

// wasmfrag - wasmfrag-error
// Module: Error Types
//
// Copyright (c) 2025 The wasmfrag Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

use alloc::{borrow::Cow, format, string::String};
use core::fmt;

use crate::codes;

/// `Error` categories for wasmfrag operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCategory {
    /// Structural errors while reading a binary
    Parse      = 1,
    /// Encoder input that cannot be represented
    Encoding   = 2,
    /// Values that are well-formed but not acceptable
    Validation = 3,
}

impl ErrorCategory {
    /// Human readable category name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Parse => "Parse",
            Self::Encoding => "Encoding",
            Self::Validation => "Validation",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// wasmfrag `Error` type
///
/// Every failure carries a category, a numeric code from [`codes`] and a
/// message. Static messages cost nothing; formatted messages are owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// `Error` category
    pub category: ErrorCategory,
    /// `Error` code
    pub code:     u16,
    message:      Cow<'static, str>,
}

impl Error {
    /// Create a new error with a static message.
    #[must_use]
    pub const fn new(category: ErrorCategory, code: u16, message: &'static str) -> Self {
        Self {
            category,
            code,
            message: Cow::Borrowed(message),
        }
    }

    /// Create a new error with a formatted message.
    #[must_use]
    pub fn with_message(category: ErrorCategory, code: u16, message: impl Into<String>) -> Self {
        Self {
            category,
            code,
            message: Cow::Owned(message.into()),
        }
    }

    /// The error message without category or code
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Create a generic parse error
    #[must_use]
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCategory::Parse, codes::PARSE_ERROR, message)
    }

    /// Create a generic encoding error
    #[must_use]
    pub fn encoding_error(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCategory::Encoding, codes::ENCODING_ERROR, message)
    }

    /// Create a generic validation error
    #[must_use]
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCategory::Validation, codes::VALIDATION_ERROR, message)
    }

    /// Create an unexpected end error
    #[must_use]
    pub fn unexpected_end(offset: usize, expected: usize, actual: usize) -> Self {
        Self::with_message(
            ErrorCategory::Parse,
            codes::UNEXPECTED_END,
            format!(
                "Unexpected end of data at offset 0x{offset:x}: expected {expected} bytes, but only \
                 {actual} available"
            ),
        )
    }

    /// Create a section size exceeds module error
    #[must_use]
    pub fn section_size_exceeds_module(
        section_id: u8,
        section_size: usize,
        remaining: usize,
        offset: usize,
    ) -> Self {
        Self::with_message(
            ErrorCategory::Parse,
            codes::SECTION_SIZE_EXCEEDS_MODULE,
            format!(
                "Section size exceeds module size: section (ID: 0x{section_id:02x}) at offset \
                 0x{offset:x} has size {section_size}, but module only has {remaining} bytes \
                 remaining"
            ),
        )
    }

    /// Create a value out of range error for encoder input
    #[must_use]
    pub fn value_out_of_range(what: &str, value: u64, max: u64) -> Self {
        Self::with_message(
            ErrorCategory::Encoding,
            codes::VALUE_OUT_OF_RANGE,
            format!("{what} {value} exceeds the supported maximum of {max}"),
        )
    }

    /// Check if this is a parse error
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        self.category == ErrorCategory::Parse
    }

    /// Check if this is an encoding error
    #[must_use]
    pub fn is_encoding_error(&self) -> bool {
        self.category == ErrorCategory::Encoding
    }

    /// Check if this is a validation error
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        self.category == ErrorCategory::Validation
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}][E{:04}] {}", self.category, self.code, self.message)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

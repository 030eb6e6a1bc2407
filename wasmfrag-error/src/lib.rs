// wasmfrag - wasmfrag-error
// Module: Error Handling
//
// Copyright (c) 2025 The wasmfrag Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! wasmfrag error handling library
//!
//! A single [`Error`] type is shared by the encoder and the section scanner.
//! Errors carry a category, a numeric code and a message.
//!
//! # Error Categories
//!
//! ## Parse Errors (1000-1999)
//! - Invalid header (magic or version mismatch, short buffer)
//! - Truncated buffers and oversized sections
//! - Malformed LEB128 integers
//!
//! ## Encoding Errors (2000-2999)
//! - Magnitudes outside the configured length encoding
//! - Inconsistent limits
//!
//! ## Validation Errors (3000-3999)
//! - Unknown constants
//!
//! # Usage
//!
//! ```
//! use wasmfrag_error::{codes, kinds::HeaderError, Error, ErrorCategory};
//!
//! let error = Error::from(HeaderError::TooShort { actual: 4 });
//! assert_eq!(error.category, ErrorCategory::Parse);
//! assert_eq!(error.code, codes::INVALID_HEADER);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

/// Error codes for wasmfrag
pub mod codes;
/// Error and error category types
pub mod errors;
/// Structured error kinds
pub mod kinds;

pub use errors::{Error, ErrorCategory};

/// A specialized `Result` type for wasmfrag operations.
pub type Result<T> = core::result::Result<T, Error>;

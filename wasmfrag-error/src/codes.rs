// wasmfrag - wasmfrag-error
// Module: Error Codes
//
// Copyright (c) 2025 The wasmfrag Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error codes for wasmfrag
//!
//! Codes are grouped by the layer that raises them. Parse codes cover
//! everything the section scanner and LEB128 readers report, encoding codes
//! cover rejected encoder input.

// Parse error codes (1000-1999)
/// Generic parse error
pub const PARSE_ERROR: u16 = 1000;
/// Buffer does not start with the `\0asm` magic and version 1
pub const INVALID_HEADER: u16 = 1001;
/// Buffer ended before a field could be read
pub const UNEXPECTED_END: u16 = 1004;
/// Section declares more content than the buffer holds
pub const SECTION_SIZE_EXCEEDS_MODULE: u16 = 1005;
/// LEB128 integer ran past the end of the buffer
pub const TRUNCATED_LEB128: u16 = 1006;
/// LEB128 integer does not fit in the target width
pub const LEB128_OVERFLOW: u16 = 1007;
/// Size field uses a continuation byte while the single-byte convention is
/// active
pub const MULTI_BYTE_SIZE_FIELD: u16 = 1008;
/// Invalid UTF-8 in a name
pub const INVALID_UTF8: u16 = 1009;

// Encoding error codes (2000-2999)
/// Generic encoding error
pub const ENCODING_ERROR: u16 = 2000;
/// Value does not fit the configured length encoding
pub const VALUE_OUT_OF_RANGE: u16 = 2001;
/// Limits maximum is smaller than the minimum
pub const INVALID_LIMITS: u16 = 2002;

// Validation error codes (3000-3999)
/// Generic validation error
pub const VALIDATION_ERROR: u16 = 3000;
/// Unknown constant in a closed table
pub const UNKNOWN_CONSTANT: u16 = 3001;

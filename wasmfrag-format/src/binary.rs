//! WebAssembly binary layout constants and header validation.
//!
//! The flat byte constants mirror the enums in [`crate::section`] and
//! [`crate::types`] for callers that assemble bytes by hand.

#![allow(missing_docs)] // grouped constants share one doc line

use alloc::string::{String, ToString};
use core::str;

use wasmfrag_error::{codes, kinds::HeaderError, Error, ErrorCategory, Result};

/// Magic bytes for WebAssembly modules: \0asm
pub const WASM_MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6D];

/// WebAssembly binary format version
pub const WASM_VERSION: [u8; 4] = [0x01, 0x00, 0x00, 0x00];

/// Canonical module header: magic followed by version
pub const WASM_HEADER: [u8; 8] = [0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];

/// Length of [`WASM_HEADER`]
pub const HEADER_LEN: usize = WASM_HEADER.len();

/// WebAssembly section IDs
pub const CUSTOM_SECTION_ID: u8 = 0x00;
pub const TYPE_SECTION_ID: u8 = 0x01;
pub const IMPORT_SECTION_ID: u8 = 0x02;
pub const FUNCTION_SECTION_ID: u8 = 0x03;
pub const TABLE_SECTION_ID: u8 = 0x04;
pub const MEMORY_SECTION_ID: u8 = 0x05;
pub const GLOBAL_SECTION_ID: u8 = 0x06;
pub const EXPORT_SECTION_ID: u8 = 0x07;
pub const START_SECTION_ID: u8 = 0x08;
pub const ELEMENT_SECTION_ID: u8 = 0x09;
pub const CODE_SECTION_ID: u8 = 0x0A;
pub const DATA_SECTION_ID: u8 = 0x0B;
pub const DATA_COUNT_SECTION_ID: u8 = 0x0C;

/// WebAssembly value types
pub const I32_TYPE: u8 = 0x7F;
pub const I64_TYPE: u8 = 0x7E;
pub const F32_TYPE: u8 = 0x7D;
pub const F64_TYPE: u8 = 0x7C;

/// Function type constructor
pub const FUNC_TYPE: u8 = 0x60;

/// Import/export descriptor kinds
pub const EXTERNAL_FUNC: u8 = 0x00;
pub const EXTERNAL_TABLE: u8 = 0x01;
pub const EXTERNAL_MEMORY: u8 = 0x02;
pub const EXTERNAL_GLOBAL: u8 = 0x03;

/// Limits flags
pub const LIMITS_MIN_ONLY: u8 = 0x00;
pub const LIMITS_MIN_MAX: u8 = 0x01;

/// WebAssembly control instructions
pub const UNREACHABLE: u8 = 0x00;
pub const NOP: u8 = 0x01;
pub const BLOCK: u8 = 0x02;
pub const LOOP: u8 = 0x03;
pub const IF: u8 = 0x04;
pub const ELSE: u8 = 0x05;
pub const END: u8 = 0x0B;
pub const BR: u8 = 0x0C;
pub const BR_IF: u8 = 0x0D;
pub const RETURN: u8 = 0x0F;
pub const CALL: u8 = 0x10;
pub const DROP: u8 = 0x1A;

/// WebAssembly variable instructions
pub const LOCAL_GET: u8 = 0x20;
pub const LOCAL_SET: u8 = 0x21;
pub const GLOBAL_GET: u8 = 0x23;

/// WebAssembly constant instructions
pub const I32_CONST: u8 = 0x41;
pub const I64_CONST: u8 = 0x42;

/// Check if a binary has a valid WebAssembly header
///
/// Returns `false` for buffers shorter than eight bytes instead of failing.
#[must_use]
pub fn is_valid_wasm_header(bytes: &[u8]) -> bool {
    check_header(bytes).is_ok()
}

/// Check the header and report why it is rejected
///
/// The returned [`HeaderError`] converts into an "invalid header" [`Error`].
pub fn check_header(bytes: &[u8]) -> core::result::Result<(), HeaderError> {
    if bytes.len() < HEADER_LEN {
        return Err(HeaderError::TooShort {
            actual: bytes.len(),
        });
    }

    let mut magic = [0u8; 4];
    magic.copy_from_slice(&bytes[0..4]);
    if magic != WASM_MAGIC {
        return Err(HeaderError::InvalidMagic { actual: magic });
    }

    let mut version = [0u8; 4];
    version.copy_from_slice(&bytes[4..8]);
    if version != WASM_VERSION {
        return Err(HeaderError::UnsupportedVersion { actual: version });
    }

    Ok(())
}

fn decode_utf8(bytes: &[u8]) -> Result<&str> {
    str::from_utf8(bytes).map_err(|e| {
        Error::with_message(
            ErrorCategory::Parse,
            codes::INVALID_UTF8,
            alloc::format!("Invalid UTF-8 sequence: {e}"),
        )
    })
}

/// Validate that a byte slice contains valid UTF-8
pub fn validate_utf8(bytes: &[u8]) -> Result<()> {
    decode_utf8(bytes).map(|_| ())
}

/// Read a length-prefixed UTF-8 name at `pos`
///
/// Returns the string and the number of bytes consumed, prefix included.
/// The prefix is read as unsigned LEB128, which for lengths below 128 is the
/// single length byte the encoder writes.
pub fn read_string(bytes: &[u8], pos: usize) -> Result<(String, usize)> {
    let (str_len, len_size) = crate::leb128::read_u32(bytes, pos)?;
    let str_start = pos + len_size;
    let str_end = str_start + str_len as usize;

    if str_end > bytes.len() {
        return Err(Error::unexpected_end(
            str_start,
            str_len as usize,
            bytes.len() - str_start,
        ));
    }

    let value = decode_utf8(&bytes[str_start..str_end])?;
    Ok((value.to_string(), len_size + str_len as usize))
}

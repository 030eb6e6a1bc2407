//! LEB128 variable-length integers.
//!
//! Readers return `(value, bytes_consumed)` and reject both truncated input
//! and encodings that do not fit the target width.

use alloc::{vec, vec::Vec};

use wasmfrag_error::{codes, Error, ErrorCategory, Result};

/// Largest value a single LEB128 byte can hold
pub const SINGLE_BYTE_MAX: u8 = 0x7F;

const CONTINUATION_BIT: u8 = 0x80;
const SIGN_BIT: u8 = 0x40;

fn truncated(pos: usize) -> Error {
    Error::with_message(
        ErrorCategory::Parse,
        codes::TRUNCATED_LEB128,
        alloc::format!("Truncated LEB128 integer at position {pos}"),
    )
}

fn too_large(pos: usize, bits: u32) -> Error {
    Error::with_message(
        ErrorCategory::Parse,
        codes::LEB128_OVERFLOW,
        alloc::format!("LEB128 integer at position {pos} does not fit in {bits} bits"),
    )
}

fn read_unsigned(bytes: &[u8], pos: usize, bits: u32) -> Result<(u64, usize)> {
    let mut result = 0u64;
    let mut shift = 0u32;
    let mut offset = 0usize;

    loop {
        let byte = *bytes.get(pos + offset).ok_or_else(|| truncated(pos))?;
        offset += 1;

        let payload = u64::from(byte & SINGLE_BYTE_MAX);
        // The final group may only carry the bits that are left.
        if shift + 7 > bits && payload >> (bits - shift) != 0 {
            return Err(too_large(pos, bits));
        }
        result |= payload << shift;

        if byte & CONTINUATION_BIT == 0 {
            return Ok((result, offset));
        }

        shift += 7;
        if shift >= bits {
            return Err(too_large(pos, bits));
        }
    }
}

fn read_signed(bytes: &[u8], pos: usize, bits: u32) -> Result<(i64, usize)> {
    let mut result = 0i64;
    let mut shift = 0u32;
    let mut offset = 0usize;

    loop {
        let byte = *bytes.get(pos + offset).ok_or_else(|| truncated(pos))?;
        offset += 1;

        let payload = byte & SINGLE_BYTE_MAX;
        // Bits of the final group beyond the width must repeat the sign bit.
        if shift + 7 > bits {
            let unused = payload >> (bits - shift - 1);
            if unused != 0 && unused != SINGLE_BYTE_MAX >> (bits - shift - 1) {
                return Err(too_large(pos, bits));
            }
        }
        result |= i64::from(payload) << shift;
        shift += 7;

        if byte & CONTINUATION_BIT == 0 {
            if shift < 64 && byte & SIGN_BIT != 0 {
                result |= !0 << shift;
            }
            break;
        }

        if shift >= bits {
            return Err(too_large(pos, bits));
        }
    }

    if bits < 64 {
        let min = -(1i64 << (bits - 1));
        let max = (1i64 << (bits - 1)) - 1;
        if result < min || result > max {
            return Err(too_large(pos, bits));
        }
    }

    Ok((result, offset))
}

/// Read an unsigned 32-bit LEB128 integer at `pos`
pub fn read_u32(bytes: &[u8], pos: usize) -> Result<(u32, usize)> {
    let (value, len) = read_unsigned(bytes, pos, 32)?;
    Ok((value as u32, len))
}

/// Read an unsigned 64-bit LEB128 integer at `pos`
pub fn read_u64(bytes: &[u8], pos: usize) -> Result<(u64, usize)> {
    read_unsigned(bytes, pos, 64)
}

/// Read a signed 32-bit LEB128 integer at `pos`
pub fn read_i32(bytes: &[u8], pos: usize) -> Result<(i32, usize)> {
    let (value, len) = read_signed(bytes, pos, 32)?;
    Ok((value as i32, len))
}

/// Read a signed 64-bit LEB128 integer at `pos`
pub fn read_i64(bytes: &[u8], pos: usize) -> Result<(i64, usize)> {
    read_signed(bytes, pos, 64)
}

/// Write an unsigned 64-bit LEB128 integer
#[must_use]
pub fn write_u64(value: u64) -> Vec<u8> {
    if value == 0 {
        return vec![0];
    }

    let mut result = Vec::new();
    let mut value = value;

    while value != 0 {
        let mut byte = (value & u64::from(SINGLE_BYTE_MAX)) as u8;
        value >>= 7;

        if value != 0 {
            byte |= CONTINUATION_BIT;
        }

        result.push(byte);
    }

    result
}

/// Write an unsigned 32-bit LEB128 integer
#[must_use]
pub fn write_u32(value: u32) -> Vec<u8> {
    write_u64(u64::from(value))
}

/// Write a signed 64-bit LEB128 integer
#[must_use]
pub fn write_i64(value: i64) -> Vec<u8> {
    let mut result = Vec::new();
    let mut value = value;

    loop {
        let byte = (value & i64::from(SINGLE_BYTE_MAX)) as u8;
        value >>= 7;

        let sign_bit_set = byte & SIGN_BIT != 0;
        if (value == 0 && !sign_bit_set) || (value == -1 && sign_bit_set) {
            result.push(byte);
            return result;
        }

        result.push(byte | CONTINUATION_BIT);
    }
}

/// Write a signed 32-bit LEB128 integer
#[must_use]
pub fn write_i32(value: i32) -> Vec<u8> {
    write_i64(i64::from(value))
}

/// Number of bytes `value` occupies as unsigned LEB128
#[must_use]
pub fn encoded_len_u64(value: u64) -> usize {
    let significant = 64 - value.leading_zeros() as usize;
    significant.div_ceil(7).max(1)
}

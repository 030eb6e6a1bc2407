// wasmfrag - wasmfrag-format
// Module: WebAssembly Binary Fragment Encoding
//
// Copyright (c) 2025 The wasmfrag Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

#![forbid(unsafe_code)]

//! WebAssembly binary fragment encoding for wasmfrag
//!
//! This crate defines the constants of the WebAssembly binary format
//! (header, section ids, value types, opcodes, descriptor kinds) and encodes
//! module fragments from structured input: strings, vectors, sections,
//! function signatures and limits.
//!
//! Encoding is pure and deterministic. By default every length field is a
//! single byte and larger magnitudes are rejected; an [`Encoder`] configured
//! with [`LengthEncoding::Leb128`] widens those fields instead.
//!
//! ```
//! use wasmfrag_format::{
//!     binary::WASM_HEADER,
//!     encoder::{encode_limits, encode_section, encode_vec},
//!     section::SectionId,
//! };
//!
//! let memory = encode_section(SectionId::Memory, &encode_vec(&[encode_limits(1, None)?])?)?;
//! let mut module = WASM_HEADER.to_vec();
//! module.extend_from_slice(&memory);
//! assert_eq!(&module[8..], &[5, 3, 1, 0, 1]);
//! # Ok::<(), wasmfrag_error::Error>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod binary;
pub mod config;
pub mod encoder;
pub mod leb128;
pub mod section;
pub mod types;

pub use binary::{is_valid_wasm_header, WASM_HEADER, WASM_MAGIC, WASM_VERSION};
pub use config::{EncoderConfig, LengthEncoding, ScanConfig};
pub use encoder::{
    encode_func_type, encode_limits, encode_section, encode_string, encode_vec, Encoder, FuncType,
    Limits,
};
pub use section::SectionId;
pub use types::{ExportKind, ExternalKind, ImportKind, Opcode, TypeConstructor, ValueType};
pub use wasmfrag_error::{Error, ErrorCategory, Result};

// wasmfrag - wasmfrag-decoder
// Module: WebAssembly Section Scanner
//
// Copyright (c) 2025 The wasmfrag Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WebAssembly section scanner for wasmfrag
//!
//! Walks the top-level sections of a module and records where each one
//! starts and how large it is, without decoding any section contents.
//!
//! ```
//! use wasmfrag_decoder::parse_wasm_sections;
//!
//! let module = [0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00, 0x05, 0x03, 0x01, 0x00, 0x01];
//! let index = parse_wasm_sections(&module)?;
//! let memory = index.get(5).ok_or_else(|| wasmfrag_error::Error::parse_error("no memory"))?;
//! assert_eq!((memory.offset, memory.content_size, memory.total_size), (10, 3, 5));
//! # Ok::<(), wasmfrag_error::Error>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod section_reader;

pub use section_reader::{
    parse_wasm_sections, parse_wasm_sections_with_config, section_content, ScanState,
    SectionIndex, SectionInfo, SectionReader,
};
pub use wasmfrag_error::{Error, Result};
pub use wasmfrag_format::{binary::is_valid_wasm_header, config::ScanConfig, LengthEncoding};

// wasmfrag - wasmfrag-fixtures
// Module: Fixture Builder and Validator
//
// Copyright (c) 2025 The wasmfrag Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Hand-encoded WebAssembly test fixtures
//!
//! [`fixture::build_panic_module`] assembles a small module from encoder
//! fragments: it imports `env._panic(i32, i32)`, exports one page of memory
//! and a `doPanic` function that calls `_panic(100, 10)`. The [`validate`]
//! module checks the result against the section scanner and known byte
//! sequences, and [`render`] prints it as a hexdump or a TypeScript
//! `Uint8Array` literal.

#![forbid(unsafe_code)]

pub mod fixture;
pub mod render;
pub mod validate;

pub use fixture::{build_panic_module, Fixture, SectionSize};
pub use validate::{validate_fixture, Check, Report};

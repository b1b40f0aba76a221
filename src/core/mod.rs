// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout protodec.
//!
//! This module provides the foundational types for the library:
//! - [`Error`] - Pipeline-wide error handling
//! - [`Value`] - Unified decoded value representation

pub mod error;
pub mod value;

pub use error::{Error, Result};
pub use value::{FieldMap, Value};

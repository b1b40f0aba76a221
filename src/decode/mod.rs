// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Payload normalization and dynamic decoding.
//!
//! [`normalize`] turns hexadecimal payload text into raw wire bytes;
//! [`DynamicDecoder`] interprets those bytes against a resolved message
//! descriptor.

pub mod decoder;
pub mod hex;

pub use decoder::DynamicDecoder;
pub use hex::normalize;

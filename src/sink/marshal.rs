// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Record marshalers.

use crate::core::{Error, Result};
use crate::source::Record;

use super::Marshaler;

/// JSON marshaler backed by serde_json.
///
/// Serializes the record's field map as one self-contained JSON object;
/// the payload field's decoded structure nests as objects/arrays per
/// field cardinality and kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMarshaler;

impl JsonMarshaler {
    /// Create a new JSON marshaler.
    pub fn new() -> Self {
        Self
    }
}

impl Marshaler for JsonMarshaler {
    fn marshal(&self, record: &Record) -> Result<Vec<u8>> {
        serde_json::to_vec(&record.fields).map_err(|e| Error::marshal("json", e.to_string()))
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Dynamic protobuf decoder using prost-reflect.
//!
//! Decodes wire bytes against a runtime [`MessageDescriptor`] with no
//! generated code, producing a generic [`Value::Message`] tree.

use prost_reflect::{DynamicMessage, MessageDescriptor, ReflectMessage};

use crate::core::{FieldMap, Value};
use crate::core::{Error, Result};

/// Decoder for protobuf wire data with runtime schemas.
#[derive(Debug, Default)]
pub struct DynamicDecoder {
    _private: (),
}

impl DynamicDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Decode wire bytes as one instance of the given message type.
    ///
    /// Malformed input (truncated payloads, bad varints, unknown wire
    /// types) fails with a decode error from the underlying wire parser.
    pub fn decode(&self, data: &[u8], descriptor: &MessageDescriptor) -> Result<Value> {
        let message = DynamicMessage::decode(descriptor.clone(), data).map_err(|e| {
            Error::decode(
                "protobuf",
                format!("invalid encoding for '{}': {e}", descriptor.full_name()),
            )
        })?;

        Ok(Value::Message(self.flatten(&message)))
    }

    /// Flatten a dynamic message into a field map.
    ///
    /// Fields are visited in declaration order; only fields present on the
    /// wire are emitted (no default-value placeholders). Repeated fields
    /// keep their wire order, nested messages recurse.
    fn flatten(&self, message: &DynamicMessage) -> FieldMap {
        let descriptor = message.descriptor();
        let mut fields = FieldMap::with_capacity(descriptor.fields().len());

        for field in descriptor.fields() {
            if !message.has_field(&field) {
                continue;
            }
            let value = message.get_field(&field);
            if let Some(converted) = self.reflect_to_value(value.as_ref()) {
                fields.insert(field.name().to_string(), converted);
            }
        }

        fields
    }

    /// Convert a prost-reflect value to the crate value model.
    fn reflect_to_value(&self, value: &prost_reflect::Value) -> Option<Value> {
        match value {
            prost_reflect::Value::Bool(v) => Some(Value::Bool(*v)),
            prost_reflect::Value::I32(v) => Some(Value::Int32(*v)),
            prost_reflect::Value::I64(v) => Some(Value::Int64(*v)),
            prost_reflect::Value::U32(v) => Some(Value::UInt32(*v)),
            prost_reflect::Value::U64(v) => Some(Value::UInt64(*v)),
            prost_reflect::Value::F32(v) => Some(Value::Float32(*v)),
            prost_reflect::Value::F64(v) => Some(Value::Float64(*v)),
            prost_reflect::Value::String(v) => Some(Value::String(v.clone())),
            prost_reflect::Value::Bytes(v) => Some(Value::Bytes(v.to_vec())),
            prost_reflect::Value::EnumNumber(v) => Some(Value::Int32(*v)),
            prost_reflect::Value::List(items) => {
                let converted: Vec<Value> = items
                    .iter()
                    .filter_map(|item| self.reflect_to_value(item))
                    .collect();
                Some(Value::List(converted))
            }
            prost_reflect::Value::Message(nested) => Some(Value::Message(self.flatten(nested))),
            // Map fields have no counterpart in the value model; skipped.
            prost_reflect::Value::Map(_) => None,
        }
    }
}

// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decoded value type system.
//!
//! Provides the generic representation of a protobuf message decoded
//! against a runtime schema: a closed set of scalar kinds plus ordered
//! lists (repeated fields) and nested messages.

use serde::Serialize;
use std::collections::HashMap;

/// Type alias for a decoded message as field name -> value mapping.
pub type FieldMap = HashMap<String, Value>;

/// Unified value type for dynamically decoded protobuf data.
///
/// Every value a protobuf wire payload can carry maps onto exactly one
/// variant: scalars keep their wire kind, repeated fields become [`Value::List`]
/// in wire order, and nested messages become [`Value::Message`]. Enum values
/// surface as their numeric representation ([`Value::Int32`]).
///
/// Serialization is untagged so that marshaled records read as plain JSON
/// (`{"name":"Alice","age":30}` rather than `{"String":...}`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    // Boolean
    Bool(bool),

    // Signed integers
    Int32(i32),
    Int64(i64),

    // Unsigned integers
    UInt32(u32),
    UInt64(u64),

    // Floating point
    Float32(f32),
    Float64(f64),

    // String (UTF-8)
    String(String),

    // Binary data (bytes fields)
    Bytes(Vec<u8>),

    // Ordered sequence, preserving wire order of repeated fields
    List(Vec<Value>),

    // Nested message
    Message(FieldMap),
}

impl Value {
    /// Try to get the inner string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner message.
    pub fn as_message(&self) -> Option<&FieldMap> {
        match self {
            Value::Message(m) => Some(m),
            _ => None,
        }
    }
}

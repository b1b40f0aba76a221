// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Output sink: marshaling and writing capabilities.
//!
//! Two orthogonal capabilities compose the sink: a [`Marshaler`] turns a
//! record into bytes, and a [`RecordWriter`] makes those bytes durable.
//! Both are selected by name from configuration and both must be safe for
//! concurrent use by the decode workers.

pub mod marshal;
pub mod writer;

use std::path::Path;

use crate::core::{Error, Result};
use crate::source::Record;

pub use marshal::JsonMarshaler;
pub use writer::{ConsoleWriter, FileWriter};

/// Serialization capability: record map -> bytes.
pub trait Marshaler: Send + Sync {
    /// Serialize one record.
    fn marshal(&self, record: &Record) -> Result<Vec<u8>>;

    /// Name this marshaler is selected by.
    fn name(&self) -> &'static str;
}

/// Destination capability: bytes -> durable effect.
///
/// Implementations terminate each record with a newline and serialize
/// concurrent calls so lines never interleave.
pub trait RecordWriter: Send + Sync {
    /// Write one serialized record.
    fn write(&self, data: &[u8]) -> Result<()>;

    /// Name this writer is selected by.
    fn name(&self) -> &'static str;
}

/// Look up a marshaler by name.
pub fn marshaler_for(name: &str) -> Result<Box<dyn Marshaler>> {
    match name {
        "json" => Ok(Box::new(JsonMarshaler::new())),
        other => Err(Error::config(format!(
            "invalid marshaler name '{other}', valid options: json"
        ))),
    }
}

/// Look up a writer by name.
///
/// The file writer requires a destination path.
pub fn writer_for(name: &str, destination: Option<&Path>) -> Result<Box<dyn RecordWriter>> {
    match name {
        "console" => Ok(Box::new(ConsoleWriter::new())),
        "file" => {
            let path = destination.ok_or_else(|| {
                Error::config("the file writer requires a destination path")
            })?;
            Ok(Box::new(FileWriter::create(path)?))
        }
        other => Err(Error::config(format!(
            "invalid writer name '{other}', valid options: console, file"
        ))),
    }
}

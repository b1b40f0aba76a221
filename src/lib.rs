// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Protodec
//!
//! Bulk decoder for protobuf payloads described by runtime schemas.
//!
//! Schemas arrive as compiled `FileDescriptorSet` files and are compiled
//! into a [`schema::SchemaRegistry`]; payloads arrive as hexadecimal text
//! inside comma-delimited rows and come out the other end as JSON lines,
//! one per input record. Modules by stage:
//! - **Schemas** in [`schema`](crate::schema) - descriptor registration and lookup
//! - **Decoding** in [`decode`](crate::decode) - hex normalization and dynamic
//!   message decoding
//! - **Ingest** in [`source`](crate::source) - comma-delimited record streaming
//! - **Output** in [`sink`](crate::sink) - marshalers and writers
//! - **Coordination** in [`pipeline`](crate::pipeline) - the bounded-queue
//!   worker pool tying the stages together
//!
//! ## Example: decoding a batch
//!
//! ```rust,no_run
//! # fn main() -> protodec::Result<()> {
//! use std::io::Cursor;
//!
//! use protodec::pipeline::{Pipeline, PipelineConfig};
//! use protodec::schema::SchemaRegistry;
//! use protodec::sink::{ConsoleWriter, JsonMarshaler};
//!
//! let mut registry = SchemaRegistry::new();
//! registry.load("person.pb")?;
//!
//! let config = PipelineConfig::new(
//!     "pkg.Person",
//!     vec!["id".to_string(), "data".to_string()],
//! );
//! let pipeline = Pipeline::new(&registry, config)?;
//!
//! let input = Cursor::new("1,0a05416c696365101e\n");
//! let outcome = pipeline.run(input, &JsonMarshaler::new(), &ConsoleWriter::new())?;
//! outcome.into_result()?;
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{Error, FieldMap, Result, Value};

// Schema registration and lookup
pub mod schema;

// Hex normalization and dynamic decoding
pub mod decode;

// Record ingest
pub mod source;

// Marshalers and writers
pub mod sink;

// Bounded-queue worker pipeline
pub mod pipeline;

pub use pipeline::{Pipeline, PipelineConfig, PipelineOutcome};
pub use schema::SchemaRegistry;
pub use source::{Record, RecordSource};

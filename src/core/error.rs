// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for protodec.
//!
//! One variant per pipeline failure class:
//! - Configuration validation
//! - Schema loading and resolution
//! - Source I/O and row ingestion
//! - Payload normalization and decoding
//! - Output marshaling and writing

use std::fmt;

/// Errors that can occur anywhere in the decode pipeline.
#[derive(Debug, Clone)]
pub enum Error {
    /// Invalid pipeline or CLI configuration
    Config {
        /// What is wrong with the configuration
        reason: String,
    },

    /// Schema container could not be loaded, or a type could not be resolved
    Schema {
        /// File path or type name involved
        subject: String,
        /// Failure description
        reason: String,
    },

    /// Underlying I/O failure (file open, read, metadata)
    Io {
        /// Failure description from the OS
        reason: String,
    },

    /// A tabular input row could not be turned into a record
    Record {
        /// 1-based line number of the offending row
        line: u64,
        /// Failure description
        reason: String,
    },

    /// Payload text or wire bytes could not be decoded
    Decode {
        /// What was being decoded (e.g. "hex", "protobuf")
        context: String,
        /// Failure description
        reason: String,
    },

    /// A record could not be serialized for output
    Marshal {
        /// Marshaler name (e.g. "json")
        format: String,
        /// Failure description
        reason: String,
    },

    /// Serialized bytes could not be written to the sink
    Write {
        /// Writer name (e.g. "console", "file")
        sink: String,
        /// Failure description
        reason: String,
    },
}

impl Error {
    /// Create a configuration error.
    pub fn config(reason: impl Into<String>) -> Self {
        Error::Config {
            reason: reason.into(),
        }
    }

    /// Create a schema error.
    pub fn schema(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Schema {
            subject: subject.into(),
            reason: reason.into(),
        }
    }

    /// Create a record ingestion error for the given 1-based line.
    pub fn record(line: u64, reason: impl Into<String>) -> Self {
        Error::Record {
            line,
            reason: reason.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Decode {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Create a marshal error.
    pub fn marshal(format: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Marshal {
            format: format.into(),
            reason: reason.into(),
        }
    }

    /// Create a write error.
    pub fn write(sink: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Write {
            sink: sink.into(),
            reason: reason.into(),
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Error::Config { reason } => vec![("reason", reason.clone())],
            Error::Schema { subject, reason } => {
                vec![("subject", subject.clone()), ("reason", reason.clone())]
            }
            Error::Io { reason } => vec![("reason", reason.clone())],
            Error::Record { line, reason } => {
                vec![("line", line.to_string()), ("reason", reason.clone())]
            }
            Error::Decode { context, reason } => {
                vec![("context", context.clone()), ("reason", reason.clone())]
            }
            Error::Marshal { format, reason } => {
                vec![("format", format.clone()), ("reason", reason.clone())]
            }
            Error::Write { sink, reason } => {
                vec![("sink", sink.clone()), ("reason", reason.clone())]
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config { reason } => {
                write!(f, "Invalid configuration: {reason}")
            }
            Error::Schema { subject, reason } => {
                write!(f, "Schema error for '{subject}': {reason}")
            }
            Error::Io { reason } => write!(f, "I/O error: {reason}"),
            Error::Record { line, reason } => {
                write!(f, "Record error at line {line}: {reason}")
            }
            Error::Decode { context, reason } => {
                write!(f, "Decode error in {context}: {reason}")
            }
            Error::Marshal { format, reason } => {
                write!(f, "{format} marshal error: {reason}")
            }
            Error::Write { sink, reason } => {
                write!(f, "{sink} write error: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            reason: err.to_string(),
        }
    }
}

/// Result type for protodec operations.
pub type Result<T> = std::result::Result<T, Error>;

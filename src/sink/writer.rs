// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Record writers.
//!
//! Writers append a newline terminator after each record and are safe for
//! concurrent invocation by multiple decode workers: the write plus the
//! terminator form one critical section.

use std::fs::File;
use std::io::Write as _;
use std::path::Path;
use std::sync::Mutex;

use crate::core::{Error, Result};

use super::RecordWriter;

/// Writer that emits one line per record to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleWriter;

impl ConsoleWriter {
    /// Create a new console writer.
    pub fn new() -> Self {
        Self
    }
}

impl RecordWriter for ConsoleWriter {
    fn write(&self, data: &[u8]) -> Result<()> {
        // The stdout lock makes record + newline atomic across workers.
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        out.write_all(data)
            .and_then(|_| out.write_all(b"\n"))
            .map_err(|e| Error::write("console", e.to_string()))
    }

    fn name(&self) -> &'static str {
        "console"
    }
}

/// Writer that appends one line per record to a file.
pub struct FileWriter {
    file: Mutex<File>,
}

impl FileWriter {
    /// Create (truncate) the destination file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| {
            Error::write(
                "file",
                format!("failed to create '{}': {e}", path.display()),
            )
        })?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl RecordWriter for FileWriter {
    fn write(&self, data: &[u8]) -> Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|e| Error::write("file", format!("writer lock poisoned: {e}")))?;
        file.write_all(data)
            .and_then(|_| file.write_all(b"\n"))
            .map_err(|e| Error::write("file", e.to_string()))
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

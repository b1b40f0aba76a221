// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Tabular record source.
//!
//! Streams comma-delimited rows into [`Record`]s, binding columns
//! positionally to a caller-supplied field-name list. The stream is lazy,
//! finite, and not restartable; the first bad row ends it.

use std::collections::HashMap;
use std::io;

use crate::core::{Error, Result, Value};

/// One unit of pipeline work.
///
/// `position` is the 1-based row number within the input stream. `fields`
/// maps the configured field names to values taken verbatim from the row;
/// the pipeline later replaces the payload field with its decoded form.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// 1-based sequence position within the input stream
    pub position: u64,
    /// Field name -> value mapping for this row
    pub fields: HashMap<String, Value>,
}

/// Lazy iterator of [`Record`]s over comma-delimited input.
///
/// Each row must supply at least as many columns as there are configured
/// field names; a short row yields a fatal record error naming the 1-based
/// line, after which the iterator is exhausted. Extra columns are ignored.
pub struct RecordSource<R: io::Read> {
    rows: csv::StringRecordsIntoIter<R>,
    field_names: Vec<String>,
    position: u64,
    failed: bool,
}

impl<R: io::Read> RecordSource<R> {
    /// Create a record source over the given reader.
    pub fn new(input: R, field_names: Vec<String>) -> Self {
        // Rows are plain data, not headed; column-count enforcement is
        // ours (short rows fail, long rows are truncated).
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input);

        Self {
            rows: reader.into_records(),
            field_names,
            position: 0,
            failed: false,
        }
    }
}

impl<R: io::Read> Iterator for RecordSource<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let row = match self.rows.next()? {
            Ok(row) => row,
            Err(e) => {
                self.failed = true;
                return Some(Err(Error::record(
                    self.position + 1,
                    format!("failed to read delimited row: {e}"),
                )));
            }
        };
        self.position += 1;

        if row.len() < self.field_names.len() {
            self.failed = true;
            return Some(Err(Error::record(
                self.position,
                format!(
                    "row has {} columns, expected at least {}",
                    row.len(),
                    self.field_names.len()
                ),
            )));
        }

        let mut fields = HashMap::with_capacity(self.field_names.len());
        for (name, value) in self.field_names.iter().zip(row.iter()) {
            fields.insert(name.clone(), Value::String(value.to_string()));
        }

        Some(Ok(Record {
            position: self.position,
            fields,
        }))
    }
}

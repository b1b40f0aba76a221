// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Concurrent ingest/decode/output pipeline.
//!
//! One producer thread streams records from the tabular source onto a
//! bounded queue; a fixed pool of workers pulls records, decodes the
//! payload field in place, marshals the whole record, and hands the bytes
//! to the shared writer. The queue bound gives natural backpressure: the
//! producer suspends while the queue is full.
//!
//! There is no output-order guarantee across workers; FIFO holds only for
//! the producer's enqueue order and within each worker.
//!
//! The first failure from any stage cancels the run cooperatively: the
//! producer and the remaining workers observe the cancellation flag and
//! wind down, and the coordinator reports the processed count together
//! with that first error instead of aborting the process.

use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::thread;

use crossbeam_channel::bounded;
use prost_reflect::MessageDescriptor;

use crate::core::{Error, Result, Value};
use crate::decode::{normalize, DynamicDecoder};
use crate::schema::SchemaRegistry;
use crate::sink::{Marshaler, RecordWriter};
use crate::source::{Record, RecordSource};

/// Default number of decode workers.
pub const DEFAULT_WORKERS: usize = 10;

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Fully qualified name of the target message type
    pub message: String,
    /// Column names, bound positionally to each input row
    pub field_names: Vec<String>,
    /// The field whose value is replaced with the decoded structure
    pub payload_field: String,
    /// Number of decode workers
    pub workers: usize,
    /// Queue capacity override; defaults to `2 * workers`
    pub queue_capacity: Option<usize>,
}

impl PipelineConfig {
    /// Create a configuration with default worker count and payload field.
    pub fn new(message: impl Into<String>, field_names: Vec<String>) -> Self {
        Self {
            message: message.into(),
            field_names,
            payload_field: "data".to_string(),
            workers: DEFAULT_WORKERS,
            queue_capacity: None,
        }
    }

    /// Set the payload field name.
    pub fn with_payload_field(mut self, name: impl Into<String>) -> Self {
        self.payload_field = name.into();
        self
    }

    /// Set the worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Override the bounded queue capacity.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }

    /// Effective queue capacity.
    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity.unwrap_or(2 * self.workers)
    }

    /// Validate the configuration before any I/O starts.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::config("worker count must be at least 1"));
        }
        if let Some(0) = self.queue_capacity {
            return Err(Error::config("queue capacity must be at least 1"));
        }
        if self.field_names.is_empty() {
            return Err(Error::config("the field-name list is empty"));
        }
        if self.field_names.iter().any(|name| name.is_empty()) {
            return Err(Error::config("field names can't be empty"));
        }
        if !self.field_names.contains(&self.payload_field) {
            return Err(Error::config(format!(
                "the payload field '{}' isn't in the field list",
                self.payload_field
            )));
        }
        Ok(())
    }
}

/// Outcome of one pipeline run.
///
/// `processed` counts records fully written to the sink. When any stage
/// failed, `first_error` carries the earliest captured failure; records
/// in flight or still queued at that point were abandoned.
#[derive(Debug)]
pub struct PipelineOutcome {
    /// Records successfully decoded, marshaled and written
    pub processed: u64,
    /// First failure captured from any stage, if any
    pub first_error: Option<Error>,
}

impl PipelineOutcome {
    /// True when the whole input drained without failure.
    pub fn is_success(&self) -> bool {
        self.first_error.is_none()
    }

    /// Convert into a result carrying the processed count.
    pub fn into_result(self) -> Result<u64> {
        match self.first_error {
            None => Ok(self.processed),
            Some(err) => Err(err),
        }
    }
}

/// Coordinator for the ingest/decode/output pipeline.
pub struct Pipeline<'a> {
    registry: &'a SchemaRegistry,
    config: PipelineConfig,
}

impl<'a> Pipeline<'a> {
    /// Validate the configuration and build a pipeline over the registry.
    ///
    /// Configuration violations surface here, before any I/O.
    pub fn new(registry: &'a SchemaRegistry, config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    /// Stream the input through the worker pool until drained or failed.
    pub fn run<R>(
        &self,
        input: R,
        marshaler: &dyn Marshaler,
        writer: &dyn RecordWriter,
    ) -> Result<PipelineOutcome>
    where
        R: io::Read + Send,
    {
        let descriptor = self.registry.resolve(&self.config.message)?;

        let (tx, rx) = bounded::<Record>(self.config.queue_capacity());
        let cancelled = AtomicBool::new(false);
        let processed = AtomicU64::new(0);
        let first_error: Mutex<Option<Error>> = Mutex::new(None);
        let decoder = DynamicDecoder::new();

        thread::scope(|scope| {
            let field_names = self.config.field_names.clone();
            {
                let cancelled = &cancelled;
                let first_error = &first_error;
                scope.spawn(move || {
                    let source = RecordSource::new(input, field_names);
                    for item in source {
                        if cancelled.load(Ordering::Relaxed) {
                            break;
                        }
                        match item {
                            // A send error means every worker is gone;
                            // nothing left to feed.
                            Ok(record) => {
                                if tx.send(record).is_err() {
                                    break;
                                }
                            }
                            Err(err) => {
                                capture_failure(first_error, cancelled, err);
                                break;
                            }
                        }
                    }
                    // Dropping the sender closes the queue.
                });
            }

            for _ in 0..self.config.workers {
                let rx = rx.clone();
                let descriptor = descriptor.clone();
                let payload_field = self.config.payload_field.as_str();
                let cancelled = &cancelled;
                let processed = &processed;
                let first_error = &first_error;
                let decoder = &decoder;
                scope.spawn(move || {
                    while let Ok(mut record) = rx.recv() {
                        if cancelled.load(Ordering::Relaxed) {
                            break;
                        }
                        let position = record.position;
                        let outcome =
                            decode_payload(&mut record, payload_field, decoder, &descriptor)
                                .and_then(|_| marshaler.marshal(&record))
                                .and_then(|bytes| writer.write(&bytes));
                        match outcome {
                            Ok(()) => {
                                processed.fetch_add(1, Ordering::Relaxed);
                            }
                            Err(err) => {
                                tracing::warn!(
                                    record = position,
                                    error = %err,
                                    "record failed, cancelling pipeline"
                                );
                                capture_failure(first_error, cancelled, err);
                                break;
                            }
                        }
                    }
                });
            }

            // Workers own their clones of the receiver.
            drop(rx);
        });

        let outcome = PipelineOutcome {
            processed: processed.load(Ordering::Relaxed),
            first_error: first_error
                .into_inner()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        };
        tracing::debug!(processed = outcome.processed, "pipeline drained");
        Ok(outcome)
    }
}

/// Replace the payload field's hex text with its decoded structure.
fn decode_payload(
    record: &mut Record,
    payload_field: &str,
    decoder: &DynamicDecoder,
    descriptor: &MessageDescriptor,
) -> Result<()> {
    let bytes = {
        let payload = record
            .fields
            .get(payload_field)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::decode(
                    "payload",
                    format!("record {} has no text payload in '{payload_field}'", record.position),
                )
            })?;
        normalize(payload)?
    };
    let decoded = decoder.decode(&bytes, descriptor)?;
    record.fields.insert(payload_field.to_string(), decoded);
    Ok(())
}

/// Record the first failure and flip the cancellation flag.
fn capture_failure(slot: &Mutex<Option<Error>>, cancelled: &AtomicBool, error: Error) {
    cancelled.store(true, Ordering::Relaxed);
    let mut slot = slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if slot.is_none() {
        *slot = Some(error);
    }
}

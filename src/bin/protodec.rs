// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Protodec CLI
//!
//! Bulk-decode hex-encoded protobuf payloads using a compiled descriptor set.
//!
//! ## Usage
//!
//! ```sh
//! # Decode inline rows to stdout
//! protodec -p person.pb -m pkg.Person --data '1,0a05416c696365101e'
//!
//! # Decode a file of rows into JSON lines
//! protodec -p person.pb -m pkg.Person \
//!     --src-file records.csv --writer file --dst-file out.jsonl
//!
//! # Rows with more than one column
//! protodec -p person.pb -m pkg.Person \
//!     --fields id,ts,data --src-file records.csv
//! ```

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::PathBuf;
use std::process;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use protodec::pipeline::{Pipeline, PipelineConfig, DEFAULT_WORKERS};
use protodec::schema::SchemaRegistry;
use protodec::sink::{marshaler_for, writer_for};

/// Protodec - bulk protobuf payload decoder
///
/// Compiles a FileDescriptorSet at startup, then streams comma-delimited
/// records through a worker pool that decodes each hex payload into the
/// named message type and emits one JSON line per record.
#[derive(Parser)]
#[command(name = "protodec")]
#[command(about = "Bulk decoder for hex-encoded protobuf payloads", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Path to the compiled FileDescriptorSet
    #[arg(short = 'p', long = "descriptor")]
    descriptor: PathBuf,

    /// Fully qualified message type name, e.g. pkg.Person
    #[arg(short = 'm', long = "message")]
    message: String,

    /// Inline comma-delimited records (ignored when --src-file is set)
    #[arg(long = "data", default_value = "")]
    data: String,

    /// Read records from this file instead of --data
    #[arg(long = "src-file")]
    src_file: Option<PathBuf>,

    /// Destination path for the file writer
    #[arg(long = "dst-file")]
    dst_file: Option<PathBuf>,

    /// Comma-separated field names bound positionally to row columns
    #[arg(long = "fields", default_value = "data")]
    fields: String,

    /// Name of the field carrying the hex payload
    #[arg(long = "payload-field", default_value = "data")]
    payload_field: String,

    /// Number of decode workers
    #[arg(short = 'w', long = "workers", default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Queue capacity between ingest and workers (default: 2 * workers)
    #[arg(long = "queue-capacity")]
    queue_capacity: Option<usize>,

    /// Output writer: console or file
    #[arg(long = "writer", default_value = "console")]
    writer: String,

    /// Output marshaler: json
    #[arg(long = "marshaler", default_value = "json")]
    marshaler: String,
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut registry = SchemaRegistry::new();
    registry
        .load(&cli.descriptor)
        .with_context(|| format!("failed to load '{}'", cli.descriptor.display()))?;

    let field_names: Vec<String> = cli.fields.split(',').map(str::to_string).collect();
    let mut config = PipelineConfig::new(&cli.message, field_names)
        .with_payload_field(&cli.payload_field)
        .with_workers(cli.workers);
    if let Some(capacity) = cli.queue_capacity {
        config = config.with_queue_capacity(capacity);
    }

    let pipeline = Pipeline::new(&registry, config)?;
    let marshaler = marshaler_for(&cli.marshaler)?;
    let writer = writer_for(&cli.writer, cli.dst_file.as_deref())?;

    let input: Box<dyn Read + Send> = match &cli.src_file {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("failed to open '{}'", path.display()))?,
        ),
        None => Box::new(Cursor::new(cli.data.clone())),
    };

    let outcome = pipeline.run(input, marshaler.as_ref(), writer.as_ref())?;
    let processed = outcome.processed;
    outcome
        .into_result()
        .with_context(|| format!("pipeline stopped after {processed} records"))?;

    tracing::info!(processed, "decode complete");
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

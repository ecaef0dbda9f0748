//! CAMT.053 pipeline - Directory scan and PostgreSQL persistence.
//!
//! Wires the extractors from `camt-extractor` to a [`RecordSink`]. The
//! [`store::PgSink`] implementation writes to the `camt53` and `camt_raw`
//! tables created by the embedded migrations.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod ingest;
pub mod models;
pub mod scan;
pub mod sink;
pub mod store;
pub mod worker;

pub use config::{PipelineConfig, ScanConfig};
pub use db::{create_pool, run_migrations};
pub use error::{PipelineError, Result};
pub use ingest::{process_file, run_scan, FileOutcome, ScanSummary};
pub use models::{ExtractionProfile, StoredEntry, StoredHeader};
pub use sink::RecordSink;
pub use store::PgSink;

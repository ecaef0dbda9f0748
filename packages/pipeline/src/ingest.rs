//! Per-file ingest: read, extract, hand records to a sink.
//!
//! Faults are contained at two levels. A file that cannot be read or parsed
//! produces no records and an error for the caller to log. A record the sink
//! rejects is logged with its entry reference and the next record is tried.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use camt_extractor::{
    extract_entries_from_str, extract_header_from_str, EntryRecord, ExtractionWarning,
};

use crate::error::{PipelineError, Result};
use crate::models::ExtractionProfile;
use crate::scan;
use crate::sink::RecordSink;

/// What happened to one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileOutcome {
    pub extracted: usize,
    pub inserted: usize,
    pub failed: usize,
    pub warnings: usize,
}

/// Totals for one directory scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub files_found: usize,
    pub files_processed: usize,
    /// Files skipped because they could not be read or parsed.
    pub files_failed: usize,
    pub records_extracted: usize,
    pub records_inserted: usize,
    pub records_failed: usize,
}

impl ScanSummary {
    fn add(&mut self, outcome: &FileOutcome) {
        self.files_processed += 1;
        self.records_extracted += outcome.extracted;
        self.records_inserted += outcome.inserted;
        self.records_failed += outcome.failed;
    }
}

/// Name stored as the resource URL of header rows.
pub fn resource_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Process one file with `profile`, stamping records with `processed_at`.
///
/// Input must be UTF-8, as ISO 20022 requires. Returns an error only when the
/// file cannot be read, is not UTF-8, or is not well-formed XML; in that case
/// nothing has been written to `sink`.
pub async fn process_file<S>(
    path: &Path,
    profile: ExtractionProfile,
    sink: &S,
    processed_at: DateTime<Utc>,
) -> Result<FileOutcome>
where
    S: RecordSink + ?Sized,
{
    let bytes = tokio::fs::read(path).await?;
    let xml = String::from_utf8(bytes).map_err(|e| PipelineError::NotUtf8 {
        path: path.to_path_buf(),
        valid_up_to: e.utf8_error().valid_up_to(),
    })?;

    match profile {
        ExtractionProfile::Full => ingest_entries(path, &xml, sink, processed_at).await,
        ExtractionProfile::Header => ingest_header(path, &xml, sink, processed_at).await,
    }
}

async fn ingest_entries<S>(
    path: &Path,
    xml: &str,
    sink: &S,
    processed_at: DateTime<Utc>,
) -> Result<FileOutcome>
where
    S: RecordSink + ?Sized,
{
    let extraction = extract_entries_from_str(xml, processed_at)?;
    log_warnings(path, &extraction.warnings);

    let mut outcome = FileOutcome {
        extracted: extraction.records.len(),
        warnings: extraction.warnings.len(),
        ..FileOutcome::default()
    };

    for record in &extraction.records {
        if store_entry(path, record, sink).await {
            outcome.inserted += 1;
        } else {
            outcome.failed += 1;
        }
    }

    info!(
        file = %path.display(),
        statements = extraction.statement_count,
        inserted = outcome.inserted,
        failed = outcome.failed,
        "file processed"
    );
    Ok(outcome)
}

async fn store_entry<S>(path: &Path, record: &EntryRecord, sink: &S) -> bool
where
    S: RecordSink + ?Sized,
{
    match sink.insert_entry(record).await {
        Ok(id) => {
            debug!(
                file = %path.display(),
                entry_ref = %record.reference(),
                id = %id,
                "entry inserted"
            );
            true
        }
        Err(e) => {
            error!(
                file = %path.display(),
                entry_ref = %record.reference(),
                stmt_id = %record.statement.statement_id,
                error = %e,
                "failed to insert entry"
            );
            false
        }
    }
}

async fn ingest_header<S>(
    path: &Path,
    xml: &str,
    sink: &S,
    processed_at: DateTime<Utc>,
) -> Result<FileOutcome>
where
    S: RecordSink + ?Sized,
{
    let extraction = extract_header_from_str(xml, &resource_name(path), processed_at)?;
    log_warnings(path, &extraction.warnings);

    let mut outcome = FileOutcome {
        extracted: 1,
        warnings: extraction.warnings.len(),
        ..FileOutcome::default()
    };

    match sink.insert_header(&extraction.record).await {
        Ok(id) => {
            info!(
                file = %path.display(),
                msg_id = %extraction.record.message_id,
                id = %id,
                "header inserted"
            );
            outcome.inserted = 1;
        }
        Err(e) => {
            error!(
                file = %path.display(),
                msg_id = %extraction.record.message_id,
                error = %e,
                "failed to insert header"
            );
            outcome.failed = 1;
        }
    }

    Ok(outcome)
}

fn log_warnings(path: &Path, warnings: &[ExtractionWarning]) {
    for warning in warnings {
        match warning {
            ExtractionWarning::EmptyStatement { .. } => {
                debug!(file = %path.display(), "{warning}")
            }
            _ => warn!(file = %path.display(), "{warning}"),
        }
    }
}

/// Scan `dir` once and ingest every `*.xml` file in listing order.
///
/// Only a failure to prepare or list the directory is returned as an error.
pub async fn run_scan<S>(dir: &Path, profile: ExtractionProfile, sink: &S) -> Result<ScanSummary>
where
    S: RecordSink + ?Sized,
{
    let files = scan::discover_files(dir).await?;
    info!(dir = %dir.display(), files = files.len(), profile = %profile, "starting scan");

    Ok(run_files(&files, profile, sink).await)
}

/// Ingest an explicit list of files, in the given order.
pub async fn run_files<S>(
    files: &[PathBuf],
    profile: ExtractionProfile,
    sink: &S,
) -> ScanSummary
where
    S: RecordSink + ?Sized,
{
    let mut summary = ScanSummary {
        files_found: files.len(),
        ..ScanSummary::default()
    };

    for path in files {
        match process_file(path, profile, sink, Utc::now()).await {
            Ok(outcome) => summary.add(&outcome),
            Err(e) => {
                error!(file = %path.display(), error = %e, "skipping file");
                summary.files_failed += 1;
            }
        }
    }

    summary
}

//! Command-line interface for the extractor.
//!
//! Prints every mapped record of one file as a JSON line, without touching a
//! database.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, ValueEnum};

use crate::error::Result;
use crate::full::extract_entries_from_str;
use crate::header::extract_header_from_str;
use crate::types::ExtractionWarning;

/// CAMT.053 extractor - Print the rows a statement file maps to.
#[derive(Parser)]
#[command(name = "camt-extract")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// CAMT.053 XML file
    pub file: PathBuf,

    /// Extraction profile
    #[arg(short, long, value_enum, default_value_t = Profile::Full)]
    pub profile: Profile,
}

/// Which rows to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    /// One row per entry
    Full,
    /// One row per file, group header only
    Header,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&cli.file, cli.profile, &mut out)
}

/// Extract `file` with `profile` and write JSON lines to `out`.
pub fn execute<W: Write>(file: &Path, profile: Profile, out: &mut W) -> Result<()> {
    let xml = fs::read_to_string(file)?;
    let processed_at = Utc::now();

    match profile {
        Profile::Full => {
            let extraction = extract_entries_from_str(&xml, processed_at)?;
            report_warnings(file, &extraction.warnings);
            for record in &extraction.records {
                serde_json::to_writer(&mut *out, record)?;
                writeln!(out)?;
            }
            tracing::info!(
                file = %file.display(),
                statements = extraction.statement_count,
                records = extraction.records.len(),
                "extraction complete"
            );
        }
        Profile::Header => {
            let resource_url = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let extraction = extract_header_from_str(&xml, &resource_url, processed_at)?;
            report_warnings(file, &extraction.warnings);
            serde_json::to_writer(&mut *out, &extraction.record)?;
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn report_warnings(file: &Path, warnings: &[ExtractionWarning]) {
    for warning in warnings {
        tracing::warn!(file = %file.display(), "{warning}");
    }
}

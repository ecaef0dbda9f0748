//! CAMT.053 extractor - Flatten ISO 20022 bank statements into relational records.
//!
//! This crate maps a parsed CAMT.053 document onto flat rows ready for a
//! relational store. It does not read directories or talk to a database;
//! see the `camt-pipeline` crate for that.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use camt_extractor::full::extract_entries_from_str;
//!
//! let xml = r#"<Document xmlns="urn:iso:std:iso:20022:tech:xsd:camt.053.001.02">
//!   <BkToCstmrStmt>
//!     <Stmt><ElctrncSeqNb>7</ElctrncSeqNb><Ntry/><Ntry/></Stmt>
//!   </BkToCstmrStmt>
//! </Document>"#;
//!
//! let extraction = extract_entries_from_str(xml, Utc::now()).unwrap();
//! assert_eq!(extraction.records.len(), 2);
//! assert_eq!(extraction.records[1].statement.sequence_number, 7);
//! ```
//!
//! # Architecture
//!
//! - [`xml`]: namespace-qualified tree queries
//! - [`defaults`]: per-field default and coercion table
//! - [`full`]: full profile, one record per entry
//! - [`header`]: header-only profile, one record per document
//! - [`types`]: context structs, records and warnings
//! - [`config`]: constants stamped onto records
//! - [`error`]: error types and Result alias
//! - [`cli`]: command-line interface

pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod full;
pub mod header;
pub mod types;
pub mod xml;

pub use error::{ExtractError, Result};
pub use full::{extract_entries, extract_entries_from_str, FullExtraction};
pub use header::{extract_header, extract_header_from_str, HeaderExtraction};
pub use types::{
    CreationTimestamp, EntryFields, EntryRecord, ExtractionWarning, GroupHeader, HeaderRecord,
    Provenance, StatementContext,
};

//! Persistence seam between the extractors and a storage engine.

use async_trait::async_trait;
use uuid::Uuid;

use camt_extractor::{EntryRecord, HeaderRecord};

use crate::error::Result;

/// Destination for extracted records.
///
/// Each call stores exactly one row and returns its id. Callers await one
/// call before issuing the next, and a failed call says nothing about the
/// rows before or after it.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Store one full-profile entry row.
    async fn insert_entry(&self, record: &EntryRecord) -> Result<Uuid>;

    /// Store one header-only row.
    async fn insert_header(&self, record: &HeaderRecord) -> Result<Uuid>;
}

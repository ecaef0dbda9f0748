//! Header-only profile: one record per document.
//!
//! Reads the group-header fields with document-wide lookups and never looks
//! at `Stmt` or `Ntry`. The raw statement payload is not captured.

use chrono::{DateTime, Utc};
use roxmltree::Document;

use crate::defaults::{resolve_text, resolve_timestamp, Field};
use crate::error::Result;
use crate::types::{ExtractionWarning, HeaderRecord};
use crate::xml::{text_opt, NsQuery};

/// Result of running the header-only profile over one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderExtraction {
    pub record: HeaderRecord,
    pub warnings: Vec<ExtractionWarning>,
}

/// Parse `xml` and run the header-only profile over it.
///
/// `resource_url` is stored on the record as-is (the source file name).
pub fn extract_header_from_str(
    xml: &str,
    resource_url: &str,
    processed_at: DateTime<Utc>,
) -> Result<HeaderExtraction> {
    let doc = Document::parse(xml)?;
    Ok(extract_header(&doc, resource_url, processed_at))
}

/// Run the header-only profile over a parsed document.
pub fn extract_header(
    doc: &Document<'_>,
    resource_url: &str,
    processed_at: DateTime<Utc>,
) -> HeaderExtraction {
    let query = NsQuery::new(doc);
    let text = |field: Field, local: &str| {
        resolve_text(
            field,
            text_opt(query.first_in_document(local)).as_deref(),
            processed_at,
        )
    };

    let raw_creation = text_opt(query.first_in_document("CreDtTm"));
    let (creation_date_time, creation_defaulted) = resolve_timestamp(
        Field::HeaderCreationDateTime,
        raw_creation.as_deref(),
        processed_at,
    );

    let mut warnings = Vec::new();
    if creation_defaulted {
        warnings.push(ExtractionWarning::CreationTimeDefaulted);
    }

    let record = HeaderRecord::new(
        text(Field::MessageId, "MsgId"),
        text(Field::RecipientName, "Nm"),
        text(Field::RecipientOrgId, "OrgId"),
        (creation_date_time, creation_defaulted),
        resource_url.to_string(),
        processed_at,
    );

    HeaderExtraction { record, warnings }
}

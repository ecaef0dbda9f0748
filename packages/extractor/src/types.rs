//! Core data types for the extractor.
//!
//! Context structs ([`GroupHeader`], [`StatementContext`], [`EntryFields`])
//! are built fresh per file and folded into output records. Records are the
//! only thing that leaves the extractor.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{JOB_TYPE_AUTO, RECORD_STATUS_ACTIVE, STATEMENT_TYPE, SYSTEM_USER};

/// Statement creation timestamp as carried on entry rows.
///
/// Kept as text. When the file declares no `CreDtTm` the processing time is
/// substituted, and that substitution stays visible so it is never mistaken
/// for the bank's own creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "value", rename_all = "snake_case")]
pub enum CreationTimestamp {
    /// Text of the first `CreDtTm` in the document.
    Declared(String),
    /// Processing wall-clock time in sortable ISO-8601 form.
    ProcessingTime(String),
}

impl CreationTimestamp {
    /// The timestamp text, declared or substituted.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Declared(s) | Self::ProcessingTime(s) => s,
        }
    }

    /// `true` when the value is the processing-time fallback.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::ProcessingTime(_))
    }

    /// The declared text, or an empty string for the fallback.
    pub fn declared(&self) -> &str {
        match self {
            Self::Declared(s) => s,
            Self::ProcessingTime(_) => "",
        }
    }
}

/// Message-level fields shared by every statement in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupHeader {
    pub message_id: String,
    pub creation: CreationTimestamp,
    pub recipient_name: String,
    pub recipient_org_id: String,
}

/// Fields scoped to one `Stmt` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementContext {
    pub statement_id: String,
    /// `ElctrncSeqNb`, 0 when absent or not an integer.
    pub sequence_number: i32,
    pub account_holder_name: String,
    pub account_number: String,
    /// Servicing bank BIC.
    pub bank_id: String,
}

/// Fields of one `Ntry`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EntryFields {
    pub entry_reference: String,
    /// Raw `ValDt/DtTm` or `ValDt/Dt` text.
    pub value_date: String,
    pub domain_code: String,
    pub family_code: String,
    pub sub_family_code: String,
    pub proprietary_code: String,
    pub account_servicer_reference: String,
    pub payment_info_id: String,
    pub end_to_end_id: String,
    pub transaction_id: String,
    pub remittance_info: String,
    /// `Amt` text exactly as written, e.g. `"0123.450"`.
    pub amount_value: String,
    pub amount_currency: String,
}

/// Fixed provenance stamped onto every record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Provenance {
    pub statement_type: &'static str,
    pub job_type: &'static str,
    pub created_at: DateTime<Utc>,
    pub created_by: &'static str,
}

impl Provenance {
    /// Provenance for records produced by the automated scan.
    pub fn automated(created_at: DateTime<Utc>) -> Self {
        Self {
            statement_type: STATEMENT_TYPE,
            job_type: JOB_TYPE_AUTO,
            created_at,
            created_by: SYSTEM_USER,
        }
    }
}

/// One flattened entry row (full profile).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRecord {
    pub header: GroupHeader,
    pub statement: StatementContext,
    pub entry: EntryFields,
    pub provenance: Provenance,
    /// Always empty for entry rows.
    pub resource_url: String,
    pub status: &'static str,
}

impl EntryRecord {
    /// Build an entry row. Assembly cannot fail.
    pub fn new(
        header: GroupHeader,
        statement: StatementContext,
        entry: EntryFields,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            header,
            statement,
            entry,
            provenance: Provenance::automated(created_at),
            resource_url: String::new(),
            status: RECORD_STATUS_ACTIVE,
        }
    }

    /// The identifier used when logging this entry.
    pub fn reference(&self) -> &str {
        &self.entry.entry_reference
    }
}

/// One row per document (header-only profile).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderRecord {
    pub message_id: String,
    pub recipient_name: String,
    pub recipient_org_id: String,
    pub creation_date_time: DateTime<Utc>,
    /// `true` when `creation_date_time` is the processing-time fallback.
    pub creation_defaulted: bool,
    /// Source file name.
    pub resource_url: String,
    pub provenance: Provenance,
    pub updated_at: DateTime<Utc>,
    pub updated_by: &'static str,
    statement_payload: Option<String>,
}

impl HeaderRecord {
    /// Build a header row. The statement payload is always `None`.
    pub fn new(
        message_id: String,
        recipient_name: String,
        recipient_org_id: String,
        (creation_date_time, creation_defaulted): (DateTime<Utc>, bool),
        resource_url: String,
        processed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            message_id,
            recipient_name,
            recipient_org_id,
            creation_date_time,
            creation_defaulted,
            resource_url,
            provenance: Provenance::automated(processed_at),
            updated_at: processed_at,
            updated_by: SYSTEM_USER,
            statement_payload: None,
        }
    }

    /// Raw statement payload. Never populated by this profile.
    pub fn statement_payload(&self) -> Option<&str> {
        self.statement_payload.as_deref()
    }
}

/// Non-fatal conditions found while extracting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractionWarning {
    /// The document has no `Stmt` element; no entry rows were produced.
    NoStatements,
    /// `CreDtTm` was absent or unparsable; processing time was used.
    CreationTimeDefaulted,
    /// `ElctrncSeqNb` was absent or not an integer; 0 was used.
    SequenceNumberDefaulted {
        statement_id: String,
        raw: Option<String>,
    },
    /// A statement without `Ntry` elements.
    EmptyStatement { statement_id: String },
}

impl fmt::Display for ExtractionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoStatements => write!(f, "no <Stmt> found"),
            Self::CreationTimeDefaulted => {
                write!(f, "no usable <CreDtTm>, using processing time")
            }
            Self::SequenceNumberDefaulted { statement_id, raw } => match raw {
                Some(raw) => write!(
                    f,
                    "statement '{statement_id}': <ElctrncSeqNb> '{raw}' is not an integer, using 0"
                ),
                None => write!(f, "statement '{statement_id}': no <ElctrncSeqNb>, using 0"),
            },
            Self::EmptyStatement { statement_id } => {
                write!(f, "statement '{statement_id}' has no entries")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 31, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_creation_timestamp_accessors() {
        let declared = CreationTimestamp::Declared("2025-01-31T10:00:00".into());
        assert_eq!(declared.as_str(), "2025-01-31T10:00:00");
        assert_eq!(declared.declared(), "2025-01-31T10:00:00");
        assert!(!declared.is_fallback());

        let fallback = CreationTimestamp::ProcessingTime("2025-01-31T13:00:00".into());
        assert_eq!(fallback.as_str(), "2025-01-31T13:00:00");
        assert_eq!(fallback.declared(), "");
        assert!(fallback.is_fallback());
    }

    #[test]
    fn test_creation_timestamp_serializes_its_source() {
        let json = serde_json::to_value(CreationTimestamp::ProcessingTime("x".into())).unwrap();
        assert_eq!(json["source"], "processing_time");
        assert_eq!(json["value"], "x");
    }

    #[test]
    fn test_entry_record_provenance() {
        let record = EntryRecord::new(
            GroupHeader {
                message_id: "MSG".into(),
                creation: CreationTimestamp::Declared("2025-01-31T10:00:00".into()),
                recipient_name: String::new(),
                recipient_org_id: String::new(),
            },
            StatementContext {
                statement_id: "S".into(),
                sequence_number: 1,
                account_holder_name: String::new(),
                account_number: String::new(),
                bank_id: String::new(),
            },
            EntryFields {
                entry_reference: "REF".into(),
                ..EntryFields::default()
            },
            now(),
        );

        assert_eq!(record.provenance.statement_type, "CAMT053");
        assert_eq!(record.provenance.job_type, "AUTO");
        assert_eq!(record.provenance.created_by, "SYSTEM");
        assert_eq!(record.provenance.created_at, now());
        assert_eq!(record.status, "ACTIVE");
        assert_eq!(record.resource_url, "");
        assert_eq!(record.reference(), "REF");
    }

    #[test]
    fn test_header_record_payload_is_always_none() {
        let record = HeaderRecord::new(
            "MSG".into(),
            "Recipient".into(),
            "ORG".into(),
            (now(), false),
            "statement.xml".into(),
            now(),
        );
        assert_eq!(record.statement_payload(), None);
        assert_eq!(record.updated_by, "SYSTEM");

        let json = serde_json::to_value(&record).unwrap();
        assert!(json["statement_payload"].is_null());
    }

    #[test]
    fn test_warning_display() {
        let warning = ExtractionWarning::SequenceNumberDefaulted {
            statement_id: "S1".into(),
            raw: Some("abc".into()),
        };
        assert_eq!(
            warning.to_string(),
            "statement 'S1': <ElctrncSeqNb> 'abc' is not an integer, using 0"
        );
        assert_eq!(ExtractionWarning::NoStatements.to_string(), "no <Stmt> found");
    }
}

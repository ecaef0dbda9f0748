//! Constants stamped onto every mapped record.

/// Source-type tag for statements read from CAMT.053 files.
pub const STATEMENT_TYPE: &str = "CAMT053";

/// Job-type tag for records produced by the automated directory scan.
pub const JOB_TYPE_AUTO: &str = "AUTO";

/// Creator recorded on every row.
pub const SYSTEM_USER: &str = "SYSTEM";

/// Row status for freshly ingested entries.
pub const RECORD_STATUS_ACTIVE: &str = "ACTIVE";

/// ISO-8601 sortable format (no offset, no fraction), e.g. `2025-01-31T14:05:00`.
///
/// Used for the processing-time fallback of the statement creation timestamp.
pub const SORTABLE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Naive datetime layouts accepted for CAMT timestamps, tried in order after
/// RFC 3339.
///
/// `%.f` also matches an absent fraction.
pub const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Plain date layout (`ValDt/Dt`, date-only `CreDtTm`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

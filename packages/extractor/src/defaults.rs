//! Per-field default and coercion table.
//!
//! Every scalar the extractors read is resolved through [`RULES`]: the raw
//! element text (or its absence) goes in, a typed value comes out. A missing
//! or malformed field never aborts extraction; it takes the documented
//! fallback instead.
//!
//! Text fields only fall back when the element is absent. An element that is
//! present but empty yields an empty string, which is also the text fallback,
//! so the two cases are indistinguishable downstream.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;

use crate::config::{DATE_FORMAT, NAIVE_DATETIME_FORMATS, SORTABLE_DATETIME_FORMAT};

/// Every field the extractors map.
///
/// The discriminant is the field's row in [`RULES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    MessageId,
    /// `CreDtTm` as carried on entry rows, defaulted to processing time.
    CreationDateTime,
    /// `CreDtTm` parsed for the header-only row.
    HeaderCreationDateTime,
    RecipientName,
    RecipientOrgId,
    StatementId,
    SequenceNumber,
    AccountHolderName,
    AccountNumber,
    BankId,
    EntryReference,
    ValueDate,
    DomainCode,
    FamilyCode,
    SubFamilyCode,
    ProprietaryCode,
    AccountServicerReference,
    PaymentInfoId,
    EndToEndId,
    TransactionId,
    RemittanceInfo,
    AmountValue,
    AmountCurrency,
}

/// Where a field is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// First occurrence anywhere in the document.
    Document,
    /// Within the current `Stmt` subtree.
    Statement,
    /// Within the current `Ntry` subtree.
    Entry,
}

/// How raw element text becomes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    Text,
    Integer,
    Timestamp,
}

/// What an absent or unparsable field resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    EmptyString,
    Zero,
    /// Processing wall-clock time. This is not a fact from the file and is
    /// always reported as defaulted.
    ProcessingTime,
}

/// One row of the default table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: Field,
    pub scope: Scope,
    pub coercion: Coercion,
    pub fallback: Fallback,
}

const fn rule_of(field: Field, scope: Scope, coercion: Coercion, fallback: Fallback) -> FieldRule {
    FieldRule {
        field,
        scope,
        coercion,
        fallback,
    }
}

const fn text(field: Field, scope: Scope) -> FieldRule {
    rule_of(field, scope, Coercion::Text, Fallback::EmptyString)
}

/// The default table, indexed by [`Field`].
pub const RULES: &[FieldRule] = &[
    text(Field::MessageId, Scope::Document),
    rule_of(
        Field::CreationDateTime,
        Scope::Document,
        Coercion::Text,
        Fallback::ProcessingTime,
    ),
    rule_of(
        Field::HeaderCreationDateTime,
        Scope::Document,
        Coercion::Timestamp,
        Fallback::ProcessingTime,
    ),
    text(Field::RecipientName, Scope::Document),
    text(Field::RecipientOrgId, Scope::Document),
    text(Field::StatementId, Scope::Statement),
    rule_of(
        Field::SequenceNumber,
        Scope::Statement,
        Coercion::Integer,
        Fallback::Zero,
    ),
    text(Field::AccountHolderName, Scope::Statement),
    text(Field::AccountNumber, Scope::Statement),
    text(Field::BankId, Scope::Statement),
    text(Field::EntryReference, Scope::Entry),
    text(Field::ValueDate, Scope::Entry),
    text(Field::DomainCode, Scope::Entry),
    text(Field::FamilyCode, Scope::Entry),
    text(Field::SubFamilyCode, Scope::Entry),
    text(Field::ProprietaryCode, Scope::Entry),
    text(Field::AccountServicerReference, Scope::Entry),
    text(Field::PaymentInfoId, Scope::Entry),
    text(Field::EndToEndId, Scope::Entry),
    text(Field::TransactionId, Scope::Entry),
    text(Field::RemittanceInfo, Scope::Entry),
    text(Field::AmountValue, Scope::Entry),
    text(Field::AmountCurrency, Scope::Entry),
];

/// Look up the rule for `field`.
pub fn rule(field: Field) -> &'static FieldRule {
    &RULES[field as usize]
}

/// A resolved field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Integer(i32),
    Timestamp(DateTime<Utc>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
        }
    }
}

/// A value together with whether it came from the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: Value,
    pub defaulted: bool,
}

/// Resolve `raw` for `field` according to its rule.
///
/// `processed_at` feeds the [`Fallback::ProcessingTime`] fallback.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use camt_extractor::defaults::{resolve, Field, Value};
///
/// let seq = resolve(Field::SequenceNumber, Some("not a number"), Utc::now());
/// assert_eq!(seq.value, Value::Integer(0));
/// assert!(seq.defaulted);
/// ```
pub fn resolve(field: Field, raw: Option<&str>, processed_at: DateTime<Utc>) -> Resolved {
    let rule = rule(field);
    match raw.and_then(|r| coerce(rule.coercion, r)) {
        Some(value) => Resolved {
            value,
            defaulted: false,
        },
        None => Resolved {
            value: fallback_value(rule, processed_at),
            defaulted: true,
        },
    }
}

/// Resolve a text field to its string form.
pub fn resolve_text(field: Field, raw: Option<&str>, processed_at: DateTime<Utc>) -> String {
    match resolve(field, raw, processed_at).value {
        Value::Text(s) => s,
        other => other.to_string(),
    }
}

/// Resolve an integer field, reporting whether the fallback was taken.
pub fn resolve_integer(field: Field, raw: Option<&str>) -> (i32, bool) {
    // Integer fallbacks never depend on the clock.
    let resolved = resolve(field, raw, DateTime::<Utc>::MIN_UTC);
    match resolved.value {
        Value::Integer(n) => (n, resolved.defaulted),
        _ => (0, true),
    }
}

/// Resolve a timestamp field, reporting whether the fallback was taken.
pub fn resolve_timestamp(
    field: Field,
    raw: Option<&str>,
    processed_at: DateTime<Utc>,
) -> (DateTime<Utc>, bool) {
    let resolved = resolve(field, raw, processed_at);
    match resolved.value {
        Value::Timestamp(ts) => (ts, resolved.defaulted),
        _ => (processed_at, true),
    }
}

fn coerce(coercion: Coercion, raw: &str) -> Option<Value> {
    match coercion {
        Coercion::Text => Some(Value::Text(raw.to_string())),
        Coercion::Integer => raw.trim().parse().ok().map(Value::Integer),
        Coercion::Timestamp => parse_timestamp(raw).map(Value::Timestamp),
    }
}

fn fallback_value(rule: &FieldRule, processed_at: DateTime<Utc>) -> Value {
    match (rule.fallback, rule.coercion) {
        (Fallback::ProcessingTime, Coercion::Timestamp) => Value::Timestamp(processed_at),
        (Fallback::ProcessingTime, _) => Value::Text(sortable(processed_at)),
        (Fallback::Zero, _) => Value::Integer(0),
        (Fallback::EmptyString, _) => Value::Text(String::new()),
    }
}

/// Format `ts` in local time as an ISO-8601 sortable string.
pub fn sortable(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local)
        .format(SORTABLE_DATETIME_FORMAT)
        .to_string()
}

/// Parse a CAMT timestamp or date.
///
/// Accepts RFC 3339 (`2025-01-31T14:05:00+01:00`), naive date-times in local
/// time (`2025-01-31T14:05:00`, `2025-01-31 14:05:00.123`) and plain dates
/// (`2025-01-31`, midnight local time). Anything else is `None`.
///
/// # Examples
/// ```
/// use camt_extractor::defaults::parse_timestamp;
///
/// let ts = parse_timestamp("2025-01-31T14:05:00Z").unwrap();
/// assert_eq!(ts.to_rfc3339(), "2025-01-31T14:05:00+00:00");
/// assert!(parse_timestamp("31-01-2025").is_none());
/// ```
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|local| local.with_timezone(&Utc))
}

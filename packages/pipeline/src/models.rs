use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which extractor a scan runs over each file.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    clap::ValueEnum,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionProfile {
    /// One `camt53` row per entry.
    #[default]
    Full,
    /// One `camt_raw` row per file, group header only.
    Header,
}

/// A `camt53` row as read back from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredEntry {
    pub id: Uuid,
    pub seq: i64,
    pub camt_grphdr_msgid: String,
    pub camt_grphdr_credttm: String,
    pub camt_grphdr_credttm_fallback: bool,
    pub camt_stmtid: String,
    pub camt_elctrncseqnb: i32,
    pub camt_bnkaccthldrnm: String,
    pub camt_bnkacctno: String,
    pub camt_bnkid: String,
    pub camt_ntryref: String,
    pub camt_valdt: Option<DateTime<Utc>>,
    pub camt_valdt_raw: String,
    pub camt_ntry_cd: String,
    pub camt_ntry_fmlycd: String,
    pub camt_ntry_subfmlycd: String,
    pub camt_ntry_prtry_cd: String,
    pub camt_ntrydtls_acctsvcrre: String,
    pub camt_ntrydtls_pmtinfid: String,
    pub camt_ntrydtls_endtoendid: String,
    pub camt_ntrydtls_txid: String,
    pub camt_ntrydtls_rmtinf_ustrd: String,
    pub camt_stmt_ntry_amt_value: String,
    pub camt_stmt_ntry_amt_ccy: String,
    pub camt_jobtyp: String,
    pub camt_bnkstmt_typ: String,
    pub camt_crtddt: DateTime<Utc>,
    pub camt_crtdby: String,
    pub camtr_grphdr_msgid: String,
    pub camtr_grphdr_credttm: String,
    pub camtr_grphdr_msgrcpt_nm: String,
    pub camtr_grphdr_msgrcpt_orgid: String,
    pub camtr_bktocstmrstmt: String,
    pub camtr_rsrcurl: String,
    pub camtr_jobtyp: String,
    pub camtr_crtddt: DateTime<Utc>,
    pub camt_status: String,
}

/// A `camt_raw` row as read back from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredHeader {
    pub id: Uuid,
    pub camtr_uptddt: DateTime<Utc>,
    pub camtr_uptdby: String,
    pub camtr_rsrcurl: String,
    pub camtr_jobtyp: String,
    pub camtr_grphdr_msgrcpt_orgid: String,
    pub camtr_grphdr_msgrcpt_nm: String,
    pub camtr_grphdr_msgid: String,
    pub camtr_grphdr_credttm: DateTime<Utc>,
    pub camtr_grphdr_credttm_fallback: bool,
    pub camtr_crtddt: DateTime<Utc>,
    pub camtr_crtdby: String,
    pub camtr_bktocstmrstmt: Option<String>,
}

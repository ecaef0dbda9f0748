//! PostgreSQL storage for extracted records.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use camt_extractor::defaults::parse_timestamp;
use camt_extractor::{EntryRecord, HeaderRecord};

use crate::error::Result;
use crate::models::{StoredEntry, StoredHeader};
use crate::sink::RecordSink;

/// [`RecordSink`] backed by the `camt53` and `camt_raw` tables.
#[derive(Debug, Clone)]
pub struct PgSink {
    pool: PgPool,
}

impl PgSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RecordSink for PgSink {
    async fn insert_entry(&self, record: &EntryRecord) -> Result<Uuid> {
        insert_entry(&self.pool, record).await
    }

    async fn insert_header(&self, record: &HeaderRecord) -> Result<Uuid> {
        insert_header(&self.pool, record).await
    }
}

/// Insert one entry row into `camt53`.
///
/// The value date is stored twice: as extracted, and parsed into a nullable
/// timestamp (`NULL` when the text is empty or not a recognised date).
#[tracing::instrument(skip(executor, record), fields(entry_ref = %record.reference(), stmt_id = %record.statement.statement_id))]
pub async fn insert_entry<'e, E>(executor: E, record: &EntryRecord) -> Result<Uuid>
where
    E: sqlx::PgExecutor<'e>,
{
    let header = &record.header;
    let statement = &record.statement;
    let entry = &record.entry;
    let provenance = &record.provenance;
    let value_date = parse_timestamp(&entry.value_date);

    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO camt53 (
            id, camt_grphdr_msgid, camt_grphdr_credttm, camt_grphdr_credttm_fallback,
            camt_stmtid, camt_elctrncseqnb, camt_bnkaccthldrnm, camt_bnkacctno, camt_bnkid,
            camt_ntryref, camt_valdt, camt_valdt_raw,
            camt_ntry_cd, camt_ntry_fmlycd, camt_ntry_subfmlycd, camt_ntry_prtry_cd,
            camt_ntrydtls_acctsvcrre, camt_ntrydtls_pmtinfid, camt_ntrydtls_endtoendid,
            camt_ntrydtls_txid, camt_ntrydtls_rmtinf_ustrd,
            camt_stmt_ntry_amt_value, camt_stmt_ntry_amt_ccy,
            camt_jobtyp, camt_bnkstmt_typ, camt_crtddt, camt_crtdby,
            camtr_grphdr_msgid, camtr_grphdr_credttm, camtr_grphdr_msgrcpt_nm,
            camtr_grphdr_msgrcpt_orgid, camtr_bktocstmrstmt, camtr_rsrcurl,
            camtr_jobtyp, camtr_crtddt, camt_status
        )
        VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18,
            $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, $31, $32,
            $33, $34, $35, $36
        )
        "#,
    )
    .bind(id)
    .bind(&header.message_id)
    .bind(header.creation.as_str())
    .bind(header.creation.is_fallback())
    .bind(&statement.statement_id)
    .bind(statement.sequence_number)
    .bind(&statement.account_holder_name)
    .bind(&statement.account_number)
    .bind(&statement.bank_id)
    .bind(&entry.entry_reference)
    .bind(value_date)
    .bind(&entry.value_date)
    .bind(&entry.domain_code)
    .bind(&entry.family_code)
    .bind(&entry.sub_family_code)
    .bind(&entry.proprietary_code)
    .bind(&entry.account_servicer_reference)
    .bind(&entry.payment_info_id)
    .bind(&entry.end_to_end_id)
    .bind(&entry.transaction_id)
    .bind(&entry.remittance_info)
    .bind(&entry.amount_value)
    .bind(&entry.amount_currency)
    .bind(provenance.job_type)
    .bind(provenance.statement_type)
    .bind(provenance.created_at)
    .bind(provenance.created_by)
    .bind(&header.message_id)
    .bind(header.creation.declared())
    .bind(&header.recipient_name)
    .bind(&header.recipient_org_id)
    .bind(&statement.statement_id)
    .bind(&record.resource_url)
    .bind(provenance.job_type)
    .bind(provenance.created_at)
    .bind(record.status)
    .execute(executor)
    .await?;

    tracing::debug!(id = %id, "entry stored");
    Ok(id)
}

/// Insert one header row into `camt_raw`. The statement payload column is
/// always written as `NULL`.
#[tracing::instrument(skip(executor, record), fields(resource_url = %record.resource_url, msg_id = %record.message_id))]
pub async fn insert_header<'e, E>(executor: E, record: &HeaderRecord) -> Result<Uuid>
where
    E: sqlx::PgExecutor<'e>,
{
    let provenance = &record.provenance;

    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO camt_raw (
            id, camtr_uptddt, camtr_uptdby, camtr_rsrcurl, camtr_jobtyp,
            camtr_grphdr_msgrcpt_orgid, camtr_grphdr_msgrcpt_nm, camtr_grphdr_msgid,
            camtr_grphdr_credttm, camtr_grphdr_credttm_fallback,
            camtr_crtddt, camtr_crtdby, camtr_bktocstmrstmt
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, CAST($13 AS xml))
        "#,
    )
    .bind(id)
    .bind(record.updated_at)
    .bind(record.updated_by)
    .bind(&record.resource_url)
    .bind(provenance.job_type)
    .bind(&record.recipient_org_id)
    .bind(&record.recipient_name)
    .bind(&record.message_id)
    .bind(record.creation_date_time)
    .bind(record.creation_defaulted)
    .bind(provenance.created_at)
    .bind(provenance.created_by)
    .bind(record.statement_payload())
    .execute(executor)
    .await?;

    tracing::debug!(id = %id, "header stored");
    Ok(id)
}

/// All `camt53` rows, in insertion order.
pub async fn list_entries<'e, E>(executor: E) -> Result<Vec<StoredEntry>>
where
    E: sqlx::PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, StoredEntry>("SELECT * FROM camt53 ORDER BY seq ASC")
        .fetch_all(executor)
        .await?;

    Ok(rows)
}

/// All `camt_raw` rows, ordered by resource URL.
pub async fn list_headers<'e, E>(executor: E) -> Result<Vec<StoredHeader>>
where
    E: sqlx::PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, StoredHeader>(
        r#"
        SELECT id, camtr_uptddt, camtr_uptdby, camtr_rsrcurl, camtr_jobtyp,
               camtr_grphdr_msgrcpt_orgid, camtr_grphdr_msgrcpt_nm, camtr_grphdr_msgid,
               camtr_grphdr_credttm, camtr_grphdr_credttm_fallback,
               camtr_crtddt, camtr_crtdby,
               camtr_bktocstmrstmt::text AS camtr_bktocstmrstmt
        FROM camt_raw
        ORDER BY camtr_rsrcurl ASC
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

//! Full profile: one record per `Ntry`.
//!
//! Walks every `Stmt` in document order and every `Ntry` within it. Group
//! header fields are read once, document-wide, and copied onto every row;
//! statement fields are read within each `Stmt` subtree.

use chrono::{DateTime, Utc};
use roxmltree::{Document, Node};

use crate::defaults::{resolve, resolve_integer, resolve_text, Field};
use crate::error::Result;
use crate::types::{
    CreationTimestamp, EntryFields, EntryRecord, ExtractionWarning, GroupHeader, StatementContext,
};
use crate::xml::{text_opt, NsQuery};

/// Result of running the full profile over one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullExtraction {
    /// Number of `Stmt` elements found.
    pub statement_count: usize,
    /// One record per entry, in document order.
    pub records: Vec<EntryRecord>,
    /// Non-fatal conditions, in the order they were found.
    pub warnings: Vec<ExtractionWarning>,
}

impl FullExtraction {
    /// `true` when the document had no statements at all.
    pub fn has_no_statements(&self) -> bool {
        self.warnings.contains(&ExtractionWarning::NoStatements)
    }
}

/// Parse `xml` and run the full profile over it.
///
/// Fails only if the XML is malformed; in that case no records are produced.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use camt_extractor::full::extract_entries_from_str;
///
/// let xml = r#"<Document xmlns="urn:iso:std:iso:20022:tech:xsd:camt.053.001.02">
///   <BkToCstmrStmt>
///     <GrpHdr><MsgId>MSG-1</MsgId></GrpHdr>
///     <Stmt><Id>S-1</Id><Ntry><Amt Ccy="EUR">10.00</Amt></Ntry></Stmt>
///   </BkToCstmrStmt>
/// </Document>"#;
///
/// let extraction = extract_entries_from_str(xml, Utc::now()).unwrap();
/// assert_eq!(extraction.records.len(), 1);
/// assert_eq!(extraction.records[0].header.message_id, "MSG-1");
/// assert_eq!(extraction.records[0].entry.amount_currency, "EUR");
/// ```
pub fn extract_entries_from_str(xml: &str, processed_at: DateTime<Utc>) -> Result<FullExtraction> {
    let doc = Document::parse(xml)?;
    Ok(extract_entries(&doc, processed_at))
}

/// Run the full profile over a parsed document.
pub fn extract_entries(doc: &Document<'_>, processed_at: DateTime<Utc>) -> FullExtraction {
    let reader = Reader {
        query: NsQuery::new(doc),
        processed_at,
    };
    let mut warnings = Vec::new();

    let statements: Vec<Node<'_, '_>> = reader.query.descendants(doc.root(), "Stmt").collect();
    if statements.is_empty() {
        warnings.push(ExtractionWarning::NoStatements);
        return FullExtraction {
            statement_count: 0,
            records: Vec::new(),
            warnings,
        };
    }

    let header = reader.group_header();
    if header.creation.is_fallback() {
        warnings.push(ExtractionWarning::CreationTimeDefaulted);
    }

    let mut records = Vec::new();
    for stmt in &statements {
        let statement = reader.statement(*stmt, &mut warnings);

        let mut entries = reader.query.descendants(*stmt, "Ntry").peekable();
        if entries.peek().is_none() {
            warnings.push(ExtractionWarning::EmptyStatement {
                statement_id: statement.statement_id.clone(),
            });
        }

        for ntry in entries {
            records.push(EntryRecord::new(
                header.clone(),
                statement.clone(),
                reader.entry(ntry),
                processed_at,
            ));
        }
    }

    FullExtraction {
        statement_count: statements.len(),
        records,
        warnings,
    }
}

struct Reader<'a, 'input> {
    query: NsQuery<'a, 'input>,
    processed_at: DateTime<Utc>,
}

impl<'a, 'input> Reader<'a, 'input> {
    fn text(&self, field: Field, node: Option<Node<'a, 'input>>) -> String {
        resolve_text(field, text_opt(node).as_deref(), self.processed_at)
    }

    /// Document-wide lookup; see [`NsQuery::first_in_document`].
    fn document_text(&self, field: Field, local: &str) -> String {
        self.text(field, self.query.first_in_document(local))
    }

    fn group_header(&self) -> GroupHeader {
        let raw_creation = text_opt(self.query.first_in_document("CreDtTm"));
        let creation = resolve(
            Field::CreationDateTime,
            raw_creation.as_deref(),
            self.processed_at,
        );
        let creation = if creation.defaulted {
            CreationTimestamp::ProcessingTime(creation.value.to_string())
        } else {
            CreationTimestamp::Declared(creation.value.to_string())
        };

        GroupHeader {
            message_id: self.document_text(Field::MessageId, "MsgId"),
            creation,
            recipient_name: self.document_text(Field::RecipientName, "Nm"),
            recipient_org_id: self.document_text(Field::RecipientOrgId, "OrgId"),
        }
    }

    fn statement(
        &self,
        stmt: Node<'a, 'input>,
        warnings: &mut Vec<ExtractionWarning>,
    ) -> StatementContext {
        let q = &self.query;
        let statement_id = self.text(Field::StatementId, q.child(stmt, "Id"));

        let raw_seq = text_opt(q.child(stmt, "ElctrncSeqNb"));
        let (sequence_number, seq_defaulted) =
            resolve_integer(Field::SequenceNumber, raw_seq.as_deref());
        if seq_defaulted {
            warnings.push(ExtractionWarning::SequenceNumberDefaulted {
                statement_id: statement_id.clone(),
                raw: raw_seq,
            });
        }

        StatementContext {
            statement_id,
            sequence_number,
            account_holder_name: self
                .text(Field::AccountHolderName, q.first_child_of(stmt, "Acct", "Nm")),
            account_number: self.text(Field::AccountNumber, q.first_under(stmt, "Acct", "Id")),
            bank_id: self.text(Field::BankId, q.first_in(stmt, "BIC")),
        }
    }

    fn entry(&self, ntry: Node<'a, 'input>) -> EntryFields {
        let q = &self.query;
        let amount = q.child(ntry, "Amt");

        EntryFields {
            entry_reference: self.text(Field::EntryReference, q.child(ntry, "NtryRef")),
            value_date: self.value_date(ntry),
            domain_code: self.text(Field::DomainCode, q.first_under(ntry, "BkTxCd", "Cd")),
            family_code: self.text(Field::FamilyCode, q.first_under(ntry, "Fmly", "Cd")),
            sub_family_code: self.text(Field::SubFamilyCode, q.first_in(ntry, "SubFmlyCd")),
            proprietary_code: self.text(Field::ProprietaryCode, q.first_under(ntry, "Prtry", "Cd")),
            account_servicer_reference: self
                .text(Field::AccountServicerReference, q.first_in(ntry, "AcctSvcrRef")),
            payment_info_id: self.text(Field::PaymentInfoId, q.first_in(ntry, "PmtInfId")),
            end_to_end_id: self.text(Field::EndToEndId, q.first_in(ntry, "EndToEndId")),
            transaction_id: self.text(Field::TransactionId, q.first_in(ntry, "TxId")),
            remittance_info: self.text(Field::RemittanceInfo, q.first_in(ntry, "Ustrd")),
            amount_value: self.text(Field::AmountValue, amount),
            amount_currency: resolve_text(
                Field::AmountCurrency,
                amount.and_then(|amt| amt.attribute("Ccy")),
                self.processed_at,
            ),
        }
    }

    /// `ValDt/DtTm` first, `ValDt/Dt` second; the first non-blank one wins and
    /// is kept as written.
    fn value_date(&self, ntry: Node<'a, 'input>) -> String {
        let q = &self.query;
        let raw = ["DtTm", "Dt"]
            .into_iter()
            .filter_map(|shape| text_opt(q.first_child_of(ntry, "ValDt", shape)))
            .find(|text| !text.trim().is_empty());
        resolve_text(Field::ValueDate, raw.as_deref(), self.processed_at)
    }
}

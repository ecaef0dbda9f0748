//! End-to-end tests for both extraction profiles.
//!
//! Uses a three-statement fixture (two entries, one entry, no entries) plus
//! small inline documents for the individual mapping rules.

use std::fs;
use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;

use camt_extractor::{
    extract_entries_from_str, extract_header_from_str, CreationTimestamp, EntryFields,
    ExtractionWarning,
};

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

fn processed_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 2, 1, 6, 0, 0).unwrap()
}

#[test]
fn test_fixture_cardinality() {
    let extraction = extract_entries_from_str(&load_fixture("january.xml"), processed_at()).unwrap();

    assert_eq!(extraction.statement_count, 3);
    assert_eq!(extraction.records.len(), 3);

    let refs: Vec<&str> = extraction.records.iter().map(|r| r.reference()).collect();
    assert_eq!(refs, vec!["NTRY-0001", "NTRY-0002", "NTRY-0003"]);
}

#[test]
fn test_fixture_warnings() {
    let extraction = extract_entries_from_str(&load_fixture("january.xml"), processed_at()).unwrap();

    assert_eq!(
        extraction.warnings,
        vec![
            ExtractionWarning::SequenceNumberDefaulted {
                statement_id: "STMT-2025-01-31-USD".into(),
                raw: Some("n/a".into()),
            },
            ExtractionWarning::EmptyStatement {
                statement_id: "STMT-2025-01-31-GBP".into(),
            },
        ]
    );
}

#[test]
fn test_fixture_group_header() {
    let extraction = extract_entries_from_str(&load_fixture("january.xml"), processed_at()).unwrap();

    for record in &extraction.records {
        let header = &record.header;
        assert_eq!(header.message_id, "CAMT053-20250131-0001");
        assert_eq!(
            header.creation,
            CreationTimestamp::Declared("2025-01-31T18:30:00+01:00".into())
        );
        assert_eq!(header.recipient_name, "Kdbill Trading BV");
        assert_eq!(header.recipient_org_id, "NL123456789B01");
    }
}

#[test]
fn test_fixture_statement_context() {
    let extraction = extract_entries_from_str(&load_fixture("january.xml"), processed_at()).unwrap();

    let eur = &extraction.records[0].statement;
    assert_eq!(eur.statement_id, "STMT-2025-01-31-EUR");
    assert_eq!(eur.sequence_number, 31);
    assert_eq!(eur.account_holder_name, "Kdbill Trading BV Operating");
    assert_eq!(eur.account_number, "NL91ABNA0417164300");
    assert_eq!(eur.bank_id, "ABNANL2A");

    let usd = &extraction.records[2].statement;
    assert_eq!(usd.statement_id, "STMT-2025-01-31-USD");
    assert_eq!(usd.sequence_number, 0);
    assert_eq!(usd.account_holder_name, "");
    assert_eq!(usd.account_number, "USD-ACC-7");
    assert_eq!(usd.bank_id, "ABNAUS33");
}

#[test]
fn test_fixture_entry_fields() {
    let extraction = extract_entries_from_str(&load_fixture("january.xml"), processed_at()).unwrap();

    assert_eq!(
        extraction.records[0].entry,
        EntryFields {
            entry_reference: "NTRY-0001".into(),
            value_date: "2025-01-31".into(),
            domain_code: "PMNT".into(),
            family_code: "RCDT".into(),
            sub_family_code: "ESCT".into(),
            proprietary_code: "N541".into(),
            account_servicer_reference: "ASR-778899".into(),
            payment_info_id: "PMTINF-42".into(),
            end_to_end_id: "INV-2025-0042".into(),
            transaction_id: "TX-0001".into(),
            remittance_info: "Invoice 2025-0042".into(),
            amount_value: "1250.50".into(),
            amount_currency: "EUR".into(),
        }
    );

    assert_eq!(
        extraction.records[1].entry,
        EntryFields {
            entry_reference: "NTRY-0002".into(),
            value_date: "2025-01-31T09:15:00".into(),
            domain_code: "PMNT".into(),
            family_code: "ICDT".into(),
            sub_family_code: "DMCT".into(),
            end_to_end_id: "NOTPROVIDED".into(),
            amount_value: "75.00".into(),
            amount_currency: "EUR".into(),
            ..EntryFields::default()
        }
    );

    assert_eq!(
        extraction.records[2].entry,
        EntryFields {
            entry_reference: "NTRY-0003".into(),
            amount_value: "0.10".into(),
            amount_currency: "USD".into(),
            ..EntryFields::default()
        }
    );
}

#[test]
fn test_context_is_shared_within_a_statement() {
    let extraction = extract_entries_from_str(&load_fixture("january.xml"), processed_at()).unwrap();
    let (a, b) = (&extraction.records[0], &extraction.records[1]);

    assert_eq!(a.header, b.header);
    assert_eq!(a.statement, b.statement);
    assert_eq!(a.provenance, b.provenance);
    assert_ne!(a.entry, b.entry);
}

#[test]
fn test_message_id_is_document_wide() {
    let xml = r#"<Document xmlns="urn:iso:std:iso:20022:tech:xsd:camt.053.001.08">
  <BkToCstmrStmt>
    <GrpHdr><MsgId>ROOT-MSG</MsgId></GrpHdr>
    <Stmt><Id>A</Id><Ntry/><Ntry/></Stmt>
    <Stmt><Id>B</Id><Ntry/></Stmt>
  </BkToCstmrStmt>
</Document>"#;

    let extraction = extract_entries_from_str(xml, processed_at()).unwrap();

    assert_eq!(extraction.records.len(), 3);
    assert!(extraction
        .records
        .iter()
        .all(|r| r.header.message_id == "ROOT-MSG"));
    assert_eq!(extraction.records[2].statement.statement_id, "B");
}

#[test]
fn test_single_statement_scenario() {
    let xml = r#"<Document xmlns="urn:iso:std:iso:20022:tech:xsd:camt.053.001.02">
  <BkToCstmrStmt>
    <GrpHdr><MsgId>SCN-1</MsgId><CreDtTm>2025-01-01T00:00:00</CreDtTm></GrpHdr>
    <Stmt>
      <Id>SCN-STMT</Id>
      <ElctrncSeqNb>7</ElctrncSeqNb>
      <Acct>
        <Id><IBAN>DE89370400440532013000</IBAN></Id>
        <Nm>Scenario Holder</Nm>
        <Svcr><FinInstnId><BIC>COBADEFFXXX</BIC></FinInstnId></Svcr>
      </Acct>
      <Ntry>
        <Amt Ccy="EUR">123.45</Amt>
        <ValDt><DtTm>2025-01-05T12:00:00</DtTm><Dt>2025-01-05</Dt></ValDt>
      </Ntry>
      <Ntry>
        <Amt>9.99</Amt>
      </Ntry>
    </Stmt>
  </BkToCstmrStmt>
</Document>"#;

    let extraction = extract_entries_from_str(xml, processed_at()).unwrap();
    assert_eq!(extraction.records.len(), 2);
    assert!(extraction.warnings.is_empty());

    let (first, second) = (&extraction.records[0], &extraction.records[1]);
    assert_eq!(first.entry.value_date, "2025-01-05T12:00:00");
    assert_eq!(second.entry.value_date, "");
    assert_eq!(first.statement.sequence_number, 7);
    assert_eq!(second.statement.sequence_number, 7);

    assert_eq!(first.entry.amount_value, "123.45");
    assert_eq!(first.entry.amount_currency, "EUR");
    assert_eq!(second.entry.amount_value, "9.99");
    assert_eq!(second.entry.amount_currency, "");

    for record in [first, second] {
        assert_eq!(record.header.message_id, "SCN-1");
        assert_eq!(record.statement.account_number, "DE89370400440532013000");
        assert_eq!(record.statement.account_holder_name, "Scenario Holder");
        assert_eq!(record.statement.bank_id, "COBADEFFXXX");
    }
}

#[test]
fn test_missing_sequence_number_defaults_to_zero() {
    let xml = r#"<Document><Stmt><Id>S</Id><Ntry/></Stmt></Document>"#;
    let extraction = extract_entries_from_str(xml, processed_at()).unwrap();

    assert_eq!(extraction.records[0].statement.sequence_number, 0);
    assert!(extraction
        .warnings
        .contains(&ExtractionWarning::SequenceNumberDefaulted {
            statement_id: "S".into(),
            raw: None,
        }));
}

#[test]
fn test_header_profile_on_fixture() {
    let extraction =
        extract_header_from_str(&load_fixture("january.xml"), "january.xml", processed_at())
            .unwrap();
    let record = extraction.record;

    assert_eq!(record.message_id, "CAMT053-20250131-0001");
    assert_eq!(record.recipient_name, "Kdbill Trading BV");
    assert_eq!(record.recipient_org_id, "NL123456789B01");
    assert_eq!(
        record.creation_date_time,
        Utc.with_ymd_and_hms(2025, 1, 31, 17, 30, 0).unwrap()
    );
    assert!(!record.creation_defaulted);
    assert_eq!(record.resource_url, "january.xml");
    assert_eq!(record.provenance.created_by, "SYSTEM");
    assert_eq!(record.statement_payload(), None);
}

#[test]
fn test_malformed_document_produces_nothing() {
    let xml = "<Document><Stmt><Ntry></Stmt></Document>";
    assert!(extract_entries_from_str(xml, processed_at()).is_err());
    assert!(extract_header_from_str(xml, "bad.xml", processed_at()).is_err());
}

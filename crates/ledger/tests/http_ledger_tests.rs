//! Wire-format tests for the HTTP ledger gateway adapter.

use httpmock::prelude::*;
use moorage_core::{ContentAddress, RecordId, WalletAddress};
use moorage_ledger::{HttpLedger, LedgerClient, LedgerError};
use serde_json::json;

fn owner() -> WalletAddress {
    WalletAddress::parse("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa").unwrap()
}

fn hash() -> ContentAddress {
    ContentAddress::for_bytes(b"wire-test")
}

#[tokio::test]
async fn register_posts_record_and_parses_id() {
    let server = MockServer::start();
    let record_id = RecordId::new();

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/records")
            .header("authorization", "Bearer secret")
            .json_body(json!({
                "owner": owner().as_str(),
                "content_hash": hash().as_str(),
                "display_name": "report.pdf",
            }));
        then.status(200)
            .json_body(json!({ "record_id": record_id.to_string() }));
    });

    let ledger = HttpLedger::new(&server.base_url(), Some("secret".to_string())).unwrap();
    let returned = ledger
        .register(&owner(), &hash(), "report.pdf")
        .await
        .unwrap();

    mock.assert();
    assert_eq!(returned, record_id);
}

#[tokio::test]
async fn set_existence_maps_404_to_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/records/existence");
        then.status(404).body("no such record");
    });

    let ledger = HttpLedger::new(&server.base_url(), None).unwrap();
    match ledger.set_existence(&owner(), &hash(), false).await {
        Err(LedgerError::NotFound(msg)) => assert!(msg.contains("no such record")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn set_existence_maps_5xx_to_write_failed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/records/existence");
        then.status(502).body("upstream chain timeout");
    });

    let ledger = HttpLedger::new(&server.base_url(), None).unwrap();
    match ledger.set_existence(&owner(), &hash(), true).await {
        Err(LedgerError::WriteFailed(msg)) => assert!(msg.contains("502")),
        other => panic!("expected WriteFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn list_records_queries_by_owner() {
    let server = MockServer::start();
    let record_id = RecordId::new();

    server.mock(|when, then| {
        when.method(GET)
            .path("/v1/records")
            .query_param("owner", owner().as_str());
        then.status(200).json_body(json!({
            "records": [{
                "record_id": record_id.to_string(),
                "owner": owner().as_str(),
                "content_hash": hash().as_str(),
                "display_name": "report.pdf",
                "exists": false,
            }]
        }));
    });

    let ledger = HttpLedger::new(&server.base_url(), None).unwrap();
    let records = ledger.list_records(&owner()).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].record_id, record_id);
    assert!(!records[0].exists);
}

//! Wire-format tests for the Pinata pinning adapter.

use bytes::Bytes;
use httpmock::prelude::*;
use moorage_core::WalletAddress;
use moorage_pinstore::{HttpPinStore, PinStore, PinStoreError};
use serde_json::json;

const CID: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";

fn scope() -> WalletAddress {
    WalletAddress::parse("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa").unwrap()
}

#[tokio::test]
async fn put_pins_multipart_and_parses_hash() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pinning/pinFileToIPFS")
            .header("pinata_api_key", "key")
            .header("pinata_secret_api_key", "secret");
        then.status(200).json_body(json!({
            "IpfsHash": CID,
            "PinSize": 11,
            "Timestamp": "2024-06-01T12:00:00.000Z",
        }));
    });

    let store = HttpPinStore::new(
        &server.base_url(),
        Some("key".to_string()),
        Some("secret".to_string()),
    )
    .unwrap();
    let address = store
        .put(Bytes::from_static(b"hello bytes"), "hello.txt")
        .await
        .unwrap();

    mock.assert();
    assert_eq!(address.as_str(), CID);
}

#[tokio::test]
async fn put_surfaces_service_errors_as_write_failed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/pinning/pinFileToIPFS");
        then.status(500).body("pin queue full");
    });

    let store = HttpPinStore::new(&server.base_url(), None, None).unwrap();
    match store.put(Bytes::from_static(b"x"), "x.bin").await {
        Err(PinStoreError::WriteFailed(msg)) => assert!(msg.contains("500")),
        other => panic!("expected WriteFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn unpin_hits_hash_path_and_maps_404() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE).path(format!("/pinning/unpin/{CID}"));
        then.status(200).body("OK");
    });

    let store = HttpPinStore::new(&server.base_url(), None, None).unwrap();
    let address = moorage_core::ContentAddress::parse(CID).unwrap();
    store.unpin(&address).await.unwrap();
    mock.assert();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(DELETE).path(format!("/pinning/unpin/{CID}"));
        then.status(404).body("not pinned");
    });
    let store = HttpPinStore::new(&server.base_url(), None, None).unwrap();
    match store.unpin(&address).await {
        Err(PinStoreError::NotFound(_)) => {}
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn list_pinned_parses_rows_and_defaults_missing_names() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/data/pinList")
            .query_param("status", "pinned");
        then.status(200).json_body(json!({
            "count": 2,
            "rows": [
                {
                    "ipfs_pin_hash": CID,
                    "size": 1024,
                    "date_pinned": "2024-06-01T12:00:00.000Z",
                    "metadata": { "name": "report.pdf" },
                },
                {
                    "ipfs_pin_hash": "QmT5NvUtoM5nWFfrQdVrFtvGfKFmG7AHE8P34isapyhCxX",
                    "size": 2048,
                    "date_pinned": "2024-06-02T08:30:00.000Z",
                    "metadata": {},
                },
            ]
        }));
    });

    let store = HttpPinStore::new(&server.base_url(), None, None).unwrap();
    let pins = store.list_pinned(&scope()).await.unwrap();

    assert_eq!(pins.len(), 2);
    assert_eq!(pins[0].display_name, "report.pdf");
    assert_eq!(pins[0].size_bytes, 1024);
    assert_eq!(pins[1].display_name, "Unnamed File");
}

#[tokio::test]
async fn list_pinned_drops_unparseable_rows() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/data/pinList");
        then.status(200).json_body(json!({
            "count": 2,
            "rows": [
                {
                    "ipfs_pin_hash": "not a valid hash!",
                    "size": 10,
                    "date_pinned": "2024-06-01T12:00:00.000Z",
                    "metadata": {},
                },
                {
                    "ipfs_pin_hash": CID,
                    "size": 20,
                    "date_pinned": "2024-06-01T12:00:00.000Z",
                    "metadata": {},
                },
            ]
        }));
    });

    let store = HttpPinStore::new(&server.base_url(), None, None).unwrap();
    let pins = store.list_pinned(&scope()).await.unwrap();
    assert_eq!(pins.len(), 1);
    assert_eq!(pins[0].content_hash.as_str(), CID);
}

pub mod mocks;

use moorage_core::WalletAddress;
use moorage_engine::ReconciliationEngine;
use moorage_ledger::MemoryLedger;
use moorage_pinstore::MemoryPinStore;
use std::sync::Arc;

/// Build an engine over fresh in-memory clients, returning the clients for
/// direct state inspection and manipulation.
#[allow(dead_code)]
pub fn memory_engine() -> (ReconciliationEngine, Arc<MemoryLedger>, Arc<MemoryPinStore>) {
    let ledger = Arc::new(MemoryLedger::new());
    let pins = Arc::new(MemoryPinStore::new());
    let engine = ReconciliationEngine::new(ledger.clone(), pins.clone());
    (engine, ledger, pins)
}

#[allow(dead_code)]
pub fn owner() -> WalletAddress {
    WalletAddress::parse("0x00112233445566778899aabbccddeeff00112233").unwrap()
}

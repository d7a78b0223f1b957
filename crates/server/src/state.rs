//! Application state shared across handlers.

use moorage_core::config::AppConfig;
use moorage_engine::ReconciliationEngine;
use moorage_ledger::LedgerClient;
use moorage_pinstore::PinStore;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The reconciliation engine over both external clients.
    pub engine: Arc<ReconciliationEngine>,
}

impl AppState {
    /// Create application state over already-constructed clients.
    pub fn new(config: AppConfig, ledger: Arc<dyn LedgerClient>, pins: Arc<dyn PinStore>) -> Self {
        Self {
            config: Arc::new(config),
            engine: Arc::new(ReconciliationEngine::new(ledger, pins)),
        }
    }

    /// Build state from configuration, constructing both clients.
    ///
    /// # Panics
    ///
    /// Panics when the configuration is invalid or a client cannot be
    /// constructed; startup is the one place to fail fast.
    pub fn from_config(config: AppConfig) -> Self {
        if let Err(error) = config.validate() {
            panic!("invalid configuration: {error}");
        }
        let ledger = match moorage_ledger::from_config(&config.ledger) {
            Ok(ledger) => ledger,
            Err(error) => panic!("failed to construct ledger client: {error}"),
        };
        let pins = match moorage_pinstore::from_config(&config.pinstore) {
            Ok(pins) => pins,
            Err(error) => panic!("failed to construct pin store client: {error}"),
        };
        Self::new(config, ledger, pins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_with_memory_backends() {
        let state = AppState::from_config(AppConfig::for_testing());
        assert!(state.config.server.metrics_enabled);
    }

    #[test]
    #[should_panic(expected = "invalid configuration")]
    fn test_from_config_panics_on_zero_quota() {
        let mut config = AppConfig::for_testing();
        config.quota.quota_bytes = 0;
        AppState::from_config(config);
    }
}

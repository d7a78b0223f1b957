//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};

/// Default owner storage quota: 100 MiB.
pub const DEFAULT_QUOTA_BYTES: u64 = 100 * 1024 * 1024;

/// Maximum upload payload size: 32 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 32 * 1024 * 1024;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum accepted upload payload in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
    /// Enable the /metrics endpoint for Prometheus scraping (default: true).
    /// When enabled, restrict the endpoint to authorized scraper IPs at the
    /// infrastructure level.
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_max_upload_bytes() -> u64 {
    DEFAULT_MAX_UPLOAD_BYTES
}

fn default_metrics_enabled() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_upload_bytes: default_max_upload_bytes(),
            metrics_enabled: default_metrics_enabled(),
        }
    }
}

/// Ownership ledger backend configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LedgerConfig {
    /// In-process ledger (testing and local development only).
    Memory,
    /// HTTP ledger gateway. The gateway submits the underlying chain
    /// transactions and responds only after durable commit.
    Http {
        /// Gateway base URL.
        base_url: String,
        /// Bearer token. Falls back to the MOORAGE_LEDGER_TOKEN env var
        /// when not set; prefer env vars over secrets in config files.
        token: Option<String>,
    },
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::Memory
    }
}

impl LedgerConfig {
    /// Validate ledger configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Memory => Ok(()),
            Self::Http { base_url, .. } => {
                if base_url.is_empty() {
                    Err("ledger http config requires a base_url".to_string())
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// Content store (pinning service) backend configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PinStoreConfig {
    /// In-process pin store (testing and local development only).
    Memory,
    /// Pinata-compatible pinning API.
    Http {
        /// API base URL (e.g., "https://api.pinata.cloud").
        base_url: String,
        /// API key header value.
        api_key: Option<String>,
        /// API secret header value. Must be set together with api_key.
        api_secret: Option<String>,
    },
}

impl Default for PinStoreConfig {
    fn default() -> Self {
        Self::Memory
    }
}

impl PinStoreConfig {
    /// Validate pin store configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Memory => Ok(()),
            Self::Http {
                base_url,
                api_key,
                api_secret,
            } => {
                if base_url.is_empty() {
                    return Err("pinstore http config requires a base_url".to_string());
                }
                match (api_key.as_ref(), api_secret.as_ref()) {
                    (Some(_), Some(_)) | (None, None) => Ok(()),
                    _ => Err(
                        "pinstore http config requires both api_key and api_secret when either is set"
                            .to_string(),
                    ),
                }
            }
        }
    }
}

/// Quota configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Per-owner storage quota in bytes.
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: u64,
}

fn default_quota_bytes() -> u64 {
    DEFAULT_QUOTA_BYTES
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            quota_bytes: default_quota_bytes(),
        }
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Ownership ledger backend.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Content store backend.
    #[serde(default)]
    pub pinstore: PinStoreConfig,
    /// Quota configuration.
    #[serde(default)]
    pub quota: QuotaConfig,
}

impl AppConfig {
    /// Validate the full configuration.
    pub fn validate(&self) -> crate::Result<()> {
        self.ledger.validate().map_err(crate::Error::Config)?;
        self.pinstore.validate().map_err(crate::Error::Config)?;
        if self.quota.quota_bytes == 0 {
            return Err(crate::Error::Config(
                "quota_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Create a test configuration with in-memory backends.
    ///
    /// **For testing only.**
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig::default(),
            ledger: LedgerConfig::Memory,
            pinstore: PinStoreConfig::Memory,
            quota: QuotaConfig::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            ledger: LedgerConfig::default(),
            pinstore: PinStoreConfig::default(),
            quota: QuotaConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        AppConfig::default().validate().unwrap();
        AppConfig::for_testing().validate().unwrap();
    }

    #[test]
    fn test_backend_enums_deserialize_tagged() {
        let json = r#"{"type": "http", "base_url": "https://ledger.example", "token": null}"#;
        let config: LedgerConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(config, LedgerConfig::Http { .. }));

        let json = r#"{"type": "memory"}"#;
        let config: PinStoreConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(config, PinStoreConfig::Memory));
    }

    #[test]
    fn test_rejects_partial_pinata_credentials() {
        let config = PinStoreConfig::Http {
            base_url: "https://api.pinata.cloud".to_string(),
            api_key: Some("key".to_string()),
            api_secret: None,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_quota() {
        let mut config = AppConfig::for_testing();
        config.quota.quota_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert!(config.metrics_enabled);
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }
}

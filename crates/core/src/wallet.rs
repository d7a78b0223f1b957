//! Wallet identity type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A wallet address: `0x` followed by 40 hex characters.
///
/// Addresses are normalized to lowercase at parse time so that map lookups
/// and equality checks never depend on the checksum casing a caller used.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Parse and normalize a wallet address.
    pub fn parse(s: &str) -> crate::Result<Self> {
        let hex = s
            .strip_prefix("0x")
            .ok_or_else(|| crate::Error::InvalidWallet(format!("missing 0x prefix: {s}")))?;
        if hex.len() != 40 {
            return Err(crate::Error::InvalidWallet(format!(
                "expected 40 hex chars after 0x, got {}",
                hex.len()
            )));
        }
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(crate::Error::InvalidWallet(format!(
                "non-hex character in address: {s}"
            )));
        }
        Ok(Self(format!("0x{}", hex.to_ascii_lowercase())))
    }

    /// Get the full address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Elided form for logs and UI: first 6 and last 4 characters.
    pub fn short(&self) -> String {
        format!("{}…{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = crate::Error;

    fn try_from(s: String) -> crate::Result<Self> {
        Self::parse(&s)
    }
}

impl From<WalletAddress> for String {
    fn from(addr: WalletAddress) -> String {
        addr.0
    }
}

impl fmt::Debug for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletAddress({})", self.short())
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! Content address type and hashing utilities.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Maximum accepted length for a content address string.
///
/// Covers every addressing scheme the external stores use (base58 CIDv0,
/// base32 CIDv1, hex digests) with room to spare.
pub const MAX_ADDRESS_LEN: usize = 128;

/// A content address assigned by the pinning service.
///
/// The address format is owned by the store (IPFS-style CIDs for the HTTP
/// backend, SHA-256 hex for the in-memory backend), so this type treats it
/// as an opaque validated string: non-empty, ASCII alphanumeric, bounded
/// length. Equality on addresses is equality on bytes stored.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentAddress(String);

impl ContentAddress {
    /// Parse and validate an address string.
    pub fn parse(s: &str) -> crate::Result<Self> {
        if s.is_empty() {
            return Err(crate::Error::InvalidAddress("empty address".to_string()));
        }
        if s.len() > MAX_ADDRESS_LEN {
            return Err(crate::Error::InvalidAddress(format!(
                "address too long: {} chars (max: {})",
                s.len(),
                MAX_ADDRESS_LEN
            )));
        }
        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(crate::Error::InvalidAddress(format!(
                "address contains non-alphanumeric characters: {s}"
            )));
        }
        Ok(Self(s.to_string()))
    }

    /// Compute the content address of a byte payload as a SHA-256 hex digest.
    ///
    /// Used by the in-memory pin store; remote stores assign their own
    /// addresses and this function plays no part in parsing those.
    pub fn for_bytes(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        let digest = hasher.finalize();
        Self(digest.iter().map(|b| format!("{b:02x}")).collect())
    }

    /// Get the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ContentAddress {
    type Error = crate::Error;

    fn try_from(s: String) -> crate::Result<Self> {
        Self::parse(&s)
    }
}

impl From<ContentAddress> for String {
    fn from(addr: ContentAddress) -> String {
        addr.0
    }
}

impl fmt::Debug for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head = &self.0[..self.0.len().min(16)];
        write!(f, "ContentAddress({head})")
    }
}

impl fmt::Display for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_cid_and_hex() {
        ContentAddress::parse("QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG").unwrap();
        ContentAddress::parse(&"ab".repeat(32)).unwrap();
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert!(ContentAddress::parse("").is_err());
        assert!(ContentAddress::parse("has space").is_err());
        assert!(ContentAddress::parse("trailing\n").is_err());
        assert!(ContentAddress::parse(&"a".repeat(MAX_ADDRESS_LEN + 1)).is_err());
    }

    #[test]
    fn test_for_bytes_is_deterministic() {
        let a = ContentAddress::for_bytes(b"hello world");
        let b = ContentAddress::for_bytes(b"hello world");
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
        assert_ne!(a, ContentAddress::for_bytes(b"hello worlds"));
    }

    #[test]
    fn test_serde_roundtrip_validates() {
        let addr = ContentAddress::for_bytes(b"data");
        let json = serde_json::to_string(&addr).unwrap();
        let parsed: ContentAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, parsed);

        let bad: std::result::Result<ContentAddress, _> = serde_json::from_str("\"not valid!\"");
        assert!(bad.is_err());
    }
}

//! Quota usage summary and size formatting.

use serde::{Deserialize, Serialize};

/// Derived storage usage for one owner, suitable for direct display.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuotaUsage {
    /// Bytes counted against the quota (active files only).
    pub used_bytes: u64,
    /// The configured quota.
    pub quota_bytes: u64,
    /// `used / quota * 100`.
    pub percent: f64,
}

/// Render a byte count in human-readable form: 1024-based units with two
/// decimal places, trailing zeros trimmed ("1.5 KB", "100 Bytes").
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exp = (bytes.ilog2() / 10).min(UNITS.len() as u32 - 1);
    let scaled = bytes as f64 / f64::powi(1024.0, exp as i32);
    let rounded = (scaled * 100.0).round() / 100.0;
    // Drop the fractional part when it rounds away ("2 MB", not "2.00 MB").
    if rounded.fract() == 0.0 {
        format!("{} {}", rounded as u64, UNITS[exp as usize])
    } else {
        format!("{} {}", rounded, UNITS[exp as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(0), "0 Bytes");
        assert_eq!(format_size(100), "100 Bytes");
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1024 * 1024), "1 MB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5 GB");
    }

    #[test]
    fn test_format_size_rounds_to_two_decimals() {
        // 1234567 / 1024^2 = 1.1773... MB
        assert_eq!(format_size(1_234_567), "1.18 MB");
    }

    #[test]
    fn test_format_size_caps_at_gb() {
        let two_tb = 2 * 1024u64.pow(4);
        assert_eq!(format_size(two_tb), "2048 GB");
    }
}

//! Serial number normalization

use regex::Regex;
use std::sync::LazyLock;

/// NetBox's limit on the device serial field
pub const MAX_SERIAL_LEN: usize = 50;

/// Some vendors report a composite string: `Serial: <value> MAC: ...`
static EMBEDDED_SERIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Serial:\s*(.+?)\s*MAC").expect("EMBEDDED_SERIAL is a valid regex pattern")
});

/// Serial to store for a device.
///
/// With `extract` set the embedded serial is recovered when present; the
/// result is always cut to `MAX_SERIAL_LEN` characters.
pub fn normalize_serial(raw: &str, extract: bool) -> String {
    let serial = if extract {
        EMBEDDED_SERIAL
            .captures(raw)
            .and_then(|captures| captures.get(1))
            .map_or(raw, |m| m.as_str())
    } else {
        raw
    };
    serial.chars().take(MAX_SERIAL_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_serial_truncated() {
        let raw = "A".repeat(60);
        assert_eq!(normalize_serial(&raw, false), "A".repeat(50));
    }

    #[test]
    fn test_short_serial_unchanged() {
        assert_eq!(normalize_serial("FOC1234X0AB", false), "FOC1234X0AB");
    }

    #[test]
    fn test_embedded_serial_extracted() {
        assert_eq!(normalize_serial("Serial: ABC123 MAC: xx", true), "ABC123");
    }

    #[test]
    fn test_extraction_miss_falls_back_to_truncation() {
        let raw = format!("chassis {}", "9".repeat(60));
        assert_eq!(normalize_serial(&raw, true).chars().count(), 50);
        assert_eq!(normalize_serial("f5-abcd-1234", true), "f5-abcd-1234");
    }

    #[test]
    fn test_pattern_ignored_without_extraction() {
        assert_eq!(normalize_serial("Serial: ABC123 MAC: xx", false), "Serial: ABC123 MAC: xx");
    }
}

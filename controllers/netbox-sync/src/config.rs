//! Sync configuration
//!
//! Parsed from the JSON invocation payload. The five keys the plugin host
//! always sends are required; everything else has a default.

use crate::error::SyncError;
use serde::Deserialize;
use std::time::Duration;

/// Which NMS field names and slugs the DeviceType
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceTypeKey {
    /// Hardware model (e.g. "C9300")
    #[default]
    Model,
    /// NMS sub-type name (e.g. "Switch")
    SubType,
}

/// Run-wide settings for one sync invocation
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// NetBox base URL
    pub end_point: String,
    /// NetBox API token
    pub token: String,
    /// Prefix length used when the one-IP table has no usable lanSegment
    #[serde(deserialize_with = "mask_from_text_or_number")]
    pub default_mask: String,
    /// NMS device group to reconcile
    pub device_group: String,
    /// Site used for devices the NMS has not filed under one
    pub default_site: String,

    /// Verify the NetBox TLS certificate
    #[serde(default)]
    pub verify_tls: bool,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Vendors whose serial embeds the real one as `Serial: <value> MAC...`
    #[serde(default = "default_serial_extract_vendors")]
    pub serial_extract_vendors: Vec<String>,
    /// Field the DeviceType slug is derived from
    #[serde(default)]
    pub device_type_key: DeviceTypeKey,
    /// Patch devices that already exist in NetBox
    #[serde(default = "default_true")]
    pub update_existing: bool,
    /// Report failure when any device or entity failed
    #[serde(default)]
    pub fail_on_errors: bool,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_serial_extract_vendors() -> Vec<String> {
    vec!["F5".to_string()]
}

fn default_true() -> bool {
    true
}

/// The mask arrives as a string ("24") from the plugin host, but hand-written
/// payloads often carry a bare number.
fn mask_from_text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Mask {
        Text(String),
        Number(u64),
    }

    Ok(match Mask::deserialize(deserializer)? {
        Mask::Text(text) => text.trim().to_string(),
        Mask::Number(number) => number.to_string(),
    })
}

impl SyncConfig {
    /// Parse and validate the invocation payload
    pub fn from_json(input: &str) -> Result<Self, SyncError> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| SyncError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), SyncError> {
        if self.end_point.trim().is_empty() {
            return Err(SyncError::InvalidConfig("end_point must not be empty".to_string()));
        }
        if self.token.trim().is_empty() {
            return Err(SyncError::InvalidConfig("token must not be empty".to_string()));
        }
        match self.default_mask.parse::<u8>() {
            Ok(mask) if mask <= 32 => Ok(()),
            _ => Err(SyncError::InvalidConfig(format!(
                "default_mask must be a prefix length between 0 and 32, got {:?}",
                self.default_mask
            ))),
        }
    }

    /// Per-request timeout for the NetBox client
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether `vendor` takes the embedded-serial extraction rule
    pub fn extracts_serial_for(&self, vendor: &str) -> bool {
        self.serial_extract_vendors
            .iter()
            .any(|v| v.eq_ignore_ascii_case(vendor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "end_point": "https://netbox.example.net",
        "token": "0123456789abcdef",
        "default_mask": "24",
        "device_group": "Core",
        "default_site": "HQ"
    }"#;

    #[test]
    fn test_minimal_payload_takes_defaults() {
        let config = SyncConfig::from_json(MINIMAL).unwrap();
        assert_eq!(config.default_mask, "24");
        assert!(!config.verify_tls);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.device_type_key, DeviceTypeKey::Model);
        assert!(config.update_existing);
        assert!(!config.fail_on_errors);
        assert!(config.extracts_serial_for("f5"));
        assert!(!config.extracts_serial_for("Cisco"));
    }

    #[test]
    fn test_optional_keys_override_defaults() {
        let config = SyncConfig::from_json(r#"{
            "end_point": "https://netbox.example.net",
            "token": "t",
            "default_mask": 26,
            "device_group": "Core",
            "default_site": "HQ",
            "device_type_key": "sub_type",
            "update_existing": false,
            "fail_on_errors": true,
            "serial_extract_vendors": ["F5", "Citrix"]
        }"#).unwrap();

        assert_eq!(config.default_mask, "26");
        assert_eq!(config.device_type_key, DeviceTypeKey::SubType);
        assert!(!config.update_existing);
        assert!(config.fail_on_errors);
        assert!(config.extracts_serial_for("CITRIX"));
    }

    #[test]
    fn test_missing_required_key_is_invalid() {
        let err = SyncConfig::from_json(r#"{
            "end_point": "https://netbox.example.net",
            "token": "t",
            "default_mask": "24",
            "device_group": "Core"
        }"#).unwrap_err();
        match err {
            SyncError::InvalidConfig(msg) => assert!(msg.contains("default_site"), "{}", msg),
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_mask_is_invalid() {
        for mask in ["33", "abc", "", "-1"] {
            let payload = MINIMAL.replace("\"24\"", &format!("{:?}", mask));
            assert!(
                matches!(SyncConfig::from_json(&payload), Err(SyncError::InvalidConfig(_))),
                "mask {:?} should be rejected",
                mask
            );
        }
    }

    #[test]
    fn test_empty_token_is_invalid() {
        let payload = MINIMAL.replace("0123456789abcdef", " ");
        assert!(matches!(SyncConfig::from_json(&payload), Err(SyncError::InvalidConfig(_))));
    }
}

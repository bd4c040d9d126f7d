//! Management IP mask resolution
//!
//! The one-IP table records the LAN segment each address lives in; its
//! trailing `/NN` is the mask. Resolution is stateless per address.

use nms_source::OneIpEntry;
use regex::Regex;
use std::sync::LazyLock;

/// Two-digit prefix length after the final slash, at the end of the segment
static LAN_SEGMENT_MASK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(\d{2})$").expect("LAN_SEGMENT_MASK is a valid regex pattern")
});

/// Mask for an address: from the first one-IP-table row when its lanSegment
/// ends in a usable `/NN`, otherwise `default_mask`.
pub fn resolve_mask(entries: &[OneIpEntry], default_mask: &str) -> String {
    entries
        .first()
        .and_then(|entry| entry.lan_segment.as_deref())
        .and_then(|segment| LAN_SEGMENT_MASK.captures(segment.trim()))
        .map(|captures| captures[1].to_string())
        .filter(|mask| mask.parse::<u8>().is_ok_and(|len| len <= 32))
        .unwrap_or_else(|| default_mask.to_string())
}

/// `address/mask`
pub fn compose_cidr(address: &str, mask: &str) -> String {
    format!("{}/{}", address, mask)
}

//! NetBox Sync
//!
//! Reconciles the devices of one NMS device group into NetBox: dependent
//! objects (role, manufacturer, device type, platform, site), the device
//! record, its management interface and IP, and the primary IPv4.
//!
//! Runs are best-effort. A failure on one device or object is logged and
//! recorded in the [`SyncReport`], and the run moves on.

pub mod cidr;
pub mod config;
pub mod error;
pub mod normalize;
pub mod reconcile_helpers;
pub mod reconciler;
pub mod report;
pub mod serial;
#[cfg(test)]
mod reconcile_helpers_test;
#[cfg(test)]
mod test_utils;

pub use config::{DeviceTypeKey, SyncConfig};
pub use error::SyncError;
pub use reconciler::Reconciler;
pub use report::{Stage, SyncIssue, SyncReport};

use netbox_client::{NetBoxClient, NetBoxClientTrait};
use nms_source::NmsSource;
use tracing::info;

/// Entry operation: parse the JSON payload, sync the configured group, and
/// return whether the run counts as a success.
///
/// Per-device failures only turn the result to `false` with
/// `fail_on_errors`. Invalid configuration and an unresolvable device group
/// are errors.
pub async fn run(input: &str, source: &dyn NmsSource) -> Result<bool, SyncError> {
    let config = SyncConfig::from_json(input)?;
    let client = NetBoxClient::with_options(
        config.end_point.clone(),
        config.token.clone(),
        config.timeout(),
        config.verify_tls,
    )?;
    let report = sync(&config, Box::new(client), source).await?;
    Ok(report.succeeded(config.fail_on_errors))
}

/// Sync with an already-built client
pub async fn sync(
    config: &SyncConfig,
    netbox_client: Box<dyn NetBoxClientTrait>,
    source: &dyn NmsSource,
) -> Result<SyncReport, SyncError> {
    info!("Syncing device group {} into {}", config.device_group, netbox_client.base_url());
    let mut reconciler = Reconciler::new(netbox_client, source, config);
    reconciler.reconcile_group().await?;
    Ok(reconciler.into_report())
}

//! Sync-specific error types.
//!
//! Only conditions that end a run surface as `SyncError`. Per-device and
//! per-entity failures are downgraded to issues in the run report.

use netbox_client::NetBoxError;
use nms_source::SourceError;
use thiserror::Error;

/// Errors that abort a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// NetBox client could not be built or rejected the run
    #[error("NetBox error: {0}")]
    NetBox(#[from] NetBoxError),

    /// NMS could not resolve the device group
    #[error("NMS source error: {0}")]
    Source(#[from] SourceError),

    /// Invocation payload is missing keys or carries invalid values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

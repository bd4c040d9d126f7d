//! Helper functions for common reconciliation patterns
//!
//! Every NetBox call the reconciler makes goes through `attempt`, which is
//! the one place a client error turns into a log line, a report issue and a
//! skipped step.

use crate::report::{Stage, SyncReport};
use netbox_client::NetBoxError;
use std::future::Future;
use tracing::error;

/// NetBox objects that carry an ID and URL
pub trait NetBoxResource {
    fn id(&self) -> u64;
    fn url(&self) -> &str;
}

macro_rules! impl_netbox_resource {
    ($($resource:ty),* $(,)?) => {
        $(
            impl NetBoxResource for $resource {
                fn id(&self) -> u64 { self.id }
                fn url(&self) -> &str { &self.url }
            }
        )*
    };
}

impl_netbox_resource!(
    netbox_client::DeviceRole,
    netbox_client::Manufacturer,
    netbox_client::DeviceType,
    netbox_client::Platform,
    netbox_client::Site,
    netbox_client::Device,
    netbox_client::Interface,
    netbox_client::IPAddress,
);

/// ID of the first object a lookup returned
pub fn first_id<R: NetBoxResource>(resources: &[R]) -> Option<u64> {
    resources.first().map(NetBoxResource::id)
}

/// Short classification of a client error for the log and report
pub fn classify(err: &NetBoxError) -> &'static str {
    match err {
        NetBoxError::Api(_) | NetBoxError::InvalidRequest(_) => "rejected by NetBox",
        NetBoxError::Authentication(_) => "not authorized",
        NetBoxError::NotFound(_) => "not found",
        NetBoxError::EmptyResponse(_) => "empty response",
        NetBoxError::Http(_) => "request failed",
        NetBoxError::Serialization(_) => "unreadable response",
    }
}

/// Run one NetBox operation for `device`.
///
/// On failure the error is logged with its payload, recorded against the
/// device at `stage`, and `None` is returned so the caller can skip whatever
/// depended on the result.
pub async fn attempt<T, F>(
    report: &mut SyncReport,
    device: &str,
    stage: Stage,
    action: &str,
    operation: F,
) -> Option<T>
where
    F: Future<Output = Result<T, NetBoxError>>,
{
    match operation.await {
        Ok(value) => Some(value),
        Err(e) => {
            let message = format!("Failed to {}: {}: {}", action, classify(&e), e);
            error!("{}", message);
            report.record_issue(device, stage, message);
            None
        }
    }
}

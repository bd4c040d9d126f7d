//! NmsSource trait
//!
//! Abstracts the network-discovery system the sync reads from. The JSON
//! snapshot reader implements it, and tests build snapshots in memory.

use crate::error::SourceError;
use crate::models::*;

/// Read-only view of NMS inventory
#[async_trait::async_trait]
pub trait NmsSource: Send + Sync {
    /// Resolve a device group into device ids, in NMS order
    async fn device_ids(&self, device_group: &str) -> Result<Vec<String>, SourceError>;

    /// Read one device by id
    async fn device(&self, device_id: &str) -> Result<NmsDevice, SourceError>;

    /// Site the device is filed under; empty when unassigned
    async fn site_name(&self, device_name: &str) -> Result<String, SourceError>;

    /// Free-form device property (e.g. `loc`)
    async fn device_property(&self, device_name: &str, key: &str) -> Result<Option<String>, SourceError>;

    /// Interfaces of one kind on a device, in NMS order
    async fn interface_refs(&self, device_name: &str, kind: &str) -> Result<Vec<InterfaceRef>, SourceError>;

    /// Interface detail for a reference
    async fn interface(&self, interface: &InterfaceRef) -> Result<NmsInterface, SourceError>;

    /// One-IP table rows for an address; empty when the address is unknown
    async fn one_ip_entries(&self, ip: &str) -> Result<Vec<OneIpEntry>, SourceError>;
}

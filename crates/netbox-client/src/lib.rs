//! NetBox REST API Client
//!
//! A Rust client library for interacting with the NetBox REST API.
//! Provides type-safe models and methods for the DCIM and IPAM objects that
//! an inventory sync creates and maintains.
//!
//! # Example
//!
//! ```no_run
//! use netbox_client::{NetBoxClient, DevicePatch};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a client
//! let client = NetBoxClient::new(
//!     "http://netbox:80".to_string(),
//!     "your-api-token".to_string(),
//! )?;
//!
//! // Look up a site by slug
//! let sites = client.query_sites(&[("slug", "HQ")], false).await?;
//!
//! // Point a device at its management address
//! let devices = client.query_devices(&[("name", "sw1")], false).await?;
//! if let Some(device) = devices.first() {
//!     let patch = DevicePatch { primary_ip4: Some(42), ..Default::default() };
//!     client.update_device(device.id, &patch).await?;
//! }
//! # let _ = sites;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **DCIM Operations**: Device roles, manufacturers, device types, platforms, sites, devices, interfaces
//! - **IPAM Operations**: Query, create and patch IP addresses
//! - **Pagination**: Support for fetching all pages of large result sets
//! - **Mocking**: `MockNetBoxClient` behind the `test-util` feature

pub mod client;
pub mod common;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod netbox_trait;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::NetBoxClient;
pub use common::{HttpClient, PaginatedResponse};
pub use error::NetBoxError;
pub use models::*;
pub use netbox_trait::NetBoxClientTrait;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockNetBoxClient;

//! NMS Inventory Source
//!
//! The read side of the inventory sync: resolves device groups into devices,
//! and exposes each device's attributes, site, properties, interfaces and
//! one-IP-table rows.
//!
//! # Example
//!
//! ```no_run
//! use nms_source::{NmsSource, SnapshotSource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = SnapshotSource::from_path("inventory.json").await?;
//! for id in source.device_ids("Core Switches").await? {
//!     let device = source.device(&id).await?;
//!     println!("{:?}", device.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod snapshot;
#[path = "trait.rs"]
pub mod nms_trait;

pub use error::SourceError;
pub use models::*;
pub use nms_trait::NmsSource;
pub use snapshot::{SnapshotInterface, SnapshotSource};

//! Dependent-object reconciler
//!
//! Role, manufacturer, device type, platform and site share one get-or-create
//! path keyed by slug. They are created once and never updated.

use super::Reconciler;
use crate::config::DeviceTypeKey;
use crate::normalize::NormalizedDevice;
use crate::reconcile_helpers::{attempt, first_id};
use crate::report::Stage;
use netbox_client::{NetBoxClientTrait, NetBoxError};
use tracing::{debug, info};

/// Status given to sites the sync creates
const NEW_SITE_STATUS: &str = "active";

/// One dependent object, with what it takes to create it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dependency<'a> {
    Role { name: &'a str, slug: &'a str },
    Manufacturer { name: &'a str, slug: &'a str },
    DeviceType { manufacturer_id: u64, model: &'a str, slug: &'a str },
    Platform { manufacturer_id: u64, name: &'a str, slug: &'a str },
    Site { name: &'a str, slug: &'a str },
}

impl Dependency<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Dependency::Role { .. } => "device role",
            Dependency::Manufacturer { .. } => "manufacturer",
            Dependency::DeviceType { .. } => "device type",
            Dependency::Platform { .. } => "platform",
            Dependency::Site { .. } => "site",
        }
    }

    fn slug(&self) -> &str {
        match self {
            Dependency::Role { slug, .. }
            | Dependency::Manufacturer { slug, .. }
            | Dependency::DeviceType { slug, .. }
            | Dependency::Platform { slug, .. }
            | Dependency::Site { slug, .. } => *slug,
        }
    }

    /// ID of the existing object with this slug
    async fn lookup(&self, client: &dyn NetBoxClientTrait) -> Result<Option<u64>, NetBoxError> {
        let filters = [("slug", self.slug())];
        Ok(match self {
            Dependency::Role { .. } => first_id(&client.query_device_roles(&filters, false).await?),
            Dependency::Manufacturer { .. } => first_id(&client.query_manufacturers(&filters, false).await?),
            Dependency::DeviceType { .. } => first_id(&client.query_device_types(&filters, false).await?),
            Dependency::Platform { .. } => first_id(&client.query_platforms(&filters, false).await?),
            Dependency::Site { .. } => first_id(&client.query_sites(&filters, false).await?),
        })
    }

    /// Create the object and return its ID
    async fn create(&self, client: &dyn NetBoxClientTrait) -> Result<u64, NetBoxError> {
        Ok(match *self {
            Dependency::Role { name, slug } => client.create_device_role(name, slug).await?.id,
            Dependency::Manufacturer { name, slug } => client.create_manufacturer(name, slug).await?.id,
            Dependency::DeviceType { manufacturer_id, model, slug } => {
                client.create_device_type(manufacturer_id, model, slug).await?.id
            }
            Dependency::Platform { manufacturer_id, name, slug } => {
                client.create_platform(name, slug, Some(manufacturer_id)).await?.id
            }
            Dependency::Site { name, slug } => client.create_site(name, slug, NEW_SITE_STATUS).await?.id,
        })
    }
}

/// IDs of a device's dependent objects; `None` where resolution failed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedDependencies {
    pub role: Option<u64>,
    pub manufacturer: Option<u64>,
    pub device_type: Option<u64>,
    /// Only resolved for devices reporting a software version
    pub platform: Option<u64>,
    pub site: Option<u64>,
}

impl ResolvedDependencies {
    /// Dependencies a device record cannot be written without, that are missing
    pub fn unresolved(&self) -> Vec<&'static str> {
        [
            ("role", self.role),
            ("manufacturer", self.manufacturer),
            ("device type", self.device_type),
            ("site", self.site),
        ]
        .into_iter()
        .filter(|(_, id)| id.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

impl Reconciler<'_> {
    /// Get-or-create one dependent object by slug
    pub(crate) async fn ensure_dependency(&mut self, device: &str, dependency: Dependency<'_>) -> Option<u64> {
        let kind = dependency.kind();
        let slug = dependency.slug();

        let existing = attempt(
            &mut self.report,
            device,
            Stage::Dependency,
            &format!("look up {} {}", kind, slug),
            dependency.lookup(self.netbox_client.as_ref()),
        )
        .await?;

        if let Some(id) = existing {
            debug!("{} {} already exists in NetBox (ID: {})", kind, slug, id);
            return Some(id);
        }

        let id = attempt(
            &mut self.report,
            device,
            Stage::Dependency,
            &format!("create {} {}", kind, slug),
            dependency.create(self.netbox_client.as_ref()),
        )
        .await?;
        info!("Created {} {} in NetBox (ID: {})", kind, slug, id);
        self.report.created += 1;
        Some(id)
    }

    /// Resolve role, manufacturer, device type, platform and site, in that order
    pub(crate) async fn ensure_dependencies(&mut self, device: &NormalizedDevice) -> ResolvedDependencies {
        let mut resolved = ResolvedDependencies {
            role: self
                .ensure_dependency(&device.name, Dependency::Role {
                    name: &device.role.name,
                    slug: &device.role.slug,
                })
                .await,
            manufacturer: self
                .ensure_dependency(&device.name, Dependency::Manufacturer {
                    name: &device.vendor.name,
                    slug: &device.vendor.slug,
                })
                .await,
            ..Default::default()
        };

        if let Some(manufacturer_id) = resolved.manufacturer {
            let type_slug = match self.config.device_type_key {
                DeviceTypeKey::Model => &device.model.slug,
                DeviceTypeKey::SubType => &device.sub_type.slug,
            };
            resolved.device_type = self
                .ensure_dependency(&device.name, Dependency::DeviceType {
                    manufacturer_id,
                    model: &device.model.name,
                    slug: type_slug,
                })
                .await;

            if let Some(version) = &device.version {
                resolved.platform = self
                    .ensure_dependency(&device.name, Dependency::Platform {
                        manufacturer_id,
                        name: &version.name,
                        slug: &version.slug,
                    })
                    .await;
            }
        }

        resolved.site = self
            .ensure_dependency(&device.name, Dependency::Site {
                name: &device.site.name,
                slug: &device.site.slug,
            })
            .await;

        resolved
    }
}

//! MySQL server resource for Stratus
//!
//! Implements [`stratus_core::Resource`] for managed MySQL servers, so a
//! [`stratus_core::Reconciler`] can create, read, update and delete them
//! through any client implementing
//! `ResourceClient<Resource = MySqlServer>`.
//!
//! # Declared attributes
//!
//! | Attribute | Notes |
//! |-----------|-------|
//! | `name`, `resource_group_name`, `location` | identity; location is normalized |
//! | `sku_name` | `<tier>_<family>_<capacity>`, e.g. `GP_Gen5_4` |
//! | `administrator_login`, `administrator_login_password` | the password is write-only |
//! | `version` | `5.6`, `5.7` or `8.0` |
//! | `ssl_enforcement` | `Enabled` / `Disabled`, any case |
//! | `storage_profile` | one block: `storage_mb`, `backup_retention_days`, `geo_redundant_backup`, `auto_grow` |
//! | `public_network_access_enabled` | defaults to `true` |
//! | `tags` | string map |
//! | `fqdn` | computed |

pub mod codec;
pub mod error;
pub mod id;
pub mod model;
pub mod resource;
pub mod sku;
pub mod validate;
pub mod wire;

pub use error::SkuError;
pub use id::ServerId;
pub use model::{ServerConfig, ServerVersion, StorageProfileConfig, Toggle, normalize_location};
pub use resource::MySqlServer;
pub use sku::{SUPPORTED_SKUS, SkuDescriptor, SkuTier};
pub use validate::validate;
pub use wire::{Server, ServerForCreate, ServerUpdateParameters};

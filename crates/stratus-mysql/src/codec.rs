//! Translation between [`ServerConfig`] and the wire payloads

use crate::id::ServerId;
use crate::model::{ServerConfig, StorageProfileConfig, Toggle, normalize_location};
use crate::sku::SkuDescriptor;
use crate::wire::{
    Server, ServerForCreate, ServerPropertiesForCreate, ServerUpdateParameters,
    ServerUpdateProperties, Sku, StorageProfile,
};
use serde::Serialize;
use stratus_core::{AttributeStore, AttributeStoreExt, CloudError, Result};

const CREATE_MODE: &str = "Default";

/// `storage_profile` block as written back to the store
#[derive(Debug, Serialize)]
struct StorageProfileBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    storage_mb: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    backup_retention_days: Option<i32>,
    geo_redundant_backup: String,
    auto_grow: String,
}

fn to_i32(attribute: &str, value: i64) -> Result<i32> {
    i32::try_from(value).map_err(|_| CloudError::Encode {
        attribute: attribute.to_string(),
        value: value.to_string(),
        reason: "out of range for a 32-bit integer".to_string(),
    })
}

fn expand_sku(sku_name: &str) -> Result<Sku> {
    let sku: SkuDescriptor = sku_name.parse()?;
    Ok(Sku {
        name: sku.name,
        tier: Some(sku.tier.as_str().to_string()),
        capacity: Some(sku.capacity),
        family: Some(sku.family),
    })
}

fn expand_storage_profile(profile: &StorageProfileConfig) -> Result<StorageProfile> {
    Ok(StorageProfile {
        backup_retention_days: profile
            .backup_retention_days
            .map(|days| to_i32("storage_profile.backup_retention_days", days))
            .transpose()?,
        geo_redundant_backup: profile.geo_redundant_backup.map(|t| t.as_str().to_string()),
        storage_mb: Some(to_i32("storage_profile.storage_mb", profile.storage_mb)?),
        storage_autogrow: Some(profile.auto_grow.as_str().to_string()),
    })
}

pub fn expand_create(config: &ServerConfig) -> Result<ServerForCreate> {
    Ok(ServerForCreate {
        location: config.location.clone(),
        properties: ServerPropertiesForCreate {
            administrator_login: config.administrator_login.clone(),
            administrator_login_password: config.administrator_login_password.clone(),
            version: config.version.as_str().to_string(),
            ssl_enforcement: config.ssl_enforcement.as_str().to_string(),
            public_network_access: Toggle::from(config.public_network_access_enabled)
                .as_str()
                .to_string(),
            storage_profile: expand_storage_profile(&config.storage_profile)?,
            create_mode: CREATE_MODE.to_string(),
        },
        sku: expand_sku(&config.sku_name)?,
        tags: config.tags.clone(),
    })
}

pub fn expand_update(config: &ServerConfig) -> Result<ServerUpdateParameters> {
    Ok(ServerUpdateParameters {
        properties: ServerUpdateProperties {
            storage_profile: expand_storage_profile(&config.storage_profile)?,
            administrator_login_password: config.administrator_login_password.clone(),
            version: config.version.as_str().to_string(),
            ssl_enforcement: config.ssl_enforcement.as_str().to_string(),
            public_network_access: Toggle::from(config.public_network_access_enabled)
                .as_str()
                .to_string(),
        },
        sku: expand_sku(&config.sku_name)?,
        tags: config.tags.clone(),
    })
}

/// Write the canonical remote state into the store
///
/// `administrator_login_password` is never returned by the API and is left
/// as declared.
pub fn flatten(id: &ServerId, server: &Server, store: &mut dyn AttributeStore) -> Result<()> {
    let props = &server.properties;

    store.set_as("name", server.name.as_deref().unwrap_or(&id.name))?;
    store.set_as("resource_group_name", &id.resource_group)?;
    if let Some(location) = &server.location {
        store.set_as("location", normalize_location(location))?;
    }
    if let Some(sku) = &server.sku {
        store.set_as("sku_name", &sku.name)?;
    }
    store.set_as("administrator_login", props.administrator_login.as_deref().unwrap_or(""))?;
    store.set_as("version", props.version.as_deref().unwrap_or(""))?;
    store.set_as("ssl_enforcement", props.ssl_enforcement.as_deref().unwrap_or(""))?;
    store.set_as(
        "public_network_access_enabled",
        props.public_network_access.as_deref() != Some(Toggle::Disabled.as_str()),
    )?;

    let profile = props.storage_profile.clone().unwrap_or_default();
    store.set_block(
        "storage_profile",
        Some(StorageProfileBlock {
            storage_mb: profile.storage_mb,
            backup_retention_days: profile.backup_retention_days,
            geo_redundant_backup: profile.geo_redundant_backup.unwrap_or_default(),
            auto_grow: profile.storage_autogrow.unwrap_or_default(),
        }),
    )?;

    store.set_as(
        "fqdn",
        props.fully_qualified_domain_name.as_deref().unwrap_or(""),
    )?;
    store.set_as("tags", &server.tags)?;

    tracing::debug!(
        "Refreshed {} (state {})",
        id,
        props.user_visible_state.as_deref().unwrap_or("unknown")
    );
    Ok(())
}

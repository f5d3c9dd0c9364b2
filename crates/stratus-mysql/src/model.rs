//! Declared configuration of a MySQL server
//!
//! Attributes are read from the store exactly once, here. Everything past
//! this boundary works on [`ServerConfig`], never on raw attribute values.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use stratus_core::{AttributeStore, AttributeStoreExt, CloudError, Result};

/// Server major version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerVersion {
    V5_6,
    V5_7,
    V8_0,
}

impl ServerVersion {
    pub const ALL: [ServerVersion; 3] = [ServerVersion::V5_6, ServerVersion::V5_7, ServerVersion::V8_0];

    pub fn as_str(self) -> &'static str {
        match self {
            ServerVersion::V5_6 => "5.6",
            ServerVersion::V5_7 => "5.7",
            ServerVersion::V8_0 => "8.0",
        }
    }

    /// Case-insensitive lookup
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Enabled` / `Disabled` switch used by several server settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Enabled,
    Disabled,
}

impl Toggle {
    pub fn as_str(self) -> &'static str {
        match self {
            Toggle::Enabled => "Enabled",
            Toggle::Disabled => "Disabled",
        }
    }

    pub fn parse_ignore_case(value: &str) -> Option<Self> {
        [Toggle::Enabled, Toggle::Disabled]
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(value))
    }

    pub fn parse_exact(value: &str) -> Option<Self> {
        [Toggle::Enabled, Toggle::Disabled]
            .into_iter()
            .find(|t| t.as_str() == value)
    }
}

impl From<bool> for Toggle {
    fn from(enabled: bool) -> Self {
        if enabled { Toggle::Enabled } else { Toggle::Disabled }
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageProfileConfig {
    pub storage_mb: i64,
    pub backup_retention_days: Option<i64>,
    pub geo_redundant_backup: Option<Toggle>,
    pub auto_grow: Toggle,
}

/// Typed declared configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub name: String,
    pub resource_group_name: String,
    /// Normalized location
    pub location: String,
    pub sku_name: String,
    pub administrator_login: String,
    pub administrator_login_password: String,
    pub version: ServerVersion,
    pub ssl_enforcement: Toggle,
    pub storage_profile: StorageProfileConfig,
    pub public_network_access_enabled: bool,
    pub tags: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct RawStorageProfile {
    storage_mb: i64,
    backup_retention_days: Option<i64>,
    geo_redundant_backup: Option<String>,
    auto_grow: Option<String>,
}

fn invalid(name: &str, reason: impl Into<String>) -> CloudError {
    CloudError::Attribute {
        name: name.to_string(),
        reason: reason.into(),
    }
}

fn choices<T: fmt::Display>(values: impl IntoIterator<Item = T>) -> String {
    values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ServerConfig {
    /// Load and type-check the declared configuration
    pub fn from_store(store: &dyn AttributeStore) -> Result<Self> {
        let version: String = store.require("version")?;
        let version = ServerVersion::parse(&version).ok_or_else(|| {
            invalid(
                "version",
                format!("expected one of {}, got {:?}", choices(ServerVersion::ALL), version),
            )
        })?;

        let ssl_enforcement: String = store.require("ssl_enforcement")?;
        let ssl_enforcement = Toggle::parse_ignore_case(&ssl_enforcement).ok_or_else(|| {
            invalid(
                "ssl_enforcement",
                format!("expected Enabled or Disabled, got {:?}", ssl_enforcement),
            )
        })?;

        let raw: RawStorageProfile = store
            .get_block("storage_profile")?
            .ok_or_else(|| invalid("storage_profile", "exactly one block is required"))?;
        let geo_redundant_backup = match raw.geo_redundant_backup.as_deref() {
            None | Some("") => None,
            Some(value) => Some(Toggle::parse_ignore_case(value).ok_or_else(|| {
                invalid(
                    "storage_profile.geo_redundant_backup",
                    format!("expected Enabled or Disabled, got {:?}", value),
                )
            })?),
        };
        let auto_grow = match raw.auto_grow.as_deref() {
            None | Some("") => Toggle::Enabled,
            Some(value) => Toggle::parse_exact(value).ok_or_else(|| {
                invalid(
                    "storage_profile.auto_grow",
                    format!("expected Enabled or Disabled, got {:?}", value),
                )
            })?,
        };

        Ok(Self {
            name: store.require("name")?,
            resource_group_name: store.require("resource_group_name")?,
            location: normalize_location(&store.require::<String>("location")?),
            sku_name: store.require("sku_name")?,
            administrator_login: store.require("administrator_login")?,
            administrator_login_password: store.require("administrator_login_password")?,
            version,
            ssl_enforcement,
            storage_profile: StorageProfileConfig {
                storage_mb: raw.storage_mb,
                backup_retention_days: raw.backup_retention_days,
                geo_redundant_backup,
                auto_grow,
            },
            public_network_access_enabled: store
                .get_as("public_network_access_enabled")?
                .unwrap_or(true),
            tags: store.get_as("tags")?.unwrap_or_default(),
        })
    }
}

/// Lowercase a location and strip its spaces ("West Europe" -> "westeurope")
pub fn normalize_location(location: &str) -> String {
    location
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

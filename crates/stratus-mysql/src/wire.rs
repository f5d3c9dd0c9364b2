//! Payloads exchanged with the MySQL servers API

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_retention_days: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_redundant_backup: Option<String>,
    #[serde(rename = "storageMB", skip_serializing_if = "Option::is_none")]
    pub storage_mb: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_autogrow: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerPropertiesForCreate {
    pub administrator_login: String,
    pub administrator_login_password: String,
    pub version: String,
    pub ssl_enforcement: String,
    pub public_network_access: String,
    pub storage_profile: StorageProfile,
    pub create_mode: String,
}

/// Body of a create request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerForCreate {
    pub location: String,
    pub properties: ServerPropertiesForCreate,
    pub sku: Sku,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerUpdateProperties {
    pub storage_profile: StorageProfile,
    pub administrator_login_password: String,
    pub version: String,
    pub ssl_enforcement: String,
    pub public_network_access: String,
}

/// Body of an update request
///
/// Name, location, resource group and administrator login cannot change
/// and are not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerUpdateParameters {
    pub properties: ServerUpdateProperties,
    pub sku: Sku,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerProperties {
    pub administrator_login: Option<String>,
    pub version: Option<String>,
    pub ssl_enforcement: Option<String>,
    pub public_network_access: Option<String>,
    pub storage_profile: Option<StorageProfile>,
    pub fully_qualified_domain_name: Option<String>,
    pub user_visible_state: Option<String>,
}

/// A server as returned by a read
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub id: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub sku: Option<Sku>,
    #[serde(default)]
    pub properties: ServerProperties,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_payload_shape() {
        let server: Server = serde_json::from_value(json!({
            "id": "/subscriptions/sub1/resourceGroups/group1/providers/Microsoft.DBforMySQL/servers/db1",
            "name": "db1",
            "location": "westeurope",
            "sku": {"name": "GP_Gen5_2", "tier": "GeneralPurpose", "capacity": 2, "family": "Gen5"},
            "properties": {
                "administratorLogin": "admin1",
                "version": "5.7",
                "sslEnforcement": "Enabled",
                "storageProfile": {"storageMB": 51200, "backupRetentionDays": 7},
                "fullyQualifiedDomainName": "db1.mysql.database.azure.com",
                "userVisibleState": "Ready"
            }
        }))
        .unwrap();

        assert_eq!(server.properties.storage_profile.unwrap().storage_mb, Some(51200));
        assert_eq!(
            server.properties.fully_qualified_domain_name.as_deref(),
            Some("db1.mysql.database.azure.com")
        );
        assert!(server.tags.is_empty());
    }

    #[test]
    fn test_storage_profile_field_names() {
        let value = serde_json::to_value(StorageProfile {
            storage_mb: Some(5120),
            storage_autogrow: Some("Enabled".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(value, json!({"storageMB": 5120, "storageAutogrow": "Enabled"}));
    }
}

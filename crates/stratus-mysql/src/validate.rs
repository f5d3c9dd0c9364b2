//! Rules checked before a server configuration is submitted

use crate::model::ServerConfig;
use crate::sku::{BASIC_TIER_MAX_STORAGE_MB, SUPPORTED_SKUS};
use regex::Regex;
use std::sync::LazyLock;
use stratus_core::Violation;

static SERVER_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-z][-0-9a-z]{1,61}[0-9a-z]$").expect("server name pattern is valid")
});

const STORAGE_MB_MIN: i64 = 5120;
const STORAGE_MB_MAX: i64 = 4_194_304;
const STORAGE_MB_STEP: i64 = 1024;
const RETENTION_DAYS: std::ops::RangeInclusive<i64> = 7..=35;

/// Check a proposed configuration; an empty result means it may be submitted
pub fn validate(config: &ServerConfig) -> Vec<Violation> {
    let mut violations = Vec::new();
    let storage_mb = config.storage_profile.storage_mb;

    if !SERVER_NAME.is_match(&config.name) {
        violations.push(
            Violation::new(
                "server_name",
                "name must be 3-63 characters of lowercase letters, digits and hyphens, \
                 and must not start or end with a hyphen",
            )
            .with_value("name", &config.name),
        );
    }

    if !SUPPORTED_SKUS.contains(&config.sku_name.as_str()) {
        violations.push(
            Violation::new("sku_name", "sku_name is not a supported SKU")
                .with_value("sku_name", &config.sku_name),
        );
    }

    if config.sku_name.starts_with("B_") && storage_mb > BASIC_TIER_MAX_STORAGE_MB {
        violations.push(
            Violation::new(
                "basic_tier_storage",
                format!(
                    "basic tier servers support at most {} MB of storage",
                    BASIC_TIER_MAX_STORAGE_MB
                ),
            )
            .with_value("sku_name", &config.sku_name)
            .with_value("storage_mb", storage_mb),
        );
    }

    if !(STORAGE_MB_MIN..=STORAGE_MB_MAX).contains(&storage_mb) {
        violations.push(
            Violation::new(
                "storage_mb_range",
                format!(
                    "storage_mb must be between {} and {}",
                    STORAGE_MB_MIN, STORAGE_MB_MAX
                ),
            )
            .with_value("storage_mb", storage_mb),
        );
    }
    if storage_mb % STORAGE_MB_STEP != 0 {
        violations.push(
            Violation::new(
                "storage_mb_increment",
                format!("storage_mb must be a multiple of {}", STORAGE_MB_STEP),
            )
            .with_value("storage_mb", storage_mb),
        );
    }

    if let Some(days) = config.storage_profile.backup_retention_days {
        if !RETENTION_DAYS.contains(&days) {
            violations.push(
                Violation::new(
                    "backup_retention_days",
                    format!(
                        "backup_retention_days must be between {} and {}",
                        RETENTION_DAYS.start(),
                        RETENTION_DAYS.end()
                    ),
                )
                .with_value("backup_retention_days", days),
            );
        }
    }

    violations
}

//! MySQL server resource error types

use stratus_core::CloudError;
use thiserror::Error;

/// A `sku_name` that cannot be decomposed into tier, family and capacity
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkuError {
    #[error("sku_name {name} has {parts} parts after splitting on '_', expected 3")]
    PartCount { name: String, parts: usize },

    #[error("sku_name {name} has unknown tier {tier}")]
    UnknownTier { name: String, tier: String },

    #[error("sku_name {name} has non-integer capacity {capacity}")]
    Capacity { name: String, capacity: String },
}

impl SkuError {
    pub fn sku_name(&self) -> &str {
        match self {
            SkuError::PartCount { name, .. }
            | SkuError::UnknownTier { name, .. }
            | SkuError::Capacity { name, .. } => name,
        }
    }
}

impl From<SkuError> for CloudError {
    fn from(err: SkuError) -> Self {
        CloudError::Encode {
            attribute: "sku_name".to_string(),
            value: err.sku_name().to_string(),
            reason: err.to_string(),
        }
    }
}

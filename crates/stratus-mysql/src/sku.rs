//! SKU names of the form `<tier>_<family>_<capacity>`

use crate::error::SkuError;
use std::fmt;
use std::str::FromStr;

/// SKU names accepted by the service
pub const SUPPORTED_SKUS: &[&str] = &[
    "B_Gen4_1",
    "B_Gen4_2",
    "B_Gen5_1",
    "B_Gen5_2",
    "GP_Gen4_2",
    "GP_Gen4_4",
    "GP_Gen4_8",
    "GP_Gen4_16",
    "GP_Gen4_32",
    "GP_Gen5_2",
    "GP_Gen5_4",
    "GP_Gen5_8",
    "GP_Gen5_16",
    "GP_Gen5_32",
    "GP_Gen5_64",
    "MO_Gen5_2",
    "MO_Gen5_4",
    "MO_Gen5_8",
    "MO_Gen5_16",
    "MO_Gen5_32",
];

/// Largest storage, in MB, the basic tier supports
pub const BASIC_TIER_MAX_STORAGE_MB: i64 = 1_048_576;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkuTier {
    Basic,
    GeneralPurpose,
    MemoryOptimized,
}

impl SkuTier {
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "B" => Some(SkuTier::Basic),
            "GP" => Some(SkuTier::GeneralPurpose),
            "MO" => Some(SkuTier::MemoryOptimized),
            _ => None,
        }
    }

    /// Name used on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            SkuTier::Basic => "Basic",
            SkuTier::GeneralPurpose => "GeneralPurpose",
            SkuTier::MemoryOptimized => "MemoryOptimized",
        }
    }
}

impl fmt::Display for SkuTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decomposed SKU
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkuDescriptor {
    pub name: String,
    pub tier: SkuTier,
    pub family: String,
    pub capacity: i32,
}

impl FromStr for SkuDescriptor {
    type Err = SkuError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = name.split('_').collect();
        let [tier, family, capacity] = parts.as_slice() else {
            return Err(SkuError::PartCount {
                name: name.to_string(),
                parts: parts.len(),
            });
        };

        let tier = SkuTier::from_prefix(tier).ok_or_else(|| SkuError::UnknownTier {
            name: name.to_string(),
            tier: tier.to_string(),
        })?;
        let capacity = capacity.parse().map_err(|_| SkuError::Capacity {
            name: name.to_string(),
            capacity: capacity.to_string(),
        })?;

        Ok(Self {
            name: name.to_string(),
            tier,
            family: family.to_string(),
            capacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_purpose() {
        let sku: SkuDescriptor = "GP_Gen5_4".parse().unwrap();
        assert_eq!(sku.tier, SkuTier::GeneralPurpose);
        assert_eq!(sku.family, "Gen5");
        assert_eq!(sku.capacity, 4);
        assert_eq!(sku.name, "GP_Gen5_4");
    }

    #[test]
    fn test_basic() {
        let sku: SkuDescriptor = "B_Gen4_1".parse().unwrap();
        assert_eq!(sku.tier, SkuTier::Basic);
        assert_eq!(sku.family, "Gen4");
        assert_eq!(sku.capacity, 1);
    }

    #[test]
    fn test_wrong_part_count() {
        assert_eq!(
            "GP_4".parse::<SkuDescriptor>(),
            Err(SkuError::PartCount {
                name: "GP_4".to_string(),
                parts: 2
            })
        );
        assert!(matches!(
            "GP_Gen5_4_x".parse::<SkuDescriptor>(),
            Err(SkuError::PartCount { parts: 4, .. })
        ));
    }

    #[test]
    fn test_unknown_tier() {
        assert!(matches!(
            "XX_Gen5_4".parse::<SkuDescriptor>(),
            Err(SkuError::UnknownTier { ref tier, .. }) if tier == "XX"
        ));
    }

    #[test]
    fn test_non_integer_capacity() {
        assert!(matches!(
            "GP_Gen5_four".parse::<SkuDescriptor>(),
            Err(SkuError::Capacity { .. })
        ));
    }

    #[test]
    fn test_supported_skus_all_decompose() {
        for name in SUPPORTED_SKUS {
            assert!(name.parse::<SkuDescriptor>().is_ok(), "{name}");
        }
    }
}

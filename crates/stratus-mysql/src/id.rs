use std::fmt;
use stratus_core::{IdParseError, ResourceId, ResourceKey};

pub const PROVIDER: &str = "Microsoft.DBforMySQL";

/// Identity of a MySQL server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerId {
    pub subscription_id: String,
    pub resource_group: String,
    pub name: String,
}

impl ServerId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group: resource_group.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ResourceId::new(&self.subscription_id, &self.resource_group)
            .with_provider(PROVIDER)
            .with_segment("servers", &self.name)
            .fmt(f)
    }
}

impl ResourceKey for ServerId {
    fn parse(input: &str) -> Result<Self, IdParseError> {
        let id = ResourceId::parse(input)?;
        id.expect_provider(PROVIDER)?;
        let (name, rest) = id.segments().pop("servers")?;
        rest.finish()?;
        Ok(Self {
            subscription_id: id.subscription_id,
            resource_group: id.resource_group,
            name,
        })
    }
}

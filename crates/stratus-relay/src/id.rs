use std::fmt;
use stratus_core::{IdParseError, ResourceId, ResourceKey, validate_resource_key};

pub const PROVIDER: &str = "Microsoft.Relay";

/// Identity of a Relay namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceId {
    pub subscription_id: String,
    pub resource_group: String,
    pub name: String,
}

impl NamespaceId {
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

    /// Identity of a hybrid connection inside this namespace
    pub fn hybrid_connection(&self, name: impl Into<String>) -> HybridConnectionId {
        HybridConnectionId {
            subscription_id: self.subscription_id.clone(),
            resource_group: self.resource_group.clone(),
            namespace_name: self.name.clone(),
            name: name.into(),
        }
    }

    fn resource_id(&self) -> ResourceId {
        ResourceId::new(&self.subscription_id, &self.resource_group)
            .with_provider(PROVIDER)
            .with_segment("namespaces", &self.name)
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.resource_id().fmt(f)
    }
}

impl ResourceKey for NamespaceId {
    fn parse(input: &str) -> Result<Self, IdParseError> {
        let id = ResourceId::parse(input)?;
        id.expect_provider(PROVIDER)?;
        let (name, rest) = id.segments().pop("namespaces")?;
        rest.finish()?;
        Ok(Self {
            subscription_id: id.subscription_id,
            resource_group: id.resource_group,
            name,
        })
    }
}

/// Identity of a hybrid connection, nested inside a namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HybridConnectionId {
    pub subscription_id: String,
    pub resource_group: String,
    pub namespace_name: String,
    pub name: String,
}

impl HybridConnectionId {
    pub fn namespace(&self) -> NamespaceId {
        NamespaceId::new(&self.subscription_id, &self.resource_group, &self.namespace_name)
    }
}

impl fmt::Display for HybridConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.namespace()
            .resource_id()
            .with_segment("hybridConnections", &self.name)
            .fmt(f)
    }
}

impl ResourceKey for HybridConnectionId {
    fn parse(input: &str) -> Result<Self, IdParseError> {
        let id = ResourceId::parse(input)?;
        id.expect_provider(PROVIDER)?;
        let (name, rest) = id.segments().pop("hybridConnections")?;
        let (namespace_name, rest) = rest.pop("namespaces")?;
        rest.finish()?;
        Ok(Self {
            subscription_id: id.subscription_id,
            resource_group: id.resource_group,
            namespace_name,
            name,
        })
    }
}

/// Validation errors for a field holding a namespace identity
pub fn validate_namespace_id(value: &str, field: &str) -> Vec<String> {
    validate_resource_key::<NamespaceId>(value, field)
}

/// Validation errors for a field holding a hybrid connection identity
pub fn validate_hybrid_connection_id(value: &str, field: &str) -> Vec<String> {
    validate_resource_key::<HybridConnectionId>(value, field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratus_core::ParseErrorKind;

    const NAMESPACE: &str =
        "/subscriptions/sub1/resourceGroups/group1/providers/Microsoft.Relay/namespaces/ns1";
    const HYBRID: &str = "/subscriptions/sub1/resourceGroups/group1/providers/Microsoft.Relay/namespaces/ns1/hybridConnections/hc1";

    #[test]
    fn test_parse_namespace() {
        let id = NamespaceId::parse(NAMESPACE).unwrap();
        assert_eq!(id, NamespaceId::new("sub1", "group1", "ns1"));
        assert_eq!(id.to_string(), NAMESPACE);
    }

    #[test]
    fn test_parse_hybrid_connection() {
        let id = HybridConnectionId::parse(HYBRID).unwrap();
        assert_eq!(id.resource_group, "group1");
        assert_eq!(id.namespace_name, "ns1");
        assert_eq!(id.name, "hc1");
        assert_eq!(id.to_string(), HYBRID);
        assert_eq!(id.namespace().to_string(), NAMESPACE);
    }

    #[test]
    fn test_build_nested_from_namespace() {
        let namespace = NamespaceId::new("sub1", "group1", "ns1");
        assert_eq!(namespace.hybrid_connection("hc1").to_string(), HYBRID);
    }

    #[test]
    fn test_namespace_rejects_hybrid_connection_id() {
        let err = NamespaceId::parse(HYBRID).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::DanglingSegments(vec!["hybridConnections/hc1".to_string()])
        );
        assert_eq!(err.input, HYBRID);
    }

    #[test]
    fn test_hybrid_connection_requires_both_segments() {
        let err = HybridConnectionId::parse(NAMESPACE).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::MissingSegment("hybridConnections".to_string())
        );

        let err = HybridConnectionId::parse(
            "/subscriptions/sub1/resourceGroups/group1/providers/Microsoft.Relay/hybridConnections/hc1",
        )
        .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingSegment("namespaces".to_string()));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = HybridConnectionId::parse(
            "/subscriptions/sub1/resourceGroups/group1/providers/Microsoft.Relay/namespaces//hybridConnections/hc1",
        )
        .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EmptySegment("namespaces".to_string()));
    }

    #[test]
    fn test_rejects_other_provider() {
        let err = NamespaceId::parse(
            "/subscriptions/sub1/resourceGroups/group1/providers/Microsoft.ServiceBus/namespaces/ns1",
        )
        .unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::Malformed(_)));

        let err = HybridConnectionId::parse(
            "/subscriptions/sub1/resourceGroups/group1/providers/Microsoft.ServiceBus/namespaces/ns1/hybridConnections/hc1",
        )
        .unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::Malformed(_)));
    }

    #[test]
    fn test_validators() {
        assert!(validate_namespace_id(NAMESPACE, "relay_namespace_id").is_empty());
        assert!(validate_hybrid_connection_id(HYBRID, "hybrid_connection_id").is_empty());

        let errors = validate_hybrid_connection_id(NAMESPACE, "hybrid_connection_id");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("hybrid_connection_id"));
        assert!(errors[0].contains("hybridConnections"));
    }
}

//! Hierarchical resource identities
//!
//! Remote resources are addressed by paths of the form
//!
//! ```text
//! /subscriptions/{sub}/resourceGroups/{group}/providers/{namespace}/{type}/{name}[/{type}/{name}...]
//! ```
//!
//! [`ResourceId::parse`] splits such a path into its scope (subscription,
//! resource group, provider namespace) and an ordered list of named
//! segments. Typed keys then consume the segments they expect with
//! [`Segments::pop`] and finish with [`Segments::finish`], which rejects any
//! component that nobody asked for.

use std::fmt;
use thiserror::Error;

const SUBSCRIPTIONS: &str = "subscriptions";
const RESOURCE_GROUPS: &str = "resourceGroups";
const PROVIDERS: &str = "providers";

/// Failure to parse a resource identity
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot parse resource ID {input:?}: {kind}")]
pub struct IdParseError {
    /// The offending input, verbatim
    pub input: String,

    /// What was wrong with it
    pub kind: ParseErrorKind,
}

impl IdParseError {
    fn new(input: &str, kind: ParseErrorKind) -> Self {
        Self {
            input: input.to_string(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The path does not have the overall shape of a resource ID
    Malformed(String),
    /// A segment type the caller required is not present
    MissingSegment(String),
    /// A key or value in the path is empty
    EmptySegment(String),
    /// Components left over after every expected segment was consumed
    DanglingSegments(Vec<String>),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::Malformed(reason) => write!(f, "{}", reason),
            ParseErrorKind::MissingSegment(kind) => write!(f, "no `{}` segment found", kind),
            ParseErrorKind::EmptySegment(kind) => {
                write!(f, "segment `{}` has an empty key or value", kind)
            }
            ParseErrorKind::DanglingSegments(rest) => {
                write!(f, "unexpected trailing segments: {}", rest.join(", "))
            }
        }
    }
}

/// One `{type}/{name}` pair of a resource path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: String,
    pub name: String,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

/// Parsed, untyped resource identity
#[derive(Debug, Clone)]
pub struct ResourceId {
    pub subscription_id: String,
    pub resource_group: String,
    pub provider: Option<String>,
    pub segments: Vec<Segment>,
    source: Option<String>,
}

impl ResourceId {
    /// Start building an identity scoped to a subscription and resource group
    pub fn new(subscription_id: impl Into<String>, resource_group: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group: resource_group.into(),
            provider: None,
            segments: Vec::new(),
            source: None,
        }
    }

    pub fn with_provider(mut self, namespace: impl Into<String>) -> Self {
        self.provider = Some(namespace.into());
        self
    }

    pub fn with_segment(mut self, kind: impl Into<String>, name: impl Into<String>) -> Self {
        self.segments.push(Segment {
            kind: kind.into(),
            name: name.into(),
        });
        self
    }

    /// Parse a resource path into its scope and ordered segments
    pub fn parse(input: &str) -> Result<Self, IdParseError> {
        let path = input.trim().trim_start_matches('/').trim_end_matches('/');
        let components: Vec<&str> = path.split('/').collect();

        if components.len() % 2 != 0 {
            return Err(IdParseError::new(
                input,
                ParseErrorKind::Malformed(format!(
                    "the number of path segments ({}) is not divisible by 2",
                    components.len()
                )),
            ));
        }

        let mut pairs = Vec::with_capacity(components.len() / 2);
        for pair in components.chunks(2) {
            let (kind, name) = (pair[0], pair[1]);
            if kind.is_empty() || name.is_empty() {
                let label = if kind.is_empty() { name } else { kind };
                return Err(IdParseError::new(
                    input,
                    ParseErrorKind::EmptySegment(label.to_string()),
                ));
            }
            pairs.push(Segment {
                kind: kind.to_string(),
                name: name.to_string(),
            });
        }

        let subscription_id = take_scope(&mut pairs, |k| k == SUBSCRIPTIONS).ok_or_else(|| {
            IdParseError::new(
                input,
                ParseErrorKind::Malformed("no subscription ID found".to_string()),
            )
        })?;
        let resource_group = take_scope(&mut pairs, |k| k.eq_ignore_ascii_case(RESOURCE_GROUPS))
            .ok_or_else(|| {
                IdParseError::new(
                    input,
                    ParseErrorKind::Malformed("no resource group name found".to_string()),
                )
            })?;
        let provider = take_scope(&mut pairs, |k| k == PROVIDERS);

        Ok(Self {
            subscription_id,
            resource_group,
            provider,
            segments: pairs,
            source: Some(input.to_string()),
        })
    }

    /// Fail unless the identity lives under the given provider namespace
    ///
    /// Namespaces compare case-insensitively.
    pub fn expect_provider(&self, namespace: &str) -> Result<(), IdParseError> {
        let reason = match &self.provider {
            Some(provider) if provider.eq_ignore_ascii_case(namespace) => return Ok(()),
            Some(provider) => format!(
                "provider namespace `{}` does not match `{}`",
                provider, namespace
            ),
            None => format!("no provider namespace found, expected `{}`", namespace),
        };
        let input = self.source.clone().unwrap_or_else(|| self.to_string());
        Err(IdParseError::new(&input, ParseErrorKind::Malformed(reason)))
    }

    /// Consume the named segments of this identity
    pub fn segments(&self) -> Segments {
        Segments {
            input: self.source.clone().unwrap_or_else(|| self.to_string()),
            remaining: self.segments.clone(),
        }
    }
}

fn take_scope(pairs: &mut Vec<Segment>, matches: impl Fn(&str) -> bool) -> Option<String> {
    let position = pairs.iter().position(|s| matches(&s.kind))?;
    Some(pairs.remove(position).name)
}

impl PartialEq for ResourceId {
    fn eq(&self, other: &Self) -> bool {
        self.subscription_id == other.subscription_id
            && self.resource_group == other.resource_group
            && self.provider == other.provider
            && self.segments == other.segments
    }
}

impl Eq for ResourceId {}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/{}/{}/{}/{}",
            SUBSCRIPTIONS, self.subscription_id, RESOURCE_GROUPS, self.resource_group
        )?;
        if let Some(provider) = &self.provider {
            write!(f, "/{}/{}", PROVIDERS, provider)?;
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

/// Segments not yet claimed by a typed key
///
/// Every call returns the remaining segments alongside the value, so a
/// partially consumed path is never shared between parses.
#[derive(Debug, Clone)]
#[must_use = "remaining segments must be checked with `finish`"]
pub struct Segments {
    input: String,
    remaining: Vec<Segment>,
}

impl Segments {
    /// Remove the first segment of the given type and return its name
    pub fn pop(mut self, kind: &str) -> Result<(String, Segments), IdParseError> {
        let position = self
            .remaining
            .iter()
            .position(|s| s.kind == kind)
            .ok_or_else(|| {
                IdParseError::new(&self.input, ParseErrorKind::MissingSegment(kind.to_string()))
            })?;
        let segment = self.remaining.remove(position);
        Ok((segment.name, self))
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Fail if any segment was left unclaimed
    pub fn finish(self) -> Result<(), IdParseError> {
        if self.remaining.is_empty() {
            return Ok(());
        }
        let rest = self.remaining.iter().map(Segment::to_string).collect();
        Err(IdParseError::new(
            &self.input,
            ParseErrorKind::DanglingSegments(rest),
        ))
    }
}

/// A typed identity that can be parsed from and rendered to an ID string
pub trait ResourceKey: fmt::Display + Sized {
    fn parse(input: &str) -> Result<Self, IdParseError>;
}

/// Validate a field that must hold an ID of type `K`
///
/// Returns human-readable errors; empty when the value parses.
pub fn validate_resource_key<K: ResourceKey>(value: &str, field: &str) -> Vec<String> {
    match K::parse(value) {
        Ok(_) => Vec::new(),
        Err(err) => vec![format!("cannot parse {:?} as a resource id: {}", field, err)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HYBRID: &str = "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/group1/providers/Microsoft.Relay/namespaces/ns1/hybridConnections/hc1";

    #[test]
    fn test_parse_nested_identity() {
        let id = ResourceId::parse(HYBRID).unwrap();
        assert_eq!(id.subscription_id, "00000000-0000-0000-0000-000000000000");
        assert_eq!(id.resource_group, "group1");
        assert_eq!(id.provider.as_deref(), Some("Microsoft.Relay"));
        assert_eq!(id.segments.len(), 2);
        assert_eq!(id.segments[0].kind, "namespaces");
        assert_eq!(id.segments[1].name, "hc1");
    }

    #[test]
    fn test_pop_segments_in_any_order() {
        let id = ResourceId::parse(HYBRID).unwrap();
        let (hc, rest) = id.segments().pop("hybridConnections").unwrap();
        let (ns, rest) = rest.pop("namespaces").unwrap();
        assert_eq!(hc, "hc1");
        assert_eq!(ns, "ns1");
        assert!(rest.finish().is_ok());
    }

    #[test]
    fn test_expect_provider() {
        let id = ResourceId::parse(HYBRID).unwrap();
        assert!(id.expect_provider("Microsoft.Relay").is_ok());
        assert!(id.expect_provider("microsoft.relay").is_ok());

        let err = id.expect_provider("Microsoft.DBforMySQL").unwrap_err();
        assert_eq!(err.input, HYBRID);
        assert!(matches!(err.kind, ParseErrorKind::Malformed(ref reason) if reason.contains("Microsoft.Relay")));

        let bare = ResourceId::parse("/subscriptions/sub1/resourceGroups/group1/servers/db1").unwrap();
        assert!(matches!(
            bare.expect_provider("Microsoft.DBforMySQL").unwrap_err().kind,
            ParseErrorKind::Malformed(_)
        ));
    }

    #[test]
    fn test_missing_segment() {
        let id = ResourceId::parse(HYBRID).unwrap();
        let err = id.segments().pop("servers").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingSegment("servers".into()));
        assert_eq!(err.input, HYBRID);
    }

    #[test]
    fn test_dangling_segment_is_distinct() {
        let id = ResourceId::parse(HYBRID).unwrap();
        let (_, rest) = id.segments().pop("namespaces").unwrap();
        let err = rest.finish().unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::DanglingSegments(vec!["hybridConnections/hc1".into()])
        );
    }

    #[test]
    fn test_pop_does_not_affect_identity() {
        let id = ResourceId::parse(HYBRID).unwrap();
        let _ = id.segments().pop("namespaces").unwrap();
        // a fresh cursor still sees every segment
        assert!(id.segments().pop("namespaces").is_ok());
    }

    #[test]
    fn test_malformed_inputs() {
        for input in [
            "",
            "not-an-id",
            "/subscriptions/sub1/resourceGroups",
            "/resourceGroups/group1/providers/Microsoft.Relay/namespaces/ns1",
            "/subscriptions/sub1/providers/Microsoft.Relay/namespaces/ns1",
        ] {
            let err = ResourceId::parse(input).unwrap_err();
            assert!(
                matches!(err.kind, ParseErrorKind::Malformed(_)),
                "{input:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_empty_segment_value() {
        let err = ResourceId::parse("/subscriptions/sub1/resourceGroups//providers/X").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::EmptySegment(_)));
    }

    #[test]
    fn test_lowercase_resource_groups_accepted() {
        let id = ResourceId::parse("/subscriptions/sub1/resourcegroups/Group1").unwrap();
        assert_eq!(id.resource_group, "Group1");
        assert!(id.provider.is_none());
        assert!(id.segments.is_empty());
    }

    #[test]
    fn test_build_round_trips_canonical_ids() {
        let id = ResourceId::parse(HYBRID).unwrap();
        assert_eq!(id.to_string(), HYBRID);

        let built = ResourceId::new("00000000-0000-0000-0000-000000000000", "group1")
            .with_provider("Microsoft.Relay")
            .with_segment("namespaces", "ns1")
            .with_segment("hybridConnections", "hc1");
        assert_eq!(built, id);
    }

    #[test]
    fn test_trailing_slash_tolerated() {
        let id = ResourceId::parse(&format!("{HYBRID}/")).unwrap();
        assert_eq!(id.segments.len(), 2);
    }
}

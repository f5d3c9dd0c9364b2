//! Cross-field validation results

use std::fmt;

/// A single violated rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Stable identifier of the rule (e.g. "basic_tier_storage")
    pub rule: &'static str,

    /// Human-readable explanation
    pub message: String,

    /// Offending attribute values as (name, value)
    pub values: Vec<(String, String)>,
}

impl Violation {
    pub fn new(rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
            values: Vec::new(),
        }
    }

    pub fn with_value(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.values.push((name.into(), value.to_string()));
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if !self.values.is_empty() {
            let values: Vec<String> = self
                .values
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect();
            write!(f, " [{}]", values.join(", "))?;
        }
        Ok(())
    }
}

/// Non-empty list of violations that blocked a submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_rule(&self, rule: &str) -> bool {
        self.0.iter().any(|v| v.rule == rule)
    }
}

impl From<Vec<Violation>> for Violations {
    fn from(violations: Vec<Violation>) -> Self {
        Self(violations)
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(Violation::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

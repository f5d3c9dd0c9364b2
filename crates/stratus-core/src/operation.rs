//! Lifecycle operations and states

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of lifecycle operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Create,
    Read,
    Update,
    Delete,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Create => write!(f, "create"),
            OperationKind::Read => write!(f, "read"),
            OperationKind::Update => write!(f, "update"),
            OperationKind::Delete => write!(f, "delete"),
        }
    }
}

/// Reconciliation state of one resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Absent,
    /// Looking for an existing remote resource before creating one
    ImportCheck,
    Creating,
    Present,
    Updating,
    Deleting,
}

impl LifecycleState {
    /// Whether `next` is reachable from `self` in one step
    ///
    /// Failed mutations fall back to the state they started from.
    pub fn can_transition_to(self, next: LifecycleState) -> bool {
        use LifecycleState::*;
        matches!(
            (self, next),
            (Absent, ImportCheck)
                | (Absent, Creating)
                | (ImportCheck, Creating)
                | (ImportCheck, Absent)
                | (Creating, Present)
                | (Creating, Absent)
                | (Present, Updating)
                | (Present, Deleting)
                | (Present, Absent)
                | (Updating, Present)
                | (Deleting, Absent)
                | (Deleting, Present)
        )
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Absent => write!(f, "absent"),
            LifecycleState::ImportCheck => write!(f, "import-check"),
            LifecycleState::Creating => write!(f, "creating"),
            LifecycleState::Present => write!(f, "present"),
            LifecycleState::Updating => write!(f, "updating"),
            LifecycleState::Deleting => write!(f, "deleting"),
        }
    }
}

/// Tracks the state of one resource through a single reconciliation call
#[derive(Debug)]
pub(crate) struct Lifecycle<'a> {
    resource: &'a str,
    state: LifecycleState,
}

impl<'a> Lifecycle<'a> {
    pub(crate) fn new(resource: &'a str, state: LifecycleState) -> Self {
        Self { resource, state }
    }

    pub(crate) fn transition(&mut self, next: LifecycleState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal lifecycle transition {} -> {}",
            self.state,
            next
        );
        tracing::debug!(resource = self.resource, from = %self.state, to = %next, "lifecycle transition");
        self.state = next;
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> LifecycleState {
        self.state
    }
}

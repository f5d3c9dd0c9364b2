//! Per-operation deadlines

use crate::operation::OperationKind;
use std::time::Duration;
use tokio::time::Instant;

const MINUTE: u64 = 60;

/// Time budget of each lifecycle operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub create: Duration,
    pub read: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            create: Duration::from_secs(30 * MINUTE),
            read: Duration::from_secs(5 * MINUTE),
            update: Duration::from_secs(30 * MINUTE),
            delete: Duration::from_secs(30 * MINUTE),
        }
    }
}

impl Timeouts {
    /// Same budget for every operation
    pub const fn uniform(timeout: Duration) -> Self {
        Self {
            create: timeout,
            read: timeout,
            update: timeout,
            delete: timeout,
        }
    }

    pub fn for_operation(&self, kind: OperationKind) -> Duration {
        match kind {
            OperationKind::Create => self.create,
            OperationKind::Read => self.read,
            OperationKind::Update => self.update,
            OperationKind::Delete => self.delete,
        }
    }
}

/// Supplies the deadline governing one operation
pub trait DeadlineProvider: Send + Sync {
    fn timeout(&self, kind: OperationKind) -> Duration;

    /// Deadline for an operation starting now
    fn deadline(&self, kind: OperationKind) -> Instant {
        Instant::now() + self.timeout(kind)
    }
}

impl DeadlineProvider for Timeouts {
    fn timeout(&self, kind: OperationKind) -> Duration {
        self.for_operation(kind)
    }
}

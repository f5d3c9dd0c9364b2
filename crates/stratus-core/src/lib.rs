//! Stratus resource reconciliation core
//!
//! Resource-kind independent machinery for driving cloud resources through
//! their lifecycle against an asynchronous remote API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │            Declared configuration                │
//! │              (AttributeStore)                    │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                stratus-core                      │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │              Reconciler                   │   │
//! │  │  create / read / update / delete          │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │  Identity    │  │   Poller     │            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────┬─────────────────┬───────────────────────┘
//!         │                 │
//! ┌───────▼───────┐ ┌───────▼───────┐
//! │ mysql server  │ │     relay     │
//! │   resource    │ │  identities   │
//! └───────────────┘ └───────────────┘
//! ```

pub mod attributes;
pub mod error;
pub mod identity;
pub mod operation;
pub mod poller;
pub mod reconciler;
pub mod resource;
pub mod state;
pub mod timeouts;
pub mod validation;

// Re-exports
pub use attributes::{AttributeStore, AttributeStoreExt};
pub use error::{CloudError, RemoteError, Result};
pub use identity::{
    IdParseError, ParseErrorKind, ResourceId, ResourceKey, Segment, Segments,
    validate_resource_key,
};
pub use operation::{LifecycleState, OperationKind};
pub use poller::{Completion, OperationHandle, OperationPoller, PollError, PollSettings, PollStatus};
pub use reconciler::{Presence, Reconciler, ReconcilerSettings};
pub use resource::{IdOf, Resource, ResourceClient};
pub use state::ResourceState;
pub use timeouts::{DeadlineProvider, Timeouts};
pub use validation::{Violation, Violations};

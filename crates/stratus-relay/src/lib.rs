//! Relay identities for Stratus
//!
//! Typed identities of Relay namespaces and of the hybrid connections
//! nested inside them, plus field validators for attributes that must hold
//! one of those identities.
//!
//! ```text
//! /subscriptions/{sub}/resourceGroups/{group}/providers/Microsoft.Relay
//!     /namespaces/{namespace}
//!         /hybridConnections/{name}
//! ```

pub mod id;

pub use id::{
    HybridConnectionId, NamespaceId, PROVIDER, validate_hybrid_connection_id,
    validate_namespace_id,
};

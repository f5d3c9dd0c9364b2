//! Resource type and remote client abstractions
//!
//! A [`Resource`] describes one kind of remote resource: how its declared
//! configuration is loaded, validated and encoded, and how the remote
//! representation is decoded back. A [`ResourceClient`] talks to the remote
//! API for that kind. The [`Reconciler`](crate::Reconciler) combines the two.

use crate::attributes::AttributeStore;
use crate::error::{RemoteError, Result};
use crate::identity::ResourceKey;
use crate::poller::OperationHandle;
use crate::timeouts::Timeouts;
use crate::validation::Violation;
use async_trait::async_trait;

/// Schema-level description of a resource kind
pub trait Resource: Send + Sync + 'static {
    /// Typed identity
    type Id: ResourceKey + Clone + Send + Sync;

    /// Typed declared configuration
    type Config: Send + Sync;

    /// Wire payload submitted on create
    type CreatePayload: Send;

    /// Wire payload submitted on update; carries no identity-bearing fields
    type UpdatePayload: Send;

    /// Wire payload returned by a read
    type Remote: Send + Sync;

    /// Resource type name used in messages (e.g. "mysql_server")
    const TYPE_NAME: &'static str;

    fn default_timeouts() -> Timeouts {
        Timeouts::default()
    }

    /// Load and type-check the declared configuration
    fn load(store: &dyn AttributeStore) -> Result<Self::Config>;

    /// Identity the declared configuration would occupy
    fn identify(config: &Self::Config, subscription_id: &str) -> Self::Id;

    /// Cross-field rules; pure function of the proposed configuration
    fn validate(config: &Self::Config) -> Vec<Violation>;

    fn expand_create(config: &Self::Config) -> Result<Self::CreatePayload>;

    fn expand_update(config: &Self::Config) -> Result<Self::UpdatePayload>;

    /// Identity string as assigned by the remote API
    fn remote_id(remote: &Self::Remote) -> Option<&str>;

    /// Write the canonical remote state back into the store
    fn flatten(id: &Self::Id, remote: &Self::Remote, store: &mut dyn AttributeStore)
    -> Result<()>;
}

/// Typed identity handled by client `C`
pub type IdOf<C> = <<C as ResourceClient>::Resource as Resource>::Id;

/// Remote API for one resource kind
///
/// Not-found must be reported as a [`RemoteError`] whose
/// [`is_not_found`](RemoteError::is_not_found) is true.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    type Resource: Resource;

    /// Subscription the client operates in
    fn subscription_id(&self) -> &str;

    async fn get(
        &self,
        id: &<Self::Resource as Resource>::Id,
    ) -> std::result::Result<<Self::Resource as Resource>::Remote, RemoteError>;

    async fn create(
        &self,
        id: &<Self::Resource as Resource>::Id,
        payload: <Self::Resource as Resource>::CreatePayload,
    ) -> std::result::Result<Box<dyn OperationHandle>, RemoteError>;

    async fn update(
        &self,
        id: &<Self::Resource as Resource>::Id,
        payload: <Self::Resource as Resource>::UpdatePayload,
    ) -> std::result::Result<Box<dyn OperationHandle>, RemoteError>;

    async fn delete(
        &self,
        id: &<Self::Resource as Resource>::Id,
    ) -> std::result::Result<Box<dyn OperationHandle>, RemoteError>;
}

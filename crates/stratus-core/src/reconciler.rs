//! Lifecycle reconciler
//!
//! Drives one resource through create, read, update and delete against the
//! remote API:
//!
//! ```text
//! Absent ─▶ [ImportCheck] ─▶ Creating ─▶ Present ─▶ Updating ─▶ Present
//!                                          │
//!                                          └──────▶ Deleting ─▶ Absent
//! ```
//!
//! Every mutation is submitted, awaited under the deadline of its operation
//! kind, and followed by a fresh read whose result is written back to the
//! attribute store. Nothing is cached between calls and nothing is retried.

use crate::attributes::AttributeStore;
use crate::error::{CloudError, RemoteError, Result};
use crate::identity::ResourceKey;
use crate::operation::{Lifecycle, LifecycleState, OperationKind};
use crate::poller::{OperationHandle, OperationPoller, PollError, PollSettings};
use crate::resource::{IdOf, Resource, ResourceClient};
use crate::timeouts::{DeadlineProvider, Timeouts};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, timeout_at};

/// Construction-time settings of a [`Reconciler`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilerSettings {
    pub timeouts: Timeouts,
    pub polling: PollSettings,
    /// Refuse to create a resource that already exists remotely
    pub import_existing: bool,
}

impl Default for ReconcilerSettings {
    fn default() -> Self {
        Self {
            timeouts: Timeouts::default(),
            polling: PollSettings::default(),
            import_existing: true,
        }
    }
}

impl ReconcilerSettings {
    /// Defaults using the timeouts declared by the resource kind
    pub fn for_resource<R: Resource>() -> Self {
        Self {
            timeouts: R::default_timeouts(),
            ..Self::default()
        }
    }
}

/// Outcome of a read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The resource exists and the store holds its canonical state
    Present,
    /// The resource is gone; its identity was cleared from the store
    Absent,
}

/// Deadline bookkeeping of one reconciliation call
struct Call<'a> {
    kind: OperationKind,
    resource: &'a str,
    timeout: Duration,
    deadline: Instant,
}

impl<'a> Call<'a> {
    fn start(kind: OperationKind, resource: &'a str, deadlines: &dyn DeadlineProvider) -> Self {
        Self {
            kind,
            resource,
            timeout: deadlines.timeout(kind),
            deadline: deadlines.deadline(kind),
        }
    }

    /// Run a remote call, bounded by this call's deadline
    async fn remote<T>(
        &self,
        request: impl Future<Output = std::result::Result<T, RemoteError>>,
    ) -> Result<std::result::Result<T, RemoteError>> {
        timeout_at(self.deadline, request)
            .await
            .map_err(|_| self.deadline_exceeded())
    }

    fn deadline_exceeded(&self) -> CloudError {
        CloudError::DeadlineExceeded {
            operation: self.kind,
            resource: self.resource.to_string(),
            timeout: self.timeout,
        }
    }

    fn failed(&self, source: RemoteError) -> CloudError {
        CloudError::Remote {
            operation: self.kind,
            resource: self.resource.to_string(),
            source,
        }
    }
}

/// Reconciles resources of one kind through an injected client
pub struct Reconciler<C: ResourceClient> {
    client: Arc<C>,
    deadlines: Arc<dyn DeadlineProvider>,
    poller: OperationPoller,
    import_existing: bool,
}

impl<C: ResourceClient> Reconciler<C> {
    pub fn new(client: Arc<C>, settings: ReconcilerSettings) -> Self {
        Self {
            client,
            deadlines: Arc::new(settings.timeouts),
            poller: OperationPoller::new(settings.polling),
            import_existing: settings.import_existing,
        }
    }

    /// Replace the deadline source derived from the settings
    pub fn with_deadlines(mut self, deadlines: Arc<dyn DeadlineProvider>) -> Self {
        self.deadlines = deadlines;
        self
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    /// Parse the identity recorded in the store
    pub fn identity_of(&self, store: &dyn AttributeStore) -> Result<IdOf<C>> {
        let id = store
            .id()
            .ok_or_else(|| CloudError::attribute("id", "no remote identity recorded"))?;
        Ok(<IdOf<C> as ResourceKey>::parse(id)?)
    }

    fn describe(id: &IdOf<C>) -> String {
        format!("{} {}", C::Resource::TYPE_NAME, id)
    }

    /// Create the resource declared in `store` and record its identity
    ///
    /// The store's identity is only set once the re-read resource has been
    /// decoded; any earlier failure leaves it untouched.
    pub async fn create(&self, store: &mut dyn AttributeStore) -> Result<IdOf<C>> {
        let config = C::Resource::load(store)?;
        let candidate = C::Resource::identify(&config, self.client.subscription_id());
        let label = Self::describe(&candidate);
        let call = Call::start(OperationKind::Create, &label, self.deadlines.as_ref());
        let mut lifecycle = Lifecycle::new(&label, LifecycleState::Absent);

        if self.import_existing {
            lifecycle.transition(LifecycleState::ImportCheck);
            match call.remote(self.client.get(&candidate)).await? {
                Ok(existing) => {
                    let id = C::Resource::remote_id(&existing)
                        .map(str::to_string)
                        .unwrap_or_else(|| candidate.to_string());
                    return Err(CloudError::AlreadyExists {
                        resource_type: C::Resource::TYPE_NAME.to_string(),
                        id,
                    });
                }
                Err(e) if e.is_not_found() => {}
                Err(e) => return Err(call.failed(e)),
            }
        }

        let violations = C::Resource::validate(&config);
        if !violations.is_empty() {
            return Err(CloudError::Validation {
                resource: label.clone(),
                violations: violations.into(),
            });
        }

        let payload = C::Resource::expand_create(&config)?;

        lifecycle.transition(LifecycleState::Creating);
        tracing::info!("Creating {}", label);
        let mut handle = call
            .remote(self.client.create(&candidate, payload))
            .await?
            .map_err(|e| call.failed(e))?;
        self.await_operation(&call, handle.as_mut()).await?;

        let remote = call
            .remote(self.client.get(&candidate))
            .await?
            .map_err(|e| call.failed(e))?;
        let remote_id = C::Resource::remote_id(&remote)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CloudError::MissingRemoteId(label.clone()))?;
        let id = <IdOf<C> as ResourceKey>::parse(remote_id)?;

        C::Resource::flatten(&id, &remote, store)?;
        store.set_id(Some(remote_id.to_string()));
        lifecycle.transition(LifecycleState::Present);
        Ok(id)
    }

    /// Refresh the store from the remote resource
    pub async fn read(&self, id: &IdOf<C>, store: &mut dyn AttributeStore) -> Result<Presence> {
        let label = Self::describe(id);
        let call = Call::start(OperationKind::Read, &label, self.deadlines.as_ref());

        match call.remote(self.client.get(id)).await? {
            Ok(remote) => {
                C::Resource::flatten(id, &remote, store)?;
                Ok(Presence::Present)
            }
            Err(e) if e.is_not_found() => {
                tracing::warn!("{} was not found - removing from state", label);
                store.set_id(None);
                Ok(Presence::Absent)
            }
            Err(e) => Err(call.failed(e)),
        }
    }

    /// Bring the remote resource in line with the declared configuration
    pub async fn update(&self, id: &IdOf<C>, store: &mut dyn AttributeStore) -> Result<()> {
        let label = Self::describe(id);
        let call = Call::start(OperationKind::Update, &label, self.deadlines.as_ref());
        let mut lifecycle = Lifecycle::new(&label, LifecycleState::Present);

        let config = C::Resource::load(store)?;
        let violations = C::Resource::validate(&config);
        if !violations.is_empty() {
            return Err(CloudError::Validation {
                resource: label.clone(),
                violations: violations.into(),
            });
        }
        let payload = C::Resource::expand_update(&config)?;

        lifecycle.transition(LifecycleState::Updating);
        tracing::info!("Updating {}", label);
        let mut handle = call
            .remote(self.client.update(id, payload))
            .await?
            .map_err(|e| call.failed(e))?;
        self.await_operation(&call, handle.as_mut()).await?;

        let remote = call
            .remote(self.client.get(id))
            .await?
            .map_err(|e| call.failed(e))?;
        if let Some(remote_id) = C::Resource::remote_id(&remote).filter(|id| !id.is_empty()) {
            <IdOf<C> as ResourceKey>::parse(remote_id)?;
            store.set_id(Some(remote_id.to_string()));
        }
        C::Resource::flatten(id, &remote, store)?;
        lifecycle.transition(LifecycleState::Present);
        Ok(())
    }

    /// Delete the remote resource and clear the recorded identity
    ///
    /// A resource that is already gone counts as deleted.
    pub async fn delete(&self, id: &IdOf<C>, store: &mut dyn AttributeStore) -> Result<()> {
        let label = Self::describe(id);
        let call = Call::start(OperationKind::Delete, &label, self.deadlines.as_ref());
        let mut lifecycle = Lifecycle::new(&label, LifecycleState::Present);

        match call.remote(self.client.get(id)).await? {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                tracing::debug!("{} is already gone", label);
                store.set_id(None);
                return Ok(());
            }
            Err(e) => return Err(call.failed(e)),
        }

        lifecycle.transition(LifecycleState::Deleting);
        tracing::info!("Deleting {}", label);
        let mut handle = match call.remote(self.client.delete(id)).await? {
            Ok(handle) => handle,
            Err(e) if e.is_not_found() => {
                store.set_id(None);
                lifecycle.transition(LifecycleState::Absent);
                return Ok(());
            }
            Err(e) => return Err(call.failed(e)),
        };

        match self.poller.wait(handle.as_mut(), call.deadline).await {
            Ok(_) => {}
            Err(PollError::Remote(e)) if e.is_not_found() => {}
            Err(PollError::Remote(e)) => return Err(call.failed(e)),
            Err(PollError::DeadlineExceeded { .. }) => return Err(call.deadline_exceeded()),
        }

        store.set_id(None);
        lifecycle.transition(LifecycleState::Absent);
        Ok(())
    }

    async fn await_operation(&self, call: &Call<'_>, handle: &mut dyn OperationHandle) -> Result<()> {
        match self.poller.wait(handle, call.deadline).await {
            Ok(completion) => {
                tracing::debug!(
                    "{} of {} completed after {} polls ({:?})",
                    call.kind,
                    call.resource,
                    completion.polls,
                    completion.elapsed
                );
                Ok(())
            }
            Err(PollError::Remote(e)) => Err(call.failed(e)),
            Err(PollError::DeadlineExceeded { .. }) => Err(call.deadline_exceeded()),
        }
    }
}

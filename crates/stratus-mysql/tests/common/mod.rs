//! In-memory MySQL servers API used by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use stratus_core::{OperationHandle, PollStatus, RemoteError, ResourceClient, ResourceState};
use stratus_mysql::wire::{ServerProperties, StorageProfile};
use stratus_mysql::{MySqlServer, Server, ServerForCreate, ServerId, ServerUpdateParameters};

pub const SUBSCRIPTION: &str = "sub1";
pub const SERVER_ID: &str =
    "/subscriptions/sub1/resourceGroups/group1/providers/Microsoft.DBforMySQL/servers/db1";

type Servers = Arc<Mutex<HashMap<String, Server>>>;

/// Change applied to the fake's servers once an operation completes
enum Effect {
    Put(Server),
    Patch(String, ServerUpdateParameters),
    Remove(String),
}

impl Effect {
    fn apply(self, servers: &Servers) {
        let mut servers = servers.lock().unwrap();
        match self {
            Effect::Put(server) => {
                let name = server.name.clone().unwrap_or_default();
                servers.insert(name, server);
            }
            Effect::Patch(name, update) => {
                if let Some(server) = servers.get_mut(&name) {
                    let props = &mut server.properties;
                    props.version = Some(update.properties.version);
                    props.ssl_enforcement = Some(update.properties.ssl_enforcement);
                    props.public_network_access = Some(update.properties.public_network_access);
                    props.storage_profile = Some(update.properties.storage_profile);
                    server.sku = Some(update.sku);
                    server.tags = update.tags;
                }
            }
            Effect::Remove(name) => {
                servers.remove(&name);
            }
        }
    }
}

/// Operation that stays pending for a number of polls, then finishes
pub struct FakeOperation {
    pending: u32,
    failure: Option<RemoteError>,
    effect: Option<Effect>,
    servers: Servers,
}

#[async_trait]
impl OperationHandle for FakeOperation {
    async fn poll(&mut self) -> Result<PollStatus, RemoteError> {
        if self.pending > 0 {
            self.pending -= 1;
            return Ok(PollStatus::Pending);
        }
        if let Some(failure) = self.failure.clone() {
            return Ok(PollStatus::Failed(failure));
        }
        if let Some(effect) = self.effect.take() {
            effect.apply(&self.servers);
        }
        Ok(PollStatus::Succeeded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Get,
    Create,
    Update,
    Delete,
}

pub struct FakeServersClient {
    servers: Servers,
    calls: Mutex<Vec<CallKind>>,
    pending_polls: u32,
    operation_failure: Option<RemoteError>,
}

impl Default for FakeServersClient {
    fn default() -> Self {
        Self {
            servers: Arc::new(Mutex::new(HashMap::new())),
            calls: Mutex::new(Vec::new()),
            pending_polls: 2,
            operation_failure: None,
        }
    }
}

impl FakeServersClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polls each operation reports as pending before finishing
    pub fn with_pending_polls(mut self, polls: u32) -> Self {
        self.pending_polls = polls;
        self
    }

    /// Operations never finish
    pub fn stuck(self) -> Self {
        self.with_pending_polls(u32::MAX)
    }

    /// Operations finish by failing with `failure`
    pub fn failing_with(mut self, failure: RemoteError) -> Self {
        self.operation_failure = Some(failure);
        self
    }

    pub fn with_server(self, server: Server) -> Self {
        Effect::Put(server).apply(&self.servers);
        self
    }

    pub fn server(&self, name: &str) -> Option<Server> {
        self.servers.lock().unwrap().get(name).cloned()
    }

    /// Change a server behind the reconciler's back
    pub fn edit_server(&self, name: &str, edit: impl FnOnce(&mut Server)) {
        if let Some(server) = self.servers.lock().unwrap().get_mut(name) {
            edit(server);
        }
    }

    pub fn calls(&self) -> Vec<CallKind> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, kind: CallKind) -> usize {
        self.calls().into_iter().filter(|c| *c == kind).count()
    }

    fn record(&self, kind: CallKind) {
        self.calls.lock().unwrap().push(kind);
    }

    fn operation(&self, effect: Effect) -> Box<dyn OperationHandle> {
        Box::new(FakeOperation {
            pending: self.pending_polls,
            failure: self.operation_failure.clone(),
            effect: Some(effect),
            servers: Arc::clone(&self.servers),
        })
    }
}

#[async_trait]
impl ResourceClient for FakeServersClient {
    type Resource = MySqlServer;

    fn subscription_id(&self) -> &str {
        SUBSCRIPTION
    }

    async fn get(&self, id: &ServerId) -> Result<Server, RemoteError> {
        self.record(CallKind::Get);
        self.server(&id.name)
            .ok_or_else(|| RemoteError::not_found(format!("server {} not found", id.name)))
    }

    async fn create(
        &self,
        id: &ServerId,
        payload: ServerForCreate,
    ) -> Result<Box<dyn OperationHandle>, RemoteError> {
        self.record(CallKind::Create);
        let props = payload.properties;
        let server = Server {
            id: Some(id.to_string()),
            name: Some(id.name.clone()),
            location: Some(payload.location),
            sku: Some(payload.sku),
            properties: ServerProperties {
                administrator_login: Some(props.administrator_login),
                version: Some(props.version),
                ssl_enforcement: Some(props.ssl_enforcement),
                public_network_access: Some(props.public_network_access),
                storage_profile: Some(props.storage_profile),
                fully_qualified_domain_name: Some(format!("{}.mysql.database.azure.com", id.name)),
                user_visible_state: Some("Ready".to_string()),
            },
            tags: payload.tags,
        };
        Ok(self.operation(Effect::Put(server)))
    }

    async fn update(
        &self,
        id: &ServerId,
        payload: ServerUpdateParameters,
    ) -> Result<Box<dyn OperationHandle>, RemoteError> {
        self.record(CallKind::Update);
        if self.server(&id.name).is_none() {
            return Err(RemoteError::not_found(format!("server {} not found", id.name)));
        }
        Ok(self.operation(Effect::Patch(id.name.clone(), payload)))
    }

    async fn delete(&self, id: &ServerId) -> Result<Box<dyn OperationHandle>, RemoteError> {
        self.record(CallKind::Delete);
        Ok(self.operation(Effect::Remove(id.name.clone())))
    }
}

/// Declared configuration of server `db1`
pub fn declared_server() -> ResourceState {
    ResourceState::new("mysql_server")
        .with_attribute("name", json!("db1"))
        .with_attribute("resource_group_name", json!("group1"))
        .with_attribute("location", json!("West Europe"))
        .with_attribute("sku_name", json!("GP_Gen5_2"))
        .with_attribute("administrator_login", json!("admin1"))
        .with_attribute("administrator_login_password", json!("s3cret!"))
        .with_attribute("version", json!("5.7"))
        .with_attribute("ssl_enforcement", json!("enabled"))
        .with_attribute(
            "storage_profile",
            json!([{
                "storage_mb": 51200,
                "backup_retention_days": 7,
                "geo_redundant_backup": "disabled"
            }]),
        )
        .with_attribute("tags", json!({"env": "test"}))
}

/// Remote server `db1` as some other tool created it
pub fn existing_server() -> Server {
    Server {
        id: Some(SERVER_ID.to_string()),
        name: Some("db1".to_string()),
        location: Some("westeurope".to_string()),
        properties: ServerProperties {
            administrator_login: Some("someone".to_string()),
            version: Some("8.0".to_string()),
            ssl_enforcement: Some("Enabled".to_string()),
            public_network_access: Some("Enabled".to_string()),
            storage_profile: Some(StorageProfile {
                storage_mb: Some(5120),
                ..Default::default()
            }),
            ..Default::default()
        },
        ..Default::default()
    }
}

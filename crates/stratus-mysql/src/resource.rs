use crate::codec;
use crate::id::ServerId;
use crate::model::ServerConfig;
use crate::validate;
use crate::wire::{Server, ServerForCreate, ServerUpdateParameters};
use std::time::Duration;
use stratus_core::{AttributeStore, Resource, Result, Timeouts, Violation};

const MINUTE: u64 = 60;

/// The MySQL server resource kind
pub struct MySqlServer;

impl Resource for MySqlServer {
    type Id = ServerId;
    type Config = ServerConfig;
    type CreatePayload = ServerForCreate;
    type UpdatePayload = ServerUpdateParameters;
    type Remote = Server;

    const TYPE_NAME: &'static str = "mysql_server";

    fn default_timeouts() -> Timeouts {
        Timeouts {
            create: Duration::from_secs(60 * MINUTE),
            read: Duration::from_secs(5 * MINUTE),
            update: Duration::from_secs(60 * MINUTE),
            delete: Duration::from_secs(60 * MINUTE),
        }
    }

    fn load(store: &dyn AttributeStore) -> Result<ServerConfig> {
        ServerConfig::from_store(store)
    }

    fn identify(config: &ServerConfig, subscription_id: &str) -> ServerId {
        ServerId::new(subscription_id, &config.resource_group_name, &config.name)
    }

    fn validate(config: &ServerConfig) -> Vec<Violation> {
        validate::validate(config)
    }

    fn expand_create(config: &ServerConfig) -> Result<ServerForCreate> {
        codec::expand_create(config)
    }

    fn expand_update(config: &ServerConfig) -> Result<ServerUpdateParameters> {
        codec::expand_update(config)
    }

    fn remote_id(remote: &Server) -> Option<&str> {
        remote.id.as_deref()
    }

    fn flatten(id: &ServerId, remote: &Server, store: &mut dyn AttributeStore) -> Result<()> {
        codec::flatten(id, remote, store)
    }
}

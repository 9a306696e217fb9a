use crate::clients::{MenuClient, OrderClient};
use crate::config::AppConfig;
use crate::coordinator::Coordinator;
use crate::http::{self, AdminCredentials, AppState};
use crate::menu_actor::{self, MenuError};
use crate::model::Table;
use crate::order_actor;
use crate::relay::{Dispatcher, HandshakeActor, HandshakeClient, RegistryActor, RegistryClient, Relay};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// How long shutdown waits for each actor before aborting it.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    #[error("failed to seed menu item `{name}`: {source}")]
    Seed { name: String, source: MenuError },

    #[error("actor task failed: {0}")]
    ActorFailed(#[from] tokio::task::JoinError),
}

/// The running service: menu and order stores, the relay actors and the coordinator.
///
/// ```rust,ignore
/// let system = TablesideSystem::start(&config).await?;
/// let app = system.router(&config.server.allowed_origins);
/// axum::serve(listener, app).await?;
/// system.shutdown().await?;
/// ```
pub struct TablesideSystem {
    pub menu_client: MenuClient,
    pub order_client: OrderClient,
    pub registry: RegistryClient,
    pub handshake: HandshakeClient,
    pub coordinator: Coordinator,
    admin: AdminCredentials,
    tables: Arc<Vec<Table>>,
    channel_buffer: usize,
    handles: Vec<JoinHandle<()>>,
}

impl TablesideSystem {
    /// Spawns every actor and seeds the menu from `config`.
    pub async fn start(config: &AppConfig) -> Result<Self, SystemError> {
        let mailbox = config.relay.mailbox_size;

        // 1. Create actors (no dependencies)
        let (menu_actor, menu_generic) = menu_actor::new(mailbox);
        let (order_actor, order_generic) = order_actor::new(mailbox);
        let (registry_actor, registry) = RegistryActor::new(mailbox);
        let (handshake_actor, handshake) =
            HandshakeActor::new(mailbox, config.relay.token_ttl());

        let menu_client = MenuClient::new(menu_generic);
        let order_client = OrderClient::new(order_generic);

        // 2. Start actors with injected context
        // Dependents first: the order actor holds a menu client, so shutdown awaits it
        // before the menu actor.
        let handles = vec![
            tokio::spawn(order_actor.run((menu_client.clone(), config.tables.clone()))),
            tokio::spawn(menu_actor.run(())),
            tokio::spawn(registry_actor.run()),
            tokio::spawn(handshake_actor.run()),
        ];

        let system = Self {
            coordinator: Coordinator::new(Dispatcher::new(registry.clone())),
            menu_client,
            order_client,
            registry,
            handshake,
            admin: AdminCredentials::new(config.admin.clone()),
            tables: Arc::new(config.tables.clone()),
            channel_buffer: config.relay.channel_buffer,
            handles,
        };

        // 3. Seed
        for item in &config.menu {
            system
                .menu_client
                .create_item(item.clone())
                .await
                .map_err(|source| SystemError::Seed {
                    name: item.name.clone(),
                    source,
                })?;
        }
        info!(
            menu_items = config.menu.len(),
            tables = config.tables.len(),
            "System started"
        );

        Ok(system)
    }

    pub fn relay(&self) -> Relay {
        Relay {
            registry: self.registry.clone(),
            handshake: self.handshake.clone(),
            channel_buffer: self.channel_buffer,
        }
    }

    pub fn state(&self) -> AppState {
        AppState {
            menu: self.menu_client.clone(),
            orders: self.order_client.clone(),
            relay: self.relay(),
            coordinator: self.coordinator.clone(),
            admin: self.admin.clone(),
            tables: self.tables.clone(),
        }
    }

    pub fn router(&self, allowed_origins: &[String]) -> Router {
        http::router(self.state(), allowed_origins)
    }

    /// Drops this system's clients and waits for each actor to drain its mailbox.
    ///
    /// Clients held elsewhere (a router still serving, an open channel task) keep their
    /// actor alive; such an actor is aborted after a grace period.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        drop(self.coordinator);
        drop(self.order_client);
        drop(self.menu_client);
        drop(self.registry);
        drop(self.handshake);

        for mut handle in self.handles {
            match tokio::time::timeout(SHUTDOWN_GRACE, &mut handle).await {
                Ok(result) => result?,
                Err(_) => {
                    warn!("Actor still referenced after grace period, aborting");
                    handle.abort();
                }
            }
        }

        info!("System shutdown complete");
        Ok(())
    }
}

//! # Menu Client
//!
//! High-level API for the menu actor.
use crate::menu_actor::MenuError;
use crate::model::{MenuItem, MenuItemCreate, MenuItemId, MenuItemPatch};
use async_trait::async_trait;
use tableside_actor::{ActorClient, FrameworkError, ResourceClient, Updated};
use tracing::{debug, instrument};

/// Client for interacting with the Menu actor.
#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<MenuItem>,
}

impl MenuClient {
    pub fn new(inner: ResourceClient<MenuItem>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create_item(&self, params: MenuItemCreate) -> Result<MenuItemId, MenuError> {
        debug!("Sending request");
        self.inner
            .create(params)
            .await
            .map(|item| item.id)
            .map_err(Self::map_error)
    }

    /// Marks an item available or not. `change` tells whether the value flipped.
    #[instrument(skip(self))]
    pub async fn set_availability(
        &self,
        id: MenuItemId,
        available: bool,
    ) -> Result<Updated<MenuItem>, MenuError> {
        debug!("Sending request");
        self.inner
            .update(id, MenuItemPatch { available })
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<MenuItem> for MenuClient {
    type Error = MenuError;

    fn inner(&self) -> &ResourceClient<MenuItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> MenuError {
        match e {
            FrameworkError::NotFound(id) => MenuError::NotFound(id),
            other => other
                .downcast_entity::<MenuError>()
                .unwrap_or_else(|e| MenuError::ActorCommunicationError(e.to_string())),
        }
    }
}

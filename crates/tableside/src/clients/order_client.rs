//! # Order Client
//!
//! High-level API for the order actor. Menu validation happens inside the actor's
//! `on_create` hook; this wrapper only forwards and maps errors.
use crate::model::{Order, OrderCreate, OrderId, OrderTransition};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use tableside_actor::{ActorClient, FrameworkError, ResourceClient, Updated};
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Places an order and returns it exactly as the actor stored it.
    #[instrument(skip(self, params), fields(client = %params.client_uuid, table = %params.table_slug))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        info!("Sending create_order to actor");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Moves an order one step along `pending -> started -> served`.
    #[instrument(skip(self))]
    pub async fn apply_transition(
        &self,
        id: OrderId,
        transition: OrderTransition,
    ) -> Result<Updated<Order>, OrderError> {
        debug!("Sending request");
        self.inner
            .update(id, transition)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> OrderError {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => other
                .downcast_entity::<OrderError>()
                .unwrap_or_else(|e| OrderError::ActorCommunicationError(e.to_string())),
        }
    }
}

//! [`ActorEntity`] implementation for [`Order`].
//!
//! `on_create` validates the order against the menu actor; `on_update` applies one
//! kitchen transition.

use super::OrderError;
use crate::clients::MenuClient;
use crate::model::{Order, OrderCreate, OrderId, OrderTransition, Table};
use async_trait::async_trait;
use tableside_actor::{ActorClient, ActorEntity};
use tracing::debug;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderTransition;
    type Change = OrderTransition;
    type Context = (MenuClient, Vec<Table>);
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.client_name.trim().is_empty() {
            return Err(OrderError::ValidationError(
                "client_name must not be empty".to_string(),
            ));
        }
        if params.items.is_empty() {
            return Err(OrderError::Empty);
        }
        if let Some(item) = params.items.iter().find(|i| i.quantity == 0) {
            return Err(OrderError::InvalidQuantity(item.menu_item_id));
        }

        Ok(Self {
            id,
            client_name: params.client_name,
            client_uuid: params.client_uuid,
            started: false,
            served: false,
            table: params.table_slug,
            items: params.items,
        })
    }

    async fn on_create(&mut self, ctx: &Self::Context) -> Result<(), OrderError> {
        let (menu, tables) = ctx;
        if !tables.iter().any(|t| t.slug == self.table) {
            return Err(OrderError::UnknownTable(self.table.clone()));
        }

        for item in &self.items {
            let menu_item = menu
                .get(item.menu_item_id)
                .await
                .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?
                .ok_or(OrderError::UnknownMenuItem(item.menu_item_id))?;

            if !menu_item.available {
                return Err(OrderError::Unavailable(item.menu_item_id));
            }
            if let Some(option) = item
                .options
                .iter()
                .find(|o| menu_item.option(&o.option_slug).is_none())
            {
                return Err(OrderError::UnknownOption {
                    menu_item_id: item.menu_item_id,
                    option_slug: option.option_slug.clone(),
                });
            }
        }

        debug!(order_id = %self.id, items = self.items.len(), "Order validated against menu");
        Ok(())
    }

    async fn on_update(
        &mut self,
        transition: OrderTransition,
        _ctx: &Self::Context,
    ) -> Result<OrderTransition, OrderError> {
        let allowed = match transition {
            OrderTransition::Started => !self.started,
            OrderTransition::Served => self.started && !self.served,
        };
        if !allowed {
            return Err(OrderError::InvalidTransition {
                order_id: self.id,
                requested: transition,
                status: self.status(),
            });
        }

        match transition {
            OrderTransition::Started => self.started = true,
            OrderTransition::Served => self.served = true,
        }
        Ok(transition)
    }
}

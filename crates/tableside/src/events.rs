//! Notifications pushed to connected channels.
//!
//! Each event goes out as one JSON text message, `{"name": "...", "detail": {...}}`.

use crate::model::{MenuItemId, Order, OrderId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "name", content = "detail", rename_all = "kebab-case")]
pub enum Event {
    MenuItemAvailability { item_id: MenuItemId, available: bool },
    NewOrder { order: Order },
    OrderStarted { order_id: OrderId, started: bool },
    OrderServed { order_id: OrderId, served: bool },
}

impl Event {
    /// Wire name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            Event::MenuItemAvailability { .. } => "menu-item-availability",
            Event::NewOrder { .. } => "new-order",
            Event::OrderStarted { .. } => "order-started",
            Event::OrderServed { .. } => "order-served",
        }
    }
}

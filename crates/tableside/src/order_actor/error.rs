//! Error types for the Order actor.

use crate::model::{MenuItemId, OrderId, OrderTransition};
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Order must contain at least one item")]
    Empty,

    #[error("Order validation error: {0}")]
    ValidationError(String),

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Unknown menu item: {0}")]
    UnknownMenuItem(MenuItemId),

    /// The item exists but staff marked it unavailable.
    #[error("Menu item {0} is not available")]
    Unavailable(MenuItemId),

    #[error("Invalid quantity for menu item {0}: must be at least 1")]
    InvalidQuantity(MenuItemId),

    #[error("Menu item {menu_item_id} has no option `{option_slug}`")]
    UnknownOption {
        menu_item_id: MenuItemId,
        option_slug: String,
    },

    /// The requested step does not follow the order's current state.
    #[error("Order {order_id} cannot be marked {requested}: it is {status}")]
    InvalidTransition {
        order_id: OrderId,
        requested: OrderTransition,
        status: &'static str,
    },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

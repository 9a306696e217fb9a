//! # Order Actor
//!
//! Owns placed orders and enforces the kitchen progression
//! `pending -> started -> served`.
//!
//! ## Dependencies
//!
//! Creation is validated against the menu, so the actor runs with the
//! [`MenuClient`](crate::clients::MenuClient) and the configured tables as its context:
//!
//! ```rust,ignore
//! let (order_actor, order_client) = order_actor::new(32);
//! tokio::spawn(order_actor.run((menu_client.clone(), tables)));
//! ```
//!
//! Every item must exist on the menu and be available, with a positive quantity and only
//! options the item offers. Updates carry a single
//! [`OrderTransition`](crate::model::OrderTransition); the accepted transition is echoed
//! back as the change so the caller knows which notification to publish.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Order;
use tableside_actor::{ResourceActor, ResourceClient};

/// Creates a new Order actor and its client.
pub fn new(mailbox_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(mailbox_size)
}

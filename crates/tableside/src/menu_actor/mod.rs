//! # Menu Actor
//!
//! Owns the menu. Items are seeded from configuration at startup; afterwards the only
//! mutation staff can make is toggling an item's availability.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](tableside_actor::ActorEntity) implementation for [`MenuItem`]
//! - [`error`] - [`MenuError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use tableside::clients::MenuClient;
//! use tableside::menu_actor;
//! use tableside::model::{MenuCategory, MenuItemCreate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = menu_actor::new(32);
//!     let client = MenuClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client
//!         .create_item(MenuItemCreate {
//!             name: "Lemonade".to_string(),
//!             description: String::new(),
//!             image: String::new(),
//!             available: true,
//!             category: MenuCategory { name: "Drinks".to_string(), slug: "drinks".to_string() },
//!             options: vec![],
//!         })
//!         .await?;
//!
//!     let updated = client.set_availability(id, false).await?;
//!     assert!(updated.change);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::MenuItem;
use tableside_actor::{ResourceActor, ResourceClient};

/// Creates a new Menu actor and its client.
pub fn new(mailbox_size: usize) -> (ResourceActor<MenuItem>, ResourceClient<MenuItem>) {
    ResourceActor::new(mailbox_size)
}

//! Typed wrappers over the generic resource clients.
//!
//! Each wrapper maps [`FrameworkError`](tableside_actor::FrameworkError) back into its
//! resource's own error type and adds the domain operations the HTTP layer calls.

pub mod menu_client;
pub mod order_client;

pub use menu_client::*;
pub use order_client::*;
pub use tableside_actor::ActorClient;

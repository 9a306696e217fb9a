//! # Tableside
//!
//! Order-taking backend for a restaurant. Diners order from their table, staff move orders
//! through the kitchen and toggle menu availability, and both sides see changes live over
//! WebSockets.
//!
//! - **[model]**: menu items, orders, identities and roles.
//! - **[menu_actor] / [order_actor]**: resource actors owning the data.
//! - **[clients]**: typed wrappers around the generic actor clients.
//! - **[relay]**: connection registry, admin handshake, delivery and the channel lifecycle.
//! - **[coordinator]**: maps accepted writes to [`events::Event`]s and their audience.
//! - **[http]**: the axum router.
//! - **[lifecycle]**: starting and stopping everything.

pub mod clients;
pub mod config;
pub mod coordinator;
pub mod events;
pub mod http;
pub mod lifecycle;
pub mod menu_actor;
pub mod model;
pub mod order_actor;
pub mod relay;

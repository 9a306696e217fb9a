//! # Live Relay
//!
//! Real-time delivery of state changes to connected staff and diners.
//!
//! - [`registry`]: which channels belong to which identity, and each identity's role.
//! - [`handshake`]: per-identity tokens gating the admin role.
//! - [`delivery`]: unicast and broadcast over registry snapshots.
//! - [`connection`]: the WebSocket endpoint and per-channel task.
//!
//! Registry and handshake state live in actors, like the resource stores. Delivery is
//! best-effort and at-most-once to channels open at the time of the send; nothing is kept
//! for identities that are offline.

pub mod channel;
pub mod connection;
pub mod delivery;
pub mod error;
pub mod handshake;
pub mod registry;

pub use channel::{Channel, ChannelId, SendFailure};
pub use delivery::{DeliveryReport, Dispatcher};
pub use error::RelayError;
pub use handshake::{HandshakeActor, HandshakeClient, HandshakeToken};
pub use registry::{RegistryActor, RegistryClient};

/// Handles the WebSocket endpoint needs.
#[derive(Clone)]
pub struct Relay {
    pub registry: RegistryClient,
    pub handshake: HandshakeClient,
    /// Capacity of each channel's outbound queue.
    pub channel_buffer: usize,
}

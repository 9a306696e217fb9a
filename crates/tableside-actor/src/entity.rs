//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every stored resource (menu item, order, …) implements
//! to be managed by the generic [`ResourceActor`](crate::ResourceActor). It names the identifier,
//! the creation and update payloads, the change an update reports back, the injected context and
//! the error type.
//!
//! # Updates report what changed
//! An update does not only mutate the entity: [`ActorEntity::on_update`] returns a
//! [`Change`](ActorEntity::Change) value describing the transition that actually took effect.
//! Callers use it to decide which notification to publish once the write is acknowledged,
//! without diffing before/after snapshots themselves.
//!
//! # Provided Methods (Hooks)
//! [`ActorEntity::on_create`] has a default implementation that does nothing (`Ok(())`).
//! Override it to validate a new entity against other actors reachable through the context.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// The trait is `#[async_trait]` so hooks can await other actors. The `Context` associated type
/// is injected into every hook by `ResourceActor::run`, which lets dependencies be wired after
/// all actors have been constructed ("late binding").
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from `u32` for automatic ID generation and ordered for listing.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// What an accepted update reports back to the caller.
    type Change: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per actor rather than one per message: clients match on a single
    /// error type for every operation of a resource.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from the ID and payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    /// An error here discards the entity.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update. On error the entity must be left unchanged.
    async fn on_update(
        &mut self,
        update: Self::Update,
        ctx: &Self::Context,
    ) -> Result<Self::Change, Self::Error>;
}

//! # Tableside Actor
//!
//! Building blocks for resource actors: a task that owns a collection of entities and
//! serves typed requests from a mailbox, plus the client handle used to reach it.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): domain data and its hooks (`on_create`, `on_update`).
//! 2. **Runtime** ([`ResourceActor`]): the message loop owning the store.
//! 3. **Interface** ([`ResourceClient`]): cloneable async handle, one oneshot reply per call.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task and processes one request at a time, so its
//!   store needs no lock.
//! - Many actors run in parallel on the multi-threaded runtime.
//! - Dependencies between actors are injected through [`ResourceActor::run`]'s context,
//!   after every actor has been constructed.
//!
//! ## Updates and Changes
//!
//! [`ResourceClient::update`] answers with an [`Updated`] value holding the entity after the
//! write and the [`ActorEntity::Change`] the entity reported. Callers derive notifications from
//! the change once the write has been acknowledged.
//!
//! ## Testing
//!
//! [`mock`] provides scripted clients for exercising an actor whose dependencies are other
//! actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response, Updated};

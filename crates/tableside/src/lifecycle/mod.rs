//! # System Lifecycle
//!
//! Starting, wiring and stopping the actors behind the service.
//!
//! Actors are created first, without dependencies, and receive them when spawned
//! through their `run(context)`. The order actor validates against the menu, so it runs with
//! a `MenuClient` clone in its context. The dependency graph is acyclic, which lets
//! shutdown rely on channel closure: drop every client, then await each task.
//!
//! [`setup_tracing`] initializes logging once, from `main`.

pub mod system;

pub use system::*;
pub use tableside_actor::tracing::setup_tracing;

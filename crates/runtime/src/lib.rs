//! Runtime orchestration for the pet-game state store.
//!
//! This crate wires the deterministic engine from `pet-core` into a running
//! process: a single simulation worker serializes every dispatch, snapshots
//! land in the persistent store adapter after each transition, remote-sync
//! effects fire best-effort against the data gateway, and five background
//! schedulers inject synthetic actions through the same entry point as user
//! input.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`store`] is the local expiring key-value cache (offline snapshots)
//! - [`gateway`] abstracts the remote relational backend
//! - [`minigame`] is the energy-earning side activity's output contract
//! - `workers` keeps the simulation loop and schedulers internal
pub mod error;
pub mod events;
pub mod gateway;
pub mod handle;
pub mod minigame;
pub mod runtime;
pub mod store;

mod workers;

pub use error::{Result, RuntimeError};
pub use events::GameEvent;
pub use gateway::{
    GatewayError, HttpGateway, NullGateway, RecordedCall, RecordingGateway, RemoteGateway,
};
pub use handle::RuntimeHandle;
pub use minigame::{MinigameError, MinigameLimiter, MinigameSession};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use store::{CacheStore, FileStore, MemoryStore, SnapshotService, StoreError};

//! Runtime orchestrator.
//!
//! [`Runtime`] owns the simulation worker and the five schedulers and is the
//! explicit lifecycle container: build it, hand out [`RuntimeHandle`]s, and
//! call [`Runtime::shutdown`] to tear everything down. Construction goes
//! through [`RuntimeBuilder`], which restores the previous session's
//! snapshot when the store holds one.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use pet_core::{GameConfig, GameState, Millis};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::info;

use crate::error::{Result, RuntimeError};
use crate::events::GameEvent;
use crate::gateway::{NullGateway, RemoteGateway};
use crate::handle::RuntimeHandle;
use crate::store::{CacheStore, MemoryStore, SnapshotService};
use crate::workers::schedulers::{SchedulerIntervals, Schedulers};
use crate::workers::simulation::SimulationWorker;

/// Tunables for a runtime instance.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    /// How long a persisted snapshot stays valid.
    pub snapshot_ttl: Duration,
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
    pub energy_regen_interval: Duration,
    pub degrade_interval: Duration,
    pub daily_check_interval: Duration,
    pub buff_sweep_interval: Duration,
    pub ranking_refresh_interval: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let intervals = SchedulerIntervals::default();
        Self {
            game: GameConfig::default(),
            snapshot_ttl: Duration::from_secs(60 * 60 * 24 * 7),
            command_buffer_size: 64,
            event_buffer_size: 256,
            energy_regen_interval: intervals.energy_regen,
            degrade_interval: intervals.degrade,
            daily_check_interval: intervals.daily_check,
            buff_sweep_interval: intervals.buff_sweep,
            ranking_refresh_interval: intervals.ranking_refresh,
        }
    }
}

impl RuntimeConfig {
    fn scheduler_intervals(&self) -> SchedulerIntervals {
        SchedulerIntervals {
            energy_regen: self.energy_regen_interval,
            degrade: self.degrade_interval,
            daily_check: self.daily_check_interval,
            buff_sweep: self.buff_sweep_interval,
            ranking_refresh: self.ranking_refresh_interval,
        }
    }
}

/// A running game: simulation worker plus schedulers.
pub struct Runtime {
    handle: RuntimeHandle,
    worker: JoinHandle<()>,
    schedulers: Schedulers,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::default()
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Stops the schedulers, tells the worker to stop, and waits for it to
    /// drain. Completes even while handle clones are still alive elsewhere;
    /// the final snapshot was already persisted by the last committed action.
    pub async fn shutdown(self) -> Result<()> {
        self.schedulers.abort_all();
        self.handle.send_shutdown().await;
        drop(self.handle);
        self.worker.await.map_err(RuntimeError::WorkerJoin)?;
        info!("runtime stopped");
        Ok(())
    }
}

/// Builder for [`Runtime`]. Store defaults to in-memory and the gateway to
/// offline; initial state resolution order is explicit state, then a stored
/// snapshot, then a fresh default.
#[derive(Default)]
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    store: Option<Arc<dyn CacheStore>>,
    gateway: Option<Arc<dyn RemoteGateway>>,
    initial_state: Option<GameState>,
}

impl RuntimeBuilder {
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn gateway(mut self, gateway: Arc<dyn RemoteGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn initial_state(mut self, state: GameState) -> Self {
        self.initial_state = Some(state);
        self
    }

    pub fn build(self) -> Result<Runtime> {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()));
        let gateway: Arc<dyn RemoteGateway> = self
            .gateway
            .unwrap_or_else(|| Arc::new(NullGateway));
        let snapshots = SnapshotService::new(Arc::clone(&store), self.config.snapshot_ttl);

        let state = match self.initial_state {
            Some(state) => state,
            None => match snapshots.load()? {
                Some(restored) => {
                    info!(revision = restored.revision, "restored snapshot");
                    restored
                }
                None => GameState::new(
                    &self.config.game,
                    Millis::new(Utc::now().timestamp_millis()),
                ),
            },
        };

        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);
        let (event_tx, _) = broadcast::channel(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_tx.clone());

        let worker = SimulationWorker::new(
            state,
            self.config.game.clone(),
            snapshots,
            Arc::clone(&gateway),
            command_rx,
            event_tx,
        );
        let worker = tokio::spawn(worker.run());

        let schedulers = Schedulers::spawn(
            handle.clone(),
            gateway,
            self.config.game.clone(),
            self.config.scheduler_intervals(),
        );

        info!("runtime started");
        Ok(Runtime {
            handle,
            worker,
            schedulers,
        })
    }
}

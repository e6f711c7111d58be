//! Simulation worker: the single task that owns the game state.
//!
//! All dispatches funnel through one mpsc channel, which is what makes the
//! reducer's serialized-execution guarantee hold without locks. Each
//! dispatch runs against a working clone of the state; only a fully
//! successful execution is committed, snapshotted, and announced.

use std::sync::Arc;

use chrono::Utc;
use pet_core::{Action, GameConfig, GameEnv, GameState, Millis, PetEngine, SyncEffect};
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, error, warn};

use crate::events::GameEvent;
use crate::gateway::RemoteGateway;
use crate::store::SnapshotService;

/// Commands accepted by the worker.
pub(crate) enum Command {
    Dispatch {
        action: Action,
        reply: oneshot::Sender<()>,
    },
    Query {
        reply: oneshot::Sender<GameState>,
    },
    /// Stops the loop regardless of how many handle clones are still alive.
    Shutdown,
}

pub(crate) struct SimulationWorker {
    state: GameState,
    config: GameConfig,
    snapshots: SnapshotService,
    gateway: Arc<dyn RemoteGateway>,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<GameEvent>,
}

impl SimulationWorker {
    pub(crate) fn new(
        state: GameState,
        config: GameConfig,
        snapshots: SnapshotService,
        gateway: Arc<dyn RemoteGateway>,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<GameEvent>,
    ) -> Self {
        Self {
            state,
            config,
            snapshots,
            gateway,
            command_rx,
            event_tx,
        }
    }

    pub(crate) async fn run(mut self) {
        while let Some(command) = self.command_rx.recv().await {
            match command {
                Command::Dispatch { action, reply } => {
                    self.dispatch(&action);
                    let _ = reply.send(());
                }
                Command::Query { reply } => {
                    let _ = reply.send(self.state.clone());
                }
                Command::Shutdown => break,
            }
        }
        debug!("simulation worker shutting down");
    }

    /// Runs one action: execute on a working clone, commit on success,
    /// persist the snapshot, then fire the implied remote-sync effects.
    fn dispatch(&mut self, action: &Action) {
        let now = Millis::new(Utc::now().timestamp_millis());
        let env = GameEnv::new(now, &self.config);

        let mut working = self.state.clone();
        let outcome = match PetEngine::new(&mut working).execute(&env, action) {
            Ok(outcome) => outcome,
            Err(e) if e.is_rejection() => {
                debug!(action = %e.action, %e, "action rejected");
                let _ = self.event_tx.send(GameEvent::ActionRejected {
                    action: e.action.clone(),
                    reason: e.to_string(),
                });
                return;
            }
            Err(e) => {
                error!(action = %e.action, phase = e.phase.as_str(), %e, "transition bug");
                let _ = self.event_tx.send(GameEvent::ActionRejected {
                    action: e.action.clone(),
                    reason: e.to_string(),
                });
                return;
            }
        };

        self.state = working;

        if let Err(e) = self.snapshots.save(&self.state) {
            warn!(error = %e, "snapshot persist failed, continuing in-memory");
        }

        self.spawn_effects(outcome.effects);

        let _ = self.event_tx.send(GameEvent::ActionApplied {
            action: action.name().to_owned(),
            revision: self.state.revision,
        });
    }

    /// Fires each effect as a detached task. No retry, no ordering; a
    /// failure is logged and the game plays on from the local snapshot.
    fn spawn_effects(&self, effects: Vec<SyncEffect>) {
        for effect in effects {
            let gateway = Arc::clone(&self.gateway);
            tokio::spawn(async move {
                let result = match &effect {
                    SyncEffect::RecordAction { user_id, name } => {
                        gateway.record_user_action(*user_id, name).await
                    }
                    SyncEffect::UpdateUser { user_id, patch } => {
                        gateway.update_user(*user_id, patch).await
                    }
                    SyncEffect::UpdateCharacter { user_id, patch } => {
                        gateway.update_character(*user_id, patch).await
                    }
                };
                if let Err(e) = result {
                    warn!(?effect, error = %e, "remote sync dropped");
                }
            });
        }
    }
}

//! Cloneable handle for interacting with a running [`crate::Runtime`].

use pet_core::{Action, GameState};
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::error::{Result, RuntimeError};
use crate::events::GameEvent;
use crate::workers::simulation::Command;

/// Entry point for all state access.
///
/// Every mutation goes through [`dispatch`](Self::dispatch) and is
/// serialized by the simulation worker; [`state`](Self::state) returns a
/// consistent clone taken between dispatches. Handles are cheap to clone
/// and safe to share across tasks.
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<GameEvent>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<GameEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    /// Dispatches one action through the reducer.
    ///
    /// Resolves once the worker has committed (or rejected) the action.
    /// Rejections are not errors here; subscribe to events or inspect the
    /// state to observe them. An error means the worker is gone.
    pub async fn dispatch(&self, action: Action) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::Dispatch {
                action,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?;
        Ok(())
    }

    /// Returns a snapshot of the current game state.
    pub async fn state(&self) -> Result<GameState> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::Query { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribes to action outcome events.
    pub fn subscribe_events(&self) -> broadcast::Receiver<GameEvent> {
        self.event_tx.subscribe()
    }

    /// Tells the worker to stop. Teardown must not depend on every handle
    /// clone being dropped, so this is an explicit command rather than a
    /// channel-close signal.
    pub(crate) async fn send_shutdown(&self) {
        let _ = self.command_tx.send(Command::Shutdown).await;
    }
}

//! Broadcast events emitted by the simulation worker.

/// Outcome notification for every dispatched action.
///
/// Delivered on a lossy broadcast channel; UI layers subscribe to re-render
/// and tests subscribe to observe scheduler activity. Slow subscribers drop
/// old events rather than back-pressuring the worker.
#[derive(Clone, Debug)]
pub enum GameEvent {
    /// An action passed all phases and the state was committed.
    ActionApplied { action: String, revision: u64 },
    /// An action was rejected during validation; state is unchanged.
    ActionRejected { action: String, reason: String },
}

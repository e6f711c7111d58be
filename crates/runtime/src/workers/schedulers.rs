//! Background schedulers.
//!
//! Five periodic tasks that inject synthetic actions through the same
//! dispatch entry point as user input: energy regeneration, neglect
//! degradation, the daily-task midnight reset, expired-buff sweeping, and
//! the leaderboard rank refresh. Each task reads a state snapshot, decides,
//! and dispatches; the reducer remains the only place rules live.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use pet_core::{
    Action, ClearExpiredBuffsAction, DailyTasks, DegradeStatsAction, GameConfig, Millis,
    RegenEnergyAction, ResetDailyTasksAction, UpdateRankingAction,
};
use tokio::task::JoinHandle;
use tokio::time::{Duration, interval};
use tracing::debug;

use crate::gateway::RemoteGateway;
use crate::handle::RuntimeHandle;

#[derive(Clone, Debug)]
pub(crate) struct SchedulerIntervals {
    pub energy_regen: Duration,
    pub degrade: Duration,
    pub daily_check: Duration,
    pub buff_sweep: Duration,
    pub ranking_refresh: Duration,
}

impl Default for SchedulerIntervals {
    fn default() -> Self {
        Self {
            energy_regen: Duration::from_secs(60),
            degrade: Duration::from_secs(3600),
            daily_check: Duration::from_secs(3600),
            buff_sweep: Duration::from_secs(5),
            ranking_refresh: Duration::from_secs(300),
        }
    }
}

pub(crate) struct Schedulers {
    tasks: Vec<JoinHandle<()>>,
}

impl Schedulers {
    pub(crate) fn spawn(
        handle: RuntimeHandle,
        gateway: Arc<dyn RemoteGateway>,
        config: GameConfig,
        intervals: SchedulerIntervals,
    ) -> Self {
        let tasks = vec![
            tokio::spawn(energy_regen(handle.clone(), intervals.energy_regen)),
            tokio::spawn(degrade(handle.clone(), config.clone(), intervals.degrade)),
            tokio::spawn(daily_reset(handle.clone(), config, intervals.daily_check)),
            tokio::spawn(buff_sweep(handle.clone(), intervals.buff_sweep)),
            tokio::spawn(ranking_refresh(handle, gateway, intervals.ranking_refresh)),
        ];
        Self { tasks }
    }

    pub(crate) fn abort_all(&self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

/// Restores energy each tick while below the pool maximum. The amount is
/// the base regen rate plus any active energy buff bonus.
async fn energy_regen(handle: RuntimeHandle, period: Duration) {
    let mut ticker = interval(period);
    loop {
        ticker.tick().await;
        let Ok(state) = handle.state().await else {
            break;
        };
        if state.energy.current >= state.energy.max {
            continue;
        }
        let now = Millis::new(Utc::now().timestamp_millis());
        let mut amount = state.energy.regen_rate;
        if state.buffs.energy_buff_active(now) {
            amount = amount.saturating_add(state.buffs.energy_regen_bonus);
        }
        if handle
            .dispatch(Action::RegenEnergy(RegenEnergyAction::new(amount)))
            .await
            .is_err()
        {
            break;
        }
    }
}

/// Dispatches the neglect check once the pet has gone unfed past the
/// degradation window. The decay rules themselves live in the reducer; the
/// peek here only avoids committing no-op transitions every tick.
async fn degrade(handle: RuntimeHandle, config: GameConfig, period: Duration) {
    let mut ticker = interval(period);
    loop {
        ticker.tick().await;
        let Ok(state) = handle.state().await else {
            break;
        };
        let now = Millis::new(Utc::now().timestamp_millis());
        if now.since(state.profile.last_fed) <= config.degrade_after_ms {
            continue;
        }
        if handle
            .dispatch(Action::DegradeStats(DegradeStatsAction))
            .await
            .is_err()
        {
            break;
        }
    }
}

/// Resets daily tasks when the UTC calendar date has rolled past the last
/// reset. Checked immediately at startup (the app may have been closed over
/// midnight) and then once per tick.
async fn daily_reset(handle: RuntimeHandle, config: GameConfig, period: Duration) {
    let mut ticker = interval(period);
    loop {
        ticker.tick().await;
        let Ok(state) = handle.state().await else {
            break;
        };
        let last = match Utc.timestamp_millis_opt(state.daily_tasks.last_reset.0).single() {
            Some(ts) => ts,
            None => continue,
        };
        let now = Utc::now();
        if last.date_naive() >= now.date_naive() {
            continue;
        }
        debug!(level = state.level.current, "daily tasks rolling over");
        let tasks = DailyTasks::fresh(
            config.daily_tap_target(state.level.current),
            Millis::new(now.timestamp_millis()),
        );
        if handle
            .dispatch(Action::ResetDailyTasks(ResetDailyTasksAction { tasks }))
            .await
            .is_err()
        {
            break;
        }
    }
}

/// Reverts expired buffs to neutral values.
async fn buff_sweep(handle: RuntimeHandle, period: Duration) {
    let mut ticker = interval(period);
    loop {
        ticker.tick().await;
        let Ok(state) = handle.state().await else {
            break;
        };
        let now = Millis::new(Utc::now().timestamp_millis());
        let coin_expired =
            state.buffs.coin_buff_ends.is_some() && !state.buffs.coin_buff_active(now);
        let energy_expired =
            state.buffs.energy_buff_ends.is_some() && !state.buffs.energy_buff_active(now);
        if !coin_expired && !energy_expired {
            continue;
        }
        if handle
            .dispatch(Action::ClearExpiredBuffs(ClearExpiredBuffsAction))
            .await
            .is_err()
        {
            break;
        }
    }
}

/// Pulls the server-computed weekly rank and dispatches an update only when
/// it differs from the cached position. Requires a bound user; gateway
/// failures are logged at debug and skipped.
async fn ranking_refresh(
    handle: RuntimeHandle,
    gateway: Arc<dyn RemoteGateway>,
    period: Duration,
) {
    let mut ticker = interval(period);
    loop {
        ticker.tick().await;
        let Ok(state) = handle.state().await else {
            break;
        };
        let Some(user_id) = state.user_id else {
            continue;
        };
        let position = match gateway.get_user_rank(user_id).await {
            Ok(position) => position,
            Err(e) => {
                debug!(error = %e, "rank refresh skipped");
                continue;
            }
        };
        if state.ranking.position == Some(position) {
            continue;
        }
        if handle
            .dispatch(Action::UpdateRanking(UpdateRankingAction { position }))
            .await
            .is_err()
        {
            break;
        }
    }
}

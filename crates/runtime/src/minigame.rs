//! Mini-game output contract.
//!
//! The mini-game itself (its board, moves, and scoring) lives in the UI
//! layer; the runtime only enforces the daily play limit and the
//! exactly-once delivery of the energy earned. [`MinigameSession::finish`]
//! consumes the session, so a finished session cannot pay out twice.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use crate::store::{CacheStore, StoreError};

/// Plays counter entries expire on their own after a full day.
const PLAY_COUNT_TTL: Duration = Duration::from_secs(60 * 60 * 24);

#[derive(Debug, Error)]
pub enum MinigameError {
    #[error("daily play limit of {limit} reached")]
    DailyLimitReached { limit: u32 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Gatekeeper for mini-game sessions.
///
/// The per-day play count lives in the cache store under a date-stamped key,
/// so closing and reopening the app cannot reset the limit.
pub struct MinigameLimiter {
    store: Arc<dyn CacheStore>,
    daily_limit: u32,
}

impl MinigameLimiter {
    pub fn new(store: Arc<dyn CacheStore>, daily_limit: u32) -> Self {
        Self { store, daily_limit }
    }

    /// Starts a session, counting it against today's limit up front.
    pub fn begin(&self, now: DateTime<Utc>) -> Result<MinigameSession, MinigameError> {
        let key = Self::key_for(now);
        let played = self.plays_recorded(&key)?;
        if played >= self.daily_limit {
            return Err(MinigameError::DailyLimitReached {
                limit: self.daily_limit,
            });
        }
        self.store
            .set(&key, &(played + 1).to_string(), PLAY_COUNT_TTL)?;
        debug!(played = played + 1, limit = self.daily_limit, "minigame session started");
        Ok(MinigameSession { started_at: now })
    }

    /// Plays already counted for the given day.
    pub fn plays_today(&self, now: DateTime<Utc>) -> Result<u32, MinigameError> {
        Ok(self.plays_recorded(&Self::key_for(now))?)
    }

    fn plays_recorded(&self, key: &str) -> Result<u32, StoreError> {
        let played = self
            .store
            .get(key)?
            .and_then(|raw| raw.parse::<u32>().ok())
            .unwrap_or(0);
        Ok(played)
    }

    fn key_for(now: DateTime<Utc>) -> String {
        format!("minigame:plays:{}", now.date_naive())
    }
}

/// An in-flight mini-game play.
///
/// The only way to realize winnings is [`finish`](Self::finish), which takes
/// the session by value. Dropping the session forfeits the play (it was
/// already counted).
#[derive(Debug)]
pub struct MinigameSession {
    started_at: DateTime<Utc>,
}

impl MinigameSession {
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Ends the session, yielding the energy the caller should claim
    /// through a reward action. Consumes the session.
    pub fn finish(self, energy_earned: u32) -> u32 {
        energy_earned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn limiter(limit: u32) -> MinigameLimiter {
        MinigameLimiter::new(Arc::new(MemoryStore::new()), limit)
    }

    #[test]
    fn sessions_count_against_the_daily_limit() {
        let limiter = limiter(2);
        let now = Utc::now();

        let first = limiter.begin(now).unwrap();
        assert_eq!(first.finish(10), 10);
        let _second = limiter.begin(now).unwrap();

        let err = limiter.begin(now).unwrap_err();
        assert!(matches!(err, MinigameError::DailyLimitReached { limit: 2 }));
        assert_eq!(limiter.plays_today(now).unwrap(), 2);
    }

    #[test]
    fn limit_is_per_calendar_date() {
        let limiter = limiter(1);
        let today = Utc::now();
        let tomorrow = today + chrono::Duration::days(1);

        limiter.begin(today).unwrap();
        assert!(limiter.begin(today).is_err());
        limiter.begin(tomorrow).unwrap();
    }

    #[test]
    fn dropped_session_still_consumed_a_play() {
        let limiter = limiter(1);
        let now = Utc::now();

        drop(limiter.begin(now).unwrap());
        assert!(limiter.begin(now).is_err());
    }
}

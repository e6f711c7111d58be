use thiserror::Error;

/// Validation failures surfaced by action transitions.
///
/// A rejected action leaves the committed state untouched; callers inspect
/// the resulting state rather than unwinding, matching the local-first
/// philosophy of the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("insufficient coins: have {coins}, need {price}")]
    InsufficientCoins { coins: u64, price: u64 },

    #[error("buff duration must be positive, got {duration_ms}ms")]
    NonPositiveBuffDuration { duration_ms: i64 },

    #[error("coin multiplier must be at least 1.0")]
    InvalidMultiplier,

    #[error("energy bound violated: {current} > {max}")]
    EnergyBoundViolated { current: u32, max: u32 },
}

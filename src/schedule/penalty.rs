//! Penalty tiers and the compounding formula

use serde::{Deserialize, Serialize};

/// Flat penalty charged on the current month at m=1
pub const BASE_PENALTY_RATE: f64 = 0.25;

/// Monthly compounding applied to each month older than the current one
pub const COMPOUNDING_RATE: f64 = 0.12;

// Literal multipliers of `1.25 * 1.12^(m-1)`; `1.0 + 0.12` is not the same f64
const PENALTY_MULTIPLIER: f64 = 1.25;
const COMPOUNDING_MULTIPLIER: f64 = 1.12;

/// Formula shown alongside schedules for m > 1
pub const COMPOUNDING_FORMULA: &str = "(1.25 * 1.12^(m-1)) - 1";

/// Penalty tier an arrears index falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenaltyTier {
    /// m=0: current month, no penalty
    Current,
    /// m=1: current month, flat base penalty
    Base,
    /// m>=2: earlier months, compounded `periods` = m-1 times
    Compounding { periods: u32 },
}

impl PenaltyTier {
    pub fn for_period(m: u32) -> Self {
        match m {
            0 => PenaltyTier::Current,
            1 => PenaltyTier::Base,
            _ => PenaltyTier::Compounding { periods: m - 1 },
        }
    }

    /// Growth factor applied to the base penalty multiplier
    pub fn compounding_factor(&self) -> f64 {
        match *self {
            PenaltyTier::Current => 0.0,
            PenaltyTier::Base => 1.0,
            PenaltyTier::Compounding { periods } => COMPOUNDING_MULTIPLIER.powf(periods as f64),
        }
    }

    /// Fractional surcharge on the levy
    ///
    /// The base tier is an explicit constant rather than the general
    /// formula evaluated at m=1, even though both give 0.25 today.
    pub fn penalty_rate(&self) -> f64 {
        match *self {
            PenaltyTier::Current => 0.0,
            PenaltyTier::Base => BASE_PENALTY_RATE,
            PenaltyTier::Compounding { .. } => PENALTY_MULTIPLIER * self.compounding_factor() - 1.0,
        }
    }
}

/// Penalty rate for arrears index `m`
pub fn penalty_rate(m: u32) -> f64 {
    PenaltyTier::for_period(m).penalty_rate()
}

/// Compounding factor for arrears index `m`
pub fn compounding_factor(m: u32) -> f64 {
    PenaltyTier::for_period(m).compounding_factor()
}

/// Round to the nearest integer, halves away from zero
///
/// Displayed amounts depend on this rule; do not swap in `round_ties_even`.
pub fn round_half_away(value: f64) -> f64 {
    value.round()
}

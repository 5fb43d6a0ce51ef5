//! Arrears levy schedule: penalty tiers, engine and output rows

mod penalty;
mod engine;
mod rows;

pub use penalty::{
    compounding_factor, penalty_rate, round_half_away, PenaltyTier, BASE_PENALTY_RATE,
    COMPOUNDING_FORMULA, COMPOUNDING_RATE,
};
pub use engine::{
    compute_schedule, QuantityMap, ScheduleConfig, ScheduleEngine, DEFAULT_ARREARS_COUNT,
    DEFAULT_PERIOD_FEE, DEFAULT_UNIT_PRICE, MAX_ARREARS_COUNT,
};
pub use rows::{CostDistribution, CostSlice, Schedule, ScheduleRow, ScheduleTotals};

//! Arrears schedule engine

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::period::BaseMonth;
use super::penalty::{round_half_away, PenaltyTier};
use super::rows::{Schedule, ScheduleRow, ScheduleTotals};

/// Default unit price per quantity unit
pub const DEFAULT_UNIT_PRICE: f64 = 0.40;

/// Default fixed fee per charged period
pub const DEFAULT_PERIOD_FEE: f64 = 50.0;

/// Default number of arrears periods
pub const DEFAULT_ARREARS_COUNT: u32 = 4;

/// Largest arrears count accepted from any input (fifty years of months)
pub const MAX_ARREARS_COUNT: u32 = 600;

/// Sparse per-period quantities keyed by arrears index
pub type QuantityMap = BTreeMap<u32, f64>;

/// Configuration for one estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Current billing month
    pub base_month: BaseMonth,

    /// Highest arrears index; rows run 0..=arrears_count
    pub arrears_count: u32,

    /// Price per quantity unit
    pub unit_price: f64,

    /// Fixed fee added to each period with recorded consumption
    pub period_fee: f64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            base_month: BaseMonth::default(),
            arrears_count: DEFAULT_ARREARS_COUNT,
            unit_price: DEFAULT_UNIT_PRICE,
            period_fee: DEFAULT_PERIOD_FEE,
        }
    }
}

/// Main schedule engine
///
/// Holds no state between runs; every call recomputes all rows.
#[derive(Debug, Clone)]
pub struct ScheduleEngine {
    config: ScheduleConfig,
}

impl ScheduleEngine {
    pub fn new(config: ScheduleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Compute the full schedule for the given quantities
    ///
    /// Quantities for indices above the arrears count are ignored.
    pub fn compute(&self, quantities: &QuantityMap) -> Schedule {
        let rows: Vec<ScheduleRow> = (0..=self.config.arrears_count)
            .map(|m| self.calculate_row(m, quantities.get(&m).copied().unwrap_or(0.0)))
            .collect();
        let totals = ScheduleTotals::from_rows(&rows);

        Schedule {
            config: self.config.clone(),
            rows,
            totals,
        }
    }

    /// Calculate one row for arrears index `m`
    fn calculate_row(&self, m: u32, quantity: f64) -> ScheduleRow {
        let tier = PenaltyTier::for_period(m);
        let penalty_rate = tier.penalty_rate();

        let levy = quantity * self.config.unit_price;
        let penalty = levy * penalty_rate;
        let amount = round_half_away(levy + penalty);

        // No fee for months without recorded consumption
        let total = if quantity > 0.0 {
            amount + self.config.period_fee
        } else {
            0.0
        };

        ScheduleRow {
            m,
            month_label: self.config.base_month.label(m),
            period: self.config.base_month.period(m),
            quantity,
            levy,
            penalty_rate,
            compounding_factor: tier.compounding_factor(),
            penalty,
            amount,
            total,
        }
    }
}

/// Compute a schedule from loose parameters
pub fn compute_schedule(
    base_month: BaseMonth,
    arrears_count: u32,
    unit_price: f64,
    period_fee: f64,
    quantities: &QuantityMap,
) -> Schedule {
    ScheduleEngine::new(ScheduleConfig {
        base_month,
        arrears_count,
        unit_price,
        period_fee,
    })
    .compute(quantities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scenario_quantities() -> QuantityMap {
        QuantityMap::from([(1, 6293.0), (2, 6379.0), (3, 7094.0), (4, 10422.0)])
    }

    fn scenario() -> Schedule {
        ScheduleEngine::new(ScheduleConfig::default()).compute(&scenario_quantities())
    }

    #[test]
    fn test_one_row_per_index() {
        let schedule = scenario();
        let ms: Vec<u32> = schedule.rows.iter().map(|r| r.m).collect();
        assert_eq!(ms, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_current_month_row_is_empty() {
        let schedule = scenario();
        let row = schedule.row(0).unwrap();
        assert_eq!(row.levy, 0.0);
        assert_eq!(row.penalty, 0.0);
        assert_eq!(row.amount, 0.0);
        assert_eq!(row.total, 0.0);
        assert_eq!(row.month_label, "Jan-26");
    }

    #[test]
    fn test_base_penalty_row() {
        let schedule = scenario();
        let row = schedule.row(1).unwrap();
        assert_relative_eq!(row.levy, 2517.20, epsilon = 1e-9);
        assert_eq!(row.penalty_rate, 0.25);
        assert_relative_eq!(row.penalty, 629.30, epsilon = 1e-9);
        // 3146.5000000000005 in f64, which rounds up
        assert_eq!(row.amount, 3147.0);
        assert_eq!(row.total, 3197.0);
        assert_eq!(row.month_label, "Jan-26");
    }

    #[test]
    fn test_compounded_rows() {
        let schedule = scenario();

        let m2 = schedule.row(2).unwrap();
        assert_eq!(m2.month_label, "Dec-25");
        assert_relative_eq!(m2.penalty_rate, 0.40, epsilon = 1e-12);
        assert_eq!(m2.amount, 3572.0);
        assert_eq!(m2.total, 3622.0);

        let m3 = schedule.row(3).unwrap();
        assert_eq!(m3.month_label, "Nov-25");
        assert_eq!(m3.amount, 4449.0);
        assert_eq!(m3.total, 4499.0);

        let m4 = schedule.row(4).unwrap();
        assert_eq!(m4.month_label, "Oct-25");
        assert_eq!(Some(m4.period), BaseMonth::from_ym(2025, 10));
        assert_relative_eq!(m4.penalty_rate, 0.75616, epsilon = 1e-12);
        assert_relative_eq!(m4.levy, 4168.80, epsilon = 1e-9);
        assert_relative_eq!(m4.penalty, 3152.279808, epsilon = 1e-6);
        assert_eq!(m4.amount, 7321.0);
        assert_eq!(m4.total, 7371.0);
    }

    #[test]
    fn test_scenario_totals() {
        let schedule = scenario();
        assert_eq!(schedule.totals.quantity, 30188.0);
        assert_relative_eq!(schedule.totals.levy, 12075.20, epsilon = 1e-6);
        assert_eq!(schedule.totals.amount, 18489.0);
        assert_eq!(schedule.totals.total, 18689.0);
        assert_eq!(schedule.totals.charged_periods, 4);

        let dist = schedule.distribution();
        assert_eq!(dist.fees, 200.0);
        assert_relative_eq!(dist.levy + dist.penalty + dist.fees, 18689.0, epsilon = 5.0);
    }

    #[test]
    fn test_total_is_sum_of_row_totals() {
        let schedule = scenario();
        let sum: f64 = schedule.rows.iter().map(|r| r.total).sum();
        assert_eq!(schedule.totals.total, sum);
    }

    #[test]
    fn test_zero_quantity_forces_zero_total() {
        let quantities = QuantityMap::from([(2, 100.0)]);
        let schedule = ScheduleEngine::new(ScheduleConfig::default()).compute(&quantities);
        for row in &schedule.rows {
            if row.m != 2 {
                assert_eq!(row.total, 0.0, "row m={} charged", row.m);
            }
        }
        assert_eq!(schedule.totals.charged_periods, 1);
    }

    #[test]
    fn test_single_arrears_period() {
        let schedule = compute_schedule(BaseMonth::default(), 1, 0.40, 50.0, &scenario_quantities());
        assert_eq!(schedule.rows.len(), 2);
        assert_eq!(schedule.rows[1].m, 1);
        assert!(schedule.rows.iter().all(|r| r.compounding_factor <= 1.0));
    }

    #[test]
    fn test_free_levy_still_charges_fee() {
        let schedule = compute_schedule(BaseMonth::default(), 4, 0.0, 50.0, &scenario_quantities());
        for row in &schedule.rows {
            assert_eq!(row.levy, 0.0);
            assert_eq!(row.penalty, 0.0);
        }
        assert_eq!(schedule.row(1).unwrap().total, 50.0);
        assert_eq!(schedule.row(0).unwrap().total, 0.0);
        assert_eq!(schedule.totals.total, 200.0);
    }

    #[test]
    fn test_quantities_beyond_count_ignored() {
        let schedule = compute_schedule(BaseMonth::default(), 2, 0.40, 50.0, &scenario_quantities());
        assert_eq!(schedule.rows.len(), 3);
        assert_eq!(schedule.totals.quantity, 6293.0 + 6379.0);
    }

    #[test]
    fn test_idempotent() {
        let engine = ScheduleEngine::new(ScheduleConfig::default());
        let quantities = scenario_quantities();
        assert_eq!(engine.compute(&quantities), engine.compute(&quantities));
    }
}

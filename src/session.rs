//! Interactive estimate session
//!
//! Owns the mutable configuration and per-period quantities for one
//! estimate and recomputes the schedule after every edit.

use log::debug;

use crate::input::{clamp_amount, clamp_arrears_count, Signatory};
use crate::period::BaseMonth;
use crate::schedule::{QuantityMap, Schedule, ScheduleConfig, ScheduleEngine};

/// Quantities the entry form starts with
const SEED_QUANTITIES: [(u32, f64); 4] = [(1, 6293.0), (2, 6379.0), (3, 7094.0), (4, 10422.0)];

/// State of one estimate being edited
///
/// # Example
/// ```
/// use levy_estimator::EstimateSession;
///
/// let mut session = EstimateSession::seeded();
/// session.set_arrears_count(2);
/// session.set_arrears_count(4);
/// assert_eq!(session.quantity(4), 10422.0);
/// ```
#[derive(Debug, Clone)]
pub struct EstimateSession {
    config: ScheduleConfig,
    /// Survives arrears-count changes; indices above the count are kept
    quantities: QuantityMap,
    signatory: Signatory,
    schedule: Schedule,
}

impl EstimateSession {
    /// Create a session with the given configuration and no quantities
    pub fn new(config: ScheduleConfig) -> Self {
        Self::with_quantities(config, QuantityMap::new())
    }

    /// Create a session with pre-loaded quantities
    ///
    /// The configuration is clamped the same way `set_config` clamps it.
    pub fn with_quantities(config: ScheduleConfig, quantities: QuantityMap) -> Self {
        let config = sanitize_config(config);
        let schedule = ScheduleEngine::new(config.clone()).compute(&quantities);
        Self {
            config,
            quantities,
            signatory: Signatory::default(),
            schedule,
        }
    }

    /// Default configuration with the sample quantities filled in
    pub fn seeded() -> Self {
        Self::with_quantities(ScheduleConfig::default(), QuantityMap::from(SEED_QUANTITIES))
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn quantities(&self) -> &QuantityMap {
        &self.quantities
    }

    /// Entered quantity for `m`, 0 if none
    pub fn quantity(&self, m: u32) -> f64 {
        self.quantities.get(&m).copied().unwrap_or(0.0)
    }

    /// Latest computed schedule
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn signatory(&self) -> &Signatory {
        &self.signatory
    }

    pub fn signatory_mut(&mut self) -> &mut Signatory {
        &mut self.signatory
    }

    pub fn set_base_month(&mut self, base_month: BaseMonth) -> &Schedule {
        self.config.base_month = base_month;
        self.recompute()
    }

    /// Change the number of arrears periods (clamped to 1..=MAX_ARREARS_COUNT)
    pub fn set_arrears_count(&mut self, count: u32) -> &Schedule {
        self.config.arrears_count = clamp_arrears_count(count);
        self.recompute()
    }

    pub fn set_unit_price(&mut self, price: f64) -> &Schedule {
        self.config.unit_price = clamp_amount(price);
        self.recompute()
    }

    pub fn set_period_fee(&mut self, fee: f64) -> &Schedule {
        self.config.period_fee = clamp_amount(fee);
        self.recompute()
    }

    /// Record the quantity for period `m`
    pub fn set_quantity(&mut self, m: u32, quantity: f64) -> &Schedule {
        self.quantities.insert(m, clamp_amount(quantity));
        self.recompute()
    }

    pub fn clear_quantity(&mut self, m: u32) -> &Schedule {
        self.quantities.remove(&m);
        self.recompute()
    }

    /// Replace the whole configuration at once
    pub fn set_config(&mut self, config: ScheduleConfig) -> &Schedule {
        self.config = sanitize_config(config);
        self.recompute()
    }

    /// Recompute the schedule from the current inputs
    pub fn recompute(&mut self) -> &Schedule {
        self.schedule = ScheduleEngine::new(self.config.clone()).compute(&self.quantities);
        debug!(
            "Recomputed schedule: base={} count={} price={} fee={} total={}",
            self.config.base_month,
            self.config.arrears_count,
            self.config.unit_price,
            self.config.period_fee,
            self.schedule.totals.total,
        );
        &self.schedule
    }
}

fn sanitize_config(config: ScheduleConfig) -> ScheduleConfig {
    ScheduleConfig {
        arrears_count: clamp_arrears_count(config.arrears_count),
        unit_price: clamp_amount(config.unit_price),
        period_fee: clamp_amount(config.period_fee),
        ..config
    }
}

impl Default for EstimateSession {
    fn default() -> Self {
        Self::new(ScheduleConfig::default())
    }
}

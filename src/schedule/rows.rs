//! Schedule output structures

use serde::{Deserialize, Serialize};

use super::engine::ScheduleConfig;
use crate::period::BaseMonth;

/// A single row of the arrears schedule for one period index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Arrears index (0 = current month, no penalty)
    pub m: u32,
    pub month_label: String,
    /// Calendar month the row bills
    pub period: BaseMonth,

    pub quantity: f64,
    pub levy: f64,

    pub penalty_rate: f64,
    pub compounding_factor: f64,
    pub penalty: f64,

    /// Levy plus penalty, rounded to a whole currency unit
    pub amount: f64,
    /// Amount plus the per-period fee; zero when nothing was consumed
    pub total: f64,
}

impl ScheduleRow {
    /// Whether the per-period fee applies to this row
    pub fn is_charged(&self) -> bool {
        self.quantity > 0.0
    }
}

/// Column sums across every row of a schedule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleTotals {
    pub quantity: f64,
    pub levy: f64,
    pub penalty: f64,
    pub amount: f64,
    pub total: f64,
    /// Rows carrying the per-period fee
    pub charged_periods: u32,
}

impl ScheduleTotals {
    pub fn from_rows(rows: &[ScheduleRow]) -> Self {
        rows.iter().fold(Self::default(), |mut acc, row| {
            acc.quantity += row.quantity;
            acc.levy += row.levy;
            acc.penalty += row.penalty;
            acc.amount += row.amount;
            acc.total += row.total;
            if row.is_charged() {
                acc.charged_periods += 1;
            }
            acc
        })
    }
}

/// One slice of the cost breakdown chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostSlice {
    pub name: &'static str,
    pub value: f64,
    /// Hex colour used by chart renderers
    pub color: &'static str,
}

/// How the grand total splits between levy, penalty and fees
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostDistribution {
    pub levy: f64,
    pub penalty: f64,
    pub fees: f64,
}

impl CostDistribution {
    pub fn slices(&self) -> [CostSlice; 3] {
        [
            CostSlice { name: "Levy", value: self.levy, color: "#3b82f6" },
            CostSlice { name: "Penalty", value: self.penalty, color: "#ef4444" },
            CostSlice { name: "CF Fees", value: self.fees, color: "#10b981" },
        ]
    }
}

/// Complete schedule for one estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    pub config: ScheduleConfig,
    pub rows: Vec<ScheduleRow>,
    pub totals: ScheduleTotals,
}

impl Schedule {
    /// Look up the row for arrears index `m`
    pub fn row(&self, m: u32) -> Option<&ScheduleRow> {
        self.rows.get(m as usize).filter(|row| row.m == m)
    }

    /// Cost breakdown for charting; fees count only charged periods
    pub fn distribution(&self) -> CostDistribution {
        CostDistribution {
            levy: self.totals.levy,
            penalty: self.totals.penalty,
            fees: self.totals.charged_periods as f64 * self.config.period_fee,
        }
    }

    /// Grand total due
    pub fn total_due(&self) -> f64 {
        self.totals.total
    }
}

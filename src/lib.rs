//! Levy Estimator - compounding arrears levy schedules
//!
//! This library provides:
//! - The arrears schedule engine (tiered, compounding penalties per period)
//! - Month labelling for arrears periods
//! - An estimate session that recomputes on every edit
//! - Lenient input coercion, CSV quantity loading and environment overrides
//! - Terminal, CSV, JSON and printable (text/HTML) output

pub mod period;
pub mod schedule;
pub mod input;
pub mod session;
pub mod report;

// Re-export commonly used types
pub use period::BaseMonth;
pub use schedule::{compute_schedule, QuantityMap, Schedule, ScheduleConfig, ScheduleEngine, ScheduleRow, ScheduleTotals};
pub use input::{InputError, Signatory};
pub use session::EstimateSession;
pub use report::EstimateDocument;

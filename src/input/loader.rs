//! Load quantities from CSV and configuration overrides from the environment

use csv::Reader;
use log::{debug, warn};
use std::env;
use std::fs::File;
use std::path::Path;

use super::coerce::{coerce_amount, coerce_arrears_count, coerce_quantity, parse_period};
use super::error::InputError;
use crate::period::BaseMonth;
use crate::schedule::{QuantityMap, ScheduleConfig};

pub const ENV_BASE_MONTH: &str = "LEVY_BASE_MONTH";
pub const ENV_ARREARS_COUNT: &str = "LEVY_ARREARS_COUNT";
pub const ENV_UNIT_PRICE: &str = "LEVY_UNIT_PRICE";
pub const ENV_PERIOD_FEE: &str = "LEVY_PERIOD_FEE";

/// Raw CSV row: `Period,Quantity`
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Period")]
    period: String,
    #[serde(rename = "Quantity")]
    quantity: String,
}

/// Load per-period quantities from a CSV file
pub fn load_quantities<P: AsRef<Path>>(path: P) -> Result<QuantityMap, InputError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_quantities_from_reader(file)
}

/// Load quantities from any reader (e.g., string buffer, stdin)
///
/// Later rows for the same period replace earlier ones.
pub fn load_quantities_from_reader<R: std::io::Read>(reader: R) -> Result<QuantityMap, InputError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut quantities = QuantityMap::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        let m = parse_period(&row.period)?;
        let quantity = coerce_quantity(&row.quantity);
        if quantities.insert(m, quantity).is_some() {
            warn!("Duplicate quantity for period {}, keeping the later value", m);
        }
    }

    debug!("Loaded {} period quantities", quantities.len());
    Ok(quantities)
}

/// Configuration values supplied outside the command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub base_month: Option<BaseMonth>,
    pub arrears_count: Option<u32>,
    pub unit_price: Option<f64>,
    pub period_fee: Option<f64>,
}

impl ConfigOverrides {
    /// Read overrides from `LEVY_*` environment variables
    ///
    /// Numbers are coerced leniently; an unparseable base month is an error.
    pub fn from_env() -> Result<Self, InputError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read overrides through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, InputError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_month = lookup(ENV_BASE_MONTH)
            .map(|raw| BaseMonth::parse(&raw))
            .transpose()?;

        Ok(Self {
            base_month,
            arrears_count: lookup(ENV_ARREARS_COUNT).map(|raw| coerce_arrears_count(&raw)),
            unit_price: lookup(ENV_UNIT_PRICE).map(|raw| coerce_amount(&raw)),
            period_fee: lookup(ENV_PERIOD_FEE).map(|raw| coerce_amount(&raw)),
        })
    }

    /// Apply the set values onto a configuration
    pub fn apply(&self, config: &mut ScheduleConfig) {
        if let Some(base_month) = self.base_month {
            config.base_month = base_month;
        }
        if let Some(count) = self.arrears_count {
            config.arrears_count = count;
        }
        if let Some(price) = self.unit_price {
            config.unit_price = price;
        }
        if let Some(fee) = self.period_fee {
            config.period_fee = fee;
        }
    }
}

//! Input collection: coercion, CSV loading, environment overrides

mod error;
mod coerce;
mod signatory;
pub mod loader;

pub use error::InputError;
pub use coerce::{
    clamp_amount, clamp_arrears_count, coerce_amount, coerce_arrears_count, coerce_quantity,
    parse_period, parse_quantity_entry,
};
pub use signatory::{signature_data_url, Signatory};
pub use loader::{load_quantities, load_quantities_from_reader, ConfigOverrides};

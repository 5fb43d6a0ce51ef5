//! Calendar handling for arrears periods

mod month;

pub use month::BaseMonth;

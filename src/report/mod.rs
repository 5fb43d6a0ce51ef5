//! Presentation of computed schedules: terminal table, CSV, printable estimate

mod format;
mod table;
mod document;

pub use format::{
    format_decimal, format_long_date, format_money, format_quantity, format_rate,
    format_short_date, format_whole,
};
pub use table::{render_table, write_csv};
pub use document::{escape_html, EstimateDocument, Issuer, DOCUMENT_TITLE};

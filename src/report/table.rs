//! Terminal table and CSV export of a schedule

use std::fmt;
use std::io;

use super::format::{format_money, format_quantity, format_rate, format_whole};
use crate::schedule::{Schedule, BASE_PENALTY_RATE, COMPOUNDING_FORMULA, COMPOUNDING_RATE};

/// How the arrears index maps to the penalty applied
const SEQUENCE_PATTERN: [&str; 3] = [
    "m=0: Current month, no penalty.",
    "m=1: Current month, 25% penalty.",
    "m=2+: Previous months, compounded penalty.",
];

/// Render the schedule, cost distribution and compounding summary
pub fn render_table(schedule: &Schedule) -> String {
    ScheduleTable(schedule).to_string()
}

struct ScheduleTable<'a>(&'a Schedule);

impl fmt::Display for ScheduleTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schedule = self.0;

        writeln!(
            f,
            "{:>8} {:>11} {:>12} {:>14} {:>10} {:>14} {:>10} {:>12}",
            "Month", "Arrears (m)", "Quantity", "Levy", "Penalty %", "Penalty", "Amount", "Total"
        )?;
        writeln!(f, "{}", "-".repeat(98))?;

        for row in &schedule.rows {
            writeln!(
                f,
                "{:>8} {:>11} {:>12} {:>14} {:>10} {:>14} {:>10} {:>12}",
                row.month_label,
                row.m,
                format_quantity(row.quantity),
                format_money(row.levy),
                format_rate(row.penalty_rate),
                format_money(row.penalty),
                format_whole(row.amount),
                format_whole(row.total),
            )?;
        }

        let totals = &schedule.totals;
        writeln!(f, "{}", "-".repeat(98))?;
        writeln!(
            f,
            "{:<20} {:>12} {:>14} {:>10} {:>14} {:>10} {:>12}",
            "TOTALS",
            format_quantity(totals.quantity),
            format_money(totals.levy),
            "",
            format_money(totals.penalty),
            "",
            format_whole(totals.total),
        )?;

        writeln!(f, "\nCost Distribution:")?;
        for slice in schedule.distribution().slices() {
            writeln!(f, "  {:<10} {:>14}", slice.name, format_money(slice.value))?;
        }

        writeln!(f, "\nCompounding Logic:")?;
        writeln!(f, "  Base Penalty (m=1)  {}", format_rate(BASE_PENALTY_RATE))?;
        writeln!(f, "  Compounding Rate    {} Monthly", format_rate(COMPOUNDING_RATE))?;
        writeln!(f, "  Formula (m > 1)     {}", COMPOUNDING_FORMULA)?;

        writeln!(f, "\nSequence Pattern:")?;
        for line in SEQUENCE_PATTERN {
            writeln!(f, "  {}", line)?;
        }

        writeln!(f, "\nGrand Total Due: {}", format_whole(schedule.total_due()))
    }
}

/// Write one CSV line per row, values unformatted
pub fn write_csv<W: io::Write>(schedule: &Schedule, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "Month", "M", "Quantity", "Levy", "PenaltyRate", "CompoundingFactor", "Penalty", "Amount", "Total",
    ])?;

    for row in &schedule.rows {
        csv_writer.write_record(&[
            row.month_label.clone(),
            row.m.to_string(),
            row.quantity.to_string(),
            format!("{:.2}", row.levy),
            format!("{:.6}", row.penalty_rate),
            format!("{:.6}", row.compounding_factor),
            format!("{:.2}", row.penalty),
            format!("{:.0}", row.amount),
            format!("{:.0}", row.total),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

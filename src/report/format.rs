//! Number and date formatting for estimate output

use chrono::NaiveDate;

/// Currency amounts: thousands separators, two decimals
pub fn format_money(value: f64) -> String {
    format_decimal(value, 2, 2)
}

/// Whole amounts and totals: thousands separators, no decimals
pub fn format_whole(value: f64) -> String {
    format_decimal(value, 0, 0)
}

/// Quantities: thousands separators, up to three decimals
pub fn format_quantity(value: f64) -> String {
    format_decimal(value, 0, 3)
}

/// Fractional rate as a percentage with one decimal (0.25 -> "25.0%")
pub fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Long British date, e.g. "31 January 2026"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Short numeric date, e.g. "19/10/2026"
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Format with grouped thousands and between `min_frac` and `max_frac` decimals
pub fn format_decimal(value: f64, min_frac: usize, max_frac: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", max_frac, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (fixed.as_str(), ""),
    };

    let mut frac = frac_part.to_string();
    while frac.len() > min_frac && frac.ends_with('0') {
        frac.pop();
    }

    let mut out = group_thousands(int_part);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(&frac);
    }

    let is_zero = out.bytes().all(|b| matches!(b, b'0' | b'.' | b','));
    if value < 0.0 && !is_zero {
        out.insert(0, '-');
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

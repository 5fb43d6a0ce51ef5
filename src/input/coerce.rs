//! Lenient coercion of form-style input values
//!
//! Bad entries never reach the engine as errors: they fall back to a safe
//! value the same way the entry form does. Numbers are read from the
//! leading numeric prefix of the text, so `"12abc"` reads as 12 and an
//! arrears count of `"1e3"` reads as 1.

use super::error::InputError;
use crate::schedule::MAX_ARREARS_COUNT;

/// Parse a price or fee; anything unusable becomes 0
pub fn coerce_amount(raw: &str) -> f64 {
    float_prefix(raw).map(clamp_amount).unwrap_or(0.0)
}

/// Quantities follow the same rule as amounts
pub fn coerce_quantity(raw: &str) -> f64 {
    coerce_amount(raw)
}

/// Parse an arrears count, clamped to 1..=MAX_ARREARS_COUNT
///
/// Only the leading integer counts: "3.7" is 3, "1e12" is 1.
pub fn coerce_arrears_count(raw: &str) -> u32 {
    match int_prefix(raw) {
        Some(n) if n >= 1 => n.min(MAX_ARREARS_COUNT as i64) as u32,
        _ => 1,
    }
}

/// Clamp an already-numeric count to 1..=MAX_ARREARS_COUNT
pub fn clamp_arrears_count(count: u32) -> u32 {
    count.clamp(1, MAX_ARREARS_COUNT)
}

/// Clamp an already-numeric amount
pub fn clamp_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Parse an arrears index
pub fn parse_period(raw: &str) -> Result<u32, InputError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| InputError::InvalidPeriod(raw.to_string()))
}

/// Parse a `m=quantity` edit, e.g. `3=7094`
///
/// The period must be a valid index; the quantity is coerced.
pub fn parse_quantity_entry(raw: &str) -> Result<(u32, f64), InputError> {
    let (period, quantity) = raw
        .split_once('=')
        .ok_or_else(|| InputError::InvalidQuantityEntry(raw.to_string()))?;
    let m = parse_period(period).map_err(|_| InputError::InvalidQuantityEntry(raw.to_string()))?;
    Ok((m, coerce_quantity(quantity)))
}

/// Length of the run of ASCII digits at the start of `bytes`
fn digit_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Length of an optional leading sign
fn sign_len(bytes: &[u8]) -> usize {
    matches!(bytes.first(), Some(b'+') | Some(b'-')) as usize
}

/// Leading decimal number, e.g. "12.5kg" -> 12.5, "-3e2x" -> -300
fn float_prefix(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();

    let mut end = sign_len(bytes);
    let int_digits = digit_run(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digit_run(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Exponent only counts when digits follow it
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let exp_sign = sign_len(&bytes[end + 1..]);
        let exp_digits = digit_run(&bytes[end + 1 + exp_sign..]);
        if exp_digits > 0 {
            end += 1 + exp_sign + exp_digits;
        }
    }

    text[..end].parse().ok()
}

/// Leading integer, saturating at the i64 range
fn int_prefix(raw: &str) -> Option<i64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();

    let sign = sign_len(bytes);
    let digits = digit_run(&bytes[sign..]);
    if digits == 0 {
        return None;
    }

    let number = &text[..sign + digits];
    Some(number.parse().unwrap_or(if bytes[0] == b'-' { i64::MIN } else { i64::MAX }))
}

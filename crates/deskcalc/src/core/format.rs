//! Numeric display formatting
//!
//! [`format_result`] is the single formatting policy for computed results:
//! every value stored back into the engine's current-value buffer goes
//! through it, so the display never shows binary floating-point noise.

/// Formats a computed result as a numeric-literal string.
///
/// Very large (`|x| > 1e15`) and very small (`0 < |x| < 1e-10`) magnitudes
/// render in exponential notation with ten fractional digits of mantissa.
/// Everything else is rounded to ten decimal places and printed without
/// trailing zeros, so `0.1 + 0.2` displays as `0.3`.
#[must_use]
pub fn format_result(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude > 1e15 || (magnitude > 0.0 && magnitude < 1e-10) {
        return format!("{value:.10e}");
    }

    let rounded = (value * 1e10).round() / 1e10;
    if rounded == 0.0 {
        // normalizes -0.0
        return "0".to_string();
    }
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded}")
    }
}

/// Inserts thousands separators into an integer literal.
///
/// Applies only when the literal is a plain integer of four or more digits;
/// decimals and exponential forms pass through untouched. Display-only: the
/// engine's stored value never contains separators.
#[must_use]
pub fn group_thousands(literal: &str) -> String {
    if literal.contains('.') || literal.contains('e') || literal.contains('E') {
        return literal.to_string();
    }
    let (sign, digits) = literal
        .strip_prefix('-')
        .map_or(("", literal), |rest| ("-", rest));
    if digits.len() <= 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return literal.to_string();
    }

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

//! Input-boundary parsing for user-entered numeric strings.
//!
//! Values arrive as free text from the presentation layer. Anything that is
//! not a positive finite number is rejected here, before any store mutation
//! runs; rejection is silent (None), not an error.

/// Parse a user-entered value. Accepts only positive finite numbers.
pub fn parse_value(s: &str) -> Option<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

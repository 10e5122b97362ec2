//! Case-size rounding for production quantities.

use tracing::trace;

/// Ordered size rules; the first rule with any matching needle wins.
///
/// Needles are compared against the lowercased descriptor with all whitespace
/// removed, so `"1/2 LB Bag"` matches `"1/2lb"`.
const CASE_INCREMENT_RULES: &[(&[&str], u32)] = &[
    (&["8oz"], 60),
    (&["6oz", "1/2lb"], 40),
    (&["1lb"], 25),
    (&["25lb"], 1),
    (&["5lb"], 5),
    (&["gallon"], 4),
    (&["quart"], 12),
];

/// Resolves the case increment for a free-text product size.
///
/// Unmatched descriptors resolve to `1` (no rounding).
#[must_use]
pub fn case_increment(size_descriptor: &str) -> u32 {
    let compact: String = size_descriptor
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    if compact.is_empty() {
        return 1;
    }

    CASE_INCREMENT_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| compact.contains(needle)))
        .map_or(1, |(_, increment)| *increment)
}

/// Rounds `raw_units` up to the next multiple of the size's case increment.
///
/// With an increment of `1` the input is returned untouched (non-finite input
/// becomes `0`). Otherwise negative or non-finite input is treated as zero.
#[must_use]
pub fn normalize(raw_units: f64, size_descriptor: &str) -> f64 {
    let increment = case_increment(size_descriptor);
    if increment <= 1 {
        return if raw_units.is_finite() { raw_units } else { 0.0 };
    }

    let units = if raw_units.is_finite() && raw_units > 0.0 {
        raw_units
    } else {
        0.0
    };
    let increment = f64::from(increment);
    let normalized = (units / increment).ceil() * increment;
    trace!(raw_units, increment, normalized, "normalized units to case size");
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_pound_wins_over_pound_rule() {
        assert_eq!(case_increment("1/2 lb"), 40);
        assert_eq!(case_increment("1 LB"), 25);
        assert_eq!(case_increment("25 lb sack"), 1);
        assert_eq!(case_increment("5lb"), 5);
    }

    #[test]
    fn empty_descriptor_has_unit_increment() {
        assert_eq!(case_increment("   "), 1);
        assert_eq!(normalize(f64::NAN, ""), 0.0);
    }
}

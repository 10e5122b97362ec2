//! Width planning for the three-segment inventory progress bar.

use serde::{Deserialize, Serialize};

use crate::core::primitives::non_negative_or_zero;

/// Smallest width (percent) a non-empty segment is drawn with.
pub const MIN_SEGMENT_PERCENT: f64 = 10.0;

/// Segment widths in percent. Sums to 100 unless every segment is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BarWidths {
    pub fba: f64,
    pub total: f64,
    pub forecast: f64,
}

impl BarWidths {
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.fba + self.total + self.forecast
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sum() == 0.0
    }
}

#[must_use]
pub fn plan_widths(fba_units: f64, additional_units: f64, units_to_make: f64) -> BarWidths {
    plan_widths_with_floor(
        fba_units,
        additional_units,
        units_to_make,
        MIN_SEGMENT_PERCENT,
    )
}

/// Plans proportional widths where every non-empty segment gets at least
/// `floor_percent`.
///
/// Segments that fall under the floor are pinned to it and the remaining
/// budget is shared proportionally by the others, repeating until no free
/// segment drops below the floor.
#[must_use]
pub fn plan_widths_with_floor(
    fba_units: f64,
    additional_units: f64,
    units_to_make: f64,
    floor_percent: f64,
) -> BarWidths {
    let values = [
        non_negative_or_zero(fba_units),
        non_negative_or_zero(additional_units),
        non_negative_or_zero(units_to_make),
    ];
    let non_empty = values.iter().filter(|v| **v > 0.0).count();
    if non_empty == 0 {
        return BarWidths::default();
    }

    let floor = non_negative_or_zero(floor_percent).min(100.0 / non_empty as f64);
    let mut pinned = [false; 3];
    let mut widths = [0.0; 3];

    for _ in 0..=values.len() {
        let pinned_count = pinned.iter().filter(|p| **p).count();
        let free_budget = 100.0 - floor * pinned_count as f64;
        let free_sum: f64 = values
            .iter()
            .zip(pinned)
            .filter(|(_, is_pinned)| !is_pinned)
            .map(|(value, _)| *value)
            .sum();

        for index in 0..values.len() {
            widths[index] = if values[index] == 0.0 {
                0.0
            } else if pinned[index] {
                floor
            } else if free_sum > 0.0 {
                values[index] / free_sum * free_budget
            } else {
                0.0
            };
        }

        let mut changed = false;
        for index in 0..values.len() {
            if values[index] > 0.0 && !pinned[index] && widths[index] < floor {
                pinned[index] = true;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    // Pinning can leave floating-point residue; renormalize onto 100.
    let sum: f64 = widths.iter().sum();
    let scale = if sum > 0.0 { 100.0 / sum } else { 0.0 };
    BarWidths {
        fba: widths[0] * scale,
        total: widths[1] * scale,
        forecast: widths[2] * scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_tiny_segments_both_keep_the_floor() {
        let widths = plan_widths(1.0, 1.0, 10_000.0);
        assert!(widths.fba >= MIN_SEGMENT_PERCENT - 1e-9);
        assert!(widths.total >= MIN_SEGMENT_PERCENT - 1e-9);
        assert!((widths.sum() - 100.0).abs() < 1e-9);
    }
}

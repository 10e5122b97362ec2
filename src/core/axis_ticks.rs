//! "Nice" Y-axis tick planning over the real data range.

use ordered_float::OrderedFloat;
use smallvec::SmallVec;

pub const DEFAULT_TICK_COUNT: usize = 5;

/// Tolerance (relative to the step) for boundary and duplicate checks.
const STEP_EPSILON_RATIO: f64 = 1e-6;
const MAX_TICK_CANDIDATES: usize = 1_000;
const MAX_TICK_DECIMALS: i32 = 12;

/// Plans up to `desired_count` ascending tick values covering `[min, max]`.
///
/// Returns an empty list when `max <= 0` and `[min, max]` when no stepped
/// candidate lands inside the range. Never returns more than
/// `desired_count` values.
#[must_use]
pub fn plan_ticks(min: f64, max: f64, desired_count: usize) -> Vec<f64> {
    if desired_count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    if max <= 0.0 {
        return Vec::new();
    }

    let intervals = desired_count.saturating_sub(1).max(1);
    let range = if max > min {
        max - min
    } else {
        max.abs() * 0.1
    };
    let step = nice_step(range / intervals as f64);
    let epsilon = step * STEP_EPSILON_RATIO;
    let decimals = step_decimals(step);
    let start = (min / step).floor() * step;

    let mut ticks: SmallVec<[f64; 8]> = SmallVec::new();
    for index in 0..MAX_TICK_CANDIDATES {
        let value = round_to_decimals(start + index as f64 * step, decimals);
        if value > max + epsilon {
            break;
        }
        if value >= min - epsilon {
            ticks.push(value);
        }
    }

    ticks.sort_by_key(|value| OrderedFloat(*value));
    ticks.dedup_by(|right, left| (*right - *left).abs() <= epsilon);
    ticks.truncate(desired_count);

    if ticks.is_empty() {
        let mut fallback = vec![min, max];
        fallback.dedup();
        fallback.truncate(desired_count);
        return fallback;
    }
    ticks.into_vec()
}

/// Snaps a raw step to `{1, 2, 5, 10} * 10^k`, rounding in log space.
#[must_use]
pub fn nice_step(raw_step: f64) -> f64 {
    if !raw_step.is_finite() || raw_step <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let fraction = raw_step / magnitude;
    let nice = if fraction < 2f64.sqrt() {
        1.0
    } else if fraction < 10f64.sqrt() {
        2.0
    } else if fraction < 50f64.sqrt() {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn step_decimals(step: f64) -> i32 {
    (-step.log10().floor()).clamp(0.0, f64::from(MAX_TICK_DECIMALS)) as i32
}

fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_step_rounds_in_log_space() {
        assert_eq!(nice_step(1.3), 1.0);
        assert_eq!(nice_step(1.5), 2.0);
        assert_eq!(nice_step(4.0), 5.0);
        assert_eq!(nice_step(8.0), 10.0);
        assert_eq!(nice_step(230.0), 200.0);
    }

    #[test]
    fn zero_requested_ticks_yield_none() {
        assert!(plan_ticks(0.0, 100.0, 0).is_empty());
    }

    #[test]
    fn flat_positive_range_still_yields_a_tick() {
        assert_eq!(plan_ticks(5.0, 5.0, 5), vec![5.0]);
    }
}

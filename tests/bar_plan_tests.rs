use approx::assert_relative_eq;
use inventory_runway::core::bar_plan::MIN_SEGMENT_PERCENT;
use inventory_runway::core::{plan_widths, plan_widths_with_floor};

#[test]
fn all_zero_segments_plan_zero_widths() {
    let widths = plan_widths(0.0, 0.0, 0.0);
    assert_eq!(widths.fba, 0.0);
    assert_eq!(widths.total, 0.0);
    assert_eq!(widths.forecast, 0.0);
    assert!(widths.is_empty());
}

#[test]
fn proportional_widths_sum_to_one_hundred() {
    let widths = plan_widths(300.0, 100.0, 600.0);
    assert_relative_eq!(widths.fba, 30.0, epsilon = 1e-9);
    assert_relative_eq!(widths.total, 10.0, epsilon = 1e-9);
    assert_relative_eq!(widths.forecast, 60.0, epsilon = 1e-9);
    assert_relative_eq!(widths.sum(), 100.0, epsilon = 1e-9);
}

#[test]
fn single_segment_takes_the_whole_bar() {
    let widths = plan_widths(0.0, 0.0, 250.0);
    assert_relative_eq!(widths.forecast, 100.0, epsilon = 1e-9);
    assert_eq!(widths.fba, 0.0);
}

#[test]
fn tiny_segment_is_floored_to_ten_percent() {
    let widths = plan_widths(1.0, 0.0, 999.0);
    assert_relative_eq!(widths.fba, MIN_SEGMENT_PERCENT, epsilon = 1e-9);
    assert_relative_eq!(widths.forecast, 90.0, epsilon = 1e-9);
    assert_eq!(widths.total, 0.0);
}

#[test]
fn malformed_units_count_as_empty() {
    let widths = plan_widths(f64::NAN, -5.0, 40.0);
    assert_eq!(widths.fba, 0.0);
    assert_eq!(widths.total, 0.0);
    assert_relative_eq!(widths.forecast, 100.0, epsilon = 1e-9);
}

#[test]
fn custom_floor_is_respected() {
    let widths = plan_widths_with_floor(1.0, 1.0, 1_000.0, 20.0);
    assert_relative_eq!(widths.fba, 20.0, epsilon = 1e-9);
    assert_relative_eq!(widths.total, 20.0, epsilon = 1e-9);
    assert_relative_eq!(widths.forecast, 60.0, epsilon = 1e-9);
}

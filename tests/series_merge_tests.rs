use approx::assert_relative_eq;
use chrono::{DateTime, TimeZone, Utc};
use inventory_runway::core::primitives::add_days;
use inventory_runway::core::{
    ForecastParameters, InventoryUnits, MergeOptions, Timeline, TimelineSegmenter, TimelineZone,
    WeeklyPoint, merge,
};

fn today() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0)
        .single()
        .expect("valid date")
}

fn week(offset_weeks: i32) -> DateTime<Utc> {
    add_days(today(), f64::from(offset_weeks) * 7.0)
}

fn zoned_timeline() -> Timeline {
    let forecast = ForecastParameters {
        fba_available_days: Some(10.0),
        total_days: Some(20.0),
        ..ForecastParameters::default()
    };
    TimelineSegmenter::new(today())
        .with_doi_goal_days(Some(25.0))
        .compute(Some(&forecast), None, InventoryUnits::default())
}

fn history() -> Vec<WeeklyPoint> {
    vec![
        WeeklyPoint::historical(week(-1), 60.0, Some(58.0)),
        WeeklyPoint::historical(week(-2), 50.0, Some(55.0)),
    ]
}

fn projection() -> Vec<WeeklyPoint> {
    vec![
        WeeklyPoint::forecast(week(4), 100.0),
        WeeklyPoint::forecast(week(1), 70.0),
        WeeklyPoint::forecast(week(2), 80.0),
        WeeklyPoint::forecast(week(3), 90.0),
    ]
}

#[test]
fn history_precedes_forecast_in_chronological_groups() {
    let merged = merge(&history(), &projection(), &zoned_timeline(), MergeOptions::default());

    let dates: Vec<DateTime<Utc>> = merged
        .points
        .iter()
        .map(|point| point.point.week_end_date)
        .collect();
    assert_eq!(
        dates,
        vec![week(-2), week(-1), week(1), week(2), week(3), week(4)]
    );
    assert!(!merged.points[1].is_forecast());
    assert!(merged.points[2].is_forecast());
}

#[test]
fn smoothed_and_projected_lines_never_share_a_point() {
    let merged = merge(&history(), &projection(), &zoned_timeline(), MergeOptions::default());

    for point in &merged.points {
        if point.is_forecast() {
            assert_eq!(point.point.forecast_base, None);
            assert!(point.point.forecast_adjusted.is_some());
            assert_eq!(point.point.units_sold, None);
        } else {
            assert_eq!(point.point.forecast_base, point.point.units_sold_smoothed);
            assert_eq!(point.point.forecast_adjusted, None);
        }
    }
}

#[test]
fn points_are_tagged_with_zones_and_full_height_bars() {
    let merged = merge(&history(), &projection(), &zoned_timeline(), MergeOptions::default());

    let zones: Vec<TimelineZone> = merged.points.iter().map(|point| point.zone).collect();
    assert_eq!(
        zones,
        vec![
            TimelineZone::Historical,
            TimelineZone::Historical,
            TimelineZone::FbaAvailable,
            TimelineZone::TotalInventory,
            TimelineZone::ForecastPeriod,
            TimelineZone::BeyondForecast,
        ]
    );

    assert_relative_eq!(merged.bar_height, 110.0, epsilon = 1e-9);
    let fba = &merged.points[2];
    assert_relative_eq!(fba.fba_avail_bar.expect("fba bar"), 110.0, epsilon = 1e-9);
    assert_eq!(fba.total_inv_bar, None);
    assert_eq!(fba.forecast_bar, None);
    assert!(merged.points[3].total_inv_bar.is_some());
    assert!(merged.points[4].forecast_bar.is_some());
    let beyond = &merged.points[5];
    assert_eq!(beyond.fba_avail_bar, None);
    assert_eq!(beyond.total_inv_bar, None);
    assert_eq!(beyond.forecast_bar, None);
}

#[test]
fn value_range_ignores_bar_markers() {
    let merged = merge(&history(), &projection(), &zoned_timeline(), MergeOptions::default());

    assert_eq!(merged.value_range.min, 50.0);
    assert_eq!(merged.value_range.max, 100.0);
}

#[test]
fn forecast_tail_is_capped_at_half_the_window() {
    let long_projection: Vec<WeeklyPoint> = (1..=10)
        .map(|offset| WeeklyPoint::forecast(week(offset), 10.0 * f64::from(offset)))
        .collect();
    let options = MergeOptions {
        view_window_weeks: 8,
        ..MergeOptions::default()
    };

    let merged = merge(&history(), &long_projection, &zoned_timeline(), options);

    let forecast_points: Vec<_> = merged.points.iter().filter(|p| p.is_forecast()).collect();
    assert_eq!(forecast_points.len(), 4);
    assert_eq!(forecast_points[3].point.week_end_date, week(4));
    assert_eq!(merged.value_range.max, 60.0);
}

#[test]
fn base_only_forecast_points_get_the_adjustment_applied() {
    let forecast = ForecastParameters {
        fba_available_days: Some(10.0),
        forecast_adjustment: Some(10.0),
        ..ForecastParameters::default()
    };
    let timeline =
        TimelineSegmenter::new(today()).compute(Some(&forecast), None, InventoryUnits::default());
    let mut point = WeeklyPoint::forecast(week(1), 0.0).with_forecast_base(100.0);
    point.forecast_adjusted = None;

    let merged = merge(&[], &[point], &timeline, MergeOptions::default());

    assert_relative_eq!(
        merged.points[0].point.forecast_adjusted.expect("adjusted"),
        110.0,
        epsilon = 1e-9
    );
}

#[test]
fn empty_inputs_yield_an_empty_series() {
    let merged = merge(&[], &[], &Timeline::empty(today()), MergeOptions::default());

    assert!(merged.points.is_empty());
    assert_eq!(merged.value_range.min, 0.0);
    assert_eq!(merged.value_range.max, 0.0);
    assert_eq!(merged.time_range(), None);
}

#[test]
fn prior_year_values_widen_the_value_range() {
    let history =
        vec![WeeklyPoint::historical(week(-1), 60.0, Some(58.0)).with_prior_year_smoothed(140.0)];

    let merged = merge(&history, &projection(), &zoned_timeline(), MergeOptions::default());

    assert_eq!(merged.value_range.max, 140.0);
    assert_eq!(merged.points[0].point.prior_year_smoothed, Some(140.0));
}

#[test]
fn missing_inputs_leave_today_outside_the_forecast_zone() {
    let timeline = TimelineSegmenter::new(today()).compute(None, None, InventoryUnits::default());
    let projection = vec![
        WeeklyPoint::forecast(today(), 12.0),
        WeeklyPoint::forecast(week(1), 12.0),
    ];

    let merged = merge(&[], &projection, &timeline, MergeOptions::default());

    assert!(!timeline.has_forecast_zone());
    for point in &merged.points {
        assert_eq!(point.zone, TimelineZone::BeyondForecast);
        assert_eq!(point.forecast_bar, None);
        assert_eq!(point.fba_avail_bar, None);
        assert_eq!(point.total_inv_bar, None);
    }
}

#[test]
fn doi_horizon_alone_keeps_a_forecast_zone() {
    let timeline = TimelineSegmenter::new(today())
        .with_doi_goal_days(Some(14.0))
        .compute(None, None, InventoryUnits::default());
    let projection = vec![WeeklyPoint::forecast(today(), 12.0)];

    let merged = merge(&[], &projection, &timeline, MergeOptions::default());

    assert!(timeline.has_forecast_zone());
    assert_eq!(merged.points[0].zone, TimelineZone::ForecastPeriod);
}

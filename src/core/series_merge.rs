use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::timeline::{Timeline, ZoneBoundaries};
use crate::core::types::{ChartPoint, TimelineZone, WeeklyPoint};

/// Knobs for [`merge`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MergeOptions {
    /// Selected viewing window in weeks. At most half of it is spent on forecast.
    pub view_window_weeks: usize,
    /// Zone-shading bars are drawn at `max line value * ratio`.
    pub bar_overshoot_ratio: f64,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            view_window_weeks: 26,
            bar_overshoot_ratio: 1.1,
        }
    }
}

/// Min/max over line-series values only; shading bars are excluded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedSeries {
    pub points: Vec<ChartPoint>,
    pub value_range: ValueRange,
    pub zones: ZoneBoundaries,
    pub bar_height: f64,
}

impl MergedSeries {
    /// Earliest and latest point timestamps, or `None` for an empty series.
    #[must_use]
    pub fn time_range(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .map(ChartPoint::timestamp)
            .fold(None, |range, t| match range {
                None => Some((t, t)),
                Some((lo, hi)) => Some((f64::min(lo, t), f64::max(hi, t))),
            })
    }

    #[must_use]
    pub fn timestamps(&self) -> Vec<f64> {
        self.points.iter().map(ChartPoint::timestamp).collect()
    }
}

/// Merges historical and forecast weeks into one zone-tagged series.
///
/// Historical points come first, then forecast points, each group in
/// chronological order. The forecast tail is truncated to half the viewing
/// window.
#[must_use]
pub fn merge(
    historical: &[WeeklyPoint],
    forecast_series: &[WeeklyPoint],
    timeline: &Timeline,
    options: MergeOptions,
) -> MergedSeries {
    let mut history = historical.to_vec();
    history.sort_by(|left, right| left.week_end_date.cmp(&right.week_end_date));

    let mut projection = forecast_series.to_vec();
    projection.sort_by(|left, right| left.week_end_date.cmp(&right.week_end_date));
    let forecast_limit = options.view_window_weeks / 2;
    if projection.len() > forecast_limit {
        trace!(
            available = projection.len(),
            kept = forecast_limit,
            "truncating forecast tail to half the viewing window"
        );
        projection.truncate(forecast_limit);
    }

    let adjustment_factor = 1.0 + timeline.forecast_adjustment / 100.0;
    let lines: Vec<WeeklyPoint> = history
        .into_iter()
        .map(as_historical_line)
        .chain(
            projection
                .into_iter()
                .map(|point| as_forecast_line(point, adjustment_factor)),
        )
        .collect();

    let timestamps: Vec<f64> = lines.iter().map(WeeklyPoint::timestamp).collect();
    let zones = timeline.zone_boundaries(&timestamps);

    let max_series_value = lines
        .iter()
        .flat_map(|point| point.line_values())
        .map(OrderedFloat)
        .max()
        .map_or(0.0, |value| value.0);
    let min_series_value = lines
        .iter()
        .flat_map(|point| point.line_values())
        .map(OrderedFloat)
        .min()
        .map_or(0.0, |value| value.0);
    let bar_height = max_series_value * options.bar_overshoot_ratio;

    let points = lines
        .into_iter()
        .zip(timestamps)
        .map(|(point, timestamp)| {
            let zone = zones.classify(timestamp);
            let bar_in = |target: TimelineZone| (zone == target).then_some(bar_height);
            ChartPoint {
                point,
                zone,
                fba_avail_bar: bar_in(TimelineZone::FbaAvailable),
                total_inv_bar: bar_in(TimelineZone::TotalInventory),
                forecast_bar: bar_in(TimelineZone::ForecastPeriod),
            }
        })
        .collect();

    MergedSeries {
        points,
        value_range: ValueRange {
            min: min_series_value,
            max: max_series_value,
        },
        zones,
        bar_height,
    }
}

fn as_historical_line(point: WeeklyPoint) -> WeeklyPoint {
    WeeklyPoint {
        forecast_base: point.units_sold_smoothed,
        forecast_adjusted: None,
        is_forecast: false,
        ..point
    }
}

fn as_forecast_line(point: WeeklyPoint, adjustment_factor: f64) -> WeeklyPoint {
    let adjusted = point
        .forecast_adjusted
        .or_else(|| point.forecast_base.map(|base| base * adjustment_factor));
    WeeklyPoint {
        units_sold: None,
        units_sold_smoothed: None,
        forecast_base: None,
        forecast_adjusted: adjusted,
        is_forecast: true,
        ..point
    }
}

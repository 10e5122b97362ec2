use serde::{Deserialize, Serialize};

use crate::core::ChartPoint;

/// Dragged time range in epoch milliseconds. Endpoints may be in either order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub start: f64,
    pub end: f64,
}

impl SelectionRange {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// `(min, max)` regardless of drag direction.
    #[must_use]
    pub fn bounds(self) -> (f64, f64) {
        if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }

    #[must_use]
    pub fn contains(self, timestamp: f64) -> bool {
        let (min_t, max_t) = self.bounds();
        timestamp >= min_t && timestamp <= max_t
    }
}

/// Totals over the points inside a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeSum {
    pub units_sold: f64,
    pub forecast: f64,
    pub point_count: usize,
}

/// Returns points whose timestamp falls inside an inclusive time window.
#[must_use]
pub fn points_in_time_window(points: &[ChartPoint], start: f64, end: f64) -> Vec<ChartPoint> {
    let window = SelectionRange::new(start, end);
    points
        .iter()
        .copied()
        .filter(|point| window.contains(point.timestamp()))
        .collect()
}

/// Sums `units_sold` and `forecast_base` (falling back to the smoothed
/// series) over the selected points. `None` when nothing is selected.
#[must_use]
pub fn range_sum(selection: Option<SelectionRange>, series: &[ChartPoint]) -> Option<RangeSum> {
    let selection = selection?;
    let sum = series
        .iter()
        .filter(|point| selection.contains(point.timestamp()))
        .fold(RangeSum::default(), |mut acc, point| {
            let line = &point.point;
            acc.units_sold += finite_or_zero(line.units_sold);
            acc.forecast += finite_or_zero(line.forecast_base.or(line.units_sold_smoothed));
            acc.point_count += 1;
            acc
        });
    Some(sum)
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

//! Runway timeline segmentation.
//!
//! The segmenter resolves how many days each inventory pool lasts and turns
//! those day counts into ordered boundary dates:
//! `current <= runout <= total_runout <= doi_goal`.
//!
//! Each pool's day count is resolved from the first source that yields a
//! positive value:
//!
//! 1. an explicit runout date on the forecast parameters,
//! 2. an explicit day count on the forecast parameters,
//! 3. inventory units divided by daily velocity (weekly forecast / 7),
//! 4. DOI settings (`amazon_doi_goal` for FBA, the full required DOI for total),
//! 5. zero.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::primitives::{
    DAYS_PER_WEEK, add_days, datetime_to_millis, days_between, non_negative_or_zero, positive,
};
use crate::core::types::{DoiSettings, ForecastParameters, InventoryUnits, TimelineZone};

/// Which fallback level produced a pool's day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundarySource {
    ExplicitDate,
    ExplicitDays,
    Velocity,
    DoiSettings,
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineBoundaries {
    pub runout_date: DateTime<Utc>,
    pub total_runout_date: DateTime<Utc>,
    pub doi_goal_date: DateTime<Utc>,
}

/// Resolved runway for one product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub current_date: DateTime<Utc>,
    pub fba_available_days: f64,
    pub total_days: f64,
    pub forecast_units: f64,
    pub forecast_adjustment: f64,
    pub fba_units: f64,
    pub additional_units: f64,
    pub boundaries: TimelineBoundaries,
    pub fba_source: BoundarySource,
    pub total_source: BoundarySource,
}

impl Timeline {
    /// A timeline with no inventory zones: everything before `today` is
    /// historical and everything from `today` on is beyond the forecast.
    #[must_use]
    pub fn empty(today: DateTime<Utc>) -> Self {
        Self {
            current_date: today,
            fba_available_days: 0.0,
            total_days: 0.0,
            forecast_units: 0.0,
            forecast_adjustment: 0.0,
            fba_units: 0.0,
            additional_units: 0.0,
            boundaries: TimelineBoundaries {
                runout_date: today,
                total_runout_date: today,
                doi_goal_date: today,
            },
            fba_source: BoundarySource::Missing,
            total_source: BoundarySource::Missing,
        }
    }

    #[must_use]
    pub fn has_inventory_zones(&self) -> bool {
        self.total_days > 0.0
    }

    /// `false` when neither inventory nor a DOI horizon extends past today.
    #[must_use]
    pub fn has_forecast_zone(&self) -> bool {
        self.has_inventory_zones() || self.boundaries.doi_goal_date > self.current_date
    }

    /// Plain boundaries in epoch milliseconds, without the minimum-band rule.
    #[must_use]
    pub fn raw_zone_boundaries(&self) -> ZoneBoundaries {
        if !self.has_forecast_zone() {
            return ZoneBoundaries::without_forecast(datetime_to_millis(self.current_date));
        }
        ZoneBoundaries::ordered(
            datetime_to_millis(self.current_date),
            datetime_to_millis(self.boundaries.runout_date),
            datetime_to_millis(self.boundaries.total_runout_date),
            datetime_to_millis(self.boundaries.doi_goal_date),
        )
    }

    /// Boundaries adjusted for a concrete set of point timestamps.
    ///
    /// When both pools run out on the same day the total-inventory zone would
    /// be empty. In that case its end is advanced to the data point following
    /// the first point at or after the runout, so exactly one point carries
    /// the total-inventory zone.
    #[must_use]
    pub fn zone_boundaries(&self, timestamps: &[f64]) -> ZoneBoundaries {
        let mut zones = self.raw_zone_boundaries();
        if !self.has_inventory_zones() || zones.total_runout > zones.runout {
            return zones;
        }

        let first_at_or_after = |threshold: f64, strict: bool| {
            timestamps
                .iter()
                .copied()
                .filter(|t| t.is_finite() && (*t > threshold || (!strict && *t == threshold)))
                .min_by(f64::total_cmp)
        };

        let Some(anchor) = first_at_or_after(zones.runout, false) else {
            return zones;
        };
        let band_end = first_at_or_after(anchor, true).unwrap_or(anchor + 1.0);
        debug!(
            runout = zones.runout,
            band_end, "advancing empty total-inventory band to next data point"
        );
        zones.total_runout = band_end;
        zones.doi_goal = zones.doi_goal.max(band_end);
        zones
    }

    #[must_use]
    pub fn zone_of(&self, date: DateTime<Utc>) -> TimelineZone {
        self.raw_zone_boundaries()
            .classify(datetime_to_millis(date))
    }
}

/// Boundary timestamps (epoch milliseconds) used for per-point zone tagging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneBoundaries {
    pub today: f64,
    pub runout: f64,
    pub total_runout: f64,
    pub doi_goal: f64,
    /// Whether `[total_runout, doi_goal]` is tagged as forecast period.
    pub forecast_period: bool,
}

impl ZoneBoundaries {
    /// Builds boundaries, clamping each one so it never precedes the previous.
    #[must_use]
    pub fn ordered(today: f64, runout: f64, total_runout: f64, doi_goal: f64) -> Self {
        let runout = runout.max(today);
        let total_runout = total_runout.max(runout);
        let doi_goal = doi_goal.max(total_runout);
        Self {
            today,
            runout,
            total_runout,
            doi_goal,
            forecast_period: true,
        }
    }

    /// Collapsed boundaries: before `today` is historical, the rest is
    /// beyond the forecast.
    #[must_use]
    pub fn without_forecast(today: f64) -> Self {
        Self {
            forecast_period: false,
            ..Self::ordered(today, today, today, today)
        }
    }

    #[must_use]
    pub fn classify(&self, timestamp: f64) -> TimelineZone {
        if timestamp < self.today {
            TimelineZone::Historical
        } else if timestamp < self.runout {
            TimelineZone::FbaAvailable
        } else if timestamp < self.total_runout {
            TimelineZone::TotalInventory
        } else if self.forecast_period && timestamp <= self.doi_goal {
            TimelineZone::ForecastPeriod
        } else {
            TimelineZone::BeyondForecast
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PoolInputs {
    explicit_date: Option<DateTime<Utc>>,
    explicit_days: Option<f64>,
    units: f64,
    doi_days: Option<f64>,
}

/// Derives a [`Timeline`] from partial forecast, DOI and inventory inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineSegmenter {
    today: DateTime<Utc>,
    doi_goal_days: Option<f64>,
    weekly_forecast: Option<f64>,
}

impl TimelineSegmenter {
    /// `today` is used when the forecast parameters carry no current date.
    #[must_use]
    pub fn new(today: DateTime<Utc>) -> Self {
        Self {
            today,
            doi_goal_days: None,
            weekly_forecast: None,
        }
    }

    /// Overrides the DOI goal horizon with an already-resolved day count.
    #[must_use]
    pub fn with_doi_goal_days(mut self, days: Option<f64>) -> Self {
        self.doi_goal_days = days.filter(|d| d.is_finite() && *d >= 0.0);
        self
    }

    /// Weekly unit forecast used to derive runway from inventory velocity.
    #[must_use]
    pub fn with_weekly_forecast(mut self, weekly_units: Option<f64>) -> Self {
        self.weekly_forecast = positive(weekly_units);
        self
    }

    #[must_use]
    pub fn compute(
        &self,
        forecast: Option<&ForecastParameters>,
        doi: Option<&DoiSettings>,
        inventory: InventoryUnits,
    ) -> Timeline {
        let params = forecast.copied().unwrap_or_default();
        let current = params.current_date.unwrap_or(self.today);
        let daily_velocity = self.weekly_forecast.map(|weekly| weekly / DAYS_PER_WEEK);

        let (fba_days, fba_source) = resolve_pool_days(
            current,
            daily_velocity,
            PoolInputs {
                explicit_date: params.runout_date,
                explicit_days: params.fba_available_days,
                units: inventory.fba_units(),
                doi_days: doi.map(|settings| non_negative_or_zero(settings.amazon_doi_goal)),
            },
        );
        let (mut total_days, total_source) = resolve_pool_days(
            current,
            daily_velocity,
            PoolInputs {
                explicit_date: params.total_runout_date,
                explicit_days: params.total_days,
                units: inventory.total_units(),
                doi_days: doi.map(DoiSettings::total_required_doi),
            },
        );
        if total_days < fba_days {
            debug!(total_days, fba_days, "clamping total days up to fba days");
            total_days = fba_days;
        }

        let runout_date = params
            .runout_date
            .filter(|_| fba_source == BoundarySource::ExplicitDate)
            .unwrap_or_else(|| add_days(current, fba_days))
            .max(current);
        let total_runout_date = params
            .total_runout_date
            .filter(|_| total_source == BoundarySource::ExplicitDate)
            .unwrap_or_else(|| add_days(current, total_days))
            .max(runout_date);

        let doi_goal_date = match (self.doi_goal_days, params.doi_goal_date) {
            (Some(days), _) => add_days(current, days),
            (None, Some(date)) => date,
            (None, None) => add_days(
                current,
                doi.map(DoiSettings::total_required_doi).unwrap_or(0.0),
            ),
        };
        if doi_goal_date < total_runout_date {
            debug!(%doi_goal_date, %total_runout_date, "clamping doi goal date to total runout");
        }
        let doi_goal_date = doi_goal_date.max(total_runout_date);

        debug!(
            fba_days,
            total_days,
            ?fba_source,
            ?total_source,
            "computed runway timeline"
        );

        Timeline {
            current_date: current,
            fba_available_days: fba_days,
            total_days,
            forecast_units: params.units_to_make.map_or(0.0, non_negative_or_zero),
            forecast_adjustment: params
                .forecast_adjustment
                .filter(|v| v.is_finite())
                .unwrap_or(0.0),
            fba_units: inventory.fba_units(),
            additional_units: inventory.total_units() - inventory.fba_units(),
            boundaries: TimelineBoundaries {
                runout_date,
                total_runout_date,
                doi_goal_date,
            },
            fba_source,
            total_source,
        }
    }
}

fn resolve_pool_days(
    current: DateTime<Utc>,
    daily_velocity: Option<f64>,
    pool: PoolInputs,
) -> (f64, BoundarySource) {
    if let Some(date) = pool.explicit_date.filter(|date| *date > current) {
        return (days_between(current, date), BoundarySource::ExplicitDate);
    }
    if let Some(days) = positive(pool.explicit_days) {
        return (days, BoundarySource::ExplicitDays);
    }
    if let Some(days) = daily_velocity.and_then(|velocity| positive(Some(pool.units / velocity))) {
        return (days, BoundarySource::Velocity);
    }
    if let Some(days) = positive(pool.doi_days) {
        return (days, BoundarySource::DoiSettings);
    }
    (0.0, BoundarySource::Missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_boundaries_clamp_forward() {
        let zones = ZoneBoundaries::ordered(100.0, 50.0, 80.0, 10.0);
        assert_eq!(zones.runout, 100.0);
        assert_eq!(zones.total_runout, 100.0);
        assert_eq!(zones.doi_goal, 100.0);
    }

    #[test]
    fn collapsed_boundaries_have_no_forecast_period() {
        let zones = ZoneBoundaries::without_forecast(100.0);
        assert_eq!(zones.classify(99.0), TimelineZone::Historical);
        assert_eq!(zones.classify(100.0), TimelineZone::BeyondForecast);
    }

    #[test]
    fn velocity_level_requires_positive_units() {
        let current = DateTime::from_timestamp_millis(0).expect("epoch");
        let (days, source) = resolve_pool_days(
            current,
            Some(10.0),
            PoolInputs {
                explicit_date: None,
                explicit_days: None,
                units: 0.0,
                doi_days: Some(30.0),
            },
        );
        assert_eq!(days, 30.0);
        assert_eq!(source, BoundarySource::DoiSettings);
    }
}

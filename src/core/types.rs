use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_millis, non_negative_or_zero};

/// One week of sales or forecast data, keyed by the week's end date.
///
/// Historical points carry `units_sold*` fields, forecast points carry
/// `forecast_*` fields. `prior_year_smoothed` may appear on either.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPoint {
    pub week_end_date: DateTime<Utc>,
    #[serde(default)]
    pub units_sold: Option<f64>,
    #[serde(default)]
    pub units_sold_smoothed: Option<f64>,
    #[serde(default)]
    pub forecast_base: Option<f64>,
    #[serde(default)]
    pub forecast_adjusted: Option<f64>,
    #[serde(default)]
    pub prior_year_smoothed: Option<f64>,
    #[serde(default)]
    pub is_forecast: bool,
}

impl WeeklyPoint {
    #[must_use]
    pub fn historical(
        week_end_date: DateTime<Utc>,
        units_sold: f64,
        units_sold_smoothed: Option<f64>,
    ) -> Self {
        Self {
            week_end_date,
            units_sold: Some(units_sold),
            units_sold_smoothed,
            forecast_base: None,
            forecast_adjusted: None,
            prior_year_smoothed: None,
            is_forecast: false,
        }
    }

    #[must_use]
    pub fn forecast(week_end_date: DateTime<Utc>, forecast_adjusted: f64) -> Self {
        Self {
            week_end_date,
            units_sold: None,
            units_sold_smoothed: None,
            forecast_base: None,
            forecast_adjusted: Some(forecast_adjusted),
            prior_year_smoothed: None,
            is_forecast: true,
        }
    }

    #[must_use]
    pub fn with_forecast_base(mut self, forecast_base: f64) -> Self {
        self.forecast_base = Some(forecast_base);
        self
    }

    #[must_use]
    pub fn with_prior_year_smoothed(mut self, value: f64) -> Self {
        self.prior_year_smoothed = Some(value);
        self
    }

    #[must_use]
    pub fn timestamp(&self) -> f64 {
        datetime_to_millis(self.week_end_date)
    }

    /// Iterates every populated line-series magnitude on this point.
    pub fn line_values(&self) -> impl Iterator<Item = f64> + '_ {
        [
            self.units_sold,
            self.units_sold_smoothed,
            self.forecast_base,
            self.forecast_adjusted,
            self.prior_year_smoothed,
        ]
        .into_iter()
        .flatten()
        .filter(|value| value.is_finite())
    }
}

/// Canonical forecast inputs from the forecast provider.
///
/// Every field is optional; the timeline segmenter derives whatever is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastParameters {
    #[serde(default)]
    pub current_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub doi_goal_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fba_available_days: Option<f64>,
    #[serde(default)]
    pub total_days: Option<f64>,
    #[serde(default)]
    pub runout_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_runout_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub units_to_make: Option<f64>,
    /// Percentage applied on top of the base forecast (`10.0` means +10%).
    #[serde(default)]
    pub forecast_adjustment: Option<f64>,
}

/// Days-of-inventory targets configured by the seller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoiSettings {
    pub amazon_doi_goal: f64,
    pub inbound_lead_time: f64,
    pub manufacture_lead_time: f64,
}

impl Default for DoiSettings {
    fn default() -> Self {
        Self {
            amazon_doi_goal: 130.0,
            inbound_lead_time: 30.0,
            manufacture_lead_time: 7.0,
        }
    }
}

impl DoiSettings {
    #[must_use]
    pub fn new(amazon_doi_goal: f64, inbound_lead_time: f64, manufacture_lead_time: f64) -> Self {
        Self {
            amazon_doi_goal,
            inbound_lead_time,
            manufacture_lead_time,
        }
    }

    /// Sum of all three targets; malformed components count as zero.
    #[must_use]
    pub fn total_required_doi(&self) -> f64 {
        non_negative_or_zero(self.amazon_doi_goal)
            + non_negative_or_zero(self.inbound_lead_time)
            + non_negative_or_zero(self.manufacture_lead_time)
    }
}

/// Raw inventory totals per pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryUnits {
    pub fba: f64,
    pub awd: f64,
}

impl InventoryUnits {
    #[must_use]
    pub fn new(fba: f64, awd: f64) -> Self {
        Self { fba, awd }
    }

    #[must_use]
    pub fn fba_units(&self) -> f64 {
        non_negative_or_zero(self.fba)
    }

    #[must_use]
    pub fn total_units(&self) -> f64 {
        non_negative_or_zero(self.fba) + non_negative_or_zero(self.awd)
    }
}

/// Inventory phase a date falls into. Variants are declared in timeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimelineZone {
    Historical,
    FbaAvailable,
    TotalInventory,
    ForecastPeriod,
    BeyondForecast,
}

/// Merged series point as handed to the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    #[serde(flatten)]
    pub point: WeeklyPoint,
    pub zone: TimelineZone,
    pub fba_avail_bar: Option<f64>,
    pub total_inv_bar: Option<f64>,
    pub forecast_bar: Option<f64>,
}

impl ChartPoint {
    #[must_use]
    pub fn timestamp(&self) -> f64 {
        self.point.timestamp()
    }

    #[must_use]
    pub fn is_forecast(&self) -> bool {
        self.point.is_forecast
    }
}

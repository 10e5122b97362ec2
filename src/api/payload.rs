//! Normalization of forecast-provider payloads into canonical types.
//!
//! Providers disagree on field names (`doi_fba` vs `fba_days`), casing and
//! encodings (numbers as strings, dates with or without time). Everything is
//! mapped once here so the core only ever sees canonical shapes.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};
use tracing::warn;

use crate::core::{DoiSettings, ForecastParameters, WeeklyPoint};
use crate::error::{RunwayError, RunwayResult};

const CURRENT_DATE_KEYS: &[&str] = &["current_date", "currentDate", "today", "as_of"];
const DOI_GOAL_DATE_KEYS: &[&str] = &["doi_goal_date", "doiGoalDate"];
const FBA_DAYS_KEYS: &[&str] = &[
    "fba_available_days",
    "fbaAvailableDays",
    "doi_fba",
    "fba_days",
    "fbaDays",
];
const TOTAL_DAYS_KEYS: &[&str] = &["total_days", "totalDays", "doi_total", "total_doi"];
const RUNOUT_DATE_KEYS: &[&str] = &["runout_date", "runoutDate", "fba_runout_date"];
const TOTAL_RUNOUT_DATE_KEYS: &[&str] = &["total_runout_date", "totalRunoutDate"];
const UNITS_TO_MAKE_KEYS: &[&str] = &["units_to_make", "unitsToMake", "forecast_units", "to_make"];
const ADJUSTMENT_KEYS: &[&str] = &[
    "forecast_adjustment",
    "forecastAdjustment",
    "adjustment_percent",
];

const AMAZON_DOI_GOAL_KEYS: &[&str] = &["amazon_doi_goal", "amazonDoiGoal", "doi_goal"];
const INBOUND_LEAD_TIME_KEYS: &[&str] = &["inbound_lead_time", "inboundLeadTime"];
const MANUFACTURE_LEAD_TIME_KEYS: &[&str] = &[
    "manufacture_lead_time",
    "manufactureLeadTime",
    "mfg_lead_time",
];

const WEEK_END_KEYS: &[&str] = &["week_end_date", "weekEndDate", "week_end", "date"];
const UNITS_SOLD_KEYS: &[&str] = &["units_sold", "unitsSold", "units"];
const UNITS_SOLD_SMOOTHED_KEYS: &[&str] = &["units_sold_smoothed", "unitsSoldSmoothed", "smoothed"];
const FORECAST_BASE_KEYS: &[&str] = &["forecast_base", "forecastBase", "forecast"];
const FORECAST_ADJUSTED_KEYS: &[&str] = &[
    "forecast_adjusted",
    "forecastAdjusted",
    "adjusted_forecast",
];
const PRIOR_YEAR_KEYS: &[&str] = &["prior_year_smoothed", "priorYearSmoothed", "prior_year"];
const IS_FORECAST_KEYS: &[&str] = &["is_forecast", "isForecast"];

/// Parses raw JSON text into canonical forecast parameters.
pub fn parse_forecast_payload(input: &str) -> RunwayResult<ForecastParameters> {
    let value: Value = serde_json::from_str(input).map_err(|e| {
        RunwayError::InvalidData(format!("failed to parse forecast payload json: {e}"))
    })?;
    if !value.is_object() {
        return Err(RunwayError::InvalidData(
            "forecast payload must be a json object".to_owned(),
        ));
    }
    Ok(normalize_forecast_payload(&value))
}

/// Maps a provider forecast object onto [`ForecastParameters`].
///
/// Unknown or unparseable fields are dropped; non-objects yield defaults.
#[must_use]
pub fn normalize_forecast_payload(value: &Value) -> ForecastParameters {
    let Some(object) = value.as_object() else {
        warn!("forecast payload is not an object; using empty parameters");
        return ForecastParameters::default();
    };

    ForecastParameters {
        current_date: date_field(object, CURRENT_DATE_KEYS),
        doi_goal_date: date_field(object, DOI_GOAL_DATE_KEYS),
        fba_available_days: number_field(object, FBA_DAYS_KEYS),
        total_days: number_field(object, TOTAL_DAYS_KEYS),
        runout_date: date_field(object, RUNOUT_DATE_KEYS),
        total_runout_date: date_field(object, TOTAL_RUNOUT_DATE_KEYS),
        units_to_make: number_field(object, UNITS_TO_MAKE_KEYS),
        forecast_adjustment: number_field(object, ADJUSTMENT_KEYS),
    }
}

/// Maps a DOI settings object. Returns `None` when no DOI field is present;
/// individual missing components count as zero.
#[must_use]
pub fn normalize_doi_payload(value: &Value) -> Option<DoiSettings> {
    let object = value.as_object()?;
    let goal = number_field(object, AMAZON_DOI_GOAL_KEYS);
    let inbound = number_field(object, INBOUND_LEAD_TIME_KEYS);
    let manufacture = number_field(object, MANUFACTURE_LEAD_TIME_KEYS);
    if goal.is_none() && inbound.is_none() && manufacture.is_none() {
        return None;
    }
    Some(DoiSettings::new(
        goal.unwrap_or(0.0),
        inbound.unwrap_or(0.0),
        manufacture.unwrap_or(0.0),
    ))
}

/// Maps an array of weekly rows. Rows without a usable date are skipped.
///
/// `is_forecast` is the default flag for rows that do not state their own.
#[must_use]
pub fn normalize_weekly_points(value: &Value, is_forecast: bool) -> Vec<WeeklyPoint> {
    let Some(rows) = value.as_array() else {
        warn!("weekly series payload is not an array");
        return Vec::new();
    };

    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let Some(object) = row.as_object() else {
                warn!(index, "skipping non-object weekly row");
                return None;
            };
            let Some(week_end_date) = date_field(object, WEEK_END_KEYS) else {
                warn!(index, "skipping weekly row without a week end date");
                return None;
            };
            Some(WeeklyPoint {
                week_end_date,
                units_sold: number_field(object, UNITS_SOLD_KEYS),
                units_sold_smoothed: number_field(object, UNITS_SOLD_SMOOTHED_KEYS),
                forecast_base: number_field(object, FORECAST_BASE_KEYS),
                forecast_adjusted: number_field(object, FORECAST_ADJUSTED_KEYS),
                prior_year_smoothed: number_field(object, PRIOR_YEAR_KEYS),
                is_forecast: lookup(object, IS_FORECAST_KEYS)
                    .and_then(|(_, flag)| flag.as_bool())
                    .unwrap_or(is_forecast),
            })
        })
        .collect()
}

fn lookup<'a>(
    object: &'a Map<String, Value>,
    keys: &[&'static str],
) -> Option<(&'static str, &'a Value)> {
    keys.iter().find_map(|key| {
        object
            .get(*key)
            .filter(|value| !value.is_null())
            .map(|value| (*key, value))
    })
}

fn number_field(object: &Map<String, Value>, keys: &[&'static str]) -> Option<f64> {
    let (key, value) = lookup(object, keys)?;
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) if text.trim().is_empty() => return None,
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed.filter(|number| number.is_finite()) {
        Some(number) => Some(number),
        None => {
            warn!(field = key, value = %value, "ignoring non-numeric payload field");
            None
        }
    }
}

fn date_field(object: &Map<String, Value>, keys: &[&'static str]) -> Option<DateTime<Utc>> {
    let (key, value) = lookup(object, keys)?;
    let parsed = match value {
        Value::String(text) => parse_date_text(text.trim()),
        Value::Number(number) => number
            .as_i64()
            .and_then(DateTime::from_timestamp_millis),
        _ => None,
    };
    if parsed.is_none() {
        warn!(field = key, value = %value, "ignoring unparseable payload date");
    }
    parsed
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Some(time.with_timezone(&Utc));
    }
    // Date-only values and date-prefixed timestamps without an offset.
    let date_part = text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_timestamp_falls_back_to_date_prefix() {
        let parsed = parse_date_text("2024-03-05T10:00:00").expect("date prefix");
        assert_eq!(parsed.to_rfc3339(), "2024-03-05T00:00:00+00:00");
    }

    #[test]
    fn blank_string_is_treated_as_missing() {
        let value = serde_json::json!({ "doi_fba": "  " });
        assert_eq!(normalize_forecast_payload(&value).fba_available_days, None);
    }
}

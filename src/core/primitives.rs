use chrono::{DateTime, Duration, Utc};

pub const MILLIS_PER_DAY: f64 = 86_400_000.0;
pub const DAYS_PER_WEEK: f64 = 7.0;

#[must_use]
pub fn datetime_to_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

/// Converts a millisecond timestamp back to a UTC datetime.
///
/// Returns `None` for non-finite input or values outside chrono's range.
#[must_use]
pub fn millis_to_datetime(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis.round() as i64)
}

/// Shifts `time` by a possibly fractional number of days.
///
/// Non-finite day counts are treated as zero and overflow saturates to `time`.
#[must_use]
pub fn add_days(time: DateTime<Utc>, days: f64) -> DateTime<Utc> {
    if !days.is_finite() || days == 0.0 {
        return time;
    }
    let millis = (days * MILLIS_PER_DAY).round();
    if millis.abs() >= i64::MAX as f64 {
        return time;
    }
    time.checked_add_signed(Duration::milliseconds(millis as i64))
        .unwrap_or(time)
}

#[must_use]
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_DAY
}

/// Coerces NaN, infinities and negatives to zero.
#[must_use]
pub fn non_negative_or_zero(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Keeps only finite, strictly positive values.
#[must_use]
pub fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

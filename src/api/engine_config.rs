use serde::{Deserialize, Serialize};

use crate::core::axis_ticks::DEFAULT_TICK_COUNT;
use crate::core::bar_plan::MIN_SEGMENT_PERCENT;
use crate::core::MergeOptions;
use crate::error::{RunwayError, RunwayResult};
use crate::interaction::ViewportConfig;

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can persist chart setup next to their own settings.
/// Every field falls back to its default when absent from the JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunwayEngineConfig {
    /// Selected viewing window; the forecast tail is capped at half of it.
    pub view_window_weeks: usize,
    pub bar_overshoot_ratio: f64,
    pub axis_tick_count: usize,
    pub min_segment_percent: f64,
    pub double_click_window_ms: f64,
    pub double_click_neighbor_points: usize,
}

impl Default for RunwayEngineConfig {
    fn default() -> Self {
        let viewport = ViewportConfig::default();
        let merge = MergeOptions::default();
        Self {
            view_window_weeks: merge.view_window_weeks,
            bar_overshoot_ratio: merge.bar_overshoot_ratio,
            axis_tick_count: DEFAULT_TICK_COUNT,
            min_segment_percent: MIN_SEGMENT_PERCENT,
            double_click_window_ms: viewport.double_click_window_ms,
            double_click_neighbor_points: viewport.double_click_neighbor_points,
        }
    }
}

impl RunwayEngineConfig {
    #[must_use]
    pub fn with_view_window_weeks(mut self, weeks: usize) -> Self {
        self.view_window_weeks = weeks;
        self
    }

    #[must_use]
    pub fn with_axis_tick_count(mut self, count: usize) -> Self {
        self.axis_tick_count = count;
        self
    }

    pub fn validate(self) -> RunwayResult<Self> {
        if self.view_window_weeks == 0 {
            return Err(RunwayError::InvalidConfig(
                "view window must span at least one week".to_owned(),
            ));
        }
        if !self.bar_overshoot_ratio.is_finite() || self.bar_overshoot_ratio < 1.0 {
            return Err(RunwayError::InvalidConfig(
                "bar overshoot ratio must be finite and >= 1".to_owned(),
            ));
        }
        if self.axis_tick_count < 2 {
            return Err(RunwayError::InvalidConfig(
                "axis tick count must be >= 2".to_owned(),
            ));
        }
        if !self.min_segment_percent.is_finite()
            || !(0.0..=100.0 / 3.0).contains(&self.min_segment_percent)
        {
            return Err(RunwayError::InvalidConfig(
                "min segment percent must be within [0, 33.3]".to_owned(),
            ));
        }
        if !self.double_click_window_ms.is_finite() || self.double_click_window_ms < 0.0 {
            return Err(RunwayError::InvalidConfig(
                "double click window must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> RunwayResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()
    }

    pub fn to_json_string(&self) -> RunwayResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            view_window_weeks: self.view_window_weeks,
            bar_overshoot_ratio: self.bar_overshoot_ratio,
        }
    }

    #[must_use]
    pub fn viewport_config(&self) -> ViewportConfig {
        ViewportConfig {
            double_click_window_ms: self.double_click_window_ms,
            double_click_neighbor_points: self.double_click_neighbor_points,
        }
    }
}

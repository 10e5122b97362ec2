mod defaults;
mod engine_config;
mod frame_builder;
mod interaction_controller;
mod observer_registry;
mod payload;

pub use defaults::{
    FORECAST_DEFAULTS_KEY, ForecastDefaults, ForecastDefaultsStore, KeyValueDefaultsStore,
};
pub use engine_config::RunwayEngineConfig;
pub use payload::{
    normalize_doi_payload, normalize_forecast_payload, normalize_weekly_points,
    parse_forecast_payload,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    DoiSettings, ForecastParameters, InventoryUnits, MergedSeries, Timeline, TimelineSegmenter,
    WeeklyPoint, merge,
};
use crate::error::RunwayResult;
use crate::extensions::ViewportObserver;
use crate::interaction::ChartViewport;
use crate::render::RenderSurface;

/// Already-fetched data for one product's forecasting view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastInputs {
    /// Fallback "today" when the forecast parameters carry no current date.
    pub today: DateTime<Utc>,
    #[serde(default)]
    pub historical: Vec<WeeklyPoint>,
    #[serde(default)]
    pub forecast_series: Vec<WeeklyPoint>,
    #[serde(default)]
    pub forecast: Option<ForecastParameters>,
    #[serde(default)]
    pub doi: Option<DoiSettings>,
    #[serde(default)]
    pub inventory: InventoryUnits,
    /// Free-text product size, e.g. `"8oz"` or `"1 Gallon"`.
    #[serde(default)]
    pub size_descriptor: String,
    /// Pre-resolved DOI goal horizon from a production-planning context.
    #[serde(default)]
    pub doi_goal_days: Option<f64>,
    #[serde(default)]
    pub weekly_forecast: Option<f64>,
}

impl ForecastInputs {
    #[must_use]
    pub fn new(today: DateTime<Utc>) -> Self {
        Self {
            today,
            historical: Vec::new(),
            forecast_series: Vec::new(),
            forecast: None,
            doi: None,
            inventory: InventoryUnits::default(),
            size_descriptor: String::new(),
            doi_goal_days: None,
            weekly_forecast: None,
        }
    }

    #[must_use]
    pub fn with_series(mut self, historical: Vec<WeeklyPoint>, forecast: Vec<WeeklyPoint>) -> Self {
        self.historical = historical;
        self.forecast_series = forecast;
        self
    }

    #[must_use]
    pub fn with_forecast(mut self, forecast: ForecastParameters) -> Self {
        self.forecast = Some(forecast);
        self
    }

    #[must_use]
    pub fn with_doi(mut self, doi: DoiSettings) -> Self {
        self.doi = Some(doi);
        self
    }

    #[must_use]
    pub fn with_inventory(mut self, inventory: InventoryUnits) -> Self {
        self.inventory = inventory;
        self
    }

    #[must_use]
    pub fn with_size_descriptor(mut self, size: impl Into<String>) -> Self {
        self.size_descriptor = size.into();
        self
    }

    #[must_use]
    pub fn with_doi_goal_days(mut self, days: f64) -> Self {
        self.doi_goal_days = Some(days);
        self
    }

    #[must_use]
    pub fn with_weekly_forecast(mut self, weekly_units: f64) -> Self {
        self.weekly_forecast = Some(weekly_units);
        self
    }

    /// Explicit weekly forecast, else the first projected week's value.
    #[must_use]
    pub fn resolved_weekly_forecast(&self) -> Option<f64> {
        self.weekly_forecast.or_else(|| {
            self.forecast_series
                .iter()
                .min_by_key(|point| point.week_end_date)
                .and_then(|point| point.forecast_adjusted.or(point.forecast_base))
        })
    }
}

/// Forecasting-view engine: recomputes the runway whenever inputs change and
/// owns the chart viewport.
pub struct RunwayEngine<S: RenderSurface> {
    surface: S,
    config: RunwayEngineConfig,
    inputs: ForecastInputs,
    timeline: Timeline,
    merged: MergedSeries,
    viewport: ChartViewport,
    observers: Vec<Box<dyn ViewportObserver>>,
}

impl<S: RenderSurface> RunwayEngine<S> {
    pub fn new(surface: S, config: RunwayEngineConfig, inputs: ForecastInputs) -> RunwayResult<Self> {
        let config = config.validate()?;
        let timeline = Timeline::empty(inputs.today);
        let merged = merge(&[], &[], &timeline, config.merge_options());
        let mut engine = Self {
            surface,
            config,
            inputs,
            timeline,
            merged,
            viewport: ChartViewport::new(config.viewport_config()),
            observers: Vec::new(),
        };
        engine.recompute();
        Ok(engine)
    }

    #[must_use]
    pub fn config(&self) -> RunwayEngineConfig {
        self.config
    }

    pub fn set_config(&mut self, config: RunwayEngineConfig) -> RunwayResult<()> {
        self.config = config.validate()?;
        self.viewport.set_config(self.config.viewport_config());
        self.recompute();
        Ok(())
    }

    #[must_use]
    pub fn inputs(&self) -> &ForecastInputs {
        &self.inputs
    }

    pub fn set_inputs(&mut self, inputs: ForecastInputs) {
        self.inputs = inputs;
        self.recompute();
    }

    pub fn set_doi_settings(&mut self, doi: Option<DoiSettings>) {
        self.inputs.doi = doi;
        self.recompute();
    }

    pub fn set_forecast_parameters(&mut self, forecast: Option<ForecastParameters>) {
        self.inputs.forecast = forecast;
        self.recompute();
    }

    pub fn set_view_window_weeks(&mut self, weeks: usize) -> RunwayResult<()> {
        self.set_config(self.config.with_view_window_weeks(weeks))
    }

    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    #[must_use]
    pub fn merged_series(&self) -> &MergedSeries {
        &self.merged
    }

    #[must_use]
    pub fn viewport(&self) -> &ChartViewport {
        &self.viewport
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Rebuilds timeline and merged series from current inputs.
    ///
    /// Points are always rebuilt from scratch; nothing is patched in place.
    fn recompute(&mut self) {
        let segmenter = TimelineSegmenter::new(self.inputs.today)
            .with_doi_goal_days(self.inputs.doi_goal_days)
            .with_weekly_forecast(self.inputs.resolved_weekly_forecast());
        self.timeline = segmenter.compute(
            self.inputs.forecast.as_ref(),
            self.inputs.doi.as_ref(),
            self.inputs.inventory,
        );
        self.merged = merge(
            &self.inputs.historical,
            &self.inputs.forecast_series,
            &self.timeline,
            self.config.merge_options(),
        );
        self.viewport.set_point_times(&self.merged.timestamps());
        debug!(
            points = self.merged.points.len(),
            fba_days = self.timeline.fba_available_days,
            total_days = self.timeline.total_days,
            "recomputed forecast view"
        );
    }
}

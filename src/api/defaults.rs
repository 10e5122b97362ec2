//! "Save as default" forecast settings.
//!
//! The store is always injected; the engine never reaches for global state.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::DoiSettings;
use crate::error::{RunwayError, RunwayResult};
use crate::render::RenderSurface;

use super::RunwayEngine;

/// Key the defaults blob is stored under in string-keyed stores.
pub const FORECAST_DEFAULTS_KEY: &str = "forecast_defaults";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastDefaults {
    pub doi: DoiSettings,
    #[serde(default)]
    pub forecast_adjustment: f64,
    #[serde(default)]
    pub view_window_weeks: Option<usize>,
}

impl Default for ForecastDefaults {
    fn default() -> Self {
        Self {
            doi: DoiSettings::default(),
            forecast_adjustment: 0.0,
            view_window_weeks: None,
        }
    }
}

pub trait ForecastDefaultsStore {
    /// Returns `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> RunwayResult<Option<ForecastDefaults>>;
    fn save(&mut self, defaults: &ForecastDefaults) -> RunwayResult<()>;
}

/// String key/value store holding defaults as JSON, the shape browser
/// local storage offers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyValueDefaultsStore {
    entries: IndexMap<String, String>,
}

impl KeyValueDefaultsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ForecastDefaultsStore for KeyValueDefaultsStore {
    fn load(&self) -> RunwayResult<Option<ForecastDefaults>> {
        let Some(raw) = self.get_raw(FORECAST_DEFAULTS_KEY) else {
            return Ok(None);
        };
        let defaults = serde_json::from_str(raw).map_err(|e| {
            RunwayError::InvalidData(format!("failed to parse stored forecast defaults: {e}"))
        })?;
        Ok(Some(defaults))
    }

    fn save(&mut self, defaults: &ForecastDefaults) -> RunwayResult<()> {
        let raw = serde_json::to_string(defaults)?;
        debug!(bytes = raw.len(), "saving forecast defaults");
        self.set_raw(FORECAST_DEFAULTS_KEY, raw);
        Ok(())
    }
}

impl<S: RenderSurface> RunwayEngine<S> {
    /// Applies stored defaults to the current inputs. Returns `false` when the
    /// store is empty.
    pub fn apply_defaults(&mut self, store: &dyn ForecastDefaultsStore) -> RunwayResult<bool> {
        let Some(defaults) = store.load()? else {
            return Ok(false);
        };
        if let Some(weeks) = defaults.view_window_weeks {
            self.config = self.config.with_view_window_weeks(weeks).validate()?;
        }
        self.inputs.doi = Some(defaults.doi);
        let mut forecast = self.inputs.forecast.unwrap_or_default();
        forecast.forecast_adjustment = Some(defaults.forecast_adjustment);
        self.inputs.forecast = Some(forecast);
        self.recompute();
        Ok(true)
    }

    /// Persists the current DOI settings, adjustment and window as defaults.
    pub fn save_defaults(
        &self,
        store: &mut dyn ForecastDefaultsStore,
    ) -> RunwayResult<ForecastDefaults> {
        let defaults = ForecastDefaults {
            doi: self.inputs.doi.unwrap_or_default(),
            forecast_adjustment: self.timeline.forecast_adjustment,
            view_window_weeks: Some(self.config.view_window_weeks),
        };
        store.save(&defaults)?;
        Ok(defaults)
    }
}

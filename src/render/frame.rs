use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{
    BarWidths, ChartPoint, RangeSum, SelectionRange, Timeline, ValueRange, ZoneBoundaries,
};
use crate::error::{RunwayError, RunwayResult};
use crate::interaction::ZoomDomain;

pub const CHART_FRAME_JSON_SCHEMA_V1: u32 = 1;

/// Everything the rendering surface needs for one draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub points: Vec<ChartPoint>,
    pub visible_points: Vec<ChartPoint>,
    pub zoom_domain: ZoomDomain,
    pub visible_start: Option<DateTime<Utc>>,
    pub visible_end: Option<DateTime<Utc>>,
    pub value_range: ValueRange,
    pub y_ticks: Vec<f64>,
    pub bar_widths: BarWidths,
    pub zones: ZoneBoundaries,
    pub timeline: Timeline,
    /// Units to make, rounded up to the product's case size.
    pub units_to_make: f64,
    pub selection: Option<SelectionRange>,
    pub zoom_box: Option<SelectionRange>,
    pub range_sum: Option<RangeSum>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrameJsonContractV1 {
    pub schema_version: u32,
    pub frame: ChartFrame,
}

impl ChartFrame {
    /// Checks the invariants a surface relies on before drawing.
    pub fn validate(&self) -> RunwayResult<()> {
        if self
            .y_ticks
            .windows(2)
            .any(|pair| pair[0].partial_cmp(&pair[1]) != Some(std::cmp::Ordering::Less))
        {
            return Err(RunwayError::InvalidData(
                "y ticks must be strictly ascending".to_owned(),
            ));
        }
        if !self.bar_widths.is_empty() && (self.bar_widths.sum() - 100.0).abs() > 0.01 {
            return Err(RunwayError::InvalidData(format!(
                "bar widths must sum to 100, got {}",
                self.bar_widths.sum()
            )));
        }
        if self
            .points
            .windows(2)
            .any(|pair| pair[1].zone < pair[0].zone && pair[0].is_forecast() == pair[1].is_forecast())
        {
            return Err(RunwayError::InvalidData(
                "zones must not go backwards within a series group".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn to_json_contract_v1_pretty(&self) -> RunwayResult<String> {
        let payload = ChartFrameJsonContractV1 {
            schema_version: CHART_FRAME_JSON_SCHEMA_V1,
            frame: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            RunwayError::InvalidData(format!("failed to serialize chart frame contract v1: {e}"))
        })
    }

    pub fn from_json_contract_str(input: &str) -> RunwayResult<Self> {
        let payload: ChartFrameJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            RunwayError::InvalidData(format!("failed to parse chart frame json payload: {e}"))
        })?;
        if payload.schema_version != CHART_FRAME_JSON_SCHEMA_V1 {
            return Err(RunwayError::InvalidData(format!(
                "unsupported chart frame schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.frame)
    }
}

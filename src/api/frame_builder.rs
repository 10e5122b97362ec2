use crate::core::primitives::millis_to_datetime;
use crate::core::{
    BarWidths, ChartPoint, RangeSum, normalize, plan_ticks, plan_widths_with_floor,
    points_in_time_window,
};
use crate::error::RunwayResult;
use crate::render::{ChartFrame, RenderSurface};

use super::RunwayEngine;

impl<S: RenderSurface> RunwayEngine<S> {
    #[must_use]
    pub fn points(&self) -> &[ChartPoint] {
        &self.merged.points
    }

    /// Points inside the current zoom domain (all points when unzoomed).
    #[must_use]
    pub fn visible_points(&self) -> Vec<ChartPoint> {
        match self.viewport.visible_range() {
            Some((start, end)) if !self.viewport.domain().is_full() => {
                points_in_time_window(&self.merged.points, start, end)
            }
            _ => self.merged.points.clone(),
        }
    }

    /// Y ticks planned over line values only, never the shading bars.
    #[must_use]
    pub fn y_ticks(&self) -> Vec<f64> {
        let range = self.merged.value_range;
        plan_ticks(range.min, range.max, self.config.axis_tick_count)
    }

    #[must_use]
    pub fn bar_widths(&self) -> BarWidths {
        plan_widths_with_floor(
            self.timeline.fba_units,
            self.timeline.additional_units,
            self.units_to_make(),
            self.config.min_segment_percent,
        )
    }

    /// Units to make rounded up to the product's case increment.
    #[must_use]
    pub fn units_to_make(&self) -> f64 {
        normalize(self.timeline.forecast_units, &self.inputs.size_descriptor)
    }

    #[must_use]
    pub fn range_sum(&self) -> Option<RangeSum> {
        self.viewport.range_sum(&self.merged.points)
    }

    #[must_use]
    pub fn frame(&self) -> ChartFrame {
        let visible = self.viewport.visible_range();
        ChartFrame {
            points: self.merged.points.clone(),
            visible_points: self.visible_points(),
            zoom_domain: self.viewport.domain(),
            visible_start: visible.and_then(|(start, _)| millis_to_datetime(start)),
            visible_end: visible.and_then(|(_, end)| millis_to_datetime(end)),
            value_range: self.merged.value_range,
            y_ticks: self.y_ticks(),
            bar_widths: self.bar_widths(),
            zones: self.merged.zones,
            timeline: self.timeline,
            units_to_make: self.units_to_make(),
            selection: self.viewport.selection(),
            zoom_box: self.viewport.zoom_box(),
            range_sum: self.range_sum(),
        }
    }

    /// Builds the current frame and hands it to the surface.
    pub fn render(&mut self) -> RunwayResult<()> {
        let frame = self.frame();
        self.surface.render(&frame)
    }
}

mod frame;
mod null_surface;

pub use frame::{CHART_FRAME_JSON_SCHEMA_V1, ChartFrame, ChartFrameJsonContractV1};
pub use null_surface::NullSurface;

use crate::error::RunwayResult;

/// Contract implemented by whatever draws the chart.
///
/// Surfaces receive a fully computed `ChartFrame`, keeping drawing code
/// isolated from timeline and interaction logic.
pub trait RenderSurface {
    fn render(&mut self, frame: &ChartFrame) -> RunwayResult<()>;
}

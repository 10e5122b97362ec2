pub mod axis_ticks;
pub mod bar_plan;
pub mod primitives;
pub mod quantity;
pub mod scale;
pub mod series_merge;
pub mod timeline;
pub mod types;
pub mod windowing;

pub use axis_ticks::{DEFAULT_TICK_COUNT, plan_ticks};
pub use bar_plan::{BarWidths, plan_widths, plan_widths_with_floor};
pub use quantity::{case_increment, normalize};
pub use scale::{PlotGeometry, TimeProjection};
pub use series_merge::{MergeOptions, MergedSeries, ValueRange, merge};
pub use timeline::{Timeline, TimelineBoundaries, TimelineSegmenter, ZoneBoundaries};
pub use types::{
    ChartPoint, DoiSettings, ForecastParameters, InventoryUnits, TimelineZone, WeeklyPoint,
};
pub use windowing::{RangeSum, SelectionRange, points_in_time_window, range_sum};

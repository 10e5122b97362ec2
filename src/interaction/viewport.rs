use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{ChartPoint, PlotGeometry, RangeSum, SelectionRange, TimeProjection, range_sum};

use super::{DeferredTask, InteractionMode, ViewportEvent, ZoomDomain, ZoomHistory};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Two presses on the same point within this window count as a double click.
    pub double_click_window_ms: f64,
    /// Points kept on each side of a double-clicked point.
    pub double_click_neighbor_points: usize,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            double_click_window_ms: 300.0,
            double_click_neighbor_points: 4,
        }
    }
}

/// A pointer press as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    pub client_x: f64,
    /// Host event time, used only for double-click detection.
    pub event_time_ms: f64,
}

impl PointerInput {
    #[must_use]
    pub fn new(client_x: f64, event_time_ms: f64) -> Self {
        Self {
            client_x,
            event_time_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    id: u64,
    anchor: f64,
    current: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ClickRecord {
    point_index: usize,
    input: PointerInput,
    /// Already used as the second press of a double click.
    consumed: bool,
}

/// Owns the zoom domain, its history and the active selection.
///
/// All mutation goes through pointer handlers or [`ChartViewport::reset_zoom`];
/// state changes are buffered as [`ViewportEvent`]s for the host to drain.
#[derive(Debug, Clone, Default)]
pub struct ChartViewport {
    config: ViewportConfig,
    point_times: Vec<f64>,
    domain: ZoomDomain,
    history: ZoomHistory,
    mode: InteractionMode,
    zoom_modifier_held: bool,
    drag: Option<DragState>,
    next_drag_id: u64,
    selection: Option<SelectionRange>,
    last_click: Option<ClickRecord>,
    deferred: VecDeque<DeferredTask>,
    events: Vec<ViewportEvent>,
}

impl ChartViewport {
    #[must_use]
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> ViewportConfig {
        self.config
    }

    pub fn set_config(&mut self, config: ViewportConfig) {
        self.config = config;
    }

    /// Replaces the timestamps of the plotted series.
    ///
    /// The zoom domain and history survive data refreshes.
    pub fn set_point_times(&mut self, timestamps: &[f64]) {
        self.point_times = timestamps
            .iter()
            .copied()
            .filter(|t| t.is_finite())
            .collect();
        self.point_times.sort_by(f64::total_cmp);
        self.last_click = None;
    }

    #[must_use]
    pub fn data_range(&self) -> Option<(f64, f64)> {
        Some((*self.point_times.first()?, *self.point_times.last()?))
    }

    #[must_use]
    pub fn domain(&self) -> ZoomDomain {
        self.domain
    }

    #[must_use]
    pub fn history(&self) -> &ZoomHistory {
        &self.history
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn selection(&self) -> Option<SelectionRange> {
        self.selection
    }

    /// Live zoom box while a modifier drag is in progress.
    #[must_use]
    pub fn zoom_box(&self) -> Option<SelectionRange> {
        match (self.mode, self.drag) {
            (InteractionMode::ZoomDragging, Some(drag)) => {
                Some(SelectionRange::new(drag.anchor, drag.current))
            }
            _ => None,
        }
    }

    /// Currently visible `(start, end)`: the zoom domain with missing edges
    /// filled from the data range.
    #[must_use]
    pub fn visible_range(&self) -> Option<(f64, f64)> {
        match self.data_range() {
            Some((min_t, max_t)) => Some(self.domain.resolve(min_t, max_t)),
            None => Some((self.domain.left?, self.domain.right?)),
        }
    }

    #[must_use]
    pub fn projection(&self) -> Option<TimeProjection> {
        let (start, end) = self.visible_range()?;
        TimeProjection::new(start, end).ok()
    }

    /// Maps a client x coordinate to a timestamp in the visible domain,
    /// clamped to the data range.
    #[must_use]
    pub fn pixel_to_timestamp(&self, client_x: f64, geometry: PlotGeometry) -> Option<f64> {
        let (min_t, max_t) = self.data_range()?;
        let timestamp = self
            .projection()?
            .pixel_to_timestamp(client_x, geometry)
            .ok()?;
        Some(timestamp.clamp(min_t, max_t))
    }

    /// Forward projection matching [`ChartViewport::pixel_to_timestamp`].
    #[must_use]
    pub fn timestamp_to_pixel(&self, timestamp: f64, geometry: PlotGeometry) -> Option<f64> {
        self.projection()?
            .timestamp_to_pixel(timestamp, geometry)
            .ok()
    }

    pub fn set_zoom_modifier(&mut self, held: bool) {
        self.zoom_modifier_held = held;
    }

    #[must_use]
    pub fn zoom_modifier_held(&self) -> bool {
        self.zoom_modifier_held
    }

    /// Starts a drag, or zooms when this press completes a double click.
    ///
    /// A press identical to the previous one (same position and event time)
    /// is a duplicate delivery and is ignored. A press arriving while a drag
    /// is still open resolves that drag first.
    pub fn pointer_down(&mut self, input: PointerInput, geometry: PlotGeometry) {
        if self.last_click.is_some_and(|click| click.input == input) {
            trace!(client_x = input.client_x, "ignoring duplicate pointer down");
            return;
        }
        let Some(timestamp) = self.pixel_to_timestamp(input.client_x, geometry) else {
            return;
        };

        if self.mode != InteractionMode::Idle {
            debug!(mode = ?self.mode, "resolving open drag before new press");
            self.finish_drag();
        }
        if self.try_double_click_zoom(timestamp, input) {
            return;
        }

        self.next_drag_id += 1;
        self.drag = Some(DragState {
            id: self.next_drag_id,
            anchor: timestamp,
            current: timestamp,
        });
        if self.zoom_modifier_held {
            self.mode = InteractionMode::ZoomDragging;
        } else {
            self.mode = InteractionMode::RangeSelecting;
            self.update_selection(Some(SelectionRange::new(timestamp, timestamp)));
        }
        trace!(mode = ?self.mode, timestamp, "drag started");
    }

    /// Updates the live end of an in-progress drag. Ignored while idle.
    pub fn pointer_move(&mut self, client_x: f64, geometry: PlotGeometry) {
        if self.mode == InteractionMode::Idle {
            return;
        }
        let Some(timestamp) = self.pixel_to_timestamp(client_x, geometry) else {
            return;
        };
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        drag.current = timestamp;
        let range = SelectionRange::new(drag.anchor, drag.current);
        if self.mode == InteractionMode::RangeSelecting {
            self.update_selection(Some(range));
        }
    }

    /// Finishes a drag released over the chart.
    pub fn pointer_up(&mut self, client_x: f64, geometry: PlotGeometry) {
        self.pointer_move(client_x, geometry);
        self.finish_drag();
    }

    /// Handles a release anywhere in the window.
    ///
    /// Resolution is queued and applied by [`ChartViewport::run_deferred`] so
    /// it never nests inside another transition.
    pub fn global_pointer_up(&mut self) {
        let Some(drag) = self.drag else {
            return;
        };
        if self.mode == InteractionMode::Idle {
            return;
        }
        let task = DeferredTask::ResolveDrag { drag_id: drag.id };
        if !self.deferred.contains(&task) {
            self.deferred.push_back(task);
        }
    }

    #[must_use]
    pub fn has_deferred_tasks(&self) -> bool {
        !self.deferred.is_empty()
    }

    /// Applies tasks queued before this call. Returns how many ran.
    pub fn run_deferred(&mut self) -> usize {
        let queued = std::mem::take(&mut self.deferred);
        let count = queued.len();
        for task in queued {
            match task {
                DeferredTask::ResolveDrag { drag_id } => {
                    let still_active = self.drag.is_some_and(|drag| drag.id == drag_id);
                    if still_active && self.mode != InteractionMode::Idle {
                        self.finish_drag();
                    }
                }
            }
        }
        count
    }

    /// Pops one zoom level, or returns to the full view when history is empty.
    pub fn reset_zoom(&mut self) {
        let previous = self.history.pop().unwrap_or_else(ZoomDomain::full);
        debug!(?previous, remaining = self.history.len(), "zoom reset");
        self.domain = previous;
        self.events.push(ViewportEvent::ZoomReset);
        self.events.push(ViewportEvent::ZoomChanged(previous));
    }

    /// Pushes the current domain onto the history and commits `domain`.
    /// Zooming to the domain already shown is a no-op.
    pub fn zoom_to(&mut self, domain: ZoomDomain) {
        if domain == self.domain {
            trace!(?domain, "zoom target equals current domain");
            return;
        }
        self.history.push(self.domain);
        self.domain = domain;
        debug!(?domain, depth = self.history.len(), "zoom committed");
        self.events.push(ViewportEvent::ZoomChanged(domain));
    }

    pub fn clear_selection(&mut self) {
        self.update_selection(None);
    }

    #[must_use]
    pub fn range_sum(&self, series: &[ChartPoint]) -> Option<RangeSum> {
        range_sum(self.selection, series)
    }

    /// Takes buffered events in the order they occurred.
    pub fn drain_events(&mut self) -> Vec<ViewportEvent> {
        std::mem::take(&mut self.events)
    }

    fn finish_drag(&mut self) {
        let drag = self.drag.take();
        let mode = std::mem::replace(&mut self.mode, InteractionMode::Idle);
        if mode != InteractionMode::ZoomDragging {
            return;
        }
        let Some(drag) = drag else {
            return;
        };
        let range = SelectionRange::new(drag.anchor, drag.current);
        let (start, end) = range.bounds();
        if end > start {
            self.zoom_to(ZoomDomain::between(start, end));
        } else {
            trace!(start, end, "ignoring degenerate zoom box");
        }
    }

    fn try_double_click_zoom(&mut self, timestamp: f64, input: PointerInput) -> bool {
        let Some(point_index) = self.nearest_point_index(timestamp) else {
            return false;
        };
        let previous = self.last_click.replace(ClickRecord {
            point_index,
            input,
            consumed: false,
        });
        let Some(previous) = previous else {
            return false;
        };
        let elapsed = input.event_time_ms - previous.input.event_time_ms;
        if previous.consumed
            || previous.point_index != point_index
            || !(elapsed > 0.0 && elapsed <= self.config.double_click_window_ms)
        {
            return false;
        }

        self.last_click = Some(ClickRecord {
            point_index,
            input,
            consumed: true,
        });
        let neighbors = self.config.double_click_neighbor_points;
        let first = point_index.saturating_sub(neighbors);
        let last = point_index
            .saturating_add(neighbors)
            .min(self.point_times.len() - 1);
        let (left, right) = (self.point_times[first], self.point_times[last]);

        self.update_selection(None);
        if right > left {
            self.zoom_to(ZoomDomain::between(left, right));
        }
        true
    }

    fn nearest_point_index(&self, timestamp: f64) -> Option<usize> {
        if self.point_times.is_empty() {
            return None;
        }
        let upper = self.point_times.partition_point(|t| *t < timestamp);
        if upper == 0 {
            return Some(0);
        }
        if upper == self.point_times.len() {
            return Some(upper - 1);
        }
        let below = timestamp - self.point_times[upper - 1];
        let above = self.point_times[upper] - timestamp;
        Some(if below <= above { upper - 1 } else { upper })
    }

    fn update_selection(&mut self, selection: Option<SelectionRange>) {
        if self.selection == selection {
            return;
        }
        self.selection = selection;
        self.events.push(ViewportEvent::SelectionChanged(selection));
    }
}

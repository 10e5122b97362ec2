//! Pointer-driven viewport state: zoom domain, zoom history and range selection.

mod viewport;
mod zoom;

use serde::{Deserialize, Serialize};

use crate::core::SelectionRange;

pub use viewport::{ChartViewport, PointerInput, ViewportConfig};
pub use zoom::{MAX_ZOOM_HISTORY_DEPTH, ZoomDomain, ZoomHistory};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    /// Plain drag; the live selection feeds range sums.
    RangeSelecting,
    /// Modifier-held drag; the live box becomes the next zoom domain.
    ZoomDragging,
}

/// State changes the viewport reports back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ViewportEvent {
    ZoomChanged(ZoomDomain),
    SelectionChanged(Option<SelectionRange>),
    ZoomReset,
}

/// Work queued from inside an event handler and applied on the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredTask {
    /// Resolve the drag started by the pointer-down with this sequence number.
    ResolveDrag { drag_id: u64 },
}

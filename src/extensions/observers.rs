use serde::{Deserialize, Serialize};

use crate::core::SelectionRange;
use crate::interaction::{InteractionMode, ZoomDomain};

/// Read-only state snapshot passed to observer hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverContext {
    pub visible_range: Option<(f64, f64)>,
    pub zoom_history_depth: usize,
    pub interaction_mode: InteractionMode,
    pub points_len: usize,
}

/// Hooks the host registers to follow viewport changes.
///
/// Observers see events after the viewport has applied them and cannot
/// mutate the viewport.
pub trait ViewportObserver {
    fn id(&self) -> &str;

    fn on_zoom_changed(&mut self, _domain: ZoomDomain, _context: ObserverContext) {}

    fn on_selection_changed(
        &mut self,
        _selection: Option<SelectionRange>,
        _context: ObserverContext,
    ) {
    }

    fn on_reset_zoom(&mut self, _context: ObserverContext) {}
}

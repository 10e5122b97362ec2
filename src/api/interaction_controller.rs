use crate::core::PlotGeometry;
use crate::extensions::ObserverContext;
use crate::interaction::{InteractionMode, PointerInput, ViewportEvent};
use crate::render::RenderSurface;

use super::RunwayEngine;

impl<S: RenderSurface> RunwayEngine<S> {
    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.viewport.mode()
    }

    pub fn set_zoom_modifier(&mut self, held: bool) {
        self.viewport.set_zoom_modifier(held);
    }

    #[must_use]
    pub fn pixel_to_timestamp(&self, client_x: f64, geometry: PlotGeometry) -> Option<f64> {
        self.viewport.pixel_to_timestamp(client_x, geometry)
    }

    #[must_use]
    pub fn timestamp_to_pixel(&self, timestamp: f64, geometry: PlotGeometry) -> Option<f64> {
        self.viewport.timestamp_to_pixel(timestamp, geometry)
    }

    pub fn pointer_down(&mut self, input: PointerInput, geometry: PlotGeometry) {
        self.viewport.pointer_down(input, geometry);
        self.dispatch_viewport_events();
    }

    pub fn pointer_move(&mut self, client_x: f64, geometry: PlotGeometry) {
        self.viewport.pointer_move(client_x, geometry);
        self.dispatch_viewport_events();
    }

    pub fn pointer_up(&mut self, client_x: f64, geometry: PlotGeometry) {
        self.viewport.pointer_up(client_x, geometry);
        self.dispatch_viewport_events();
    }

    /// Window-level release; resolved on the next [`RunwayEngine::tick`].
    pub fn global_pointer_up(&mut self) {
        self.viewport.global_pointer_up();
    }

    /// Runs work deferred from earlier event handlers. Returns the task count.
    pub fn tick(&mut self) -> usize {
        let ran = self.viewport.run_deferred();
        self.dispatch_viewport_events();
        ran
    }

    pub fn reset_zoom(&mut self) {
        self.viewport.reset_zoom();
        self.dispatch_viewport_events();
    }

    pub fn clear_selection(&mut self) {
        self.viewport.clear_selection();
        self.dispatch_viewport_events();
    }

    fn observer_context(&self) -> ObserverContext {
        ObserverContext {
            visible_range: self.viewport.visible_range(),
            zoom_history_depth: self.viewport.history().len(),
            interaction_mode: self.viewport.mode(),
            points_len: self.merged.points.len(),
        }
    }

    fn dispatch_viewport_events(&mut self) {
        let events = self.viewport.drain_events();
        if events.is_empty() {
            return;
        }
        let context = self.observer_context();
        for event in events {
            for observer in &mut self.observers {
                match event {
                    ViewportEvent::ZoomChanged(domain) => observer.on_zoom_changed(domain, context),
                    ViewportEvent::SelectionChanged(selection) => {
                        observer.on_selection_changed(selection, context);
                    }
                    ViewportEvent::ZoomReset => observer.on_reset_zoom(context),
                }
            }
        }
    }
}

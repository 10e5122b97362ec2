use crate::error::RunwayResult;
use crate::render::{ChartFrame, RenderSurface};

/// No-op surface used by tests and headless engine usage.
///
/// It still validates frames so tests catch broken invariants before a real
/// surface is attached.
#[derive(Debug, Default)]
pub struct NullSurface {
    pub frames_rendered: usize,
    pub last_point_count: usize,
    pub last_visible_count: usize,
}

impl RenderSurface for NullSurface {
    fn render(&mut self, frame: &ChartFrame) -> RunwayResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_point_count = frame.points.len();
        self.last_visible_count = frame.visible_points.len();
        Ok(())
    }
}

//! inventory-runway: inventory timeline and forecast chart engine.
//!
//! Turns weekly sales/forecast series and days-of-inventory settings into a
//! zoned runway timeline, chart-ready points, axis ticks, progress-bar widths
//! and case-rounded production quantities. All computation is synchronous and
//! performs no I/O; data fetching and drawing belong to the host.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{RunwayEngine, RunwayEngineConfig};
pub use error::{RunwayError, RunwayResult};

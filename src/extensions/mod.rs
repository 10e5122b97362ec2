//! Host-facing extension points.

pub mod observers;

pub use observers::{ObserverContext, ViewportObserver};

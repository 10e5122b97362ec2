use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::millis_to_datetime;

/// Visible time bounds in epoch milliseconds. `None` means "data edge".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoomDomain {
    pub left: Option<f64>,
    pub right: Option<f64>,
}

impl ZoomDomain {
    /// The unzoomed view covering the full data range.
    #[must_use]
    pub fn full() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn between(left: f64, right: f64) -> Self {
        Self {
            left: Some(left.min(right)),
            right: Some(left.max(right)),
        }
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Resolves missing edges against the data range.
    #[must_use]
    pub fn resolve(&self, data_min: f64, data_max: f64) -> (f64, f64) {
        (
            self.left.unwrap_or(data_min),
            self.right.unwrap_or(data_max),
        )
    }

    #[must_use]
    pub fn as_dates(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        (
            self.left.and_then(millis_to_datetime),
            self.right.and_then(millis_to_datetime),
        )
    }
}

/// Deepest zoom history kept; older levels are dropped first.
pub const MAX_ZOOM_HISTORY_DEPTH: usize = 64;

/// LIFO stack of domains visited before each zoom.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoomHistory {
    entries: Vec<ZoomDomain>,
}

impl ZoomHistory {
    pub fn push(&mut self, domain: ZoomDomain) {
        if self.entries.len() >= MAX_ZOOM_HISTORY_DEPTH {
            self.entries.remove(0);
        }
        self.entries.push(domain);
    }

    pub fn pop(&mut self) -> Option<ZoomDomain> {
        self.entries.pop()
    }

    #[must_use]
    pub fn peek(&self) -> Option<&ZoomDomain> {
        self.entries.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

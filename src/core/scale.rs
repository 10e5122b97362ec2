use serde::{Deserialize, Serialize};

use crate::error::{RunwayError, RunwayResult};

/// Horizontal placement of the plotted area in client pixels.
///
/// Supplied by the rendering surface every frame; the engine never measures
/// anything itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotGeometry {
    pub left_px: f64,
    pub width_px: f64,
}

impl PlotGeometry {
    #[must_use]
    pub fn new(left_px: f64, width_px: f64) -> Self {
        Self { left_px, width_px }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.left_px.is_finite() && self.width_px.is_finite() && self.width_px > 0.0
    }

    #[must_use]
    pub fn right_px(self) -> f64 {
        self.left_px + self.width_px
    }

    fn validated(self) -> RunwayResult<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(RunwayError::InvalidGeometry {
                width: self.width_px,
            })
        }
    }
}

/// Linear mapping between a visible time domain (epoch ms) and client pixels.
///
/// `timestamp_to_pixel` and `pixel_to_timestamp` are exact inverses for any
/// non-degenerate domain. A zero-width domain maps everything to the left edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeProjection {
    domain_start: f64,
    domain_end: f64,
}

impl TimeProjection {
    pub fn new(domain_start: f64, domain_end: f64) -> RunwayResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() {
            return Err(RunwayError::InvalidData(
                "time domain must be finite".to_owned(),
            ));
        }
        let (domain_start, domain_end) = if domain_start <= domain_end {
            (domain_start, domain_end)
        } else {
            (domain_end, domain_start)
        };

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.domain_end - self.domain_start
    }

    pub fn timestamp_to_pixel(self, timestamp: f64, geometry: PlotGeometry) -> RunwayResult<f64> {
        let geometry = geometry.validated()?;
        if !timestamp.is_finite() {
            return Err(RunwayError::InvalidData(
                "timestamp must be finite".to_owned(),
            ));
        }

        let span = self.span();
        if span == 0.0 {
            return Ok(geometry.left_px);
        }
        let normalized = (timestamp - self.domain_start) / span;
        Ok(geometry.left_px + normalized * geometry.width_px)
    }

    pub fn pixel_to_timestamp(self, client_x: f64, geometry: PlotGeometry) -> RunwayResult<f64> {
        let geometry = geometry.validated()?;
        if !client_x.is_finite() {
            return Err(RunwayError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = (client_x - geometry.left_px) / geometry.width_px;
        Ok(self.domain_start + normalized * self.span())
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The parameters of a single render.

use crate::errors::RenderError;
use crate::planes::PlaneBounds;

/// Default image width, in pixels.
pub const DEFAULT_WIDTH: usize = 1000;
/// Default image height, in pixels.
pub const DEFAULT_HEIGHT: usize = 1000;
/// Default per-pixel iteration budget.
pub const DEFAULT_ITERATIONS: usize = 100;
/// Default power of the recurrence; 2 is the classical set.
pub const DEFAULT_EXPONENT: u32 = 2;
/// Default escape radius.
pub const DEFAULT_RADIUS: f64 = 2.0;

/// Everything the engine needs to know to render one image.  A request
/// is plain data; the engine reads it and never keeps it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderRequest {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Maximum number of recurrence steps per pixel.
    pub iterations: usize,
    /// The power in z <- z^exponent + c.
    pub exponent: u32,
    /// The region of the complex plane covered by the image.
    pub bounds: PlaneBounds,
    /// Points whose iterate grows past this magnitude have escaped.
    pub escape_radius: f64,
}

impl Default for RenderRequest {
    fn default() -> Self {
        RenderRequest {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            iterations: DEFAULT_ITERATIONS,
            exponent: DEFAULT_EXPONENT,
            bounds: PlaneBounds::default(),
            escape_radius: DEFAULT_RADIUS,
        }
    }
}

impl RenderRequest {
    /// Rejects requests the engine can't render.  Called before any
    /// storage is allocated.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidRequest(format!(
                "image size {}x{} must be positive in both dimensions",
                self.width, self.height
            )));
        }
        if self.iterations == 0 {
            return Err(RenderError::InvalidRequest(
                "the iteration count must be at least 1".to_string(),
            ));
        }
        if !self.escape_radius.is_finite() || self.escape_radius <= 0.0 {
            return Err(RenderError::InvalidRequest(format!(
                "escape radius {} must be a positive number",
                self.escape_radius
            )));
        }
        // The engine compares squared magnitudes.
        if !(self.escape_radius * self.escape_radius).is_finite() {
            return Err(RenderError::InvalidRequest(format!(
                "escape radius {} is too large to square",
                self.escape_radius
            )));
        }
        self.bounds.validate()
    }
}

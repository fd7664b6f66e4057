// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane bounded by xmin..xmax on the
//! real axis and ymin..ymax on the imaginary axis.
//!
//! Both axes grow with the pixel index: column 0 sits on xmin and row
//! 0 sits on ymin.  Rendered images therefore show the plane mirrored
//! top-to-bottom compared to the usual mathematical orientation, which
//! changes nothing about which points belong to the set.
use num::Complex;

use crate::errors::RenderError;

/// The rectangle of the complex plane that gets mapped onto the image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaneBounds {
    /// Smallest real part.
    pub xmin: f64,
    /// Largest real part.
    pub xmax: f64,
    /// Smallest imaginary part.
    pub ymin: f64,
    /// Largest imaginary part.
    pub ymax: f64,
}

impl PlaneBounds {
    /// Shorthand constructor, in xmin, xmax, ymin, ymax order.
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        PlaneBounds {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    /// Checks that the rectangle is finite and has positive extent on
    /// both axes.
    pub fn validate(&self) -> Result<(), RenderError> {
        let all = [self.xmin, self.xmax, self.ymin, self.ymax];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(RenderError::InvalidRequest(
                "The plane bounds must be finite numbers.".to_string(),
            ));
        }
        if self.xmax <= self.xmin {
            return Err(RenderError::InvalidRequest(
                "xmin is not to the left of xmax.".to_string(),
            ));
        }
        if self.ymax <= self.ymin {
            return Err(RenderError::InvalidRequest(
                "ymin is not below ymax.".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PlaneBounds {
    fn default() -> Self {
        PlaneBounds::new(-2.0, 2.0, -2.0, 2.0)
    }
}

/// Describes the column, row of a point in a region.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels on an integral plane of width x height onto the complex
/// plane described by a PlaneBounds.
#[derive(Debug)]
pub struct PlaneMapper {
    width: usize,
    height: usize,
    origin: Complex<f64>,
    // The width and height on the complex plane covered by one pixel.
    scale: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the integral plane and the
    /// rectangle of the complex plane it stands for.
    pub fn new(
        width: usize,
        height: usize,
        bounds: &PlaneBounds,
    ) -> Result<PlaneMapper, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidRequest(
                "The integral plane must be at least one pixel wide and high.".to_string(),
            ));
        }
        bounds.validate()?;

        Ok(PlaneMapper {
            width,
            height,
            origin: Complex::new(bounds.xmin, bounds.ymin),
            scale: (
                (bounds.xmax - bounds.xmin) / (width as f64),
                (bounds.ymax - bounds.ymin) / (height as f64),
            ),
        })
    }

    /// The total number of points in the integral grid.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Never true for a mapper that was successfully built.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The real coordinate of a column.
    #[inline]
    pub fn column_to_re(&self, column: usize) -> f64 {
        self.origin.re + (column as f64) * self.scale.0
    }

    /// The imaginary coordinate of a row.
    #[inline]
    pub fn row_to_im(&self, row: usize) -> f64 {
        self.origin.im + (row as f64) * self.scale.1
    }

    /// Given a pixel on the integral cartesian plane, map that to the
    /// point at its corner on the complex cartesian plane.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(self.column_to_re(pixel.0), self.row_to_im(pixel.1))
    }
}

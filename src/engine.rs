// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time engine.  Every pixel stands for a point c on the
//! complex plane; the orbit starts at z = c (not at the origin) and is
//! pushed through z <- z^exponent + c until it either leaves the
//! escape radius or runs out of iterations.  Points that never leave
//! are painted with the interior color; everything else keeps the
//! buffer's initial black.

use std::sync::Mutex;

use num::Complex;

use crate::complex::step;
use crate::errors::RenderError;
use crate::pixels::{PixelBuffer, Rgb, RowBand};
use crate::planes::{Pixel, PlaneMapper};
use crate::request::RenderRequest;

/// The color of every pixel whose point never escapes.
pub const INTERIOR: Rgb = Rgb {
    red: 0,
    green: 0,
    blue: 255,
};

// Each worker pulls bands of roughly this many per thread off the
// queue, so a slow band near the set doesn't leave the others idle.
const BANDS_PER_THREAD: usize = 4;

/// True if the orbit of `c`, seeded at `c` itself, leaves the circle
/// of squared radius `radius_sqr` within `iterations` steps.  The seed
/// is not tested, only the iterates, and a point sitting exactly on
/// the circle has not escaped.  An orbit that overflows into NaN has
/// escaped.
#[inline]
pub fn escapes(c: Complex<f64>, iterations: usize, exponent: u32, radius_sqr: f64) -> bool {
    let mut z = c;
    for _ in 0..iterations {
        z = step(z, c, exponent);
        let magnitude = z.norm_sqr();
        if magnitude > radius_sqr || magnitude.is_nan() {
            return true;
        }
    }
    false
}

// The per-render state shared, read-only, by every worker.
struct Job<'a> {
    plane: &'a PlaneMapper,
    iterations: usize,
    exponent: u32,
    radius_sqr: f64,
}

impl<'a> Job<'a> {
    fn interior(&self, pixel: &Pixel) -> bool {
        let c = self.plane.pixel_to_point(pixel);
        !escapes(c, self.iterations, self.exponent, self.radius_sqr)
    }

    fn fill_band(&self, band: &mut RowBand) -> Result<(), RenderError> {
        for row in band.rows() {
            for col in 0..band.width() {
                if self.interior(&Pixel(col, row)) {
                    band.set_pixel(row, col, INTERIOR)?;
                }
            }
        }
        Ok(())
    }
}

/// Renders RenderRequests into PixelBuffers, optionally spreading the
/// rows over several threads.  The output doesn't depend on the thread
/// count.
#[derive(Copy, Clone, Debug)]
pub struct EscapeTimeEngine {
    threads: usize,
}

impl Default for EscapeTimeEngine {
    fn default() -> Self {
        EscapeTimeEngine { threads: 1 }
    }
}

impl EscapeTimeEngine {
    /// An engine that renders on `threads` threads.  Zero is treated
    /// as one.
    pub fn new(threads: usize) -> Self {
        EscapeTimeEngine {
            threads: threads.max(1),
        }
    }

    /// The number of worker threads used per render.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Validates the request, allocates the buffer, and fills it in.
    /// Either the whole image comes back or an error does.
    pub fn render(&self, request: &RenderRequest) -> Result<PixelBuffer, RenderError> {
        request.validate()?;
        let plane = PlaneMapper::new(request.width, request.height, &request.bounds)?;
        let mut buffer = PixelBuffer::new(request.width, request.height)?;
        let job = Job {
            plane: &plane,
            iterations: request.iterations,
            exponent: request.exponent,
            radius_sqr: request.escape_radius * request.escape_radius,
        };

        debug!(
            "rendering {}x{}, {} iterations, exponent {}, on {} thread(s)",
            request.width, request.height, request.iterations, request.exponent, self.threads
        );

        if self.threads == 1 {
            self.render_single(&job, &mut buffer)?;
        } else {
            self.render_threaded(&job, &mut buffer)?;
        }
        Ok(buffer)
    }

    fn render_single(&self, job: &Job, buffer: &mut PixelBuffer) -> Result<(), RenderError> {
        for row in 0..buffer.height() {
            for col in 0..buffer.width() {
                if job.interior(&Pixel(col, row)) {
                    buffer.set_pixel(row, col, INTERIOR)?;
                }
            }
        }
        Ok(())
    }

    fn render_threaded(&self, job: &Job, buffer: &mut PixelBuffer) -> Result<(), RenderError> {
        let rows = (buffer.height() / (self.threads * BANDS_PER_THREAD)).max(1);
        let bands = Mutex::new(buffer.bands_mut(rows).into_iter());
        let bands = &bands;

        let outcomes = crossbeam::scope(|spawner| {
            let handles: Vec<_> = (0..self.threads)
                .map(|worker| {
                    spawner.spawn(move |_| -> Result<(), RenderError> {
                        loop {
                            let band = bands
                                .lock()
                                .map_err(|_| RenderError::WorkerPanicked)?
                                .next();
                            match band {
                                Some(mut band) => {
                                    trace!("worker {} takes rows {:?}", worker, band.rows());
                                    job.fill_band(&mut band)?;
                                }
                                None => return Ok(()),
                            }
                        }
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join()).collect::<Vec<_>>()
        })
        .map_err(|_| RenderError::WorkerPanicked)?;

        for outcome in outcomes {
            outcome.map_err(|_| RenderError::WorkerPanicked)??;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planes::PlaneBounds;

    fn small(width: usize, height: usize, iterations: usize) -> RenderRequest {
        RenderRequest {
            width,
            height,
            iterations,
            ..Default::default()
        }
    }

    fn interior_count(buffer: &PixelBuffer) -> usize {
        buffer.pixels().iter().filter(|p| **p == INTERIOR).count()
    }

    #[test]
    fn origin_never_escapes_the_classical_set() {
        for iterations in 1..50 {
            assert!(!escapes(Complex::new(0.0, 0.0), iterations, 2, 4.0));
        }
    }

    #[test]
    fn orbit_is_seeded_at_the_point() {
        // From z = 0 the first iterate of 1.5 would be 1.5, which is
        // inside; from z = c it is 3.75, which is not.
        assert!(escapes(Complex::new(1.5, 0.0), 1, 2, 4.0));
    }

    #[test]
    fn landing_on_the_radius_is_not_escaping() {
        // -2 maps to 2 and stays there; |2|^2 == 4 is not > 4.
        assert!(!escapes(Complex::new(-2.0, 0.0), 100, 2, 4.0));
        assert!(escapes(Complex::new(-2.0, 0.0), 1, 2, 3.99));
    }

    #[test]
    fn overflowing_orbits_escape() {
        // (1e160 + 1e160i)^2 is NaN + inf*i.
        assert!(escapes(Complex::new(1e160, 1e160), 10, 2, 4.0));
        assert!(escapes(Complex::new(-1e200, 0.0), 10, 3, 4.0));
    }

    #[test]
    fn far_away_planes_render_empty() {
        let request = RenderRequest {
            bounds: PlaneBounds::new(1e160, 2e160, 1e160, 2e160),
            ..small(2, 2, 10)
        };
        let buffer = EscapeTimeEngine::default().render(&request).unwrap();
        assert_eq!(interior_count(&buffer), 0);

        let request = RenderRequest {
            bounds: PlaneBounds::new(1e100, 2e100, 1e100, 2e100),
            escape_radius: 1e150,
            ..small(8, 8, 10)
        };
        let buffer = EscapeTimeEngine::new(2).render(&request).unwrap();
        assert_eq!(interior_count(&buffer), 0);
    }

    #[test]
    fn four_by_four_scenario() {
        let engine = EscapeTimeEngine::default();
        let buffer = engine.render(&small(4, 4, 10)).unwrap();
        assert_eq!((buffer.width(), buffer.height(), buffer.len()), (4, 4, 16));

        // Column 2, row 2 sits on the origin.
        let (row, col) = (2, 2);
        let plane = PlaneMapper::new(4, 4, &PlaneBounds::default()).unwrap();
        assert_eq!(plane.pixel_to_point(&Pixel(col, row)), Complex::new(0.0, 0.0));
        assert_eq!(buffer.get_pixel(row, col).unwrap(), INTERIOR);
        // -1 and -i, the neighbours toward the origin's lower corner.
        assert_eq!(buffer.get_pixel(row, col - 1).unwrap(), INTERIOR);
        assert_eq!(buffer.get_pixel(row - 1, col).unwrap(), INTERIOR);

        for &(row, col) in &[(0, 0), (0, 3), (3, 0), (3, 3)] {
            assert_eq!(buffer.get_pixel(row, col).unwrap(), Rgb::BLACK);
        }
    }

    #[test]
    fn every_pixel_is_addressable() {
        let engine = EscapeTimeEngine::default();
        for &(w, h) in &[(1, 1), (7, 3), (3, 7), (16, 9)] {
            let buffer = engine.render(&small(w, h, 5)).unwrap();
            assert_eq!(buffer.len(), w * h);
            for row in 0..h {
                for col in 0..w {
                    assert!(buffer.get_pixel(row, col).is_ok());
                }
            }
        }
    }

    #[test]
    fn only_two_colors_are_painted() {
        let buffer = EscapeTimeEngine::default().render(&small(32, 32, 30)).unwrap();
        assert!(buffer
            .pixels()
            .iter()
            .all(|p| *p == INTERIOR || *p == Rgb::BLACK));
        assert!(interior_count(&buffer) > 0);
        assert!(interior_count(&buffer) < buffer.len());
    }

    #[test]
    fn exponent_zero_paints_the_disc_around_minus_one() {
        let request = RenderRequest {
            width: 40,
            height: 40,
            iterations: 10,
            exponent: 0,
            ..Default::default()
        };
        let buffer = EscapeTimeEngine::default().render(&request).unwrap();
        let plane = PlaneMapper::new(40, 40, &request.bounds).unwrap();
        for row in 0..40 {
            for col in 0..40 {
                let c = plane.pixel_to_point(&Pixel(col, row));
                let inside = (c + 1.0).norm_sqr() <= 4.0;
                let expected = if inside { INTERIOR } else { Rgb::BLACK };
                assert_eq!(buffer.get_pixel(row, col).unwrap(), expected);
            }
        }
    }

    #[test]
    fn larger_radius_never_loses_interior_pixels() {
        let engine = EscapeTimeEngine::default();
        let mut last = 0;
        for &radius in &[0.5, 1.0, 2.0, 3.0, 10.0] {
            let request = RenderRequest {
                escape_radius: radius,
                ..small(48, 48, 25)
            };
            let count = interior_count(&engine.render(&request).unwrap());
            assert!(count >= last, "radius {} lost pixels", radius);
            last = count;
        }
    }

    #[test]
    fn thread_count_does_not_change_the_image() {
        let request = RenderRequest {
            exponent: 3,
            bounds: PlaneBounds::new(-1.5, 1.5, -1.25, 1.0),
            ..small(37, 23, 40)
        };
        let reference = EscapeTimeEngine::new(1).render(&request).unwrap();
        for threads in 2..6 {
            let image = EscapeTimeEngine::new(threads).render(&request).unwrap();
            assert_eq!(reference.diff(&image), 0, "{} threads", threads);
        }
    }

    #[test]
    fn more_threads_than_rows() {
        let single = EscapeTimeEngine::new(1).render(&small(5, 2, 20)).unwrap();
        let many = EscapeTimeEngine::new(8).render(&small(5, 2, 20)).unwrap();
        assert_eq!(single, many);
    }

    #[test]
    fn invalid_requests_are_rejected() {
        let engine = EscapeTimeEngine::new(0);
        assert_eq!(engine.threads(), 1);
        match engine.render(&small(0, 4, 10)) {
            Err(RenderError::InvalidRequest(_)) => (),
            other => panic!("expected an invalid request, got {:?}", other),
        }
        let inverted = RenderRequest {
            bounds: PlaneBounds::new(-2.0, 2.0, 2.0, -2.0),
            ..small(4, 4, 10)
        };
        assert!(engine.render(&inverted).is_err());
    }
}

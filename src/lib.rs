#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set, and its higher-power relatives, are drawn by
//! taking each point c on a rectangle of the complex plane and
//! repeatedly feeding it through z <- z^e + c.  Points whose orbit
//! stays within an escape radius for the whole iteration budget
//! belong to the set and are painted; points whose orbit runs off are
//! left black.
//!
//! This variant seeds the orbit at the point itself (z = c) rather
//! than at the origin, and paints in two colors only.  The pieces are:
//!
//! * `PixelBuffer`, a fixed-size row-major grid of RGB pixels that
//!   can be compared against another grid;
//! * `EscapeTimeEngine`, which turns a `RenderRequest` into a
//!   `PixelBuffer`, on one thread or several;
//! * `codec`, which moves buffers in and out of PNG files.

extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate tempfile;

pub mod cli;
pub mod codec;
pub mod compare;
pub mod complex;
pub mod engine;
pub mod errors;
pub mod pixels;
pub mod planes;
pub mod request;

pub use compare::Comparison;
pub use engine::{EscapeTimeEngine, INTERIOR};
pub use errors::RenderError;
pub use pixels::{PixelBuffer, Rgb};
pub use planes::PlaneBounds;
pub use request::RenderRequest;

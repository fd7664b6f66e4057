// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong between a render request and a file
//! on disk.  Nothing here is retried; every variant is handed back to
//! the immediate caller.

use failure::Fail;
use std::io;

/// The error type for rendering, buffer access, and the codec.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// Storage for the pixel buffer could not be obtained.  Fatal for
    /// the render that asked for it.
    #[fail(display = "could not allocate storage for {} pixels", pixels)]
    Allocation {
        /// The number of pixels requested.
        pixels: usize,
    },

    /// A coordinate outside of the buffer.  A correct engine never
    /// produces one of these.
    #[fail(
        display = "pixel ({}, {}) is outside of a {}x{} buffer",
        row, col, width, height
    )]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Width of the buffer.
        width: usize,
        /// Height of the buffer.
        height: usize,
    },

    /// The render parameters were rejected before any allocation.
    #[fail(display = "invalid render request: {}", _0)]
    InvalidRequest(String),

    /// The image could not be encoded or decoded.
    #[fail(display = "codec error: {}", _0)]
    Codec(String),

    /// Reading or writing an image file failed.
    #[fail(display = "i/o error: {}", _0)]
    Io(#[cause] io::Error),

    /// A render worker died before finishing its share of the image.
    #[fail(display = "a render worker thread panicked")]
    WorkerPanicked,
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        RenderError::Io(err)
    }
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => RenderError::Io(e),
            e => RenderError::Codec(e.to_string()),
        }
    }
}

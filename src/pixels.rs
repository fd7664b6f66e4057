// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PixelBuffer, a fixed-size grid of RGB triples.  The
//! grid is stored row-major: the pixel at (row, col) lives at offset
//! `row * width + col`, so walking the storage front to back visits
//! the image top-to-bottom, left-to-right, which is the order the PNG
//! codec wants its bytes in.

use itertools::iproduct;

use crate::errors::RenderError;

/// One pixel, eight bits per channel, no alpha.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

impl Rgb {
    /// The color every buffer starts out as.
    pub const BLACK: Rgb = Rgb {
        red: 0,
        green: 0,
        blue: 0,
    };

    /// Builds a triple from its three channels.
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Rgb { red, green, blue }
    }
}

/// A width x height grid of pixels.  The dimensions are fixed when the
/// buffer is created; there is no resize.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    /// Allocates a black buffer.  Fails with `Allocation` when
    /// width * height overflows or the storage can't be reserved; no
    /// partial buffer is ever handed back.
    pub fn new(width: usize, height: usize) -> Result<Self, RenderError> {
        let len = width
            .checked_mul(height)
            .ok_or(RenderError::Allocation { pixels: usize::MAX })?;
        let mut pixels: Vec<Rgb> = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| RenderError::Allocation { pixels: len })?;
        pixels.resize(len, Rgb::BLACK);
        Ok(PixelBuffer {
            width,
            height,
            pixels,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of pixels, always width * height.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    fn offset(&self, row: usize, col: usize) -> Result<usize, RenderError> {
        if row >= self.height || col >= self.width {
            return Err(RenderError::OutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            });
        }
        Ok(row * self.width + col)
    }

    /// Overwrites the pixel at (row, col).
    pub fn set_pixel(&mut self, row: usize, col: usize, color: Rgb) -> Result<(), RenderError> {
        let offset = self.offset(row, col)?;
        self.pixels[offset] = color;
        Ok(())
    }

    /// Reads the pixel at (row, col).
    pub fn get_pixel(&self, row: usize, col: usize) -> Result<Rgb, RenderError> {
        let offset = self.offset(row, col)?;
        Ok(self.pixels[offset])
    }

    /// The pixels in storage order.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Flattens the buffer into consecutive R, G, B bytes, one row after
    /// another, top row first.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for p in &self.pixels {
            bytes.extend_from_slice(&[p.red, p.green, p.blue]);
        }
        bytes
    }

    /// The inverse of `to_rgb_bytes`.  The byte count has to match the
    /// dimensions exactly.
    pub fn from_rgb_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, RenderError> {
        let mut buffer = PixelBuffer::new(width, height)?;
        if bytes.len() != buffer.len() * 3 {
            return Err(RenderError::Codec(format!(
                "expected {} bytes of RGB data for a {}x{} image, found {}",
                buffer.len() * 3,
                width,
                height,
                bytes.len()
            )));
        }
        for (pixel, chunk) in buffer.pixels.iter_mut().zip(bytes.chunks(3)) {
            *pixel = Rgb::new(chunk[0], chunk[1], chunk[2]);
        }
        Ok(buffer)
    }

    /// Splits the buffer into disjoint bands of at most `rows` rows each,
    /// top to bottom.  Each band can be handed to a different thread.
    pub fn bands_mut(&mut self, rows: usize) -> Vec<RowBand> {
        let width = self.width;
        let rows = rows.max(1);
        if width == 0 {
            return vec![];
        }
        self.pixels
            .chunks_mut(width * rows)
            .enumerate()
            .map(|(i, pixels)| RowBand {
                first_row: i * rows,
                width,
                pixels,
            })
            .collect()
    }

    /// Counts the positions in the overlapping region whose colors
    /// differ, plus the absolute difference of the two pixel counts.
    /// A size mismatch is charged once, not once per missing pixel.
    pub fn diff(&self, other: &PixelBuffer) -> usize {
        let width = self.width.min(other.width);
        let height = self.height.min(other.height);
        let size_penalty = if self.len() > other.len() {
            self.len() - other.len()
        } else {
            other.len() - self.len()
        };
        let differing = iproduct!(0..height, 0..width)
            .filter(|&(row, col)| {
                self.pixels[row * self.width + col] != other.pixels[row * other.width + col]
            })
            .count();
        size_penalty + differing
    }
}

/// A run of whole rows borrowed mutably out of a PixelBuffer.  Bands
/// from one `bands_mut` call never overlap.
#[derive(Debug)]
pub struct RowBand<'a> {
    first_row: usize,
    width: usize,
    pixels: &'a mut [Rgb],
}

impl<'a> RowBand<'a> {
    /// The buffer rows this band covers.
    pub fn rows(&self) -> std::ops::Range<usize> {
        self.first_row..self.first_row + self.pixels.len() / self.width
    }

    /// Number of columns, same as the parent buffer.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Same as `PixelBuffer::set_pixel`, but `row` is a buffer row and
    /// must fall inside this band.
    pub fn set_pixel(&mut self, row: usize, col: usize, color: Rgb) -> Result<(), RenderError> {
        let rows = self.rows();
        if !rows.contains(&row) || col >= self.width {
            return Err(RenderError::OutOfBounds {
                row,
                col,
                width: self.width,
                height: rows.end,
            });
        }
        self.pixels[(row - self.first_row) * self.width + col] = color;
        Ok(())
    }
}

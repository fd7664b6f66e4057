// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Moves PixelBuffers in and out of PNG files: eight bits per channel,
//! RGB, no alpha, top row first.

use std::convert::TryFrom;
use std::fs;
use std::io::Write;
use std::path::Path;

use image::png::PNGEncoder;
use image::ColorType;
use tempfile::NamedTempFile;

use crate::errors::RenderError;
use crate::pixels::PixelBuffer;

fn dimension(value: usize) -> Result<u32, RenderError> {
    u32::try_from(value)
        .map_err(|_| RenderError::Codec(format!("{} pixels is too large for a PNG", value)))
}

/// Encodes the buffer as a PNG image in memory.
pub fn encode(buffer: &PixelBuffer) -> Result<Vec<u8>, RenderError> {
    let width = dimension(buffer.width())?;
    let height = dimension(buffer.height())?;
    let mut bytes = Vec::new();
    PNGEncoder::new(&mut bytes)
        .encode(&buffer.to_rgb_bytes(), width, height, ColorType::RGB(8))
        .map_err(|e| RenderError::Codec(e.to_string()))?;
    Ok(bytes)
}

/// Decodes an image into a PixelBuffer.  Anything the image crate can
/// read is accepted and converted to 8-bit RGB; alpha is dropped.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, RenderError> {
    let image = image::load_from_memory(bytes)?.to_rgb();
    let (width, height) = (image.width() as usize, image.height() as usize);
    PixelBuffer::from_rgb_bytes(width, height, &image.into_raw())
}

/// Writes the buffer to `path` as a PNG.  The image is written to a
/// temporary file next to the destination and renamed into place, so
/// the destination either holds the whole image or is left alone.
pub fn save<P: AsRef<Path>>(buffer: &PixelBuffer, path: P) -> Result<(), RenderError> {
    let path = path.as_ref();
    let bytes = encode(buffer)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(&bytes)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| RenderError::Io(e.error))?;
    info!(
        "saved {}x{} image to {}",
        buffer.width(),
        buffer.height(),
        path.display()
    );
    Ok(())
}

/// Reads and decodes the image at `path`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<PixelBuffer, RenderError> {
    let path = path.as_ref();
    let buffer = decode(&fs::read(path)?)?;
    info!(
        "loaded {}x{} image from {}",
        buffer.width(),
        buffer.height(),
        path.display()
    );
    Ok(buffer)
}

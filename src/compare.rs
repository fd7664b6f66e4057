// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Side-by-side comparison of two images, as reported by `imgdiff`.

use std::fmt;

use crate::pixels::PixelBuffer;

/// The outcome of comparing a primary image against a secondary one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Comparison {
    /// `PixelBuffer::diff` of the two images.
    pub count: usize,
    /// The count relative to the primary image's pixel count.
    pub primary_ratio: f64,
    /// The count relative to the secondary image's pixel count.
    pub secondary_ratio: f64,
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        // An empty image only matches another empty image.
        if count == 0 {
            0.0
        } else {
            std::f64::INFINITY
        }
    } else {
        count as f64 / total as f64
    }
}

impl Comparison {
    /// Compares `primary` against `secondary`.
    pub fn new(primary: &PixelBuffer, secondary: &PixelBuffer) -> Self {
        let count = primary.diff(secondary);
        Comparison {
            count,
            primary_ratio: ratio(count, primary.len()),
            secondary_ratio: ratio(count, secondary.len()),
        }
    }

    /// True when the images are the same size and every pixel matches.
    pub fn is_identical(&self) -> bool {
        self.count == 0
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Difference")?;
        writeln!(f, "\tCount: {}", self.count)?;
        writeln!(f, "\tPrimary Ratio: {:.6}", self.primary_ratio)?;
        write!(f, "\tSecondary Ratio: {:.6}", self.secondary_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixels::Rgb;

    #[test]
    fn identical_images() {
        let a = PixelBuffer::new(4, 4).unwrap();
        let c = Comparison::new(&a, &a.clone());
        assert!(c.is_identical());
        assert_eq!(c.primary_ratio, 0.0);
        assert_eq!(c.secondary_ratio, 0.0);
    }

    #[test]
    fn ratios_are_relative_to_each_side() {
        let a = PixelBuffer::new(4, 4).unwrap();
        let mut b = PixelBuffer::new(4, 2).unwrap();
        b.set_pixel(0, 0, Rgb::new(1, 1, 1)).unwrap();
        let c = Comparison::new(&a, &b);
        assert_eq!(c.count, 9);
        assert_eq!(c.primary_ratio, 9.0 / 16.0);
        assert_eq!(c.secondary_ratio, 9.0 / 8.0);
        assert!(!c.is_identical());
        assert_eq!(Comparison::new(&b, &a).count, 9);
    }

    #[test]
    fn report_layout() {
        let a = PixelBuffer::new(2, 2).unwrap();
        let mut b = a.clone();
        b.set_pixel(1, 1, Rgb::new(0, 0, 255)).unwrap();
        assert_eq!(
            Comparison::new(&a, &b).to_string(),
            "Difference\n\tCount: 1\n\tPrimary Ratio: 0.250000\n\tSecondary Ratio: 0.250000"
        );
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integer powers of complex numbers, and the single step of the
//! escape-time recurrence built on them.

use num::Complex;

/// Raises `z` to a non-negative integer power by repeated squaring,
/// so the cost grows with the number of bits in the exponent.  `z^0`
/// is 1 for every z, zero included.
#[inline]
pub fn cpow(z: Complex<f64>, exponent: u32) -> Complex<f64> {
    num::pow(z, exponent as usize)
}

/// One application of the recurrence z <- z^exponent + c.
#[inline]
pub fn step(z: Complex<f64>, c: Complex<f64>, exponent: u32) -> Complex<f64> {
    cpow(z, exponent) + c
}

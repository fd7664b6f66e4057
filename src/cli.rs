// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parsers and clap validators for the command-line tools.

use std::str::FromStr;

use crate::planes::PlaneBounds;

/// Splits `s` at the first `separator` and parses both halves, as in
/// "800x600" or "-0.5,1.25".
pub fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    let (left, right) = s.split_once(separator)?;
    Some((left.parse().ok()?, right.parse().ok()?))
}

/// Parses "xmin,xmax,ymin,ymax" into plane bounds.  Only the shape is
/// checked here; `PlaneBounds::validate` decides whether the
/// rectangle makes sense.
pub fn parse_bounds(s: &str) -> Option<PlaneBounds> {
    let values: Vec<f64> = s
        .split(',')
        .map(|v| v.trim().parse())
        .collect::<Result<_, _>>()
        .ok()?;
    match values.as_slice() {
        [xmin, xmax, ymin, ymax] => Some(PlaneBounds::new(*xmin, *xmax, *ymin, *ymax)),
        _ => None,
    }
}

/// Clap validator for values like "800x600".
pub fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    parse_pair::<T>(s, separator)
        .map(|_| ())
        .ok_or_else(|| err.to_string())
}

/// Clap validator for plane bounds.
pub fn validate_bounds(s: &str) -> Result<(), String> {
    let bounds = parse_bounds(s)
        .ok_or_else(|| "Could not parse plane bounds; expected xmin,xmax,ymin,ymax".to_string())?;
    bounds.validate().map_err(|e| e.to_string())
}

/// Clap validator for a number that has to lie in low..=high.  NaN is
/// never in range.
pub fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    parse_err: &str,
    range_err: &str,
) -> Result<(), String> {
    let value: T = s.parse().map_err(|_| parse_err.to_string())?;
    if low <= value && value <= high {
        Ok(())
    } else {
        Err(range_err.to_string())
    }
}

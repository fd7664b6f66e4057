// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate mandelbrot;

use clap::{App, Arg};
use mandelbrot::{codec, Comparison};

const PRIMARY: &str = "primary";
const SECONDARY: &str = "secondary";

fn main() {
    env_logger::init();

    let matches = App::new("imgdiff")
        .version("0.1.0")
        .about("Counts the differing pixels of two images; exits non-zero if there are any")
        .arg(
            Arg::with_name(PRIMARY)
                .required(true)
                .index(1)
                .help("Primary image"),
        )
        .arg(
            Arg::with_name(SECONDARY)
                .required(true)
                .index(2)
                .help("Secondary image"),
        )
        .get_matches();

    let mut images = Vec::with_capacity(2);
    for name in &[PRIMARY, SECONDARY] {
        let path = matches.value_of(name).unwrap_or_default();
        match codec::load(path) {
            Ok(image) => images.push(image),
            Err(e) => {
                eprintln!("Decode failure: {}: {}", path, e);
                std::process::exit(1);
            }
        }
    }

    let comparison = Comparison::new(&images[0], &images[1]);
    println!("{}", comparison);

    if !comparison.is_identical() {
        std::process::exit(1);
    }
}

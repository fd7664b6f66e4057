// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate mandelbrot;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use mandelbrot::cli::{parse_bounds, parse_pair, validate_bounds, validate_pair, validate_range};
use mandelbrot::{codec, EscapeTimeEngine, RenderRequest};
use std::str::FromStr;

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const ITERATIONS: &str = "iterations";
const EXPONENT: &str = "exponent";
const BOUNDS: &str = "bounds";
const RADIUS: &str = "radius";
const THREADS: &str = "threads";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandelbrot")
        .version("0.1.0")
        .about("Renders the Mandelbrot set of z^e + c, seeded at z = c, to a PNG")
        .arg(
            Arg::with_name(OUTPUT)
                .required(false)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("mandelbrot.png")
                .help("Output file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1000x1000")
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image, WIDTHxHEIGHT"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("100")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        std::usize::MAX,
                        "Could not parse iteration count",
                        "Iteration count must be at least 1",
                    )
                })
                .help("Number of iterations per point"),
        )
        .arg(
            Arg::with_name(EXPONENT)
                .required(false)
                .long(EXPONENT)
                .short("e")
                .takes_value(true)
                .default_value("2")
                .validator(|s| {
                    validate_range(
                        &s,
                        0,
                        std::u32::MAX,
                        "Could not parse exponent",
                        "Exponent out of range",
                    )
                })
                .help("Exponent of the set; 2 is the classical Mandelbrot set"),
        )
        .arg(
            Arg::with_name(BOUNDS)
                .required(false)
                .long(BOUNDS)
                .short("b")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2,2,-2,2")
                .validator(|s| validate_bounds(&s))
                .help("Region of the complex plane, xmin,xmax,ymin,ymax"),
        )
        .arg(
            Arg::with_name(RADIUS)
                .required(false)
                .long(RADIUS)
                .short("r")
                .takes_value(true)
                .default_value("2")
                .validator(|s| {
                    validate_range(
                        &s,
                        std::f64::MIN_POSITIVE,
                        std::f64::MAX,
                        "Could not parse escape radius",
                        "Escape radius must be a positive number",
                    )
                })
                .help("Escape radius"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in the renderer"),
        )
        .get_matches()
}

// Every value has a default and a validator, so clap hands back
// something that parses.
fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Option<T> {
    matches.value_of(name).and_then(|s| T::from_str(s).ok())
}

fn request(matches: &ArgMatches) -> Option<RenderRequest> {
    let (width, height) = parse_pair(matches.value_of(SIZE)?, 'x')?;
    Some(RenderRequest {
        width,
        height,
        iterations: value(matches, ITERATIONS)?,
        exponent: value(matches, EXPONENT)?,
        bounds: parse_bounds(matches.value_of(BOUNDS)?)?,
        escape_radius: value(matches, RADIUS)?,
    })
}

fn main() {
    env_logger::init();

    let matches = args();
    let output = matches.value_of(OUTPUT).unwrap_or("mandelbrot.png");
    let threads: usize = value(&matches, THREADS).unwrap_or(1);
    let request = match request(&matches) {
        Some(request) => request,
        None => {
            eprintln!("Could not parse the render parameters");
            std::process::exit(1);
        }
    };

    println!("Configuration");
    println!("\tFile: {}", output);
    println!(
        "\tSize (Width x Height): {} x {} px",
        request.width, request.height
    );
    println!("\tIterations: {}", request.iterations);
    println!("\tExponent: {}", request.exponent);

    let image = match EscapeTimeEngine::new(threads).render(&request) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = codec::save(&image, output) {
        eprintln!("Error saving to file {}: {}", output, e);
        std::process::exit(1);
    }
}

// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This crate provides a basic cli for LibreCD.

#![deny(missing_docs, rustdoc::missing_crate_level_docs, future_incompatible)]

use std::fs::read_to_string;
use std::path::PathBuf;
use std::time::Duration;

pub use clap::crate_version;
use clap::{App, Arg, ArgMatches};
use design::Design;
use engine::{Mode, SolveOptions};

const INPUT_FILE_ARG: &str = "input_file";
const OUTPUT_FILE_ARG: &str = "output_file";
const TIME_BUDGET_ARG: &str = "time-budget";
const MODE_ARG: &str = "mode";
const MAX_GROUPS_ARG: &str = "max-groups";
const SEED_ARG: &str = "seed";
const THREADS_ARG: &str = "threads";
const BIN_PREFIX: &str = "src/bin/";
const RUST_EXT: &str = ".rs";

fn get_app<'a, 'b>(app_name: &'a str, version: &'a str) -> App<'a, 'b>
where
    'a: 'b,
{
    App::new(app_name)
        .version(version)
        .arg(
            Arg::with_name(INPUT_FILE_ARG)
                .required(true)
                .help("Set the input file with the definition of the problem."),
        )
        .arg(
            Arg::with_name(OUTPUT_FILE_ARG)
                .short("o")
                .long("output")
                .required(false)
                .default_value("result.txt")
                .help("Set the output file."),
        )
        .arg(
            Arg::with_name(TIME_BUDGET_ARG)
                .short("t")
                .long("time-budget")
                .takes_value(true)
                .default_value("60")
                .help("Set the time budget of the search in seconds."),
        )
        .arg(
            Arg::with_name(MODE_ARG)
                .short("m")
                .long("mode")
                .takes_value(true)
                .possible_values(&["auto", "exact", "diverse"])
                .default_value("auto")
                .help("Choose between exhaustive candidate enumeration and diverse sampling."),
        )
        .arg(
            Arg::with_name(MAX_GROUPS_ARG)
                .short("g")
                .long("max-groups")
                .takes_value(true)
                .default_value("2000")
                .help("Set the candidate pool bound of the diverse mode."),
        )
        .arg(
            Arg::with_name(SEED_ARG)
                .long("seed")
                .takes_value(true)
                .help("Set the seed of the diverse generator for a reproducible pool."),
        )
        .arg(
            Arg::with_name(THREADS_ARG)
                .long("threads")
                .takes_value(true)
                .default_value("0")
                .help("Set the number of worker threads. 0 uses one per logical CPU."),
        )
}

fn parse_number<T: std::str::FromStr>(matches: &ArgMatches, name: &str) -> Result<T, String> {
    matches
        .value_of(name)
        .ok_or(format!("The {} argument is required.", name))?
        .parse::<T>()
        .map_err(|_| format!("The {} argument should be a number.", name))
}

fn validate_args(matches: ArgMatches) -> Result<(PathBuf, PathBuf, SolveOptions), String> {
    let input_path = PathBuf::from(
        matches
            .value_of(INPUT_FILE_ARG)
            .ok_or("The input file should be provided")?,
    );

    let output_path = PathBuf::from(
        matches
            .value_of(OUTPUT_FILE_ARG)
            .ok_or("The output file should be provided")?,
    );

    if input_path == output_path {
        return Err("Input and output should not be the same!".to_string());
    }

    let seconds: u64 = parse_number(&matches, TIME_BUDGET_ARG)?;
    if seconds == 0 {
        return Err("Please provide a time budget of at least one second.".to_string());
    }

    let max_groups: usize = parse_number(&matches, MAX_GROUPS_ARG)?;
    if max_groups == 0 {
        return Err("Please provide a positive candidate pool bound.".to_string());
    }

    let mode = match matches.value_of(MODE_ARG) {
        Some("exact") => Mode::Exact,
        Some("diverse") => Mode::Diverse,
        _ => Mode::Auto,
    };

    let seed = match matches.value_of(SEED_ARG) {
        Some(text) => Some(
            text.parse::<u64>()
                .map_err(|_| "The seed argument should be a number.".to_string())?,
        ),
        None => None,
    };

    let options = SolveOptions {
        time_budget: Duration::from_secs(seconds),
        mode,
        max_groups,
        seed,
        threads: parse_number(&matches, THREADS_ARG)?,
        ..SolveOptions::default()
    };

    Ok((input_path, output_path, options))
}

fn check_parameters(design: &Design) -> Result<(), String> {
    if design.s < 1 || design.j < design.s || design.k < design.j || design.n() < design.k {
        Err("The parameters should satisfy 1 <= s <= j <= k <= n.".to_string())
    } else {
        Ok(())
    }
}

fn load_design(args: (PathBuf, PathBuf, SolveOptions)) -> Result<(Design, PathBuf, SolveOptions), String> {
    let contents = read_to_string(args.0).map_err(|e| e.to_string())?;
    let design = design::parse(contents.as_str())?;
    check_parameters(&design)?;
    Ok((design, args.1, args.2))
}

/// Parse the commandline arguments and return the [Design] and [SolveOptions] for which a covering
/// design should be created at the given output path.
pub fn parse_arguments(mut app_name: &str, version: &str) -> Result<(Design, PathBuf, SolveOptions), String> {
    if app_name.ends_with(RUST_EXT) {
        app_name = &app_name[..app_name.len() - RUST_EXT.len()];
    }

    if app_name.starts_with(BIN_PREFIX) {
        app_name = &app_name[BIN_PREFIX.len()..];
    }

    let matches = get_app(app_name, version).get_matches();

    load_design(validate_args(matches)?)
}

#[cfg(test)]
mod test_lib;

// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This crate contains a binary running the covering-design search provided in [engine].

use std::io::Write;

use librecd::cli;
use librecd::common::{time_it, CancelToken};
use librecd::engine::{self, Progress, RunRecord};
use librecd::writer::write_result;

fn main() -> Result<(), String> {
    let (design, output_path, options) = time_it!(
        cli::parse_arguments(file!(), cli::crate_version!()),
        "Parsing"
    )?;

    let mut progress = |progress: Progress| {
        print!("\rGenerating candidate groups: {}/{}", progress.generated, progress.target);
        let _ = std::io::stdout().flush();
    };

    let solution = time_it!(
        engine::solve(&design, &options, &CancelToken::new(), &mut progress).map_err(|e| e.to_string()),
        "Generation"
    )?;
    println!();

    let record = RunRecord::new(&design, &solution);
    println!("Run {} finished with status {:?} after {} candidates", record.run_id, solution.status, solution.candidate_count);

    time_it!(
        write_result(&design, &solution, output_path).map_err(|e| e.to_string()),
        "Writing"
    )
}

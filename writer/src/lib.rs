// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This module contains the methods for writing a resulting [Solution] to a file.
//!
//! The output format is a commented header followed by one comma-separated label row per group:
//! ```text
//! # m=45 n=9 k=6 j=5 s=4
//! # Number of groups: 3
//! # Status: optimal
//! # Solve time: 0.182s
//! 01,02,03,04,05,06
//! ...
//! ```

#![deny(missing_docs, rustdoc::missing_crate_level_docs, future_incompatible)]

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use design::Design;
use engine::Solution;
use solver::SolveStatus;

fn status_text(status: SolveStatus) -> &'static str {
    match status {
        SolveStatus::Optimal => "optimal",
        SolveStatus::Feasible => "feasible",
        SolveStatus::Infeasible => "infeasible",
        SolveStatus::TimedOut => "timed out",
    }
}

fn write_headers(design: &Design, solution: &Solution, file: &mut BufWriter<File>) -> std::io::Result<()> {
    file.write_all(format!(
        "# m={} n={} k={} j={} s={}\n",
        design.m, design.n(), design.k, design.j, design.s,
    ).as_ref())?;
    file.write_all(format!("# Number of groups: {}\n", solution.groups.len()).as_ref())?;
    file.write_all(format!("# Status: {}\n", status_text(solution.status)).as_ref())?;
    file.write_all(format!("# Solve time: {:.3}s\n", solution.solve_time.as_secs_f64()).as_ref())
}

fn write_groups(solution: &Solution, file: &mut BufWriter<File>) -> std::io::Result<()> {
    for group in solution.groups.iter() {
        let mut labels = group.iter();
        match labels.next() {
            Some(label) => file.write_all(format!("{:02}", label).as_ref())?,
            None => continue,
        }
        for label in labels {
            file.write_all(format!(",{:02}", label).as_ref())?;
        }
        file.write_all(b"\n")?;
    }
    Ok(())
}

/// Write the given [Solution] to the given filename.
pub fn write_result(design: &Design, solution: &Solution, filename: PathBuf) -> std::io::Result<()> {
    println!("The resulting design has {} groups", solution.groups.len());
    let mut writer = BufWriter::new(File::create(filename)?);
    write_headers(design, solution, &mut writer)?;
    write_groups(solution, &mut writer)?;
    writer.flush()
}

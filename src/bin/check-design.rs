// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This crate contains a binary which can check whether a written result file is a valid covering
//! design for the given problem definition.
//!
//! The problem file is the positional argument; the result file to check is passed with `-o`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use librecd::cli;
use librecd::common::UVec;
use librecd::design::Design;
use librecd::subset_list::{overlap, SubsetList};

/// Converts an [std::io::Error] to a [String].
fn ioe<V>(result: std::io::Result<V>) -> Result<V, String> {
    result.map_err(|e| e.to_string())
}

/// Read the groups of a result file, skipping the commented header.
fn read_groups(design: &Design, result_path: PathBuf) -> Result<UVec<UVec<u32>>, String> {
    let lines = BufReader::new(ioe(File::open(result_path))?).lines().enumerate();
    let mut groups = UVec::new();

    for (line_number, line) in lines {
        let line = ioe(line)?;
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }

        let mut group: UVec<u32> = UVec::with_capacity(design.k);
        for value in line.split(',') {
            let label = value.trim().parse::<u32>()
                .map_err(|_| format!("Invalid label on line {}: {}", line_number + 1, value))?;
            if design.index_of(label).is_none() {
                return Err(format!("Unknown sample label on line {}: {}", line_number + 1, label));
            }
            group.push(label);
        }

        if group.len() != design.k {
            return Err(format!("Expected {} labels on line {}, found {}.", design.k, line_number + 1, group.len()));
        }
        group.sort_unstable();
        if group.as_slice().windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(format!("Duplicate sample label on line {}.", line_number + 1));
        }
        groups.push(group);
    }

    if groups.is_empty() {
        return Err("The result file contains no groups.".to_string());
    }
    Ok(groups)
}

/// Check that every j-subset of the ground set shares at least `s` labels with some group.
fn check_design(design: &Design, groups: &UVec<UVec<u32>>) -> Result<(), String> {
    let targets = SubsetList::<u32>::enumerate(design.n(), design.j, u128::MAX)
        .map_err(|e| e.to_string())?;

    let mut uncovered = 0;
    for target in targets.iter() {
        let mut labels: UVec<u32> = target.iter()
            .map(|&index| design.label(index as usize).ok_or("Index outside the ground set."))
            .collect::<Result<_, _>>()?;
        labels.sort_unstable();

        if !groups.iter().any(|group| overlap(group.as_slice(), labels.as_slice()) >= design.s) {
            if uncovered == 0 {
                println!("Uncovered j-subset: {:?}", labels.unwrap_ref());
            }
            uncovered += 1;
        }
    }

    if uncovered > 0 {
        Err(format!("{} of {} j-subsets are uncovered!", uncovered, targets.len()))
    } else {
        println!("All {} j-subsets are covered by the {} groups.", targets.len(), groups.len());
        Ok(())
    }
}

/// This binary checks whether a written result is a valid covering design.
///
/// The implementation enumerates the whole j-subset universe, so only use this for moderate `n`.
fn main() -> Result<(), String> {
    let (design, result_path, _options) = cli::parse_arguments(file!(), cli::crate_version!())?;
    let groups = read_groups(&design, result_path)?;
    check_design(&design, &groups)
}

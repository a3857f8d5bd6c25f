// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use common::{u_vec, UVec};

use super::*;

fn validate(args: &[&str]) -> Result<(PathBuf, PathBuf, SolveOptions), String> {
    let matches = get_app("", "")
        .get_matches_from_safe(args)
        .map_err(|e| e.to_string())?;
    validate_args(matches)
}

#[test]
fn test_validate_defaults() {
    let (input, output, options) = validate(&["exe", "problem.design"]).unwrap();
    assert_eq!(input, PathBuf::from("problem.design"));
    assert_eq!(output, PathBuf::from("result.txt"));
    assert_eq!(options.time_budget, Duration::from_secs(60));
    assert_eq!(options.mode, Mode::Auto);
    assert_eq!(options.max_groups, 2000);
    assert_eq!(options.seed, None);
    assert_eq!(options.threads, 0);
}

#[test]
fn test_validate_overrides() {
    let (_, output, options) = validate(&[
        "exe", "problem.design", "-o", "out.txt", "-t", "5", "-m", "diverse", "-g", "300", "--seed", "7", "--threads", "4",
    ])
    .unwrap();
    assert_eq!(output, PathBuf::from("out.txt"));
    assert_eq!(options.time_budget, Duration::from_secs(5));
    assert_eq!(options.mode, Mode::Diverse);
    assert_eq!(options.max_groups, 300);
    assert_eq!(options.seed, Some(7));
    assert_eq!(options.threads, 4);
}

#[test]
fn test_validate_rejections() {
    assert!(validate(&["exe", "same.txt", "-o", "same.txt"]).is_err());
    assert!(validate(&["exe", "problem.design", "-t", "0"]).is_err());
    assert!(validate(&["exe", "problem.design", "-t", "a"]).is_err());
    assert!(validate(&["exe", "problem.design", "-g", "0"]).is_err());
    assert!(validate(&["exe", "problem.design", "-m", "fancy"]).is_err());
    assert!(validate(&["exe", "problem.design", "--seed", " "]).is_err());
    assert!(validate(&["exe"]).is_err());
}

#[test]
fn test_check_parameters() {
    let design = |k, j, s| Design::new(6, u_vec![1, 2, 3, 4, 5, 6], k, j, s).unwrap();
    assert!(check_parameters(&design(4, 4, 3)).is_ok());
    assert!(check_parameters(&design(6, 6, 6)).is_ok());
    assert!(check_parameters(&design(4, 3, 4)).is_err());
    assert!(check_parameters(&design(3, 4, 2)).is_err());
    assert!(check_parameters(&design(7, 4, 2)).is_err());
    assert!(check_parameters(&design(3, 2, 0)).is_err());
}

#[test]
fn test_load_design_reports_missing_file() {
    let error = load_design((
        PathBuf::from("/definitely/not/a/file"),
        PathBuf::from("out.txt"),
        SolveOptions::default(),
    ))
    .unwrap_err();
    assert!(!error.is_empty());
}

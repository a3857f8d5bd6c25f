// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use common::u_vec;
use design::Design;
use subset_list::overlap;

use super::*;

fn run(design: &Design, options: &SolveOptions) -> Result<Solution, SolveError> {
    solve(design, options, &CancelToken::new(), &mut |_| {})
}

/// Check that every j-subset of the design's labels overlaps some group in at least `s` labels.
fn assert_valid_cover(design: &Design, solution: &Solution) {
    let targets = SubsetList::<u32>::enumerate(design.n(), design.j, u128::MAX).unwrap();
    for target in targets.iter() {
        let mut labels: UVec<u32> = target.iter().map(|&index| design.label(index as usize).unwrap()).collect();
        labels.sort_unstable();
        let covered = solution.groups.iter().any(|group| {
            overlap(group.as_slice(), labels.as_slice()) >= design.s
        });
        assert!(covered, "j-subset {:?} is uncovered", labels.unwrap_ref());
    }
}

#[test]
fn test_identity_cover_needs_every_group() {
    // With s == j == k every group covers exactly itself, so the minimum is C(6, 4) = 15.
    let design = Design::new(6, u_vec![1, 2, 3, 4, 5, 6], 4, 4, 4).unwrap();
    let solution = run(&design, &SolveOptions::default()).unwrap();

    assert_eq!(solution.status, SolveStatus::Optimal);
    assert_eq!(solution.groups.len(), 15);
    assert_eq!(solution.candidate_count, 15);
    assert_valid_cover(&design, &solution);
}

#[test]
fn test_relaxed_threshold_shrinks_the_cover() {
    let design = Design::new(6, u_vec![1, 2, 3, 4, 5, 6], 4, 4, 3).unwrap();
    let solution = run(&design, &SolveOptions::default()).unwrap();

    assert_eq!(solution.status, SolveStatus::Optimal);
    assert!(solution.groups.len() < 15);
    assert_valid_cover(&design, &solution);
}

#[test]
fn test_nine_samples_exhaustive() {
    let design = Design::new(9, u_vec![1, 2, 3, 4, 5, 6, 7, 8, 9], 6, 5, 4).unwrap();
    let solution = run(&design, &SolveOptions::default()).unwrap();

    assert_eq!(solution.status, SolveStatus::Optimal);
    assert_eq!(solution.candidate_count, 84);
    assert_valid_cover(&design, &solution);
}

#[test]
fn test_groups_are_sorted_labels() {
    let design = Design::new(20, u_vec![13, 2, 8, 5, 21, 3], 4, 4, 3).unwrap();
    let solution = run(&design, &SolveOptions::default()).unwrap();

    for group in solution.groups.iter() {
        assert_eq!(group.len(), 4);
        assert!(group.as_slice().windows(2).all(|w| w[0] < w[1]));
        assert!(group.iter().all(|label| design.index_of(*label).is_some()));
    }
    assert_valid_cover(&design, &solution);
}

#[test]
fn test_parameter_validation() {
    let base = |k, j, s| Design::new(10, u_vec![1, 2, 3, 4, 5], k, j, s).unwrap();

    let error = run(&base(4, 3, 4), &SolveOptions::default()).unwrap_err();
    assert_eq!(error, SolveError::InvalidParameters { n: 5, k: 4, j: 3, s: 4 });

    let error = run(&base(3, 4, 2), &SolveOptions::default()).unwrap_err();
    assert!(matches!(error, SolveError::InvalidParameters { .. }));

    let error = run(&base(6, 4, 2), &SolveOptions::default()).unwrap_err();
    assert!(matches!(error, SolveError::InvalidParameters { .. }));

    let error = run(&base(3, 2, 0), &SolveOptions::default()).unwrap_err();
    assert!(matches!(error, SolveError::InvalidParameters { .. }));
}

#[test]
fn test_exact_mode_respects_the_ceiling() {
    let labels: UVec<u32> = (1..=10).collect();
    let design = Design::new(10, labels, 5, 4, 3).unwrap();

    let options = SolveOptions { mode: Mode::Exact, enumeration_ceiling: 100, ..SolveOptions::default() };
    let error = run(&design, &options).unwrap_err();
    assert!(matches!(error, SolveError::EnumerationTooLarge { subsets: 252, ceiling: 100 }));
}

#[test]
fn test_diverse_mode_still_covers() {
    let labels: UVec<u32> = (1..=12).collect();
    let design = Design::new(12, labels, 6, 5, 4).unwrap();

    let options = SolveOptions { mode: Mode::Diverse, max_groups: 600, seed: Some(5), ..SolveOptions::default() };
    let solution = run(&design, &options).unwrap();

    assert!(solution.candidate_count <= 600);
    assert_valid_cover(&design, &solution);
}

#[test]
fn test_small_diverse_pool_is_infeasible() {
    // A pool this small cannot reach every j-subset; the model must be rejected up front,
    // not handed to the backend as an unsatisfiable formula.
    let labels: UVec<u32> = (1..=14).collect();
    let design = Design::new(14, labels, 7, 6, 6).unwrap();

    let options = SolveOptions { mode: Mode::Diverse, max_groups: 5, seed: Some(1), ..SolveOptions::default() };
    let error = run(&design, &options).unwrap_err();
    assert!(matches!(error, SolveError::Infeasible { uncovered: Some(count) } if count > 0));
}

#[test]
fn test_infeasible_messages_name_the_source() {
    // The pre-check reports the uncovered count; a backend verdict has no count to report.
    let detected = SolveError::Infeasible { uncovered: Some(7) };
    assert_eq!(detected.to_string(), "No solution exists: 7 j-subsets are covered by no candidate.");

    let proven = SolveError::Infeasible { uncovered: None };
    assert_eq!(proven.to_string(), "No solution exists: the backend proved the model unsatisfiable.");
}

#[test]
fn test_feasibility_survives_pool_growth() {
    let labels: UVec<u32> = (1..=12).collect();
    let design = Design::new(12, labels, 6, 5, 4).unwrap();

    // The seeded generator draws the same sequence under both bounds, so the larger pool is an
    // extension of the smaller one. A cover found on the smaller pool must survive the growth.
    let small = run(
        &design,
        &SolveOptions { mode: Mode::Diverse, max_groups: 450, seed: Some(17), ..SolveOptions::default() },
    )
    .unwrap();
    let large = run(
        &design,
        &SolveOptions { mode: Mode::Diverse, max_groups: 900, seed: Some(17), ..SolveOptions::default() },
    )
    .unwrap();

    assert_valid_cover(&design, &small);
    assert_valid_cover(&design, &large);
    assert!(small.candidate_count <= large.candidate_count);
    assert!(large.groups.len() <= small.groups.len());
}

#[test]
fn test_cancelled_before_start() {
    let design = Design::new(6, u_vec![1, 2, 3, 4, 5, 6], 4, 4, 3).unwrap();
    let token = CancelToken::new();
    token.cancel();

    let error = solve(&design, &SolveOptions::default(), &token, &mut |_| {}).unwrap_err();
    assert_eq!(error, SolveError::Cancelled);
}

#[test]
fn test_formulate_is_reproducible() {
    let targets = SubsetList::<SampleIndex>::enumerate(7, 4, u128::MAX).unwrap();
    let pool = SubsetList::<SampleIndex>::enumerate(7, 5, u128::MAX).unwrap();

    let first = formulate(&CoverageRelation::build(&targets, &pool, 3)).unwrap();
    let second = formulate(&CoverageRelation::build(&targets, &pool, 3)).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.variables, pool.len());
    assert_eq!(first.clauses.len(), targets.len());
}

#[test]
fn test_run_record_round_trip() {
    let design = Design::new(9, u_vec![1, 2, 3, 4, 5, 6, 7, 8, 9], 6, 5, 4).unwrap();
    let solution = run(&design, &SolveOptions::default()).unwrap();
    let record = RunRecord::new(&design, &solution);

    assert!(record.run_id.starts_with("9-9-6-5-4-"));
    assert_eq!(record.group_count, solution.groups.len());
    assert_eq!(record.labels, design.labels);

    // The record holds everything needed to re-derive the groups.
    let replayed = Design::new(record.m, record.labels.clone(), record.k, record.j, record.s).unwrap();
    let second = run(&replayed, &SolveOptions::default()).unwrap();
    assert_eq!(second.groups.len(), record.group_count);
}

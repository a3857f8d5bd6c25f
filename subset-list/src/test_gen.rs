// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use itertools::Itertools;

use super::*;

#[test]
fn test_enumerate_2_of_5() {
    let result = SubsetList::<usize>::enumerate(5, 2, u128::MAX).unwrap();
    assert_eq!(combination_count(5, 2), 10);
    assert_eq!(result.len(), 10);

    let expected: Vec<Vec<usize>> = vec![
        vec![0, 1], vec![0, 2], vec![0, 3], vec![0, 4],
        vec![1, 2], vec![1, 3], vec![1, 4],
        vec![2, 3], vec![2, 4],
        vec![3, 4],
    ];
    let actual: Vec<Vec<usize>> = result.iter().map(|s| s.to_vec()).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_enumerate_4_of_6() {
    let result = SubsetList::<u16>::enumerate(6, 4, u128::MAX).unwrap();
    assert_eq!(result.len(), 15);
    assert_eq!(combination_count(6, 4), 15);
    assert_eq!(result.subset(0), &[0, 1, 2, 3]);
    assert_eq!(result.subset(14), &[2, 3, 4, 5]);
}

#[test]
fn test_enumerate_matches_itertools() {
    for (n, r) in [(6, 3), (8, 5), (9, 1), (7, 7)] {
        let result = SubsetList::<u32>::enumerate(n, r, u128::MAX).unwrap();
        let expected: Vec<Vec<u32>> = (0..n as u32).combinations(r).collect();
        let actual: Vec<Vec<u32>> = result.iter().map(|s| s.to_vec()).collect();
        assert_eq!(actual, expected, "n={} r={}", n, r);
    }
}

#[test]
fn test_enumerate_full_set() {
    let result = SubsetList::<u8>::enumerate(5, 5, u128::MAX).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result.subset(0), &[0, 1, 2, 3, 4]);
}

#[test]
fn test_enumerate_respects_ceiling() {
    let error = SubsetList::<u16>::enumerate(30, 15, 1000).unwrap_err();
    assert_eq!(error.subsets, combination_count(30, 15));
    assert_eq!(error.ceiling, 1000);

    // Exactly at the ceiling is allowed.
    assert!(SubsetList::<u16>::enumerate(6, 3, 20).is_ok());
}

#[test]
fn test_combination_count() {
    assert_eq!(combination_count(6, 4), 15);
    assert_eq!(combination_count(9, 5), 126);
    assert_eq!(combination_count(45, 6), 8_145_060);
    assert_eq!(combination_count(10, 0), 1);
    assert_eq!(combination_count(4, 5), 0);
    // Large inputs saturate instead of overflowing.
    assert_eq!(combination_count(1000, 500), u128::MAX);
}

#[test]
fn test_overlap() {
    assert_eq!(overlap::<u16>(&[0, 1, 2, 3], &[0, 1, 2, 3]), 4);
    assert_eq!(overlap::<u16>(&[0, 1, 2, 3], &[2, 3, 4, 5]), 2);
    assert_eq!(overlap::<u16>(&[0, 2, 4], &[1, 3, 5]), 0);
    assert_eq!(overlap::<u16>(&[1, 5, 9], &[0, 5, 8, 9, 11]), 2);
    assert_eq!(overlap::<u16>(&[], &[1, 2]), 0);
}

#[test]
fn test_push_and_access() {
    let mut list = SubsetList::<u16>::new(3);
    assert!(list.is_empty());
    list.push(&[0, 4, 7]);
    list.push(&[1, 2, 3]);
    assert_eq!(list.len(), 2);
    assert_eq!(list.subset(0), &[0, 4, 7]);
    assert_eq!(list.subset(1), &[1, 2, 3]);
}

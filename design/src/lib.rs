// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This crate provides the covering-design problem definition and the tools to parse `*.design` files.
//!
//! # Problem definition
//! A [Design] holds an ordered ground set of unique sample labels together with the group size `k`,
//! the subgroup size `j`, and the overlap threshold `s`. The engine works on the dense index space
//! `0..n` (one index per label, in label order); the [Design] owns the bijection between the two and
//! maps winning index tuples back to labels.
//!
//! # Example
//! ```
//! let design = design::parse("
//!     samples: 1, 2, 3, 5, 8, 13;
//!     k: 4;
//!     j: 4;
//!     s: 3;
//! ").expect("Parsing error occurred");
//!
//! assert_eq!(design.n(), 6);
//! assert_eq!(design.label(4), Some(8));
//! ```

#![deny(missing_docs, rustdoc::missing_crate_level_docs, future_incompatible)]

use std::collections::HashSet;

use common::{Id, UVec};
use rand::rngs::StdRng;
use rand::SeedableRng;
use subset_list::SubsetList;

pub use parser::parse;

mod parser;

/// The covering-design problem: a ground set of labels and the parameters `k`, `j`, `s`.
///
/// The parameter invariant `1 <= s <= j <= k <= n` is the engine's to enforce; this struct only
/// guarantees that the ground set is non-empty and free of duplicate labels.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Design {
    /// The size of the label domain the ground set was drawn from.
    pub m: u32,
    /// The ground set, in caller order. Unique.
    pub labels: UVec<u32>,
    /// The size of the groups to choose.
    pub k: usize,
    /// The size of the subsets that must be covered.
    pub j: usize,
    /// The minimum overlap between a group and a j-subset for the group to cover it.
    pub s: usize,
}

impl Design {
    /// Create a design, rejecting empty or duplicated ground sets.
    pub fn new(m: u32, labels: UVec<u32>, k: usize, j: usize, s: usize) -> Result<Self, String> {
        if labels.is_empty() {
            return Err("The ground set should not be empty.".to_string());
        }

        let mut seen = HashSet::with_capacity(labels.len());
        for &label in labels.iter() {
            if !seen.insert(label) {
                return Err(format!("Duplicate sample label: {}", label));
            }
        }

        Ok(Self { m, labels, k, j, s })
    }

    /// Create a design over `n` distinct labels drawn from `1..=m`, sorted ascending.
    ///
    /// The same seed yields the same ground set.
    pub fn random(m: u32, n: usize, k: usize, j: usize, s: usize, seed: u64) -> Result<Self, String> {
        if m == 0 || n == 0 || (m as usize) < n {
            return Err(format!("Cannot draw {} distinct labels from 1..={}.", n, m));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut labels: UVec<u32> = rand::seq::index::sample(&mut rng, m as usize, n)
            .into_iter()
            .map(|index| index as u32 + 1)
            .collect();
        labels.sort_unstable();

        Self::new(m, labels, k, j, s)
    }

    /// The size of the ground set.
    #[inline]
    pub fn n(&self) -> usize {
        self.labels.len()
    }

    /// The label at the given index, if the index is inside the ground set.
    #[inline]
    pub fn label(&self, index: usize) -> Option<u32> {
        self.labels.get(index).copied()
    }

    /// The index of the given label, if it is part of the ground set.
    pub fn index_of(&self, label: u32) -> Option<usize> {
        self.labels.iter().position(|&candidate| candidate == label)
    }

    /// Map winning index tuples back to label tuples, each sorted ascending.
    ///
    /// An index outside `0..n` means a phase of the engine broke the index-space bijection;
    /// that is an internal invariant violation and panics.
    pub fn project<SampleId: Id>(&self, groups: &SubsetList<SampleId>) -> UVec<UVec<u32>> {
        let mut result = UVec::with_capacity(groups.len());
        for group in groups.iter() {
            let mut labels: UVec<u32> = group.iter()
                .map(|&index| self.label(index.as_usize()).expect("group index outside the ground set"))
                .collect();
            labels.sort_unstable();
            result.push(labels);
        }
        result
    }
}

// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This module provides the [CoverageRelation] between candidate groups and the j-subset universe.

#![deny(missing_docs, rustdoc::missing_crate_level_docs, future_incompatible)]

use common::{Id, UVec};
use subset_list::{overlap, SubsetList};


/// The type used to identify a j-subset within the universe of one solve.
pub type TargetId = u32;

/// The number of candidate/target pairs above which the threaded build pays off.
pub const THREADED_BUILD_THRESHOLD: usize = 1 << 20;

/// The coverage relation of one solve: which j-subsets each surviving candidate covers.
///
/// A candidate `G` covers a j-subset `J` when `|G ∩ J| >= s`.
/// Candidates covering nothing are dropped during the build and the survivors are renumbered
/// densely, so `covered[i]` always belongs to `candidates.subset(i)`.
#[derive(Clone, Debug)]
pub struct CoverageRelation<SampleId: Id> {
    /// The surviving candidates, in the order of the input pool.
    pub candidates: SubsetList<SampleId>,

    /// For each surviving candidate, the ascending list of covered j-subset ids.
    ///
    /// Never empty for any entry.
    pub covered: UVec<UVec<TargetId>>,

    /// The size of the j-subset universe this relation was built against.
    pub target_count: usize,
}

impl<SampleId: Id> CoverageRelation<SampleId> {
    /// Build the relation sequentially.
    pub fn build(targets: &SubsetList<SampleId>, pool: &SubsetList<SampleId>, threshold: usize) -> Self {
        let (candidates, covered) = build_range(targets, pool, threshold, 0, pool.len());
        Self { candidates, covered, target_count: targets.len() }
    }

    /// Build the relation by partitioning the candidate pool over `thread_count` workers.
    ///
    /// Each worker computes the coverage of a contiguous range of the pool; the per-range results
    /// are concatenated in range order, so the output is identical to [CoverageRelation::build].
    pub fn build_threaded(
        targets: &SubsetList<SampleId>,
        pool: &SubsetList<SampleId>,
        threshold: usize,
        thread_count: usize,
    ) -> Self {
        if thread_count < 2 || pool.len() < thread_count {
            return Self::build(targets, pool, threshold);
        }

        let mut candidates = SubsetList::with_capacity(pool.size(), pool.len());
        let mut covered = UVec::with_capacity(pool.len());

        let parts = crossbeam::scope(|scope| {
            let mut handles = Vec::with_capacity(thread_count);
            for thread_id in 0..thread_count {
                let (start, end) = split(thread_count, thread_id, pool.len());
                handles.push(scope.spawn(move |_| build_range(targets, pool, threshold, start, end)));
            }
            handles.into_iter().map(|handle| handle.join().expect("coverage worker panicked")).collect::<Vec<_>>()
        }).expect("coverage scope panicked");

        for (part_candidates, part_covered) in parts {
            for subset in part_candidates.iter() {
                candidates.push(subset);
            }
            for covers in part_covered {
                covered.push(covers);
            }
        }

        Self { candidates, covered, target_count: targets.len() }
    }

    /// The number of surviving candidates.
    pub fn len(&self) -> usize {
        self.covered.len()
    }

    /// Returns `true` if no candidate covers anything.
    pub fn is_empty(&self) -> bool {
        self.covered.is_empty()
    }

    /// Invert the relation: for each j-subset id, the candidate ids covering it, ascending.
    ///
    /// An empty entry means the j-subset is covered by no candidate in the pool and the
    /// instance admits no solution.
    pub fn by_target(&self) -> UVec<UVec<usize>> {
        let mut inverted: UVec<UVec<usize>> = (0..self.target_count).map(|_| UVec::new()).collect();
        for (candidate_id, covers) in self.covered.iter().enumerate() {
            for &target in covers.iter() {
                inverted[target as usize].push(candidate_id);
            }
        }
        inverted
    }

    /// The ids of the j-subsets no candidate covers.
    pub fn uncovered_targets(&self) -> UVec<TargetId> {
        let mut seen = vec![false; self.target_count];
        for covers in self.covered.iter() {
            for &target in covers.iter() {
                seen[target as usize] = true;
            }
        }
        seen.iter().enumerate().filter(|(_, &covered)| !covered).map(|(id, _)| id as TargetId).collect()
    }
}

/// Compute the coverage of the pool range `start..end` and prune candidates covering nothing.
fn build_range<SampleId: Id>(
    targets: &SubsetList<SampleId>,
    pool: &SubsetList<SampleId>,
    threshold: usize,
    start: usize,
    end: usize,
) -> (SubsetList<SampleId>, UVec<UVec<TargetId>>) {
    let mut candidates = SubsetList::with_capacity(pool.size(), end.saturating_sub(start));
    let mut covered = UVec::with_capacity(end.saturating_sub(start));

    for candidate_id in start..end {
        let candidate = pool.subset(candidate_id);
        let mut covers: UVec<TargetId> = UVec::new();

        for (target_id, target) in targets.iter().enumerate() {
            if overlap(candidate, target) >= threshold {
                covers.push(target_id as TargetId);
            }
        }

        if !covers.is_empty() {
            candidates.push(candidate);
            covered.push(covers);
        }
    }

    (candidates, covered)
}

/// Split the work concerning `total_size` items over `thread_count` threads.
/// Returns the part for which `thread_id` is responsible.
#[inline]
pub fn split(thread_count: usize, thread_id: usize, total_size: usize) -> (usize, usize) {
    let mut batch_size = total_size / thread_count;
    if total_size % thread_count != 0 {
        batch_size += 1;
    }

    let start = thread_id * batch_size;
    let end = if thread_id < thread_count - 1 {
        std::cmp::min((thread_id + 1) * batch_size, total_size)
    } else {
        total_size
    };

    (start, end)
}

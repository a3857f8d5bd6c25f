// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! The diverse candidate generator used when the k-subset space is too large to enumerate.
//!
//! Four strategies take turns producing candidates so the pool spreads over the index space
//! instead of clumping around whatever a single heuristic favours:
//!   * `core`: a small fixed nucleus plus random fill, biasing towards shared elements;
//!   * `spaced`: indices at a regular stride from a random start, spreading across the range;
//!   * `clusters`: a random draw inside a window around a random centre, biasing towards
//!     neighbouring indices;
//!   * `random`: a uniform draw, keeping the pool honest.
//!
//! Duplicates are discarded, so the pool is a set. Generation is deterministic per seed.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use common::CancelToken;
use subset_list::SubsetList;

use crate::{Progress, SampleIndex};

/// How many generation attempts pass between progress reports and cancellation polls.
const PROGRESS_CADENCE: usize = 10;

/// The upper bound on the uniform seed batch that precedes the strategy rotation.
const SEED_BATCH_CAP: usize = 100;

/// How many consecutive duplicate draws end the generation early.
///
/// Small spaces exhaust long before `max_groups`; without this the loop would spin forever.
const STALL_LIMIT: usize = 1000;

/// Generate up to `max_groups` distinct ascending k-tuples of `0..n`.
///
/// The pool may come back smaller when the space holds fewer than `max_groups` tuples or the
/// token cancels the generation; the caller decides whether a partial pool is worth solving on.
pub fn generate(
    n: usize,
    k: usize,
    max_groups: usize,
    seed: u64,
    cancel: &CancelToken,
    progress: &mut dyn FnMut(Progress),
) -> SubsetList<SampleIndex> {
    debug_assert!(0 < k && k <= n);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut seen: HashSet<Vec<SampleIndex>> = HashSet::with_capacity(max_groups);
    let mut pool = SubsetList::with_capacity(k, max_groups);

    let seed_batch = std::cmp::min(max_groups / 4, SEED_BATCH_CAP);
    let mut attempts = 0;
    let mut stalled = 0;

    while seen.len() < max_groups && stalled < STALL_LIMIT {
        let candidate = if attempts < seed_batch {
            draw_random(n, k, &mut rng)
        } else {
            match attempts % 4 {
                0 => draw_core(n, k, &mut rng),
                1 => draw_spaced(n, k, &mut rng),
                2 => draw_clusters(n, k, &mut rng),
                _ => draw_random(n, k, &mut rng),
            }
        };

        attempts += 1;
        debug_assert_eq!(candidate.len(), k);

        if seen.insert(candidate.clone()) {
            pool.push(&candidate);
            stalled = 0;
        } else {
            stalled += 1;
        }

        if attempts % PROGRESS_CADENCE == 0 {
            progress(Progress { generated: seen.len(), target: max_groups });
            if cancel.is_cancelled() {
                break;
            }
        }
    }

    progress(Progress { generated: seen.len(), target: max_groups });
    pool
}

/// A uniform draw of `k` distinct indices.
fn draw_random(n: usize, k: usize, rng: &mut StdRng) -> Vec<SampleIndex> {
    let mut candidate: Vec<SampleIndex> = rand::seq::index::sample(rng, n, k)
        .into_iter()
        .map(|index| index as SampleIndex)
        .collect();
    candidate.sort_unstable();
    candidate
}

/// A small random nucleus completed by random fill, so candidates repeat a few shared indices.
fn draw_core(n: usize, k: usize, rng: &mut StdRng) -> Vec<SampleIndex> {
    let core_size = std::cmp::min(k - 1, 3);
    if core_size == 0 {
        return draw_random(n, k, rng);
    }

    let core: HashSet<usize> = rand::seq::index::sample(rng, n, core_size).into_iter().collect();
    let mut candidate: Vec<SampleIndex> = core.iter().map(|&index| index as SampleIndex).collect();

    let complement: Vec<usize> = (0..n).filter(|index| !core.contains(index)).collect();
    for position in rand::seq::index::sample(rng, complement.len(), k - core_size) {
        candidate.push(complement[position] as SampleIndex);
    }

    candidate.sort_unstable();
    candidate
}

/// Indices at a regular stride from a random start, wrapping around the range.
///
/// The stride draw always yields `k` distinct residues because `step * k <= n` when
/// `step == n / k`, and `step == 1` degenerates to a contiguous run.
fn draw_spaced(n: usize, k: usize, rng: &mut StdRng) -> Vec<SampleIndex> {
    let step = std::cmp::max(1, n / k);
    let start = rng.random_range(0..n);

    let mut candidate: Vec<SampleIndex> = (0..k)
        .map(|i| ((start + i * step) % n) as SampleIndex)
        .collect();
    candidate.sort_unstable();
    candidate.dedup();

    if candidate.len() < k {
        // Wrap-around collisions can only happen when n < k * step; fall back to uniform.
        return draw_random(n, k, rng);
    }
    candidate
}

/// A draw from a window of neighbouring indices around a random centre.
fn draw_clusters(n: usize, k: usize, rng: &mut StdRng) -> Vec<SampleIndex> {
    let window = std::cmp::min(n, 2 * k);
    if window < k {
        return draw_random(n, k, rng);
    }

    let centre = rng.random_range(0..n) as isize;
    let lo = -((window as isize + 1) / 2);
    let hi = (window / 2) as isize;
    let region: Vec<SampleIndex> = (lo..hi)
        .map(|offset| (centre + offset).rem_euclid(n as isize) as SampleIndex)
        .collect();

    let mut candidate: Vec<SampleIndex> = rand::seq::index::sample(rng, region.len(), k)
        .into_iter()
        .map(|position| region[position])
        .collect();
    candidate.sort_unstable();
    candidate.dedup();

    if candidate.len() < k {
        // The window wraps onto itself only when window > n, which min() rules out; the
        // region is then duplicate-free and this branch is unreachable. Kept as a guard.
        return draw_random(n, k, rng);
    }
    candidate
}

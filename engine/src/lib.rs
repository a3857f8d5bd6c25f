// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This crate provides the covering-design search engine.
//!
//! One call to [solve] runs the whole pipeline: parameter validation, index-space enumeration,
//! coverage-relation construction, set-cover formulation, backend minimisation, and projection of
//! the winning groups back to sample labels.
//!
//! Candidate groups come from one of two paths, selected by [Mode]:
//!   * the exhaustive path enumerates every k-subset of the index space;
//!   * the diverse path ([diverse::generate]) samples a bounded, de-duplicated candidate pool when
//!     the combination space is too large to enumerate.
//!
//! # Example
//! ```
//! use common::CancelToken;
//!
//! let design = design::parse("samples: 1, 2, 3, 4, 5, 6; k: 4; j: 4; s: 3;").unwrap();
//! let solution = engine::solve(&design, &engine::SolveOptions::default(), &CancelToken::new(), &mut |_| {}).unwrap();
//!
//! assert!(solution.groups.len() < 15);
//! ```

#![deny(missing_docs, rustdoc::missing_crate_level_docs, future_incompatible)]

use std::fmt::{Display, Error, Formatter};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use common::{CancelToken, UVec};
use cover::{CoverageRelation, THREADED_BUILD_THRESHOLD};
use design::Design;
use solver::{Model, Solver, SolverConfig, SolverImpl, SolveStatus};
use subset_list::{combination_count, SizeLimit, SubsetList};

pub mod diverse;

#[cfg(test)]
mod test_engine;

/// The index type of the engine's dense sample space.
pub type SampleIndex = u32;

/// The default ceiling on `C(n, r)` for exhaustive enumeration.
pub const DEFAULT_ENUMERATION_CEILING: u128 = 1 << 20;

/// How candidate groups are produced.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// Enumerate exhaustively when the combination space fits the ceiling, sample otherwise.
    Auto,
    /// Always enumerate exhaustively; fail with [SolveError::EnumerationTooLarge] if it does not fit.
    Exact,
    /// Always sample a diverse candidate pool.
    Diverse,
}

/// Tuning knobs for one [solve] call.
#[derive(Clone, Debug)]
pub struct SolveOptions {
    /// The wall-clock budget handed to the backend.
    pub time_budget: Duration,

    /// The candidate-generation mode.
    pub mode: Mode,

    /// The diverse pool bound. Ignored on the exhaustive path.
    pub max_groups: usize,

    /// The seed of the diverse generator. A fresh random seed is drawn when absent.
    pub seed: Option<u64>,

    /// The ceiling on `C(n, j)` and, on the exhaustive path, `C(n, k)`.
    pub enumeration_ceiling: u128,

    /// Worker threads for the coverage build. `0` means one per logical CPU.
    pub threads: usize,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_secs(60),
            mode: Mode::Auto,
            max_groups: 2000,
            seed: None,
            enumeration_ceiling: DEFAULT_ENUMERATION_CEILING,
            threads: 0,
        }
    }
}

/// A progress update emitted by the diverse generator at a fixed cadence.
#[derive(Clone, Copy, Debug)]
pub struct Progress {
    /// The number of distinct candidates in the pool so far.
    pub generated: usize,
    /// The pool bound the generator is working towards.
    pub target: usize,
}

/// Everything that can cut a solve short. No error is retried inside the engine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SolveError {
    /// The caller violated `1 <= s <= j <= k <= n`.
    InvalidParameters {
        /// The size of the ground set.
        n: usize,
        /// The requested group size.
        k: usize,
        /// The requested subgroup size.
        j: usize,
        /// The requested overlap threshold.
        s: usize,
    },

    /// The combination space exceeds the enumeration ceiling.
    ///
    /// Switch to [Mode::Diverse] or reduce the parameters.
    EnumerationTooLarge {
        /// The number of subsets that enumeration would have produced.
        subsets: u128,
        /// The ceiling that was exceeded.
        ceiling: u128,
    },

    /// The instance admits no solution.
    Infeasible {
        /// How many j-subsets are covered by no candidate, when the engine detected them before
        /// the backend ran. `None` means the backend itself proved the model unsatisfiable.
        uncovered: Option<usize>,
    },

    /// The backend exhausted its budget without finding any assignment.
    TimedOut,

    /// The caller cancelled the solve; partial state is discarded.
    Cancelled,
}

impl Display for SolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Self::InvalidParameters { n, k, j, s } => {
                write!(f, "Invalid parameters: expected 1 <= s <= j <= k <= n, got n={}, k={}, j={}, s={}.", n, k, j, s)
            }
            Self::EnumerationTooLarge { subsets, ceiling } => {
                write!(f, "Enumerating {} subsets exceeds the ceiling of {}; use the diverse mode or reduce the parameters.", subsets, ceiling)
            }
            Self::Infeasible { uncovered: Some(count) } => {
                write!(f, "No solution exists: {} j-subsets are covered by no candidate.", count)
            }
            Self::Infeasible { uncovered: None } => {
                f.write_str("No solution exists: the backend proved the model unsatisfiable.")
            }
            Self::TimedOut => f.write_str("The time budget ran out before any solution was found."),
            Self::Cancelled => f.write_str("The computation was cancelled."),
        }
    }
}

impl std::error::Error for SolveError {}

impl From<SizeLimit> for SolveError {
    fn from(limit: SizeLimit) -> Self {
        Self::EnumerationTooLarge { subsets: limit.subsets, ceiling: limit.ceiling }
    }
}

/// A covering design found by [solve]. Immutable once returned.
#[derive(Clone, Debug)]
pub struct Solution {
    /// The backend's verdict on the groups: proven minimal, valid, or found under time pressure.
    pub status: SolveStatus,

    /// The chosen groups as ascending label tuples.
    pub groups: UVec<UVec<u32>>,

    /// The number of candidates considered, before pruning.
    pub candidate_count: usize,

    /// The wall-clock time of the whole solve.
    pub solve_time: Duration,
}

/// The flat record a persistence collaborator may store and later replay.
///
/// Re-supplying the same `labels`, `k`, `j`, `s` to [solve] re-derives the groups.
#[derive(Clone, Debug)]
pub struct RunRecord {
    /// `m-n-k-j-s-<unix timestamp>`.
    pub run_id: String,
    /// The size of the label domain.
    pub m: u32,
    /// The size of the ground set.
    pub n: usize,
    /// The group size.
    pub k: usize,
    /// The subgroup size.
    pub j: usize,
    /// The overlap threshold.
    pub s: usize,
    /// The ground set.
    pub labels: UVec<u32>,
    /// How many groups the solution holds.
    pub group_count: usize,
    /// The wall-clock time of the solve.
    pub solve_time: Duration,
    /// Seconds since the unix epoch at record creation.
    pub timestamp: u64,
}

impl RunRecord {
    /// Create the record of a finished solve.
    pub fn new(design: &Design, solution: &Solution) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0);
        Self {
            run_id: format!("{}-{}-{}-{}-{}-{}", design.m, design.n(), design.k, design.j, design.s, timestamp),
            m: design.m,
            n: design.n(),
            k: design.k,
            j: design.j,
            s: design.s,
            labels: design.labels.clone(),
            group_count: solution.groups.len(),
            solve_time: solution.solve_time,
            timestamp,
        }
    }
}

/// Build the set-cover model of a coverage relation.
///
/// One decision variable per surviving candidate, one at-least-one clause per j-subset, in
/// j-subset order; the construction is bit-for-bit reproducible for a given relation.
/// Fails with [SolveError::Infeasible] when any j-subset has no covering candidate.
pub fn formulate(relation: &CoverageRelation<SampleIndex>) -> Result<Model, SolveError> {
    let by_target = relation.by_target();
    let uncovered = by_target.iter().filter(|covering| covering.is_empty()).count();
    if uncovered > 0 {
        return Err(SolveError::Infeasible { uncovered: Some(uncovered) });
    }

    let mut model = Model::new(relation.len());
    for covering in by_target {
        model.push_clause(covering);
    }
    Ok(model)
}

/// Find a minimum covering design for the given problem.
///
/// The `progress` callback receives generation updates at a fixed cadence; pair it with the
/// `cancel` token to abort long runs. Each invocation is self-contained: no state is shared
/// between solves beyond the seed in `options`.
pub fn solve(
    design: &Design,
    options: &SolveOptions,
    cancel: &CancelToken,
    progress: &mut dyn FnMut(Progress),
) -> Result<Solution, SolveError> {
    let start = Instant::now();
    let n = design.n();
    let (k, j, s) = (design.k, design.j, design.s);

    if s < 1 || j < s || k < j || n < k {
        return Err(SolveError::InvalidParameters { n, k, j, s });
    }

    let thread_count = if options.threads == 0 { num_cpus::get() } else { options.threads };

    // The j-subset universe is always enumerated in full; only the candidate side may be sampled.
    let targets = SubsetList::<SampleIndex>::enumerate(n, j, options.enumeration_ceiling)?;

    let exhaustive = match options.mode {
        Mode::Exact => true,
        Mode::Diverse => false,
        Mode::Auto => combination_count(n, k) <= options.enumeration_ceiling,
    };

    let pool = if exhaustive {
        SubsetList::enumerate(n, k, options.enumeration_ceiling)?
    } else {
        let seed = options.seed.unwrap_or_else(rand::random);
        diverse::generate(n, k, options.max_groups, seed, cancel, progress)
    };

    if cancel.is_cancelled() {
        return Err(SolveError::Cancelled);
    }

    let work = pool.len().saturating_mul(targets.len());
    let relation = if thread_count > 1 && work >= THREADED_BUILD_THRESHOLD {
        CoverageRelation::build_threaded(&targets, &pool, s, thread_count)
    } else {
        CoverageRelation::build(&targets, &pool, s)
    };

    let model = formulate(&relation)?;

    let config = SolverConfig {
        time_budget: options.time_budget,
        parallelism: thread_count,
        ..SolverConfig::default()
    };
    let outcome = SolverImpl::new().minimise(&model, &config, cancel);

    if cancel.is_cancelled() {
        return Err(SolveError::Cancelled);
    }

    let selected = match (outcome.status, outcome.selected) {
        (SolveStatus::Infeasible, _) => return Err(SolveError::Infeasible { uncovered: None }),
        (_, None) => return Err(SolveError::TimedOut),
        (_, Some(selected)) => selected,
    };

    let mut groups = SubsetList::with_capacity(k, selected.len());
    for candidate_id in selected {
        groups.push(relation.candidates.subset(candidate_id));
    }

    Ok(Solution {
        status: outcome.status,
        groups: design.project(&groups),
        candidate_count: pool.len(),
        solve_time: start.elapsed(),
    })
}

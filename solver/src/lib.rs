// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This crate provides the boolean minimisation model and wrappers around (SAT) solvers.
//!
//! # Model
//! A [Model] is the set-cover formulation of one solve: one boolean decision variable per
//! surviving candidate group, one at-least-one clause per j-subset, and the implied objective of
//! minimising the number of selected variables.
//!
//! # Solvers
//! The [Solver] trait is the backend boundary. One backend is provided:
//!   * [MiniSatSolver], which minimises by iterative cardinality tightening on top of MiniSat.
//!     Bindings to this SAT solver are provided by [minisat].
//!
//! The engine only depends on the trait; swapping in another backend means implementing
//! [Solver::minimise] for it and changing the [SolverImpl] alias.

#![deny(missing_docs, rustdoc::missing_crate_level_docs, future_incompatible)]

use std::time::Duration;

use common::UVec;

pub use solver_minisat::MiniSatSolver;

mod solver_minisat;


/// This type points to the default [Solver], which currently is [MiniSatSolver].
pub type SolverImpl = MiniSatSolver;

/// The boolean minimisation model submitted to a backend.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Model {
    /// The number of decision variables. Variable ids are `0..variables`.
    pub variables: usize,

    /// The disjunctive clauses; each entry lists the variable ids of which at least one must be
    /// selected. An empty clause makes the model infeasible.
    pub clauses: UVec<UVec<usize>>,
}

impl Model {
    /// Create a model with the given number of decision variables and no clauses.
    pub fn new(variables: usize) -> Self {
        Self { variables, clauses: UVec::new() }
    }

    /// Add an at-least-one clause over the given variable ids.
    pub fn push_clause(&mut self, clause: UVec<usize>) {
        debug_assert!(clause.iter().all(|&variable| variable < self.variables));
        self.clauses.push(clause);
    }
}

/// The status a backend reports alongside an assignment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SolveStatus {
    /// The assignment is proven minimal.
    Optimal,
    /// A valid but possibly non-minimal assignment was found before the search was cut short.
    Feasible,
    /// The model provably admits no assignment.
    Infeasible,
    /// The time budget ran out. An assignment found before the deadline, if any, is still valid.
    TimedOut,
}

/// The result of one [Solver::minimise] call.
#[derive(Clone, Debug)]
pub struct Outcome {
    /// How the search ended.
    pub status: SolveStatus,

    /// The selected variable ids, ascending. `None` only for [SolveStatus::Infeasible] and for
    /// [SolveStatus::TimedOut] without any assignment found.
    pub selected: Option<UVec<usize>>,

    /// The number of completed improvement rounds.
    pub rounds: usize,
}

/// Tuning knobs for a [Solver::minimise] call.
#[derive(Clone, Debug)]
pub struct SolverConfig {
    /// The wall-clock budget. Checked between improvement rounds; a round in progress is finished.
    pub time_budget: Duration,

    /// How many workers the backend may use. MiniSat searches sequentially and accepts the hint
    /// for interface parity only.
    pub parallelism: usize,

    /// A cap on improvement rounds, bounding the clauses added by cardinality tightening.
    pub max_rounds: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { time_budget: Duration::from_secs(60), parallelism: 1, max_rounds: 512 }
    }
}

/// This trait represents any type of minimisation backend and allows for switching between
/// backends without too much effort.
pub trait Solver: std::fmt::Display {
    /// Find an assignment satisfying every clause of the model while selecting as few variables
    /// as possible.
    ///
    /// The search is any-time: the best assignment found so far is returned when the budget or
    /// the round cap cuts it short. The backend does not retry internally.
    fn minimise(&mut self, model: &Model, config: &SolverConfig, cancel: &common::CancelToken) -> Outcome;
}

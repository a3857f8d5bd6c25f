// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use std::fmt::{Display, Error, Formatter};
use std::time::Instant;

use minisat::Bool;

use common::{CancelToken, UVec};

use crate::{Model, Outcome, Solver, SolverConfig, SolveStatus};

/// This solver uses MiniSat to provide the required minimisation features.
///
/// MiniSat decides satisfiability only, so the objective is handled by iterative cardinality
/// tightening: after every satisfying assignment with `c` selected variables, a sequential-counter
/// constraint `sum(x) <= c - 1` is added and the search repeats. The first unsatisfiable round
/// proves the previous assignment minimal.
///
/// Uses [minisat] as the backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct MiniSatSolver;

impl MiniSatSolver {
    /// Create a new solver front-end. The underlying MiniSat instance is created per call to
    /// [Solver::minimise]; no state survives between calls.
    pub fn new() -> Self {
        Self
    }
}

impl Solver for MiniSatSolver {
    fn minimise(&mut self, model: &Model, config: &SolverConfig, cancel: &CancelToken) -> Outcome {
        let start = Instant::now();
        let mut sat = minisat::Solver::new();

        let variables: Vec<Bool> = (0..model.variables).map(|_| sat.new_lit()).collect();
        for clause in model.clauses.iter() {
            sat.add_clause(clause.iter().map(|&variable| variables[variable]).collect::<Vec<Bool>>());
        }

        let mut best: Option<UVec<usize>> = None;
        let mut rounds = 0;

        loop {
            if cancel.is_cancelled() || start.elapsed() >= config.time_budget {
                return Outcome {
                    status: SolveStatus::TimedOut,
                    selected: best,
                    rounds,
                };
            }

            let selected = match sat.solve() {
                Ok(assignment) => {
                    let selected: UVec<usize> = variables.iter().enumerate()
                        .filter(|(_, variable)| assignment.value(*variable))
                        .map(|(id, _)| id)
                        .collect();
                    selected
                }
                Err(()) => {
                    return match best {
                        Some(selected) => Outcome { status: SolveStatus::Optimal, selected: Some(selected), rounds },
                        None => Outcome { status: SolveStatus::Infeasible, selected: None, rounds },
                    };
                }
            };

            rounds += 1;
            let bound = selected.len();
            best = Some(selected);

            if bound == 0 {
                // Nothing selected; no tighter assignment exists.
                return Outcome { status: SolveStatus::Optimal, selected: best, rounds };
            }
            if rounds >= config.max_rounds {
                return Outcome { status: SolveStatus::Feasible, selected: best, rounds };
            }

            add_at_most(&mut sat, &variables, bound - 1);
        }
    }
}

/// Add a sequential-counter constraint allowing at most `bound` of the given literals to be true.
fn add_at_most(sat: &mut minisat::Solver, literals: &[Bool], bound: usize) {
    if bound >= literals.len() {
        return;
    }
    if bound == 0 {
        for &literal in literals {
            sat.add_clause(vec![!literal]);
        }
        return;
    }

    // registers[r] tracks "at least r + 1 of the literals seen so far are true".
    let mut registers: Vec<Bool> = (0..bound).map(|_| sat.new_lit()).collect();
    sat.add_clause(vec![!literals[0], registers[0]]);
    for &register in registers.iter().skip(1) {
        sat.add_clause(vec![!register]);
    }

    for &literal in literals.iter().skip(1) {
        let next: Vec<Bool> = (0..bound).map(|_| sat.new_lit()).collect();
        sat.add_clause(vec![!literal, next[0]]);
        sat.add_clause(vec![!registers[0], next[0]]);
        for register in 1..bound {
            sat.add_clause(vec![!registers[register], next[register]]);
            sat.add_clause(vec![!literal, !registers[register - 1], next[register]]);
        }
        sat.add_clause(vec![!literal, !registers[bound - 1]]);
        registers = next;
    }
}

impl Display for MiniSatSolver {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        f.write_str("MiniSat")
    }
}

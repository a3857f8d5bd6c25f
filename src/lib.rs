// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This crate provides a minimum covering-design search engine: given a ground set of `n` samples,
//! it finds the smallest set of k-sample groups such that every j-sample subset shares at least `s`
//! samples with one of the chosen groups.
//!
//! The work happens in the member crates:
//!   * [design] The problem definition and the `*.design` file parser.
//!   * [subset_list] Dense storage and lexicographic enumeration of fixed-size index tuples.
//!   * [cover] The coverage relation between candidate groups and the j-subset universe.
//!   * [solver] The boolean minimisation model and the SAT backend.
//!   * [engine] The solve pipeline tying the above together, including the diverse candidate
//!     generator for large instances.
//!   * [writer] Output of a found design to a file.
//!   * [cli] Argument parsing for the binaries.
//!
//! # Features
//! This crate provides the following optional features:
//!   * `sub-time` Print the timings for all the [common::sub_time_it] calls.

#![deny(missing_docs, rustdoc::missing_crate_level_docs, future_incompatible)]

pub use cli;
pub use common;
pub use cover;
pub use design;
pub use engine;
pub use solver;
pub use subset_list;
pub use writer;

// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # PDP
//! This crate provides exact solvers for the partial digest problem (PDP):
//! given the multiset of all pairwise distances between n unknown points on a
//! line, reconstruct a set of points (including 0 and the largest coordinate,
//! the *width*) whose pairwise differences are exactly that multiset. This is
//! the computational core of restriction site mapping, where the points are
//! the cut sites of an enzyme along a DNA sequence.
//!
//! ## Solvers
//! Four solvers are provided. They all implement the `Solver` trait:
//!
//! * `PositionSearchSolver` assigns the points to the slots of a position map
//!   from left to right, pruning every assignment that would need a distance
//!   which is not available anymore.
//! * `BacktrackSetSolver` grows a point set depth first. At every step, the
//!   largest remaining distance `y` tells where the next point must be: either
//!   at `y` or at its mirror `width - y`.
//! * `IterativeSetSolver` develops the very same search tree breadth first and
//!   can resume the search from any partial point set.
//! * `TwoPhaseHybridSolver` expands the tree breadth first until some depth α
//!   and then resumes the nodes of that frontier one at a time, the ones with
//!   the fewest remaining distances first.
//!
//! ## Quick Example
//! ```
//! # use pdp::*;
//! let distances = [2, 3, 5];
//!
//! let mut solver = BacktrackSetSolver::new();
//! let solution   = solver.solve(&distances).unwrap();
//! assert!(is_valid_solution(solution.as_slice(), &distances));
//! ```
//!
//! #### Note:
//! A point set and its mirror image always have the same distances. Hence,
//! whenever an instance has a solution, it has at least two of them and the
//! solvers do not necessarily agree on which one they return.
//!
//! ## Interrupting a search
//! Each solver accepts a `Cutoff` (see `TimeBudget` and `NodeBudget`). When
//! it fires, `reconstruct` returns an inexact `Completion`: the search gave
//! up, which is different from proving there is no solution.
//! ```
//! # use pdp::*;
//! let mut solver = IterativeSetSolver::new().with_cutoff(NodeBudget::new(1_000));
//! let outcome    = solver.reconstruct(&[1, 1, 5]);
//! assert!(outcome.is_exact);
//! assert!(outcome.solution.is_none());
//! ```
mod common;
mod abstraction;
mod implementation;

pub mod validation;
pub mod instance;
pub mod benchmark;

pub use common::*;
pub use abstraction::*;
pub use implementation::*;
pub use validation::is_valid_solution;

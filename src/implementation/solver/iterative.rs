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

//! This module provides the implementation of the iterative point-set solver.
//! It explores the search states level by level (breadth first) and can be
//! resumed from any partial point set.

use log::{debug, trace};

use crate::abstraction::{Cutoff, Solver};
use crate::common::{Completion, Coord, PointSet, Reason};
use crate::implementation::heuristics::NoCutoff;
use crate::implementation::multiset::DistanceMultiset;
use crate::implementation::solver::utils::{NoDupSet, Watch};
use crate::implementation::state::SearchState;

/// The iterative solver develops the search tree one generation at a time.
/// All the children of a generation having the same point set are merged
/// (only the first one is kept): two states with the same points always have
/// the same remaining distances.
///
/// The search stops as soon as a generation contains a complete state, or
/// when a generation is empty (no solution).
///
/// # Example
/// ```
/// # use pdp::*;
/// let mut solver = IterativeSetSolver::new();
/// let solution   = solver.solve(&[2, 3, 5]).unwrap();
/// assert_eq!(solution.as_slice(), &[0, 3, 5]);
///
/// // resume the search from the partial solution {0, 5}
/// let resumed = solver.solve_partial(&[0, 5], &[2, 3]).unwrap();
/// assert_eq!(resumed.as_slice(), &[0, 3, 5]);
/// ```
pub struct IterativeSetSolver<C = NoCutoff> where C: Cutoff {
    cutoff  : C,
    explored: usize,
}

impl IterativeSetSolver<NoCutoff> {
    pub fn new() -> Self {
        IterativeSetSolver { cutoff: NoCutoff, explored: 0 }
    }
}
impl Default for IterativeSetSolver<NoCutoff> {
    fn default() -> Self {
        Self::new()
    }
}
impl <C: Cutoff> IterativeSetSolver<C> {
    pub fn with_cutoff<CC: Cutoff>(self, cutoff: CC) -> IterativeSetSolver<CC> {
        IterativeSetSolver { cutoff, explored: self.explored }
    }

    /// Completes the given partial solution so that it explains the leftover
    /// distances. The partial solution must be sorted and hold at least its
    /// two ends (0 and the width). When nothing is left over, the partial
    /// solution is returned unchanged (and is not checked).
    ///
    /// # Panics
    /// When some distances are left over and the partial solution has fewer
    /// than two points or is not sorted.
    pub fn solve_partial(&mut self, partial: &[Coord], leftover: &[Coord]) -> Option<PointSet> {
        self.resume(partial, leftover).solution
    }

    /// Same as `solve_partial` but tells an exhausted search apart from an
    /// interrupted one.
    pub fn resume(&mut self, partial: &[Coord], leftover: &[Coord]) -> Completion {
        if leftover.is_empty() {
            self.explored = 0;
            return Completion { is_exact: true, solution: Some(PointSet::from(partial)) };
        }
        assert!(partial.len() >= 2, "a partial solution holds at least both ends");
        assert!(partial.windows(2).all(|w| w[0] <= w[1]), "a partial solution must be sorted");

        let state = SearchState::new(PointSet::from(partial), DistanceMultiset::from(leftover));
        let mut watch = Watch::new(&self.cutoff);
        let outcome   = Self::resume_with(state, &mut watch);
        self.explored = watch.explored();

        Completion::from_search(outcome)
    }

    /// Runs the level by level expansion from the given state. This is the
    /// engine shared with the two phase solver (which provides its own watch
    /// so that the whole search is accounted for).
    pub(crate) fn resume_with<K: Cutoff>(state: SearchState, watch: &mut Watch<K>) -> Result<Option<PointSet>, Reason> {
        if state.is_complete() {
            return Ok(Some(state.points));
        }

        let mut depth   = 0;
        let mut current = vec![state];
        loop {
            let mut seen = NoDupSet::new();
            let mut next = vec![];
            for state in current.iter().filter(|s| !s.is_complete()) {
                watch.tick()?;
                for child in state.children() {
                    if seen.insert(child.points.clone()) {
                        next.push(child);
                    }
                }
            }
            depth += 1;
            trace!("iterative: level {} holds {} states", depth, next.len());

            if let Some(done) = next.iter().position(SearchState::is_complete) {
                return Ok(Some(next.swap_remove(done).points));
            }
            if next.is_empty() {
                return Ok(None);
            }
            current = next;
        }
    }
}

impl <C: Cutoff> Solver for IterativeSetSolver<C> {
    fn reconstruct(&mut self, distances: &[Coord]) -> Completion {
        self.explored = 0;
        let root = match SearchState::root(distances) {
            Some(root) => root,
            None       => return Completion { is_exact: true, solution: None },
        };

        let mut watch = Watch::new(&self.cutoff);
        let outcome   = Self::resume_with(root, &mut watch);
        self.explored = watch.explored();

        debug!("iterative: m {}, explored {}, found {:?}, in {:?}",
            distances.len(), self.explored,
            outcome.as_ref().map(|s| s.is_some()), watch.elapsed());

        Completion::from_search(outcome)
    }
    fn explored(&self) -> usize {
        self.explored
    }
    fn name(&self) -> &'static str {
        "BBb"
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_solver {
    use crate::abstraction::Solver;
    use crate::implementation::heuristics::NodeBudget;
    use crate::implementation::solver::iterative::IterativeSetSolver;
    use crate::validation::is_valid_solution;

    #[test]
    fn it_solves_the_classic_example() {
        let d = [1, 2, 3, 4, 5, 6, 7, 7, 8, 1];
        let mut solver = IterativeSetSolver::new();
        let x = solver.solve(&d).unwrap();
        assert!(is_valid_solution(x.as_slice(), &d));
        assert_eq!(x.len(), 5);
    }
    #[test]
    fn a_single_distance_yields_both_ends() {
        let mut solver = IterativeSetSolver::new();
        assert_eq!(solver.solve(&[6]).unwrap().as_slice(), &[0, 6]);
    }
    #[test]
    fn an_empty_instance_yields_no_solution() {
        let mut solver = IterativeSetSolver::new();
        assert!(solver.reconstruct(&[]).is_unsat());
    }
    #[test]
    fn an_unrealizable_instance_yields_no_solution() {
        let mut solver = IterativeSetSolver::new();
        assert!(solver.reconstruct(&[1, 1, 5]).is_unsat());
    }
    #[test]
    fn a_cutoff_makes_the_completion_inexact() {
        let d = [1, 2, 3, 4, 5, 6, 7, 7, 8, 1];
        let mut solver = IterativeSetSolver::new().with_cutoff(NodeBudget::new(1));
        let outcome = solver.reconstruct(&d);
        assert!(!outcome.is_exact);
        assert_eq!(None, outcome.solution);
    }
    #[test]
    fn its_name_is_bbb() {
        assert_eq!("BBb", IterativeSetSolver::new().name());
    }
}

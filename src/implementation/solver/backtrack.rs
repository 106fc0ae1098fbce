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

//! This module provides the implementation of the backtracking point-set
//! solver. It is a plain depth first search over the search states: each
//! expansion tries the largest remaining distance and then its mirror.

use log::debug;

use crate::abstraction::{Cutoff, Solver};
use crate::common::{Completion, Coord, PointSet, Reason};
use crate::implementation::heuristics::NoCutoff;
use crate::implementation::solver::utils::Watch;
use crate::implementation::state::SearchState;

/// The backtracking solver explores the search states depth first. Since the
/// states are never mutated, backtracking amounts to dropping a child and
/// trying the next candidate of its parent.
///
/// When several solutions exist, the one returned is the first one found
/// when trying `y` before `width - y` at every level.
///
/// # Example
/// ```
/// # use pdp::*;
/// let mut solver = BacktrackSetSolver::new();
/// let solution   = solver.solve(&[1, 2, 3, 4, 5, 6, 7, 7, 8, 1]).unwrap();
/// assert_eq!(solution.width(), Some(8));
/// assert_eq!(solution.len(), 5);
/// ```
pub struct BacktrackSetSolver<C = NoCutoff> where C: Cutoff {
    cutoff  : C,
    explored: usize,
}

impl BacktrackSetSolver<NoCutoff> {
    pub fn new() -> Self {
        BacktrackSetSolver { cutoff: NoCutoff, explored: 0 }
    }
}
impl Default for BacktrackSetSolver<NoCutoff> {
    fn default() -> Self {
        Self::new()
    }
}
impl <C: Cutoff> BacktrackSetSolver<C> {
    pub fn with_cutoff<CC: Cutoff>(self, cutoff: CC) -> BacktrackSetSolver<CC> {
        BacktrackSetSolver { cutoff, explored: self.explored }
    }

    fn place<K: Cutoff>(state: &SearchState, watch: &mut Watch<K>) -> Result<Option<PointSet>, Reason> {
        if state.is_complete() {
            return Ok(Some(state.points.clone()));
        }
        watch.tick()?;

        for child in state.children() {
            if let Some(solution) = Self::place(&child, watch)? {
                return Ok(Some(solution));
            }
        }
        Ok(None)
    }
}

impl <C: Cutoff> Solver for BacktrackSetSolver<C> {
    fn reconstruct(&mut self, distances: &[Coord]) -> Completion {
        self.explored = 0;
        let root = match SearchState::root(distances) {
            Some(root) => root,
            None       => return Completion { is_exact: true, solution: None },
        };

        let mut watch = Watch::new(&self.cutoff);
        let outcome   = Self::place(&root, &mut watch);
        self.explored = watch.explored();

        debug!("backtrack: m {}, explored {}, found {:?}, in {:?}",
            distances.len(), self.explored,
            outcome.as_ref().map(|s| s.is_some()), watch.elapsed());

        Completion::from_search(outcome)
    }
    fn explored(&self) -> usize {
        self.explored
    }
    fn name(&self) -> &'static str {
        "BBd"
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_solver {
    use crate::abstraction::Solver;
    use crate::implementation::heuristics::NodeBudget;
    use crate::implementation::solver::backtrack::BacktrackSetSolver;
    use crate::validation::is_valid_solution;

    #[test]
    fn it_solves_the_classic_example() {
        let d = [1, 2, 3, 4, 5, 6, 7, 7, 8, 1];
        let mut solver = BacktrackSetSolver::new();
        let x = solver.solve(&d).unwrap();
        assert!(is_valid_solution(x.as_slice(), &d));
    }
    #[test]
    fn y_is_tried_before_its_mirror() {
        let mut solver = BacktrackSetSolver::new();
        assert_eq!(solver.solve(&[2, 3, 5]).unwrap().as_slice(), &[0, 3, 5]);
    }
    #[test]
    fn a_single_distance_yields_both_ends() {
        let mut solver = BacktrackSetSolver::new();
        assert_eq!(solver.solve(&[4]).unwrap().as_slice(), &[0, 4]);
        assert_eq!(0, solver.explored());
    }
    #[test]
    fn an_empty_instance_yields_no_solution() {
        let mut solver = BacktrackSetSolver::new();
        let outcome = solver.reconstruct(&[]);
        assert!(outcome.is_unsat());
    }
    #[test]
    fn an_unrealizable_instance_yields_no_solution() {
        let mut solver = BacktrackSetSolver::new();
        let outcome = solver.reconstruct(&[1, 1, 5]);
        assert!(outcome.is_unsat());
        assert_eq!(1, solver.explored());
    }
    #[test]
    fn a_cutoff_makes_the_completion_inexact() {
        let d = [1, 2, 3, 4, 5, 6, 7, 7, 8, 1];
        let mut solver = BacktrackSetSolver::new().with_cutoff(NodeBudget::new(0));
        let outcome = solver.reconstruct(&d);
        assert!(!outcome.is_exact);
        assert_eq!(None, outcome.solution);
    }
    #[test]
    fn explored_is_reset_between_searches() {
        let d = [1, 2, 3, 4, 5, 6, 7, 7, 8, 1];
        let mut solver = BacktrackSetSolver::new();
        solver.solve(&d);
        assert!(solver.explored() > 0);
        solver.solve(&[3]);
        assert_eq!(0, solver.explored());
    }
    #[test]
    fn its_name_is_bbd() {
        assert_eq!("BBd", BacktrackSetSolver::new().name());
    }
}

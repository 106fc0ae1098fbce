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

//! This module provides the implementation of the two phase hybrid solver. It
//! starts with a breadth first expansion of the search states down to a
//! fixed depth α, and then resumes the nodes of that frontier one at a time
//! with the iterative engine.

use log::{debug, trace};

use crate::abstraction::{Cutoff, Frontier, Solver};
use crate::common::{Completion, Coord, PointSet, Reason};
use crate::implementation::frontier::AlphaFrontier;
use crate::implementation::heuristics::{alpha_cutoff, nb_points, NoCutoff};
use crate::implementation::solver::iterative::IterativeSetSolver;
use crate::implementation::solver::utils::{NoDupSet, Watch};
use crate::implementation::state::SearchState;
use crate::validation::is_valid_solution;

/// The two phase hybrid solver.
///
/// * Phase 1 develops the search states breadth first until depth α. States
///   are deduplicated across all generations (a point set reached at an
///   earlier depth is never developed twice). The states of the last
///   generation, along with the complete states met on the way, form the
///   frontier.
/// * Phase 2 pops the frontier nodes (by default, the ones having the fewest
///   remaining distances first) and resumes each of them with the iterative
///   engine. The first candidate whose pairwise distances are exactly the
///   distances of the instance is returned.
///
/// Unless it is fixed with `with_alpha`, α is derived from the instance size
/// with `alpha_cutoff`.
///
/// # Example
/// ```
/// # use pdp::*;
/// let d = [1, 2, 3, 4, 5, 6, 7, 7, 8, 1];
/// let mut solver = TwoPhaseHybridSolver::new();
/// let solution   = solver.solve(&d).unwrap();
/// assert!(is_valid_solution(solution.as_slice(), &d));
/// assert_eq!(2, solver.alpha());
/// ```
pub struct TwoPhaseHybridSolver<C = NoCutoff, F = AlphaFrontier>
    where C: Cutoff,
          F: Frontier
{
    cutoff       : C,
    frontier     : F,
    alpha        : Option<usize>,
    explored     : usize,
    last_alpha   : usize,
    frontier_size: usize,
}

impl TwoPhaseHybridSolver<NoCutoff, AlphaFrontier> {
    pub fn new() -> Self {
        TwoPhaseHybridSolver {
            cutoff       : NoCutoff,
            frontier     : AlphaFrontier::default(),
            alpha        : None,
            explored     : 0,
            last_alpha   : 0,
            frontier_size: 0,
        }
    }
}
impl Default for TwoPhaseHybridSolver<NoCutoff, AlphaFrontier> {
    fn default() -> Self {
        Self::new()
    }
}
impl <C: Cutoff, F: Frontier> TwoPhaseHybridSolver<C, F> {
    pub fn with_cutoff<CC: Cutoff>(self, cutoff: CC) -> TwoPhaseHybridSolver<CC, F> {
        TwoPhaseHybridSolver {
            cutoff,
            frontier     : self.frontier,
            alpha        : self.alpha,
            explored     : self.explored,
            last_alpha   : self.last_alpha,
            frontier_size: self.frontier_size,
        }
    }
    /// Replaces the order in which the frontier nodes are resumed.
    pub fn with_frontier<FF: Frontier>(self, frontier: FF) -> TwoPhaseHybridSolver<C, FF> {
        TwoPhaseHybridSolver {
            cutoff       : self.cutoff,
            frontier,
            alpha        : self.alpha,
            explored     : self.explored,
            last_alpha   : self.last_alpha,
            frontier_size: self.frontier_size,
        }
    }
    /// Fixes the depth of the breadth first phase. The value is clamped into
    /// `[1, n-1]` (n being the number of points of the instance) when solving.
    pub fn with_alpha(mut self, alpha: usize) -> Self {
        self.alpha = Some(alpha);
        self
    }
    /// The α used by the last search
    pub fn alpha(&self) -> usize {
        self.last_alpha
    }
    /// The number of nodes in the frontier when the last search entered its
    /// second phase.
    pub fn frontier_size(&self) -> usize {
        self.frontier_size
    }

    fn effective_alpha(&self, n: usize) -> usize {
        match self.alpha {
            Some(alpha) => alpha.clamp(1, n.saturating_sub(1).max(1)),
            None        => alpha_cutoff(n),
        }
    }

    /// Phase 1: fills the frontier with the states reached at depth α (and
    /// with the complete states reached before that).
    fn expand<K: Cutoff>(root: SearchState, alpha: usize, frontier: &mut F, watch: &mut Watch<K>) -> Result<(), Reason> {
        let mut visited = NoDupSet::new();
        visited.insert(root.points.clone());

        let mut level = vec![root];
        for _ in 0..alpha {
            let mut next = vec![];
            for state in level {
                if state.is_complete() {
                    frontier.push(state);
                    continue;
                }
                watch.tick()?;
                for child in state.children() {
                    if visited.insert(child.points.clone()) {
                        next.push(child);
                    }
                }
            }
            level = next;
            if level.is_empty() {
                break;
            }
        }
        trace!("two phase: phase 1 reached {} distinct states", visited.len());
        for state in level {
            frontier.push(state);
        }
        Ok(())
    }

    /// Phase 2: resumes the frontier nodes until one of them yields a valid
    /// reconstruction of the distances.
    fn exploit<K: Cutoff>(distances: &[Coord], frontier: &mut F, watch: &mut Watch<K>) -> Result<Option<PointSet>, Reason> {
        while let Some(node) = frontier.pop() {
            let candidate = if node.is_complete() {
                Some(node.points)
            } else {
                IterativeSetSolver::<NoCutoff>::resume_with(node, watch)?
            };

            if let Some(points) = candidate {
                if is_valid_solution(points.as_slice(), distances) {
                    return Ok(Some(points));
                }
            }
        }
        Ok(None)
    }
}

impl <C: Cutoff, F: Frontier> Solver for TwoPhaseHybridSolver<C, F> {
    fn reconstruct(&mut self, distances: &[Coord]) -> Completion {
        self.explored      = 0;
        self.frontier_size = 0;
        self.frontier.clear();

        let n = nb_points(distances.len());
        self.last_alpha = self.effective_alpha(n);

        let root = match SearchState::root(distances) {
            Some(root) => root,
            None       => return Completion { is_exact: true, solution: None },
        };

        let mut watch = Watch::new(&self.cutoff);
        let outcome   = Self::expand(root, self.last_alpha, &mut self.frontier, &mut watch)
            .and_then(|_| {
                self.frontier_size = self.frontier.len();
                Self::exploit(distances, &mut self.frontier, &mut watch)
            });
        self.explored = watch.explored();
        self.frontier.clear();

        debug!("two phase: n {}, alpha {}, frontier {}, explored {}, found {:?}, in {:?}",
            n, self.last_alpha, self.frontier_size, self.explored,
            outcome.as_ref().map(|s| s.is_some()), watch.elapsed());

        Completion::from_search(outcome)
    }
    fn explored(&self) -> usize {
        self.explored
    }
    fn name(&self) -> &'static str {
        "BBb2"
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_solver {
    use crate::abstraction::Solver;
    use crate::implementation::frontier::InsertionOrderFrontier;
    use crate::implementation::heuristics::NodeBudget;
    use crate::implementation::solver::hybrid::TwoPhaseHybridSolver;
    use crate::validation::is_valid_solution;

    const CLASSIC: [isize; 10] = [1, 2, 3, 4, 5, 6, 7, 7, 8, 1];

    #[test]
    fn it_solves_the_classic_example() {
        let mut solver = TwoPhaseHybridSolver::new();
        let x = solver.solve(&CLASSIC).unwrap();
        assert!(is_valid_solution(x.as_slice(), &CLASSIC));
        assert_eq!(2, solver.alpha());
        assert!(solver.frontier_size() > 0);
    }
    #[test]
    fn any_alpha_yields_a_valid_solution() {
        for alpha in 0..8 {
            let mut solver = TwoPhaseHybridSolver::new().with_alpha(alpha);
            let x = solver.solve(&CLASSIC).unwrap();
            assert!(is_valid_solution(x.as_slice(), &CLASSIC));
        }
    }
    #[test]
    fn alpha_is_clamped() {
        let mut solver = TwoPhaseHybridSolver::new().with_alpha(0);
        solver.solve(&CLASSIC);
        assert_eq!(1, solver.alpha());

        let mut solver = TwoPhaseHybridSolver::new().with_alpha(100);
        solver.solve(&CLASSIC);
        assert_eq!(4, solver.alpha());
    }
    #[test]
    fn the_frontier_pops_the_smallest_point_set_on_ties() {
        // {0, 3, 5} and {0, 2, 5} are both complete at depth 1
        let mut solver = TwoPhaseHybridSolver::new();
        assert_eq!(solver.solve(&[2, 3, 5]).unwrap().as_slice(), &[0, 2, 5]);
    }
    #[test]
    fn the_frontier_order_can_be_replaced() {
        let mut solver = TwoPhaseHybridSolver::new()
            .with_frontier(InsertionOrderFrontier::default());
        assert_eq!(solver.solve(&[2, 3, 5]).unwrap().as_slice(), &[0, 3, 5]);
    }
    #[test]
    fn a_single_distance_yields_both_ends() {
        let mut solver = TwoPhaseHybridSolver::new();
        assert_eq!(solver.solve(&[3]).unwrap().as_slice(), &[0, 3]);
    }
    #[test]
    fn an_empty_instance_yields_no_solution() {
        let mut solver = TwoPhaseHybridSolver::new();
        assert!(solver.reconstruct(&[]).is_unsat());
    }
    #[test]
    fn an_unrealizable_instance_yields_no_solution() {
        let mut solver = TwoPhaseHybridSolver::new();
        assert!(solver.reconstruct(&[1, 1, 5]).is_unsat());
    }
    #[test]
    fn a_cutoff_makes_the_completion_inexact() {
        let mut solver = TwoPhaseHybridSolver::new().with_cutoff(NodeBudget::new(0));
        let outcome = solver.reconstruct(&CLASSIC);
        assert!(!outcome.is_exact);
        assert_eq!(None, outcome.solution);
    }
    #[test]
    fn the_solver_can_be_reused() {
        let mut solver = TwoPhaseHybridSolver::new();
        assert!(solver.solve(&[1, 1, 5]).is_none());
        assert!(solver.solve(&CLASSIC).is_some());
        assert!(solver.solve(&[2, 3, 5]).is_some());
    }
    #[test]
    fn its_name_is_bbb2() {
        assert_eq!("BBb2", TwoPhaseHybridSolver::new().name());
    }
}

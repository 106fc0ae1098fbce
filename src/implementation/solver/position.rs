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

//! This module provides the implementation of the position search solver: a
//! depth first search which assigns absolute coordinates to the slots of a
//! position map, from left to right.

use log::debug;

use crate::abstraction::{Cutoff, Solver};
use crate::common::{Completion, Coord, PointSet, Reason};
use crate::implementation::heuristics::{nb_points, NoCutoff};
use crate::implementation::multiset::DistanceMultiset;
use crate::implementation::solver::utils::Watch;
use crate::validation::is_valid_solution;

/// The position map has one slot per point of the solution. The first slot
/// always holds 0 and the last one always holds the total length; the other
/// slots are assigned in strictly increasing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionMap {
    slots: Vec<Option<Coord>>
}
impl PositionMap {
    /// Creates a map of `n` slots where only both ends are assigned.
    pub fn new(n: usize, total_length: Coord) -> Self {
        let mut slots = vec![None; n];
        if let Some(first) = slots.first_mut() {
            *first = Some(0);
        }
        if let Some(last) = slots.last_mut() {
            *last = Some(total_length);
        }
        PositionMap { slots }
    }
    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
    pub fn get(&self, ind: usize) -> Option<Coord> {
        self.slots.get(ind).copied().flatten()
    }
    pub fn assign(&mut self, ind: usize, pos: Coord) {
        self.slots[ind] = Some(pos);
    }
    pub fn unassign(&mut self, ind: usize) {
        self.slots[ind] = None;
    }
    /// Iterates over the values of all assigned slots
    pub fn assigned(&self) -> impl Iterator<Item=Coord> + '_ {
        self.slots.iter().flatten().copied()
    }
    /// The point set formed by the assigned slots
    pub fn points(&self) -> PointSet {
        PointSet::new(self.assigned().collect())
    }
}

/// This solver reconstructs the map by trying every admissible coordinate for
/// each slot of a `PositionMap`. After each tentative assignment it checks
/// that the distances between the newly assigned slot and all the slots
/// assigned before (both ends included) are still available in the multiset;
/// the branch is pruned as soon as this is not the case.
///
/// Unlike the point-set solvers, this one needs to be told the total length
/// of the map. When used through the `Solver` trait, it defaults to the
/// largest distance of the instance.
///
/// # Example
/// ```
/// # use pdp::*;
/// let mut solver = PositionSearchSolver::new();
/// let solution   = solver.solve(&[2, 3, 5], 5).unwrap();
/// assert!(is_valid_solution(solution.as_slice(), &[2, 3, 5]));
/// ```
pub struct PositionSearchSolver<C = NoCutoff> where C: Cutoff {
    cutoff      : C,
    total_length: Option<Coord>,
    explored    : usize,
    total_paths : u64,
}

impl PositionSearchSolver<NoCutoff> {
    pub fn new() -> Self {
        PositionSearchSolver {
            cutoff      : NoCutoff,
            total_length: None,
            explored    : 0,
            total_paths : 0,
        }
    }
}
impl Default for PositionSearchSolver<NoCutoff> {
    fn default() -> Self {
        Self::new()
    }
}
impl <C: Cutoff> PositionSearchSolver<C> {
    pub fn with_cutoff<CC: Cutoff>(self, cutoff: CC) -> PositionSearchSolver<CC> {
        PositionSearchSolver {
            cutoff,
            total_length: self.total_length,
            explored    : self.explored,
            total_paths : self.total_paths,
        }
    }
    /// Fixes the total length used when the solver is driven through the
    /// `Solver` trait.
    pub fn with_total_length(mut self, total_length: Coord) -> Self {
        self.total_length = Some(total_length);
        self
    }
    /// Returns a point set spanning `[0, total_length]` whose pairwise
    /// distances are exactly the given multiset; or None if there is none.
    pub fn solve(&mut self, distances: &[Coord], total_length: Coord) -> Option<PointSet> {
        self.search(distances, total_length).solution
    }
    /// A (very) rough upper bound on the number of paths of the last search.
    pub fn total_paths(&self) -> u64 {
        self.total_paths
    }

    /// Same as `solve` but tells an exhausted search apart from an
    /// interrupted one.
    pub fn search(&mut self, distances: &[Coord], total_length: Coord) -> Completion {
        let n = nb_points(distances.len());
        self.explored    = 0;
        self.total_paths = estimate_paths(n, total_length);

        if n < 2 {
            return Completion { is_exact: true, solution: None };
        }

        let mut remaining = DistanceMultiset::from(distances);
        if !remaining.remove(total_length) {
            debug!("position search: total length {} is not a distance", total_length);
            return Completion { is_exact: true, solution: None };
        }

        let mut assignment = Assignment {
            map: PositionMap::new(n, total_length),
            remaining,
            original: distances,
            total_length,
        };
        let mut watch = Watch::new(&self.cutoff);
        let outcome   = assignment.place(1, &mut watch)
            .map(|found| if found { Some(assignment.map.points()) } else { None });

        self.explored = watch.explored();
        debug!("position search: n {}, length {}, explored {}, paths <= {}, found {:?}, in {:?}",
            n, total_length, self.explored, self.total_paths,
            outcome.as_ref().map(|s| s.is_some()), watch.elapsed());

        Completion::from_search(outcome)
    }
}

impl <C: Cutoff> Solver for PositionSearchSolver<C> {
    fn reconstruct(&mut self, distances: &[Coord]) -> Completion {
        let total_length = self.total_length
            .or_else(|| distances.iter().copied().max());

        match total_length {
            Some(length) => self.search(distances, length),
            None         => {
                self.explored = 0;
                Completion { is_exact: true, solution: None }
            }
        }
    }
    fn explored(&self) -> usize {
        self.explored
    }
    fn name(&self) -> &'static str {
        "BasicMapSolver"
    }
}

/// `prod_{i=1}^{n-2} max(1, total_length - i)`, saturating.
fn estimate_paths(n: usize, total_length: Coord) -> u64 {
    let mut total: u64 = 1;
    for i in 1..n.saturating_sub(1) {
        let range = (total_length - i as Coord).max(1) as u64;
        total = total.saturating_mul(range);
    }
    total
}

/// The mutable state of one position search.
struct Assignment<'a> {
    map         : PositionMap,
    /// the distances not yet consumed by a pair of assigned slots
    remaining   : DistanceMultiset,
    original    : &'a [Coord],
    total_length: Coord,
}
impl Assignment<'_> {
    /// Assigns slot `ind` and all the slots to its right. Returns true iff a
    /// solution was found (in which case the map holds it).
    fn place<C: Cutoff>(&mut self, ind: usize, watch: &mut Watch<C>) -> Result<bool, Reason> {
        let last = self.map.len() - 1;
        if ind == last {
            return Ok(is_valid_solution(self.map.points().as_slice(), self.original));
        }
        watch.tick()?;

        let lo = self.map.get(ind - 1).unwrap_or(0) + 1;
        let hi = self.total_length - (last - ind) as Coord;
        for pos in lo..=hi {
            if let Some(consumed) = self.consume(ind, pos) {
                self.map.assign(ind, pos);
                if self.place(ind + 1, watch)? {
                    return Ok(true);
                }
                self.map.unassign(ind);
                self.remaining.extend(consumed);
            }
        }
        Ok(false)
    }
    /// Consumes the distances between `pos` and every assigned slot (slots
    /// `0..ind` and the end of the map). Returns the consumed distances, or
    /// None (consuming nothing) if one of them is not available anymore.
    fn consume(&mut self, ind: usize, pos: Coord) -> Option<Vec<Coord>> {
        let last = self.map.len() - 1;
        let mut deltas = Vec::with_capacity(ind + 1);
        for j in (0..ind).chain(std::iter::once(last)) {
            if let Some(x) = self.map.get(j) {
                deltas.push((pos - x).abs());
            }
        }
        if self.remaining.remove_all(&deltas) {
            Some(deltas)
        } else {
            None
        }
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_position_map {
    use crate::implementation::solver::position::PositionMap;

    #[test]
    fn both_ends_are_assigned_from_the_start() {
        let map = PositionMap::new(4, 10);
        assert_eq!(Some(0),  map.get(0));
        assert_eq!(None,     map.get(1));
        assert_eq!(None,     map.get(2));
        assert_eq!(Some(10), map.get(3));
    }
    #[test]
    fn assign_then_unassign() {
        let mut map = PositionMap::new(3, 5);
        map.assign(1, 2);
        assert_eq!(map.points().as_slice(), &[0, 2, 5]);
        map.unassign(1);
        assert_eq!(map.points().as_slice(), &[0, 5]);
    }
}

#[cfg(test)]
mod test_solver {
    use crate::abstraction::Solver;
    use crate::implementation::heuristics::NodeBudget;
    use crate::implementation::solver::position::PositionSearchSolver;
    use crate::validation::is_valid_solution;

    #[test]
    fn by_default_nothing_was_explored() {
        let solver = PositionSearchSolver::new();
        assert_eq!(0, solver.explored());
        assert_eq!(0, solver.total_paths());
    }
    #[test]
    fn it_solves_a_three_point_instance() {
        let mut solver = PositionSearchSolver::new();
        let x = solver.solve(&[2, 3, 5], 5).unwrap();
        assert!(is_valid_solution(x.as_slice(), &[2, 3, 5]));
        assert_eq!(x.len(), 3);
    }
    #[test]
    fn the_leftmost_assignment_is_found_first() {
        let mut solver = PositionSearchSolver::new();
        let x = solver.solve(&[5, 2, 3], 5).unwrap();
        assert_eq!(x.as_slice(), &[0, 2, 5]);
    }
    #[test]
    fn it_solves_the_classic_example() {
        let d = [1, 2, 3, 4, 5, 6, 7, 7, 8, 1];
        let mut solver = PositionSearchSolver::new();
        let x = solver.solve(&d, 8).unwrap();
        assert!(is_valid_solution(x.as_slice(), &d));
    }
    #[test]
    fn two_points_need_no_search() {
        let mut solver = PositionSearchSolver::new();
        assert_eq!(solver.solve(&[9], 9).unwrap().as_slice(), &[0, 9]);
        assert_eq!(0, solver.explored());
    }
    #[test]
    fn a_wrong_total_length_yields_no_solution() {
        let mut solver = PositionSearchSolver::new();
        assert_eq!(None, solver.solve(&[2, 3, 5], 6));
        assert_eq!(None, solver.solve(&[2, 3, 5], 3));
    }
    #[test]
    fn an_unrealizable_instance_yields_no_solution() {
        let mut solver = PositionSearchSolver::new();
        let outcome = solver.search(&[1, 1, 5], 5);
        assert!(outcome.is_unsat());
    }
    #[test]
    fn an_empty_instance_yields_no_solution() {
        let mut solver = PositionSearchSolver::new();
        assert!(solver.reconstruct(&[]).is_unsat());
    }
    #[test]
    fn through_the_trait_the_total_length_is_the_width() {
        let mut solver = PositionSearchSolver::new();
        let d = [3, 4, 7];
        let x = Solver::solve(&mut solver, &d).unwrap();
        assert_eq!(x.width(), Some(7));
    }
    #[test]
    fn the_configured_total_length_wins() {
        let mut solver = PositionSearchSolver::new().with_total_length(6);
        assert!(solver.reconstruct(&[3, 4, 7]).is_unsat());
    }
    #[test]
    fn the_search_can_be_cut_off() {
        let d = [1, 2, 3, 4, 5, 6, 7, 7, 8, 1];
        let mut solver = PositionSearchSolver::new().with_cutoff(NodeBudget::new(1));
        let outcome = solver.reconstruct(&d);
        assert!(!outcome.is_exact);
        assert!(outcome.solution.is_none());
    }
    #[test]
    fn the_solver_can_be_reused() {
        let mut solver = PositionSearchSolver::new();
        assert!(solver.solve(&[1, 1, 5], 5).is_none());
        assert!(solver.solve(&[2, 3, 5], 5).is_some());
        assert!(solver.solve(&[1, 1, 2], 2).is_some());
    }
    #[test]
    fn total_paths_is_a_rough_upper_bound() {
        let mut solver = PositionSearchSolver::new();
        solver.solve(&[1, 2, 3, 4, 5, 6, 7, 7, 8, 1], 8);
        // (8-1) * (8-2) * (8-3)
        assert_eq!(210, solver.total_paths());
    }
}

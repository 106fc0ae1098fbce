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

//! This module defines the search state shared by the three point-set solvers
//! (backtracking, iterative and two phase hybrid).

use crate::common::{Coord, PointSet};
use crate::implementation::multiset::{delta, DistanceMultiset};

/// A search state is a pair (remaining distances, partial point set). The
/// remaining distances are those of the instance that are not yet explained
/// by a pair of points of the partial point set.
///
/// States are never mutated in place: expanding a state produces brand new
/// children and leaves the parent untouched. A rejected candidate therefore
/// never needs to be rolled back.
///
/// # Example
/// ```
/// # use pdp::SearchState;
/// let root = SearchState::root(&[2, 3, 5]).unwrap();
/// assert_eq!(root.points.as_slice(), &[0, 5]);
/// assert_eq!(root.remaining.to_vec(), vec![2, 3]);
///
/// let child = root.place(3).unwrap();
/// assert_eq!(child.points.as_slice(), &[0, 3, 5]);
/// assert!(child.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchState {
    /// The distances which still need to be explained
    pub remaining: DistanceMultiset,
    /// The points placed so far (sorted, 0 first and width last)
    pub points: PointSet,
}

impl SearchState {
    pub fn new(points: PointSet, remaining: DistanceMultiset) -> Self {
        SearchState { remaining, points }
    }
    /// Creates the root state of a search: the width (largest distance) is
    /// explained by the two ends of the map, all other distances remain.
    /// There is no root for an empty multiset.
    pub fn root(distances: &[Coord]) -> Option<Self> {
        let mut remaining = DistanceMultiset::from(distances);
        let width = remaining.max()?;
        remaining.remove(width);
        Some(SearchState { remaining, points: PointSet::seed(width) })
    }
    /// A state is complete (accepting) once all distances have been explained
    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty()
    }
    /// The width of the map (the largest placed point)
    pub fn width(&self) -> Coord {
        self.points.width().unwrap_or(0)
    }
    /// The candidate positions for the next point, in the order they must be
    /// tried: the largest remaining distance `y` first, then its mirror
    /// `width - y` (unless both are the same point).
    pub fn candidates(&self) -> impl Iterator<Item=Coord> {
        let width = self.width();
        self.remaining.max().into_iter()
            .flat_map(move |y| std::iter::once(y).chain(Some(width - y).filter(|m| *m != y)))
    }
    /// Tries to place a new point at `y`. This succeeds iff the distances
    /// between `y` and all the points placed so far form a sub-multiset of
    /// the remaining distances; in which case the resulting child is returned.
    pub fn place(&self, y: Coord) -> Option<SearchState> {
        let deltas    = delta(y, self.points.as_slice());
        let remaining = self.remaining.without(&deltas)?;
        Some(SearchState { remaining, points: self.points.with(y) })
    }
    /// All the children of this state, in the order of `candidates`.
    pub fn children(&self) -> impl Iterator<Item=SearchState> + '_ {
        self.candidates().filter_map(move |y| self.place(y))
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

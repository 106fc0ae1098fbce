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

//! This module defines the `Solver` trait.

use crate::common::{Completion, Coord, PointSet};

/// This is the solver abstraction. It is implemented by every structure that
/// is able to reconstruct a point set from the multiset of its pairwise
/// distances.
///
/// A solver is stateless across calls (except for the statistics of the last
/// call): it may be reused for any number of unrelated instances, one after
/// the other.
pub trait Solver {
    /// Returns a structure standing for the outcome of the attempted
    /// reconstruction. Such a `Completion` may either be marked **exact**
    /// if the search has been carried out until a solution was found or until
    /// it was proved that none exists. Or it can be inexact, in which case it
    /// means that the search was stopped because of the satisfaction of some
    /// cutoff criterion.
    fn reconstruct(&mut self, distances: &[Coord]) -> Completion;

    /// Returns a point set whose pairwise distances are exactly the given
    /// multiset (if the solver could find one).
    ///
    /// # Note:
    /// This conflates the two reasons why a search yields nothing (the
    /// instance has no solution, or the cutoff fired). Use `reconstruct`
    /// whenever you need to tell them apart.
    fn solve(&mut self, distances: &[Coord]) -> Option<PointSet> {
        self.reconstruct(distances).solution
    }

    /// The number of search nodes that have been explored during the last
    /// call to `reconstruct`.
    fn explored(&self) -> usize;

    /// A short name identifying the algorithm (used in reports).
    fn name(&self) -> &'static str;
}

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

//! This module defines the most basic data types that are used throughout all
//! the code of our library (both at the abstraction and implementation levels).
//! These are also the types your client code is likely to work with.
//!
//! In particular, this module comprises the definition of the following types:
//! - `Coord`
//! - `PointSet`
//! - `Reason`
//! - `Completion`

use std::fmt;
use std::iter::Cloned;
use std::slice::Iter;

use crate::validation::pairwise_distances;

// ----------------------------------------------------------------------------
// --- COORD ------------------------------------------------------------------
// ----------------------------------------------------------------------------
/// This type denotes both a coordinate on the line and a distance between two
/// such coordinates. Distances are always non-negative; it is the job of the
/// instance verification logic to reject anything else before it reaches a
/// solver.
pub type Coord = isize;

// ----------------------------------------------------------------------------
// --- POINT SET --------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A point set is the (candidate) answer to a partial digest problem: the
/// sorted coordinates of the restriction sites. Once a search has seeded it,
/// it always contains `0` as its first element and the width (the largest
/// distance of the instance) as its last element.
///
/// # Example
/// ```
/// # use pdp::PointSet;
/// let x = PointSet::new(vec![5, 0, 2]);
/// assert_eq!(x.as_slice(), &[0, 2, 5]);
/// assert_eq!(x.width(), Some(5));
/// assert_eq!(x.distances(), vec![2, 5, 3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointSet(Vec<Coord>);

impl PointSet {
    /// Creates a point set from an arbitrary collection of coordinates. The
    /// coordinates are sorted in ascending order.
    pub fn new(mut points: Vec<Coord>) -> Self {
        points.sort_unstable();
        PointSet(points)
    }
    /// The point set every search starts from: both ends of the map.
    pub fn seed(width: Coord) -> Self {
        PointSet(vec![0, width])
    }
    /// Returns the number of points in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }
    /// Returns true iff the set holds no point at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Returns the largest coordinate of the set (if there is one).
    pub fn width(&self) -> Option<Coord> {
        self.0.last().copied()
    }
    /// Returns true iff the given coordinate belongs to the set
    pub fn contains(&self, point: Coord) -> bool {
        self.0.binary_search(&point).is_ok()
    }
    /// Returns a *new* point set comprising all the points of this one plus
    /// the given point. The receiver is left untouched.
    pub fn with(&self, point: Coord) -> Self {
        let mut points = Vec::with_capacity(self.0.len() + 1);
        points.extend_from_slice(&self.0);
        let pos = points.partition_point(|x| *x <= point);
        points.insert(pos, point);
        PointSet(points)
    }
    /// Returns the reflection of this set about the midpoint of its width.
    /// The reflection generates exactly the same distances as the original.
    pub fn mirrored(&self) -> Self {
        match self.width() {
            None        => PointSet::default(),
            Some(width) => PointSet::new(self.0.iter().map(|x| width - x).collect())
        }
    }
    /// Generates the distances between all pairs of points in the set.
    pub fn distances(&self) -> Vec<Coord> {
        pairwise_distances(&self.0)
    }
    /// Iterates over the coordinates in ascending order.
    pub fn iter(&self) -> Cloned<Iter<'_, Coord>> {
        self.0.iter().cloned()
    }
    pub fn as_slice(&self) -> &[Coord] {
        &self.0
    }
    pub fn into_vec(self) -> Vec<Coord> {
        self.0
    }
}
impl From<Vec<Coord>> for PointSet {
    fn from(points: Vec<Coord>) -> Self {
        Self::new(points)
    }
}
impl From<&[Coord]> for PointSet {
    fn from(points: &[Coord]) -> Self {
        Self::new(points.to_vec())
    }
}
impl AsRef<[Coord]> for PointSet {
    fn as_ref(&self) -> &[Coord] {
        &self.0
    }
}
impl <'a> IntoIterator for &'a PointSet {
    type Item     = Coord;
    type IntoIter = Cloned<Iter<'a, Coord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
impl fmt::Display for PointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, x) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "}}")
    }
}

// ----------------------------------------------------------------------------
// --- RESULTS ----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A reason explaining why a solver stopped searching before it could either
/// find a solution or prove that there is none.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Reason {
    /// It stopped because the configured cutoff criterion was met
    CutoffOccurred
}

/// The outcome of a reconstruction attempt. Such a `Completion` may either be
/// marked **exact** if the search was carried out until it found a solution
/// or exhausted the search space. Or it can be inexact, in which case the
/// search was stopped because of the satisfaction of some cutoff criterion.
///
/// Four cases are thus to be distinguished:
///
/// * `is_exact` and a `solution` is present: the solution reconstructs the
///   distance multiset.
/// * `is_exact` and no `solution`: no point set generates these distances.
/// * `!is_exact` and no `solution`: no answer was obtained before the cutoff.
/// * `!is_exact` and a `solution` is present: never produced by the solvers
///   of this crate (they return as soon as they have a solution).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Was the search carried out until the end ?
    pub is_exact: bool,
    /// The reconstructed point set, if one was found
    pub solution: Option<PointSet>,
}
impl Completion {
    /// Folds the result of an interruptible search into a completion.
    pub fn from_search(outcome: Result<Option<PointSet>, Reason>) -> Self {
        match outcome {
            Ok(solution) => Completion { is_exact: true,  solution },
            Err(_)       => Completion { is_exact: false, solution: None }
        }
    }
    /// Returns true iff the search proved that no solution exists.
    pub fn is_unsat(&self) -> bool {
        self.is_exact && self.solution.is_none()
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_point_set {
    use crate::common::PointSet;

    #[test]
    fn new_sorts_the_points() {
        let x = PointSet::new(vec![8, 0, 5, 1, 7]);
        assert_eq!(x.as_slice(), &[0, 1, 5, 7, 8]);
    }
    #[test]
    fn seed_holds_both_ends() {
        let x = PointSet::seed(10);
        assert_eq!(x.as_slice(), &[0, 10]);
        assert_eq!(x.width(), Some(10));
    }
    #[test]
    fn empty_set_has_no_width() {
        assert_eq!(PointSet::default().width(), None);
        assert!(PointSet::default().is_empty());
    }
    #[test]
    fn with_inserts_at_the_right_place_and_leaves_the_receiver_untouched() {
        let x = PointSet::seed(10);
        let y = x.with(3);
        let z = y.with(7);
        assert_eq!(x.as_slice(), &[0, 10]);
        assert_eq!(y.as_slice(), &[0, 3, 10]);
        assert_eq!(z.as_slice(), &[0, 3, 7, 10]);
    }
    #[test]
    fn with_accepts_duplicate_points() {
        let x = PointSet::seed(4).with(4);
        assert_eq!(x.as_slice(), &[0, 4, 4]);
    }
    #[test]
    fn contains_finds_the_points() {
        let x = PointSet::new(vec![0, 2, 5]);
        assert!(x.contains(0));
        assert!(x.contains(2));
        assert!(x.contains(5));
        assert!(!x.contains(3));
    }
    #[test]
    fn distances_yields_all_pairs() {
        let x = PointSet::new(vec![0, 2, 5]);
        let mut d = x.distances();
        d.sort_unstable();
        assert_eq!(d, vec![2, 3, 5]);
    }
    #[test]
    fn distances_of_a_single_point_is_empty() {
        assert!(PointSet::new(vec![3]).distances().is_empty());
        assert!(PointSet::default().distances().is_empty());
    }
    #[test]
    fn mirrored_reflects_about_the_midpoint() {
        let x = PointSet::new(vec![0, 1, 5, 7, 8]);
        assert_eq!(x.mirrored().as_slice(), &[0, 1, 3, 7, 8]);
    }
    #[test]
    fn mirror_generates_the_same_distances() {
        let x = PointSet::new(vec![0, 2, 4, 7, 10]);
        let mut a = x.distances();
        let mut b = x.mirrored().distances();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }
    #[test]
    fn display_lists_the_points() {
        assert_eq!("{0, 2, 5}", format!("{}", PointSet::new(vec![5, 2, 0])));
        assert_eq!("{}", format!("{}", PointSet::default()));
    }
}

#[cfg(test)]
mod test_completion {
    use crate::common::{Completion, PointSet, Reason};

    #[test]
    fn a_cutoff_yields_an_inexact_completion() {
        let c = Completion::from_search(Err(Reason::CutoffOccurred));
        assert!(!c.is_exact);
        assert!(c.solution.is_none());
        assert!(!c.is_unsat());
    }
    #[test]
    fn an_exhausted_search_is_unsat() {
        let c = Completion::from_search(Ok(None));
        assert!(c.is_exact);
        assert!(c.is_unsat());
    }
    #[test]
    fn a_solution_is_kept() {
        let c = Completion::from_search(Ok(Some(PointSet::seed(3))));
        assert!(c.is_exact);
        assert_eq!(c.solution, Some(PointSet::seed(3)));
    }
}

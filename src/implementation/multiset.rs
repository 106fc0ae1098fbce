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

//! This module provides the multiset primitives every solver is built upon:
//! the computation of the deltas between a candidate point and a point set,
//! the sub-multiset containment test and the sub-multiset removal.
//!
//! All of these respect the multiplicity of the values. The multiset is a
//! counting map keyed by value so that each lookup costs O(log k) where k is
//! the number of *distinct* distances still present.

use std::collections::BTreeMap;
use std::iter::FromIterator;

use crate::common::Coord;

/// Returns the distances `|y - x|` between the candidate point `y` and every
/// point `x` of the given set (in the order of the set).
///
/// # Example
/// ```
/// # use pdp::delta;
/// assert_eq!(delta(5, &[0, 2, 10]), vec![5, 3, 5]);
/// ```
pub fn delta(y: Coord, points: &[Coord]) -> Vec<Coord> {
    points.iter().map(|x| (y - x).abs()).collect()
}

/// A multiset of distances. Two multisets are equal iff they hold the same
/// values with the same multiplicities, regardless of the order in which
/// these values were inserted.
///
/// # Example
/// ```
/// # use pdp::DistanceMultiset;
/// let mut d = DistanceMultiset::from(&[2, 3, 5, 3][..]);
/// assert_eq!(d.len(), 4);
/// assert_eq!(d.max(), Some(5));
/// assert!(d.contains_all(&[3, 3]));
/// assert!(!d.contains_all(&[3, 3, 3]));
/// assert!(d.remove_all(&[3, 5]));
/// assert_eq!(d.to_vec(), vec![2, 3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DistanceMultiset {
    /// value -> number of occurrences (never zero)
    counts: BTreeMap<Coord, usize>,
    /// total number of occurrences
    len: usize,
}

impl DistanceMultiset {
    pub fn new() -> Self {
        Self::default()
    }
    /// The number of values in the multiset (counting their multiplicity)
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    /// The number of distinct values in the multiset
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }
    /// The number of occurrences of `value`
    pub fn count(&self, value: Coord) -> usize {
        self.counts.get(&value).copied().unwrap_or(0)
    }
    pub fn contains(&self, value: Coord) -> bool {
        self.counts.contains_key(&value)
    }
    /// The largest value of the multiset
    pub fn max(&self) -> Option<Coord> {
        self.counts.keys().next_back().copied()
    }
    /// Adds one occurrence of `value`
    pub fn insert(&mut self, value: Coord) {
        *self.counts.entry(value).or_insert(0) += 1;
        self.len += 1;
    }
    /// Removes one occurrence of `value`. Returns false (and leaves the
    /// multiset untouched) when there is none.
    pub fn remove(&mut self, value: Coord) -> bool {
        match self.counts.get_mut(&value) {
            None        => false,
            Some(count) => {
                *count -= 1;
                if *count == 0 {
                    self.counts.remove(&value);
                }
                self.len -= 1;
                true
            }
        }
    }
    /// Returns true iff every value of `values` is present in this multiset
    /// with at least the multiplicity it has in `values`.
    pub fn contains_all(&self, values: &[Coord]) -> bool {
        let mut wanted = values.to_vec();
        wanted.sort_unstable();

        let mut i = 0;
        while i < wanted.len() {
            let value = wanted[i];
            let mut j = i + 1;
            while j < wanted.len() && wanted[j] == value {
                j += 1;
            }
            if self.count(value) < j - i {
                return false;
            }
            i = j;
        }
        true
    }
    /// Removes all of `values` from the multiset. This is an all-or-nothing
    /// operation: when `values` is not a sub-multiset, false is returned and
    /// the multiset is left untouched.
    pub fn remove_all(&mut self, values: &[Coord]) -> bool {
        if !self.contains_all(values) {
            return false;
        }
        for v in values.iter().copied() {
            self.remove(v);
        }
        true
    }
    /// Returns a *copy* of this multiset from which all of `values` have been
    /// removed, or None when `values` is not a sub-multiset of this one.
    pub fn without(&self, values: &[Coord]) -> Option<Self> {
        if !self.contains_all(values) {
            return None;
        }
        let mut copy = self.clone();
        for v in values.iter().copied() {
            copy.remove(v);
        }
        Some(copy)
    }
    /// Iterates over the values in ascending order, each one repeated as many
    /// times as it occurs.
    pub fn iter(&self) -> impl Iterator<Item=Coord> + '_ {
        self.counts.iter()
            .flat_map(|(v, n)| std::iter::repeat(*v).take(*n))
    }
    /// The sorted values of the multiset (with repetitions)
    pub fn to_vec(&self) -> Vec<Coord> {
        self.iter().collect()
    }
}

impl FromIterator<Coord> for DistanceMultiset {
    fn from_iter<I: IntoIterator<Item=Coord>>(iter: I) -> Self {
        let mut ms = DistanceMultiset::new();
        ms.extend(iter);
        ms
    }
}
impl Extend<Coord> for DistanceMultiset {
    fn extend<I: IntoIterator<Item=Coord>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}
impl From<&[Coord]> for DistanceMultiset {
    fn from(values: &[Coord]) -> Self {
        values.iter().copied().collect()
    }
}
impl From<Vec<Coord>> for DistanceMultiset {
    fn from(values: Vec<Coord>) -> Self {
        values.into_iter().collect()
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

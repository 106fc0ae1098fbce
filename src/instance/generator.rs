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

//! This module provides the random generation of restriction maps along with
//! the special instance families used to stress the solvers.

use std::fmt;

use log::{trace, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::common::Coord;
use crate::validation::{is_valid_solution, pairwise_distances};

/// The minimum gap between two consecutive restriction sites
pub const MIN_SPACING: Coord = 10;
/// The mean and standard deviation of the gap between two sites
const SPACING_MEAN: f64 = 10.0;
const SPACING_SD  : f64 = 2.0;
/// How many times the random generation is attempted before falling back to
/// a regularly spaced map.
pub const MAX_ATTEMPTS: usize = 100_000;

// ----------------------------------------------------------------------------
// --- RESTRICTION MAP --------------------------------------------------------
// ----------------------------------------------------------------------------
/// A restriction map: the sorted positions of the restriction sites along a
/// sequence of `total_length`. Both ends of the sequence count as sites, so a
/// map with `cuts` cuts has `cuts + 2` sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestrictionMap {
    total_length: Coord,
    sites       : Vec<Coord>,
}
impl RestrictionMap {
    /// The shortest sequence that can hold `cuts` cuts
    pub fn minimum_length(cuts: usize) -> Coord {
        (cuts as Coord + 1) * MIN_SPACING
    }
    /// Builds a map from the given sites (which are sorted). Returns None when
    /// the sites do not start at 0 or are not pairwise distinct.
    pub fn from_sites(mut sites: Vec<Coord>) -> Option<Self> {
        sites.sort_unstable();
        let total_length = *sites.last()?;
        let map = RestrictionMap { total_length, sites };
        if map.is_valid() { Some(map) } else { None }
    }
    /// Randomly draws a map having `cuts` cuts. The gaps between consecutive
    /// sites follow a normal distribution (redrawn while below
    /// `MIN_SPACING`) and the total length is one and a half times the
    /// minimum length. When no attempt succeeds, a regularly spaced map is
    /// returned instead.
    pub fn generate<R: Rng + ?Sized>(cuts: usize, rng: &mut R) -> Self {
        let total_length = (Self::minimum_length(cuts) as f64 * 1.5) as Coord;

        for attempt in 0..MAX_ATTEMPTS {
            if let Some(sites) = Self::attempt(cuts, total_length, rng) {
                trace!("map of {} cuts generated after {} attempts", cuts, attempt + 1);
                let map = RestrictionMap { total_length, sites };
                if map.is_valid() {
                    return map;
                }
            }
        }

        warn!("random generation of a {} cuts map failed, using the fallback", cuts);
        let mut sites = (0..=cuts as Coord).map(|i| i * MIN_SPACING).collect::<Vec<_>>();
        sites.push(total_length);
        RestrictionMap { total_length, sites }
    }
    fn attempt<R: Rng + ?Sized>(cuts: usize, total_length: Coord, rng: &mut R) -> Option<Vec<Coord>> {
        let mut sites = Vec::with_capacity(cuts + 2);
        sites.push(0);

        let mut current = 0;
        for i in 0..cuts {
            current += Self::spacing(rng);
            if current > total_length - MIN_SPACING * (cuts - i) as Coord {
                return None;
            }
            sites.push(current);
        }
        sites.push(total_length);
        Some(sites)
    }
    fn spacing<R: Rng + ?Sized>(rng: &mut R) -> Coord {
        loop {
            let z: f64 = rng.sample(StandardNormal);
            let spacing = (SPACING_MEAN + SPACING_SD * z).round() as Coord;
            if spacing >= MIN_SPACING {
                return spacing;
            }
        }
    }
    /// A map is valid when its first site is 0, its last site is the total
    /// length and its sites are strictly increasing.
    pub fn is_valid(&self) -> bool {
        self.sites.first() == Some(&0)
            && self.sites.last() == Some(&self.total_length)
            && self.sites.windows(2).all(|w| w[0] < w[1])
    }
    pub fn cuts(&self) -> usize {
        self.sites.len().saturating_sub(2)
    }
    pub fn total_length(&self) -> Coord {
        self.total_length
    }
    pub fn sites(&self) -> &[Coord] {
        &self.sites
    }
    /// All the pairwise distances between the sites of this map
    pub fn distances(&self) -> Vec<Coord> {
        pairwise_distances(&self.sites)
    }
    /// Returns true iff the given distances are the ones of this map
    pub fn verify_distances(&self, distances: &[Coord]) -> bool {
        is_valid_solution(&self.sites, distances)
    }
}

// ----------------------------------------------------------------------------
// --- ORDERING ---------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The order in which the distances of a generated instance are written
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum SortOrder {
    #[default]
    Shuffled,
    Ascending,
    Descending,
}
impl SortOrder {
    pub fn apply<R: Rng + ?Sized>(self, distances: &mut [Coord], rng: &mut R) {
        match self {
            SortOrder::Shuffled   => distances.shuffle(rng),
            SortOrder::Ascending  => distances.sort_unstable(),
            SortOrder::Descending => distances.sort_unstable_by(|a, b| b.cmp(a)),
        }
    }
}

// ----------------------------------------------------------------------------
// --- INSTANCE FAMILIES ------------------------------------------------------
// ----------------------------------------------------------------------------
/// The families of instances the benchmark draws from. Only the standard
/// family is guaranteed to be solvable: the three others are crafted to
/// exercise the solvers on degenerate multisets (many repeated values, very
/// regular maps, or values of wildly different magnitudes).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum TestType {
    Standard,
    Duplicates,
    Patterns,
    Extreme,
}
impl TestType {
    pub const SPECIAL: [TestType; 3] = [TestType::Duplicates, TestType::Patterns, TestType::Extreme];

    pub fn name(self) -> &'static str {
        match self {
            TestType::Standard   => "Standard",
            TestType::Duplicates => "Duplicates",
            TestType::Patterns   => "Patterns",
            TestType::Extreme    => "Extreme",
        }
    }
    /// Draws a shuffled instance of this family. For the standard family,
    /// `size` is the number of cuts of the map; for the other ones it is the
    /// number of points, hence the instance holds C(size, 2) distances.
    pub fn instance<R: Rng + ?Sized>(self, size: usize, rng: &mut R) -> Vec<Coord> {
        let mut distances = match self {
            TestType::Standard   => RestrictionMap::generate(size, rng).distances(),
            TestType::Duplicates => duplicates(size),
            TestType::Patterns   => patterns(size),
            TestType::Extreme    => extreme(size),
        };
        distances.shuffle(rng);
        distances
    }
}
impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

fn binomial(size: usize) -> usize {
    size * size.saturating_sub(1) / 2
}

/// Pairs of equal values 10, 10, 20, 20, ... then consecutive values.
fn duplicates(size: usize) -> Vec<Coord> {
    let target = binomial(size);
    let mut out  = Vec::with_capacity(target);
    let mut base = 10;
    for _ in 0..size / 2 {
        out.push(base);
        out.push(base);
        base += 10;
    }
    while out.len() < target {
        out.push(base);
        base += 1;
    }
    out.truncate(target);
    out
}

/// The distances of evenly spaced points.
fn patterns(size: usize) -> Vec<Coord> {
    let spacing = if size <= 1 { 1 } else { (size / (size - 1)) as Coord };
    let points  = (0..size as Coord).map(|i| i * spacing).collect::<Vec<_>>();
    pairwise_distances(&points)
}

/// Pairs of tiny and huge values, then mid range values.
fn extreme(size: usize) -> Vec<Coord> {
    let target  = binomial(size);
    let mut out = Vec::with_capacity(target);
    for i in 0..(size / 2) as Coord {
        out.push(i + 1);
        out.push(1000 * (i + 1));
    }
    while out.len() < target {
        out.push(100 + out.len() as Coord);
    }
    out.truncate(target);
    out
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_restriction_map {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::instance::generator::{RestrictionMap, MIN_SPACING};
    use crate::validation::check_cuts_possibility;

    #[test]
    fn generated_maps_are_valid() {
        let mut rng = StdRng::seed_from_u64(42);
        for cuts in 0..30 {
            let map = RestrictionMap::generate(cuts, &mut rng);
            assert!(map.is_valid());
            assert_eq!(cuts, map.cuts());
            assert_eq!(cuts + 2, map.sites().len());
        }
    }
    #[test]
    fn the_total_length_is_one_and_a_half_the_minimum() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(RestrictionMap::generate(3, &mut rng).total_length(), 60);
        assert_eq!(RestrictionMap::generate(4, &mut rng).total_length(), 75);
    }
    #[test]
    fn sites_are_at_least_min_spacing_apart_but_the_last_one() {
        let mut rng = StdRng::seed_from_u64(3);
        let map = RestrictionMap::generate(10, &mut rng);
        let inner = &map.sites()[..map.sites().len() - 1];
        assert!(inner.windows(2).all(|w| w[1] - w[0] >= MIN_SPACING));
    }
    #[test]
    fn distances_have_a_possible_size() {
        let mut rng = StdRng::seed_from_u64(11);
        let map = RestrictionMap::generate(6, &mut rng);
        let d   = map.distances();
        assert_eq!(d.len(), 28);
        assert!(check_cuts_possibility(d.len()));
        assert!(map.verify_distances(&d));
    }
    #[test]
    fn verify_distances_rejects_other_distances() {
        let map = RestrictionMap::from_sites(vec![0, 2, 5]).unwrap();
        assert!(map.verify_distances(&[5, 3, 2]));
        assert!(!map.verify_distances(&[5, 3, 3]));
        assert!(!map.verify_distances(&[5, 3]));
    }
    #[test]
    fn from_sites_sorts_and_checks() {
        let map = RestrictionMap::from_sites(vec![5, 0, 2]).unwrap();
        assert_eq!(map.sites(), &[0, 2, 5]);
        assert_eq!(map.total_length(), 5);
        assert!(RestrictionMap::from_sites(vec![1, 5]).is_none());
        assert!(RestrictionMap::from_sites(vec![0, 2, 2, 5]).is_none());
        assert!(RestrictionMap::from_sites(vec![]).is_none());
    }
}

#[cfg(test)]
mod test_families {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::instance::generator::{SortOrder, TestType};

    #[test]
    fn special_families_have_binomial_sizes() {
        let mut rng = StdRng::seed_from_u64(0);
        for family in TestType::SPECIAL {
            assert_eq!(family.instance(10, &mut rng).len(), 45);
        }
    }
    #[test]
    fn duplicates_start_with_pairs() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut d = TestType::Duplicates.instance(4, &mut rng);
        d.sort_unstable();
        assert_eq!(d, vec![10, 10, 20, 20, 30, 31]);
    }
    #[test]
    fn patterns_are_evenly_spaced() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut d = TestType::Patterns.instance(4, &mut rng);
        d.sort_unstable();
        assert_eq!(d, vec![1, 1, 1, 2, 2, 3]);
    }
    #[test]
    fn extreme_mixes_magnitudes() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut d = TestType::Extreme.instance(4, &mut rng);
        d.sort_unstable();
        assert_eq!(d, vec![1, 2, 104, 105, 1000, 2000]);
    }
    #[test]
    fn sort_orders() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut d = vec![3, 1, 2];
        SortOrder::Ascending.apply(&mut d, &mut rng);
        assert_eq!(d, vec![1, 2, 3]);
        SortOrder::Descending.apply(&mut d, &mut rng);
        assert_eq!(d, vec![3, 2, 1]);
        SortOrder::Shuffled.apply(&mut d, &mut rng);
        d.sort_unstable();
        assert_eq!(d, vec![1, 2, 3]);
    }
    #[test]
    fn names() {
        assert_eq!("Standard", TestType::Standard.to_string());
        assert_eq!("Extreme",  TestType::Extreme.name());
    }
}

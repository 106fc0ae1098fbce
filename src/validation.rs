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

//! This module provides the checks that surround the solvers: validation of a
//! reconstructed point set against the distances it is meant to explain, and
//! the sanity checks an instance must pass before it is handed to a solver.

use crate::common::Coord;
use crate::instance::Error;

/// The largest distance an instance may hold
pub const MAX_DISTANCE: Coord = 65_535;

/// Returns all the pairwise differences `x_j - x_i` (i < j) of a sorted point
/// set. When the points are not sorted, the absolute differences are returned.
///
/// # Example
/// ```
/// # use pdp::validation::pairwise_distances;
/// assert_eq!(pairwise_distances(&[0, 2, 5]), vec![2, 5, 3]);
/// ```
pub fn pairwise_distances(points: &[Coord]) -> Vec<Coord> {
    let n = points.len();
    let mut out = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for (i, a) in points.iter().enumerate() {
        for b in points[i + 1..].iter() {
            out.push((b - a).abs());
        }
    }
    out
}

/// Returns true iff the multiset of pairwise differences of `points` is
/// exactly `distances` (same cardinality and same multiplicity of every
/// value). The order of both arguments is irrelevant. An empty point set is
/// never a valid solution.
///
/// # Example
/// ```
/// # use pdp::validation::is_valid_solution;
/// assert!(is_valid_solution(&[0, 2, 5], &[5, 3, 2]));
/// assert!(is_valid_solution(&[5, 0, 2], &[2, 3, 5]));
/// assert!(!is_valid_solution(&[0, 2, 5], &[2, 2, 5]));
/// ```
pub fn is_valid_solution(points: &[Coord], distances: &[Coord]) -> bool {
    if points.is_empty() {
        return false;
    }
    let mut generated = pairwise_distances(points);
    if generated.len() != distances.len() {
        return false;
    }
    let mut expected = distances.to_vec();
    generated.sort_unstable();
    expected.sort_unstable();
    generated == expected
}

/// Returns true iff both point sets generate the same distance multiset
/// (this is the case of a point set and its mirror image).
pub fn same_distances(a: &[Coord], b: &[Coord]) -> bool {
    let mut da = pairwise_distances(a);
    let mut db = pairwise_distances(b);
    da.sort_unstable();
    db.sort_unstable();
    da == db
}

/// The number of cuts (inner restriction sites) of a map whose distance
/// multiset has `m` elements: `round((-1 + sqrt(1 + 8m)) / 2 - 1)`.
pub fn required_cuts(m: usize) -> isize {
    let disc = 1.0 + 8.0 * m as f64;
    ((-1.0 + disc.sqrt()) / 2.0 - 1.0).round() as isize
}

/// Returns true iff `m` is C(n, 2) for some n >= 2, that is iff a multiset of
/// `m` distances could possibly be generated by a map.
///
/// # Example
/// ```
/// # use pdp::validation::check_cuts_possibility;
/// assert!(check_cuts_possibility(1));
/// assert!(check_cuts_possibility(10));
/// assert!(!check_cuts_possibility(4));
/// ```
pub fn check_cuts_possibility(m: usize) -> bool {
    let cuts = required_cuts(m);
    m > 0 && cuts >= 0 && ((cuts + 2) * (cuts + 1) / 2) as usize == m
}

/// Returns the first distance lying outside of `1..=MAX_DISTANCE` (if any).
pub fn first_out_of_range(distances: &[Coord]) -> Option<Coord> {
    distances.iter().copied().find(|d| !(1..=MAX_DISTANCE).contains(d))
}

/// Returns true iff every distance lies in `1..=MAX_DISTANCE`.
pub fn verify_input_values(distances: &[Coord]) -> bool {
    first_out_of_range(distances).is_none()
}

/// Runs all the checks an instance must pass before it is solved and returns
/// the number of points of its solutions.
pub fn verify_instance(distances: &[Coord]) -> Result<usize, Error> {
    if distances.is_empty() {
        return Err(Error::Empty);
    }
    if let Some(bad) = first_out_of_range(distances) {
        return Err(Error::OutOfRange(bad));
    }
    if !check_cuts_possibility(distances.len()) {
        return Err(Error::NotTriangular(distances.len()));
    }
    Ok((required_cuts(distances.len()) + 2) as usize)
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_validation {
    use crate::instance::Error;
    use crate::validation::*;

    #[test]
    fn pairwise_distances_has_one_entry_per_pair() {
        assert!(pairwise_distances(&[]).is_empty());
        assert!(pairwise_distances(&[3]).is_empty());
        assert_eq!(pairwise_distances(&[0, 1, 5, 7, 8]).len(), 10);
    }
    #[test]
    fn a_point_set_is_valid_for_its_own_distances() {
        let x = [0, 1, 5, 7, 8];
        assert!(is_valid_solution(&x, &pairwise_distances(&x)));
    }
    #[test]
    fn validity_is_insensitive_to_the_order() {
        assert!(is_valid_solution(&[8, 0, 7, 1, 5], &[1, 2, 3, 4, 5, 6, 7, 7, 8, 1]));
    }
    #[test]
    fn multiplicities_matter() {
        assert!(!is_valid_solution(&[0, 1, 2], &[1, 2, 2]));
        assert!(!is_valid_solution(&[0, 1, 2], &[1, 1, 2, 2]));
    }
    #[test]
    fn the_empty_point_set_is_never_valid() {
        assert!(!is_valid_solution(&[], &[]));
    }
    #[test]
    fn a_map_and_its_mirror_have_the_same_distances() {
        assert!(same_distances(&[0, 2, 5], &[0, 3, 5]));
        assert!(!same_distances(&[0, 2, 5], &[0, 1, 5]));
    }
    #[test]
    fn required_cuts_inverts_the_binomial() {
        assert_eq!(0, required_cuts(1));
        assert_eq!(1, required_cuts(3));
        assert_eq!(3, required_cuts(10));
        assert_eq!(10, required_cuts(66));
    }
    #[test]
    fn only_binomials_are_possible_sizes() {
        let possible = (1..100).filter(|m| check_cuts_possibility(*m)).collect::<Vec<_>>();
        assert_eq!(possible, vec![1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 66, 78, 91]);
        assert!(!check_cuts_possibility(0));
    }
    #[test]
    fn values_must_be_positive_and_bounded() {
        assert!(verify_input_values(&[1, 65535]));
        assert!(!verify_input_values(&[0, 3]));
        assert!(!verify_input_values(&[65536]));
        assert!(!verify_input_values(&[-2]));
    }
    #[test]
    fn the_first_out_of_range_value_is_reported() {
        assert_eq!(None, first_out_of_range(&[1, 65535]));
        assert_eq!(Some(0), first_out_of_range(&[3, 0, 70000]));
        assert_eq!(Some(70000), first_out_of_range(&[3, 70000, 0]));
    }
    #[test]
    fn verify_instance_returns_the_number_of_points() {
        assert_eq!(5, verify_instance(&[1, 2, 3, 4, 5, 6, 7, 7, 8, 1]).unwrap());
        assert_eq!(2, verify_instance(&[4]).unwrap());
    }
    #[test]
    fn verify_instance_reports_the_first_problem() {
        assert!(matches!(verify_instance(&[]), Err(Error::Empty)));
        assert!(matches!(verify_instance(&[2, 0, 2]), Err(Error::OutOfRange(0))));
        assert!(matches!(verify_instance(&[1, 2, 3, 4]), Err(Error::NotTriangular(4))));
    }
}

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

//! This module provides the implementation of the heuristics used by the
//! solvers: the cutoff criteria and the tuning of the two phase solver.

use std::time::Duration;

use crate::abstraction::Cutoff;

// ----------------------------------------------------------------------------
// --- CUTOFF -----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// _This is the default cutoff heuristic._ It imposes that the search goes on
/// until it either finds a solution or proves there is none.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoCutoff;
impl Cutoff for NoCutoff {
    fn must_stop(&self, _explored: usize, _elapsed: Duration) -> bool {
        false
    }
}

/// This cutoff allows one to specify a maximum time budget to solve an
/// instance. Once the time budget is elapsed, the search stops and the
/// solver reports an inexact completion.
///
/// # Example
/// ```
/// # use pdp::*;
/// use std::time::Duration;
///
/// let mut solver = BacktrackSetSolver::new()
///     .with_cutoff(TimeBudget::new(Duration::from_secs(10)));
/// let outcome = solver.reconstruct(&[2, 3, 5]); // will run for maximum 10 seconds
/// assert!(outcome.is_exact);
/// ```
#[derive(Debug, Copy, Clone)]
pub struct TimeBudget {
    budget: Duration
}
impl TimeBudget {
    pub fn new(budget: Duration) -> Self {
        TimeBudget { budget }
    }
}
impl Cutoff for TimeBudget {
    fn must_stop(&self, _explored: usize, elapsed: Duration) -> bool {
        elapsed >= self.budget
    }
}

/// This cutoff stops the search once a given number of nodes has been
/// expanded. Unlike `TimeBudget`, it makes the outcome of a search
/// reproducible from one machine to the other.
#[derive(Debug, Copy, Clone)]
pub struct NodeBudget {
    max_nodes: usize
}
impl NodeBudget {
    pub fn new(max_nodes: usize) -> Self {
        NodeBudget { max_nodes }
    }
}
impl Cutoff for NodeBudget {
    fn must_stop(&self, explored: usize, _elapsed: Duration) -> bool {
        explored > self.max_nodes
    }
}

// ----------------------------------------------------------------------------
// --- INSTANCE SIZE ----------------------------------------------------------
// ----------------------------------------------------------------------------
/// Returns the number of points n such that C(n, 2) is (closest to) the
/// given number of distances: `round((1 + sqrt(1 + 8m)) / 2)`.
///
/// # Example
/// ```
/// # use pdp::nb_points;
/// assert_eq!(2, nb_points(1));
/// assert_eq!(3, nb_points(3));
/// assert_eq!(5, nb_points(10));
/// ```
pub fn nb_points(nb_distances: usize) -> usize {
    let disc = 1.0 + 8.0 * nb_distances as f64;
    ((1.0 + disc.sqrt()) / 2.0).round() as usize
}

// ----------------------------------------------------------------------------
// --- ALPHA ------------------------------------------------------------------
// ----------------------------------------------------------------------------
/// Picks the depth at which the two phase solver stops its breadth first
/// expansion. It is the α (1 <= α < n) minimizing the cost model
/// `n²·2^α + n²·2^(n-α)`: the first term estimates the size of the frontier
/// and the second one the cost of resuming each of its nodes. Ties are broken
/// in favor of the smallest α. For n <= 3, α is always 1.
///
/// Any α in [1, n) yields correct results; only the performance varies.
///
/// # Example
/// ```
/// # use pdp::alpha_cutoff;
/// assert_eq!(1, alpha_cutoff(3));
/// assert_eq!(2, alpha_cutoff(5));
/// assert_eq!(5, alpha_cutoff(10));
/// ```
pub fn alpha_cutoff(n: usize) -> usize {
    if n <= 3 {
        return 1;
    }
    // both terms are scaled by 2^(-n/2) so that large n do not overflow
    let half = n as f64 / 2.0;
    let n2   = (n * n) as f64;
    let cost = |alpha: usize| {
        let a = alpha as f64;
        n2 * 2.0_f64.powf(a - half) + n2 * 2.0_f64.powf(half - a)
    };

    let mut best_alpha = 1;
    let mut best_score = f64::INFINITY;
    for alpha in 1..n {
        let score = cost(alpha);
        if score < best_score {
            best_score = score;
            best_alpha = alpha;
        }
    }
    best_alpha
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################


#[cfg(test)]
mod test_sizes {
    use crate::implementation::heuristics::{alpha_cutoff, nb_points};

    #[test]
    fn nb_points_inverts_the_binomial() {
        for n in 2..200 {
            assert_eq!(n, nb_points(n * (n - 1) / 2));
        }
    }
    #[test]
    fn nb_points_of_nothing_is_one() {
        assert_eq!(1, nb_points(0));
    }
    #[test]
    fn alpha_is_one_for_tiny_instances() {
        assert_eq!(1, alpha_cutoff(0));
        assert_eq!(1, alpha_cutoff(2));
        assert_eq!(1, alpha_cutoff(3));
    }
    #[test]
    fn alpha_balances_both_phases() {
        assert_eq!(2, alpha_cutoff(4));
        assert_eq!(2, alpha_cutoff(5));
        assert_eq!(3, alpha_cutoff(6));
        assert_eq!(50, alpha_cutoff(100));
    }
    #[test]
    fn alpha_is_always_strictly_less_than_n() {
        for n in 2..2000 {
            let a = alpha_cutoff(n);
            assert!(a >= 1);
            assert!(a < n.max(2));
        }
    }
}

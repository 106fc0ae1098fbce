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

//! This module measures how sensitive the two phase solver is to the order in
//! which the distances of one same instance are presented.

use std::fmt;
use std::time::{Duration, Instant};

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::abstraction::Solver;
use crate::common::Coord;
use crate::implementation::TwoPhaseHybridSolver;

/// The ways the distances of an instance can be rearranged
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Arrangement {
    /// As given
    Original,
    Ascending,
    Descending,
    /// Uniformly shuffled
    Random,
    /// Sorted, then each third of the values is shuffled on its own
    Clustered,
}
impl Arrangement {
    pub const ALL: [Arrangement; 5] = [
        Arrangement::Original,
        Arrangement::Ascending,
        Arrangement::Descending,
        Arrangement::Random,
        Arrangement::Clustered,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Arrangement::Original   => "Original",
            Arrangement::Ascending  => "Ascending",
            Arrangement::Descending => "Descending",
            Arrangement::Random     => "Random",
            Arrangement::Clustered  => "Clustered",
        }
    }
    /// Returns a rearranged copy of the distances
    pub fn apply<R: Rng + ?Sized>(self, distances: &[Coord], rng: &mut R) -> Vec<Coord> {
        let mut out = distances.to_vec();
        match self {
            Arrangement::Original   => {},
            Arrangement::Ascending  => out.sort_unstable(),
            Arrangement::Descending => out.sort_unstable_by(|a, b| b.cmp(a)),
            Arrangement::Random     => out.shuffle(rng),
            Arrangement::Clustered  => {
                out.sort_unstable();
                let third = out.len() / 3;
                if third > 0 {
                    let (low, rest)   = out.split_at_mut(third);
                    let (mid, high)   = rest.split_at_mut(third);
                    low.shuffle(rng);
                    mid.shuffle(rng);
                    high.shuffle(rng);
                }
            }
        }
        out
    }
}
impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// The timings of the two phase solver on one arrangement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrangementResult {
    pub arrangement: Arrangement,
    pub average    : Duration,
    pub min        : Duration,
    pub max        : Duration,
    pub successes  : usize,
    pub repetitions: usize,
}
impl fmt::Display for ArrangementResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<12} | {:>10.3} | {:>10.3} | {:>10.3} | {:>3}/{:<3}",
            self.arrangement.name(),
            self.average.as_secs_f64() * 1000.0,
            self.min.as_secs_f64() * 1000.0,
            self.max.as_secs_f64() * 1000.0,
            self.successes, self.repetitions)
    }
}

/// Times `repetitions` runs of the two phase solver on every arrangement of
/// the given distances.
pub fn analyse<R: Rng + ?Sized>(distances: &[Coord], repetitions: usize, rng: &mut R) -> Vec<ArrangementResult> {
    let repetitions = repetitions.max(1);
    let mut results = vec![];
    for arrangement in Arrangement::ALL {
        let arranged = arrangement.apply(distances, rng);

        let mut total     = Duration::ZERO;
        let mut min       = Duration::MAX;
        let mut max       = Duration::ZERO;
        let mut successes = 0;
        for _ in 0..repetitions {
            let mut solver = TwoPhaseHybridSolver::new();
            let start      = Instant::now();
            let solution   = solver.solve(&arranged);
            let time       = start.elapsed();

            successes += usize::from(solution.is_some());
            total     += time;
            min        = min.min(time);
            max        = max.max(time);
        }

        let result = ArrangementResult {
            arrangement,
            average: total / repetitions as u32,
            min,
            max,
            successes,
            repetitions,
        };
        debug!("{}", result);
        results.push(result);
    }
    results
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_arrangement {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::benchmark::arrangement::{analyse, Arrangement};

    const CLASSIC: [isize; 10] = [1, 2, 3, 4, 5, 6, 7, 7, 8, 1];

    #[test]
    fn every_arrangement_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut expected = CLASSIC.to_vec();
        expected.sort_unstable();
        for a in Arrangement::ALL {
            let mut got = a.apply(&CLASSIC, &mut rng);
            got.sort_unstable();
            assert_eq!(got, expected);
        }
    }
    #[test]
    fn original_keeps_the_order() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(Arrangement::Original.apply(&CLASSIC, &mut rng), CLASSIC.to_vec());
    }
    #[test]
    fn clustered_keeps_the_thirds_apart() {
        let mut rng = StdRng::seed_from_u64(5);
        let d = (1..=9).collect::<Vec<isize>>();
        let c = Arrangement::Clustered.apply(&d, &mut rng);
        assert!(c[..3].iter().all(|x| *x <= 3));
        assert!(c[3..6].iter().all(|x| (4..=6).contains(x)));
        assert!(c[6..].iter().all(|x| *x >= 7));
    }
    #[test]
    fn analyse_reports_every_arrangement() {
        let mut rng = StdRng::seed_from_u64(5);
        let results = analyse(&CLASSIC, 2, &mut rng);
        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| r.successes == 2 && r.repetitions == 2));
        assert!(results.iter().all(|r| r.min <= r.average && r.average <= r.max));
    }
}

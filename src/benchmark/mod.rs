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

//! This module provides the benchmark harness: it times the solvers on
//! freshly generated instances, checks their answers, and saves the
//! measurements as csv.

pub mod arrangement;
pub mod verification;

use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use derive_builder::Builder;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::abstraction::Solver;
use crate::common::{Completion, Coord};
use crate::implementation::{BacktrackSetSolver, IterativeSetSolver, PositionSearchSolver, TimeBudget, TwoPhaseHybridSolver};
use crate::instance::{Error, TestType};
use crate::validation::is_valid_solution;

// ----------------------------------------------------------------------------
// --- ALGORITHMS -------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The solvers the benchmark knows about
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Algorithm {
    PositionSearch,
    Backtrack,
    Iterative,
    Hybrid,
}
impl Algorithm {
    pub const ALL : [Algorithm; 4] = [Algorithm::PositionSearch, Algorithm::Backtrack, Algorithm::Iterative, Algorithm::Hybrid];
    /// The point-set solvers; the position search is way slower than these.
    pub const FAST: [Algorithm; 3] = [Algorithm::Backtrack, Algorithm::Iterative, Algorithm::Hybrid];

    /// The name used in the reports
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::PositionSearch => "BasicMapSolver",
            Algorithm::Backtrack      => "BBd",
            Algorithm::Iterative      => "BBb",
            Algorithm::Hybrid         => "BBb2",
        }
    }
    /// Creates a solver that gives up after the given time budget
    pub fn solver(self, budget: Duration) -> Box<dyn Solver> {
        let cutoff = TimeBudget::new(budget);
        match self {
            Algorithm::PositionSearch => Box::new(PositionSearchSolver::new().with_cutoff(cutoff)),
            Algorithm::Backtrack      => Box::new(BacktrackSetSolver::new().with_cutoff(cutoff)),
            Algorithm::Iterative      => Box::new(IterativeSetSolver::new().with_cutoff(cutoff)),
            Algorithm::Hybrid         => Box::new(TwoPhaseHybridSolver::new().with_cutoff(cutoff)),
        }
    }
}
impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// ----------------------------------------------------------------------------
// --- RESULTS ----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// How a timed run ended
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// A point set was returned
    Solved,
    /// The solver proved there is no solution
    NoSolution,
    /// The time budget elapsed before the solver could conclude
    Timeout,
}
impl From<&Completion> for Outcome {
    fn from(c: &Completion) -> Self {
        match (c.is_exact, c.solution.is_some()) {
            (_, true)      => Outcome::Solved,
            (true, false)  => Outcome::NoSolution,
            (false, false) => Outcome::Timeout,
        }
    }
}

/// One measurement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkResult {
    pub algorithm: Algorithm,
    pub test_type: TestType,
    pub size     : usize,
    pub time     : Duration,
    pub outcome  : Outcome,
    /// Did the returned point set reconstruct the distances ?
    pub valid    : bool,
}
impl BenchmarkResult {
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Solved
    }
    pub fn description(&self) -> String {
        format!("Test type: {}, size: {}", self.test_type, self.size)
    }
    fn csv_line(&self) -> String {
        format!("{},{},{},{},{},{},\"{}\"",
            self.algorithm, self.test_type, self.size, self.time.as_millis(),
            self.is_success(), self.valid, self.description())
    }
}

/// Times one run of the given algorithm on the given distances.
pub fn run_once(algorithm: Algorithm, distances: &[Coord], budget: Duration) -> (Completion, Duration) {
    let mut solver = algorithm.solver(budget);
    let start      = Instant::now();
    let completion = solver.reconstruct(distances);
    let time       = start.elapsed();
    debug!("{}: {:?} in {:?} ({} nodes)", algorithm, Outcome::from(&completion), time, solver.explored());
    (completion, time)
}

// ----------------------------------------------------------------------------
// --- CONFIGURATION ----------------------------------------------------------
// ----------------------------------------------------------------------------
/// This is how you configure a benchmark campaign. Any field left unset in
/// the builder takes its value from `BenchmarkConfig::default()`.
#[derive(Debug, Clone, Builder)]
#[builder(default)]
pub struct BenchmarkConfig {
    /// The numbers of cuts of the standard instances
    pub standard_sizes: Vec<usize>,
    /// The numbers of points of the special case instances
    pub special_sizes: Vec<usize>,
    /// How many instances of each standard size are drawn
    pub repetitions: usize,
    /// How many instances of each special size are drawn
    pub special_repetitions: usize,
    /// The algorithms of the comprehensive benchmark
    pub algorithms: Vec<Algorithm>,
    /// The time after which a run is abandoned
    pub time_budget: Duration,
    /// Where the csv reports are saved
    pub output_dir: PathBuf,
    /// Seeds the instance generation (drawn from the os when absent)
    pub seed: Option<u64>,
}
impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            standard_sizes     : vec![10, 20, 50, 100],
            special_sizes      : vec![100],
            repetitions        : 5,
            special_repetitions: 100,
            algorithms         : Algorithm::ALL.to_vec(),
            time_budget        : Duration::from_secs(60),
            output_dir         : PathBuf::from("output/benchmark"),
            seed               : None,
        }
    }
}

// ----------------------------------------------------------------------------
// --- HARNESS ----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The benchmark accumulates the results of the campaigns it runs.
///
/// # Example
/// ```
/// # use pdp::benchmark::*;
/// let config = BenchmarkConfigBuilder::default()
///     .standard_sizes(vec![3, 4])
///     .repetitions(2)
///     .seed(Some(42))
///     .build()
///     .unwrap();
///
/// let mut bench = Benchmark::new(config);
/// bench.run_fast();
/// assert_eq!(bench.results().len(), 2 * 2 * 3);
/// assert!(bench.results().iter().all(|r| r.valid));
/// ```
pub struct Benchmark {
    config : BenchmarkConfig,
    rng    : StdRng,
    results: Vec<BenchmarkResult>,
}
impl Benchmark {
    pub fn new(config: BenchmarkConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        Benchmark { config, rng, results: vec![] }
    }
    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }
    pub fn results(&self) -> &[BenchmarkResult] {
        &self.results
    }

    fn measure(&mut self, algorithm: Algorithm, test_type: TestType, size: usize, distances: &[Coord]) {
        let (completion, time) = run_once(algorithm, distances, self.config.time_budget);
        let valid = completion.solution.as_ref()
            .map(|x| is_valid_solution(x.as_slice(), distances))
            .unwrap_or(false);

        self.results.push(BenchmarkResult {
            algorithm,
            test_type,
            size,
            time,
            outcome: Outcome::from(&completion),
            valid,
        });
    }
    /// Runs the given algorithms on `repetitions` instances of the given
    /// family for each of the sizes. All algorithms see the same instances.
    pub fn run_family(&mut self, algorithms: &[Algorithm], test_type: TestType, sizes: &[usize], repetitions: usize) {
        for &size in sizes {
            info!("{} instances of size {}", test_type, size);
            for _ in 0..repetitions {
                let distances = test_type.instance(size, &mut self.rng);
                for &algorithm in algorithms {
                    self.measure(algorithm, test_type, size, &distances);
                }
            }
        }
    }
    /// Benchmarks one single algorithm on the standard instances
    pub fn run_single(&mut self, algorithm: Algorithm) {
        let sizes = self.config.standard_sizes.clone();
        self.run_family(&[algorithm], TestType::Standard, &sizes, self.config.repetitions);
    }
    /// Benchmarks the point-set solvers on the standard instances
    pub fn run_fast(&mut self) {
        let sizes = self.config.standard_sizes.clone();
        self.run_family(&Algorithm::FAST, TestType::Standard, &sizes, self.config.repetitions);
    }
    /// Benchmarks the configured algorithms on the standard instances, then
    /// on each special family.
    pub fn run_comprehensive(&mut self) {
        let algorithms = self.config.algorithms.clone();
        let standard   = self.config.standard_sizes.clone();
        let special    = self.config.special_sizes.clone();

        self.run_family(&algorithms, TestType::Standard, &standard, self.config.repetitions);
        for family in TestType::SPECIAL {
            self.run_family(&algorithms, family, &special, self.config.special_repetitions);
        }
    }

    /// Writes all the results gathered so far to the given file.
    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut f = File::create(path)?;
        writeln!(f, "algorithm,test_type,size,time_ms,success,valid,description")?;
        for r in self.results.iter() {
            writeln!(f, "{}", r.csv_line())?;
        }
        Ok(())
    }
    /// Writes the results to a timestamped file of the output directory and
    /// returns its path.
    pub fn save(&self) -> Result<PathBuf, Error> {
        fs::create_dir_all(&self.config.output_dir)?;
        let stamp = SystemTime::now().duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let path = self.config.output_dir.join(format!("benchmark_results_{}.csv", stamp));
        self.save_csv(&path)?;
        info!("results saved to {}", path.display());
        Ok(path)
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

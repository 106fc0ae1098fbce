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

//! The `pdp` command line: generates instances, solves them, and benchmarks
//! the solvers.

use std::error::Error;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;

use pdp::benchmark::arrangement::analyse;
use pdp::benchmark::verification::verify_store;
use pdp::benchmark::{Algorithm, Benchmark, BenchmarkConfigBuilder};
use pdp::instance::{InstanceStore, SortOrder};
use pdp::validation::{is_valid_solution, verify_instance};

/// This structure uses `clap-derive` annotations and define the arguments that can
/// be passed on to the executable.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The directory holding the instances
    #[clap(short, long, default_value = "output/instances")]
    dir: PathBuf,
    /// Log more (-v for debug, -vv for trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Generates one instance from a random map
    Generate {
        /// The number of cuts of the map
        cuts: usize,
        /// The name of the instance file
        #[clap(default_value = "instance.txt")]
        name: String,
        #[clap(short, long, value_enum, default_value_t = SortOrder::Shuffled)]
        order: SortOrder,
        #[clap(short, long)]
        seed: Option<u64>,
    },
    /// Replaces the instances with one instance per number of cuts
    GenerateRange {
        /// The largest number of cuts
        max_cuts: usize,
        #[clap(short, long, value_enum, default_value_t = SortOrder::Shuffled)]
        order: SortOrder,
        #[clap(short, long)]
        seed: Option<u64>,
    },
    /// Replaces the instances with a number of random ones
    GenerateRandom {
        count: usize,
        #[clap(short, long, value_enum, default_value_t = SortOrder::Shuffled)]
        order: SortOrder,
        #[clap(short, long)]
        seed: Option<u64>,
    },
    /// Lists the available instances
    List,
    /// Solves every instance and checks the solutions
    Verify {
        /// The maximum amount of time (in seconds) spent on each instance
        #[clap(short, long, default_value = "60")]
        timeout: u64,
    },
    /// Solves one instance (given by name or by its number in the list)
    Solve {
        instance: String,
        #[clap(short, long, value_enum, default_value_t = Algorithm::Hybrid)]
        algorithm: Algorithm,
        /// The maximum amount of time (in seconds) the solver may run
        #[clap(short, long, default_value = "60")]
        timeout: u64,
    },
    /// Times the solvers on freshly generated instances
    Benchmark {
        /// Benchmark this algorithm only
        #[clap(short, long, value_enum)]
        algorithm: Option<Algorithm>,
        /// Benchmark the point-set solvers only
        #[clap(short, long)]
        fast: bool,
        /// The numbers of cuts of the standard instances
        #[clap(long, value_delimiter = ',')]
        sizes: Option<Vec<usize>>,
        /// The numbers of points of the special instances
        #[clap(long, value_delimiter = ',')]
        special_sizes: Option<Vec<usize>>,
        #[clap(short, long)]
        repetitions: Option<usize>,
        #[clap(long)]
        special_repetitions: Option<usize>,
        /// The maximum amount of time (in seconds) of each run
        #[clap(short, long, default_value = "60")]
        timeout: u64,
        /// Where to save the csv report
        #[clap(short, long, default_value = "output/benchmark")]
        output: PathBuf,
        #[clap(short, long)]
        seed: Option<u64>,
    },
    /// Times the two phase solver on several arrangements of one instance
    Arrange {
        instance: String,
        #[clap(short, long, default_value = "10")]
        repetitions: usize,
        #[clap(short, long)]
        seed: Option<u64>,
    },
}

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    }
}

/// An instance is designated either by its name or by its (1 based) number
/// in the list of the instances of the store.
fn resolve(store: &InstanceStore, instance: &str) -> Result<String, Box<dyn Error>> {
    if let Ok(number) = instance.parse::<usize>() {
        let names = store.list()?;
        if number >= 1 && number <= names.len() {
            return Ok(names[number - 1].clone());
        }
    }
    Ok(instance.to_string())
}

fn generated(names: &[String], store: &InstanceStore) {
    println!("Generated {} instances in {}", names.len(), store.dir().display());
    for name in names {
        println!("  {}", name);
    }
}

fn verify_all(store: &InstanceStore, timeout: u64) -> Result<(), Box<dyn Error>> {
    let reports = verify_store(store, Duration::from_secs(timeout))?;
    if reports.is_empty() {
        println!("No instances found in {}", store.dir().display());
        return Ok(());
    }
    for report in reports.iter() {
        println!("{}", report);
    }
    let nb_valid = reports.iter().filter(|r| r.is_valid()).count();
    println!("Valid instances: {}/{}", nb_valid, reports.len());
    Ok(())
}

fn solve(store: &InstanceStore, instance: &str, algorithm: Algorithm, timeout: u64) -> Result<(), Box<dyn Error>> {
    let name      = resolve(store, instance)?;
    let distances = store.load(&name)?;
    let n         = verify_instance(&distances)?;

    let start      = Instant::now();
    let mut solver = algorithm.solver(Duration::from_secs(timeout));
    let completion = solver.reconstruct(&distances);
    let duration   = start.elapsed();

    println!("Instance:   {}", name);
    println!("Algorithm:  {}", algorithm);
    println!("Points:     {}", n);
    println!("Duration:   {:.3} seconds", duration.as_secs_f32());
    println!("Explored:   {}", solver.explored());
    println!("Aborted:    {}", !completion.is_exact);
    match completion.solution {
        Some(x) => {
            println!("Valid:      {}", is_valid_solution(x.as_slice(), &distances));
            println!("Solution:   {}", x);
        },
        None => println!("Solution:   none"),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let store = InstanceStore::new(&args.dir);
    match args.action {
        Action::Generate { cuts, name, order, seed } => {
            let map = store.generate(cuts, &name, order, &mut rng(seed))?;
            println!("Generated {} (sites: {:?})", store.path_of(&name).display(), map.sites());
        },
        Action::GenerateRange { max_cuts, order, seed } => {
            let names = store.generate_range(max_cuts, order, &mut rng(seed))?;
            generated(&names, &store);
        },
        Action::GenerateRandom { count, order, seed } => {
            let names = store.generate_random(count, order, &mut rng(seed))?;
            generated(&names, &store);
        },
        Action::List => {
            for (i, name) in store.list()?.iter().enumerate() {
                println!("{:>4}. {}", i + 1, name);
            }
        },
        Action::Verify { timeout } => verify_all(&store, timeout)?,
        Action::Solve { instance, algorithm, timeout } => solve(&store, &instance, algorithm, timeout)?,
        Action::Benchmark { algorithm, fast, sizes, special_sizes, repetitions, special_repetitions, timeout, output, seed } => {
            let mut builder = BenchmarkConfigBuilder::default();
            builder
                .time_budget(Duration::from_secs(timeout))
                .output_dir(output)
                .seed(seed);
            if let Some(sizes) = sizes {
                builder.standard_sizes(sizes);
            }
            if let Some(sizes) = special_sizes {
                builder.special_sizes(sizes);
            }
            if let Some(r) = repetitions {
                builder.repetitions(r);
            }
            if let Some(r) = special_repetitions {
                builder.special_repetitions(r);
            }

            let mut bench = Benchmark::new(builder.build()?);
            match (algorithm, fast) {
                (Some(a), _)  => bench.run_single(a),
                (None, true)  => bench.run_fast(),
                (None, false) => bench.run_comprehensive(),
            }
            for r in bench.results() {
                println!("{:<14} | {:<10} | {:>5} | {:>10} ms | {:?}{}",
                    r.algorithm, r.test_type, r.size, r.time.as_millis(), r.outcome,
                    if r.is_success() && !r.valid { " (INVALID)" } else { "" });
            }
            let path = bench.save()?;
            println!("Results saved to {}", path.display());
        },
        Action::Arrange { instance, repetitions, seed } => {
            let name      = resolve(&store, &instance)?;
            let distances = store.load(&name)?;
            println!("{:<12} | {:>10} | {:>10} | {:>10} | success", "arrangement", "avg (ms)", "min (ms)", "max (ms)");
            for result in analyse(&distances, repetitions, &mut rng(seed)) {
                println!("{}", result);
            }
        },
    }
    Ok(())
}

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

//! This module is meant to test the instance files: their generation, their
//! parsing, and the sanity checks they go through before being solved.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use pdp::benchmark::verification::{verify_store, Status};
use pdp::instance::*;
use pdp::validation::verify_instance;
use pdp::{is_valid_solution, IterativeSetSolver, Solver};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn locate(id: &str) -> PathBuf {
    PathBuf::new()
        .join(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources/instances/")
        .join(id)
}

/// A fresh, empty store in the temp directory
fn scratch(id: &str) -> InstanceStore {
    let dir = std::env::temp_dir().join(format!("pdp-{}-{}", std::process::id(), id));
    let _ = fs::remove_dir_all(&dir);
    InstanceStore::new(dir)
}

#[test]
fn resources_are_readable() {
    let store = InstanceStore::new(locate(""));
    let d = store.load("classic.txt").unwrap();
    assert_eq!(d, vec![1, 2, 3, 4, 5, 6, 7, 7, 8, 1]);
    assert!(store.verify("classic.txt").unwrap());
    assert!(store.verify("map_12.txt").unwrap());
}
#[test]
fn resources_are_listed_in_order() {
    let store = InstanceStore::new(locate(""));
    let names = store.list().unwrap();
    assert_eq!(names, vec![
        "bad_size.txt", "classic.txt", "garbage.txt",
        "map_12.txt", "map_5.txt", "map_8.txt", "unsolvable.txt"
    ]);
}
#[test]
fn ill_formed_instances_are_reported() {
    assert!(matches!(read_instance(locate("garbage.txt")), Err(Error::ParseInt(_))));
    assert!(matches!(read_instance(locate("nope.txt")), Err(Error::Io(_))));

    let store = InstanceStore::new(locate(""));
    assert!(matches!(store.load("nope.txt"), Err(Error::UnknownInstance(_))));
}
#[test]
fn impossible_sizes_are_rejected_before_solving() {
    let d = read_instance(locate("bad_size.txt")).unwrap();
    assert!(matches!(verify_instance(&d), Err(Error::NotTriangular(4))));

    let d = read_instance(locate("map_8.txt")).unwrap();
    assert_eq!(10, verify_instance(&d).unwrap());
}
#[test]
fn generated_instances_are_solvable_and_verifiable() {
    let store   = scratch("generate");
    let mut rng = StdRng::seed_from_u64(99);
    let map = store.generate(6, "six.txt", SortOrder::Shuffled, &mut rng).unwrap();

    let d = store.load("six.txt").unwrap();
    assert!(map.verify_distances(&d));
    assert!(store.verify("six.txt").unwrap());

    let verify = store.load_verify("six.txt").unwrap();
    assert_eq!(6, verify.cuts);
    assert_eq!(verify.sites, map.sites().to_vec());
    assert_eq!(verify.distances, d);

    let mut solver = IterativeSetSolver::new();
    let x = solver.solve(&d).unwrap();
    assert!(is_valid_solution(x.as_slice(), &d));
}
#[test]
fn sort_orders_are_honoured() {
    let store   = scratch("orders");
    let mut rng = StdRng::seed_from_u64(1);
    store.generate(4, "up.txt", SortOrder::Ascending, &mut rng).unwrap();
    store.generate(4, "down.txt", SortOrder::Descending, &mut rng).unwrap();

    let up = store.load("up.txt").unwrap();
    assert!(up.windows(2).all(|w| w[0] <= w[1]));
    let down = store.load("down.txt").unwrap();
    assert!(down.windows(2).all(|w| w[0] >= w[1]));
}
#[test]
fn too_few_cuts() {
    let store   = scratch("few");
    let mut rng = StdRng::seed_from_u64(1);
    assert!(matches!(store.generate(2, "x.txt", SortOrder::Shuffled, &mut rng), Err(Error::TooFewCuts(2))));
    assert!(matches!(store.generate_range(1, SortOrder::Shuffled, &mut rng), Err(Error::TooFewCuts(1))));
}
#[test]
fn generate_range_replaces_the_content_of_the_store() {
    let store   = scratch("range");
    let mut rng = StdRng::seed_from_u64(5);
    store.generate(7, "old.txt", SortOrder::Shuffled, &mut rng).unwrap();

    let names = store.generate_range(6, SortOrder::Shuffled, &mut rng).unwrap();
    assert_eq!(names, vec!["sequential_3.txt", "sequential_4.txt", "sequential_5.txt", "sequential_6.txt"]);
    assert_eq!(store.list().unwrap(), names);
    for name in names {
        assert!(store.verify(&name).unwrap());
    }
}
#[test]
fn generate_random_cycles_the_number_of_cuts() {
    let store   = scratch("random");
    let mut rng = StdRng::seed_from_u64(5);
    let names = store.generate_random(7, SortOrder::Shuffled, &mut rng).unwrap();
    assert_eq!(names.len(), 7);
    assert_eq!(names[0], "random_1.txt");

    let cuts = names.iter()
        .map(|n| store.load_verify(n).unwrap().cuts)
        .collect::<Vec<_>>();
    assert_eq!(cuts, vec![3, 4, 5, 6, 7, 3, 4]);
}

// ----------------------------------------------------------------------------
// --- VERIFICATION -----------------------------------------------------------
// ----------------------------------------------------------------------------
#[test]
fn verification_goes_on_past_unreadable_files() {
    let store   = InstanceStore::new(locate(""));
    let reports = verify_store(&store, Duration::from_secs(60)).unwrap();
    assert_eq!(reports.len(), 7);

    let status = |name: &str| reports.iter()
        .find(|r| r.name == name)
        .map(|r| r.status.clone())
        .unwrap();
    assert!(matches!(status("garbage.txt"),  Status::Invalid(_)));
    assert!(matches!(status("bad_size.txt"), Status::Invalid(_)));
    assert_eq!(status("unsolvable.txt"), Status::NoSolution);

    let garbage = reports.iter().find(|r| r.name == "garbage.txt").unwrap();
    assert_eq!(garbage.size, None);

    let valid = reports.iter().filter(|r| r.is_valid()).map(|r| r.name.as_str()).collect::<Vec<_>>();
    assert_eq!(valid, vec!["classic.txt", "map_12.txt", "map_5.txt", "map_8.txt"]);
}
#[test]
fn a_corrupt_verification_file_is_a_mismatch() {
    let store   = scratch("corrupt");
    let mut rng = StdRng::seed_from_u64(3);
    store.generate(4, "a.txt", SortOrder::Shuffled, &mut rng).unwrap();
    fs::write(store.verify_path_of("a.txt"), "Cuts: x\n").unwrap();

    let reports = verify_store(&store, Duration::from_secs(60)).unwrap();
    assert_eq!(reports.len(), 1);
    assert!(matches!(reports[0].status, Status::Solved { valid: true, matches: false, .. }));
    assert!(!reports[0].is_valid());
}
#[test]
fn a_missing_verification_file_is_not_a_mismatch() {
    let store   = scratch("noverify");
    let mut rng = StdRng::seed_from_u64(3);
    store.generate(4, "a.txt", SortOrder::Shuffled, &mut rng).unwrap();
    fs::remove_file(store.verify_path_of("a.txt")).unwrap();

    let reports = verify_store(&store, Duration::from_secs(60)).unwrap();
    assert!(matches!(reports[0].status, Status::Solved { valid: true, matches: true, .. }));
    assert!(reports[0].is_valid());
}

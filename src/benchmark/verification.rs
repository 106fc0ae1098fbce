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

//! This module checks every instance of a store: each one is loaded, sanity
//! checked, solved, and its solution is compared with the distances and with
//! the map recorded in its verification file. A file that can not be loaded
//! is reported along with the others; it never stops the verification.

use std::fmt;
use std::time::Duration;

use log::warn;

use crate::benchmark::{run_once, Algorithm, Outcome};
use crate::instance::{Error, InstanceStore};
use crate::validation::{is_valid_solution, verify_instance};

/// What the verification of one instance concluded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The instance could not be loaded or can not possibly be solved
    Invalid(String),
    /// The solver returned a point set
    Solved {
        time   : Duration,
        /// Does the point set reconstruct the distances ?
        valid  : bool,
        /// Do the distances match the map of the verification file ? (true
        /// when there is no such file)
        matches: bool,
    },
    NoSolution,
    Timeout,
}

/// The verification of one instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub name  : String,
    /// The number of distances (when the file could be loaded)
    pub size  : Option<usize>,
    pub status: Status,
}
impl Report {
    /// True iff the instance was solved correctly and agrees with its
    /// verification file.
    pub fn is_valid(&self) -> bool {
        matches!(self.status, Status::Solved { valid: true, matches: true, .. })
    }
}
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string());
        write!(f, "{:<24} | {:>6} | ", self.name, size)?;
        match &self.status {
            Status::Invalid(why) => write!(f, "INVALID ({})", why),
            Status::Solved { time, valid, matches } => {
                write!(f, "{} in {:.3}s", if *valid { "VALID" } else { "WRONG" }, time.as_secs_f32())?;
                if !matches {
                    write!(f, " (verify file mismatch)")?;
                }
                Ok(())
            },
            Status::NoSolution => write!(f, "NO SOLUTION"),
            Status::Timeout    => write!(f, "TIMEOUT"),
        }
    }
}

/// Verifies one instance of the store with the iterative solver.
pub fn verify_one(store: &InstanceStore, name: &str, budget: Duration) -> Report {
    let distances = match store.load(name) {
        Ok(distances) => distances,
        Err(e)        => {
            warn!("failed to load instance {}: {}", name, e);
            return Report { name: name.to_string(), size: None, status: Status::Invalid(e.to_string()) };
        }
    };
    let size = Some(distances.len());
    if let Err(e) = verify_instance(&distances) {
        return Report { name: name.to_string(), size, status: Status::Invalid(e.to_string()) };
    }

    let (completion, time) = run_once(Algorithm::Iterative, &distances, budget);
    let status = match Outcome::from(&completion) {
        Outcome::NoSolution => Status::NoSolution,
        Outcome::Timeout    => Status::Timeout,
        Outcome::Solved     => {
            let valid = completion.solution.as_ref()
                .map(|x| is_valid_solution(x.as_slice(), &distances))
                .unwrap_or(false);
            let matches = match store.verify(name) {
                Ok(matches)                    => matches,
                Err(Error::UnknownInstance(_)) => true,
                Err(e)                         => {
                    warn!("unreadable verification file for {}: {}", name, e);
                    false
                }
            };
            Status::Solved { time, valid, matches }
        }
    };
    Report { name: name.to_string(), size, status }
}

/// Verifies all the instances of the store, in the order of `list`. Only a
/// failure to list the store is an error.
pub fn verify_store(store: &InstanceStore, budget: Duration) -> Result<Vec<Report>, Error> {
    Ok(store.list()?
        .iter()
        .map(|name| verify_one(store, name, budget))
        .collect())
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_report {
    use std::time::Duration;

    use crate::benchmark::verification::{Report, Status};

    fn report(status: Status) -> Report {
        Report { name: "x.txt".to_string(), size: Some(3), status }
    }

    #[test]
    fn only_a_matching_solution_is_valid() {
        let ok = Status::Solved { time: Duration::ZERO, valid: true, matches: true };
        assert!(report(ok).is_valid());
        let mismatch = Status::Solved { time: Duration::ZERO, valid: true, matches: false };
        assert!(!report(mismatch).is_valid());
        assert!(!report(Status::NoSolution).is_valid());
        assert!(!report(Status::Invalid("empty instance".to_string())).is_valid());
    }
    #[test]
    fn a_mismatch_is_shown() {
        let r = report(Status::Solved { time: Duration::ZERO, valid: true, matches: false });
        assert!(format!("{}", r).ends_with("VALID in 0.000s (verify file mismatch)"));
    }
    #[test]
    fn an_unreadable_file_has_no_size() {
        let r = Report { name: "g.txt".to_string(), size: None, status: Status::Invalid("bad".to_string()) };
        assert_eq!(format!("{}", r), format!("{:<24} | {:>6} | INVALID (bad)", "g.txt", "-"));
    }
}

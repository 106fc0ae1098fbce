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

//! This module contains the implementation of some data structures that are
//! useful when implementing a solver. In particular, it provides the `Watch`
//! which counts the expanded nodes and enforces the cutoff, and the
//! `NoDupSet` which remembers the states a breadth first search already
//! reached so that it never develops two equivalent states.

use std::hash::Hash;
use std::time::{Duration, Instant};

use metrohash::MetroHashSet;

use crate::abstraction::Cutoff;
use crate::common::Reason;

/// The watch accompanies one search from its start to its end. Every solver
/// ticks it once per expanded node.
pub(crate) struct Watch<'a, C: Cutoff> {
    cutoff  : &'a C,
    started : Instant,
    explored: usize,
}
impl <'a, C: Cutoff> Watch<'a, C> {
    pub fn new(cutoff: &'a C) -> Self {
        Watch { cutoff, started: Instant::now(), explored: 0 }
    }
    /// Accounts for the expansion of one more node, and tells whether the
    /// search must stop right away.
    pub fn tick(&mut self) -> Result<(), Reason> {
        self.explored += 1;
        if self.cutoff.must_stop(self.explored, self.started.elapsed()) {
            Err(Reason::CutoffOccurred)
        } else {
            Ok(())
        }
    }
    pub fn explored(&self) -> usize {
        self.explored
    }
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// The set of the states a search already reached.
pub(crate) struct NoDupSet<T> where T: Eq + Hash {
    states: MetroHashSet<T>
}
impl <T> NoDupSet<T> where T: Eq + Hash {
    pub fn new() -> Self {
        NoDupSet { states: MetroHashSet::default() }
    }
    /// Records the state. Returns true iff it had never been seen before.
    pub fn insert(&mut self, state: T) -> bool {
        self.states.insert(state)
    }
    pub fn len(&self) -> usize {
        self.states.len()
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################


#[cfg(test)]
mod test_no_dup_set {
    use crate::implementation::solver::utils::NoDupSet;

    #[test]
    fn a_state_is_only_accepted_once() {
        let mut set = NoDupSet::new();
        assert!(set.insert(vec![0, 5]));
        assert!(set.insert(vec![0, 2, 5]));
        assert!(!set.insert(vec![0, 5]));
        assert_eq!(2, set.len());
    }
}

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

//! This module defines the traits used to encapsulate solver heuristics.
//!
//! Namely, it defines the `Cutoff` heuristic which is used to impose a
//! stopping criterion on the search.

use std::time::Duration;

/// This trait encapsulates a criterion (external to the solver) which imposes
/// to stop searching. Typically, this is done to grant a given time budget to
/// the search: the partial digest problem admits pathological instances that
/// would otherwise run for an unbounded amount of time.
pub trait Cutoff {
    /// Returns true iff the criterion is met and the search must stop.
    /// `explored` is the number of nodes expanded so far and `elapsed` is
    /// the time that elapsed since the search started.
    fn must_stop(&self, explored: usize, elapsed: Duration) -> bool;
}

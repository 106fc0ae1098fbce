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

//! This module provides the implementation of the frontiers used by the two
//! phase solver to order the resumption of its alpha nodes.

use std::cmp::Ordering;
use std::collections::VecDeque;

use binary_heap_plus::BinaryHeap;
use compare::Compare;

use crate::abstraction::Frontier;
use crate::implementation::state::SearchState;

/// This ordering considers that the fewer distances remain to be explained,
/// the cheaper a node is to resume (hence the sooner it should be popped).
/// Ties are broken on the point sets so that the order is deterministic: the
/// lexicographically smallest point set is popped first.
#[derive(Debug, Default, Copy, Clone)]
pub struct FewestRemaining;
impl Compare<SearchState> for FewestRemaining {
    fn compare(&self, a: &SearchState, b: &SearchState) -> Ordering {
        b.remaining.len().cmp(&a.remaining.len())
            .then_with(|| b.points.cmp(&a.points))
    }
}

/// The default frontier of the two phase solver: a binary heap which pops the
/// cheapest nodes first (see `FewestRemaining`).
pub struct AlphaFrontier {
    heap: BinaryHeap<SearchState, FewestRemaining>
}
impl Default for AlphaFrontier {
    fn default() -> Self {
        Self{ heap: BinaryHeap::from_vec_cmp(vec![], FewestRemaining) }
    }
}
impl Frontier for AlphaFrontier {
    fn push(&mut self, node: SearchState) {
        self.heap.push(node)
    }

    fn pop(&mut self) -> Option<SearchState> {
        self.heap.pop()
    }

    fn clear(&mut self) {
        self.heap.clear()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// A frontier that simply resumes the nodes in the order they were reached
/// by the breadth first phase.
#[derive(Default)]
pub struct InsertionOrderFrontier {
    queue: VecDeque<SearchState>
}
impl Frontier for InsertionOrderFrontier {
    fn push(&mut self, node: SearchState) {
        self.queue.push_back(node)
    }

    fn pop(&mut self) -> Option<SearchState> {
        self.queue.pop_front()
    }

    fn clear(&mut self) {
        self.queue.clear()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

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

//! This module defines the most basic data types that are used throughout all
//! the code of our library (both at the abstraction and implementation levels).
//! These are also the types your client code is likely to work with.

// ----------------------------------------------------------------------------
// --- SOLUTION ---------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A solution to a DCKP instance; complete or in construction.
///
/// The assignment `x` is expressed over *storage* indices: position `i` refers
/// to the i-th item of the ratio-sorted item table of the instance, not to the
/// i-th item of the input file (use [`crate::Instance::original_id`] to map
/// back when reporting).
///
/// The invariants tying `profit`, `weight`, `ub` and `x` together are checked
/// by [`crate::validate`]: the stored profit and weight must match their
/// recomputation from `x`, the weight may not exceed the capacity, the profit
/// may not exceed the upper bound, and no conflicting pair may be jointly
/// selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// The boolean assignment over all items (storage order).
    pub x: Vec<bool>,
    /// The profit achieved by the assignment.
    pub profit: usize,
    /// The weight consumed by the assignment.
    pub weight: usize,
    /// The best known upper bound for the branch that produced this solution.
    pub ub: usize,
}

impl Solution {
    /// Creates the empty solution over `n` items: nothing selected, zero
    /// profit and weight, infinite upper bound. This is the state in which
    /// every solver expects to receive its in-out solution.
    pub fn empty(n: usize) -> Self {
        Solution {
            x: vec![false; n],
            profit: 0,
            weight: 0,
            ub: usize::MAX,
        }
    }

    /// Returns the storage indices of the selected items, in increasing order.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.x
            .iter()
            .enumerate()
            .filter(|(_, &sel)| sel)
            .map(|(i, _)| i)
    }
}

// ----------------------------------------------------------------------------
// --- COMPLETION -------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The outcome of a solver run.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Completion {
    /// True iff the search ran to its natural completion: it was neither
    /// stopped by the cutoff nor aborted because a resource cap was hit.
    /// For the exact searches, a natural completion is a proof of optimality.
    pub is_exact: bool,
    /// The value of the best solution found, if any solution with a positive
    /// profit was found at all.
    pub best_value: Option<usize>,
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

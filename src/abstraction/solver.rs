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

//! This module defines the `Solver` trait: the single entry point shared by
//! the exact searches and the heuristics of this crate.

use crate::{Completion, Cutoff, Instance, Solution};

/// This is the solver abstraction. It is implemented by every search and
/// heuristic shipped by this crate (branch-and-bound, incremental
/// enumeration, relax-and-repair, greedy, hill-climbing).
pub trait Solver {
    /// Runs the solver on `instance`, improving `soln` in place.
    ///
    /// The caller pre-sizes `soln` to `n` false bits with zero profit and
    /// weight and an infinite upper bound ([`Solution::empty`]). The
    /// pruning-aware searches additionally treat the incoming profit as a
    /// lower bound, so a cheap heuristic may be run into the same solution
    /// first to seed the search.
    ///
    /// `on_improved` is invoked synchronously once per strict improvement,
    /// in increasing profit order, with the improved solution. If the solver
    /// never finds an improving solution, the callback is invoked exactly
    /// once at the end with whatever `soln` holds (the zero solution, absent
    /// seeding). The callback is a reporting hook: it must not mutate the
    /// instance or attempt to steer the search.
    ///
    /// The `cutoff` is polled at safe points (per dequeued node, per level);
    /// once it trips the solver returns with the best solution found so far.
    fn solve(
        &mut self,
        instance: &Instance,
        soln: &mut Solution,
        cutoff: &dyn Cutoff,
        on_improved: &mut dyn FnMut(&Solution),
    ) -> Completion;
}

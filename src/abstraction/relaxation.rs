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

//! This module defines the `Relaxation` trait: the capability interface
//! through which the exact searches obtain an upper bound on the profit
//! reachable from a partial assignment. Two implementations are provided
//! (`FractionalBound` and `LagrangianBound`); callers stay bound-agnostic.

use crate::{Instance, Solution};

/// The decided part of a partial assignment, as seen by a bounding procedure.
///
/// Items `0..first_free` carry a fixed decision (read from `decided`); items
/// `first_free..n` are free. The `profit` and `weight` fields are those of
/// the decided prefix only.
#[derive(Debug, Clone, Copy)]
pub struct Prefix<'a> {
    /// The assignment over decided items. Entries at or beyond `first_free`
    /// are ignored by the bounds and must be false.
    pub decided: &'a [bool],
    /// The index of the first undecided item.
    pub first_free: usize,
    /// The profit accumulated by the decided prefix.
    pub profit: usize,
    /// The weight accumulated by the decided prefix.
    pub weight: usize,
}

/// How a relaxed solution selects the items of the undecided range.
pub(crate) enum Picks {
    /// All items in `first_free..end` are in, everything at or after `end`
    /// is out (the fractional knapsack picks a contiguous ratio-order run).
    Contiguous(usize),
    /// One flag per undecided item, in storage order starting at `first_free`.
    Explicit(Vec<bool>),
}

/// The outcome of a bound computation: an admissible upper bound plus enough
/// state to materialize the integral part of the relaxed assignment.
pub struct Relaxed {
    /// An upper bound on the profit reachable from the prefix onward. This is
    /// admissible at all times: no completion of the prefix can beat it.
    pub ub: usize,
    pub(crate) picks: Picks,
}

impl Relaxed {
    /// Writes the integral part of the relaxed assignment into `soln` over
    /// the range `first_free..n`, updating the running profit and weight.
    /// `first_free` must be the same index the bound was computed with, and
    /// `soln` must currently hold the decided prefix with matching profit and
    /// weight. The upper bound of `soln` is left untouched: the caller decides
    /// how to cap it.
    pub fn materialize(&self, instance: &Instance, soln: &mut Solution, first_free: usize) {
        match &self.picks {
            Picks::Contiguous(end) => {
                for i in first_free..instance.num_items() {
                    if i < *end {
                        soln.x[i] = true;
                        soln.profit += instance.profit(i);
                        soln.weight += instance.weight(i);
                    } else {
                        soln.x[i] = false;
                    }
                }
            }
            Picks::Explicit(picks) => {
                for (k, &pick) in picks.iter().enumerate() {
                    let i = first_free + k;
                    soln.x[i] = pick;
                    if pick {
                        soln.profit += instance.profit(i);
                        soln.weight += instance.weight(i);
                    }
                }
            }
        }
    }
}

/// A relaxation bounds the best profit reachable from a partial assignment by
/// solving a simpler problem (dropping the integrality constraint, dualizing
/// the conflict constraints, or both).
///
/// The returned bound must be admissible: greater than or equal to the true
/// optimum of the subproblem rooted at the prefix. The searches rely on this
/// to prune, so an implementation returning an invalid bound silently turns
/// the exact searches into heuristics.
pub trait Relaxation {
    /// Computes an upper bound for the subproblem in which items
    /// `0..prefix.first_free` are fixed as in `prefix.decided`.
    fn compute(&mut self, instance: &Instance, prefix: &Prefix) -> Relaxed;
}

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

//! This module implements the best-first branch-and-bound search. Subproblems
//! fix the items one storage index at a time; the open ones sit in a max-heap
//! keyed on their upper bound, so the globally most promising subproblem is
//! always expanded next.

use binary_heap_plus::BinaryHeap;
use compare::Compare;

use crate::{
    repair, Completion, Cursor, Cutoff, Instance, Prefix, Relaxation, Relaxed, Solution, Solver,
};

/// An open subproblem: the items `0..prefix.len()` are fixed as in `prefix`,
/// everything beyond is free.
#[derive(Debug, Clone)]
struct Node {
    prefix: Vec<bool>,
    /// The bound of this subproblem, capped by that of its parent.
    ub: usize,
    profit: usize,
    weight: usize,
}

/// The heap ordering: greater upper bound first.
struct MaxUb;
impl Compare<Node> for MaxUb {
    fn compare(&self, a: &Node, b: &Node) -> std::cmp::Ordering {
        a.ub.cmp(&b.ub)
    }
}

/// The best-first branch-and-bound search, parameterized by the relaxation
/// that bounds its subproblems.
///
/// Expanding a subproblem tries `false` then `true` for the first free item;
/// a `true` child is generated only when the item fits and conflicts with
/// nothing fixed before it. Every surviving child gets its relaxed assignment
/// repaired into a feasible solution on the spot, so incumbents improve long
/// before the search ends. Exhausting the heap proves optimality.
pub struct BranchAndBound<'a> {
    relaxation: &'a mut dyn Relaxation,
}

impl<'a> BranchAndBound<'a> {
    pub fn new(relaxation: &'a mut dyn Relaxation) -> Self {
        BranchAndBound { relaxation }
    }

    /// Repairs the relaxed completion of a subproblem into `scratch` and
    /// promotes it to incumbent if it beats the current one.
    #[allow(clippy::too_many_arguments)]
    fn try_incumbent(
        instance: &Instance,
        relaxed: &Relaxed,
        prefix: &[bool],
        profit: usize,
        weight: usize,
        scratch: &mut Solution,
        soln: &mut Solution,
        improved: &mut bool,
        on_improved: &mut dyn FnMut(&Solution),
    ) {
        let first_free = prefix.len();
        scratch.x[..first_free].copy_from_slice(prefix);
        scratch.x[first_free..].iter_mut().for_each(|xi| *xi = false);
        scratch.profit = profit;
        scratch.weight = weight;
        relaxed.materialize(instance, scratch, first_free);
        repair(instance, scratch, first_free);
        if scratch.profit > soln.profit {
            soln.x.copy_from_slice(&scratch.x);
            soln.profit = scratch.profit;
            soln.weight = scratch.weight;
            *improved = true;
            on_improved(soln);
        }
    }
}

impl Solver for BranchAndBound<'_> {
    fn solve(
        &mut self,
        instance: &Instance,
        soln: &mut Solution,
        cutoff: &dyn Cutoff,
        on_improved: &mut dyn FnMut(&Solution),
    ) -> Completion {
        let n = instance.num_items();
        let mut improved = false;
        let mut exact = true;
        let mut scratch = Solution::empty(n);
        // full-length decision buffer handed to the relaxation
        let mut decided = vec![false; n];

        let root_relaxed = self.relaxation.compute(
            instance,
            &Prefix {
                decided: &decided,
                first_free: 0,
                profit: 0,
                weight: 0,
            },
        );
        soln.ub = soln.ub.min(root_relaxed.ub);
        Self::try_incumbent(
            instance,
            &root_relaxed,
            &[],
            0,
            0,
            &mut scratch,
            soln,
            &mut improved,
            on_improved,
        );

        let root = Node {
            prefix: vec![],
            ub: root_relaxed.ub,
            profit: 0,
            weight: 0,
        };
        let mut fringe = BinaryHeap::from_vec_cmp(vec![root], MaxUb);

        while let Some(node) = fringe.pop() {
            if cutoff.must_stop() {
                exact = false;
                break;
            }
            if node.ub <= soln.profit {
                // the heap is bound-ordered: nothing below can improve either
                break;
            }

            let j = node.prefix.len();
            for value in [false, true] {
                let mut profit = node.profit;
                let mut weight = node.weight;
                if value {
                    weight += instance.weight(j);
                    if weight > instance.capacity() {
                        continue;
                    }
                    let mut bwd = Cursor::at(instance.backward(), j);
                    if bwd.conflicts_with(&node.prefix, j) {
                        continue;
                    }
                    profit += instance.profit(j);
                }

                decided[..j].copy_from_slice(&node.prefix);
                decided[j] = value;
                decided[j + 1..].iter_mut().for_each(|xi| *xi = false);
                let relaxed = self.relaxation.compute(
                    instance,
                    &Prefix {
                        decided: &decided,
                        first_free: j + 1,
                        profit,
                        weight,
                    },
                );
                let ub = relaxed.ub.min(node.ub);
                if ub <= soln.profit {
                    continue;
                }

                let mut prefix = Vec::with_capacity(j + 1);
                prefix.extend_from_slice(&node.prefix);
                prefix.push(value);
                Self::try_incumbent(
                    instance,
                    &relaxed,
                    &prefix,
                    profit,
                    weight,
                    &mut scratch,
                    soln,
                    &mut improved,
                    on_improved,
                );
                if j + 1 < n {
                    fringe.push(Node {
                        prefix,
                        ub,
                        profit,
                        weight,
                    });
                }
            }
        }

        if exact {
            // natural completion: the incumbent is optimal
            soln.ub = soln.profit;
        }
        if !improved {
            on_improved(soln);
        }
        Completion {
            is_exact: exact,
            best_value: if soln.profit > 0 {
                Some(soln.profit)
            } else {
                None
            },
        }
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

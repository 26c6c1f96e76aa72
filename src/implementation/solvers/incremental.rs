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

//! This module implements the level-synchronous incremental enumeration. The
//! search keeps one frontier of partial assignments per level; level `j`
//! decides item `j` for every frontier node at once. Infeasible, dominated
//! and bound-pruned extensions never enter the next frontier, and the global
//! upper bound shrinks level by level as the surviving bounds do.

use crate::{
    Completion, Cursor, Cutoff, Instance, NoObserver, Observer, Prefix, Relaxation, Solution,
    Solver,
};

/// One partial assignment of the frontier. The decisions vector only spans
/// the decided levels; everything beyond it is an implicit `false`, so a node
/// is always a feasible solution in its own right.
#[derive(Debug, Clone)]
struct Node {
    x: Vec<bool>,
    /// The undecided items that a conflict with an earlier selection rules
    /// out, sorted by storage index.
    conflict_set: Vec<usize>,
    profit: usize,
    weight: usize,
    /// The bound of this subproblem, capped by that of its parent.
    ub: usize,
}

/// The incremental enumeration, parameterized by the relaxation that bounds
/// the frontier nodes.
///
/// The frontier can grow large on loosely constrained instances, so it is
/// capped; hitting the cap aborts the run with whatever incumbent and bound
/// the completed levels established (the same non-exact outcome as a tripped
/// cutoff).
pub struct IncrementalEnumeration<'a, O: Observer = NoObserver> {
    relaxation: &'a mut dyn Relaxation,
    max_nodes: usize,
    observer: O,
}

const DEFAULT_MAX_NODES: usize = 1_000_000;

impl<'a> IncrementalEnumeration<'a> {
    pub fn new(relaxation: &'a mut dyn Relaxation) -> Self {
        IncrementalEnumeration {
            relaxation,
            max_nodes: DEFAULT_MAX_NODES,
            observer: NoObserver,
        }
    }
}

impl<'a, O: Observer> IncrementalEnumeration<'a, O> {
    pub fn with_observer(relaxation: &'a mut dyn Relaxation, observer: O) -> Self {
        IncrementalEnumeration {
            relaxation,
            max_nodes: DEFAULT_MAX_NODES,
            observer,
        }
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Bounds the subproblem below `x` (padded with `false` up to `first_free`)
    /// through the scratch decision buffer.
    fn bound(
        &mut self,
        instance: &Instance,
        decided: &mut [bool],
        x: &[bool],
        first_free: usize,
        profit: usize,
        weight: usize,
    ) -> usize {
        decided.iter_mut().for_each(|xi| *xi = false);
        decided[..x.len()].copy_from_slice(x);
        self.relaxation
            .compute(
                instance,
                &Prefix {
                    decided,
                    first_free,
                    profit,
                    weight,
                },
            )
            .ub
    }
}

/// True iff some earlier sibling in `next` renders `node` redundant: at least
/// the profit, at most the weight, and a conflict set that restricts no more.
/// Equality on all three axes counts, so of two identical siblings exactly
/// the earlier one survives.
fn is_dominated(next: &[Node], node: &Node) -> bool {
    next.iter().any(|other| {
        other.profit >= node.profit
            && other.weight <= node.weight
            && other.conflict_set.len() <= node.conflict_set.len()
            && is_subset(&other.conflict_set, &node.conflict_set)
    })
}

/// Whether the sorted set `a` is included in the sorted set `b`.
fn is_subset(a: &[usize], b: &[usize]) -> bool {
    let mut it = b.iter();
    'outer: for x in a {
        for y in it.by_ref() {
            match y.cmp(x) {
                std::cmp::Ordering::Less => continue,
                std::cmp::Ordering::Equal => continue 'outer,
                std::cmp::Ordering::Greater => return false,
            }
        }
        return false;
    }
    true
}

impl<O: Observer> Solver for IncrementalEnumeration<'_, O> {
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
        let mut decided = vec![false; n];

        let root_ub = self.bound(instance, &mut decided, &[], 0, 0, 0);
        soln.ub = soln.ub.min(root_ub);
        let mut current = vec![Node {
            x: vec![],
            conflict_set: vec![],
            profit: 0,
            weight: 0,
            ub: root_ub,
        }];

        'levels: for j in 0..n {
            self.observer.level(j, current.len());
            if cutoff.must_stop() {
                exact = false;
                break;
            }
            // every feasible solution either extends a frontier node or has
            // been reported already
            let frontier_ub = current.iter().map(|node| node.ub).max().unwrap_or(0);
            soln.ub = soln.ub.min(frontier_ub.max(soln.profit));

            let fwd = Cursor::at(instance.forward(), j);
            let jth_block = fwd.block(j);
            // the last level has nothing left to extend, so no bound is
            // computed and no node outlives the improvement check
            let last_level = j + 1 == n;

            let mut next = Vec::with_capacity(current.len());
            for node in &current {
                if cutoff.must_stop() {
                    exact = false;
                    break 'levels;
                }

                let mut x = Vec::with_capacity(j + 1);
                x.extend_from_slice(&node.x);
                x.resize(j, false);

                if !last_level {
                    // discarding item j can only lower the bound
                    let ub_false = self
                        .bound(
                            instance,
                            &mut decided,
                            &node.x,
                            j + 1,
                            node.profit,
                            node.weight,
                        )
                        .min(node.ub);
                    next.push(Node {
                        x: x.clone(),
                        conflict_set: node.conflict_set.clone(),
                        profit: node.profit,
                        weight: node.weight,
                        ub: ub_false,
                    });
                }

                // taking item j must fit, be conflict-free and keep a bound
                // that can still beat the incumbent
                let weight = node.weight + instance.weight(j);
                if weight > instance.capacity() {
                    continue;
                }
                if node.conflict_set.binary_search(&j).is_ok() {
                    continue;
                }
                let profit = node.profit + instance.profit(j);
                x.push(true);

                if last_level {
                    if profit > soln.profit {
                        soln.x.copy_from_slice(&x);
                        soln.profit = profit;
                        soln.weight = weight;
                        improved = true;
                        on_improved(soln);
                    }
                    continue;
                }

                let ub_true = self
                    .bound(instance, &mut decided, &x, j + 1, profit, weight)
                    .min(node.ub);
                if ub_true < soln.profit {
                    continue;
                }

                let mut conflict_set = Vec::with_capacity(
                    node.conflict_set.len() + jth_block.len(),
                );
                conflict_set.extend_from_slice(&node.conflict_set);
                for c in jth_block {
                    if let Err(at) = conflict_set.binary_search(&c.j) {
                        conflict_set.insert(at, c.j);
                    }
                }

                let child = Node {
                    x,
                    conflict_set,
                    profit,
                    weight,
                    ub: ub_true,
                };
                if is_dominated(&next, &child) {
                    continue;
                }
                if profit > soln.profit {
                    soln.x[..child.x.len()].copy_from_slice(&child.x);
                    soln.x[child.x.len()..].iter_mut().for_each(|xi| *xi = false);
                    soln.profit = profit;
                    soln.weight = weight;
                    improved = true;
                    on_improved(soln);
                }
                next.push(child);
            }

            if next.len() > self.max_nodes {
                // frontier blow-up: give up on the proof, keep the incumbent
                exact = false;
                break;
            }
            current = next;
        }

        if exact {
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

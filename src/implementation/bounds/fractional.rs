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

//! This module implements the fractional knapsack relaxation: the conflict
//! constraints are dropped entirely and the integrality constraint is relaxed
//! on the single break item.

use crate::{Instance, Picks, Prefix, Relaxation, Relaxed};

/// The fractional knapsack bound.
///
/// Because the item table is already sorted by decreasing profit/weight ratio,
/// the continuous relaxation is solved by one greedy sweep over the free
/// suffix: take items whole while they fit, then a fraction of the first item
/// that does not. Conflicts are ignored, so the bound is admissible for the
/// conflict-constrained problem as well.
#[derive(Debug, Default, Clone, Copy)]
pub struct FractionalBound;

impl Relaxation for FractionalBound {
    fn compute(&mut self, instance: &Instance, prefix: &Prefix) -> Relaxed {
        let n = instance.num_items();
        let capacity = instance.capacity();
        let mut profit = prefix.profit;
        let mut weight = prefix.weight;

        let mut i = prefix.first_free;
        while i < n {
            // a full knapsack or a worthless suffix ends the sweep early
            if weight == capacity || instance.profit(i) == 0 {
                break;
            }
            if weight + instance.weight(i) <= capacity {
                profit += instance.profit(i);
                weight += instance.weight(i);
                i += 1;
            } else {
                // profits are integral, so flooring the break item's share
                // keeps the bound admissible; integer arithmetic floors it
                // exactly
                let ub = profit + (capacity - weight) * instance.profit(i) / instance.weight(i);
                return Relaxed {
                    ub,
                    picks: Picks::Contiguous(i),
                };
            }
        }

        Relaxed {
            ub: profit,
            picks: Picks::Contiguous(i),
        }
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_fractional {
    use crate::{FractionalBound, Instance, Prefix, Relaxation, Solution};

    fn sample_instance() -> Instance {
        Instance::new(10, vec![(10, 5), (10, 4), (12, 6), (18, 9)], vec![(0, 1)]).unwrap()
    }

    fn root(n: usize) -> Vec<bool> {
        vec![false; n]
    }

    #[test]
    fn the_root_bound_takes_a_fraction_of_the_break_item() {
        let inst = sample_instance();
        let decided = root(4);
        let prefix = Prefix {
            decided: &decided,
            first_free: 0,
            profit: 0,
            weight: 0,
        };
        // whole items at storage 0 and 1 (w = 9), then 1/6 of item 2
        assert_eq!(FractionalBound.compute(&inst, &prefix).ub, 22);
    }

    #[test]
    fn an_exactly_full_knapsack_yields_the_prefix_profit() {
        let inst = sample_instance();
        let mut decided = root(4);
        decided[0] = true; // (10, 4)
        let prefix = Prefix {
            decided: &decided,
            first_free: 2,
            profit: 20,
            weight: 10,
        };
        assert_eq!(FractionalBound.compute(&inst, &prefix).ub, 20);
    }

    #[test]
    fn a_zero_profit_item_ends_the_sweep() {
        // zero-profit items sort last, anything after them is worthless too
        let inst = Instance::new(10, vec![(5, 2), (0, 1), (4, 2)], vec![]).unwrap();
        let decided = root(3);
        let prefix = Prefix {
            decided: &decided,
            first_free: 0,
            profit: 0,
            weight: 0,
        };
        assert_eq!(FractionalBound.compute(&inst, &prefix).ub, 9);
    }

    #[test]
    fn an_empty_free_range_yields_the_prefix_profit() {
        let inst = sample_instance();
        let decided = vec![true, false, true, false];
        let prefix = Prefix {
            decided: &decided,
            first_free: 4,
            profit: 22,
            weight: 10,
        };
        assert_eq!(FractionalBound.compute(&inst, &prefix).ub, 22);
    }

    #[test]
    fn materializing_the_relaxed_picks_recovers_the_whole_items() {
        let inst = sample_instance();
        let decided = root(4);
        let prefix = Prefix {
            decided: &decided,
            first_free: 0,
            profit: 0,
            weight: 0,
        };
        let relaxed = FractionalBound.compute(&inst, &prefix);

        let mut soln = Solution::empty(4);
        relaxed.materialize(&inst, &mut soln, 0);
        assert_eq!(soln.x, vec![true, true, false, false]);
        assert_eq!(soln.profit, 20);
        assert_eq!(soln.weight, 9);
    }
}

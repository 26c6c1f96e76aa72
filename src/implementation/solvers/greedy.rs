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

//! This module implements the greedy constructive heuristic: one sweep of the
//! ratio-sorted item table, taking every item that fits and conflicts with
//! nothing taken before it.

use crate::{Completion, Cursor, Cutoff, Instance, Solution, Solver};

/// The greedy heuristic. One linear pass; its result is the usual seed for
/// the pruning-aware searches. Worthless (zero-profit) items are never taken,
/// so every selection is a strict improvement.
#[derive(Debug, Default, Clone, Copy)]
pub struct Greedy;

impl Solver for Greedy {
    fn solve(
        &mut self,
        instance: &Instance,
        soln: &mut Solution,
        _cutoff: &dyn Cutoff,
        on_improved: &mut dyn FnMut(&Solution),
    ) -> Completion {
        soln.x.iter_mut().for_each(|xi| *xi = false);
        soln.profit = 0;
        soln.weight = 0;

        let mut improved = false;
        let mut fwd = Cursor::begin(instance.forward());
        let mut bwd = Cursor::begin(instance.backward());
        for i in 0..instance.num_items() {
            fwd.advance(i);
            bwd.advance(i);
            if instance.profit(i) == 0 {
                continue;
            }
            if soln.weight + instance.weight(i) > instance.capacity() {
                continue;
            }
            let mut f = fwd;
            let mut b = bwd;
            if f.conflicts_with(&soln.x, i) || b.conflicts_with(&soln.x, i) {
                continue;
            }
            soln.x[i] = true;
            soln.profit += instance.profit(i);
            soln.weight += instance.weight(i);
            improved = true;
            on_improved(soln);
        }

        if !improved {
            on_improved(soln);
        }
        Completion {
            is_exact: true,
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

#[cfg(test)]
mod test_greedy {
    use crate::{Greedy, Instance, NoCutoff, Solution, Solver};

    fn sample_instance() -> Instance {
        Instance::new(10, vec![(10, 5), (10, 4), (12, 6), (18, 9)], vec![(0, 1)]).unwrap()
    }

    #[test]
    fn greedy_takes_ratio_order_and_skips_conflicts() {
        let inst = sample_instance();
        let mut soln = Solution::empty(4);
        let completion = Greedy.solve(&inst, &mut soln, &NoCutoff, &mut |_| {});
        // takes storage 0 (10, 4), skips 1 (conflict), takes 2 (12, 6)
        assert_eq!(soln.x, vec![true, false, true, false]);
        assert_eq!(soln.profit, 22);
        assert_eq!(soln.weight, 10);
        assert_eq!(completion.best_value, Some(22));
    }

    #[test]
    fn improvements_are_reported_in_increasing_order() {
        let inst = sample_instance();
        let mut soln = Solution::empty(4);
        let mut profits = vec![];
        Greedy.solve(&inst, &mut soln, &NoCutoff, &mut |s| profits.push(s.profit));
        assert_eq!(profits, vec![10, 22]);
    }

    #[test]
    fn a_hopeless_instance_reports_the_zero_solution_once() {
        // nothing fits
        let inst = Instance::new(1, vec![(10, 5), (10, 4)], vec![]).unwrap();
        let mut soln = Solution::empty(2);
        let mut calls = 0;
        let completion = Greedy.solve(&inst, &mut soln, &NoCutoff, &mut |s| {
            calls += 1;
            assert_eq!(s.profit, 0);
        });
        assert_eq!(calls, 1);
        assert_eq!(completion.best_value, None);
    }

    #[test]
    fn a_stale_seed_is_overwritten() {
        let inst = sample_instance();
        let mut soln = Solution::empty(4);
        soln.x[3] = true;
        soln.profit = 18;
        soln.weight = 9;
        Greedy.solve(&inst, &mut soln, &NoCutoff, &mut |_| {});
        assert_eq!(soln.x, vec![true, false, true, false]);
        assert_eq!(soln.profit, 22);
    }
}

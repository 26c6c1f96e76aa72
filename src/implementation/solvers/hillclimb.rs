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

//! This module implements a steepest-ascent hill climbing heuristic over two
//! neighborhoods: adding one unselected item, and swapping one selected item
//! for one unselected item. The climb starts from whatever the incoming
//! solution holds (typically a greedy seed) and stops at a local optimum.

use crate::{Completion, Cursor, Cutoff, Instance, Solution, Solver};

/// One candidate move of the climb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    /// Select the unselected item `i`.
    Add { i: usize },
    /// Deselect `out` and select `inn` instead.
    Swap { out: usize, inn: usize },
}

/// How many moves of each kind a climb applied.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HillclimbStats {
    pub adds: usize,
    pub swaps: usize,
}

/// The steepest-ascent hill climber. Every round evaluates the complete add
/// and swap neighborhoods and applies the single best profit-improving move;
/// the cutoff is polled once per round.
#[derive(Debug, Default, Clone, Copy)]
pub struct Hillclimb {
    stats: HillclimbStats,
}

impl Hillclimb {
    pub fn new() -> Self {
        Self::default()
    }

    /// The move counters of the last `solve` call.
    pub fn stats(&self) -> HillclimbStats {
        self.stats
    }

    /// True iff the unselected item `i` fits in `slack` spare capacity and
    /// conflicts with nothing selected in `x`.
    fn admissible(instance: &Instance, x: &[bool], slack: usize, i: usize) -> bool {
        if instance.weight(i) > slack {
            return false;
        }
        let mut fwd = Cursor::at(instance.forward(), i);
        let mut bwd = Cursor::at(instance.backward(), i);
        !fwd.conflicts_with(x, i) && !bwd.conflicts_with(x, i)
    }

    /// The best profit-improving move from the current solution, if any.
    fn best_move(&self, instance: &Instance, soln: &Solution) -> Option<(Move, usize)> {
        let n = instance.num_items();
        let slack = instance.capacity() - soln.weight;
        let mut best: Option<(Move, usize)> = None;
        let mut record = |mv: Move, profit: usize| {
            if best.map_or(true, |(_, p)| profit > p) {
                best = Some((mv, profit));
            }
        };

        for i in 0..n {
            if soln.x[i] || instance.profit(i) == 0 {
                continue;
            }
            if Self::admissible(instance, &soln.x, slack, i) {
                record(Move::Add { i }, soln.profit + instance.profit(i));
            }
        }

        let mut x = soln.x.clone();
        for out in 0..n {
            if !soln.x[out] {
                continue;
            }
            // the outgoing item must not veto its own replacement
            x[out] = false;
            let slack = slack + instance.weight(out);
            for inn in 0..n {
                if x[inn] || instance.profit(inn) <= instance.profit(out) {
                    continue;
                }
                if inn != out && Self::admissible(instance, &x, slack, inn) {
                    let profit = soln.profit - instance.profit(out) + instance.profit(inn);
                    record(Move::Swap { out, inn }, profit);
                }
            }
            x[out] = true;
        }

        best.filter(|&(_, profit)| profit > soln.profit && profit <= soln.ub)
    }
}

impl Solver for Hillclimb {
    fn solve(
        &mut self,
        instance: &Instance,
        soln: &mut Solution,
        cutoff: &dyn Cutoff,
        on_improved: &mut dyn FnMut(&Solution),
    ) -> Completion {
        self.stats = HillclimbStats::default();
        let mut improved = false;
        let mut exact = true;

        loop {
            if cutoff.must_stop() {
                exact = false;
                break;
            }
            let Some((mv, _)) = self.best_move(instance, soln) else {
                break;
            };
            match mv {
                Move::Add { i } => {
                    soln.x[i] = true;
                    soln.profit += instance.profit(i);
                    soln.weight += instance.weight(i);
                    self.stats.adds += 1;
                }
                Move::Swap { out, inn } => {
                    soln.x[out] = false;
                    soln.profit -= instance.profit(out);
                    soln.weight -= instance.weight(out);
                    soln.x[inn] = true;
                    soln.profit += instance.profit(inn);
                    soln.weight += instance.weight(inn);
                    self.stats.swaps += 1;
                }
            }
            improved = true;
            on_improved(soln);
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

#[cfg(test)]
mod test_hillclimb {
    use crate::{Greedy, Hillclimb, Instance, NoCutoff, Solution, Solver, StopFlag};

    fn sample_instance() -> Instance {
        Instance::new(10, vec![(10, 5), (10, 4), (12, 6), (18, 9)], vec![(0, 1)]).unwrap()
    }

    #[test]
    fn the_climb_fills_an_empty_solution_with_adds() {
        let inst = sample_instance();
        let mut soln = Solution::empty(4);
        let mut climber = Hillclimb::new();
        climber.solve(&inst, &mut soln, &NoCutoff, &mut |_| {});
        assert_eq!(soln.profit, 22);
        assert!(climber.stats().adds >= 1);
    }

    #[test]
    fn a_swap_escapes_a_greedy_trap() {
        // greedy takes (6, 4) then nothing else fits; swapping for (9, 7) wins
        let inst = Instance::new(7, vec![(6, 4), (9, 7)], vec![]).unwrap();
        let mut soln = Solution::empty(2);
        Greedy.solve(&inst, &mut soln, &NoCutoff, &mut |_| {});
        assert_eq!(soln.profit, 6);

        let mut climber = Hillclimb::new();
        climber.solve(&inst, &mut soln, &NoCutoff, &mut |_| {});
        assert_eq!(soln.profit, 9);
        assert_eq!(climber.stats().swaps, 1);
    }

    #[test]
    fn the_climb_respects_conflicts() {
        let inst = sample_instance();
        let mut soln = Solution::empty(4);
        soln.x[0] = true;
        soln.profit = 10;
        soln.weight = 4;
        let mut climber = Hillclimb::new();
        climber.solve(&inst, &mut soln, &NoCutoff, &mut |_| {});
        // item 1 stays out: it conflicts with the selected item 0
        assert!(!soln.x[1]);
        assert_eq!(soln.profit, 22);
    }

    #[test]
    fn a_local_optimum_reports_once_when_nothing_improves() {
        let inst = sample_instance();
        let mut soln = Solution::empty(4);
        soln.x[0] = true;
        soln.x[2] = true;
        soln.profit = 22;
        soln.weight = 10;
        let mut calls = 0;
        Hillclimb::new().solve(&inst, &mut soln, &NoCutoff, &mut |_| calls += 1);
        assert_eq!(calls, 1);
        assert_eq!(soln.profit, 22);
    }

    #[test]
    fn a_tripped_cutoff_stops_the_climb_immediately() {
        let inst = sample_instance();
        let mut soln = Solution::empty(4);
        let flag = StopFlag::new();
        flag.stop();
        let completion = Hillclimb::new().solve(&inst, &mut soln, &flag, &mut |_| {});
        assert!(!completion.is_exact);
        assert_eq!(soln.profit, 0);
    }
}

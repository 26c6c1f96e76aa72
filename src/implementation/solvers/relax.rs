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

//! This module implements the relax-and-repair heuristic: one bound
//! computation at the root, materialization of its integral picks, then the
//! greedy repair. Cheap, and it delivers both a feasible solution and the
//! root upper bound in a single shot.

use crate::{repair, Completion, Cutoff, Instance, Prefix, Relaxation, Solution, Solver};

/// The relax-and-repair heuristic, parameterized by the relaxation whose
/// relaxed assignment gets repaired.
pub struct RelaxAndRepair<'a> {
    relaxation: &'a mut dyn Relaxation,
}

impl<'a> RelaxAndRepair<'a> {
    pub fn new(relaxation: &'a mut dyn Relaxation) -> Self {
        RelaxAndRepair { relaxation }
    }
}

impl Solver for RelaxAndRepair<'_> {
    fn solve(
        &mut self,
        instance: &Instance,
        soln: &mut Solution,
        cutoff: &dyn Cutoff,
        on_improved: &mut dyn FnMut(&Solution),
    ) -> Completion {
        soln.x.iter_mut().for_each(|xi| *xi = false);
        soln.profit = 0;
        soln.weight = 0;

        let root = Prefix {
            decided: &soln.x,
            first_free: 0,
            profit: 0,
            weight: 0,
        };
        let relaxed = self.relaxation.compute(instance, &root);
        soln.ub = soln.ub.min(relaxed.ub);

        if cutoff.must_stop() {
            on_improved(soln);
            return Completion {
                is_exact: false,
                best_value: None,
            };
        }

        relaxed.materialize(instance, soln, 0);
        if cutoff.must_stop() {
            // the relaxed picks may violate conflicts, never report them
            soln.x.iter_mut().for_each(|xi| *xi = false);
            soln.profit = 0;
            soln.weight = 0;
            on_improved(soln);
            return Completion {
                is_exact: false,
                best_value: None,
            };
        }

        repair(instance, soln, 0);
        on_improved(soln);
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

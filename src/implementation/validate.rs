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

//! This module checks assignments and solutions against an instance: profit
//! and weight accounting, capacity, conflict feasibility, and the internal
//! consistency of a [`Solution`]. Used by the drivers to double-check what a
//! solver reports, and by the tests as a single source of truth.

use crate::{Instance, Solution};

/// An inconsistency detected in a reported solution.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Inconsistency {
    #[error("assignment has {actual} entries but the instance has {expected} items")]
    WrongLength { actual: usize, expected: usize },
    #[error("stored profit {stored} does not match recomputed profit {actual}")]
    ProfitMismatch { actual: usize, stored: usize },
    #[error("stored weight {stored} does not match recomputed weight {actual}")]
    WeightMismatch { actual: usize, stored: usize },
    #[error("profit {profit} exceeds the claimed upper bound {ub}")]
    ProfitAboveBound { profit: usize, ub: usize },
    #[error("weight {weight} exceeds the capacity {capacity}")]
    WeightAboveCapacity { weight: usize, capacity: usize },
    #[error("conflicting items {i} and {j} are both selected")]
    ConflictViolated { i: usize, j: usize },
}

/// What [`check`] recomputed from an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckResult {
    /// The profit of the selected items.
    pub profit: usize,
    /// The weight of the selected items.
    pub weight: usize,
    /// The number of jointly selected conflicting pairs.
    pub conflicts: usize,
    /// True iff the weight fits the capacity and no conflict is violated.
    pub feasible: bool,
}

/// Recomputes profit, weight and conflict count of an assignment from scratch.
pub fn check(instance: &Instance, x: &[bool]) -> CheckResult {
    let profit = x
        .iter()
        .enumerate()
        .filter(|(_, &sel)| sel)
        .map(|(i, _)| instance.profit(i))
        .sum::<usize>();
    let weight = x
        .iter()
        .enumerate()
        .filter(|(_, &sel)| sel)
        .map(|(i, _)| instance.weight(i))
        .sum::<usize>();
    let conflicts = instance
        .forward()
        .iter()
        .filter(|c| x[c.i] && x[c.j])
        .count();
    CheckResult {
        profit,
        weight,
        conflicts,
        feasible: weight <= instance.capacity() && conflicts == 0,
    }
}

/// True iff some conflicting pair is jointly selected in `x`.
pub fn has_conflicts(instance: &Instance, x: &[bool]) -> bool {
    instance.forward().iter().any(|c| x[c.i] && x[c.j])
}

/// Verifies the internal consistency of a reported solution: the stored
/// accounting must match its recomputation and the feasibility invariants
/// must hold. The first violated invariant is reported.
pub fn validate(instance: &Instance, soln: &Solution) -> Result<(), Inconsistency> {
    if soln.x.len() != instance.num_items() {
        return Err(Inconsistency::WrongLength {
            actual: soln.x.len(),
            expected: instance.num_items(),
        });
    }
    let actual = check(instance, &soln.x);
    if actual.profit != soln.profit {
        return Err(Inconsistency::ProfitMismatch {
            actual: actual.profit,
            stored: soln.profit,
        });
    }
    if actual.weight != soln.weight {
        return Err(Inconsistency::WeightMismatch {
            actual: actual.weight,
            stored: soln.weight,
        });
    }
    if soln.profit > soln.ub {
        return Err(Inconsistency::ProfitAboveBound {
            profit: soln.profit,
            ub: soln.ub,
        });
    }
    if soln.weight > instance.capacity() {
        return Err(Inconsistency::WeightAboveCapacity {
            weight: soln.weight,
            capacity: instance.capacity(),
        });
    }
    if let Some(c) = instance.forward().iter().find(|c| soln.x[c.i] && soln.x[c.j]) {
        return Err(Inconsistency::ConflictViolated { i: c.i, j: c.j });
    }
    Ok(())
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_validate {
    use crate::{check, has_conflicts, validate, Inconsistency, Instance, Solution};

    fn sample_instance() -> Instance {
        Instance::new(10, vec![(10, 5), (10, 4), (12, 6), (18, 9)], vec![(0, 1)]).unwrap()
    }

    #[test]
    fn check_recomputes_the_accounting_from_scratch() {
        let inst = sample_instance();
        let x = vec![true, false, true, false];
        let res = check(&inst, &x);
        assert_eq!(res.profit, 22);
        assert_eq!(res.weight, 10);
        assert_eq!(res.conflicts, 0);
        assert!(res.feasible);
    }

    #[test]
    fn check_counts_violated_conflicts() {
        let inst = sample_instance();
        let x = vec![true, true, false, false];
        let res = check(&inst, &x);
        assert_eq!(res.conflicts, 1);
        assert!(!res.feasible);
        assert!(has_conflicts(&inst, &x));
    }

    #[test]
    fn an_overweight_assignment_is_infeasible() {
        let inst = sample_instance();
        let x = vec![true, false, false, true];
        let res = check(&inst, &x);
        assert_eq!(res.weight, 13);
        assert!(!res.feasible);
    }

    #[test]
    fn a_consistent_solution_validates() {
        let inst = sample_instance();
        let soln = Solution {
            x: vec![true, false, true, false],
            profit: 22,
            weight: 10,
            ub: 22,
        };
        assert_eq!(validate(&inst, &soln), Ok(()));
    }

    #[test]
    fn stale_accounting_is_reported() {
        let inst = sample_instance();
        let soln = Solution {
            x: vec![true, false, true, false],
            profit: 20,
            weight: 10,
            ub: 22,
        };
        assert_eq!(
            validate(&inst, &soln),
            Err(Inconsistency::ProfitMismatch {
                actual: 22,
                stored: 20
            })
        );
    }

    #[test]
    fn a_profit_above_the_bound_is_reported() {
        let inst = sample_instance();
        let soln = Solution {
            x: vec![true, false, true, false],
            profit: 22,
            weight: 10,
            ub: 21,
        };
        assert_eq!(
            validate(&inst, &soln),
            Err(Inconsistency::ProfitAboveBound { profit: 22, ub: 21 })
        );
    }

    #[test]
    fn a_joint_conflict_selection_is_reported() {
        let inst = sample_instance();
        let soln = Solution {
            x: vec![true, true, false, false],
            profit: 20,
            weight: 9,
            ub: 22,
        };
        assert_eq!(
            validate(&inst, &soln),
            Err(Inconsistency::ConflictViolated { i: 0, j: 1 })
        );
    }

    #[test]
    fn a_wrong_length_assignment_is_reported_first() {
        let inst = sample_instance();
        let soln = Solution::empty(3);
        assert_eq!(
            validate(&inst, &soln),
            Err(Inconsistency::WrongLength {
                actual: 3,
                expected: 4
            })
        );
    }
}

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

//! This module implements the Lagrangian relaxation of the conflict
//! constraints. Each conflict touching the free suffix is dualized with a
//! non-negative multiplier, and the resulting conflict-free knapsack is
//! relaxed fractionally. A few projected subgradient iterations tune the
//! multipliers; by weak duality every iterate is an admissible bound, so the
//! smallest one seen is returned.

use crate::{Cursor, Instance, NoObserver, Observer, Picks, Prefix, Relaxation, Relaxed};

/// The knobs of the subgradient loop.
#[derive(Debug, Clone, Copy)]
pub struct LagrangianParams {
    /// The fixed step length applied along the normalized subgradient.
    pub alpha: f64,
    /// The number of subgradient iterations.
    pub k_max: usize,
}

impl Default for LagrangianParams {
    fn default() -> Self {
        LagrangianParams {
            alpha: 2.75,
            k_max: 5,
        }
    }
}

/// The Lagrangian conflict bound.
///
/// Strictly tighter than [`crate::FractionalBound`] whenever a conflict is
/// active in the fractional optimum, at the cost of re-sorting the free
/// suffix once per iteration. The multipliers are not warm-started across
/// calls: every subproblem starts over from zero, where the first iterate
/// degenerates to the plain fractional bound.
pub struct LagrangianBound<O: Observer = NoObserver> {
    params: LagrangianParams,
    observer: O,
}

impl LagrangianBound {
    pub fn new(params: LagrangianParams) -> Self {
        LagrangianBound {
            params,
            observer: NoObserver,
        }
    }
}

impl<O: Observer> LagrangianBound<O> {
    pub fn with_observer(params: LagrangianParams, observer: O) -> Self {
        LagrangianBound { params, observer }
    }
}

impl<O: Observer> Relaxation for LagrangianBound<O> {
    fn compute(&mut self, instance: &Instance, prefix: &Prefix) -> Relaxed {
        let n = instance.num_items();
        let first_free = prefix.first_free;
        let free = n - first_free;

        if free == 0 {
            return Relaxed {
                ub: prefix.profit,
                picks: Picks::Explicit(vec![]),
            };
        }

        // The dualized constraints: every conflict whose larger endpoint is
        // free. Pairs entirely inside the decided prefix are already settled.
        let backward = instance.backward();
        let dual = &backward[Cursor::at(backward, first_free).pos()..];
        let m = dual.len();

        let mut lambda = vec![0.0_f64; m];
        let mut adjusted = vec![0.0_f64; free];
        let mut x = vec![0.0_f64; free];
        let mut g = vec![0.0_f64; m];
        let mut order = (0..free).collect::<Vec<_>>();

        let mut best_bound = f64::INFINITY;
        let mut best_x = vec![0.0_f64; free];

        for k in 0..self.params.k_max {
            // Lagrangian profits: each dualized pair charges its multiplier
            // to both free endpoints and credits it to the constant term,
            // minus the share already consumed by a fixed-selected partner.
            let mut constant = 0.0;
            for (i, adj) in adjusted.iter_mut().enumerate() {
                *adj = instance.profit(first_free + i) as f64;
            }
            for (c, &l) in lambda.iter().enumerate() {
                let hi = dual[c].i;
                let lo = dual[c].j;
                constant += l;
                adjusted[hi - first_free] -= l;
                if lo >= first_free {
                    adjusted[lo - first_free] -= l;
                } else if prefix.decided[lo] {
                    constant -= l;
                }
            }

            // Fractional knapsack over the adjusted profits. The adjusted
            // ratios move with the multipliers, so the order is recomputed
            // every iteration.
            order.sort_by(|&a, &b| {
                let ra = frac_ratio(adjusted[a], instance.weight(first_free + a));
                let rb = frac_ratio(adjusted[b], instance.weight(first_free + b));
                rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
            });
            x.iter_mut().for_each(|xi| *xi = 0.0);
            let mut value = 0.0;
            let mut slack = (instance.capacity() - prefix.weight) as f64;
            for &i in &order {
                if adjusted[i] <= 0.0 {
                    break;
                }
                let w = instance.weight(first_free + i) as f64;
                if w <= slack {
                    x[i] = 1.0;
                    value += adjusted[i];
                    slack -= w;
                } else if slack > 0.0 {
                    x[i] = slack / w;
                    value += x[i] * adjusted[i];
                    slack = 0.0;
                    break;
                } else {
                    break;
                }
            }

            let bound = prefix.profit as f64 + constant + value;
            if bound < best_bound {
                best_bound = bound;
                best_x.copy_from_slice(&x);
            }

            // Projected subgradient step on g_c = 1 - x_i - x_j.
            let mut norm = 0.0;
            for (c, gc) in g.iter_mut().enumerate() {
                let hi = dual[c].i;
                let lo = dual[c].j;
                let x_lo = if lo >= first_free {
                    x[lo - first_free]
                } else if prefix.decided[lo] {
                    1.0
                } else {
                    0.0
                };
                *gc = 1.0 - x[hi - first_free] - x_lo;
                norm += *gc * *gc;
            }
            let norm = norm.sqrt();
            if norm > 0.0 {
                for (l, &gc) in lambda.iter_mut().zip(g.iter()) {
                    *l = (*l - self.params.alpha * gc / norm).max(0.0);
                }
            }
            let multiplier_norm = lambda.iter().map(|l| l * l).sum::<f64>().sqrt();
            self.observer.subgradient_step(k, bound, multiplier_norm, norm);
            if norm == 0.0 {
                // every dualized constraint is tight, the bound cannot move
                break;
            }
        }

        Relaxed {
            // the small slack keeps rounding error from ever flooring a
            // valid dual value below the true optimum
            ub: (best_bound + 1e-6) as usize,
            picks: Picks::Explicit(best_x.iter().map(|&xi| xi == 1.0).collect()),
        }
    }
}

/// The greedy criterion on adjusted profits. Mirrors the ordering used to
/// sort the item table, with negative profits pushed last.
fn frac_ratio(profit: f64, weight: usize) -> f64 {
    if weight == 0 {
        if profit > 0.0 {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        }
    } else {
        profit / weight as f64
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_lagrangian {
    use crate::{
        FractionalBound, Instance, LagrangianBound, LagrangianParams, Observer, Prefix, Relaxation,
    };

    fn sample_instance() -> Instance {
        Instance::new(10, vec![(10, 5), (10, 4), (12, 6), (18, 9)], vec![(0, 1)]).unwrap()
    }

    /// Brute force over all feasible subsets of a small instance.
    fn brute_optimum(inst: &Instance) -> usize {
        let n = inst.num_items();
        let mut best = 0;
        for mask in 0u32..(1 << n) {
            let x = (0..n).map(|i| mask & (1 << i) != 0).collect::<Vec<_>>();
            let weight = (0..n).filter(|&i| x[i]).map(|i| inst.weight(i)).sum::<usize>();
            if weight > inst.capacity() {
                continue;
            }
            if inst.forward().iter().any(|c| x[c.i] && x[c.j]) {
                continue;
            }
            let profit = (0..n).filter(|&i| x[i]).map(|i| inst.profit(i)).sum::<usize>();
            best = best.max(profit);
        }
        best
    }

    #[test]
    fn the_bound_is_admissible_at_the_root() {
        let inst = sample_instance();
        let decided = vec![false; 4];
        let prefix = Prefix {
            decided: &decided,
            first_free: 0,
            profit: 0,
            weight: 0,
        };
        let ub = LagrangianBound::new(LagrangianParams::default())
            .compute(&inst, &prefix)
            .ub;
        assert!(ub >= brute_optimum(&inst));
    }

    #[test]
    fn the_bound_never_exceeds_the_fractional_one() {
        let inst = sample_instance();
        let decided = vec![false; 4];
        let prefix = Prefix {
            decided: &decided,
            first_free: 0,
            profit: 0,
            weight: 0,
        };
        let fkp = FractionalBound.compute(&inst, &prefix).ub;
        let ldckp = LagrangianBound::new(LagrangianParams::default())
            .compute(&inst, &prefix)
            .ub;
        assert!(ldckp <= fkp);
    }

    #[test]
    fn the_bound_is_admissible_below_a_fixed_prefix() {
        let inst = sample_instance();
        // fix the best-ratio item in, its conflicting partner is at storage 1
        let decided = vec![true, false, false, false];
        let prefix = Prefix {
            decided: &decided,
            first_free: 1,
            profit: 10,
            weight: 4,
        };
        // optimum below this prefix: items 0 and 2 (profits 10 + 12)
        let ub = LagrangianBound::new(LagrangianParams::default())
            .compute(&inst, &prefix)
            .ub;
        assert!(ub >= 22);
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
        let ub = LagrangianBound::new(LagrangianParams::default())
            .compute(&inst, &prefix)
            .ub;
        assert_eq!(ub, 22);
    }

    #[test]
    fn a_conflict_free_instance_matches_the_fractional_bound() {
        let inst = Instance::new(9, vec![(6, 3), (10, 2), (4, 4), (7, 7)], vec![]).unwrap();
        let decided = vec![false; 4];
        let prefix = Prefix {
            decided: &decided,
            first_free: 0,
            profit: 0,
            weight: 0,
        };
        let fkp = FractionalBound.compute(&inst, &prefix).ub;
        let ldckp = LagrangianBound::new(LagrangianParams::default())
            .compute(&inst, &prefix)
            .ub;
        assert_eq!(fkp, ldckp);
    }

    #[test]
    fn the_observer_sees_every_iteration() {
        struct Count(usize);
        impl Observer for Count {
            fn subgradient_step(&mut self, k: usize, _: f64, _: f64, _: f64) {
                assert_eq!(k, self.0);
                self.0 += 1;
            }
        }

        let inst = sample_instance();
        let decided = vec![false; 4];
        let prefix = Prefix {
            decided: &decided,
            first_free: 0,
            profit: 0,
            weight: 0,
        };
        let mut bound = LagrangianBound::with_observer(LagrangianParams::default(), Count(0));
        bound.compute(&inst, &prefix);
        assert!(bound.observer.0 >= 1);
    }
}

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

//! This module provides the immutable item store shared by every solver: the
//! ratio-sorted item table, the capacity, and the conflict graph in its two
//! sorted views.

/// One directed entry of a conflict view: item `i` conflicts with partner `j`.
/// In the forward view `i < j`; in the backward view `i > j`. Both views are
/// sorted by `(i, j)` and always represent exactly the same set of unordered
/// pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Conflict {
    /// The item this entry is keyed on.
    pub i: usize,
    /// The conflicting partner.
    pub j: usize,
}

/// The errors that can pop up while assembling an instance from raw items and
/// conflicts.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InstanceError {
    #[error("conflict ({i}, {j}) references an item out of range (n = {n})")]
    ConflictOutOfRange { i: usize, j: usize, n: usize },
    #[error("item {item} conflicts with itself")]
    SelfConflict { item: usize },
    #[error("duplicate conflict pair ({i}, {j})")]
    DuplicateConflict { i: usize, j: usize },
}

/// An immutable DCKP instance.
///
/// At construction the items are re-ordered by decreasing profit/weight ratio
/// (stable: ties keep their input order) and the conflicts are remapped to
/// the sorted positions. Every index handled by the solvers is a *storage*
/// index into that sorted table; `original_id` and `storage_index` translate
/// between the two worlds when reading input or reporting results.
#[derive(Debug, Clone)]
pub struct Instance {
    capacity: usize,
    profits: Vec<usize>,
    weights: Vec<usize>,
    /// storage index -> original input id
    s2o: Vec<usize>,
    /// original input id -> storage index
    o2s: Vec<usize>,
    /// conflicts keyed by their smaller endpoint, sorted
    forward: Vec<Conflict>,
    /// the same conflicts keyed by their larger endpoint, sorted
    backward: Vec<Conflict>,
}

impl Instance {
    /// Builds an instance from items `(profit, weight)` given in input order
    /// and conflicts expressed over input ids. Self-conflicts, out-of-range
    /// endpoints and duplicate unordered pairs are rejected.
    pub fn new(
        capacity: usize,
        items: Vec<(usize, usize)>,
        conflicts: Vec<(usize, usize)>,
    ) -> Result<Self, InstanceError> {
        let n = items.len();

        let mut s2o = (0..n).collect::<Vec<_>>();
        // Stable sort: equal ratios keep their input order.
        s2o.sort_by(|&a, &b| {
            let ra = ratio(items[a].0, items[a].1);
            let rb = ratio(items[b].0, items[b].1);
            rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut o2s = vec![0; n];
        for (storage, &original) in s2o.iter().enumerate() {
            o2s[original] = storage;
        }

        let mut profits = vec![0; n];
        let mut weights = vec![0; n];
        for (storage, &original) in s2o.iter().enumerate() {
            profits[storage] = items[original].0;
            weights[storage] = items[original].1;
        }

        // Remap the conflicts to storage indices and normalize them (i < j).
        let mut forward = Vec::with_capacity(conflicts.len());
        for (a, b) in conflicts {
            if a >= n || b >= n {
                return Err(InstanceError::ConflictOutOfRange { i: a, j: b, n });
            }
            if a == b {
                return Err(InstanceError::SelfConflict { item: a });
            }
            let sa = o2s[a];
            let sb = o2s[b];
            forward.push(Conflict {
                i: sa.min(sb),
                j: sa.max(sb),
            });
        }
        forward.sort_unstable();
        if let Some(w) = forward.windows(2).find(|w| w[0] == w[1]) {
            return Err(InstanceError::DuplicateConflict { i: w[0].i, j: w[0].j });
        }

        let mut backward = forward
            .iter()
            .map(|c| Conflict { i: c.j, j: c.i })
            .collect::<Vec<_>>();
        backward.sort_unstable();

        Ok(Instance {
            capacity,
            profits,
            weights,
            s2o,
            o2s,
            forward,
            backward,
        })
    }

    /// The number of items of this instance.
    pub fn num_items(&self) -> usize {
        self.profits.len()
    }
    /// The knapsack capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
    /// The number of conflicting pairs.
    pub fn num_conflicts(&self) -> usize {
        self.forward.len()
    }
    /// The profit of the item at the given storage index.
    pub fn profit(&self, i: usize) -> usize {
        self.profits[i]
    }
    /// The weight of the item at the given storage index.
    pub fn weight(&self, i: usize) -> usize {
        self.weights[i]
    }
    /// The conflict view keyed by the smaller endpoint, sorted by `(i, j)`.
    pub fn forward(&self) -> &[Conflict] {
        &self.forward
    }
    /// The conflict view keyed by the larger endpoint, sorted by `(i, j)`.
    pub fn backward(&self) -> &[Conflict] {
        &self.backward
    }
    /// Maps a storage index back to the id the item had in the input.
    pub fn original_id(&self, storage: usize) -> usize {
        self.s2o[storage]
    }
    /// Maps an input id to the storage index of the sorted table.
    pub fn storage_index(&self, original: usize) -> usize {
        self.o2s[original]
    }
}

/// The greedy ordering criterion. Weightless items sort first (taking them is
/// free), and a worthless weightless item sorts as zero.
fn ratio(profit: usize, weight: usize) -> f64 {
    if weight == 0 {
        if profit > 0 {
            f64::INFINITY
        } else {
            0.0
        }
    } else {
        profit as f64 / weight as f64
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_instance {
    use crate::{Instance, InstanceError};

    // p = [10, 10, 12, 18], w = [5, 4, 6, 9] -- ratios [2.0, 2.5, 2.0, 2.0]
    fn sample_items() -> Vec<(usize, usize)> {
        vec![(10, 5), (10, 4), (12, 6), (18, 9)]
    }

    #[test]
    fn items_are_sorted_by_decreasing_ratio_with_stable_ties() {
        let inst = Instance::new(10, sample_items(), vec![(0, 1)]).unwrap();
        // item 1 has the best ratio; the 2.0 ties keep input order 0, 2, 3
        assert_eq!(inst.original_id(0), 1);
        assert_eq!(inst.original_id(1), 0);
        assert_eq!(inst.original_id(2), 2);
        assert_eq!(inst.original_id(3), 3);
        assert_eq!(inst.profit(0), 10);
        assert_eq!(inst.weight(0), 4);
        assert_eq!(inst.profit(3), 18);
    }

    #[test]
    fn index_maps_are_inverse_of_each_other() {
        let inst = Instance::new(10, sample_items(), vec![]).unwrap();
        for original in 0..4 {
            assert_eq!(inst.original_id(inst.storage_index(original)), original);
        }
        for storage in 0..4 {
            assert_eq!(inst.storage_index(inst.original_id(storage)), storage);
        }
    }

    #[test]
    fn conflicts_are_remapped_and_normalized() {
        let inst = Instance::new(10, sample_items(), vec![(0, 1)]).unwrap();
        // input items 0 and 1 land at storage positions 1 and 0
        assert_eq!(inst.forward().len(), 1);
        assert_eq!(inst.forward()[0].i, 0);
        assert_eq!(inst.forward()[0].j, 1);
        assert_eq!(inst.backward()[0].i, 1);
        assert_eq!(inst.backward()[0].j, 0);
    }

    #[test]
    fn both_views_hold_the_same_pairs() {
        let items = vec![(6, 3), (10, 2), (4, 4), (7, 7), (1, 1)];
        let conflicts = vec![(0, 3), (1, 2), (2, 4), (0, 4)];
        let inst = Instance::new(9, items, conflicts).unwrap();

        let mut fwd = inst
            .forward()
            .iter()
            .map(|c| (c.i.min(c.j), c.i.max(c.j)))
            .collect::<Vec<_>>();
        let mut bwd = inst
            .backward()
            .iter()
            .map(|c| (c.i.min(c.j), c.i.max(c.j)))
            .collect::<Vec<_>>();
        fwd.sort_unstable();
        bwd.sort_unstable();
        assert_eq!(fwd, bwd);

        // and both are sorted by their own key
        assert!(inst.forward().windows(2).all(|w| w[0] <= w[1]));
        assert!(inst.backward().windows(2).all(|w| w[0] <= w[1]));
        assert!(inst.forward().iter().all(|c| c.i < c.j));
        assert!(inst.backward().iter().all(|c| c.i > c.j));
    }

    #[test]
    fn self_conflicts_are_rejected() {
        let err = Instance::new(10, sample_items(), vec![(2, 2)]).unwrap_err();
        assert_eq!(err, InstanceError::SelfConflict { item: 2 });
    }

    #[test]
    fn out_of_range_conflicts_are_rejected() {
        let err = Instance::new(10, sample_items(), vec![(0, 7)]).unwrap_err();
        assert_eq!(err, InstanceError::ConflictOutOfRange { i: 0, j: 7, n: 4 });
    }

    #[test]
    fn duplicate_pairs_are_rejected_regardless_of_orientation() {
        let err = Instance::new(10, sample_items(), vec![(0, 1), (1, 0)]).unwrap_err();
        assert!(matches!(err, InstanceError::DuplicateConflict { .. }));
    }

    #[test]
    fn weightless_items_sort_first() {
        let inst = Instance::new(10, vec![(1, 1), (5, 0)], vec![]).unwrap();
        assert_eq!(inst.original_id(0), 1);
    }
}

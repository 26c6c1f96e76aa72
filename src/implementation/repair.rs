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

//! This module implements the greedy repair applied to a materialized relaxed
//! assignment: first drop selected items of the free range that conflict with
//! a selected lower-index partner, then greedily re-add free items that still
//! fit without creating a conflict. The prefix `0..first_free` is never
//! touched; its feasibility is the caller's responsibility.

use crate::{Cursor, Instance, RevCursor, Solution};

/// Drops, scanning the free range from high index to low, every selected item
/// that conflicts with a selected partner of smaller index. Keeping the lower
/// index keeps the better ratio.
pub fn remove_conflicts(instance: &Instance, soln: &mut Solution, first_free: usize) {
    let backward = instance.backward();
    let fence = backward.partition_point(|c| c.i < first_free);
    let mut cursor = RevCursor::new(backward, fence);

    for i in (first_free..instance.num_items()).rev() {
        if !soln.x[i] {
            continue;
        }
        cursor.advance(i);
        if cursor.exhausted() {
            break;
        }
        if cursor.conflicts_with(&soln.x, i) {
            soln.x[i] = false;
            soln.profit -= instance.profit(i);
            soln.weight -= instance.weight(i);
        }
    }
}

/// Greedily adds, in ratio order, every unselected free item that fits in the
/// residual capacity and conflicts with nothing selected.
pub fn greedy_improve(instance: &Instance, soln: &mut Solution, first_free: usize) {
    let mut fwd = Cursor::at(instance.forward(), first_free);
    let mut bwd = Cursor::begin(instance.backward());

    for i in first_free..instance.num_items() {
        fwd.advance(i);
        bwd.advance(i);
        if soln.x[i] || soln.weight + instance.weight(i) > instance.capacity() {
            continue;
        }
        // both views must be checked: the partner may sit on either side
        let mut f = fwd;
        let mut b = bwd;
        if f.conflicts_with(&soln.x, i) || b.conflicts_with(&soln.x, i) {
            continue;
        }
        soln.x[i] = true;
        soln.profit += instance.profit(i);
        soln.weight += instance.weight(i);
    }
}

/// The full repair: conflict removal followed by greedy improvement. The
/// result is feasible over the free range and the pass is idempotent.
pub fn repair(instance: &Instance, soln: &mut Solution, first_free: usize) {
    remove_conflicts(instance, soln, first_free);
    greedy_improve(instance, soln, first_free);
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

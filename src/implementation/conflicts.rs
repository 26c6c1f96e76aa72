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

//! This module provides the cursors used to walk the sorted conflict views
//! during a search pass. A cursor is nothing but an index into the underlying
//! slice: advancing is pure arithmetic, cursors are freely copied, and no
//! borrowed iterator state is ever threaded through callbacks.
//!
//! The searches visit items in increasing (or, for the reverse cursor,
//! decreasing) index order, so repeated positioning amortizes to one linear
//! sweep of the view per pass.

use crate::Conflict;

/// A forward cursor over one of the sorted conflict views.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    list: &'a [Conflict],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// A cursor positioned at the start of the view.
    pub fn begin(list: &'a [Conflict]) -> Self {
        Cursor { list, pos: 0 }
    }

    /// A cursor positioned (by binary search) at the first entry whose key is
    /// at least `item`.
    pub fn at(list: &'a [Conflict], item: usize) -> Self {
        let pos = list.partition_point(|c| c.i < item);
        Cursor { list, pos }
    }

    /// The current position within the view.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Advances to the first remaining entry whose key is at least `item`.
    ///
    /// Successive calls on one cursor must use non-decreasing `item` values;
    /// this precondition is not defended against and a violation yields stale
    /// results.
    pub fn advance(&mut self, item: usize) {
        while self.pos < self.list.len() && self.list[self.pos].i < item {
            self.pos += 1;
        }
    }

    /// Scans the block of entries keyed on `item`, returning true the moment
    /// a partner selected in `x` is found. On a negative answer the cursor is
    /// left just past the block; on a positive answer it stays on the
    /// offending entry (the next `advance` skips the remainder).
    ///
    /// The cursor must already be positioned at (or before the end of) the
    /// block of `item`, which is what `advance(item)` guarantees.
    pub fn conflicts_with(&mut self, x: &[bool], item: usize) -> bool {
        while self.pos < self.list.len() && self.list[self.pos].i == item {
            if x[self.list[self.pos].j] {
                return true;
            }
            self.pos += 1;
        }
        false
    }

    /// The block of entries keyed on `item`, without advancing the cursor.
    /// The cursor must already be positioned at the block (`advance(item)`).
    pub fn block(&self, item: usize) -> &'a [Conflict] {
        let start = self.pos;
        let mut end = start;
        while end < self.list.len() && self.list[end].i == item {
            end += 1;
        }
        &self.list[start..end]
    }
}

/// A cursor walking a conflict view from its high end downward, stopping at
/// an explicit fence. Used by the conflict-removal repair pass, which visits
/// items in decreasing index order.
#[derive(Debug, Clone, Copy)]
pub struct RevCursor<'a> {
    list: &'a [Conflict],
    /// Exclusive upper position: the cursor currently looks at `pos - 1`.
    pos: usize,
    /// Entries below this position are never visited.
    fence: usize,
}

impl<'a> RevCursor<'a> {
    /// A reverse cursor over `list[fence..]`, positioned at the high end.
    pub fn new(list: &'a [Conflict], fence: usize) -> Self {
        RevCursor {
            list,
            pos: list.len(),
            fence,
        }
    }

    /// Moves down to the last remaining entry whose key is at most `item`.
    /// Successive calls must use non-increasing `item` values.
    pub fn advance(&mut self, item: usize) {
        while self.pos > self.fence && self.list[self.pos - 1].i > item {
            self.pos -= 1;
        }
    }

    /// True when every entry above the fence has been consumed.
    pub fn exhausted(&self) -> bool {
        self.pos == self.fence
    }

    /// Scans (downward) the block of entries keyed on `item`, returning true
    /// the moment a partner selected in `x` is found. Mirrors
    /// [`Cursor::conflicts_with`].
    pub fn conflicts_with(&mut self, x: &[bool], item: usize) -> bool {
        while self.pos > self.fence && self.list[self.pos - 1].i == item {
            if x[self.list[self.pos - 1].j] {
                return true;
            }
            self.pos -= 1;
        }
        false
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_cursor {
    use crate::{Conflict, Cursor, RevCursor};

    fn cft(i: usize, j: usize) -> Conflict {
        Conflict { i, j }
    }

    // a forward view: keys 0, 0, 2, 2, 4
    fn forward() -> Vec<Conflict> {
        vec![cft(0, 1), cft(0, 3), cft(2, 3), cft(2, 4), cft(4, 5)]
    }

    #[test]
    fn at_positions_on_the_first_entry_of_the_block() {
        let list = forward();
        assert_eq!(Cursor::at(&list, 0).pos(), 0);
        assert_eq!(Cursor::at(&list, 1).pos(), 2);
        assert_eq!(Cursor::at(&list, 2).pos(), 2);
        assert_eq!(Cursor::at(&list, 3).pos(), 4);
        assert_eq!(Cursor::at(&list, 5).pos(), 5);
    }

    #[test]
    fn advance_is_equivalent_to_at_for_monotone_queries() {
        let list = forward();
        let mut cur = Cursor::begin(&list);
        for item in 0..6 {
            cur.advance(item);
            assert_eq!(cur.pos(), Cursor::at(&list, item).pos());
        }
    }

    #[test]
    fn conflicts_with_detects_a_selected_partner() {
        let list = forward();
        let mut x = vec![false; 6];
        x[3] = true;

        let mut cur = Cursor::at(&list, 2);
        assert!(cur.conflicts_with(&x, 2));
        // positive answer: the cursor stays on the offending entry
        assert_eq!(cur.pos(), 2);
    }

    #[test]
    fn conflicts_with_leaves_the_cursor_past_the_block_on_a_negative_answer() {
        let list = forward();
        let x = vec![false; 6];

        let mut cur = Cursor::at(&list, 2);
        assert!(!cur.conflicts_with(&x, 2));
        assert_eq!(cur.pos(), 4);
    }

    #[test]
    fn conflicts_with_an_item_having_no_block_is_a_noop() {
        let list = forward();
        let x = vec![true; 6];
        let mut cur = Cursor::at(&list, 1);
        assert!(!cur.conflicts_with(&x, 1));
        assert_eq!(cur.pos(), 2);
    }

    #[test]
    fn block_returns_the_entries_of_one_item() {
        let list = forward();
        let mut cur = Cursor::begin(&list);
        cur.advance(2);
        assert_eq!(cur.block(2), &[cft(2, 3), cft(2, 4)]);
        // and does not move the cursor
        assert_eq!(cur.pos(), 2);
        cur.advance(4);
        assert_eq!(cur.block(4), &[cft(4, 5)]);
    }

    // a backward view: keys 1, 3, 3, 4, 5
    fn backward() -> Vec<Conflict> {
        vec![cft(1, 0), cft(3, 0), cft(3, 2), cft(4, 2), cft(5, 4)]
    }

    #[test]
    fn rev_cursor_walks_keys_downward() {
        let list = backward();
        let mut x = vec![false; 6];
        x[2] = true;

        let mut cur = RevCursor::new(&list, 0);
        cur.advance(5);
        assert!(!cur.conflicts_with(&x, 5)); // partner 4 not selected
        cur.advance(4);
        assert!(cur.conflicts_with(&x, 4)); // partner 2 is selected
        cur.advance(3);
        assert!(cur.conflicts_with(&x, 3)); // (3, 2) matches too
    }

    #[test]
    fn rev_cursor_respects_its_fence() {
        let list = backward();
        // fence past the (1, 0) entry: only keys >= 3 are visible
        let mut cur = RevCursor::new(&list, 1);
        cur.advance(2);
        assert!(cur.exhausted());

        let x = vec![true; 6];
        assert!(!cur.conflicts_with(&x, 1));
    }
}

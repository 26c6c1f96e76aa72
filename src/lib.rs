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

//! This crate solves the disjunctively constrained knapsack problem (DCKP):
//! the 0/1 knapsack in which some pairs of items exclude one another. It
//! ships two exact searches (best-first branch-and-bound and incremental
//! enumeration), two relaxations to bound them (fractional knapsack and
//! Lagrangian), and three heuristics (greedy, hill-climbing and
//! relax-and-repair), all behind one `Solver` trait.
//!
//! The typical workflow reads an instance, seeds a solution with the greedy
//! heuristic and hands the same solution to an exact search:
//!
//! ```
//! use dckp::*;
//!
//! # fn main() -> Result<(), InstanceError> {
//! let instance = Instance::new(
//!     10,
//!     vec![(10, 5), (10, 4), (12, 6), (18, 9)],
//!     vec![(0, 1)],
//! )?;
//!
//! let mut soln = Solution::empty(instance.num_items());
//! Greedy.solve(&instance, &mut soln, &NoCutoff, &mut |_| {});
//!
//! let mut bound = FractionalBound;
//! let completion = BranchAndBound::new(&mut bound)
//!     .solve(&instance, &mut soln, &NoCutoff, &mut |_| {});
//!
//! assert!(completion.is_exact);
//! assert_eq!(soln.profit, 22);
//! assert_eq!(soln.profit, soln.ub);
//! # Ok(())
//! # }
//! ```

pub mod abstraction;
pub mod common;
pub mod implementation;

pub use abstraction::*;
pub use common::*;
pub use implementation::*;

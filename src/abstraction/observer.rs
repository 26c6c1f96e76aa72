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

//! This module defines the `Observer` trait: the injected telemetry seam of
//! the crate. There is no process-wide instrumentation; components that emit
//! progress information are handed an observer instead (no-op by default).

/// An observer receives progress notifications from the solvers and bounds.
/// Every method has a no-op default implementation so an observer only
/// overrides what it cares about. Observers are reporting hooks and must not
/// be used for control flow.
pub trait Observer {
    /// One projected subgradient iteration of the Lagrangian bound completed.
    /// `bound` is the Lagrangian value of this iteration, `multiplier_norm`
    /// the euclidean norm of the multiplier vector after the step, and
    /// `step_norm` the norm of the raw subgradient.
    fn subgradient_step(&mut self, _k: usize, _bound: f64, _multiplier_norm: f64, _step_norm: f64) {
    }

    /// The incremental enumeration starts processing level `depth` with
    /// `width` nodes queued for it.
    fn level(&mut self, _depth: usize, _width: usize) {}
}

/// The default observer: ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoObserver;
impl Observer for NoObserver {}

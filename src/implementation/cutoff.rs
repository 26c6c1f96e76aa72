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

//! This module provides the concrete cutoff policies: never stop, stop after
//! a fixed time budget, and stop when an external flag is raised.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::Cutoff;

/// A cutoff that never stops the solver: it runs to natural completion.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCutoff;
impl Cutoff for NoCutoff {
    fn must_stop(&self) -> bool {
        false
    }
}

/// A cutoff that trips once a given duration has elapsed since its creation.
///
/// The flag is raised by a detached thread sleeping for the budget, so that
/// `must_stop` stays one relaxed atomic load rather than a clock read.
#[derive(Debug, Clone)]
pub struct TimeBudget {
    stop: Arc<AtomicBool>,
}

impl TimeBudget {
    pub fn new(budget: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&stop);
        std::thread::spawn(move || {
            std::thread::sleep(budget);
            flag.store(true, Ordering::Relaxed);
        });

        TimeBudget { stop }
    }
}

impl Cutoff for TimeBudget {
    fn must_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }
}

/// A cutoff driven by the caller: cloned handles share one flag, so raising
/// it from any thread stops a solver polling any of the clones.
#[derive(Debug, Default, Clone)]
pub struct StopFlag {
    stop: Arc<AtomicBool>,
}

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }
    /// Raises the flag. Irrevocable.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

impl Cutoff for StopFlag {
    fn must_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

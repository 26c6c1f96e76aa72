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

//! This binary runs one of the DCKP solvers on an instance file (or on every
//! instance of a list file) and reports one CSV line per instance:
//!
//! ```plain
//! instance,status,solver_time,lb_time,lb,ub
//! ```
//!
//! `lb_time` is the time at which the reported lower bound was last improved,
//! `solver_time` the total time of the run, and `status` one of `optimal`
//! (the gap is closed), `feasible` (a solution was found, no proof) or `fail`
//! (no solution with positive profit).

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};

use dckp::*;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SolverKind {
    /// The greedy constructive heuristic.
    Greedy,
    /// Greedy followed by steepest-ascent hill climbing.
    Hillclimb,
    /// Relax-and-repair of the root relaxation.
    Relax,
    /// Best-first branch-and-bound (exact).
    Bnb,
    /// Level-synchronous incremental enumeration (exact).
    Ienum,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BoundKind {
    /// The fractional knapsack bound.
    Fkp,
    /// The Lagrangian conflict bound.
    Ldckp,
}

/// Solve disjunctively constrained knapsack instances.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// The instance file to solve, or a list file naming one instance per
    /// line (paths relative to the list) when --list is given.
    input: PathBuf,
    /// The solver to run.
    #[arg(short, long, value_enum, default_value = "bnb")]
    solver: SolverKind,
    /// The relaxation bounding the pruning-aware solvers.
    #[arg(short, long, value_enum, default_value = "fkp")]
    bound: BoundKind,
    /// Treat the input as a list of instance files.
    #[arg(short, long)]
    list: bool,
    /// Write the CSV report to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// The time budget, in seconds, granted to each instance.
    #[arg(short, long, default_value_t = 30)]
    timeout: u64,
}

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Parse(#[from] ParseError),
}

/// One line of the CSV report.
struct Outcome {
    status: &'static str,
    solver_time: f64,
    lb_time: f64,
    lb: usize,
    ub: usize,
}

fn solve_instance(args: &Args, path: &Path) -> Result<Outcome, Error> {
    let instance = read_instance(path)?;
    let mut soln = Solution::empty(instance.num_items());
    let cutoff = TimeBudget::new(Duration::from_secs(args.timeout));

    let mut bound: Box<dyn Relaxation> = match args.bound {
        BoundKind::Fkp => Box::new(FractionalBound),
        BoundKind::Ldckp => Box::new(LagrangianBound::new(LagrangianParams::default())),
    };

    let start = Instant::now();
    let mut lb_time = 0.0;
    let mut on_improved = |s: &Solution| {
        if s.profit > 0 {
            lb_time = start.elapsed().as_secs_f64();
        }
    };

    match args.solver {
        SolverKind::Greedy => {
            Greedy.solve(&instance, &mut soln, &cutoff, &mut on_improved);
        }
        SolverKind::Hillclimb => {
            Greedy.solve(&instance, &mut soln, &cutoff, &mut on_improved);
            Hillclimb::new().solve(&instance, &mut soln, &cutoff, &mut on_improved);
        }
        SolverKind::Relax => {
            RelaxAndRepair::new(bound.as_mut()).solve(
                &instance,
                &mut soln,
                &cutoff,
                &mut on_improved,
            );
        }
        SolverKind::Bnb => {
            BranchAndBound::new(bound.as_mut()).solve(
                &instance,
                &mut soln,
                &cutoff,
                &mut on_improved,
            );
        }
        SolverKind::Ienum => {
            Greedy.solve(&instance, &mut soln, &cutoff, &mut on_improved);
            IncrementalEnumeration::new(bound.as_mut()).solve(
                &instance,
                &mut soln,
                &cutoff,
                &mut on_improved,
            );
        }
    }
    let solver_time = start.elapsed().as_secs_f64();

    let status = if soln.profit == 0 {
        "fail"
    } else if soln.profit == soln.ub {
        "optimal"
    } else {
        "feasible"
    };
    Ok(Outcome {
        status,
        solver_time,
        lb_time,
        lb: soln.profit,
        ub: soln.ub,
    })
}

fn instance_paths(args: &Args) -> Result<Vec<PathBuf>, Error> {
    if !args.list {
        return Ok(vec![args.input.clone()]);
    }
    let base = args.input.parent().map(Path::to_path_buf).unwrap_or_default();
    let text = fs::read_to_string(&args.input)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| base.join(line))
        .collect())
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(fs::File::create(path)?),
        None => Box::new(std::io::stdout()),
    };

    writeln!(out, "instance,status,solver_time,lb_time,lb,ub")?;
    for path in instance_paths(&args)? {
        match solve_instance(&args, &path) {
            Ok(outcome) => {
                let ub = if outcome.ub == usize::MAX {
                    "inf".to_string()
                } else {
                    outcome.ub.to_string()
                };
                writeln!(
                    out,
                    "{},{},{:.3},{:.3},{},{}",
                    path.display(),
                    outcome.status,
                    outcome.solver_time,
                    outcome.lb_time,
                    outcome.lb,
                    ub
                )?;
            }
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                writeln!(out, "{},fail,0.000,0.000,0,inf", path.display())?;
            }
        }
    }
    Ok(())
}

//! Target-to-trace assignment solver.
//!
//! [`Solver::solve`] builds a [`Problem`], runs the branch-and-bound search
//! on the calling thread and hands the result to a [`Reporter`] exactly once
//! with `is_final = true`. Interim reports carry the incumbent every
//! `progress_interval` steps. Cancellation is cooperative through a
//! [`CancelToken`] that may be triggered from any thread.

mod cancel;
mod distance;
mod hypothesis;
mod metrics;
mod outcome;
mod problem;
mod report;
mod search;

use std::path::PathBuf;

pub use cancel::CancelToken;
pub use distance::TotalDistance;
pub use hypothesis::{Checkpoint, Hypothesis};
pub use metrics::AssignmentMetrics;
pub use outcome::{Outcome, Solution, Termination};
pub use problem::Problem;
pub use report::{ChannelReporter, NullReporter, Report, Reporter};

use crate::{Point, options::SolverOptions, solution_log::SolutionLog};
use search::{Search, SearchLimits};

pub const DEFAULT_PROGRESS_INTERVAL: u64 = 100_000;
/// Above this many targets or traces the exhaustive search gets slow.
pub const PRACTICAL_PROBLEM_SIZE: usize = 12;

#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfig {
    /// Steps between interim reports; 0 disables them.
    pub progress_interval: u64,
    pub step_limit: Option<u64>,
    pub solution_log: Option<PathBuf>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            step_limit: None,
            solution_log: None,
        }
    }
}

impl From<&SolverOptions> for SolverConfig {
    fn from(options: &SolverOptions) -> Self {
        Self {
            progress_interval: options.progress_interval,
            step_limit: (options.step_limit > 0).then_some(options.step_limit),
            solution_log: options.solution_log_path().map(PathBuf::from),
        }
    }
}

/// Driver for one or more solves sharing a cancellation token.
///
/// The token is never reset by [`Solver::solve`]: once cancelled, every
/// later solve on this solver stops at its first step. Use a fresh solver
/// (or [`Solver::with_cancel_token`]) per run.
#[derive(Clone, Debug, Default)]
pub struct Solver {
    config: SolverConfig,
    cancel: CancelToken,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_cancel_token(config: SolverConfig, cancel: CancelToken) -> Self {
        Self { config, cancel }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn request_cancellation(&self) {
        log::info!("solver: cancellation requested");
        self.cancel.cancel();
    }

    pub fn solve<R>(&self, targets: &[Point], traces: &[Point], reporter: &mut R) -> Solution
    where
        R: Reporter + ?Sized,
    {
        let problem = Problem::build(targets, traces);
        log::info!(
            "solver: start targets={} traces={} progress_interval={} step_limit={}",
            problem.num_targets(),
            problem.num_traces(),
            self.config.progress_interval,
            self.config
                .step_limit
                .map_or_else(|| "none".to_string(), |l| l.to_string())
        );
        if problem.num_targets().max(problem.num_traces()) > PRACTICAL_PROBLEM_SIZE {
            log::warn!(
                "solver: exhaustive search on targets={} traces={} may take very long",
                problem.num_targets(),
                problem.num_traces()
            );
        }
        if problem.num_traces() < problem.num_targets() {
            log::warn!(
                "solver: fewer traces than targets; the result will leave the highest-numbered targets unmatched and is not guaranteed optimal"
            );
        }

        let mut solution_log = self.config.solution_log.as_deref().map(SolutionLog::new);
        let limits = SearchLimits {
            progress_interval: self.config.progress_interval,
            step_limit: self.config.step_limit,
        };
        let result = Search::new(
            &problem,
            &self.cancel,
            reporter,
            solution_log.as_mut(),
            limits,
        )
        .run();
        if let Some(sink) = solution_log.as_mut() {
            sink.finish();
        }

        // A complete assignment that links nothing is not a solution.
        let matched_nothing =
            problem.num_targets() > 0 && result.best.matched_pairs().next().is_none();
        let outcome = if !result.found || matched_nothing {
            Outcome::NoSolution
        } else if result.best.has_unmatched_target() {
            Outcome::Suboptimal
        } else {
            Outcome::Optimal
        };
        let description = Solution::annotate(
            Search::<R>::describe_best(&result.best, result.found, result.steps),
            result.termination,
        );
        let solution = Solution {
            matches: result.best.matches().to_vec(),
            total_distance: result.best.total_distance(),
            steps: result.steps,
            found_at_step: result.found.then(|| result.best.step_count()),
            outcome,
            termination: result.termination,
            description,
        };

        log::info!(
            "solver: done outcome={} termination={} distance={} steps={}",
            solution.outcome,
            solution.termination,
            solution.total_distance,
            solution.steps
        );
        AssignmentMetrics::measure(&problem, &solution.matches);

        reporter.report(&Report {
            matches: solution.matches.clone(),
            description: solution.description.clone(),
            total_distance: solution.total_distance,
            steps: solution.steps,
            is_final: true,
        });

        solution
    }
}

/// Solves with default settings and a private cancellation token.
pub fn solve<R>(targets: &[Point], traces: &[Point], reporter: &mut R) -> Solution
where
    R: Reporter + ?Sized,
{
    Solver::default().solve(targets, traces, reporter)
}

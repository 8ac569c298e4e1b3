//! Best-first exhaustive branch-and-bound over target-by-target assignments.
//!
//! Targets are assigned in index order. At each level the closest unused
//! trace is tried first, then every other unused trace in ascending order.
//! A branch is abandoned as soon as its running distance exceeds the
//! incumbent's; ties are explored, but only a strictly shorter complete
//! assignment replaces the incumbent.
//!
//! An equal-distance assignment found later is therefore dropped: it is not
//! copied over the incumbent, and it adds no solution-log line. The reported
//! solution is always the first one reaching the optimal distance.

use crate::solution_log::SolutionLog;

use super::{
    cancel::CancelToken,
    distance::TotalDistance,
    hypothesis::Hypothesis,
    outcome::Termination,
    problem::Problem,
    report::{Report, Reporter},
};

/// Limits applied to one search.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SearchLimits {
    pub progress_interval: u64,
    pub step_limit: Option<u64>,
}

/// Everything one run of the search owns or borrows.
pub(crate) struct Search<'a, R: Reporter + ?Sized> {
    problem: &'a Problem,
    current: Hypothesis,
    best: Hypothesis,
    found: bool,
    cancel: &'a CancelToken,
    reporter: &'a mut R,
    solution_log: Option<&'a mut SolutionLog>,
    limits: SearchLimits,
    stopped: Option<Termination>,
}

/// State handed back to the driver once the search unwinds.
pub(crate) struct SearchResult {
    pub best: Hypothesis,
    pub found: bool,
    pub steps: u64,
    pub termination: Termination,
}

impl<'a, R: Reporter + ?Sized> Search<'a, R> {
    pub(crate) fn new(
        problem: &'a Problem,
        cancel: &'a CancelToken,
        reporter: &'a mut R,
        solution_log: Option<&'a mut SolutionLog>,
        limits: SearchLimits,
    ) -> Self {
        let (targets, traces) = (problem.num_targets(), problem.num_traces());
        Self {
            problem,
            current: Hypothesis::new(targets, traces),
            best: Hypothesis::no_solution(targets, traces),
            found: false,
            cancel,
            reporter,
            solution_log,
            limits,
            stopped: None,
        }
    }

    pub(crate) fn run(mut self) -> SearchResult {
        self.descend();
        SearchResult {
            steps: self.current.step_count(),
            termination: self.stopped.unwrap_or(Termination::Exhausted),
            best: self.best,
            found: self.found,
        }
    }

    /// Text for the incumbent as of `steps`.
    pub(crate) fn describe_best(best: &Hypothesis, found: bool, steps: u64) -> String {
        if found {
            best.describe(steps)
        } else {
            format!("{} after {steps} steps", TotalDistance::NoDistance)
        }
    }

    fn descend(&mut self) {
        let step = self.current.next_step();

        if self.should_stop(step) {
            return;
        }

        if self.limits.progress_interval > 0 && step % self.limits.progress_interval == 0 {
            self.report_progress(step);
        }

        if self.current.total_distance() > self.best.total_distance() {
            return;
        }

        if self.current.is_complete() {
            self.record_complete();
            return;
        }

        let target = self.current.number_matched();
        let closest = self.problem.closest_unused_trace(target, &self.current);
        let checkpoint = self.current.checkpoint();

        match closest {
            Some(trace) => {
                let d = self.problem.distance(target, trace);
                self.current.assign(target, trace, d);
            }
            None => self.current.leave_unmatched(target),
        }
        self.descend();
        self.current.restore(checkpoint);

        for trace in 0..self.problem.num_traces() {
            if self.stopped.is_some() {
                return;
            }
            if Some(trace) == closest || self.current.is_trace_used(trace) {
                continue;
            }
            let d = self.problem.distance(target, trace);
            self.current.assign(target, trace, d);
            self.descend();
            self.current.restore(checkpoint);
        }
    }

    fn should_stop(&mut self, step: u64) -> bool {
        if self.stopped.is_some() {
            return true;
        }
        if self.cancel.is_cancelled() {
            log::debug!("solver.search: cancellation observed step={step}");
            self.stopped = Some(Termination::Cancelled);
            return true;
        }
        if let Some(limit) = self.limits.step_limit
            && step > limit
        {
            log::debug!("solver.search: step limit reached limit={limit}");
            self.stopped = Some(Termination::StepLimit);
            return true;
        }
        false
    }

    fn record_complete(&mut self) {
        if self.found && self.current.total_distance() >= self.best.total_distance() {
            return;
        }

        self.current.snapshot_into(&mut self.best);
        self.found = true;

        let line = self.best.describe(self.best.step_count());
        log::debug!("solver.search: incumbent {line}");
        if let Some(sink) = self.solution_log.as_deref_mut() {
            sink.append(&line);
        }
    }

    fn report_progress(&mut self, step: u64) {
        let report = Report {
            matches: self.best.matches().to_vec(),
            description: Self::describe_best(&self.best, self.found, step),
            total_distance: self.best.total_distance(),
            steps: step,
            is_final: false,
        };
        self.reporter.report(&report);
    }
}

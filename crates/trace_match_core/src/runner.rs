use std::{
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::{Duration, Instant},
};

use crate::{
    Error, Result,
    interrupt,
    io::input::ProblemInput,
    options::SolverOptions,
    solver::{CancelToken, ChannelReporter, Report, Solution, Solver, SolverConfig},
};

/// How often the calling thread wakes to check the time limit.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Solves on a worker thread while this thread logs interim reports and
/// enforces `--time-limit`. Ctrl-C cancels the search.
pub fn run(input: ProblemInput, options: &SolverOptions) -> Result<Solution> {
    let cancel = CancelToken::new();
    let _interrupt = interrupt::cancel_on_interrupt(&cancel);
    run_with_token(input, options, cancel)
}

fn run_with_token(
    input: ProblemInput,
    options: &SolverOptions,
    cancel: CancelToken,
) -> Result<Solution> {
    let started = Instant::now();
    let deadline = options.time_limit().map(|limit| started + limit);
    let solver = Solver::with_cancel_token(SolverConfig::from(options), cancel.clone());
    let (tx, rx) = mpsc::channel::<Report>();

    let worker = thread::Builder::new()
        .name("trace-match-solver".to_string())
        .spawn(move || {
            let mut reporter = ChannelReporter::new(tx);
            solver.solve(&input.targets, &input.traces, &mut reporter)
        })?;

    let mut timed_out = false;
    loop {
        match rx.recv_timeout(POLL_INTERVAL) {
            Ok(report) if report.is_final => {
                log::debug!("runner.final: steps={}", report.steps);
            }
            Ok(report) => {
                log::info!("runner.progress: {}", report.description);
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if !timed_out
            && let Some(deadline) = deadline
            && Instant::now() >= deadline
        {
            log::warn!(
                "runner.timeout: cancelling after {:.2}s",
                started.elapsed().as_secs_f32()
            );
            cancel.cancel();
            timed_out = true;
        }
    }

    let solution = worker
        .join()
        .map_err(|_| Error::other("solver thread panicked"))?;
    log::info!(
        "runner.done: outcome={} termination={} time={:.2}s",
        solution.outcome,
        solution.termination,
        started.elapsed().as_secs_f32()
    );
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::run_with_token;
    use crate::{
        io::input::ProblemInput,
        options::SolverOptions,
        solver::{CancelToken, Outcome, Termination},
    };

    #[test]
    fn run_returns_optimal_solution_for_small_problem() {
        let input = ProblemInput::random(5, 3);
        let solution = run_with_token(input, &SolverOptions::default(), CancelToken::new())
            .expect("run");

        assert_eq!(solution.outcome, Outcome::Optimal);
        assert_eq!(solution.termination, Termination::Exhausted);
        assert_eq!(solution.matches.len(), 5);
    }

    #[test]
    fn run_honours_pre_cancelled_token() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let solution = run_with_token(ProblemInput::random(6, 1), &SolverOptions::default(), cancel)
            .expect("run");

        assert_eq!(solution.termination, Termination::Cancelled);
        assert_eq!(solution.steps, 1);
    }

    #[test]
    fn unrepresentable_time_limit_runs_without_deadline() {
        let options = SolverOptions {
            time_limit: 1e20,
            ..SolverOptions::default()
        };
        let solution =
            run_with_token(ProblemInput::random(3, 1), &options, CancelToken::new()).expect("run");

        assert_eq!(solution.termination, Termination::Exhausted);
    }

        #[test]
    fn time_limit_cancels_long_search() {
        let options = SolverOptions {
            time_limit: 0.2,
            progress_interval: 1000,
            ..SolverOptions::default()
        };
        let solution =
            run_with_token(ProblemInput::random(30, 5), &options, CancelToken::new()).expect("run");

        assert_eq!(solution.termination, Termination::Cancelled);
        assert!(solution.description.ends_with("*** SEARCH INTERRUPTED ***"));
    }
}

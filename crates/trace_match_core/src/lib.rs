//! Optimal target-to-trace assignment by exhaustive branch-and-bound.
//! Searches best-first, reports improving solutions as it goes, and stops
//! cooperatively when cancelled.

mod error;
pub mod interrupt;
mod io;
pub mod logging;
mod point;
mod runner;
mod solution_log;
pub mod solver;

pub(crate) use io::options;

pub use error::{Error, Result};
pub use io::input::ProblemInput;
pub use io::options::{LogFormat, LogLevel, SolverOptions};
pub use io::output;
pub use point::Point;
pub use runner::run;
pub use solution_log::SolutionLog;
pub use solver::{
    CancelToken, Outcome, Report, Reporter, Solution, Solver, SolverConfig, Termination,
    TotalDistance, solve,
};

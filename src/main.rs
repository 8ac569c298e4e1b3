use std::time::Instant;

use log::{info, warn};

use trace_match_core::{ProblemInput, Result, SolverOptions, logging, output, run};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = SolverOptions::from_args()?;
    logging::init_logger(&options)?;
    let input = ProblemInput::from_options(&options)?;

    info!("input: {input}");
    info!("options: {options}");

    let solution = run(input, &options)?;
    output::emit(&options, &solution)?;

    if solution.is_interrupted() {
        warn!(
            "output: search stopped early termination={}",
            solution.termination
        );
    }
    info!(
        "output: outcome={} steps={} time={:.2}s",
        solution.outcome,
        solution.steps,
        now.elapsed().as_secs_f32()
    );

    Ok(())
}

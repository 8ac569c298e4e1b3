use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

use crate::{Result, options::SolverOptions, solver::Solution};

/// Writes the final description followed by one `target,trace` line per
/// target; unmatched targets get `-` for the trace.
pub fn write_solution<W: Write>(out: &mut W, solution: &Solution) -> io::Result<()> {
    writeln!(out, "{}", solution.description)?;
    for (target, trace) in solution.matches.iter().enumerate() {
        match trace {
            Some(trace) => writeln!(out, "{target},{trace}")?,
            None => writeln!(out, "{target},-")?,
        }
    }
    out.flush()
}

/// Sends the solution to `--output` or stdout.
pub fn emit(options: &SolverOptions, solution: &Solution) -> Result<()> {
    match options.output_path() {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            write_solution(&mut out, solution)?;
            log::debug!("output: wrote path={}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_solution(&mut out, solution)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::{emit, write_solution};
    use crate::{
        options::SolverOptions,
        solver::{Outcome, Solution, Termination, TotalDistance},
    };

    fn sample() -> Solution {
        Solution {
            matches: vec![Some(1), None],
            total_distance: TotalDistance::NoDistance,
            steps: 7,
            found_at_step: Some(3),
            outcome: Outcome::Suboptimal,
            termination: Termination::Exhausted,
            description: "[1-0], [UNMATCHED 1] => NO SOLUTION FOUND".to_string(),
        }
    }

    #[test]
    fn write_solution_lists_every_target() {
        let mut buf = Vec::new();
        write_solution(&mut buf, &sample()).expect("write to vec");
        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(
            text,
            "[1-0], [UNMATCHED 1] => NO SOLUTION FOUND\n0,1\n1,-\n"
        );
    }

    #[test]
    fn emit_writes_to_output_file() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("trace-match-tests-output-{nanos}.txt"));
        let options = SolverOptions {
            output: path.to_string_lossy().into_owned(),
            ..SolverOptions::default()
        };

        emit(&options, &sample()).expect("emit");
        let text = fs::read_to_string(&path).expect("read output");
        assert!(text.ends_with("0,1\n1,-\n"));

        let _ = fs::remove_file(&path);
    }
}

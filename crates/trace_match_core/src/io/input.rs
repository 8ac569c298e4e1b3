use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use rand::{Rng, SeedableRng, rngs::StdRng};
use trace_match_derive::KvDisplay;

use crate::{Error, Point, Result, options::SolverOptions};

/// Upper bound (exclusive) of generated target coordinates.
const RANDOM_FIELD: i32 = 99;
/// Generated traces land within this offset of their target on each axis.
const RANDOM_JITTER: i32 = 50;

/// A matching problem: targets and candidate traces.
#[derive(Clone, Debug, Default, PartialEq, Eq, KvDisplay)]
pub struct ProblemInput {
    #[kv(fmt = "len")]
    pub targets: Vec<Point>,
    #[kv(fmt = "len")]
    pub traces: Vec<Point>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Targets,
    Traces,
}

impl Section {
    fn header(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "targets:" => Some(Self::Targets),
            "traces:" => Some(Self::Traces),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Targets => "targets",
            Self::Traces => "traces",
        }
    }
}

impl ProblemInput {
    pub fn new(targets: Vec<Point>, traces: Vec<Point>) -> Self {
        Self { targets, traces }
    }

    /// Reads the problem the options point at: generated, from `--input`,
    /// or from stdin.
    pub fn from_options(options: &SolverOptions) -> Result<Self> {
        if options.random > 0 {
            let input = Self::random(options.random, options.seed);
            log::debug!(
                "input.random: n={} seed={}",
                options.random,
                options.seed
            );
            return Ok(input);
        }

        match options.input_path() {
            Some(path) => Self::read_file(path),
            None => {
                let mut raw = String::new();
                io::stdin().read_to_string(&mut raw)?;
                Self::parse(&raw)
            }
        }
    }

    pub fn read_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|err| {
            Error::invalid_input(format!("failed to read {}: {err}", path.display()))
        })?;
        Self::parse(&raw)
    }

    /// Parses `targets:` and `traces:` sections of `x,y` tokens.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut input = Self::default();
        let mut section: Option<Section> = None;
        let mut seen_targets = false;
        let mut seen_traces = false;

        for (idx, line) in raw.lines().enumerate() {
            let line_no = idx + 1;
            let content = line.split_once('#').map_or(line, |(before, _)| before);

            for token in content.split_whitespace() {
                if let Some(header) = Section::header(token) {
                    let seen = match header {
                        Section::Targets => &mut seen_targets,
                        Section::Traces => &mut seen_traces,
                    };
                    if *seen {
                        return Err(Error::invalid_input(format!(
                            "Line {line_no}: duplicate '{}:' section",
                            header.name()
                        )));
                    }
                    *seen = true;
                    section = Some(header);
                    continue;
                }

                let Some(current) = section else {
                    return Err(Error::invalid_input(format!(
                        "Line {line_no}: point '{token}' appears before a 'targets:' or 'traces:' header"
                    )));
                };

                let point = parse_point(token, line_no)?;
                match current {
                    Section::Targets => input.targets.push(point),
                    Section::Traces => input.traces.push(point),
                }
            }
        }

        for (seen, name) in [(seen_targets, "targets"), (seen_traces, "traces")] {
            if !seen {
                return Err(Error::invalid_input(format!(
                    "missing '{name}:' section"
                )));
            }
        }

        Ok(input)
    }

    /// Generates `n` targets in `[0, 99)` and one nearby trace per target.
    pub fn random(n: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let targets: Vec<Point> = (0..n)
            .map(|_| {
                Point::new(
                    rng.random_range(0..RANDOM_FIELD),
                    rng.random_range(0..RANDOM_FIELD),
                )
            })
            .collect();
        let traces = targets
            .iter()
            .map(|target| {
                Point::new(
                    target.x + rng.random_range(-RANDOM_JITTER..RANDOM_JITTER),
                    target.y + rng.random_range(-RANDOM_JITTER..RANDOM_JITTER),
                )
            })
            .collect();
        Self { targets, traces }
    }
}

fn parse_point(token: &str, line_no: usize) -> Result<Point> {
    let mut it = token.split(',');
    let x_s = it.next().unwrap_or_default();
    let Some(y_s) = it.next() else {
        return Err(Error::invalid_input(format!(
            "Line {line_no}: expected 'x,y' but got '{token}'"
        )));
    };
    if it.next().is_some() {
        return Err(Error::invalid_input(format!(
            "Line {line_no}: expected 'x,y' but got extra comma fields: {token}"
        )));
    }

    let x: i32 = x_s.parse().map_err(|_| {
        Error::invalid_input(format!("Line {line_no}: invalid x coordinate: {x_s}"))
    })?;
    let y: i32 = y_s.parse().map_err(|_| {
        Error::invalid_input(format!("Line {line_no}: invalid y coordinate: {y_s}"))
    })?;
    Ok(Point::new(x, y))
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::ProblemInput;
    use crate::Point;

    fn unique_temp_path(name: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("trace-match-tests-{name}-{nanos}.txt"))
    }

    #[test]
    fn parse_reads_sections_across_lines_with_comments() {
        let input = ProblemInput::parse(
            "# two blobs\ntargets: 1,2 3,4\n  -5,6 # trailing\ntraces:\n7,8\n",
        )
        .expect("parse problem");

        assert_eq!(
            input.targets,
            vec![Point::new(1, 2), Point::new(3, 4), Point::new(-5, 6)]
        );
        assert_eq!(input.traces, vec![Point::new(7, 8)]);
    }

    #[test]
    fn parse_accepts_empty_sections_in_any_order() {
        let input = ProblemInput::parse("TRACES:\ntargets:").expect("parse problem");
        assert!(input.targets.is_empty());
        assert!(input.traces.is_empty());
    }

    #[test]
    fn parse_rejects_points_before_header() {
        let err = ProblemInput::parse("1,2\ntargets:\ntraces:").expect_err("orphan point");
        assert!(err.to_string().contains("Line 1: point '1,2' appears before"));
    }

    #[test]
    fn parse_rejects_malformed_tokens_with_line_number() {
        let err = ProblemInput::parse("targets: 1,2\ntraces: 3;4").expect_err("bad token");
        assert!(err.to_string().contains("Line 2: expected 'x,y' but got '3;4'"));

        let err = ProblemInput::parse("targets: 1,2,3\ntraces:").expect_err("extra field");
        assert!(err.to_string().contains("extra comma fields"));

        let err = ProblemInput::parse("targets: 1.5,2\ntraces:").expect_err("float");
        assert!(err.to_string().contains("Line 1: invalid x coordinate: 1.5"));
    }

    #[test]
    fn parse_rejects_missing_or_duplicate_sections() {
        let err = ProblemInput::parse("targets: 1,2").expect_err("missing traces");
        assert!(err.to_string().contains("missing 'traces:' section"));

        let err =
            ProblemInput::parse("targets:\ntraces:\ntargets: 1,1").expect_err("duplicate");
        assert!(err.to_string().contains("Line 3: duplicate 'targets:' section"));
    }

    #[test]
    fn read_file_parses_problem_from_disk() {
        let path = unique_temp_path("input");
        fs::write(&path, "targets: 0,0\ntraces: 1,1\n").expect("write input");

        let input = ProblemInput::read_file(&path).expect("read problem");
        assert_eq!(input, ProblemInput::new(vec![Point::new(0, 0)], vec![Point::new(1, 1)]));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn read_file_reports_missing_file() {
        let path = unique_temp_path("missing");
        let err = ProblemInput::read_file(&path).expect_err("missing file");
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn random_is_seeded_and_stays_in_range() {
        let a = ProblemInput::random(25, 99);
        let b = ProblemInput::random(25, 99);
        assert_eq!(a, b);
        assert_eq!(a.targets.len(), 25);
        assert_eq!(a.traces.len(), 25);

        for (target, trace) in a.targets.iter().zip(&a.traces) {
            assert!((0..99).contains(&target.x) && (0..99).contains(&target.y));
            assert!((-50..50).contains(&(trace.x - target.x)));
            assert!((-50..50).contains(&(trace.y - target.y)));
        }
    }

    #[test]
    fn display_shows_counts() {
        let input = ProblemInput::random(3, 1);
        let rendered = input.to_string();
        assert!(rendered.contains("targets = 3"));
        assert!(rendered.contains("traces  = 3"));
    }
}

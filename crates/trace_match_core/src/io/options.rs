use std::{env, path::Path, time::Duration};

use log::LevelFilter;
use trace_match_derive::{CliOptions, CliValue, KvDisplay};

use crate::{Error, Result, solver::DEFAULT_PROGRESS_INTERVAL};

/// Runtime options for the command-line front end.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct SolverOptions {
    /// Steps between interim progress reports. 0 disables them.
    #[cli(long = "progress-interval")]
    pub progress_interval: u64,
    /// Stop after this many search steps. 0 means no limit.
    #[cli(long = "step-limit")]
    pub step_limit: u64,
    /// Cancel the search after this many seconds. 0 means no limit.
    #[cli(long = "time-limit")]
    pub time_limit: f64,
    /// Optional file receiving one line per improved solution. Empty disables it.
    #[cli(long = "solution-log")]
    #[kv(fmt = "or_dash")]
    pub solution_log: String,
    /// Generate this many random targets and traces instead of reading input.
    #[cli(long = "random")]
    pub random: usize,
    /// Seed for `--random`.
    #[cli(long = "seed")]
    pub seed: u64,
    /// Structured logging level.
    #[cli(long = "log-level", parse_with = "LogLevel::parse")]
    pub log_level: LogLevel,
    /// Logging output format.
    #[cli(long = "log-format", parse_with = "LogFormat::parse")]
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    #[cli(long = "log-timestamp", flag)]
    pub log_timestamp: bool,
    /// Optional output file path for logs. Empty means stderr.
    #[cli(long = "log-output")]
    #[kv(fmt = "or_dash")]
    pub log_output: String,
    /// Optional input file path for the problem. Empty means stdin.
    #[cli(long = "input")]
    #[kv(fmt = "or_dash")]
    pub input: String,
    /// Optional output file path for the assignment. Empty means stdout.
    #[cli(long = "output")]
    #[kv(fmt = "or_dash")]
    pub output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-level")]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-format")]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            step_limit: 0,
            time_limit: 0.0,
            solution_log: String::new(),
            random: 0,
            seed: 12_345,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
            input: String::new(),
            output: String::new(),
        }
    }
}

impl SolverOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = Self::split_arg(raw_name, &mut args);
            if !options.apply_cli_option(&name, value)? {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }

        options.validate()?;
        Ok(options)
    }

    fn validate(&self) -> Result<()> {
        if Duration::try_from_secs_f64(self.time_limit).is_err() {
            return Err(Error::invalid_input(format!(
                "--time-limit must be a non-negative number of seconds, got {}",
                self.time_limit
            )));
        }
        Ok(())
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  trace-match [options] [--input problem.txt]\n",
            "  trace-match [options] < problem.txt\n",
            "  trace-match [options] --random <n>\n\n",
            "Input format:\n",
            "  targets: x,y x,y ...\n",
            "  traces:  x,y x,y ...\n\n",
            "Options:\n",
            "  --progress-interval <u64>\n",
            "  --step-limit <u64>\n",
            "  --time-limit <seconds>\n",
            "  --solution-log <path>\n",
            "  --random <usize>\n",
            "  --seed <u64>\n",
            "  --log-level <error|warn|info|debug|trace|off>\n",
            "  --log-format <compact|pretty>\n",
            "  --log-timestamp[=<bool>]\n",
            "  --no-log-timestamp\n",
            "  --log-output <path>\n",
            "  --input <path>\n",
            "  --output <path>\n",
            "  --help\n",
            "\n",
            "Examples:\n",
            "  trace-match --input problem.txt --output matches.txt\n",
            "  trace-match --random 10 --seed 7 --log-level info\n",
            "  trace-match --time-limit 30 --solution-log improvements.txt < problem.txt\n",
        )
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        optional_path(&self.log_output)
    }

    pub fn output_path(&self) -> Option<&Path> {
        optional_path(&self.output)
    }

    pub fn input_path(&self) -> Option<&Path> {
        optional_path(&self.input)
    }

    pub fn solution_log_path(&self) -> Option<&Path> {
        optional_path(&self.solution_log)
    }

    pub fn time_limit(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.time_limit)
            .ok()
            .filter(|limit| !limit.is_zero())
    }
}

fn optional_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}

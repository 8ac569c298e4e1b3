use std::{fmt, fs::File, io::Write, thread};

use env_logger::{Builder, Target, WriteStyle};
use log::Level;

use crate::{
    Error, Result,
    options::{LogFormat, SolverOptions},
};

/// Installs the global logger described by the options. Fails if a logger
/// is already installed or the `--log-output` file cannot be created.
pub fn init_logger(options: &SolverOptions) -> Result<()> {
    let log_format = options.log_format;
    let log_timestamp = options.log_timestamp;

    let mut builder = Builder::new();
    builder
        .filter_level(options.log_level.to_filter())
        .write_style(WriteStyle::Never)
        .format(move |buf, record| {
            if log_timestamp {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            let current = thread::current();
            writeln!(
                buf,
                "{}",
                LogLine {
                    format: log_format,
                    level: record.level(),
                    target: record.target(),
                    thread: current.name(),
                    args: record.args(),
                }
            )
        });

    let target = match options.log_output_path() {
        Some(log_path) => {
            let log_file = File::create(log_path).map_err(|e| {
                Error::other(format!(
                    "failed to create log output file {}: {e}",
                    log_path.display()
                ))
            })?;
            Target::Pipe(Box::new(log_file))
        }
        None => Target::Stderr,
    };
    builder.target(target);

    builder
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

/// One record without its timestamp. Pretty lines name the module and, for
/// the solver worker, the thread.
struct LogLine<'a, A> {
    format: LogFormat,
    level: Level,
    target: &'a str,
    thread: Option<&'a str>,
    args: A,
}

impl<A: fmt::Display> fmt::Display for LogLine<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = level_tag(self.level);
        match self.format {
            LogFormat::Compact => write!(f, "{tag} {}", self.args),
            LogFormat::Pretty => match self.thread {
                Some(thread) if thread != "main" => {
                    write!(f, "{tag} [{}@{thread}] {}", self.target, self.args)
                }
                _ => write!(f, "{tag} [{}] {}", self.target, self.args),
            },
        }
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::LogLine;
    use crate::options::LogFormat;

    fn line(format: LogFormat, thread: Option<&str>) -> String {
        LogLine {
            format,
            level: Level::Info,
            target: "trace_match_core::solver",
            thread,
            args: "solver: done steps=4",
        }
        .to_string()
    }

    #[test]
    fn compact_lines_carry_only_level_and_message() {
        assert_eq!(
            line(LogFormat::Compact, Some("trace-match-solver")),
            "INFO solver: done steps=4"
        );
    }

    #[test]
    fn pretty_lines_name_worker_threads_but_not_main() {
        assert_eq!(
            line(LogFormat::Pretty, Some("trace-match-solver")),
            "INFO [trace_match_core::solver@trace-match-solver] solver: done steps=4"
        );
        assert_eq!(
            line(LogFormat::Pretty, Some("main")),
            "INFO [trace_match_core::solver] solver: done steps=4"
        );
        assert_eq!(
            line(LogFormat::Pretty, None),
            "INFO [trace_match_core::solver] solver: done steps=4"
        );
    }
}

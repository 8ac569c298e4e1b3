use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

enum SinkState {
    Pending,
    Open(BufWriter<File>),
    Failed,
}

/// Append-only text file that receives one line per improved solution.
///
/// The file is created (truncating any previous run) on the first line.
/// Write failures are logged and switch the sink off; they never reach the
/// search.
pub struct SolutionLog {
    path: PathBuf,
    state: SinkState,
    lines: usize,
}

impl SolutionLog {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            state: SinkState::Pending,
            lines: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines_written(&self) -> usize {
        self.lines
    }

    pub fn append(&mut self, line: &str) {
        if matches!(self.state, SinkState::Pending) {
            self.state = match File::create(&self.path) {
                Ok(file) => SinkState::Open(BufWriter::new(file)),
                Err(err) => {
                    log::warn!(
                        "solution_log: failed to create path={} err={err}",
                        self.path.display()
                    );
                    SinkState::Failed
                }
            };
        }

        let SinkState::Open(writer) = &mut self.state else {
            return;
        };
        if let Err(err) = writeln!(writer, "{line}") {
            log::warn!(
                "solution_log: write failed path={} err={err}",
                self.path.display()
            );
            self.state = SinkState::Failed;
            return;
        }
        self.lines += 1;
    }

    /// Flushes and closes the file. Called once per solve.
    pub fn finish(&mut self) {
        if let SinkState::Open(mut writer) = std::mem::replace(&mut self.state, SinkState::Failed)
        {
            if let Err(err) = writer.flush() {
                log::warn!(
                    "solution_log: flush failed path={} err={err}",
                    self.path.display()
                );
            } else {
                log::debug!(
                    "solution_log: closed path={} lines={}",
                    self.path.display(),
                    self.lines
                );
            }
        }
    }
}

impl Drop for SolutionLog {
    fn drop(&mut self) {
        self.finish();
    }
}

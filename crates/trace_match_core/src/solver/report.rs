use std::sync::mpsc::Sender;

use super::distance::TotalDistance;

/// One emission on the progress channel: the incumbent at some point of the
/// search, or the terminal result when `is_final` is set.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub matches: Vec<Option<usize>>,
    pub description: String,
    pub total_distance: TotalDistance,
    /// Search calls made so far.
    pub steps: u64,
    pub is_final: bool,
}

/// Receives progress and final reports. Called synchronously from inside the
/// search, so implementations must return quickly.
pub trait Reporter {
    fn report(&mut self, report: &Report);
}

impl<F> Reporter for F
where
    F: FnMut(&Report),
{
    fn report(&mut self, report: &Report) {
        self(report)
    }
}

/// Forwards reports to another thread over a channel. A dropped receiver is
/// ignored so the search keeps running.
#[derive(Clone, Debug)]
pub struct ChannelReporter {
    tx: Sender<Report>,
}

impl ChannelReporter {
    pub fn new(tx: Sender<Report>) -> Self {
        Self { tx }
    }
}

impl Reporter for ChannelReporter {
    fn report(&mut self, report: &Report) {
        if self.tx.send(report.clone()).is_err() {
            log::trace!("solver.report: receiver gone steps={}", report.steps);
        }
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _report: &Report) {}
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::{ChannelReporter, Report, Reporter};
    use crate::solver::distance::TotalDistance;

    fn sample(is_final: bool) -> Report {
        Report {
            matches: vec![Some(1), Some(0)],
            description: "[1-0], [0-1] => 2 after 5 steps".to_string(),
            total_distance: TotalDistance::Distance(2),
            steps: 5,
            is_final,
        }
    }

    #[test]
    fn closures_are_reporters() {
        let mut seen = Vec::new();
        let mut reporter = |report: &Report| seen.push(report.is_final);
        reporter.report(&sample(false));
        reporter.report(&sample(true));
        assert_eq!(seen, vec![false, true]);
    }

    #[test]
    fn channel_reporter_forwards_owned_reports() {
        let (tx, rx) = mpsc::channel();
        let mut reporter = ChannelReporter::new(tx);
        reporter.report(&sample(true));

        let received = rx.recv().expect("report should arrive");
        assert_eq!(received, sample(true));
    }

    #[test]
    fn channel_reporter_survives_dropped_receiver() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut reporter = ChannelReporter::new(tx);
        reporter.report(&sample(false));
    }
}

use super::problem::Problem;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AssignmentMetrics {
    pub matched: usize,
    pub unmatched_targets: usize,
    pub unmatched_traces: usize,
    /// Sum of matched link lengths; defined even when targets are unmatched.
    pub linked: u64,
    pub longest: u64,
    pub average: f64,
}

impl AssignmentMetrics {
    pub fn measure(problem: &Problem, matches: &[Option<usize>]) -> Self {
        let lengths: Vec<u64> = matches
            .iter()
            .enumerate()
            .filter_map(|(target, trace)| trace.map(|trace| problem.distance(target, trace)))
            .collect();

        let matched = lengths.len();
        let linked: u64 = lengths.iter().sum();
        let metrics = Self {
            matched,
            unmatched_targets: problem.num_targets() - matched,
            unmatched_traces: problem.num_traces() - matched,
            linked,
            longest: lengths.iter().copied().max().unwrap_or(0),
            average: if matched == 0 {
                0.0
            } else {
                linked as f64 / matched as f64
            },
        };

        log::info!(
            "metrics: matched={} unmatched_targets={} unmatched_traces={} linked={} longest={} avg={:.1}",
            metrics.matched,
            metrics.unmatched_targets,
            metrics.unmatched_traces,
            metrics.linked,
            metrics.longest,
            metrics.average
        );

        metrics
    }
}

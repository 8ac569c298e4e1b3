use crate::Point;

use super::hypothesis::Hypothesis;

/// Immutable matching instance: both point sets plus the precomputed
/// target-by-trace distance matrix (row-major).
#[derive(Clone, Debug)]
pub struct Problem {
    targets: Vec<Point>,
    traces: Vec<Point>,
    distances: Vec<u64>,
}

impl Problem {
    pub fn build(targets: &[Point], traces: &[Point]) -> Self {
        let distances = targets
            .iter()
            .flat_map(|target| traces.iter().map(move |trace| target.distance(trace)))
            .collect();

        Self {
            targets: targets.to_vec(),
            traces: traces.to_vec(),
            distances,
        }
    }

    pub fn num_targets(&self) -> usize {
        self.targets.len()
    }

    pub fn num_traces(&self) -> usize {
        self.traces.len()
    }

    pub fn targets(&self) -> &[Point] {
        &self.targets
    }

    pub fn traces(&self) -> &[Point] {
        &self.traces
    }

    pub fn distance(&self, target: usize, trace: usize) -> u64 {
        self.distances[target * self.traces.len() + trace]
    }

    /// Closest trace to `target` not yet used by `hypothesis`. Ties go to the
    /// lowest trace index.
    pub fn closest_unused_trace(&self, target: usize, hypothesis: &Hypothesis) -> Option<usize> {
        let mut closest: Option<(usize, u64)> = None;
        for trace in 0..self.num_traces() {
            if hypothesis.is_trace_used(trace) {
                continue;
            }
            let d = self.distance(target, trace);
            if closest.is_none_or(|(_, best)| d < best) {
                closest = Some((trace, d));
            }
        }
        closest.map(|(trace, _)| trace)
    }
}

use std::fmt::Write;

use super::distance::TotalDistance;

const NOT_OPTIMAL_WARNING: &str = " *** WARNING: SOLUTION IS NOT OPTIMAL ***";

/// A partial or complete assignment of traces to targets.
///
/// Entries `matches[..number_matched]` are meaningful; `None` there means the
/// target was left unmatched because the traces ran out. Entries past
/// `number_matched` are always `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct Hypothesis {
    matches: Vec<Option<usize>>,
    used: Vec<bool>,
    number_matched: usize,
    total_distance: TotalDistance,
    step_count: u64,
}

/// Scalar state saved before a descent so it can be put back afterwards.
#[derive(Clone, Copy, Debug)]
pub struct Checkpoint {
    number_matched: usize,
    total_distance: TotalDistance,
}

impl Hypothesis {
    /// Empty hypothesis at distance zero; the starting point of a search.
    pub fn new(num_targets: usize, num_traces: usize) -> Self {
        Self {
            matches: vec![None; num_targets],
            used: vec![false; num_traces],
            number_matched: 0,
            total_distance: TotalDistance::ZERO,
            step_count: 0,
        }
    }

    /// Placeholder incumbent holding no solution.
    pub fn no_solution(num_targets: usize, num_traces: usize) -> Self {
        Self {
            total_distance: TotalDistance::NoDistance,
            ..Self::new(num_targets, num_traces)
        }
    }

    pub fn matches(&self) -> &[Option<usize>] {
        &self.matches
    }

    pub fn number_matched(&self) -> usize {
        self.number_matched
    }

    pub fn total_distance(&self) -> TotalDistance {
        self.total_distance
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn is_complete(&self) -> bool {
        self.number_matched == self.matches.len()
    }

    pub fn is_trace_used(&self, trace: usize) -> bool {
        self.used[trace]
    }

    pub fn has_unmatched_target(&self) -> bool {
        self.matches[..self.number_matched]
            .iter()
            .any(Option::is_none)
    }

    pub fn unmatched_traces(&self) -> impl Iterator<Item = usize> + '_ {
        self.used
            .iter()
            .enumerate()
            .filter_map(|(trace, used)| (!used).then_some(trace))
    }

    /// `(trace, target)` links of the matched prefix.
    pub fn matched_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.matches[..self.number_matched]
            .iter()
            .enumerate()
            .filter_map(|(target, trace)| trace.map(|trace| (trace, target)))
    }

    pub(crate) fn next_step(&mut self) -> u64 {
        self.step_count += 1;
        self.step_count
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            number_matched: self.number_matched,
            total_distance: self.total_distance,
        }
    }

    /// Extends the prefix by matching `target` with `trace`.
    pub fn assign(&mut self, target: usize, trace: usize, distance: u64) {
        debug_assert_eq!(target, self.number_matched);
        debug_assert!(!self.used[trace]);
        self.matches[target] = Some(trace);
        self.used[trace] = true;
        self.number_matched += 1;
        self.total_distance = self.total_distance + distance;
    }

    /// Extends the prefix with an unmatched `target`; the hypothesis can no
    /// longer carry a usable distance.
    pub fn leave_unmatched(&mut self, target: usize) {
        debug_assert_eq!(target, self.number_matched);
        self.matches[target] = None;
        self.number_matched += 1;
        self.total_distance = TotalDistance::NoDistance;
    }

    /// Undoes every `assign`/`leave_unmatched` made since `checkpoint`.
    /// The step counter is left alone.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        for entry in &mut self.matches[checkpoint.number_matched..self.number_matched] {
            if let Some(trace) = entry.take() {
                self.used[trace] = false;
            }
        }
        self.number_matched = checkpoint.number_matched;
        self.total_distance = checkpoint.total_distance;
    }

    /// Deep copy into `best`, reusing its buffers.
    pub fn snapshot_into(&self, best: &mut Hypothesis) {
        best.matches.clone_from(&self.matches);
        best.used.clone_from(&self.used);
        best.number_matched = self.number_matched;
        best.total_distance = self.total_distance;
        best.step_count = self.step_count;
    }

    /// Human-readable line: `[trace-target]` pairs, the total distance,
    /// unused traces, the step count and a warning when a target is left
    /// unmatched.
    pub fn describe(&self, steps: u64) -> String {
        if !self.is_complete() {
            return format!("{} after {steps} steps", TotalDistance::NoDistance);
        }

        let mut out = String::new();
        for (target, trace) in self.matches.iter().enumerate() {
            if target != 0 {
                out.push_str(", ");
            }
            match trace {
                Some(trace) => {
                    let _ = write!(out, "[{trace}-{target}]");
                }
                None => {
                    let _ = write!(out, "[UNMATCHED {target}]");
                }
            }
        }
        let _ = write!(out, " => {}", self.total_distance);

        let unmatched: Vec<String> = self.unmatched_traces().map(|t| t.to_string()).collect();
        if !unmatched.is_empty() {
            let _ = write!(out, " (TRACES NOT MATCHED: {})", unmatched.join(", "));
        }

        let _ = write!(out, " after {steps} steps");

        if self.has_unmatched_target() {
            out.push_str(NOT_OPTIMAL_WARNING);
        }
        out
    }
}

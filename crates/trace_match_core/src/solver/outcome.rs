use std::fmt;

use super::distance::TotalDistance;

/// What the final incumbent is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Complete assignment with every target matched.
    Optimal,
    /// Complete assignment that matched some targets but had to leave others
    /// unmatched because there were fewer traces than targets. Not
    /// guaranteed optimal.
    Suboptimal,
    /// Nothing usable: the search stopped before any complete assignment, or
    /// there were targets but no trace could be matched to any of them.
    NoSolution,
}

/// Why the search stopped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Termination {
    Exhausted,
    Cancelled,
    StepLimit,
}

impl Termination {
    fn annotation(self) -> Option<&'static str> {
        match self {
            Self::Exhausted => None,
            Self::Cancelled => Some(" *** SEARCH INTERRUPTED ***"),
            Self::StepLimit => Some(" *** STEP LIMIT REACHED ***"),
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Exhausted => "exhausted",
            Self::Cancelled => "cancelled",
            Self::StepLimit => "step-limit",
        })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Optimal => "optimal",
            Self::Suboptimal => "suboptimal",
            Self::NoSolution => "no-solution",
        })
    }
}

/// Terminal result of one solve.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    /// `matches[i]` is the trace matched to target `i`.
    pub matches: Vec<Option<usize>>,
    pub total_distance: TotalDistance,
    /// Search calls made over the whole run.
    pub steps: u64,
    /// Step at which the reported incumbent was found.
    pub found_at_step: Option<u64>,
    pub outcome: Outcome,
    pub termination: Termination,
    pub description: String,
}

impl Solution {
    pub(crate) fn annotate(description: String, termination: Termination) -> String {
        match termination.annotation() {
            Some(note) => description + note,
            None => description,
        }
    }

    pub fn is_interrupted(&self) -> bool {
        self.termination != Termination::Exhausted
    }

    /// `(trace, target)` links for drawing the assignment.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.matches
            .iter()
            .enumerate()
            .filter_map(|(target, trace)| trace.map(|trace| (trace, target)))
            .collect()
    }

    pub fn unmatched_targets(&self) -> Vec<usize> {
        self.matches
            .iter()
            .enumerate()
            .filter_map(|(target, trace)| trace.is_none().then_some(target))
            .collect()
    }
}

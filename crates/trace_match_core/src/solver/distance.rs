use std::{cmp::Ordering, fmt, ops::Add};

/// Cumulative target-to-trace distance of a hypothesis.
///
/// `NoDistance` marks a hypothesis that is not a usable solution: either no
/// complete assignment has been found yet, or a target ran out of traces.
/// It orders after every concrete distance, so it never beats one.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TotalDistance {
    NoDistance,
    Distance(u64),
}

impl TotalDistance {
    pub const ZERO: Self = Self::Distance(0);

    pub fn value(self) -> Option<u64> {
        match self {
            Self::NoDistance => None,
            Self::Distance(d) => Some(d),
        }
    }

    pub fn is_some(self) -> bool {
        matches!(self, Self::Distance(_))
    }
}

impl Default for TotalDistance {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Ord for TotalDistance {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::NoDistance, Self::NoDistance) => Ordering::Equal,
            (Self::NoDistance, Self::Distance(_)) => Ordering::Greater,
            (Self::Distance(_), Self::NoDistance) => Ordering::Less,
            (Self::Distance(a), Self::Distance(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for TotalDistance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add<u64> for TotalDistance {
    type Output = Self;

    fn add(self, rhs: u64) -> Self {
        match self {
            Self::NoDistance => Self::NoDistance,
            Self::Distance(d) => Self::Distance(d.saturating_add(rhs)),
        }
    }
}

impl fmt::Display for TotalDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDistance => f.write_str("NO SOLUTION FOUND"),
            Self::Distance(d) => write!(f, "{d}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TotalDistance::{self, Distance, NoDistance};

    #[test]
    fn no_distance_orders_after_every_distance() {
        assert!(Distance(u64::MAX) < NoDistance);
        assert!(Distance(0) < Distance(1));
        assert_eq!(NoDistance.cmp(&NoDistance), std::cmp::Ordering::Equal);
    }

    #[test]
    fn adding_to_no_distance_stays_no_distance() {
        assert_eq!(NoDistance + 5, NoDistance);
        assert_eq!(Distance(3) + 4, Distance(7));
        assert_eq!(Distance(u64::MAX) + 1, Distance(u64::MAX));
    }

    #[test]
    fn display_spells_out_missing_solution() {
        assert_eq!(NoDistance.to_string(), "NO SOLUTION FOUND");
        assert_eq!(Distance(42).to_string(), "42");
        assert_eq!(TotalDistance::default(), TotalDistance::ZERO);
    }
}

use std::fmt;

/// A placed target or trace. Coordinates are screen-like integers.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance rounded down, computed without floating point so
    /// that any pair of `i32` points gives the exact floor.
    pub fn distance(self, rhs: &Self) -> u64 {
        let dx = u128::from((i64::from(self.x) - i64::from(rhs.x)).unsigned_abs());
        let dy = u128::from((i64::from(self.y) - i64::from(rhs.y)).unsigned_abs());
        let squared = dx * dx + dy * dy;
        // floor(sqrt(2 * (2^32)^2)) still fits in 34 bits.
        squared.isqrt() as u64
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::Point;

    #[test]
    fn distance_is_floor_of_euclidean_length() {
        let origin = Point::new(0, 0);
        assert_eq!(origin.distance(&Point::new(3, 4)), 5);
        assert_eq!(origin.distance(&Point::new(1, 1)), 1);
        assert_eq!(origin.distance(&Point::new(2, 2)), 2);
        assert_eq!(origin.distance(&Point::new(5, 5)), 7);
    }

    #[test]
    fn distance_is_symmetric_and_zero_for_same_point() {
        let a = Point::new(-17, 42);
        let b = Point::new(250, -3);

        assert_eq!(a.distance(&b), b.distance(&a));
        assert_eq!(a.distance(&a), 0);
    }

    #[test]
    fn distance_handles_extreme_coordinates_without_overflow() {
        let a = Point::new(i32::MIN, i32::MIN);
        let b = Point::new(i32::MAX, i32::MAX);
        // sqrt(2) * (2^32 - 1), rounded down.
        assert_eq!(a.distance(&b), 6_074_000_998);
    }

    #[test]
    fn display_formats_as_x_y() {
        assert_eq!(Point::new(-4, 17).to_string(), "-4,17");
    }
}

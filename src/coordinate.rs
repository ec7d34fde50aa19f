use core::fmt;
use grid_util::point::Point;

/// A cell position given as (row, column). Rows grow downwards, columns to the right.
///
/// Converts to a [grid_util] [Point] with `x = col` and `y = row`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Coordinate {
        Coordinate { row, col }
    }

    /// The coordinate of a point, or [None] if either component is negative.
    pub fn from_point(p: Point) -> Option<Coordinate> {
        let row = usize::try_from(p.y).ok()?;
        let col = usize::try_from(p.x).ok()?;
        Some(Coordinate { row, col })
    }

    pub fn manhattan_distance(&self, other: &Coordinate) -> usize {
        Point::from(*self).manhattan_distance(&Point::from(*other)) as usize
    }

    /// Straight-line distance. Never exceeds [manhattan_distance](Self::manhattan_distance).
    pub fn euclidean_distance(&self, other: &Coordinate) -> f64 {
        let d_row = self.row.abs_diff(other.row) as f64;
        let d_col = self.col.abs_diff(other.col) as f64;
        d_row.hypot(d_col)
    }

    /// Whether the two coordinates are one orthogonal step apart.
    pub fn is_adjacent(&self, other: &Coordinate) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<Coordinate> for Point {
    fn from(c: Coordinate) -> Point {
        Point::new(c.col as i32, c.row as i32)
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Coordinate { row, col }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_conversion() {
        let c = Coordinate::new(2, 5);
        let p = Point::from(c);
        assert_eq!((p.x, p.y), (5, 2));
        assert_eq!(Coordinate::from_point(p), Some(c));
        assert_eq!(Coordinate::from_point(Point::new(-1, 0)), None);
        assert_eq!(Coordinate::from_point(Point::new(0, -1)), None);
    }

    #[test]
    fn distances() {
        let a = Coordinate::new(0, 0);
        let b = Coordinate::new(3, 4);
        assert_eq!(a.manhattan_distance(&b), 7);
        assert_eq!(b.manhattan_distance(&a), 7);
        assert!((a.euclidean_distance(&b) - 5.0).abs() < 1e-12);
        assert!(a.is_adjacent(&Coordinate::new(0, 1)));
        assert!(!a.is_adjacent(&Coordinate::new(1, 1)));
        assert!(!a.is_adjacent(&a));
    }
}

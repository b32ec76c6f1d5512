use core::fmt;
use smallvec::SmallVec;

/// Offsets of the four cardinal moves.
pub const NEUMANN_OFFSETS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
/// Offsets between neighbouring cells of the half-resolution lattice used by the generator.
pub const LATTICE_OFFSETS: [(i32, i32); 4] = [(2, 0), (-2, 0), (0, 2), (0, -2)];

/// A grid cell, `x` being the row and `y` the column. Signed so that neighbour arithmetic and
/// raw user input never wrap; whether a [Coordinate] lies on a grid is decided by
/// [MazeGrid::in_bounds](crate::maze_grid::MazeGrid::in_bounds).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Coordinate {
        Coordinate { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Coordinate {
        Coordinate::new(self.x + dx, self.y + dy)
    }

    /// The four cardinal neighbours, in bounds or not.
    pub fn neumann_neighborhood(&self) -> SmallVec<[Coordinate; 4]> {
        NEUMANN_OFFSETS
            .iter()
            .map(|&(dx, dy)| self.offset(dx, dy))
            .collect()
    }

    /// The cells two steps away along each axis, in bounds or not.
    pub fn lattice_neighborhood(&self) -> SmallVec<[Coordinate; 4]> {
        LATTICE_OFFSETS
            .iter()
            .map(|&(dx, dy)| self.offset(dx, dy))
            .collect()
    }

    /// The cell halfway between two lattice neighbours, i.e. the wall separating them.
    pub fn midpoint(&self, other: &Coordinate) -> Coordinate {
        Coordinate::new((self.x + other.x) / 2, (self.y + other.y) / 2)
    }

    pub fn manhattan_distance(&self, other: &Coordinate) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Whether `other` is exactly one cardinal step away.
    pub fn is_cardinal_step(&self, other: &Coordinate) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// The `(x mod 2, y mod 2)` class; lattice moves never leave it.
    pub fn parity(&self) -> (i32, i32) {
        (self.x.rem_euclid(2), self.y.rem_euclid(2))
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Coordinate {
        Coordinate::new(x, y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_between_lattice_neighbours() {
        let c = Coordinate::new(2, 4);
        for nb in c.lattice_neighborhood() {
            let mid = c.midpoint(&nb);
            assert!(c.is_cardinal_step(&mid));
            assert!(nb.is_cardinal_step(&mid));
            assert_eq!(nb.parity(), c.parity());
        }
    }

    #[test]
    fn parity_of_negative_coordinates() {
        assert_eq!(Coordinate::new(-1, -2).parity(), (1, 0));
    }

    #[test]
    fn neumann_neighbours_are_unit_steps() {
        let c = Coordinate::new(0, 0);
        let neighbours = c.neumann_neighborhood();
        assert_eq!(neighbours.len(), 4);
        assert!(neighbours.iter().all(|n| c.is_cardinal_step(n)));
    }
}

/// One of the eight directions in which queens move and arrows fly
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

impl Direction {
    /// All the directions, clockwise starting from north
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Returns `(delta_file, delta_rank)` for a single step in this direction
    ///
    /// Ranks grow towards north, files grow towards east.
    pub const fn delta(&self) -> (isize, isize) {
        match *self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
        }
    }

    pub const fn inv(&self) -> Direction {
        Self::ALL[(*self as usize + 4) % 8]
    }
}

/// Maximum number of squares a queen can see from a single square on the largest board
///
/// Both orthogonal lines contribute `MAX - 1` squares, and both diagonals together
/// contribute at most `2 * (MAX - 1)`.
pub const MAX_VISION: usize = 4 * (crate::types::Size::MAX - 1);

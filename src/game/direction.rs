use super::grid::Cell;

/// A unit step on the board.  `y` grows downwards, so `North` is `(0, -1)`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Return the `(dx, dy)` unit vector for the direction
    pub(crate) fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Return the cell one step from `cell` in this direction.  The result
    /// may lie outside the board.
    pub(crate) fn advance(self, cell: Cell) -> Cell {
        let (dx, dy) = self.delta();
        Cell::new(cell.x + dx, cell.y + dy)
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// True iff `other` points exactly the other way, i.e., turning from one
    /// to the other would be a 180° reversal.
    pub(crate) fn is_opposite(self, other: Direction) -> bool {
        let (dx1, dy1) = self.delta();
        let (dx2, dy2) = other.delta();
        dx1 == -dx2 && dy1 == -dy2
    }
}

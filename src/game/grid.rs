use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use std::collections::HashSet;

/// A position on the board, relative to its top-left corner.  A `Cell` may be
/// computed outside of the board (e.g., the square the snake is about to
/// crash into); use [`Cell::in_bounds()`] to check.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Cell {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Cell {
    pub(crate) const fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }

    pub(crate) fn in_bounds(self) -> bool {
        (0..consts::GRID).contains(&self.x) && (0..consts::GRID).contains(&self.y)
    }
}

/// Iterate over every cell of the board in row-major order
pub(crate) fn all_cells() -> impl Iterator<Item = Cell> {
    (0..consts::GRID).flat_map(|y| (0..consts::GRID).map(move |x| Cell::new(x, y)))
}

/// Pick a cell uniformly at random from those not in `occupied`.
///
/// Cells are sampled from the whole board until a free one turns up.  After
/// [`MAX_FOOD_ATTEMPTS`][consts::MAX_FOOD_ATTEMPTS] misses, the choice is
/// instead made directly among the free cells, so a nearly-full board cannot
/// stall the game.  Returns `None` if every cell is occupied.
pub(crate) fn place_food<R: Rng + ?Sized>(occupied: &HashSet<Cell>, rng: &mut R) -> Option<Cell> {
    for _ in 0..consts::MAX_FOOD_ATTEMPTS {
        let cell = Cell::new(
            rng.random_range(0..consts::GRID),
            rng.random_range(0..consts::GRID),
        );
        if !occupied.contains(&cell) {
            return Some(cell);
        }
    }
    all_cells()
        .filter(|c| !occupied.contains(c))
        .choose(rng)
}

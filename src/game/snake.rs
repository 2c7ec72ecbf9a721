use super::direction::Direction;
use super::grid::Cell;
use crate::consts;
use std::collections::{HashSet, VecDeque};

/// The snake's body and heading on the board.
///
/// All positions are relative to the top-left corner of the board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The position of the snake's head
    pub(super) head: Cell,

    /// The positions of all of the cells in the snake's body, nearest to the
    /// head first, with the tip of the tail at the end
    pub(super) body: VecDeque<Cell>,

    /// The direction in which the snake is currently facing
    pub(super) direction: Direction,
}

impl Snake {
    /// Create a new snake of [`INITIAL_SNAKE_LENGTH`][consts::INITIAL_SNAKE_LENGTH]
    /// cells with its head at `head`, facing `direction`, and its body
    /// trailing straight out behind it.
    pub(super) fn new(head: Cell, direction: Direction) -> Snake {
        let behind = direction.reverse();
        let body = std::iter::successors(Some(behind.advance(head)), |&c| {
            Some(behind.advance(c))
        })
        .take(consts::INITIAL_SNAKE_LENGTH - 1)
        .collect();
        Snake {
            head,
            body,
            direction,
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Cell {
        self.head
    }

    /// Return the positions of the cells behind the head, nearest first
    pub(crate) fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    /// Iterate over all of the snake's cells, head first
    pub(crate) fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Return the glyph to use for drawing the snake's head
    pub(crate) fn head_symbol(&self) -> char {
        match self.direction {
            Direction::North => consts::SNAKE_HEAD_NORTH_SYMBOL,
            Direction::South => consts::SNAKE_HEAD_SOUTH_SYMBOL,
            Direction::East => consts::SNAKE_HEAD_EAST_SYMBOL,
            Direction::West => consts::SNAKE_HEAD_WEST_SYMBOL,
        }
    }

    /// Change the snake's direction to `direction`
    pub(super) fn turn(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Return `true` if moving the head to `cell` would run into the snake.
    /// When `growing` is false the tail is about to move out of the way, so
    /// its current cell does not count.
    pub(super) fn would_collide(&self, cell: Cell, growing: bool) -> bool {
        let checked = if growing {
            self.len()
        } else {
            self.len() - 1
        };
        self.cells().take(checked).any(|c| c == cell)
    }

    /// Move the head to `cell`.  Unless `grow` is true, the tail moves up
    /// behind it so that the length stays the same.
    pub(super) fn advance(&mut self, cell: Cell, grow: bool) {
        self.body.push_front(self.head);
        self.head = cell;
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    pub(super) fn occupied(&self) -> HashSet<Cell> {
        self.cells().collect()
    }
}

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Initial body length, head included.
pub const DEFAULT_SNAKE_SIZE: i32 = 3;

/// How many recent movements the spawn manager remembers.
pub const SPAWN_WINDOW_SIZE: usize = 8;

/// A board cell. Signed so that a head crossing a wall is representable
/// for the collision check that follows the move.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (row_delta, col_delta) = direction.delta();
        Self::new(self.row + row_delta, self.col + col_delta)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// `(row, col)` unit vector; rows grow downward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// The direction of the vector from `from` to `to`. `Ok(None)` for
    /// coincident points; `InvalidGeometry` when the pair is not on a
    /// shared row or column.
    pub fn between(from: Point, to: Point) -> Result<Option<Direction>, GameError> {
        if from == to {
            return Ok(None);
        }
        if from.row == to.row {
            if to.col < from.col {
                Ok(Some(Direction::Left))
            } else {
                Ok(Some(Direction::Right))
            }
        } else if from.col == to.col {
            if to.row < from.row {
                Ok(Some(Direction::Up))
            } else {
                Ok(Some(Direction::Down))
            }
        } else {
            Err(GameError::InvalidGeometry {
                from: (from.row, from.col),
                to: (to.row, to.col),
            })
        }
    }
}

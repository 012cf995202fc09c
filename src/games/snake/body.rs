use std::collections::HashSet;

use crate::error::GameError;

use super::types::{Direction, Point};

/// Joint-list representation of the snake. `joints` are the points where
/// the body changes direction, ordered nearest-to-head first; the last
/// joint is the tail. The head itself is not a joint. Consecutive entries
/// (head included) are connected by straight horizontal or vertical runs;
/// a zero-length run only exists transiently during a move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeBody {
    pub head: Point,
    pub joints: Vec<Point>,
}

impl SnakeBody {
    pub fn new(head: Point, tail: Point) -> Self {
        Self {
            head,
            joints: vec![tail],
        }
    }

    fn tail(&self) -> Point {
        *self
            .joints
            .last()
            .expect("snake body always has a tail joint")
    }

    /// Every grid cell the body covers, computed by walking the straight
    /// segments from head through each joint.
    pub fn enumerate_squares(&self, include_head: bool) -> Result<HashSet<Point>, GameError> {
        let mut squares = HashSet::new();
        if include_head {
            squares.insert(self.head);
        }

        let mut origin = self.head;
        for &joint in &self.joints {
            if let Some(direction) = Direction::between(origin, joint)? {
                let mut square = origin.step(direction);
                squares.insert(square);
                while square != joint {
                    square = square.step(direction);
                    squares.insert(square);
                }
            }
            origin = joint;
        }

        Ok(squares)
    }

    /// Extends the tail by one cell along its current trailing direction.
    pub fn grow(&mut self) -> Result<(), GameError> {
        let tail = self.tail();
        let before_tail = if self.joints.len() == 1 {
            self.head
        } else {
            self.joints[self.joints.len() - 2]
        };

        let direction =
            Direction::between(before_tail, tail)?.ok_or(GameError::InvalidGeometry {
                from: (before_tail.row, before_tail.col),
                to: (tail.row, tail.col),
            })?;

        let last = self.joints.len() - 1;
        self.joints[last] = tail.step(direction);
        Ok(())
    }

    /// The direction the snake is facing: from the nearest joint to the
    /// head. `Ok(None)` when the two transiently coincide (right after an
    /// undo move).
    pub fn orientation(&self) -> Result<Option<Direction>, GameError> {
        let nearest = *self
            .joints
            .first()
            .expect("snake body always has a tail joint");
        Direction::between(nearest, self.head)
    }
}

use std::collections::HashSet;

use crate::error::GameError;

/// A rectangular grid that only answers structural questions (bounds and
/// adjacency). Games keep their own typed backing arrays indexed by the
/// same `(row, col)` coordinates.
#[derive(Clone, Debug)]
pub struct QuadraticGrid {
    width: usize,
    height: usize,
    hv_neighbors: bool,
    diag_neighbors: bool,
}

impl QuadraticGrid {
    /// Grid with both orthogonal and diagonal adjacency enabled.
    pub fn new(width: usize, height: usize) -> Result<Self, GameError> {
        Self::with_neighbor_modes(width, height, true, true)
    }

    pub fn with_neighbor_modes(
        width: usize,
        height: usize,
        hv_neighbors: bool,
        diag_neighbors: bool,
    ) -> Result<Self, GameError> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidDimension {
                width,
                height,
                reason: "grid dimensions must be positive",
            });
        }

        Ok(Self {
            width,
            height,
            hv_neighbors,
            diag_neighbors,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    // Boundary moves saturate instead of wrapping; a saturated index equals
    // the original one and is filtered out by the callers below.
    fn incr(index: usize, dimension_length: usize) -> usize {
        if index + 1 >= dimension_length {
            index
        } else {
            index + 1
        }
    }

    fn decr(index: usize) -> usize {
        index.saturating_sub(1)
    }

    /// All cells adjacent to `(row, col)` under the grid's neighbor modes.
    pub fn adjacent(
        &self,
        row: usize,
        col: usize,
    ) -> Result<HashSet<(usize, usize)>, GameError> {
        if !self.contains(row, col) {
            return Err(GameError::OutOfBounds { row, col });
        }

        let mut adjacent = HashSet::new();

        if self.hv_neighbors {
            for r in [Self::decr(row), Self::incr(row, self.height)] {
                if r != row {
                    adjacent.insert((r, col));
                }
            }
            for c in [Self::decr(col), Self::incr(col, self.width)] {
                if c != col {
                    adjacent.insert((row, c));
                }
            }
        }

        if self.diag_neighbors {
            for r in [Self::decr(row), Self::incr(row, self.height)] {
                for c in [Self::decr(col), Self::incr(col, self.width)] {
                    if r != row && c != col {
                        adjacent.insert((r, c));
                    }
                }
            }
        }

        Ok(adjacent)
    }
}

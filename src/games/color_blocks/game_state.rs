use std::collections::HashSet;

use crate::error::GameError;
use crate::games::grid::QuadraticGrid;
use crate::games::session_rng::SessionRng;
use crate::log;

use super::types::{Block, DEFAULT_PALETTE_SIZE, MIN_FIELD_DIMENSION};

/// The Color Blocks board: a grid of colored blocks where clicking a block
/// clears the whole same-colored 4-connected group. Gravity (`falldown`)
/// and column compaction (`collapse`) are separate operations so the caller
/// can animate the intermediate states.
///
/// The model owns the cumulative score; `toggle` additionally returns the
/// points gained by that single call so callers can display them, but they
/// never write the score back.
pub struct ColorBlocksGameState {
    grid: QuadraticGrid,
    cells: Vec<Block>,
    palette_size: u8,
    min_group_size: usize,
    score: u32,
}

impl ColorBlocksGameState {
    pub fn new(
        width: usize,
        height: usize,
        min_group_size: usize,
        rng: &mut SessionRng,
    ) -> Result<Self, GameError> {
        Self::with_palette_size(width, height, min_group_size, DEFAULT_PALETTE_SIZE, rng)
    }

    pub fn with_palette_size(
        width: usize,
        height: usize,
        min_group_size: usize,
        palette_size: u8,
        rng: &mut SessionRng,
    ) -> Result<Self, GameError> {
        if width < MIN_FIELD_DIMENSION || height < MIN_FIELD_DIMENSION {
            return Err(GameError::InvalidDimension {
                width,
                height,
                reason: "color blocks board must be at least 3x3",
            });
        }
        if palette_size == 0 {
            return Err(GameError::InvalidDimension {
                width,
                height,
                reason: "palette must contain at least one color",
            });
        }

        // Diagonal matches never count, so the grid only answers
        // orthogonal adjacency.
        let grid = QuadraticGrid::with_neighbor_modes(width, height, true, false)?;

        let mut state = Self {
            grid,
            cells: vec![Block::Untaken; width * height],
            palette_size,
            min_group_size,
            score: 0,
        };
        state.populate(rng);
        Ok(state)
    }

    fn populate(&mut self, rng: &mut SessionRng) {
        for cell in &mut self.cells {
            *cell = Block::Color(rng.random_range(0..self.palette_size));
        }
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.grid.width() + col
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn min_group_size(&self) -> usize {
        self.min_group_size
    }

    pub fn block(&self, row: usize, col: usize) -> Option<Block> {
        if !self.grid.contains(row, col) {
            return None;
        }
        Some(self.cells[self.index(row, col)])
    }

    pub fn cells(&self) -> &[Block] {
        &self.cells
    }

    /// Clears the same-colored group containing `(row, col)` if it is at
    /// least `min_group_size` blocks large. Returns the points gained
    /// (the group size), or 0 if nothing was cleared.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<u32, GameError> {
        if !self.grid.contains(row, col) {
            return Err(GameError::OutOfBounds { row, col });
        }

        let target = self.cells[self.index(row, col)];
        if target == Block::Untaken {
            return Ok(0);
        }

        // Iterative flood fill; recursion depth would otherwise scale with
        // the group size.
        let mut group = HashSet::new();
        let mut stack = vec![(row, col)];
        group.insert((row, col));

        while let Some((r, c)) = stack.pop() {
            for &(ar, ac) in &self.grid.adjacent(r, c)? {
                if self.cells[self.index(ar, ac)] == target && group.insert((ar, ac)) {
                    stack.push((ar, ac));
                }
            }
        }

        if group.len() < self.min_group_size {
            return Ok(0);
        }

        for &(r, c) in &group {
            let index = self.index(r, c);
            self.cells[index] = Block::Untaken;
        }

        let points = group.len() as u32;
        self.score += points;
        log!(
            "Cleared {} blocks at ({}, {}). Score: {}",
            points,
            row,
            col,
            self.score
        );
        Ok(points)
    }

    /// Lets blocks fall into the untaken gaps beneath them, column by
    /// column. A block never crosses into an adjacent column.
    pub fn falldown(&mut self) {
        let width = self.width();
        let height = self.height();

        for col in 0..width {
            let taken: Vec<Block> = (0..height)
                .map(|row| self.cells[row * width + col])
                .filter(Block::is_taken)
                .collect();
            let gap = height - taken.len();

            for row in 0..gap {
                self.cells[row * width + col] = Block::Untaken;
            }
            for (offset, block) in taken.iter().enumerate() {
                self.cells[(gap + offset) * width + col] = *block;
            }
        }
    }

    /// Left-shifts columns over fully-untaken ones, preserving column
    /// order, and backfills the freed rightmost columns.
    pub fn collapse(&mut self) {
        let width = self.width();
        let height = self.height();

        let occupied: Vec<usize> = (0..width)
            .filter(|&col| (0..height).any(|row| self.cells[row * width + col].is_taken()))
            .collect();

        let mut shifted = vec![Block::Untaken; self.cells.len()];
        for (new_col, &old_col) in occupied.iter().enumerate() {
            for row in 0..height {
                shifted[row * width + new_col] = self.cells[row * width + old_col];
            }
        }
        self.cells = shifted;
    }

    /// Re-randomizes the board in place at the same dimensions and resets
    /// the score.
    pub fn new_game(&mut self, rng: &mut SessionRng) {
        self.populate(rng);
        self.score = 0;
        log!("New color blocks game ({}x{})", self.width(), self.height());
    }

    #[cfg(test)]
    pub(crate) fn set_cells(&mut self, cells: Vec<Block>) {
        assert_eq!(cells.len(), self.cells.len());
        self.cells = cells;
    }
}

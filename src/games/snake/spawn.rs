use std::collections::{HashMap, HashSet};

use ringbuffer::{AllocRingBuffer, RingBuffer};

use crate::error::GameError;
use crate::games::session_rng::SessionRng;

use super::body::SnakeBody;
use super::types::{Direction, Point, SPAWN_WINDOW_SIZE};

const RANDOM_SPAWN_ATTEMPTS: usize = 100;

/// Per-direction counts over the most recent movements. The oldest entry
/// is evicted FIFO once the window is full.
#[derive(Debug)]
struct WindowedCount {
    counts: HashMap<Direction, u32>,
    window: AllocRingBuffer<Direction>,
}

impl WindowedCount {
    fn new(window_size: usize) -> Self {
        Self {
            counts: HashMap::new(),
            window: AllocRingBuffer::new(window_size),
        }
    }

    fn incr(&mut self, direction: Direction) {
        if self.window.is_full()
            && let Some(oldest) = self.window.dequeue()
            && let Some(count) = self.counts.get_mut(&oldest)
        {
            *count = count.saturating_sub(1);
        }

        let _ = self.window.enqueue(direction);
        *self.counts.entry(direction).or_insert(0) += 1;
    }

    fn count(&self, direction: Direction) -> u32 {
        self.counts.get(&direction).copied().unwrap_or(0)
    }
}

/// Chooses where food appears. Movement statistics bias the spawn toward
/// the directions the snake visits least, so food tends to land away from
/// its well-worn paths.
#[derive(Debug)]
pub struct SpawnManager {
    grid_width: i32,
    grid_height: i32,
    global_counts: HashMap<Direction, u32>,
    window_counts: WindowedCount,
}

impl SpawnManager {
    pub fn new(grid_width: i32, grid_height: i32) -> Self {
        Self::with_window_size(grid_width, grid_height, SPAWN_WINDOW_SIZE)
    }

    pub fn with_window_size(grid_width: i32, grid_height: i32, window_size: usize) -> Self {
        Self {
            grid_width,
            grid_height,
            global_counts: HashMap::new(),
            window_counts: WindowedCount::new(window_size),
        }
    }

    pub fn note_movement(&mut self, direction: Direction) {
        self.window_counts.incr(direction);
        *self.global_counts.entry(direction).or_insert(0) += 1;
    }

    /// Lifetime count of moves in `direction`.
    pub fn lifetime_count(&self, direction: Direction) -> u32 {
        self.global_counts.get(&direction).copied().unwrap_or(0)
    }

    /// Count of moves in `direction` within the recency window.
    pub fn recent_count(&self, direction: Direction) -> u32 {
        self.window_counts.count(direction)
    }

    fn contains(&self, point: Point) -> bool {
        point.row >= 0
            && point.row < self.grid_height
            && point.col >= 0
            && point.col < self.grid_width
    }

    fn wall_limited(&self, head: Point, direction: Direction) -> bool {
        match direction {
            Direction::Up => head.row == 0,
            Direction::Down => head.row == self.grid_height - 1,
            Direction::Left => head.col == 0,
            Direction::Right => head.col == self.grid_width - 1,
        }
    }

    fn random_free_cell(
        &self,
        occupied: &HashSet<Point>,
        rng: &mut SessionRng,
    ) -> Option<Point> {
        for _ in 0..RANDOM_SPAWN_ATTEMPTS {
            let point = Point::new(
                rng.random_range(0..self.grid_height),
                rng.random_range(0..self.grid_width),
            );
            if !occupied.contains(&point) {
                return Some(point);
            }
        }

        // Dense board: fall back to an exhaustive scan so the search
        // always terminates.
        for row in 0..self.grid_height {
            for col in 0..self.grid_width {
                let point = Point::new(row, col);
                if !occupied.contains(&point) {
                    return Some(point);
                }
            }
        }

        None
    }

    /// The next food cell: in bounds, never on the snake, `None` only when
    /// the board has no free cell left.
    ///
    /// Until two distinct directions have been recorded there is nothing to
    /// rank, so the spawn is uniformly random. Afterwards one of the two
    /// least-traveled directions is picked and the spawn walks from the
    /// head that way until it leaves the snake's footprint.
    pub fn get_spawn(
        &self,
        snake: &SnakeBody,
        rng: &mut SessionRng,
    ) -> Result<Option<Point>, GameError> {
        let occupied = snake.enumerate_squares(true)?;

        if self.global_counts.len() < 2 {
            return Ok(self.random_free_cell(&occupied, rng));
        }

        let mut ranked: Vec<(u32, Direction)> = self
            .global_counts
            .iter()
            .map(|(&direction, &count)| (count, direction))
            .collect();
        // Count first, direction second: ties must not depend on hash order.
        ranked.sort();

        let candidates = [ranked[0].1, ranked[1].1];
        let mut chosen = candidates[rng.random_range(0..2usize)];

        if self.wall_limited(snake.head, chosen) {
            chosen = if chosen == candidates[0] {
                candidates[1]
            } else {
                candidates[0]
            };
            if self.wall_limited(snake.head, chosen) {
                return Ok(self.random_free_cell(&occupied, rng));
            }
        }

        let mut food = snake.head;
        while occupied.contains(&food) {
            food = food.step(chosen);
            if !self.contains(food) {
                return Ok(self.random_free_cell(&occupied, rng));
            }
        }

        Ok(Some(food))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_snake() -> SnakeBody {
        SnakeBody::new(Point::new(5, 5), Point::new(5, 2))
    }

    #[test]
    fn test_windowed_count_evicts_oldest() {
        let mut counts = WindowedCount::new(3);
        counts.incr(Direction::Up);
        counts.incr(Direction::Up);
        counts.incr(Direction::Left);
        assert_eq!(counts.count(Direction::Up), 2);
        assert_eq!(counts.count(Direction::Left), 1);

        // Window is full; the first Up falls out.
        counts.incr(Direction::Right);
        assert_eq!(counts.count(Direction::Up), 1);
        assert_eq!(counts.count(Direction::Left), 1);
        assert_eq!(counts.count(Direction::Right), 1);
    }

    #[test]
    fn test_note_movement_updates_both_counters() {
        let mut manager = SpawnManager::with_window_size(10, 10, 2);
        manager.note_movement(Direction::Up);
        manager.note_movement(Direction::Up);
        manager.note_movement(Direction::Up);

        assert_eq!(manager.lifetime_count(Direction::Up), 3);
        assert_eq!(manager.recent_count(Direction::Up), 2);
    }

    #[test]
    fn test_spawn_without_statistics_is_free_and_in_bounds() {
        let manager = SpawnManager::new(10, 10);
        let snake = straight_snake();
        let occupied = snake.enumerate_squares(true).unwrap();
        let mut rng = SessionRng::new(42);

        for _ in 0..100 {
            let food = manager.get_spawn(&snake, &mut rng).unwrap().unwrap();
            assert!(!occupied.contains(&food));
            assert!((0..10).contains(&food.row));
            assert!((0..10).contains(&food.col));
        }
    }

    #[test]
    fn test_biased_spawn_avoids_snake_and_stays_in_bounds() {
        let mut manager = SpawnManager::new(10, 10);
        manager.note_movement(Direction::Right);
        manager.note_movement(Direction::Right);
        manager.note_movement(Direction::Up);
        manager.note_movement(Direction::Down);
        manager.note_movement(Direction::Down);

        let snake = straight_snake();
        let occupied = snake.enumerate_squares(true).unwrap();
        let mut rng = SessionRng::new(7);

        for _ in 0..100 {
            let food = manager.get_spawn(&snake, &mut rng).unwrap().unwrap();
            assert!(!occupied.contains(&food));
            assert!((0..10).contains(&food.row));
            assert!((0..10).contains(&food.col));
        }
    }

    #[test]
    fn test_biased_spawn_walks_least_traveled_direction() {
        let mut manager = SpawnManager::new(10, 10);
        // Left and Up are the two least-traveled directions.
        for _ in 0..5 {
            manager.note_movement(Direction::Right);
        }
        for _ in 0..4 {
            manager.note_movement(Direction::Down);
        }
        manager.note_movement(Direction::Left);
        manager.note_movement(Direction::Up);

        let snake = straight_snake();
        let mut rng = SessionRng::new(3);

        for _ in 0..50 {
            let food = manager.get_spawn(&snake, &mut rng).unwrap().unwrap();
            // Walking Up or Left from the head leaves the body after one
            // step: directly above the head, or just past the tail.
            assert!(
                food == Point::new(4, 5) || food == Point::new(5, 1),
                "unexpected spawn {:?}",
                food
            );
        }
    }

    #[test]
    fn test_wall_limited_direction_falls_back_to_other_candidate() {
        let mut manager = SpawnManager::new(10, 10);
        for _ in 0..5 {
            manager.note_movement(Direction::Right);
        }
        for _ in 0..4 {
            manager.note_movement(Direction::Down);
        }
        manager.note_movement(Direction::Left);
        manager.note_movement(Direction::Up);

        // Head against the top wall: Up is limited, Left must be used.
        let snake = SnakeBody::new(Point::new(0, 5), Point::new(0, 8));
        let mut rng = SessionRng::new(11);

        for _ in 0..50 {
            let food = manager.get_spawn(&snake, &mut rng).unwrap().unwrap();
            assert_eq!(food, Point::new(0, 4));
        }
    }

    #[test]
    fn test_spawn_on_full_board_returns_none() {
        let manager = SpawnManager::new(3, 1);
        // A body covering the entire 3x1 board.
        let snake = SnakeBody::new(Point::new(0, 0), Point::new(0, 2));
        let mut rng = SessionRng::new(5);

        assert_eq!(manager.get_spawn(&snake, &mut rng).unwrap(), None);
    }
}

use crate::error::GameError;
use crate::games::session_rng::SessionRng;
use crate::log;

use super::body::SnakeBody;
use super::spawn::SpawnManager;
use super::types::{Direction, Point, DEFAULT_SNAKE_SIZE};

/// What a call to [`SnakeGameState::move_snake`] did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    /// The game is already over; nothing happened.
    Ignored,
    Moved { ate_food: bool },
}

/// Single-snake game model. One external loop owns the state, calls
/// `move_snake` per input/tick and reads the public accessors to draw;
/// the model never renders anything itself.
pub struct SnakeGameState {
    width: i32,
    height: i32,
    snake: SnakeBody,
    food_point: Option<Point>,
    spawn_manager: SpawnManager,
    last_move_reversible: bool,
    last_tail: Option<Point>,
    endgame: bool,
}

impl SnakeGameState {
    pub fn new(width: usize, height: usize, rng: &mut SessionRng) -> Result<Self, GameError> {
        let snake_size = DEFAULT_SNAKE_SIZE as usize;
        if width < snake_size + 1 || height < snake_size {
            return Err(GameError::InvalidDimension {
                width,
                height,
                reason: "not enough room for the snake to move",
            });
        }

        let width = width as i32;
        let height = height as i32;

        let head = Point::new(height / 2, width / 2);
        let tail = Point::new(head.row, head.col - DEFAULT_SNAKE_SIZE);
        let snake = SnakeBody::new(head, tail);
        let spawn_manager = SpawnManager::new(width, height);
        let food_point = spawn_manager.get_spawn(&snake, rng)?;

        Ok(Self {
            width,
            height,
            snake,
            food_point,
            spawn_manager,
            last_move_reversible: false,
            last_tail: None,
            endgame: false,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn snake(&self) -> &SnakeBody {
        &self.snake
    }

    pub fn snake_head(&self) -> Point {
        self.snake.head
    }

    pub fn snake_joints(&self) -> &[Point] {
        &self.snake.joints
    }

    pub fn food_point(&self) -> Option<Point> {
        self.food_point
    }

    pub fn is_endgame(&self) -> bool {
        self.endgame
    }

    pub fn spawn_manager(&self) -> &SpawnManager {
        &self.spawn_manager
    }

    /// Replaces the whole session: snake back at the center, fresh food,
    /// movement statistics cleared.
    pub fn new_game(&mut self, rng: &mut SessionRng) -> Result<(), GameError> {
        *self = Self::new(self.width as usize, self.height as usize, rng)?;
        log!("New snake game ({}x{})", self.width, self.height);
        Ok(())
    }

    /// Advances the snake one cell.
    ///
    /// A 180° turn is rejected with `IllegalReversal` unless the previous
    /// call was flagged `reversible`; in that case the reversal is an undo
    /// that restores the previous tail instead of a forbidden U-turn. The
    /// `reversible` flag passed here is consulted by the *next* call.
    pub fn move_snake(
        &mut self,
        direction: Direction,
        reversible: bool,
        rng: &mut SessionRng,
    ) -> Result<MoveOutcome, GameError> {
        if self.endgame {
            return Ok(MoveOutcome::Ignored);
        }

        // After an undo the head transiently sits on the nearest joint and
        // has no orientation; no input counts as a reversal then.
        let inverse = self.snake.orientation()?.map(Direction::opposite);
        let is_reversal = inverse == Some(direction);

        if is_reversal && !self.last_move_reversible {
            return Err(GameError::IllegalReversal);
        }

        if is_reversal {
            if let Some(last_tail) = self.last_tail {
                self.snake.joints.push(last_tail);
            }
        } else {
            self.snake.joints.insert(0, self.snake.head);
        }

        self.snake.head = self.snake.head.step(direction);
        self.spawn_manager.note_movement(direction);

        let mut ate_food = false;
        if self.food_point == Some(self.snake.head) {
            self.snake.grow()?;
            ate_food = true;
            self.food_point = self.spawn_manager.get_spawn(&self.snake, rng)?;
            log!(
                "Snake ate food at ({}, {}); next food {:?}",
                self.snake.head.row,
                self.snake.head.col,
                self.food_point
            );
        }

        self.last_tail = Some(
            *self
                .snake
                .joints
                .last()
                .expect("snake body always has a tail joint"),
        );

        if !is_reversal {
            // Pull the tail in by one cell so the body length is unchanged.
            let joint_count = self.snake.joints.len();
            let tail = self.snake.joints[joint_count - 1];
            let toward = if joint_count >= 2 {
                self.snake.joints[joint_count - 2]
            } else {
                self.snake.head
            };
            if let Some(trailing) = Direction::between(tail, toward)? {
                self.snake.joints[joint_count - 1] = tail.step(trailing);
            }
        }

        // Straight-line simplification: a tail joint that caught up with
        // the joint before it carries no information.
        let joint_count = self.snake.joints.len();
        if joint_count >= 2
            && self.snake.joints[joint_count - 1] == self.snake.joints[joint_count - 2]
        {
            self.snake.joints.pop();
        }

        self.last_move_reversible = reversible;
        self.endgame = self.collides_with_walls() || self.collides_with_self()?;

        Ok(MoveOutcome::Moved { ate_food })
    }

    fn collides_with_walls(&self) -> bool {
        let head = self.snake.head;
        head.row < 0 || head.row >= self.height || head.col < 0 || head.col >= self.width
    }

    fn collides_with_self(&self) -> Result<bool, GameError> {
        Ok(self
            .snake
            .enumerate_squares(false)?
            .contains(&self.snake.head))
    }

    #[cfg(test)]
    pub(crate) fn set_food_point(&mut self, food_point: Option<Point>) {
        self.food_point = food_point;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_state() -> (SnakeGameState, SessionRng) {
        let mut rng = SessionRng::new(42);
        let state = SnakeGameState::new(10, 10, &mut rng).unwrap();
        (state, rng)
    }

    #[test]
    fn test_initial_layout() {
        let (state, _) = create_state();
        let head = state.snake_head();
        assert_eq!(head, Point::new(5, 5));
        assert_eq!(state.snake_joints(), &[Point::new(5, 2)]);
        assert!(state.food_point().is_some());
        assert!(!state.is_endgame());
    }

    #[test]
    fn test_initial_food_not_on_snake() {
        for seed in 0..50 {
            let mut rng = SessionRng::new(seed);
            let state = SnakeGameState::new(10, 10, &mut rng).unwrap();
            let occupied = state.snake().enumerate_squares(true).unwrap();
            assert!(!occupied.contains(&state.food_point().unwrap()));
        }
    }

    #[test]
    fn test_constructor_rejects_cramped_boards() {
        let mut rng = SessionRng::new(42);
        let size = DEFAULT_SNAKE_SIZE as usize;
        assert!(matches!(
            SnakeGameState::new(0, 0, &mut rng),
            Err(GameError::InvalidDimension { .. })
        ));
        assert!(matches!(
            SnakeGameState::new(size, size, &mut rng),
            Err(GameError::InvalidDimension { .. })
        ));
        assert!(matches!(
            SnakeGameState::new(size - 1, size - 1, &mut rng),
            Err(GameError::InvalidDimension { .. })
        ));
        assert!(SnakeGameState::new(size + 1, size, &mut rng).is_ok());
    }

    #[test]
    fn test_moves_update_head() {
        let (mut state, mut rng) = create_state();
        state.set_food_point(None);

        let head = state.snake_head();
        state.move_snake(Direction::Up, false, &mut rng).unwrap();
        assert_eq!(state.snake_head(), Point::new(head.row - 1, head.col));
        assert!(state.snake_joints().contains(&head));

        let head = state.snake_head();
        state.move_snake(Direction::Right, false, &mut rng).unwrap();
        assert_eq!(state.snake_head(), Point::new(head.row, head.col + 1));

        let head = state.snake_head();
        state.move_snake(Direction::Up, false, &mut rng).unwrap();
        assert_eq!(state.snake_head(), Point::new(head.row - 1, head.col));

        let head = state.snake_head();
        state.move_snake(Direction::Left, false, &mut rng).unwrap();
        assert_eq!(state.snake_head(), Point::new(head.row, head.col - 1));
    }

    #[test]
    fn test_straight_run_advances_tail() {
        let (mut state, mut rng) = create_state();
        state.set_food_point(None);

        let tail = *state.snake_joints().last().unwrap();
        state.move_snake(Direction::Right, false, &mut rng).unwrap();
        assert_eq!(
            *state.snake_joints().last().unwrap(),
            Point::new(tail.row, tail.col + 1)
        );

        let tail = *state.snake_joints().last().unwrap();
        state.move_snake(Direction::Right, false, &mut rng).unwrap();
        assert_eq!(
            *state.snake_joints().last().unwrap(),
            Point::new(tail.row, tail.col + 1)
        );
        // Redundant collinear joints persist until the tail catches up,
        // so the joint list never exceeds the body length.
        assert!(state.snake_joints().len() <= DEFAULT_SNAKE_SIZE as usize);
    }

    #[test]
    fn test_turn_creates_joint_and_keeps_length() {
        let (mut state, mut rng) = create_state();
        state.set_food_point(None);

        let old_tail = *state.snake_joints().last().unwrap();
        state.move_snake(Direction::Up, false, &mut rng).unwrap();

        assert_eq!(state.snake_joints().len(), 2);
        assert_eq!(
            *state.snake_joints().last().unwrap(),
            Point::new(old_tail.row, old_tail.col + 1)
        );
        assert_eq!(
            state.snake().enumerate_squares(true).unwrap().len(),
            DEFAULT_SNAKE_SIZE as usize + 1
        );
    }

    #[test]
    fn test_no_180_turn() {
        let (mut state, mut rng) = create_state();
        let head = state.snake_head();
        let joints = state.snake_joints().to_vec();

        // Facing right; a fresh left input must be rejected untouched.
        let result = state.move_snake(Direction::Left, false, &mut rng);
        assert_eq!(result, Err(GameError::IllegalReversal));
        assert_eq!(state.snake_head(), head);
        assert_eq!(state.snake_joints(), joints.as_slice());
        assert!(!state.is_endgame());
    }

    #[test]
    fn test_reversible_move_allows_undo() {
        let (mut state, mut rng) = create_state();
        state.set_food_point(None);

        let original_head = state.snake_head();
        let original_squares = state.snake().enumerate_squares(true).unwrap();

        state.move_snake(Direction::Right, true, &mut rng).unwrap();
        state.move_snake(Direction::Left, false, &mut rng).unwrap();

        assert_eq!(state.snake_head(), original_head);
        assert_eq!(
            state.snake().enumerate_squares(true).unwrap(),
            original_squares
        );
    }

    #[test]
    fn test_move_after_undo_is_not_a_reversal() {
        let (mut state, mut rng) = create_state();
        state.set_food_point(None);

        state.move_snake(Direction::Right, true, &mut rng).unwrap();
        state.move_snake(Direction::Left, false, &mut rng).unwrap();
        // The head has no orientation right now; any direction is legal.
        let outcome = state.move_snake(Direction::Up, false, &mut rng).unwrap();
        assert_eq!(outcome, MoveOutcome::Moved { ate_food: false });
        assert_eq!(state.snake_head(), Point::new(4, 5));
    }

    #[test]
    fn test_eating_food_grows_snake() {
        let (mut state, mut rng) = create_state();
        let head = state.snake_head();
        state.set_food_point(Some(Point::new(head.row, head.col + 1)));

        let squares_before = state.snake().enumerate_squares(true).unwrap().len();
        let outcome = state.move_snake(Direction::Right, false, &mut rng).unwrap();

        assert_eq!(outcome, MoveOutcome::Moved { ate_food: true });
        assert_eq!(
            state.snake().enumerate_squares(true).unwrap().len(),
            squares_before + 1
        );
        // Food respawned somewhere legal.
        let food = state.food_point().unwrap();
        let occupied = state.snake().enumerate_squares(true).unwrap();
        assert!(!occupied.contains(&food));
    }

    #[test]
    fn test_wall_collision_ends_game() {
        let (mut state, mut rng) = create_state();
        state.set_food_point(None);

        for _ in 0..4 {
            state.move_snake(Direction::Right, false, &mut rng).unwrap();
        }
        assert!(!state.is_endgame());

        // Head at the right edge; one more step crosses the wall.
        state.move_snake(Direction::Right, false, &mut rng).unwrap();
        assert!(state.is_endgame());
    }

    #[test]
    fn test_moves_ignored_after_endgame() {
        let (mut state, mut rng) = create_state();
        state.set_food_point(None);

        for _ in 0..5 {
            state.move_snake(Direction::Right, false, &mut rng).unwrap();
        }
        assert!(state.is_endgame());

        let head = state.snake_head();
        let outcome = state.move_snake(Direction::Up, false, &mut rng).unwrap();
        assert_eq!(outcome, MoveOutcome::Ignored);
        assert_eq!(state.snake_head(), head);
    }

    #[test]
    fn test_self_collision_ends_game() {
        let (mut state, mut rng) = create_state();
        // Grow the snake enough to bite itself on a tight loop.
        let head = state.snake_head();
        state.set_food_point(Some(Point::new(head.row, head.col + 1)));
        state.move_snake(Direction::Right, false, &mut rng).unwrap();
        state.set_food_point(Some(Point::new(head.row - 1, head.col + 1)));
        state.move_snake(Direction::Up, false, &mut rng).unwrap();
        state.set_food_point(None);

        state.move_snake(Direction::Left, false, &mut rng).unwrap();
        assert!(!state.is_endgame());
        state.move_snake(Direction::Down, false, &mut rng).unwrap();
        assert!(state.is_endgame());
    }

    #[test]
    fn test_food_never_on_snake_over_random_games() {
        for seed in 0..100 {
            let mut rng = SessionRng::new(seed);
            let mut state = SnakeGameState::new(10, 10, &mut rng).unwrap();

            for _ in 0..200 {
                if state.is_endgame() {
                    break;
                }
                let direction =
                    Direction::ALL[rng.random_range(0..Direction::ALL.len())];
                match state.move_snake(direction, false, &mut rng) {
                    Ok(_) => {}
                    Err(GameError::IllegalReversal) => continue,
                    Err(other) => panic!("unexpected error: {}", other),
                }

                if let Some(food) = state.food_point() {
                    let occupied = state.snake().enumerate_squares(true).unwrap();
                    assert!(
                        !occupied.contains(&food),
                        "seed {}: food {:?} on snake",
                        seed,
                        food
                    );
                }
            }
        }
    }

    #[test]
    fn test_new_game_resets_session() {
        let (mut state, mut rng) = create_state();
        state.set_food_point(None);
        for _ in 0..5 {
            state.move_snake(Direction::Right, false, &mut rng).unwrap();
        }
        assert!(state.is_endgame());

        state.new_game(&mut rng).unwrap();

        assert!(!state.is_endgame());
        assert_eq!(state.snake_head(), Point::new(5, 5));
        assert_eq!(state.snake_joints(), &[Point::new(5, 2)]);
        assert!(state.food_point().is_some());
    }
}

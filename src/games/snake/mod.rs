mod body;
mod game_state;
mod spawn;
mod types;

pub use body::SnakeBody;
pub use game_state::{MoveOutcome, SnakeGameState};
pub use spawn::SpawnManager;
pub use types::{Direction, Point, DEFAULT_SNAKE_SIZE, SPAWN_WINDOW_SIZE};

mod game_state;
mod types;

pub use game_state::ColorBlocksGameState;
pub use types::{Block, DEFAULT_MIN_GROUP_SIZE, DEFAULT_PALETTE_SIZE, MIN_FIELD_DIMENSION};

pub mod file_io;
pub mod player;
pub mod recorder;

pub use file_io::{
    generate_replay_filename, load_replay, load_replay_from_bytes, save_replay,
    save_replay_to_bytes, ReplayError,
};
pub use player::ReplayPlayer;
pub use recorder::ReplayRecorder;

use serde::{Deserialize, Serialize};

use crate::games::snake::Direction;

pub const REPLAY_FILE_EXTENSION: &str = "gridgamesreplay";
pub const REPLAY_VERSION: u8 = 1;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ReplayGame {
    Snake,
    ColorBlocks,
}

/// One recorded player input. Replaying the commands against a model
/// seeded like the original session reproduces it exactly.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ReplayCommand {
    SnakeTurn { direction: Direction, reversible: bool },
    BlockToggle { row: usize, col: usize },
    NewGame,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ReplayAction {
    pub tick: i64,
    pub command: ReplayCommand,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ReplayMetadata {
    pub version: u8,
    pub engine_version: String,
    pub game_started_timestamp_ms: i64,
    pub game: ReplayGame,
    pub seed: u64,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Replay {
    pub metadata: ReplayMetadata,
    pub actions: Vec<ReplayAction>,
}

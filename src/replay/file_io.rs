use std::io::{Read, Write};
use std::path::Path;

use super::{Replay, ReplayGame, REPLAY_FILE_EXTENSION, REPLAY_VERSION};

#[derive(Debug)]
pub enum ReplayError {
    IoError(std::io::Error),
    DecodeError(serde_json::Error),
    UnsupportedVersion { found: u8, expected: u8 },
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::IoError(e) => write!(f, "IO error: {}", e),
            ReplayError::DecodeError(e) => write!(f, "Decode error: {}", e),
            ReplayError::UnsupportedVersion { found, expected } => {
                write!(
                    f,
                    "Unsupported replay version: found {}, expected {}",
                    found, expected
                )
            }
        }
    }
}

impl std::error::Error for ReplayError {}

impl From<std::io::Error> for ReplayError {
    fn from(e: std::io::Error) -> Self {
        ReplayError::IoError(e)
    }
}

impl From<serde_json::Error> for ReplayError {
    fn from(e: serde_json::Error) -> Self {
        ReplayError::DecodeError(e)
    }
}

pub fn save_replay(path: &Path, replay: &Replay) -> Result<(), ReplayError> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(&save_replay_to_bytes(replay)?)?;
    Ok(())
}

pub fn save_replay_to_bytes(replay: &Replay) -> Result<Vec<u8>, ReplayError> {
    Ok(serde_json::to_vec(replay)?)
}

pub fn load_replay(path: &Path) -> Result<Replay, ReplayError> {
    let mut file = std::fs::File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    load_replay_from_bytes(&buffer)
}

pub fn load_replay_from_bytes(bytes: &[u8]) -> Result<Replay, ReplayError> {
    let replay: Replay = serde_json::from_slice(bytes)?;
    if replay.metadata.version != REPLAY_VERSION {
        return Err(ReplayError::UnsupportedVersion {
            found: replay.metadata.version,
            expected: REPLAY_VERSION,
        });
    }
    Ok(replay)
}

pub fn generate_replay_filename(game: ReplayGame, version: &str) -> String {
    let now = chrono::Local::now();
    let timestamp = now.format("%Y%m%d%H%M%S");

    let game_name = match game {
        ReplayGame::Snake => "SNAKE",
        ReplayGame::ColorBlocks => "COLORBLOCKS",
    };

    let sanitized_version = version.replace('.', "_");

    format!(
        "{}_{}_{}.{}",
        timestamp, game_name, sanitized_version, REPLAY_FILE_EXTENSION
    )
}

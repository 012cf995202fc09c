use chrono::Utc;

use super::{Replay, ReplayAction, ReplayCommand, ReplayGame, ReplayMetadata, REPLAY_VERSION};

/// Collects the inputs of one seeded session so it can be stored and
/// played back later.
pub struct ReplayRecorder {
    engine_version: String,
    game_started_timestamp_ms: i64,
    game: ReplayGame,
    seed: u64,
    actions: Vec<ReplayAction>,
}

impl ReplayRecorder {
    pub fn new(engine_version: String, game: ReplayGame, seed: u64) -> Self {
        Self {
            engine_version,
            game_started_timestamp_ms: Utc::now().timestamp_millis(),
            game,
            seed,
            actions: Vec::new(),
        }
    }

    pub fn record_command(&mut self, tick: i64, command: ReplayCommand) {
        self.actions.push(ReplayAction { tick, command });
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn actions_count(&self) -> usize {
        self.actions.len()
    }

    pub fn finalize(&mut self) -> Replay {
        let mut actions = std::mem::take(&mut self.actions);
        actions.sort_by_key(|action| action.tick);

        Replay {
            metadata: ReplayMetadata {
                version: REPLAY_VERSION,
                engine_version: std::mem::take(&mut self.engine_version),
                game_started_timestamp_ms: self.game_started_timestamp_ms,
                game: self.game,
                seed: self.seed,
            },
            actions,
        }
    }
}

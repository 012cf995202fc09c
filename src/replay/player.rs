use super::{Replay, ReplayAction, ReplayMetadata};

/// Sequential cursor over a recorded session's actions.
pub struct ReplayPlayer {
    replay: Replay,
    cursor: usize,
}

impl ReplayPlayer {
    pub fn new(replay: Replay) -> Self {
        Self { replay, cursor: 0 }
    }

    pub fn metadata(&self) -> &ReplayMetadata {
        &self.replay.metadata
    }

    pub fn seed(&self) -> u64 {
        self.replay.metadata.seed
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.replay.actions.len()
    }

    /// The next action, advancing the cursor.
    pub fn next_action(&mut self) -> Option<ReplayAction> {
        let action = self.replay.actions.get(self.cursor).copied();
        if action.is_some() {
            self.cursor += 1;
        }
        action
    }

    /// All remaining actions recorded for `tick`, advancing the cursor
    /// past them. Assumes actions are tick-sorted (the recorder's
    /// `finalize` guarantees it).
    pub fn actions_for_tick(&mut self, tick: i64) -> Vec<ReplayAction> {
        let mut actions = Vec::new();
        while let Some(action) = self.replay.actions.get(self.cursor) {
            if action.tick != tick {
                break;
            }
            actions.push(*action);
            self.cursor += 1;
        }
        actions
    }
}

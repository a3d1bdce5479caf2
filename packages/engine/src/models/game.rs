use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    Completed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WinnerMode {
    Single,
    Multiple,
}

/// How a wipeout (every active participant eliminated in one round) is undone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RolloverMode {
    /// Revert only the wiped-out round and carry on with the next one.
    Round,
    /// Throw away the whole history and restart at round 1.
    Game,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub postpone_as_win: bool,
    pub winner_mode: WinnerMode,
    pub rollover_mode: RolloverMode,
    /// Only consulted when `winner_mode` is `Multiple`.
    pub max_winners: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            postpone_as_win: true,
            winner_mode: WinnerMode::Single,
            rollover_mode: RolloverMode::Round,
            max_winners: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Game {
    pub id: String,
    pub manager_id: String,
    pub name: String,
    pub group_id: Option<String>,
    pub status: GameStatus,
    pub winners: Vec<String>,
    pub config: GameConfig,
    /// Bumped on every committed change; stale writers are rejected by the store.
    pub version: u64,
    /// Number of game-scope restarts applied so far.
    pub resets: u32,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Game {
    pub fn new(manager_id: &str, name: &str, group_id: Option<String>, config: GameConfig) -> Self {
        Game {
            id: Uuid::new_v4().to_string(),
            manager_id: manager_id.to_string(),
            name: name.to_string(),
            group_id,
            status: GameStatus::Active,
            winners: vec![],
            config,
            version: 1,
            resets: 0,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }

    pub fn complete(&mut self, mut winners: Vec<String>) {
        winners.sort();
        self.status = GameStatus::Completed;
        self.winners = winners;
        self.completed_at = Some(Utc::now());
    }
}

/// Input for `GameService::create_game`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NewGame {
    pub name: String,
    pub group_id: Option<String>,
    #[serde(default)]
    pub config: GameConfig,
    #[serde(default)]
    pub players: Vec<String>,
}

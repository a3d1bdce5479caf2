use serde::{Deserialize, Serialize};

use crate::models::pick::{MatchResult, PickOutcome};
use crate::models::round::RoundStatus;

/// Audit view over committed rounds. Derived on read, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameHistory {
    pub game_id: String,
    pub resets: u32,
    pub rounds: Vec<RoundHistory>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundHistory {
    pub round_number: u32,
    pub status: RoundStatus,
    pub voided: bool,
    pub picks: Vec<PickHistoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PickHistoryEntry {
    pub participant_id: String,
    pub player_name: String,
    pub team_id: String,
    pub team_name: String,
    pub result: Option<MatchResult>,
    pub outcome: Option<PickOutcome>,
    pub auto_assigned: bool,
}

impl RoundHistory {
    pub fn eliminated_players(&self) -> Vec<&str> {
        if self.voided {
            return vec![];
        }
        self.picks
            .iter()
            .filter(|pick| pick.outcome == Some(PickOutcome::Eliminated))
            .map(|pick| pick.player_name.as_str())
            .collect()
    }
}

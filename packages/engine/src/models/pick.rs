use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Real-world result of the fixture a picked team played in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MatchResult {
    Win,
    Loss,
    Draw,
    Postponed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PickOutcome {
    Survived,
    Eliminated,
}

impl MatchResult {
    /// Derives what the result means for the participant who picked the team.
    pub fn outcome(self, postpone_as_win: bool) -> PickOutcome {
        match self {
            MatchResult::Win => PickOutcome::Survived,
            MatchResult::Loss | MatchResult::Draw => PickOutcome::Eliminated,
            MatchResult::Postponed if postpone_as_win => PickOutcome::Survived,
            MatchResult::Postponed => PickOutcome::Eliminated,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pick {
    pub id: String,
    pub game_id: String,
    pub round_id: String,
    pub round_number: u32,
    pub participant_id: String,
    pub team_id: String,
    /// Empty until the round has been resolved.
    pub result: Option<MatchResult>,
    pub auto_assigned: bool,
    pub created_at: DateTime<Utc>,
}

impl Pick {
    pub fn new(
        game_id: &str,
        round_id: &str,
        round_number: u32,
        participant_id: &str,
        team_id: &str,
        auto_assigned: bool,
    ) -> Self {
        Pick {
            id: Uuid::new_v4().to_string(),
            game_id: game_id.to_string(),
            round_id: round_id.to_string(),
            round_number,
            participant_id: participant_id.to_string(),
            team_id: team_id.to_string(),
            result: None,
            auto_assigned,
            created_at: Utc::now(),
        }
    }
}

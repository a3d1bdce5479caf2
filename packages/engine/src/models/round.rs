use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Round {
    pub id: String,
    pub game_id: String,
    pub round_number: u32,
    pub status: RoundStatus,
    /// Set when a wipeout was rolled back at round scope. The round stays
    /// closed and its picks stay on record, but it eliminated nobody.
    pub voided: bool,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl Round {
    pub fn open(game_id: &str, round_number: u32) -> Self {
        Round {
            id: Uuid::new_v4().to_string(),
            game_id: game_id.to_string(),
            round_number,
            status: RoundStatus::Open,
            voided: false,
            opened_at: Utc::now(),
            closed_at: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == RoundStatus::Open
    }

    pub fn close(&mut self) {
        self.status = RoundStatus::Closed;
        self.closed_at = Some(Utc::now());
    }
}

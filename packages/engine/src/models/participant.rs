use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Participant {
    pub id: String,
    pub game_id: String,
    pub player_name: String,
    pub is_active: bool,
    pub eliminated_in_round: Option<u32>,
}

impl Participant {
    pub fn new(game_id: &str, player_name: &str) -> Self {
        Participant {
            id: Uuid::new_v4().to_string(),
            game_id: game_id.to_string(),
            player_name: player_name.to_string(),
            is_active: true,
            eliminated_in_round: None,
        }
    }

    pub fn eliminate(&mut self, round_number: u32) {
        if self.is_active {
            self.is_active = false;
            self.eliminated_in_round = Some(round_number);
        }
    }

    pub fn reinstate(&mut self) {
        self.is_active = true;
        self.eliminated_in_round = None;
    }
}

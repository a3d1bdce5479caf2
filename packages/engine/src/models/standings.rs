use serde::{Deserialize, Serialize};

use crate::models::participant::Participant;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EliminatedParticipant {
    pub participant: Participant,
    pub round_number: u32,
}

/// Read-only projection of a game's participants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Standings {
    pub game_id: String,
    pub active: Vec<Participant>,
    /// Most recently eliminated first.
    pub eliminated: Vec<EliminatedParticipant>,
    pub winners: Vec<String>,
}

impl Standings {
    pub fn from_participants(game_id: &str, participants: &[Participant], winners: &[String]) -> Self {
        let mut active: Vec<Participant> = participants
            .iter()
            .filter(|participant| participant.is_active)
            .cloned()
            .collect();
        active.sort_by(|a, b| a.player_name.cmp(&b.player_name));

        let mut eliminated: Vec<EliminatedParticipant> = participants
            .iter()
            .filter_map(|participant| {
                participant
                    .eliminated_in_round
                    .filter(|_| !participant.is_active)
                    .map(|round_number| EliminatedParticipant {
                        participant: participant.clone(),
                        round_number,
                    })
            })
            .collect();
        eliminated.sort_by(|a, b| {
            b.round_number
                .cmp(&a.round_number)
                .then_with(|| a.participant.player_name.cmp(&b.participant.player_name))
        });

        Standings {
            game_id: game_id.to_string(),
            active,
            eliminated,
            winners: winners.to_vec(),
        }
    }
}

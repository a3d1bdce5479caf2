use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{
    game::RolloverMode,
    pick::{MatchResult, PickOutcome},
    round::Round,
};
use crate::repositories::game_repository::GameSnapshot;
use crate::services::errors::game_service_errors::GameServiceError;
use crate::services::{rollover, termination};

/// What a resolved round did to the game. Exactly one applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Advanced { next_round: u32 },
    RolledBack { voided_round: u32, next_round: u32 },
    GameReset,
    Completed { winners: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResolution {
    pub game_id: String,
    pub round_number: u32,
    /// Participant ids knocked out by the round's results, before any rollback.
    pub eliminated: Vec<String>,
    pub outcome: RoundOutcome,
}

struct ScoredPick {
    pick_id: String,
    participant_id: String,
    result: MatchResult,
}

/// Resolves `round_number` against the per-team `results`, mutating the
/// snapshot in place. All checks run before the first write, so on error the
/// snapshot is untouched.
pub fn resolve_round(
    snapshot: &mut GameSnapshot,
    round_number: u32,
    results: &HashMap<String, MatchResult>,
) -> Result<RoundResolution, GameServiceError> {
    let game_id = snapshot.game.id.clone();

    if !snapshot.game.is_active() {
        return Err(GameServiceError::invalid_state(&game_id, "game is completed"));
    }

    let round = snapshot
        .rounds
        .iter()
        .find(|round| round.round_number == round_number)
        .cloned()
        .ok_or_else(|| {
            GameServiceError::NotFound(format!("round {} of game {}", round_number, game_id))
        })?;
    if !round.is_open() {
        return Err(GameServiceError::invalid_state(
            &game_id,
            format!("round {} is not open", round_number),
        ));
    }
    if snapshot.participants.len() < 2 {
        return Err(GameServiceError::invalid_state(
            &game_id,
            "at least two participants are required to resolve a round",
        ));
    }

    if let Some(missing) = snapshot
        .active_participants()
        .find(|participant| snapshot.pick_for(&round.id, &participant.id).is_none())
    {
        return Err(GameServiceError::invalid_state(
            &game_id,
            format!(
                "participant {} has no pick for round {}",
                missing.id, round_number
            ),
        ));
    }

    let mut scored = Vec::new();
    for pick in snapshot.picks_for_round(&round.id) {
        let result = results
            .get(&pick.team_id)
            .copied()
            .ok_or_else(|| GameServiceError::MissingResult {
                game_id: game_id.clone(),
                round_number,
                team_id: pick.team_id.clone(),
            })?;
        scored.push(ScoredPick {
            pick_id: pick.id.clone(),
            participant_id: pick.participant_id.clone(),
            result,
        });
    }

    let postpone_as_win = snapshot.game.config.postpone_as_win;
    let mut eliminated = Vec::new();
    for entry in scored {
        if let Some(pick) = snapshot.picks.iter_mut().find(|pick| pick.id == entry.pick_id) {
            pick.result = Some(entry.result);
        }
        if entry.result.outcome(postpone_as_win) != PickOutcome::Eliminated {
            continue;
        }
        if let Some(participant) = snapshot
            .participants
            .iter_mut()
            .find(|participant| participant.id == entry.participant_id && participant.is_active)
        {
            participant.eliminate(round_number);
            eliminated.push(entry.participant_id);
        }
    }

    if let Some(open) = snapshot.rounds.iter_mut().find(|r| r.id == round.id) {
        open.close();
    }

    let remaining = snapshot.active_participants().count();
    let rollover_mode = snapshot.game.config.rollover_mode;
    let outcome = if remaining == 0 {
        match rollover_mode {
            RolloverMode::Round => RoundOutcome::RolledBack {
                voided_round: round_number,
                next_round: rollover::revert_round(snapshot, round_number, &eliminated),
            },
            RolloverMode::Game => {
                rollover::reset_game(snapshot);
                RoundOutcome::GameReset
            }
        }
    } else {
        match termination::evaluate(
            &game_id,
            &snapshot.game.config,
            &snapshot.participants,
            eliminated.len(),
        )? {
            Some(winners) => {
                snapshot.game.complete(winners);
                RoundOutcome::Completed {
                    winners: snapshot.game.winners.clone(),
                }
            }
            None => {
                let next_round = round_number + 1;
                snapshot.rounds.push(Round::open(&game_id, next_round));
                RoundOutcome::Advanced { next_round }
            }
        }
    };

    Ok(RoundResolution {
        game_id,
        round_number,
        eliminated,
        outcome,
    })
}

use crate::models::{
    game::{GameConfig, WinnerMode},
    participant::Participant,
};
use crate::services::errors::game_service_errors::GameServiceError;

/// Decides whether a non-wipeout round ended the game. Returns the winners'
/// names when it did.
///
/// Only rounds that eliminated somebody can end a game. In single mode that
/// means the active count went from two or more down to one; in multiple mode
/// it keeps a game that started with `max_winners` or fewer participants from
/// completing before anyone was knocked out.
pub fn evaluate(
    game_id: &str,
    config: &GameConfig,
    participants: &[Participant],
    eliminated_this_round: usize,
) -> Result<Option<Vec<String>>, GameServiceError> {
    let active: Vec<&Participant> = participants.iter().filter(|p| p.is_active).collect();

    if active.is_empty() {
        return Err(GameServiceError::invalid_state(
            game_id,
            "no active participants left outside a wipeout",
        ));
    }
    if eliminated_this_round == 0 {
        return Ok(None);
    }

    let finished = match config.winner_mode {
        WinnerMode::Single => active.len() == 1,
        WinnerMode::Multiple => active.len() <= config.max_winners as usize,
    };

    Ok(finished.then(|| {
        active
            .iter()
            .map(|participant| participant.player_name.clone())
            .collect()
    }))
}

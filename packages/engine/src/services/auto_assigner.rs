use std::collections::HashSet;

use crate::models::{group::Team, pick::Pick};
use crate::repositories::game_repository::GameSnapshot;
use crate::services::errors::game_service_errors::GameServiceError;

/// Alphabetically first team not in `used`. Ties on name fall back to id so
/// the choice is stable whatever order the store returns teams in.
pub fn choose_team<'a>(teams: &'a [Team], used: &HashSet<&str>) -> Option<&'a Team> {
    teams
        .iter()
        .filter(|team| !used.contains(team.id.as_str()))
        .min_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)))
}

/// Fills in a pick for every active participant without one in the open
/// round. Either every missing pick is created or none is.
pub fn assign_missing(
    snapshot: &mut GameSnapshot,
    teams: &[Team],
) -> Result<Vec<Pick>, GameServiceError> {
    let game_id = snapshot.game.id.clone();
    let round = snapshot
        .open_round()
        .cloned()
        .ok_or_else(|| GameServiceError::invalid_state(&game_id, "no open round"))?;

    let mut assigned = Vec::new();
    for participant in snapshot.active_participants() {
        if snapshot.pick_for(&round.id, &participant.id).is_some() {
            continue;
        }

        let used = snapshot.used_team_ids(&participant.id);
        let team = choose_team(teams, &used).ok_or_else(|| GameServiceError::NoTeamsAvailable {
            game_id: game_id.clone(),
            round_number: round.round_number,
            participant_id: participant.id.clone(),
        })?;

        assigned.push(Pick::new(
            &game_id,
            &round.id,
            round.round_number,
            &participant.id,
            &team.id,
            true,
        ));
    }

    snapshot.picks.extend(assigned.iter().cloned());
    Ok(assigned)
}

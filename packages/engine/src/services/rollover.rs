use crate::models::round::{Round, RoundStatus};
use crate::repositories::game_repository::GameSnapshot;

/// Round-scope rollback: reinstates the participants the round eliminated,
/// voids the round and opens the next one. Picks stay on record.
pub fn revert_round(snapshot: &mut GameSnapshot, round_number: u32, eliminated_ids: &[String]) -> u32 {
    for participant in snapshot
        .participants
        .iter_mut()
        .filter(|participant| eliminated_ids.contains(&participant.id))
    {
        if participant.eliminated_in_round == Some(round_number) {
            participant.reinstate();
        }
    }

    if let Some(round) = snapshot
        .rounds
        .iter_mut()
        .find(|round| round.round_number == round_number)
    {
        round.voided = true;
    }

    let next_round = round_number + 1;
    let game_id = snapshot.game.id.clone();
    snapshot.rounds.push(Round::open(&game_id, next_round));
    next_round
}

/// True when a game-scope reset would change nothing: round 1 is the only
/// round, it is open and empty, and nobody has been eliminated.
pub fn is_pristine(snapshot: &GameSnapshot) -> bool {
    snapshot.picks.is_empty()
        && snapshot.rounds.len() == 1
        && snapshot.rounds[0].round_number == 1
        && snapshot.rounds[0].status == RoundStatus::Open
        && snapshot
            .participants
            .iter()
            .all(|participant| participant.is_active && participant.eliminated_in_round.is_none())
}

/// Game-scope restart: drops every round and pick, reinstates everybody and
/// reopens round 1. Returns false when the snapshot was already pristine.
pub fn reset_game(snapshot: &mut GameSnapshot) -> bool {
    if is_pristine(snapshot) {
        return false;
    }

    for participant in snapshot.participants.iter_mut() {
        participant.reinstate();
    }
    snapshot.picks.clear();
    let game_id = snapshot.game.id.clone();
    snapshot.rounds = vec![Round::open(&game_id, 1)];
    snapshot.game.resets += 1;
    true
}

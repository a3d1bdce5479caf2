use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{game::Game, participant::Participant, pick::Pick, round::Round};
use crate::repositories::errors::repository_errors::RepositoryError;

/// Every row belonging to one game, read in a single call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSnapshot {
    pub game: Game,
    pub participants: Vec<Participant>,
    /// Ordered by round number.
    pub rounds: Vec<Round>,
    pub picks: Vec<Pick>,
}

impl GameSnapshot {
    pub fn open_round(&self) -> Option<&Round> {
        self.rounds.iter().find(|round| round.is_open())
    }

    pub fn participant(&self, participant_id: &str) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|participant| participant.id == participant_id)
    }

    pub fn active_participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants
            .iter()
            .filter(|participant| participant.is_active)
    }

    pub fn picks_for_round<'a>(&'a self, round_id: &'a str) -> impl Iterator<Item = &'a Pick> {
        self.picks.iter().filter(move |pick| pick.round_id == round_id)
    }

    pub fn pick_for(&self, round_id: &str, participant_id: &str) -> Option<&Pick> {
        self.picks
            .iter()
            .find(|pick| pick.round_id == round_id && pick.participant_id == participant_id)
    }

    /// Teams the participant may not pick again. Picks from voided rounds
    /// count; only a game-scope reset clears them.
    pub fn used_team_ids(&self, participant_id: &str) -> HashSet<&str> {
        self.picks
            .iter()
            .filter(|pick| pick.participant_id == participant_id)
            .map(|pick| pick.team_id.as_str())
            .collect()
    }
}

/// The logical writes produced by one state-mutating operation. Applied by
/// the store as a single transaction guarded by `expected_version`.
#[derive(Debug, Clone, PartialEq)]
pub struct GameChangeset {
    pub expected_version: u64,
    pub game: Game,
    /// Delete every round and pick of the game before applying the upserts.
    pub clear_history: bool,
    pub participants: Vec<Participant>,
    pub rounds: Vec<Round>,
    pub picks: Vec<Pick>,
}

impl GameChangeset {
    /// Diffs two snapshots of the same game. `after.game.version` is set to
    /// the version the store will hold once the changeset is committed.
    pub fn between(before: &GameSnapshot, after: &mut GameSnapshot) -> Self {
        after.game.version = before.game.version + 1;

        let clear_history = before.rounds.iter().any(|round| {
            !after
                .rounds
                .iter()
                .any(|candidate| candidate.id == round.id)
        }) || before
            .picks
            .iter()
            .any(|pick| !after.picks.iter().any(|candidate| candidate.id == pick.id));

        let participants = after
            .participants
            .iter()
            .filter(|participant| !before.participants.contains(participant))
            .cloned()
            .collect();

        let (rounds, picks) = if clear_history {
            (after.rounds.clone(), after.picks.clone())
        } else {
            (
                after
                    .rounds
                    .iter()
                    .filter(|round| !before.rounds.contains(round))
                    .cloned()
                    .collect(),
                after
                    .picks
                    .iter()
                    .filter(|pick| !before.picks.contains(pick))
                    .cloned()
                    .collect(),
            )
        };

        GameChangeset {
            expected_version: before.game.version,
            game: after.game.clone(),
            clear_history,
            participants,
            rounds,
            picks,
        }
    }
}

#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn create_game(&self, snapshot: &GameSnapshot) -> Result<(), RepositoryError>;

    async fn get_game(&self, game_id: &str) -> Result<Option<GameSnapshot>, RepositoryError>;

    async fn list_games(&self, manager_id: &str) -> Result<Vec<Game>, RepositoryError>;

    async fn games_using_group(&self, group_id: &str) -> Result<Vec<Game>, RepositoryError>;

    /// Applies the changeset atomically. Fails with `Conflict` when the
    /// stored version differs from `expected_version`.
    async fn commit(&self, changeset: &GameChangeset) -> Result<(), RepositoryError>;

    /// Deletes the game with its participants, rounds and picks.
    async fn delete_game(&self, game_id: &str) -> Result<(), RepositoryError>;

    /// Drops the group reference from every completed game that points at it.
    async fn detach_group(&self, group_id: &str) -> Result<(), RepositoryError>;
}

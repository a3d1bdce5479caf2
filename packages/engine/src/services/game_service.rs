use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::models::{
    game::{Game, NewGame, WinnerMode},
    group::Team,
    history::{GameHistory, PickHistoryEntry, RoundHistory},
    manager::ManagerScope,
    participant::Participant,
    pick::{MatchResult, Pick},
    round::Round,
    standings::Standings,
};
use crate::repositories::{
    game_repository::{GameChangeset, GameRepository, GameSnapshot},
    pool_repository::PoolRepository,
};
use crate::services::errors::game_service_errors::GameServiceError;
use crate::services::{
    auto_assigner, game_locks::GameLocks, rollover,
    round_resolver::{self, RoundOutcome, RoundResolution},
};

/// Entry point for everything that happens inside a game. Mutating calls hold
/// the game's lock from the first read until the commit returns.
#[derive(Clone)]
pub struct GameService {
    games: Arc<dyn GameRepository + Send + Sync>,
    pools: Arc<dyn PoolRepository + Send + Sync>,
    locks: GameLocks,
}

impl GameService {
    pub fn new(
        games: Arc<dyn GameRepository + Send + Sync>,
        pools: Arc<dyn PoolRepository + Send + Sync>,
    ) -> Self {
        GameService {
            games,
            pools,
            locks: GameLocks::new(),
        }
    }

    pub async fn create_game(
        &self,
        scope: &ManagerScope,
        new_game: NewGame,
    ) -> Result<GameSnapshot, GameServiceError> {
        let name = new_game.name.trim();
        if name.is_empty() {
            return Err(GameServiceError::ValidationError(
                "Game name cannot be empty".to_string(),
            ));
        }
        if new_game.config.winner_mode == WinnerMode::Multiple && new_game.config.max_winners == 0
        {
            return Err(GameServiceError::ValidationError(
                "max_winners must be at least 1 in multiple winner mode".to_string(),
            ));
        }

        if let Some(group_id) = &new_game.group_id {
            let group = self.pools.get_group(group_id).await?;
            if !group.is_some_and(|group| scope.owns(&group.manager_id)) {
                return Err(GameServiceError::NotFound(format!("group {}", group_id)));
            }
        }

        let game = Game::new(&scope.manager_id, name, new_game.group_id, new_game.config);
        let mut snapshot = GameSnapshot {
            participants: vec![],
            rounds: vec![Round::open(&game.id, 1)],
            picks: vec![],
            game,
        };
        let participants = new_participants(&snapshot, &new_game.players)?;
        snapshot.participants = participants;

        self.games.create_game(&snapshot).await?;

        info!(
            "Created game {} ({}) with {} participants",
            snapshot.game.id,
            snapshot.game.name,
            snapshot.participants.len()
        );
        Ok(snapshot)
    }

    pub async fn add_participants(
        &self,
        scope: &ManagerScope,
        game_id: &str,
        player_names: &[String],
    ) -> Result<Vec<Participant>, GameServiceError> {
        let _guard = self.locks.acquire(game_id).await;
        let before = self.load(scope, game_id).await?;
        ensure_active(&before)?;

        let added = new_participants(&before, player_names)?;
        let mut after = before.clone();
        after.participants.extend(added.iter().cloned());
        self.commit(&before, &mut after).await?;

        info!("Added {} participants to game {}", added.len(), game_id);
        Ok(added)
    }

    pub async fn submit_pick(
        &self,
        scope: &ManagerScope,
        game_id: &str,
        round_number: u32,
        participant_id: &str,
        team_id: &str,
    ) -> Result<Pick, GameServiceError> {
        let _guard = self.locks.acquire(game_id).await;
        let before = self.load(scope, game_id).await?;
        ensure_active(&before)?;

        let round = before
            .rounds
            .iter()
            .find(|round| round.round_number == round_number)
            .ok_or_else(|| {
                GameServiceError::NotFound(format!("round {} of game {}", round_number, game_id))
            })?;
        if !round.is_open() {
            return Err(GameServiceError::RoundClosed {
                game_id: game_id.to_string(),
                round_number,
            });
        }

        let participant = before.participant(participant_id).ok_or_else(|| {
            GameServiceError::NotFound(format!(
                "participant {} in game {}",
                participant_id, game_id
            ))
        })?;
        if !participant.is_active {
            return Err(GameServiceError::ParticipantInactive {
                game_id: game_id.to_string(),
                participant_id: participant_id.to_string(),
                eliminated_in_round: participant.eliminated_in_round,
            });
        }

        if before.pick_for(&round.id, participant_id).is_some() {
            return Err(GameServiceError::DuplicatePick {
                game_id: game_id.to_string(),
                round_number,
                participant_id: participant_id.to_string(),
            });
        }

        let team = self.game_team(&before, team_id).await?;
        if before.used_team_ids(participant_id).contains(team.id.as_str()) {
            return Err(GameServiceError::TeamAlreadyUsed {
                game_id: game_id.to_string(),
                round_number,
                participant_id: participant_id.to_string(),
                team_id: team.id,
            });
        }

        let pick = Pick::new(
            game_id,
            &round.id,
            round_number,
            participant_id,
            &team.id,
            false,
        );
        let mut after = before.clone();
        after.picks.push(pick.clone());
        self.commit(&before, &mut after).await?;

        info!(
            "Participant {} picked {} for round {} of game {}",
            participant.player_name, team.name, round_number, game_id
        );
        Ok(pick)
    }

    /// Creates picks for active participants who have none in the open round.
    /// Running it again without new participants creates nothing.
    pub async fn auto_assign(
        &self,
        scope: &ManagerScope,
        game_id: &str,
    ) -> Result<Vec<Pick>, GameServiceError> {
        let _guard = self.locks.acquire(game_id).await;
        let before = self.load(scope, game_id).await?;
        ensure_active(&before)?;

        let teams = self.group_teams(&before).await?;
        let mut after = before.clone();
        let assigned = auto_assigner::assign_missing(&mut after, &teams)?;
        if assigned.is_empty() {
            debug!("No picks missing in game {}", game_id);
            return Ok(assigned);
        }
        self.commit(&before, &mut after).await?;

        info!(
            "Auto-assigned {} picks in game {}",
            assigned.len(),
            game_id
        );
        Ok(assigned)
    }

    /// Closes `round_number` with the given per-team results. Missing picks
    /// are auto-assigned first; both land in the same commit.
    pub async fn resolve_round(
        &self,
        scope: &ManagerScope,
        game_id: &str,
        round_number: u32,
        results: &HashMap<String, MatchResult>,
    ) -> Result<RoundResolution, GameServiceError> {
        let _guard = self.locks.acquire(game_id).await;
        let before = self.load(scope, game_id).await?;
        let mut after = before.clone();

        let target_open = before.game.is_active()
            && before
                .open_round()
                .is_some_and(|round| round.round_number == round_number);
        if target_open && before.game.group_id.is_some() {
            let teams = self.group_teams(&before).await?;
            let assigned = auto_assigner::assign_missing(&mut after, &teams)?;
            if !assigned.is_empty() {
                info!(
                    "Auto-assigned {} picks before resolving round {} of game {}",
                    assigned.len(),
                    round_number,
                    game_id
                );
            }
        }

        let resolution = round_resolver::resolve_round(&mut after, round_number, results)?;
        self.commit(&before, &mut after).await?;

        match &resolution.outcome {
            RoundOutcome::Advanced { next_round } => info!(
                "Round {} of game {} eliminated {}; round {} is open",
                round_number,
                game_id,
                resolution.eliminated.len(),
                next_round
            ),
            RoundOutcome::RolledBack { next_round, .. } => warn!(
                "Wipeout in round {} of game {}; eliminations reverted, round {} is open",
                round_number, game_id, next_round
            ),
            RoundOutcome::GameReset => warn!(
                "Wipeout in round {} of game {}; game restarted at round 1",
                round_number, game_id
            ),
            RoundOutcome::Completed { winners } => info!(
                "Game {} completed after round {}; winners: {}",
                game_id,
                round_number,
                winners.join(", ")
            ),
        }
        Ok(resolution)
    }

    /// Game-scope restart. Returns false when the game was already pristine.
    pub async fn reset_game(
        &self,
        scope: &ManagerScope,
        game_id: &str,
    ) -> Result<bool, GameServiceError> {
        let _guard = self.locks.acquire(game_id).await;
        let before = self.load(scope, game_id).await?;
        ensure_active(&before)?;

        let mut after = before.clone();
        if !rollover::reset_game(&mut after) {
            debug!("Game {} already at a clean round 1, reset skipped", game_id);
            return Ok(false);
        }
        self.commit(&before, &mut after).await?;

        warn!("Game {} reset to round 1 (reset #{})", game_id, after.game.resets);
        Ok(true)
    }

    pub async fn get_game(
        &self,
        scope: &ManagerScope,
        game_id: &str,
    ) -> Result<GameSnapshot, GameServiceError> {
        self.load(scope, game_id).await
    }

    pub async fn list_games(&self, scope: &ManagerScope) -> Result<Vec<Game>, GameServiceError> {
        Ok(self.games.list_games(&scope.manager_id).await?)
    }

    pub async fn get_standings(
        &self,
        scope: &ManagerScope,
        game_id: &str,
    ) -> Result<Standings, GameServiceError> {
        let snapshot = self.load(scope, game_id).await?;
        Ok(Standings::from_participants(
            game_id,
            &snapshot.participants,
            &snapshot.game.winners,
        ))
    }

    pub async fn get_history(
        &self,
        scope: &ManagerScope,
        game_id: &str,
    ) -> Result<GameHistory, GameServiceError> {
        let snapshot = self.load(scope, game_id).await?;
        let team_names: HashMap<String, String> = match &snapshot.game.group_id {
            Some(group_id) => self
                .pools
                .list_teams(group_id)
                .await?
                .into_iter()
                .map(|team| (team.id, team.name))
                .collect(),
            None => HashMap::new(),
        };
        let postpone_as_win = snapshot.game.config.postpone_as_win;

        let rounds = snapshot
            .rounds
            .iter()
            .map(|round| {
                let mut picks: Vec<PickHistoryEntry> = snapshot
                    .picks_for_round(&round.id)
                    .map(|pick| PickHistoryEntry {
                        participant_id: pick.participant_id.clone(),
                        player_name: snapshot
                            .participant(&pick.participant_id)
                            .map(|participant| participant.player_name.clone())
                            .unwrap_or_default(),
                        team_id: pick.team_id.clone(),
                        team_name: team_names
                            .get(&pick.team_id)
                            .cloned()
                            .unwrap_or_else(|| pick.team_id.clone()),
                        result: pick.result,
                        outcome: pick.result.map(|result| result.outcome(postpone_as_win)),
                        auto_assigned: pick.auto_assigned,
                    })
                    .collect();
                picks.sort_by(|a, b| a.player_name.cmp(&b.player_name));
                RoundHistory {
                    round_number: round.round_number,
                    status: round.status,
                    voided: round.voided,
                    picks,
                }
            })
            .collect();

        Ok(GameHistory {
            game_id: game_id.to_string(),
            resets: snapshot.game.resets,
            rounds,
        })
    }

    /// Deletes the game together with its participants, rounds and picks.
    pub async fn delete_game(
        &self,
        scope: &ManagerScope,
        game_id: &str,
    ) -> Result<(), GameServiceError> {
        let guard = self.locks.acquire(game_id).await;
        self.load(scope, game_id).await?;
        self.games.delete_game(game_id).await?;
        drop(guard);
        self.locks.forget(game_id).await;

        info!("Deleted game {}", game_id);
        Ok(())
    }

    async fn load(
        &self,
        scope: &ManagerScope,
        game_id: &str,
    ) -> Result<GameSnapshot, GameServiceError> {
        if game_id.is_empty() {
            return Err(GameServiceError::ValidationError(
                "Game ID cannot be empty".to_string(),
            ));
        }
        match self.games.get_game(game_id).await? {
            Some(snapshot) if scope.owns(&snapshot.game.manager_id) => Ok(snapshot),
            _ => Err(GameServiceError::NotFound(format!("game {}", game_id))),
        }
    }

    async fn commit(
        &self,
        before: &GameSnapshot,
        after: &mut GameSnapshot,
    ) -> Result<(), GameServiceError> {
        if before == after {
            return Ok(());
        }
        let changeset = GameChangeset::between(before, after);
        self.games.commit(&changeset).await.map_err(|e| {
            warn!("Commit for game {} failed: {}", before.game.id, e);
            GameServiceError::from(e)
        })
    }

    async fn group_teams(&self, snapshot: &GameSnapshot) -> Result<Vec<Team>, GameServiceError> {
        let group_id = snapshot.game.group_id.as_deref().ok_or_else(|| {
            GameServiceError::invalid_state(&snapshot.game.id, "game has no team group")
        })?;
        Ok(self.pools.list_teams(group_id).await?)
    }

    async fn game_team(
        &self,
        snapshot: &GameSnapshot,
        team_id: &str,
    ) -> Result<Team, GameServiceError> {
        let group_id = snapshot.game.group_id.as_deref().ok_or_else(|| {
            GameServiceError::invalid_state(&snapshot.game.id, "game has no team group")
        })?;
        match self.pools.get_team(team_id).await? {
            Some(team) if team.group_id == group_id => Ok(team),
            Some(_) => Err(GameServiceError::ValidationError(format!(
                "Team {} is not part of the game's group",
                team_id
            ))),
            None => Err(GameServiceError::NotFound(format!("team {}", team_id))),
        }
    }
}

fn ensure_active(snapshot: &GameSnapshot) -> Result<(), GameServiceError> {
    if snapshot.game.is_active() {
        Ok(())
    } else {
        Err(GameServiceError::invalid_state(
            &snapshot.game.id,
            "game is completed",
        ))
    }
}

/// Builds participants for `names`, rejecting blanks and any name already in
/// the game or repeated in the list.
fn new_participants(
    snapshot: &GameSnapshot,
    names: &[String],
) -> Result<Vec<Participant>, GameServiceError> {
    let game_id = &snapshot.game.id;
    let mut seen: HashSet<&str> = snapshot
        .participants
        .iter()
        .map(|participant| participant.player_name.as_str())
        .collect();

    let mut participants = Vec::new();
    for name in names {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameServiceError::ValidationError(
                "Player name cannot be empty".to_string(),
            ));
        }
        if !seen.insert(name) {
            return Err(GameServiceError::DuplicateParticipant {
                game_id: game_id.clone(),
                player_name: name.to_string(),
            });
        }
        participants.push(Participant::new(game_id, name));
    }
    Ok(participants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{game::GameConfig, group::Group};
    use crate::repositories::{
        errors::repository_errors::RepositoryError, memory_repository::InMemoryStore,
    };
    use async_trait::async_trait;

    struct Fixture {
        service: GameService,
        store: Arc<InMemoryStore>,
        scope: ManagerScope,
        teams: Vec<Team>,
        group_id: String,
    }

    async fn fixture(team_names: &[&str]) -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let scope = ManagerScope::new("manager-1");
        let group = Group::new(&scope.manager_id, "League");
        store.create_group(&group).await.unwrap();
        let mut teams = Vec::new();
        for name in team_names {
            let team = Team::new(&group.id, name);
            store.create_team(&team).await.unwrap();
            teams.push(team);
        }
        Fixture {
            service: GameService::new(store.clone(), store.clone()),
            store,
            scope,
            teams,
            group_id: group.id,
        }
    }

    impl Fixture {
        async fn game(&self, players: &[&str], config: GameConfig) -> GameSnapshot {
            self.service
                .create_game(
                    &self.scope,
                    NewGame {
                        name: "Test game".to_string(),
                        group_id: Some(self.group_id.clone()),
                        config,
                        players: players.iter().map(|p| p.to_string()).collect(),
                    },
                )
                .await
                .unwrap()
        }

        fn team(&self, name: &str) -> &Team {
            self.teams.iter().find(|team| team.name == name).unwrap()
        }
    }

    #[tokio::test]
    async fn test_create_game_opens_round_one() {
        let fx = fixture(&["Arsenal"]).await;

        let snapshot = fx.game(&["Alice", "Bob"], GameConfig::default()).await;

        assert_eq!(snapshot.rounds.len(), 1);
        assert_eq!(snapshot.open_round().unwrap().round_number, 1);
        assert_eq!(snapshot.participants.len(), 2);
        assert!(snapshot.participants.iter().all(|p| p.is_active));
    }

    #[tokio::test]
    async fn test_create_game_rejects_duplicate_players() {
        let fx = fixture(&["Arsenal"]).await;

        let result = fx
            .service
            .create_game(
                &fx.scope,
                NewGame {
                    name: "Test".to_string(),
                    players: vec!["Alice".to_string(), "Alice".to_string()],
                    ..NewGame::default()
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(GameServiceError::DuplicateParticipant { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_game_rejects_foreign_group() {
        let fx = fixture(&["Arsenal"]).await;

        let result = fx
            .service
            .create_game(
                &ManagerScope::new("someone-else"),
                NewGame {
                    name: "Test".to_string(),
                    group_id: Some(fx.group_id.clone()),
                    ..NewGame::default()
                },
            )
            .await;

        assert!(matches!(result, Err(GameServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_game_rejects_zero_max_winners() {
        let fx = fixture(&["Arsenal"]).await;
        let config = GameConfig {
            winner_mode: WinnerMode::Multiple,
            max_winners: 0,
            ..GameConfig::default()
        };

        let result = fx
            .service
            .create_game(
                &fx.scope,
                NewGame {
                    name: "Test".to_string(),
                    config,
                    ..NewGame::default()
                },
            )
            .await;

        assert!(matches!(result, Err(GameServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_add_participants_rejects_existing_name() {
        let fx = fixture(&["Arsenal"]).await;
        let game = fx.game(&["Alice"], GameConfig::default()).await;

        let added = fx
            .service
            .add_participants(&fx.scope, &game.game.id, &["Bob".to_string()])
            .await
            .unwrap();
        let duplicate = fx
            .service
            .add_participants(&fx.scope, &game.game.id, &["Alice".to_string()])
            .await;

        assert_eq!(added.len(), 1);
        assert!(matches!(
            duplicate,
            Err(GameServiceError::DuplicateParticipant { ref player_name, .. }) if player_name == "Alice"
        ));
        let stored = fx.service.get_game(&fx.scope, &game.game.id).await.unwrap();
        assert_eq!(stored.participants.len(), 2);
    }

    #[tokio::test]
    async fn test_submit_pick_and_duplicate() {
        let fx = fixture(&["Arsenal", "Chelsea"]).await;
        let game = fx.game(&["Alice", "Bob"], GameConfig::default()).await;
        let alice = game.participants[0].id.clone();

        let pick = fx
            .service
            .submit_pick(&fx.scope, &game.game.id, 1, &alice, &fx.team("Arsenal").id)
            .await
            .unwrap();
        let again = fx
            .service
            .submit_pick(&fx.scope, &game.game.id, 1, &alice, &fx.team("Chelsea").id)
            .await;

        assert!(!pick.auto_assigned);
        assert!(matches!(again, Err(GameServiceError::DuplicatePick { .. })));
    }

    #[tokio::test]
    async fn test_submit_pick_rejects_reused_team() {
        let fx = fixture(&["Arsenal", "Chelsea", "Everton"]).await;
        let game = fx.game(&["Alice", "Bob", "Carol"], GameConfig::default()).await;
        let game_id = game.game.id.clone();
        let alice = game.participants[0].id.clone();
        let arsenal = fx.team("Arsenal").id.clone();

        fx.service
            .submit_pick(&fx.scope, &game_id, 1, &alice, &arsenal)
            .await
            .unwrap();
        let results: HashMap<String, MatchResult> = fx
            .teams
            .iter()
            .map(|team| (team.id.clone(), MatchResult::Win))
            .collect();
        fx.service
            .resolve_round(&fx.scope, &game_id, 1, &results)
            .await
            .unwrap();

        let reuse = fx
            .service
            .submit_pick(&fx.scope, &game_id, 2, &alice, &arsenal)
            .await;

        assert!(matches!(
            reuse,
            Err(GameServiceError::TeamAlreadyUsed { ref team_id, round_number: 2, .. }) if *team_id == arsenal
        ));
    }

    #[tokio::test]
    async fn test_submit_pick_rejects_closed_round_and_inactive() {
        let fx = fixture(&["Arsenal", "Chelsea", "Everton"]).await;
        let game = fx.game(&["Alice", "Bob", "Carol"], GameConfig::default()).await;
        let game_id = game.game.id.clone();
        let alice = game.participants[0].id.clone();
        let bob = game.participants[1].id.clone();

        fx.service
            .submit_pick(&fx.scope, &game_id, 1, &alice, &fx.team("Everton").id)
            .await
            .unwrap();
        let mut results: HashMap<String, MatchResult> = fx
            .teams
            .iter()
            .map(|team| (team.id.clone(), MatchResult::Win))
            .collect();
        results.insert(fx.team("Everton").id.clone(), MatchResult::Loss);
        fx.service
            .resolve_round(&fx.scope, &game_id, 1, &results)
            .await
            .unwrap();

        let closed = fx
            .service
            .submit_pick(&fx.scope, &game_id, 1, &bob, &fx.team("Chelsea").id)
            .await;
        let inactive = fx
            .service
            .submit_pick(&fx.scope, &game_id, 2, &alice, &fx.team("Chelsea").id)
            .await;

        assert!(matches!(
            closed,
            Err(GameServiceError::RoundClosed { round_number: 1, .. })
        ));
        assert!(matches!(
            inactive,
            Err(GameServiceError::ParticipantInactive {
                eliminated_in_round: Some(1),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_submit_pick_rejects_team_from_other_group() {
        let fx = fixture(&["Arsenal"]).await;
        let other = Group::new(&fx.scope.manager_id, "Other");
        fx.store.create_group(&other).await.unwrap();
        let stranger = Team::new(&other.id, "Celtic");
        fx.store.create_team(&stranger).await.unwrap();
        let game = fx.game(&["Alice", "Bob"], GameConfig::default()).await;

        let result = fx
            .service
            .submit_pick(
                &fx.scope,
                &game.game.id,
                1,
                &game.participants[0].id,
                &stranger.id,
            )
            .await;

        assert!(matches!(result, Err(GameServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_auto_assign_is_idempotent() {
        let fx = fixture(&["Burnley", "Arsenal"]).await;
        let game = fx.game(&["Alice", "Bob"], GameConfig::default()).await;

        let first = fx.service.auto_assign(&fx.scope, &game.game.id).await.unwrap();
        let second = fx.service.auto_assign(&fx.scope, &game.game.id).await.unwrap();

        assert_eq!(first.len(), 2);
        assert!(first.iter().all(|pick| pick.team_id == fx.team("Arsenal").id));
        assert!(second.is_empty());
        let stored = fx.service.get_game(&fx.scope, &game.game.id).await.unwrap();
        assert_eq!(stored.picks.len(), 2);
    }

    #[tokio::test]
    async fn test_resolve_fills_missing_picks() {
        let fx = fixture(&["Arsenal", "Burnley"]).await;
        let game = fx.game(&["Alice", "Bob", "Carol"], GameConfig::default()).await;
        let results: HashMap<String, MatchResult> =
            [(fx.team("Arsenal").id.clone(), MatchResult::Win)].into_iter().collect();

        let resolution = fx
            .service
            .resolve_round(&fx.scope, &game.game.id, 1, &results)
            .await
            .unwrap();

        assert_eq!(resolution.outcome, RoundOutcome::Advanced { next_round: 2 });
        let stored = fx.service.get_game(&fx.scope, &game.game.id).await.unwrap();
        assert_eq!(stored.picks.len(), 3);
        assert!(stored.picks.iter().all(|pick| pick.auto_assigned));
        assert!(stored.picks.iter().all(|pick| pick.result == Some(MatchResult::Win)));
    }

    #[tokio::test]
    async fn test_resolve_missing_result_commits_nothing() {
        let fx = fixture(&["Arsenal", "Burnley"]).await;
        let game = fx.game(&["Alice", "Bob"], GameConfig::default()).await;

        let result = fx
            .service
            .resolve_round(&fx.scope, &game.game.id, 1, &HashMap::new())
            .await;

        assert!(matches!(result, Err(GameServiceError::MissingResult { .. })));
        let stored = fx.service.get_game(&fx.scope, &game.game.id).await.unwrap();
        assert_eq!(stored, game);
    }

    #[tokio::test]
    async fn test_resolve_closed_round_is_invalid_state() {
        let fx = fixture(&["Arsenal", "Burnley"]).await;
        let game = fx.game(&["Alice", "Bob", "Carol"], GameConfig::default()).await;
        let results: HashMap<String, MatchResult> = fx
            .teams
            .iter()
            .map(|team| (team.id.clone(), MatchResult::Win))
            .collect();
        fx.service
            .resolve_round(&fx.scope, &game.game.id, 1, &results)
            .await
            .unwrap();

        let again = fx
            .service
            .resolve_round(&fx.scope, &game.game.id, 1, &results)
            .await;

        assert!(matches!(again, Err(GameServiceError::InvalidState { .. })));
    }

    #[tokio::test]
    async fn test_reset_game_twice_second_is_noop() {
        let fx = fixture(&["Arsenal", "Burnley"]).await;
        let game = fx.game(&["Alice", "Bob"], GameConfig::default()).await;
        fx.service.auto_assign(&fx.scope, &game.game.id).await.unwrap();

        let first = fx.service.reset_game(&fx.scope, &game.game.id).await.unwrap();
        let after_first = fx.service.get_game(&fx.scope, &game.game.id).await.unwrap();
        let second = fx.service.reset_game(&fx.scope, &game.game.id).await.unwrap();
        let after_second = fx.service.get_game(&fx.scope, &game.game.id).await.unwrap();

        assert!(first);
        assert!(!second);
        assert!(after_first.picks.is_empty());
        assert_eq!(after_first, after_second);
    }

    #[tokio::test]
    async fn test_other_manager_cannot_see_game() {
        let fx = fixture(&["Arsenal"]).await;
        let game = fx.game(&["Alice", "Bob"], GameConfig::default()).await;

        let result = fx
            .service
            .get_standings(&ManagerScope::new("intruder"), &game.game.id)
            .await;

        assert!(matches!(result, Err(GameServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_history_reports_team_names_and_outcomes() {
        let fx = fixture(&["Arsenal", "Burnley"]).await;
        let game = fx.game(&["Alice", "Bob", "Carol"], GameConfig::default()).await;
        let game_id = game.game.id.clone();
        fx.service
            .submit_pick(&fx.scope, &game_id, 1, &game.participants[1].id, &fx.team("Burnley").id)
            .await
            .unwrap();
        let results: HashMap<String, MatchResult> = [
            (fx.team("Arsenal").id.clone(), MatchResult::Win),
            (fx.team("Burnley").id.clone(), MatchResult::Loss),
        ]
        .into_iter()
        .collect();
        fx.service
            .resolve_round(&fx.scope, &game_id, 1, &results)
            .await
            .unwrap();

        let history = fx.service.get_history(&fx.scope, &game_id).await.unwrap();

        assert_eq!(history.rounds.len(), 2);
        let first = &history.rounds[0];
        assert_eq!(first.picks.len(), 3);
        assert_eq!(first.eliminated_players(), vec!["Bob"]);
        let bob = first.picks.iter().find(|p| p.player_name == "Bob").unwrap();
        assert_eq!(bob.team_name, "Burnley");
        assert!(!bob.auto_assigned);
        assert!(history.rounds[1].picks.is_empty());
    }

    #[tokio::test]
    async fn test_delete_game_removes_it() {
        let fx = fixture(&["Arsenal"]).await;
        let game = fx.game(&["Alice", "Bob"], GameConfig::default()).await;

        fx.service.delete_game(&fx.scope, &game.game.id).await.unwrap();

        let result = fx.service.get_game(&fx.scope, &game.game.id).await;
        assert!(matches!(result, Err(GameServiceError::NotFound(_))));
        assert!(fx.service.list_games(&fx.scope).await.unwrap().is_empty());
    }

    // Store whose writes always fail, for checking infrastructure errors.
    struct FailingCommitRepository {
        inner: Arc<InMemoryStore>,
    }

    #[async_trait]
    impl GameRepository for FailingCommitRepository {
        async fn create_game(&self, snapshot: &GameSnapshot) -> Result<(), RepositoryError> {
            self.inner.create_game(snapshot).await
        }

        async fn get_game(&self, game_id: &str) -> Result<Option<GameSnapshot>, RepositoryError> {
            self.inner.get_game(game_id).await
        }

        async fn list_games(&self, manager_id: &str) -> Result<Vec<Game>, RepositoryError> {
            self.inner.list_games(manager_id).await
        }

        async fn games_using_group(&self, group_id: &str) -> Result<Vec<Game>, RepositoryError> {
            self.inner.games_using_group(group_id).await
        }

        async fn commit(&self, _changeset: &GameChangeset) -> Result<(), RepositoryError> {
            Err(RepositoryError::Storage("connection lost".to_string()))
        }

        async fn delete_game(&self, game_id: &str) -> Result<(), RepositoryError> {
            self.inner.delete_game(game_id).await
        }

        async fn detach_group(&self, group_id: &str) -> Result<(), RepositoryError> {
            self.inner.detach_group(group_id).await
        }
    }

    #[tokio::test]
    async fn test_storage_failure_propagates_without_state_change() {
        let fx = fixture(&["Arsenal", "Burnley"]).await;
        let game = fx.game(&["Alice", "Bob"], GameConfig::default()).await;
        let failing = GameService::new(
            Arc::new(FailingCommitRepository {
                inner: fx.store.clone(),
            }),
            fx.store.clone(),
        );
        let results: HashMap<String, MatchResult> = fx
            .teams
            .iter()
            .map(|team| (team.id.clone(), MatchResult::Loss))
            .collect();

        let result = failing
            .resolve_round(&fx.scope, &game.game.id, 1, &results)
            .await;

        assert!(matches!(
            result,
            Err(GameServiceError::RepositoryError(RepositoryError::Storage(_)))
        ));
        let stored = fx.service.get_game(&fx.scope, &game.game.id).await.unwrap();
        assert_eq!(stored, game);
    }
}

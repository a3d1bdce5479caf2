#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use lms_engine::models::{
    game::{GameConfig, NewGame},
    manager::ManagerScope,
    pick::MatchResult,
};
use lms_engine::services::round_resolver::RoundResolution;
use lms_engine::{GameService, InMemoryStore, PoolService};

/// One manager with a single team group, ready to start games.
pub struct League {
    pub games: GameService,
    pub pools: PoolService,
    pub scope: ManagerScope,
    pub group_id: String,
    pub teams: HashMap<String, String>,
}

pub struct StartedGame {
    pub id: String,
    pub participants: HashMap<String, String>,
}

impl StartedGame {
    pub fn participant(&self, name: &str) -> &str {
        &self.participants[name]
    }
}

impl League {
    pub async fn new(team_names: &[&str]) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let games = GameService::new(store.clone(), store.clone());
        let pools = PoolService::new(store.clone(), store);
        let scope = ManagerScope::new("manager-1");

        let group = pools.create_group(&scope, "League").await.unwrap();
        let mut teams = HashMap::new();
        for name in team_names {
            let team = pools.add_team(&scope, &group.id, name).await.unwrap();
            teams.insert(team.name, team.id);
        }

        League {
            games,
            pools,
            scope,
            group_id: group.id,
            teams,
        }
    }

    pub fn team(&self, name: &str) -> &str {
        &self.teams[name]
    }

    pub async fn start(&self, players: &[&str], config: GameConfig) -> StartedGame {
        let snapshot = self
            .games
            .create_game(
                &self.scope,
                NewGame {
                    name: "Integration".to_string(),
                    group_id: Some(self.group_id.clone()),
                    config,
                    players: players.iter().map(|p| p.to_string()).collect(),
                },
            )
            .await
            .unwrap();

        StartedGame {
            participants: snapshot
                .participants
                .iter()
                .map(|p| (p.player_name.clone(), p.id.clone()))
                .collect(),
            id: snapshot.game.id,
        }
    }

    /// Submits the given (player, team) picks and resolves the round with the
    /// given (team, result) pairs.
    pub async fn play(
        &self,
        game: &StartedGame,
        round_number: u32,
        picks: &[(&str, &str)],
        results: &[(&str, MatchResult)],
    ) -> RoundResolution {
        for (player, team) in picks {
            self.games
                .submit_pick(
                    &self.scope,
                    &game.id,
                    round_number,
                    game.participant(player),
                    self.team(team),
                )
                .await
                .unwrap();
        }
        let results: HashMap<String, MatchResult> = results
            .iter()
            .map(|(team, result)| (self.team(team).to_string(), *result))
            .collect();
        self.games
            .resolve_round(&self.scope, &game.id, round_number, &results)
            .await
            .unwrap()
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use lms_engine::models::{
    game::NewGame, manager::ManagerScope, pick::MatchResult, standings::Standings,
};
use lms_engine::services::round_resolver::RoundOutcome;
use lms_engine::{GameService, InMemoryStore, PoolService};
use tracing::{error, info, warn};

use crate::scenario::{Scenario, ScenarioRound};

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Plays a scenario through the engine round by round.
#[derive(Clone)]
pub struct RoundProcessor {
    games: GameService,
    pools: PoolService,
    scope: ManagerScope,
}

impl RoundProcessor {
    pub fn new(manager_id: &str) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            games: GameService::new(store.clone(), store.clone()),
            pools: PoolService::new(store.clone(), store),
            scope: ManagerScope::new(manager_id),
        }
    }

    pub async fn run(&self, scenario: &Scenario) -> Result<Standings, Error> {
        let group = self.pools.create_group(&self.scope, &scenario.group).await?;
        let mut team_ids = HashMap::new();
        for name in &scenario.teams {
            let team = self.pools.add_team(&self.scope, &group.id, name).await?;
            team_ids.insert(team.name.clone(), team.id);
        }
        for name in &scenario.players {
            self.pools.create_player(&self.scope, name).await?;
        }

        let snapshot = self
            .games
            .create_game(
                &self.scope,
                NewGame {
                    name: scenario.name.clone(),
                    group_id: Some(group.id.clone()),
                    config: scenario.config.clone(),
                    players: scenario.players.clone(),
                },
            )
            .await?;
        let game_id = snapshot.game.id.clone();
        let participant_ids: HashMap<String, String> = snapshot
            .participants
            .iter()
            .map(|participant| (participant.player_name.clone(), participant.id.clone()))
            .collect();

        for (index, round) in scenario.rounds.iter().enumerate() {
            let current = self.games.get_game(&self.scope, &game_id).await?;
            let Some(open) = current.open_round() else {
                warn!(
                    "Game finished before scenario round {}; {} rounds left unplayed",
                    index + 1,
                    scenario.rounds.len() - index
                );
                break;
            };
            let round_number = open.round_number;

            self.submit_picks(&game_id, round_number, round, &participant_ids, &team_ids)
                .await;

            let results = results_by_team_id(round, &team_ids)?;
            let resolution = self
                .games
                .resolve_round(&self.scope, &game_id, round_number, &results)
                .await?;

            match resolution.outcome {
                RoundOutcome::Completed { winners } => {
                    info!("Winners: {}", winners.join(", "));
                }
                RoundOutcome::RolledBack { voided_round, .. } => {
                    info!("Round {} voided", voided_round);
                }
                _ => {}
            }
        }

        Ok(self.games.get_standings(&self.scope, &game_id).await?)
    }

    async fn submit_picks(
        &self,
        game_id: &str,
        round_number: u32,
        round: &ScenarioRound,
        participant_ids: &HashMap<String, String>,
        team_ids: &HashMap<String, String>,
    ) {
        for (player, team) in &round.picks {
            let (Some(participant_id), Some(team_id)) =
                (participant_ids.get(player), team_ids.get(team))
            else {
                warn!(
                    "Skipping pick {} -> {} in round {}: unknown player or team",
                    player, team, round_number
                );
                continue;
            };

            // Rejected picks are left to auto-assignment.
            if let Err(e) = self
                .games
                .submit_pick(&self.scope, game_id, round_number, participant_id, team_id)
                .await
            {
                error!("Pick {} -> {} rejected: {}", player, team, e);
            }
        }
    }
}

fn results_by_team_id(
    round: &ScenarioRound,
    team_ids: &HashMap<String, String>,
) -> Result<HashMap<String, MatchResult>, Error> {
    round
        .results
        .iter()
        .map(|(team, result)| match team_ids.get(team) {
            Some(id) => Ok((id.clone(), *result)),
            None => Err(format!("Result given for unknown team {}", team).into()),
        })
        .collect()
}

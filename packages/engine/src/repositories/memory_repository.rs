use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{
    game::Game,
    group::{Group, Team},
    player::Player,
};
use crate::repositories::errors::repository_errors::RepositoryError;
use crate::repositories::game_repository::{GameChangeset, GameRepository, GameSnapshot};
use crate::repositories::pool_repository::PoolRepository;

#[derive(Debug, Default)]
struct StoreState {
    games: HashMap<String, GameSnapshot>,
    groups: HashMap<String, Group>,
    teams: HashMap<String, Team>,
    players: HashMap<String, Player>,
}

/// Process-local store. Each commit is validated against a copy of the
/// game's rows and swapped in whole, so a failed commit leaves nothing behind.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoreState {
    /// Group edits are checked here, under the same write lock as the edit,
    /// so a game created after the service's own check still blocks them.
    fn ensure_group_editable(&self, group_id: &str) -> Result<(), RepositoryError> {
        let in_use = self.games.values().find(|snapshot| {
            snapshot.game.is_active() && snapshot.game.group_id.as_deref() == Some(group_id)
        });
        match in_use {
            Some(snapshot) => Err(RepositoryError::Conflict(format!(
                "group {} is used by active game {}",
                group_id, snapshot.game.id
            ))),
            None => Ok(()),
        }
    }
}

fn apply_changeset(
    current: &GameSnapshot,
    changeset: &GameChangeset,
) -> Result<GameSnapshot, RepositoryError> {
    let mut next = current.clone();
    next.game = changeset.game.clone();

    if changeset.clear_history {
        next.rounds.clear();
        next.picks.clear();
    }

    for participant in &changeset.participants {
        if let Some(existing) = next.participants.iter_mut().find(|p| p.id == participant.id) {
            *existing = participant.clone();
        } else {
            next.participants.push(participant.clone());
        }
    }
    for round in &changeset.rounds {
        if let Some(existing) = next.rounds.iter_mut().find(|r| r.id == round.id) {
            *existing = round.clone();
        } else {
            next.rounds.push(round.clone());
        }
    }
    for pick in &changeset.picks {
        if let Some(existing) = next.picks.iter_mut().find(|p| p.id == pick.id) {
            *existing = pick.clone();
        } else {
            next.picks.push(pick.clone());
        }
    }
    next.rounds.sort_by_key(|round| round.round_number);

    check_constraints(&next)?;
    Ok(next)
}

fn check_constraints(snapshot: &GameSnapshot) -> Result<(), RepositoryError> {
    let game_id = &snapshot.game.id;

    let mut names = HashSet::new();
    for participant in &snapshot.participants {
        if participant.game_id != *game_id {
            return Err(RepositoryError::Storage(format!(
                "participant {} does not belong to game {}",
                participant.id, game_id
            )));
        }
        if !names.insert(participant.player_name.as_str()) {
            return Err(RepositoryError::AlreadyExists(format!(
                "participant {} in game {}",
                participant.player_name, game_id
            )));
        }
    }

    let mut round_numbers = HashSet::new();
    for round in &snapshot.rounds {
        if !round_numbers.insert(round.round_number) {
            return Err(RepositoryError::AlreadyExists(format!(
                "round {} in game {}",
                round.round_number, game_id
            )));
        }
    }

    let mut picked = HashSet::new();
    for pick in &snapshot.picks {
        if !snapshot.rounds.iter().any(|round| round.id == pick.round_id) {
            return Err(RepositoryError::Storage(format!(
                "pick {} references unknown round {}",
                pick.id, pick.round_id
            )));
        }
        if snapshot.participant(&pick.participant_id).is_none() {
            return Err(RepositoryError::Storage(format!(
                "pick {} references unknown participant {}",
                pick.id, pick.participant_id
            )));
        }
        if !picked.insert((pick.round_id.as_str(), pick.participant_id.as_str())) {
            return Err(RepositoryError::AlreadyExists(format!(
                "pick for participant {} in round {}",
                pick.participant_id, pick.round_number
            )));
        }
    }

    Ok(())
}

#[async_trait]
impl GameRepository for InMemoryStore {
    async fn create_game(&self, snapshot: &GameSnapshot) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        if state.games.contains_key(&snapshot.game.id) {
            return Err(RepositoryError::AlreadyExists(format!(
                "game {}",
                snapshot.game.id
            )));
        }
        if let Some(group_id) = &snapshot.game.group_id {
            if !state.groups.contains_key(group_id) {
                return Err(RepositoryError::NotFound(format!("group {}", group_id)));
            }
        }
        check_constraints(snapshot)?;
        state
            .games
            .insert(snapshot.game.id.clone(), snapshot.clone());
        Ok(())
    }

    async fn get_game(&self, game_id: &str) -> Result<Option<GameSnapshot>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.games.get(game_id).cloned())
    }

    async fn list_games(&self, manager_id: &str) -> Result<Vec<Game>, RepositoryError> {
        let state = self.state.read().await;
        let mut games: Vec<Game> = state
            .games
            .values()
            .filter(|snapshot| snapshot.game.manager_id == manager_id)
            .map(|snapshot| snapshot.game.clone())
            .collect();
        games.sort_by_key(|game| game.created_at);
        Ok(games)
    }

    async fn games_using_group(&self, group_id: &str) -> Result<Vec<Game>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .games
            .values()
            .filter(|snapshot| snapshot.game.group_id.as_deref() == Some(group_id))
            .map(|snapshot| snapshot.game.clone())
            .collect())
    }

    async fn commit(&self, changeset: &GameChangeset) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        let game_id = changeset.game.id.clone();
        let current = state
            .games
            .get(&game_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("game {}", game_id)))?;

        if current.game.version != changeset.expected_version {
            return Err(RepositoryError::Conflict(format!(
                "game {} is at version {}, expected {}",
                game_id, current.game.version, changeset.expected_version
            )));
        }

        let next = apply_changeset(current, changeset)?;
        state.games.insert(game_id, next);
        Ok(())
    }

    async fn delete_game(&self, game_id: &str) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        state
            .games
            .remove(game_id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(format!("game {}", game_id)))
    }

    async fn detach_group(&self, group_id: &str) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        for snapshot in state.games.values_mut() {
            let completed = !snapshot.game.is_active();
            if completed && snapshot.game.group_id.as_deref() == Some(group_id) {
                snapshot.game.group_id = None;
                snapshot.game.version += 1;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PoolRepository for InMemoryStore {
    async fn create_group(&self, group: &Group) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        if state.groups.contains_key(&group.id) {
            return Err(RepositoryError::AlreadyExists(format!("group {}", group.id)));
        }
        state.groups.insert(group.id.clone(), group.clone());
        Ok(())
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.groups.get(group_id).cloned())
    }

    async fn list_groups(&self, manager_id: &str) -> Result<Vec<Group>, RepositoryError> {
        let state = self.state.read().await;
        let mut groups: Vec<Group> = state
            .groups
            .values()
            .filter(|group| group.manager_id == manager_id)
            .cloned()
            .collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(groups)
    }

    async fn delete_group(&self, group_id: &str) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        state.ensure_group_editable(group_id)?;
        if state.groups.remove(group_id).is_none() {
            return Err(RepositoryError::NotFound(format!("group {}", group_id)));
        }
        state.teams.retain(|_, team| team.group_id != group_id);
        Ok(())
    }

    async fn create_team(&self, team: &Team) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        if !state.groups.contains_key(&team.group_id) {
            return Err(RepositoryError::NotFound(format!("group {}", team.group_id)));
        }
        state.ensure_group_editable(&team.group_id)?;
        if state
            .teams
            .values()
            .any(|existing| existing.group_id == team.group_id && existing.name == team.name)
        {
            return Err(RepositoryError::AlreadyExists(format!(
                "team {} in group {}",
                team.name, team.group_id
            )));
        }
        state.teams.insert(team.id.clone(), team.clone());
        Ok(())
    }

    async fn get_team(&self, team_id: &str) -> Result<Option<Team>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.teams.get(team_id).cloned())
    }

    async fn list_teams(&self, group_id: &str) -> Result<Vec<Team>, RepositoryError> {
        let state = self.state.read().await;
        let mut teams: Vec<Team> = state
            .teams
            .values()
            .filter(|team| team.group_id == group_id)
            .cloned()
            .collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(teams)
    }

    async fn delete_team(&self, team_id: &str) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        if let Some(group_id) = state.teams.get(team_id).map(|team| team.group_id.clone()) {
            state.ensure_group_editable(&group_id)?;
        }
        state
            .teams
            .remove(team_id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(format!("team {}", team_id)))
    }

    async fn create_player(&self, player: &Player) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        if state
            .players
            .values()
            .any(|existing| existing.manager_id == player.manager_id && existing.name == player.name)
        {
            return Err(RepositoryError::AlreadyExists(format!(
                "player {}",
                player.name
            )));
        }
        state.players.insert(player.id.clone(), player.clone());
        Ok(())
    }

    async fn list_players(&self, manager_id: &str) -> Result<Vec<Player>, RepositoryError> {
        let state = self.state.read().await;
        let mut players: Vec<Player> = state
            .players
            .values()
            .filter(|player| player.manager_id == manager_id)
            .cloned()
            .collect();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(players)
    }

    async fn delete_player(&self, player_id: &str) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        state
            .players
            .remove(player_id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(format!("player {}", player_id)))
    }
}

use std::sync::Arc;

use tracing::info;

use crate::models::{
    group::{Group, Team},
    manager::ManagerScope,
    player::Player,
};
use crate::repositories::{game_repository::GameRepository, pool_repository::PoolRepository};
use crate::services::errors::pool_service_errors::PoolServiceError;

/// Manages the reusable pools a manager draws on when setting up games:
/// team groups and the player roster.
#[derive(Clone)]
pub struct PoolService {
    pools: Arc<dyn PoolRepository + Send + Sync>,
    games: Arc<dyn GameRepository + Send + Sync>,
}

impl PoolService {
    pub fn new(
        pools: Arc<dyn PoolRepository + Send + Sync>,
        games: Arc<dyn GameRepository + Send + Sync>,
    ) -> Self {
        PoolService { pools, games }
    }

    pub async fn create_group(
        &self,
        scope: &ManagerScope,
        name: &str,
    ) -> Result<Group, PoolServiceError> {
        let name = validate_name("Group", name)?;
        let group = Group::new(&scope.manager_id, name);
        self.pools.create_group(&group).await?;

        info!("Created group {} ({})", group.id, group.name);
        Ok(group)
    }

    pub async fn list_groups(&self, scope: &ManagerScope) -> Result<Vec<Group>, PoolServiceError> {
        Ok(self.pools.list_groups(&scope.manager_id).await?)
    }

    /// Deletes the group and its teams. Refused while an active game uses it;
    /// completed games keep their history but lose the group reference. The
    /// store repeats the in-use check atomically with the delete.
    pub async fn delete_group(
        &self,
        scope: &ManagerScope,
        group_id: &str,
    ) -> Result<(), PoolServiceError> {
        self.owned_group(scope, group_id).await?;
        self.ensure_unused(group_id).await?;

        self.games.detach_group(group_id).await?;
        self.pools.delete_group(group_id).await?;

        info!("Deleted group {}", group_id);
        Ok(())
    }

    pub async fn add_team(
        &self,
        scope: &ManagerScope,
        group_id: &str,
        name: &str,
    ) -> Result<Team, PoolServiceError> {
        let name = validate_name("Team", name)?;
        self.owned_group(scope, group_id).await?;
        self.ensure_unused(group_id).await?;

        let team = Team::new(group_id, name);
        self.pools.create_team(&team).await?;

        info!("Added team {} to group {}", team.name, group_id);
        Ok(team)
    }

    pub async fn list_teams(
        &self,
        scope: &ManagerScope,
        group_id: &str,
    ) -> Result<Vec<Team>, PoolServiceError> {
        self.owned_group(scope, group_id).await?;
        Ok(self.pools.list_teams(group_id).await?)
    }

    pub async fn remove_team(
        &self,
        scope: &ManagerScope,
        team_id: &str,
    ) -> Result<(), PoolServiceError> {
        let team = self
            .pools
            .get_team(team_id)
            .await?
            .ok_or_else(|| PoolServiceError::NotFound(format!("team {}", team_id)))?;
        self.owned_group(scope, &team.group_id).await?;
        self.ensure_unused(&team.group_id).await?;

        self.pools.delete_team(team_id).await?;

        info!("Removed team {} from group {}", team.name, team.group_id);
        Ok(())
    }

    pub async fn create_player(
        &self,
        scope: &ManagerScope,
        name: &str,
    ) -> Result<Player, PoolServiceError> {
        let name = validate_name("Player", name)?;
        let player = Player::new(&scope.manager_id, name);
        self.pools.create_player(&player).await?;

        info!("Created player {}", player.name);
        Ok(player)
    }

    pub async fn list_players(
        &self,
        scope: &ManagerScope,
    ) -> Result<Vec<Player>, PoolServiceError> {
        Ok(self.pools.list_players(&scope.manager_id).await?)
    }

    pub async fn delete_player(
        &self,
        scope: &ManagerScope,
        player_id: &str,
    ) -> Result<(), PoolServiceError> {
        let players = self.pools.list_players(&scope.manager_id).await?;
        if !players.iter().any(|player| player.id == player_id) {
            return Err(PoolServiceError::NotFound(format!("player {}", player_id)));
        }
        self.pools.delete_player(player_id).await?;

        info!("Deleted player {}", player_id);
        Ok(())
    }

    async fn owned_group(
        &self,
        scope: &ManagerScope,
        group_id: &str,
    ) -> Result<Group, PoolServiceError> {
        match self.pools.get_group(group_id).await? {
            Some(group) if scope.owns(&group.manager_id) => Ok(group),
            _ => Err(PoolServiceError::NotFound(format!("group {}", group_id))),
        }
    }

    async fn ensure_unused(&self, group_id: &str) -> Result<(), PoolServiceError> {
        let games = self.games.games_using_group(group_id).await?;
        match games.iter().find(|game| game.is_active()) {
            Some(game) => Err(PoolServiceError::InUse {
                group_id: group_id.to_string(),
                game_id: game.id.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn validate_name<'a>(kind: &str, name: &'a str) -> Result<&'a str, PoolServiceError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PoolServiceError::ValidationError(format!(
            "{} name cannot be empty",
            kind
        )));
    }
    Ok(name)
}

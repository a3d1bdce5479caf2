use async_trait::async_trait;

use crate::models::{
    group::{Group, Team},
    player::Player,
};
use crate::repositories::errors::repository_errors::RepositoryError;

#[async_trait]
pub trait PoolRepository: Send + Sync {
    async fn create_group(&self, group: &Group) -> Result<(), RepositoryError>;
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, RepositoryError>;
    async fn list_groups(&self, manager_id: &str) -> Result<Vec<Group>, RepositoryError>;
    /// Removes the group and every team in it. Group edits fail with
    /// `Conflict` while an active game uses the group.
    async fn delete_group(&self, group_id: &str) -> Result<(), RepositoryError>;

    /// Fails with `AlreadyExists` when the group already has a team of that name.
    async fn create_team(&self, team: &Team) -> Result<(), RepositoryError>;
    async fn get_team(&self, team_id: &str) -> Result<Option<Team>, RepositoryError>;
    async fn list_teams(&self, group_id: &str) -> Result<Vec<Team>, RepositoryError>;
    async fn delete_team(&self, team_id: &str) -> Result<(), RepositoryError>;

    /// Fails with `AlreadyExists` when the manager already has a player of that name.
    async fn create_player(&self, player: &Player) -> Result<(), RepositoryError>;
    async fn list_players(&self, manager_id: &str) -> Result<Vec<Player>, RepositoryError>;
    async fn delete_player(&self, player_id: &str) -> Result<(), RepositoryError>;
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A roster entry in a manager's player pool. Not linked to any login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: String,
    pub manager_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Player {
    pub fn new(manager_id: &str, name: &str) -> Self {
        Player {
            id: Uuid::new_v4().to_string(),
            manager_id: manager_id.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named pool of teams owned by one manager.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub id: String,
    pub manager_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn new(manager_id: &str, name: &str) -> Self {
        Group {
            id: Uuid::new_v4().to_string(),
            manager_id: manager_id.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub id: String,
    pub group_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn new(group_id: &str, name: &str) -> Self {
        Team {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }
}

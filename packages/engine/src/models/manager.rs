use serde::{Deserialize, Serialize};

/// Identifies the manager on whose behalf an operation runs.
/// Pools and games are owned per manager, so every service call takes one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManagerScope {
    pub manager_id: String,
}

impl ManagerScope {
    pub fn new(manager_id: &str) -> Self {
        ManagerScope {
            manager_id: manager_id.to_string(),
        }
    }

    pub fn owns(&self, manager_id: &str) -> bool {
        self.manager_id == manager_id
    }
}

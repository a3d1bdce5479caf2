use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per game. Holding the guard makes the caller the only
/// writer for that game; other games are unaffected.
#[derive(Clone, Default)]
pub struct GameLocks {
    inner: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl GameLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, game_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.inner.lock().await;
            locks.entry(game_id.to_string()).or_default().clone()
        };
        lock.lock_owned().await
    }

    pub async fn forget(&self, game_id: &str) {
        self.inner.lock().await.remove(game_id);
    }
}

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ApplicationStore, StoreError};
use crate::applications::repo_types::{Application, NewApplication};

/// Process-local store, used for tests and for running without a backend.
#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<Application>>,
}

impl MemoryStore {
    /// Insert with an explicit creation time.
    pub async fn insert_at(&self, new: NewApplication, created_at: OffsetDateTime) -> Application {
        let row = Application {
            id: Uuid::new_v4(),
            discord_username: new.discord_username,
            discord_id: new.discord_id,
            name: new.name,
            age: new.age,
            size: new.size,
            race: new.race,
            hair_type: new.hair_type,
            why_esex: new.why_esex,
            height: new.height,
            weight: new.weight,
            created_at,
        };
        self.rows.write().await.push(row.clone());
        row
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn create(&self, new: NewApplication) -> Result<Application, StoreError> {
        Ok(self.insert_at(new, OffsetDateTime::now_utc()).await)
    }

    async fn list_recent(&self) -> Result<Vec<Application>, StoreError> {
        let mut rows = self.rows.read().await.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

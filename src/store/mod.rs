mod memory;
mod postgres;
mod supabase;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use supabase::SupabaseStore;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::applications::repo_types::{Application, NewApplication};
use crate::config::StoreBackend;

pub const APPLICATIONS_TABLE: &str = "applications";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request to data store failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("data store answered {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("unexpected data store response: {0}")]
    Decode(String),
}

/// Remote persistence for application records.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn create(&self, new: NewApplication) -> Result<Application, StoreError>;

    /// Every record, most recently created first.
    async fn list_recent(&self) -> Result<Vec<Application>, StoreError>;
}

pub async fn connect(backend: &StoreBackend) -> anyhow::Result<Arc<dyn ApplicationStore>> {
    let store: Arc<dyn ApplicationStore> = match backend {
        StoreBackend::Supabase { url, key } => {
            tracing::info!(%url, "using supabase data store");
            Arc::new(SupabaseStore::new(url, key)?)
        }
        StoreBackend::Postgres { database_url } => {
            tracing::info!("using postgres data store");
            Arc::new(PgStore::connect(database_url).await?)
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory data store; records are lost on restart");
            Arc::new(MemoryStore::default())
        }
    };
    Ok(store)
}

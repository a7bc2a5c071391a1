use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Stored application record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub discord_username: String,
    pub discord_id: String,
    pub name: String,
    pub age: i32,
    pub size: String,
    pub race: String,
    pub hair_type: String,
    pub why_esex: String,
    pub height: String,
    pub weight: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Row to insert; `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApplication {
    pub discord_username: String,
    pub discord_id: String,
    pub name: String,
    pub age: i32,
    pub size: String,
    pub race: String,
    pub hair_type: String,
    pub why_esex: String,
    pub height: String,
    pub weight: String,
}

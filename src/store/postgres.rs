use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use super::{ApplicationStore, StoreError};
use crate::applications::repo_types::{Application, NewApplication};

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("connect to database")?;

        if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
            tracing::warn!(error = %e, "migration failed; continuing");
        }

        Ok(Self { db })
    }
}

#[async_trait]
impl ApplicationStore for PgStore {
    async fn create(&self, new: NewApplication) -> Result<Application, StoreError> {
        let row = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications
                (discord_username, discord_id, name, age, size, race, hair_type,
                 why_esex, height, weight)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, discord_username, discord_id, name, age, size, race,
                      hair_type, why_esex, height, weight, created_at
            "#,
        )
        .bind(new.discord_username)
        .bind(new.discord_id)
        .bind(new.name)
        .bind(new.age)
        .bind(new.size)
        .bind(new.race)
        .bind(new.hair_type)
        .bind(new.why_esex)
        .bind(new.height)
        .bind(new.weight)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn list_recent(&self) -> Result<Vec<Application>, StoreError> {
        let rows = sqlx::query_as::<_, Application>(
            r#"
            SELECT id, discord_username, discord_id, name, age, size, race,
                   hair_type, why_esex, height, weight, created_at
            FROM applications
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}

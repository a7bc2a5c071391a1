use async_trait::async_trait;
use reqwest::{header, Client, Response};

use super::{ApplicationStore, StoreError, APPLICATIONS_TABLE};
use crate::applications::repo_types::{Application, NewApplication};

/// Client for a hosted PostgREST endpoint (`<project>/rest/v1`).
#[derive(Clone)]
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    key: String,
}

impl SupabaseStore {
    pub fn new(url: &str, key: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("apply-portal/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: url.trim_end_matches('/').to_string(),
            key: key.to_string(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, APPLICATIONS_TABLE)
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.key))
    }
}

async fn ensure_success(res: Response) -> Result<Response, StoreError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    Err(StoreError::Status { status, body })
}

#[async_trait]
impl ApplicationStore for SupabaseStore {
    async fn create(&self, new: NewApplication) -> Result<Application, StoreError> {
        let res = self
            .authorized(self.client.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(&new)
            .send()
            .await?;
        let mut rows: Vec<Application> = ensure_success(res).await?.json().await?;
        if rows.is_empty() {
            return Err(StoreError::Decode("insert returned no rows".into()));
        }
        Ok(rows.swap_remove(0))
    }

    async fn list_recent(&self) -> Result<Vec<Application>, StoreError> {
        let res = self
            .authorized(self.client.get(self.table_url()))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;
        let rows = ensure_success(res).await?.json().await?;
        Ok(rows)
    }
}

use crate::config::AppConfig;
use crate::store::{self, ApplicationStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ApplicationStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let store = store::connect(&config.store).await?;
        Ok(Self { store, config })
    }

    /// In-memory state for tests. Admin login is `gatekeeper` / `test-password`.
    #[cfg(test)]
    pub fn fake(store: Arc<dyn ApplicationStore>) -> Self {
        use crate::config::{AdminCredentials, SessionConfig, StoreBackend};

        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            static_dir: "static".into(),
            store: StoreBackend::Memory,
            admin: AdminCredentials {
                username: "gatekeeper".into(),
                password_hash: crate::auth::password::test_password_hash().to_string(),
            },
            session: SessionConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
                secure_cookie: true,
            },
        });
        Self { store, config }
    }
}

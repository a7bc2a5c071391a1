use anyhow::Context;
use serde::Deserialize;

use crate::auth::password::hash_password;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    /// Adds `Secure` to the session cookie. Turn off only for plain-HTTP setups.
    pub secure_cookie: bool,
}

/// Logout only expires the cookie; a copied token stays valid until it
/// expires, so the default lifetime is kept short.
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 60;

fn session_ttl_minutes(raw: Option<String>) -> i64 {
    raw.and_then(|v| v.parse::<i64>().ok())
        .filter(|m| *m > 0)
        .unwrap_or(DEFAULT_SESSION_TTL_MINUTES)
}

fn flag(raw: Option<String>, default: bool) -> bool {
    match raw.as_deref().map(str::trim) {
        Some("1") | Some("true") | Some("yes") => true,
        Some("0") | Some("false") | Some("no") => false,
        _ => default,
    }
}

/// Admin login pair. The password is only ever held as an Argon2 PHC string.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Supabase { url: String, key: String },
    Postgres { database_url: String },
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
    pub store: StoreBackend,
    pub admin: AdminCredentials,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(v) => v.parse::<u16>().with_context(|| format!("invalid PORT {v:?}"))?,
            Err(_) => 3000,
        };

        let admin = AdminCredentials {
            username: std::env::var("ADMIN_USERNAME").context("ADMIN_USERNAME is not set")?,
            password_hash: admin_password_hash()?,
        };

        let session = SessionConfig {
            secret: std::env::var("SESSION_SECRET").context("SESSION_SECRET is not set")?,
            issuer: std::env::var("SESSION_ISSUER").unwrap_or_else(|_| "apply-portal".into()),
            audience: std::env::var("SESSION_AUDIENCE")
                .unwrap_or_else(|_| "apply-portal-admin".into()),
            ttl_minutes: session_ttl_minutes(std::env::var("SESSION_TTL_MINUTES").ok()),
            secure_cookie: flag(std::env::var("SESSION_COOKIE_SECURE").ok(), true),
        };

        Ok(Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into()),
            store: store_backend_from_env()?,
            admin,
            session,
        })
    }
}

fn admin_password_hash() -> anyhow::Result<String> {
    if let Ok(hash) = std::env::var("ADMIN_PASSWORD_HASH") {
        return Ok(hash);
    }
    let plain = std::env::var("ADMIN_PASSWORD")
        .context("neither ADMIN_PASSWORD_HASH nor ADMIN_PASSWORD is set")?;
    tracing::warn!("ADMIN_PASSWORD is set in plain text; prefer ADMIN_PASSWORD_HASH");
    hash_password(&plain)
}

fn store_backend_from_env() -> anyhow::Result<StoreBackend> {
    let supabase_url = std::env::var("SUPABASE_URL").ok();
    let database_url = std::env::var("DATABASE_URL").ok();

    let requested = std::env::var("STORE_BACKEND").ok().unwrap_or_else(|| {
        if supabase_url.is_some() {
            "supabase".into()
        } else if database_url.is_some() {
            "postgres".into()
        } else {
            "memory".into()
        }
    });

    match requested.to_ascii_lowercase().as_str() {
        "supabase" => Ok(StoreBackend::Supabase {
            url: supabase_url.context("STORE_BACKEND=supabase requires SUPABASE_URL")?,
            key: std::env::var("SUPABASE_KEY")
                .context("STORE_BACKEND=supabase requires SUPABASE_KEY")?,
        }),
        "postgres" => Ok(StoreBackend::Postgres {
            database_url: database_url.context("STORE_BACKEND=postgres requires DATABASE_URL")?,
        }),
        "memory" => Ok(StoreBackend::Memory),
        other => anyhow::bail!("unknown STORE_BACKEND {other:?}"),
    }
}

use anyhow::Context;

mod app;
mod applications;
mod auth;
mod config;
mod error;
mod state;
mod store;
mod views;

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "apply_portal=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // `apply-portal hash-password <password>` prints a value for ADMIN_PASSWORD_HASH.
    let mut args = std::env::args().skip(1);
    if let Some(cmd) = args.next() {
        anyhow::ensure!(cmd == "hash-password", "unknown command {cmd:?}");
        let plain = args.next().context("usage: apply-portal hash-password <password>")?;
        println!("{}", auth::password::hash_password(&plain)?);
        return Ok(());
    }

    init_tracing();

    let state = state::AppState::init().await?;
    let config = state.config.clone();
    let app = app::build_app(state);
    app::serve(app, &config).await
}

use crate::state::AppState;
use axum::Router;

pub mod extractors;
pub mod handlers;
pub mod password;
pub mod services;

pub fn page_router() -> Router<AppState> {
    handlers::page_routes()
}

pub fn api_router() -> Router<AppState> {
    handlers::api_routes()
}

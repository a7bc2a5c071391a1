pub mod dto;
pub mod handlers;
pub mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn page_router() -> Router<AppState> {
    handlers::page_routes()
}

pub fn api_router() -> Router<AppState> {
    handlers::api_routes()
}

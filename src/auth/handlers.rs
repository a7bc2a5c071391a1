use axum::{
    extract::{FromRef, State},
    http::{header::SET_COOKIE, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::post,
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        password::check_credentials,
        services::{cleared_session_cookie, session_cookie, SessionKeys},
    },
    error::AppError,
    state::AppState,
    views::{admin::render_login, Notice},
};

/// Login body for both the HTML form and the JSON API.
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub expires_in: u64,
}

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(login_form))
        .route("/admin/logout", post(logout))
}

pub fn api_routes() -> Router<AppState> {
    Router::new().route("/admin/login", post(login_api))
}

/// Checks the pair and issues a session token. A mismatch never says which
/// half was wrong.
fn authenticate(state: &AppState, payload: &LoginRequest) -> Result<String, AppError> {
    let ok = check_credentials(&state.config.admin, &payload.username, &payload.password)?;
    if !ok {
        warn!("admin login rejected");
        return Err(AppError::Unauthorized);
    }
    let token = SessionKeys::from_ref(state).sign(&payload.username)?;
    info!("admin logged in");
    Ok(token)
}

#[instrument(skip(state, payload))]
pub async fn login_form(State(state): State<AppState>, Form(payload): Form<LoginRequest>) -> Response {
    match authenticate(&state, &payload) {
        Ok(token) => (
            [(SET_COOKIE, session_cookie(&token, state.config.session.secure_cookie))],
            Redirect::to("/admin?notice=logged_in"),
        )
            .into_response(),
        Err(AppError::Unauthorized) => {
            let notice = Notice::failure("Login Failed", "Invalid username or password.");
            (StatusCode::UNAUTHORIZED, Html(render_login(Some(&notice)))).into_response()
        }
        Err(e) => {
            error!(error = %e, "login error");
            let notice = Notice::failure("Login Error", "An error occurred during login.");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_login(Some(&notice))),
            )
                .into_response()
        }
    }
}

/// Expires the cookie. The token itself stays valid until its `exp`.
pub async fn logout(State(state): State<AppState>) -> Response {
    (
        [(SET_COOKIE, cleared_session_cookie(state.config.session.secure_cookie))],
        Redirect::to("/admin?notice=logged_out"),
    )
        .into_response()
}

#[instrument(skip(state, payload))]
pub async fn login_api(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = authenticate(&state, &payload)?;
    Ok(Json(TokenResponse {
        token,
        expires_in: SessionKeys::from_ref(&state).ttl.as_secs(),
    }))
}

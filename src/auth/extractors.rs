use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use headers::{Cookie, HeaderMapExt};
use tracing::warn;

use super::services::{SessionKeys, SESSION_COOKIE};
use crate::error::AppError;

/// A request that carries a valid admin session, either as the session cookie
/// or as an `Authorization: Bearer` token. Holds the admin username.
#[derive(Debug, Clone)]
pub struct AdminSession(pub String);

fn session_token(parts: &Parts) -> Option<String> {
    if let Some(cookie) = parts.headers.typed_get::<Cookie>() {
        if let Some(token) = cookie.get(SESSION_COOKIE).filter(|t| !t.is_empty()) {
            return Some(token.to_string());
        }
    }

    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer ").or_else(|| v.strip_prefix("bearer ")))
        .map(str::to_string)
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = session_token(parts).ok_or(AppError::Unauthorized)?;
        let keys = SessionKeys::from_ref(state);
        match keys.verify(&token) {
            Ok(claims) => Ok(AdminSession(claims.sub)),
            Err(e) => {
                warn!(error = %e, "invalid or expired admin session");
                Err(AppError::Unauthorized)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(header: (&str, &str)) -> Parts {
        let (parts, _) = Request::builder()
            .header(header.0, header.1)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn reads_cookie() {
        let p = parts(("cookie", "theme=dark; admin_session=tok123"));
        assert_eq!(session_token(&p).as_deref(), Some("tok123"));
    }

    #[test]
    fn reads_bearer() {
        let p = parts(("authorization", "Bearer tok456"));
        assert_eq!(session_token(&p).as_deref(), Some("tok456"));
    }

    #[test]
    fn empty_cookie_is_absent() {
        let p = parts(("cookie", "admin_session="));
        assert_eq!(session_token(&p), None);
    }
}

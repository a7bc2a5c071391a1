use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    applications::{
        dto::ApplicationForm,
        repo_types::Application,
        services::{self, SubmitError},
    },
    auth::extractors::AdminSession,
    error::{AppError, ValidationError},
    state::AppState,
    views::{admin, form, Notice},
};

#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

impl NoticeQuery {
    fn notice(&self) -> Option<Notice> {
        self.notice.as_deref().and_then(Notice::from_key)
    }
}

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(form_page))
        .route("/apply", post(submit_form))
        .route("/admin", get(admin_page))
}

pub fn api_routes() -> Router<AppState> {
    Router::new().route(
        "/applications",
        post(create_application).get(list_applications),
    )
}

fn validation_notice(e: &ValidationError) -> Notice {
    match e {
        ValidationError::MissingFields(_) => {
            Notice::failure("Missing Fields", "Please fill out all required fields.")
        }
        other => Notice::failure("Invalid Fields", other.to_string()),
    }
}

pub async fn form_page(Query(q): Query<NoticeQuery>) -> Html<String> {
    Html(form::render_form(&ApplicationForm::default(), q.notice().as_ref()))
}

/// On success the browser is sent back to a blank form; on failure the
/// submitted values are rendered again.
#[instrument(skip(state, input))]
pub async fn submit_form(
    State(state): State<AppState>,
    Form(input): Form<ApplicationForm>,
) -> Response {
    match services::submit(state.store.as_ref(), &input).await {
        Ok(_) => Redirect::to("/?notice=submitted").into_response(),
        Err(SubmitError::Invalid(e)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(form::render_form(&input, Some(&validation_notice(&e)))),
        )
            .into_response(),
        Err(SubmitError::Store(_)) => {
            let notice = Notice::failure(
                "Submission Failed",
                "There was an error submitting your application. Please try again.",
            );
            (
                StatusCode::BAD_GATEWAY,
                Html(form::render_form(&input, Some(&notice))),
            )
                .into_response()
        }
    }
}

/// Login form without a session, otherwise the freshly loaded list.
#[instrument(skip(state, session, q))]
pub async fn admin_page(
    State(state): State<AppState>,
    session: Option<AdminSession>,
    Query(q): Query<NoticeQuery>,
) -> Response {
    if session.is_none() {
        return Html(admin::render_login(q.notice().as_ref())).into_response();
    }

    match services::list_applications(state.store.as_ref()).await {
        Ok(apps) => Html(admin::render_panel(&apps, q.notice().as_ref())).into_response(),
        Err(_) => {
            let notice = Notice::failure("Error", "Failed to load applications.");
            (
                StatusCode::BAD_GATEWAY,
                Html(admin::render_panel(&[], Some(&notice))),
            )
                .into_response()
        }
    }
}

#[instrument(skip(state, input))]
pub async fn create_application(
    State(state): State<AppState>,
    Json(input): Json<ApplicationForm>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    let app = services::submit(state.store.as_ref(), &input).await?;
    Ok((StatusCode::CREATED, Json(app)))
}

#[instrument(skip(state))]
pub async fn list_applications(
    State(state): State<AppState>,
    AdminSession(_admin): AdminSession,
) -> Result<Json<Vec<Application>>, AppError> {
    let apps = services::list_applications(state.store.as_ref()).await?;
    Ok(Json(apps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app::build_app,
        applications::{repo_types::NewApplication, services::tests::filled_form},
        auth::services::SessionKeys,
        store::{ApplicationStore, MemoryStore, StoreError},
    };
    use axum::{
        body::Body,
        extract::FromRef,
        http::{header, Request},
    };
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use time::macros::datetime;
    use tower::ServiceExt;

    struct DownStore;

    #[axum::async_trait]
    impl ApplicationStore for DownStore {
        async fn create(&self, _new: NewApplication) -> Result<Application, StoreError> {
            Err(StoreError::Decode("store is down".into()))
        }
        async fn list_recent(&self) -> Result<Vec<Application>, StoreError> {
            Err(StoreError::Decode("store is down".into()))
        }
    }

    fn encode_form(form: &ApplicationForm) -> String {
        let value = serde_json::to_value(form).unwrap();
        value
            .as_object()
            .unwrap()
            .iter()
            .map(|(k, v)| {
                let raw = v.as_str().unwrap_or_default();
                let encoded: String = raw
                    .bytes()
                    .map(|b| match b {
                        b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' => {
                            (b as char).to_string()
                        }
                        _ => format!("%{b:02X}"),
                    })
                    .collect();
                format!("{k}={encoded}")
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    fn post_form(uri: &str, body: String) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_text(res: Response) -> String {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn admin_cookie(state: &AppState) -> String {
        let token = SessionKeys::from_ref(state).sign("gatekeeper").unwrap();
        format!("admin_session={token}")
    }

    #[tokio::test]
    async fn successful_submit_redirects_to_blank_form() {
        let store = Arc::new(MemoryStore::default());
        let app = build_app(AppState::fake(store.clone()));

        let res = app
            .oneshot(post_form("/apply", encode_form(&filled_form())))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[header::LOCATION], "/?notice=submitted");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn blank_form_shows_success_notice_after_redirect() {
        let app = build_app(AppState::fake(Arc::new(MemoryStore::default())));
        let res = app
            .oneshot(Request::get("/?notice=submitted").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_text(res).await;
        assert!(html.contains("Application Submitted!"));
        assert!(html.contains(r#"name="name" value="""#));
    }

    #[tokio::test]
    async fn missing_field_rerenders_without_creating() {
        let store = Arc::new(MemoryStore::default());
        let app = build_app(AppState::fake(store.clone()));
        let mut form = filled_form();
        form.height.clear();

        let res = app.oneshot(post_form("/apply", encode_form(&form))).await.unwrap();

        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body_text(res).await;
        assert!(html.contains("Missing Fields"));
        assert!(html.contains(r#"value="Alex""#));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn other_race_is_stored_as_free_text() {
        let store = Arc::new(MemoryStore::default());
        let app = build_app(AppState::fake(store.clone()));
        let mut form = filled_form();
        form.race = "other".into();
        form.race_other = "Maori".into();

        let res = app.oneshot(post_form("/apply", encode_form(&form))).await.unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);

        let rows = store.list_recent().await.unwrap();
        assert_eq!(rows[0].race, "Maori");
    }

    #[tokio::test]
    async fn store_failure_keeps_form_populated() {
        let app = build_app(AppState::fake(Arc::new(DownStore)));
        let res = app
            .oneshot(post_form("/apply", encode_form(&filled_form())))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
        let html = body_text(res).await;
        assert!(html.contains("Submission Failed"));
        assert!(html.contains(r#"value="applicant""#));
    }

    #[tokio::test]
    async fn admin_page_without_session_shows_login() {
        let app = build_app(AppState::fake(Arc::new(MemoryStore::default())));
        let res = app
            .oneshot(Request::get("/admin").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let html = body_text(res).await;
        assert!(html.contains("Admin Access"));
        assert!(!html.contains("Applications</h2>"));
    }

    #[tokio::test]
    async fn admin_page_lists_newest_first() {
        let store = Arc::new(MemoryStore::default());
        for (name, at) in [
            ("second", datetime!(2024-02-02 09:00 UTC)),
            ("first", datetime!(2024-02-01 09:00 UTC)),
            ("third", datetime!(2024-02-03 09:00 UTC)),
        ] {
            let mut new = services::validate(&filled_form()).unwrap();
            new.name = name.into();
            store.insert_at(new, at).await;
        }
        let state = AppState::fake(store);
        let cookie = admin_cookie(&state);

        let res = build_app(state)
            .oneshot(
                Request::get("/admin")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let html = body_text(res).await;
        let third = html.find("<span>third</span>").unwrap();
        let second = html.find("<span>second</span>").unwrap();
        let first = html.find("<span>first</span>").unwrap();
        assert!(third < second && second < first);
    }

    #[tokio::test]
    async fn admin_page_reports_load_failure() {
        let state = AppState::fake(Arc::new(DownStore));
        let cookie = admin_cookie(&state);
        let res = build_app(state)
            .oneshot(
                Request::get("/admin")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
        let html = body_text(res).await;
        assert!(html.contains("Failed to load applications."));
        assert!(html.contains("No applications found."));
    }

    #[tokio::test]
    async fn api_create_and_list() {
        let store = Arc::new(MemoryStore::default());
        let state = AppState::fake(store);
        let cookie = admin_cookie(&state);
        let app = build_app(state);

        let res = app
            .clone()
            .oneshot(
                Request::post("/api/v1/applications")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&filled_form()).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let res = app
            .clone()
            .oneshot(Request::get("/api/v1/applications").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let res = app
            .oneshot(
                Request::get("/api/v1/applications")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let rows: Vec<Application> = serde_json::from_str(&body_text(res).await).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].discord_username, "applicant");
    }

    #[tokio::test]
    async fn api_rejects_invalid_age() {
        let app = build_app(AppState::fake(Arc::new(MemoryStore::default())));
        let mut form = filled_form();
        form.age = "abc".into();
        let res = app
            .oneshot(
                Request::post("/api/v1/applications")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&form).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_text(res).await.contains("age must be a whole number"));
    }
}

//! HTTP surface: page routes, the language switch endpoint, health and
//! static assets.
//!
//! Every handler attaches the visitor session, resolves the language once
//! and builds a fresh `TranslationContext` for the request. Rendering is
//! synchronous, so no context is held across an await point.

use crate::config::Config;
use crate::i18n::{DictionaryLoader, LanguagePreferences, TranslationContext, TranslationMetrics};
use crate::pages::{self, Page};
use crate::session::{SessionHandle, SessionStore};
use crate::switch::{self, SwitchForm};
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Form, Json, Router};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub loader: Arc<DictionaryLoader>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let loader = DictionaryLoader::new(config.lang_dir.clone());
        let sessions = SessionStore::new(config.session_cookie.clone(), config.session_ttl());

        Self {
            config: Arc::new(config),
            loader: Arc::new(loader),
            sessions,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(home))
        .route("/curriculum", get(curriculum))
        .route("/faculty", get(faculty))
        .route("/admissions", get(admissions))
        .route("/contact", get(contact))
        // Every method reaches the handler so a wrong one gets a JSON 405
        .route("/language-switch", any(language_switch))
        .route("/health", get(health))
        .nest_service("/assets", assets)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Periodically drop expired sessions.
pub fn spawn_session_sweeper(sessions: SessionStore, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            match sessions.purge_expired() {
                Ok(0) => {}
                Ok(removed) => debug!("Purged {} expired sessions", removed),
                Err(e) => warn!("Session sweep failed: {}", e),
            }
        }
    })
}

// ==================== Page handlers ====================

async fn home(State(state): State<AppState>, headers: HeaderMap) -> Response {
    render_page(&state, &headers, Page::Home, StatusCode::OK)
}

async fn curriculum(State(state): State<AppState>, headers: HeaderMap) -> Response {
    render_page(&state, &headers, Page::Curriculum, StatusCode::OK)
}

async fn faculty(State(state): State<AppState>, headers: HeaderMap) -> Response {
    render_page(&state, &headers, Page::Faculty, StatusCode::OK)
}

async fn admissions(State(state): State<AppState>, headers: HeaderMap) -> Response {
    render_page(&state, &headers, Page::Admissions, StatusCode::OK)
}

async fn contact(State(state): State<AppState>, headers: HeaderMap) -> Response {
    render_page(&state, &headers, Page::Contact, StatusCode::OK)
}

async fn not_found(State(state): State<AppState>, headers: HeaderMap) -> Response {
    render_page(&state, &headers, Page::NotFound, StatusCode::NOT_FOUND)
}

fn render_page(state: &AppState, headers: &HeaderMap, page: Page, status: StatusCode) -> Response {
    let mut preferences = LanguagePreferences::new(state.sessions.attach(headers));
    let language = preferences.get_current_language();

    let ctx = TranslationContext::new(language, Arc::clone(&state.loader));
    let html = pages::render(page, &ctx, &state.config);

    with_session_cookie((status, Html(html)).into_response(), preferences.session())
}

// ==================== API handlers ====================

async fn language_switch(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Response {
    // An unreadable body carries no `lang`, so it is answered like a missing parameter
    let form = match form {
        Ok(Form(fields)) => SwitchForm::from_fields(fields),
        Err(rejection) => {
            warn!("Language switch body not readable as a form: {}", rejection);
            SwitchForm::default()
        }
    };
    let mut preferences = LanguagePreferences::new(state.sessions.attach(&headers));

    let response = switch::process_language_switch(&method, &form, &mut preferences);
    with_session_cookie(response.into_response(), preferences.session())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "translations": TranslationMetrics::global().report(),
    }))
}

/// Attach `Set-Cookie` when this request created the visitor's session.
fn with_session_cookie(mut response: Response, session: &SessionHandle) -> Response {
    if let Some(cookie) = session.set_cookie() {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => warn!("Dropping invalid session cookie: {}", e),
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::session::SessionState;

    fn state() -> AppState {
        AppState::new(Config {
            lang_dir: format!("{}/lang", env!("CARGO_MANIFEST_DIR")).into(),
            ..Config::default()
        })
    }

    // ==================== Page Tests ====================

    #[test]
    fn test_fresh_visit_issues_cookie_and_spanish_page() {
        let state = state();
        let response = render_page(&state, &HeaderMap::new(), Page::Home, StatusCode::OK);

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers().get(header::SET_COOKIE).expect("cookie issued");
        assert!(cookie.to_str().unwrap().starts_with("SITE_SESSION="));
        assert_eq!(state.sessions.len(), 1);
    }

    #[test]
    fn test_returning_visit_reuses_session() {
        let state = state();
        let mut session = state.sessions.attach(&HeaderMap::new());
        session.set("language", "en").unwrap();
        let id = session.id().unwrap().to_string();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("SITE_SESSION={}", id)).unwrap(),
        );
        let response = render_page(&state, &headers, Page::Faculty, StatusCode::OK);

        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(state.sessions.len(), 1);

        let mut prefs = LanguagePreferences::new(state.sessions.attach(&headers));
        assert_eq!(prefs.get_current_language(), Language::ENGLISH);
    }

    #[test]
    fn test_not_found_status() {
        let state = state();
        let response = render_page(&state, &HeaderMap::new(), Page::NotFound, StatusCode::NOT_FOUND);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // ==================== Sweeper Tests ====================

    #[tokio::test]
    async fn test_sweeper_purges_expired_sessions() {
        let sessions = SessionStore::new("SITE_SESSION", Duration::from_millis(10));
        let mut handle = sessions.attach(&HeaderMap::new());
        handle.set("language", "es").unwrap();
        assert_eq!(sessions.len(), 1);

        let task = spawn_session_sweeper(sessions.clone(), Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(100)).await;
        task.abort();

        assert!(sessions.is_empty());
    }
}

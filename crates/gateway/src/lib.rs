//! Web front end for LitLens.
//!
//! Serves one server-rendered page with two tabs (chat & review, paper
//! comparison). Every form submission runs one pipeline to completion and
//! re-renders the page for the submitting session.
//!
//! Built on Axum; sessions are tracked with an `HttpOnly` cookie.

pub mod frontend;
pub mod render;
pub mod session;

use std::sync::Arc;

use axum::extract::multipart::MultipartError;
use axum::{
    Form, Router,
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::{HeaderMap, header},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
};
use litlens_agent::ResearchLab;
use litlens_config::AppConfig;
use litlens_documents::UploadedDocument;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use render::{Alert, PageView, Tab};
use session::SessionRegistry;

/// Shared application state for the gateway.
pub struct GatewayState {
    pub lab: Arc<ResearchLab>,
    pub sessions: SessionRegistry,
    /// Server-side key used when the session has none
    pub fallback_key: Option<String>,
    pub max_upload_bytes: usize,
}

pub type SharedState = Arc<GatewayState>;

impl GatewayState {
    pub fn new(lab: Arc<ResearchLab>) -> Self {
        Self {
            lab,
            sessions: SessionRegistry::new(),
            fallback_key: None,
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            fallback_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            max_upload_bytes: config.gateway.max_upload_mb.saturating_mul(1024 * 1024),
            ..Self::new(Arc::new(ResearchLab::from_config(config)))
        }
    }

    /// Pick the key for this submission: the form field, then the one
    /// remembered for the session, then the server fallback.
    async fn resolve_key(&self, session: &str, submitted: Option<&str>) -> Option<String> {
        if let Some(key) = submitted.map(str::trim).filter(|k| !k.is_empty()) {
            self.sessions.remember_key(session, key).await;
            return Some(key.to_string());
        }
        match self.sessions.api_key(session).await {
            Some(key) => Some(key),
            None => self.fallback_key.clone(),
        }
    }

    async fn key_available(&self, session: &str) -> bool {
        self.fallback_key.is_some() || self.sessions.api_key(session).await.is_some()
    }
}

/// Build the Axum router with all page routes.
pub fn build_router(state: SharedState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/", get(index_handler))
        .route("/chat", post(chat_handler))
        .route("/compare", post(compare_handler))
        .route("/health", get(health_handler))
        .merge(frontend::frontend_router())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let state = Arc::new(GatewayState::from_config(&config));
    let app = build_router(state);

    info!(addr = %addr, "LitLens gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Deserialize)]
struct IndexQuery {
    tab: Option<String>,
}

async fn index_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<IndexQuery>,
) -> Response {
    let (session, created) = state
        .sessions
        .resolve(session::session_id(&headers).as_deref())
        .await;

    let view = PageView {
        tab: Tab::from_query(query.tab.as_deref()),
        history: state.sessions.history(&session).await,
        key_remembered: state.key_available(&session).await,
        ..Default::default()
    };
    page_response(&session, created, &view)
}

#[derive(Default)]
struct ChatForm {
    query: String,
    api_key: Option<String>,
    documents: Vec<UploadedDocument>,
}

async fn read_chat_form(mut multipart: Multipart) -> Result<ChatForm, MultipartError> {
    let mut form = ChatForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "query" => form.query = field.text().await?,
            "api_key" => form.api_key = Some(field.text().await?),
            "pdfs" => {
                let filename = field.file_name().unwrap_or("upload.pdf").to_string();
                let bytes = field.bytes().await?;
                // Browsers send an empty part when no file was chosen.
                if !bytes.is_empty() {
                    form.documents
                        .push(UploadedDocument::new(filename, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn chat_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let (session, created) = state
        .sessions
        .resolve(session::session_id(&headers).as_deref())
        .await;
    let mut view = PageView::default();

    match read_chat_form(multipart).await {
        Ok(form) => {
            let api_key = state.resolve_key(&session, form.api_key.as_deref()).await;
            info!(documents = form.documents.len(), "Chat submission");

            match state
                .lab
                .chat(&form.query, form.documents, api_key.as_deref())
                .await
            {
                Ok(turn) => {
                    state.sessions.append(&session, turn.answer).await;
                    view.references = Some(turn.references);
                    view.skipped = turn.skipped_documents;
                }
                Err(e) => {
                    if e.is_user_warning() {
                        warn!(error = %e, "Chat submission rejected");
                    } else {
                        error!(error = %e, "Chat failed");
                    }
                    view.alert = Some(Alert::from(&e));
                }
            }
        }
        Err(e) => {
            warn!(error = %e, "Could not read chat form");
            view.alert = Some(Alert::Error(format!("Could not read the upload: {e}")));
        }
    }

    view.history = state.sessions.history(&session).await;
    view.key_remembered = state.key_available(&session).await;
    page_response(&session, created, &view)
}

#[derive(Deserialize)]
struct CompareForm {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    paper_a: String,
    #[serde(default)]
    paper_b: String,
}

async fn compare_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Form(form): Form<CompareForm>,
) -> Response {
    let (session, created) = state
        .sessions
        .resolve(session::session_id(&headers).as_deref())
        .await;
    let api_key = state.resolve_key(&session, form.api_key.as_deref()).await;

    let mut view = PageView {
        tab: Tab::Compare,
        ..Default::default()
    };

    match state
        .lab
        .compare(&form.paper_a, &form.paper_b, api_key.as_deref())
        .await
    {
        Ok(result) => view.comparison = Some(result),
        Err(e) => {
            if e.is_user_warning() {
                warn!(error = %e, "Comparison rejected");
            } else {
                error!(error = %e, "Comparison failed");
            }
            view.alert = Some(Alert::from(&e));
        }
    }

    view.paper_a = form.paper_a;
    view.paper_b = form.paper_b;
    view.key_remembered = state.key_available(&session).await;
    page_response(&session, created, &view)
}

fn page_response(session: &str, created: bool, view: &PageView) -> Response {
    let mut response = Html(render::render_page(view)).into_response();
    if created {
        if let Some(cookie) = session::session_cookie(session) {
            response.headers_mut().insert(header::SET_COOKIE, cookie);
        }
    }
    response
}

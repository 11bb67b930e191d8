//! Per-browser sessions.
//!
//! Each browser gets an opaque id in the `litlens_session` cookie. The
//! session holds the chat history and the API key last entered, so the
//! key field does not have to be re-typed on every submission.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::http::{HeaderMap, HeaderValue, header};
use chrono::{DateTime, Utc};
use litlens_core::session::ChatHistory;
use tokio::sync::RwLock;
use tracing::debug;

pub const SESSION_COOKIE: &str = "litlens_session";

/// Least recently used sessions are evicted past this many.
const MAX_SESSIONS: usize = 10_000;

pub struct Session {
    pub history: ChatHistory,
    api_key: Option<String>,
    created_at: DateTime<Utc>,
    /// Registry tick of the last request that resolved to this session
    last_used: u64,
}

impl Session {
    fn new(tick: u64) -> Self {
        Self {
            history: ChatHistory::new(),
            api_key: None,
            created_at: Utc::now(),
            last_used: tick,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("history", &self.history.len())
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("created_at", &self.created_at)
            .field("last_used", &self.last_used)
            .finish()
    }
}

pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Session>>,
    capacity: usize,
    clock: AtomicU64,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_capacity(MAX_SESSIONS)
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding at most `capacity` sessions.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
            clock: AtomicU64::new(0),
        }
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    /// Return the id of an existing session, or create a new one.
    ///
    /// The boolean is `true` when a session was created and the cookie
    /// must be (re)issued.
    pub async fn resolve(&self, requested: Option<&str>) -> (String, bool) {
        let mut sessions = self.sessions.write().await;

        if let Some(id) = requested {
            if let Some(session) = sessions.get_mut(id) {
                session.last_used = self.tick();
                return (id.to_string(), false);
            }
        }

        if sessions.len() >= self.capacity {
            let idle = sessions
                .iter()
                .min_by_key(|(_, s)| s.last_used)
                .map(|(id, _)| id.clone());
            if let Some(idle) = idle {
                debug!("Evicting least recently used session");
                sessions.remove(&idle);
            }
        }

        let id = uuid::Uuid::new_v4().to_string();
        sessions.insert(id.clone(), Session::new(self.tick()));
        debug!(sessions = sessions.len(), "Session created");
        (id, true)
    }

    /// Snapshot of the session's history, oldest first.
    pub async fn history(&self, id: &str) -> Vec<String> {
        self.sessions
            .read()
            .await
            .get(id)
            .map(|s| s.history.iter().map(|e| e.content.clone()).collect())
            .unwrap_or_default()
    }

    /// Append one answer to the session's history.
    pub async fn append(&self, id: &str, answer: impl Into<String>) -> Option<usize> {
        self.sessions
            .write()
            .await
            .get_mut(id)
            .map(|s| s.history.append(answer))
    }

    pub async fn remember_key(&self, id: &str, key: &str) {
        if let Some(session) = self.sessions.write().await.get_mut(id) {
            session.api_key = Some(key.to_string());
        }
    }

    pub async fn api_key(&self, id: &str) -> Option<String> {
        self.sessions
            .read()
            .await
            .get(id)
            .and_then(|s| s.api_key.clone())
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Read the session id from the request's `Cookie` headers.
pub fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value for a session id.
pub fn session_cookie(id: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax"
    ))
    .ok()
}

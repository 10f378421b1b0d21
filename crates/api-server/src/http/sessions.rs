use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::Json;
use axum::extract::{Extension, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use shared::models::{CreateSessionResponse, OkResponse, SetCredentialRequest};
use shared::pages::render_shell;
use shared::session::SessionState;
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::AppState;
use super::errors::unknown_session_response;

const SESSION_ID_HEADER: &str = "x-session-id";

type SharedSession = Arc<AsyncMutex<SessionState>>;

struct SessionEntry {
    state: SharedSession,
    last_seen: Instant,
}

/// Live sessions keyed by id. Each session has its own async lock so a slow
/// completions call in one session never blocks another. Sessions idle past
/// the configured TTL are dropped by the pruner.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    entries: Arc<Mutex<HashMap<Uuid, SessionEntry>>>,
}

impl SessionRegistry {
    pub fn create(&self) -> (Uuid, SharedSession) {
        let state = SessionState::new();
        let id = state.id();
        let session = Arc::new(AsyncMutex::new(state));
        self.entries
            .lock()
            .expect("session registry mutex should not be poisoned")
            .insert(
                id,
                SessionEntry {
                    state: session.clone(),
                    last_seen: Instant::now(),
                },
            );
        (id, session)
    }

    /// Looks a session up and marks it as seen.
    pub fn get(&self, id: Uuid) -> Option<SharedSession> {
        self.get_at(id, Instant::now())
    }

    fn get_at(&self, id: Uuid, now: Instant) -> Option<SharedSession> {
        let mut entries = self
            .entries
            .lock()
            .expect("session registry mutex should not be poisoned");
        let entry = entries.get_mut(&id)?;
        entry.last_seen = now;
        Some(entry.state.clone())
    }

    pub fn remove(&self, id: Uuid) -> bool {
        self.entries
            .lock()
            .expect("session registry mutex should not be poisoned")
            .remove(&id)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .expect("session registry mutex should not be poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn spawn_pruner(&self, interval: Duration, idle_ttl: Duration) -> JoinHandle<()> {
        let registry = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let pruned = registry.prune_idle_at(Instant::now(), idle_ttl);
                if pruned > 0 {
                    info!(pruned, live_sessions = registry.len(), "idle sessions expired");
                }
            }
        })
    }

    /// Drops sessions last seen at or before `now - idle_ttl`. Returns how many
    /// were dropped.
    fn prune_idle_at(&self, now: Instant, idle_ttl: Duration) -> usize {
        let cutoff = now.checked_sub(idle_ttl).unwrap_or(now);
        let mut entries = self
            .entries
            .lock()
            .expect("session registry prune mutex should not be poisoned");
        let before = entries.len();
        entries.retain(|_, entry| entry.last_seen > cutoff);
        before - entries.len()
    }
}

#[derive(Clone)]
pub(super) struct SessionHandle {
    pub(super) id: Uuid,
    pub(super) state: SharedSession,
}

pub(super) async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let session_id = req
        .headers()
        .get(SESSION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok());

    let Some(session_id) = session_id else {
        warn!("missing or malformed session header");
        return unknown_session_response();
    };

    let Some(session) = state.sessions.get(session_id) else {
        debug!(session_id = %session_id, "session not found");
        return unknown_session_response();
    };

    req.extensions_mut().insert(SessionHandle {
        id: session_id,
        state: session,
    });
    next.run(req).await
}

pub(super) async fn create_session(State(state): State<AppState>) -> Response {
    let (session_id, session) = state.sessions.create();
    let shell = render_shell(&*session.lock().await, state.presentation);
    info!(session_id = %session_id, live_sessions = state.sessions.len(), "session started");

    (
        StatusCode::CREATED,
        Json(CreateSessionResponse { session_id, shell }),
    )
        .into_response()
}

pub(super) async fn get_session(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
) -> Response {
    let shell = render_shell(&*session.state.lock().await, state.presentation);
    (StatusCode::OK, Json(shell)).into_response()
}

pub(super) async fn end_session(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
) -> Response {
    if !state.sessions.remove(session.id) {
        return unknown_session_response();
    }

    info!(session_id = %session.id, "session ended");
    (StatusCode::OK, Json(OkResponse { ok: true })).into_response()
}

pub(super) async fn reset_session(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
) -> Response {
    let mut guard = session.state.lock().await;
    guard.reset();
    info!(session_id = %session.id, "session reset");

    (StatusCode::OK, Json(render_shell(&guard, state.presentation))).into_response()
}

pub(super) async fn set_credential(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Json(req): Json<SetCredentialRequest>,
) -> Response {
    let mut guard = session.state.lock().await;
    guard.set_credential(&req.api_key);
    info!(
        session_id = %session.id,
        configured = guard.has_credential(),
        "credential updated"
    );

    (StatusCode::OK, Json(render_shell(&guard, state.presentation))).into_response()
}

pub(super) async fn clear_credential(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
) -> Response {
    let mut guard = session.state.lock().await;
    guard.clear_credential();
    info!(session_id = %session.id, "credential cleared");

    (StatusCode::OK, Json(render_shell(&guard, state.presentation))).into_response()
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::SessionRegistry;

    #[test]
    fn registry_tracks_created_and_removed_sessions() {
        let registry = SessionRegistry::default();
        let (first, _) = registry.create();
        let (second, _) = registry.create();
        assert_ne!(first, second);
        assert_eq!(registry.len(), 2);

        assert!(registry.get(first).is_some());
        assert!(registry.remove(first));
        assert!(!registry.remove(first));
        assert!(registry.get(first).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn idle_sessions_are_pruned_and_lookups_keep_sessions_alive() {
        let registry = SessionRegistry::default();
        let idle_ttl = Duration::from_secs(30 * 60);
        let (active, _) = registry.create();
        let (abandoned, _) = registry.create();
        let created_at = Instant::now();

        assert_eq!(registry.prune_idle_at(created_at, idle_ttl), 0);
        assert_eq!(registry.len(), 2);

        let later = created_at + Duration::from_secs(40 * 60);
        assert!(registry.get_at(active, later).is_some());

        let pruned = registry.prune_idle_at(later + Duration::from_secs(60), idle_ttl);
        assert_eq!(pruned, 1);
        assert!(registry.get(active).is_some());
        assert!(registry.get(abandoned).is_none());
    }
}

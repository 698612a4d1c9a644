//! Per-browser session state.

use crate::cookies::{
    append_set_cookie, read_cookie, removal_cookie, session_cookie, RequestJar, SESSION_COOKIE,
};
use axum::http::HeaderMap;
use edupass_session::{AuthState, SessionBinder};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Idle time after which a session is dropped.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(12 * 60 * 60);

/// How often the background sweep runs.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Auth state of every live browser session, keyed by session id.
///
/// An entry that has not been touched for the idle timeout is treated as
/// absent and removed by the next sweep. A returning browser then goes
/// through passive login again.
#[derive(Clone)]
pub struct SessionRegistry {
    // sid -> (state, last_seen)
    sessions: Arc<RwLock<HashMap<String, (AuthState, Instant)>>>,
    idle_timeout: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TIMEOUT)
    }
}

impl SessionRegistry {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout,
        }
    }

    fn is_expired(&self, last_seen: Instant, now: Instant) -> bool {
        now.duration_since(last_seen) >= self.idle_timeout
    }

    /// State of session `sid`, if known and not idle-expired.
    pub async fn get(&self, sid: &str) -> Option<AuthState> {
        let r = self.sessions.read().await;
        let (state, last_seen) = r.get(sid)?;
        if self.is_expired(*last_seen, Instant::now()) {
            return None;
        }
        Some(state.clone())
    }

    /// Stores the state of session `sid` and marks it as seen now.
    pub async fn put(&self, sid: String, state: AuthState) {
        let mut w = self.sessions.write().await;
        w.insert(sid, (state, Instant::now()));
    }

    /// Drops session `sid`.
    pub async fn remove(&self, sid: &str) {
        let mut w = self.sessions.write().await;
        w.remove(sid);
    }

    /// Drops every idle-expired session. Returns how many were dropped.
    pub async fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut w = self.sessions.write().await;
        let before = w.len();
        w.retain(|_, (_, last_seen)| !self.is_expired(*last_seen, now));
        before - w.len()
    }

    /// Start a background loop that sweeps expired sessions.
    pub fn spawn_sweeper(&self, every: Duration) {
        let registry = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                let dropped = registry.sweep().await;
                if dropped > 0 {
                    debug!(dropped, "Expired sessions swept");
                }
            }
        });
    }

    /// Number of tracked sessions, expired ones included until swept.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// One request's view of its session.
///
/// Opened from the request cookies, handed to a handler as a binder, then
/// closed to write the state back and produce `Set-Cookie` headers.
pub struct RequestSession {
    sid: Option<String>,
    pub binder: SessionBinder<RequestJar>,
}

impl RequestSession {
    pub async fn open(registry: &SessionRegistry, headers: &HeaderMap) -> Self {
        let mut sid = None;
        let mut state = AuthState::default();

        if let Some(id) = read_cookie(headers, SESSION_COOKIE) {
            if let Some(known) = registry.get(&id).await {
                sid = Some(id);
                state = known;
            }
        }

        Self {
            sid,
            binder: SessionBinder::new(state, RequestJar::from_headers(headers)),
        }
    }

    /// Writes the state back and returns the response cookies.
    ///
    /// A session that never left the default state is not tracked, so
    /// anonymous visitors do not grow the registry. A signed-out session is
    /// dropped along with its id cookie: the credential cookie is expired in
    /// the same response, so nothing is left to recall.
    pub async fn close(self, registry: &SessionRegistry) -> HeaderMap {
        let (state, jar) = self.binder.into_parts();
        let mut headers = HeaderMap::new();

        if state.signed_out {
            if let Some(sid) = self.sid {
                registry.remove(&sid).await;
                append_set_cookie(&mut headers, &removal_cookie(SESSION_COOKIE));
            }
        } else {
            match self.sid {
                Some(sid) => registry.put(sid, state).await,
                None if state != AuthState::default() => {
                    let sid = Uuid::new_v4().to_string();
                    append_set_cookie(&mut headers, &session_cookie(SESSION_COOKIE, &sid));
                    registry.put(sid, state).await;
                }
                None => {}
            }
        }

        jar.write_to(&mut headers);
        headers
    }
}

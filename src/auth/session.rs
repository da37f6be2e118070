use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use moka::future::Cache;
use std::time::Duration;
use tracing::trace;
use uuid::Uuid;

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "session";

const MAX_SESSIONS: u64 = 10_000;
const MAX_PENDING_REDIRECTS: u64 = 10_000;

/// How long a page remembered by the login gate waits for a login
pub const REDIRECT_TTL: Duration = Duration::from_secs(10 * 60);

/// A logged in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: i32,
    pub username: String,
}

impl Session {
    pub fn new(user_id: i32, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }
}

/// In-memory session store.
///
/// Only logins add sessions; they expire after the configured idle time.
/// Pages remembered for anonymous visitors live in a separate short-lived
/// cache keyed by the same cookie id, so anonymous traffic never competes
/// with logged in users for space.
#[derive(Clone, Debug)]
pub struct SessionStore {
    sessions: Cache<String, Session>,
    pending_redirects: Cache<String, String>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, MAX_SESSIONS, MAX_PENDING_REDIRECTS)
    }

    pub fn with_capacity(ttl: Duration, max_sessions: u64, max_pending_redirects: u64) -> Self {
        Self {
            sessions: Cache::builder()
                .max_capacity(max_sessions)
                .time_to_idle(ttl)
                .build(),
            pending_redirects: Cache::builder()
                .max_capacity(max_pending_redirects)
                .time_to_live(REDIRECT_TTL)
                .build(),
        }
    }

    pub async fn get(&self, id: &str) -> Option<Session> {
        self.sessions.get(id).await
    }

    /// Session referenced by the request's cookie, if any
    pub async fn from_jar(&self, jar: &CookieJar) -> Option<(String, Session)> {
        let id = session_id(jar)?;
        let session = self.get(&id).await?;
        Some((id, session))
    }

    /// Store a session under a new random id and return the id
    pub async fn create(&self, session: Session) -> String {
        let id = new_session_id();
        trace!("Creating session");
        self.sessions.insert(id.clone(), session).await;
        id
    }

    /// Forget both the session and any page remembered under `id`
    pub async fn remove(&self, id: &str) {
        self.sessions.invalidate(id).await;
        self.pending_redirects.invalidate(id).await;
    }

    /// Remember where to send the visitor holding `id` once they log in
    pub async fn remember_redirect(&self, id: &str, target: String) {
        self.pending_redirects.insert(id.to_string(), target).await;
    }

    /// The remembered page for `id`; it is handed out once
    pub async fn take_redirect(&self, id: &str) -> Option<String> {
        self.pending_redirects.remove(id).await
    }

    #[cfg(test)]
    pub async fn session_count(&self) -> u64 {
        self.sessions.run_pending_tasks().await;
        self.sessions.entry_count()
    }
}

pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// Value of the session cookie, if the request carries one
pub fn session_id(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|cookie| cookie.value().to_string())
}

/// Cookie pointing the browser at session `id`
pub fn session_cookie(id: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie that clears the session cookie
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::http::cookie::HttpCookie;

type Attribute = Arc<dyn Any + Send + Sync>;

struct SessionState {
    attributes: HashMap<String, Attribute>,
    last_accessed: Instant,
}

/// Handle to one server-side session.
///
/// Cloning is cheap and every clone sees the same attributes, so a write
/// through one handle is visible to any later read through another.
#[derive(Clone)]
pub struct Session {
    id: Arc<str>,
    state: Arc<RwLock<SessionState>>,
}

impl Session {
    fn new(id: String) -> Self {
        Self {
            id: id.into(),
            state: Arc::new(RwLock::new(SessionState {
                attributes: HashMap::new(),
                last_accessed: Instant::now(),
            })),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub async fn set_attribute<T>(&self, key: impl Into<String>, value: T)
    where
        T: Any + Send + Sync,
    {
        let mut state = self.state.write().await;
        state.attributes.insert(key.into(), Arc::new(value));
    }

    /// Returns a clone of the attribute stored under `key`, if it exists
    /// and has type `T`.
    pub async fn get_attribute<T>(&self, key: &str) -> Option<T>
    where
        T: Any + Clone + Send + Sync,
    {
        let state = self.state.read().await;
        state
            .attributes
            .get(key)
            .and_then(|value| value.downcast_ref::<T>())
            .cloned()
    }

    pub async fn has_attribute(&self, key: &str) -> bool {
        self.state.read().await.attributes.contains_key(key)
    }

    async fn touch(&self) {
        self.state.write().await.last_accessed = Instant::now();
    }

    async fn idle_for(&self) -> Duration {
        self.state.read().await.last_accessed.elapsed()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("id", &self.id).finish()
    }
}

/// Process-wide session registry.
///
/// Sessions never expire unless an idle timeout is configured; with one,
/// a session idle for longer than the timeout is dropped on its next lookup.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    idle_timeout: Option<Duration>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Option<Duration>) -> Self {
        Self {
            sessions: Arc::default(),
            idle_timeout,
        }
    }

    /// Resolves the session named by the cookie's `JSESSIONID`. Never creates one.
    pub async fn resolve(&self, cookie: &HttpCookie) -> Option<Session> {
        let id = cookie.session_id()?;
        self.find(id).await
    }

    pub async fn find(&self, id: &str) -> Option<Session> {
        let session = self.sessions.read().await.get(id).cloned()?;

        if let Some(timeout) = self.idle_timeout {
            if session.idle_for().await > timeout {
                tracing::debug!(session = %id, "Session expired");
                self.remove(id).await;
                return None;
            }
        }

        session.touch().await;
        Some(session)
    }

    /// Creates a session under a fresh random identifier and registers it.
    pub async fn create_and_register(&self) -> Session {
        let mut sessions = self.sessions.write().await;

        let id = loop {
            let candidate = Uuid::new_v4().to_string();
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };

        let session = Session::new(id.clone());
        sessions.insert(id, session.clone());
        tracing::debug!(session = %session.id(), "Session created");

        session
    }

    pub async fn remove(&self, id: &str) -> Option<Session> {
        self.sessions.write().await.remove(id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

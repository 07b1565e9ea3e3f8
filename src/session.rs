use axum::http::{header, HeaderMap};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

const SESSION_ID_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Session store is unavailable")]
    Unavailable,
}

/// Per-visitor key-value state.
pub trait SessionState {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError>;
}

/// A bare map is a session that always succeeds (used in tests and tools).
impl SessionState for HashMap<String, String> {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(HashMap::get(self, key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug)]
struct SessionEntry {
    values: HashMap<String, String>,
    last_seen: Instant,
}

/// In-process session store keyed by an opaque id carried in a cookie.
///
/// Sessions idle for longer than the TTL are treated as absent and removed
/// by `purge_expired`.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, SessionEntry>>>,
    cookie_name: String,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(cookie_name: impl Into<String>, ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            cookie_name: cookie_name.into(),
            ttl,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Handle for the session named by the request's cookie, if it is live.
    /// An unknown or expired id is ignored; a fresh id is issued on first
    /// write instead.
    pub fn attach(&self, headers: &HeaderMap) -> SessionHandle {
        let id = session_id_from_headers(headers, &self.cookie_name)
            .filter(|id| self.is_live(id).unwrap_or(false));

        SessionHandle {
            store: self.clone(),
            id,
            issued: false,
        }
    }

    /// Number of stored sessions, expired ones included until purged.
    ///
    /// A poisoned lock is logged and the map is still read.
    pub fn len(&self) -> usize {
        match self.sessions.lock() {
            Ok(sessions) => sessions.len(),
            Err(poisoned) => {
                warn!("Session store lock poisoned; counting anyway");
                poisoned.into_inner().len()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every session idle past the TTL. Returns how many were removed.
    pub fn purge_expired(&self) -> Result<usize, SessionError> {
        let mut sessions = self.sessions.lock().map_err(|_| SessionError::Unavailable)?;
        let before = sessions.len();
        let ttl = self.ttl;
        sessions.retain(|_, entry| entry.last_seen.elapsed() <= ttl);
        Ok(before - sessions.len())
    }

    fn is_live(&self, id: &str) -> Result<bool, SessionError> {
        let sessions = self.sessions.lock().map_err(|_| SessionError::Unavailable)?;
        Ok(sessions
            .get(id)
            .map(|entry| entry.last_seen.elapsed() <= self.ttl)
            .unwrap_or(false))
    }

    fn create(&self) -> Result<String, SessionError> {
        let mut sessions = self.sessions.lock().map_err(|_| SessionError::Unavailable)?;

        let mut id = generate_session_id();
        while sessions.contains_key(&id) {
            id = generate_session_id();
        }

        sessions.insert(
            id.clone(),
            SessionEntry {
                values: HashMap::new(),
                last_seen: Instant::now(),
            },
        );
        debug!("Created session ({} active)", sessions.len());
        Ok(id)
    }

    fn read(&self, id: &str, key: &str) -> Result<Option<String>, SessionError> {
        let mut sessions = self.sessions.lock().map_err(|_| SessionError::Unavailable)?;

        match sessions.get_mut(id) {
            Some(entry) if entry.last_seen.elapsed() <= self.ttl => {
                entry.last_seen = Instant::now();
                Ok(entry.values.get(key).cloned())
            }
            Some(_) => {
                sessions.remove(id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn write(&self, id: &str, key: &str, value: &str) -> Result<(), SessionError> {
        let mut sessions = self.sessions.lock().map_err(|_| SessionError::Unavailable)?;

        let entry = sessions.entry(id.to_string()).or_insert_with(|| SessionEntry {
            values: HashMap::new(),
            last_seen: Instant::now(),
        });
        entry.last_seen = Instant::now();
        entry.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    #[cfg(test)]
    fn poison(&self) {
        let sessions = Arc::clone(&self.sessions);
        let _ = std::thread::spawn(move || {
            let _guard = sessions.lock().unwrap();
            panic!("poisoning session store");
        })
        .join();
    }
}

/// One request's view of a visitor session.
#[derive(Debug)]
pub struct SessionHandle {
    store: SessionStore,
    id: Option<String>,
    issued: bool,
}

impl SessionHandle {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// `Set-Cookie` value when this request created the session.
    pub fn set_cookie(&self) -> Option<String> {
        match (&self.id, self.issued) {
            (Some(id), true) => Some(format!(
                "{}={}; Path=/; HttpOnly; SameSite=Lax",
                self.store.cookie_name, id
            )),
            _ => None,
        }
    }
}

impl SessionState for SessionHandle {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        match &self.id {
            Some(id) => self.store.read(id, key),
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        let id = match &self.id {
            Some(id) => id.clone(),
            None => {
                let id = self.store.create()?;
                self.id = Some(id.clone());
                self.issued = true;
                id
            }
        };
        self.store.write(&id, key, value)
    }
}

fn generate_session_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_ID_LEN)
        .map(char::from)
        .collect()
}

/// Value of the named cookie across all `Cookie` headers.
fn session_id_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn store() -> SessionStore {
        SessionStore::new("SITE_SESSION", Duration::from_secs(60))
    }

    fn cookie_headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    // ==================== Cookie Parsing Tests ====================

    #[test]
    fn test_session_id_from_headers() {
        let headers = cookie_headers("theme=dark; SITE_SESSION=abc123; other=1");
        assert_eq!(
            session_id_from_headers(&headers, "SITE_SESSION"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_session_id_missing_or_empty() {
        assert_eq!(session_id_from_headers(&HeaderMap::new(), "SITE_SESSION"), None);
        assert_eq!(
            session_id_from_headers(&cookie_headers("SITE_SESSION="), "SITE_SESSION"),
            None
        );
        assert_eq!(
            session_id_from_headers(&cookie_headers("NOT_SITE_SESSION=x"), "SITE_SESSION"),
            None
        );
    }

    #[test]
    fn test_generated_ids_are_alphanumeric() {
        let id = generate_session_id();
        assert_eq!(id.len(), SESSION_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(id, generate_session_id());
    }

    // ==================== Handle Tests ====================

    #[test]
    fn test_new_visitor_has_no_session_until_write() {
        let store = store();
        let mut handle = store.attach(&HeaderMap::new());

        assert_eq!(handle.id(), None);
        assert_eq!(handle.get("language"), Ok(None));
        assert!(store.is_empty());
        assert_eq!(handle.set_cookie(), None);

        handle.set("language", "en").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(handle.get("language"), Ok(Some("en".to_string())));

        let cookie = handle.set_cookie().expect("Should issue a cookie");
        assert!(cookie.starts_with("SITE_SESSION="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
    }

    #[test]
    fn test_returning_visitor_sees_stored_values() {
        let store = store();
        let mut first = store.attach(&HeaderMap::new());
        first.set("language", "en").unwrap();
        let id = first.id().unwrap().to_string();

        let second = store.attach(&cookie_headers(&format!("SITE_SESSION={}", id)));
        assert_eq!(second.id(), Some(id.as_str()));
        assert_eq!(second.get("language"), Ok(Some("en".to_string())));
        // no new cookie for an existing session
        assert_eq!(second.set_cookie(), None);
    }

    #[test]
    fn test_unknown_session_id_is_not_adopted() {
        let store = store();
        let mut handle = store.attach(&cookie_headers("SITE_SESSION=forged"));
        assert_eq!(handle.id(), None);

        handle.set("language", "es").unwrap();
        assert_ne!(handle.id(), Some("forged"));
    }

    // ==================== Expiry Tests ====================

    #[test]
    fn test_expired_session_is_absent() {
        let store = SessionStore::new("SITE_SESSION", Duration::ZERO);
        let mut first = store.attach(&HeaderMap::new());
        first.set("language", "en").unwrap();
        let id = first.id().unwrap().to_string();

        std::thread::sleep(Duration::from_millis(5));

        let second = store.attach(&cookie_headers(&format!("SITE_SESSION={}", id)));
        assert_eq!(second.id(), None);
        assert_eq!(store.read(&id, "language"), Ok(None));
    }

    #[test]
    fn test_purge_expired() {
        let store = SessionStore::new("SITE_SESSION", Duration::ZERO);
        let mut handle = store.attach(&HeaderMap::new());
        handle.set("language", "en").unwrap();

        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(store.purge_expired(), Ok(1));
        assert!(store.is_empty());
    }

    #[test]
    fn test_purge_keeps_live_sessions() {
        let store = store();
        let mut handle = store.attach(&HeaderMap::new());
        handle.set("language", "en").unwrap();

        assert_eq!(store.purge_expired(), Ok(0));
        assert_eq!(store.len(), 1);
    }

    // ==================== Failure Tests ====================

    #[test]
    fn test_poisoned_store_reports_unavailable() {
        let store = store();
        store.poison();

        let mut handle = store.attach(&HeaderMap::new());
        assert_eq!(handle.set("language", "en"), Err(SessionError::Unavailable));
        assert_eq!(store.purge_expired(), Err(SessionError::Unavailable));
    }

    #[test]
    fn test_poisoned_store_still_counts_sessions() {
        let store = store();
        let mut handle = store.attach(&HeaderMap::new());
        handle.set("language", "en").unwrap();
        store.poison();

        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
    }

    #[test]
    fn test_map_session_state() {
        let mut map: HashMap<String, String> = HashMap::new();
        assert_eq!(SessionState::get(&map, "language"), Ok(None));
        SessionState::set(&mut map, "language", "es").unwrap();
        assert_eq!(SessionState::get(&map, "language"), Ok(Some("es".to_string())));
    }
}

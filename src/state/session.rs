use crate::api::ApiError;
use crate::storage::{LocalTokenStorage, TokenStorage, TOKEN_KEY};
use std::sync::{Arc, Mutex};

pub(crate) const LOGIN_PATH: &str = "/login";

/// Process-wide holder of the bearer token.
///
/// The token is read from storage on first access and cached. A `storage`
/// event from another tab calls [`SessionStore::invalidate`], so the next read
/// goes back to storage. Last write wins; there is only one writer per tab.
#[derive(Clone)]
pub(crate) struct SessionStore {
    storage: Arc<dyn TokenStorage>,
    /// `None` = not loaded yet.
    cached: Arc<Mutex<Option<Option<String>>>>,
}

impl SessionStore {
    pub fn new(storage: impl TokenStorage + 'static) -> Self {
        Self {
            storage: Arc::new(storage),
            cached: Arc::new(Mutex::new(None)),
        }
    }

    pub fn browser() -> Self {
        Self::new(LocalTokenStorage)
    }

    pub fn get_token(&self) -> Option<String> {
        let Ok(mut cached) = self.cached.lock() else {
            return self.storage.load();
        };
        cached.get_or_insert_with(|| self.storage.load()).clone()
    }

    pub fn set_token(&self, token: &str) {
        self.storage.store(token);
        if let Ok(mut cached) = self.cached.lock() {
            *cached = Some(Some(token.to_string()));
        }
    }

    pub fn clear_token(&self) {
        self.storage.remove();
        if let Ok(mut cached) = self.cached.lock() {
            *cached = Some(None);
        }
    }

    pub fn invalidate(&self) {
        if let Ok(mut cached) = self.cached.lock() {
            *cached = None;
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }
}

/// Whether a `storage` event touches the session. A `None` key means the
/// other tab called `localStorage.clear()`.
pub(crate) fn is_session_key(key: Option<&str>) -> bool {
    match key {
        None => true,
        Some(k) => k == TOKEN_KEY,
    }
}

/// Standard reaction to a failed authenticated call: an unauthorized answer
/// clears the session. Anything else is left to the caller. Returns whether
/// the error was unauthorized.
///
/// No navigation happens here. Guarded routes watch the session and send the
/// viewer to [`LOGIN_PATH`] when it ends, so there is a single redirect.
pub(crate) fn expire_on_unauthorized(session: &SessionStore, err: &ApiError) -> bool {
    if !err.is_unauthorized() {
        return false;
    }
    session.clear_token();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryTokenStorage;

    #[test]
    fn test_session_reads_storage_lazily_once() {
        let storage = MemoryTokenStorage::with_token("t1");
        let session = SessionStore::new(storage.clone());
        assert_eq!(storage.reads(), 0);

        assert_eq!(session.get_token().as_deref(), Some("t1"));
        assert_eq!(session.get_token().as_deref(), Some("t1"));
        assert_eq!(storage.reads(), 1);
    }

    #[test]
    fn test_session_set_and_clear() {
        let storage = MemoryTokenStorage::default();
        let session = SessionStore::new(storage.clone());
        assert!(!session.is_authenticated());

        session.set_token("abc");
        assert_eq!(session.get_token().as_deref(), Some("abc"));
        assert_eq!(storage.load().as_deref(), Some("abc"));

        session.clear_token();
        assert!(session.get_token().is_none());
        assert!(storage.load().is_none());
    }

    #[test]
    fn test_invalidate_picks_up_other_tab_login() {
        let shared = MemoryTokenStorage::default();
        let this_tab = SessionStore::new(shared.clone());
        let other_tab = SessionStore::new(shared.clone());

        assert!(this_tab.get_token().is_none());
        other_tab.set_token("from-other-tab");

        // Cached value is stale until the storage event arrives.
        assert!(this_tab.get_token().is_none());
        this_tab.invalidate();
        assert_eq!(this_tab.get_token().as_deref(), Some("from-other-tab"));
    }

    #[test]
    fn test_invalidate_picks_up_other_tab_logout() {
        let shared = MemoryTokenStorage::with_token("t");
        let this_tab = SessionStore::new(shared.clone());
        let other_tab = SessionStore::new(shared);

        assert!(this_tab.is_authenticated());
        other_tab.clear_token();
        this_tab.invalidate();
        assert!(!this_tab.is_authenticated());
    }

    #[test]
    fn test_session_key_filter() {
        assert!(is_session_key(Some(TOKEN_KEY)));
        assert!(is_session_key(None));
        assert!(!is_session_key(Some("theme")));
    }

    #[test]
    fn test_unauthorized_expires_session() {
        let session = SessionStore::new(MemoryTokenStorage::with_token("t"));

        assert!(expire_on_unauthorized(&session, &ApiError::unauthorized()));
        assert!(session.get_token().is_none());
    }

    #[test]
    fn test_repeated_unauthorized_ends_session_once() {
        let session = SessionStore::new(MemoryTokenStorage::with_token("t"));
        let mut endings = 0;

        // Two requests in flight both come back 401.
        for _ in 0..2 {
            let was_signed_in = session.is_authenticated();
            expire_on_unauthorized(&session, &ApiError::unauthorized());
            if was_signed_in && !session.is_authenticated() {
                endings += 1;
            }
        }

        assert_eq!(endings, 1);
    }

    #[test]
    fn test_other_errors_leave_session_alone() {
        let session = SessionStore::new(MemoryTokenStorage::with_token("t"));

        let err = ApiError::http(500, "boom".to_string(), "Request failed");
        assert!(!expire_on_unauthorized(&session, &err));
        assert_eq!(session.get_token().as_deref(), Some("t"));
    }
}

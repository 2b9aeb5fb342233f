pub(crate) mod session;

use crate::api::{ApiClient, ApiError};
use leptos::prelude::*;
use session::{expire_on_unauthorized, is_session_key, SessionStore};

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub session: StoredValue<SessionStore>,

    /// Reactive mirror of the session token. Route guards read this.
    pub api_client: RwSignal<ApiClient>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_session(SessionStore::browser())
    }

    pub fn with_session(session: SessionStore) -> Self {
        let client = ApiClient::from_env(session.get_token());
        Self {
            session: StoredValue::new(session),
            api_client: RwSignal::new(client),
        }
    }

    pub fn sign_in(&self, token: String) {
        self.session.with_value(|s| s.set_token(&token));
        self.api_client.update(|c| c.set_token(token));
    }

    pub fn sign_out(&self) {
        self.session.with_value(|s| s.clear_token());
        self.api_client.update(|c| c.logout());
    }

    /// Called for `storage` events raised by other tabs.
    pub fn on_storage_changed(&self, key: Option<&str>) {
        if !is_session_key(key) {
            return;
        }
        let token = self.session.with_value(|s| {
            s.invalidate();
            s.get_token()
        });
        if self.api_client.with_untracked(|c| c.token != token) {
            self.api_client.update(|c| c.token = token);
        }
    }

    /// Unauthorized → session cleared and the reactive client logged out,
    /// which sends guarded routes to the login page. Returns whether it
    /// fired; callers handle every other error themselves.
    pub fn handle_api_error(&self, err: &ApiError) -> bool {
        let fired = self
            .session
            .with_value(|s| expire_on_unauthorized(s, err));
        if fired && self.api_client.with_untracked(|c| c.is_authenticated()) {
            self.api_client.update(|c| c.logout());
        }
        fired
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);

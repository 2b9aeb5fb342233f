mod api;
mod app;
mod auth;
mod components;
mod dashboard;
mod folders;
mod models;
mod pages;
mod state;
mod storage;
mod util;
mod wizard;

use crate::app::App;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::api::ApiError;
    use crate::state::AppState;
    use crate::storage::{LocalTokenStorage, TokenStorage, TOKEN_KEY};
    use leptos::prelude::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_sign_in_and_out_reach_local_storage() {
        let storage = LocalTokenStorage;
        storage.remove();

        let state = AppState::new();
        assert!(!state.api_client.get_untracked().is_authenticated());

        state.sign_in("t1".to_string());
        assert_eq!(storage.load().as_deref(), Some("t1"));
        assert!(state.api_client.get_untracked().is_authenticated());

        state.sign_out();
        assert!(storage.load().is_none());
        assert!(!state.api_client.get_untracked().is_authenticated());
    }

    #[wasm_bindgen_test]
    fn test_storage_event_picks_up_other_tab_token() {
        let storage = LocalTokenStorage;
        storage.remove();

        let state = AppState::new();
        state.session.with_value(|s| {
            s.get_token();
        });

        // Simulates a write from another tab.
        storage.store("from-other-tab");
        state.on_storage_changed(Some(TOKEN_KEY));
        assert_eq!(
            state.api_client.get_untracked().token.as_deref(),
            Some("from-other-tab")
        );

        storage.remove();
        state.on_storage_changed(None);
        assert!(!state.api_client.get_untracked().is_authenticated());
    }

    #[wasm_bindgen_test]
    fn test_unauthorized_signs_the_guard_out_once() {
        let storage = LocalTokenStorage;
        storage.remove();

        let state = AppState::new();
        state.sign_in("t1".to_string());

        // Count the transitions the route guard would observe.
        let mut endings = 0;
        let mut was_signed_in = true;
        for _ in 0..2 {
            assert!(state.handle_api_error(&ApiError::unauthorized()));
            let now = state.api_client.get_untracked().is_authenticated();
            if was_signed_in && !now {
                endings += 1;
            }
            was_signed_in = now;
        }

        assert_eq!(endings, 1);
        assert!(storage.load().is_none());
    }
}

/// The only key this client persists.
pub(crate) const TOKEN_KEY: &str = "token";

/// Durable key-value backing for the session token.
pub(crate) trait TokenStorage: Send + Sync {
    fn load(&self) -> Option<String>;
    fn store(&self, token: &str);
    fn remove(&self);
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// `window.localStorage`, shared by every tab of the origin.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LocalTokenStorage;

impl TokenStorage for LocalTokenStorage {
    fn load(&self) -> Option<String> {
        local_storage()
            .and_then(|s| s.get_item(TOKEN_KEY).ok().flatten())
            .filter(|t| !t.trim().is_empty())
    }

    fn store(&self, token: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(TOKEN_KEY, token);
        }
    }

    fn remove(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryTokenStorage;

#[cfg(test)]
mod memory {
    use super::TokenStorage;
    use std::sync::{Arc, Mutex};

    /// In-process stand-in for `localStorage`. Clones share the same slot,
    /// which lets tests play the part of a second tab.
    #[derive(Clone, Default)]
    pub(crate) struct MemoryTokenStorage {
        slot: Arc<Mutex<Option<String>>>,
        reads: Arc<Mutex<usize>>,
    }

    impl MemoryTokenStorage {
        pub fn with_token(token: &str) -> Self {
            let s = Self::default();
            s.store(token);
            s
        }

        pub fn reads(&self) -> usize {
            self.reads.lock().map(|r| *r).unwrap_or(0)
        }
    }

    impl TokenStorage for MemoryTokenStorage {
        fn load(&self) -> Option<String> {
            if let Ok(mut r) = self.reads.lock() {
                *r += 1;
            }
            self.slot.lock().ok().and_then(|s| s.clone())
        }

        fn store(&self, token: &str) {
            if let Ok(mut s) = self.slot.lock() {
                *s = Some(token.to_string());
            }
        }

        fn remove(&self) {
            if let Ok(mut s) = self.slot.lock() {
                *s = None;
            }
        }
    }
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_local_token_storage_roundtrip() {
        let s = LocalTokenStorage;
        s.remove();
        assert!(s.load().is_none());

        s.store("t1");
        assert_eq!(s.load().as_deref(), Some("t1"));

        s.remove();
        assert!(s.load().is_none());
    }

    #[wasm_bindgen_test]
    fn test_blank_token_reads_as_absent() {
        let s = LocalTokenStorage;
        s.store("   ");
        assert!(s.load().is_none());
        s.remove();
    }
}

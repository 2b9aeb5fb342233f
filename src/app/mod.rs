use crate::pages::{DashboardPage, LoginPage, RequireAuth, RootPage, SignupPage};
use crate::state::{AppContext, AppState};
use leptos::ev;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    let app_state = AppState::new();
    provide_context(AppContext(app_state));

    // Another tab signing in or out changes the stored token under us.
    let _storage_handle = window_event_listener(ev::storage, move |ev: web_sys::StorageEvent| {
        app_state.on_storage_changed(ev.key().as_deref());
    });

    view! {
        <Router>
            <Routes fallback=|| view! { <Redirect path="/" /> }>
                <Route path=path!("login") view=LoginPage />
                <Route path=path!("signup") view=SignupPage />
                <Route path=path!("dashboard") view=move || view! {
                    <RequireAuth>
                        <DashboardPage />
                    </RequireAuth>
                } />
                <Route path=path!("") view=RootPage />
            </Routes>
        </Router>
    }
}
